//! Static registry of entity schemas.
//!
//! Every persisted entity has an [`EntitySchema`] describing its fields, their
//! kinds, presence rules and numeric constraints. The registry drives two
//! things: checking untyped JSON payloads before they are deserialized, and
//! the `/schema` introspection endpoint.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::validation::{ValidationFailure, Violation, ViolationCode};

/// JSON shape expected for a field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    /// String holding a well-formed email address
    Email,
    Boolean,
    /// Any JSON number
    Number,
    /// JSON number without a fractional part; `100.0` counts as integral
    Integer,
    /// Array of embedded records
    List(&'static EntitySchema),
}

/// Integral value of a JSON number, accepting floats such as `100.0`
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    let number = value.as_f64()?;
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    (number.fract() == 0.0 && in_range).then_some(number as i64)
}

/// Email syntax check with a dotted domain, so `dana@pharmacy` is rejected
fn is_email(candidate: &str) -> bool {
    let Some((_, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    candidate.validate_email()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Whether a field may be omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// May be omitted or null
    Optional,
    /// May be omitted; the default is applied on deserialization
    Defaulted(&'static str),
}

/// Numeric bound on a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// value >= 0
    NonNegative,
    /// value > 0
    Positive,
}

impl Constraint {
    fn admits(self, value: f64) -> bool {
        match self {
            Constraint::NonNegative => value >= 0.0,
            Constraint::Positive => value > 0.0,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Constraint::NonNegative => "must be greater than or equal to 0",
            Constraint::Positive => "must be greater than 0",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Constraint::NonNegative => ">= 0",
            Constraint::Positive => "> 0",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
            constraint: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
            constraint: None,
        }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Defaulted(default),
            constraint: None,
        }
    }

    pub const fn constrained(self, constraint: Constraint) -> Self {
        Self {
            constraint: Some(constraint),
            ..self
        }
    }

    /// Human-readable type descriptor, e.g. `number (>= 0)` or `optional[string]`
    pub fn descriptor(&self) -> String {
        let base = match self.kind {
            FieldKind::String => "string".to_string(),
            FieldKind::Email => "email".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Integer => "integer".to_string(),
            FieldKind::List(schema) => format!("list[{}]", schema.title),
        };
        let mut descriptor = match self.presence {
            Presence::Optional => format!("optional[{base}]"),
            _ => base,
        };
        if let Some(constraint) = self.constraint {
            descriptor.push_str(&format!(" ({})", constraint.symbol()));
        }
        if let Presence::Defaulted(default) = self.presence {
            descriptor.push_str(&format!(" = {default}"));
        }
        descriptor
    }

    fn check(&self, value: Option<&Value>, path: &str, out: &mut Vec<Violation>) {
        let value = match (value, self.presence) {
            (None, Presence::Required) | (Some(Value::Null), Presence::Required) => {
                out.push(Violation::required(path));
                return;
            }
            (None, _) | (Some(Value::Null), Presence::Optional) => return,
            (Some(value), _) => value,
        };

        match self.kind {
            FieldKind::String => {
                if !value.is_string() {
                    out.push(self.type_mismatch(path));
                }
            }
            FieldKind::Email => match value.as_str() {
                Some(email) if is_email(email) => {}
                Some(_) => out.push(Violation::new(
                    path,
                    ViolationCode::Email,
                    "value is not a valid email address",
                )),
                None => out.push(self.type_mismatch(path)),
            },
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    out.push(self.type_mismatch(path));
                }
            }
            FieldKind::Number => match value.as_f64() {
                Some(number) => self.check_constraint(number, path, out),
                None => out.push(self.type_mismatch(path)),
            },
            FieldKind::Integer => match as_integer(value) {
                Some(number) => self.check_constraint(number as f64, path, out),
                None => out.push(self.type_mismatch(path)),
            },
            FieldKind::List(schema) => match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = format!("{path}[{index}]");
                        match item.as_object() {
                            Some(object) => {
                                schema.check_object(object, &format!("{item_path}."), out)
                            }
                            None => out.push(Violation::new(
                                item_path,
                                ViolationCode::InvalidType,
                                format!("expected {} object", schema.title),
                            )),
                        }
                    }
                }
                None => out.push(self.type_mismatch(path)),
            },
        }
    }

    fn normalize(&self, value: &mut Value) {
        match self.kind {
            FieldKind::Integer if !value.is_i64() => {
                if let Some(number) = as_integer(value) {
                    *value = Value::from(number);
                }
            }
            FieldKind::List(schema) => {
                if let Some(items) = value.as_array_mut() {
                    for item in items {
                        schema.normalize(item);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_constraint(&self, value: f64, path: &str, out: &mut Vec<Violation>) {
        if let Some(constraint) = self.constraint {
            if !constraint.admits(value) {
                out.push(Violation::new(path, ViolationCode::Range, constraint.message()));
            }
        }
    }

    fn type_mismatch(&self, path: &str) -> Violation {
        let expected = match self.kind {
            FieldKind::String => "string".to_string(),
            FieldKind::Email => "email string".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Integer => "integer".to_string(),
            FieldKind::List(schema) => format!("list of {}", schema.title),
        };
        Violation::new(path, ViolationCode::InvalidType, format!("expected {expected}"))
    }
}

/// Declared shape of one entity
#[derive(Debug)]
pub struct EntitySchema {
    /// Registry key, also used in error payloads
    pub name: &'static str,
    /// Type name used in descriptors of embedding fields
    pub title: &'static str,
    /// Collection the entity is persisted to; `None` for embedded-only records
    pub collection: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    /// Check an untyped payload against this schema.
    ///
    /// Collects every violation: missing required fields, wrong JSON types,
    /// failed numeric constraints and malformed emails, including those inside
    /// embedded lists. Unknown fields are ignored.
    pub fn check(&self, payload: &Value) -> Result<(), ValidationFailure> {
        let mut violations = Vec::new();
        match payload.as_object() {
            Some(object) => self.check_object(object, "", &mut violations),
            None => violations.push(Violation::new(
                "body",
                ViolationCode::InvalidType,
                format!("expected {} object", self.title),
            )),
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(self.name, violations))
        }
    }

    fn check_object(&self, object: &Map<String, Value>, prefix: &str, out: &mut Vec<Violation>) {
        for field in self.fields {
            let path = format!("{prefix}{}", field.name);
            field.check(object.get(field.name), &path, out);
        }
    }

    /// Rewrite integral floats in integer fields (`100.0` to `100`) so a
    /// payload that passed [`EntitySchema::check`] deserializes into `i64`.
    pub fn normalize(&self, payload: &mut Value) {
        let Some(object) = payload.as_object_mut() else {
            return;
        };
        for field in self.fields {
            if let Some(value) = object.get_mut(field.name) {
                field.normalize(value);
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Field name to descriptor mapping, in declaration order
    pub fn describe(&'static self) -> SchemaDescription {
        SchemaDescription(self)
    }
}

/// Serializes as `{ field: descriptor, ... }` keeping declaration order
#[derive(Debug, Clone, Copy)]
pub struct SchemaDescription(&'static EntitySchema);

impl Serialize for SchemaDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.fields.len()))?;
        for field in self.0.fields {
            map.serialize_entry(field.name, &field.descriptor())?;
        }
        map.end()
    }
}

/// Serializes the whole registry as `{ entity: { field: descriptor } }`
#[derive(Debug, Clone, Copy)]
pub struct SchemaCatalog(&'static [&'static EntitySchema]);

impl SchemaCatalog {
    pub fn registry() -> Self {
        Self(&ENTITIES)
    }

    pub fn entities(&self) -> &'static [&'static EntitySchema] {
        self.0
    }
}

impl Serialize for SchemaCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for schema in self.0 {
            map.serialize_entry(schema.name, &schema.describe())?;
        }
        map.end()
    }
}

use Constraint::{NonNegative, Positive};
use FieldKind::{Boolean, Email, Integer, List, Number, String as Text};

pub static PRODUCT: EntitySchema = EntitySchema {
    name: "product",
    title: "Product",
    collection: Some("product"),
    fields: &[
        FieldSpec::required("name", Text),
        FieldSpec::required("sku", Text),
        FieldSpec::required("dosage_form", Text),
        FieldSpec::required("strength", Text),
        FieldSpec::required("manufacturer", Text),
        FieldSpec::optional("therapeutic_class", Text),
        FieldSpec::defaulted("rx_required", Boolean, "true"),
        FieldSpec::defaulted("cold_chain", Boolean, "false"),
        FieldSpec::required("price", Number).constrained(NonNegative),
        FieldSpec::required("stock", Integer).constrained(NonNegative),
    ],
};

pub static CUSTOMER: EntitySchema = EntitySchema {
    name: "customer",
    title: "Customer",
    collection: Some("customer"),
    fields: &[
        FieldSpec::required("name", Text),
        FieldSpec::required("email", Email),
        FieldSpec::optional("phone", Text),
        FieldSpec::optional("organization_type", Text),
        FieldSpec::optional("address", Text),
    ],
};

pub static ORDER_ITEM: EntitySchema = EntitySchema {
    name: "order_item",
    title: "OrderItem",
    collection: None,
    fields: &[
        FieldSpec::required("sku", Text),
        FieldSpec::required("quantity", Integer).constrained(Positive),
        FieldSpec::required("price", Number).constrained(NonNegative),
    ],
};

pub static ORDER: EntitySchema = EntitySchema {
    name: "order",
    title: "Order",
    collection: Some("order"),
    fields: &[
        FieldSpec::required("customer_name", Text),
        FieldSpec::required("customer_email", Email),
        FieldSpec::required("items", List(&ORDER_ITEM)),
        FieldSpec::required("subtotal", Number).constrained(NonNegative),
        FieldSpec::defaulted("tax", Number, "0").constrained(NonNegative),
        FieldSpec::required("total", Number).constrained(NonNegative),
        FieldSpec::optional("notes", Text),
    ],
};

pub static INQUIRY: EntitySchema = EntitySchema {
    name: "inquiry",
    title: "Inquiry",
    collection: Some("inquiry"),
    fields: &[
        FieldSpec::required("name", Text),
        FieldSpec::required("email", Email),
        FieldSpec::required("message", Text),
        FieldSpec::optional("company", Text),
        FieldSpec::optional("phone", Text),
    ],
};

/// Persisted entities exposed through introspection
pub static ENTITIES: [&EntitySchema; 4] = [&PRODUCT, &CUSTOMER, &ORDER, &INQUIRY];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paracetamol() -> Value {
        json!({
            "name": "Paracetamol",
            "sku": "PARA500",
            "dosage_form": "tablet",
            "strength": "500 mg",
            "manufacturer": "Acme",
            "price": 2.5,
            "stock": 100
        })
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(PRODUCT.check(&paracetamol()).is_ok());
    }

    #[test]
    fn test_negative_price_references_price() {
        let mut payload = paracetamol();
        payload["price"] = json!(-0.01);

        let failure = PRODUCT.check(&payload).unwrap_err();
        assert_eq!(failure.entity, "product");
        assert!(failure.references("price"));
        assert_eq!(failure.violations.len(), 1);
        assert_eq!(failure.violations[0].code, ViolationCode::Range);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let payload = json!({
            "name": "Paracetamol",
            "sku": 500,
            "price": -1,
            "stock": 1.5,
            "rx_required": "yes"
        });

        let failure = PRODUCT.check(&payload).unwrap_err();
        let fields: Vec<&str> = failure.fields().collect();
        assert_eq!(
            fields,
            vec![
                "sku",
                "dosage_form",
                "strength",
                "manufacturer",
                "rx_required",
                "price",
                "stock"
            ]
        );
    }

    #[test]
    fn test_optional_null_is_accepted_but_defaulted_null_is_not() {
        let mut payload = paracetamol();
        payload["therapeutic_class"] = Value::Null;
        assert!(PRODUCT.check(&payload).is_ok());

        payload["cold_chain"] = Value::Null;
        let failure = PRODUCT.check(&payload).unwrap_err();
        assert!(failure.references("cold_chain"));
        assert_eq!(failure.violations[0].code, ViolationCode::InvalidType);
    }

    #[test]
    fn test_required_null_is_missing() {
        let mut payload = paracetamol();
        payload["sku"] = Value::Null;
        let failure = PRODUCT.check(&payload).unwrap_err();
        assert_eq!(failure.violations[0].code, ViolationCode::Required);
    }

    #[test]
    fn test_non_object_body_rejected() {
        let failure = INQUIRY.check(&json!(["not", "an", "object"])).unwrap_err();
        assert!(failure.references("body"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let customer = json!({ "name": "Northside Pharmacy", "email": "not-an-email" });
        let failure = CUSTOMER.check(&customer).unwrap_err();
        assert!(failure.references("email"));
        assert_eq!(failure.violations[0].code, ViolationCode::Email);

        let inquiry = json!({ "name": "Dana", "email": "dana@", "message": "RFQ" });
        assert!(INQUIRY.check(&inquiry).unwrap_err().references("email"));
    }

    #[test]
    fn test_email_domain_needs_a_dot() {
        for email in ["dana@pharmacy", "dana@.pharmacy", "dana@pharmacy."] {
            let inquiry = json!({ "name": "Dana", "email": email, "message": "RFQ" });
            let failure = INQUIRY.check(&inquiry).unwrap_err();
            assert!(failure.references("email"), "{email} should be rejected");
            assert_eq!(failure.violations[0].code, ViolationCode::Email);
        }

        let inquiry = json!({ "name": "Dana", "email": "dana@pharmacy.example", "message": "RFQ" });
        assert!(INQUIRY.check(&inquiry).is_ok());
    }

    #[test]
    fn test_integral_float_accepted_for_integer_fields() {
        let mut payload = paracetamol();
        payload["stock"] = json!(100.0);
        assert!(PRODUCT.check(&payload).is_ok());

        PRODUCT.normalize(&mut payload);
        assert_eq!(payload["stock"], json!(100));
        assert!(payload["stock"].is_i64());

        payload["stock"] = json!(100.5);
        let failure = PRODUCT.check(&payload).unwrap_err();
        assert!(failure.references("stock"));
        assert_eq!(failure.violations[0].code, ViolationCode::InvalidType);
    }

    #[test]
    fn test_normalize_reaches_embedded_items() {
        let mut order = json!({
            "customer_name": "Clinic",
            "customer_email": "orders@clinic.example",
            "items": [{ "sku": "PARA500", "quantity": 3.0, "price": 2.5 }],
            "subtotal": 7.5,
            "total": 7.5
        });
        assert!(ORDER.check(&order).is_ok());

        ORDER.normalize(&mut order);
        assert!(order["items"][0]["quantity"].is_i64());
        assert_eq!(order["items"][0]["price"], json!(2.5));
    }

    #[test]
    fn test_order_item_quantity_must_be_positive() {
        let order = json!({
            "customer_name": "Clinic",
            "customer_email": "orders@clinic.example",
            "items": [
                { "sku": "PARA500", "quantity": 3, "price": 2.5 },
                { "sku": "AMOX250", "quantity": 0, "price": 4.0 },
                { "sku": "IBU200", "quantity": -2, "price": 1.0 }
            ],
            "subtotal": 11.5,
            "total": 11.5
        });

        let failure = ORDER.check(&order).unwrap_err();
        let fields: Vec<&str> = failure.fields().collect();
        assert_eq!(fields, vec!["items[1].quantity", "items[2].quantity"]);
    }

    #[test]
    fn test_order_reports_email_and_items_together() {
        let order = json!({
            "customer_name": "Clinic",
            "customer_email": "clinic",
            "items": [{ "sku": "PARA500", "quantity": 0 }, "bogus"],
            "subtotal": 1.0,
            "total": 1.0
        });

        let failure = ORDER.check(&order).unwrap_err();
        assert!(failure.references("customer_email"));
        assert!(failure.references("items[0].quantity"));
        assert!(failure.references("items[0].price"));
        assert!(failure.references("items[1]"));
    }

    #[test]
    fn test_registry_has_four_entities() {
        let names: Vec<&str> = ENTITIES.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["product", "customer", "order", "inquiry"]);
        assert!(ENTITIES.iter().all(|s| s.collection == Some(s.name)));
    }

    #[test]
    fn test_catalog_serializes_descriptors() {
        let json = serde_json::to_value(SchemaCatalog::registry()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);

        assert_eq!(json["product"]["price"], "number (>= 0)");
        assert_eq!(json["product"]["therapeutic_class"], "optional[string]");
        assert_eq!(json["product"]["rx_required"], "boolean = true");
        assert_eq!(json["order"]["items"], "list[OrderItem]");
        assert_eq!(json["order"]["tax"], "number (>= 0) = 0");
        assert_eq!(json["customer"]["email"], "email");

        let inquiry_fields: Vec<&String> = json["inquiry"].as_object().unwrap().keys().collect();
        assert_eq!(inquiry_fields.len(), INQUIRY.fields.len());
    }
}
