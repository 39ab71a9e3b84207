use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{self, EntitySchema};

/// A record type backed by a registry schema and a collection
pub trait Entity: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    fn schema() -> &'static EntitySchema;

    /// Collection the record is persisted to
    fn collection() -> &'static str {
        Self::schema().collection.unwrap_or(Self::schema().name)
    }
}

fn default_true() -> bool {
    true
}

/// Pharmaceuticals catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    /// Product commercial name
    pub name: String,
    /// Internal SKU or code
    pub sku: String,
    /// e.g. tablet, capsule, injection
    pub dosage_form: String,
    /// e.g. 500 mg, 5 mg/mL
    pub strength: String,
    pub manufacturer: String,
    pub therapeutic_class: Option<String>,
    /// Prescription required
    #[serde(default = "default_true")]
    pub rx_required: bool,
    /// Requires cold-chain handling
    #[serde(default)]
    pub cold_chain: bool,
    /// Unit price
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Units in stock
    #[validate(range(min = 0))]
    pub stock: i64,
}

/// B2B customer (pharmacy, clinic, hospital)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Customer {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    /// pharmacy | clinic | hospital | distributor | other
    pub organization_type: Option<String>,
    pub address: Option<String>,
}

/// Order line, embedded in [`Order`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    pub sku: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// Customer order. Totals are stored as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Order {
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub tax: f64,
    #[validate(range(min = 0.0))]
    pub total: f64,
    pub notes: Option<String>,
}

/// Contact or RFQ inquiry from the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Inquiry {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub message: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}

impl Entity for Product {
    fn schema() -> &'static EntitySchema {
        &schema::PRODUCT
    }
}

impl Entity for Customer {
    fn schema() -> &'static EntitySchema {
        &schema::CUSTOMER
    }
}

impl Entity for Order {
    fn schema() -> &'static EntitySchema {
        &schema::ORDER
    }
}

impl Entity for Inquiry {
    fn schema() -> &'static EntitySchema {
        &schema::INQUIRY
    }
}

/// Response body of every create endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedId {
    /// Store-generated identifier
    pub id: String,
}
