use crate::Environment;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Default filter for production: request traces and catalog events at info,
/// driver chatter only when it warns.
const PRODUCTION_FILTER: &str = "info,tower_http=info,mongodb=warn";
/// Default filter for development: catalog spans at debug, including the
/// connectivity probe and per-request validation outcomes.
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,mongodb=info";

/// Install color-eyre for start-up failures (bad `PORT`, unbindable listener).
///
/// Safe to call more than once.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global subscriber for the medicine API.
///
/// `APP_ENV=production` emits flattened JSON events; anything else uses the
/// pretty formatter. `RUST_LOG` overrides the default filter, e.g.
/// `RUST_LOG=domain_catalog=trace,mongodb=debug` to follow document store
/// calls. An `ErrorLayer` keeps span traces so `#[instrument]`ed catalog
/// operations show up in eyre reports.
///
/// A second call is a no-op, which keeps tests that share a process quiet.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if environment.is_production() {
            PRODUCTION_FILTER
        } else {
            DEVELOPMENT_FILTER
        })
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if result.is_ok() {
        tracing::info!(?environment, "Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        assert!(EnvFilter::try_new(PRODUCTION_FILTER).is_ok());
        assert!(EnvFilter::try_new(DEVELOPMENT_FILTER).is_ok());
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_with_rust_log_override() {
        temp_env::with_var("RUST_LOG", Some("domain_catalog=trace"), || {
            init_tracing(&Environment::Production);
        });
    }
}
