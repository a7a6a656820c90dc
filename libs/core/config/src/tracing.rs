use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const PRODUCTION_FILTER: &str = "info,tower_http=info,sea_orm=warn";
const DEVELOPMENT_FILTER: &str = "info,tower_http=debug,sea_orm=info";

/// Installs the color-eyre panic and report hooks.
///
/// Reports show the source location but leave out the environment section.
/// Repeated calls keep the first installation.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Sets up the global subscriber for `environment`.
///
/// Production writes one flattened JSON object per event. Anything else gets the
/// pretty multi-line format with targets. `RUST_LOG` replaces the default directives.
/// An `ErrorLayer` is always present so eyre reports can show span traces.
///
/// Only the first call installs a subscriber.
pub fn init_tracing(environment: &Environment) {
    let production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if production {
            PRODUCTION_FILTER
        } else {
            DEVELOPMENT_FILTER
        })
    });

    let json = production.then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
    });
    let pretty = (!production).then(|| {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
    });

    let installed = tracing_subscriber::registry()
        .with(json)
        .with(pretty)
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!(environment = ?environment, "Tracing initialized");
    } else {
        debug!("Global subscriber already set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent_across_environments() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
        init_tracing(&Environment::Development);
        info!(item_id = 1, "logging after repeated init");
    }

    #[test]
    fn test_init_tracing_honours_rust_log() {
        temp_env::with_var("RUST_LOG", Some("todo_api=trace,sea_orm=warn"), || {
            init_tracing(&Environment::Production);
        });
    }

    #[test]
    fn test_default_filters_parse() {
        for directives in [PRODUCTION_FILTER, DEVELOPMENT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn test_install_color_eyre_twice() {
        install_color_eyre();
        install_color_eyre();
    }
}
