use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEVELOPMENT_FILTER: &str = "spystore=debug,tower_http=debug";
const PRODUCTION_FILTER: &str = "spystore=info,tower_http=info";

/// Initialize tracing. `RUST_LOG` overrides the mode's default filter.
pub fn init_telemetry(is_development: bool) -> Result<(), anyhow::Error> {
    let default_filter = if is_development {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };

    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(console_fmt)
        .try_init()?;

    tracing::debug!(is_development, "Tracing initialized");
    Ok(())
}
