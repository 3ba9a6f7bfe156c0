use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan};

const LOG_ENV: &str = "SYMVAL_LOG";

/// Installs the stderr subscriber. `SYMVAL_LOG` takes precedence over
/// `verbosity`, which only sets the default level.
pub fn init_logging(verbosity: u8) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    let default_level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // Spans only mark which kind and operator a case belongs to.
    let span_events = if verbosity > 1 {
        FmtSpan::ENTER
    } else {
        FmtSpan::NONE
    };
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
