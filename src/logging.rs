use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the log filter
pub const LOG_ENV: &str = "COLLEGE_RANK_LOG";

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "college_rank=debug"
    } else {
        "college_rank=warn"
    }
}

/// Pick the filter directive: the app variable, then `RUST_LOG`, then the
/// verbosity default. Unset or blank values are skipped.
pub fn select_directive(app: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    app.into_iter()
        .chain(rust_log)
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| default_directive(verbose).to_string())
}

/// Install the global stderr subscriber.
///
/// `COLLEGE_RANK_LOG` wins over `RUST_LOG`; either takes precedence over
/// `verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let directive = select_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        verbose,
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directive, e);
        EnvFilter::new(default_directive(verbose))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
