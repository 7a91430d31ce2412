//! Logging setup
//!
//! Structured logs go to stderr so they never interleave with generated
//! output or the summary printed on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the level:
/// 0 → `warn`, 1 → `info`, 2 or more → `debug`.
///
/// # Example
///
/// ```rust,no_run
/// use table_scaffold::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(1)?;
/// tracing::info!("Generation started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,table_scaffold=info",
        _ => "debug,sqlx=warn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).starts_with("info"));
        assert!(default_directive(5).starts_with("debug"));
    }
}
