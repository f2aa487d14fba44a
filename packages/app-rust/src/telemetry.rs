use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.filter`. Logs go to stderr so
/// stdout stays free for command output.
///
/// # Errors
///
/// Fails on an unparsable filter directive, or if a global subscriber is
/// already installed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error() {
        let config = LogConfig::default();
        // The first call may lose to another test installing a subscriber.
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
        assert!(init_tracing(&LogConfig {
            json: true,
            ..LogConfig::default()
        })
        .is_err());
    }
}
