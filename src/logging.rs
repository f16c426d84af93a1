//! Tracing subscriber bootstrap

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `default_filter`
/// when `RUST_LOG` is unset
///
/// A second call leaves the first subscriber in place and returns `Ok(false)`.
pub fn init_tracing(default_filter: &str) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| anyhow!("invalid log filter '{}': {}", default_filter, e))?,
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_not_an_error() {
        init_tracing("debug").unwrap();
        assert!(!init_tracing("debug").unwrap());
    }
}
