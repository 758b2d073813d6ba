//! Engine error type

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::types::RarityTier;
use thiserror::Error;

/// Errors reported by the pity-rate engine
#[derive(Error, Debug)]
pub enum GachaError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No characters in the {0} pool")]
    EmptyPool(RarityTier),
    #[error("Pity store error: {0}")]
    Store(#[from] StoreError),
}

impl GachaError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        GachaError::InvalidArgument(msg.into())
    }

    pub(crate) fn misconfigured(msg: impl Into<String>) -> Self {
        GachaError::Configuration(ConfigError::ValidationError(msg.into()))
    }
}

/// Validate a pity counter coming from an untyped source (database row, JSON, user input)
pub fn validate_counter(raw: i64) -> Result<u32, GachaError> {
    if raw < 0 {
        return Err(GachaError::invalid_argument(format!(
            "pity counter must be non-negative, got {}",
            raw
        )));
    }
    u32::try_from(raw)
        .map_err(|_| GachaError::invalid_argument(format!("pity counter {} is out of range", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_counter() {
        assert_eq!(validate_counter(0).unwrap(), 0);
        assert_eq!(validate_counter(99).unwrap(), 99);
        assert!(matches!(validate_counter(-1), Err(GachaError::InvalidArgument(_))));
        assert!(matches!(
            validate_counter(i64::from(u32::MAX) + 1),
            Err(GachaError::InvalidArgument(_))
        ));
    }
}
