use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Matching thresholds, weights and tolerances
/// - Batch parallelism threshold is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config
        .matching
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.batch.min_parallel_entries == 0 {
        return Err(ConfigError::ValidationError(
            "batch.min_parallel_entries cannot be 0".to_string(),
        ));
    }

    Ok(())
}
