//! Prometheus registry for the matching metrics.

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Registry holding every core matching metric.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in callmatch_core::metrics::all_metrics() {
        if let Err(e) = registry.register(metric) {
            tracing::warn!(error = %e, "Failed to register metric");
        }
    }
    registry
});

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_core_metrics() {
        callmatch_core::metrics::ENTRY_ERRORS.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("callmatch_entry_errors_total"));
    }
}
