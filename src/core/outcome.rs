//! Explicit "data or no data" result for the fetch stages.

use tracing::error;

/// Result of a single fetch. A failed fetch is logged once, when the outcome is
/// built, and afterwards only carries its reason.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Available(T),
    Unavailable { source: &'static str, reason: String },
}

impl<T> FetchOutcome<T> {
    pub fn from_result(source: &'static str, result: anyhow::Result<T>) -> Self {
        match result {
            Ok(data) => FetchOutcome::Available(data),
            Err(e) => {
                let reason = format!("{e:#}");
                error!(source, error = %reason, "Fetch failed, section will be omitted");
                FetchOutcome::Unavailable { source, reason }
            }
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            FetchOutcome::Available(data) => Some(data),
            FetchOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FetchOutcome::Available(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_ok_result_is_available() {
        let outcome = FetchOutcome::from_result("gold price", Ok(42.0));
        assert!(outcome.is_available());
        assert_eq!(outcome.available(), Some(&42.0));
    }

    #[test]
    fn test_error_result_keeps_full_reason() {
        let result: anyhow::Result<f64> = Err(anyhow!("HTTP error: 403 Forbidden"))
            .context("Failed to fetch XAU/USD");
        let outcome = FetchOutcome::from_result("gold price", result);

        assert!(!outcome.is_available());
        assert!(outcome.available().is_none());
        assert_eq!(
            outcome,
            FetchOutcome::Unavailable {
                source: "gold price",
                reason: "Failed to fetch XAU/USD: HTTP error: 403 Forbidden".to_string(),
            }
        );
    }
}
