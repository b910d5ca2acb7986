//! Ledger configuration

use crate::types::Points;

/// Default upper bound for any user's balance
pub const MAX_POINT: Points = 1_000_000;

/// System-wide ledger settings, fixed for the lifetime of a ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Largest balance a charge may produce
    pub max_point: Points,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_point: MAX_POINT,
        }
    }
}

impl LedgerConfig {
    /// Create a new LedgerConfig, falling back to the default limit when
    /// `max_point` is not positive
    pub fn new(max_point: Points) -> Self {
        let default = Self::default();

        let max_point = if max_point <= 0 {
            tracing::warn!(
                max_point,
                default = default.max_point,
                "Invalid max_point, using default"
            );
            default.max_point
        } else {
            max_point
        };

        Self { max_point }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_uses_max_point() {
        assert_eq!(LedgerConfig::default().max_point, 1_000_000);
    }

    #[rstest]
    #[case::custom(5_000, 5_000)]
    #[case::zero_falls_back(0, MAX_POINT)]
    #[case::negative_falls_back(-1, MAX_POINT)]
    fn test_new(#[case] requested: Points, #[case] expected: Points) {
        assert_eq!(LedgerConfig::new(requested).max_point, expected);
    }
}
