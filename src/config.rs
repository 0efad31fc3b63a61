//! Table configuration: bucket-count clamp bounds and resize hysteresis.

use crate::error::{Result, StrMapError};
use core::num::NonZeroUsize;

/// Smallest bucket array a table will ever hold.
pub const MIN_BUCKETS: usize = 1;
/// Largest bucket array a table will ever hold.
pub const MAX_BUCKETS: usize = 10_000;
/// Fraction around the target load factor inside which `resize` does nothing.
pub const LF_SLOP: f64 = 0.2;

/// Bucket-count bounds and resize slop shared by create and resize.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    min_buckets: NonZeroUsize,
    max_buckets: NonZeroUsize,
    lf_slop: f64,
}

impl TableConfig {
    /// Validated configuration: `1 <= min_buckets <= max_buckets` and
    /// `0 <= lf_slop < 1`.
    pub fn new(min_buckets: usize, max_buckets: usize, lf_slop: f64) -> Result<Self> {
        let min = NonZeroUsize::new(min_buckets)
            .ok_or(StrMapError::InvalidConfig("min_buckets must be at least 1"))?;
        let max = NonZeroUsize::new(max_buckets)
            .ok_or(StrMapError::InvalidConfig("max_buckets must be at least 1"))?;
        if min > max {
            return Err(StrMapError::InvalidConfig(
                "min_buckets must not exceed max_buckets",
            ));
        }
        if !(0.0..1.0).contains(&lf_slop) {
            return Err(StrMapError::InvalidConfig("lf_slop must lie in [0, 1)"));
        }
        Ok(Self {
            min_buckets: min,
            max_buckets: max,
            lf_slop,
        })
    }

    pub fn min_buckets(&self) -> usize {
        self.min_buckets.get()
    }

    pub fn max_buckets(&self) -> usize {
        self.max_buckets.get()
    }

    pub fn lf_slop(&self) -> f64 {
        self.lf_slop
    }

    /// Clamp a requested bucket count into `[min_buckets, max_buckets]`.
    pub fn clamp_buckets(&self, requested: usize) -> NonZeroUsize {
        NonZeroUsize::new(requested)
            .unwrap_or(NonZeroUsize::MIN)
            .clamp(self.min_buckets, self.max_buckets)
    }

    /// Load-factor band `[min, max]` around `target` where no rebuild happens.
    pub fn hysteresis_band(&self, target: f64) -> (f64, f64) {
        ((1.0 - self.lf_slop) * target, (1.0 + self.lf_slop) * target)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_buckets: NonZeroUsize::new(MIN_BUCKETS).unwrap_or(NonZeroUsize::MIN),
            max_buckets: NonZeroUsize::new(MAX_BUCKETS).unwrap_or(NonZeroUsize::MAX),
            lf_slop: LF_SLOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let c = TableConfig::default();
        assert_eq!(c.min_buckets(), MIN_BUCKETS);
        assert_eq!(c.max_buckets(), MAX_BUCKETS);
        assert_eq!(c.lf_slop(), LF_SLOP);
    }

    #[test]
    fn clamp_covers_zero_and_huge() {
        let c = TableConfig::new(4, 64, 0.1).unwrap();
        assert_eq!(c.clamp_buckets(0).get(), 4);
        assert_eq!(c.clamp_buckets(3).get(), 4);
        assert_eq!(c.clamp_buckets(17).get(), 17);
        assert_eq!(c.clamp_buckets(usize::MAX).get(), 64);
    }

    #[test]
    fn rejects_inconsistent_bounds() {
        assert!(matches!(
            TableConfig::new(0, 10, 0.2),
            Err(StrMapError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::new(10, 5, 0.2),
            Err(StrMapError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::new(1, 5, 1.0),
            Err(StrMapError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::new(1, 5, -0.1),
            Err(StrMapError::InvalidConfig(_))
        ));
        assert!(TableConfig::new(1, 1, 0.0).is_ok());
    }

    #[test]
    fn band_scales_with_target() {
        let c = TableConfig::new(1, 10, 0.25).unwrap();
        assert_eq!(c.hysteresis_band(2.0), (1.5, 2.5));
    }
}
