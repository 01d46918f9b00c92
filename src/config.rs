//! Construction-time tuning: capacity floor, load factor and probe gap.

use crate::error::InvalidArgument;
use crate::probe::gcd;

/// Requested capacities below this are raised to it.
pub const DEFAULT_MIN_CAPACITY: usize = 500;
/// Default ratio of live entries to capacity before growth.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.5;
/// Additive step between probes. Odd, so doubling keeps it coprime.
pub const DEFAULT_PROBE_GAP: usize = 127;

/// Parameters fixed for the lifetime of a table.
///
/// ```
/// use probe_table::{ProbeConfig, ProbeTable};
///
/// let config = ProbeConfig::default()
///     .with_min_capacity(16)
///     .with_load_factor(0.75)
///     .with_probe_gap(5);
/// let table: ProbeTable<u32, u32> = ProbeTable::with_config(0, config).unwrap();
/// assert_eq!(table.capacity(), 16);
/// assert_eq!(table.threshold(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    pub min_capacity: usize,
    pub load_factor: f32,
    pub probe_gap: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            probe_gap: DEFAULT_PROBE_GAP,
        }
    }
}

impl ProbeConfig {
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_probe_gap(mut self, probe_gap: usize) -> Self {
        self.probe_gap = probe_gap;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        // Written so that NaN fails too.
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(InvalidArgument::LoadFactor(self.load_factor));
        }
        if self.min_capacity == 0 {
            return Err(InvalidArgument::MinCapacity);
        }
        if self.probe_gap % 2 == 0 {
            return Err(InvalidArgument::ProbeGap(self.probe_gap));
        }
        Ok(())
    }

    /// `floor(capacity * load_factor)`, in `f32` like the load factor itself.
    /// Clamped to `capacity`: above 2^24 the `f32` product can round up.
    #[inline]
    pub(crate) fn threshold(&self, capacity: usize) -> usize {
        ((capacity as f32 * self.load_factor) as usize).min(capacity)
    }

    /// Smallest capacity at or above both `requested` and the floor that
    /// shares no factor with the probe gap.
    pub(crate) fn initial_capacity(&self, requested: usize) -> usize {
        let mut capacity = requested.max(self.min_capacity);
        while gcd(capacity, self.probe_gap) != 1 {
            capacity += 1;
        }
        capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(ProbeConfig::default().validate(), Ok(()));
    }

    /// Invariant: load factor outside (0, 1] is rejected, including NaN.
    #[test]
    fn load_factor_range() {
        for lf in [0.0f32, -0.5, 1.000_1, f32::NAN, f32::INFINITY] {
            let err = ProbeConfig::default().with_load_factor(lf).validate();
            assert!(matches!(err, Err(InvalidArgument::LoadFactor(_))), "{lf}");
        }
        assert!(ProbeConfig::default().with_load_factor(1.0).validate().is_ok());
        assert!(ProbeConfig::default().with_load_factor(0.01).validate().is_ok());
    }

    #[test]
    fn gap_and_floor_rules() {
        let c = ProbeConfig::default();
        assert_eq!(c.with_probe_gap(0).validate(), Err(InvalidArgument::ProbeGap(0)));
        assert_eq!(c.with_probe_gap(128).validate(), Err(InvalidArgument::ProbeGap(128)));
        assert_eq!(c.with_min_capacity(0).validate(), Err(InvalidArgument::MinCapacity));
        assert!(c.with_probe_gap(1).with_min_capacity(1).validate().is_ok());
    }

    #[test]
    fn threshold_truncates() {
        let c = ProbeConfig::default();
        assert_eq!(c.threshold(500), 250);
        assert_eq!(c.threshold(1001), 500);
        assert_eq!(c.with_load_factor(0.7).threshold(500), 350);
        assert_eq!(c.with_load_factor(1.0).threshold(500), 500);
    }

    /// Invariant: the threshold never exceeds the capacity, even where the
    /// `f32` product rounds above it.
    #[test]
    fn threshold_never_exceeds_capacity() {
        let full = ProbeConfig::default().with_load_factor(1.0);
        assert_eq!(full.threshold(16_777_219), 16_777_219);
        for cap in [16_777_217usize, 16_777_219, 33_554_435, 2_147_483_649] {
            for lf in [0.5f32, 0.9, 0.999_999, 1.0] {
                let t = ProbeConfig::default().with_load_factor(lf).threshold(cap);
                assert!(t <= cap, "cap {cap} lf {lf} -> {t}");
            }
        }
    }

    /// Invariant: the initial capacity respects the floor and is coprime with the gap.
    #[test]
    fn initial_capacity_floor_and_coprime() {
        let c = ProbeConfig::default();
        assert_eq!(c.initial_capacity(0), 500);
        assert_eq!(c.initial_capacity(499), 500);
        assert_eq!(c.initial_capacity(800), 800);
        // 635 = 5 * 127
        assert_eq!(c.initial_capacity(635), 636);
        assert_eq!(c.with_probe_gap(1).initial_capacity(635), 635);
    }
}
