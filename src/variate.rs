//! Random variates driving a run.
//!
//! Every draw in a run (inter-arrival times, routing decisions and service times) comes from a
//! single seeded stream, so a run is fully determined by its seed and configuration.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use crate::time::Delta;

/// A validated, non-negative, finite event rate.
///
/// A zero rate describes a process that never fires: its samples are infinite delays.
#[derive(Debug, Clone, Copy)]
pub struct Rate {
    value: f64,
    dist: Option<Exp<f64>>,
}

impl Rate {
    /// Returns `None` if `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let dist = if value > 0.0 {
            Some(Exp::new(value).ok()?)
        } else {
            None
        };
        Some(Self { value, dist })
    }

    pub fn into_f64(self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct VariateSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl VariateSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds the stream from the OS-seeded thread RNG. The chosen seed is kept so the run can be
    /// replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples an exponential delay with mean `1 / rate`.
    pub fn exponential(&mut self, rate: &Rate) -> Delta {
        match &rate.dist {
            Some(dist) => Delta::new(dist.sample(&mut self.rng)),
            None => Delta::INFINITY,
        }
    }

    /// Samples uniformly from `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_validation() {
        assert!(Rate::new(1.5).is_some());
        assert!(Rate::new(0.0).is_some());
        assert!(Rate::new(-1.0).is_none());
        assert!(Rate::new(f64::NAN).is_none());
        assert!(Rate::new(f64::INFINITY).is_none());
    }

    #[test]
    fn zero_rate_never_fires() {
        let mut src = VariateSource::new(7);
        let rate = Rate::new(0.0).unwrap();
        assert_eq!(src.exponential(&rate), Delta::INFINITY);
    }

    #[test]
    fn same_seed_same_stream() {
        let rate = Rate::new(2.0).unwrap();
        let mut a = VariateSource::new(42);
        let mut b = VariateSource::new(42);
        for _ in 0..100 {
            assert_eq!(a.exponential(&rate), b.exponential(&rate));
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut src = VariateSource::new(1);
        for _ in 0..10_000 {
            let u = src.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn exponential_mean() {
        let rate = Rate::new(4.0).unwrap();
        let mut src = VariateSource::new(3);
        let n = 100_000;
        let total: f64 = (0..n).map(|_| src.exponential(&rate).into_f64()).sum();
        let mean = total / n as f64;
        assert!((mean - 0.25).abs() < 0.01, "mean = {mean}");
        assert_eq!(rate.into_f64(), 4.0);
    }
}
