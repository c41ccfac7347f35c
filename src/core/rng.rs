//! Tiny, fast LCG + Box-Muller driving the demo's fake load readings.
//! Avoids rand dependency

use crate::core::constants::SCALE_MAX;

#[derive(Clone)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub fn seed(seed: u64) -> Self {
        Self(seed)
    }

    #[must_use]
    pub fn seed_from_time() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0x2545_f491, |d| d.as_nanos());
        #[allow(clippy::cast_possible_truncation)]
        Self(nanos as u64)
    }

    /// Independent generator seeded from this one's stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self((u64::from(self.next_u32()) << 32) | u64::from(self.next_u32()))
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        (self.0 >> 32) as u32
    }
    #[inline]
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX))
    }

    /// Standard normal 𝒩(0, 1) sample.
    #[inline]
    pub fn randn(&mut self) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Gaussian random walk reflected into the 0..=100 plotting scale.
#[derive(Clone)]
pub struct LoadWalk {
    rng: Lcg,
    level: f64,
    sigma: f64,
}

impl LoadWalk {
    #[must_use]
    pub fn new(rng: Lcg, start: f64, sigma: f64) -> Self {
        Self {
            rng,
            level: start.clamp(0.0, SCALE_MAX),
            sigma,
        }
    }
}

impl Iterator for LoadWalk {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let mut next = self.level + self.sigma * self.rng.randn();
        if next < 0.0 {
            next = -next;
        }
        if next > SCALE_MAX {
            next = 2.0 * SCALE_MAX - next;
        }
        self.level = next.clamp(0.0, SCALE_MAX);
        Some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_walk() {
        let a: Vec<f64> = LoadWalk::new(Lcg::seed(7), 50.0, 8.0).take(20).collect();
        let b: Vec<f64> = LoadWalk::new(Lcg::seed(7), 50.0, 8.0).take(20).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn forks_diverge() {
        let mut root = Lcg::seed(3);
        let a: Vec<f64> = LoadWalk::new(root.fork(), 50.0, 8.0).take(5).collect();
        let b: Vec<f64> = LoadWalk::new(root.fork(), 50.0, 8.0).take(5).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn walk_stays_on_scale() {
        assert!(
            LoadWalk::new(Lcg::seed(1), 95.0, 40.0)
                .take(1_000)
                .all(|v| (0.0..=SCALE_MAX).contains(&v))
        );
    }
}
