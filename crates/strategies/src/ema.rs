// In crates/strategies/src/ema.rs

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use ta::indicators::ExponentialMovingAverage;
use ta::{Next, Period};

/// An exponential moving average that knows when it has seen enough data.
///
/// The smoothing itself is delegated to `ta` (`k = 2 / (period + 1)`, seeded
/// with the first input). On top of it this keeps the sample count, the last
/// value and the time of the last update. The average is ready once it has
/// absorbed `period` samples.
#[derive(Debug, Clone)]
pub struct Ema {
    inner: ExponentialMovingAverage,
    current: f64,
    samples: usize,
    last_update: Option<DateTime<Utc>>,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self> {
        let inner = ExponentialMovingAverage::new(period)
            .map_err(|e| Error::InvalidSettings(format!("EMA period {period} rejected: {e:?}")))?;
        Ok(Self {
            inner,
            current: 0.0,
            samples: 0,
            last_update: None,
        })
    }

    /// Absorbs one sample and reports whether the average is ready.
    ///
    /// Callers are expected to feed non-decreasing timestamps.
    pub fn update(&mut self, time: DateTime<Utc>, value: f64) -> bool {
        self.current = self.inner.next(value);
        self.samples += 1;
        self.last_update = Some(time);
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.samples >= self.inner.period()
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn period(&self) -> usize {
        self.inner.period()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn first_sample_seeds_the_average() {
        let mut ema = Ema::new(3).unwrap();
        assert!(!ema.update(day(0), 10.0));
        assert_eq!(ema.current(), 10.0);
        assert_eq!(ema.samples(), 1);
    }

    #[test]
    fn applies_two_over_n_plus_one_smoothing() {
        // alpha = 2 / (3 + 1) = 0.5
        let mut ema = Ema::new(3).unwrap();
        ema.update(day(0), 10.0);
        ema.update(day(1), 20.0);
        assert_relative_eq!(ema.current(), 15.0, epsilon = 1e-12);
        ema.update(day(2), 5.0);
        assert_relative_eq!(ema.current(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn becomes_ready_after_period_samples() {
        let mut ema = Ema::new(4).unwrap();
        let readiness: Vec<bool> = (0..6).map(|i| ema.update(day(i), 1.0)).collect();
        assert_eq!(readiness, vec![false, false, false, true, true, true]);
        assert_eq!(ema.last_update(), Some(day(5)));
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(matches!(Ema::new(0), Err(Error::InvalidSettings(_))));
    }
}
