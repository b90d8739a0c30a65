// In crates/strategies/src/trend_scorer.rs

use crate::ema::Ema;
use crate::types::EmaCrossSettings;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use core_types::Symbol;

/// Per-symbol trend state built from a fast and a slow EMA of the price.
///
/// `is_uptrend` is only re-evaluated once both averages are warmed up.
/// `scale` is recomputed on every update while the symbol is up-trending and
/// otherwise keeps whatever it held before (0 until the first uptrend).
#[derive(Debug, Clone)]
pub struct TrendScorer {
    symbol: Symbol,
    fast: Ema,
    slow: Ema,
    tolerance: f64,
    is_uptrend: bool,
    scale: f64,
}

impl TrendScorer {
    /// Creates a scorer with the given settings.
    pub fn new(symbol: Symbol, settings: &EmaCrossSettings) -> Result<Self> {
        Ok(Self {
            symbol,
            fast: Ema::new(settings.fast_period as usize)?,
            slow: Ema::new(settings.slow_period as usize)?,
            tolerance: settings.tolerance,
            is_uptrend: false,
            scale: 0.0,
        })
    }

    /// Feeds one adjusted price observed at `time`.
    ///
    /// Invalid samples are rejected before any state changes. A
    /// `DegenerateScale` error leaves the averages and the trend flag updated
    /// but `scale` at its previous value.
    pub fn update(&mut self, time: DateTime<Utc>, price: f64) -> Result<()> {
        self.check_sample(time, price)?;

        // Both averages always see the sample, even while one is still warming up.
        let fast_ready = self.fast.update(time, price);
        let slow_ready = self.slow.update(time, price);

        if fast_ready && slow_ready {
            self.is_uptrend = self.fast.current() > self.slow.current() * self.tolerance;
        }

        if self.is_uptrend {
            self.scale = self.relative_spread()?;
        }

        Ok(())
    }

    fn check_sample(&self, time: DateTime<Utc>, price: f64) -> Result<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::InvalidSample {
                symbol: self.symbol.clone(),
                reason: format!("price must be finite and positive, got {price}"),
            });
        }
        if let Some(last) = self.fast.last_update() {
            if time < last {
                return Err(Error::InvalidSample {
                    symbol: self.symbol.clone(),
                    reason: format!("timestamp {time} is earlier than the previous sample at {last}"),
                });
            }
        }
        Ok(())
    }

    fn relative_spread(&self) -> Result<f64> {
        let fast = self.fast.current();
        let slow = self.slow.current();
        spread_score(fast, slow).ok_or_else(|| Error::DegenerateScale {
            symbol: self.symbol.clone(),
            fast,
            slow,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_uptrend(&self) -> bool {
        self.is_uptrend
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_ready(&self) -> bool {
        self.fast.is_ready() && self.slow.is_ready()
    }

    pub fn fast(&self) -> &Ema {
        &self.fast
    }

    pub fn slow(&self) -> &Ema {
        &self.slow
    }

    #[cfg(test)]
    pub(crate) fn with_state(symbol: &str, is_uptrend: bool, scale: f64) -> Self {
        let mut scorer = Self::new(Symbol::from(symbol), &EmaCrossSettings::default())
            .expect("default settings are valid");
        scorer.is_uptrend = is_uptrend;
        scorer.scale = scale;
        scorer
    }
}

/// `(fast - slow) / mean(fast, slow)`, or `None` when that is undefined.
pub fn spread_score(fast: f64, slow: f64) -> Option<f64> {
    let sum = fast + slow;
    if sum == 0.0 {
        return None;
    }
    let score = (fast - slow) / (sum / 2.0);
    score.is_finite().then_some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn scorer() -> TrendScorer {
        TrendScorer::new(Symbol::from("SPY"), &EmaCrossSettings::default()).unwrap()
    }

    #[test]
    fn stays_neutral_until_slow_average_is_warm() {
        let mut scorer = scorer();
        // A steep rally would flag an uptrend immediately if warm-up were not enforced.
        for i in 0..299 {
            scorer.update(day(i), 10.0 * (i + 1) as f64).unwrap();
            assert!(!scorer.is_uptrend(), "uptrend flagged at sample {}", i + 1);
            assert_eq!(scorer.scale(), 0.0);
        }
        assert!(scorer.fast().is_ready());
        assert!(!scorer.is_ready());

        scorer.update(day(299), 3000.0).unwrap();
        assert!(scorer.is_ready());
        assert!(scorer.is_uptrend());
        assert!(scorer.scale() > 0.0);
    }

    #[test]
    fn rising_prices_produce_an_uptrend() {
        let mut scorer = scorer();
        for i in 0..400 {
            scorer.update(day(i), 100.0 + i as f64).unwrap();
        }
        assert!(scorer.is_uptrend());
        let expected = spread_score(scorer.fast().current(), scorer.slow().current()).unwrap();
        assert_relative_eq!(scorer.scale(), expected, epsilon = 1e-12);
    }

    #[test]
    fn flat_prices_never_trend() {
        let mut scorer = scorer();
        for i in 0..500 {
            scorer.update(day(i), 50.0).unwrap();
        }
        assert!(scorer.is_ready());
        assert!(!scorer.is_uptrend());
        assert_eq!(scorer.scale(), 0.0);
    }

    #[test]
    fn spread_score_is_normalized_difference() {
        assert_relative_eq!(spread_score(110.0, 100.0).unwrap(), 10.0 / 105.0, epsilon = 1e-12);
        assert_relative_eq!(spread_score(110.0, 100.0).unwrap(), 0.0952, epsilon = 1e-4);
    }

    #[test]
    fn spread_score_rejects_zero_sum() {
        assert_eq!(spread_score(0.0, 0.0), None);
        assert_eq!(spread_score(5.0, -5.0), None);
    }

    #[test]
    fn scale_goes_stale_when_trend_fades() {
        let mut scorer = scorer();
        let mut t = 0;
        for i in 0..400 {
            scorer.update(day(t), 100.0 + i as f64).unwrap();
            t += 1;
        }
        assert!(scorer.is_uptrend());
        let last_uptrend_scale = scorer.scale();

        // Crash the price until the fast average drops under the slow one.
        while scorer.is_uptrend() {
            scorer.update(day(t), 1.0).unwrap();
            t += 1;
            assert!(t < 2000, "trend never faded");
        }
        let stale = scorer.scale();
        assert!(stale > 0.0);
        assert!(stale <= last_uptrend_scale);

        scorer.update(day(t), 1.0).unwrap();
        assert!(!scorer.is_uptrend());
        assert_eq!(scorer.scale(), stale);
    }

    #[test]
    fn rejects_bad_prices_without_touching_state() {
        let mut scorer = scorer();
        scorer.update(day(0), 10.0).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = scorer.update(day(1), bad).unwrap_err();
            assert!(matches!(err, Error::InvalidSample { .. }));
        }
        assert_eq!(scorer.fast().samples(), 1);
        assert_eq!(scorer.slow().samples(), 1);
        assert_eq!(scorer.fast().current(), 10.0);
    }

    #[test]
    fn rejects_samples_from_the_past() {
        let mut scorer = scorer();
        scorer.update(day(5), 10.0).unwrap();
        assert!(matches!(scorer.update(day(4), 11.0), Err(Error::InvalidSample { .. })));
        assert_eq!(scorer.fast().samples(), 1);
        // Repeating the same timestamp is allowed.
        scorer.update(day(5), 10.0).unwrap();
        assert_eq!(scorer.fast().samples(), 2);
    }

    #[test]
    fn replaying_the_converged_value_is_a_fixed_point() {
        let mut scorer = scorer();
        for i in 0..400 {
            scorer.update(day(i), 42.0).unwrap();
        }
        let (uptrend, scale) = (scorer.is_uptrend(), scorer.scale());
        let fast = scorer.fast().current();
        scorer.update(day(400), 42.0).unwrap();
        scorer.update(day(400), 42.0).unwrap();
        assert_eq!(scorer.is_uptrend(), uptrend);
        assert_eq!(scorer.scale(), scale);
        assert_relative_eq!(scorer.fast().current(), fast, epsilon = 1e-12);
    }
}
