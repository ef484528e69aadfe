use riskplot_common::value::{ScalarOrArray, ScalarOrArrayRef};

use crate::array;
use crate::error::RiskplotScaleError;

use super::ContinuousNumericScale;

#[derive(Clone, Debug, PartialEq)]
pub struct LinearNumericScaleConfig {
    pub domain: (f32, f32),
    pub range: (f32, f32),
    pub clamp: bool,
    pub nice: Option<usize>,
    pub round: bool,
}

impl Default for LinearNumericScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            nice: None,
            round: false,
        }
    }
}

/// A linear scale that maps numeric input values from a domain to a range.
/// Supports clamping, domain niceing, and tick generation.
///
/// A reversed domain or range is allowed and flips the mapping, which is how
/// a y axis that grows upward on screen is expressed.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearNumericScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
    clamp: bool,
    round: bool,
}

impl LinearNumericScale {
    pub fn new(config: &LinearNumericScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            round: config.round,
        };

        if let Some(nice) = config.nice {
            this = this.nice(Some(nice));
        }

        this
    }

    /// Like `new`, but rejects non-finite domain and range bounds
    pub fn try_new(config: &LinearNumericScaleConfig) -> Result<Self, RiskplotScaleError> {
        let (d0, d1) = config.domain;
        if !d0.is_finite() || !d1.is_finite() {
            return Err(RiskplotScaleError::NonFiniteDomain(d0, d1));
        }
        let (r0, r1) = config.range;
        if !r0.is_finite() || !r1.is_finite() {
            return Err(RiskplotScaleError::NonFiniteRange(r0, r1));
        }
        Ok(Self::new(config))
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let ascending = self.domain_start <= self.domain_end;
        let (mut start, mut stop) = if ascending {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let count = count.unwrap_or(10) as f32;
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
        }

        if ascending {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }
        self
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }

    fn range_extent(&self) -> (f32, f32) {
        if self.range_start <= self.range_end {
            (self.range_start, self.range_end)
        } else {
            (self.range_end, self.range_start)
        }
    }
}

impl ContinuousNumericScale for LinearNumericScale {
    fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    /// Maps input values from domain to range
    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32> {
        // Like d3, a collapsed domain maps every value to the middle of the range
        if self.is_degenerate() {
            let middle = self.range_start + (self.range_end - self.range_start) / 2.0;
            let middle = if self.round { middle.round() } else { middle };
            let domain_is_nan = self.domain_start.is_nan() || self.domain_end.is_nan();
            return values.into().map(|v| {
                if v.is_nan() || domain_is_nan {
                    f32::NAN
                } else {
                    middle
                }
            });
        }

        let scale = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let offset = self.range_start - scale * self.domain_start;
        let (range_min, range_max) = self.range_extent();

        match (self.clamp, self.round) {
            (true, true) => values
                .into()
                .map(|v| (scale * v + offset).clamp(range_min, range_max).round()),
            (true, false) => values
                .into()
                .map(|v| (scale * v + offset).clamp(range_min, range_max)),
            (false, true) => values.into().map(|v| (scale * v + offset).round()),
            (false, false) => values.into().map(|v| scale * v + offset),
        }
    }

    /// Maps output values from range back to domain
    fn invert<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32> {
        if self.is_degenerate() {
            return values.into().map(|_| self.domain_start);
        }

        let scale = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        let offset = self.domain_start - scale * self.range_start;

        if self.clamp {
            let (range_min, range_max) = self.range_extent();
            values
                .into()
                .map(|v| scale * v.clamp(range_min, range_max) + offset)
        } else {
            values.into().map(|v| scale * v + offset)
        }
    }

    /// Generates evenly spaced tick values within the domain
    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        let count = count.unwrap_or(10.0);
        array::ticks(self.domain_start, self.domain_end, count)
    }

    fn set_domain(&mut self, domain: (f32, f32)) {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
    }

    fn set_range(&mut self, range: (f32, f32)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }

    fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let scale = LinearNumericScale::new(&Default::default());
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.range(), (0.0, 1.0));
        assert!(!scale.clamp());
    }

    #[test]
    fn test_scale_clamped() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });

        let values = vec![0.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0];
        let result = scale.scale(&values).as_vec(values.len(), None);

        assert_approx_eq!(f32, result[0], 0.0);
        assert_approx_eq!(f32, result[1], 0.0);
        assert_approx_eq!(f32, result[2], 25.0);
        assert_approx_eq!(f32, result[3], 50.0);
        assert_approx_eq!(f32, result[4], 75.0);
        assert_approx_eq!(f32, result[5], 100.0);
        assert_approx_eq!(f32, result[6], 100.0);
    }

    #[test]
    fn test_scale_reversed_domain() {
        // Larger values map closer to the range start
        let scale = LinearNumericScale::new(&Default::default())
            .with_domain((40.0, 20.0))
            .with_range((0.0, 360.0));

        assert_approx_eq!(f32, scale.scale_scalar(40.0), 0.0);
        assert_approx_eq!(f32, scale.scale_scalar(30.0), 180.0);
        assert_approx_eq!(f32, scale.scale_scalar(20.0), 360.0);
        assert_approx_eq!(f32, scale.invert_scalar(90.0), 35.0);
    }

    #[test]
    fn test_scale_round() {
        let scale = LinearNumericScale::new(&Default::default())
            .with_domain((0.0, 3.0))
            .with_range((0.0, 10.0))
            .with_round(true);
        assert_eq!(scale.scale_scalar(1.0), 3.0);
        assert_eq!(scale.scale_scalar(2.0), 7.0);
    }

    #[test]
    fn test_degenerate_cases() {
        let values = vec![0.0, 1.0, 2.0];

        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });
        for v in scale.scale(&values).as_vec(values.len(), None) {
            assert_approx_eq!(f32, v, 50.0);
        }
        assert!(scale.scale_scalar(f32::NAN).is_nan());

        let flipped = scale.clone().with_range((500.0, 0.0));
        assert_approx_eq!(f32, flipped.scale_scalar(-3.0), 250.0);

        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 10.0),
            range: (1.0, 1.0),
            ..Default::default()
        });
        for v in scale.scale(&values).as_vec(values.len(), None) {
            assert_approx_eq!(f32, v, 1.0);
        }
    }

    #[test]
    fn test_tick_format_precision() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 1.0),
            range: (0.0, 100.0),
            ..Default::default()
        });
        let formatter = scale.tick_format(Some(5.0));
        assert_eq!(formatter.format(0.4), "0.4");

        let wide = scale.with_domain((0.0, 50_000.0));
        assert_eq!(wide.tick_format(None).format(45_000.0), "45,000");
    }

    #[test]
    fn test_invert() {
        let clamped = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });
        let unclamped = clamped.clone().with_clamp(false);

        let values = vec![-25.0, 0.0, 50.0, 100.0, 125.0];
        let result = clamped.invert(&values).as_vec(values.len(), None);
        assert_approx_eq!(f32, result[0], 10.0);
        assert_approx_eq!(f32, result[2], 20.0);
        assert_approx_eq!(f32, result[4], 30.0);

        let result = unclamped.invert(&values).as_vec(values.len(), None);
        assert_approx_eq!(f32, result[0], 5.0);
        assert_approx_eq!(f32, result[4], 35.0);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        let err = LinearNumericScale::try_new(&LinearNumericScaleConfig {
            domain: (f32::NAN, 1.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, RiskplotScaleError::NonFiniteDomain(_, _)));

        let err = LinearNumericScale::try_new(&LinearNumericScaleConfig {
            range: (0.0, f32::INFINITY),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, RiskplotScaleError::NonFiniteRange(_, _)));
    }

    #[test]
    fn test_ticks() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert_eq!(scale.ticks(Some(5.0)), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(scale.ticks(Some(2.0)), vec![0.0, 5.0, 10.0]);
        assert_eq!(scale.ticks(Some(1.0)), vec![0.0, 10.0]);
    }

    #[test]
    fn test_ticks_span_zero() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (-100.0, 100.0),
            ..Default::default()
        });

        assert_eq!(
            scale.ticks(Some(5.0)),
            vec![-100.0, -50.0, 0.0, 50.0, 100.0]
        );
        assert_eq!(scale.ticks(Some(2.0)), vec![-100.0, 0.0, 100.0]);
        assert_eq!(scale.ticks(Some(1.0)), vec![0.0]);
    }

    #[test]
    fn test_nice() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (1.1, 10.9),
            ..Default::default()
        })
        .nice(Some(10));
        assert_eq!(scale.domain(), (1.0, 11.0));

        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (-1.1, -10.9),
            nice: Some(10),
            ..Default::default()
        });
        assert_eq!(scale.domain(), (-1.0, -11.0));
    }
}
