//! Time based transitions between values.
//!
//! A [`Tween`] holds where a value started, where it is headed, and when
//! it started moving. Sampling it at an instant gives the displayed value.
//! Retargeting a running tween restarts it from the displayed value, so the
//! newest target always wins and nothing has to be cancelled.

use std::time::{Duration, Instant};

/// Default transition length
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}

/// Values that can be blended
pub trait Interpolate: Clone {
    /// Value at `t` between `self` (0) and `other` (1)
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for [f32; 2] {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        [
            self[0].interpolate(&other[0], t),
            self[1].interpolate(&other[1], t),
        ]
    }
}

impl Interpolate for (f32, f32) {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        (self.0.interpolate(&other.0, t), self.1.interpolate(&other.1, t))
    }
}

/// Element-wise. Entries with no counterpart in `self` appear at their target.
impl<T: Interpolate> Interpolate for Vec<T> {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        other
            .iter()
            .enumerate()
            .map(|(i, end)| match self.get(i) {
                Some(start) => start.interpolate(end, t),
                None => end.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    start: T,
    end: T,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// A tween resting at `value`
    pub fn new(value: T, duration: Duration) -> Self {
        Self {
            start: value.clone(),
            end: value,
            started_at: None,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress at `instant`, 1 once finished or when never started
    pub fn progress(&self, instant: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = instant.saturating_duration_since(started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Displayed value at `instant`
    pub fn sample(&self, instant: Instant) -> T {
        let t = self.progress(instant);
        if t >= 1.0 {
            return self.end.clone();
        }
        self.start.interpolate(&self.end, self.easing.apply(t))
    }

    pub fn target(&self) -> &T {
        &self.end
    }

    /// Animate from the value displayed at `instant` toward `target`
    pub fn retarget(&mut self, target: T, instant: Instant) {
        self.start = self.sample(instant);
        self.end = target;
        self.started_at = Some(instant);
    }

    pub fn is_active(&self, instant: Instant) -> bool {
        self.progress(instant) < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.25, 0.0625)]
    #[case(0.5, 0.5)]
    #[case(0.75, 0.9375)]
    #[case(1.0, 1.0)]
    fn test_cubic_in_out(#[case] t: f32, #[case] expected: f32) {
        assert_approx_eq!(f32, Easing::CubicInOut.apply(t), expected);
    }

    #[test]
    fn test_sample_over_time() {
        let t0 = Instant::now();
        let mut tween = Tween::new(0.0f32, DEFAULT_DURATION).with_easing(Easing::Linear);
        assert!(!tween.is_active(t0));

        tween.retarget(100.0, t0);
        assert_approx_eq!(f32, tween.sample(t0), 0.0);
        assert_approx_eq!(f32, tween.sample(t0 + Duration::from_millis(250)), 25.0);
        assert!(tween.is_active(t0 + Duration::from_millis(999)));
        assert!(!tween.is_active(t0 + DEFAULT_DURATION));
        assert_eq!(tween.sample(t0 + Duration::from_secs(5)), 100.0);
    }

    #[test]
    fn test_retarget_starts_from_displayed_value() {
        let t0 = Instant::now();
        let mut tween = Tween::new(0.0f32, DEFAULT_DURATION).with_easing(Easing::Linear);
        tween.retarget(100.0, t0);

        let mid = t0 + Duration::from_millis(500);
        tween.retarget(-100.0, mid);
        assert_approx_eq!(f32, tween.sample(mid), 50.0);
        assert_approx_eq!(f32, tween.sample(mid + Duration::from_millis(500)), -25.0);
        assert_eq!(*tween.target(), -100.0);
        assert_eq!(tween.sample(mid + DEFAULT_DURATION), -100.0);
    }

    #[test]
    fn test_vec_interpolation_uses_target_length() {
        let start = vec![[0.0, 0.0], [10.0, 10.0]];
        let end = vec![[10.0, 20.0], [20.0, 30.0], [5.0, 5.0]];
        let mid = start.interpolate(&end, 0.5);
        assert_eq!(mid, vec![[5.0, 10.0], [15.0, 20.0], [5.0, 5.0]]);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t0 = Instant::now();
        let mut tween = Tween::new((0.0f32, 1.0f32), Duration::ZERO);
        tween.retarget((5.0, 6.0), t0);
        assert_eq!(tween.sample(t0), (5.0, 6.0));
        assert!(!tween.is_active(t0));
    }
}
