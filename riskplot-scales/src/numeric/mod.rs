pub mod linear;

use riskplot_common::value::{ScalarOrArray, ScalarOrArrayRef};

use crate::array;
use crate::format::TickFormatter;

/// Scale that maps a continuous numeric domain onto a continuous numeric range
pub trait ContinuousNumericScale: Clone + std::fmt::Debug + Send + Sync + 'static {
    fn domain(&self) -> (f32, f32);
    fn range(&self) -> (f32, f32);
    fn clamp(&self) -> bool;

    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32>;
    fn invert<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32>;

    fn ticks(&self, count: Option<f32>) -> Vec<f32>;

    /// Formatter for this scale's ticks, with precision taken from the tick step
    fn tick_format(&self, count: Option<f32>) -> TickFormatter {
        let (start, stop) = self.domain();
        TickFormatter::for_step(array::tick_step(start, stop, count.unwrap_or(10.0)))
    }

    fn set_domain(&mut self, domain: (f32, f32));
    fn set_range(&mut self, range: (f32, f32));
    fn set_clamp(&mut self, clamp: bool);

    /// Map a single value
    fn scale_scalar(&self, value: f32) -> f32 {
        match self.scale(value) {
            ScalarOrArray::Scalar(v) => v,
            ScalarOrArray::Array(values) => values.first().copied().unwrap_or(f32::NAN),
        }
    }

    fn invert_scalar(&self, value: f32) -> f32 {
        match self.invert(value) {
            ScalarOrArray::Scalar(v) => v,
            ScalarOrArray::Array(values) => values.first().copied().unwrap_or(f32::NAN),
        }
    }
}
