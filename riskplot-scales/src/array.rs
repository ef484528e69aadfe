//! Tick generation with the same results as d3-array's `ticks` and
//! `tickIncrement`.

// Thresholds on the normalized step error: sqrt(50), sqrt(10), sqrt(2)
const E10: f32 = 7.071_068;
const E5: f32 = 3.162_277_7;
const E2: f32 = 1.414_213_5;

fn step_factor(error: f32) -> f32 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Generate approximately `count` nicely rounded ticks covering `[start, stop]`.
///
/// Ticks are returned in the direction of the input, so a reversed interval
/// yields descending ticks. A non-positive or NaN count yields no ticks.
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count.is_nan() || count <= 0.0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    // Also catches NaN bounds
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |k: f32| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                value(i2 - i as f32)
            } else {
                value(i1 + i as f32)
            }
        })
        .collect()
}

/// Integer tick bounds `(i1, i2)` and the increment between them.
///
/// A negative increment encodes a fractional step as its reciprocal so that
/// ticks are computed by division, which avoids accumulating error.
fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f32.powf(power));

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let reciprocal = 10.0_f32.powf(-power) / factor;
        i1 = (start * reciprocal).round();
        i2 = (stop * reciprocal).round();
        if i1 / reciprocal < start {
            i1 += 1.0;
        }
        if i2 / reciprocal > stop {
            i2 -= 1.0;
        }
        inc = -reciprocal;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Step between ticks for `[start, stop]`, negative when the step is fractional
/// (in which case it is the negated reciprocal of the step).
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    if start == stop {
        return f32::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f32::NAN;
    }

    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f32.powf(power));
    if power >= 0.0 {
        10.0_f32.powf(power) * factor
    } else {
        -10.0_f32.powf(-power) / factor
    }
}

/// Absolute distance between adjacent ticks for `[start, stop]`
pub fn tick_step(start: f32, stop: f32, count: f32) -> f32 {
    let step0 = (stop - start).abs() / count.max(0.0);
    let power = step0.log10().floor();
    let factor = step_factor(step0 / 10.0_f32.powf(power));
    let step1 = if power >= 0.0 {
        10.0_f32.powf(power) * factor
    } else {
        factor / 10.0_f32.powf(-power)
    };
    if stop < start {
        -step1
    } else {
        step1
    }
}
