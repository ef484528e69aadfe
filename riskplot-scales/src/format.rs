//! Tick label formatting in the style of d3's default linear tick format:
//! fixed-point notation with thousands separators and just enough decimal
//! places to distinguish adjacent ticks.

/// Number of decimal places needed to display multiples of `step`
pub fn precision_fixed(step: f32) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor() as i32;
    (-exponent).max(0) as usize
}

/// Formats `value` with `precision` decimals and comma-grouped thousands
pub fn format_grouped(value: f32, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    // No sign on values that round to zero
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFormatter {
    pub precision: usize,
}

impl TickFormatter {
    pub fn for_step(step: f32) -> Self {
        Self {
            precision: precision_fixed(step),
        }
    }

    pub fn format(&self, value: f32) -> String {
        format_grouped(value, self.precision)
    }

    pub fn format_all(&self, values: &[f32]) -> Vec<String> {
        values.iter().map(|v| self.format(*v)).collect()
    }
}
