use super::{TextBounds, TextMeasurementConfig, TextMeasurer};
use crate::types::FontStyle;

/// Text measurer that estimates glyph extents from the font size alone.
///
/// Used for hit testing and label layout where no font rasterizer is
/// available. Widths are an average advance per grapheme, so they are close
/// for typical sans-serif text and wrong for unusually wide or narrow glyphs.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateTextMeasurer {
    /// Average advance as a fraction of the font size
    pub char_width_ratio: f32,
    /// Width multiplier applied to bold text
    pub bold_width_ratio: f32,
    pub ascent_ratio: f32,
    pub descent_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for ApproximateTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            bold_width_ratio: 1.1,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for ApproximateTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        let size = config.font_size.max(0.0);
        let mut width = config.grapheme_count() as f32 * size * self.char_width_ratio;
        if config.is_bold() {
            width *= self.bold_width_ratio;
        }
        if matches!(config.font_style, FontStyle::Italic) {
            // slant overhang on the last glyph
            width += size * 0.1;
        }
        let ascent = size * self.ascent_ratio;
        let descent = size * self.descent_ratio;
        TextBounds {
            width,
            height: ascent + descent,
            ascent,
            descent,
            line_height: size * self.line_height_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontWeight, FontWeightNameSpec};
    use float_cmp::assert_approx_eq;

    fn measure(text: &str, weight: FontWeight) -> TextBounds {
        ApproximateTextMeasurer::default().measure_text_bounds(&TextMeasurementConfig {
            text,
            font: "sans-serif",
            font_size: 10.0,
            font_weight: &weight,
            font_style: &FontStyle::Normal,
        })
    }

    #[test]
    fn test_width_scales_with_length() {
        let bounds = measure("AL", FontWeight::default());
        assert_approx_eq!(f32, bounds.width, 12.0);
        assert_approx_eq!(f32, bounds.height, 10.0);
        assert_approx_eq!(f32, bounds.ascent, 8.0);

        let empty = measure("", FontWeight::default());
        assert_approx_eq!(f32, empty.width, 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let normal = measure("Age (Median)", FontWeight::default());
        let bold = measure("Age (Median)", FontWeight::Name(FontWeightNameSpec::Bold));
        assert!(bold.width > normal.width);
    }
}
