#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

/// RGBA color with components in the range [0, 1]
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeCap::Butt => "butt",
            StrokeCap::Round => "round",
            StrokeCap::Square => "square",
        }
    }
}

pub trait ColorUtils {
    /// Color with the alpha channel multiplied by `opacity`
    fn with_opacity(&self, opacity: f32) -> Rgba;

    /// `#rrggbb` hex string, alpha dropped
    fn to_hex(&self) -> String;

    fn is_transparent(&self) -> bool;
}

impl ColorUtils for Rgba {
    fn with_opacity(&self, opacity: f32) -> Rgba {
        [self[0], self[1], self[2], self[3] * opacity]
    }

    fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self[0]),
            channel(self[1]),
            channel(self[2])
        )
    }

    fn is_transparent(&self) -> bool {
        self[3] <= 0.0
    }
}

/// Parse a `#rgb` or `#rrggbb` hex color
pub fn parse_hex_color(hex: &str) -> Option<Rgba> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_known_colors() {
        assert_eq!(BLACK.to_hex(), "#000000");
        assert_eq!(WHITE.to_hex(), "#ffffff");
        assert_eq!(parse_hex_color("#89bdd3"), Some([137.0 / 255.0, 189.0 / 255.0, 211.0 / 255.0, 1.0]));
        assert_eq!(parse_hex_color("fff"), Some(WHITE));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_opacity() {
        let base: Rgba = [0.5, 0.5, 0.5, 1.0];
        let c = base.with_opacity(0.75);
        assert_eq!(c[3], 0.75);
        assert!(TRANSPARENT.is_transparent());
        assert_eq!(StrokeCap::VARIANTS, &["butt", "round", "square"]);
    }
}
