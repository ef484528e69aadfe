//! SVG elements for each mark type. Coordinates are written in absolute
//! pixels, already shifted by the accumulated group origin.

use std::fmt::Write;

use itertools::izip;
use riskplot_common::types::{ColorUtils, Rgba};
use riskplot_scenegraph::marks::rect::SceneRectMark;
use riskplot_scenegraph::marks::rule::SceneRuleMark;
use riskplot_scenegraph::marks::symbol::SceneSymbolMark;
use riskplot_scenegraph::marks::text::SceneTextMark;
use riskplot_text::types::{FontStyle, FontWeight, FontWeightNameSpec, TextAlign, TextBaseline};

/// Number with at most two decimals and no negative zero
pub(crate) fn num(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    rounded.to_string()
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `fill` or `stroke` attributes, with the alpha channel as a separate opacity
fn paint(attr: &str, color: &Rgba) -> String {
    if color.is_transparent() {
        return format!(r#" {attr}="none""#);
    }
    let mut out = format!(r#" {attr}="{}""#, color.to_hex());
    if color[3] < 1.0 {
        out.push_str(&format!(r#" {attr}-opacity="{}""#, num(color[3])));
    }
    out
}

fn text_anchor(align: &TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn dominant_baseline(baseline: &TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Top | TextBaseline::LineTop => "text-before-edge",
        TextBaseline::Middle => "central",
        TextBaseline::Bottom | TextBaseline::LineBottom => "text-after-edge",
    }
}

fn font_weight(weight: &FontWeight) -> String {
    match weight {
        FontWeight::Name(FontWeightNameSpec::Normal) => "normal".to_string(),
        FontWeight::Name(FontWeightNameSpec::Bold) => "bold".to_string(),
        FontWeight::Number(w) => num(*w),
    }
}

pub(crate) fn write_symbol_mark(
    out: &mut String,
    mark: &SceneSymbolMark,
    origin: [f32; 2],
    clip_attr: &str,
) -> std::fmt::Result {
    let stroke_width = mark.stroke_width.unwrap_or(0.0);
    for ((center, radius), fill, stroke) in izip!(
        mark.circle_iter(origin),
        mark.fill_iter(),
        mark.stroke_iter()
    ) {
        write!(
            out,
            r#"<circle class="{}" cx="{}" cy="{}" r="{}"{}"#,
            escape(&mark.name),
            num(center[0]),
            num(center[1]),
            num(radius),
            paint("fill", fill),
        )?;
        if stroke_width > 0.0 && !stroke.is_transparent() {
            write!(out, r#"{} stroke-width="{}""#, paint("stroke", stroke), num(stroke_width))?;
        }
        writeln!(out, "{clip_attr}/>")?;
    }
    Ok(())
}

pub(crate) fn write_rect_mark(
    out: &mut String,
    mark: &SceneRectMark,
    origin: [f32; 2],
    clip_attr: &str,
) -> std::fmt::Result {
    for (x, y, width, height, fill, stroke, stroke_width, corner_radius) in izip!(
        mark.x_iter(),
        mark.y_iter(),
        mark.width_iter(),
        mark.height_iter(),
        mark.fill_iter(),
        mark.stroke_iter(),
        mark.stroke_width_iter(),
        mark.corner_radius_iter()
    ) {
        // negative extents flip the corner
        let (x, width) = if *width < 0.0 { (x + width, -width) } else { (*x, *width) };
        let (y, height) = if *height < 0.0 { (y + height, -height) } else { (*y, *height) };
        write!(
            out,
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}"#,
            escape(&mark.name),
            num(x + origin[0]),
            num(y + origin[1]),
            num(width),
            num(height),
            paint("fill", fill),
        )?;
        if *corner_radius > 0.0 {
            write!(out, r#" rx="{}""#, num(*corner_radius))?;
        }
        if *stroke_width > 0.0 && !stroke.is_transparent() {
            write!(out, r#"{} stroke-width="{}""#, paint("stroke", stroke), num(*stroke_width))?;
        }
        writeln!(out, "{clip_attr}/>")?;
    }
    Ok(())
}

pub(crate) fn write_rule_mark(
    out: &mut String,
    mark: &SceneRuleMark,
    origin: [f32; 2],
    clip_attr: &str,
) -> std::fmt::Result {
    let dashes: Vec<Option<&Vec<f32>>> = match mark.stroke_dash_iter() {
        Some(iter) => iter.map(Some).collect(),
        None => vec![None; mark.indices_iter().count()],
    };
    for (x, y, x2, y2, stroke, stroke_width, cap, dash) in izip!(
        mark.x_iter(),
        mark.y_iter(),
        mark.x2_iter(),
        mark.y2_iter(),
        mark.stroke_iter(),
        mark.stroke_width_iter(),
        mark.stroke_cap_iter(),
        dashes
    ) {
        write!(
            out,
            r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}" stroke-linecap="{}""#,
            escape(&mark.name),
            num(x + origin[0]),
            num(y + origin[1]),
            num(x2 + origin[0]),
            num(y2 + origin[1]),
            paint("stroke", stroke),
            num(*stroke_width),
            cap.as_str(),
        )?;
        if let Some(dash) = dash.filter(|d| !d.is_empty()) {
            let dash: Vec<String> = dash.iter().map(|d| num(*d)).collect();
            write!(out, r#" stroke-dasharray="{}""#, dash.join(","))?;
        }
        writeln!(out, "{clip_attr}/>")?;
    }
    Ok(())
}

pub(crate) fn write_text_mark(
    out: &mut String,
    mark: &SceneTextMark,
    origin: [f32; 2],
    clip_attr: &str,
) -> std::fmt::Result {
    for (text, x, y, align, baseline, angle, color, font, font_size, weight, style) in izip!(
        mark.text_iter(),
        mark.x_iter(),
        mark.y_iter(),
        mark.align_iter(),
        mark.baseline_iter(),
        mark.angle_iter(),
        mark.color_iter(),
        mark.font_iter(),
        mark.font_size_iter(),
        mark.font_weight_iter(),
        mark.font_style_iter()
    ) {
        let (x, y) = (x + origin[0], y + origin[1]);
        write!(
            out,
            r#"<text class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="{}" font-family="{}" font-size="{}" font-weight="{}""#,
            escape(&mark.name),
            num(x),
            num(y),
            text_anchor(align),
            dominant_baseline(baseline),
            escape(font),
            num(*font_size),
            font_weight(weight),
        )?;
        if *style == FontStyle::Italic {
            out.push_str(r#" font-style="italic""#);
        }
        out.push_str(&paint("fill", color));
        if *angle != 0.0 {
            write!(out, r#" transform="rotate({} {} {})""#, num(*angle), num(x), num(y))?;
        }
        writeln!(out, "{clip_attr}>{}</text>", escape(text))?;
    }
    Ok(())
}
