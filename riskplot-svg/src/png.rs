use lazy_static::lazy_static;
use resvg::render;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use usvg::fontdb::Database;

use crate::error::RiskplotSvgError;

lazy_static! {
    pub static ref FONT_DB: Mutex<usvg::fontdb::Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> usvg::fontdb::Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    font_database
}

/// Rasterize an SVG document to PNG bytes, `scale` pixels per SVG unit
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, RiskplotSvgError> {
    let fontdb = {
        let font_database = FONT_DB
            .lock()
            .map_err(|err| RiskplotSvgError::InternalError(format!("font database lock: {err}")))?;
        Arc::new(font_database.clone())
    };

    // usvg and resvg may panic on unusual input
    let response = panic::catch_unwind(AssertUnwindSafe(|| {
        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
        let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

        let width = (rtree.size().width() * scale) as u32;
        let height = (rtree.size().height() * scale) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RiskplotSvgError::ImageAllocationError(format!("{width}x{height} pixmap"))
        })?;

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        render(&rtree, transform, &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| RiskplotSvgError::InternalError(format!("png encoding: {err}")))
    }));
    match response {
        Ok(result) => result,
        Err(_) => Err(RiskplotSvgError::InternalError(
            "svg rasterization panicked".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_size_follows_scale() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><rect width="20" height="10" fill="#89bdd3"/></svg>"##;
        let png = svg_to_png(svg, 2.0).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        // IHDR width and height, big endian
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 40);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 20);
    }

    #[test]
    fn test_invalid_svg_is_an_error() {
        assert!(svg_to_png("<svg", 1.0).is_err());
    }
}
