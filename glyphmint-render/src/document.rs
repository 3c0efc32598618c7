//! SVG document assembly for one glyph.

use std::sync::LazyLock;

use glyphmint_config::Config;
use glyphmint_fonts::{CoverageIndex, GlyphError, GlyphSource, Outline};
use regex::Regex;
use svg::Document;
use svg::node::element::{Path, Rectangle};

use crate::normalize::{GlyphBounds, bounds, normalize_transform};
use crate::serialize::{fmt_scalar, serialize};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Background color painted under every glyph.
pub const BACKGROUND_FILL: &str = "#fff";

/// Edge length of the placeholder square drawn for empty outlines.
pub const PLACEHOLDER_SIZE: f64 = 16.0;

/// Maximum supported coordinate precision.
pub const MAX_PRECISION: usize = 6;

static FILL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})|[A-Za-z]{1,32})$")
        .expect("FILL_PATTERN is a valid regex")
});

/// Canvas geometry and styling shared by every glyph of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    /// Square canvas edge length.
    pub canvas_size: u32,
    /// Free margin on every side.
    pub padding: u32,
    /// Glyph and placeholder fill.
    pub fill: String,
    /// Decimal places in path data.
    pub precision: usize,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RenderParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            canvas_size: config.canvas_size,
            padding: config.padding,
            fill: config.fill.clone(),
            precision: config.precision,
        }
    }

    /// Check that the parameters describe a drawable canvas.
    ///
    /// # Errors
    ///
    /// [`GlyphError::InvalidParams`] when the canvas is zero, the padding
    /// leaves no usable area, the fill is not a hex or named color, or the
    /// precision is above [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.canvas_size == 0 {
            return Err(GlyphError::InvalidParams(
                "canvas size must be greater than 0".to_string(),
            ));
        }
        if u64::from(self.padding) * 2 >= u64::from(self.canvas_size) {
            return Err(GlyphError::InvalidParams(format!(
                "padding {} leaves no drawable area on a {} canvas",
                self.padding, self.canvas_size
            )));
        }
        if !FILL_PATTERN.is_match(&self.fill) {
            return Err(GlyphError::InvalidParams(format!(
                "fill '{}' is not a hex or named color",
                self.fill
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(GlyphError::InvalidParams(format!(
                "precision {} exceeds the maximum of {MAX_PRECISION}",
                self.precision
            )));
        }
        Ok(())
    }
}

/// Render `code_point` from `source` into a complete SVG document.
///
/// # Errors
///
/// Invalid parameters or a failed outline extraction. An empty outline is
/// not an error; it yields the placeholder document.
pub fn render_svg<S: GlyphSource + ?Sized>(
    source: &S,
    code_point: u32,
    params: &RenderParams,
) -> Result<String, GlyphError> {
    params.validate()?;
    let outline = source.extract_outline(code_point)?;
    Ok(render_outline(&outline, params))
}

/// Select the covering source from `index` and render `code_point`.
///
/// # Errors
///
/// [`GlyphError::NotCovered`] when no source covers the code point, plus
/// everything [`render_svg`] can return.
pub fn render_glyph<S: GlyphSource>(
    index: &CoverageIndex<S>,
    code_point: u32,
    params: &RenderParams,
) -> Result<String, GlyphError> {
    let source = index
        .select(code_point)
        .ok_or(GlyphError::NotCovered { code_point })?;
    log::trace!("U+{code_point:04X} -> {}", source.label());
    render_svg(source, code_point, params)
}

/// Build the document for an already extracted outline.
///
/// Assumes `params` has been validated.
pub fn render_outline(outline: &Outline, params: &RenderParams) -> String {
    let size = params.canvas_size;
    let canvas = f64::from(size);

    let document = Document::new()
        .set("xmlns", SVG_NS)
        .set("width", size)
        .set("height", size)
        .set("viewBox", format!("0 0 {size} {size}"))
        .add(
            Rectangle::new()
                .set("width", size)
                .set("height", size)
                .set("fill", BACKGROUND_FILL),
        );

    let document = match bounds(outline) {
        GlyphBounds::Extent(rect) => {
            let normalization = normalize_transform(rect, canvas, f64::from(params.padding));
            let d = serialize(outline, normalization.affine, params.precision);
            document.add(Path::new().set("d", d).set("fill", params.fill.as_str()))
        }
        GlyphBounds::Empty => {
            let offset = fmt_scalar(canvas / 2.0 - PLACEHOLDER_SIZE / 2.0, params.precision);
            let side = fmt_scalar(PLACEHOLDER_SIZE, params.precision);
            document.add(
                Rectangle::new()
                    .set("x", offset.clone())
                    .set("y", offset)
                    .set("width", side.clone())
                    .set("height", side)
                    .set("fill", params.fill.as_str()),
            )
        }
    };

    document.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmint_fonts::testing::FixedSource;

    fn params() -> RenderParams {
        RenderParams {
            canvas_size: 128,
            padding: 8,
            fill: "#000".to_string(),
            precision: 3,
        }
    }

    #[test]
    fn test_square_glyph_document() {
        let source = FixedSource::square("F", &[0x4E00]);
        let svg = render_svg(&source, 0x4E00, &params()).unwrap();

        assert!(svg.contains(r#"viewBox="0 0 128 128""#), "{svg}");
        assert!(svg.contains(r#"width="128""#));
        assert!(svg.contains(r##"fill="#fff""##));
        assert!(svg.contains(r#"d="M8,120L120,120L120,8L8,8Z""#), "{svg}");
        assert!(svg.contains(r##"fill="#000""##));
    }

    #[test]
    fn test_empty_outline_placeholder() {
        let source = FixedSource::square("F", &[]).with_blank(0x3000);
        let svg = render_svg(&source, 0x3000, &params()).unwrap();

        assert!(svg.contains(r#"x="56""#), "{svg}");
        assert!(svg.contains(r#"y="56""#));
        assert!(svg.contains(r#"width="16""#));
        assert!(svg.contains(r#"height="16""#));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = FixedSource::square("F", &[0x4E00]);
        let first = render_svg(&source, 0x4E00, &params()).unwrap();
        for _ in 0..10 {
            assert_eq!(render_svg(&source, 0x4E00, &params()).unwrap(), first);
        }
    }

    #[test]
    fn test_render_glyph_not_covered() {
        let index = CoverageIndex::from_sources(vec![FixedSource::square("F", &[0x4E00])]);
        let err = render_glyph(&index, 0x4E02, &params()).unwrap_err();
        assert!(matches!(err, GlyphError::NotCovered { code_point: 0x4E02 }));
        assert!(render_glyph(&index, 0x4E00, &params()).is_ok());
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let source = FixedSource::square("F", &[]).with_failure(0x4E00, "bad glyf");
        let err = render_svg(&source, 0x4E00, &params()).unwrap_err();
        assert!(err.to_string().contains("bad glyf"));
    }

    #[test]
    fn test_params_validation() {
        assert!(params().validate().is_ok());
        assert!(RenderParams::default().validate().is_ok());

        let zero = RenderParams {
            canvas_size: 0,
            ..params()
        };
        assert!(matches!(zero.validate(), Err(GlyphError::InvalidParams(_))));

        let swallowed = RenderParams {
            padding: 64,
            ..params()
        };
        assert!(swallowed.validate().is_err());

        let injected = RenderParams {
            fill: "\"/><script>".to_string(),
            ..params()
        };
        assert!(injected.validate().is_err());

        let named = RenderParams {
            fill: "crimson".to_string(),
            ..params()
        };
        assert!(named.validate().is_ok());

        let precise = RenderParams {
            precision: 7,
            ..params()
        };
        assert!(precise.validate().is_err());
    }
}
