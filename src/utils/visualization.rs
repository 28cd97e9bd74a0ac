//! Drawing utilities for restitching results.
//!
//! Two overlays are produced along the pipeline: a detection-stage debug
//! image showing each kept box with its reading-order ordinal, and the final
//! annotated raster where each reconstructed phrase is drawn inside its
//! bounding rectangle. Text rendering scales the font down until the phrase
//! fits the box width.

use ab_glyph::{Font, FontVec, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;
use std::path::Path;
use tracing::{debug, info};

use crate::processors::{Polygon, Rect};

const BBOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const TEXT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const PADDING: f32 = 4.0;

const MIN_FONT_SIZE: f32 = 8.0;

/// Configuration for result visualization.
///
/// Holds the font used for text rendering and box styling. Without a font,
/// boxes are still drawn and text rendering is skipped.
pub struct VisualizationConfig {
    /// The font to use for text rendering. If None, text rendering is
    /// skipped.
    pub font: Option<FontVec>,

    /// The thickness of bounding box lines. Defaults to 2.
    pub bbox_thickness: i32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            font: None,
            bbox_thickness: 2,
        }
    }
}

impl VisualizationConfig {
    /// Creates a VisualizationConfig with a font loaded from the specified
    /// path.
    pub fn with_font_path(font_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let font_data = std::fs::read(font_path)?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|_| format!("Failed to parse font file: {}", font_path.display()))?;

        Ok(Self {
            font: Some(font),
            bbox_thickness: 2,
        })
    }

    /// Creates a VisualizationConfig with a system font.
    ///
    /// Attempts common system font locations and falls back to the default
    /// (no text rendering) if none loads.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path)
                && let Ok(font) = FontVec::try_from_vec(font_data)
            {
                info!("Loaded system font: {}", path);
                return Self {
                    font: Some(font),
                    bbox_thickness: 2,
                };
            }
        }

        debug!("No system font found, text rendering will be skipped");
        Self::default()
    }
}

/// Converts a pipeline rectangle into an imageproc rectangle, if drawable.
fn to_pixel_rect(rect: &Rect) -> Option<PixelRect> {
    (rect.width > 0 && rect.height > 0)
        .then(|| PixelRect::at(rect.x, rect.y).of_size(rect.width as u32, rect.height as u32))
}

fn is_rect_in_bounds(rect: &PixelRect, img_width: i32, img_height: i32) -> bool {
    rect.left() >= 0 && rect.top() >= 0 && rect.right() < img_width && rect.bottom() < img_height
}

/// Draws a phrase bounding box with the configured thickness.
pub fn draw_phrase_box(img: &mut RgbImage, rect: &Rect, config: &VisualizationConfig) {
    let Some(pixel_rect) = to_pixel_rect(rect) else {
        return;
    };
    let (img_width, img_height) = (img.width() as i32, img.height() as i32);

    for thickness in 0..config.bbox_thickness {
        let thick_rect = PixelRect::at(pixel_rect.left() - thickness, pixel_rect.top() - thickness)
            .of_size(
                pixel_rect.width() + (2 * thickness) as u32,
                pixel_rect.height() + (2 * thickness) as u32,
            );

        if is_rect_in_bounds(&thick_rect, img_width, img_height) {
            draw_hollow_rect_mut(img, thick_rect, BBOX_COLOR);
        }
    }
}

/// Draws phrase text centered inside its bounding box.
///
/// The font scale starts from the box height and shrinks until the text fits
/// the box width minus padding. Skipped if no font is configured or the box
/// is degenerate.
pub fn draw_phrase_text(img: &mut RgbImage, rect: &Rect, text: &str, config: &VisualizationConfig) {
    let Some(font) = &config.font else { return };
    let Some((pos, scale)) = fit_horizontal_text(text, font, rect) else {
        return;
    };

    let (img_width, img_height) = (img.width() as i32, img.height() as i32);
    if pos.0 >= 0 && pos.1 >= 0 && pos.0 < img_width && pos.1 < img_height {
        draw_text_mut(img, TEXT_COLOR, pos.0, pos.1, scale, font, text);
    }
}

/// Draws detection polygons with their 1-based reading-order ordinals.
///
/// Detection-stage debug overlay: each polygon outline is traced edge by
/// edge and its ordinal rendered just above the box.
pub fn draw_detection_ordinals(
    img: &mut RgbImage,
    polygons: &[Polygon],
    config: &VisualizationConfig,
) {
    for (i, polygon) in polygons.iter().enumerate() {
        let n = polygon.points.len();
        for j in 0..n {
            let a = polygon.points[j];
            let b = polygon.points[(j + 1) % n];
            draw_line_segment_mut(
                img,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                BBOX_COLOR,
            );
        }

        if let Some(font) = &config.font {
            let rect = polygon.bounding_rect();
            let label = (i + 1).to_string();
            let label_y = (rect.y - 24).max(0);
            draw_text_mut(img, TEXT_COLOR, rect.x, label_y, 20.0, font, &label);
        }
    }
}

/// Computes position and scale for text centered inside a rectangle.
///
/// Returns None if the rectangle or the text is empty.
fn fit_horizontal_text(text: &str, font: &FontVec, rect: &Rect) -> Option<((i32, i32), f32)> {
    if text.is_empty() || rect.width <= 0 || rect.height <= 0 {
        return None;
    }

    let available_width = rect.width as f32 - PADDING;
    let available_height = rect.height as f32;

    let mut font_scale = (available_height * 0.7).max(MIN_FONT_SIZE);

    let mut text_width = measure_text_width(text, font, font_scale);
    if text_width > available_width {
        let scale_factor = available_width / text_width;
        font_scale = (font_scale * scale_factor).max(MIN_FONT_SIZE);
        text_width = measure_text_width(text, font, font_scale);
    }

    let text_x = rect.x + (((rect.width as f32 - text_width) / 2.0) as i32).max(2);
    let text_y = rect.y + (available_height / 2.0) as i32 - (font_scale / 2.0) as i32;

    Some(((text_x, text_y), font_scale))
}

/// Measures the rendered width of text at a given font scale.
fn measure_text_width(text: &str, font: &FontVec, scale: f32) -> f32 {
    let scaled_font = font.as_scaled(scale);
    text.chars()
        .map(|ch| {
            let glyph = scaled_font.scaled_glyph(ch);
            scaled_font.h_advance(glyph.id)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_font() {
        let config = VisualizationConfig::default();
        assert!(config.font.is_none());
        assert_eq!(config.bbox_thickness, 2);
    }

    #[test]
    fn degenerate_rects_are_not_drawable() {
        assert!(to_pixel_rect(&Rect::new(0, 0, 0, 10)).is_none());
        assert!(to_pixel_rect(&Rect::new(0, 0, 10, 0)).is_none());
        assert!(to_pixel_rect(&Rect::new(5, 5, 10, 10)).is_some());
    }

    #[test]
    fn drawing_without_font_leaves_text_untouched() {
        let mut img = RgbImage::new(200, 100);
        let config = VisualizationConfig::default();
        let before = img.clone();

        // No font: text rendering is a no-op, box drawing is not.
        draw_phrase_text(&mut img, &Rect::new(10, 10, 100, 30), "hello", &config);
        assert_eq!(img, before);

        draw_phrase_box(&mut img, &Rect::new(10, 10, 100, 30), &config);
        assert_ne!(img, before);
    }

    #[test]
    fn out_of_bounds_box_is_skipped() {
        let mut img = RgbImage::new(50, 50);
        let config = VisualizationConfig::default();
        let before = img.clone();

        draw_phrase_box(&mut img, &Rect::new(10, 10, 500, 500), &config);
        assert_eq!(img, before);
    }

    #[test]
    fn detection_overlay_traces_polygon_edges() {
        let mut img = RgbImage::new(100, 100);
        let config = VisualizationConfig::default();
        let polygons = vec![Polygon::from_coords(10, 10, 40, 30)];

        draw_detection_ordinals(&mut img, &polygons, &config);
        assert_eq!(*img.get_pixel(20, 10), BBOX_COLOR);
        assert_eq!(*img.get_pixel(10, 20), BBOX_COLOR);
    }
}
