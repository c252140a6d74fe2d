//! Bitmap chart renderer (plotters) with PNG encoding (image).

use std::io::Cursor;
use std::ops::Range;

use image::{ImageFormat, RgbImage};
use once_cell::sync::OnceCell;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

use super::{ChartRenderer, ChartSpec, Rgba};
use crate::error::{RenderError, RenderResult};
use crate::logs::log_warning;

/// Default font family for caption and axis labels.
const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Draws bar charts into an in-memory RGB buffer and encodes them as PNG.
///
/// Text (caption and axes) needs a system font. When the font cannot be
/// loaded, charts are drawn with bars only.
#[derive(Debug, Clone)]
pub struct BitmapRenderer {
    font_family: String,
    draw_text: bool,
    /// Whether the font loaded, checked on first render
    font_loaded: OnceCell<bool>,
}

impl Default for BitmapRenderer {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            draw_text: true,
            font_loaded: OnceCell::new(),
        }
    }
}

impl BitmapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family used for text
    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self.font_loaded = OnceCell::new();
        self
    }

    /// Draw bars only, never touching fonts
    pub fn without_text(mut self) -> Self {
        self.draw_text = false;
        self
    }

    fn text_enabled(&self) -> bool {
        self.draw_text
            && *self.font_loaded.get_or_init(|| {
                let loaded = FontDesc::from((self.font_family.as_str(), 20)).box_size("0").is_ok();
                if !loaded {
                    log_warning(format!(
                        "Font '{}' not found, charts are drawn without text",
                        self.font_family
                    ));
                }
                loaded
            })
    }

    fn draw(&self, spec: &ChartSpec, buffer: &mut [u8]) -> RenderResult<()> {
        let root =
            BitMapBackend::with_buffer(buffer, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let data = &spec.dataset.data;
        let bars = data.len() as u32;
        let font = self.font_family.as_str();
        let text = self.text_enabled();

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if text {
            builder
                .caption(&spec.dataset.label, (font, 20))
                .x_label_area_size(60)
                .y_label_area_size(50);
        }
        let mut chart = builder
            .build_cartesian_2d((0u32..bars).into_segmented(), y_range(spec))
            .map_err(draw_error)?;

        if text {
            let labels = &spec.labels;
            let x_label = |value: &SegmentValue<u32>| bar_label(labels, value);
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len() + 1)
                .x_label_formatter(&x_label)
                .label_style((font, 12))
                .draw()
                .map_err(draw_error)?;
        }

        let values = data.iter().enumerate().map(|(i, v)| (i as u32, *v));
        let fill = color(spec.dataset.background_color).filled();
        let border = color(spec.dataset.border_color).stroke_width(spec.dataset.border_width);

        chart
            .draw_series(Histogram::vertical(&chart).style(fill).margin(10).data(values.clone()))
            .map_err(draw_error)?;
        chart
            .draw_series(Histogram::vertical(&chart).style(border).margin(10).data(values))
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

/// Value axis: from zero (or just under the smallest bar) to one above the tallest.
fn y_range(spec: &ChartSpec) -> Range<u32> {
    let data = &spec.dataset.data;
    let top = data.iter().copied().max().unwrap_or(0) + 1;
    let bottom = if spec.y_begin_at_zero {
        0
    } else {
        data.iter().copied().min().unwrap_or(0).saturating_sub(1)
    };
    bottom..top
}

/// Tick label under a bar; ticks between bars stay blank.
fn bar_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

impl ChartRenderer for BitmapRenderer {
    fn render(&self, spec: &ChartSpec) -> RenderResult<Vec<u8>> {
        if spec.dataset.data.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buffer = vec![0u8; spec.width as usize * spec.height as usize * 3];
        self.draw(spec, &mut buffer)?;
        encode_png(buffer, spec.width, spec.height)
    }
}

/// Encode a packed RGB buffer as PNG.
pub fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        RenderError::Encode(format!("buffer does not hold {}x{} RGB pixels", width, height))
    })?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

fn color(c: Rgba) -> RGBAColor {
    RGBColor(c.r, c.g, c.b).mix(c.a)
}

fn draw_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn spec(salaries: &[&str]) -> ChartSpec {
        let records: Vec<Record> = salaries
            .iter()
            .map(|s| {
                let mut record = Record::new();
                record.insert("Maaş aralığınız?".into(), s.to_string());
                record
            })
            .collect();
        ChartSpec::for_group(&records, "Maaş aralığınız?", "undefined")
    }

    #[test]
    fn test_encode_png() {
        let bytes = encode_png(vec![255u8; 4 * 3 * 3], 4, 3).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_encode_png_wrong_size() {
        let err = encode_png(vec![0u8; 10], 4, 3).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }

    #[test]
    fn test_empty_chart_is_rejected() {
        let err = BitmapRenderer::new().render(&spec(&[])).unwrap_err();
        assert!(matches!(err, RenderError::EmptyChart));
    }

    #[test]
    fn test_y_range() {
        let mut chart = spec(&["A", "B", "C"]);
        assert_eq!(y_range(&chart), 0..4);

        chart.y_begin_at_zero = false;
        chart.dataset.data = vec![3, 5];
        assert_eq!(y_range(&chart), 2..6);
    }

    #[test]
    fn test_bar_labels() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(bar_label(&labels, &SegmentValue::CenterOf(0)), "A");
        assert_eq!(bar_label(&labels, &SegmentValue::CenterOf(1)), "B");
        assert_eq!(bar_label(&labels, &SegmentValue::CenterOf(2)), "");
        assert_eq!(bar_label(&labels, &SegmentValue::Exact(0)), "");
        assert_eq!(bar_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn test_render_bars_without_text() {
        let renderer = BitmapRenderer::new().without_text();
        let bytes = renderer.render(&spec(&["A", "B", "C"])).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));

        let image = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (800, 600));

        // Border color is drawn at full opacity
        assert!(image.pixels().any(|p| p.0 == [75, 192, 192]));

        // Every bar rises from the bottom of the plot, so a row just above it
        // crosses one colored run per bar
        let row = 560;
        let mut runs = 0;
        let mut inside = false;
        for x in 0..image.width() {
            let colored = image.get_pixel(x, row).0 != [255, 255, 255];
            if colored && !inside {
                runs += 1;
            }
            inside = colored;
        }
        assert_eq!(runs, 3);
    }

    #[test]
    #[ignore = "needs a system font"]
    fn test_render_png_with_text() {
        let bytes = BitmapRenderer::new()
            .render(&spec(&["10.000 - 20.000", "20.000 - 30.000"]))
            .unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 600));
    }
}
