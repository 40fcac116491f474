use super::surface::DrawingSurface;
use crate::data::types::{BoundingBox, Point};
use crate::encoding::png::write_png;
use crate::error::ConvertError;
use crate::projection::{AxisRange, Viewport};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Default canvas edge, a 16 inch figure at 100 dpi
pub const DEFAULT_CANVAS_SIZE: u32 = 1600;

/// Largest canvas edge accepted from the command line
pub const MAX_CANVAS_SIZE: u32 = 16384;

/// Stroke width in pixels
const LINE_WIDTH: i64 = 2;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Line colour cycle (matplotlib "tab10")
const PALETTE: [Rgba<u8>; 10] = [
    Rgba([31, 119, 180, 255]),
    Rgba([255, 127, 14, 255]),
    Rgba([44, 160, 44, 255]),
    Rgba([214, 39, 40, 255]),
    Rgba([148, 103, 189, 255]),
    Rgba([140, 86, 75, 255]),
    Rgba([227, 119, 194, 255]),
    Rgba([127, 127, 127, 255]),
    Rgba([188, 189, 34, 255]),
    Rgba([23, 190, 207, 255]),
];

/// Headless drawing surface that rasterizes into a PNG file on `show`
pub struct RasterCanvas {
    width: u32,
    height: u32,
    output_path: PathBuf,
    background: Option<RgbaImage>,
    polylines: Vec<Vec<Point>>,
    xlim: Option<AxisRange>,
    ylim: Option<AxisRange>,
    equal_aspect: bool,
}

impl RasterCanvas {
    pub fn with_size<P: AsRef<Path>>(output_path: P, width: u32, height: u32) -> Self {
        RasterCanvas {
            width: width.max(1),
            height: height.max(1),
            output_path: output_path.as_ref().to_path_buf(),
            background: None,
            polylines: Vec::new(),
            xlim: None,
            ylim: None,
            equal_aspect: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Axis ranges the next render will use
    pub fn viewport(&self) -> Viewport {
        let extent = self
            .polylines
            .iter()
            .filter_map(|line| BoundingBox::from_points(line))
            .reduce(|a, b| a.union(&b));

        Viewport::fit(
            extent,
            self.xlim,
            self.ylim,
            self.equal_aspect,
            self.width,
            self.height,
        )
    }

    /// Rasterize all recorded layers
    pub fn render(&self) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);

        if let Some(background) = &self.background {
            let resized = imageops::resize(background, self.width, self.height, FilterType::Triangle);
            imageops::overlay(&mut image, &resized, 0, 0);
        }

        let viewport = self.viewport();
        for (i, line) in self.polylines.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            for pair in line.windows(2) {
                let from = viewport.to_pixel(pair[0]);
                let to = viewport.to_pixel(pair[1]);
                draw_segment(&mut image, from, to, color);
            }
        }

        image
    }
}

impl DrawingSurface for RasterCanvas {
    fn draw_image(&mut self, image: &DynamicImage) {
        self.background = Some(image.to_rgba8());
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.polylines.push(points.to_vec());
    }

    fn set_axis_limits(&mut self, xlim: Option<AxisRange>, ylim: Option<AxisRange>) {
        if xlim.is_some() {
            self.xlim = xlim;
        }
        if ylim.is_some() {
            self.ylim = ylim;
        }
    }

    fn set_equal_aspect(&mut self, equal: bool) {
        self.equal_aspect = equal;
    }

    fn show(&mut self) -> Result<(), ConvertError> {
        let image = self.render();
        let bytes = write_png(&image, &self.output_path)?;

        log::info!(
            "Rendered {} polylines to {} ({}x{}, {} bytes)",
            self.polylines.len(),
            self.output_path.display(),
            self.width,
            self.height,
            bytes
        );
        Ok(())
    }
}

/// Draw a straight stroke between two pixel positions
fn draw_segment(image: &mut RgbaImage, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
    let margin = LINE_WIDTH as f64;
    let bounds = (
        -margin,
        -margin,
        image.width() as f64 + margin,
        image.height() as f64 + margin,
    );
    let Some(((x0, y0), (x1, y1))) = clip_segment(from, to, bounds) else {
        return;
    };

    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        stamp(image, x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, color);
    }
}

fn stamp(image: &mut RgbaImage, x: f64, y: f64, color: Rgba<u8>) {
    let cx = x.floor() as i64;
    let cy = y.floor() as i64;
    for dy in 0..LINE_WIDTH {
        for dx in 0..LINE_WIDTH {
            let px = cx + dx - LINE_WIDTH / 2;
            let py = cy + dy - LINE_WIDTH / 2;
            if px >= 0 && py >= 0 && (px as u32) < image.width() && (py as u32) < image.height() {
                image.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Liang-Barsky clip of a segment against `(min_x, min_y, max_x, max_y)`
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if !t0.is_finite() || !t1.is_finite() || t0 > t1 {
        return None;
    }
    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_colored(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| **p != BACKGROUND).count()
    }

    #[test]
    fn test_canvas_size_and_path() {
        let canvas = RasterCanvas::with_size("unused.png", 30, 20);
        assert_eq!(canvas.viewport().width, 30);
        assert_eq!(canvas.viewport().height, 20);
        assert_eq!(canvas.output_path(), Path::new("unused.png"));
    }

    #[test]
    fn test_empty_canvas_is_white() {
        let canvas = RasterCanvas::with_size("unused.png", 32, 16);
        let image = canvas.render();
        assert_eq!(image.dimensions(), (32, 16));
        assert_eq!(count_colored(&image), 0);
    }

    #[test]
    fn test_polyline_is_drawn_with_palette_color() {
        let mut canvas = RasterCanvas::with_size("unused.png", 64, 64);
        canvas.set_axis_limits(Some((0.0, 10.0)), Some((0.0, 10.0)));
        canvas.draw_polyline(&[Point::new(1.0, 5.0), Point::new(9.0, 5.0)]);

        let image = canvas.render();
        assert!(count_colored(&image) > 40);
        assert_eq!(*image.get_pixel(32, 32), PALETTE[0]);
        assert_eq!(*image.get_pixel(32, 5), BACKGROUND);
    }

    #[test]
    fn test_polylines_cycle_colors() {
        let mut canvas = RasterCanvas::with_size("unused.png", 64, 64);
        canvas.set_axis_limits(Some((0.0, 10.0)), Some((0.0, 10.0)));
        canvas.draw_polyline(&[Point::new(1.0, 2.0), Point::new(9.0, 2.0)]);
        canvas.draw_polyline(&[Point::new(5.0, 1.0), Point::new(5.0, 4.0)]);
        canvas.draw_polyline(&[Point::new(1.0, 8.0), Point::new(9.0, 8.0)]);

        let image = canvas.render();
        // (5.0, 8.0) maps to pixel (32, 12.8)
        assert_eq!(*image.get_pixel(32, 12), PALETTE[2]);
    }

    #[test]
    fn test_background_fills_canvas() {
        let mut canvas = RasterCanvas::with_size("unused.png", 20, 10);
        let background = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        canvas.draw_image(&DynamicImage::ImageRgba8(background));

        let image = canvas.render();
        assert!(image.pixels().all(|p| p[0] < 8 && p[1] < 8 && p[2] < 8));
    }

    #[test]
    fn test_far_away_segment_is_clipped() {
        assert_eq!(
            clip_segment((-100.0, -100.0), (-50.0, -10.0), (0.0, 0.0, 10.0, 10.0)),
            None
        );

        let ((x0, y0), (x1, y1)) =
            clip_segment((-10.0, 5.0), (20.0, 5.0), (0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(x0.abs() < 1e-9 && (x1 - 10.0).abs() < 1e-9);
        assert_eq!((y0, y1), (5.0, 5.0));
    }

    #[test]
    fn test_show_writes_png() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("plot.png");

        let mut canvas = RasterCanvas::with_size(&path, 40, 30);
        canvas.draw_polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        canvas.show()?;

        let written = image::open(&path)?;
        assert_eq!((written.width(), written.height()), (40, 30));
        Ok(())
    }
}
