use crate::data::types::{BoundingBox, Point};

/// Fraction of the data range added on each side when autoscaling
const AUTOSCALE_MARGIN: f64 = 0.05;

/// Half-width given to an axis whose range collapsed to a single value
const DEGENERATE_HALF_RANGE: f64 = 0.5;

/// Axis range `(min, max)` in data units
pub type AxisRange = (f64, f64);

/// Maps data coordinates onto a `width` x `height` pixel grid.
/// x grows to the right, y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: AxisRange,
    pub y: AxisRange,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Choose axis ranges for a plot
    ///
    /// # Arguments
    /// * `extent` - Bounding box of everything drawn, if anything was drawn
    /// * `xlim`, `ylim` - Explicit ranges; these win over the data extent
    /// * `scaled` - Expand the narrower axis so one unit is the same number
    ///   of pixels on both axes
    pub fn fit(
        extent: Option<BoundingBox>,
        xlim: Option<AxisRange>,
        ylim: Option<AxisRange>,
        scaled: bool,
        width: u32,
        height: u32,
    ) -> Self {
        let auto = extent.map(|b| {
            (
                pad((b.min.lon, b.max.lon)),
                pad((b.min.lat, b.max.lat)),
            )
        });

        let x = xlim.or(auto.map(|a| a.0)).unwrap_or((0.0, 1.0));
        let y = ylim.or(auto.map(|a| a.1)).unwrap_or((0.0, 1.0));

        let mut viewport = Viewport {
            x: widen(x),
            y: widen(y),
            width: width.max(1),
            height: height.max(1),
        };
        if scaled {
            viewport.equalize();
        }
        viewport
    }

    /// Data units per pixel along x and y
    pub fn units_per_pixel(&self) -> (f64, f64) {
        (
            (self.x.1 - self.x.0).abs() / self.width as f64,
            (self.y.1 - self.y.0).abs() / self.height as f64,
        )
    }

    /// Project a data point to (column, row) pixel coordinates
    pub fn to_pixel(&self, point: Point) -> (f64, f64) {
        let col = (point.lon - self.x.0) / (self.x.1 - self.x.0) * self.width as f64;
        let row = (self.y.1 - point.lat) / (self.y.1 - self.y.0) * self.height as f64;
        (col, row)
    }

    fn equalize(&mut self) {
        let (ux, uy) = self.units_per_pixel();
        if ux > uy {
            self.y = stretch(self.y, ux * self.height as f64);
        } else if uy > ux {
            self.x = stretch(self.x, uy * self.width as f64);
        }
    }
}

fn pad((min, max): AxisRange) -> AxisRange {
    let margin = (max - min) * AUTOSCALE_MARGIN;
    (min - margin, max + margin)
}

fn widen((min, max): AxisRange) -> AxisRange {
    if min == max {
        (min - DEGENERATE_HALF_RANGE, max + DEGENERATE_HALF_RANGE)
    } else {
        (min, max)
    }
}

/// Grow a range about its centre to `span`, keeping its direction
fn stretch((min, max): AxisRange, span: f64) -> AxisRange {
    let center = (min + max) / 2.0;
    let half = span / 2.0 * (max - min).signum();
    (center - half, center + half)
}
