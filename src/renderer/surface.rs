use crate::data::types::Point;
use crate::error::ConvertError;
use crate::projection::AxisRange;
use image::DynamicImage;

/// Minimal 2D plotting backend used by the visualizer
///
/// Calls may arrive in any order before `show`; a surface is expected to
/// defer layout until then, the way an interactive plot autoscales on display.
pub trait DrawingSurface {
    /// Raster drawn underneath everything else, filling the plot area
    fn draw_image(&mut self, image: &DynamicImage);

    /// Connected line through `points` in data coordinates
    fn draw_polyline(&mut self, points: &[Point]);

    /// Fix the visible range of either axis; `None` keeps autoscaling
    fn set_axis_limits(&mut self, xlim: Option<AxisRange>, ylim: Option<AxisRange>);

    /// Force one x unit to span as many pixels as one y unit
    fn set_equal_aspect(&mut self, equal: bool);

    /// Produce the final output
    fn show(&mut self) -> Result<(), ConvertError>;
}
