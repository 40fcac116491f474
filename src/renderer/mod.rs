pub mod plot;
pub mod raster;
pub mod surface;

pub use plot::{display_polylines, load_features, PlotOptions};
pub use raster::RasterCanvas;
pub use surface::DrawingSurface;
