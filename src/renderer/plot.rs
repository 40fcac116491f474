use super::surface::DrawingSurface;
use crate::data::types::Point;
use crate::error::ConvertError;
use crate::projection::AxisRange;
use geojson::{Feature, GeoJson, Value};
use image::DynamicImage;
use std::fs;
use std::path::Path;

/// Everything `display_polylines` needs besides the features
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    pub background: Option<DynamicImage>,
    pub xlim: Option<AxisRange>,
    pub ylim: Option<AxisRange>,
    pub scaled: bool,
}

/// Read the features of a GeoJSON FeatureCollection file
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<Vec<Feature>, ConvertError> {
    let text = fs::read_to_string(path.as_ref())?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    match GeoJson::from_json_value(value).map_err(|e| ConvertError::schema(e.to_string()))? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(_) => Err(ConvertError::schema(
            "expected a FeatureCollection, found a Feature",
        )),
        GeoJson::Geometry(_) => Err(ConvertError::schema(
            "expected a FeatureCollection, found a Geometry",
        )),
    }
}

/// Vertices of a LineString feature, `None` for any other geometry type
fn line_points(index: usize, feature: &Feature) -> Result<Option<Vec<Point>>, ConvertError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| ConvertError::schema(format!("feature {index} has no geometry")))?;

    let positions = match &geometry.value {
        Value::LineString(positions) => positions,
        _ => return Ok(None),
    };

    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(ConvertError::schema(format!(
                "feature {index} has a position with {} components",
                position.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Draw every LineString feature onto `surface` and show it
///
/// Other geometry types are skipped. All features are validated before
/// anything is drawn, so a malformed feature leaves the surface untouched.
///
/// # Returns
/// The number of polylines drawn
pub fn display_polylines<S: DrawingSurface>(
    features: &[Feature],
    surface: &mut S,
    options: &PlotOptions,
) -> Result<usize, ConvertError> {
    let mut lines = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        if let Some(points) = line_points(index, feature)? {
            lines.push(points);
        }
    }
    log::debug!(
        "Plotting {} of {} features as polylines",
        lines.len(),
        features.len()
    );

    if let Some(background) = &options.background {
        surface.draw_image(background);
    }
    for points in &lines {
        surface.draw_polyline(points);
    }
    surface.set_axis_limits(options.xlim, options.ylim);
    if options.scaled {
        surface.set_equal_aspect(true);
    }
    surface.show()?;

    Ok(lines.len())
}
