use overpass_geojson::renderer::{display_polylines, load_features, PlotOptions, RasterCanvas};
use overpass_geojson::{convert, ConvertError};
use std::fs;
use tempfile::TempDir;

const SOURCE: &str = r#"{
    "generator": "Overpass API",
    "osm3s": {"copyright": "ODbL", "timestamp_osm_base": "2021-03-01T12:00:00Z"},
    "elements": [
        {"type": "way", "id": 1, "tags": {"natural": "coastline"},
         "bounds": {"minlon": 0, "minlat": 0, "maxlon": 10, "maxlat": 10},
         "geometry": [{"lon": 0, "lat": 0}, {"lon": 10, "lat": 10}]},
        {"type": "node", "id": 2, "lat": 5, "lon": 5},
        {"type": "way", "id": 3,
         "bounds": {"minlon": 0, "minlat": 10, "maxlon": 10, "maxlat": 10},
         "geometry": [{"lon": 0, "lat": 10}, {"lon": 10, "lat": 10}]}
    ]
}"#;

#[test]
fn test_convert_then_plot() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = TempDir::new()?;
    let input = dir.path().join("coast.json");
    let output = dir.path().join("coast.geojson");
    let png = dir.path().join("coast.png");
    fs::write(&input, SOURCE)?;

    convert(&input, &output)?;
    let features = load_features(&output)?;
    assert_eq!(features.len(), 2);

    let mut canvas = RasterCanvas::with_size(&png, 200, 100);
    let options = PlotOptions {
        scaled: true,
        ..PlotOptions::default()
    };
    let drawn = display_polylines(&features, &mut canvas, &options)?;
    assert_eq!(drawn, 2);

    let image = image::open(&png)?.to_rgba8();
    assert_eq!(image.dimensions(), (200, 100));

    let non_white = image
        .pixels()
        .filter(|p| p[0] != 255 || p[1] != 255 || p[2] != 255)
        .count();
    assert!(non_white > 100, "expected drawn lines, found {non_white} pixels");

    // Equal scale on a 2:1 canvas leaves the left and right margins empty
    assert!((0..100).all(|y| image.get_pixel(0, y)[0] == 255));
    Ok(())
}

#[test]
fn test_load_features_rejects_non_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("point.geojson");
    fs::write(&path, r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#).unwrap();

    assert!(matches!(load_features(&path), Err(ConvertError::Schema(_))));
}

#[test]
fn test_load_features_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.geojson");
    fs::write(&path, "{\"type\": \"FeatureCollection\", ").unwrap();

    assert!(matches!(load_features(&path), Err(ConvertError::Parse(_))));
}

#[test]
fn test_feature_without_geometry_key_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.geojson");
    let png = dir.path().join("bad.png");
    fs::write(
        &path,
        r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}}]}"#,
    )
    .unwrap();

    let result = load_features(&path).and_then(|features| {
        let mut canvas = RasterCanvas::with_size(&png, 10, 10);
        display_polylines(&features, &mut canvas, &PlotOptions::default())
    });
    assert!(matches!(result, Err(ConvertError::Schema(_))));
    assert!(!png.exists());
}
