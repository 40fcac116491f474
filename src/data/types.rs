use serde::Deserialize;

/// A vertex in geographic coordinates, as found in an Overpass way geometry
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Point { lon, lat }
    }

    /// GeoJSON position, longitude first
    pub fn position(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        BoundingBox { min, max }
    }

    /// GeoJSON bbox member: `[minlon, minlat, maxlon, maxlat]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.lon, self.min.lat, self.max.lon, self.max.lat]
    }

    /// Create bounding box from a list of points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_lon = f64::MAX;
        let mut min_lat = f64::MAX;
        let mut max_lon = f64::MIN;
        let mut max_lat = f64::MIN;

        for point in points {
            min_lon = min_lon.min(point.lon);
            min_lat = min_lat.min(point.lat);
            max_lon = max_lon.max(point.lon);
            max_lat = max_lat.max(point.lat);
        }

        Some(BoundingBox {
            min: Point::new(min_lon, min_lat),
            max: Point::new(max_lon, max_lat),
        })
    }

    /// Smallest box covering both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Point::new(self.min.lon.min(other.min.lon), self.min.lat.min(other.min.lat)),
            max: Point::new(self.max.lon.max(other.max.lon), self.max.lat.max(other.max.lat)),
        }
    }
}
