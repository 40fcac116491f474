//! GeoJSON features and collection written by the converter.
//!
//! Field order here is the serialized key order.

use super::overpass::{OverpassDocument, Way};
use super::types::BoundingBox;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    // Provenance copied from the Overpass header, not part of GeoJSON
    pub generator: String,
    pub copyright: String,
    pub timestamp: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: Map<String, Value>,
    pub bbox: [f64; 4],
    pub geometry: LineString,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "LineString")]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

impl Feature {
    /// Build the LineString feature for a way
    ///
    /// The id is `way/<id>`, tags become properties unchanged and the
    /// geometry keeps the way's vertex order.
    pub fn from_way(way: &Way) -> Self {
        Feature {
            properties: way.tags.clone(),
            bbox: BoundingBox::from(way.bounds).to_array(),
            geometry: LineString {
                coordinates: way.geometry.iter().map(|p| p.position()).collect(),
            },
            id: format!("way/{}", way.id),
        }
    }
}

impl FeatureCollection {
    /// One feature per way, in document order. Other elements are dropped.
    pub fn from_overpass(doc: &OverpassDocument) -> Self {
        FeatureCollection {
            generator: doc.generator.clone(),
            copyright: doc.osm3s.copyright.clone(),
            timestamp: doc.osm3s.timestamp_osm_base.clone(),
            features: doc.ways().map(Feature::from_way).collect(),
        }
    }
}
