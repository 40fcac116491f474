//! Typed records for the Overpass API JSON export.
//!
//! Only the parts of the document needed to build LineString features are
//! modelled. Nodes, relations and any other element kind decode to
//! [`Element::Other`] and carry no data.

use super::types::{BoundingBox, Point};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassDocument {
    pub generator: String,
    pub osm3s: Osm3s,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Osm3s {
    pub copyright: String,
    pub timestamp_osm_base: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Way(Way),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub tags: Map<String, Value>,
    pub bounds: Bounds,
    pub geometry: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub minlon: f64,
    pub minlat: f64,
    pub maxlon: f64,
    pub maxlat: f64,
}

impl From<Bounds> for BoundingBox {
    fn from(b: Bounds) -> Self {
        BoundingBox::new(Point::new(b.minlon, b.minlat), Point::new(b.maxlon, b.maxlat))
    }
}

impl OverpassDocument {
    /// Ways in document order
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.elements.iter().filter_map(|element| match element {
            Element::Way(way) => Some(way),
            Element::Other => None,
        })
    }
}
