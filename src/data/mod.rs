pub mod feature;
pub mod loader;
pub mod overpass;
pub mod types;
