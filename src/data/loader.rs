use super::overpass::OverpassDocument;
use crate::error::ConvertError;
use std::fs;
use std::path::Path;

/// Decode an Overpass JSON document held in memory
pub fn parse_overpass(text: &str) -> Result<OverpassDocument, ConvertError> {
    Ok(serde_json::from_str(text)?)
}

/// Load an Overpass JSON export from disk
///
/// # Arguments
/// * `input_path` - Path to the Overpass JSON file
///
/// # Returns
/// The decoded document. A missing file is an IO error, malformed JSON a
/// parse error, and a missing required key a schema error.
pub fn load_overpass<P: AsRef<Path>>(input_path: P) -> Result<OverpassDocument, ConvertError> {
    let input_path = input_path.as_ref();
    log::info!("Loading Overpass data from {}", input_path.display());

    let text = fs::read_to_string(input_path)?;
    let doc = parse_overpass(&text)?;

    log::info!(
        "Loaded {} elements generated by {:?}",
        doc.elements.len(),
        doc.generator
    );

    Ok(doc)
}
