use crate::data::feature::FeatureCollection;
use crate::data::loader::load_overpass;
use crate::error::ConvertError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Counts reported after a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub ways: usize,
    pub skipped: usize,
}

/// Serialize a collection as 2-space indented JSON
pub fn to_pretty_json(collection: &FeatureCollection) -> Result<Vec<u8>, ConvertError> {
    let mut buffer = serde_json::to_vec_pretty(collection)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Symlink hops followed before giving up on an output path
const MAX_SYMLINK_HOPS: usize = 40;

/// Follow symlinks on `path` so the write lands on the link target.
/// A dangling link resolves to the file it would create.
fn resolve_output_path(path: &Path) -> Result<PathBuf, ConvertError> {
    let mut resolved = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match fs::symlink_metadata(&resolved) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&resolved)?;
                resolved = match resolved.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                };
            }
            _ => return Ok(resolved),
        }
    }
    Err(ConvertError::Io(io::Error::new(
        io::ErrorKind::Other,
        format!("too many levels of symbolic links: {}", path.display()),
    )))
}

/// Write a collection to `output_path`, replacing any existing file
///
/// The document is written to a temporary file next to the destination and
/// renamed into place, so readers never observe a partial file. The result
/// looks like a plain overwrite: symlinks are written through, an existing
/// file keeps its permissions and a new one gets the umask default.
pub fn write_geojson<P: AsRef<Path>>(
    collection: &FeatureCollection,
    output_path: P,
) -> Result<(), ConvertError> {
    let output_path = output_path.as_ref();
    let buffer = to_pretty_json(collection)?;

    let target = resolve_output_path(output_path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

    // Create the temp file with 0666 so the kernel applies the umask
    let mut builder = Builder::new();
    builder.prefix(".overpass-geojson");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(dir)?;

    temp_file.write_all(&buffer)?;
    if let Some(permissions) = existing {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.as_file().sync_all()?;

    // Rename over the resolved target, never over the link itself
    temp_file
        .persist(&target)
        .map_err(|e| ConvertError::Io(e.error))?;

    log::debug!("Wrote {} bytes to {}", buffer.len(), target.display());
    Ok(())
}

/// Convert an Overpass JSON export into a GeoJSON FeatureCollection file
///
/// Only ways are converted, each into a LineString feature. Nodes and
/// relations are skipped. Nothing is written unless the whole input decodes.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
) -> Result<ConvertSummary, ConvertError> {
    // Decode everything before touching the output
    let doc = load_overpass(input_path)?;
    let collection = FeatureCollection::from_overpass(&doc);

    let summary = ConvertSummary {
        ways: collection.features.len(),
        skipped: doc.elements.len() - collection.features.len(),
    };
    log::info!(
        "Converted {} ways, skipped {} other elements",
        summary.ways,
        summary.skipped
    );

    write_geojson(&collection, output_path)?;
    Ok(summary)
}
