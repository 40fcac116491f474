use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::ConvertError;

/// Encode a rendered plot as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Encode fully in memory, then write, so an encoder failure leaves no file
pub fn write_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<usize, ConvertError> {
    let png = encode_png(image)?;
    fs::write(path, &png)?;
    Ok(png.len())
}
