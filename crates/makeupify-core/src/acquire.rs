//! Image acquisition: user-selected file to data URI, and back to pixels.

use crate::{Error, Result};
use image::{ImageFormat, RgbaImage};
use makeupify_types::EncodedImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expand a leading `~` to the home directory
#[must_use]
pub fn expand_path(input: &str) -> PathBuf {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if let Some(rest) = trimmed.strip_prefix("~/")
        && let Some(base) = directories::BaseDirs::new()
    {
        return base.home_dir().join(rest);
    }
    if trimmed == "~"
        && let Some(base) = directories::BaseDirs::new()
    {
        return base.home_dir().to_path_buf();
    }
    PathBuf::from(trimmed)
}

/// Mime type for the formats the generator accepts
fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Gif => Some("image/gif"),
        _ => None,
    }
}

/// Encode raw file bytes as a data URI after sniffing the format.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image.
pub fn encode_bytes(bytes: &[u8], name: &str) -> Result<EncodedImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| Error::UnsupportedImage(name.to_string()))?;
    let mime = mime_for(format).ok_or_else(|| Error::UnsupportedImage(name.to_string()))?;
    Ok(EncodedImage::from_bytes(mime, bytes))
}

/// Read an image file into a data URI.
///
/// # Errors
///
/// Returns an error if the file cannot be read, exceeds `max_bytes`, or is
/// not a PNG, JPEG, WebP or GIF image.
pub async fn acquire(path: &Path, max_bytes: u64) -> Result<EncodedImage> {
    let meta = tokio::fs::metadata(path).await?;
    if meta.len() > max_bytes {
        return Err(Error::ImageTooLarge {
            size: meta.len(),
            limit: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let image = encode_bytes(&bytes, &path.display().to_string())?;
    debug!(
        "Acquired {} ({}, {} bytes)",
        path.display(),
        image.mime_type(),
        bytes.len()
    );
    Ok(image)
}

/// Decode an encoded image to RGBA pixels for preview rendering.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64 or not a decodable image.
pub fn decode_preview(image: &EncodedImage) -> Result<RgbaImage> {
    let bytes = image.decode_bytes()?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Write an encoded image to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the payload cannot be decoded or the file cannot be written.
pub async fn save_image(image: &EncodedImage, path: &Path) -> Result<PathBuf> {
    let bytes = image.decode_bytes()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    debug!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}
