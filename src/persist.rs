use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    error::{ImageFxError, Result},
    models::{GeneratedImage, ImageData},
};

/// Write the first generated image to disk and return the path it landed at.
///
/// The output path's parent directories are created if missing. A saveable
/// image is copied into the output directory under its own file name and
/// the copy's path is reported; byte and base64 payloads are written to the
/// requested path itself.
pub fn save_first(images: &[GeneratedImage], output_path: &Path) -> Result<PathBuf> {
    let first = images
        .first()
        .ok_or_else(|| ImageFxError::ResponseError("no images to save".into()))?;

    let parent = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|e| {
            ImageFxError::SaveError(format!(
                "failed to create output directory {}: {}",
                dir.display(),
                e
            ))
        })?;
    }

    match &first.data {
        ImageData::Saveable(source) => {
            let dir = parent.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
            let file_name = source
                .file_name()
                .unwrap_or_else(|| OsStr::new("generated.png"));
            let destination = dir.join(file_name);
            fs::copy(source, &destination).map_err(|e| {
                ImageFxError::SaveError(format!(
                    "failed to copy image {} into {}: {}",
                    source.display(),
                    dir.display(),
                    e
                ))
            })?;
            log::info!("Image saved to: {}", destination.display());
            Ok(destination)
        }
        ImageData::RawBytes(bytes) => {
            write_bytes(output_path, bytes)?;
            Ok(output_path.to_path_buf())
        }
        ImageData::Base64Encoded(encoded) => {
            let bytes = base64::decode(encoded).map_err(|e| {
                ImageFxError::SaveError(format!("failed to decode base64 image data: {}", e))
            })?;
            write_bytes(output_path, &bytes)?;
            Ok(output_path.to_path_buf())
        }
        ImageData::Unknown(fields) => {
            log::error!("Cannot save image data; available fields: {:?}", fields);
            Err(ImageFxError::SaveError(
                "cannot save image data: unrecognized image shape".into(),
            ))
        }
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| {
        ImageFxError::SaveError(format!("failed to write image to {}: {}", path.display(), e))
    })?;
    log::info!("Image saved to: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
