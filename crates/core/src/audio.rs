//! Audio upload validation and stored-filename generation.
//!
//! Uploaded files are validated by extension and size before any row is
//! written; stored filenames embed the track id, version number, and a
//! random component so concurrent uploads never collide.

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// File extensions accepted for track version uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "aac", "ogg"];

/// Maximum accepted upload size (100 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Extract and validate the lowercase extension of an uploaded filename.
pub fn validate_extension(filename: &str) -> Result<String, CoreError> {
    let ext = filename
        .rsplit('.')
        .next()
        .filter(|e| *e != filename)
        .unwrap_or("")
        .to_lowercase();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported audio format '.{ext}'. Supported: .mp3, .wav, .flac, .m4a, .aac, .ogg"
        )))
    }
}

/// Reject uploads larger than [`MAX_UPLOAD_BYTES`].
pub fn validate_size(size_bytes: u64) -> Result<(), CoreError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File exceeds the {} MiB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Generate a collision-resistant stored filename for a track version.
///
/// Format: `track_{track_id}_v{version}_{random8}.{ext}` -- the random
/// component keeps re-uploads of the same version number (e.g. after a
/// rolled-back create) from overwriting each other.
pub fn storage_filename(track_id: DbId, version_number: i32, ext: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("track_{track_id}_v{version_number}_{}.{ext}", &random[..8])
}
