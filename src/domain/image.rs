//! Client-side image validation and inline encoding.
//!
//! Images are attached to posts as `data:` URLs. Before a file is read it must
//! pass two checks, in this order: its size is at most [`MAX_IMAGE_BYTES`],
//! and its MIME type starts with `image/`.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted image file, in bytes (50 KiB).
pub const MAX_IMAGE_BYTES: u64 = 50 * 1024;

/// Why an image was not attached.
///
/// The `Display` text is what the alert shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRejection {
    /// The file is larger than [`MAX_IMAGE_BYTES`].
    TooLarge { size: u64 },
    /// The file's MIME type is not an image type.
    NotAnImage { mime: String },
    /// The file could not be read.
    Unreadable { reason: String },
}

impl std::fmt::Display for ImageRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { .. } => write!(f, "Max file size 50KB"),
            Self::NotAnImage { .. } => write!(f, "Please upload a valid image file."),
            Self::Unreadable { reason } => write!(f, "Could not read image: {reason}"),
        }
    }
}

/// Checks an image's size and MIME type.
///
/// # Errors
///
/// Returns [`ImageRejection::TooLarge`] if `size` exceeds the limit, otherwise
/// [`ImageRejection::NotAnImage`] if `mime` is not `image/*`.
///
/// # Examples
///
/// ```
/// use memories::domain::image::{validate_image, ImageRejection};
///
/// assert!(validate_image(10 * 1024, "image/png").is_ok());
/// assert!(matches!(
///     validate_image(60 * 1024, "image/png"),
///     Err(ImageRejection::TooLarge { .. })
/// ));
/// ```
pub fn validate_image(size: u64, mime: &str) -> Result<(), ImageRejection> {
    if size > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge { size });
    }
    if !mime.starts_with("image/") {
        return Err(ImageRejection::NotAnImage {
            mime: mime.to_string(),
        });
    }
    Ok(())
}

/// Guesses a MIME type from a file extension.
///
/// Unknown or missing extensions map to `application/octet-stream`, which
/// fails validation.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Encodes image bytes as a `data:<mime>;base64,<payload>` URL.
#[must_use]
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Short description of an inline image for display, e.g. `image/png, 10.2 KB`.
///
/// Returns `None` for anything that is not a base64 `data:` URL.
#[must_use]
pub fn describe_data_url(data_url: &str) -> Option<String> {
    let rest = data_url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let padding = payload.chars().rev().take_while(|c| *c == '=').count();
    let decoded_len = (payload.len() / 4 * 3).saturating_sub(padding);

    #[allow(clippy::cast_precision_loss)]
    let kb = decoded_len as f64 / 1024.0;
    Some(format!("{mime}, {kb:.1} KB"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn size_is_checked_before_type() {
        assert_eq!(
            validate_image(60 * 1024, "text/plain"),
            Err(ImageRejection::TooLarge { size: 60 * 1024 })
        );
    }

    #[test]
    fn exactly_fifty_kib_is_accepted() {
        assert!(validate_image(MAX_IMAGE_BYTES, "image/jpeg").is_ok());
        assert!(validate_image(MAX_IMAGE_BYTES + 1, "image/jpeg").is_err());
    }

    #[test]
    fn non_image_types_are_rejected_with_alert_text() {
        let err = validate_image(100, "application/pdf").unwrap_err();
        assert_eq!(err.to_string(), "Please upload a valid image file.");
        assert_eq!(
            ImageRejection::TooLarge { size: 1 }.to_string(),
            "Max file size 50KB"
        );
    }

    #[test]
    fn mime_guess_is_case_insensitive() {
        assert_eq!(mime_for_path(&PathBuf::from("/tmp/a.PNG")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("b.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(&PathBuf::from("notes")), "application/octet-stream");
    }

    #[test]
    fn data_url_round_trips_through_description() {
        let url = to_data_url("image/png", &[0u8; 2048]);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(describe_data_url(&url).as_deref(), Some("image/png, 2.0 KB"));
        assert_eq!(describe_data_url("https://example.com/a.png"), None);
    }
}
