//! Image file loading for insertion into the editing surface.
//!
//! # Responsibility
//! - Read a picked file fully and encode it as a `data:` URI.
//! - Keep the file input reusable whatever the read outcome.
//!
//! # Invariants
//! - `FileInput::read_data_uri` clears the selection on success and failure.
//! - Only files recognized as images are encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

static IMAGE_SOURCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(data:image/[a-z0-9.+-]+;base64,[a-z0-9+/=]+|https?://\S+|[^\s:]+)$")
        .expect("valid image source regex")
});

/// Errors from reading a picked image file.
#[derive(Debug)]
pub enum ImageLoadError {
    /// The input has no selected file.
    NoFileSelected,
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is empty.
    EmptyFile(PathBuf),
    /// The file is not a recognized image type.
    UnsupportedType(PathBuf),
}

impl Display for ImageLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFileSelected => write!(f, "no image file selected"),
            Self::Io { path, source } => {
                write!(f, "failed to read image `{}`: {source}", path.display())
            }
            Self::EmptyFile(path) => write!(f, "image file is empty: `{}`", path.display()),
            Self::UnsupportedType(path) => {
                write!(f, "file is not a supported image: `{}`", path.display())
            }
        }
    }
}

impl Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// File picker state feeding image insertion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileInput {
    selected: Option<PathBuf>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the user's file choice.
    pub fn select(&mut self, path: impl Into<PathBuf>) {
        self.selected = Some(path.into());
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Reads the selected file as a data URI and clears the selection.
    pub fn read_data_uri(&mut self) -> Result<String, ImageLoadError> {
        let path = self.selected.take().ok_or(ImageLoadError::NoFileSelected)?;
        read_image_as_data_uri(&path)
    }
}

/// Reads a whole image file and encodes it as `data:<mime>;base64,<payload>`.
///
/// The MIME type is taken from the file signature, falling back to the
/// extension for text-based formats such as SVG.
pub fn read_image_as_data_uri(path: &Path) -> Result<String, ImageLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ImageLoadError::EmptyFile(path.to_path_buf()));
    }

    let mime = sniff_image_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .ok_or_else(|| ImageLoadError::UnsupportedType(path.to_path_buf()))?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
}

/// Returns whether `source` is acceptable as an image `src`.
///
/// Accepts base64 image data URIs, http(s) URLs and scheme-less paths.
pub fn is_image_source(source: &str) -> bool {
    IMAGE_SOURCE_RE.is_match(source.trim())
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_image_source, read_image_as_data_uri, FileInput, ImageLoadError};
    use std::fs;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn png_is_encoded_with_sniffed_mime() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("pic.bin");
        fs::write(&path, PNG_HEADER).expect("write should succeed");

        let uri = read_image_as_data_uri(&path).expect("png should load");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(is_image_source(&uri));
    }

    #[test]
    fn svg_falls_back_to_extension() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("icon.SVG");
        fs::write(&path, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").expect("write");

        let uri = read_image_as_data_uri(&path).expect("svg should load");
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn input_is_cleared_after_failed_read() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain text").expect("write should succeed");

        let mut input = FileInput::new();
        input.select(&path);
        let err = input.read_data_uri().expect_err("text file is not an image");
        assert!(matches!(err, ImageLoadError::UnsupportedType(_)));
        assert!(input.selected().is_none());

        input.select(dir.path().join("missing.png"));
        let err = input.read_data_uri().expect_err("missing file must fail");
        assert!(matches!(err, ImageLoadError::Io { .. }));
        assert!(input.selected().is_none());

        let err = input.read_data_uri().expect_err("nothing selected");
        assert!(matches!(err, ImageLoadError::NoFileSelected));
    }

    #[test]
    fn image_source_rejects_foreign_schemes_and_blanks() {
        assert!(is_image_source("https://example.com/a.png"));
        assert!(is_image_source("images/a.png"));
        assert!(!is_image_source("javascript:alert(1)"));
        assert!(!is_image_source("   "));
    }
}
