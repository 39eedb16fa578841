use std::path::Path;

use serde::Serialize;

use crate::error::{CoreError, Result};

/// A file handed over by the presentation layer, before extraction.
#[derive(Debug, Clone)]
pub struct UploadedArtifact {
    pub filename: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Display metadata for an uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactDetails<'a> {
    pub filename: &'a str,
    pub filetype: &'a str,
    pub filesize: usize,
}

impl UploadedArtifact {
    pub fn new(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                CoreError::Artifact(format!("no usable file name in {}", path.display()))
            })?
            .to_string();

        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        let bytes = std::fs::read(path)?;

        Ok(Self {
            filename,
            media_type,
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn details(&self) -> ArtifactDetails<'_> {
        ArtifactDetails {
            filename: &self.filename,
            filetype: &self.media_type,
            filesize: self.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_path_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"hello").unwrap();

        let artifact = UploadedArtifact::from_path(&path).unwrap();
        assert_eq!(artifact.filename, "notes.txt");
        assert_eq!(artifact.media_type, "text/plain");
        assert_eq!(artifact.size(), 5);
    }

    #[test]
    fn test_from_path_image_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        for (name, expected) in [
            ("photo.jpg", "image/jpeg"),
            ("shot.png", "image/png"),
            ("paper.pdf", "application/pdf"),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"\x00\x01").unwrap();
            let artifact = UploadedArtifact::from_path(&path).unwrap();
            assert_eq!(artifact.media_type, expected, "{name}");
        }
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = UploadedArtifact::from_path(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_details_serialization() {
        let artifact = UploadedArtifact::new("a.txt", "text/plain", b"abc".to_vec());
        let json = serde_json::to_value(artifact.details()).unwrap();
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["filetype"], "text/plain");
        assert_eq!(json["filesize"], 3);
    }
}
