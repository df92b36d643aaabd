use bytes::Bytes;

/// A binary payload submitted with a request, as captured from the
/// multipart form. Immutable once built; dropped with the request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadArtifact {
    pub kind: MediaKind,
    pub filename: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Image,
}

impl UploadArtifact {
    pub fn new(kind: MediaKind, filename: Option<String>, bytes: Bytes) -> Self {
        Self {
            kind,
            filename,
            bytes,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercase extension derived from the client-supplied filename.
    pub fn extension(&self) -> Option<String> {
        let filename = self.filename.as_deref()?;
        let (_, ext) = filename.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}
