use serde::{Deserialize, Serialize};

/// Read-only view of an uploaded knowledge-base file.
///
/// Field names follow the JSON records the host application passes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: String,
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    /// Raw text, or a displayable image URI for `image/*` files.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: u64,
}

impl FileRef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size: 0,
            content: String::new(),
            timestamp: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.size = self.content.len() as u64;
        self
    }

    pub fn is_image(&self) -> bool {
        self.category() == PointCategory::Image
    }

    pub fn category(&self) -> PointCategory {
        PointCategory::for_mime(&self.mime_type)
    }
}

/// Shade of a decorative filler point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerShade {
    Dark,
    Light,
}

/// Visual category of a sphere point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointCategory {
    Image,
    Pdf,
    Text,
    Other,
    Filler(FillerShade),
}

impl PointCategory {
    /// Lookup order: `image/*`, anything mentioning pdf, `text/*` or html, rest.
    pub fn for_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            PointCategory::Image
        } else if mime.contains("pdf") {
            PointCategory::Pdf
        } else if mime.starts_with("text/") || mime.contains("html") {
            PointCategory::Text
        } else {
            PointCategory::Other
        }
    }

    pub fn is_filler(self) -> bool {
        matches!(self, PointCategory::Filler(_))
    }
}
