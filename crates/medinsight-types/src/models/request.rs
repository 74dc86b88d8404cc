//! Generation request and image attachment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ReportError;

/// Largest accepted upload (20 MiB, the inline-data ceiling of the service).
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Image media types accepted by the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
}

impl MediaType {
    /// MIME string sent with inline data.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Detect the media type from magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    /// Guess the media type from a file name extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Binary image payload with its declared media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    media_type: MediaType,
    data: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(media_type: MediaType, data: Vec<u8>) -> Self {
        Self { media_type, data }
    }

    /// Build an attachment from an uploaded file.
    ///
    /// Magic bytes win over the extension; the extension is only consulted
    /// when the content is not recognised.
    pub fn from_upload(file_name: &str, data: Vec<u8>) -> Result<Self, ReportError> {
        if data.is_empty() {
            return Err(ReportError::EmptyUpload { file_name: file_name.to_string() });
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(ReportError::UploadTooLarge {
                file_name: file_name.to_string(),
                size: data.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        let media_type = MediaType::sniff(&data)
            .or_else(|| MediaType::from_file_name(file_name))
            .ok_or_else(|| ReportError::UnsupportedMedia { file_name: file_name.to_string() })?;

        Ok(Self { media_type, data })
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("media_type", &self.media_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// One generation request: a prompt plus an optional image. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    prompt: String,
    image: Option<ImageAttachment>,
}

impl Request {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), image: None }
    }

    pub fn with_image(prompt: impl Into<String>, image: ImageAttachment) -> Self {
        Self { prompt: prompt.into(), image: Some(image) }
    }

    pub fn new(prompt: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        Self { prompt: prompt.into(), image }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}
