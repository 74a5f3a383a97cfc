//! Source and generated image payloads.

/// Accepted source image encodings. Anything else is rejected before a
/// [`SourceImage`] can exist, so the requester never re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
}

impl ImageFormat {
    /// Parse a mime type, returning `None` for anything unsupported.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// The mime type string sent to the provider.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension for download names.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

/// The uploaded portrait, raw bytes plus their validated format.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Validated encoding of `bytes`
    pub format: ImageFormat,
}

impl SourceImage {
    /// Wrap validated image bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self { bytes, format }
    }
}

/// A generated image as returned by the provider: base64 data plus the
/// mime type the provider declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes, as received
    pub data: String,
    /// Provider-declared mime type (e.g. `image/png`)
    pub mime_type: String,
}

impl GeneratedImage {
    /// Directly displayable data URI (`data:<mime>;base64,<data>`).
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// File extension derived from the mime subtype. Falls back to `png`
    /// when the provider sent something malformed.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.mime_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("png")
    }

    /// Suggested download filename for this image.
    #[must_use]
    pub fn download_filename(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}
