use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum rendered width of a comparison video, in pixels.
pub const VIDEO_MAX_WIDTH: u32 = 640;

/// A stimulus video ready to embed inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEmbed {
    pub data_uri: String,
    pub max_width: u32,
}

impl VideoEmbed {
    #[must_use]
    pub fn from_mp4(bytes: &[u8]) -> Self {
        Self {
            data_uri: format!("data:video/mp4;base64,{}", STANDARD.encode(bytes)),
            max_width: VIDEO_MAX_WIDTH,
        }
    }

    /// Player height for a 4:3 frame at full width.
    #[must_use]
    pub fn frame_height(&self) -> u32 {
        self.max_width * 3 / 4
    }
}

/// A still image shown inline, such as the intro's example frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEmbed {
    pub data_uri: String,
    pub caption: String,
}

impl ImageEmbed {
    #[must_use]
    pub fn from_png(bytes: &[u8], caption: impl Into<String>) -> Self {
        Self {
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(bytes)),
            caption: caption.into(),
        }
    }
}
