use thiserror::Error;

/// A single asset that could not be fetched or decoded.
///
/// Non-fatal: the preloader records it and keeps going. The display string is
/// the user-facing message collected into the preloader error list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetLoadError {
    #[error("Failed to load image: {url}")]
    Image { url: String, reason: String },
    #[error("Failed to load audio: {name}")]
    Audio { name: String, reason: String },
}

impl AssetLoadError {
    pub fn image(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Image {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn audio(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Audio {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Underlying I/O or decode failure, for logs.
    pub fn reason(&self) -> &str {
        match self {
            Self::Image { reason, .. } | Self::Audio { reason, .. } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_name_the_asset() {
        let e = AssetLoadError::image("img/b.png", "not found");
        assert_eq!(e.to_string(), "Failed to load image: img/b.png");
        assert_eq!(e.reason(), "not found");

        let e = AssetLoadError::audio("snap", "bad header");
        assert_eq!(e.to_string(), "Failed to load audio: snap");
    }
}
