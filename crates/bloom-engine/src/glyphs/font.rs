use std::fmt;

/// Returned by [`load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Parses a TrueType/OpenType font for atlas rasterization.
pub fn load_font(bytes: &[u8]) -> Result<fontdue::Font, FontLoadError> {
    let settings = fontdue::FontSettings {
        // Atlas glyphs are rasterized at a single size.
        scale: 32.0,
        ..fontdue::FontSettings::default()
    };
    fontdue::Font::from_bytes(bytes, settings).map_err(|e| FontLoadError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let err = load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }
}
