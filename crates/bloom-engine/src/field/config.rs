use crate::coords::Viewport;

use super::DEFAULT_WIND;

/// Container size assumed before one has been measured.
pub const DEFAULT_SURFACE: Viewport = Viewport::new(500.0, 600.0);

/// Host-facing settings of a [`FieldController`](super::FieldController).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Experience or flower name; unknown names fall back to the default flower.
    pub experience: String,
    pub wind: f32,
    pub default_size: Viewport,
    /// Fixes generation and sway phases. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl FieldConfig {
    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = experience.into();
        self
    }

    pub fn with_wind(mut self, wind: f32) -> Self {
        self.wind = if wind.is_finite() { wind } else { DEFAULT_WIND };
        self
    }

    pub fn with_default_size(mut self, size: Viewport) -> Self {
        if size.is_valid() {
            self.default_size = size;
        }
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            experience: "default".to_string(),
            wind: DEFAULT_WIND,
            default_size: DEFAULT_SURFACE,
            seed: None,
        }
    }
}
