use std::fmt;

/// Why the point renderer cannot run.
///
/// None of these are fatal to the host: each one means "omit the visual".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No usable surface, adapter or device.
    UnsupportedSurface { reason: String },
    /// The WGSL source did not parse.
    ShaderCompile { log: String },
    /// The WGSL parsed but failed module validation.
    ProgramLink { log: String },
}

impl RenderError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedSurface { reason: reason.into() }
    }

    /// True for the two shader failures.
    pub fn is_shader_error(&self) -> bool {
        matches!(self, Self::ShaderCompile { .. } | Self::ProgramLink { .. })
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSurface { reason } => write!(f, "rendering unavailable: {reason}"),
            Self::ShaderCompile { log } => write!(f, "shader compile error:\n{log}"),
            Self::ProgramLink { log } => write!(f, "shader validation error:\n{log}"),
        }
    }
}

impl std::error::Error for RenderError {}
