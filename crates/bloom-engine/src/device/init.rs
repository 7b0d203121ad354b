/// Parameters for [`Gpu::new`](super::Gpu::new).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// Off by default: palette colours are display-referred and are written
    /// to the surface without conversion.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode. Falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Baseline device limits. Texture dimensions are raised to whatever
    /// the adapter supports so large windows still get a surface.
    pub required_limits: wgpu::Limits,

    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_fit_large_windows() {
        // 2560px wide covers a maximized 1440p window.
        assert!(GpuInit::default().required_limits.max_texture_dimension_2d >= 2560);
    }
}
