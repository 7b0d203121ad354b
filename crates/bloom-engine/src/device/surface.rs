use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

const LINEAR_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
];

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = if prefer_srgb { SRGB_FORMATS } else { LINEAR_FORMATS };
    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Surface extent for a window of `size`, kept within `1..=max_dim` on
/// both axes.
///
/// Configuring a surface beyond the device's texture limit is a validation
/// error, which wgpu turns into a panic.
pub(crate) fn surface_extent(size: PhysicalSize<u32>, max_dim: u32) -> (u32, u32) {
    let max_dim = max_dim.max(1);
    let extent = (size.width.clamp(1, max_dim), size.height.clamp(1, max_dim));
    if size.width > max_dim || size.height > max_dim {
        log::warn!(
            "window {}x{} exceeds the {max_dim}px texture limit; surface clamped to {}x{}",
            size.width,
            size.height,
            extent.0,
            extent.1,
        );
    }
    extent
}

/// Records `new_size` and reconfigures the surface unless it is empty
/// (minimized windows report 0x0).
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }
    let (width, height) = surface_extent(new_size, device.limits().max_texture_dimension_2d);
    config.width = width;
    config.height = height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            log::debug!("surface {err:?}, reconfigured");
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => {
            log::error!("surface out of memory");
            SurfaceErrorAction::Fatal
        }
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
            log::warn!("surface {err:?}, skipping frame");
            SurfaceErrorAction::SkipFrame
        }
    }
}
