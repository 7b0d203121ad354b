use crate::glyphs::AtlasImage;

/// The baked glyph atlas on the GPU.
pub(super) struct AtlasTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl AtlasTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &AtlasImage) -> Self {
        let size = wgpu::Extent3d {
            width: image.size(),
            height: image.size(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("bloom glyph atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.size()),
                rows_per_image: Some(image.size()),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Neighbouring cells bleed slightly at the edges under linear
        // filtering; the fragment alpha cutoff hides it.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bloom glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("atlas uploaded ({}x{} R8)", image.size(), image.size());
        Self {
            texture,
            view,
            sampler,
        }
    }
}
