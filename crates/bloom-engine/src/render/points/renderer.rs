use wgpu::util::DeviceExt;

use crate::field::{FieldUniform, PointBackend, PointBatch, PointInstance};
use crate::glyphs::AtlasImage;
use crate::render::common::{
    straight_alpha_blend, uniform_binding_size, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
use crate::render::shader::validate_wgsl;
use crate::render::{RenderCtx, RenderError, RenderTarget};

use super::atlas::AtlasTexture;
use super::POINTS_WGSL;

/// GPU backend of a point field.
///
/// Pipeline, atlas and quad buffers are built once in [`new`](Self::new).
/// Uploads replace the instance buffer contents wholesale; draws only
/// rewrite the uniform block.
pub struct PointSpriteRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_ubo: wgpu::Buffer,
    atlas: AtlasTexture,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    instance_count: u32,

    released: bool,
}

impl PointSpriteRenderer {
    /// Validates the shader, then creates every long-lived resource.
    pub fn new(ctx: &RenderCtx<'_>, atlas: &AtlasImage) -> Result<Self, RenderError> {
        validate_wgsl("points.wgsl", POINTS_WGSL)?;

        let device = ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bloom points shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom points bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: uniform_binding_size::<FieldUniform>(),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bloom points pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("bloom points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), PointInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let atlas = AtlasTexture::upload(device, ctx.queue, atlas);

        let uniform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bloom points ubo"),
            size: std::mem::size_of::<FieldUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom points bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom points quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom points quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            device: device.clone(),
            queue: ctx.queue.clone(),
            pipeline,
            bind_group,
            uniform_ubo,
            atlas,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            instance_count: 0,
            released: false,
        })
    }

    /// Points currently uploaded.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_instance_capacity(&mut self, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        if let Some(old) = self.instance_vbo.take() {
            old.destroy();
        }
        let new_cap = required.next_power_of_two().max(1024);
        self.instance_vbo = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bloom points instance vbo"),
            size: (new_cap * std::mem::size_of::<PointInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

impl PointBackend for PointSpriteRenderer {
    type Target<'t> = RenderTarget<'t>;

    fn upload(&mut self, batch: &PointBatch) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::unsupported("point renderer already released"));
        }

        let needed = (batch.len().next_power_of_two() * std::mem::size_of::<PointInstance>()) as u64;
        let limit = self.device.limits().max_buffer_size;
        if needed > limit {
            return Err(RenderError::unsupported(format!(
                "{} points need {needed} bytes, device allows {limit}",
                batch.len()
            )));
        }

        self.instance_count = 0;
        if batch.is_empty() {
            return Ok(());
        }

        self.ensure_instance_capacity(batch.len());
        let Some(vbo) = self.instance_vbo.as_ref() else {
            return Ok(());
        };
        self.queue.write_buffer(vbo, 0, batch.as_bytes());
        self.instance_count = batch.len() as u32;
        Ok(())
    }

    fn draw(&mut self, target: &mut RenderTarget<'_>, uniform: &FieldUniform) {
        if self.released || self.instance_count == 0 {
            return;
        }
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        self.queue
            .write_buffer(&self.uniform_ubo, 0, bytemuck::bytes_of(uniform));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("bloom points pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.instance_count);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        if let Some(vbo) = self.instance_vbo.take() {
            vbo.destroy();
        }
        self.quad_vbo.destroy();
        self.quad_ibo.destroy();
        self.uniform_ubo.destroy();
        self.atlas.texture.destroy();
        self.instance_capacity = 0;
        self.instance_count = 0;
        self.released = true;
        log::debug!("point renderer released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_shader_validates() {
        validate_wgsl("points.wgsl", POINTS_WGSL).unwrap();
    }

    #[test]
    fn shader_declares_both_entry_points() {
        let module = naga::front::wgsl::parse_str(POINTS_WGSL).unwrap();
        let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }

    #[test]
    fn uniform_block_matches_the_shader() {
        let module = naga::front::wgsl::parse_str(POINTS_WGSL).unwrap();
        let ty = module
            .types
            .iter()
            .find(|(_, t)| t.name.as_deref() == Some("FieldUniform"))
            .map(|(_, t)| t.inner.clone())
            .unwrap();
        let naga::TypeInner::Struct { span, .. } = ty else {
            panic!("FieldUniform is not a struct");
        };
        assert_eq!(span as usize, std::mem::size_of::<FieldUniform>());
    }
}
