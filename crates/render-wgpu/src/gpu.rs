use crate::shaders;
use bytemuck::{Pod, Zeroable};
use platformer_assets::SpriteSheet;
use platformer_render::{Quad, QuadVertex, RenderFrame};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    vert: [f32; 4],
}

impl From<QuadVertex> for Vertex {
    fn from(v: QuadVertex) -> Self {
        Self { vert: v.to_array() }
    }
}

fn quad_vertices(quad: &Quad) -> [Vertex; 4] {
    quad.vertices.map(Vertex::from)
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// wgpu sprite renderer: one sheet texture, one vertex buffer per quad.
pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    texture_bind_group: wgpu::BindGroup,
    player_vertex_buffer: wgpu::Buffer,
    tile_vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    surface_format: wgpu::TextureFormat,
}

impl SpriteRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        sheet: &SpriteSheet,
    ) -> Self {
        let size = sheet.size();
        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprite_sheet"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
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
            sheet.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(sheet.row_stride()),
                rows_per_image: Some(size.height),
            },
            extent,
        );
        let texture_view = texture.create_view(&Default::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SPRITE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x4],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let quad_bytes = (4 * std::mem::size_of::<Vertex>()) as u64;
        let player_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("player_vertex_buffer"),
            size: quad_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let tile_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tile_vertex_buffer"),
            size: quad_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_index_buffer"),
            contents: bytemuck::cast_slice(&Quad::INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            "sprite sheet uploaded ({}x{})",
            size.width,
            size.height
        );

        Self {
            pipeline,
            texture_bind_group,
            player_vertex_buffer,
            tile_vertex_buffer,
            index_buffer,
            surface_format,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Upload both quads and draw them: player first, tile on top.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &RenderFrame,
    ) {
        queue.write_buffer(
            &self.player_vertex_buffer,
            0,
            bytemuck::cast_slice(&quad_vertices(&frame.player)),
        );
        queue.write_buffer(
            &self.tile_vertex_buffer,
            0,
            bytemuck::cast_slice(&quad_vertices(&frame.tile)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("sprite_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.texture_bind_group, &[]);
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            let index_count = Quad::INDICES.len() as u32;
            for buffer in [&self.player_vertex_buffer, &self.tile_vertex_buffer] {
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw_indexed(0..index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use platformer_assets::{SheetSize, SpriteId, lookup};
    use platformer_render::project_player;

    #[test]
    fn vertex_is_four_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
    }

    #[test]
    fn quad_vertices_keep_order_and_packing() {
        let quad = project_player(
            lookup(SpriteId::PlayerRun),
            2,
            Vec2::new(0.25, -0.5),
            true,
            SheetSize::new(1500, 1000),
        );
        let verts = quad_vertices(&quad);
        for (v, q) in verts.iter().zip(quad.vertices.iter()) {
            assert_eq!(v.vert, q.to_array());
        }
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn index_buffer_is_six_u16() {
        let bytes: &[u8] = bytemuck::cast_slice(&Quad::INDICES);
        assert_eq!(bytes.len(), 12);
    }
}
