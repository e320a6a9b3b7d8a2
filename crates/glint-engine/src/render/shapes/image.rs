use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::canvas::{TextureId, TexturedQuad};
use crate::coords::{Position, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::render::{RenderCtx, TextureStore};

use super::common::{grown_capacity, premul_alpha_blend, triangle_list, QUAD_INDICES};

/// Renderer for textured quads in logical space.
///
/// Every quad gets four vertices in one shared buffer, uploaded once per
/// frame by [`prepare`](Self::prepare). Draws bind the quad's texture from
/// the [`TextureStore`].
#[derive(Default)]
pub struct ImageRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    quad_ibo: Option<wgpu::Buffer>,
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    textures: Vec<Option<TextureId>>,
    warned_unbound: bool,
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads vertices for `quads`, in order. Slot `i` of a later
    /// [`draw`](Self::draw) refers to `quads[i]`.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        store: &TextureStore,
        quads: &[(Option<TextureId>, TexturedQuad)],
    ) {
        self.textures.clear();
        if quads.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx, store);
        self.ensure_index_buffer(ctx);
        self.ensure_vertex_capacity(ctx, quads.len() * 4);

        let vertices: Vec<ImageVertex> = quads.iter().flat_map(|(_, q)| quad_vertices(q)).collect();
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));
        }
        self.textures.extend(quads.iter().map(|(t, _)| *t));
    }

    /// Draws the prepared quads in `slots`.
    pub fn draw(&mut self, rpass: &mut wgpu::RenderPass<'_>, store: &TextureStore, slots: Range<usize>) {
        let (Some(pipeline), Some(vbo), Some(ibo)) =
            (self.pipeline.as_ref(), self.vbo.as_ref(), self.quad_ibo.as_ref())
        else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);

        for slot in slots {
            let Some(Some(texture)) = self.textures.get(slot).copied() else {
                if !self.warned_unbound {
                    log::warn!("image quad emitted with no texture bound; skipping");
                    self.warned_unbound = true;
                }
                continue;
            };
            let Some(bind_group) = store.bind_group(texture) else {
                log::warn!("unknown {texture:?}; skipping quad");
                continue;
            };
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, (slot * 4) as i32, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, store: &TextureStore) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint image shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/image.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint image pipeline layout"),
            bind_group_layouts: &[store.bind_group_layout()],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint image pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ImageVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_index_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_ibo.is_some() {
            return;
        }
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint image quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let cap = grown_capacity(required);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint image vbo"),
            size: (cap * std::mem::size_of::<ImageVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ImageVertex {
    pos: [f32; 2], // clip space
    uv: [f32; 2],
}

impl ImageVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Logical `[0, 1.3] x [0, 1]` (y up) to clip space.
fn logical_to_clip(p: Position) -> [f32; 2] {
    [
        p.x / LOGICAL_WIDTH * 2.0 - 1.0,
        p.y / LOGICAL_HEIGHT * 2.0 - 1.0,
    ]
}

fn quad_vertices(quad: &TexturedQuad) -> [ImageVertex; 4] {
    std::array::from_fn(|i| ImageVertex {
        pos: logical_to_clip(quad.corners[i]),
        uv: quad.uvs[i],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_plane_fills_clip_space() {
        let v = quad_vertices(&TexturedQuad::full_plane());
        let positions: Vec<[f32; 2]> = v.iter().map(|v| v.pos).collect();
        assert_eq!(positions, vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]);
    }

    #[test]
    fn top_of_plane_samples_top_row() {
        let v = quad_vertices(&TexturedQuad::full_plane());
        // Clip-space y = 1 is the top of the window; texture v = 0 is the
        // first image row.
        assert_eq!(v[2].uv, [1.0, 0.0]);
        assert_eq!(v[3].uv, [0.0, 0.0]);
    }

    #[test]
    fn logical_center_is_clip_origin() {
        let c = logical_to_clip(Position::new(0.65, 0.5));
        approx::assert_relative_eq!(c[0], 0.0, epsilon = 1e-6);
        approx::assert_relative_eq!(c[1], 0.0, epsilon = 1e-6);
    }
}
