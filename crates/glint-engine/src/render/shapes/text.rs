use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use wgpu::util::DeviceExt;

use crate::canvas::Color;
use crate::render::RenderCtx;

use super::atlas::{ShelfPacker, UvRect};
use super::common::{
    grown_capacity, premul_alpha_blend, triangle_list, viewport_ubo_min_binding_size, QuadVertex,
    ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

/// One line of text in pixel space.
pub struct PixelRun<'a> {
    pub text: &'a str,
    pub font: &'a fontdue::Font,
    /// Em height in pixels.
    pub px: f32,
    /// Left end of the baseline, pixels from the top-left corner.
    pub baseline: (f32, f32),
    pub color: Color,
}

/// Glyph-atlas text renderer.
///
/// Glyphs are rasterized with fontdue on first use into a 2048 x 2048
/// R8Unorm coverage atlas and kept for the renderer's lifetime, keyed by
/// font, glyph and pixel size. Glyphs that no longer fit are remembered as
/// missing and skipped.
///
/// Per frame: [`begin`](Self::begin), one [`layout`](Self::layout) per run,
/// [`prepare`](Self::prepare), then [`draw`](Self::draw) for instance ranges.
pub struct TextRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    atlas: wgpu::Texture,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, Option<UvRect>>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    instances: Vec<GlyphInstance>,

    layout: Layout<()>,
}

impl TextRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glint text sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint text viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bgl = bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint text quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint text quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline: create_pipeline(device, &bgl, surface_format),
            bind_group,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
            atlas,
            packer: ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING),
            glyphs: HashMap::new(),
            instance_vbo: None,
            instance_capacity: 0,
            instances: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Instances laid out so far this frame.
    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Drops last frame's glyph instances.
    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Lays out `run`, rasterizing new glyphs into the atlas, and returns
    /// the range of glyph instances it produced.
    pub fn layout(&mut self, ctx: &RenderCtx<'_>, run: &PixelRun<'_>) -> Range<u32> {
        let first = self.instance_count();
        if run.text.is_empty() || run.px <= 0.0 {
            return first..first;
        }

        self.layout.reset(&LayoutSettings {
            x: run.baseline.0,
            y: line_top(run.font, run.px, run.baseline.1),
            ..LayoutSettings::default()
        });
        self.layout.append(&[run.font], &TextStyle::new(run.text, run.px, 0));

        let color = [run.color.r, run.color.g, run.color.b, run.color.a];
        for i in 0..self.layout.glyphs().len() {
            let (key, x, y, w, h) = {
                let g = &self.layout.glyphs()[i];
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }
                (g.key, g.x, g.y, g.width as f32, g.height as f32)
            };
            let Some(uv) = self.glyph_uv(ctx, run.font, key) else {
                continue;
            };
            self.instances.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + w, y + h],
                uv_min: uv.min,
                uv_max: uv.max,
                color,
            });
        }

        first..self.instance_count()
    }

    /// Uploads this frame's instances and the viewport uniform.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }

        let viewport = ViewportUniform {
            viewport: [
                (ctx.size.width as f32).max(1.0),
                (ctx.size.height as f32).max(1.0),
            ],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&self.viewport_ubo, 0, bytemuck::bytes_of(&viewport));

        let required = self.instances.len();
        if required > self.instance_capacity || self.instance_vbo.is_none() {
            let cap = grown_capacity(required);
            self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("glint text instance vbo"),
                size: (cap * std::mem::size_of::<GlyphInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.instance_capacity = cap;
        }

        if let Some(vbo) = self.instance_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    /// Draws prepared glyph instances in `range`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(instance_vbo) = self.instance_vbo.as_ref() else {
            return;
        };
        if range.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
    }

    /// Atlas cell of `key`, rasterizing and uploading it on first use.
    fn glyph_uv(&mut self, ctx: &RenderCtx<'_>, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<UvRect> {
        if let Some(&cached) = self.glyphs.get(&key) {
            return cached;
        }

        let (metrics, coverage) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        let uv = if w == 0 || h == 0 {
            None
        } else {
            let was_full = self.packer.is_full();
            let placed = self.packer.place(w, h);
            if placed.is_none() && self.packer.is_full() && !was_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); new glyphs are skipped");
            }
            placed.map(|at| {
                self.write_glyph(ctx, at, w, h, &coverage);
                self.packer.uv_rect(at, w, h)
            })
        };

        self.glyphs.insert(key, uv);
        uv
    }

    fn write_glyph(&self, ctx: &RenderCtx<'_>, (x, y): (u32, u32), w: u32, h: u32, coverage: &[u8]) {
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            coverage,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }
}

fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glint text bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: viewport_ubo_min_binding_size(),
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
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("glint text shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glint text pipeline layout"),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glint text pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), GlyphInstance::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: triangle_list(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Per-glyph instance: pixel rectangle, atlas rectangle, straight colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Top of the line box whose baseline is at `baseline_y`, y down.
fn line_top(font: &fontdue::Font, px: f32, baseline_y: f32) -> f32 {
    let ascent = font
        .horizontal_line_metrics(px)
        .map_or(px * 0.8, |m| m.ascent);
    baseline_y - ascent
}
