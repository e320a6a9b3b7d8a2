use winit::window::Window;

use crate::canvas::{Canvas, Color, TextFace, TextureId, TexturedQuad};
use crate::config::FrameHandler;
use crate::coords::CoordinateMapper;
use crate::device::Gpu;
use crate::image::ImageDecoder;
use crate::scene::{BatchKind, DrawCmd, DrawList};
use crate::text::FontHandle;

use super::shapes::image::ImageRenderer;
use super::shapes::text::{PixelRun, TextRenderer};
use super::{FrameRecorder, RenderCtx, TextureStore};

/// Owns every GPU resource a frame needs and paints frames.
pub struct FramePainter {
    store: TextureStore,
    images: ImageRenderer,
    text: TextRenderer,
    list: DrawList,
    fixed_face: Option<FontHandle>,
    clear_color: Color,
    warned_no_face: bool,
}

impl FramePainter {
    pub fn new(gpu: &Gpu<'_>, fixed_face: Option<FontHandle>, clear_color: Color) -> Self {
        Self {
            store: TextureStore::new(gpu.device()),
            images: ImageRenderer::new(),
            text: TextRenderer::new(gpu.device(), gpu.surface_format()),
            list: DrawList::new(),
            fixed_face,
            clear_color,
            warned_no_face: false,
        }
    }

    /// Number of textures uploaded so far.
    pub fn texture_count(&self) -> usize {
        self.store.texture_count()
    }

    /// Runs `handler` against a fresh canvas, then renders and presents what
    /// it drew.
    pub fn paint(
        &mut self,
        gpu: &Gpu<'_>,
        window: &Window,
        mapper: &CoordinateMapper,
        decoder: &dyn ImageDecoder,
        handler: &mut FrameHandler,
    ) -> Result<(), wgpu::SurfaceError> {
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), mapper.size());

        self.list.clear();
        {
            let mut recorder = FrameRecorder::new(&ctx, &mut self.store, &mut self.list);
            let mut canvas = Canvas::new(&mut recorder, decoder, *mapper);
            handler(&mut canvas);
        }

        let mut frame = gpu.begin_frame()?;

        let quads: Vec<(Option<TextureId>, TexturedQuad)> = self
            .list
            .cmds()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Quad { texture, quad } => Some((*texture, *quad)),
                DrawCmd::Text(_) => None,
            })
            .collect();
        self.images.prepare(&ctx, &self.store, &quads);

        self.text.begin();
        let mut glyph_ranges = Vec::new();
        for cmd in self.list.cmds() {
            let DrawCmd::Text(run) = cmd else { continue };
            let font = match &run.face {
                TextFace::Font(handle) => Some(handle),
                TextFace::Fixed => self.fixed_face.as_ref(),
            };
            let Some(font) = font else {
                if !self.warned_no_face {
                    log::warn!("no text font configured; draw_text output is skipped");
                    self.warned_no_face = true;
                }
                let at = self.text.instance_count();
                glyph_ranges.push(at..at);
                continue;
            };
            let range = self.text.layout(
                &ctx,
                &PixelRun {
                    text: &run.text,
                    font: font.font(),
                    px: mapper.logical_height_to_pixels(run.em),
                    baseline: mapper.to_pixels(run.origin),
                    color: run.color,
                },
            );
            glyph_ranges.push(range);
        }
        self.text.prepare(&ctx);

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (mut quad_slot, mut run_slot) = (0usize, 0usize);
            for batch in self.list.batches() {
                let n = batch.range.len();
                match batch.kind {
                    BatchKind::Images => {
                        self.images.draw(&mut rpass, &self.store, quad_slot..quad_slot + n);
                        quad_slot += n;
                    }
                    BatchKind::Text => {
                        let runs = &glyph_ranges[run_slot..run_slot + n];
                        let start = runs.iter().map(|r| r.start).min().unwrap_or(0);
                        let end = runs.iter().map(|r| r.end).max().unwrap_or(0);
                        self.text.draw(&mut rpass, start..end);
                        run_slot += n;
                    }
                }
            }
        }

        window.pre_present_notify();
        gpu.submit(frame);
        Ok(())
    }
}
