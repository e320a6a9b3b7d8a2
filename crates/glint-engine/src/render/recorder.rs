use crate::canvas::{Graphics, TextRun, TextureId, TexturedQuad};
use crate::image::Bitmap;
use crate::scene::{DrawCmd, DrawList};

use super::{RenderCtx, TextureStore};

/// [`Graphics`] implementation used while a frame handler runs.
///
/// Uploads go straight to the GPU queue; quads and text are recorded into
/// the frame's draw list.
pub struct FrameRecorder<'a> {
    ctx: &'a RenderCtx<'a>,
    store: &'a mut TextureStore,
    list: &'a mut DrawList,
    bound: Option<TextureId>,
}

impl<'a> FrameRecorder<'a> {
    pub(crate) fn new(ctx: &'a RenderCtx<'a>, store: &'a mut TextureStore, list: &'a mut DrawList) -> Self {
        Self {
            ctx,
            store,
            list,
            bound: None,
        }
    }
}

impl Graphics for FrameRecorder<'_> {
    fn max_texture_dimension(&self) -> u32 {
        self.ctx.device.limits().max_texture_dimension_2d
    }

    fn upload_texture(&mut self, bitmap: &Bitmap) -> TextureId {
        self.store.upload(self.ctx, bitmap)
    }

    fn bound_texture(&self) -> Option<TextureId> {
        self.bound
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.bound = texture;
    }

    fn emit_quad(&mut self, quad: TexturedQuad) {
        self.list.push(DrawCmd::Quad {
            texture: self.bound,
            quad,
        });
    }

    fn emit_text(&mut self, run: TextRun) {
        if run.text.is_empty() {
            return;
        }
        self.list.push(DrawCmd::Text(run));
    }
}
