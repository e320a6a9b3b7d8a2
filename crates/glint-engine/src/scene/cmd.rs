use crate::canvas::{TextRun, TextureId, TexturedQuad};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCmd {
    /// Textured quad; `texture` is the binding at emission time.
    Quad {
        texture: Option<TextureId>,
        quad: TexturedQuad,
    },
    Text(TextRun),
}

impl DrawCmd {
    pub(crate) fn kind(&self) -> super::BatchKind {
        match self {
            DrawCmd::Quad { .. } => super::BatchKind::Images,
            DrawCmd::Text(_) => super::BatchKind::Text,
        }
    }
}
