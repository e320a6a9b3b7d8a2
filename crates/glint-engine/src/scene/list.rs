use std::ops::Range;

use super::DrawCmd;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum BatchKind {
    Images,
    Text,
}

/// Run of consecutive commands of one kind, as indices into the list.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Batch {
    pub kind: BatchKind,
    pub range: Range<usize>,
}

/// Draw commands in issue order. Cleared and reused every frame.
#[derive(Debug, Default)]
pub(crate) struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Keeps capacity.
    pub(crate) fn clear(&mut self) {
        self.cmds.clear();
    }

    pub(crate) fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub(crate) fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Splits the list into maximal same-kind runs, preserving order.
    pub(crate) fn batches(&self) -> Vec<Batch> {
        let mut out: Vec<Batch> = Vec::new();
        for (i, cmd) in self.cmds.iter().enumerate() {
            let kind = cmd.kind();
            match out.last_mut() {
                Some(last) if last.kind == kind => last.range.end = i + 1,
                _ => out.push(Batch { kind, range: i..i + 1 }),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Color, TextFace, TextRun, TextureId, TexturedQuad};
    use crate::coords::Position;

    fn quad() -> DrawCmd {
        DrawCmd::Quad {
            texture: Some(TextureId(0)),
            quad: TexturedQuad::full_plane(),
        }
    }

    fn text() -> DrawCmd {
        DrawCmd::Text(TextRun {
            text: "hi".into(),
            face: TextFace::Fixed,
            em: 0.03,
            origin: Position::origin(),
            color: Color::WHITE,
        })
    }

    #[test]
    fn empty_list_has_no_batches() {
        assert!(DrawList::new().batches().is_empty());
    }

    #[test]
    fn batches_follow_issue_order() {
        let mut list = DrawList::new();
        for cmd in [quad(), quad(), text(), text(), text(), quad()] {
            list.push(cmd);
        }

        assert_eq!(
            list.batches(),
            vec![
                Batch { kind: BatchKind::Images, range: 0..2 },
                Batch { kind: BatchKind::Text, range: 2..5 },
                Batch { kind: BatchKind::Images, range: 5..6 },
            ]
        );
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = DrawList::new();
        list.push(text());
        list.clear();
        assert!(list.cmds().is_empty());
        assert!(list.batches().is_empty());
    }
}
