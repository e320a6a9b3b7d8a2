use core::ops::{Add, Sub};

/// Point in logical space.
///
/// Input positions are produced by [`CoordinateMapper::map`]; drawing code
/// constructs them directly to place text and images.
///
/// [`CoordinateMapper::map`]: super::CoordinateMapper::map
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}
