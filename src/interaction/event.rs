//! Input events and handler responses.

use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// A position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which listener scope received an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The rendered grid itself.
    Grid,
    /// Anywhere else in the window.
    #[default]
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A mouse or pen event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    pub surface: Surface,
}

impl PointerEvent {
    pub fn down(point: Point, surface: Surface) -> Self {
        Self {
            kind: PointerKind::Down,
            point,
            surface,
        }
    }

    pub fn moved(point: Point, surface: Surface) -> Self {
        Self {
            kind: PointerKind::Move,
            point,
            surface,
        }
    }

    pub fn up(point: Point, surface: Surface) -> Self {
        Self {
            kind: PointerKind::Up,
            point,
            surface,
        }
    }
}

/// A touch event. Touches only gate scrolling; painting comes from the
/// pointer events the platform synthesizes for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Start(Point),
    Move(Point),
    End(Point),
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The cell that was written, if any.
    pub painted: Option<Cell>,
    /// The slot the eyedropper selected, if any.
    pub picked: Option<usize>,
    /// Whether the host should suppress the platform default (scrolling).
    pub prevent_default: bool,
}

impl Response {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn painted(cell: Cell) -> Self {
        Self {
            painted: Some(cell),
            ..Self::default()
        }
    }
}
