//! Pointer and touch painting.
//!
//! The host forwards raw events here together with the surface that received
//! them. A [`Painter`] turns them into cell writes against the live
//! [`Canvas`](crate::Canvas), using a [`HitTest`] to map screen points to
//! cells.

mod event;
mod layout;
mod painter;

pub use event::{Point, PointerEvent, PointerKind, Response, Surface, TouchEvent};
pub use layout::{GridLayout, HitTest, BASE_CELL_SIZE};
pub use painter::{Painter, StrokeState};
