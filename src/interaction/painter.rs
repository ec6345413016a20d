//! The painting state machine.
//!
//! ```text
//!   Idle --down (hit)--> Painting --move (grid, hit)--> Painting
//!    ^                      |
//!    +------up (anywhere)---+
//! ```
//!
//! The painter keeps no canvas state of its own. Each handler borrows the
//! live canvas, so dimension, palette and pixel changes between events are
//! always observed.

use crate::canvas::Canvas;

use super::{HitTest, PointerEvent, PointerKind, Response, Surface, TouchEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Painting,
}

#[derive(Debug, Clone, Default)]
pub struct Painter {
    state: StrokeState,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_painting(&self) -> bool {
        self.state == StrokeState::Painting
    }

    /// Feed one pointer event.
    pub fn handle_pointer<H: HitTest + ?Sized>(
        &mut self,
        canvas: &mut Canvas,
        hit: &H,
        event: PointerEvent,
    ) -> Response {
        match event.kind {
            PointerKind::Down => self.pointer_down(canvas, hit, event),
            PointerKind::Move => self.pointer_move(canvas, hit, event),
            PointerKind::Up => {
                // Release anywhere ends the stroke.
                self.state = StrokeState::Idle;
                Response::ignored()
            }
        }
    }

    /// Feed one touch event.
    ///
    /// Touches never paint. While a stroke is active a touch move asks the
    /// host to suppress page scrolling.
    pub fn handle_touch(&self, event: TouchEvent) -> Response {
        match event {
            TouchEvent::Move(_) if self.is_painting() => Response {
                prevent_default: true,
                ..Response::default()
            },
            _ => Response::ignored(),
        }
    }

    fn pointer_down<H: HitTest + ?Sized>(
        &mut self,
        canvas: &mut Canvas,
        hit: &H,
        event: PointerEvent,
    ) -> Response {
        let Some(cell) = hit.cell_at(canvas, event.point) else {
            return Response::ignored();
        };

        if canvas.dropper_active() {
            let slot = canvas.pick(cell.x, cell.y);
            return Response {
                picked: Some(slot),
                ..Response::default()
            };
        }

        canvas.set_pixel(cell.x, cell.y, canvas.current_slot());
        self.state = StrokeState::Painting;
        Response::painted(cell)
    }

    fn pointer_move<H: HitTest + ?Sized>(
        &mut self,
        canvas: &mut Canvas,
        hit: &H,
        event: PointerEvent,
    ) -> Response {
        // Moves are only observed on the grid surface.
        if !self.is_painting() || event.surface != Surface::Grid {
            return Response::ignored();
        }

        let Some(cell) = hit.cell_at(canvas, event.point) else {
            return Response::ignored();
        };

        canvas.set_pixel(cell.x, cell.y, canvas.current_slot());
        Response {
            painted: Some(cell),
            prevent_default: true,
            ..Response::default()
        }
    }
}
