//! Scripted editor sessions.
//!
//! A session is a YAML list of editor actions replayed in order against an
//! [`Editor`], which makes it possible to drive the painter headlessly.
//!
//! ```yaml
//! actions:
//!   - resize: { width: 8, height: 8 }
//!   - grow
//!   - colour: { slot: 2, value: "#ff0000" }
//!   - select: 2
//!   - stroke: [[0, 0], [1, 0], [2, 0]]
//!   - pointer: { kind: down, x: 40.0, y: 8.0, surface: grid }
//!   - pointer: { kind: up, x: 40.0, y: 8.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::PixelCodec;
use crate::editor::Editor;
use crate::error::{XqError, Result};
use crate::interaction::{Point, PointerEvent, PointerKind, Response, Surface};
use crate::types::Cell;

/// A scripted list of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Set a slot colour; the selected slot when `slot` is omitted.
    Colour {
        slot: Option<usize>,
        value: String,
    },
    Grow,
    Shrink,
    Select(usize),
    Zoom(u32),
    /// Arm the eyedropper for the next pointer down.
    Dropper,
    Purge,
    /// A raw pointer event in screen coordinates.
    Pointer(PointerStep),
    /// Press on the first cell, drag through the rest, release.
    Stroke(Vec<[u32; 2]>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerStep {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub surface: Surface,
}

impl From<PointerStep> for PointerEvent {
    fn from(step: PointerStep) -> Self {
        PointerEvent {
            kind: step.kind,
            point: Point::new(step.x, step.y),
            surface: step.surface,
        }
    }
}

/// Totals from a replayed session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Replay {
    pub actions: usize,
    pub painted: usize,
    pub picked: usize,
}

impl Replay {
    fn record(&mut self, response: Response) {
        if response.painted.is_some() {
            self.painted += 1;
        }
        if response.picked.is_some() {
            self.picked += 1;
        }
    }
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| XqError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read session: {}", e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| XqError::Parse {
            message: format!("Invalid session script: {}", e),
            help: Some("Each action is a name such as `grow` or a map such as `select: 2`".to_string()),
        })
    }

    /// Apply every action to the editor in order.
    pub fn replay<C>(&self, editor: &mut Editor<C>) -> Result<Replay>
    where
        C: PixelCodec + Clone + Send + 'static,
    {
        let mut replay = Replay::default();

        for action in &self.actions {
            match action {
                Action::Resize { width, height } => editor.canvas_mut().resize(*width, *height)?,
                Action::Colour { slot, value } => match slot {
                    Some(slot) => editor.canvas_mut().set_palette_slot_colour(*slot, value),
                    None => editor.canvas_mut().set_current_colour(value),
                },
                Action::Grow => editor.canvas_mut().grow_palette(),
                Action::Shrink => {
                    editor.canvas_mut().shrink_palette();
                }
                Action::Select(slot) => editor.canvas_mut().select_slot(*slot),
                Action::Zoom(zoom) => editor.canvas_mut().set_zoom(*zoom),
                Action::Dropper => editor.canvas_mut().set_dropper(true),
                Action::Purge => {
                    editor.canvas_mut().purge_unreachable();
                }
                Action::Pointer(step) => replay.record(editor.pointer((*step).into())),
                Action::Stroke(cells) => stroke(editor, cells, &mut replay),
            }
            replay.actions += 1;
        }

        Ok(replay)
    }
}

fn stroke<C>(editor: &mut Editor<C>, cells: &[[u32; 2]], replay: &mut Replay)
where
    C: PixelCodec + Clone + Send + 'static,
{
    let Some((first, rest)) = cells.split_first() else {
        return;
    };

    let centre = |editor: &Editor<C>, [x, y]: [u32; 2]| {
        editor.layout().centre_of(editor.canvas(), Cell::new(x, y))
    };

    let point = centre(editor, *first);
    replay.record(editor.pointer(PointerEvent::down(point, Surface::Grid)));

    let mut last = point;
    for cell in rest {
        last = centre(editor, *cell);
        replay.record(editor.pointer(PointerEvent::moved(last, Surface::Grid)));
    }

    editor.pointer(PointerEvent::up(last, Surface::Window));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::codec::XqstCodec;
    use pretty_assertions::assert_eq;

    fn run(yaml: &str) -> (Editor<XqstCodec>, Replay) {
        let session = Session::parse(yaml).unwrap();
        let mut editor = Editor::new(Canvas::default(), XqstCodec);
        let replay = session.replay(&mut editor).unwrap();
        (editor, replay)
    }

    #[test]
    fn test_parse_actions() {
        let session = Session::parse(
            r##"
actions:
  - grow
  - select: 2
  - colour: { value: "#ff0000" }
  - resize: { width: 4 }
  - pointer: { kind: down, x: 1.5, y: 2.0, surface: grid }
  - stroke: [[0, 0], [1, 0]]
"##,
        )
        .unwrap();

        assert_eq!(
            session.actions,
            vec![
                Action::Grow,
                Action::Select(2),
                Action::Colour {
                    slot: None,
                    value: "#ff0000".to_string()
                },
                Action::Resize {
                    width: Some(4),
                    height: None
                },
                Action::Pointer(PointerStep {
                    kind: PointerKind::Down,
                    x: 1.5,
                    y: 2.0,
                    surface: Surface::Grid
                }),
                Action::Stroke(vec![[0, 0], [1, 0]]),
            ]
        );
    }

    #[test]
    fn test_stroke_paints_listed_cells_only() {
        let (editor, replay) = run(
            r#"
actions:
  - stroke: [[0, 0], [1, 0], [2, 0]]
"#,
        );
        let mut painted: Vec<_> = editor.canvas().pixels().iter().map(|(c, _)| c).collect();
        painted.sort();
        assert_eq!(painted, vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        assert_eq!(replay.painted, 3);
        assert!(!editor.painter().is_painting());
    }

    #[test]
    fn test_palette_actions() {
        let (editor, _) = run(
            r##"
actions:
  - grow
  - grow
  - grow
  - select: 4
  - stroke: [[3, 3]]
  - shrink
  - shrink
  - shrink
  - shrink
  - colour: { slot: 1, value: "123456" }
"##,
        );
        let canvas = editor.canvas();
        assert_eq!(canvas.palette_size(), 2);
        assert_eq!(canvas.stored_slot(3, 3), Some(4));
        assert_eq!(canvas.slot_at(3, 3), 1);
        assert_eq!(canvas.colour_at(3, 3).as_str(), "#123456");
    }

    #[test]
    fn test_dropper_action() {
        let (editor, replay) = run(
            r#"
actions:
  - stroke: [[5, 5]]
  - select: 0
  - dropper
  - stroke: [[5, 5]]
"#,
        );
        assert_eq!(replay.picked, 1);
        assert_eq!(editor.canvas().current_slot(), 1);
    }

    #[test]
    fn test_purge_action() {
        let (editor, _) = run(
            r#"
actions:
  - stroke: [[10, 10]]
  - resize: { width: 4, height: 4 }
  - purge
"#,
        );
        assert!(editor.canvas().pixels().is_empty());
    }

    #[test]
    fn test_invalid_resize_fails() {
        let session = Session::parse("actions:\n  - resize: { width: 0 }\n").unwrap();
        let mut editor = Editor::new(Canvas::default(), XqstCodec);
        assert!(session.replay(&mut editor).is_err());
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        assert!(Session::parse("actions:\n  - erase\n").is_err());
    }
}
