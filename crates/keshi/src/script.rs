//! Stroke scripts: recorded UI sessions replayed against an [`Editor`].
//!
//! ```json
//! {
//!   "display": { "width": 400, "height": 300 },
//!   "actions": [
//!     { "action": "select_tool", "tool": "circle" },
//!     { "action": "set_size", "size": 100 },
//!     { "action": "down", "x": 300, "y": 200 },
//!     { "action": "move", "x": 310, "y": 200 },
//!     { "action": "up" }
//!   ]
//! }
//! ```
//!
//! Positions are in display units. When `display` is omitted the image is
//! assumed to be shown at its natural size.

use keshi_mask::{
    DisplayExtent, Editor, EditorError, ImageLoader, LoadError, Point, PointerEvent, Tool,
};
use serde::{Deserialize, Serialize};

/// A recorded editing session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Laid-out size of the image on screen.
    #[serde(default)]
    pub display: Option<DisplayExtent>,

    /// Actions in the order they happened.
    pub actions: Vec<Action>,
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    /// Pick a tool from the toolbar.
    SelectTool {
        /// Tool name (`brush`, `rectangle`/`rect`, `circle`).
        tool: Tool,
    },
    /// Move the size slider.
    SetSize {
        /// Requested size.
        size: u32,
    },
    /// Press the pointer.
    Down {
        /// Display-space x.
        x: f64,
        /// Display-space y.
        y: f64,
    },
    /// Move the pointer.
    Move {
        /// Display-space x.
        x: f64,
        /// Display-space y.
        y: f64,
    },
    /// Release the pointer.
    Up,
    /// Pointer left the image.
    Leave,
    /// Press "clear selection".
    Clear,
    /// Switch to another source image.
    SelectImage {
        /// Path or `data:` URI of the new image.
        uri: String,
    },
}

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Actions applied.
    pub actions: usize,
    /// Stamps painted into the mask.
    pub stamps_issued: u64,
    /// Pointer presses/moves that could not land in the image.
    pub stamps_rejected: u64,
    /// Non-pointer actions that failed (bad size, unloadable image).
    pub actions_failed: u64,
}

/// Replay every action of `script` against `editor`.
///
/// Nothing is fatal: a failed action is logged, counted, and the editor
/// keeps its previous state, the same as it would in an interactive
/// session.
pub fn replay(editor: &mut Editor, script: &Script, loader: &impl ImageLoader) -> ReplayStats {
    let mut stats = ReplayStats::default();

    for (index, action) in script.actions.iter().enumerate() {
        stats.actions += 1;
        tracing::trace!(index, ?action, "replaying action");

        let result = match action {
            Action::SelectTool { tool } => {
                editor.select_tool(*tool);
                Ok(())
            }
            Action::SetSize { size } => editor.set_stamp_size(*size),
            Action::Down { x, y } => {
                let display = display_extent(editor, script);
                let position = Point::new(*x, *y);
                pointer(editor, &mut stats, PointerEvent::Down { position, display })
            }
            Action::Move { x, y } => {
                let display = display_extent(editor, script);
                let position = Point::new(*x, *y);
                pointer(editor, &mut stats, PointerEvent::Move { position, display })
            }
            Action::Up => editor.handle_pointer(PointerEvent::Up).map(|_| ()),
            Action::Leave => editor.handle_pointer(PointerEvent::Leave).map(|_| ()),
            Action::Clear => {
                editor.clear_selection();
                Ok(())
            }
            Action::SelectImage { uri } => editor.select_image(uri, loader).map(|_| ()),
        };

        if let Err(e) = result {
            tracing::warn!(index, error = %e, "action failed");
            stats.actions_failed += 1;
        }
    }

    stats
}

/// Dispatch a positional pointer event, counting the stamp outcome.
///
/// Presses and moves that cannot land in the image (none loaded yet, or
/// the position cannot be mapped) are counted as rejected stamps rather
/// than failed actions.
fn pointer(
    editor: &mut Editor,
    stats: &mut ReplayStats,
    event: PointerEvent,
) -> Result<(), EditorError> {
    match editor.handle_pointer(event) {
        Ok(Some(_)) => stats.stamps_issued += 1,
        Ok(None) => {}
        Err(e @ (EditorError::Map(_) | EditorError::NoImage)) => {
            tracing::debug!(error = %e, "stamp rejected");
            stats.stamps_rejected += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// The script's display extent, or the current image's natural size.
fn display_extent(editor: &Editor, script: &Script) -> DisplayExtent {
    script.display.unwrap_or_else(|| {
        let dims = editor.image_dimensions().unwrap_or_default();
        DisplayExtent::new(f64::from(dims.width), f64::from(dims.height))
    })
}

/// [`ImageLoader`] that reads local files.
///
/// A leading `file://` is stripped; everything else is treated as a
/// filesystem path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl ImageLoader for FileLoader {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        std::fs::read(path).map_err(|e| LoadError::Fetch {
            uri: uri.to_owned(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use keshi_mask::{Dimensions, RgbaImage, StampSize};

    fn png(width: u32, height: u32) -> Vec<u8> {
        keshi_export::rgba_to_png(&RgbaImage::new(width, height)).unwrap()
    }

    fn serve(bytes: Vec<u8>) -> impl Fn(&str) -> Result<Vec<u8>, LoadError> {
        move |_: &str| -> Result<Vec<u8>, LoadError> { Ok(bytes.clone()) }
    }

    fn loaded_editor(width: u32, height: u32) -> Editor {
        let mut editor = Editor::default();
        editor.select_image("fixture.png", &serve(png(width, height))).unwrap();
        editor
    }

    #[test]
    fn parses_documented_example() {
        let script: Script = serde_json::from_str(
            r#"{
                "display": { "width": 400, "height": 300 },
                "actions": [
                    { "action": "select_tool", "tool": "circle" },
                    { "action": "set_size", "size": 100 },
                    { "action": "down", "x": 300, "y": 200 },
                    { "action": "move", "x": 310, "y": 200 },
                    { "action": "up" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.display, Some(DisplayExtent::new(400.0, 300.0)));
        assert_eq!(
            script.actions,
            vec![
                Action::SelectTool { tool: Tool::Circle },
                Action::SetSize { size: 100 },
                Action::Down { x: 300.0, y: 200.0 },
                Action::Move { x: 310.0, y: 200.0 },
                Action::Up,
            ]
        );
    }

    #[test]
    fn rect_alias_and_missing_display() {
        let script: Script = serde_json::from_str(
            r#"{ "actions": [ { "action": "select_tool", "tool": "rect" }, { "action": "clear" } ] }"#,
        )
        .unwrap();
        assert!(script.display.is_none());
        assert_eq!(
            script.actions[0],
            Action::SelectTool {
                tool: Tool::Rectangle
            }
        );
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let result: Result<Script, _> =
            serde_json::from_str(r#"{ "actions": [ { "action": "erase" } ] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn replay_counts_stamps() {
        let mut editor = loaded_editor(400, 300);
        let script = Script {
            display: Some(DisplayExtent::new(400.0, 300.0)),
            actions: vec![
                Action::Move { x: 10.0, y: 10.0 },
                Action::Down { x: 200.0, y: 150.0 },
                Action::Move { x: 220.0, y: 150.0 },
                Action::Up,
                Action::Move { x: 240.0, y: 150.0 },
            ],
        };

        let stats = replay(&mut editor, &script, &serve(Vec::new()));
        assert_eq!(stats.actions, 5);
        assert_eq!(stats.stamps_issued, 2);
        assert_eq!(stats.stamps_rejected, 0);
        assert_eq!(stats.actions_failed, 0);
        assert_eq!(editor.export_mask().get_pixel(200, 150).0[0], 255);
    }

    #[test]
    fn degenerate_display_rejects_stamps() {
        let mut editor = loaded_editor(100, 100);
        let script = Script {
            display: Some(DisplayExtent::new(0.0, 0.0)),
            actions: vec![Action::Down { x: 5.0, y: 5.0 }, Action::Up],
        };

        let stats = replay(&mut editor, &script, &serve(Vec::new()));
        assert_eq!(stats.stamps_issued, 0);
        assert_eq!(stats.stamps_rejected, 1);
        assert!(editor.mask().is_empty());
    }

    #[test]
    fn presses_before_any_image_are_rejected() {
        let mut editor = Editor::default();
        let script = Script {
            display: Some(DisplayExtent::new(400.0, 300.0)),
            actions: vec![
                Action::Down { x: 10.0, y: 10.0 },
                Action::Move { x: 20.0, y: 10.0 },
                Action::Up,
            ],
        };

        let stats = replay(&mut editor, &script, &serve(Vec::new()));
        assert_eq!(stats.stamps_issued, 0);
        assert_eq!(stats.stamps_rejected, 1);
        assert_eq!(stats.actions_failed, 0);
    }

    #[test]
    fn failed_actions_keep_previous_state() {
        let mut editor = loaded_editor(50, 50);
        let script = Script {
            display: None,
            actions: vec![
                Action::SetSize { size: 5 },
                Action::SelectImage {
                    uri: "broken.png".into(),
                },
            ],
        };

        let stats = replay(&mut editor, &script, &serve(vec![1, 2, 3]));
        assert_eq!(stats.actions_failed, 2);
        assert_eq!(editor.tools().size(), StampSize::default());
        assert_eq!(editor.image_dimensions(), Some(Dimensions::new(50, 50)));
    }

    #[test]
    fn missing_display_follows_current_image() {
        let mut editor = loaded_editor(100, 100);
        let script = Script {
            display: None,
            actions: vec![
                Action::SelectImage {
                    uri: "bigger.png".into(),
                },
                Action::Down { x: 150.0, y: 150.0 },
            ],
        };

        let stats = replay(&mut editor, &script, &serve(png(200, 200)));
        assert_eq!(stats.stamps_issued, 1);
        assert_eq!(editor.export_mask().get_pixel(150, 150).0[0], 255);
    }

    #[test]
    fn file_loader_reports_missing_file() {
        let result = FileLoader.fetch("file:///nonexistent/keshi/fixture.png");
        assert!(matches!(result, Err(LoadError::Fetch { .. })));
    }
}
