//! Shared crate-wide constants.

use std::time::Duration;

/// Narrowest a free-form window may become, in viewport pixels.
pub const MIN_WINDOW_WIDTH: i32 = 320;

/// Shortest a free-form window may become, in viewport pixels.
pub const MIN_WINDOW_HEIGHT: i32 = 240;

/// Height of the persistent bottom bar. Maximized windows stop above it.
pub const RESERVED_BOTTOM: i32 = 64;

/// Size given to a newly opened window that does not ask for one.
pub const DEFAULT_WINDOW_WIDTH: i32 = 640;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;

/// Diagonal step between the initial positions of successively opened
/// windows.
pub const CASCADE_STEP: i32 = 32;

/// Two header presses on the same window closer together than this toggle
/// maximize instead of starting a drag.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Pixels covered by one terminal cell when the desktop runs in a terminal.
///
/// Terminal cells are roughly twice as tall as they are wide, so the default
/// scale keeps window proportions close to what they would be on a real
/// pixel display.
pub const DEFAULT_CELL_WIDTH: i32 = 8;
pub const DEFAULT_CELL_HEIGHT: i32 = 16;
