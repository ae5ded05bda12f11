//! Application constants.

use std::time::Duration;

/// Card rows shown by each dashboard preview.
pub const PREVIEW_ROWS: usize = 2;

/// Lines taken by a section border.
pub const SECTION_CHROME: u16 = 2;

/// Shortest population tick the event loop will schedule.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
