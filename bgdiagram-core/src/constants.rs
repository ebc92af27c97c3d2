//! Board layout constants.
//! All values are SVG user units; the board is drawn around the origin,
//! x growing to the right and y growing downwards.

/// Diameter of a checker; every other dimension derives from it.
pub const CHECKER_SIZE: f64 = 50.0;
/// Stroke width of board frames and checker outlines.
pub const BORDER_WIDTH: f64 = 2.0;

/// Width of one half-board (six points).
pub const BOARD_WIDTH: f64 = 6.0 * CHECKER_SIZE + BORDER_WIDTH;
/// Vertical gap between the two rows of points.
pub const POINT_GAP: f64 = CHECKER_SIZE;
/// Length of a point triangle.
pub const POINT_HEIGHT: f64 = 5.0 * CHECKER_SIZE;
/// Height of the playing area.
pub const BOARD_HEIGHT: f64 = 2.0 * POINT_HEIGHT + POINT_GAP;
/// Width of the central bar.
pub const BAR_WIDTH: f64 = CHECKER_SIZE + 2.0 * BORDER_WIDTH;
/// Width of each side tray area.
pub const SIDE_WIDTH: f64 = BAR_WIDTH;
/// Height of the text strip above and below the playing area.
pub const TEXT_AREA_HEIGHT: f64 = CHECKER_SIZE / 2.0;

pub const FULL_BOARD_WIDTH: f64 = 2.0 * SIDE_WIDTH + 2.0 * BOARD_WIDTH + BAR_WIDTH + 2.0;
pub const FULL_BOARD_HEIGHT: f64 = BOARD_HEIGHT + 2.0 * BORDER_WIDTH + TEXT_AREA_HEIGHT * 2.0;
pub const VIEW_AREA_WIDTH: f64 = FULL_BOARD_WIDTH + BORDER_WIDTH * 2.0;

/// Horizontal center of the right-hand side tray; the left one is its mirror.
pub const CENTER_RIGHT_SIDE: f64 = BOARD_WIDTH + BAR_WIDTH + BORDER_WIDTH / 2.0;
