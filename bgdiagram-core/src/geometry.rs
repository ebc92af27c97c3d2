//! Pure board geometry: maps abstract positions and stack heights to
//! 2-D centers around the board origin, and provides the arrow outline
//! math used by rendering backends.

use crate::constants::{
    BAR_WIDTH, BOARD_HEIGHT, BORDER_WIDTH, CENTER_RIGHT_SIDE, CHECKER_SIZE, POINT_HEIGHT,
};
use crate::models::{BoardPos, Side};

/// Stateless geometry provider; the only configuration is the board
/// orientation. The same mapping is used for point numbering and for
/// checker placement, so the two can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geometry {
    /// Home board on the left instead of the right.
    pub flip_x: bool,
}

impl Geometry {
    pub fn new(flip_x: bool) -> Self {
        Geometry { flip_x }
    }

    /// Displayed number for a point under the current orientation.
    /// Flipping twice restores the original numbering.
    pub fn display_point(&self, p: u8) -> u8 {
        if self.flip_x {
            (if p > 12 { 37 } else { 13 }) - p
        } else {
            p
        }
    }

    /// X center of the bear-off trays (the side opposite the bar).
    pub fn bearoff_side_x(&self) -> f64 {
        if self.flip_x {
            -CENTER_RIGHT_SIDE
        } else {
            CENTER_RIGHT_SIDE
        }
    }

    /// X center of the cube and score column.
    pub fn cube_side_x(&self) -> f64 {
        -self.bearoff_side_x()
    }

    /// Center of the checker slot at `pos` with `height` checkers below
    /// it. Heights grow away from the board edge for points and bars;
    /// for off positions they index the tray list.
    pub fn checker_center(&self, pos: BoardPos, height: f64) -> (f64, f64) {
        let mut cx = 0.0;
        let mut cy0 = POINT_HEIGHT - 1.0 - BORDER_WIDTH / 2.0;
        let edge: f64; // +1 bottom half, -1 top half

        match pos {
            BoardPos::Off(side) => {
                let bx = self.bearoff_side_x();
                cx = bx - 15.0 * bx.signum();
                edge = match side {
                    Side::Black => -1.0,
                    Side::White => 1.0,
                };
            }
            BoardPos::Bar(side) => {
                // Bar stacks sit half a checker closer to the board center.
                edge = match side {
                    Side::White => -1.0,
                    Side::Black => 1.0,
                };
                cy0 -= CHECKER_SIZE / 2.0;
            }
            BoardPos::Point(p) => {
                let dp = self.display_point(p) as i32;
                let lr = if (7..=18).contains(&dp) { -1.0 } else { 1.0 };
                edge = if dp <= 12 { 1.0 } else { -1.0 };
                let slot = if dp <= 12 { 6 - dp } else { dp - 19 } as f64;
                cx = slot * CHECKER_SIZE
                    + lr * (BAR_WIDTH / 2.0 + BORDER_WIDTH)
                    + CHECKER_SIZE / 2.0;
            }
        }

        let cy = edge * (cy0 - height * CHECKER_SIZE);
        (cx, cy)
    }

    /// X center of a die face; slots range from -2 (next to the bar)
    /// to 3, with 0 and 1 the standard pair.
    pub fn dice_center_x(&self, side: Side, slot: i32) -> f64 {
        let flip = if self.flip_x { -1.0 } else { 1.0 };
        flip * side.sign() as f64
            * (CHECKER_SIZE * 2.5 + BAR_WIDTH / 2.0 + slot as f64 * CHECKER_SIZE + BORDER_WIDTH)
    }

    /// Center of the doubling cube; `owner` None means centered.
    pub fn cube_center(&self, owner: Option<Side>) -> (f64, f64) {
        let size = (CHECKER_SIZE * 0.4).round();
        let sign = owner.map(|s| s.sign() as f64).unwrap_or(0.0);
        let cy = sign * (POINT_HEIGHT - CHECKER_SIZE * 0.3 - size);
        (self.cube_side_x(), cy)
    }

    /// Anchor of a side's match score label.
    pub fn score_anchor(&self, side: Side) -> (f64, f64) {
        (
            self.cube_side_x(),
            side.sign() as f64 * (POINT_HEIGHT + CHECKER_SIZE * 0.2),
        )
    }

    /// Anchor of a side's pip count label, on the bar centerline.
    pub fn pip_count_anchor(&self, side: Side) -> (f64, f64) {
        (0.0, side.sign() as f64 * (POINT_HEIGHT + CHECKER_SIZE * 0.2))
    }

    /// Center of the on-turn indicator dot.
    pub fn turn_indicator_center(&self, side: Side) -> (f64, f64) {
        let r = CHECKER_SIZE / 5.0;
        (
            self.bearoff_side_x(),
            side.sign() as f64 * (BOARD_HEIGHT / 2.0 + BORDER_WIDTH * 2.0 + r),
        )
    }
}

/// Outline of an arrow from (x1,y1) to (x2,y2) as a 7-point polygon.
/// The shorten factors pull the line in by a fraction of the head
/// length so arrows do not pierce the checker they start from.
pub fn arrow_polygon(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    shorten_start: f64,
    shorten_end: f64,
) -> Vec<(f64, f64)> {
    let line_width = CHECKER_SIZE * 0.2;
    let head_width = CHECKER_SIZE * 0.5;
    let head_length = CHECKER_SIZE * 0.4;

    let angle = (y2 - y1).atan2(x2 - x1);
    let (sin, cos) = angle.sin_cos();

    let ax1 = x1 + shorten_start * head_length * cos;
    let ay1 = y1 + shorten_start * head_length * sin;
    let ax2 = x2 - shorten_end * head_length * cos;
    let ay2 = y2 - shorten_end * head_length * sin;

    // Base of the head
    let bx = ax2 - head_length * cos;
    let by = ay2 - head_length * sin;

    let lox = (line_width / 2.0) * sin;
    let loy = (line_width / 2.0) * -cos;
    let hox = (head_width / 2.0) * sin;
    let hoy = (head_width / 2.0) * -cos;

    vec![
        (ax1 - lox, ay1 - loy), // lower line start
        (bx - lox, by - loy),   // lower line end
        (bx - hox, by - hoy),   // head start
        (ax2, ay2),             // head point
        (bx + hox, by + hoy),   // head end
        (bx + lox, by + loy),   // upper line end
        (ax1 + lox, ay1 + loy), // upper line start
    ]
}

/// Outline of a double-headed arrow, built by merging two half-arrows
/// that share the segment midpoint.
pub fn double_arrow_polygon(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(f64, f64)> {
    let mx = x1 + (x2 - x1) / 2.0;
    let my = y1 + (y2 - y1) / 2.0;
    let mut half1 = arrow_polygon(mx, my, x1, y1, 0.0, 0.0);
    let mut half2 = arrow_polygon(mx, my, x2, y2, 0.0, 0.0);
    half1.pop();
    half2.pop();
    half1.extend(half2);
    half1
}
