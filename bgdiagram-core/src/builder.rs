//! Diagram assembly: an ordered primitive sink plus the one-call
//! front door that decodes an XGID string into a ready-to-render
//! diagram.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DiagramWarning};
use crate::models::{
    BoardPos, Cube, DrawPrimitive, OptionFlags, Side, StyleTag,
};
use crate::replay::replay;
use crate::xgid::decode;

/// Presentation options. These never change which primitives exist,
/// only how a backend lays them out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    /// Home board on the left instead of the right.
    pub flip_x: bool,
    /// Drop the outer text band (point numbers, pip counts, scores).
    pub compact: bool,
    /// Output scale factor applied by the backend.
    pub scale: f64,
    /// Render White's checkers dark and Black's light.
    pub swap_colors: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        DiagramOptions {
            flip_x: false,
            compact: false,
            scale: 1.0,
            swap_colors: false,
        }
    }
}

/// Collects primitives in emission order. The order is part of the
/// contract: backends paint front to back, so annotations added later
/// cover the board elements added earlier.
#[derive(Clone, Debug)]
pub struct DiagramBuilder {
    options: DiagramOptions,
    items: Vec<DrawPrimitive>,
}

impl DiagramBuilder {
    pub fn new(options: DiagramOptions) -> Self {
        DiagramBuilder {
            options,
            items: Vec::new(),
        }
    }

    pub fn options(&self) -> DiagramOptions {
        self.options
    }

    pub fn add_checkers(&mut self, side: Side, pos: BoardPos, count: u8) {
        self.items.push(DrawPrimitive::CheckerStack { pos, side, count });
    }

    pub fn add_arrow(
        &mut self,
        from: BoardPos,
        from_height: f64,
        to: BoardPos,
        to_height: f64,
        style: Option<StyleTag>,
    ) {
        self.items.push(DrawPrimitive::Arrow {
            from,
            from_height,
            to,
            to_height,
            style,
        });
    }

    pub fn add_double_arrow(
        &mut self,
        from: BoardPos,
        from_height: f64,
        to: BoardPos,
        to_height: f64,
        style: Option<StyleTag>,
    ) {
        self.items.push(DrawPrimitive::DoubleArrow {
            from,
            from_height,
            to,
            to_height,
            style,
        });
    }

    pub fn add_polygon(&mut self, points: Vec<(BoardPos, f64)>, style: Option<StyleTag>) {
        self.items.push(DrawPrimitive::Polygon { points, style });
    }

    pub fn add_text(
        &mut self,
        pos: BoardPos,
        height: f64,
        text: String,
        style: Option<StyleTag>,
    ) {
        self.items.push(DrawPrimitive::Text {
            pos,
            height,
            text,
            style,
        });
    }

    pub fn add_dice(&mut self, side: Side, value: u8, slot: u8) {
        self.items.push(DrawPrimitive::Dice { side, value, slot });
    }

    pub fn add_cube(&mut self, cube: Cube) {
        self.items.push(DrawPrimitive::Cube {
            value: cube.value,
            owner: cube.owner,
            crawford: cube.crawford,
        });
    }

    pub fn add_score(&mut self, side: Side, score: u32, length: u32) {
        self.items.push(DrawPrimitive::Score {
            side,
            score,
            length,
        });
    }

    pub fn add_pip_count(&mut self, side: Side, count: i32) {
        self.items.push(DrawPrimitive::PipCount { side, count });
    }

    pub fn add_turn_indicator(&mut self, side: Side) {
        self.items.push(DrawPrimitive::TurnIndicator { side });
    }

    /// Primitives in emission order. Borrowing keeps the builder
    /// reusable; calling twice yields the same sequence.
    pub fn finish(&self) -> &[DrawPrimitive] {
        &self.items
    }
}

/// A fully assembled diagram, ready for any backend.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub primitives: Vec<DrawPrimitive>,
    pub flags: OptionFlags,
    pub options: DiagramOptions,
    /// Decode-time and replay-time warnings, in that order.
    pub warnings: Vec<DiagramWarning>,
}

/// Decode `raw` and replay it into a diagram. Malformed annotations
/// degrade to warnings; only an unusable position string fails.
pub fn diagram_from_xgid(raw: &str, options: DiagramOptions) -> Result<Diagram, DecodeError> {
    let position = decode(raw)?;
    let mut builder = DiagramBuilder::new(options);
    let replay_warnings = replay(&position, &mut builder);

    let mut warnings = position.warnings.clone();
    warnings.extend(replay_warnings);

    Ok(Diagram {
        primitives: builder.items,
        flags: position.flags,
        options,
        warnings,
    })
}
