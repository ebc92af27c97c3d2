use serde::{Deserialize, Serialize};

use crate::error::DiagramWarning;

/// Raw census index of Black's bar.
pub const BAR_BLACK: usize = 0;
/// Raw census index of White's bar.
pub const BAR_WHITE: usize = 25;
/// Raw off-board marker for White used by annotation tokens.
pub const OFF_WHITE: i32 = -25;
/// Raw off-board marker for Black.
pub const OFF_BLACK: i32 = -50;

/// One of the two players. White moves towards point 1, Black towards 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Sign convention used throughout the census: White +1, Black -1.
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Index for per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Tolerant mapping from a numeric field: negative is Black,
    /// anything else White.
    pub fn from_sign(v: i32) -> Side {
        if v < 0 { Side::Black } else { Side::White }
    }
}

/// An abstract board location. Everything the geometry and the replay
/// engine talk about is one of these; raw integers from the notation
/// are converted on entry and rejected if they map to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardPos {
    /// Standard point, 1..=24 in canonical (White) numbering.
    Point(u8),
    Bar(Side),
    Off(Side),
}

impl BoardPos {
    /// Decode the integer encoding used by the census and annotation
    /// tokens: 0 and 25 are the bars, 1..=24 the points, -25/-50 the
    /// off-board slots. Anything else is invalid.
    pub fn from_raw(v: i32) -> Option<BoardPos> {
        match v {
            0 => Some(BoardPos::Bar(Side::Black)),
            25 => Some(BoardPos::Bar(Side::White)),
            1..=24 => Some(BoardPos::Point(v as u8)),
            OFF_WHITE => Some(BoardPos::Off(Side::White)),
            OFF_BLACK => Some(BoardPos::Off(Side::Black)),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            BoardPos::Point(p) => p as i32,
            BoardPos::Bar(side) => Self::bar_raw(side),
            BoardPos::Off(side) => Self::off_raw(side),
        }
    }

    /// Census index of a side's bar.
    pub fn bar_raw(side: Side) -> i32 {
        match side {
            Side::White => BAR_WHITE as i32,
            Side::Black => BAR_BLACK as i32,
        }
    }

    /// Off-board marker for a side.
    pub fn off_raw(side: Side) -> i32 {
        match side {
            Side::White => OFF_WHITE,
            Side::Black => OFF_BLACK,
        }
    }
}

/// Signed checker counts per census index; positive counts are White's.
/// Index 0 is Black's bar, 25 White's bar, 1..=24 the points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    counts: [i8; 26],
}

impl Census {
    pub fn count(&self, idx: usize) -> i8 {
        self.counts[idx]
    }

    pub fn set(&mut self, idx: usize, value: i8) {
        self.counts[idx] = value;
    }

    /// Copy of the raw array, used as mutable interpreter state by the
    /// replay engine so the decoded snapshot is never touched.
    pub fn raw(&self) -> [i8; 26] {
        self.counts
    }

    /// Checkers a side has on the board, bar included.
    pub fn total(&self, side: Side) -> i32 {
        self.counts
            .iter()
            .map(|&c| c as i32)
            .filter(|&c| c * side.sign() > 0)
            .map(i32::abs)
            .sum()
    }

    /// Checkers already borne off, assuming the standard 15 per side.
    /// Clamped at zero so an over-full hand-edited census still renders.
    pub fn off_count(&self, side: Side) -> i32 {
        (15 - self.total(side)).max(0)
    }

    /// Pip count derived from the census alone. Black's points are
    /// mirrored, so its count is 25 per checker minus the stored sum.
    pub fn pips(&self, side: Side) -> i32 {
        let mut sum = 0;
        let mut total = 0;
        for (pos, &c) in self.counts.iter().enumerate() {
            let c = c as i32;
            if c * side.sign() > 0 {
                sum += pos as i32 * c.abs();
                total += c.abs();
            }
        }
        match side {
            Side::White => sum,
            Side::Black => total * 25 - sum,
        }
    }
}

/// Doubling cube state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub value: u32,
    /// None when the cube is centered.
    pub owner: Option<Side>,
    pub crawford: bool,
}

/// Match score; absent for money games.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchScore {
    pub white: u32,
    pub black: u32,
    pub length: u32,
}

/// Presentation toggles carried by `O` annotation tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionFlags {
    pub point_numbers: bool,
    pub pip_count: bool,
}

impl Default for OptionFlags {
    fn default() -> Self {
        OptionFlags {
            point_numbers: true,
            pip_count: true,
        }
    }
}

/// Classification of one annotation tail segment by its leading
/// discriminator character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    Arrow,
    DoubleArrow,
    Polygon,
    Text,
    OptionFlag,
    MoveList,
}

/// One raw annotation segment, kept verbatim for the replay pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationToken {
    pub kind: AnnotationKind,
    pub raw: String,
}

/// Fully decoded position snapshot. The census here is immutable;
/// replay works on a private copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub census: Census,
    /// Running pip totals accumulated while decoding the census field,
    /// indexed by `Side::index()`. Cross-checkable against
    /// `census.pips()`.
    pub pips: [i32; 2],
    pub cube: Cube,
    pub turn: Side,
    /// Die faces, absent when the dice field holds no valid roll.
    pub dice: Option<(u8, u8)>,
    pub score: Option<MatchScore>,
    pub annotations: Vec<AnnotationToken>,
    pub flags: OptionFlags,
    /// Non-fatal conditions found while decoding.
    pub warnings: Vec<DiagramWarning>,
}

/// Style tag attached to annotation primitives; the rendering backend
/// maps these to concrete styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Annotation,
    Best,
    Good,
    Dubious,
    Error,
    Blunder,
}

impl StyleTag {
    /// Map a trailing move quality mark to its tag.
    pub fn from_quality_mark(mark: &str) -> Option<StyleTag> {
        match mark {
            "!!" => Some(StyleTag::Best),
            "!" => Some(StyleTag::Good),
            "?!" => Some(StyleTag::Dubious),
            "?" => Some(StyleTag::Error),
            "??" => Some(StyleTag::Blunder),
            _ => None,
        }
    }
}

/// One drawing instruction. Primitives are immutable once emitted and
/// keep their emission order; positions are abstract and resolved to
/// coordinates by the rendering backend through `Geometry`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// A stack of `count` checkers; `Off` positions draw as the flat
    /// borne-off tray.
    CheckerStack {
        pos: BoardPos,
        side: Side,
        count: u8,
    },
    Arrow {
        from: BoardPos,
        from_height: f64,
        to: BoardPos,
        to_height: f64,
        style: Option<StyleTag>,
    },
    DoubleArrow {
        from: BoardPos,
        from_height: f64,
        to: BoardPos,
        to_height: f64,
        style: Option<StyleTag>,
    },
    Polygon {
        points: Vec<(BoardPos, f64)>,
        style: Option<StyleTag>,
    },
    Text {
        pos: BoardPos,
        height: f64,
        text: String,
        style: Option<StyleTag>,
    },
    Dice {
        side: Side,
        value: u8,
        slot: u8,
    },
    Cube {
        value: u32,
        owner: Option<Side>,
        crawford: bool,
    },
    Score {
        side: Side,
        score: u32,
        length: u32,
    },
    PipCount {
        side: Side,
        count: i32,
    },
    TurnIndicator {
        side: Side,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_pos_raw_round_trip() {
        for v in -60..30 {
            if let Some(pos) = BoardPos::from_raw(v) {
                assert_eq!(pos.raw(), v);
            }
        }
        assert_eq!(BoardPos::from_raw(0), Some(BoardPos::Bar(Side::Black)));
        assert_eq!(BoardPos::from_raw(25), Some(BoardPos::Bar(Side::White)));
        assert_eq!(BoardPos::from_raw(-25), Some(BoardPos::Off(Side::White)));
        assert_eq!(BoardPos::from_raw(-50), Some(BoardPos::Off(Side::Black)));
        assert_eq!(BoardPos::from_raw(26), None);
        assert_eq!(BoardPos::from_raw(-1), None);
    }

    #[test]
    fn census_totals_and_off() {
        let mut census = Census::default();
        census.set(6, 5);
        census.set(13, 5);
        census.set(24, 2);
        census.set(12, -4);
        census.set(BAR_BLACK, -1);
        assert_eq!(census.total(Side::White), 12);
        assert_eq!(census.total(Side::Black), 5);
        assert_eq!(census.off_count(Side::White), 3);
        assert_eq!(census.off_count(Side::Black), 10);
    }

    #[test]
    fn census_pips_mirror_for_black() {
        let mut census = Census::default();
        census.set(6, 2);
        census.set(19, -3);
        // White: 2 checkers on point 6.
        assert_eq!(census.pips(Side::White), 12);
        // Black: 3 checkers on point 19, i.e. 6 from Black's view.
        assert_eq!(census.pips(Side::Black), 3 * 25 - 3 * 19);
    }

    #[test]
    fn quality_marks() {
        assert_eq!(StyleTag::from_quality_mark("!!"), Some(StyleTag::Best));
        assert_eq!(StyleTag::from_quality_mark("?!"), Some(StyleTag::Dubious));
        assert_eq!(StyleTag::from_quality_mark("???"), None);
        assert_eq!(StyleTag::from_quality_mark(""), None);
    }
}
