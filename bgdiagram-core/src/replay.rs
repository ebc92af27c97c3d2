//! Move-replay engine: walks a decoded snapshot and emits the drawing
//! primitives for one diagram, interpreting move-list annotations
//! against a private copy of the checker census.

use crate::builder::DiagramBuilder;
use crate::error::DiagramWarning;
use crate::models::{
    AnnotationKind, BoardPos, Position, Side, StyleTag,
};

/// Emit every primitive for `pos` into `builder`. Positional elements
/// come first, then annotations in token order, then the dice, so
/// later annotations render on top of the board. Returns the warnings
/// gathered while interpreting annotation tokens.
pub fn replay(pos: &Position, builder: &mut DiagramBuilder) -> Vec<DiagramWarning> {
    let mut warnings = Vec::new();

    for idx in 0..26 {
        let count = pos.census.count(idx);
        if count != 0 {
            let side = Side::from_sign(count as i32);
            if let Some(board_pos) = BoardPos::from_raw(idx as i32) {
                builder.add_checkers(side, board_pos, count.unsigned_abs());
            }
        }
    }

    for side in [Side::White, Side::Black] {
        let off = pos.census.off_count(side);
        if off > 0 {
            builder.add_checkers(side, BoardPos::Off(side), off as u8);
        }
    }

    if pos.flags.pip_count {
        for side in [Side::White, Side::Black] {
            builder.add_pip_count(side, pos.pips[side.index()]);
        }
    }

    builder.add_cube(pos.cube);
    builder.add_turn_indicator(pos.turn);

    if let Some(score) = pos.score {
        builder.add_score(Side::White, score.white, score.length);
        builder.add_score(Side::Black, score.black, score.length);
    }

    // Annotations mutate a local census copy only; the snapshot stays
    // untouched so independent renders cannot interfere.
    let mut point = pos.census.raw();
    for token in &pos.annotations {
        match token.kind {
            AnnotationKind::MoveList => {
                apply_move_list(&token.raw, pos.turn, &mut point, builder, &mut warnings);
            }
            AnnotationKind::Arrow => annotation_arrow(&token.raw, false, builder, &mut warnings),
            AnnotationKind::DoubleArrow => {
                annotation_arrow(&token.raw, true, builder, &mut warnings)
            }
            AnnotationKind::Polygon => annotation_polygon(&token.raw, builder, &mut warnings),
            AnnotationKind::Text => annotation_text(&token.raw, builder, &mut warnings),
            // Option flags were folded into the snapshot at decode time.
            AnnotationKind::OptionFlag => {}
        }
    }

    if let Some((die1, die2)) = pos.dice {
        builder.add_dice(pos.turn, die1, 0);
        builder.add_dice(pos.turn, die2, 1);
    }

    warnings
}

/// Interpret one move-list token ("24/22,13/8!", "13/5(2)", "bar/20",
/// "6/off") for the side on roll, drawing an arrow per application and
/// updating the census copy.
fn apply_move_list(
    raw: &str,
    player: Side,
    point: &mut [i8; 26],
    builder: &mut DiagramBuilder,
    warnings: &mut Vec<DiagramWarning>,
) {
    let invalid = |warnings: &mut Vec<DiagramWarning>, reason: &str| {
        warnings.push(DiagramWarning::InvalidMoveToken {
            token: raw.to_string(),
            reason: reason.to_string(),
        });
    };

    // The quality mark applies to the whole token.
    let stripped = raw.trim_end_matches(['!', '?']);
    let style = StyleTag::from_quality_mark(&raw[stripped.len()..]);

    // Captures are inferred from the census, not from the `*` mark.
    let normalized = stripped
        .replace('*', "")
        .replace("bar", "25")
        .replace("/off", &format!("/{}", BoardPos::off_raw(player)))
        .replace("/0", &format!("/{}", BoardPos::off_raw(player)));

    // Bear-off slots fill in temporal order, independent of stacks.
    let mut totaloff = 0;

    let separated = normalized.replace(',', " ");
    for mv in separated.split_whitespace() {
        let mut mv = mv;
        let mut repeat: i32 = 1;
        if let Some(p) = mv.find('(') {
            if p == 0 {
                return invalid(warnings, "repeat count without a move");
            }
            let digits: String = mv[p + 1..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            match digits.parse::<i32>() {
                Ok(n) => repeat = n.min(15),
                Err(_) => return invalid(warnings, "malformed repeat count"),
            }
            mv = &mv[..p];
        }

        let mut parts = mv.split('/');
        let (Some(from_txt), Some(to_txt)) = (parts.next(), parts.next()) else {
            return invalid(warnings, "expected from/to");
        };
        let (Ok(from_raw), Ok(to_raw)) = (from_txt.parse::<i32>(), to_txt.parse::<i32>()) else {
            return invalid(warnings, "non-numeric point");
        };

        // Moves are written from the mover's perspective; Black's board
        // is mirrored. Off markers are already canonical.
        let canon = |v: i32| {
            if v < 0 {
                v
            } else {
                match player {
                    Side::White => v,
                    Side::Black => 25 - v,
                }
            }
        };
        let from = canon(from_raw);
        let to = canon(to_raw);

        let (Some(from_pos), Some(to_pos)) = (BoardPos::from_raw(from), BoardPos::from_raw(to))
        else {
            return invalid(warnings, "point out of range");
        };
        if matches!(from_pos, BoardPos::Off(_)) {
            return invalid(warnings, "cannot move from off");
        }

        for i in 0..repeat {
            let from_idx = from as usize;
            // A crossover arrow stays anchored at board level; repeated
            // moves fan out so their arrowheads do not overlap.
            let crossover = (1..=24).contains(&from)
                && (1..=24).contains(&to)
                && (to - 12).signum() != (from - 12).signum();
            let adjust = if crossover { -1 } else { i * 2 - repeat };
            let from_height = point[from_idx] as i32 * player.sign() + adjust;

            if to < 0 {
                builder.add_arrow(from_pos, from_height as f64, to_pos, totaloff as f64, style);
                totaloff += 1;
            } else {
                let to_idx = to as usize;
                if (point[to_idx] as i32) * player.sign() < 0 {
                    // Capture: the lone opposing checker goes to its bar.
                    point[to_idx] = 0;
                    let bar = BoardPos::bar_raw(player.opponent()) as usize;
                    point[bar] -= player.sign() as i8;
                }
                let to_height = point[to_idx].unsigned_abs() as f64;
                builder.add_arrow(from_pos, from_height as f64, to_pos, to_height, style);
                point[to_idx] += player.sign() as i8;
            }

            point[from_idx] -= player.sign() as i8;
        }
    }
}

/// `A`/`D` tokens: "A<p1>,<h1>-<p2>,<h2>".
fn annotation_arrow(
    raw: &str,
    double: bool,
    builder: &mut DiagramBuilder,
    warnings: &mut Vec<DiagramWarning>,
) {
    match parse_point_list(raw) {
        Some(entries) if entries.len() == 2 => {
            let (from, from_height) = entries[0];
            let (to, to_height) = entries[1];
            if double {
                builder.add_double_arrow(from, from_height, to, to_height, Some(StyleTag::Annotation));
            } else {
                builder.add_arrow(from, from_height, to, to_height, Some(StyleTag::Annotation));
            }
        }
        _ => warnings.push(DiagramWarning::InvalidAnnotation(raw.to_string())),
    }
}

/// `P` tokens: "P<p1>,<h1>-<p2>,<h2>-...".
fn annotation_polygon(
    raw: &str,
    builder: &mut DiagramBuilder,
    warnings: &mut Vec<DiagramWarning>,
) {
    match parse_point_list(raw) {
        Some(points) if points.len() >= 2 => {
            builder.add_polygon(points, Some(StyleTag::Annotation));
        }
        _ => warnings.push(DiagramWarning::InvalidAnnotation(raw.to_string())),
    }
}

/// `T` tokens: "T<p>,<h>-<text>"; everything after the first `-` is the
/// label, hyphens included.
fn annotation_text(raw: &str, builder: &mut DiagramBuilder, warnings: &mut Vec<DiagramWarning>) {
    let parsed = raw.get(1..).and_then(|body| {
        let (anchor, text) = body.split_once('-')?;
        let mut entry = parse_entries(anchor)?;
        if entry.len() == 1 {
            Some((entry.remove(0), text.to_string()))
        } else {
            None
        }
    });
    match parsed {
        Some(((pos, height), text)) => {
            builder.add_text(pos, height, text, Some(StyleTag::Annotation));
        }
        None => warnings.push(DiagramWarning::InvalidAnnotation(raw.to_string())),
    }
}

/// Parse "<p>,<h>-<p>,<h>-..." after the discriminator character.
fn parse_point_list(raw: &str) -> Option<Vec<(BoardPos, f64)>> {
    parse_entries(raw.get(1..)?)
}

fn parse_entries(body: &str) -> Option<Vec<(BoardPos, f64)>> {
    body.split('-')
        .map(|entry| {
            let (pt, height) = entry.split_once(',')?;
            let pos = BoardPos::from_raw(pt.trim().parse().ok()?)?;
            let height = height.trim().parse().ok()?;
            Some((pos, height))
        })
        .collect()
}
