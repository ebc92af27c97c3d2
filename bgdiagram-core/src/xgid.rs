//! XGID notation decoder.
//!
//! An XGID is an optional `XGID=` prefix, a 26-character packed checker
//! census, then colon-delimited integer fields (cube exponent, cube
//! owner, side on roll, dice, scores, crawford flag, match length) and
//! zero or more annotation segments.

use crate::error::{DecodeError, DiagramWarning};
use crate::models::{
    AnnotationKind, AnnotationToken, Census, Cube, MatchScore, OptionFlags, Position, Side,
};

pub const XGID_PREFIX: &str = "XGID=";

/// Length of the packed checker census field.
pub const CENSUS_LEN: usize = 26;

/// Decode one census character.
///
/// The encoding is offset-64 with overflow-at-15 flipping the owner:
/// `@` (code 64) is zero, `A`..`O` are 1..=15 checkers for White, and
/// the +32 range `a`..`o` folds back to 1..=15 for Black. `-` also
/// marks an empty point. Everything else is malformed.
pub fn census_count(ch: char) -> Result<Option<(Side, u8)>, ()> {
    if ch == '-' || ch == '@' {
        return Ok(None);
    }
    let mut count = ch as i32 - 64;
    if count < 1 {
        return Err(());
    }
    let side = if count > 15 {
        count -= 32;
        Side::Black
    } else {
        Side::White
    };
    if (1..=15).contains(&count) {
        Ok(Some((side, count as u8)))
    } else {
        Err(())
    }
}

fn int_field(fields: &[&str], idx: usize, name: &'static str) -> Result<i32, DecodeError> {
    let value = fields.get(idx).ok_or(DecodeError::MissingField(name))?;
    if value.is_empty() {
        return Ok(0);
    }
    value.trim().parse().map_err(|_| DecodeError::NumericField {
        name,
        value: (*value).to_string(),
    })
}

/// Decode a raw notation string into a position snapshot.
///
/// Fatal grammar problems (wrong census length, bad census characters,
/// non-numeric required fields) return an error; census invariant
/// violations and unknown option flags are collected as warnings on
/// the snapshot instead.
pub fn decode(raw: &str) -> Result<Position, DecodeError> {
    let s = raw.trim();
    let s = s.strip_prefix(XGID_PREFIX).unwrap_or(s);

    let mut parts = s.split(':');
    let census_field = parts.next().unwrap_or("");
    if census_field.chars().count() != CENSUS_LEN {
        return Err(DecodeError::CensusLength(census_field.chars().count()));
    }

    let mut warnings = Vec::new();
    let mut census = Census::default();
    let mut pips = [0i32; 2];
    let mut totals = [0i32; 2];

    for (pos, ch) in census_field.chars().enumerate() {
        match census_count(ch) {
            Ok(None) => {}
            Ok(Some((side, count))) => {
                let count = count as i32;
                pips[side.index()] += pos as i32 * count;
                totals[side.index()] += count;
                census.set(pos, (count * side.sign()) as i8);
            }
            Err(()) => return Err(DecodeError::CensusChar { index: pos, ch }),
        }
    }

    for side in [Side::White, Side::Black] {
        if totals[side.index()] > 15 {
            warnings.push(DiagramWarning::CensusInvariantViolation {
                side,
                count: totals[side.index()],
            });
        }
    }
    // Black's pips count distance to its own home, mirrored.
    pips[Side::Black.index()] = totals[Side::Black.index()] * 25 - pips[Side::Black.index()];

    let fields: Vec<&str> = parts.collect();

    let cube_exponent = int_field(&fields, 0, "cube exponent")?;
    let cube_owner = int_field(&fields, 1, "cube owner")?;
    let turn = int_field(&fields, 2, "side on roll")?;
    let dice_field = int_field(&fields, 3, "dice")?;
    let score_white = int_field(&fields, 4, "white score")?;
    let score_black = int_field(&fields, 5, "black score")?;
    let crawford = int_field(&fields, 6, "crawford flag")?;
    let match_length = int_field(&fields, 7, "match length")?;

    // Empty or zero exponent means a centered 64 cube.
    let exponent = if cube_exponent == 0 { 6 } else { cube_exponent };
    let cube = Cube {
        value: 1u32 << exponent.clamp(0, 30) as u32,
        owner: match cube_owner {
            0 => None,
            v => Some(Side::from_sign(v)),
        },
        crawford: crawford != 0,
    };

    let die1 = (dice_field / 10) as u8;
    let die2 = (dice_field % 10) as u8;
    let dice = if (1..=6).contains(&die1) && (1..=6).contains(&die2) {
        Some((die1, die2))
    } else {
        None
    };

    let score = if match_length > 0 {
        Some(MatchScore {
            white: score_white.max(0) as u32,
            black: score_black.max(0) as u32,
            length: match_length as u32,
        })
    } else {
        None
    };

    let mut flags = OptionFlags::default();
    let mut annotations = Vec::new();
    for (i, seg) in fields.iter().enumerate().skip(8) {
        if seg.is_empty() {
            continue;
        }
        // Some emitters append a max-cube integer before the
        // annotations; accept and skip a single leading one.
        if i == 8 && annotations.is_empty() && seg.parse::<i32>().is_ok() {
            continue;
        }
        let kind = match seg.chars().next() {
            Some('A') => AnnotationKind::Arrow,
            Some('D') => AnnotationKind::DoubleArrow,
            Some('P') => AnnotationKind::Polygon,
            Some('T') => AnnotationKind::Text,
            Some('O') => AnnotationKind::OptionFlag,
            _ => AnnotationKind::MoveList,
        };
        if kind == AnnotationKind::OptionFlag {
            apply_option_flag(seg, &mut flags, &mut warnings);
        }
        annotations.push(AnnotationToken {
            kind,
            raw: (*seg).to_string(),
        });
    }

    Ok(Position {
        census,
        pips,
        cube,
        turn: Side::from_sign(turn),
        dice,
        score,
        annotations,
        flags,
        warnings,
    })
}

/// `O` tokens: single-letter sub-key plus a `0`/`1` value.
/// `n` toggles point numbers, `p` the pip count.
fn apply_option_flag(seg: &str, flags: &mut OptionFlags, warnings: &mut Vec<DiagramWarning>) {
    let mut chars = seg.chars().skip(1);
    let key = chars.next();
    let value = chars.next();
    let enabled = match value {
        Some('0') => false,
        Some('1') => true,
        _ => {
            warnings.push(DiagramWarning::UnknownOptionFlag(seg.to_string()));
            return;
        }
    };
    match key {
        Some('n') => flags.point_numbers = enabled,
        Some('p') => flags.pip_count = enabled,
        _ => warnings.push(DiagramWarning::UnknownOptionFlag(seg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BAR_BLACK, BAR_WHITE};

    // Standard backgammon starting position, White to roll 3-1.
    const START: &str = "XGID=-b----E-C---eE---c-e----B-:0:0:1:31:0:0:0:0:10";

    #[test]
    fn census_char_rule() {
        assert_eq!(census_count('-'), Ok(None));
        assert_eq!(census_count('@'), Ok(None));
        assert_eq!(census_count('A'), Ok(Some((Side::White, 1))));
        assert_eq!(census_count('O'), Ok(Some((Side::White, 15))));
        assert_eq!(census_count('a'), Ok(Some((Side::Black, 1))));
        assert_eq!(census_count('o'), Ok(Some((Side::Black, 15))));
        // The gap between the two ranges is malformed.
        assert_eq!(census_count('P'), Err(()));
        assert_eq!(census_count('`'), Err(()));
        assert_eq!(census_count('z'), Err(()));
        assert_eq!(census_count('!'), Err(()));
    }

    #[test]
    fn decodes_starting_position() {
        let pos = decode(START).unwrap();
        assert_eq!(pos.census.count(24), 2);
        assert_eq!(pos.census.count(13), 5);
        assert_eq!(pos.census.count(6), 5);
        assert_eq!(pos.census.count(8), 3);
        assert_eq!(pos.census.count(1), -2);
        assert_eq!(pos.census.count(12), -5);
        assert_eq!(pos.census.count(19), -5);
        assert_eq!(pos.census.count(17), -3);
        assert_eq!(pos.census.total(Side::White), 15);
        assert_eq!(pos.census.total(Side::Black), 15);
        assert_eq!(pos.census.off_count(Side::White), 0);
        assert_eq!(pos.pips[Side::White.index()], 167);
        assert_eq!(pos.pips[Side::Black.index()], 167);
        assert_eq!(pos.turn, Side::White);
        assert_eq!(pos.dice, Some((3, 1)));
        assert_eq!(pos.cube.value, 64);
        assert_eq!(pos.cube.owner, None);
        assert!(pos.score.is_none());
        assert!(pos.warnings.is_empty());
    }

    #[test]
    fn accumulated_pips_match_census_pips() {
        let pos = decode(START).unwrap();
        for side in [Side::White, Side::Black] {
            assert_eq!(pos.pips[side.index()], pos.census.pips(side));
        }
    }

    #[test]
    fn census_plus_off_is_fifteen() {
        let pos = decode("XGID=-b----E-C---eE---c-e----A-:0:0:1:31:0:0:0:0:10").unwrap();
        for side in [Side::White, Side::Black] {
            assert_eq!(
                pos.census.total(side) + pos.census.off_count(side),
                15,
                "{side:?}"
            );
        }
    }

    #[test]
    fn bars_decode_to_end_indices() {
        // White checker on the bar (index 25), Black on index 0.
        let pos = decode("a------------------------A:0:0:1:00:0:0:0:0").unwrap();
        assert_eq!(pos.census.count(BAR_WHITE), 1);
        assert_eq!(pos.census.count(BAR_BLACK), -1);
    }

    #[test]
    fn prefix_is_optional() {
        let with = decode(START).unwrap();
        let without = decode(&START[XGID_PREFIX.len()..]).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn rejects_wrong_census_length() {
        assert_eq!(
            decode("XGID=-b----E:0:0:1:31:0:0:0:0"),
            Err(DecodeError::CensusLength(7))
        );
    }

    #[test]
    fn rejects_bad_census_char() {
        let err = decode("XGID=-b----E-C---eE---c-e----Z-:0:0:1:31:0:0:0:0").unwrap_err();
        assert_eq!(err, DecodeError::CensusChar { index: 24, ch: 'Z' });
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:XX:0:0:0:0").unwrap_err();
        assert!(matches!(err, DecodeError::NumericField { name: "dice", .. }));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1").unwrap_err();
        assert_eq!(err, DecodeError::MissingField("dice"));
    }

    #[test]
    fn empty_fields_read_as_zero() {
        let pos = decode("XGID=-b----E-C---eE---c-e----B-:::1::0:0:0:0").unwrap();
        assert_eq!(pos.cube.value, 64);
        assert_eq!(pos.cube.owner, None);
        assert!(pos.dice.is_none());
    }

    #[test]
    fn dice_zero_and_out_of_range_mean_no_dice() {
        let no = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:00:0:0:0:0").unwrap();
        assert!(no.dice.is_none());
        let bad = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:78:0:0:0:0").unwrap();
        assert!(bad.dice.is_none());
        let ok = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:52:0:0:0:0").unwrap();
        assert_eq!(ok.dice, Some((5, 2)));
    }

    #[test]
    fn cube_fields() {
        let pos = decode("XGID=-b----E-C---eE---c-e----B-:3:-1:-1:00:2:1:1:7").unwrap();
        assert_eq!(pos.cube.value, 8);
        assert_eq!(pos.cube.owner, Some(Side::Black));
        assert!(pos.cube.crawford);
        assert_eq!(pos.turn, Side::Black);
        assert_eq!(
            pos.score,
            Some(MatchScore {
                white: 2,
                black: 1,
                length: 7
            })
        );
    }

    #[test]
    fn money_game_has_no_score() {
        let pos = decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:00:3:2:0:0").unwrap();
        assert!(pos.score.is_none());
    }

    #[test]
    fn over_full_census_warns_but_decodes() {
        // 16 White checkers on two points.
        let pos = decode("XGID=-OA-----------------------:0:0:1:00:0:0:0:0").unwrap();
        assert!(pos.warnings.iter().any(|w| matches!(
            w,
            DiagramWarning::CensusInvariantViolation {
                side: Side::White,
                count: 16
            }
        )));
    }

    #[test]
    fn annotation_classification() {
        let pos = decode(
            "XGID=-b----E-C---eE---c-e----B-:0:0:1:31:0:0:0:0:10:24/23,13/10:A5,2-10,1:P1,0-2,0-3,0:T12,3-hello:On0",
        )
        .unwrap();
        let kinds: Vec<_> = pos.annotations.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::MoveList,
                AnnotationKind::Arrow,
                AnnotationKind::Polygon,
                AnnotationKind::Text,
                AnnotationKind::OptionFlag,
            ]
        );
        // The leading "10" max-cube field was skipped, not parsed as a move.
        assert_eq!(pos.annotations[0].raw, "24/23,13/10");
        assert!(!pos.flags.point_numbers);
        assert!(pos.flags.pip_count);
    }

    #[test]
    fn unknown_option_flag_warns() {
        let pos =
            decode("XGID=-b----E-C---eE---c-e----B-:0:0:1:00:0:0:0:0:Oz1").unwrap();
        assert!(
            pos.warnings
                .iter()
                .any(|w| matches!(w, DiagramWarning::UnknownOptionFlag(_)))
        );
    }
}
