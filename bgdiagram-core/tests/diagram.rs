use bgdiagram_core::models::{BoardPos, DrawPrimitive, MatchScore, Side};
use bgdiagram_core::{DiagramOptions, DiagramWarning, diagram_from_xgid};

const START: &str = "XGID=-b----E-C---eE---c-e----B-:0:0:1:31:0:0:0:0:10";

fn kinds(primitives: &[DrawPrimitive]) -> Vec<&'static str> {
    primitives
        .iter()
        .map(|p| match p {
            DrawPrimitive::CheckerStack { .. } => "checkers",
            DrawPrimitive::Arrow { .. } => "arrow",
            DrawPrimitive::DoubleArrow { .. } => "double_arrow",
            DrawPrimitive::Polygon { .. } => "polygon",
            DrawPrimitive::Text { .. } => "text",
            DrawPrimitive::Dice { .. } => "dice",
            DrawPrimitive::Cube { .. } => "cube",
            DrawPrimitive::Score { .. } => "score",
            DrawPrimitive::PipCount { .. } => "pip_count",
            DrawPrimitive::TurnIndicator { .. } => "turn",
        })
        .collect()
}

#[test]
fn starting_position_pipeline() {
    let diagram = diagram_from_xgid(START, DiagramOptions::default()).unwrap();
    assert!(diagram.warnings.is_empty());

    let kinds = kinds(&diagram.primitives);
    // Eight occupied slots, both pip counts, cube, turn, two dice, no
    // score in a money game.
    assert_eq!(kinds.iter().filter(|k| **k == "checkers").count(), 8);
    assert_eq!(kinds.iter().filter(|k| **k == "pip_count").count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == "dice").count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == "cube").count(), 1);
    assert!(!kinds.contains(&"score"));

    // Board state first, dice last.
    assert_eq!(kinds[0], "checkers");
    assert_eq!(kinds[kinds.len() - 1], "dice");
    assert_eq!(kinds[kinds.len() - 2], "dice");

    let pips: Vec<_> = diagram
        .primitives
        .iter()
        .filter_map(|p| match *p {
            DrawPrimitive::PipCount { side, count } => Some((side, count)),
            _ => None,
        })
        .collect();
    assert_eq!(pips, vec![(Side::White, 167), (Side::Black, 167)]);
}

#[test]
fn match_play_emits_scores() {
    let diagram = diagram_from_xgid(
        "XGID=-b----E-C---eE---c-e----B-:1:1:-1:00:3:1:0:7",
        DiagramOptions::default(),
    )
    .unwrap();
    let scores: Vec<_> = diagram
        .primitives
        .iter()
        .filter_map(|p| match *p {
            DrawPrimitive::Score {
                side,
                score,
                length,
            } => Some(MatchScore {
                white: if side == Side::White { score } else { 0 },
                black: if side == Side::Black { score } else { 0 },
                length,
            }),
            _ => None,
        })
        .collect();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s.length == 7));
}

#[test]
fn pip_count_flag_suppresses_pip_primitives() {
    let diagram = diagram_from_xgid(
        "XGID=-b----E-C---eE---c-e----B-:0:0:1:00:0:0:0:0:Op0",
        DiagramOptions::default(),
    )
    .unwrap();
    assert!(
        !diagram
            .primitives
            .iter()
            .any(|p| matches!(p, DrawPrimitive::PipCount { .. }))
    );
    assert!(!diagram.flags.pip_count);
    assert!(diagram.flags.point_numbers);
}

#[test]
fn no_roll_means_no_dice_primitives() {
    let diagram = diagram_from_xgid(
        "XGID=-b----E-C---eE---c-e----B-:0:0:1:00:0:0:0:0",
        DiagramOptions::default(),
    )
    .unwrap();
    assert!(
        !diagram
            .primitives
            .iter()
            .any(|p| matches!(p, DrawPrimitive::Dice { .. }))
    );
}

#[test]
fn borne_off_checkers_fill_the_trays() {
    // Ten White checkers on the board, five already off.
    let diagram = diagram_from_xgid(
        "-b---BE-C--------c-e----b-:0:0:1:00:0:0:0:0",
        DiagramOptions::default(),
    )
    .unwrap();
    let white_off = diagram.primitives.iter().find_map(|p| match *p {
        DrawPrimitive::CheckerStack {
            pos: BoardPos::Off(Side::White),
            count,
            ..
        } => Some(count),
        _ => None,
    });
    assert_eq!(white_off, Some(5));
}

#[test]
fn decode_and_replay_warnings_are_combined() {
    // Over-full White census plus an out-of-range move token.
    let diagram = diagram_from_xgid(
        "XGID=-OA-----------------------:0:0:1:21:0:0:0:0:99/1",
        DiagramOptions::default(),
    )
    .unwrap();
    assert!(diagram.warnings.iter().any(|w| matches!(
        w,
        DiagramWarning::CensusInvariantViolation {
            side: Side::White,
            ..
        }
    )));
    assert!(
        diagram
            .warnings
            .iter()
            .any(|w| matches!(w, DiagramWarning::InvalidMoveToken { .. }))
    );
}

#[test]
fn move_list_arrows_come_after_board_elements() {
    let diagram = diagram_from_xgid(
        "XGID=-b----E-C---eE---c-e----B-:0:0:1:31:0:0:0:0:8/5,6/5",
        DiagramOptions::default(),
    )
    .unwrap();
    let kinds = kinds(&diagram.primitives);
    let first_arrow = kinds.iter().position(|k| *k == "arrow").unwrap();
    let last_board = kinds.iter().rposition(|k| *k == "turn").unwrap();
    assert!(first_arrow > last_board);
    assert_eq!(kinds.iter().filter(|k| **k == "arrow").count(), 2);
}

#[test]
fn unusable_string_is_a_hard_error() {
    assert!(diagram_from_xgid("XGID=tooshort:0:0:1", DiagramOptions::default()).is_err());
    assert!(diagram_from_xgid("", DiagramOptions::default()).is_err());
}

#[test]
fn primitives_serialize_to_tagged_json() {
    let diagram = diagram_from_xgid(START, DiagramOptions::default()).unwrap();
    let json = serde_json::to_value(&diagram.primitives).unwrap();
    let first = &json[0];
    assert_eq!(first["kind"], "checker_stack");
    assert_eq!(first["side"], "black");
}
