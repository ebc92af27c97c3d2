//! SVG rendering backend: resolves abstract primitives to coordinates
//! and serializes them as a self-contained SVG document with an
//! embedded stylesheet. Classes follow BEM notation so the output can
//! be restyled externally.

use bgdiagram_core::constants::{
    BAR_WIDTH, BOARD_HEIGHT, BORDER_WIDTH, CHECKER_SIZE, FULL_BOARD_HEIGHT, FULL_BOARD_WIDTH,
    POINT_GAP, POINT_HEIGHT, SIDE_WIDTH, VIEW_AREA_WIDTH,
};
use bgdiagram_core::geometry::{arrow_polygon, double_arrow_polygon};
use bgdiagram_core::models::{BoardPos, DrawPrimitive, Side, StyleTag};
use bgdiagram_core::{Diagram, Geometry};

const BEM_MAIN: &str = "bgdiagram";

const STYLESHEET: &str = "\
.bgdiagram__background{fill:#e8e4d8;}\
.bgdiagram__board{fill:#f0ead6;stroke:#5a4632;stroke-width:2;}\
.bgdiagram__board-frame{fill:#5a4632;stroke:none;}\
.bgdiagram__board-frame--nofill{fill:none;stroke:#3a2d20;stroke-width:2;}\
.bgdiagram__point--white{fill:#e3c099;stroke:#3a2d20;stroke-width:1;}\
.bgdiagram__point--black{fill:#b3541e;stroke:#3a2d20;stroke-width:1;}\
.bgdiagram__checker--white{fill:#f7f3e8;stroke:#3a2d20;stroke-width:2;}\
.bgdiagram__checker--black{fill:#2e2a26;stroke:#101010;stroke-width:2;}\
.bgdiagram__text{font-family:sans-serif;font-size:18px;text-anchor:middle;dominant-baseline:central;fill:#3a2d20;}\
.bgdiagram__text--point{font-size:14px;fill:#5a4632;}\
.bgdiagram__text--checker--white{fill:#3a2d20;}\
.bgdiagram__text--checker--black{fill:#f7f3e8;}\
.bgdiagram__text--offboard{font-size:14px;}\
.bgdiagram__text--pipcount{font-size:16px;}\
.bgdiagram__text--score{font-size:16px;}\
.bgdiagram__text--small{font-size:12px;}\
.bgdiagram__dice--white{fill:#f7f3e8;stroke:#3a2d20;stroke-width:2;}\
.bgdiagram__dice--black{fill:#2e2a26;stroke:#101010;stroke-width:2;}\
.bgdiagram__dice-dot--white{fill:#2e2a26;}\
.bgdiagram__dice-dot--black{fill:#f7f3e8;}\
.bgdiagram__cube{fill:#f7f3e8;stroke:#3a2d20;stroke-width:2;}\
.bgdiagram__arrow{fill:#3563a8;fill-opacity:0.85;stroke:none;}\
.bgdiagram__arrow--annotation{fill:#3563a8;}\
.bgdiagram__arrow--best{fill:#2d8a4e;}\
.bgdiagram__arrow--good{fill:#5aa96e;}\
.bgdiagram__arrow--dubious{fill:#c9a227;}\
.bgdiagram__arrow--error{fill:#c96a27;}\
.bgdiagram__arrow--blunder{fill:#b03a2e;}\
.bgdiagram__polygon--outer{fill:none;stroke:#f7f3e8;stroke-width:5;}\
.bgdiagram__polygon--annotation{fill:none;stroke:#3563a8;stroke-width:3;}\
.bgdiagram__text--annotation{fill:#3563a8;font-weight:bold;}";

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn bem(block: &str, modifiers: &str) -> String {
    let mut class = format!("{BEM_MAIN}__{block}");
    for m in modifiers.split_whitespace() {
        class.push_str(&format!(" {BEM_MAIN}__{block}--{m}"));
    }
    class
}

fn style_modifier(style: Option<StyleTag>) -> &'static str {
    match style {
        None => "",
        Some(StyleTag::Annotation) => "annotation",
        Some(StyleTag::Best) => "best",
        Some(StyleTag::Good) => "good",
        Some(StyleTag::Dubious) => "dubious",
        Some(StyleTag::Error) => "error",
        Some(StyleTag::Blunder) => "blunder",
    }
}

fn polygon_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a diagram to an SVG document. Also returns the pixel size of
/// the scaled output, for rasterizing backends.
pub fn render_svg(diagram: &Diagram) -> (String, u32, u32) {
    let options = diagram.options;
    let geometry = Geometry::new(options.flip_x);
    // One checker's worth of color swap: White keeps its geometry but
    // borrows Black's palette, and vice versa.
    let player_class = |side: Side| match (side, options.swap_colors) {
        (Side::White, false) | (Side::Black, true) => "white",
        (Side::White, true) | (Side::Black, false) => "black",
    };

    // Compact output crops the outer text band.
    let view_height = if options.compact {
        BOARD_HEIGHT + 4.0 * BORDER_WIDTH
    } else {
        FULL_BOARD_HEIGHT
    };
    let out_w = (VIEW_AREA_WIDTH * options.scale).ceil() as u32;
    let out_h = (view_height * options.scale).ceil() as u32;

    let mut s = String::new();
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" class=\"{}\" role=\"img\" aria-label=\"Diagram of a backgammon game position\">",
        out_w,
        out_h,
        -VIEW_AREA_WIDTH / 2.0,
        -view_height / 2.0,
        VIEW_AREA_WIDTH,
        view_height,
        BEM_MAIN,
    ));
    s.push_str(&format!("<style>{STYLESHEET}</style>"));

    let add_text = |s: &mut String, x: f64, y: f64, text: &str, modifiers: &str| {
        s.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" class=\"{}\">{}</text>",
            bem("text", modifiers),
            svg_escape(text)
        ));
    };

    draw_empty_board(&mut s, diagram, &geometry, &add_text);

    for primitive in &diagram.primitives {
        match primitive {
            DrawPrimitive::CheckerStack { pos, side, count } => match pos {
                BoardPos::Off(_) => {
                    draw_offboard(&mut s, &geometry, player_class(*side), *side, *count, &add_text)
                }
                _ => draw_checkers(
                    &mut s,
                    &geometry,
                    player_class(*side),
                    *pos,
                    *count,
                    &add_text,
                ),
            },
            DrawPrimitive::Arrow {
                from,
                from_height,
                to,
                to_height,
                style,
            } => {
                let (x1, y1) = geometry.checker_center(*from, *from_height);
                let (x2, y2) = geometry.checker_center(*to, *to_height);
                let points = arrow_polygon(x1, y1, x2, y2, 0.1, 0.0);
                s.push_str(&format!(
                    "<polygon points=\"{}\" class=\"{}\"/>",
                    polygon_attr(&points),
                    bem("arrow", style_modifier(*style))
                ));
            }
            DrawPrimitive::DoubleArrow {
                from,
                from_height,
                to,
                to_height,
                style,
            } => {
                let (x1, y1) = geometry.checker_center(*from, *from_height);
                let (x2, y2) = geometry.checker_center(*to, *to_height);
                let points = double_arrow_polygon(x1, y1, x2, y2);
                s.push_str(&format!(
                    "<polygon points=\"{}\" class=\"{}\"/>",
                    polygon_attr(&points),
                    bem("arrow", style_modifier(*style))
                ));
            }
            DrawPrimitive::Polygon { points, style } => {
                let resolved: Vec<_> = points
                    .iter()
                    .map(|(pos, height)| geometry.checker_center(*pos, *height))
                    .collect();
                let attr = polygon_attr(&resolved);
                // Two passes: a thick light outline first, so the shape
                // stays readable over points and checkers.
                s.push_str(&format!(
                    "<polygon points=\"{attr}\" class=\"{}\"/>",
                    bem("polygon", "outer")
                ));
                s.push_str(&format!(
                    "<polygon points=\"{attr}\" class=\"{}\"/>",
                    bem("polygon", style_modifier(*style))
                ));
            }
            DrawPrimitive::Text {
                pos,
                height,
                text,
                style,
            } => {
                let (x, y) = geometry.checker_center(*pos, *height);
                add_text(&mut s, x, y, text, style_modifier(*style));
            }
            DrawPrimitive::Dice { side, value, slot } => {
                draw_die(
                    &mut s,
                    &geometry,
                    player_class(*side),
                    *side,
                    *value,
                    *slot as i32,
                );
            }
            DrawPrimitive::Cube { value, owner, .. } => {
                let size = (CHECKER_SIZE * 0.4).round();
                let (cx, cy) = geometry.cube_center(*owner);
                s.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" ry=\"4\" class=\"{}\"/>",
                    cx - size,
                    cy - size,
                    size * 2.0,
                    size * 2.0,
                    bem("cube", "")
                ));
                add_text(&mut s, cx, cy, &value.to_string(), "");
            }
            DrawPrimitive::Score {
                side,
                score,
                length,
            } => {
                if !options.compact {
                    let (x, y) = geometry.score_anchor(*side);
                    let small = if *length > 10 { " small" } else { "" };
                    add_text(
                        &mut s,
                        x,
                        y,
                        &format!("{score}/{length}"),
                        &format!("{} score{small}", player_class(*side)),
                    );
                }
            }
            DrawPrimitive::PipCount { side, count } => {
                if !options.compact {
                    let (x, y) = geometry.pip_count_anchor(*side);
                    add_text(
                        &mut s,
                        x,
                        y,
                        &count.to_string(),
                        &format!("pipcount {}", player_class(*side)),
                    );
                }
            }
            DrawPrimitive::TurnIndicator { side } => {
                if !options.compact {
                    let (x, y) = geometry.turn_indicator_center(*side);
                    s.push_str(&format!(
                        "<circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" class=\"{}\"/>",
                        CHECKER_SIZE / 5.0,
                        bem("checker", player_class(*side))
                    ));
                }
            }
        }
    }

    s.push_str("</svg>");
    (s, out_w, out_h)
}

/// Background, playing area, the 24 points and the board frame.
fn draw_empty_board(
    s: &mut String,
    diagram: &Diagram,
    geometry: &Geometry,
    add_text: &dyn Fn(&mut String, f64, f64, &str, &str),
) {
    let hx = FULL_BOARD_WIDTH / 2.0;
    let hy = -BOARD_HEIGHT / 2.0;
    let view_height = if diagram.options.compact {
        BOARD_HEIGHT + 4.0 * BORDER_WIDTH
    } else {
        FULL_BOARD_HEIGHT
    };

    s.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" class=\"{}\"/>",
        -hx,
        -view_height / 2.0,
        FULL_BOARD_WIDTH,
        view_height,
        bem("background", "")
    ));
    s.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" class=\"{}\"/>",
        -hx,
        hy,
        FULL_BOARD_WIDTH,
        BOARD_HEIGHT,
        bem("board", "")
    ));

    let show_numbers = diagram.flags.point_numbers && !diagram.options.compact;
    for p in 1..=24u8 {
        draw_point(s, geometry, p, show_numbers, add_text);
    }

    let frame = |s: &mut String, x: f64, w: f64, modifiers: &str| {
        s.push_str(&format!(
            "<rect x=\"{x}\" y=\"{hy}\" width=\"{w}\" height=\"{}\" class=\"{}\"/>",
            BOARD_HEIGHT,
            bem("board-frame", modifiers)
        ));
    };
    frame(s, -BAR_WIDTH / 2.0, BAR_WIDTH, "");
    frame(s, -hx, SIDE_WIDTH, "");
    frame(s, hx - SIDE_WIDTH, SIDE_WIDTH, "");
    frame(s, -hx, FULL_BOARD_WIDTH, "nofill");
}

fn draw_point(
    s: &mut String,
    geometry: &Geometry,
    p: u8,
    show_number: bool,
    add_text: &dyn Fn(&mut String, f64, f64, &str, &str),
) {
    let p = p as i32;
    let lr = if (7..=18).contains(&p) { -1.0 } else { 1.0 };
    let edge = if p <= 12 { 1.0 } else { -1.0 };
    let x = (if p <= 12 { 6 - p } else { p - 19 }) as f64 * CHECKER_SIZE
        + lr * (BAR_WIDTH / 2.0 + BORDER_WIDTH);
    let sy = edge * POINT_GAP / 2.0;
    let ey = sy + edge * (POINT_HEIGHT - 1.0);

    s.push_str(&format!(
        "<polygon points=\"{x},{ey} {},{ey} {},{sy}\" class=\"{}\"/>",
        x + CHECKER_SIZE,
        x + CHECKER_SIZE / 2.0,
        bem("point", if p % 2 == 1 { "white" } else { "black" })
    ));

    if show_number {
        let label = geometry.display_point(p as u8).to_string();
        add_text(
            s,
            x + CHECKER_SIZE / 2.0,
            ey + edge * CHECKER_SIZE * 0.3,
            &label,
            "point",
        );
    }
}

/// A stack of round checkers; overlong stacks collapse into a count
/// label on the topmost drawn checker.
fn draw_checkers(
    s: &mut String,
    geometry: &Geometry,
    class: &str,
    pos: BoardPos,
    count: u8,
    add_text: &dyn Fn(&mut String, f64, f64, &str, &str),
) {
    // The bar has half a checker less headroom.
    let maxcount = match pos {
        BoardPos::Bar(_) => 4,
        _ => 5,
    };
    let r = CHECKER_SIZE / 2.0 - BORDER_WIDTH / 2.0 - 0.25;

    for c in 0..count {
        let (cx, cy) = geometry.checker_center(pos, c as f64);
        s.push_str(&format!(
            "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" class=\"{}\"/>",
            bem("checker", class)
        ));
        if c == maxcount - 1 && count > maxcount {
            add_text(s, cx, cy, &count.to_string(), &format!("checker--{class}"));
            break;
        }
    }
}

/// Borne-off checkers drawn as flat slabs in the side tray.
fn draw_offboard(
    s: &mut String,
    geometry: &Geometry,
    class: &str,
    side: Side,
    count: u8,
    add_text: &dyn Fn(&mut String, f64, f64, &str, &str),
) {
    let x = geometry.bearoff_side_x();
    let sign = side.sign() as f64;
    let y = sign * POINT_HEIGHT;
    let hsize = CHECKER_SIZE * 0.45;
    let vsize = CHECKER_SIZE * 0.10;
    let vstep = vsize * 2.0 + 4.0;

    for i in 0..count {
        s.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" ry=\"3\" class=\"{}\"/>",
            x - hsize,
            y - sign * (i as f64 - 1.0) * vstep - vsize,
            hsize * 2.0,
            vsize * 2.0,
            bem("checker", class)
        ));
    }
    add_text(
        s,
        x,
        y - sign * count as f64 * vstep,
        &count.to_string(),
        "offboard",
    );
}

fn draw_die(s: &mut String, geometry: &Geometry, class: &str, side: Side, value: u8, slot: i32) {
    let cx = geometry.dice_center_x(side, slot);
    let hsize = CHECKER_SIZE * 0.4;

    s.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" ry=\"{}\" class=\"{}\"/>",
        cx - hsize,
        -hsize,
        hsize * 2.0,
        hsize * 2.0,
        BORDER_WIDTH * 3.0,
        bem("dice", class)
    ));

    let mut dot = |x: f64, y: f64| {
        s.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" class=\"{}\"/>",
            cx + x * 10.0,
            y * 10.0,
            CHECKER_SIZE / 12.0,
            bem("dice-dot", class)
        ));
    };

    // The standard die faces decompose into four dot patterns.
    if value & 1 != 0 {
        dot(0.0, 0.0);
    }
    if value & 6 != 0 {
        dot(-1.0, -1.0);
        dot(1.0, 1.0);
    }
    if value & 4 != 0 {
        dot(-1.0, 1.0);
        dot(1.0, -1.0);
    }
    if value == 6 {
        dot(-1.0, 0.0);
        dot(1.0, 0.0);
    }
}
