// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export of a [`Scene`].
//!
//! Cards are written as `<g class="node …" transform="translate(x, y)">` groups
//! with their parts in card-local coordinates, so a stylesheet can target
//! `.node`, `.blood`, `.partner`, and `.family-<id>` the way a hand-written
//! page would.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use kintree_layout::CardKind;
use kurbo::{Affine, BezPath, PathEl, Point};
use peniko::Color;

use crate::config::SceneConfig;
use crate::element::{Avatar, Card, Connector, Element, ElementKind, LabelRole};
use crate::scene::Scene;

pub(crate) fn render_document(scene: &Scene, width: u32, height: u32, view: Affine) -> String {
    let config = scene.config();
    let mut body = String::new();
    let elements = scene.elements();
    let mut i = 0;
    while let Some(element) = elements.get(i) {
        i += 1;
        match &element.kind {
            ElementKind::Connector(connector) => write_connector(&mut body, connector, config),
            ElementKind::Card(card) => {
                let group = i - 1;
                write_card_open(&mut body, card);
                while let Some(part) = elements
                    .get(i)
                    .filter(|e| e.parent.is_some_and(|p| p.index() == group))
                {
                    write_part(&mut body, part, card, config);
                    i += 1;
                }
                body.push_str("</g>");
            }
            // Parts are written with their card.
            _ => {}
        }
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        svg,
        "<g id=\"viewport\" transform=\"{}\">",
        transform_attr(view)
    );
    svg.push_str(&body);
    svg.push_str("</g></svg>");
    svg
}

fn write_connector(out: &mut String, connector: &Connector, config: &SceneConfig) {
    let stroke = color_to_svg(config.connector_color);
    let width = fmt_num(config.connector_width);
    match connector {
        Connector::Elbow(path) => {
            let _ = write!(
                out,
                "<path class=\"edge blood\" d=\"{}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width}\"/>",
                bez_path_to_svg_d(path)
            );
        }
        Connector::Partner(line) => {
            let _ = write!(
                out,
                "<line class=\"edge partner\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{width}\" stroke-dasharray=\"{} {}\"/>",
                fmt_num(line.p0.x),
                fmt_num(line.p0.y),
                fmt_num(line.p1.x),
                fmt_num(line.p1.y),
                fmt_num(config.partner_dash[0]),
                fmt_num(config.partner_dash[1]),
            );
        }
    }
}

fn write_card_open(out: &mut String, card: &Card) {
    let kind = match card.kind {
        CardKind::Blood => "blood",
        CardKind::Partner => "partner",
    };
    let _ = write!(out, "<g class=\"node {kind}");
    if let Some(family) = &card.family {
        let _ = write!(out, " family-{}", escape(family.as_str()));
    }
    let _ = write!(
        out,
        "\" transform=\"translate({}, {})\" data-id=\"{}\" data-name=\"{}\" data-image=\"{}\">",
        fmt_num(card.rect.x0),
        fmt_num(card.rect.y0),
        escape(&card.id),
        escape(&card.label),
        escape(card.portrait.as_deref().unwrap_or_default()),
    );
}

fn write_part(out: &mut String, part: &Element, card: &Card, config: &SceneConfig) {
    let origin = card.rect.origin().to_vec2();
    let local = |pt: Point| pt - origin;
    match &part.kind {
        ElementKind::Background(rr) => {
            let fill = color_to_svg(config.card_fill);
            let stroke = color_to_svg(config.card_stroke);
            let _ = write!(
                out,
                "<rect class=\"card-bg\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\"/>",
                fmt_num(rr.width()),
                fmt_num(rr.height()),
                fmt_num(config.corner_radius),
            );
        }
        ElementKind::Avatar {
            circle,
            avatar,
            card: kind,
        } => {
            let c = local(circle.center);
            let r = circle.radius;
            match avatar {
                Avatar::Image(src) => {
                    let clip = format!("clip-{}", escape(&card.id));
                    let _ = write!(
                        out,
                        "<defs><clipPath id=\"{clip}\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\"/></clipPath></defs>",
                        fmt_num(c.x),
                        fmt_num(c.y),
                        fmt_num(r),
                    );
                    let _ = write!(
                        out,
                        "<image x=\"{}\" y=\"{}\" width=\"{d}\" height=\"{d}\" href=\"{}\" clip-path=\"url(#{clip})\" preserveAspectRatio=\"xMidYMid slice\"/>",
                        fmt_num(c.x - r),
                        fmt_num(c.y - r),
                        escape(src),
                        d = fmt_num(2.0 * r),
                    );
                }
                Avatar::Initials(text) => {
                    let (fill, text_fill) = match kind {
                        CardKind::Blood => (config.blood_avatar_fill, config.blood_avatar_text),
                        CardKind::Partner => {
                            (config.partner_avatar_fill, config.partner_avatar_text)
                        }
                    };
                    let fill = color_to_svg(fill);
                    let text_fill = color_to_svg(text_fill);
                    let _ = write!(
                        out,
                        "<circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"{fill}\"/><text x=\"{x}\" y=\"{y}\" dy=\"0.35em\" text-anchor=\"middle\" fill=\"{text_fill}\" font-size=\"{}px\" font-weight=\"bold\">{}</text>",
                        fmt_num(r),
                        fmt_num(config.initials_font_size),
                        escape(text),
                        x = fmt_num(c.x),
                        y = fmt_num(c.y),
                    );
                }
            }
        }
        ElementKind::Label {
            text, anchor, role, ..
        } => {
            let a = local(*anchor);
            let (class, color, weight) = match role {
                LabelRole::Name => ("name-label", config.label_color, ""),
                LabelRole::Family => (
                    "family-label",
                    config.family_label_color,
                    " font-weight=\"bold\"",
                ),
            };
            let fill = color_to_svg(color);
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" class=\"{class}\" text-anchor=\"middle\" fill=\"{fill}\" font-size=\"{}px\"{weight}>{}</text>",
                fmt_num(a.x),
                fmt_num(a.y),
                fmt_num(config.label_font_size),
                escape(text),
            );
        }
        ElementKind::Card(_) | ElementKind::Connector(_) => {}
    }
}

/// Formats `xf` as an SVG `transform` attribute value.
///
/// Translate + uniform scale is written as `translate(tx, ty) scale(s)`,
/// anything else as `matrix(a b c d e f)`. Hosts that update the viewport group
/// in place use this so the live attribute matches [`Scene::to_svg`].
pub fn transform_attr(xf: Affine) -> String {
    let [a, b, c, d, e, f] = xf.as_coeffs();
    if b == 0.0 && c == 0.0 && a == d {
        format!(
            "translate({}, {}) scale({})",
            fmt_num(e),
            fmt_num(f),
            fmt_num(a)
        )
    } else {
        format!(
            "matrix({} {} {} {} {} {})",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f),
        )
    }
}

/// Path data for a connector polyline.
///
/// Connectors only hold move and line segments; a curved segment would be
/// written as the chord to its end point.
fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        if !d.is_empty() {
            d.push(' ');
        }
        let cmd = match el {
            PathEl::ClosePath => {
                d.push('Z');
                continue;
            }
            PathEl::MoveTo(_) => 'M',
            _ => 'L',
        };
        if let Some(p) = el.end_point() {
            let _ = write!(d, "{cmd}{} {}", fmt_num(p.x), fmt_num(p.y));
        }
    }
    d
}

fn color_to_svg(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, BezPath, Vec2};

    use super::{bez_path_to_svg_d, escape, fmt_num, transform_attr};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn transform_attr_prefers_translate_scale() {
        let xf = Affine::translate(Vec2::new(325.0, 0.0)) * Affine::scale(1.5);
        assert_eq!(transform_attr(xf), "translate(325, 0) scale(1.5)");
        assert_eq!(
            transform_attr(Affine::scale_non_uniform(2.0, 3.0)),
            "matrix(2 0 0 3 0 0)"
        );
    }

    #[test]
    fn path_data() {
        let mut path = BezPath::new();
        path.move_to((75.0, 170.0));
        path.line_to((75.0, 210.0));
        path.line_to((165.0, 210.0));
        assert_eq!(bez_path_to_svg_d(&path), "M75 170 L75 210 L165 210");

        path.quad_to((200.0, 210.0), (200.0, 250.0));
        path.close_path();
        assert_eq!(
            bez_path_to_svg_d(&path),
            "M75 170 L75 210 L165 210 L200 250 Z"
        );
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("Tom & \"Jerry\" <3"), "Tom &amp; &quot;Jerry&quot; &lt;3");
    }
}
