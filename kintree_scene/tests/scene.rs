// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene construction, tap resolution, and SVG export.

use kintree_layout::{CardKind, LayoutConfig, compute_forest, compute_layout};
use kintree_record::{BirthDate, PersonNode};
use kintree_scene::{Avatar, Connector, ElementKind, LabelRole, Scene, SceneConfig};
use kurbo::{Affine, PathEl, Point, Vec2};

fn today() -> BirthDate {
    BirthDate::new(2025, 6, 1).unwrap()
}

/// Ann + Bob (Chu family head) with one child, Cat.
fn family() -> PersonNode {
    PersonNode::new("a", "Ann")
        .with_partner("Bob")
        .with_portrait("assets/ann.png")
        .with_family_group("chu")
        .with_child(
            PersonNode::new("c", "Cat")
                .with_birth_date(BirthDate::new(2015, 1, 16).unwrap())
                .with_portrait(""),
        )
}

fn scene_for(tree: &PersonNode) -> Scene {
    let layout = compute_layout(tree, &LayoutConfig::default());
    Scene::build(&layout, &SceneConfig::default(), today())
}

#[test]
fn connectors_are_elbows_and_dashed_partner_lines() {
    let tree = family();
    let scene = scene_for(&tree);
    let connectors: Vec<_> = scene.connectors().collect();
    assert_eq!(connectors.len(), 2);

    let Connector::Partner(line) = connectors[0] else {
        panic!("expected the partner line first, got {:?}", connectors[0]);
    };
    assert_eq!(line.p0, Point::new(150.0, 110.0));
    assert_eq!(line.p1, Point::new(180.0, 110.0));

    let Connector::Elbow(path) = connectors[1] else {
        panic!("expected an elbow, got {:?}", connectors[1]);
    };
    let points: Vec<Point> = path
        .elements()
        .iter()
        .map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => *p,
            other => panic!("unexpected path element {other:?}"),
        })
        .collect();
    assert_eq!(
        points,
        [
            Point::new(75.0, 170.0),
            Point::new(75.0, 210.0),
            Point::new(165.0, 210.0),
            Point::new(165.0, 250.0),
        ]
    );
}

#[test]
fn cards_carry_labels_avatars_and_inherited_family() {
    let tree = family();
    let scene = scene_for(&tree);
    let cards: Vec<_> = scene.cards().collect();
    assert_eq!(cards.len(), 3);

    let ann = scene.card("a").unwrap();
    assert_eq!(ann.kind, CardKind::Blood);
    assert_eq!(ann.avatar, Avatar::Image("assets/ann.png".into()));
    assert_eq!(ann.family.as_ref().map(|f| f.as_str()), Some("chu"));

    let bob = scene.card("a_partner").unwrap();
    assert_eq!(bob.kind, CardKind::Partner);
    assert_eq!(bob.person_id, "a");
    assert_eq!(bob.avatar, Avatar::Initials("B".into()));
    assert_eq!(bob.family.as_ref().map(|f| f.as_str()), Some("chu"));

    let cat = scene.card("c").unwrap();
    assert_eq!(cat.label, "Cat (10)");
    assert_eq!(cat.name, "Cat");
    assert_eq!(cat.portrait, None);
    assert_eq!(cat.avatar, Avatar::Initials("C".into()));
    assert_eq!(cat.family.as_ref().map(|f| f.as_str()), Some("chu"));
}

#[test]
fn only_group_heads_get_a_family_label() {
    let tree = family();
    let scene = scene_for(&tree);
    let labels: Vec<_> = scene
        .elements()
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Label {
                text,
                anchor,
                role: LabelRole::Family,
                ..
            } => Some((text.as_str(), *anchor, e.parent)),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].0, "Chu Family");
    assert_eq!(labels[0].1, Point::new(75.0, 34.0));
    assert_eq!(labels[0].2, scene.card_element("a"));
}

#[test]
fn taps_resolve_through_parts_to_their_card() {
    let tree = family();
    let scene = scene_for(&tree);

    // Avatar, background, name label, and family label all belong to Ann.
    for pt in [(75.0, 100.0), (140.0, 80.0), (75.0, 150.0), (75.0, 30.0)] {
        let card = scene.card_at(Point::new(pt.0, pt.1)).unwrap();
        assert_eq!(card.id, "a", "tap at {pt:?}");
        assert_eq!(card.name, "Ann");
        assert_eq!(card.portrait, Some("assets/ann.png"));
    }

    let bob = scene.card_at(Point::new(255.0, 100.0)).unwrap();
    assert_eq!(bob.id, "a_partner");
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.portrait, None);

    let cat = scene.card_at(Point::new(165.0, 300.0)).unwrap();
    assert_eq!(cat.name, "Cat (10)");
}

#[test]
fn misses_background_and_connectors_and_rounded_corners() {
    let tree = family();
    let scene = scene_for(&tree);
    // Between the cards, on the partner connector.
    assert_eq!(scene.hit_test(Point::new(165.0, 110.0)), None);
    // On the elbow's horizontal run.
    assert_eq!(scene.hit_test(Point::new(120.0, 210.0)), None);
    // Outside the rounded top-left corner, inside the square rect.
    assert_eq!(scene.hit_test(Point::new(1.0, 51.0)), None);
    assert!(scene.hit_test(Point::new(16.0, 51.0)).is_some());
}

#[test]
fn svg_has_one_viewport_group_and_card_groups() {
    let tree = family();
    let scene = scene_for(&tree);
    let view = Affine::translate(Vec2::new(325.0, 0.0)) * Affine::scale(1.0);
    let svg = scene.to_svg(1000, 800, view);

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1000\" height=\"800\""));
    assert_eq!(svg.matches("id=\"viewport\"").count(), 1);
    assert!(svg.contains("<g id=\"viewport\" transform=\"translate(325, 0) scale(1)\">"));
    assert!(svg.contains(
        "<g class=\"node blood family-chu\" transform=\"translate(0, 50)\" data-id=\"a\" data-name=\"Ann\""
    ));
    assert!(svg.contains("<g class=\"node partner family-chu\" transform=\"translate(180, 50)\""));
    assert!(svg.contains("<g class=\"node blood family-chu\" transform=\"translate(90, 250)\""));
    assert!(svg.contains("d=\"M75 170 L75 210 L165 210 L165 250\""));
    assert!(svg.contains("stroke-dasharray=\"6 4\""));
    assert!(svg.contains("href=\"assets/ann.png\" clip-path=\"url(#clip-a)\""));
    assert!(svg.contains(">Chu Family</text>"));
    assert!(svg.contains(">Cat (10)</text>"));
    // Cat's empty portrait falls back to initials rather than an empty image.
    assert!(svg.contains(">C</text>"));
    assert!(!svg.contains("href=\"\""));
    assert!(svg.ends_with("</g></svg>"));
}

#[test]
fn svg_escapes_names() {
    let tree = PersonNode::new("x", "Tom & Jerry").with_partner("<Spike>");
    let svg = scene_for(&tree).to_svg(100, 100, Affine::IDENTITY);
    assert!(svg.contains(">Tom &amp; Jerry</text>"));
    assert!(svg.contains(">&lt;Spike&gt;</text>"));
}

#[test]
fn forest_scene_covers_every_root() {
    let roots = [PersonNode::new("a", "Ann"), PersonNode::new("b", "Ben Ho")];
    let forest = compute_forest(&roots, &LayoutConfig::default());
    let scene = Scene::build_forest(&forest, &SceneConfig::default(), today());
    assert_eq!(scene.cards().count(), 2);
    assert_eq!(scene.bounds(), forest.bounds);
    assert_eq!(scene.card_at(Point::new(275.0, 100.0)).map(|c| c.id), Some("b"));
    assert_eq!(
        scene.card("b").map(|c| c.avatar.clone()),
        Some(Avatar::Initials("BH".into()))
    );
}
