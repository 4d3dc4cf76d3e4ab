// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior: loading, taps opening profiles, and the popup.

use kintree_app::{App, AppConfig, LoadError, demo_record, load_record};
use kintree_record::{BirthDate, PersonNode, RecordError};
use kintree_scene::Avatar;
use kintree_view::{InputEvent, ViewportState};
use kurbo::{Point, Size, Vec2};

fn today() -> BirthDate {
    BirthDate::new(2025, 6, 1).unwrap()
}

fn couple_app() -> App {
    let record = PersonNode::new("a", "Ann")
        .with_partner("Bob")
        .with_portrait("assets/ann.png");
    App::new(record, &AppConfig::default(), Size::new(1000.0, 800.0), today())
}

fn click(app: &mut App, x: f64, y: f64) -> bool {
    let position = Point::new(x, y);
    let down = app.handle(&InputEvent::PointerDown { position });
    let up = app.handle(&InputEvent::PointerUp { position });
    down.profile_changed || up.profile_changed
}

#[test]
fn demo_record_loads_and_validates() {
    let record = demo_record().unwrap();
    assert_eq!(record.id, "chiu_sau_ying");
    assert_eq!(record.node_count(), 23);
    let baby = record.find("baby").unwrap();
    assert_eq!(baby.portrait(), None);
}

#[test]
fn demo_scene_has_family_labels_and_ages() {
    let app = App::new(
        demo_record().unwrap(),
        &AppConfig::default(),
        Size::new(1200.0, 800.0),
        today(),
    );
    let svg = app.to_svg();
    for label in ["Chu Family", "Tong Family", "To Family"] {
        assert!(svg.contains(&format!(">{label}</text>")), "missing {label}");
    }
    assert_eq!(app.scene().card("alana").unwrap().label, "Alana (10)");
    assert_eq!(app.scene().card("marina").unwrap().label, "Marina (8)");
    assert_eq!(
        app.scene().card("baby").unwrap().avatar,
        Avatar::Initials("B".into())
    );
    assert_eq!(
        app.scene().card("wai_leen_partner").unwrap().label,
        "Alan"
    );
}

#[test]
fn load_errors_are_reported() {
    assert!(matches!(load_record("{"), Err(LoadError::Json(_))));
    assert!(matches!(
        load_record(r#"{"id": "a", "name": "A", "birthday": "2/30/2020"}"#),
        Err(LoadError::Json(_))
    ));
    let duplicate = r#"{"id": "a", "name": "A", "children": [{"id": "a", "name": "B"}]}"#;
    match load_record(duplicate) {
        Err(LoadError::Record(RecordError::DuplicateId { id })) => assert_eq!(id, "a"),
        other => panic!("expected a duplicate id error, got {other:?}"),
    }
    let err = load_record(duplicate).unwrap_err();
    assert!(err.to_string().starts_with("invalid family record"));
    assert!(std::error::Error::source(&err).is_some());

    let shadowed = r#"{"id": "a", "name": "Ann", "partner": "Bob",
        "children": [{"id": "a_partner", "name": "Carl"}]}"#;
    match load_record(shadowed) {
        Err(LoadError::Record(RecordError::PartnerIdTaken { id })) => assert_eq!(id, "a_partner"),
        other => panic!("expected a partner id clash, got {other:?}"),
    }
}

#[test]
fn starts_centered() {
    let app = couple_app();
    // Bounds (0, 50, 330, 170) in a 1000 wide view, top edge 50 px down.
    assert_eq!(
        app.controller().viewport(),
        ViewportState::new(Vec2::new(335.0, 0.0), 1.0)
    );
}

#[test]
fn tap_on_card_opens_profile() {
    let mut app = couple_app();
    assert!(click(&mut app, 410.0, 100.0));
    let view = app.profile().view().unwrap();
    assert_eq!(view.name, "Ann");
    assert_eq!(view.avatar, Avatar::Image("assets/ann.png".into()));

    // Close through the close control.
    assert!(app.close_profile().profile_changed);
    assert!(!app.profile().is_open());

    assert!(click(&mut app, 590.0, 100.0));
    let view = app.profile().view().unwrap();
    assert_eq!(view.name, "Bob");
    assert_eq!(view.avatar, Avatar::Initials("B".into()));
}

#[test]
fn tap_on_empty_space_does_nothing() {
    let mut app = couple_app();
    assert!(!click(&mut app, 50.0, 600.0));
    assert!(!app.profile().is_open());
}

#[test]
fn drag_over_card_does_not_open_profile() {
    let mut app = couple_app();
    app.handle(&InputEvent::PointerDown {
        position: Point::new(410.0, 100.0),
    });
    let moved = app.handle(&InputEvent::PointerMove {
        position: Point::new(450.0, 100.0),
    });
    assert!(moved.transform.is_some());
    let up = app.handle(&InputEvent::PointerUp {
        position: Point::new(450.0, 100.0),
    });
    assert!(!up.profile_changed);
    assert!(!app.profile().is_open());
}

#[test]
fn open_profile_blocks_the_camera_until_backdrop_click() {
    let mut app = couple_app();
    assert!(click(&mut app, 410.0, 100.0));
    let before = app.controller().viewport();

    let wheel = app.handle(&InputEvent::Wheel {
        position: Point::new(500.0, 400.0),
        delta_y: -1.0,
    });
    assert_eq!(wheel.transform, None);
    assert_eq!(app.controller().viewport(), before);

    // Inside the popup content: stays open.
    assert!(!click(&mut app, 500.0, 400.0));
    assert!(app.profile().is_open());

    // On the backdrop: closes, and the release does not reopen anything.
    assert!(click(&mut app, 10.0, 10.0));
    assert!(!app.profile().is_open());
}

#[test]
fn double_click_returns_to_the_centered_view() {
    let mut app = couple_app();
    let home = app.controller().viewport();
    app.handle(&InputEvent::Wheel {
        position: Point::new(100.0, 100.0),
        delta_y: -1.0,
    });
    assert_ne!(app.controller().viewport(), home);
    let effects = app.handle(&InputEvent::DoubleClick {
        position: Point::new(100.0, 100.0),
    });
    assert!(effects.transform.is_some());
    assert_eq!(app.controller().viewport(), home);
}

#[test]
fn resize_keeps_the_camera_and_moves_home() {
    let mut app = couple_app();
    let before = app.controller().viewport();
    app.resize(Size::new(600.0, 400.0));
    assert_eq!(app.controller().viewport(), before);
    assert_eq!(app.view_size(), Size::new(600.0, 400.0));
    assert!(
        app.to_svg()
            .contains("width=\"600\" height=\"400\" viewBox=\"0 0 600 400\""),
        "svg root follows the new size"
    );
    app.handle(&InputEvent::DoubleClick {
        position: Point::ORIGIN,
    });
    assert_eq!(
        app.controller().viewport(),
        ViewportState::new(Vec2::new(135.0, 0.0), 1.0)
    );
}
