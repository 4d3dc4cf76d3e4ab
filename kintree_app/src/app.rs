// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kintree_layout::{LayoutConfig, compute_layout};
use kintree_record::{BirthDate, PersonNode};
use kintree_scene::{ProfilePanel, Scene, SceneConfig};
use kintree_view::{InputEvent, TouchPhase, TreeViewController, ViewConfig};
use kurbo::{Affine, Point, Rect, Size};

/// Size of the profile popup content, centered in the view.
const PROFILE_SIZE: Size = Size::new(320.0, 420.0);

/// Configuration for every stage of the application.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
    /// Card sizes and spacing.
    pub layout: LayoutConfig,
    /// Gesture tuning.
    pub view: ViewConfig,
    /// Drawing sizes and colours.
    pub scene: SceneConfig,
}

/// What the host must update after an event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AppEffects {
    /// New transform for the viewport group, if it changed.
    pub transform: Option<Affine>,
    /// The profile popup opened, closed, or changed person.
    pub profile_changed: bool,
}

/// A family tree view: record, drawn scene, camera, and profile popup.
///
/// The scene is built once. Input only moves the camera or opens and closes
/// the popup.
#[derive(Debug)]
pub struct App {
    record: PersonNode,
    scene: Scene,
    view: TreeViewController,
    profile: ProfilePanel,
    view_size: Size,
}

impl App {
    /// Lays out `record`, builds its scene with ages as of `today`, and
    /// centers it in a view of `view_size`.
    ///
    /// The record is assumed to be validated; see [`load_record`](crate::load_record).
    #[must_use]
    pub fn new(record: PersonNode, config: &AppConfig, view_size: Size, today: BirthDate) -> Self {
        let layout = compute_layout(&record, &config.layout);
        let scene = Scene::build(&layout, &config.scene, today);
        let mut view = TreeViewController::new(config.view);
        view.center_on(scene.bounds(), view_size);
        log::info!(
            "showing {} people in a {}x{} view",
            layout.node_count(),
            view_size.width,
            view_size.height
        );
        Self {
            record,
            scene,
            view,
            profile: ProfilePanel::new(profile_rect(view_size)),
            view_size,
        }
    }

    /// The record being shown.
    #[must_use]
    pub fn record(&self) -> &PersonNode {
        &self.record
    }

    /// The drawn tree.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera.
    #[must_use]
    pub fn controller(&self) -> &TreeViewController {
        &self.view
    }

    /// The profile popup.
    #[must_use]
    pub fn profile(&self) -> &ProfilePanel {
        &self.profile
    }

    /// Current viewport transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.view.transform()
    }

    /// Size of the view.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Records a new view size. The camera keeps its transform; double click
    /// recenters for the new size.
    pub fn resize(&mut self, view_size: Size) {
        self.view_size = view_size;
        self.profile.set_content_rect(profile_rect(view_size));
        let current = self.view.viewport();
        self.view.center_on(self.scene.bounds(), view_size);
        self.view.set_viewport(current);
    }

    /// Serializes the whole view as SVG at the current transform.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.scene.to_svg(
            dimension(self.view_size.width),
            dimension(self.view_size.height),
            self.transform(),
        )
    }

    /// Applies one input event.
    ///
    /// While the profile popup is open it sits over the tree: presses go to
    /// the popup (closing it when outside its content) and nothing reaches
    /// the camera. Otherwise the event drives the camera, and a tap on a card
    /// opens that card's profile.
    pub fn handle(&mut self, event: &InputEvent) -> AppEffects {
        if self.profile.is_open() {
            let press = match event {
                InputEvent::PointerDown { position } => Some(*position),
                InputEvent::Touch {
                    phase: TouchPhase::Start,
                    contacts,
                } => contacts.first().copied(),
                _ => None,
            };
            return AppEffects {
                transform: None,
                profile_changed: press.is_some_and(|pt| self.profile.click(pt)),
            };
        }

        let response = self.view.handle(event);
        let mut effects = AppEffects {
            transform: response.transform_changed.then(|| self.view.transform()),
            profile_changed: false,
        };
        if let Some(tap) = response.tap {
            effects.profile_changed = self.tap(tap);
        }
        effects
    }

    /// Closes the profile popup through its close control.
    pub fn close_profile(&mut self) -> AppEffects {
        AppEffects {
            transform: None,
            profile_changed: self.profile.close(),
        }
    }

    fn tap(&mut self, at: Point) -> bool {
        let content = self.view.view_to_content(at);
        match self.scene.card_at(content) {
            Some(card) => {
                log::debug!("tap at {at:?} hit card {:?}", card.id);
                self.profile.open_card(&card);
                true
            }
            None => false,
        }
    }
}

fn profile_rect(view_size: Size) -> Rect {
    let size = Size::new(
        PROFILE_SIZE.width.min(view_size.width),
        PROFILE_SIZE.height.min(view_size.height),
    );
    let origin = Point::new(
        (view_size.width - size.width) / 2.0,
        (view_size.height - size.height) / 2.0,
    );
    Rect::from_origin_size(origin, size)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "view sizes are small pixel counts"
)]
fn dimension(v: f64) -> u32 {
    v.max(0.0).round() as u32
}
