// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profile popup model.
//!
//! The popup shows one person's name and their portrait, or their initials
//! when there is no usable portrait. It closes through its close control or a
//! click on the backdrop outside its content.

use alloc::string::String;

use kurbo::{Point, Rect};

use crate::element::Avatar;
use crate::scene::CardInfo;

/// What an open popup displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    /// Name as shown on the card.
    pub name: String,
    /// Portrait or initials.
    pub avatar: Avatar,
}

/// State of the profile popup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePanel {
    content: Rect,
    open: Option<ProfileView>,
}

impl ProfilePanel {
    /// Creates a closed panel whose content occupies `content` (view space).
    #[must_use]
    pub fn new(content: Rect) -> Self {
        Self {
            content,
            open: None,
        }
    }

    /// Moves the popup content, for example after the host resized.
    pub fn set_content_rect(&mut self, content: Rect) {
        self.content = content;
    }

    /// Popup content rect in view space.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.content
    }

    /// Shows `name` with `portrait`, falling back to the initials of `name`.
    ///
    /// Blank portraits and the literal `undefined` count as absent.
    pub fn open(&mut self, name: &str, portrait: Option<&str>) {
        let portrait = portrait
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "undefined");
        self.show(ProfileView {
            name: name.into(),
            avatar: Avatar::for_person(name, portrait),
        });
    }

    /// Shows the person behind a tapped card, with the card's avatar.
    pub fn open_card(&mut self, card: &CardInfo<'_>) {
        self.show(ProfileView {
            name: card.name.into(),
            avatar: card.avatar.clone(),
        });
    }

    fn show(&mut self, view: ProfileView) {
        log::debug!("opening profile for {:?}", view.name);
        self.open = Some(view);
    }

    /// Hides the popup. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Handles a click while the popup may be open.
    ///
    /// A click outside the content closes the popup and returns `true`.
    /// Clicks inside the content, or while closed, do nothing.
    pub fn click(&mut self, pt: Point) -> bool {
        if self.open.is_some() && !self.content.contains(pt) {
            return self.close();
        }
        false
    }

    /// Returns `true` while the popup is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// What the popup currently shows.
    #[must_use]
    pub fn view(&self) -> Option<&ProfileView> {
        self.open.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::ProfilePanel;
    use crate::Avatar;

    fn panel() -> ProfilePanel {
        ProfilePanel::new(Rect::new(100.0, 100.0, 400.0, 500.0))
    }

    #[test]
    fn portrait_or_initials() {
        let mut p = panel();
        p.open("Wai Lin", Some("assets/wai_leen.png"));
        assert_eq!(
            p.view().map(|v| &v.avatar),
            Some(&Avatar::Image("assets/wai_leen.png".into()))
        );
        for missing in [None, Some(""), Some("  "), Some("undefined")] {
            p.open("Wai Lin", missing);
            assert_eq!(
                p.view().map(|v| &v.avatar),
                Some(&Avatar::Initials("WL".into()))
            );
        }
    }

    #[test]
    fn backdrop_click_closes_content_click_does_not() {
        let mut p = panel();
        assert!(!p.click(Point::new(0.0, 0.0)));
        p.open("Felix", None);
        assert!(!p.click(Point::new(200.0, 200.0)));
        assert!(p.is_open());
        assert!(p.click(Point::new(50.0, 50.0)));
        assert!(!p.is_open());
        assert!(!p.close());
    }
}
