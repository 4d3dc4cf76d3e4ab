// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elements of a drawn tree: cards, their parts, and connectors.

use alloc::string::String;

use kintree_layout::CardKind;
use kintree_record::FamilyGroupId;
use kurbo::{BezPath, Circle, Line, Point, Rect, RoundedRect, Shape};

/// Index of an element within its [`Scene`](crate::Scene).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Position of the element in draw order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

bitflags::bitflags! {
    /// Element flags controlling drawing and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is drawn.
        const VISIBLE  = 0b0000_0001;
        /// Element participates in hit testing.
        const PICKABLE = 0b0000_0010;
    }
}

/// What a card's avatar shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Avatar {
    /// A portrait loaded from the given reference.
    Image(String),
    /// Up to two initials on a coloured disc.
    Initials(String),
}

impl Avatar {
    /// Portrait when `portrait` is present, initials of `name` otherwise.
    #[must_use]
    pub fn for_person(name: &str, portrait: Option<&str>) -> Self {
        match portrait {
            Some(src) => Self::Image(src.into()),
            None => Self::Initials(kintree_record::initials(name)),
        }
    }
}

/// One person's card.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// Card identifier: the person id, with `_partner` appended for partner cards.
    pub id: String,
    /// Id of the record node the card belongs to.
    pub person_id: String,
    /// Blood relative or partner.
    pub kind: CardKind,
    /// Person's name, without age.
    pub name: String,
    /// Text shown on the card.
    pub label: String,
    /// Portrait reference, when one is usable.
    pub portrait: Option<String>,
    /// What the avatar shows.
    pub avatar: Avatar,
    /// Family group the card is styled with, inherited from the nearest head.
    pub family: Option<FamilyGroupId>,
    /// Card extent in content space.
    pub rect: Rect,
}

/// Which text a [`ElementKind::Label`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LabelRole {
    /// Name (and age) at the bottom of the card.
    Name,
    /// Family group label above a group head's card.
    Family,
}

/// Lines joining cards.
#[derive(Clone, Debug, PartialEq)]
pub enum Connector {
    /// Orthogonal parent → child path: down, across, down.
    Elbow(BezPath),
    /// Dashed line from a blood relative to their partner.
    Partner(Line),
}

/// Drawable content of an element.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Group holding one card's parts. Draws nothing itself.
    Card(Card),
    /// Rounded card background.
    Background(RoundedRect),
    /// Circular avatar.
    Avatar {
        /// Disc in content space.
        circle: Circle,
        /// Image or initials.
        avatar: Avatar,
        /// Kind of the owning card, which picks the initials colours.
        card: CardKind,
    },
    /// Centered text.
    Label {
        /// Text to draw.
        text: String,
        /// Baseline center.
        anchor: Point,
        /// Pickable extent.
        extent: Rect,
        /// Name or family label.
        role: LabelRole,
    },
    /// Parent → child or partner connector.
    Connector(Connector),
}

/// A node in the scene's element tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Enclosing element, if any.
    pub parent: Option<ElementId>,
    /// Drawing and picking flags.
    pub flags: ElementFlags,
    /// What to draw.
    pub kind: ElementKind,
}

impl Element {
    /// Returns `true` if `pt` (content space) is over this element's drawn shape.
    ///
    /// Card groups and connectors have no area.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match &self.kind {
            ElementKind::Background(rr) => rr.contains(pt),
            ElementKind::Avatar { circle, .. } => circle.contains(pt),
            ElementKind::Label { extent, .. } => extent.contains(pt),
            ElementKind::Card(_) | ElementKind::Connector(_) => false,
        }
    }

    /// Returns the card if this element is a card group.
    #[must_use]
    pub fn as_card(&self) -> Option<&Card> {
        match &self.kind {
            ElementKind::Card(card) => Some(card),
            _ => None,
        }
    }
}
