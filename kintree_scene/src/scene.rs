// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kintree_layout::{CardKind, Forest, Layout, LayoutConfig, LayoutNode};
use kintree_record::{BirthDate, FamilyGroupId};
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, RoundedRect};

use crate::config::SceneConfig;
use crate::element::{
    Avatar, Card, Connector, Element, ElementFlags, ElementId, ElementKind, LabelRole,
};

/// What a tap on a card resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardInfo<'a> {
    /// Card identifier.
    pub id: &'a str,
    /// Text shown on the card, including the age when known.
    pub name: &'a str,
    /// Portrait reference, when one is usable.
    pub portrait: Option<&'a str>,
    /// What the card's avatar shows.
    pub avatar: &'a Avatar,
}

/// A laid-out tree turned into drawable elements.
///
/// Elements are stored in draw order: all connectors, then each card group
/// followed by its parts. Every part's parent is its card group.
#[derive(Clone, Debug)]
pub struct Scene {
    elements: Vec<Element>,
    cards: HashMap<String, ElementId>,
    bounds: Rect,
    config: SceneConfig,
}

impl Scene {
    /// Builds the scene for `layout`, with ages computed as of `today`.
    #[must_use]
    pub fn build(layout: &Layout<'_>, config: &SceneConfig, today: BirthDate) -> Self {
        Self::from_roots(
            core::slice::from_ref(&layout.root),
            &layout.config,
            layout.bounds,
            config,
            today,
        )
    }

    /// Builds the scene for every tree in `forest`.
    #[must_use]
    pub fn build_forest(forest: &Forest<'_>, config: &SceneConfig, today: BirthDate) -> Self {
        Self::from_roots(&forest.roots, &forest.config, forest.bounds, config, today)
    }

    fn from_roots(
        roots: &[LayoutNode<'_>],
        layout: &LayoutConfig,
        bounds: Rect,
        config: &SceneConfig,
        today: BirthDate,
    ) -> Self {
        let mut builder = Builder {
            layout,
            config,
            today,
            elements: Vec::new(),
            cards: HashMap::new(),
        };
        for root in roots {
            for node in root.iter() {
                builder.connectors(node);
            }
        }
        for root in roots {
            builder.cards(root, None);
        }
        log::debug!(
            "built scene: {} elements, {} cards",
            builder.elements.len(),
            builder.cards.len()
        );
        Self {
            elements: builder.elements,
            cards: builder.cards,
            bounds,
            config: config.clone(),
        }
    }

    /// All elements in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Looks up an element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Bounding box of all cards.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Configuration the scene was built with.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Cards in draw order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.elements.iter().filter_map(Element::as_card)
    }

    /// Connectors in draw order.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.elements.iter().filter_map(|e| match &e.kind {
            ElementKind::Connector(c) => Some(c),
            _ => None,
        })
    }

    /// Finds the card group element with card identifier `id`.
    #[must_use]
    pub fn card_element(&self, id: &str) -> Option<ElementId> {
        self.cards.get(id).copied()
    }

    /// Finds a card by identifier.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.card_element(id)
            .and_then(|e| self.element(e))
            .and_then(Element::as_card)
    }

    /// `id` followed by each of its ancestors, innermost first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut next = self.element(id).map(|_| id);
        core::iter::from_fn(move || {
            let current = next?;
            next = self.element(current).and_then(|e| e.parent);
            Some(current)
        })
    }

    /// Topmost pickable element whose shape contains `pt` (content space).
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| {
                e.flags
                    .contains(ElementFlags::VISIBLE | ElementFlags::PICKABLE)
                    && e.contains(pt)
            })
            .map(|(i, _)| ElementId(i))
    }

    /// Walks up from `id` to the nearest enclosing card.
    #[must_use]
    pub fn resolve_card(&self, id: ElementId) -> Option<CardInfo<'_>> {
        let card = self
            .ancestors(id)
            .find_map(|a| self.element(a).and_then(Element::as_card))?;
        Some(CardInfo {
            id: &card.id,
            name: &card.label,
            portrait: card.portrait.as_deref(),
            avatar: &card.avatar,
        })
    }

    /// Card under `pt` (content space), if any.
    #[must_use]
    pub fn card_at(&self, pt: Point) -> Option<CardInfo<'_>> {
        self.hit_test(pt).and_then(|id| self.resolve_card(id))
    }

    /// Serializes the scene as an SVG document of `width` x `height` whose
    /// content sits in a single `<g id="viewport">` transformed by `view`.
    #[must_use]
    pub fn to_svg(&self, width: u32, height: u32, view: Affine) -> String {
        crate::svg::render_document(self, width, height, view)
    }
}

struct Builder<'c> {
    layout: &'c LayoutConfig,
    config: &'c SceneConfig,
    today: BirthDate,
    elements: Vec<Element>,
    cards: HashMap<String, ElementId>,
}

impl Builder<'_> {
    fn push(&mut self, parent: Option<ElementId>, flags: ElementFlags, kind: ElementKind) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            parent,
            flags,
            kind,
        });
        id
    }

    fn connectors(&mut self, node: &LayoutNode<'_>) {
        let w = self.layout.card_width;
        let h = self.layout.card_height;
        if let Some(partner) = node.partner_position {
            let line = Line::new(
                (node.position.x + w, node.position.y + h / 2.0),
                (partner.x, partner.y + h / 2.0),
            );
            self.push(
                None,
                ElementFlags::VISIBLE,
                ElementKind::Connector(Connector::Partner(line)),
            );
        }
        let source = Point::new(node.card_center_x(self.layout), node.position.y + h);
        let mid_y = source.y + self.config.connector_drop;
        for child in &node.children {
            let target = Point::new(child.card_center_x(self.layout), child.position.y);
            let mut path = BezPath::new();
            path.move_to(source);
            path.line_to((source.x, mid_y));
            path.line_to((target.x, mid_y));
            path.line_to(target);
            self.push(
                None,
                ElementFlags::VISIBLE,
                ElementKind::Connector(Connector::Elbow(path)),
            );
        }
    }

    fn cards(&mut self, node: &LayoutNode<'_>, inherited: Option<&FamilyGroupId>) {
        let person = node.person;
        let head = person.family_group_id.as_ref();
        let family = head.or(inherited);
        let size = self.layout.card_size();

        let blood = Card {
            id: person.id.clone(),
            person_id: person.id.clone(),
            kind: CardKind::Blood,
            name: person.name.clone(),
            label: person.display_label(self.today),
            portrait: person.portrait().map(String::from),
            avatar: Avatar::for_person(&person.name, person.portrait()),
            family: family.cloned(),
            rect: Rect::from_origin_size(node.position, size),
        };
        self.card(blood, head.and_then(FamilyGroupId::label));

        if let (Some(name), Some(id), Some(pos)) = (
            person.partner(),
            person.partner_card_id(),
            node.partner_position,
        ) {
            let partner = Card {
                id,
                person_id: person.id.clone(),
                kind: CardKind::Partner,
                name: name.into(),
                label: name.into(),
                portrait: person.partner_portrait().map(String::from),
                avatar: Avatar::for_person(name, person.partner_portrait()),
                family: family.cloned(),
                rect: Rect::from_origin_size(pos, size),
            };
            self.card(partner, None);
        }

        for child in &node.children {
            self.cards(child, family);
        }
    }

    fn card(&mut self, card: Card, family_label: Option<String>) {
        let rect = card.rect;
        let kind = card.kind;
        let avatar = card.avatar.clone();
        let label = card.label.clone();
        let card_id = card.id.clone();
        let cx = rect.center().x;
        let font = self.config.label_font_size;
        let pickable = ElementFlags::VISIBLE | ElementFlags::PICKABLE;

        let group = self.push(None, ElementFlags::VISIBLE, ElementKind::Card(card));
        if self.cards.insert(card_id, group).is_some() {
            log::warn!("duplicate card id; lookups resolve to the last card");
        }

        if let Some(text) = family_label {
            let baseline = rect.y0 - self.config.family_label_offset;
            self.push(
                Some(group),
                pickable,
                ElementKind::Label {
                    text,
                    anchor: Point::new(cx, baseline),
                    extent: Rect::new(rect.x0, baseline - font, rect.x1, baseline),
                    role: LabelRole::Family,
                },
            );
        }
        self.push(
            Some(group),
            pickable,
            ElementKind::Background(RoundedRect::from_rect(rect, self.config.corner_radius)),
        );
        let radius = self.config.avatar_diameter / 2.0;
        self.push(
            Some(group),
            pickable,
            ElementKind::Avatar {
                circle: Circle::new((cx, rect.y0 + self.config.avatar_inset + radius), radius),
                avatar,
                card: kind,
            },
        );
        let baseline = rect.y1 - self.config.label_inset;
        self.push(
            Some(group),
            pickable,
            ElementKind::Label {
                text: label,
                anchor: Point::new(cx, baseline),
                extent: Rect::new(rect.x0, baseline - font, rect.x1, baseline),
                role: LabelRole::Name,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use kintree_layout::{LayoutConfig, compute_layout};
    use kintree_record::{BirthDate, PersonNode};
    use kurbo::Point;

    use super::Scene;
    use crate::{ElementKind, SceneConfig};

    fn today() -> BirthDate {
        BirthDate::new(2025, 6, 1).unwrap()
    }

    #[test]
    fn parts_follow_their_card() {
        let tree = PersonNode::new("a", "Ann").with_partner("Bob");
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let scene = Scene::build(&layout, &SceneConfig::default(), today());

        let mut current = None;
        for (i, e) in scene.elements().iter().enumerate() {
            match e.kind {
                ElementKind::Card(_) => {
                    assert_eq!(e.parent, None);
                    current = Some(i);
                }
                ElementKind::Connector(_) => assert_eq!(e.parent, None),
                _ => assert_eq!(e.parent.map(|p| p.index()), current),
            }
        }
    }

    #[test]
    fn ancestors_walk_to_the_card() {
        let tree = PersonNode::new("a", "Ann");
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let scene = Scene::build(&layout, &SceneConfig::default(), today());
        let hit = scene.hit_test(Point::new(75.0, 100.0)).unwrap();
        let chain: alloc::vec::Vec<_> = scene.ancestors(hit).collect();
        assert_eq!(chain.len(), 2);
        assert_eq!(Some(chain[1]), scene.card_element("a"));
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let tree = PersonNode::new("a", "Ann");
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let scene = Scene::build(&layout, &SceneConfig::default(), today());
        assert_eq!(scene.hit_test(Point::new(-500.0, -500.0)), None);
        assert!(scene.card("missing").is_none());
    }
}
