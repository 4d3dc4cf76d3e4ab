// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use kintree_record::PersonNode;
use kurbo::{Point, Rect};

use crate::config::LayoutConfig;

/// Bounding box reported when there is nothing to lay out.
pub const DEFAULT_BOUNDS: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

/// A [`PersonNode`] annotated with its layout.
///
/// The person is borrowed, never copied or mutated. Positions are absolute
/// top-left corners in layout units.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode<'a> {
    /// The record this node lays out.
    pub person: &'a PersonNode,
    /// Generation, with the root at `0`.
    pub depth: usize,
    /// Footprint of this node's own card(s).
    pub content_width: f64,
    /// Footprint of this node's whole subtree.
    pub subtree_width: f64,
    /// Left edge of the interval allotted to this subtree by its parent.
    pub slot_left: f64,
    /// Top-left corner of the blood relative's card.
    pub position: Point,
    /// Top-left corner of the partner's card, when there is a partner.
    pub partner_position: Option<Point>,
    /// Laid-out children, in record order.
    pub children: Vec<Self>,
}

/// Which card of a node a [`CardSlot`] describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// The blood relative.
    Blood,
    /// The blood relative's partner.
    Partner,
}

/// One laid-out card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardSlot<'n, 'a> {
    /// The node owning the card.
    pub node: &'n LayoutNode<'a>,
    /// Whether this is the blood relative's or the partner's card.
    pub kind: CardKind,
    /// Card extent: `[x, x + card_width] x [y, y + card_height]`.
    pub rect: Rect,
}

/// Computes `content_width` and `subtree_width` for every node under `person`.
///
/// Children are measured before their parent. Positions are left at zero
/// until [`assign_positions`] runs.
#[must_use]
pub fn compute_subtree_widths<'a>(person: &'a PersonNode, config: &LayoutConfig) -> LayoutNode<'a> {
    measure(person, 0, config)
}

fn measure<'a>(person: &'a PersonNode, depth: usize, config: &LayoutConfig) -> LayoutNode<'a> {
    let children: Vec<LayoutNode<'a>> = person
        .children
        .iter()
        .map(|child| measure(child, depth + 1, config))
        .collect();
    let content_width = config.content_width(person.partner().is_some());
    let children_width = config.row_width(children.iter().map(|c| c.subtree_width));
    LayoutNode {
        person,
        depth,
        content_width,
        subtree_width: content_width.max(children_width),
        slot_left: 0.0,
        position: Point::ZERO,
        partner_position: None,
        children,
    }
}

/// Places `node` and its descendants, with the subtree's interval starting at `origin`.
///
/// The node's cards are centered in `[origin.x, origin.x + subtree_width]` at
/// `origin.y`. The children block is centered under that interval and each
/// generation sits `level_height` below its parent.
pub fn assign_positions(node: &mut LayoutNode<'_>, origin: Point, config: &LayoutConfig) {
    node.slot_left = origin.x;
    let x = origin.x + (node.subtree_width - node.content_width) / 2.0;
    node.position = Point::new(x, origin.y);
    node.partner_position = node
        .person
        .partner()
        .map(|_| Point::new(x + config.card_width + config.partner_gap, origin.y));

    let block = config.row_width(node.children.iter().map(|c| c.subtree_width));
    let mut child_x = origin.x + (node.subtree_width - block) / 2.0;
    let child_y = origin.y + config.level_height;
    for child in &mut node.children {
        assign_positions(child, Point::new(child_x, child_y), config);
        child_x += child.subtree_width + config.sibling_gap;
    }
}

impl<'a> LayoutNode<'a> {
    /// Iterates over this node and all descendants in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        core::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Blood card rect and, if present, partner card rect of this node alone.
    pub fn own_cards(&self, config: &LayoutConfig) -> impl Iterator<Item = CardSlot<'_, 'a>> {
        let size = config.card_size();
        let blood = CardSlot {
            node: self,
            kind: CardKind::Blood,
            rect: Rect::from_origin_size(self.position, size),
        };
        let partner = self.partner_position.map(|p| CardSlot {
            node: self,
            kind: CardKind::Partner,
            rect: Rect::from_origin_size(p, size),
        });
        core::iter::once(blood).chain(partner)
    }

    /// Every card in this subtree, in pre-order, blood card before partner card.
    pub fn cards(&self, config: &LayoutConfig) -> impl Iterator<Item = CardSlot<'_, 'a>> {
        self.iter().flat_map(move |node| node.own_cards(config))
    }

    /// Finds the node laying out the person with `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Self> {
        self.iter().find(|n| n.person.id == id)
    }

    /// Horizontal center of the blood relative's card.
    #[must_use]
    pub fn card_center_x(&self, config: &LayoutConfig) -> f64 {
        self.position.x + config.card_width / 2.0
    }
}

/// Union of the card rects, or [`DEFAULT_BOUNDS`] when there are none.
#[must_use]
pub fn bounds_of<'n, 'a: 'n>(cards: impl IntoIterator<Item = CardSlot<'n, 'a>>) -> Rect {
    cards
        .into_iter()
        .map(|card| card.rect)
        .reduce(|acc, r| acc.union(r))
        .unwrap_or(DEFAULT_BOUNDS)
}

/// A laid-out tree and the bounding box of all of its cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<'a> {
    /// Root of the annotated tree.
    pub root: LayoutNode<'a>,
    /// Union of all blood and partner card rects.
    pub bounds: Rect,
    /// Configuration the tree was laid out with.
    pub config: LayoutConfig,
}

impl<'a> Layout<'a> {
    /// Every card in the tree, in pre-order.
    pub fn cards(&self) -> impl Iterator<Item = CardSlot<'_, 'a>> {
        self.root.cards(&self.config)
    }

    /// Number of laid-out people (partners not counted).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.iter().count()
    }
}

/// Lays out the tree rooted at `root`.
///
/// Runs [`compute_subtree_widths`] then [`assign_positions`] at
/// `config.origin`, and scans every card for the bounding box. The result
/// depends only on the tree's shape, order, and `config`.
#[must_use]
pub fn compute_layout<'a>(root: &'a PersonNode, config: &LayoutConfig) -> Layout<'a> {
    let mut tree = compute_subtree_widths(root, config);
    assign_positions(&mut tree, config.origin, config);
    let bounds = bounds_of(tree.cards(config));
    log::debug!(
        "laid out {} people, subtree width {}, bounds {:?}",
        tree.iter().count(),
        tree.subtree_width,
        bounds
    );
    Layout {
        root: tree,
        bounds,
        config: *config,
    }
}

/// Several independent trees laid out side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct Forest<'a> {
    /// Roots in input order, left to right.
    pub roots: Vec<LayoutNode<'a>>,
    /// Union of all card rects, or [`DEFAULT_BOUNDS`] for an empty forest.
    pub bounds: Rect,
    /// Configuration the trees were laid out with.
    pub config: LayoutConfig,
}

impl<'a> Forest<'a> {
    /// Every card in every tree, tree by tree.
    pub fn cards(&self) -> impl Iterator<Item = CardSlot<'_, 'a>> {
        self.roots.iter().flat_map(|root| root.cards(&self.config))
    }
}

/// Lays out `roots` left to right starting at `config.origin`, separated by `sibling_gap`.
#[must_use]
pub fn compute_forest<'a>(roots: &'a [PersonNode], config: &LayoutConfig) -> Forest<'a> {
    let mut x = config.origin.x;
    let mut laid_out = Vec::with_capacity(roots.len());
    for root in roots {
        let mut tree = compute_subtree_widths(root, config);
        assign_positions(&mut tree, Point::new(x, config.origin.y), config);
        x += tree.subtree_width + config.sibling_gap;
        laid_out.push(tree);
    }
    let bounds = bounds_of(laid_out.iter().flat_map(|root| root.cards(config)));
    Forest {
        roots: laid_out,
        bounds,
        config: *config,
    }
}
