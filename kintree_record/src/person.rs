// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::date::BirthDate;
use crate::text::initials;

/// Identifier of a visually grouped sub-family.
///
/// Family groups only affect labeling and styling; layout ignores them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FamilyGroupId(pub String);

impl FamilyGroupId {
    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable label shown above the head of the group.
    ///
    /// The identifier is capitalized and suffixed with `Family`, so `chu`
    /// becomes `Chu Family`. An empty identifier has no label.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let id = self.0.trim();
        let mut chars = id.chars();
        let first = chars.next()?;
        Some(format!(
            "{}{} Family",
            first.to_uppercase(),
            chars.as_str()
        ))
    }
}

impl fmt::Display for FamilyGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One person in the family record, together with their descendants.
///
/// A node is the blood relative; an optional partner shares the node's card
/// row and has no identity of their own. `children` are ordered left to
/// right, and an empty list marks a leaf.
///
/// The serialized form uses the keys of the hand-authored record
/// (`partner`, `birthday`, `image`, `partnerImage`, `familyId`); the longer
/// names (`partnerName`, `birthDate`, `portraitRef`, `partnerPortraitRef`,
/// `familyGroupId`) are accepted as aliases.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PersonNode {
    /// Identifier, unique across the whole tree.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Partner's display name. Presence adds a partner card next to this one.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "partner",
            alias = "partnerName",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub partner_name: Option<String>,
    /// Birthday; presence appends the age to the display label.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "birthday",
            alias = "birthDate",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub birth_date: Option<BirthDate>,
    /// Opaque reference to a portrait image.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "image",
            alias = "portraitRef",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub portrait_ref: Option<String>,
    /// Opaque reference to the partner's portrait image.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "partnerImage",
            alias = "partnerPortraitRef",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub partner_portrait_ref: Option<String>,
    /// Marks this node as the head of a labeled sub-family.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "familyId",
            alias = "familyGroupId",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub family_group_id: Option<FamilyGroupId>,
    /// Ordered children; order determines left-to-right placement.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Self>,
}

impl PersonNode {
    /// Creates a leaf node with no partner, birthday, or portrait.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the partner's name.
    #[must_use]
    pub fn with_partner(mut self, name: impl Into<String>) -> Self {
        self.partner_name = Some(name.into());
        self
    }

    /// Sets the birthday.
    #[must_use]
    pub fn with_birth_date(mut self, date: BirthDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Sets the portrait reference.
    #[must_use]
    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait_ref = Some(portrait.into());
        self
    }

    /// Sets the partner's portrait reference.
    #[must_use]
    pub fn with_partner_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.partner_portrait_ref = Some(portrait.into());
        self
    }

    /// Marks this node as the head of a family group.
    #[must_use]
    pub fn with_family_group(mut self, id: impl Into<String>) -> Self {
        self.family_group_id = Some(FamilyGroupId(id.into()));
        self
    }

    /// Appends a child after any existing children.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends children in order after any existing children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns `true` when this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Partner name, if a partner slot should be laid out.
    ///
    /// A blank name is treated as no partner.
    #[must_use]
    pub fn partner(&self) -> Option<&str> {
        self.partner_name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Card id of the partner slot: this node's id with `_partner` appended.
    ///
    /// `None` when there is no partner.
    #[must_use]
    pub fn partner_card_id(&self) -> Option<String> {
        self.partner().map(|_| format!("{}_partner", self.id))
    }

    /// Portrait reference, if an image should be loaded.
    ///
    /// Blank references and the literal `undefined` count as absent, so the
    /// card falls back to initials instead of a broken image.
    #[must_use]
    pub fn portrait(&self) -> Option<&str> {
        usable_ref(self.portrait_ref.as_deref())
    }

    /// Partner portrait reference, with the same rules as [`PersonNode::portrait`].
    #[must_use]
    pub fn partner_portrait(&self) -> Option<&str> {
        usable_ref(self.partner_portrait_ref.as_deref())
    }

    /// Label shown on this node's card on `today`.
    ///
    /// With a birthday the whole-year age is appended: `Alana (10)`.
    #[must_use]
    pub fn display_label(&self, today: BirthDate) -> String {
        match self.birth_date {
            Some(born) => format!("{} ({})", self.name, born.age_on(today)),
            None => self.name.clone(),
        }
    }

    /// Two-letter initials of this node's name.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Iterates over this node and all descendants in pre-order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: alloc::vec![self] }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Finds the node with the given `id` in this subtree.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Self> {
        self.iter().find(|n| n.id == id)
    }

    /// Depth of the deepest leaf below this node; a leaf has depth `0`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

fn usable_ref(r: Option<&str>) -> Option<&str> {
    r.map(str::trim)
        .filter(|r| !r.is_empty() && *r != "undefined")
}

/// Pre-order iterator over a [`PersonNode`] subtree.
///
/// Children are visited in their declared order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a PersonNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PersonNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a PersonNode {
    type Item = &'a PersonNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{FamilyGroupId, PersonNode};
    use crate::BirthDate;

    fn sample() -> PersonNode {
        PersonNode::new("root", "Root")
            .with_child(
                PersonNode::new("a", "A")
                    .with_child(PersonNode::new("a1", "A1"))
                    .with_child(PersonNode::new("a2", "A2")),
            )
            .with_child(PersonNode::new("b", "B"))
    }

    #[test]
    fn iter_is_pre_order_left_to_right() {
        let tree = sample();
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["root", "a", "a1", "a2", "b"]);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.find("a2").map(|n| n.name.as_str()), Some("A2"));
        assert!(tree.find("zz").is_none());
    }

    #[test]
    fn blank_references_count_as_absent() {
        let node = PersonNode::new("x", "X")
            .with_portrait("")
            .with_partner("  ")
            .with_partner_portrait("undefined");
        assert_eq!(node.portrait(), None);
        assert_eq!(node.partner(), None);
        assert_eq!(node.partner_portrait(), None);

        let node = PersonNode::new("y", "Y").with_portrait(" assets/y.png ");
        assert_eq!(node.portrait(), Some("assets/y.png"));
    }

    #[test]
    fn display_label_appends_age() {
        let today = BirthDate::new(2025, 6, 1).unwrap();
        let plain = PersonNode::new("p", "Plain");
        assert_eq!(plain.display_label(today), "Plain");
        let kid = PersonNode::new("k", "Kid").with_birth_date(BirthDate::new(2015, 1, 16).unwrap());
        assert_eq!(kid.display_label(today), "Kid (10)");
    }

    #[test]
    fn family_labels_capitalize_the_id() {
        assert_eq!(
            FamilyGroupId("chu".into()).label().as_deref(),
            Some("Chu Family")
        );
        assert_eq!(FamilyGroupId(" ".into()).label(), None);
    }
}
