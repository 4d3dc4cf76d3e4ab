// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};

/// Geometry of the cards and gaps used by the layout.
///
/// All values are in layout units. Several configurations can coexist, for
/// example a compact style for thumbnails next to the default style.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Width of one card. Default `150`.
    pub card_width: f64,
    /// Height of one card. Default `120`.
    pub card_height: f64,
    /// Horizontal gap between a blood relative's card and their partner's. Default `30`.
    pub partner_gap: f64,
    /// Horizontal gap between neighbouring sibling subtrees. Default `50`.
    pub sibling_gap: f64,
    /// Vertical distance between the tops of consecutive generations. Default `200`.
    pub level_height: f64,
    /// Top-left corner of the root's allocated interval. Default `(0, 50)`.
    pub origin: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 150.0,
            card_height: 120.0,
            partner_gap: 30.0,
            sibling_gap: 50.0,
            level_height: 200.0,
            origin: Point::new(0.0, 50.0),
        }
    }
}

impl LayoutConfig {
    /// Size of a single card.
    #[must_use]
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    /// Footprint of a node's own cards: one card, plus gap and partner card if present.
    #[must_use]
    pub fn content_width(&self, has_partner: bool) -> f64 {
        if has_partner {
            self.card_width + self.partner_gap + self.card_width
        } else {
            self.card_width
        }
    }

    /// Total width of a row of blocks with the given widths, separated by `sibling_gap`.
    ///
    /// An empty row has width `0`.
    #[must_use]
    pub fn row_width(&self, widths: impl IntoIterator<Item = f64>) -> f64 {
        let mut total = 0.0;
        for (i, w) in widths.into_iter().enumerate() {
            if i > 0 {
                total += self.sibling_gap;
            }
            total += w;
        }
        total
    }
}
