// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Translation and uniform scale mapping content space into view space.
///
/// A content point `p` appears at `translate + p * scale` in the view. This is
/// the single transform written to the group that encloses the drawn tree.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ViewportState {
    /// Pan offset in view pixels.
    pub translate: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportState {
    /// No pan, scale `1`.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a state from a pan offset and scale.
    #[must_use]
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Content → view transform: translate, then scale.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Converts a content-space point into view coordinates.
    #[must_use]
    pub fn content_to_view(&self, pt: Point) -> Point {
        (self.translate + pt.to_vec2() * self.scale).to_point()
    }

    /// Converts a view-space point into content coordinates.
    #[must_use]
    pub fn view_to_content(&self, pt: Point) -> Point {
        ((pt.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Content-space rectangle visible through a view of `view_size` at the origin.
    #[must_use]
    pub fn visible_content_rect(&self, view_size: Size) -> Rect {
        Rect::from_points(
            self.view_to_content(Point::ORIGIN),
            self.view_to_content(Point::new(view_size.width, view_size.height)),
        )
    }

    /// Sets the scale to `new_scale` while keeping `anchor` (in view space) fixed.
    ///
    /// The content point under `anchor` before the call is under `anchor`
    /// after it: `translate = anchor - (anchor - translate) * (new / old)`.
    /// Non-finite or non-positive scales are ignored. Returns `true` if the
    /// state changed.
    pub fn zoom_to(&mut self, anchor: Point, new_scale: f64) -> bool {
        if !new_scale.is_finite() || new_scale <= 0.0 || new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        let anchor = anchor.to_vec2();
        self.translate = anchor - (anchor - self.translate) * ratio;
        self.scale = new_scale;
        true
    }

    /// Multiplies the scale by `factor` about `anchor`. See [`zoom_to`](Self::zoom_to).
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) -> bool {
        self.zoom_to(anchor, self.scale * factor)
    }

    /// State that horizontally centers `bounds` at `scale` and puts its top
    /// edge `top_padding` below the top of a `view_size` view.
    #[must_use]
    pub fn centered_on(bounds: Rect, view_size: Size, scale: f64, top_padding: f64) -> Self {
        let x = (view_size.width - bounds.width() * scale) / 2.0 - bounds.x0 * scale;
        let y = top_padding - bounds.y0 * scale;
        Self::new(Vec2::new(x, y), scale)
    }
}
