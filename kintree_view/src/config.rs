// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tuning for the viewport controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Each wheel notch multiplies the scale by `exp(±zoom_intensity)`. Default `0.1`.
    pub zoom_intensity: f64,
    /// Distance in view pixels a pointer must travel before a press counts as a drag.
    /// Default `3`.
    pub drag_threshold: f64,
    /// Smallest allowed scale. Default `1e-3`.
    pub min_scale: f64,
    /// Largest allowed scale. Default `1e3`.
    pub max_scale: f64,
    /// Gap between the top of the view and the top of the content when centering.
    /// Default `50`.
    pub top_padding: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_intensity: 0.1,
            drag_threshold: 3.0,
            min_scale: 1e-3,
            max_scale: 1e3,
            top_padding: 50.0,
        }
    }
}

impl ViewConfig {
    /// Clamps `scale` into `[min_scale, max_scale]`, tolerating swapped limits.
    ///
    /// A limit that is NaN or infinite is replaced by its default.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let defaults = Self::default();
        let min = finite_or(self.min_scale, defaults.min_scale);
        let max = finite_or(self.max_scale, defaults.max_scale);
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        scale.clamp(lo, hi)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
