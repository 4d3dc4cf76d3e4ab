// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Sizes and colours for the drawn tree.
///
/// Lengths are in layout units, relative to the card they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Corner radius of the card background. Default `16`.
    pub corner_radius: f64,
    /// Diameter of the circular avatar. Default `70`.
    pub avatar_diameter: f64,
    /// Gap between the card top and the avatar. Default `15`.
    pub avatar_inset: f64,
    /// Gap between the name label baseline and the card bottom. Default `15`.
    pub label_inset: f64,
    /// Vertical run of a parent → child connector before it turns. Default `40`.
    pub connector_drop: f64,
    /// Height of the family label baseline above the card top. Default `16`.
    pub family_label_offset: f64,
    /// Font size of the name and family labels. Default `14`.
    pub label_font_size: f64,
    /// Font size of avatar initials. Default `24`.
    pub initials_font_size: f64,
    /// Stroke width of connectors. Default `2`.
    pub connector_width: f64,
    /// Dash pattern of partner connectors. Default `[6, 4]`.
    pub partner_dash: [f64; 2],
    /// Card background fill.
    pub card_fill: Color,
    /// Card background outline.
    pub card_stroke: Color,
    /// Connector stroke.
    pub connector_color: Color,
    /// Initials avatar fill on a blood relative's card.
    pub blood_avatar_fill: Color,
    /// Initials colour on a blood relative's card.
    pub blood_avatar_text: Color,
    /// Initials avatar fill on a partner's card.
    pub partner_avatar_fill: Color,
    /// Initials colour on a partner's card.
    pub partner_avatar_text: Color,
    /// Name label colour.
    pub label_color: Color,
    /// Family label colour.
    pub family_label_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            corner_radius: 16.0,
            avatar_diameter: 70.0,
            avatar_inset: 15.0,
            label_inset: 15.0,
            connector_drop: 40.0,
            family_label_offset: 16.0,
            label_font_size: 14.0,
            initials_font_size: 24.0,
            connector_width: 2.0,
            partner_dash: [6.0, 4.0],
            card_fill: Color::from_rgb8(0xff, 0xff, 0xff),
            card_stroke: Color::from_rgb8(0xe2, 0xe8, 0xf0),
            connector_color: Color::from_rgb8(0x94, 0xa3, 0xb8),
            blood_avatar_fill: Color::from_rgb8(0x3b, 0x82, 0xf6),
            blood_avatar_text: Color::from_rgb8(0xff, 0xff, 0xff),
            partner_avatar_fill: Color::from_rgb8(0xe2, 0xe8, 0xf0),
            partner_avatar_text: Color::from_rgb8(0x64, 0x74, 0x8b),
            label_color: Color::from_rgb8(0x1e, 0x29, 0x3b),
            family_label_color: Color::from_rgb8(0x64, 0x74, 0x8b),
        }
    }
}
