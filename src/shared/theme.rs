//! Palette, type scale and node placement shared by every screen.

use bevy::prelude::*;

use super::Tone;

// ─── Palette ──────────────────────────────────────────────────────────────────

pub const WHITE: Color = Color::WHITE;
pub const BLACK: Color = Color::BLACK;
pub const BLUE: Color = Color::srgb(0.0, 0.482, 1.0);
pub const LIGHT_BLUE: Color = Color::srgb(0.678, 0.847, 0.902);
pub const RED: Color = Color::srgb(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::srgb(0.0, 1.0, 0.0);
pub const PRAIRIE_GREEN: Color = Color::srgb(0.298, 0.733, 0.090);
pub const SKY_BLUE: Color = Color::srgb(0.529, 0.808, 0.922);
pub const WAGON_BROWN: Color = Color::srgb(0.545, 0.271, 0.075);
/// Dims the screen behind a modal.
pub const SCRIM: Color = Color::srgba(0.0, 0.0, 0.0, 0.35);

// ─── Type scale ───────────────────────────────────────────────────────────────

pub const TITLE_FONT: f32 = 48.0;
pub const BUTTON_FONT: f32 = 24.0;
pub const SMALL_FONT: f32 = 16.0;
pub const MAP_LABEL_FONT: f32 = 10.0;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Blue => BLUE,
        Tone::Green => GREEN,
        Tone::Red => RED,
    }
}

pub fn font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..default()
    }
}

/// Absolutely positioned node covering `rect` (canvas pixels).
pub fn place(rect: Rect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x),
        top: Val::Px(rect.min.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        ..default()
    }
}
