//! Presentation primitives: buttons, the text field and hit-testing.
//!
//! These carry no rendering state. The UI plugin draws them; the input plugin
//! hit-tests against them. All rectangles are canvas pixels with the origin
//! at the top-left, matching `Window::cursor_position`.

use bevy::prelude::*;

use super::Action;

/// Button fill color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub label: &'static str,
    pub rect: Rect,
    pub action: Action,
    pub tone: Tone,
    pub tooltip: Option<&'static str>,
}

impl Widget {
    pub fn button(label: &'static str, rect: Rect, action: Action) -> Self {
        Self {
            label,
            rect,
            action,
            tone: Tone::Blue,
            tooltip: None,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn is_hit(&self, point: Vec2) -> bool {
        contains(self.rect, point)
    }
}

/// Builds a rect from a top-left corner and a size.
pub fn canvas_rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

/// Half-open containment: the left/top edges are inside, right/bottom are not.
pub fn contains(rect: Rect, point: Vec2) -> bool {
    point.x >= rect.min.x && point.x < rect.max.x && point.y >= rect.min.y && point.y < rect.max.y
}

/// First widget under `point`, in set order.
pub fn hit_test(widgets: &[Widget], point: Vec2) -> Option<&Widget> {
    widgets.iter().find(|w| w.is_hit(point))
}

// ═══════════════════════════════════════════════════════════════════════
// TEXT FIELD
// ═══════════════════════════════════════════════════════════════════════

/// Single-line text field. Active only after a click inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBox {
    pub rect: Rect,
    pub text: String,
    pub active: bool,
}

impl InputBox {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            text: String::new(),
            active: false,
        }
    }

    /// Focus follows the click.
    pub fn click(&mut self, point: Vec2) {
        self.active = contains(self.rect, point);
    }

    pub fn type_text(&mut self, input: &str) {
        if !self.active {
            return;
        }
        self.text
            .extend(input.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        if self.active {
            self.text.pop();
        }
    }

    /// Enter: hands back the text and clears the field.
    pub fn commit(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }
        Some(std::mem::take(&mut self.text))
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.active = false;
    }
}
