use bevy::prelude::*;

use super::{canvas_rect, Action, Pending, Tone, Widget};

/// How long an error notice stays up before dismissing itself.
pub const NOTICE_SECS: f32 = 3.0;

pub const HELP_LINES: &[&str] = &[
    "Goal: Travel from Independence, Missouri to Oregon City, Oregon.",
    "- Manage your resources carefully",
    "- Hunt for food when supplies are low",
    "- Trade with others along the trail",
    "- Watch out for diseases and injuries",
    "Keyboard Shortcuts:",
    "ESC - Return to Main Menu",
    "I - Open Inventory",
    "M - Open Map",
    "H - Start Hunting",
    "Good luck on your journey!",
];

/// Input-exclusive overlay drawn above the current screen.
#[derive(Debug, Clone)]
pub enum Modal {
    Confirm {
        prompt: String,
        pending: Pending,
    },
    Notice {
        message: String,
        suggestion: String,
        timer: Timer,
    },
    Help,
}

impl Modal {
    pub fn confirm(prompt: impl Into<String>, pending: Pending) -> Self {
        Modal::Confirm {
            prompt: prompt.into(),
            pending,
        }
    }

    pub fn notice(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Modal::Notice {
            message: message.into(),
            suggestion: suggestion.into(),
            timer: Timer::from_seconds(NOTICE_SECS, TimerMode::Once),
        }
    }

    /// Dialog frame in canvas pixels.
    pub fn frame(&self) -> Rect {
        match self {
            Modal::Confirm { .. } | Modal::Notice { .. } => canvas_rect(200.0, 200.0, 400.0, 200.0),
            Modal::Help => canvas_rect(100.0, 100.0, 600.0, 380.0),
        }
    }

    /// The only controls that receive clicks while this modal is up.
    pub fn widgets(&self) -> Vec<Widget> {
        let frame = self.frame();
        match self {
            Modal::Confirm { .. } => vec![
                Widget::button(
                    "Yes",
                    canvas_rect(frame.min.x + 50.0, frame.max.y - 70.0, 100.0, 40.0),
                    Action::ConfirmYes,
                )
                .with_tone(Tone::Green),
                Widget::button(
                    "No",
                    canvas_rect(frame.max.x - 150.0, frame.max.y - 70.0, 100.0, 40.0),
                    Action::ConfirmNo,
                )
                .with_tone(Tone::Red),
            ],
            Modal::Notice { .. } => Vec::new(),
            Modal::Help => vec![Widget::button(
                "Close",
                canvas_rect(frame.center().x - 50.0, frame.max.y - 40.0, 100.0, 40.0),
                Action::CloseHelp,
            )
            .with_tone(Tone::Red)],
        }
    }
}

/// The modal sub-state. `None` means the current screen has input.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveModal(pub Option<Modal>);

impl ActiveModal {
    pub fn is_open(&self) -> bool {
        self.0.is_some()
    }

    pub fn open(&mut self, modal: Modal) {
        self.0 = Some(modal);
    }

    pub fn close(&mut self) -> Option<Modal> {
        self.0.take()
    }

    pub fn widgets(&self) -> Vec<Widget> {
        self.0.as_ref().map(Modal::widgets).unwrap_or_default()
    }

    /// Advances a notice's countdown. Returns true when it dismissed itself.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        let Some(Modal::Notice { timer, .. }) = self.0.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.finished() {
            self.0 = None;
            return true;
        }
        false
    }
}
