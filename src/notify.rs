use std::time::{Duration, Instant};

use iced::Color;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// (background, text) colors; errors are red, everything else green.
    pub fn palette(self) -> (Color, Color) {
        match self {
            Severity::Error => (rgb(0xf8, 0xd7, 0xda), rgb(0x72, 0x1c, 0x24)),
            Severity::Info | Severity::Success => {
                (rgb(0xd4, 0xed, 0xda), rgb(0x15, 0x57, 0x24))
            }
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb8(r, g, b)
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    created: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= TOAST_LIFETIME
    }
}

/// Independently stacked toasts. No queueing: each one expires on its own.
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.push_at(message, severity, Instant::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> u64 {
        let message = message.into();
        match severity {
            Severity::Error => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            message,
            severity,
            created: now,
        });
        self.next_id
    }

    /// Drops every toast older than [`TOAST_LIFETIME`].
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| !t.is_expired(now));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }
}
