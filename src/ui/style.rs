use iced::{widget::container, Background, Border, Color, Theme};

use crate::notify::Severity;

pub const RED: Color = Color {
    r: 0.827,
    g: 0.125,
    b: 0.165,
    a: 1.0,
};
pub const GREEN: Color = Color {
    r: 0.157,
    g: 0.655,
    b: 0.271,
    a: 1.0,
};
pub const MUTED: Color = Color {
    r: 0.4,
    g: 0.4,
    b: 0.4,
    a: 1.0,
};
const HIGHLIGHT: Color = Color {
    r: 0.29,
    g: 0.565,
    b: 0.886,
    a: 1.0,
};

pub struct ToastStyle(pub Severity);

impl container::StyleSheet for ToastStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let (background, text) = self.0.palette();
        container::Appearance {
            text_color: Some(text),
            background: Some(Background::Color(background)),
            border: Border {
                radius: 5.0.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Dimmed layer behind an open modal.
pub struct Backdrop;

impl container::StyleSheet for Backdrop {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color {
                a: 0.6,
                ..Color::BLACK
            })),
            ..Default::default()
        }
    }
}

/// Outline of the selected printing.
pub struct Selected;

impl container::StyleSheet for Selected {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            border: Border {
                color: HIGHLIGHT,
                width: 3.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}
