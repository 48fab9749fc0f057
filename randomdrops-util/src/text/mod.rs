use std::borrow::Cow;

use color::{Color, NamedColor};
use serde::{Deserialize, Serialize};

pub mod color;

/// Represents a Text component
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextComponent(pub TextComponentBase);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextComponentBase {
    /// The actual text
    pub text: Cow<'static, str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Extra text components
    pub extra: Vec<TextComponentBase>,
}

impl TextComponentBase {
    pub fn to_pretty_console(&self) -> String {
        let mut text = self.text.to_string();
        if let Some(color) = self.color {
            text = color.console_color(&text);
        }
        if self.bold == Some(true) {
            text = colored::Colorize::bold(text.as_str()).to_string();
        }
        for child in &self.extra {
            text += &child.to_pretty_console();
        }
        text
    }

    fn plain(&self) -> String {
        let mut text = self.text.to_string();
        for child in &self.extra {
            text += &child.plain();
        }
        text
    }
}

impl TextComponent {
    pub fn text<P>(plain: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self(TextComponentBase {
            text: plain.into(),
            color: None,
            bold: None,
            extra: vec![],
        })
    }

    #[must_use]
    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.0.extra.push(child.0);
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.0.color = Some(color);
        self
    }

    #[must_use]
    pub fn color_named(mut self, color: NamedColor) -> Self {
        self.0.color = Some(Color::Named(color));
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.0.bold = Some(true);
        self
    }

    /// Text with all styling stripped, children included.
    pub fn get_text(&self) -> String {
        self.0.plain()
    }

    pub fn to_pretty_console(&self) -> String {
        self.0.to_pretty_console()
    }
}

impl From<&'static str> for TextComponent {
    fn from(value: &'static str) -> Self {
        Self::text(value)
    }
}

impl From<String> for TextComponent {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

#[cfg(test)]
mod test {
    use super::{TextComponent, color::NamedColor};

    #[test]
    fn plain_text_includes_children() {
        let text = TextComponent::text("[RandomDrops] ")
            .color_named(NamedColor::Green)
            .add_child(TextComponent::text("Enabled."));
        assert_eq!(text.get_text(), "[RandomDrops] Enabled.");
    }

    #[test]
    fn console_rendering_keeps_content() {
        colored::control::set_override(false);
        let text = TextComponent::text("Drops reset.").color_named(NamedColor::Yellow);
        assert_eq!(text.to_pretty_console(), "Drops reset.");
    }
}
