//! Rendered roll button and its typed attribute bag

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Marker class carried by every rendered roll button; the click route keys on it
pub const INLINE_ROLL_CLASS: &str = "inline-roll-cmd";

/// `data-*` attributes attached to a rendered element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementAttributes(BTreeMap<String, String>);

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Leading visual of a roll button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "src", rename_all = "snake_case")]
pub enum ElementIcon {
    /// The generic d20 glyph
    Dice,
    /// An item's image
    Image(String),
}

/// An interactive roll element, created once per marker and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRollElement {
    pub classes: Vec<String>,
    pub attributes: ElementAttributes,
    pub icon: ElementIcon,
    /// Visible text after the icon
    pub label: String,
}

impl InlineRollElement {
    /// Render as an anchor element
    pub fn to_html(&self) -> String {
        let mut html = String::from("<a class=\"");
        html.push_str(&escape_html(&self.classes.join(" ")));
        html.push('"');
        for (key, value) in self.attributes.iter() {
            html.push(' ');
            html.push_str(key);
            html.push_str("=\"");
            html.push_str(&escape_html(value));
            html.push('"');
        }
        html.push('>');
        match &self.icon {
            ElementIcon::Dice => html.push_str("<i class=\"fas fa-dice-d20\"></i>"),
            ElementIcon::Image(src) => {
                html.push_str("<img class=\"item-image\" src=\"");
                html.push_str(&escape_html(src));
                html.push_str("\">");
            }
        }
        html.push_str(&escape_html(&self.label));
        html.push_str("</a>");
        html
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
