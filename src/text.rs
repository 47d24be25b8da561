//! Standard top/bottom captions rendered in classic meme style.
//!
//! These are not layers: they sit at fixed, centered positions (top-anchored
//! and bottom-anchored) and cannot be dragged. Input is normalized to
//! upper-case, so the slots never hold mixed-case text.

use crate::style::StandardTextStyle;

/// The two fixed caption slots with their independent styles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardText {
    top: String,
    bottom: String,
    pub top_style: StandardTextStyle,
    pub bottom_style: StandardTextStyle,
}

impl StandardText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_top(&mut self, text: &str) {
        self.top = text.to_uppercase();
    }

    pub fn set_bottom(&mut self, text: &str) {
        self.bottom = text.to_uppercase();
    }

    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn bottom(&self) -> &str {
        &self.bottom
    }
}
