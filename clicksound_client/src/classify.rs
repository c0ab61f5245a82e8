//! Which sound a click asks for

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::protocol::ButtonSound;

/// Elements matching any of these selectors sound like buttons.
pub const BUTTON_SELECTOR: &str = "button, .btn, .btn-ghost, .btn-icon";

/// Container whose switches have their own sound handling.
pub const EXCLUDED_PANEL: &str = "#modsPanel";
pub const EXCLUDED_LABELS: &str = "#modsPanel label";

/// The few DOM queries classification needs.
pub trait ClickTarget: Sized {
    /// Nearest inclusive ancestor matching a CSS selector.
    fn closest(&self, selector: &str) -> Option<Self>;
    fn has_class(&self, class: &str) -> bool;
    fn is_checkbox(&self) -> bool;
}

impl ClickTarget for Element {
    fn closest(&self, selector: &str) -> Option<Self> {
        Element::closest(self, selector).ok().flatten()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn is_checkbox(&self) -> bool {
        self.dyn_ref::<HtmlInputElement>()
            .map(|input| input.type_() == "checkbox")
            .unwrap_or(false)
    }
}

/// Sounds to play for a click on `target`, in play order.
///
/// A checkbox nested in a button yields both sounds.
pub fn classify<T: ClickTarget>(target: &T) -> Vec<ButtonSound> {
    let mut sounds = Vec::new();
    if target.closest(EXCLUDED_LABELS).is_some() {
        return sounds;
    }

    if let Some(button) = target.closest(BUTTON_SELECTOR) {
        let sound = if button.has_class("btn") || button.has_class("btn-icon") {
            ButtonSound::Primary
        } else if button.has_class("btn-ghost") {
            ButtonSound::Ghost
        } else {
            ButtonSound::Click
        };
        sounds.push(sound);
    }

    if target.is_checkbox() && target.closest(EXCLUDED_PANEL).is_none() {
        sounds.push(ButtonSound::Toggle);
    }
    sounds
}
