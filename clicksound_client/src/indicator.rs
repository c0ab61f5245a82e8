use web_sys::{Document, Element};

use crate::protocol::Volume;
use crate::volume::VolumeIndicator;

pub const TOGGLE_BUTTON_ID: &str = "soundToggleBtn";
pub const ICON_ID: &str = "soundIcon";

const MUTED_CLASS: &str = "muted";
const ICON_ON_CLASS: &str = "icon-volume-on";
const ICON_OFF_CLASS: &str = "icon-volume-off";

/// What the toggle button shows for a given volume.
#[derive(Debug, PartialEq)]
pub struct ToggleState {
    pub muted: bool,
    pub icon_class: &'static str,
    pub title: &'static str,
}

impl ToggleState {
    pub fn for_volume(volume: Volume) -> Self {
        if volume == 0 {
            ToggleState { muted: true, icon_class: ICON_OFF_CLASS, title: "Unmute sounds" }
        } else {
            ToggleState { muted: false, icon_class: ICON_ON_CLASS, title: "Mute sounds" }
        }
    }

    fn stale_icon_class(&self) -> &'static str {
        if self.muted { ICON_ON_CLASS } else { ICON_OFF_CLASS }
    }
}

/// The `#soundToggleBtn` button and its `#soundIcon`. Either may be
/// missing from the page.
pub struct ToggleButton {
    button: Option<Element>,
    icon: Option<Element>,
}

impl ToggleButton {
    pub fn from_document(document: &Document) -> Self {
        ToggleButton {
            button: document.get_element_by_id(TOGGLE_BUTTON_ID),
            icon: document.get_element_by_id(ICON_ID),
        }
    }

    pub fn button(&self) -> Option<&Element> {
        self.button.as_ref()
    }
}

impl VolumeIndicator for ToggleButton {
    fn show(&self, volume: Volume) {
        let state = ToggleState::for_volume(volume);
        if let Some(button) = &self.button {
            let _ = button.class_list().toggle_with_force(MUTED_CLASS, state.muted);
            let _ = button.set_attribute("title", state.title);
        }
        if let Some(icon) = &self.icon {
            let classes = icon.class_list();
            let _ = classes.remove_1(state.stale_icon_class());
            let _ = classes.add_1(state.icon_class);
        }
    }
}
