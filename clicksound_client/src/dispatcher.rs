use anyhow::{anyhow, Result};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, Event, EventTarget};

use crate::classify::classify;
use crate::protocol::ButtonSound;

/// Capture-phase `click` subscription turning clicks into sounds.
///
/// The listener is removed when the dispatcher is dropped.
pub struct ClickDispatcher {
    target: EventTarget,
    listener: Closure<dyn FnMut(Event)>,
}

impl ClickDispatcher {
    pub fn attach<F>(target: &EventTarget, mut on_sound: F) -> Result<Self>
    where
        F: FnMut(ButtonSound) + 'static,
    {
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let element = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(element) => element,
                None => return,
            };
            for sound in classify(&element) {
                on_sound(sound);
            }
        }) as Box<dyn FnMut(Event)>);

        target
            .add_event_listener_with_callback_and_bool("click", listener.as_ref().unchecked_ref(), true)
            .map_err(|e| anyhow!("could not listen to clicks: {:?}", e))?;

        Ok(ClickDispatcher {
            target: target.clone(),
            listener,
        })
    }

    /// Keeps listening for the lifetime of the page.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for ClickDispatcher {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            "click",
            self.listener.as_ref().unchecked_ref(),
            true,
        );
    }
}
