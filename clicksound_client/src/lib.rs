mod api;
mod classify;
mod config;
mod dispatcher;
mod indicator;
mod sound_player;
mod storage;
mod volume;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

pub use crate::api::HttpVolumeBackend;
pub use crate::classify::{classify, ClickTarget};
pub use crate::config::ClientConfig;
pub use crate::dispatcher::ClickDispatcher;
pub use crate::indicator::{ToggleButton, ToggleState};
pub use crate::sound_player::{Clip, ClipFactory, HtmlAudioClips, PlaybackOutcome, SoundPlayer};
pub use crate::storage::LocalPreMuteStore;
pub use crate::volume::{
    MemoryPreMuteStore, NoIndicator, PreMuteStore, VolumeBackend, VolumeIndicator, VolumeManager,
};

pub(crate) use clicksound_protocol as protocol;

type PageVolume = VolumeManager<HttpVolumeBackend, LocalPreMuteStore>;

/// Installs click sounds on the current page.
#[wasm_bindgen]
pub fn run_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    start(ClientConfig::default())
}

fn start(config: ClientConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let toggle = ToggleButton::from_document(&document);
    let toggle_button = toggle.button().cloned();

    let volume: Rc<PageVolume> = Rc::new(
        VolumeManager::new(
            HttpVolumeBackend::new(&config.volume_endpoint),
            LocalPreMuteStore::new(&config.pre_mute_key),
        )
        .with_indicator(toggle),
    );
    let player = SoundPlayer::new(HtmlAudioClips, &config.sound_base_url);

    spawn_load(&volume);

    let click_volume = volume.clone();
    ClickDispatcher::attach(document.as_ref(), move |sound| {
        if !click_volume.is_loaded() {
            spawn_load(&click_volume);
        }
        let outcome = player.play(sound.name(), click_volume.volume());
        log::trace!("{}: {:?}", sound, outcome);
    })
    .map_err(|e| JsValue::from_str(&e.to_string()))?
    .forget();

    if let Some(button) = toggle_button {
        let on_toggle = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let volume = volume.clone();
            spawn_local(async move {
                volume.toggle_mute().await;
            });
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
        on_toggle.forget();
    }

    log::info!("click sounds ready");
    Ok(())
}

fn spawn_load(volume: &Rc<PageVolume>) {
    let volume = volume.clone();
    spawn_local(async move {
        volume.load().await;
    });
}
