use anyhow::{anyhow, Result};
use strum::IntoEnumIterator;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, HtmlAudioElement};

use crate::protocol::{sound_url, AudioFormat, Volume, MAX_VOLUME};

/// `HTMLMediaElement.HAVE_METADATA`
pub const HAVE_METADATA: u16 = 1;
/// `HTMLMediaElement.HAVE_CURRENT_DATA`
pub const HAVE_CURRENT_DATA: u16 = 2;

/// One playback attempt of one asset.
pub trait Clip {
    fn set_volume(&self, volume: f64);
    /// Plays the clip once it signals it can play.
    fn play_when_ready(&self);
    fn load(&self);
    fn ready_state(&self) -> u16;
    fn play(&self);
}

pub trait ClipFactory {
    type Clip: Clip;
    fn create(&self, url: &str) -> Result<Self::Clip>;
}

/// What became of a `play` request. Callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackOutcome {
    /// No sound name given
    Skipped,
    /// Volume is 0, nothing was loaded
    Muted,
    /// Data was buffered, playback requested right away
    Started(AudioFormat),
    /// Metadata known, plays as soon as enough data arrives
    Loading(AudioFormat),
    /// No format showed progress yet, every created clip still plays when ready
    Pending,
}

pub struct SoundPlayer<F> {
    factory: F,
    base_url: String,
}

impl<F: ClipFactory> SoundPlayer<F> {
    pub fn new(factory: F, base_url: &str) -> Self {
        Self { factory, base_url: base_url.into() }
    }

    /// Best-effort playback of `name` at `volume` percent.
    ///
    /// Tries mp3, wav then ogg, and stops at the first format already
    /// buffered or loading. Errors are never reported.
    pub fn play(&self, name: &str, volume: Volume) -> PlaybackOutcome {
        if name.is_empty() {
            return PlaybackOutcome::Skipped;
        }
        if volume == 0 {
            return PlaybackOutcome::Muted;
        }
        let level = f64::from(volume.min(MAX_VOLUME)) / 100.0;

        for format in AudioFormat::iter() {
            let url = sound_url(&self.base_url, name, format);
            let clip = match self.factory.create(&url) {
                Ok(clip) => clip,
                Err(err) => {
                    log::debug!("skipping {}: {:#}", url, err);
                    continue;
                }
            };
            clip.set_volume(level);
            clip.play_when_ready();
            clip.load();

            let state = clip.ready_state();
            if state >= HAVE_CURRENT_DATA {
                clip.play();
                return PlaybackOutcome::Started(format);
            }
            if state >= HAVE_METADATA {
                return PlaybackOutcome::Loading(format);
            }
        }
        PlaybackOutcome::Pending
    }
}

/// Clips backed by `<audio>` elements.
pub struct HtmlAudioClips;

impl ClipFactory for HtmlAudioClips {
    type Clip = HtmlAudioElement;

    fn create(&self, url: &str) -> Result<HtmlAudioElement> {
        HtmlAudioElement::new_with_src(url)
            .map_err(|e| anyhow!("error creating html audio element: {:?}", e))
    }
}

impl Clip for HtmlAudioElement {
    fn set_volume(&self, volume: f64) {
        web_sys::HtmlMediaElement::set_volume(self, volume);
    }

    fn play_when_ready(&self) {
        let audio = self.clone();
        let on_ready = Closure::once_into_js(move || Clip::play(&audio));
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(e) = self.add_event_listener_with_callback_and_add_event_listener_options(
            "canplay",
            on_ready.unchecked_ref(),
            &options,
        ) {
            log::debug!("could not wait for {}: {:?}", self.src(), e);
        }
    }

    fn load(&self) {
        web_sys::HtmlMediaElement::load(self);
    }

    fn ready_state(&self) -> u16 {
        web_sys::HtmlMediaElement::ready_state(self)
    }

    fn play(&self) {
        // autoplay policies reject the promise, nothing to do about it
        if let Ok(promise) = web_sys::HtmlMediaElement::play(self) {
            wasm_bindgen_futures::spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        }
    }
}
