//! Audio cues
//!
//! Two clips: an ambient music loop and a one-shot crash. Game events map to
//! cues here; on the web `AudioManager` plays them through `<audio>`
//! elements.

use crate::game::GameEvent;

/// Something to do with the clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PlayMusic,
    PauseMusic,
    /// Seek the music to the start and play
    RestartMusic,
    PlayCrash,
}

/// Cues triggered by a game event, in order
pub fn cues_for(event: &GameEvent) -> &'static [AudioCue] {
    match event {
        GameEvent::Started | GameEvent::Resumed => &[AudioCue::PlayMusic],
        GameEvent::Paused => &[AudioCue::PauseMusic],
        GameEvent::Crashed { .. } => &[AudioCue::PlayCrash, AudioCue::PauseMusic],
        GameEvent::Reset => &[AudioCue::RestartMusic],
        GameEvent::NewBest { .. } => &[],
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::AudioCue;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        music: HtmlAudioElement,
        crash: HtmlAudioElement,
    }

    impl AudioManager {
        /// Wrap the page's `<audio>` elements
        pub fn new(music: HtmlAudioElement, crash: HtmlAudioElement, settings: &Settings) -> Self {
            music.set_loop(true);
            let manager = Self { music, crash };
            manager.apply_settings(settings);
            manager
        }

        /// Push volume/mute settings onto the clips
        pub fn apply_settings(&self, settings: &Settings) {
            self.music.set_volume(settings.effective_music_volume());
            self.crash.set_volume(settings.effective_sfx_volume());
        }

        pub fn apply(&self, cue: AudioCue) {
            match cue {
                AudioCue::PlayMusic => self.play(&self.music),
                AudioCue::PauseMusic => {
                    if self.music.pause().is_err() {
                        log::warn!("Failed to pause music");
                    }
                }
                AudioCue::RestartMusic => {
                    self.music.set_current_time(0.0);
                    self.play(&self.music);
                }
                AudioCue::PlayCrash => {
                    self.crash.set_current_time(0.0);
                    self.play(&self.crash);
                }
            }
        }

        fn play(&self, clip: &HtmlAudioElement) {
            // Rejected until the first user gesture
            match clip.play() {
                Ok(promise) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                            log::debug!("Playback blocked until user interaction");
                        }
                    });
                }
                Err(e) => log::warn!("Audio play failed: {:?}", e),
            }
        }
    }
}
