//! DOM overlay: HUD text, pause panel, game-over banner
//!
//! All elements are optional; a page without them still plays.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::consts::GAME_OVER_BANNER_MS;

fn lookup(document: &Document, id: &str) -> Option<HtmlElement> {
    let el = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if el.is_none() {
        log::warn!("Overlay element #{} not found", id);
    }
    el
}

fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

/// Cached overlay elements
pub struct Overlay {
    score: Option<HtmlElement>,
    best: Option<HtmlElement>,
    pause_panel: Option<HtmlElement>,
    game_over: Option<HtmlElement>,
}

impl Overlay {
    pub fn new(document: &Document) -> Self {
        let overlay = Self {
            score: lookup(document, "score"),
            best: lookup(document, "bestScore"),
            pause_panel: lookup(document, "pauseOverlay"),
            game_over: lookup(document, "gameOver"),
        };
        overlay.set_paused(false);
        if let Some(el) = &overlay.game_over {
            set_display(el, "none");
        }
        overlay
    }

    pub fn set_score(&self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&format!("Score: {}", score)));
        }
    }

    pub fn set_best(&self, best: u64) {
        if let Some(el) = &self.best {
            el.set_text_content(Some(&format!("Best: {}", best)));
        }
    }

    /// Show or hide the pause panel
    pub fn set_paused(&self, paused: bool) {
        if let Some(el) = &self.pause_panel {
            set_display(el, if paused { "flex" } else { "none" });
        }
    }

    /// Flash the game-over banner without blocking the loop
    pub fn show_game_over(&self, score: u64) {
        let Some(el) = &self.game_over else { return };
        el.set_text_content(Some(&format!("Game Over! Score: {}", score)));
        set_display(el, "flex");

        let el = el.clone();
        let hide = Closure::once_into_js(move || set_display(&el, "none"));
        let scheduled = web_sys::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                GAME_OVER_BANNER_MS,
            )
        });
        if !matches!(scheduled, Some(Ok(_))) {
            log::warn!("Could not schedule game-over banner dismissal");
        }
    }
}
