//! Lane Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlAudioElement, KeyboardEvent, MouseEvent};

    use lane_dodger::audio::{AudioManager, cues_for};
    use lane_dodger::driver::FrameScheduler;
    use lane_dodger::input::{InputState, KeyCommand, command_for_key};
    use lane_dodger::persistence::LocalStorageStore;
    use lane_dodger::renderer::CanvasSurface;
    use lane_dodger::sim::{GameConfig, GameState};
    use lane_dodger::ui::Overlay;
    use lane_dodger::{Game, GameEvent, Settings, best_score, platform};

    /// `requestAnimationFrame`-backed frame scheduler
    struct RafScheduler {
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> i32 {
            let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref())
            else {
                log::error!("Frame requested before the loop was wired up");
                return 0;
            };
            window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .unwrap_or_else(|e| {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    0
                })
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Everything the host callbacks share
    struct App {
        game: Game<RafScheduler>,
        input: InputState,
        surface: CanvasSurface,
        audio: AudioManager,
        overlay: Overlay,
        store: LocalStorageStore,
        settings: Settings,
    }

    impl App {
        fn on_frame(&mut self) {
            let input = self.input.tick_input();
            self.game
                .frame(platform::now_ms(), &input, &mut self.surface);
            self.flush_events();
        }

        fn on_score_tick(&mut self) {
            self.game.score_tick();
            self.overlay.set_score(self.game.state.score);
            self.flush_events();
        }

        fn toggle_pause(&mut self) {
            self.game.toggle_pause();
            self.flush_events();
        }

        fn on_key_down(&mut self, key: &str) {
            match command_for_key(key) {
                Some(KeyCommand::TogglePause) => self.toggle_pause(),
                Some(KeyCommand::ToggleMute) => {
                    self.settings.toggle_mute();
                    self.audio.apply_settings(&self.settings);
                    self.settings.save(&mut self.store);
                }
                Some(KeyCommand::ToggleAutopilot) => {
                    let on = !self.game.autopilot();
                    self.game.set_autopilot(on);
                }
                None => self.input.key_down(key),
            }
        }

        /// Tab hidden or window blurred
        fn on_focus_lost(&mut self, reason: &str) {
            self.input.release_all();
            if self.settings.pause_on_blur && self.game.state.is_running() {
                self.toggle_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Hand queued game events to audio, overlay and storage
        fn flush_events(&mut self) {
            for event in self.game.drain_events() {
                for cue in cues_for(&event) {
                    self.audio.apply(*cue);
                }
                match event {
                    GameEvent::Paused => self.overlay.set_paused(true),
                    GameEvent::Resumed => self.overlay.set_paused(false),
                    GameEvent::Crashed { score } => self.overlay.show_game_over(score),
                    GameEvent::Reset => self.overlay.set_score(0),
                    GameEvent::NewBest { best } => {
                        best_score::save(&mut self.store, best);
                        self.overlay.set_best(best);
                    }
                    GameEvent::Started => {}
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Lane Dodger starting...");

        let window = platform::window()?;
        let document = platform::document()?;

        let canvas = platform::viewport_canvas("gameCanvas")?;
        let player_img = platform::load_image("assets/player-car.svg").await?;
        let obstacle_img = platform::load_image("assets/enemy_car.svg").await?;
        let surface = CanvasSurface::new(&canvas, player_img, obstacle_img)?;

        let store = LocalStorageStore::new();
        let settings = Settings::load(&store);
        let best = best_score::load(&store);

        let music: HtmlAudioElement = platform::element_by_id("bgMusic")?;
        let crash: HtmlAudioElement = platform::element_by_id("crashSound")?;
        let audio = AudioManager::new(music, crash, &settings);

        let overlay = Overlay::new(&document);
        overlay.set_score(0);
        overlay.set_best(best);

        let config = GameConfig::for_canvas(canvas.width() as f32, canvas.height() as f32);
        let seed = platform::run_seed();
        let state = GameState::new(config, seed, best, platform::now_ms());
        let game = Game::new(state, RafScheduler { callback: None });

        let app = Rc::new(RefCell::new(App {
            game,
            input: InputState::new(),
            surface,
            audio,
            overlay,
            store,
            settings,
        }));

        // Frame callback, reused for every request
        {
            let frame_app = app.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                frame_app.borrow_mut().on_frame();
            });
            app.borrow_mut()
                .game
                .driver_mut()
                .scheduler_mut()
                .callback = Some(callback);
        }

        // Score timer, independent of frames
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                app.borrow_mut().on_score_tick();
            });
            let interval_ms = lane_dodger::consts::SCORE_INTERVAL_MS as i32;
            window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms,
            )?;
            closure.forget();
        }

        setup_keyboard(&window, app.clone())?;
        setup_resume_button(&document, app.clone())?;
        setup_auto_pause(&window, &document, app.clone())?;

        {
            let mut app = app.borrow_mut();
            app.game.start();
            app.flush_events();
        }

        log::info!("Lane Dodger running! (seed {})", seed);
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                app.borrow_mut().on_key_down(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resume_button(
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("resumeBtn") else {
            log::warn!("No #resumeBtn; resume with the pause key");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().toggle_pause();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().on_focus_lost("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().on_focus_lost("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
        .await
        .inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dodger::GameEvent;
    use lane_dodger::headless::HeadlessHost;
    use lane_dodger::sim::GameConfig;

    env_logger::init();
    log::info!("Lane Dodger (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seconds: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);
    let seed = lane_dodger::platform::run_seed();

    let mut host = HeadlessHost::new(GameConfig::for_canvas(800.0, 600.0), seed, 0);
    host.game.set_autopilot(true);

    let mut crashes = 0;
    for _ in 0..(seconds as u64) {
        host.advance(1000.0);
        for event in host.take_events() {
            if let GameEvent::Crashed { score } = event {
                crashes += 1;
                log::info!("Crash #{} at {:.0} ms, score {}", crashes, host.now_ms(), score);
            }
        }
    }

    println!(
        "Simulated {:.0}s (seed {}): {} crashes, best score {}, current score {}",
        seconds, seed, crashes, host.game.state.best_score, host.game.state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
