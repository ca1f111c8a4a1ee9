//! Orbit Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use orbit_shooter::platform::CanvasSink;
    use orbit_shooter::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<CanvasSink>,
        last_time: f64,
    }

    impl Game {
        /// Feed one animation frame's worth of time to the session
        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.session.advance(elapsed);

            for event in self.session.drain_events() {
                log::debug!("{:?}", event);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orbit Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("js-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let sink = CanvasSink::new(ctx, width as f64, height as f64);

        let mut session = match Session::new(&settings, width, height, seed, sink) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to start: {}", e);
                return;
            }
        };
        session.on_game_over(|over| {
            log::info!("Game over after {} ticks", over.tick);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Game Over!");
            }
        });

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Orbit Shooter running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Map client coordinates into canvas pixels (the canvas may be CSS-scaled)
            let rect = target.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let sx = target.width() as f64 / rect.width();
            let sy = target.height() as f64 / rect.height();
            let x = (event.client_x() as f64 - rect.left()) * sx;
            let y = (event.client_y() as f64 - rect.top()) * sy;

            game.borrow_mut().session.fire_at(x as f32, y as f32);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbit Shooter (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let settings = orbit_shooter::Settings::load();
    if let Err(e) = headless::run(&settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a scripted gunner defends the center until overrun
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use orbit_shooter::render::LogSink;
    use orbit_shooter::sim::GameEvent;
    use orbit_shooter::{Session, Settings, SetupError};

    /// Simulated run length cap (seconds)
    const MAX_RUN_SECS: u32 = 120;
    /// Ticks between gunner shots
    const FIRE_COOLDOWN_TICKS: u64 = 150;

    pub fn run(settings: &Settings) -> Result<(), SetupError> {
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut session = Session::new(
            settings,
            settings.arena_width,
            settings.arena_height,
            seed,
            LogSink::default(),
        )?;

        let ended = Rc::new(Cell::new(None));
        let seen = ended.clone();
        session.on_game_over(move |over| {
            log::info!("Game Over! Survived {} ticks", over.tick);
            seen.set(Some(over.tick));
        });

        let frame_ms = 1000.0 / settings.frame_rate as f64;
        let total_frames = MAX_RUN_SECS as u64 * settings.frame_rate as u64;
        let mut kills = 0u32;
        let mut last_shot_tick = 0u64;

        for _ in 0..total_frames {
            let tick = session.state().time_ticks;
            if tick >= last_shot_tick + FIRE_COOLDOWN_TICKS {
                // Aim at whichever enemy is closest to the player
                let player = session.player().pos;
                let target = session
                    .enemies()
                    .iter()
                    .map(|e| e.pos)
                    .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
                if let Some(aim) = target {
                    session.fire_at(aim.x, aim.y);
                    last_shot_tick = tick;
                }
            }

            session.advance(frame_ms);

            kills += session
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                .count() as u32;

            if session.is_over() {
                break;
            }
        }

        let sink = session.shutdown();
        match ended.get() {
            Some(tick) => log::info!("Run ended at tick {} with {} kills", tick, kills),
            None => log::info!("Held out for {}s with {} kills", MAX_RUN_SECS, kills),
        }
        log::info!("Presented {} frames", sink.frames());
        Ok(())
    }
}
