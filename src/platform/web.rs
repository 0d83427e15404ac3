//! Browser bindings
//!
//! LocalStorage and `document.cookie` substrates, plus [`SnakeHandle`], the
//! object the page's game modal creates on open and frees on close.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDocument, KeyboardEvent, Storage};

use super::storage::{CookieJar, KeyValueStore, MemoryStorage, StorageError, cookie_value};
use super::{Key, SeededRandom, now_ms};
use crate::audio::WebAudio;
use crate::persistence::GameStorage;
use crate::renderer::{death_flash_alpha, draw_list};
use crate::session::GameSession;
use crate::settings::Settings;
use crate::tuning::Tuning;

const COOKIE_MAX_AGE_SECS: u32 = 365 * 24 * 60 * 60;

/// `window.localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteRejected {
                key: key.to_string(),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| StorageError::WriteRejected {
                key: key.to_string(),
            })
    }
}

/// `document.cookie`
pub struct DocumentCookies {
    document: HtmlDocument,
}

impl DocumentCookies {
    pub fn open() -> Option<Self> {
        let document = web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()?;
        Some(Self { document })
    }

    fn write(&self, key: &str, cookie: &str) -> Result<(), StorageError> {
        self.document
            .set_cookie(cookie)
            .map_err(|_| StorageError::WriteRejected {
                key: key.to_string(),
            })
    }
}

impl KeyValueStore for DocumentCookies {
    fn get(&self, key: &str) -> Option<String> {
        let header = self.document.cookie().ok()?;
        cookie_value(&header, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(
            key,
            &format!("{key}={value};max-age={COOKIE_MAX_AGE_SECS};path=/"),
        )
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.write(key, &format!("{key}=;max-age=0;path=/"))
    }
}

/// Browser storage, falling back to memory when it's unavailable
fn open_storage() -> GameStorage {
    let backend: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Some(storage) => Box::new(storage),
        None => {
            log::warn!("LocalStorage unavailable - scores will not persist");
            Box::new(MemoryStorage::new())
        }
    };
    let legacy: Box<dyn KeyValueStore> = match DocumentCookies::open() {
        Some(cookies) => Box::new(cookies),
        None => Box::new(CookieJar::new()),
    };
    GameStorage::new(backend, legacy)
}

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// A mounted game, driven by `requestAnimationFrame`
#[wasm_bindgen]
pub struct SnakeHandle {
    game: Rc<RefCell<GameSession>>,
    settings: Settings,
    key_listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    frame_id: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl SnakeHandle {
    /// Mount the game: load scores, attach the keyboard and start the loop.
    ///
    /// `tuning_json` optionally overrides the speed curve and food size.
    #[wasm_bindgen(constructor)]
    pub fn mount(muted: bool, tuning_json: Option<String>) -> Result<SnakeHandle, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialized on remount
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let storage = open_storage();
        let mut settings = Settings::load(storage.store());
        settings.muted = muted;

        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json)
            .unwrap_or_default();
        let audio = WebAudio::new(settings.sfx_volume);
        let rng = SeededRandom::new(now_ms());
        let game = GameSession::mount_with_tuning(storage, rng, audio, muted, tuning);
        let game = Rc::new(RefCell::new(game));

        let key_listener = {
            let game = game.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                if game.borrow_mut().key_down(key, now_ms()) {
                    // Keep arrows from scrolling the page behind the modal
                    event.prevent_default();
                    event.stop_propagation();
                }
            })
        };
        window.add_event_listener_with_callback_and_bool(
            "keydown",
            key_listener.as_ref().unchecked_ref(),
            true,
        )?;

        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        {
            let game = game.clone();
            let frame_loop = frame.clone();
            let frame_id_loop = frame_id.clone();
            *frame.borrow_mut() = Some(Closure::new(move |_time: f64| {
                game.borrow_mut().tick(now_ms());
                if let Some(callback) = frame_loop.borrow().as_ref() {
                    frame_id_loop.set(request_frame(callback));
                }
            }));
        }
        if let Some(callback) = frame.borrow().as_ref() {
            frame_id.set(request_frame(callback));
        }

        log::info!("Snake running");
        Ok(SnakeHandle {
            game,
            settings,
            key_listener: Some(key_listener),
            frame,
            frame_id,
        })
    }

    /// Stop the loop and detach the keyboard listener
    pub fn unmount(&mut self) {
        if let Some(window) = web_sys::window() {
            if let Some(id) = self.frame_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            if let Some(listener) = self.key_listener.take() {
                let _ = window.remove_event_listener_with_callback_and_bool(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                    true,
                );
            }
        }
        // Breaks the closure's reference to itself
        self.frame.borrow_mut().take();
        self.game.borrow_mut().unmount();
    }

    pub fn restart(&mut self) -> bool {
        self.game.borrow_mut().restart()
    }

    pub fn set_muted(&mut self, muted: bool) {
        let mut game = self.game.borrow_mut();
        game.set_muted(muted);
        self.settings.muted = muted;
        self.settings.save(game.storage_mut().store_mut());
    }

    /// Effects volume, 0.0 - 1.0
    pub fn set_volume(&mut self, volume: f32) {
        let mut game = self.game.borrow_mut();
        game.set_volume(volume);
        self.settings.sfx_volume = volume.clamp(0.0, 1.0);
        self.settings.save(game.storage_mut().store_mut());
    }

    /// Turn the death flash off
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.settings.reduced_motion = reduced_motion;
        let mut game = self.game.borrow_mut();
        self.settings.save(game.storage_mut().store_mut());
    }

    pub fn score(&self) -> f64 {
        self.game.borrow().score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.borrow().high_score() as f64
    }

    pub fn is_new_high_score(&self) -> bool {
        self.game.borrow().is_new_high_score()
    }

    pub fn is_over(&self) -> bool {
        self.game.borrow().is_over()
    }

    pub fn awaiting_name_entry(&self) -> bool {
        self.game.borrow().awaiting_name_entry()
    }

    pub fn name_entry_letters(&self) -> Option<String> {
        self.game.borrow().name_entry().map(|entry| entry.name())
    }

    pub fn name_entry_cursor(&self) -> Option<u32> {
        self.game.borrow().name_entry().map(|entry| entry.cursor() as u32)
    }

    /// Place on the board the run being named will take
    pub fn pending_rank(&self) -> Option<u32> {
        self.game.borrow().pending_rank().map(|rank| rank as u32)
    }

    /// `[{ name, score, date }]`, best first
    pub fn leaderboard_json(&self) -> String {
        serde_json::to_string(self.game.borrow().leaderboard()).unwrap_or_else(|_| "[]".into())
    }

    /// Draw list flattened to `[x, y, size, r, g, b, a]` per cell
    pub fn cells(&self) -> Vec<f32> {
        let game = self.game.borrow();
        let cells = draw_list(game.state());
        bytemuck::cast_slice::<_, f32>(cells.as_slice()).to_vec()
    }

    /// Red overlay opacity for this frame
    pub fn flash_alpha(&self) -> f32 {
        let game = self.game.borrow();
        death_flash_alpha(game.state(), now_ms(), self.settings.reduced_motion)
    }
}

impl Drop for SnakeHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
