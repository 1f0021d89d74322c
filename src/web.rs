//! Browser surface
//!
//! `WebArena` wraps an [`Arena`] for a JS host that owns the canvas, the
//! keyboard and the frame clock. The host calls `step` once per animation
//! frame with the elapsed seconds and the held keys, then draws from
//! `vertices` and `is_lit`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::{Algorithm, Settings};
use crate::sim::{Arena, StepInput, step};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Poly Arena (web) starting...");
}

#[wasm_bindgen]
pub struct WebArena {
    arena: Arena,
}

#[wasm_bindgen]
impl WebArena {
    /// Create an arena, optionally from a JSON settings document
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WebArena, JsValue> {
        let settings = match config {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        Ok(WebArena {
            arena: Arena::new(settings),
        })
    }

    /// Try to spawn a polygon; `false` means the spawn point was occupied
    pub fn insert(&mut self, sides: u32, pushable: bool) -> Result<bool, JsValue> {
        self.arena.try_insert(sides, pushable).map_err(to_js)
    }

    /// Advance one frame. Returns `true` if the move had to be undone.
    pub fn step(&mut self, dt: f32, left: bool, right: bool, forward: bool, backward: bool) -> bool {
        let input = StepInput {
            turn_left: left,
            turn_right: right,
            forward,
            backward,
        };
        step(&mut self.arena, &input, dt).is_some_and(|r| r.is_rolled_back())
    }

    pub fn select(&mut self, index: u32) -> Result<(), JsValue> {
        self.arena.select(index as usize).map_err(to_js)
    }

    /// Select the polygon under a click, in arena coordinates
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<u32> {
        self.arena.select_at(Vec2::new(x, y)).map(|i| i as u32)
    }

    pub fn toggle_pushable(&mut self) -> Option<bool> {
        self.arena.toggle_pushable()
    }

    pub fn set_algorithm(&mut self, name: &str) -> Result<(), JsValue> {
        let algorithm = Algorithm::from_str(name)
            .ok_or_else(|| to_js(format!("unknown algorithm: {}", name)))?;
        self.arena.set_algorithm(algorithm);
        Ok(())
    }

    pub fn algorithm(&self) -> String {
        self.arena.settings.algorithm.as_str().to_string()
    }

    pub fn len(&self) -> u32 {
        self.arena.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn selected(&self) -> Option<u32> {
        self.arena.selected.map(|i| i as u32)
    }

    /// Flat `[x0, y0, x1, y1, ...]` vertex list of polygon `index`
    pub fn vertices(&self, index: u32) -> Result<js_sys::Float32Array, JsValue> {
        let polygon = self
            .arena
            .polygons
            .get(index as usize)
            .ok_or_else(|| to_js(format!("no polygon at index {}", index)))?;
        let flat: Vec<f32> = polygon.vertices().iter().flat_map(|v| [v.x, v.y]).collect();
        Ok(js_sys::Float32Array::from(flat.as_slice()))
    }

    /// Whether polygon `index` should be drawn highlighted this frame
    pub fn is_lit(&self, index: u32) -> bool {
        self.arena
            .polygons
            .get(index as usize)
            .is_some_and(|p| p.blink.is_lit())
    }

    pub fn is_pushable(&self, index: u32) -> bool {
        self.arena
            .polygons
            .get(index as usize)
            .is_some_and(|p| p.pushable)
    }

    /// Full arena state as JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.arena).map_err(to_js)
    }
}
