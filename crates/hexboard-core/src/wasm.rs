//! WebAssembly bindings for the board generator.
//!
//! This module exposes a scene to JavaScript through wasm-bindgen. The page
//! owns the actual renderer and replays the JSON draw commands.

use wasm_bindgen::prelude::*;

use crate::board::{BoardConfig, BoardVariant};
use crate::render::Color;
use crate::scene::Scene;
use crate::vertex::VertexCoordinate;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed scene wrapper
#[wasm_bindgen]
pub struct WasmBoard {
    scene: Scene,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Generate a board; `variant` is "prism" or "corners"
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<WasmBoard, JsValue> {
        let variant = match variant {
            "prism" => BoardVariant::Prism,
            "corners" => BoardVariant::Corners,
            other => return Err(JsValue::from_str(&format!("Unknown variant: {}", other))),
        };
        Self::build(&BoardConfig::new(variant))
    }

    /// Generate a board from a JSON board config
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<WasmBoard, JsValue> {
        let config = BoardConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid board config: {}", e)))?;
        Self::build(&config)
    }

    fn build(config: &BoardConfig) -> Result<WasmBoard, JsValue> {
        let mut rng = rand::thread_rng();
        let scene = Scene::generate(config, &mut rng)
            .map_err(|e| JsValue::from_str(&format!("Board generation failed: {}", e)))?;
        Ok(WasmBoard { scene })
    }

    /// Get the tiles as a JSON array
    #[wasm_bindgen(js_name = getTiles)]
    pub fn get_tiles(&self) -> String {
        serde_json::to_string(self.scene.board().tiles()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the current frame as a JSON array of draw commands
    #[wasm_bindgen(js_name = getDrawCommands)]
    pub fn get_draw_commands(&self) -> String {
        serde_json::to_string(&self.scene.frame()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Handle a key press; returns true if the page should redraw
    #[wasm_bindgen(js_name = keyPress)]
    pub fn key_press(&mut self, key: char) -> bool {
        self.scene.handle_key(key)
    }

    /// Place a settlement from a JSON vertex coordinate
    #[wasm_bindgen(js_name = placeSettlement)]
    pub fn place_settlement(&mut self, vertex_json: &str, color: &str) -> Result<(), JsValue> {
        let vertex: VertexCoordinate = serde_json::from_str(vertex_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid vertex JSON: {}", e)))?;
        let color = Color::parse(color).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scene
            .place_settlement(&vertex, color)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&format!("Placement failed: {}", e)))
    }

    /// Place a road between two JSON vertex coordinates
    #[wasm_bindgen(js_name = placeRoad)]
    pub fn place_road(&mut self, from_json: &str, to_json: &str, color: &str) -> Result<(), JsValue> {
        let from: VertexCoordinate = serde_json::from_str(from_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid vertex JSON: {}", e)))?;
        let to: VertexCoordinate = serde_json::from_str(to_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid vertex JSON: {}", e)))?;
        let color = Color::parse(color).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scene
            .place_road(&from, &to, color)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&format!("Placement failed: {}", e)))
    }
}
