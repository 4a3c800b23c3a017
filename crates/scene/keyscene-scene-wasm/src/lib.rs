use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use keyscene_scene_core::{CanvasSize, Scene, SceneConfig, Vec2};

#[wasm_bindgen]
pub struct KeyScene {
    core: Scene,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize + ?Sized>(v: &T, what: &str) -> Result<JsValue, JsError> {
    swb::to_value(v).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl KeyScene {
    /// Create a scene with the built-in kinds. Pass a (partial) config
    /// object or undefined/null for defaults.
    /// Example:
    ///   new KeyScene({ max_reference_depth: 32 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<KeyScene, JsError> {
        console_error_panic_hook::set_once();

        let cfg: SceneConfig = if jsvalue_is_undefined_or_null(&config) {
            SceneConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(KeyScene {
            core: Scene::new(cfg),
        })
    }

    /// Replace the live project with an empty one.
    #[wasm_bindgen(js_name = newProject)]
    pub fn new_project(&mut self, name: String, width: f64, height: f64) {
        self.core.new_project(name, CanvasSize::new(width, height));
    }

    /// Load a project document, given as a JSON string or a plain object.
    #[wasm_bindgen(js_name = loadProject)]
    pub fn load_project(&mut self, doc: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&doc) {
            return Err(JsError::new("loadProject: document is null/undefined"));
        }
        let text = match doc.as_string() {
            Some(s) => s,
            None => JSON::stringify(&doc)
                .map_err(|e| JsError::new(&format!("loadProject stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("loadProject: stringify produced non-string"))?,
        };
        self.core
            .load_project_json(&text)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(())
    }

    /// The live project as a JSON string.
    #[wasm_bindgen(js_name = projectJson)]
    pub fn project_json(&self) -> Result<String, JsError> {
        self.core
            .project_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn play(&mut self) {
        self.core.play();
    }

    pub fn pause(&mut self) {
        self.core.pause();
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.core.is_playing()
    }

    pub fn seek(&mut self, time: f64) {
        self.core.seek(time);
    }

    pub fn time(&self) -> f64 {
        self.core.time()
    }

    /// Advance by `dt` seconds and render for a viewport of the given size.
    /// Returns the frame object, or undefined when no project is loaded.
    pub fn tick(
        &mut self,
        dt: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<JsValue, JsError> {
        match self
            .core
            .tick(dt, Vec2::new(viewport_width, viewport_height))
        {
            Some(out) => to_js(&out, "frame"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = startCapture)]
    pub fn start_capture(&mut self) -> Result<(), JsError> {
        self.core
            .start_capture()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = stopCapture)]
    pub fn stop_capture(&mut self) {
        self.core.stop_capture();
    }

    #[wasm_bindgen(js_name = isCapturing)]
    pub fn is_capturing(&self) -> bool {
        self.core.is_capturing()
    }

    /// Resolve a reference to `[x, y]` in logical units (NaN when unresolved).
    pub fn resolve(&self, reference: &str) -> Vec<f64> {
        self.core.resolve(reference).to_array().to_vec()
    }

    #[wasm_bindgen(js_name = anchorKinds)]
    pub fn anchor_kinds(&self) -> Vec<String> {
        self.core
            .registry()
            .anchor_kind_names()
            .map(str::to_string)
            .collect()
    }

    #[wasm_bindgen(js_name = visualKinds)]
    pub fn visual_kinds(&self) -> Vec<String> {
        self.core
            .registry()
            .visual_kind_names()
            .map(str::to_string)
            .collect()
    }

    /// One flag per timeline track: does its target property exist?
    #[wasm_bindgen(js_name = trackValidity)]
    pub fn track_validity(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.track_validity(), "track validity")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
