// WebAssembly bindings for the browser transcriber page
use js_sys::Array;
use morse_scribe::types::*;
use morse_scribe::{codec, interpret, timing, Dictionary, ScribeSession};
use wasm_bindgen::prelude::*;

mod support;

// Console logging for debugging
#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format_args!($($t)*).to_string().into()))
}

fn to_js_error(e: morse_scribe::MorseError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// Stateless translation

#[wasm_bindgen]
pub fn encode(text: &str, config_json: &str) -> String {
    let params = support::parse_with_defaults::<ScribeParams>(config_json);
    codec::encode(text, &params.codec_options())
}

#[wasm_bindgen]
pub fn decode(code: &str, config_json: &str) -> String {
    let params = support::parse_with_defaults::<ScribeParams>(config_json);
    codec::decode(code, &params.codec_options())
}

/// Reference table as an array of `{ plain, code }` objects.
#[wasm_bindgen]
pub fn dictionary() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(Dictionary::standard().entries())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

// JavaScript-compatible playback schedule
#[wasm_bindgen]
pub struct PlaybackResult {
    elements: Vec<MorseElement>,
}

#[wasm_bindgen]
impl PlaybackResult {
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.elements.len()
    }

    #[wasm_bindgen(getter)]
    pub fn duration_ms(&self) -> f64 {
        timing::schedule_duration_ms(&self.elements)
    }

    #[wasm_bindgen(getter)]
    pub fn elements(&self) -> Array {
        let array = Array::new();
        for element in &self.elements {
            let obj = js_sys::Object::new();
            let element_type = match element.element_type {
                MorseElementType::Tone => "tone",
                MorseElementType::Silence => "silence",
            };
            // Reflect::set only fails on non-objects
            let _ = js_sys::Reflect::set(&obj, &"type".into(), &element_type.into());
            let _ = js_sys::Reflect::set(&obj, &"durationMs".into(), &element.duration_ms.into());
            array.push(&obj);
        }
        array
    }
}

#[wasm_bindgen]
pub fn playback_schedule(code: &str, config_json: &str) -> Result<PlaybackResult, JsValue> {
    let params = support::parse_with_defaults::<PlaybackParams>(config_json);

    timing::playback_schedule(code, &params)
        .map(|elements| PlaybackResult { elements })
        .map_err(to_js_error)
}

#[wasm_bindgen]
pub struct InterpretResultJs {
    code: String,
    text: String,
    calibrated: bool,
    unit_ms: Option<f64>,
    signals_processed: usize,
}

#[wasm_bindgen]
impl InterpretResultJs {
    #[wasm_bindgen(getter)]
    pub fn code(&self) -> String {
        self.code.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn calibrated(&self) -> bool {
        self.calibrated
    }

    #[wasm_bindgen(getter)]
    pub fn unit_ms(&self) -> Option<f64> {
        self.unit_ms
    }

    #[wasm_bindgen(getter)]
    pub fn signals_processed(&self) -> usize {
        self.signals_processed
    }
}

#[wasm_bindgen]
pub fn interpret_signals(
    signals_json: &str,
    config_json: &str,
) -> Result<InterpretResultJs, JsValue> {
    let signals: Vec<Signal> = serde_json::from_str(signals_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid signals JSON: {}", e)))?;

    let params = support::parse_with_defaults::<ScribeParams>(config_json);

    let result = interpret::interpret_signals(&signals, &params).map_err(to_js_error)?;

    Ok(InterpretResultJs {
        code: result.code,
        text: result.text,
        calibrated: result.calibrated,
        unit_ms: result.unit_ms,
        signals_processed: result.signals_processed,
    })
}

// Stateful transcriber for key handlers

#[wasm_bindgen]
pub struct Scribe {
    session: ScribeSession,
}

#[wasm_bindgen]
impl Scribe {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Scribe, JsValue> {
        let params = support::parse_with_defaults::<ScribeParams>(config_json);
        ScribeSession::new(params)
            .map(|session| Scribe { session })
            .map_err(to_js_error)
    }

    /// Apply new settings, keeping calibration.
    pub fn configure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let params = support::parse_with_defaults::<ScribeParams>(config_json);
        self.session.set_params(params).map_err(to_js_error)
    }

    /// Key down; returns the code characters this produced.
    pub fn press(&mut self, timestamp_ms: f64) -> String {
        symbols_to_code(&self.session.press(timestamp_ms))
    }

    /// Key up; returns the code characters this produced.
    pub fn release(&mut self, timestamp_ms: f64) -> String {
        let was_calibrated = self.calibrated();
        let symbols = self.session.release(timestamp_ms);
        if !was_calibrated && self.calibrated() {
            console_log!(
                "scribe calibrated, unit {:.1} ms",
                self.session.scribe().unit_ms().unwrap_or_default()
            );
        }
        symbols_to_code(&symbols)
    }

    #[wasm_bindgen(getter)]
    pub fn code(&self) -> String {
        self.session.code().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_code(&mut self, code: String) {
        self.session.set_code(code);
    }

    #[wasm_bindgen(getter)]
    pub fn plain(&self) -> String {
        self.session.plain().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_plain(&mut self, plain: String) {
        self.session.set_plain(plain);
    }

    #[wasm_bindgen(getter)]
    pub fn calibrated(&self) -> bool {
        self.session.scribe().state() == ScribeState::Calibrated
    }

    #[wasm_bindgen(getter)]
    pub fn unit_ms(&self) -> Option<f64> {
        self.session.scribe().unit_ms()
    }

    pub fn encode(&mut self) -> String {
        self.session.encode().to_string()
    }

    pub fn decode(&mut self) -> String {
        self.session.decode().to_string()
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }
}
