// Small helpers shared by the view layer.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Uniformly random spawn direction for the crane block.
pub fn random_direction() -> f64 {
    if js_sys::Math::random() > 0.5 { 1.0 } else { -1.0 }
}
