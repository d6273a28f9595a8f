mod clock;
mod script;

use touchview_core::{ViewportConfig, ViewportController};
use touchview_protocol::{Point, TouchPhase};
use wasm_bindgen::prelude::*;

pub use clock::PerformanceClock;
pub use script::load_script;

/// More simultaneous touches than any platform reports; extras are dropped.
const MAX_TOUCHES: usize = 10;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// A viewport controller owned by one element on the page.
///
/// ```js
/// const vp = new TouchViewport('{"initial_scale": 0.6}');
/// el.addEventListener('touchmove', e => {
///   const xy = [...e.touches].flatMap(t => [t.clientX, t.clientY]);
///   surface.style.transform = vp.handleTouch(e.type, xy);
/// });
/// ```
#[wasm_bindgen]
pub struct TouchViewport {
    controller: ViewportController<PerformanceClock>,
}

#[wasm_bindgen]
impl TouchViewport {
    /// `config_json` may be partial; omitted fields use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TouchViewport, JsError> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                ViewportConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?
            }
            _ => ViewportConfig::default(),
        };
        let controller = ViewportController::with_clock(config, PerformanceClock)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { controller })
    }

    /// Feed one DOM touch event. `kind` is the event type (`touchstart`,
    /// `touchmove`, `touchend`, `touchcancel`, or the bare phase name) and
    /// `coords` the active touches flattened as `[x0, y0, x1, y1, ...]`.
    /// Returns the CSS transform to apply.
    #[wasm_bindgen(js_name = handleTouch)]
    pub fn handle_touch(&mut self, kind: &str, coords: &[f64]) -> Result<String, JsError> {
        let phase = parse_phase(kind)
            .ok_or_else(|| JsError::new(&format!("unknown touch event type: {kind}")))?;
        if coords.len() % 2 != 0 {
            return Err(JsError::new("touch coordinates must come in x, y pairs"));
        }

        let mut points = [Point::ORIGIN; MAX_TOUCHES];
        let mut count = 0;
        for (slot, xy) in points.iter_mut().zip(coords.chunks_exact(2)) {
            *slot = Point::new(xy[0], xy[1]);
            count += 1;
        }

        Ok(self.controller.handle(phase, &points[..count]).css())
    }

    pub fn scale(&self) -> f64 {
        self.controller.transform().scale
    }

    pub fn x(&self) -> f64 {
        self.controller.transform().x
    }

    pub fn y(&self) -> f64 {
        self.controller.transform().y
    }

    #[wasm_bindgen(js_name = cssTransform)]
    pub fn css_transform(&self) -> String {
        self.controller.transform().css()
    }

    /// `[a, b, c, d, e, f]` for `CanvasRenderingContext2D.setTransform`.
    pub fn matrix(&self) -> Vec<f64> {
        self.controller.transform().to_affine().to_vec()
    }

    /// The published transform as JSON.
    #[wasm_bindgen(js_name = transformJson)]
    pub fn transform_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.controller.transform())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isZoomed)]
    pub fn is_zoomed(&self) -> bool {
        self.controller.is_zoomed()
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }
}

fn parse_phase(kind: &str) -> Option<TouchPhase> {
    match kind.strip_prefix("touch").unwrap_or(kind) {
        "start" => Some(TouchPhase::Start),
        "move" => Some(TouchPhase::Move),
        "end" => Some(TouchPhase::End),
        "cancel" => Some(TouchPhase::Cancel),
        _ => None,
    }
}
