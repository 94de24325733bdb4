//! `GridView`: the WASM-exported entry point for browser hosts.
//!
//! The view owns a canvas, wires mouse/wheel/keyboard listeners to a shared
//! [`RenderContext`], and renders when the host calls [`GridView::frame`]
//! from `requestAnimationFrame`. Sheet data is pushed in as JSON-shaped
//! objects; move requests come back out through [`GridView::take_commands`].

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::config::RenderConfig;
use crate::events::{GridEvent, ViewportEvent};
use crate::grid::{MemoryGrid, MemorySheet};
use crate::layout::{DeltaMode, Modifiers, WheelInput};
use crate::render::{CanvasRenderer, RenderBackend, Rgb};
use crate::surface::{PointerButton, RenderContext};
use crate::types::{CellRect, Selection, SheetId};

/// Milliseconds on the page's monotonic clock.
pub fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// State reachable from DOM listeners.
struct SharedState {
    ctx: RenderContext<MemoryGrid>,
    renderer: CanvasRenderer,
    dpr: f64,
}

type Shared = Rc<RefCell<SharedState>>;

fn local_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

#[wasm_bindgen]
pub struct GridView {
    state: Shared,
    /// Viewport events collected during a frame, delivered after it.
    outbox: Rc<RefCell<Vec<ViewportEvent>>>,
    viewport_callback: Option<Function>,
    #[allow(dead_code)]
    mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[allow(dead_code)]
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    #[allow(dead_code)]
    key_closures: Vec<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[wasm_bindgen]
impl GridView {
    /// Attach to `canvas`. `config` is an optional JSON object overriding
    /// [`RenderConfig`] defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f64, config: Option<String>) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config {
            Some(json) => RenderConfig::from_json(&json).map_err(JsValue::from)?,
            None => RenderConfig::default(),
        };
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        let width = f64::from(canvas.width().max(1)) / dpr;
        let height = f64::from(canvas.height().max(1)) / dpr;

        let mut renderer = CanvasRenderer::new(canvas.clone()).map_err(JsValue::from)?;
        renderer.resize(width, height, dpr);
        let mut ctx = RenderContext::new(MemoryGrid::new(), width, height, config).map_err(JsValue::from)?;

        let outbox: Rc<RefCell<Vec<ViewportEvent>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let outbox = outbox.clone();
            ctx.events_mut()
                .subscribe(move |event| outbox.borrow_mut().push(event.clone()));
        }

        let state = Rc::new(RefCell::new(SharedState { ctx, renderer, dpr }));
        let mouse_closures = Self::wire_mouse(&canvas, &state);
        let wheel_closure = Self::wire_wheel(&canvas, &state);
        let key_closures = Self::wire_keys(&state);

        Ok(GridView {
            state,
            outbox,
            viewport_callback: None,
            mouse_closures,
            wheel_closure,
            key_closures,
        })
    }

    fn wire_mouse(canvas: &HtmlCanvasElement, state: &Shared) -> Vec<Closure<dyn FnMut(MouseEvent)>> {
        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down
        {
            let state = state.clone();
            let target = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let Some(button) = PointerButton::from_dom(event.button()) else {
                    return;
                };
                if button == PointerButton::Middle {
                    event.prevent_default();
                }
                let (x, y) = local_point(&target, &event);
                if let Err(e) = state.borrow_mut().ctx.pointer_down(x, y, button, now_ms()) {
                    tracing::warn!(error = %e, "pointer down failed");
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move and up go to the window so drags survive leaving the canvas.
        let Some(window) = web_sys::window() else {
            return closures;
        };
        {
            let state = state.clone();
            let target = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = local_point(&target, &event);
                if let Err(e) = state.borrow_mut().ctx.pointer_move(x, y, now_ms()) {
                    tracing::warn!(error = %e, "pointer move failed");
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
        {
            let state = state.clone();
            let target = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = local_point(&target, &event);
                if let Err(e) = state.borrow_mut().ctx.pointer_up(x, y, now_ms()) {
                    tracing::warn!(error = %e, "pointer up failed");
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
        closures
    }

    fn wire_wheel(canvas: &HtmlCanvasElement, state: &Shared) -> Closure<dyn FnMut(WheelEvent)> {
        let state = state.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
            // Keep the browser from zooming the page on ctrl+wheel.
            event.prevent_default();
            let (x, y) = local_point(&target, &event);
            let wheel = WheelInput {
                delta_x: event.delta_x(),
                delta_y: event.delta_y(),
                delta_mode: DeltaMode::from_dom(event.delta_mode()),
                modifiers: Modifiers {
                    ctrl: event.ctrl_key(),
                    meta: event.meta_key(),
                    alt: event.alt_key(),
                    shift: event.shift_key(),
                },
                screen_x: x,
                screen_y: y,
            };
            state.borrow_mut().ctx.wheel(&wheel, now_ms());
        }) as Box<dyn FnMut(WheelEvent)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok();
        closure
    }

    fn wire_keys(state: &Shared) -> Vec<Closure<dyn FnMut(KeyboardEvent)>> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Vec::new();
        };
        let mut closures: Vec<Closure<dyn FnMut(KeyboardEvent)>> = Vec::new();
        for (name, down) in [("keydown", true), ("keyup", false)] {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let mut s = state.borrow_mut();
                match event.key().as_str() {
                    " " => s.ctx.set_space_held(down),
                    "Escape" if down => s.ctx.cancel_drag(),
                    _ => {}
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
        closures
    }

    /// Run one composition pass. Returns whether the canvas was redrawn.
    #[wasm_bindgen]
    pub fn frame(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        let rendered = {
            let mut s = self.state.borrow_mut();
            let SharedState { ctx, renderer, .. } = &mut *s;
            ctx.frame(now_ms, renderer).map_err(JsValue::from)?
        };
        // Deliver outside the borrow; callbacks may call back into the view.
        let events: Vec<ViewportEvent> = self.outbox.borrow_mut().drain(..).collect();
        if let Some(callback) = &self.viewport_callback {
            for event in events {
                let value = serde_wasm_bindgen::to_value(&event)?;
                callback.call1(&JsValue::NULL, &value)?;
            }
        }
        Ok(rendered)
    }

    /// Register a callback receiving viewport events as plain objects.
    #[wasm_bindgen(js_name = "onViewportEvent")]
    pub fn on_viewport_event(&mut self, callback: Function) {
        self.viewport_callback = Some(callback);
    }

    /// Insert or replace a sheet from a plain object.
    #[wasm_bindgen(js_name = "loadSheet")]
    pub fn load_sheet(&mut self, id: String, data: JsValue) -> Result<(), JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(data)?;
        let id = SheetId::new(id);
        let mut s = self.state.borrow_mut();
        let sheet = MemorySheet::from_value(value, s.ctx.config()).map_err(JsValue::from)?;
        s.ctx.grid_mut().insert(id.clone(), sheet);
        s.ctx.handle_event(GridEvent::SheetOffsetsChanged { sheet: id.clone() });
        s.ctx.handle_event(GridEvent::SheetContentChanged { sheet: id.clone() });
        s.ctx.handle_event(GridEvent::SheetValidationsChanged { sheet: id });
        Ok(())
    }

    #[wasm_bindgen(js_name = "removeSheet")]
    pub fn remove_sheet(&mut self, id: String) {
        let id = SheetId::new(id);
        let mut s = self.state.borrow_mut();
        s.ctx.grid_mut().remove(&id);
        s.ctx.remove_sheet(&id);
    }

    #[wasm_bindgen(js_name = "switchSheet")]
    pub fn switch_sheet(&mut self, id: String) {
        self.state
            .borrow_mut()
            .ctx
            .handle_event(GridEvent::SheetSwitched { sheet: SheetId::new(id) });
    }

    #[wasm_bindgen(js_name = "setSelection")]
    pub fn set_selection(&mut self, selection: JsValue) -> Result<(), JsValue> {
        let selection: Selection = serde_wasm_bindgen::from_value(selection)?;
        self.state.borrow_mut().ctx.set_selection(selection);
        Ok(())
    }

    /// Set the accent color from a `#rrggbb` string.
    #[wasm_bindgen(js_name = "setAccentColor")]
    pub fn set_accent_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = Rgb::from_hex(hex).ok_or_else(|| JsValue::from_str("invalid color"))?;
        self.state.borrow_mut().ctx.set_accent(color);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setCopyRange")]
    pub fn set_copy_range(&mut self, range: JsValue) -> Result<(), JsValue> {
        let range: Option<CellRect> = serde_wasm_bindgen::from_value(range)?;
        self.state.borrow_mut().ctx.set_copy_range(range);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setHighlights")]
    pub fn set_highlights(&mut self, ranges: JsValue) -> Result<(), JsValue> {
        let ranges: Vec<CellRect> = serde_wasm_bindgen::from_value(ranges)?;
        self.state.borrow_mut().ctx.set_highlights(ranges);
        Ok(())
    }

    /// Touch pinch start; pairs with `pinchUpdate` / `pinchEnd`.
    #[wasm_bindgen(js_name = "pinchBegin")]
    pub fn pinch_begin(&mut self) {
        self.state.borrow_mut().ctx.pinch_begin();
    }

    /// Zoom by `scale_delta` around `(x, y)` in canvas CSS pixels.
    #[wasm_bindgen(js_name = "pinchUpdate")]
    pub fn pinch_update(&mut self, scale_delta: f64, x: f64, y: f64) {
        self.state
            .borrow_mut()
            .ctx
            .pinch_update(scale_delta, x, y, now_ms());
    }

    #[wasm_bindgen(js_name = "pinchEnd")]
    pub fn pinch_end(&mut self) {
        self.state.borrow_mut().ctx.pinch_end(now_ms());
    }

    /// Move requests produced by completed drags, as plain objects.
    #[wasm_bindgen(js_name = "takeCommands")]
    pub fn take_commands(&mut self) -> Result<JsValue, JsValue> {
        let commands = self.state.borrow_mut().ctx.take_commands();
        Ok(serde_wasm_bindgen::to_value(&commands)?)
    }

    /// Resize to `width` x `height` CSS pixels.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        let mut s = self.state.borrow_mut();
        s.dpr = if dpr > 0.0 { dpr } else { s.dpr };
        let dpr = s.dpr;
        s.renderer.resize(width, height, dpr);
        s.ctx.resize(width, height);
    }

    /// Saved per-sheet viewports as JSON, for restoring across sessions.
    #[wasm_bindgen(js_name = "saveViewports")]
    pub fn save_viewports(&self) -> Result<String, JsValue> {
        self.state
            .borrow()
            .ctx
            .viewport_store()
            .to_json()
            .map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = "restoreViewports")]
    pub fn restore_viewports(&mut self, json: &str) -> Result<(), JsValue> {
        let store = crate::layout::ViewportStore::from_json(json).map_err(JsValue::from)?;
        self.state.borrow_mut().ctx.set_viewport_store(store);
        Ok(())
    }
}
