//! WASM bridge for the seat-map viewer: exposes `StadiumSvgViewer` and the
//! name-normalization helpers to page scripts.
//!
//! Compiled via `wasm-pack build --target web`.

mod dom;
mod fetch;
mod logger;

use dom::{Dispatch, DomSurface};
use fetch::WebFetcher;
use seatmap_core::{SectionId, SectionRecord, Severity, check_bindings, parse_svg};
use seatmap_viewer::{
    Fetcher, LoadOutcome, SeatMapViewer, SelectionBus, SelectionChanged, SelectionNotifier,
    ShapeEvent, Subscription, ViewerConfig,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

type SharedViewer = Rc<RefCell<SeatMapViewer<DomSurface>>>;

// ─── Notification delivery ──────────────────────────────────────────────

/// Selections produced while the viewer is borrowed. Delivered once the
/// borrow is released, so page callbacks may call back into the viewer.
struct Outbox {
    pending: RefCell<Vec<Vec<SectionId>>>,
    callback: Option<js_sys::Function>,
    event_name: String,
}

impl Outbox {
    fn push(&self, ids: &[SectionId]) {
        self.pending.borrow_mut().push(ids.to_vec());
    }

    fn flush(&self) {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        for ids in batch {
            let delivered = match &self.callback {
                Some(f) => f
                    .call1(&JsValue::NULL, &id_array(&ids))
                    .map(|_| ()),
                None => dispatch_window_event(&self.event_name, ids),
            };
            if let Err(err) = delivered {
                log::error!("selection notification failed: {}", describe(&err));
            }
        }
    }
}

fn id_array(ids: &[SectionId]) -> js_sys::Array {
    ids.iter().map(|id| JsValue::from_str(id.as_str())).collect()
}

/// `window.dispatchEvent(new CustomEvent(name, { detail: { sectionIds } }))`
fn dispatch_window_event(name: &str, ids: Vec<SectionId>) -> Result<(), JsValue> {
    let event = SelectionChanged {
        name: name.to_string(),
        section_ids: ids,
    };
    let detail = js_sys::JSON::parse(&event.detail_json())?;
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    let custom = web_sys::CustomEvent::new_with_event_init_dict(name, &init)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.dispatch_event(&custom)?;
    Ok(())
}

fn dispatcher(viewer: Weak<RefCell<SeatMapViewer<DomSurface>>>, outbox: Rc<Outbox>) -> Dispatch {
    Rc::new(move |event: ShapeEvent| {
        let Some(cell) = viewer.upgrade() else {
            return;
        };
        {
            let Ok(mut v) = cell.try_borrow_mut() else {
                log::warn!("pointer event dropped: viewer busy");
                return;
            };
            v.handle_event(event);
        }
        outbox.flush();
    })
}

// ─── JS-facing viewer ───────────────────────────────────────────────────

/// Interactive venue map bound to one page container.
///
/// Construction never fails on a missing container: the viewer is inert and
/// the error is logged. Malformed section or config JSON throws.
///
/// Construction does not fetch anything. Nothing renders until `load()` is
/// called:
///
/// ```js
/// const viewer = new StadiumSvgViewer("stadium-map", "anfieldStadium", sections);
/// await viewer.load();
/// ```
#[wasm_bindgen]
pub struct StadiumSvgViewer {
    inner: SharedViewer,
    outbox: Rc<Outbox>,
    /// Keeps the window-event listener registered on the bus.
    _subscription: Option<Subscription>,
}

#[wasm_bindgen]
impl StadiumSvgViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        stadium_key: &str,
        sections_json: &str,
        on_section_click: Option<js_sys::Function>,
        config_json: Option<String>,
    ) -> Result<StadiumSvgViewer, JsValue> {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Info);

        let sections: Vec<SectionRecord> = serde_json::from_str(sections_json)
            .map_err(|e| JsValue::from_str(&format!("invalid sections JSON: {e}")))?;
        let config = match config_json {
            Some(json) => ViewerConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("invalid viewer config: {e}")))?,
            None => ViewerConfig::default(),
        };

        let outbox = Rc::new(Outbox {
            pending: RefCell::default(),
            callback: on_section_click,
            event_name: config.event_name.clone(),
        });
        let (notifier, subscription) = if outbox.callback.is_some() {
            let sink = Rc::clone(&outbox);
            (SelectionNotifier::callback(move |ids| sink.push(ids)), None)
        } else {
            let bus = SelectionBus::new();
            let sink = Rc::clone(&outbox);
            let sub = bus.subscribe(move |e: &SelectionChanged| sink.push(&e.section_ids));
            (SelectionNotifier::Broadcast(bus), Some(sub))
        };

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<SeatMapViewer<DomSurface>>>| {
            let surface =
                DomSurface::attach(container_id, dispatcher(weak.clone(), Rc::clone(&outbox)));
            RefCell::new(SeatMapViewer::new(
                surface,
                container_id,
                stadium_key,
                sections,
                notifier,
                config,
            ))
        });

        Ok(Self {
            inner,
            outbox,
            _subscription: subscription,
        })
    }

    /// Fetch and render the venue map. Resolves to `"rendered"`,
    /// `"fallback"` or `"cancelled"`; rejects on a second call or after
    /// `destroy()`.
    pub fn load(&self) -> js_sys::Promise {
        let request = self.inner.borrow_mut().begin_load();
        let viewer = Rc::downgrade(&self.inner);
        future_to_promise(async move {
            let request = request.map_err(|e| JsValue::from_str(&e.to_string()))?;
            let result = WebFetcher.fetch_text(&request.url).await;
            let Some(cell) = viewer.upgrade() else {
                return Ok(JsValue::from_str("cancelled"));
            };
            let outcome = cell
                .borrow_mut()
                .finish_load(&request.token, result)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(JsValue::from_str(match outcome {
                LoadOutcome::Rendered => "rendered",
                LoadOutcome::Fallback { .. } => "fallback",
                LoadOutcome::Cancelled => "cancelled",
            }))
        })
    }

    /// Deselect everything without notifying.
    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) {
        if let Ok(mut v) = self.inner.try_borrow_mut() {
            v.clear_selection();
        }
    }

    /// Selected section ids, in selection order.
    #[wasm_bindgen(js_name = selectedSections)]
    pub fn selected_sections(&self) -> js_sys::Array {
        id_array(&self.inner.borrow().selected())
    }

    /// Lifecycle state: `idle`, `loading`, `ready`, `failed`, `inert` or
    /// `torndown`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        format!("{:?}", self.inner.borrow().state()).to_lowercase()
    }

    /// Detach every listener and remove the tooltip. The rendered map stays.
    pub fn destroy(&self) {
        if let Ok(mut v) = self.inner.try_borrow_mut() {
            v.teardown();
        }
        self.outbox.pending.borrow_mut().clear();
    }
}

// ─── Free functions ─────────────────────────────────────────────────────

/// Map a ticket-listing section name to its venue-map key.
#[wasm_bindgen(js_name = normalizeSectionName)]
pub fn normalize_section_name(name: &str) -> Option<String> {
    seatmap_core::normalize_section_name(name)
}

/// Map a stadium name to the key of its venue map.
#[wasm_bindgen(js_name = svgKeyFromStadiumName)]
pub fn svg_key_from_stadium_name(name: &str) -> Option<String> {
    seatmap_core::venue_key_for_stadium(name)
}

#[derive(Serialize)]
struct DiagnosticJson<'a> {
    rule: &'a str,
    severity: &'a str,
    message: &'a str,
}

/// Check section records against venue-map markup. Returns a JSON array of
/// `{rule, severity, message}`.
#[wasm_bindgen(js_name = checkVenueMap)]
pub fn check_venue_map(svg: &str, sections_json: &str) -> Result<String, JsValue> {
    let sections: Vec<SectionRecord> = serde_json::from_str(sections_json)
        .map_err(|e| JsValue::from_str(&format!("invalid sections JSON: {e}")))?;
    let doc = parse_svg(svg).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let diags = check_bindings(&doc, &sections);
    let out: Vec<DiagnosticJson<'_>> = diags
        .iter()
        .map(|d| DiagnosticJson {
            rule: d.rule,
            severity: match d.severity {
                Severity::Warning => "warning",
                Severity::Info => "info",
            },
            message: &d.message,
        })
        .collect();
    serde_json::to_string(&out).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Install a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("seat map panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
