//! The seat-map viewer state machine.
//!
//! A viewer renders one venue map into one container:
//!
//! - **Load**: `begin_load` issues the request, the host awaits the fetch,
//!   `finish_load` parses, binds, colors, mounts and wires listeners. The
//!   two halves are separate so nothing is borrowed across the suspension
//!   point; teardown may run while the fetch is in flight and cancels the
//!   token the continuation checks.
//!
//! - **Interaction**: clicks toggle section membership in the
//!   `SelectionState`; hover applies transient emphasis to unselected shapes
//!   of the hovered section and shows the tooltip. The `selected` class is
//!   always written from the selection set.
//!
//! - **Teardown**: releases every listener guard, removes the tooltip and
//!   cancels any pending load. Also run on drop.

use crate::bus::SelectionNotifier;
use crate::cancel::CancellationToken;
use crate::config::ViewerConfig;
use crate::error::{FetchError, MountError, ViewerError};
use crate::fetch::Fetcher;
use crate::input::{PointerEvent, ShapeEvent};
use crate::selection::SelectionState;
use crate::surface::Surface;
use crate::tooltip::Tooltip;
use seatmap_core::binding::STAMP_SECTION_NAME;
use seatmap_core::{
    BindingTable, NodeIndex, SectionId, SectionRecord, SvgDocument, SvgElement,
    apply_base_colors, bind_sections, parse_svg,
};

/// Where a viewer is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Container not found at construction; every operation is a no-op.
    Inert,
    Idle,
    Loading,
    Ready,
    /// Fallback message shown; permanent for this instance.
    Failed,
    TornDown,
}

/// Issued by `begin_load`: what to fetch, and the token to hand back.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub url: String,
    pub token: CancellationToken,
}

/// How a load ended. Failures are handled inside the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    /// The fallback message is showing; `reason` is what was logged.
    Fallback { reason: String },
    /// The viewer was torn down first; the container was not touched.
    Cancelled,
}

pub struct SeatMapViewer<S: Surface> {
    container_id: String,
    venue: String,
    sections: Vec<SectionRecord>,
    config: ViewerConfig,
    notifier: SelectionNotifier,
    surface: Option<S>,
    state: LoadState,
    doc: SvgDocument,
    bindings: BindingTable,
    /// Shapes that received listeners, in document order.
    shapes: Vec<NodeIndex>,
    selection: SelectionState,
    tooltip: Tooltip,
    listeners: Vec<S::Listener>,
    pending: Option<CancellationToken>,
}

impl<S: Surface> SeatMapViewer<S> {
    /// Create a viewer. `surface` is the resolved container; `None` means
    /// the container id did not resolve, which leaves the viewer inert.
    pub fn new(
        surface: Option<S>,
        container_id: &str,
        venue: &str,
        sections: Vec<SectionRecord>,
        notifier: SelectionNotifier,
        config: ViewerConfig,
    ) -> Self {
        let state = if surface.is_some() {
            LoadState::Idle
        } else {
            log::error!("Container with id \"{container_id}\" not found");
            LoadState::Inert
        };
        Self {
            container_id: container_id.to_string(),
            venue: venue.to_string(),
            sections,
            config,
            notifier,
            surface,
            state,
            doc: SvgDocument::new(),
            bindings: BindingTable::default(),
            shapes: Vec::new(),
            selection: SelectionState::new(),
            tooltip: Tooltip::default(),
            listeners: Vec::new(),
            pending: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The mounted document (empty until a load renders).
    pub fn document(&self) -> &SvgDocument {
        &self.doc
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Shapes that carry listeners.
    pub fn interactive_shapes(&self) -> &[NodeIndex] {
        &self.shapes
    }

    pub fn selected(&self) -> Vec<SectionId> {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: SectionId) -> bool {
        self.selection.contains(id)
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    // ─── Load ────────────────────────────────────────────────────────────

    /// Start loading the venue map. Only valid once, from `Idle`.
    pub fn begin_load(&mut self) -> Result<LoadRequest, ViewerError> {
        match self.state {
            LoadState::Idle => {}
            LoadState::Inert => {
                log::warn!("load ignored: viewer for `{}` is inert", self.container_id);
                return Err(ViewerError::Inert(self.container_id.clone()));
            }
            LoadState::TornDown => return Err(ViewerError::TornDown),
            other => {
                log::warn!("load ignored: venue map for `{}` already loaded", self.venue);
                return Err(ViewerError::AlreadyLoaded(other));
            }
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        self.state = LoadState::Loading;
        let url = self.config.svg_url(&self.venue);
        log::debug!("loading venue map {url}");
        Ok(LoadRequest { url, token })
    }

    /// Continuation of `begin_load` once the fetch resolved.
    pub fn finish_load(
        &mut self,
        token: &CancellationToken,
        result: Result<String, FetchError>,
    ) -> Result<LoadOutcome, ViewerError> {
        if token.is_cancelled() {
            log::info!(
                "venue map for `{}` arrived after teardown; dropped",
                self.venue
            );
            return Ok(LoadOutcome::Cancelled);
        }
        if self.state != LoadState::Loading {
            return Err(ViewerError::NotLoading(self.state));
        }
        self.pending = None;

        let mounted = result
            .map_err(|e| e.to_string())
            .and_then(|markup| parse_svg(&markup).map_err(|e| e.to_string()))
            .and_then(|doc| self.render(doc).map_err(|e| e.to_string()));

        match mounted {
            Ok(()) => Ok(LoadOutcome::Rendered),
            Err(reason) => {
                log::error!("Error loading SVG for `{}`: {reason}", self.venue);
                if let Some(surface) = self.surface.as_mut() {
                    surface.show_fallback(&self.config.fallback_message);
                }
                self.state = LoadState::Failed;
                Ok(LoadOutcome::Fallback { reason })
            }
        }
    }

    /// Fetch and render in one go.
    pub async fn load_and_render<F: Fetcher>(
        &mut self,
        fetcher: &F,
    ) -> Result<LoadOutcome, ViewerError> {
        let request = self.begin_load()?;
        let result = fetcher.fetch_text(&request.url).await;
        self.finish_load(&request.token, result)
    }

    fn render(&mut self, mut doc: SvgDocument) -> Result<(), MountError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        // Selection marks are only ever written from `SelectionState`.
        let class = &self.config.selected_class;
        for idx in doc.with_class(class) {
            if let Some(el) = doc.element_mut(idx) {
                el.remove_class(class);
            }
        }

        self.bindings = bind_sections(&mut doc, &self.sections);
        apply_base_colors(
            &mut doc,
            &self.bindings,
            &self.sections,
            self.config.fill_policy(),
        );

        self.shapes = doc.interactive_shapes();
        for &shape in &self.shapes {
            if let Some(el) = doc.element_mut(shape) {
                el.set_style("cursor", "pointer");
                el.set_style("transition", "all 0.2s ease");
            }
        }

        if let Err(err) = surface.mount(&doc) {
            self.bindings = BindingTable::default();
            self.shapes.clear();
            return Err(err);
        }
        self.listeners = self.shapes.iter().map(|&s| surface.listen(s)).collect();
        self.tooltip.ensure_created(surface, &self.config.tooltip_id);

        log::info!(
            "venue map `{}` ready: {} interactive shapes, {} sections bound",
            self.venue,
            self.shapes.len(),
            self.bindings.sections().count()
        );
        self.doc = doc;
        self.state = LoadState::Ready;
        Ok(())
    }

    // ─── Interaction ─────────────────────────────────────────────────────

    /// Route a pointer event. Returns true if anything visible changed.
    pub fn handle_event(&mut self, event: ShapeEvent) -> bool {
        match event.pointer {
            PointerEvent::Click => self.handle_click(event.shape),
            PointerEvent::Enter { x, y } => self.handle_enter(event.shape, x, y),
            PointerEvent::Leave => self.handle_leave(),
        }
    }

    /// Toggle the clicked shape's section and notify.
    pub fn handle_click(&mut self, shape: NodeIndex) -> bool {
        if self.state != LoadState::Ready {
            return false;
        }
        let Some(section) = self.bindings.section_of(shape) else {
            let marker = self
                .doc
                .element(shape)
                .and_then(|el| el.attr("data-section"))
                .unwrap_or_default();
            log::info!("Clicked on unmapped section: {marker:?}");
            return false;
        };

        let now_selected = self.selection.toggle(section);
        let class = self.config.selected_class.clone();
        let targets = self.bindings.shapes_of(section).to_vec();
        self.patch(&targets, |el| {
            if now_selected {
                let added = el.add_class(&class);
                // Selection visually dominates hover.
                let cleared = clear_emphasis(el);
                added || cleared
            } else {
                el.remove_class(&class)
            }
        });

        let selection = self.selection.ids();
        self.notifier.notify(&self.config.event_name, &selection);
        true
    }

    /// Emphasize the hovered section and show its name.
    pub fn handle_enter(&mut self, shape: NodeIndex, x: f64, y: f64) -> bool {
        if self.state != LoadState::Ready {
            return false;
        }
        let section = self.bindings.section_of(shape);
        let targets: Vec<NodeIndex> = match section {
            Some(id) if self.selection.contains(id) => Vec::new(),
            Some(id) => self.bindings.shapes_of(id).to_vec(),
            None => vec![shape],
        };
        let opacity = self.config.hover_opacity.to_string();
        let filter = self.config.hover_filter();
        self.patch(&targets, |el| {
            let changed = el.style_value("opacity").as_deref() != Some(opacity.as_str())
                || el.style_value("filter").as_deref() != Some(filter.as_str());
            el.set_style("opacity", &opacity);
            el.set_style("filter", &filter);
            changed
        });

        let name = section
            .and_then(|_| self.doc.element(shape))
            .and_then(|el| el.attr(STAMP_SECTION_NAME))
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let (Some(name), Some(surface)) = (name, self.surface.as_mut()) {
            self.tooltip
                .show(surface, &name, x, y, self.config.tooltip_offset);
        }
        true
    }

    /// Clear hover emphasis from every unselected shape and hide the tooltip.
    pub fn handle_leave(&mut self) -> bool {
        if self.state != LoadState::Ready {
            return false;
        }
        let targets: Vec<NodeIndex> = self
            .hoverable_shapes()
            .into_iter()
            .filter(|&s| !self.is_shape_selected(s))
            .collect();
        self.patch(&targets, clear_emphasis);
        if let Some(surface) = self.surface.as_mut() {
            self.tooltip.hide(surface);
        }
        true
    }

    /// Empty the selection and remove every `selected` marker in the map.
    ///
    /// Unlike a user toggle this does not notify.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        if self.state != LoadState::Ready {
            return;
        }
        let class = self.config.selected_class.clone();
        let targets = self.doc.with_class(&class);
        self.patch(&targets, |el| el.remove_class(&class));
    }

    // ─── Teardown ────────────────────────────────────────────────────────

    /// Release listeners, remove the tooltip and cancel any pending load.
    pub fn teardown(&mut self) {
        if self.state == LoadState::TornDown {
            return;
        }
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        let released = self.listeners.len();
        self.listeners.clear();
        if let Some(surface) = self.surface.as_mut() {
            self.tooltip.remove(surface);
        }
        self.state = LoadState::TornDown;
        log::debug!(
            "viewer for `{}` torn down; released {released} shape listeners",
            self.container_id
        );
    }

    // ─── Helpers ─────────────────────────────────────────────────────────

    /// Every shape hover can emphasize: the interactive shapes plus all
    /// bound shapes, which may sit outside `#shapes`.
    fn hoverable_shapes(&self) -> Vec<NodeIndex> {
        let mut all: Vec<NodeIndex> = self
            .bindings
            .sections()
            .flat_map(|id| self.bindings.shapes_of(id).iter().copied())
            .chain(self.shapes.iter().copied())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    fn is_shape_selected(&self, shape: NodeIndex) -> bool {
        self.bindings
            .section_of(shape)
            .is_some_and(|id| self.selection.contains(id))
    }

    /// Apply `f` to each target element and sync the ones it changed.
    fn patch(&mut self, targets: &[NodeIndex], mut f: impl FnMut(&mut SvgElement) -> bool) {
        for &idx in targets {
            let changed = self.doc.element_mut(idx).is_some_and(&mut f);
            if changed && let Some(surface) = self.surface.as_mut() {
                surface.sync_element(&self.doc, idx);
            }
        }
    }
}

impl<S: Surface> Drop for SeatMapViewer<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Remove transient hover emphasis. Returns true if anything was removed.
fn clear_emphasis(el: &mut SvgElement) -> bool {
    let a = el.remove_style("opacity");
    let b = el.remove_style("filter");
    a || b
}
