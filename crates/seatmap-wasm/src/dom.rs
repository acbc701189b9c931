//! `Surface` over the page DOM.
//!
//! The document is built with `createElementNS` so every mounted element can
//! be kept in a `NodeIndex → Element` map; `sync_element` then rewrites one
//! element's attributes from the viewer's copy of the document.

use seatmap_core::{NodeIndex, SvgDocument, SvgElement, SvgNode};
use seatmap_viewer::{MountError, ShapeEvent, Surface};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Node};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

const TOOLTIP_CSS: &str = "position: fixed; background: rgba(0, 0, 0, 0.85); color: white; \
     padding: 8px 12px; border-radius: 4px; font-size: 14px; pointer-events: none; \
     z-index: 10000; display: none; white-space: nowrap;";
const FALLBACK_CSS: &str = "padding: 20px; text-align: center; color: #666;";

/// Routes a pointer event on a mounted shape back to the owning viewer.
pub type Dispatch = Rc<dyn Fn(ShapeEvent)>;

pub struct DomSurface {
    document: Document,
    container: Element,
    nodes: HashMap<NodeIndex, Element>,
    tooltip: Option<HtmlElement>,
    dispatch: Dispatch,
}

impl DomSurface {
    /// Resolve the container element. `None` if the page has no such id.
    pub fn attach(container_id: &str, dispatch: Dispatch) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let container = document.get_element_by_id(container_id)?;
        Some(Self {
            document,
            container,
            nodes: HashMap::new(),
            tooltip: None,
            dispatch,
        })
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.container.set_inner_html("");
    }

    fn build(&mut self, doc: &SvgDocument, idx: NodeIndex, parent: &Node) -> Result<(), JsValue> {
        match doc.graph.node_weight(idx) {
            Some(SvgNode::Element(el)) => {
                let node = self
                    .document
                    .create_element_ns(Some(SVG_NS), el.local_name())?;
                write_attrs(&node, el)?;
                parent.append_child(&node)?;
                for child in doc.children(idx) {
                    self.build(doc, child, &node)?;
                }
                self.nodes.insert(idx, node);
            }
            Some(SvgNode::Text(text)) => {
                parent.append_child(&self.document.create_text_node(text))?;
            }
            Some(SvgNode::Root) | None => {}
        }
        Ok(())
    }

    fn build_fallback(&self, message: &str) -> Result<(), JsValue> {
        let wrapper = self.document.create_element("div")?;
        wrapper.set_attribute("style", FALLBACK_CSS)?;
        let p = self.document.create_element("p")?;
        p.set_text_content(Some(message));
        wrapper.append_child(&p)?;
        self.container.append_child(&wrapper)?;
        Ok(())
    }

    fn build_tooltip(&self, id: &str) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into()
            .map_err(JsValue::from)?;
        el.set_id(id);
        el.set_attribute("style", TOOLTIP_CSS)?;
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&el)?;
        Ok(el)
    }
}

/// Copy attributes onto a mounted element. Namespace declarations are
/// implied by `createElementNS` and skipped.
fn write_attrs(node: &Element, el: &SvgElement) -> Result<(), JsValue> {
    for (name, value) in &el.attrs {
        if name == "xmlns" || name.starts_with("xmlns:") {
            continue;
        }
        if name.starts_with("xlink:") {
            node.set_attribute_ns(Some(XLINK_NS), name, value)?;
        } else {
            node.set_attribute(name, value)?;
        }
    }
    Ok(())
}

impl Surface for DomSurface {
    type Listener = DomListener;

    fn mount(&mut self, doc: &SvgDocument) -> Result<(), MountError> {
        self.clear();
        let container: Node = self.container.clone().into();
        for child in doc.children(doc.root) {
            if let Err(err) = self.build(doc, child, &container) {
                self.clear();
                return Err(MountError(crate::describe(&err)));
            }
        }
        Ok(())
    }

    fn show_fallback(&mut self, message: &str) {
        self.clear();
        if let Err(err) = self.build_fallback(message) {
            log::error!("failed to show fallback: {}", crate::describe(&err));
        }
    }

    fn sync_element(&mut self, doc: &SvgDocument, idx: NodeIndex) {
        let (Some(node), Some(el)) = (self.nodes.get(&idx), doc.element(idx)) else {
            return;
        };
        let stale: Vec<String> = node
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter(|name| el.attr(name).is_none())
            .collect();
        for name in stale {
            let _ = node.remove_attribute(&name);
        }
        if let Err(err) = write_attrs(node, el) {
            log::warn!("failed to sync shape attributes: {}", crate::describe(&err));
        }
    }

    fn listen(&mut self, shape: NodeIndex) -> DomListener {
        let mut listener = DomListener {
            target: self.nodes.get(&shape).cloned(),
            closures: Vec::new(),
        };
        let dispatch = Rc::clone(&self.dispatch);
        listener.add("click", move |_| dispatch(ShapeEvent::click(shape)));
        let dispatch = Rc::clone(&self.dispatch);
        listener.add("mouseenter", move |event: MouseEvent| {
            dispatch(ShapeEvent::enter(
                shape,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            ));
        });
        let dispatch = Rc::clone(&self.dispatch);
        listener.add("mouseleave", move |_| dispatch(ShapeEvent::leave(shape)));
        listener
    }

    fn create_tooltip(&mut self, id: &str) {
        if self.tooltip.is_some() {
            return;
        }
        match self.build_tooltip(id) {
            Ok(el) => self.tooltip = Some(el),
            Err(err) => log::warn!("failed to create tooltip: {}", crate::describe(&err)),
        }
    }

    fn show_tooltip(&mut self, text: &str, x: f64, y: f64) {
        let Some(tip) = &self.tooltip else {
            return;
        };
        tip.set_text_content(Some(text));
        let style = tip.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{x}px"));
        let _ = style.set_property("top", &format!("{y}px"));
    }

    fn hide_tooltip(&mut self) {
        if let Some(tip) = &self.tooltip {
            let _ = tip.style().set_property("display", "none");
        }
    }

    fn remove_tooltip(&mut self) {
        if let Some(tip) = self.tooltip.take() {
            tip.remove();
        }
    }
}

// ─── Listeners ───────────────────────────────────────────────────────────

/// Pointer listeners on one shape. Dropping detaches them.
pub struct DomListener {
    target: Option<Element>,
    closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

impl DomListener {
    fn add(&mut self, kind: &'static str, f: impl FnMut(MouseEvent) + 'static) {
        let Some(target) = &self.target else {
            return;
        };
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(MouseEvent)>);
        if target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            self.closures.push((kind, closure));
        }
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let Some(target) = &self.target else {
            return;
        };
        for (kind, closure) in self.closures.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}
