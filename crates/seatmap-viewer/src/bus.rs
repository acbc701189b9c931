//! Selection notifications.
//!
//! The viewer holds no reference to any other page component. After a
//! user toggle it either calls the caller's callback or publishes on a
//! `SelectionBus`, where zero or more independent listeners receive the
//! event synchronously. Publishing is fire-and-forget: there is no delivery
//! confirmation and no subscriber-count guarantee.

use seatmap_core::SectionId;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Payload of a selection notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChanged {
    /// Notification name (`stadium-section-filter` by default).
    #[serde(skip)]
    pub name: String,
    pub section_ids: Vec<SectionId>,
}

impl SelectionChanged {
    /// `{"sectionIds": [...]}`, the detail object of the page-wide event.
    pub fn detail_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"sectionIds":[]}"#.to_string())
    }
}

type Listener = Rc<dyn Fn(&SelectionChanged)>;

#[derive(Default)]
struct BusInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Publish/subscribe channel for selection changes. Clones share listeners.
#[derive(Clone, Default)]
pub struct SelectionBus {
    inner: Rc<BusInner>,
}

impl fmt::Debug for SelectionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// `Subscription` is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&SelectionChanged) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver to every current listener. Returns how many were called.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe
    /// or unsubscribe while being notified.
    pub fn publish(&self, event: &SelectionChanged) -> usize {
        let snapshot: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// RAII registration on a `SelectionBus`.
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Where the viewer reports selection changes.
pub enum SelectionNotifier {
    /// Caller-supplied callback, invoked with the full ordered selection.
    Callback(Box<dyn FnMut(&[SectionId])>),
    /// Default: publish a `SelectionChanged` on the bus.
    Broadcast(SelectionBus),
}

impl Default for SelectionNotifier {
    fn default() -> Self {
        Self::Broadcast(SelectionBus::new())
    }
}

impl fmt::Debug for SelectionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback"),
            Self::Broadcast(bus) => f.debug_tuple("Broadcast").field(bus).finish(),
        }
    }
}

impl SelectionNotifier {
    pub fn callback(f: impl FnMut(&[SectionId]) + 'static) -> Self {
        Self::Callback(Box::new(f))
    }

    pub(crate) fn notify(&mut self, event_name: &str, selection: &[SectionId]) {
        match self {
            Self::Callback(f) => f(selection),
            Self::Broadcast(bus) => {
                log::info!("selected sections: {selection:?}");
                let delivered = bus.publish(&SelectionChanged {
                    name: event_name.to_string(),
                    section_ids: selection.to_vec(),
                });
                log::debug!("{event_name} delivered to {delivered} listeners");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ids: &[&str]) -> SelectionChanged {
        SelectionChanged {
            name: "stadium-section-filter".to_string(),
            section_ids: ids.iter().map(|s| SectionId::intern(s)).collect(),
        }
    }

    #[test]
    fn every_listener_receives_each_publish() {
        let bus = SelectionBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |e| seen.borrow_mut().push(("a", e.section_ids.len())))
        };
        let b = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |e| seen.borrow_mut().push(("b", e.section_ids.len())))
        };
        assert_eq!(bus.publish(&event(&["A1", "B2"])), 2);
        assert_eq!(*seen.borrow(), vec![("a", 2), ("b", 2)]);
        drop(a);
        drop(b);
    }

    #[test]
    fn publish_without_listeners_is_fine() {
        assert_eq!(SelectionBus::new().publish(&event(&[])), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus = SelectionBus::new();
        let sub = bus.subscribe(|_| {});
        assert_eq!(bus.listener_count(), 1);
        drop(sub);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_publish() {
        let bus = SelectionBus::new();
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::default();
        let _sub = {
            let bus2 = bus.clone();
            let late = Rc::clone(&late);
            bus.subscribe(move |_| late.borrow_mut().push(bus2.subscribe(|_| {})))
        };
        assert_eq!(bus.publish(&event(&["A1"])), 1);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn detail_json_shape() {
        assert_eq!(event(&["A1"]).detail_json(), r#"{"sectionIds":["A1"]}"#);
    }
}
