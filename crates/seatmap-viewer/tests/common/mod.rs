//! Shared helpers for viewer integration tests.
#![allow(dead_code)]

use seatmap_core::{NodeIndex, SectionId, SectionRecord, SvgDocument};
use seatmap_viewer::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const STADIUM_A: &str = include_str!("../fixtures/stadium-a.svg");

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serves one venue map; every other URL is a 404.
pub struct StaticFetcher {
    pub path: String,
    pub markup: String,
    pub requested: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(path: &str, markup: &str) -> Self {
        Self {
            path: path.to_string(),
            markup: markup.to_string(),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn stadium_a() -> Self {
        Self::new("/static/events/stadiums/svg/stadium-a.svg", STADIUM_A)
    }
}

impl Fetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        if url == self.path {
            Ok(self.markup.clone())
        } else {
            Err(FetchError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
            })
        }
    }
}

pub fn sections() -> Vec<SectionRecord> {
    vec![
        SectionRecord::new("A1", "Block A1", "#FF0000", "blockA1"),
        SectionRecord::new("B2", "Block B2", "navy", "blockB2"),
    ]
}

/// Every selection the callback reported, as plain strings.
pub type Calls = Rc<RefCell<Vec<Vec<String>>>>;

pub fn recording_notifier() -> (SelectionNotifier, Calls) {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    let notifier = SelectionNotifier::callback(move |ids: &[SectionId]| {
        sink.borrow_mut()
            .push(ids.iter().map(|id| id.as_str().to_string()).collect());
    });
    (notifier, calls)
}

pub fn viewer(
    venue: &str,
    sections: Vec<SectionRecord>,
    notifier: SelectionNotifier,
) -> SeatMapViewer<MemorySurface> {
    SeatMapViewer::new(
        Some(MemorySurface::new()),
        "map",
        venue,
        sections,
        notifier,
        ViewerConfig::default(),
    )
}

/// Viewer over stadium-a with the standard sections, already loaded.
pub async fn loaded() -> (SeatMapViewer<MemorySurface>, Calls) {
    init_logging();
    let (notifier, calls) = recording_notifier();
    let mut v = viewer("stadium-a", sections(), notifier);
    let outcome = v.load_and_render(&StaticFetcher::stadium_a()).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Rendered);
    (v, calls)
}

pub fn shape(v: &SeatMapViewer<MemorySurface>, id: &str) -> NodeIndex {
    v.document()
        .find_by_id(id)
        .unwrap_or_else(|| panic!("no element with id {id}"))
}

pub fn has_class(v: &SeatMapViewer<MemorySurface>, id: &str, class: &str) -> bool {
    v.document().element(shape(v, id)).unwrap().has_class(class)
}

pub fn style(v: &SeatMapViewer<MemorySurface>, id: &str, prop: &str) -> Option<String> {
    v.document().element(shape(v, id)).unwrap().style_value(prop)
}

pub fn selected(v: &SeatMapViewer<MemorySurface>) -> Vec<String> {
    v.selected().iter().map(|id| id.as_str().to_string()).collect()
}

/// Surface whose host refuses to build the map.
#[derive(Debug, Default)]
pub struct RefusingSurface {
    pub fallback: Option<String>,
    pub listened: usize,
    pub tooltip_created: bool,
}

impl Surface for RefusingSurface {
    type Listener = ();

    fn mount(&mut self, _doc: &SvgDocument) -> Result<(), MountError> {
        Err(MountError("createElementNS rejected `svg`".to_string()))
    }

    fn show_fallback(&mut self, message: &str) {
        self.fallback = Some(message.to_string());
    }

    fn sync_element(&mut self, _doc: &SvgDocument, _idx: NodeIndex) {}

    fn listen(&mut self, _shape: NodeIndex) -> Self::Listener {
        self.listened += 1;
    }

    fn create_tooltip(&mut self, _id: &str) {
        self.tooltip_created = true;
    }

    fn show_tooltip(&mut self, _text: &str, _x: f64, _y: f64) {}
    fn hide_tooltip(&mut self) {}
    fn remove_tooltip(&mut self) {}
}
