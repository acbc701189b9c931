pub mod bus;
pub mod cancel;
pub mod config;
pub mod error;
pub mod fetch;
pub mod input;
pub mod selection;
pub mod surface;
pub mod tooltip;
pub mod viewer;

pub use bus::{SelectionBus, SelectionChanged, SelectionNotifier, Subscription};
pub use cancel::CancellationToken;
pub use config::ViewerConfig;
pub use error::{FetchError, MountError, ViewerError};
pub use fetch::Fetcher;
pub use input::{PointerEvent, ShapeEvent};
pub use selection::SelectionState;
pub use surface::{Content, MemoryListener, MemorySurface, Surface, TooltipElement};
pub use tooltip::Tooltip;
pub use viewer::{LoadOutcome, LoadRequest, LoadState, SeatMapViewer};
