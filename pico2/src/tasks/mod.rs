//! Embassy tasks of the trip computer firmware.
//!
//! - `edges`: distance and injector edge handlers (high-priority executor)
//! - `buttons`: button polling (thread executor)
//! - `flush`: framebuffer DMA transfers (thread executor)

pub mod buttons;
pub mod edges;
pub mod flush;

pub use buttons::{ButtonPins, POPUP_REQUEST, RESET_REQUEST, button_task};
pub use edges::{distance_edge_task, injector_edge_task};
pub use flush::{FLUSH_DONE, FLUSH_SIGNAL, display_flush_task};
