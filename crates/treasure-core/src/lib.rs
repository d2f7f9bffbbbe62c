#![forbid(unsafe_code)]

//! Core of the Treasure Map page: records, search filtering, theme, particle
//! simulation, and the page controller.
//!
//! Nothing in this crate touches a clock, a DOM, or a terminal. Hosts
//! (`treasure-web`, `treasure-tui`) feed input and monotonic time in, and
//! draw through the [`surface::Surface`] seam.

pub mod config;
pub mod filter;
pub mod logging;
pub mod page;
pub mod particles;
pub mod pointer;
pub mod record;
pub mod surface;
pub mod theme;
pub mod view;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};

pub use config::{ConfigError, PageConfig};
pub use filter::{SearchState, SearchTicket, matching_records};
pub use page::{Cmd, Msg, TreasurePage};
pub use particles::{Particle, ParticleField, ParticleRng};
pub use pointer::PointerState;
pub use record::{Record, TREASURE_NOTES};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use theme::{Rgba, Theme};
pub use view::PageView;
