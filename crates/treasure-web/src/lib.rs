#![forbid(unsafe_code)]

//! WASM frontend for the Treasure Map page.
//!
//! JS creates a [`TreasureMapWeb`], mounts it into a host element, and
//! unmounts (or frees) it when done:
//!
//! ```js
//! const page = new TreasureMapWeb();
//! page.mount(document.getElementById("app"), { particleCount: 80 });
//! // ...
//! page.unmount();
//! ```
//!
//! Mounting builds the page markup, sizes the background canvas to the
//! viewport, starts the `requestAnimationFrame` loop, and registers the
//! window and control listeners. Unmounting stops the loop, disarms the
//! search timer, and removes exactly the listeners it registered.

pub mod error;
pub mod events;
pub mod frames;
pub mod timer;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::MountError;

#[cfg(target_arch = "wasm32")]
pub use wasm::TreasureMapWeb;

/// Native stand-in so the workspace builds on non-wasm targets. It never mounts.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct TreasureMapWeb;

#[cfg(not(target_arch = "wasm32"))]
impl TreasureMapWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }

    /// The stub never mounts.
    pub fn is_mounted(&self) -> bool {
        false
    }
}
