#![forbid(unsafe_code)]

//! Mount failures.

use std::fmt;

use treasure_core::ConfigError;

/// Why [`mount`](crate::TreasureMapWeb) failed.
#[derive(Debug, Clone, PartialEq)]
pub enum MountError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// `window.document` is missing.
    NoDocument,
    /// `mount` was called on an already mounted page.
    AlreadyMounted,
    /// The canvas refused to hand out a 2D context.
    NoContext2d,
    /// A DOM call threw.
    Dom(String),
    /// Options object was rejected.
    Config(ConfigError),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::AlreadyMounted => write!(f, "page is already mounted"),
            Self::NoContext2d => write!(f, "2D canvas context unavailable"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for MountError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MountError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<MountError> for wasm_bindgen::JsValue {
    fn from(err: MountError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
