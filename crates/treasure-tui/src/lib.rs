#![forbid(unsafe_code)]

//! Terminal host for the Treasure Map page.
//!
//! The particle field is drawn with Braille dots behind the page text; the
//! mouse acts as the pointer and the keyboard edits the search query.

pub mod app;
pub mod braille;
pub mod cli;
pub mod logging;
pub mod render;
pub mod session;
