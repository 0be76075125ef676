//! PixelBox terminal client
//!
//! Stores and order workflow on top of `pixelbox-client`, rendered with a
//! ratatui presentation layer. The stores are plain structs passed around
//! through an explicit [`core::AppContext`]; there is no ambient global
//! session state.

pub mod core;
pub mod ui;
