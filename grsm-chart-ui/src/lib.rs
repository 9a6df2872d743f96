//! Shared Dioxus components and browser bridge for the GRSM panels.
//!
//! This crate provides:
//! - `js_bridge`: dataset fetching and container measurement
//! - `state`: reactive `AppState` with Dioxus Signals and the panel models
//! - `components`: RSX components drawing panel frames as SVG

pub mod components;
pub mod js_bridge;
pub mod state;
