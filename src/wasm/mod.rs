//! WebAssembly bindings for the lib8080 emulator.
//!
//! This module provides JavaScript-callable interfaces to the 8080 CPU emulator,
//! so an editor page can assemble, load and single-step programs.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator8080;
