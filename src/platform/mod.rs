//! Platform abstraction layer
//!
//! Browser backends for the render sink. Native builds run headless with
//! [`crate::render::LogSink`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
