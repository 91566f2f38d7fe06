// handlers/mod.rs - HTTP handlers
//
// demo:    the /v1/demo CRUD family
// system:  service info, health and the unknown-route fallback
// extract: request extractors that reject with ApiError

pub mod demo;
pub mod extract;
pub mod system;

pub use demo::*;
pub use system::{fallback, health, root};
