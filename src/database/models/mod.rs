pub mod demo;

pub use demo::{CreatedId, Demo, DemoCreateRequest, DemoUpdateRequest, DemoView, NewDemo};
