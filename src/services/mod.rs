pub mod demo_service;

pub use demo_service::{DemoService, DemoStore, COLLECTION_NAME};
