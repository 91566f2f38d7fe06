pub mod envelope;
pub mod response;

pub use envelope::{error_envelope, ErrorEnvelope};
pub use response::{ApiResponse, ApiResult, Empty};
