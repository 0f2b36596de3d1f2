pub mod access_log;
pub mod tracing;

pub use access_log::access_log_middleware;
pub use tracing::{REQUEST_ID_HEADER, request_id_middleware};
