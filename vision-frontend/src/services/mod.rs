pub mod error;
pub mod service_account;
pub mod vision_client;

pub use error::VisionError;
pub use service_account::ServiceAccount;
pub use vision_client::{AuthorizedChannel, VisionClient};
