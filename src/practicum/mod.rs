pub mod client;
pub mod error;
pub mod response;
pub mod status;

pub use client::{PracticumClient, StatusSource};
pub use error::PollError;
pub use response::validate;
pub use status::parse_status;
