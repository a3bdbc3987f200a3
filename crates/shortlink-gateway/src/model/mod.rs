mod health;
mod link;

pub use health::HealthResponse;
pub use link::{CreateLinkQuery, CreateLinkRequest, CreateLinkResponse, ErrorResponse};
