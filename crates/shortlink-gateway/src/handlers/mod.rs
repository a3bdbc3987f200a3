mod health;
mod link;

pub use health::health_handler;
pub use link::{create_link_handler, get_link_handler};
