use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to its target URL.
///
/// Links are created once and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub code: ShortCode,
    pub target: String,
}

impl Link {
    pub fn new(code: ShortCode, target: impl Into<String>) -> Self {
        Self {
            code,
            target: target.into(),
        }
    }
}
