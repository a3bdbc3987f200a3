use shortlink_core::ShortenerError;
use url::Url;

/// Longest target accepted, in bytes.
pub(crate) const MAX_TARGET_LENGTH: usize = 2048;

/// Checks that `target` is an absolute http(s) URL with a host.
///
/// The target is stored exactly as given; parsing is only used to reject
/// malformed input.
pub(crate) fn validate_target(target: &str) -> Result<(), ShortenerError> {
    if target.trim().is_empty() {
        return Err(ShortenerError::InvalidInput(
            "URL cannot be empty".to_string(),
        ));
    }

    if target.len() > MAX_TARGET_LENGTH {
        return Err(ShortenerError::InvalidInput(format!(
            "URL must be at most {} bytes, got {}",
            MAX_TARGET_LENGTH,
            target.len()
        )));
    }

    if target.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidInput(
            "URL must not contain control characters".to_string(),
        ));
    }

    let parsed = Url::parse(target)
        .map_err(|e| ShortenerError::InvalidInput(format!("malformed URL '{}': {}", target, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ShortenerError::InvalidInput(format!(
            "URL scheme must be http or https: {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ShortenerError::InvalidInput(format!(
            "URL must have a host: {}",
            target
        )));
    }

    Ok(())
}
