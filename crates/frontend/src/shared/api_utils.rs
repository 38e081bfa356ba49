//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Port of the backend server
const API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname)
}

fn base_url(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from path segments; each segment is percent-encoded
///
/// # Example
/// ```rust,ignore
/// let url = api_url(&["field", "spool", "nozzle_temp"]);
/// ```
pub fn api_url(segments: &[&str]) -> String {
    format!("{}{}", api_base(), api_path(segments))
}

fn api_path(segments: &[&str]) -> String {
    let mut path = String::from("/api");
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("https:", "example.com"), "https://example.com:3000");
    }

    #[test]
    fn test_api_path_encodes_segments() {
        assert_eq!(api_path(&["field", "spool"]), "/api/field/spool");
        assert_eq!(api_path(&["field", "spool", "a b/c"]), "/api/field/spool/a%20b%2Fc");
    }
}
