//! API utilities for frontend-backend communication
//!
//! Provides the backend endpoint configuration injected into views.

/// Port the chat backend listens on
const BACKEND_PORT: u16 = 5000;

/// Where the chat backend lives.
///
/// Constructed once in `App` and passed down through context, so views
/// never carry the endpoint literal themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatApiConfig {
    pub base_url: String,
}

impl ChatApiConfig {
    /// Derive the backend origin from the current window location,
    /// using the backend port.
    ///
    /// # Returns
    /// - Base URL like "http://localhost:5000" or "https://example.com:5000"
    /// - The loopback literal if window is not available
    pub fn from_window() -> Self {
        let base_url = match web_sys::window() {
            Some(window) => {
                let location = window.location();
                let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
                let hostname = location
                    .hostname()
                    .unwrap_or_else(|_| "127.0.0.1".to_string());
                format_base(&protocol, &hostname)
            }
            None => format_base("http:", "127.0.0.1"),
        };
        Self { base_url }
    }

    /// Full URL of the chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

fn format_base(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_protocol_host_and_port() {
        assert_eq!(format_base("http:", "localhost"), "http://localhost:5000");
        assert_eq!(
            format_base("https:", "example.com"),
            "https://example.com:5000"
        );
    }

    #[test]
    fn chat_url_appends_the_endpoint_path() {
        let config = ChatApiConfig {
            base_url: "http://127.0.0.1:5000".to_string(),
        };
        assert_eq!(config.chat_url(), "http://127.0.0.1:5000/chat");
    }
}
