//! API utilities for frontend-backend communication

/// Build a full API URL from a path
///
/// Without a configured base the path stays relative, i.e. same origin as the page.
///
/// # Example
/// ```rust
/// use backlog_frontend::shared::api_utils::api_url;
///
/// let url = api_url(Some("http://localhost:3000"), "/api/backlog-items");
/// assert_eq!(url, "http://localhost:3000/api/backlog-items");
/// ```
pub fn api_url(api_base: Option<&str>, path: &str) -> String {
    match api_base {
        Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(api_url(None, "/api/backlog-items"), "/api/backlog-items");
        assert_eq!(
            api_url(Some("http://localhost:3000/"), "/api/backlog-items"),
            "http://localhost:3000/api/backlog-items"
        );
    }
}
