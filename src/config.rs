// Run configuration: where the interview service lives, who we are and
// which topic the demo creates. Passed explicitly into the API client so
// tests can point it at a mock server.

use anyhow::{bail, Context, Result};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_ID: &str = "demo-user-123";
pub const DEFAULT_TOPIC_NAME: &str = "JavaScript Fundamentals";

pub const BASE_URL_VAR: &str = "MOCK_INTERVIEW_BASE_URL";
pub const USER_ID_VAR: &str = "MOCK_INTERVIEW_USER_ID";
pub const TOPIC_VAR: &str = "MOCK_INTERVIEW_TOPIC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    base_url: String,
    pub user_id: String,
    pub topic_name: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            topic_name: DEFAULT_TOPIC_NAME.to_string(),
        }
    }
}

impl DemoConfig {
    /// Build a config with the default identity and topic but a custom
    /// service address. The address is validated and normalized.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(DemoConfig {
            base_url: normalize_base_url(base_url)?,
            ..DemoConfig::default()
        })
    }

    /// Create a config from `MOCK_INTERVIEW_BASE_URL`, `MOCK_INTERVIEW_USER_ID`
    /// and `MOCK_INTERVIEW_TOPIC`, falling back to the built-in demo values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let user_id = lookup(USER_ID_VAR).unwrap_or_else(|| DEFAULT_USER_ID.into());
        let topic_name = lookup(TOPIC_VAR).unwrap_or_else(|| DEFAULT_TOPIC_NAME.into());

        if user_id.trim().is_empty() {
            bail!("{USER_ID_VAR} must not be empty");
        }
        if topic_name.trim().is_empty() {
            bail!("{TOPIC_VAR} must not be empty");
        }

        Ok(DemoConfig {
            base_url: normalize_base_url(&base_url)
                .with_context(|| format!("Invalid {BASE_URL_VAR}"))?,
            user_id,
            topic_name,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL with an absolute API path such as `/v1/topics`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Append path segments to the base URL, percent-encoding each one so
    /// an id containing `/`, `?`, `#` or spaces stays a single segment.
    pub fn endpoint_for(&self, segments: &[&str]) -> String {
        let Ok(mut url) = Url::parse(&self.base_url) else {
            return self.endpoint(&segments.join("/"));
        };
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("base URL must not be empty");
    }
    let url = Url::parse(trimmed).with_context(|| format!("'{trimmed}' is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("base URL must use http or https, got '{}'", url.scheme());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_demo_constants() {
        let config = DemoConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.user_id, "demo-user-123");
        assert_eq!(config.topic_name, "JavaScript Fundamentals");
    }

    #[test]
    fn environment_overrides_each_field() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "https://interviews.example.com/"),
            (USER_ID_VAR, "someone-else"),
            (TOPIC_VAR, "Rust Ownership"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "https://interviews.example.com");
        assert_eq!(config.user_id, "someone-else");
        assert_eq!(config.topic_name, "Rust Ownership");
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(DemoConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "not a url")])).is_err());
        assert!(DemoConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "ftp://host")])).is_err());
        assert!(DemoConfig::from_lookup(lookup_from(&[(USER_ID_VAR, "  ")])).is_err());
        assert!(DemoConfig::from_lookup(lookup_from(&[(TOPIC_VAR, "")])).is_err());
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = DemoConfig::with_base_url("http://127.0.0.1:9000/").unwrap();
        assert_eq!(config.endpoint("/v1/topics"), "http://127.0.0.1:9000/v1/topics");
        assert_eq!(
            config.endpoint("v1/interview/start"),
            "http://127.0.0.1:9000/v1/interview/start"
        );
    }

    #[test]
    fn endpoint_for_keeps_each_segment_intact() {
        let config = DemoConfig::with_base_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(
            config.endpoint_for(&["v1", "interview", "abc-1"]),
            "http://127.0.0.1:9000/v1/interview/abc-1"
        );
        assert_eq!(
            config.endpoint_for(&["v1", "interview", "end", "a/b c?d#e"]),
            "http://127.0.0.1:9000/v1/interview/end/a%2Fb%20c%3Fd%23e"
        );

        let prefixed = DemoConfig::with_base_url("https://host.test/api/").unwrap();
        assert_eq!(
            prefixed.endpoint_for(&["v1", "interview", "s 1"]),
            "https://host.test/api/v1/interview/s%201"
        );
    }
}
