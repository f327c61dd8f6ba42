// API client module: a small blocking HTTP client for the mock interview
// service. Every call goes through `ApiClient::request`, which adds the
// standard headers, narrates the exchange and classifies the response.

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::ui::{Narrator, Tone};
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const TOPIC_ID_HEADER: &str = "X-Topic-ID";

/// Methods the request helper knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(HttpMethod::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(HttpMethod::Post)
        } else {
            Err(DemoError::UnsupportedMethod(s.to_string()))
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful response. The service answers some calls with
/// JSON and others with a bare id, so both shapes are kept apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Structured(Value),
    PlainText(String),
}

impl ApiResponse {
    /// Decode a 2xx body: JSON when it parses, otherwise the trimmed text
    /// with one pair of surrounding quotes removed.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ApiResponse::Structured(value),
            Err(_) => ApiResponse::PlainText(strip_plain_text(text).to_string()),
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ApiResponse::Structured(value) => Some(value),
            ApiResponse::PlainText(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ApiResponse::Structured(value) => value,
            ApiResponse::PlainText(text) => Value::String(text),
        }
    }

    fn pretty(&self) -> String {
        match self {
            ApiResponse::Structured(value) => pretty_json(value),
            ApiResponse::PlainText(text) => text.clone(),
        }
    }
}

/// Trim surrounding whitespace, then drop at most one leading and one
/// trailing double quote.
pub fn strip_plain_text(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Identifier handed out by the service. Never parsed: it is embedded as-is
/// into JSON payloads and rendered as bare text in headers and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(Value);

impl ResourceId {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<ApiResponse> for ResourceId {
    fn from(response: ApiResponse) -> Self {
        ResourceId(response.into_value())
    }
}

impl From<Value> for ResourceId {
    fn from(value: Value) -> Self {
        ResourceId(value)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId(Value::String(id.to_string()))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// What the service returns when an interview starts. Both fields are
/// optional because nothing guarantees a well-formed answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewSession {
    pub session_id: Option<ResourceId>,
    pub initial_question: Option<String>,
}

impl InterviewSession {
    pub fn from_response(response: &ApiResponse) -> Self {
        let Some(Value::Object(fields)) = response.as_structured() else {
            return InterviewSession::default();
        };
        let session_id = fields
            .get("session_id")
            .filter(|v| !v.is_null())
            .cloned()
            .map(ResourceId::from);
        let initial_question = fields.get("initial_question").and_then(|v| match v {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        InterviewSession {
            session_id,
            initial_question,
        }
    }
}

/// Reply to an answer submitted with `continue_interview`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewReply {
    pub response: String,
    pub session_id: Option<ResourceId>,
    pub session_ended: bool,
    /// Present when the service ended the session on its own.
    pub summary: Option<InterviewSummary>,
}

impl InterviewReply {
    /// Read each field on its own so one odd value only loses that field.
    /// Anything that is not a JSON object becomes the interviewer's text.
    pub fn from_response(response: ApiResponse) -> Self {
        let fields = match response {
            ApiResponse::Structured(Value::Object(fields)) => fields,
            other => {
                return InterviewReply {
                    response: ResourceId::from(other).to_string(),
                    ..InterviewReply::default()
                }
            }
        };
        let response = match fields.get("response") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let session_id = fields
            .get("session_id")
            .filter(|v| !v.is_null())
            .cloned()
            .map(ResourceId::from);
        let session_ended = fields
            .get("session_ended")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let summary = fields
            .get("summary")
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value::<InterviewSummary>(v.clone()).ok());
        InterviewReply {
            response,
            session_id,
            session_ended,
            summary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterviewSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub strong_points: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub weak_points: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub grammatical_score: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub technical_score: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub practice_points: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub contextual_relevant: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub off_topic_count: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blocking client holding the reqwest client, the run configuration and
/// the narrator every request reports to.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: DemoConfig,
    narrator: Arc<dyn Narrator>,
}

impl ApiClient {
    /// Build the client. No timeout is set: a hung server hangs the call.
    pub fn new(config: DemoConfig, narrator: Arc<dyn Narrator>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            config,
            narrator,
        })
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn narrator(&self) -> &dyn Narrator {
        self.narrator.as_ref()
    }

    /// Send one GET or POST to `url` and classify the answer.
    ///
    /// `body` is only sent with POST. `extra_headers` are applied on top of
    /// the user-id and content-type headers and may replace them. Anything
    /// outside 2xx and any transport failure come back as `DemoError`.
    pub fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<&Value>,
        extra_headers: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse, DemoError> {
        let method: HttpMethod = method.parse()?;
        let headers = self.headers(extra_headers)?;

        self.narrator
            .say(Tone::Info, &format!("Making {method} request to: {url}"));
        if let Some(body) = body {
            self.narrator
                .say(Tone::Detail, &format!("Request data: {}", pretty_json(body)));
        }
        log::debug!("{method} {url} headers={headers:?}");

        let builder = match method {
            HttpMethod::Get => self.client.get(url).headers(headers),
            HttpMethod::Post => {
                let builder = self.client.post(url).headers(headers);
                match body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder
            .send()
            .map_err(|source| self.transport_failure(method, url, source))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|source| self.transport_failure(method, url, source))?;
        log::debug!("{method} {url} -> {status}");

        if status.is_success() {
            self.narrator.say(
                Tone::Success,
                &format!("✓ Success (HTTP {})", status.as_u16()),
            );
            let decoded = ApiResponse::decode(&text);
            self.narrator
                .say(Tone::Success, &format!("Response: {}", decoded.pretty()));
            Ok(decoded)
        } else {
            self.narrator
                .say(Tone::Failure, &format!("✗ Error (HTTP {})", status.as_u16()));
            self.narrator
                .say(Tone::Failure, &format!("Response: {text}"));
            Err(DemoError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }

    /// POST /v1/topics and return the new topic id.
    pub fn create_topic(&self, name: &str) -> Result<ResourceId, DemoError> {
        let body = json!({ "topic": name });
        let response = self.request("POST", &self.config.endpoint("/v1/topics"), Some(&body), None)?;
        Ok(ResourceId::from(response))
    }

    /// POST /v1/questions under `topic_id` and return the new question id.
    pub fn create_question(
        &self,
        topic_id: &ResourceId,
        question: &str,
    ) -> Result<ResourceId, DemoError> {
        let body = json!({
            "topic_id": topic_id.as_value(),
            "question": question,
        });
        let response =
            self.request("POST", &self.config.endpoint("/v1/questions"), Some(&body), None)?;
        Ok(ResourceId::from(response))
    }

    /// GET /v1/questions, unfiltered.
    pub fn list_questions(&self) -> Result<ApiResponse, DemoError> {
        self.request("GET", &self.config.endpoint("/v1/questions"), None, None)
    }

    /// POST /v1/interview/start. The topic travels in the `X-Topic-ID`
    /// header, not in a body.
    pub fn start_interview(
        &self,
        topic_id: &ResourceId,
    ) -> Result<InterviewSession, DemoError> {
        let mut extra = BTreeMap::new();
        extra.insert(TOPIC_ID_HEADER.to_string(), topic_id.to_string());
        let response = self.request(
            "POST",
            &self.config.endpoint("/v1/interview/start"),
            None,
            Some(&extra),
        )?;
        Ok(InterviewSession::from_response(&response))
    }

    /// POST an answer to /v1/interview/{session_id}.
    pub fn continue_interview(
        &self,
        session_id: &ResourceId,
        answer: &str,
    ) -> Result<InterviewReply, DemoError> {
        let body = json!({ "text": answer });
        let id = session_id.to_string();
        let response = self.request(
            "POST",
            &self.config.endpoint_for(&["v1", "interview", id.as_str()]),
            Some(&body),
            None,
        )?;
        Ok(InterviewReply::from_response(response))
    }

    /// POST /v1/interview/end/{session_id}. The summary format belongs to
    /// the service, so it is handed back undecoded.
    pub fn end_interview(
        &self,
        session_id: &ResourceId,
    ) -> Result<ApiResponse, DemoError> {
        let id = session_id.to_string();
        self.request(
            "POST",
            &self.config.endpoint_for(&["v1", "interview", "end", id.as_str()]),
            None,
            None,
        )
    }

    fn headers(
        &self,
        extra: Option<&BTreeMap<String, String>>,
    ) -> Result<HeaderMap, DemoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-user-id"),
            header_value(USER_ID_HEADER, &self.config.user_id)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra.into_iter().flatten() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| DemoError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value(name, value)?);
        }
        Ok(headers)
    }

    fn transport_failure(&self, method: HttpMethod, url: &str, source: reqwest::Error) -> DemoError {
        self.narrator
            .say(Tone::Failure, &format!("✗ Request failed: {source}"));
        DemoError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        }
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, DemoError> {
    HeaderValue::from_str(value).map_err(|e| DemoError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
