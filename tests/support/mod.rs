#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mock_interview_demo::api::ApiClient;
use mock_interview_demo::config::DemoConfig;
use mock_interview_demo::ui::{Narrator, Tone};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// Narrator that keeps every line so tests can assert on console output.
#[derive(Default)]
pub struct RecordingNarrator {
    lines: Mutex<Vec<(Tone, String)>>,
}

impl RecordingNarrator {
    pub fn lines(&self) -> Vec<(Tone, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        self.lines()
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_line(&self, tone: Tone, line: &str) -> bool {
        self.lines().iter().any(|(t, l)| *t == tone && l == line)
    }
}

impl Narrator for RecordingNarrator {
    fn say(&self, tone: Tone, message: &str) {
        self.lines.lock().unwrap().push((tone, message.to_string()));
    }
}

/// A wiremock server plus the runtime that drives its async API. The
/// client under test is blocking and runs on the test thread.
pub struct Harness {
    pub server: MockServer,
    rt: Runtime,
}

impl Harness {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Harness { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn verify(&self) {
        self.rt.block_on(self.server.verify());
    }

    pub fn received(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .expect("request recording is enabled")
    }

    pub fn config(&self) -> DemoConfig {
        DemoConfig::with_base_url(&self.server.uri()).expect("mock server uri is a valid base url")
    }

    pub fn client(&self) -> (ApiClient, Arc<RecordingNarrator>) {
        let narrator = Arc::new(RecordingNarrator::default());
        let api = ApiClient::new(self.config(), narrator.clone()).expect("http client");
        (api, narrator)
    }
}

/// A base URL nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
