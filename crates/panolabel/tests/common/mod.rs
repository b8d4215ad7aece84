//! Common test utilities and helpers

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use panolabel::http::{ApiRequest, RequestExecutor, Response};
use panolabel::{Client, Error, Result, async_trait};

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Load a response fixture as JSON
#[allow(dead_code)]
pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&load_response_fixture(name)).expect("fixture is valid JSON")
}

/// An executor that records every request and replays queued outcomes.
///
/// With nothing queued it answers `{}`, which is enough for tests that only inspect
/// the outgoing request.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    outcomes: Arc<Mutex<VecDeque<Result<Response>>>>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    /// Create an executor with no queued outcomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200 OK` JSON response
    pub fn respond_json(&self, value: serde_json::Value) -> &Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(Response::json_ok(&value)));
        self
    }

    /// Queue a raw response
    pub fn respond(&self, response: Response) -> &Self {
        self.outcomes.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue an error
    pub fn fail_with(&self, error: Error) -> &Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received; panics if there was not exactly one
    pub fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }

    /// A client wired to this executor
    pub fn client(&self) -> Client {
        Client::from_executor(Arc::new(self.clone()))
    }
}

#[async_trait]
impl RequestExecutor for RecordingExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<Response> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::json_ok(&serde_json::json!({}))))
    }

    fn base_url(&self) -> &str {
        "http://recording.invalid/api/v1"
    }

    fn executor_name(&self) -> &'static str {
        "recording"
    }
}
