use anyhow::Result;
use cucumber::World;
use serde_json::Value;
use tokio::task::JoinHandle;
use wiremock::{Mock, MockServer, ResponseTemplate};

use apidock::engine::services::ClipboardBackend;
use apidock::engine::{ClipboardService, MemoryClipboard};
use apidock::{EndpointDescriptor, EndpointEngine, EndpointRuntimeState, HttpSettings, InvocationResult};

/// Closed port on the loopback interface, nothing answers there
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:9";

/// Clipboard that refuses every write
pub struct RejectingClipboard;

impl ClipboardBackend for RejectingClipboard {
    fn set_text(&self, _text: &str) -> Result<()> {
        Err(anyhow::anyhow!("clipboard access denied"))
    }
}

/// State shared by the steps of one scenario
#[derive(World)]
#[world(init = Self::new)]
pub struct ApidockWorld {
    /// Mock API the catalog points at
    pub mock_server: Option<MockServer>,

    /// Engine under test
    pub engine: Option<EndpointEngine>,

    /// What the clipboard service writes into
    pub clipboard: MemoryClipboard,

    pub clipboard_service: ClipboardService,

    /// Invocations started without waiting
    pub in_flight: Vec<(String, JoinHandle<InvocationResult>)>,

    /// Result returned by the last awaited invocation
    pub last_returned: Option<InvocationResult>,

    /// Engine state of the endpoint as it was right before the last copy
    pub state_before_copy: Option<(String, EndpointRuntimeState)>,
}

impl std::fmt::Debug for ApidockWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApidockWorld")
            .field("mock_server", &self.mock_server.as_ref().map(|s| s.uri()))
            .field("clipboard", &self.clipboard.content())
            .field("in_flight", &self.in_flight.len())
            .field("last_returned", &self.last_returned)
            .finish()
    }
}

impl ApidockWorld {
    pub fn new() -> Self {
        let clipboard = MemoryClipboard::new();
        Self {
            mock_server: None,
            engine: None,
            clipboard_service: ClipboardService::memory(clipboard.clone()),
            clipboard,
            in_flight: Vec::new(),
            last_returned: None,
            state_before_copy: None,
        }
    }

    /// Start the mock API server
    pub async fn setup_mock_server(&mut self) {
        self.mock_server = Some(MockServer::start().await);
    }

    /// Base URL endpoints are registered under
    pub fn base_url(&self) -> String {
        self.mock_server
            .as_ref()
            .map(|server| server.uri())
            .unwrap_or_else(|| UNREACHABLE_BASE.to_string())
    }

    /// Register one GET endpoint per id at `<base>/<id>`
    pub fn register_endpoints(&mut self, ids: &[String]) -> Result<()> {
        let base = self.base_url();
        let descriptors = ids
            .iter()
            .map(|id| {
                EndpointDescriptor::new(id.as_str(), id.as_str(), "", format!("{base}/{id}"))
            })
            .collect();
        self.engine = Some(EndpointEngine::new(descriptors, &HttpSettings::default())?);
        Ok(())
    }

    pub fn engine(&self) -> &EndpointEngine {
        self.engine
            .as_ref()
            .expect("a catalog must be registered first")
    }

    pub fn state(&self, id: &str) -> EndpointRuntimeState {
        self.engine().get_state(id)
    }

    pub fn last_result(&self, id: &str) -> InvocationResult {
        self.state(id)
            .last_result
            .unwrap_or_else(|| panic!("endpoint '{id}' has no result"))
    }

    /// Answer GET `route` with `status` and a JSON body, optionally delayed
    pub async fn mock_json(&self, route: &str, status: u16, body: Value, delay_ms: u64) {
        let server = self
            .mock_server
            .as_ref()
            .expect("a mock server must be started first");
        Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(body)
                    .set_delay(std::time::Duration::from_millis(delay_ms)),
            )
            .mount(server)
            .await;
    }

    /// Answer GET `route` with a body that is not JSON
    pub async fn mock_text(&self, route: &str, status: u16, body: &str) {
        let server = self
            .mock_server
            .as_ref()
            .expect("a mock server must be started first");
        Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }
}

impl Default for ApidockWorld {
    fn default() -> Self {
        Self::new()
    }
}
