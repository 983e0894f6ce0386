//! # Endpoint Interaction Engine
//!
//! Owns the endpoint catalog and the runtime state of every entry, and turns
//! user actions (toggle, invoke) into state transitions.
//!
//! ## Invocation lifecycle
//!
//! ```text
//! invoke(id, url)            ── loading = true, stale result dropped (synchronous)
//!   └─ returned future
//!        GET url ──────────► InvocationResult
//!        settle              ── last_result = result, loading = false
//! ```
//!
//! Invocations for different ids run independently. Two invocations for the
//! same id are not cancelled or serialized: whichever settles last owns
//! `last_result`.

use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::HttpSettings;
use crate::engine::events::{EngineEvent, EVENT_CHANNEL_CAPACITY};
use crate::engine::models::{EndpointDescriptor, EndpointRuntimeState, InvocationResult};
use crate::engine::services::HttpService;
use crate::engine::state_store::StateStore;

struct EngineInner {
    descriptors: Vec<EndpointDescriptor>,
    /// id -> position in `descriptors`
    index: HashMap<String, usize>,
    store: StateStore,
    http: HttpService,
    events: broadcast::Sender<EngineEvent>,
}

impl EngineInner {
    fn publish(&self, event: EngineEvent) {
        // No subscriber is not an error
        let _ = self.events.send(event);
    }
}

/// Handle to one session's endpoint engine
///
/// Cloning is cheap and every clone sees the same state. The state lives as
/// long as the last handle.
#[derive(Clone)]
pub struct EndpointEngine {
    inner: Arc<EngineInner>,
}

impl EndpointEngine {
    /// Register `descriptors` and build the HTTP client from `settings`
    pub fn new(descriptors: Vec<EndpointDescriptor>, settings: &HttpSettings) -> Result<Self> {
        let http = HttpService::new(settings)?;
        Self::with_http_service(descriptors, http)
    }

    /// Register `descriptors` with an existing HTTP service
    pub fn with_http_service(
        descriptors: Vec<EndpointDescriptor>,
        http: HttpService,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.id.clone(), position).is_some() {
                return Err(anyhow::anyhow!(
                    "Duplicate endpoint id: '{}'",
                    descriptor.id
                ));
            }
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!("Engine created with {} endpoints", descriptors.len());

        Ok(Self {
            inner: Arc::new(EngineInner {
                descriptors,
                index,
                store: StateStore::new(),
                http,
                events,
            }),
        })
    }

    /// Registered descriptors in registration order
    pub fn descriptors(&self) -> &[EndpointDescriptor] {
        &self.inner.descriptors
    }

    pub fn descriptor(&self, id: &str) -> Option<&EndpointDescriptor> {
        self.inner
            .index
            .get(id)
            .map(|&position| &self.inner.descriptors[position])
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.inner.index.contains_key(id)
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.inner.events.subscribe()
    }

    /// Flip the expansion flag of `id` and return the new value
    pub fn toggle_expansion(&self, id: &str) -> bool {
        let expanded = self.inner.store.toggle_expansion(id);
        tracing::debug!("Endpoint '{}' expanded: {}", id, expanded);

        self.inner.publish(EngineEvent::ExpansionToggled {
            id: id.to_string(),
            expanded,
        });
        expanded
    }

    /// Snapshot of the runtime state, default for ids never interacted with
    pub fn get_state(&self, id: &str) -> EndpointRuntimeState {
        self.inner.store.snapshot(id)
    }

    /// Dispatch a live GET of `url` on behalf of `id`
    ///
    /// `loading` is already true when this returns. The returned future
    /// performs the call and settles the state; it resolves to the stored
    /// result. Dropping the future before it settles clears `loading` and
    /// leaves no result.
    pub fn invoke(
        &self,
        id: &str,
        url: &str,
    ) -> impl Future<Output = InvocationResult> + Send + 'static {
        if !self.is_registered(id) {
            tracing::warn!("Invoking unregistered endpoint '{}'", id);
        }

        self.inner.store.begin_invocation(id);
        tracing::debug!("Endpoint '{}' loading: GET {}", id, url);
        self.inner.publish(EngineEvent::InvocationStarted {
            id: id.to_string(),
            url: url.to_string(),
        });

        let in_flight = InFlight {
            inner: Arc::clone(&self.inner),
            id: id.to_string(),
            settled: false,
        };
        let url = url.to_string();

        async move {
            let result = in_flight.inner.http.get_json(&url).await;
            in_flight.settle(result)
        }
    }

    /// Like [`invoke`](Self::invoke), running on its own tokio task
    pub fn spawn_invoke(&self, id: &str, url: &str) -> JoinHandle<InvocationResult> {
        tokio::spawn(self.invoke(id, url))
    }

    /// Invoke a registered endpoint at its target URL
    pub fn invoke_endpoint(
        &self,
        id: &str,
    ) -> Result<impl Future<Output = InvocationResult> + Send + 'static> {
        let url = self
            .descriptor(id)
            .map(|descriptor| descriptor.target_url().to_string())
            .ok_or_else(|| anyhow::anyhow!("Unknown endpoint: '{id}'"))?;

        Ok(self.invoke(id, &url))
    }
}

/// Settles an invocation exactly once, even if its future is dropped
struct InFlight {
    inner: Arc<EngineInner>,
    id: String,
    settled: bool,
}

impl InFlight {
    fn settle(mut self, result: InvocationResult) -> InvocationResult {
        self.inner
            .store
            .complete_invocation(&self.id, result.clone());
        self.settled = true;
        tracing::debug!(
            "Endpoint '{}' settled: {} {}",
            self.id,
            result.status,
            result.status_text
        );

        self.inner.publish(EngineEvent::InvocationSettled {
            id: self.id.clone(),
            result: result.clone(),
        });
        result
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("Invocation of '{}' dropped before settling", self.id);
            self.inner.store.abandon_invocation(&self.id);
        }
    }
}
