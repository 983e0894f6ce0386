//! Step definitions for live invocations
//!
//! - Mock API responses
//! - Awaited and background invocations
//! - Result inspection

use crate::common::world::{ApidockWorld, UNREACHABLE_BASE};
use cucumber::{given, then, when};
use serde_json::Value;
use tracing::debug;

fn json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| panic!("invalid JSON in step '{text}': {e}"))
}

// === MOCK RESPONSES ===

#[given(expr = "the server answers {string} with status {int} and body {string}")]
async fn given_json_answer(world: &mut ApidockWorld, route: String, status: u16, body: String) {
    world.mock_json(&route, status, json(&body), 0).await;
}

#[given(expr = "the server answers {string} after {int} ms with status {int} and body {string}")]
async fn given_slow_answer(
    world: &mut ApidockWorld,
    route: String,
    delay_ms: u64,
    status: u16,
    body: String,
) {
    world.mock_json(&route, status, json(&body), delay_ms).await;
}

#[given(expr = "the server answers {string} with status {int} and plain text {string}")]
async fn given_text_answer(world: &mut ApidockWorld, route: String, status: u16, body: String) {
    world.mock_text(&route, status, &body).await;
}

// === INVOCATION ===

#[when(expr = "I try endpoint {string}")]
async fn when_try_endpoint(world: &mut ApidockWorld, id: String) {
    let pending = world
        .engine()
        .invoke_endpoint(&id)
        .expect("endpoint should be registered");
    world.last_returned = Some(pending.await);
}

#[when(expr = "I try endpoint {string} at {string}")]
async fn when_try_endpoint_at(world: &mut ApidockWorld, id: String, route: String) {
    let url = format!("{}{}", world.base_url(), route);
    debug!("Invoking '{}' at {}", id, url);
    world.last_returned = Some(world.engine().invoke(&id, &url).await);
}

#[when(expr = "I try endpoint {string} against an unreachable host")]
async fn when_try_unreachable(world: &mut ApidockWorld, id: String) {
    let url = format!("{UNREACHABLE_BASE}/{id}");
    world.last_returned = Some(world.engine().invoke(&id, &url).await);
}

#[when(expr = "I start endpoint {string} at {string} without waiting")]
async fn when_start_endpoint(world: &mut ApidockWorld, id: String, route: String) {
    let url = format!("{}{}", world.base_url(), route);
    let handle = world.engine().spawn_invoke(&id, &url);
    world.in_flight.push((id, handle));
}

#[when(expr = "endpoint {string} settles")]
async fn when_endpoint_settles(world: &mut ApidockWorld, id: String) {
    let position = world
        .in_flight
        .iter()
        .position(|(pending, _)| *pending == id)
        .unwrap_or_else(|| panic!("no invocation of '{id}' in flight"));
    let (_, handle) = world.in_flight.remove(position);
    world.last_returned = Some(handle.await.expect("invocation task should not panic"));
}

#[when("all invocations settle")]
async fn when_all_settle(world: &mut ApidockWorld) {
    for (_, handle) in world.in_flight.drain(..) {
        handle.await.expect("invocation task should not panic");
    }
}

// === RESULTS ===

#[then(expr = "the last result of {string} should have status {int}")]
async fn then_status(world: &mut ApidockWorld, id: String, status: u16) {
    assert_eq!(world.last_result(&id).status, status);
}

#[then(expr = "the last result of {string} should have status text {string}")]
async fn then_status_text(world: &mut ApidockWorld, id: String, text: String) {
    assert_eq!(world.last_result(&id).status_text, text);
}

#[then(expr = "the last result of {string} should be successful")]
async fn then_successful(world: &mut ApidockWorld, id: String) {
    assert!(world.last_result(&id).succeeded);
}

#[then(expr = "the last result of {string} should not be successful")]
async fn then_not_successful(world: &mut ApidockWorld, id: String) {
    assert!(!world.last_result(&id).succeeded);
}

#[then(expr = "the last result of {string} should have body {string}")]
async fn then_body(world: &mut ApidockWorld, id: String, body: String) {
    assert_eq!(world.last_result(&id).body(), Some(&json(&body)));
}

#[then(expr = "the last result of {string} should have no body")]
async fn then_no_body(world: &mut ApidockWorld, id: String) {
    assert_eq!(world.last_result(&id).body(), None);
}

#[then(expr = "the last result of {string} should have an error message")]
async fn then_error_message(world: &mut ApidockWorld, id: String) {
    let result = world.last_result(&id);
    let message = result.error_message().expect("error message should be set");
    assert!(!message.is_empty());
}

#[then("the returned result should match the stored one")]
async fn then_returned_matches(world: &mut ApidockWorld) {
    let returned = world
        .last_returned
        .clone()
        .expect("an invocation should have returned");
    let stored = world
        .engine()
        .descriptors()
        .iter()
        .filter_map(|descriptor| world.state(&descriptor.id).last_result)
        .any(|result| result == returned);
    assert!(stored, "returned result was not stored: {returned:?}");
}
