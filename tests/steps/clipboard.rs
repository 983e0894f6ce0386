//! Step definitions for copying endpoint URLs

use crate::common::world::{ApidockWorld, RejectingClipboard};
use apidock::ClipboardService;
use cucumber::{given, then, when};

#[given("a clipboard that rejects writes")]
async fn given_rejecting_clipboard(world: &mut ApidockWorld) {
    world.clipboard_service = ClipboardService::new(Box::new(RejectingClipboard));
}

#[when(expr = "I copy the URL of endpoint {string}")]
async fn when_copy_url(world: &mut ApidockWorld, id: String) {
    let url = world
        .engine()
        .descriptor(&id)
        .map(|descriptor| descriptor.target_url().to_string())
        .unwrap_or_else(|| panic!("unknown endpoint '{id}'"));
    world.state_before_copy = Some((id.clone(), world.state(&id)));
    world.clipboard_service.copy_text(&url);
}

#[then(expr = "the clipboard should contain the URL of endpoint {string}")]
async fn then_clipboard_has_url(world: &mut ApidockWorld, id: String) {
    let expected = format!("{}/{}", world.base_url(), id);
    assert_eq!(world.clipboard.content(), Some(expected));
}

#[then("the clipboard should be untouched")]
async fn then_clipboard_untouched(world: &mut ApidockWorld) {
    assert_eq!(world.clipboard.content(), None);
}

#[then(expr = "the state of endpoint {string} should be unchanged by the copy")]
async fn then_state_unchanged_by_copy(world: &mut ApidockWorld, id: String) {
    let (copied, before) = world
        .state_before_copy
        .clone()
        .expect("no copy was made in this scenario");
    assert_eq!(copied, id);
    assert_eq!(world.state(&id), before);
}
