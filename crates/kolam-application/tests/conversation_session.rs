use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use kolam_application::{ConversationSession, ConversationView, ScrollViewport, SubmitOutcome};
use kolam_core::assistant::Intent;
use kolam_core::config::{AssistantSettings, ScrollSettings};
use kolam_core::error::{KolamError, Result};
use kolam_core::input::KeyPress;
use kolam_core::scroll::{ScrollMetrics, ScrollState};
use kolam_core::transcript::{MessageCategory, MessageRole};
use kolam_core::user::{DefaultUserService, FixedUserService};

const DELAY: Duration = Duration::from_millis(1500);

fn session() -> ConversationSession {
    ConversationSession::new(
        &FixedUserService::new("Meena"),
        AssistantSettings::default(),
        ScrollSettings::default(),
    )
}

/// Metrics for a view `distance` units above the bottom.
fn scrolled_up(distance: f64) -> ScrollMetrics {
    ScrollMetrics::new(1000.0, 600.0 - distance, 400.0)
}

async fn wait_for_messages(session: &ConversationSession, count: usize) -> ConversationView {
    let mut rx = session.subscribe();
    let view = rx
        .wait_for(|view| view.messages.len() == count && !view.composing)
        .await
        .expect("session dropped while waiting");
    view.clone()
}

/// Records scroll requests; fails them while unmounted.
#[derive(Default)]
struct RecordingViewport {
    scrolls: AtomicUsize,
    unmounted: AtomicBool,
}

impl ScrollViewport for RecordingViewport {
    fn scroll_to_bottom(&self) -> Result<()> {
        if self.unmounted.load(Ordering::SeqCst) {
            return Err(KolamError::ViewportUnavailable);
        }
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_new_session_is_seeded_with_welcome() {
    let session = session();
    let messages = session.snapshot().await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role(), MessageRole::Assistant);
    assert!(messages[0].body().contains("Meena"));
    assert_eq!(session.scroll_state().await, ScrollState::Following);
    assert!(!session.view().pending_prompt);
    assert!(!session.view().composing);
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_display_name() {
    let session = ConversationSession::new(
        &DefaultUserService,
        AssistantSettings::default(),
        ScrollSettings::default(),
    );
    assert_eq!(session.display_name(), "Friend");
    assert!(session.snapshot().await[0].body().starts_with("Vanakkam, Friend!"));
}

#[tokio::test(start_paused = true)]
async fn test_blank_submission_changes_nothing() {
    let session = session();
    session.on_user_scroll(scrolled_up(200.0)).await;
    let before = session.view();

    assert_eq!(session.submit("").await.unwrap(), SubmitOutcome::Ignored);
    assert_eq!(session.submit("   \n\t").await.unwrap(), SubmitOutcome::Ignored);

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(session.view(), before);
    assert_eq!(session.scroll_state().await, ScrollState::Detached);
}

#[tokio::test(start_paused = true)]
async fn test_detached_user_is_pulled_back_by_new_messages() {
    let session = session();

    session.on_user_scroll(scrolled_up(200.0)).await;
    let view = session.view();
    assert_eq!(view.scroll_state, ScrollState::Detached);
    assert!(view.pending_prompt);

    let outcome = session.submit("I have 1 hour").await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted {
            intent: Intent::DurationBased,
            duration: Some(60),
            ..
        }
    ));

    let view = session.view();
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[1].role(), MessageRole::User);
    assert_eq!(view.messages[1].body(), "I have 1 hour");
    assert_eq!(view.scroll_state, ScrollState::Following);
    assert!(view.composing);

    // Scroll away again while the assistant is "thinking"
    session.on_user_scroll(scrolled_up(120.0)).await;
    assert!(session.view().pending_prompt);

    let view = wait_for_messages(&session, 3).await;
    let reply = &view.messages[2];
    assert_eq!(reply.role(), MessageRole::Assistant);
    assert_eq!(reply.category(), Some(MessageCategory::Tutorial));
    assert!(reply.body().contains("60-minute session"));
    assert!(!view.pending_prompt);
    assert_eq!(view.scroll_state, ScrollState::Following);
}

#[tokio::test(start_paused = true)]
async fn test_reply_waits_for_thinking_delay() {
    let session = session();
    session.submit("what is the history of this art").await.unwrap();

    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(session.snapshot().await.len(), 2);
    assert!(session.view().composing);

    let view = wait_for_messages(&session, 3).await;
    assert_eq!(view.messages[2].category(), Some(MessageCategory::Cultural));
}

#[tokio::test(start_paused = true)]
async fn test_duration_beats_keywords() {
    let session = session();
    let outcome = session
        .submit("I have 15 minutes, tell me the history")
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted {
            intent: Intent::DurationBased,
            duration: Some(15),
            ..
        }
    ));

    let view = wait_for_messages(&session, 3).await;
    let reply = &view.messages[2];
    assert_eq!(reply.category(), Some(MessageCategory::Tutorial));
    assert!((1..=5).contains(&reply.suggestions().len()));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_discards_pending_reply() {
    let session = session();
    session.submit("any tips?").await.unwrap();
    session.shutdown().await;

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(session.snapshot().await.len(), 2);
    assert!(session.is_closed());

    let err = session.submit("hello again").await.unwrap_err();
    assert!(err.is_session_closed());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_composing() {
    let session = session();
    let rx = session.subscribe();
    session.submit("hello").await.unwrap();
    session.submit("I have 2 hours").await.unwrap();
    assert!(rx.borrow().composing);

    session.shutdown().await;
    assert!(!rx.borrow().composing);

    tokio::time::sleep(DELAY * 3).await;
    let view = rx.borrow().clone();
    assert!(!view.composing);
    assert_eq!(view.messages.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_session_discards_pending_reply() {
    let session = session();
    let rx = session.subscribe();
    session.submit("teach me a pattern").await.unwrap();
    drop(session);

    tokio::time::sleep(DELAY * 3).await;
    assert_eq!(rx.borrow().messages.len(), 2);
    assert!(!rx.borrow().composing);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_submissions_keep_order() {
    let session = session();
    session.submit("hello").await.unwrap();
    session.submit("I have the whole day").await.unwrap();

    let view = wait_for_messages(&session, 5).await;
    let roles: Vec<_> = view.messages.iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::Assistant,
        ]
    );
    assert!(view.messages[3..].iter().any(|m| m.category() == Some(MessageCategory::General)));
    assert!(view.messages[3..].iter().any(|m| m.body().contains("480 minutes")));

    let ids: Vec<_> = view.messages.iter().map(|m| m.id()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_choosing_a_suggestion_submits_it_verbatim() {
    let session = session();
    let welcome = session.snapshot().await[0].clone();
    let chip = welcome.displayed_suggestions(3)[0].clone();

    let outcome = session.choose_suggestion(welcome.id(), 0).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));

    let messages = session.snapshot().await;
    assert_eq!(messages[1].body(), chip);
    assert_eq!(messages[1].role(), MessageRole::User);
}

#[tokio::test(start_paused = true)]
async fn test_only_displayed_suggestions_are_clickable() {
    let session = session();
    let welcome = session.snapshot().await[0].clone();
    assert_eq!(welcome.suggestions().len(), 4);

    let err = session.choose_suggestion(welcome.id(), 3).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(session.snapshot().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_user_messages_have_no_chips() {
    let session = session();
    let outcome = session.submit("hello").await.unwrap();
    let SubmitOutcome::Accepted { message_id, .. } = outcome else {
        panic!("submission was ignored");
    };

    let err = session.choose_suggestion(message_id, 0).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(start_paused = true)]
async fn test_shift_enter_does_not_submit() {
    let session = session();
    let outcome = session
        .handle_key(KeyPress::shift_enter(), "I have 2 hours")
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(session.snapshot().await.len(), 1);

    let outcome = session
        .handle_key(KeyPress::enter(), "I have 2 hours")
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Accepted { duration: Some(120), .. }));
}

#[tokio::test(start_paused = true)]
async fn test_jump_to_latest_clears_prompt() {
    let session = session();
    let viewport = Arc::new(RecordingViewport::default());
    session.attach_viewport(viewport.clone());

    session.on_user_scroll(scrolled_up(300.0)).await;
    assert!(session.view().pending_prompt);
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 0);

    session.jump_to_latest().await;
    assert!(!session.view().pending_prompt);
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_viewport_is_scrolled_on_every_append() {
    let session = session();
    let viewport = Arc::new(RecordingViewport::default());
    session.attach_viewport(viewport.clone());

    session.submit("I have 30 min").await.unwrap();
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);

    wait_for_messages(&session, 3).await;
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_layout_change_scrolls_only_while_following() {
    let session = session();
    let viewport = Arc::new(RecordingViewport::default());
    session.attach_viewport(viewport.clone());

    session.notify_layout_changed().await;
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);

    session.on_user_scroll(scrolled_up(400.0)).await;
    session.notify_layout_changed().await;
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);
    assert_eq!(session.scroll_state().await, ScrollState::Detached);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_viewport_is_a_no_op() {
    let session = session();
    let viewport = Arc::new(RecordingViewport::default());
    viewport.unmounted.store(true, Ordering::SeqCst);
    session.attach_viewport(viewport.clone());

    session.submit("hello").await.unwrap();
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 0);
    assert_eq!(session.scroll_state().await, ScrollState::Following);

    session.detach_viewport();
    let view = wait_for_messages(&session, 3).await;
    assert!(!view.pending_prompt);
}

#[tokio::test(start_paused = true)]
async fn test_view_serializes_for_renderers() {
    let session = session();
    let json = serde_json::to_value(session.view()).unwrap();

    assert_eq!(json["pendingPrompt"], false);
    assert_eq!(json["composing"], false);
    assert_eq!(json["scrollState"], "following");
    assert_eq!(json["messages"][0]["role"], "assistant");
    assert_eq!(json["messages"][0]["category"], "general");
}
