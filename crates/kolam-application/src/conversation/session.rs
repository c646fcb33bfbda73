//! The conversation session: owner of transcript and scroll state.
//!
//! A session runs the reply pipeline for each submission, delays the
//! assistant's answer by a fixed "thinking" interval, and publishes a
//! [`ConversationView`] after every change. Pending replies are tied to the
//! session's cancellation token: once the session shuts down (or is
//! dropped) no reply is ever appended.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use kolam_core::assistant::{Intent, ResponsePayload, ResponseSynthesizer};
use kolam_core::config::{AssistantSettings, RootConfig, ScrollSettings};
use kolam_core::error::{KolamError, Result};
use kolam_core::input::{KeyPress, normalize_utterance};
use kolam_core::scroll::{ScrollDirective, ScrollMetrics, ScrollState, ScrollSynchronizer};
use kolam_core::transcript::{Message, MessageDraft, MessageId, Transcript};
use kolam_core::user::UserService;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::view::{ConversationView, ScrollViewport};

/// Result of offering text to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing entered the pipeline (blank text, or a non-submitting key).
    Ignored,
    /// The user message was appended and a reply is scheduled.
    Accepted {
        message_id: MessageId,
        intent: Intent,
        duration: Option<u32>,
    },
}

/// Mutable conversation state, guarded by a single lock.
struct SessionState {
    transcript: Transcript,
    scroll: ScrollSynchronizer,
    pending_replies: usize,
    closed: bool,
}

impl SessionState {
    fn view(&self) -> ConversationView {
        ConversationView {
            messages: self.transcript.snapshot().to_vec(),
            scroll_state: self.scroll.state(),
            pending_prompt: self.scroll.pending_prompt(),
            composing: self.pending_replies > 0,
        }
    }
}

/// State shared with spawned reply tasks.
struct Shared {
    session_id: Uuid,
    state: Mutex<SessionState>,
    view_tx: watch::Sender<ConversationView>,
    viewport: RwLock<Option<Arc<dyn ScrollViewport>>>,
}

impl Shared {
    fn publish(&self, state: &SessionState) {
        self.view_tx.send_replace(state.view());
    }

    fn apply(&self, directive: ScrollDirective) {
        if directive != ScrollDirective::ScrollToBottom {
            return;
        }
        let viewport = self
            .viewport
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let result = match viewport {
            Some(viewport) => viewport.scroll_to_bottom(),
            None => Err(KolamError::ViewportUnavailable),
        };
        if let Err(e) = result {
            // Not retried; the next event recomputes
            tracing::debug!(session_id = %self.session_id, "scroll to bottom skipped: {}", e);
        }
    }

    /// Forgets a reply cancelled before its delay elapsed.
    async fn abandon(&self) {
        let mut state = self.state.lock().await;
        if state.pending_replies > 0 {
            state.pending_replies -= 1;
            self.publish(&state);
        }
        tracing::debug!(session_id = %self.session_id, "pending reply cancelled");
    }

    /// Appends a reply unless the session has been torn down meanwhile.
    async fn deliver(&self, payload: ResponsePayload, cancel: &CancellationToken) {
        let mut state = self.state.lock().await;
        state.pending_replies = state.pending_replies.saturating_sub(1);
        if state.closed || cancel.is_cancelled() {
            tracing::debug!(session_id = %self.session_id, "discarding reply for closed session");
            return;
        }
        let id = state.transcript.append(MessageDraft::assistant(payload)).id();
        let directive = state.scroll.on_content_appended();
        self.publish(&state);
        self.apply(directive);
        tracing::debug!(session_id = %self.session_id, message_id = %id, "assistant reply delivered");
    }
}

/// A single conversation with the assistant.
pub struct ConversationSession {
    id: Uuid,
    display_name: String,
    settings: AssistantSettings,
    synthesizer: ResponseSynthesizer,
    shared: Arc<Shared>,
    cancel: CancellationToken,
}

impl ConversationSession {
    /// Creates a session seeded with the welcome message.
    ///
    /// The display name is read from `user_service` once, here.
    pub fn new(
        user_service: &dyn UserService,
        settings: AssistantSettings,
        scroll: ScrollSettings,
    ) -> Self {
        let id = Uuid::new_v4();
        let display_name = user_service.get_user_name();
        let synthesizer = ResponseSynthesizer::default();

        let state = SessionState {
            transcript: Transcript::with_welcome(synthesizer.welcome(&display_name)),
            scroll: ScrollSynchronizer::new(scroll.follow_threshold),
            pending_replies: 0,
            closed: false,
        };
        let (view_tx, _) = watch::channel(state.view());

        tracing::info!(session_id = %id, "conversation session started");

        Self {
            id,
            display_name,
            settings,
            synthesizer,
            shared: Arc::new(Shared {
                session_id: id,
                state: Mutex::new(state),
                view_tx,
                viewport: RwLock::new(None),
            }),
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a session from the loaded configuration.
    pub fn from_config(user_service: &dyn UserService, config: &RootConfig) -> Self {
        Self::new(user_service, config.assistant.clone(), config.scroll.clone())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn thinking_delay(&self) -> Duration {
        self.settings.thinking_delay()
    }

    pub fn suggestion_display_limit(&self) -> usize {
        self.settings.suggestion_display_limit
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Subscribes to view updates. The receiver starts at the current view.
    pub fn subscribe(&self) -> watch::Receiver<ConversationView> {
        self.shared.view_tx.subscribe()
    }

    /// The most recently published view.
    pub fn view(&self) -> ConversationView {
        self.shared.view_tx.borrow().clone()
    }

    pub async fn snapshot(&self) -> Vec<Message> {
        self.shared.state.lock().await.transcript.snapshot().to_vec()
    }

    pub async fn scroll_state(&self) -> ScrollState {
        self.shared.state.lock().await.scroll.state()
    }

    /// Connects the rendering layer's scroll container.
    pub fn attach_viewport(&self, viewport: Arc<dyn ScrollViewport>) {
        *self.shared.viewport.write().unwrap_or_else(|e| e.into_inner()) = Some(viewport);
    }

    /// Disconnects the scroll container; scroll requests become no-ops.
    pub fn detach_viewport(&self) {
        *self.shared.viewport.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Submits user text.
    ///
    /// Blank text is ignored. Otherwise the user message is appended
    /// immediately and the assistant reply after the thinking delay.
    ///
    /// # Errors
    ///
    /// Returns [`KolamError::SessionClosed`] after [`shutdown`](Self::shutdown).
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome> {
        if self.is_closed() {
            return Err(KolamError::SessionClosed);
        }
        let Some(utterance) = normalize_utterance(text) else {
            tracing::debug!(session_id = %self.id, "ignoring blank submission");
            return Ok(SubmitOutcome::Ignored);
        };

        let message_id = {
            let mut state = self.shared.state.lock().await;
            if state.closed {
                return Err(KolamError::SessionClosed);
            }
            let id = state.transcript.append(MessageDraft::user(utterance)).id();
            let directive = state.scroll.on_content_appended();
            state.pending_replies += 1;
            self.shared.publish(&state);
            self.shared.apply(directive);
            id
        };

        let reply = self.synthesizer.respond(utterance, &self.display_name);
        tracing::info!(
            session_id = %self.id,
            intent = %reply.intent,
            duration = ?reply.duration,
            "user message accepted"
        );
        self.schedule_reply(reply.payload);

        Ok(SubmitOutcome::Accepted {
            message_id,
            intent: reply.intent,
            duration: reply.duration,
        })
    }

    /// Handles a key press in the composer holding `text`.
    pub async fn handle_key(&self, key: KeyPress, text: &str) -> Result<SubmitOutcome> {
        if !key.submits() {
            return Ok(SubmitOutcome::Ignored);
        }
        self.submit(text).await
    }

    /// Submits the `index`-th displayed suggestion chip of an assistant message, verbatim.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error when the message or chip does not exist
    /// (chips beyond the display limit are not clickable).
    pub async fn choose_suggestion(
        &self,
        message_id: MessageId,
        index: usize,
    ) -> Result<SubmitOutcome> {
        let suggestion = {
            let state = self.shared.state.lock().await;
            state
                .transcript
                .get(message_id)
                .and_then(|message| {
                    message
                        .displayed_suggestions(self.settings.suggestion_display_limit)
                        .get(index)
                        .cloned()
                })
                .ok_or_else(|| KolamError::not_found("suggestion", format!("{message_id}#{index}")))?
        };
        self.submit(&suggestion).await
    }

    /// The user scrolled the transcript.
    pub async fn on_user_scroll(&self, metrics: ScrollMetrics) {
        self.update_scroll(|scroll| scroll.on_user_scroll(metrics)).await;
    }

    /// The user pressed "jump to latest".
    pub async fn jump_to_latest(&self) {
        self.update_scroll(ScrollSynchronizer::on_jump_to_latest).await;
    }

    /// Content height changed without a new message (resize, late layout).
    pub async fn notify_layout_changed(&self) {
        self.update_scroll(|scroll| scroll.on_layout_changed()).await;
    }

    async fn update_scroll<F>(&self, event: F)
    where
        F: FnOnce(&mut ScrollSynchronizer) -> ScrollDirective,
    {
        let mut state = self.shared.state.lock().await;
        if state.closed {
            return;
        }
        let before = state.scroll.state();
        let directive = event(&mut state.scroll);
        if state.scroll.state() != before {
            self.shared.publish(&state);
        }
        self.shared.apply(directive);
    }

    /// Tears the session down, discarding any reply still pending.
    ///
    /// Once this returns, the transcript never changes again.
    pub async fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock().await;
            state.closed = true;
            state.pending_replies = 0;
            self.shared.publish(&state);
        }
        self.cancel.cancel();
        tracing::info!(session_id = %self.id, "conversation session closed");
    }

    fn schedule_reply(&self, payload: ResponsePayload) {
        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.child_token();
        let delay = self.settings.thinking_delay();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => shared.abandon().await,
                _ = tokio::time::sleep(delay) => {
                    shared.deliver(payload, &cancel).await;
                }
            }
        });
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
