//! Portal orchestration: session, router and backend calls behind one handle
//!
//! Nothing here touches the DOM. Every operation returns what the page should show,
//! and the wasm binding applies it.

use crate::api::ApiClient;
use crate::api::error::ClientError;
use crate::api::types::{ApiResponse, FeedbackRequest, LoginRequest, RegisterRequest};
use crate::config::PortalConfig;
use crate::messages;
use crate::router::{Navigation, PageId, Router};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::view::{AuthMode, KeyDisplay, NavState, StatusMessage};
use std::cell::RefCell;

/// Values read from the login or register form
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    /// Only present on the register form
    pub username: Option<String>,
}

/// Values read from the feedback form
#[derive(Clone, Debug, Default)]
pub struct FeedbackForm {
    /// Checked `feedback-type` radio, if any
    pub kind: Option<String>,
    pub text: String,
}

/// Deferred navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub page: PageId,
    pub delay_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOutcome {
    pub message: StatusMessage,
    /// Key and expiry to write into the profile fields
    pub credentials: Option<KeyDisplay>,
    pub redirect: Option<Redirect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackOutcome {
    pub message: StatusMessage,
    pub reset_form: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub struct Portal<S> {
    sessions: SessionStore<S>,
    router: RefCell<Router>,
    api: ApiClient,
}

impl<S: KeyValueStore> Portal<S> {
    pub fn new(storage: S, api: ApiClient, pages: impl IntoIterator<Item = PageId>) -> Self {
        Self {
            sessions: SessionStore::new(storage),
            router: RefCell::new(Router::new(pages)),
            api,
        }
    }

    pub const fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.sessions.session()
    }

    /// Restore the persisted session. Returns the key fields to show when logged in.
    pub fn hydrate(&self) -> Option<KeyDisplay> {
        let session = self.sessions.load_session();
        session
            .logged_in
            .then(|| KeyDisplay::new(&session.api_key, &session.expiry))
    }

    pub fn nav_state(&self) -> NavState {
        NavState::from_session(&self.sessions.session())
    }

    pub fn active_page(&self) -> Option<PageId> {
        self.router.borrow().active().cloned()
    }

    pub fn navigate_to(&self, page: &PageId) -> Navigation {
        self.router.borrow_mut().navigate_to(page)
    }

    /// Route from the current URL fragment, guarding protected pages
    pub fn resolve_from_location(&self, fragment: &str) -> Navigation {
        let logged_in = self.sessions.is_logged_in();
        self.router
            .borrow_mut()
            .resolve_from_location(fragment, logged_in)
    }

    /// Log in or register.
    ///
    /// On success the session is replaced and the caller gets the key fields plus a
    /// delayed redirect to the profile page. Failures leave the session untouched.
    pub async fn authenticate(&self, mode: AuthMode, form: AuthForm) -> AuthOutcome {
        let result = match mode {
            AuthMode::Login => {
                self.api
                    .login(&LoginRequest {
                        email: form.email.clone(),
                        password: form.password.clone(),
                    })
                    .await
            }
            AuthMode::Register => {
                self.api
                    .register(&RegisterRequest {
                        email: form.email.clone(),
                        password: form.password.clone(),
                        username: form.username.clone().unwrap_or_default(),
                    })
                    .await
            }
        };

        match result {
            Ok(response) => self.complete_auth(mode, &form, response),
            Err(e) => AuthOutcome {
                message: self.failure_message(&e, messages::AUTH_FALLBACK_ERROR),
                credentials: None,
                redirect: None,
            },
        }
    }

    fn complete_auth(&self, mode: AuthMode, form: &AuthForm, response: ApiResponse) -> AuthOutcome {
        let current = self.sessions.session();

        let key = non_empty(response.key).unwrap_or(current.api_key);
        let expiry = non_empty(response.expiry)
            .or_else(|| self.sessions.stored_expiry())
            .unwrap_or_default();
        let username = non_empty(response.username)
            .or_else(|| non_empty(form.username.clone()))
            .unwrap_or(current.username);

        tracing::info!(?mode, %username, "authenticated");
        if let Err(e) = self
            .sessions
            .set_session(Session::logged_in(username, key.clone(), expiry.clone()))
        {
            tracing::warn!(error = %e, "session not fully persisted");
        }

        AuthOutcome {
            message: StatusMessage::success(messages::redirecting(
                response.message.as_deref().unwrap_or_default(),
            )),
            credentials: Some(KeyDisplay::new(&key, &expiry)),
            redirect: Some(Redirect {
                page: PageId::profile(),
                delay_ms: PortalConfig::REDIRECT_DELAY_MS,
            }),
        }
    }

    /// Check the feedback form locally. No request is sent when this fails.
    pub fn prepare_feedback(&self, form: &FeedbackForm) -> Result<FeedbackRequest, StatusMessage> {
        let Some(kind) = form.kind.as_deref().filter(|k| !k.is_empty()) else {
            return Err(StatusMessage::error(messages::FEEDBACK_MISSING_FIELDS));
        };
        if form.text.is_empty() {
            return Err(StatusMessage::error(messages::FEEDBACK_MISSING_FIELDS));
        }

        let session = self.sessions.session();
        let Some(key) = session.active_key() else {
            tracing::warn!("feedback refused without an active session");
            return Err(StatusMessage::error(messages::FEEDBACK_LOGIN_REQUIRED));
        };

        Ok(FeedbackRequest {
            key: key.to_string(),
            kind: kind.to_string(),
            content: form.text.clone(),
        })
    }

    pub async fn send_feedback(&self, request: FeedbackRequest) -> FeedbackOutcome {
        match self.api.submit_feedback(&request).await {
            Ok(response) => {
                tracing::info!(kind = %request.kind, "feedback accepted");
                FeedbackOutcome {
                    message: StatusMessage::success(response.message.unwrap_or_default()),
                    reset_form: true,
                }
            }
            Err(e) => FeedbackOutcome {
                message: self.failure_message(&e, messages::FEEDBACK_FALLBACK_ERROR),
                reset_form: false,
            },
        }
    }

    /// Validate then send feedback
    pub async fn submit_feedback(&self, form: &FeedbackForm) -> FeedbackOutcome {
        match self.prepare_feedback(form) {
            Ok(request) => self.send_feedback(request).await,
            Err(message) => FeedbackOutcome {
                message,
                reset_form: false,
            },
        }
    }

    /// Drop the session and return to the default page
    pub fn logout(&self) -> Navigation {
        if let Err(e) = self.sessions.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        tracing::info!("logged out");
        self.navigate_to(&PageId::default_page())
    }

    /// Remaining-days line for the active key, `None` when logged out or on failure
    pub async fn key_status(&self) -> Option<String> {
        let key = self.sessions.session().active_key()?.to_string();
        match self.api.check_key(&key).await {
            Ok(response) => response.remaining_days.map(messages::key_remaining_days),
            Err(e) => {
                tracing::warn!(error = %e, "key status unavailable");
                e.server_message().map(messages::error_label)
            }
        }
    }

    fn failure_message(&self, error: &ClientError, fallback: &str) -> StatusMessage {
        if error.is_transport() {
            tracing::error!(error = %error, base_url = self.api.base_url(), "backend unreachable");
            return StatusMessage::error(messages::unreachable(self.api.base_url()));
        }
        StatusMessage::error(messages::error_label(
            error.server_message().unwrap_or(fallback),
        ))
    }
}
