//! View models the presentation layer renders verbatim

use crate::expiry::{ExpiryDisplay, format_expiry};
use crate::messages;
use crate::session::Session;

/// Visibility of the session-dependent nav entries and profile fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    pub show_login: bool,
    pub show_profile: bool,
    pub show_feedback: bool,
    pub show_download: bool,
    /// Text for `#profile-username`; `None` leaves the field untouched
    pub profile_username: Option<String>,
    /// Text for `#trial-key`; `None` leaves the field untouched
    pub profile_key: Option<String>,
}

impl NavState {
    pub fn from_session(session: &Session) -> Self {
        let logged_in = session.logged_in;
        Self {
            show_login: !logged_in,
            show_profile: logged_in,
            show_feedback: logged_in,
            show_download: logged_in,
            profile_username: logged_in.then(|| session.username.clone()),
            profile_key: logged_in.then(|| session.api_key.clone()),
        }
    }
}

/// Key and expiry as shown on the profile page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDisplay {
    pub key: String,
    /// `None` when there was no expiry to show
    pub expiry: Option<ExpiryDisplay>,
}

impl KeyDisplay {
    pub fn new(key: &str, expiry: &str) -> Self {
        Self {
            key: key.to_string(),
            expiry: format_expiry(expiry),
        }
    }

    pub fn expiry_text(&self) -> Option<&str> {
        self.expiry.as_ref().map(ExpiryDisplay::text)
    }
}

/// Which auth form a submit came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    /// Parse the `type` argument of the inline `showAuth`/`handleAuth` handlers
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("register") {
            Self::Register
        } else {
            Self::Login
        }
    }

    pub const fn form_id(self) -> &'static str {
        match self {
            Self::Login => "login-form",
            Self::Register => "register-form",
        }
    }

    pub const fn message_id(self) -> &'static str {
        match self {
            Self::Login => "login-message",
            Self::Register => "register-message",
        }
    }
}

/// State of the login/register toggle on the auth page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthPanel {
    pub mode: AuthMode,
    pub title: &'static str,
    /// 1-based position of the toggle button to mark active
    pub active_toggle: usize,
}

impl AuthPanel {
    pub const fn for_mode(mode: AuthMode) -> Self {
        match mode {
            AuthMode::Login => Self {
                mode,
                title: messages::LOGIN_TITLE,
                active_toggle: 1,
            },
            AuthMode::Register => Self {
                mode,
                title: messages::REGISTER_TITLE,
                active_toggle: 2,
            },
        }
    }

    pub fn shows(&self, mode: AuthMode) -> bool {
        self.mode == mode
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Success,
    Error,
}

impl Tone {
    /// CSS colour of the status line
    pub const fn color(self) -> &'static str {
        match self {
            Self::Pending => "#FFD700",
            Self::Success => "#00FF00",
            Self::Error => "#FF0000",
        }
    }
}

/// Inline status line under a form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Pending,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_nav() {
        let nav = NavState::from_session(&Session::default());
        assert!(nav.show_login);
        assert!(!nav.show_profile && !nav.show_feedback && !nav.show_download);
        assert_eq!(nav.profile_username, None);
        assert_eq!(nav.profile_key, None);
    }

    #[test]
    fn member_nav() {
        let nav = NavState::from_session(&Session::logged_in("alice", "K123", ""));
        assert!(!nav.show_login);
        assert!(nav.show_profile && nav.show_feedback && nav.show_download);
        assert_eq!(nav.profile_username.as_deref(), Some("alice"));
        assert_eq!(nav.profile_key.as_deref(), Some("K123"));
    }

    #[test]
    fn auth_panel_toggle() {
        let login = AuthPanel::for_mode(AuthMode::parse("login"));
        assert!(login.shows(AuthMode::Login));
        assert_eq!(login.title, "Kullanıcı Girişi");
        assert_eq!(login.active_toggle, 1);

        let register = AuthPanel::for_mode(AuthMode::parse("register"));
        assert!(register.shows(AuthMode::Register));
        assert!(!register.shows(AuthMode::Login));
        assert_eq!(register.title, "Yeni Kullanıcı Kaydı");
        assert_eq!(register.active_toggle, 2);
    }

    #[test]
    fn key_display_without_expiry() {
        let display = KeyDisplay::new("K1", "");
        assert_eq!(display.key, "K1");
        assert_eq!(display.expiry_text(), None);
    }
}
