//! State model of the KiteBot portal: session, routing and backend calls, free of DOM access.

pub mod api;
pub mod config;
pub mod expiry;
pub mod messages;
pub mod portal;
pub mod router;
pub mod session;
pub mod storage;
pub mod view;

pub use api::ApiClient;
pub use api::error::ClientError;
pub use config::{ApiConfig, PortalConfig};
pub use portal::{AuthForm, AuthOutcome, FeedbackForm, FeedbackOutcome, Portal, Redirect};
pub use router::{Navigation, PageId, Router};
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use view::{AuthMode, AuthPanel, KeyDisplay, NavState, StatusMessage, Tone};
