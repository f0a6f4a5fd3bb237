//! Request and response bodies of the KiteBot backend

use serde::{Deserialize, Serialize};

/// Value of `status` on every successful response
pub const SUCCESS_STATUS: &str = "success";

/// Backend endpoints, relative to the base URL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    SubmitFeedback,
    CheckKey,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::SubmitFeedback => "submit_feedback",
            Self::CheckKey => "check_key",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckKeyRequest {
    pub key: String,
}

/// Common response envelope. Which optional fields are present depends on the endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub remaining_days: Option<i64>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
