pub mod notification;
pub mod otp;
pub mod session;
pub mod user;

pub use notification::Notification;
pub use otp::OtpChallenge;
pub use session::SessionStatus;
pub use user::{NewUser, User};

use serde::Serialize;

use crate::errors::AuthError;

/// The shape every operation reports back to a UI shell: a success flag plus
/// a short human-readable message. Never carries partial successes.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Outcome {
            success: true,
            message: message.into(),
        }
    }

    pub fn err(error: &AuthError) -> Self {
        Outcome {
            success: false,
            message: error.user_message(),
        }
    }
}

impl From<crate::errors::Result<String>> for Outcome {
    fn from(result: crate::errors::Result<String>) -> Self {
        match result {
            Ok(message) => Outcome::ok(message),
            Err(e) => Outcome::err(&e),
        }
    }
}
