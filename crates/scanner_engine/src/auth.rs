use std::fmt;

/// Read-only mailbox scope requested at sign-in.
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Bearer token granted by the identity provider. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(len={})", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in popup was blocked")]
    PopupBlocked,
    #[error("sign-in popup was closed by the user")]
    PopupClosedByUser,
    #[error("sign-in returned no credential")]
    MissingCredential,
    #[error("sign-in failed: {0}")]
    Other(String),
}

impl AuthError {
    /// Maps an identity-provider error code to an [`AuthError`].
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        match code {
            "auth/popup-blocked" => AuthError::PopupBlocked,
            "auth/popup-closed-by-user" => AuthError::PopupClosedByUser,
            _ => AuthError::Other(message.into()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AuthError::PopupBlocked => {
                "Popup blocked. Allow popups for this site and try again.".to_string()
            }
            AuthError::PopupClosedByUser => {
                "Sign-in popup was closed before completing. Try again.".to_string()
            }
            AuthError::MissingCredential => {
                "Sign-in succeeded but no credential was returned. Try again.".to_string()
            }
            AuthError::Other(message) => format!("Sign-in error: {message}"),
        }
    }
}

/// The identity provider: exchanges the requested scopes for a token.
#[async_trait::async_trait]
pub trait SignIn: Send + Sync {
    async fn sign_in(&self, scopes: &[&str]) -> Result<AccessToken, AuthError>;
}
