//! Presentation Helpers
//!
//! Text and CSS classes derived from state.

use todo_sync::{ErrorKind, SyncError};

/// How long a failure banner stays up
pub const BANNER_TIMEOUT_MS: u32 = 6_000;

pub const EMPTY_STATE: &str = "No todos yet. Add one above!";

pub fn heading(email: Option<&str>) -> String {
    match email {
        Some(email) => format!("{} Todos", email),
        None => "Todos".to_string(),
    }
}

/// Completed items are struck through
pub fn title_class(completed: bool) -> &'static str {
    if completed {
        "text-decoration-line-through mb-1"
    } else {
        "mb-1"
    }
}

pub fn banner_message(err: &SyncError) -> String {
    match err.kind() {
        ErrorKind::NotAuthenticated => {
            "Your session is no longer valid. Sign out and sign in again.".to_string()
        }
        ErrorKind::NetworkUnreachable => {
            "Can't reach the server. Your list may be out of date.".to_string()
        }
        ErrorKind::ServerRejected => format!("The server rejected the request. {}", err),
        ErrorKind::Internal => format!("Something went wrong. {}", err),
    }
}

/// Identity errors carry `"<type>: <message>"`; only bad credentials get
/// the generic hint, the rest keep the service's own message.
pub fn sign_in_message(err: &SyncError) -> String {
    match err {
        SyncError::NotAuthenticated(detail) => match detail.split_once(": ") {
            Some(("NotAuthorizedException" | "UserNotFoundException", _)) => {
                "Incorrect username or password.".to_string()
            }
            Some((_, message)) => message.to_string(),
            None => detail.clone(),
        },
        _ if err.kind() == ErrorKind::NetworkUnreachable => {
            "Can't reach the sign-in service.".to_string()
        }
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(heading(Some("a@x.com")), "a@x.com Todos");
        assert_eq!(heading(None), "Todos");
    }

    #[test]
    fn test_title_class() {
        assert!(title_class(true).contains("text-decoration-line-through"));
        assert!(!title_class(false).contains("line-through"));
    }

    #[test]
    fn test_banner_distinguishes_kinds() {
        let auth = banner_message(&SyncError::NotAuthenticated("expired".into()));
        let network = banner_message(&SyncError::Network("refused".into()));
        let rejected = banner_message(&SyncError::Rejected("400: bad input".into()));

        assert!(auth.contains("sign in"));
        assert!(network.contains("reach the server"));
        assert!(rejected.contains("400: bad input"));
    }

    #[test]
    fn test_sign_in_message() {
        assert_eq!(
            sign_in_message(&SyncError::NotAuthenticated(
                "NotAuthorizedException: Incorrect username or password.".into()
            )),
            "Incorrect username or password."
        );
        assert_eq!(
            sign_in_message(&SyncError::NotAuthenticated(
                "UserNotFoundException: User does not exist.".into()
            )),
            "Incorrect username or password."
        );
        assert_eq!(
            sign_in_message(&SyncError::Network("refused".into())),
            "Can't reach the sign-in service."
        );
    }

    #[test]
    fn test_sign_in_message_keeps_account_state_hints() {
        assert_eq!(
            sign_in_message(&SyncError::NotAuthenticated(
                "UserNotConfirmedException: User is not confirmed.".into()
            )),
            "User is not confirmed."
        );
        assert_eq!(
            sign_in_message(&SyncError::NotAuthenticated(
                "PasswordResetRequiredException: Password reset required for the user".into()
            )),
            "Password reset required for the user"
        );
    }
}
