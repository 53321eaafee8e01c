//! Request bodies and their validation.
//!
//! Validation runs before any database access. Checks happen in a fixed
//! order and the first failure wins.

use friendgraph_common::{AppError, AppResult, is_valid_email};
use serde::Deserialize;

fn invalid_format(email: &str) -> AppError {
    AppError::Validation(format!("{email} invalid format (ex: \"andy@example.com\")"))
}

/// A missing or `null` field reads as empty.
fn field(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

fn check_email(email: &str) -> AppResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid_format(email))
    }
}

/// `{"friends": [first, second]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FriendPairRequest {
    /// Exactly two addresses once validated.
    pub friends: Option<Vec<String>>,
}

impl FriendPairRequest {
    /// Returns the two addresses once they pass validation.
    pub fn validate(&self) -> AppResult<(&str, &str)> {
        let emails = match self.friends.as_deref() {
            None | Some([]) => return Err(AppError::body_empty()),
            Some(emails) => emails,
        };

        let [first, second] = emails else {
            return Err(AppError::Validation(
                "Number of email addresses must be 2".to_string(),
            ));
        };

        if first == second {
            return Err(AppError::same_email());
        }

        check_email(first)?;
        check_email(second)?;

        Ok((first.as_str(), second.as_str()))
    }
}

/// `{"email": address}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    /// The user to look up.
    pub email: Option<String>,
}

impl EmailRequest {
    /// Returns the address once it passes validation.
    pub fn validate(&self) -> AppResult<&str> {
        let email = field(self.email.as_ref());
        if email.is_empty() {
            return Err(AppError::body_empty());
        }
        check_email(email)?;
        Ok(email)
    }
}

/// `{"requestor": address, "target": address}`, shared by subscriptions and
/// blocks.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestorRequest {
    /// The user acting.
    pub requestor: Option<String>,
    /// The user acted upon.
    pub target: Option<String>,
}

impl RequestorRequest {
    /// Returns `(requestor, target)` once both pass validation.
    pub fn validate(&self) -> AppResult<(&str, &str)> {
        let requestor = field(self.requestor.as_ref());
        let target = field(self.target.as_ref());

        match (requestor.is_empty(), target.is_empty()) {
            (true, true) => return Err(AppError::body_empty()),
            (true, false) => {
                return Err(AppError::Validation(
                    "Requestor field invalid format".to_string(),
                ));
            }
            (false, true) => {
                return Err(AppError::Validation(
                    "Target field invalid format".to_string(),
                ));
            }
            (false, false) => {}
        }

        if requestor == target {
            return Err(AppError::same_email());
        }

        check_email(requestor)?;
        check_email(target)?;

        Ok((requestor, target))
    }
}

/// `{"sender": address, "text": message}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipientsRequest {
    /// The author of the message.
    pub sender: Option<String>,
    /// The message body.
    pub text: Option<String>,
}

impl RecipientsRequest {
    /// Returns `(sender, text)` once both pass validation.
    ///
    /// Only the sender must be an address; the text is free-form.
    pub fn validate(&self) -> AppResult<(&str, &str)> {
        let sender = field(self.sender.as_ref());
        let text = field(self.text.as_ref());

        match (sender.is_empty(), text.is_empty()) {
            (true, true) => return Err(AppError::body_empty()),
            (true, false) => {
                return Err(AppError::Validation(
                    "Sender field invalid format".to_string(),
                ));
            }
            (false, true) => {
                return Err(AppError::Validation("Text field invalid format".to_string()));
            }
            (false, false) => {}
        }

        check_email(sender)?;

        Ok((sender, text))
    }
}
