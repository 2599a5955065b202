use serde::Deserialize;

use crate::{db::MessageKind, AppError, AppResult};

/// Raw `{to, text, type}` as posted by a client.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBody {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

impl MessageBody {
    pub fn new(to: &str, text: &str, kind: &str) -> Self {
        Self {
            to: Some(to.to_owned()),
            text: Some(text.to_owned()),
            kind: Some(kind.to_owned()),
        }
    }

    pub fn validate(self) -> AppResult<ValidBody> {
        fn required(field: &str, value: Option<String>) -> AppResult<String> {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_owned()),
                _ => Err(AppError::Validation(format!("\"{field}\" must not be empty"))),
            }
        }

        let to = required("to", self.to)?;
        let text = required("text", self.text)?;
        let kind = required("type", self.kind)?
            .parse::<MessageKind>()
            .ok()
            .filter(MessageKind::client_settable)
            .ok_or_else(|| {
                AppError::Validation("\"type\" must be one of [message, private_message]".to_owned())
            })?;

        Ok(ValidBody { to, text, kind })
    }
}
