use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recipient meaning "everyone in the room".
pub const BROADCAST_TARGET: &str = "Todos";

/// Text of the notice written when a participant is swept.
pub const DEPARTURE_TEXT: &str = "sai da sala...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,

    // unique: name
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        use MessageKind::*;
        match self {
            Message => "message",
            PrivateMessage => "private_message",
            Status => "status",
        }
    }

    /// `status` is reserved for notices the server writes itself.
    pub fn client_settable(&self) -> bool {
        !matches!(self, MessageKind::Status)
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self, MessageKind::Message | MessageKind::Status)
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            "status" => Ok(MessageKind::Status),
            other => Err(format!("unknown message type {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub time: String,

    // unique: id
}

impl Message {
    pub fn departure(name: &str, time: String) -> Message {
        Message {
            id: Uuid::now_v7(),
            from: name.to_owned(),
            to: BROADCAST_TARGET.to_owned(),
            text: DEPARTURE_TEXT.to_owned(),
            kind: MessageKind::Status,
            time,
        }
    }
}
