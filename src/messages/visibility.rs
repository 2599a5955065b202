use crate::db::Message;

/// Broadcast kinds are visible to everyone; anything else only to its sender
/// and recipient. With no viewer only broadcasts are visible.
pub fn is_visible(message: &Message, viewer: Option<&str>) -> bool {
    message.kind.is_broadcast()
        || viewer.is_some_and(|viewer| message.to == viewer || message.from == viewer)
}

/// Visible messages in their original order, keeping only the last `limit`.
pub fn visible_tail(messages: Vec<Message>, viewer: Option<&str>, limit: Option<usize>) -> Vec<Message> {
    let mut visible: Vec<Message> = messages
        .into_iter()
        .filter(|m| is_visible(m, viewer))
        .collect();

    if let Some(limit) = limit {
        let skip = visible.len().saturating_sub(limit);
        visible.drain(..skip);
    }

    visible
}
