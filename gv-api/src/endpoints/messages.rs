//! Message operations: delete, star, mark read.

use tracing::debug;

use gv_core::error::{GvError, GvResult};
use gv_models::{Message, MessageId};

use crate::client::{FormFields, VoiceClient};
use crate::response::ActionResponse;

/// Flag value as the service expects it.
fn flag(on: bool) -> String {
    if on { "1" } else { "0" }.to_string()
}

/// Build the form for a message operation: one `messages` pair per id,
/// followed by the operation flag.
fn message_form(ids: &[MessageId], flag_name: &'static str, on: bool) -> GvResult<FormFields> {
    if ids.is_empty() {
        return Err(GvError::Validation("no messages given".into()));
    }
    let mut fields: FormFields = ids
        .iter()
        .map(|id| ("messages", id.to_string()))
        .collect();
    fields.push((flag_name, flag(on)));
    Ok(fields)
}

impl VoiceClient {
    async fn messages_post(
        &self,
        url: String,
        ids: &[MessageId],
        flag_name: &'static str,
        on: bool,
    ) -> GvResult<ActionResponse> {
        let fields = message_form(ids, flag_name, on)?;
        debug!("{flag_name}={on} for {} message(s)", ids.len());
        self.validate_special(&url, fields).await
    }

    /// Delete messages. `trash` moves them to the trash folder; `false`
    /// restores them from it.
    pub async fn delete_messages(&self, ids: &[MessageId], trash: bool) -> GvResult<ActionResponse> {
        self.messages_post(self.endpoints().delete(), ids, "trash", trash)
            .await
    }

    /// Star or unstar messages.
    pub async fn star_messages(&self, ids: &[MessageId], star: bool) -> GvResult<ActionResponse> {
        self.messages_post(self.endpoints().star(), ids, "star", star)
            .await
    }

    /// Mark messages read or unread.
    pub async fn mark_messages(&self, ids: &[MessageId], read: bool) -> GvResult<ActionResponse> {
        self.messages_post(self.endpoints().mark(), ids, "read", read)
            .await
    }

    /// Move one message to the trash.
    pub async fn delete_message(&self, message: &Message) -> GvResult<ActionResponse> {
        self.delete_messages(std::slice::from_ref(&message.id), true)
            .await
    }

    pub async fn star_message(&self, message: &Message) -> GvResult<ActionResponse> {
        self.star_messages(std::slice::from_ref(&message.id), true)
            .await
    }

    pub async fn unstar_message(&self, message: &Message) -> GvResult<ActionResponse> {
        self.star_messages(std::slice::from_ref(&message.id), false)
            .await
    }

    pub async fn mark_message_read(&self, message: &Message, read: bool) -> GvResult<ActionResponse> {
        self.mark_messages(std::slice::from_ref(&message.id), read)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_form_repeats_ids() {
        let a = MessageId::parse(&"a".repeat(40)).unwrap();
        let b = MessageId::parse(&"b".repeat(40)).unwrap();
        let form = message_form(&[a, b], "star", false).unwrap();
        assert_eq!(
            form,
            vec![
                ("messages", "a".repeat(40)),
                ("messages", "b".repeat(40)),
                ("star", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_message_form_requires_ids() {
        assert!(matches!(
            message_form(&[], "read", true),
            Err(GvError::Validation(_))
        ));
    }
}
