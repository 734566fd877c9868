//! Message operations.

use clap::Subcommand;

use gv_core::error::GvResult;
use gv_models::MessageId;

use super::Context;

#[derive(Subcommand)]
pub enum MessagesAction {
    /// Move messages to the trash.
    Delete {
        /// Message ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Restore messages from the trash.
    Restore {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Star messages.
    Star {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Remove the star from messages.
    Unstar {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Mark messages read.
    Read {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Mark messages unread.
    Unread {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn parse_ids(ids: &[String]) -> GvResult<Vec<MessageId>> {
    ids.iter().map(|id| MessageId::parse(id)).collect()
}

pub async fn run(ctx: &Context, action: MessagesAction) -> GvResult<()> {
    // Validate ids before signing in.
    let (ids, verb) = match &action {
        MessagesAction::Delete { ids } => (parse_ids(ids)?, "Deleted"),
        MessagesAction::Restore { ids } => (parse_ids(ids)?, "Restored"),
        MessagesAction::Star { ids } => (parse_ids(ids)?, "Starred"),
        MessagesAction::Unstar { ids } => (parse_ids(ids)?, "Unstarred"),
        MessagesAction::Read { ids } => (parse_ids(ids)?, "Marked read"),
        MessagesAction::Unread { ids } => (parse_ids(ids)?, "Marked unread"),
    };

    let client = super::connect(ctx).await?;
    let response = match action {
        MessagesAction::Delete { .. } => client.delete_messages(&ids, true).await?,
        MessagesAction::Restore { .. } => client.delete_messages(&ids, false).await?,
        MessagesAction::Star { .. } => client.star_messages(&ids, true).await?,
        MessagesAction::Unstar { .. } => client.star_messages(&ids, false).await?,
        MessagesAction::Read { .. } => client.mark_messages(&ids, true).await?,
        MessagesAction::Unread { .. } => client.mark_messages(&ids, false).await?,
    };

    super::print_action(
        ctx.format,
        &format!("{verb} {} message(s).", ids.len()),
        &response,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_rejects_bad_id() {
        let good = "a".repeat(40);
        assert_eq!(parse_ids(&[good.clone()]).unwrap()[0].as_str(), good);
        assert!(parse_ids(&[good, "not-an-id".into()]).is_err());
    }
}
