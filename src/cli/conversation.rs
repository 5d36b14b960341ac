//! Conversation commands

use colored::Colorize;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, ConversationFilterArgs, OutputFormat, PaginationArgs};
use crate::client::models::Conversation;
use crate::client::pagination::ConversationQuery;
use crate::error::{LookupField, Result};
use crate::models::ConversationDisplay;
use crate::output::Formattable;
use crate::output::json::print_json;
use crate::reconcile::{Resolver, conversation_types};

/// Build the `conversations.list` query, always including public channels.
fn query(filters: &ConversationFilterArgs) -> Result<ConversationQuery> {
    let types = conversation_types(filters.declared_types())?;
    Ok(ConversationQuery {
        exclude_archived: filters.exclude_archived,
        ..ConversationQuery::types(types)
    })
}

/// Run the conversation list command
pub async fn list(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    filters: &ConversationFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let query = query(filters)?;

    run_list_command::<Conversation, ConversationDisplay, _, _>(
        opts,
        cancel,
        pagination,
        "conversations",
        |client, cancel, page_limit| async move {
            Resolver::new(client.as_ref(), cancel)
                .page_limit(page_limit)
                .conversations(&query)
                .await
        },
    )
    .await
}

/// Run the conversation get command
pub async fn get(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    identifier: &str,
    by_name: bool,
    filters: &ConversationFilterArgs,
) -> Result<()> {
    let query = query(filters)?;
    let ctx = CommandContext::new(opts, cancel)?;

    let field = if by_name {
        LookupField::Name
    } else {
        LookupField::Id
    };
    let conversation = ctx.resolver().conversation(&query, field, identifier).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&conversation)?,
        OutputFormat::Table => vec![ConversationDisplay::from(&conversation)].print(ctx.format)?,
        OutputFormat::Pretty => display_conversation(&conversation),
    }

    Ok(())
}

fn display_conversation(conversation: &Conversation) {
    let display = ConversationDisplay::untruncated(conversation);

    println!();
    println!("{}: #{}", "Conversation".bold(), display.name);
    println!("{}: {}", "ID".dimmed(), display.id);
    println!("{}: {}", "Type".dimmed(), display.kind);
    if display.archived {
        println!("{}", "(archived)".yellow());
    }
    println!("{}: {}", "Members".dimmed(), display.members.to_string().cyan());
    if !display.created.is_empty() {
        println!("{}: {} by {}", "Created".dimmed(), display.created, display.creator);
    }
    println!();
    println!("{}: {}", "Topic".bold(), display.topic);
    println!("{}: {}", "Purpose".bold(), display.purpose);
    println!();
}
