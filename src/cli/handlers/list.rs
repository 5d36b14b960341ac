//! Generic list command handler
//!
//! Provides a reusable pattern for list commands that follow the standard flow:
//! 1. Create command context
//! 2. Fetch every page
//! 3. Apply limit
//! 4. Convert to display type
//! 5. Print output

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs};
use crate::client::SlackClient;
use crate::error::Result;
use crate::output::Formattable;

/// Run a standard list command with the common fetch → limit → display → print pattern.
///
/// # Type Parameters
///
/// * `T` - The API model type returned by the fetcher (e.g., `User`, `Conversation`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
///
/// The fetcher receives the client, the cancellation token and the page size.
///
/// # Example
///
/// ```ignore
/// run_list_command::<User, UserDisplay, _, _>(
///     opts,
///     cancel,
///     pagination,
///     "users",
///     |client, cancel, page_limit| async move {
///         Resolver::new(client.as_ref(), cancel).page_limit(page_limit).users().await
///     },
/// ).await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    pagination: &PaginationArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<SlackClient>, CancellationToken, usize) -> Fut,
{
    let ctx = CommandContext::new(opts, cancel)?;
    let page_limit = pagination
        .page_size
        .unwrap_or(ctx.config.preferences.page_limit);

    debug!("Fetching {} (page size {})", resource_name, page_limit);

    let items = fetcher(ctx.client.clone(), ctx.cancel.clone(), page_limit).await?;

    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = pagination
        .apply_limit(items)
        .into_iter()
        .map(D::from)
        .collect();
    display_items.print(ctx.format)?;

    Ok(())
}
