//! Pagination argument types for CLI commands

use clap::Args;

/// Shared pagination arguments for list commands.
///
/// Listings always fetch every page; these only control the page size sent
/// to Slack and how many results are shown.
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Items requested per page (overrides preferences.page_limit)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl PaginationArgs {
    /// Keep at most `limit` items.
    pub fn apply_limit<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.limit {
            Some(limit) => items.into_iter().take(limit).collect(),
            None => items,
        }
    }
}
