//! Cursor pagination for the Slack Web API
//!
//! List methods return an opaque `response_metadata.next_cursor`; an empty
//! cursor marks the last page.

use serde::Deserialize;

/// Default page size (Slack accepts up to 1000 for most list methods)
pub const DEFAULT_LIMIT: usize = 1000;

/// Cursor parameters for one page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorParams {
    /// Items per page
    pub limit: Option<usize>,
    /// Cursor returned by the previous page (`None` for the first page)
    pub cursor: Option<String>,
}

impl CursorParams {
    /// First page with the given limit.
    pub fn first(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
        }
    }

    /// Next page, keeping the limit.
    pub fn next(&self, cursor: impl Into<String>) -> Self {
        Self {
            limit: self.limit,
            cursor: Some(cursor.into()),
        }
    }

    /// Convert to form parameters.
    ///
    /// `limit` is always sent, defaulting to [`DEFAULT_LIMIT`].
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.unwrap_or(DEFAULT_LIMIT).to_string())];

        if let Some(cursor) = self.cursor.as_deref().filter(|c| !c.is_empty()) {
            params.push(("cursor", cursor.to_string()));
        }

        params
    }
}

/// `response_metadata` block of a list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    /// Items on this page, in remote order
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    /// Build a page, treating a blank cursor as the end of the listing.
    pub fn new(items: Vec<T>, next_cursor: impl Into<String>) -> Self {
        let next_cursor = next_cursor.into();
        Self {
            items,
            next_cursor: if next_cursor.trim().is_empty() {
                None
            } else {
                Some(next_cursor)
            },
        }
    }

    /// Check if there are more pages to fetch.
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Filters for `conversations.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationQuery {
    /// Conversation types (`public_channel`, `private_channel`, `mpim`, `im`)
    pub types: Vec<String>,
    pub exclude_archived: bool,
}

impl Default for ConversationQuery {
    fn default() -> Self {
        Self {
            types: vec!["public_channel".to_string()],
            exclude_archived: false,
        }
    }
}

impl ConversationQuery {
    /// Query over the given conversation types.
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            exclude_archived: false,
        }
    }

    /// Convert to form parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.types.is_empty() {
            params.push(("types", self.types.join(",")));
        }
        if self.exclude_archived {
            params.push(("exclude_archived", "true".to_string()));
        }
        params
    }
}
