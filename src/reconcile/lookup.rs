//! Paginated lookup resolver
//!
//! Fetches whole collections (conversations, users, user groups) fresh for
//! every operation and resolves names, emails and IDs against them. Nothing
//! is cached between operations.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;

use log::debug;
use tokio_util::sync::CancellationToken;

use super::sets::{CompareMode, compare, merge};
use crate::client::ListingApi;
use crate::client::models::{CONVERSATION_TYPES, Conversation, User, UserGroup, UserGroupQuery};
use crate::client::pagination::{ConversationQuery, CursorPage, CursorParams};
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::error::{ApiError, EntityKind, Error, LookupField, Result};

/// Conversation type searched when none are declared
pub const DEFAULT_CONVERSATION_TYPE: &str = "public_channel";

// ============================================================================
// Cancellation and Pagination
// ============================================================================

/// Await a remote call unless the token fires first.
pub async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}

/// Fetch every page of a cursor-paginated collection.
///
/// Pages are requested one after another, each with the cursor of the page
/// before, until the cursor comes back empty. A failed page aborts the whole
/// listing with the 1-based page number; nothing partial is returned.
pub async fn fetch_all<T, F, Fut>(
    collection: &'static str,
    cancel: &CancellationToken,
    first: CursorParams,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(CursorParams) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let mut items = Vec::new();
    let mut params = first.clone();
    let mut page = 1;

    loop {
        let fetched = cancellable(cancel, fetch_page(params))
            .await
            .map_err(|e| match e {
                Error::Cancelled => Error::Cancelled,
                source => Error::RemoteFetch {
                    collection,
                    page,
                    source: Box::new(source),
                },
            })?;

        debug!(
            "Fetched {} page {}: {} items, more={}",
            collection,
            page,
            fetched.items.len(),
            fetched.has_next_page()
        );
        items.extend(fetched.items);

        match fetched.next_cursor {
            Some(cursor) => {
                params = first.next(cursor);
                page += 1;
            }
            None => break,
        }
    }

    debug!("Total {} fetched: {}", collection, items.len());
    Ok(items)
}

// ============================================================================
// Entity Lookup
// ============================================================================

/// A remote entity that can be looked up by some of its fields.
pub trait Entity {
    const KIND: EntityKind;

    /// Value of a lookup field, or `None` if the entity has no such value.
    fn field(&self, field: LookupField) -> Option<&str>;
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

impl Entity for Conversation {
    const KIND: EntityKind = EntityKind::Conversation;

    fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::Id => non_empty(&self.id),
            LookupField::Name => non_empty(&self.name),
            LookupField::Email => None,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::Id => non_empty(&self.id),
            LookupField::Name => non_empty(&self.name),
            LookupField::Email => non_empty(self.email()),
        }
    }
}

impl Entity for UserGroup {
    const KIND: EntityKind = EntityKind::UserGroup;

    fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::Id => non_empty(&self.id),
            LookupField::Name => non_empty(&self.name),
            LookupField::Email => None,
        }
    }
}

/// First entity, in fetch order, whose `field` equals `value`.
pub fn resolve_by_field<'a, T: Entity>(
    items: &'a [T],
    field: LookupField,
    value: &str,
) -> Option<&'a T> {
    items.iter().find(|item| item.field(field) == Some(value))
}

/// Hash index over one field of a fetched collection.
///
/// Keeps the first occurrence of each key, so lookups agree with
/// [`resolve_by_field`].
pub struct EntityIndex<'a, T> {
    field: LookupField,
    by_key: HashMap<&'a str, &'a T>,
}

impl<'a, T: Entity> EntityIndex<'a, T> {
    pub fn new(items: &'a [T], field: LookupField) -> Self {
        let mut by_key = HashMap::with_capacity(items.len());
        for item in items {
            let Some(key) = item.field(field) else {
                continue;
            };
            match by_key.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
                Entry::Occupied(_) => {
                    debug!("Duplicate {} {} '{}', keeping first", T::KIND, field, key);
                }
            }
        }
        Self { field, by_key }
    }

    pub fn get(&self, value: &str) -> Option<&'a T> {
        self.by_key.get(value).copied()
    }

    /// Look up a value, failing with a `Translation` error on a miss.
    pub fn require(&self, value: &str) -> Result<&'a T> {
        self.get(value).ok_or_else(|| Error::Translation {
            kind: T::KIND,
            field: self.field,
            identifier: value.to_string(),
        })
    }

    /// Translate every value to the entity's `to` field, stopping at the first miss.
    ///
    /// An entity that is found but has no `to` value (a bot's email) translates to `""`.
    pub fn translate(&self, values: &[String], to: LookupField) -> Result<Vec<String>> {
        values
            .iter()
            .map(|value| {
                let entity = self.require(value)?;
                Ok(entity.field(to).unwrap_or_default().to_string())
            })
            .collect()
    }
}

/// Conversation types to list: the declared types merged with
/// `public_channel`, all of which must be known `conversations.list` types.
pub fn conversation_types(declared: Option<&[String]>) -> Result<Vec<String>> {
    let defaults = [DEFAULT_CONVERSATION_TYPE.to_string()];
    let types = merge(&[Some(&defaults[..]), Some(declared.unwrap_or_default())])?;

    if !compare(Some(&CONVERSATION_TYPES[..]), Some(types.as_slice()), CompareMode::Subset)? {
        return Err(Error::InvalidInput(format!(
            "conversation types must be a subset of {}; got {}",
            CONVERSATION_TYPES.join(", "),
            types.join(", ")
        )));
    }

    Ok(types)
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves entity references against fresh remote listings.
///
/// Every method fetches what it needs from scratch. Batch translations fetch
/// the collection once, answer every lookup from an [`EntityIndex`] and fail on
/// the first miss. An empty batch makes no remote call.
pub struct Resolver<'a, C: ?Sized> {
    client: &'a C,
    cancel: CancellationToken,
    page_limit: usize,
    channel_types: Vec<String>,
}

impl<'a, C: ListingApi + ?Sized> Resolver<'a, C> {
    pub fn new(client: &'a C, cancel: CancellationToken) -> Self {
        Self {
            client,
            cancel,
            page_limit: DEFAULT_PAGE_LIMIT,
            channel_types: vec!["public_channel".to_string(), "private_channel".to_string()],
        }
    }

    /// Page size for cursor-paginated listings.
    pub fn page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Conversation types searched when translating channels.
    pub fn channel_types(mut self, types: Vec<String>) -> Self {
        self.channel_types = types;
        self
    }

    pub fn client(&self) -> &'a C {
        self.client
    }

    /// Run a single remote call under this resolver's cancellation token.
    pub async fn call<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        cancellable(&self.cancel, call).await
    }

    // ------------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------------

    pub async fn conversations(&self, query: &ConversationQuery) -> Result<Vec<Conversation>> {
        let client = self.client;
        fetch_all(
            "conversations",
            &self.cancel,
            CursorParams::first(self.page_limit),
            |page| async move { client.list_conversations(query, &page).await },
        )
        .await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        let client = self.client;
        fetch_all(
            "users",
            &self.cancel,
            CursorParams::first(self.page_limit),
            |page| async move { client.list_users(&page).await },
        )
        .await
    }

    /// All user groups, including disabled ones, with members and counts.
    pub async fn user_groups(&self, team_id: Option<&str>) -> Result<Vec<UserGroup>> {
        let query = UserGroupQuery {
            team_id: team_id.map(str::to_string),
            ..UserGroupQuery::complete()
        };

        let groups = self
            .call(self.client.list_user_groups(&query))
            .await
            .map_err(|e| match e {
                Error::Cancelled => Error::Cancelled,
                source => Error::RemoteFetch {
                    collection: "user groups",
                    page: 1,
                    source: Box::new(source),
                },
            })?;

        debug!("Total user groups fetched: {}", groups.len());
        Ok(groups)
    }

    fn channel_query(&self) -> ConversationQuery {
        ConversationQuery::types(self.channel_types.iter().cloned())
    }

    // ------------------------------------------------------------------------
    // Single Entities
    // ------------------------------------------------------------------------

    /// Find one conversation by ID or name.
    pub async fn conversation(
        &self,
        query: &ConversationQuery,
        field: LookupField,
        value: &str,
    ) -> Result<Conversation> {
        let conversations = self.conversations(query).await?;
        EntityIndex::new(&conversations, field)
            .require(value)
            .cloned()
    }

    /// Find one user by ID, email or username.
    pub async fn user(&self, field: LookupField, value: &str) -> Result<User> {
        let users = self.users().await?;
        EntityIndex::new(&users, field).require(value).cloned()
    }

    /// Find a user group by name, disabled groups included. `None` if absent.
    pub async fn user_group_by_name(
        &self,
        name: &str,
        team_id: Option<&str>,
    ) -> Result<Option<UserGroup>> {
        let groups = self.user_groups(team_id).await?;
        let found = resolve_by_field(&groups, LookupField::Name, name).cloned();
        debug!("User group '{}' exists: {}", name, found.is_some());
        Ok(found)
    }

    /// Find a user group by name, failing if it does not exist.
    pub async fn require_user_group(&self, name: &str) -> Result<UserGroup> {
        self.user_group_by_name(name, None)
            .await?
            .ok_or_else(|| Error::Translation {
                kind: EntityKind::UserGroup,
                field: LookupField::Name,
                identifier: name.to_string(),
            })
    }

    /// Find a user group by ID, failing with `NotFound` if it does not exist.
    pub async fn user_group_by_id(&self, id: &str) -> Result<UserGroup> {
        let groups = self.user_groups(None).await?;
        resolve_by_field(&groups, LookupField::Id, id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("user group {}", id)).into())
    }

    // ------------------------------------------------------------------------
    // Batch Translation
    // ------------------------------------------------------------------------

    /// Channel names to IDs, searching the configured channel types.
    pub async fn channel_ids(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let conversations = self.conversations(&self.channel_query()).await?;
        EntityIndex::new(&conversations, LookupField::Name).translate(names, LookupField::Id)
    }

    /// Channel IDs to names, searching the configured channel types.
    pub async fn channel_names(&self, ids: &[String]) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conversations = self.conversations(&self.channel_query()).await?;
        EntityIndex::new(&conversations, LookupField::Id).translate(ids, LookupField::Name)
    }

    /// User emails to IDs.
    pub async fn user_ids(&self, emails: &[String]) -> Result<Vec<String>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.users().await?;
        EntityIndex::new(&users, LookupField::Email).translate(emails, LookupField::Id)
    }

    /// User IDs to emails.
    pub async fn user_emails(&self, ids: &[String]) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.users().await?;
        EntityIndex::new(&users, LookupField::Id).translate(ids, LookupField::Email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::client::fixtures::*;
    use crate::client::mock::MockSlackClient;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn paged_channels() -> MockSlackClient {
        MockSlackClient::new()
            .with_conversation_pages(vec![
                vec![test_channel("C1", "general"), test_channel("C2", "random")],
                vec![
                    ConversationBuilder::new("G1").name("ops").private().build(),
                    test_channel("C3", "dev"),
                ],
                vec![test_channel("C4", "general")],
            ])
            .await
    }

    #[tokio::test]
    async fn test_fetch_all_follows_cursor_to_the_end() {
        let mock = paged_channels().await;
        let resolver = Resolver::new(&mock, CancellationToken::new()).page_limit(2);

        let all = resolver
            .conversations(&ConversationQuery::types(["public_channel", "private_channel"]))
            .await
            .unwrap();

        assert_eq!(all.len(), 5);
        assert_eq!(mock.call_counts().await.list_conversations, 3);

        let requests = mock.captured_requests().await;
        assert!(requests[0].cursor.is_none());
        assert_eq!(requests[1].cursor.as_deref(), Some("page-1"));
        assert_eq!(requests[2].cursor.as_deref(), Some("page-2"));
        assert!(requests.iter().all(|r| r.limit == Some(2)));
    }

    #[tokio::test]
    async fn test_fetch_all_page_error_has_context() {
        let mock = MockSlackClient::new()
            .with_error(ApiError::ServerError("boom".into()))
            .await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        let err = resolver.users().await.unwrap_err();
        match err {
            Error::RemoteFetch {
                collection,
                page,
                source,
            } => {
                assert_eq!(collection, "users");
                assert_eq!(page, 1);
                assert!(matches!(*source, Error::Api(ApiError::ServerError(_))));
            }
            other => panic!("Expected RemoteFetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_already_cancelled_makes_no_call() {
        let mock = paged_channels().await;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let resolver = Resolver::new(&mock, cancel);

        let result = resolver.channel_ids(&names(&["general"])).await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(mock.call_counts().await.list_conversations, 0);
    }

    #[tokio::test]
    async fn test_fetch_all_cancelled_mid_flight() {
        let mock = paged_channels()
            .await
            .with_latency(Duration::from_millis(200))
            .await;
        let cancel = CancellationToken::new();
        let resolver = Resolver::new(&mock, cancel.clone());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = resolver.conversations(&ConversationQuery::default()).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_resolve_by_field_first_match_wins() {
        let channels = vec![
            test_channel("C1", "general"),
            test_channel("C4", "general"),
        ];
        let found = resolve_by_field(&channels, LookupField::Name, "general").unwrap();
        assert_eq!(found.id, "C1");

        let index = EntityIndex::new(&channels, LookupField::Name);
        assert_eq!(index.get("general").unwrap().id, "C1");
    }

    #[test]
    fn test_index_skips_blank_keys() {
        let users = vec![
            UserBuilder::new("B1").bot().build(),
            test_user("U1", "ada@example.com"),
        ];
        let index = EntityIndex::new(&users, LookupField::Email);
        assert!(index.get("").is_none());
        assert_eq!(index.get("ada@example.com").unwrap().id, "U1");
    }

    #[tokio::test]
    async fn test_channel_ids_across_pages() {
        let mock = paged_channels().await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        let ids = resolver
            .channel_ids(&names(&["ops", "general", "dev"]))
            .await
            .unwrap();

        // Preserves input order; duplicate "general" resolves to the first page's C1
        assert_eq!(ids, vec!["G1", "C1", "C3"]);
        // One listing answers the whole batch
        assert_eq!(mock.call_counts().await.list_conversations, 3);
    }

    #[tokio::test]
    async fn test_channel_names_round_trip() {
        let mock = paged_channels().await;
        let resolver = Resolver::new(&mock, CancellationToken::new());
        let declared = names(&["random", "ops"]);

        let ids = resolver.channel_ids(&declared).await.unwrap();
        let back = resolver.channel_names(&ids).await.unwrap();

        assert!(crate::reconcile::sets::set_eq(&declared, &back));
    }

    #[tokio::test]
    async fn test_channel_ids_missing_fails_fast() {
        let mock = paged_channels().await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        let err = resolver
            .channel_ids(&names(&["general", "nope", "also-nope"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Translation { kind: EntityKind::Conversation, field: LookupField::Name, ref identifier }
                if identifier == "nope"
        ));
    }

    #[tokio::test]
    async fn test_private_channels_need_private_type() {
        let mock = paged_channels().await;
        let resolver = Resolver::new(&mock, CancellationToken::new())
            .channel_types(vec!["public_channel".to_string()]);

        let result = resolver.channel_ids(&names(&["ops"])).await;
        assert!(matches!(result, Err(Error::Translation { .. })));
    }

    #[tokio::test]
    async fn test_empty_batches_make_no_calls() {
        let mock = MockSlackClient::new();
        let resolver = Resolver::new(&mock, CancellationToken::new());

        assert!(resolver.channel_ids(&[]).await.unwrap().is_empty());
        assert!(resolver.channel_names(&[]).await.unwrap().is_empty());
        assert!(resolver.user_ids(&[]).await.unwrap().is_empty());
        assert!(resolver.user_emails(&[]).await.unwrap().is_empty());
        assert_eq!(mock.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_user_ids_and_emails() {
        let mock = MockSlackClient::new()
            .with_user_pages(vec![
                vec![test_user("U1", "ada@example.com")],
                vec![test_user("U2", "bob@example.com")],
            ])
            .await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        let ids = resolver
            .user_ids(&names(&["bob@example.com", "ada@example.com"]))
            .await
            .unwrap();
        assert_eq!(ids, vec!["U2", "U1"]);

        let emails = resolver.user_emails(&ids).await.unwrap();
        assert_eq!(emails, vec!["bob@example.com", "ada@example.com"]);
    }

    #[tokio::test]
    async fn test_user_emails_of_bot_is_empty() {
        let mock = MockSlackClient::new()
            .with_users(vec![
                test_user("U1", "ada@example.com"),
                UserBuilder::new("B1").bot().build(),
            ])
            .await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        let emails = resolver.user_emails(&names(&["U1", "B1"])).await.unwrap();
        assert_eq!(emails, vec!["ada@example.com", ""]);

        // Unknown IDs still fail
        assert!(matches!(
            resolver.user_emails(&names(&["U9"])).await,
            Err(Error::Translation { ref identifier, .. }) if identifier == "U9"
        ));
    }

    #[tokio::test]
    async fn test_user_group_lookups() {
        let mock = MockSlackClient::new()
            .with_user_groups(vec![
                test_group("S1", "Group 1"),
                UserGroupBuilder::new("S2").name("Group 2").disabled().build(),
            ])
            .await;
        let resolver = Resolver::new(&mock, CancellationToken::new());

        // Disabled groups are found by name
        let found = resolver.user_group_by_name("Group 2", None).await.unwrap();
        assert_eq!(found.unwrap().id, "S2");

        assert!(resolver.user_group_by_name("Group 3", None).await.unwrap().is_none());
        assert!(matches!(
            resolver.require_user_group("Group 3").await,
            Err(Error::Translation { kind: EntityKind::UserGroup, .. })
        ));

        assert_eq!(resolver.user_group_by_id("S1").await.unwrap().name, "Group 1");
        assert!(matches!(
            resolver.user_group_by_id("S9").await,
            Err(Error::Api(ApiError::NotFound(_)))
        ));
    }

    #[test]
    fn test_conversation_types_default() {
        assert_eq!(conversation_types(None).unwrap(), vec!["public_channel"]);
    }

    #[test]
    fn test_conversation_types_merged_with_default() {
        let declared = names(&["private_channel", "im"]);
        assert_eq!(
            conversation_types(Some(&declared)).unwrap(),
            vec!["im", "private_channel", "public_channel"]
        );
    }

    #[test]
    fn test_conversation_types_rejects_unknown() {
        let declared = names(&["shared_channel"]);
        assert!(matches!(
            conversation_types(Some(&declared)),
            Err(Error::InvalidInput(_))
        ));
    }
}
