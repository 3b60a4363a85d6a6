use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The user resources exposed by a [`UserClient`].
///
/// Every operation except [`UserOperation::Details`] is paginated and accepts
/// an optional count and cursor.
#[derive(
    Copy, Clone, Debug, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum UserOperation {
    Details,
    Followers,
    Following,
    Highlights,
    Likes,
    Media,
    Replies,
    Subscriptions,
    Timeline,
}

impl UserOperation {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_paginated(&self) -> bool {
        !matches!(self, Self::Details)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Details => "Fetch the details of the user with the given id/username",
            Self::Followers => "Fetch the list of users who follow the given user",
            Self::Following => "Fetch the list of users who are followed by the given user",
            Self::Highlights => "Fetch the list of highlighted tweets of the given user",
            Self::Likes => "Fetch the list of tweets liked by the given user",
            Self::Media => "Fetch the media timeline of the given user",
            Self::Replies => "Fetch the replies timeline of the given user",
            Self::Subscriptions => "Fetch the list of users who are subscribed by the given user",
            Self::Timeline => "Fetch the tweets timeline of the given user",
        }
    }

    /// Help of the `count` argument. Empty for [`UserOperation::Details`].
    pub fn count_help(&self) -> &'static str {
        match self {
            Self::Details => "",
            Self::Followers => "The number of followers to fetch",
            Self::Following => "The number of following to fetch",
            Self::Highlights => "The number of highlighted tweets to fetch",
            Self::Likes => "The number of liked tweets to fetch",
            Self::Media => "The number of media to fetch",
            Self::Replies => "The number of replies to fetch",
            Self::Subscriptions => "The number of subscriptions to fetch",
            Self::Timeline => "The number of tweets to fetch",
        }
    }

    /// Help of the `cursor` argument. Empty for [`UserOperation::Details`].
    pub fn cursor_help(&self) -> &'static str {
        match self {
            Self::Details => "",
            Self::Followers => "The cursor to the batch of followers to fetch",
            Self::Following => "The cursor to the batch of following to fetch",
            Self::Highlights => "The cursor to the batch of highlights to fetch",
            Self::Likes => "The cursor to the batch of liked tweets to fetch",
            Self::Media => "The cursor to the batch of media to fetch",
            Self::Replies => "The cursor to the batch of replies to fetch",
            Self::Subscriptions => "The cursor to the batch of subscriptions to fetch",
            Self::Timeline => "The cursor to the batch of tweets to fetch",
        }
    }

    pub fn spec(&self) -> CommandSpec {
        let mut positional_args = vec![ArgSpec {
            name: "id",
            required: true,
            description: if self.is_paginated() {
                "The id of the user"
            } else {
                "The username/id of the user whose details are to be fetched"
            },
        }];

        if self.is_paginated() {
            positional_args.push(ArgSpec {
                name: "count",
                required: false,
                description: self.count_help(),
            });
            positional_args.push(ArgSpec {
                name: "cursor",
                required: false,
                description: self.cursor_help(),
            });
        }

        CommandSpec {
            name: self.name(),
            description: self.description(),
            positional_args,
        }
    }

    /// The command table for the whole `user` group, in declaration order.
    pub fn specs() -> Vec<CommandSpec> {
        Self::iter().map(|op| op.spec()).collect()
    }
}

/// Shape of one `user` subcommand: its name, help and positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub positional_args: Vec<ArgSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Something able to fetch user resources.
///
/// The returned values are opaque to the command line: a single record for
/// [`UserClient::details`] and a page for the other methods. They are
/// printed as-is.
///
/// `count` is `None` when the client should apply its own default, and
/// `cursor` is the pagination token returned by a previous page.
#[allow(async_fn_in_trait)]
pub trait UserClient {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn details(&self, id: &str) -> Result<Value, Self::Error>;

    async fn followers(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn following(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn highlights(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn likes(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn media(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn replies(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn subscriptions(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;

    async fn timeline(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, Self::Error>;
}

/// A single parsed `user` invocation, ready to be sent to a [`UserClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRequest {
    pub operation: UserOperation,
    pub id: String,
    pub count: Option<u64>,
    pub cursor: Option<String>,
}

impl UserRequest {
    pub fn details(id: &str) -> Self {
        Self {
            operation: UserOperation::Details,
            id: id.to_string(),
            count: None,
            cursor: None,
        }
    }

    pub fn page(
        operation: UserOperation,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Self {
        Self {
            operation,
            id: id.to_string(),
            count,
            cursor: cursor.map(str::to_string),
        }
    }

    /// Issue exactly one call on the client, matching the requested operation.
    pub async fn send<C: UserClient>(&self, client: &C) -> Result<Value, C::Error> {
        let id = self.id.as_str();
        let count = self.count;
        let cursor = self.cursor.as_deref();

        debug!(
            "Fetching {} for user {} (count: {:?}, cursor: {:?})",
            self.operation, id, count, cursor
        );

        match self.operation {
            UserOperation::Details => client.details(id).await,
            UserOperation::Followers => client.followers(id, count, cursor).await,
            UserOperation::Following => client.following(id, count, cursor).await,
            UserOperation::Highlights => client.highlights(id, count, cursor).await,
            UserOperation::Likes => client.likes(id, count, cursor).await,
            UserOperation::Media => client.media(id, count, cursor).await,
            UserOperation::Replies => client.replies(id, count, cursor).await,
            UserOperation::Subscriptions => client.subscriptions(id, count, cursor).await,
            UserOperation::Timeline => client.timeline(id, count, cursor).await,
        }
    }
}

/// Convert a command-line count into a number of items.
///
/// Anything that is not a non-negative integer is treated as unset, so the
/// client falls back to its own default.
pub fn parse_count(count: Option<&str>) -> Option<u64> {
    let raw = count?;
    match raw.trim().parse::<u64>() {
        Ok(count) => Some(count),
        Err(e) => {
            debug!("Ignoring invalid count {:?}: {}", raw, e);
            None
        }
    }
}
