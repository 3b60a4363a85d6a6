use clap::{Parser, Subcommand};
use serde_json::Value;
use snafu::prelude::*;
use tokio::runtime::Builder as RuntimeBuilder;

use crate::{
    error::*,
    helpers::client::{UserClient, UserOperation, UserRequest},
    helpers::output,
};

pub mod details;
pub mod page;

/// Access resources related to users
#[derive(Clone, Debug, Parser)]
pub struct UserCommand {
    #[command(subcommand)]
    cmd: UserSubCommand,
}

impl UserCommand {
    pub fn run<C: UserClient>(&self, client: &C) -> Result<(), Error> {
        let result = self.fetch(client)?;
        output::print(&result)
    }

    /// Send the request to the client and wait for its answer.
    pub fn fetch<C: UserClient>(&self, client: &C) -> Result<Value, Error> {
        let request = self.cmd.request();

        let rt = RuntimeBuilder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .context(RuntimeSnafu)?;

        rt.block_on(request.send(client))
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
            .context(ClientSnafu {
                operation: request.operation,
                id: request.id.clone(),
            })
    }
}

// Paginated variants share `UserPageCommand`, their count and cursor help comes
// from the `UserOperation` table.
#[derive(Clone, Debug, Subcommand)]
pub enum UserSubCommand {
    #[command(name = "details", about = UserOperation::Details.description())]
    Details(details::UserDetailsCommand),
    #[command(
        name = "followers",
        about = UserOperation::Followers.description(),
        mut_arg("count", |a| a.help(UserOperation::Followers.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Followers.cursor_help()))
    )]
    Followers(page::UserPageCommand),
    #[command(
        name = "following",
        about = UserOperation::Following.description(),
        mut_arg("count", |a| a.help(UserOperation::Following.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Following.cursor_help()))
    )]
    Following(page::UserPageCommand),
    #[command(
        name = "highlights",
        about = UserOperation::Highlights.description(),
        mut_arg("count", |a| a.help(UserOperation::Highlights.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Highlights.cursor_help()))
    )]
    Highlights(page::UserPageCommand),
    #[command(
        name = "likes",
        about = UserOperation::Likes.description(),
        mut_arg("count", |a| a.help(UserOperation::Likes.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Likes.cursor_help()))
    )]
    Likes(page::UserPageCommand),
    #[command(
        name = "media",
        about = UserOperation::Media.description(),
        mut_arg("count", |a| a.help(UserOperation::Media.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Media.cursor_help()))
    )]
    Media(page::UserPageCommand),
    #[command(
        name = "replies",
        about = UserOperation::Replies.description(),
        mut_arg("count", |a| a.help(UserOperation::Replies.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Replies.cursor_help()))
    )]
    Replies(page::UserPageCommand),
    #[command(
        name = "subscriptions",
        about = UserOperation::Subscriptions.description(),
        mut_arg("count", |a| a.help(UserOperation::Subscriptions.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Subscriptions.cursor_help()))
    )]
    Subscriptions(page::UserPageCommand),
    #[command(
        name = "timeline",
        about = UserOperation::Timeline.description(),
        mut_arg("count", |a| a.help(UserOperation::Timeline.count_help())),
        mut_arg("cursor", |a| a.help(UserOperation::Timeline.cursor_help()))
    )]
    Timeline(page::UserPageCommand),
}

impl UserSubCommand {
    pub fn request(&self) -> UserRequest {
        match self {
            Self::Details(cmd) => cmd.request(),
            Self::Followers(cmd) => cmd.request(UserOperation::Followers),
            Self::Following(cmd) => cmd.request(UserOperation::Following),
            Self::Highlights(cmd) => cmd.request(UserOperation::Highlights),
            Self::Likes(cmd) => cmd.request(UserOperation::Likes),
            Self::Media(cmd) => cmd.request(UserOperation::Media),
            Self::Replies(cmd) => cmd.request(UserOperation::Replies),
            Self::Subscriptions(cmd) => cmd.request(UserOperation::Subscriptions),
            Self::Timeline(cmd) => cmd.request(UserOperation::Timeline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::{error::ErrorKind, CommandFactory};
    use serde_json::json;
    use strum::IntoEnumIterator;

    use std::cell::RefCell;

    use crate::helpers::exitcode;

    #[derive(Debug, Snafu)]
    #[snafu(display("No such user: {id}"))]
    struct NoSuchUser {
        id: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Call {
        method: &'static str,
        id: String,
        count: Option<u64>,
        cursor: Option<String>,
    }

    /// Records every call and answers with a small document describing it.
    #[derive(Default)]
    struct RecordingClient {
        calls: RefCell<Vec<Call>>,
        fail: bool,
    }

    impl RecordingClient {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn record(
            &self,
            method: &'static str,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.calls.borrow_mut().push(Call {
                method,
                id: id.to_string(),
                count,
                cursor: cursor.map(str::to_string),
            });

            if self.fail {
                return Err(NoSuchUser { id: id.to_string() });
            }

            Ok(json!({
                "method": method,
                "id": id,
                "list": [{"id": "1"}, {"id": "2"}],
                "next": "c-next",
            }))
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl UserClient for RecordingClient {
        type Error = NoSuchUser;

        async fn details(&self, id: &str) -> Result<Value, NoSuchUser> {
            self.record("details", id, None, None)
        }

        async fn followers(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("followers", id, count, cursor)
        }

        async fn following(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("following", id, count, cursor)
        }

        async fn highlights(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("highlights", id, count, cursor)
        }

        async fn likes(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("likes", id, count, cursor)
        }

        async fn media(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("media", id, count, cursor)
        }

        async fn replies(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("replies", id, count, cursor)
        }

        async fn subscriptions(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("subscriptions", id, count, cursor)
        }

        async fn timeline(
            &self,
            id: &str,
            count: Option<u64>,
            cursor: Option<&str>,
        ) -> Result<Value, NoSuchUser> {
            self.record("timeline", id, count, cursor)
        }
    }

    fn parse(args: &[&str]) -> UserCommand {
        UserCommand::try_parse_from(std::iter::once("user").chain(args.iter().copied())).unwrap()
    }

    fn paginated() -> impl Iterator<Item = UserOperation> {
        UserOperation::iter().filter(|op| op.is_paginated())
    }

    #[test]
    fn only_id_leaves_count_and_cursor_unset() {
        for op in UserOperation::iter() {
            let client = RecordingClient::default();
            parse(&[op.name(), "someone"]).fetch(&client).unwrap();

            assert_eq!(
                client.calls(),
                vec![Call {
                    method: op.name(),
                    id: "someone".to_string(),
                    count: None,
                    cursor: None,
                }]
            );
        }
    }

    #[test]
    fn count_is_sent_as_a_number() {
        for op in paginated() {
            let client = RecordingClient::default();
            parse(&[op.name(), "12345", "25"]).fetch(&client).unwrap();

            let calls = client.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].method, op.name());
            assert_eq!(calls[0].count, Some(25));
        }
    }

    #[test]
    fn invalid_count_falls_back_to_default() {
        for count in ["abc", "-3", "2.5"] {
            for op in paginated() {
                let client = RecordingClient::default();
                parse(&[op.name(), "12345", count, "xyz123"])
                    .fetch(&client)
                    .unwrap();

                let calls = client.calls();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].count, None);
                assert_eq!(calls[0].cursor.as_deref(), Some("xyz123"));
            }
        }
    }

    #[test]
    fn cursor_is_passed_through() {
        for op in paginated() {
            let client = RecordingClient::default();
            parse(&[op.name(), "12345", "10", "xyz123"])
                .fetch(&client)
                .unwrap();

            assert_eq!(client.calls()[0].cursor.as_deref(), Some("xyz123"));
        }
    }

    #[test]
    fn missing_id_is_rejected() {
        for op in UserOperation::iter() {
            let err = UserCommand::try_parse_from(["user", op.name()]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn too_many_arguments_are_rejected() {
        let err = UserCommand::try_parse_from(["user", "details", "someuser", "10"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = UserCommand::try_parse_from(["user", "likes", "12345", "10", "c-abc", "extra"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn option_like_cursor_is_rejected() {
        let err = UserCommand::try_parse_from(["user", "followers", "12345", "10", "--bogus"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        // A negative count still reaches the default fallback
        let cmd = parse(&["followers", "12345", "-3"]);
        assert_eq!(cmd.cmd.request().count, None);
    }

    #[test]
    fn followers_with_count_and_cursor() {
        let client = RecordingClient::default();
        let result = parse(&["followers", "12345", "10", "c-abc"])
            .fetch(&client)
            .unwrap();

        assert_eq!(
            client.calls(),
            vec![Call {
                method: "followers",
                id: "12345".to_string(),
                count: Some(10),
                cursor: Some("c-abc".to_string()),
            }]
        );
        assert_eq!(
            result,
            json!({
                "method": "followers",
                "id": "12345",
                "list": [{"id": "1"}, {"id": "2"}],
                "next": "c-next",
            })
        );
    }

    #[test]
    fn details_of_a_username() {
        let cmd = parse(&["details", "someuser"]);
        assert_eq!(cmd.cmd.request(), UserRequest::details("someuser"));

        let client = RecordingClient::default();
        let result = cmd.fetch(&client).unwrap();

        assert_eq!(client.calls().len(), 1);
        assert_eq!(result["method"], "details");
        assert_eq!(result["id"], "someuser");
    }

    #[test]
    fn client_errors_are_reported() {
        let client = RecordingClient::failing();
        let err = parse(&["timeline", "ghost"]).fetch(&client).unwrap_err();

        assert_eq!(client.calls().len(), 1);
        assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
        assert_eq!(err.to_string(), "Failed to fetch timeline for user ghost");

        match err {
            Error::Client {
                operation, source, ..
            } => {
                assert_eq!(operation, UserOperation::Timeline);
                assert_eq!(source.to_string(), "No such user: ghost");
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn commands_match_the_operation_table() {
        let cmd = UserCommand::command();
        let subcommands: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        let names: Vec<&str> = UserOperation::iter().map(|op| op.name()).collect();
        assert_eq!(subcommands, names);

        for spec in UserOperation::specs() {
            let sub = cmd.find_subcommand(spec.name).unwrap();
            assert_eq!(
                sub.get_about().map(|s| s.to_string()).as_deref(),
                Some(spec.description)
            );

            let positionals: Vec<_> = sub.get_positionals().collect();
            assert_eq!(positionals.len(), spec.positional_args.len());

            for (arg, expected) in positionals.iter().zip(&spec.positional_args) {
                assert_eq!(arg.get_id().as_str(), expected.name);
                assert_eq!(arg.is_required_set(), expected.required);
                assert_eq!(
                    arg.get_help().map(|s| s.to_string()).as_deref(),
                    Some(expected.description)
                );
            }
        }
    }
}
