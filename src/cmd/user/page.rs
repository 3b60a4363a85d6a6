use clap::Parser;

use crate::helpers::client::{parse_count, UserOperation, UserRequest};

// Arguments shared by every paginated `user` subcommand. The count and cursor
// help is replaced per subcommand, see `UserSubCommand`.
#[derive(Clone, Debug, Parser)]
pub struct UserPageCommand {
    #[arg(value_name = "id", help = "The id of the user")]
    id: String,

    // Kept as a string: an invalid count falls back to the client's default
    #[arg(
        value_name = "count",
        help = "The number of items to fetch",
        allow_hyphen_values = true
    )]
    count: Option<String>,

    #[arg(value_name = "cursor", help = "The cursor to the batch of items to fetch")]
    cursor: Option<String>,
}

impl UserPageCommand {
    pub fn request(&self, operation: UserOperation) -> UserRequest {
        UserRequest::page(
            operation,
            &self.id,
            parse_count(self.count.as_deref()),
            self.cursor.as_deref(),
        )
    }
}
