use clap::Parser;

use crate::helpers::client::UserRequest;

#[derive(Clone, Debug, Parser)]
pub struct UserDetailsCommand {
    #[arg(
        value_name = "id",
        help = "The username/id of the user whose details are to be fetched"
    )]
    id: String,
}

impl UserDetailsCommand {
    pub fn request(&self) -> UserRequest {
        UserRequest::details(&self.id)
    }
}
