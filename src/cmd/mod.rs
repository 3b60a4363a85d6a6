use clap::Subcommand;
use snafu::prelude::*;

use crate::error::*;
use crate::helpers::{http::HttpUserClient, settings::Settings};

pub mod user;
use user::UserCommand;

#[derive(Clone, Debug, Subcommand)]
pub enum RettiwtCommand {
    #[command(name = "user")]
    User(UserCommand),
}

impl RettiwtCommand {
    pub fn run(&self, settings: &Settings) -> Result<(), Error> {
        let client =
            HttpUserClient::new(settings.api_url()?, settings).context(HttpClientBuildSnafu)?;

        match self {
            RettiwtCommand::User(cmd) => cmd.run(&client),
        }
    }
}
