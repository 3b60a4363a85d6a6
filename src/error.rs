use camino::Utf8PathBuf;

use crate::helpers::{client::UserOperation, exitcode};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    // ===================
    // src/helpers/output.rs
    // ===================

    //     fn format
    #[snafu(display("Failed to generate a JSON output for the following (lossy) document:\n{:#?}", content))]
    OutputJson {
        content: String,
        source: serde_json::Error,
    },

    #[snafu(display("Failed to generate a YAML output for the following (lossy) document:\n{:#?}", content))]
    OutputYaml {
        content: String,
        source: serde_yaml_ng::Error,
    },

    // ===================
    // src/helpers/settings.rs
    // ===================

    //     fn from_path (Settings::from_path)
    #[snafu(display("Failed to read settings file: {path}"))]
    SettingsRead {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse settings file as TOML: {path}"))]
    SettingsToml {
        path: Utf8PathBuf,
        source: toml::de::Error,
    },

    //     fn api_url (Settings::api_url)
    #[snafu(display("No API URL configured. Use --api-url, RETTIWT_API_URL or api_url in the settings file."))]
    SettingsNoApiUrl,

    #[snafu(display("Invalid API URL: {url}"))]
    SettingsApiUrl {
        url: String,
        source: url::ParseError,
    },

    // ===================
    // src/helpers/http.rs
    // ===================

    //     fn new (HttpUserClient::new)
    #[snafu(display("Failed to setup the HTTP client"))]
    HttpClientBuild {
        source: crate::helpers::http::HttpError,
    },

    // ===================
    // src/cmd/user
    // ===================

    //     fn fetch (UserCommand::fetch)
    #[snafu(display("Failed to start the async runtime"))]
    Runtime { source: std::io::Error },

    #[snafu(display("Failed to fetch {operation} for user {id}"))]
    Client {
        operation: UserOperation,
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// The process exit code matching this error, in the BSD sysexits range.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputJson { .. } | Self::OutputYaml { .. } => exitcode::DATAERR,
            Self::SettingsRead { .. }
            | Self::SettingsToml { .. }
            | Self::SettingsNoApiUrl
            | Self::SettingsApiUrl { .. }
            | Self::HttpClientBuild { .. } => exitcode::CONFIG,
            Self::Runtime { .. } => exitcode::OSERR,
            Self::Client { .. } => exitcode::UNAVAILABLE,
        }
    }
}
