use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

use rettiwt::{
    cmd::RettiwtCommand,
    helpers::output::{self, exit_result, OutputFormat},
    helpers::settings::Settings,
};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct RettiwtCli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// The API key to use for authentication
    #[arg(short, long, env = "RETTIWT_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// The base URL of the user resources service
    #[arg(short = 'u', long, env = "RETTIWT_API_URL")]
    api_url: Option<String>,

    /// The URL to the proxy to use
    #[arg(short, long, env = "RETTIWT_PROXY")]
    proxy: Option<String>,

    /// The timeout (in milliseconds) to use for requests
    #[arg(short, long, env = "RETTIWT_TIMEOUT")]
    timeout: Option<u64>,

    /// Read settings from this TOML file
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// How to print results
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: RettiwtCommand,
}

impl RettiwtCli {
    fn overrides(&self) -> Settings {
        Settings {
            api_url: self.api_url.clone(),
            api_key: self.key.clone(),
            proxy: self.proxy.clone(),
            timeout: self.timeout,
        }
    }
}

fn main() {
    // Parse the typed CLI
    let cli = RettiwtCli::parse();

    // Check whether to enable debug log
    if cli.debug {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Info)
            .init();
    }

    output::set_format(cli.format);

    // This helper function will set the proper exit code
    // and print errors recursively
    exit_result(
        Settings::load(cli.config.as_ref(), cli.overrides())
            .and_then(|settings| cli.command.run(&settings)),
    );
}
