pub mod client;
pub mod exitcode;
pub mod http;
pub mod output;
pub mod settings;
