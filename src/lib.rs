#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
#[macro_use]
extern crate snafu;

pub mod cmd;
pub mod error;
pub mod helpers;
