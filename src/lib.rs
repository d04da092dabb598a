pub(crate) mod agent;
pub(crate) mod error;
pub mod hive;
pub(crate) mod options;
pub(crate) mod uhp;

#[allow(unused)]
pub mod prelude
{
    pub use std::str::FromStr;

    pub use log::{self};

    pub use crate::{
        agent::*,
        error::{Error, Kind, Result},
        hive::*,
        options::{ExpansionOptions, Options},
        uhp::{Server, UhpOptions},
    };
}
