//! Energy and CO2e balance of German municipalities for 2018 and a
//! climate-neutral target year.
//!
//! [`calculate`] runs every sector module for one municipality and target
//! year and assembles the result into a [`Balance`].

pub mod balance;
pub mod bisko;
pub mod compare;
pub mod config;
pub mod engine;
pub mod errors;
pub mod indicators;
pub mod inputs;
pub mod record;
pub mod refdata;
pub mod snapshot;
pub mod utils;
pub mod y2018;
pub mod y2030;

/// Output writers.
pub mod io {
    pub mod export;
}

#[cfg(feature = "api")]
pub mod api;

pub use balance::{Balance, Value};
pub use engine::calculate;
pub use errors::{BalanceError, BalanceResult};
