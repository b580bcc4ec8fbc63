pub mod cliopt;
pub mod common;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod query;
pub mod runner;
pub mod systemd;
pub mod web;
