pub mod config;
pub mod constants;
pub mod detect;
pub mod errors;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod prune;
