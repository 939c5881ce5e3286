pub mod status;
pub mod sweep;
