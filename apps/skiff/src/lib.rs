pub mod cache;
pub mod client;
pub mod config;
pub mod push;
pub mod remote;
pub mod session;
pub mod telemetry;
