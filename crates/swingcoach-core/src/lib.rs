// Library root for the shared domain: golfer inputs, analysis results, the
// UI protocol between the lifecycle controller and the TUI, and config.

pub mod analysis;
pub mod config;
pub mod golf;
pub mod protocol;
pub mod request;
