pub mod config;
pub mod logging;

// Shared helpers
pub mod html;
pub mod progress;
pub mod storage;
pub mod url_model;

// Mirroring
pub mod fetch;
pub mod listing;
pub mod mirror;

// Census reporting
pub mod census;
