#[macro_use]
extern crate log;

pub mod cli;
pub mod config;
pub mod finder;
pub mod library;
pub mod musical;
pub mod playlist;
pub mod plex;
pub mod runner;
pub mod theme;

pub use config::Config;
pub use library::MediaServer;
pub use plex::PlexClient;
