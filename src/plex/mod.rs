mod client;
pub mod model;

pub use client::PlexClient;
pub use model::{ItemKind, MediaItem, Playlist, RatingSource, Section, SectionKind};
