pub mod client;
pub mod error;
pub mod types;

pub use client::JikanClient;
pub use error::JikanError;
pub use types::{AnimeFull, CharacterEdge, Images, Statistics};
