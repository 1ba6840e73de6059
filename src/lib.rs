pub mod core;
pub mod feed;
pub mod storage;
#[cfg(feature = "cli")]
pub mod autosave;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
mod logging;
pub mod prelude;

pub use crate::core::*;
pub use feed::{play_innings, play_match, DeliveryFeed, RandomFeed, ScriptFeed};
pub use storage::{MatchStore, StoredMatch};
#[cfg(feature = "cli")]
pub use autosave::Autosaver;
#[cfg(feature = "cli")]
pub use cli::*;
#[cfg(feature = "cli")]
pub use logging::{init_logging, init_logging_with};
