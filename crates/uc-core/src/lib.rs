//! uc-core: connected dungeon layout generation
//!
//! This crate contains all generation logic with no terminal I/O.
//! Every random choice comes from one seeded [`GameRng`], so a seed and a
//! set of [`GenParams`] always produce the same layout.

pub mod config;
pub mod consts;
pub mod dungeon;
pub mod error;
mod rng;

pub use config::GenParams;
pub use dungeon::{Dungeon, generate};
pub use error::{ConfigError, GenError};
pub use rng::GameRng;
