//! Core engine types: geometry, players, configuration, RNG, errors.
//!
//! These are the leaf building blocks shared by tiles, zones, the board and
//! the game state machine.

pub mod geometry;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use geometry::{Direction, Pos, Rotation};
pub use player::PlayerColor;
pub use rng::GameRng;
pub use config::{ConfigError, RulesConfig, RULES_CONFIG_ENV};
pub use error::GameError;
