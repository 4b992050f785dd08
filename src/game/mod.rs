//! The game: decks, score messages and the turn state machine.
//!
//! ## Key Types
//!
//! - `GameState`: immutable game snapshot; its mutators are the only way
//!   players act on a game
//! - `Action`: what the game waits for next
//! - `TileDecks`: start, normal and menhir decks
//! - `MessageBoard`: score messages and per-player totals
//! - `TextMaker`: localisation seam for message text

pub mod action;
pub mod decks;
pub mod messages;
pub mod points;
pub mod state;

pub use action::Action;
pub use decks::TileDecks;
pub use messages::{Message, MessageBoard, PlainTextMaker, TextMaker};
pub use state::GameState;
