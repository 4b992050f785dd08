//! Compact action codes for logging and replaying games.
//!
//! A game is fully described by its initial decks and the sequence of codes
//! of its actions. Codes use the 32-symbol alphabet of [`base32`].

pub mod base32;
pub mod action_encoder;

pub use action_encoder::{decode_and_apply, ActionCodeError, StateAction};
pub use base32::CodecError;
