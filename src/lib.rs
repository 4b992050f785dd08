//! # neolithic-rules
//!
//! Rules engine for a tile-laying territory game: players place square
//! tiles on an unbounded grid, growing forests, meadows, rivers and river
//! systems that close and score as tiles connect.
//!
//! ## Design Principles
//!
//! 1. **Values, not objects**: every game state, board, partition and area
//!    is an immutable value. Mutators return a new value.
//!
//! 2. **Persistent Data Structures**: per-turn copies are cheap thanks to
//!    `im-rs`; the only mutable structures are short-lived builders.
//!
//! 3. **Replayable**: a game is fully determined by its initial decks and
//!    the sequence of its action codes.
//!
//! ## Modules
//!
//! - `core`: geometry, players, errors, RNG, configuration
//! - `tiles`: zones, tile sides, tiles, placed tiles, tile catalog
//! - `zones`: areas and the union-find zone partitions
//! - `board`: placement legality, closure and adjacency queries
//! - `game`: decks, score messages and the turn state machine
//! - `encoding`: base32 action codes

pub mod core;
pub mod tiles;
pub mod zones;
pub mod board;
pub mod game;
pub mod encoding;

// Re-export commonly used types
pub use crate::core::{
    Direction, Pos, Rotation,
    PlayerColor,
    GameRng,
    RulesConfig, ConfigError,
    GameError,
};

pub use crate::tiles::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, Water, Zone, ZoneId, ZoneLike,
    Tile, TileId, TileKind, TileSide,
    Occupant, OccupantKind, PlacedTile,
    TileCatalog, CatalogError,
};

pub use crate::zones::{Area, ZonePartition, ZonePartitions};

pub use crate::board::Board;

pub use crate::game::{Action, GameState, Message, MessageBoard, PlainTextMaker, TextMaker, TileDecks};

pub use crate::encoding::{decode_and_apply, ActionCodeError, CodecError, StateAction};
