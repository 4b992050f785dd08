//! Tiles and the zones printed on them.
//!
//! ## Key Types
//!
//! - `Zone` / `Water`: closed sums over forest, meadow, river and lake zones
//! - `TileSide`: what a side shows (forest, meadow, or river between meadows)
//! - `Tile`: four sides plus a kind (start, normal, menhir)
//! - `PlacedTile`: a tile on the board with placer, rotation and occupant
//! - `TileCatalog`: read-only list of tiles indexed by id

pub mod zone;
pub mod side;
pub mod tile;
pub mod placed;
pub mod catalog;
pub mod sample;

pub use zone::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, TileId, Water, Zone,
    ZoneId, ZoneLike,
};
pub use side::TileSide;
pub use tile::{Tile, TileKind};
pub use placed::{Occupant, OccupantKind, PlacedTile};
pub use catalog::{CatalogError, TileCatalog};
