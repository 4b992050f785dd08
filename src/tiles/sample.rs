//! A small built-in tile set for demos and tests.
//!
//! Real games load their catalog from data (see [`TileCatalog::from_json`]);
//! this set covers every zone kind and special power on a handful of tiles:
//!
//! | id | kind   | content                                                     |
//! |----|--------|-------------------------------------------------------------|
//! | 0  | start  | forest N, river running E-W, meadows north and south        |
//! | 1  | normal | plain forest N, meadow with an aurochs elsewhere            |
//! | 2  | normal | forest with mushrooms N, meadow elsewhere                   |
//! | 3  | normal | river E-W (1 fish), meadow with a deer north of it          |
//! | 4  | normal | river from W into a lake (2 fish)                           |
//! | 5  | normal | meadow with a mammoth and the shaman                        |
//! | 6  | normal | meadow with the hunting trap                                |
//! | 7  | normal | forest with a menhir N, meadow elsewhere                    |
//! | 8  | normal | river from W into a lake with the logboat                   |
//! | 9  | menhir | meadow with the wild fire                                   |
//! | 10 | menhir | meadow with a deer and the pit trap                         |
//! | 11 | menhir | river from W into a lake with the raft                      |
//! | 12 | normal | forest N and E, meadow with a deer and a tiger S and W      |
//!
//! [`TileCatalog::from_json`]: super::TileCatalog::from_json

use smallvec::SmallVec;

use super::catalog::TileCatalog;
use super::side::TileSide;
use super::tile::{Tile, TileKind};
use super::zone::{Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, TileId};

pub const START_TILE: u32 = 0;
pub const FOREST_TILE: u32 = 1;
pub const MUSHROOM_TILE: u32 = 2;
pub const RIVER_TILE: u32 = 3;
pub const LAKE_TILE: u32 = 4;
pub const SHAMAN_TILE: u32 = 5;
pub const HUNTING_TRAP_TILE: u32 = 6;
pub const MENHIR_FOREST_TILE: u32 = 7;
pub const LOGBOAT_TILE: u32 = 8;
pub const WILD_FIRE_TILE: u32 = 9;
pub const PIT_TRAP_TILE: u32 = 10;
pub const RAFT_TILE: u32 = 11;
pub const DOUBLE_FOREST_TILE: u32 = 12;

/// Number of sample tiles.
pub const COUNT: u32 = 13;

fn forest(tile: u32, local: u32, kind: ForestKind) -> Forest {
    Forest {
        id: TileId::new(tile).zone(local),
        kind,
    }
}

fn meadow(tile: u32, local: u32, animals: &[AnimalKind], special_power: Option<SpecialPower>) -> Meadow {
    let id = TileId::new(tile).zone(local);
    let animals: SmallVec<[Animal; 2]> = animals
        .iter()
        .enumerate()
        .map(|(i, &kind)| Animal::new(id.raw() * 10 + i as u32, kind))
        .collect();
    Meadow {
        id,
        animals,
        special_power,
    }
}

fn river(tile: u32, local: u32, fish_count: u32, lake: Option<Lake>) -> River {
    River {
        id: TileId::new(tile).zone(local),
        fish_count,
        lake,
    }
}

fn lake(tile: u32, fish_count: u32, special_power: Option<SpecialPower>) -> Lake {
    Lake {
        id: TileId::new(tile).zone(8),
        fish_count,
        special_power,
    }
}

fn river_side(meadow1: &Meadow, river: River, meadow2: &Meadow) -> TileSide {
    TileSide::River {
        meadow1: meadow1.clone(),
        river,
        meadow2: meadow2.clone(),
    }
}

fn meadow_side(meadow: &Meadow) -> TileSide {
    TileSide::Meadow(meadow.clone())
}

/// Meadow on all four sides.
fn meadow_tile(id: u32, kind: TileKind, meadow: Meadow) -> Tile {
    let side = meadow_side(&meadow);
    Tile::new(TileId::new(id), kind, side.clone(), side.clone(), side.clone(), side)
}

/// Forest on the north side, one meadow on the three others.
fn forest_tile(id: u32, forest: Forest, meadow: Meadow) -> Tile {
    let side = meadow_side(&meadow);
    Tile::new(TileId::new(id), TileKind::Normal, TileSide::Forest(forest), side.clone(), side.clone(), side)
}

/// A river entering from the west and ending in a lake, surrounded by one meadow.
fn lake_tile(id: u32, kind: TileKind, river: River, meadow: Meadow) -> Tile {
    let side = meadow_side(&meadow);
    Tile::new(
        TileId::new(id),
        kind,
        side.clone(),
        side.clone(),
        side,
        river_side(&meadow, river, &meadow),
    )
}

/// All sample tiles, ordered by id.
#[must_use]
pub fn tiles() -> Vec<Tile> {
    let start_meadow_north = meadow(0, 1, &[], None);
    let start_river = river(0, 2, 0, None);
    let start_meadow_south = meadow(0, 3, &[], None);
    let start = Tile::new(
        TileId::new(START_TILE),
        TileKind::Start,
        TileSide::Forest(forest(0, 0, ForestKind::Plain)),
        river_side(&start_meadow_north, start_river, &start_meadow_south),
        meadow_side(&start_meadow_south),
        river_side(&start_meadow_south, start_river, &start_meadow_north),
    );

    let river_meadow_north = meadow(3, 0, &[AnimalKind::Deer], None);
    let river_3 = river(3, 1, 1, None);
    let river_meadow_south = meadow(3, 2, &[], None);
    let river_tile = Tile::new(
        TileId::new(RIVER_TILE),
        TileKind::Normal,
        meadow_side(&river_meadow_north),
        river_side(&river_meadow_north, river_3, &river_meadow_south),
        meadow_side(&river_meadow_south),
        river_side(&river_meadow_south, river_3, &river_meadow_north),
    );

    let double_forest = TileSide::Forest(forest(12, 0, ForestKind::Plain));
    let double_meadow = meadow_side(&meadow(12, 1, &[AnimalKind::Deer, AnimalKind::Tiger], None));
    let double_forest_tile = Tile::new(
        TileId::new(DOUBLE_FOREST_TILE),
        TileKind::Normal,
        double_forest.clone(),
        double_forest,
        double_meadow.clone(),
        double_meadow,
    );

    vec![
        start,
        forest_tile(
            FOREST_TILE,
            forest(1, 0, ForestKind::Plain),
            meadow(1, 1, &[AnimalKind::Aurochs], None),
        ),
        forest_tile(
            MUSHROOM_TILE,
            forest(2, 0, ForestKind::WithMushrooms),
            meadow(2, 1, &[], None),
        ),
        river_tile,
        lake_tile(
            LAKE_TILE,
            TileKind::Normal,
            river(4, 1, 0, Some(lake(4, 2, None))),
            meadow(4, 0, &[], None),
        ),
        meadow_tile(
            SHAMAN_TILE,
            TileKind::Normal,
            meadow(5, 0, &[AnimalKind::Mammoth], Some(SpecialPower::Shaman)),
        ),
        meadow_tile(
            HUNTING_TRAP_TILE,
            TileKind::Normal,
            meadow(6, 0, &[], Some(SpecialPower::HuntingTrap)),
        ),
        forest_tile(
            MENHIR_FOREST_TILE,
            forest(7, 0, ForestKind::WithMenhir),
            meadow(7, 1, &[], None),
        ),
        lake_tile(
            LOGBOAT_TILE,
            TileKind::Normal,
            river(8, 1, 1, Some(lake(8, 1, Some(SpecialPower::Logboat)))),
            meadow(8, 0, &[], None),
        ),
        meadow_tile(
            WILD_FIRE_TILE,
            TileKind::Menhir,
            meadow(9, 0, &[], Some(SpecialPower::WildFire)),
        ),
        meadow_tile(
            PIT_TRAP_TILE,
            TileKind::Menhir,
            meadow(10, 0, &[AnimalKind::Deer], Some(SpecialPower::PitTrap)),
        ),
        lake_tile(
            RAFT_TILE,
            TileKind::Menhir,
            river(11, 1, 0, Some(lake(11, 0, Some(SpecialPower::Raft)))),
            meadow(11, 0, &[], None),
        ),
        double_forest_tile,
    ]
}

/// The sample tile with the given id.
///
/// Panics if `id` is not below [`COUNT`].
#[must_use]
pub fn tile(id: u32) -> Tile {
    tiles().swap_remove(id as usize)
}

/// The sample tiles as a catalog.
#[must_use]
pub fn catalog() -> TileCatalog {
    TileCatalog::from_ordered(tiles())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_positions() {
        let tiles = tiles();
        assert_eq!(tiles.len(), COUNT as usize);
        for (index, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id, TileId::new(index as u32));
        }
    }

    #[test]
    fn test_deck_kinds() {
        let tiles = tiles();
        let count = |kind| tiles.iter().filter(|t| t.kind == kind).count();
        assert_eq!(count(TileKind::Start), 1);
        assert_eq!(count(TileKind::Normal), 9);
        assert_eq!(count(TileKind::Menhir), 3);
    }
}
