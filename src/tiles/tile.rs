//! Tiles as printed in the catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::side::TileSide;
use super::zone::{TileId, Zone};
use crate::core::Direction;

/// Which deck a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Start,
    Normal,
    Menhir,
}

impl TileKind {
    pub const ALL: [TileKind; 3] = [TileKind::Start, TileKind::Normal, TileKind::Menhir];
}

/// An unplaced, unrotated tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Sides in `N, E, S, W` order.
    pub sides: [TileSide; 4],
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId, kind: TileKind, n: TileSide, e: TileSide, s: TileSide, w: TileSide) -> Self {
        Self {
            id,
            kind,
            sides: [n, e, s, w],
        }
    }

    /// The side facing `direction` when the tile is not rotated.
    #[must_use]
    pub fn side(&self, direction: Direction) -> &TileSide {
        &self.sides[direction.index()]
    }

    /// Zones touching at least one side.
    #[must_use]
    pub fn side_zones(&self) -> BTreeSet<Zone> {
        self.sides.iter().flat_map(TileSide::zones).collect()
    }

    /// Every zone of the tile: side zones plus the lakes rivers flow into.
    #[must_use]
    pub fn zones(&self) -> BTreeSet<Zone> {
        let mut zones = self.side_zones();
        let lakes: Vec<Zone> = zones
            .iter()
            .filter_map(|zone| match zone {
                Zone::River(river) => river.lake.map(Zone::Lake),
                _ => None,
            })
            .collect();
        zones.extend(lakes);
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::sample;
    use crate::tiles::ZoneLike;

    #[test]
    fn test_side_zones_and_lakes() {
        let tile = sample::tile(sample::LAKE_TILE);
        let side_ids: Vec<_> = tile.side_zones().iter().map(ZoneLike::id).collect();
        let all_ids: Vec<_> = tile.zones().iter().map(ZoneLike::id).collect();

        assert_eq!(side_ids, vec![TileId::new(4).zone(0), TileId::new(4).zone(1)]);
        assert_eq!(
            all_ids,
            vec![TileId::new(4).zone(0), TileId::new(4).zone(1), TileId::new(4).zone(8)]
        );
    }

    #[test]
    fn test_side_lookup() {
        let tile = sample::tile(sample::START_TILE);
        assert!(matches!(tile.side(Direction::N), TileSide::Forest(_)));
        assert!(matches!(tile.side(Direction::S), TileSide::Meadow(_)));
        assert_eq!(tile.kind, TileKind::Start);
    }
}
