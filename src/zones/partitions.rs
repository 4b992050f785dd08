//! The four partitions of a board, driven together by tile placements.

use std::collections::BTreeMap;

use super::area::Area;
use super::partition::{ZonePartition, ZonePartitionBuilder};
use crate::core::{GameError, PlayerColor};
use crate::tiles::{Forest, Meadow, OccupantKind, River, Tile, TileSide, Water, Zone, ZoneLike};

/// Forests, meadows, rivers, and river systems (rivers joined with their lakes).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZonePartitions {
    forests: ZonePartition<Forest>,
    meadows: ZonePartition<Meadow>,
    rivers: ZonePartition<River>,
    river_systems: ZonePartition<Water>,
}

impl ZonePartitions {
    #[must_use]
    pub fn forests(&self) -> &ZonePartition<Forest> {
        &self.forests
    }

    #[must_use]
    pub fn meadows(&self) -> &ZonePartition<Meadow> {
        &self.meadows
    }

    #[must_use]
    pub fn rivers(&self) -> &ZonePartition<River> {
        &self.rivers
    }

    #[must_use]
    pub fn river_systems(&self) -> &ZonePartition<Water> {
        &self.river_systems
    }

    #[must_use]
    pub fn builder(&self) -> ZonePartitionsBuilder {
        ZonePartitionsBuilder {
            forests: self.forests.builder(),
            meadows: self.meadows.builder(),
            rivers: self.rivers.builder(),
            river_systems: self.river_systems.builder(),
        }
    }
}

/// Mutable scratch copy of a [`ZonePartitions`], used for one board update.
#[derive(Clone, Debug)]
pub struct ZonePartitionsBuilder {
    forests: ZonePartitionBuilder<Forest>,
    meadows: ZonePartitionBuilder<Meadow>,
    rivers: ZonePartitionBuilder<River>,
    river_systems: ZonePartitionBuilder<Water>,
}

impl ZonePartitionsBuilder {
    /// Add every zone of a newly placed tile as a singleton area.
    ///
    /// Each zone starts with one open connection per occurrence on a side. A
    /// river flowing into a lake gets one more in its river system, and the
    /// lake one per river; the river and its lake are then joined.
    pub fn add_tile(&mut self, tile: &Tile) -> Result<(), GameError> {
        let mut counts: BTreeMap<Zone, u32> = BTreeMap::new();
        for side in &tile.sides {
            for zone in side.zones() {
                *counts.entry(zone).or_default() += 1;
            }
        }
        let lakes: Vec<_> = counts
            .keys()
            .filter_map(|zone| match zone {
                Zone::River(river) => river.lake,
                _ => None,
            })
            .collect();
        for lake in lakes {
            *counts.entry(Zone::Lake(lake)).or_default() += 1;
        }

        for (zone, &count) in &counts {
            match zone {
                Zone::Forest(forest) => self.forests.add_singleton(*forest, count)?,
                Zone::Meadow(meadow) => self.meadows.add_singleton(meadow.clone(), count)?,
                Zone::River(river) => {
                    self.rivers.add_singleton(*river, count)?;
                    let lake_end = u32::from(river.has_lake());
                    self.river_systems.add_singleton(Water::River(*river), count + lake_end)?;
                }
                Zone::Lake(lake) => self.river_systems.add_singleton(Water::Lake(*lake), count)?,
            }
        }

        for zone in counts.keys() {
            if let Zone::River(river) = zone {
                if let Some(lake) = river.lake {
                    self.river_systems.union(&Water::River(*river), &Water::Lake(lake))?;
                }
            }
        }
        Ok(())
    }

    /// Join the zones of two facing sides.
    ///
    /// Facing river sides are mirrored: the first meadow of one side touches
    /// the second meadow of the other.
    pub fn connect_sides(&mut self, side1: &TileSide, side2: &TileSide) -> Result<(), GameError> {
        match (side1, side2) {
            (TileSide::Forest(f1), TileSide::Forest(f2)) => self.forests.union(f1, f2),
            (TileSide::Meadow(m1), TileSide::Meadow(m2)) => self.meadows.union(m1, m2),
            (
                TileSide::River {
                    meadow1: a1,
                    river: r1,
                    meadow2: b1,
                },
                TileSide::River {
                    meadow1: a2,
                    river: r2,
                    meadow2: b2,
                },
            ) => {
                self.meadows.union(a1, b2)?;
                self.meadows.union(b1, a2)?;
                self.rivers.union(r1, r2)?;
                self.river_systems.union(&Water::River(*r1), &Water::River(*r2))
            }
            _ => Err(GameError::IncompatibleSides),
        }
    }

    /// Put the first occupant of `kind` in the area of `zone`.
    ///
    /// Pawns go on forests, meadows and rivers; huts on rivers and lakes, in
    /// the river system partition.
    pub fn add_initial_occupant(
        &mut self,
        color: PlayerColor,
        kind: OccupantKind,
        zone: &Zone,
    ) -> Result<(), GameError> {
        match (kind, zone) {
            (OccupantKind::Pawn, Zone::Forest(forest)) => self.forests.add_initial_occupant(forest, color),
            (OccupantKind::Pawn, Zone::Meadow(meadow)) => self.meadows.add_initial_occupant(meadow, color),
            (OccupantKind::Pawn, Zone::River(river)) => self.rivers.add_initial_occupant(river, color),
            (OccupantKind::Hut, Zone::River(river)) => {
                self.river_systems.add_initial_occupant(&Water::River(*river), color)
            }
            (OccupantKind::Hut, Zone::Lake(lake)) => {
                self.river_systems.add_initial_occupant(&Water::Lake(*lake), color)
            }
            _ => Err(GameError::InvalidOccupantZone { kind, zone: zone.id() }),
        }
    }

    /// Remove a pawn of `color` from the area of `zone`.
    pub fn remove_pawn(&mut self, color: PlayerColor, zone: &Zone) -> Result<(), GameError> {
        match zone {
            Zone::Forest(forest) => self.forests.remove_occupant(forest, color),
            Zone::Meadow(meadow) => self.meadows.remove_occupant(meadow, color),
            Zone::River(river) => self.rivers.remove_occupant(river, color),
            Zone::Lake(lake) => Err(GameError::InvalidOccupantZone {
                kind: OccupantKind::Pawn,
                zone: lake.id,
            }),
        }
    }

    /// Send every gatherer in `forest` home.
    pub fn clear_gatherers(&mut self, forest: &Area<Forest>) -> Result<(), GameError> {
        self.forests.remove_all_occupants_of(forest)
    }

    /// Send every fisher in `river` home. Huts stay.
    pub fn clear_fishers(&mut self, river: &Area<River>) -> Result<(), GameError> {
        self.rivers.remove_all_occupants_of(river)
    }

    #[must_use]
    pub fn build(self) -> ZonePartitions {
        ZonePartitions {
            forests: self.forests.build(),
            meadows: self.meadows.build(),
            rivers: self.rivers.build(),
            river_systems: self.river_systems.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Pos, Rotation};
    use crate::tiles::{sample, PlacedTile, TileId, ZoneId};

    fn zone(tile: &Tile, id: u32) -> Zone {
        tile.zones()
            .into_iter()
            .find(|zone| zone.id() == ZoneId::new(id))
            .unwrap()
    }

    fn forest_of(tile: &Tile) -> Forest {
        match tile.side(Direction::N) {
            TileSide::Forest(forest) => *forest,
            _ => panic!("tile {} has no forest to the north", tile.id),
        }
    }

    #[test]
    fn test_add_start_tile() {
        let start = sample::tile(sample::START_TILE);
        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&start).unwrap();
        let partitions = builder.build();

        assert_eq!(partitions.forests().len(), 1);
        assert_eq!(partitions.meadows().len(), 2);
        assert_eq!(partitions.rivers().len(), 1);
        assert_eq!(partitions.river_systems().len(), 1);

        let forest = partitions.forests().area_containing(&forest_of(&start)).unwrap();
        assert_eq!(forest.open_connections(), 1);

        let Zone::Meadow(south) = zone(&start, 3) else { panic!() };
        assert_eq!(partitions.meadows().area_containing(&south).unwrap().open_connections(), 3);

        let Zone::River(river) = zone(&start, 2) else { panic!() };
        assert_eq!(partitions.rivers().area_containing(&river).unwrap().open_connections(), 2);
    }

    #[test]
    fn test_river_joins_its_lake() {
        let tile = sample::tile(sample::LAKE_TILE);
        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&tile).unwrap();
        let partitions = builder.build();

        let Zone::River(river) = zone(&tile, 41) else { panic!() };
        let Zone::Lake(lake) = zone(&tile, 48) else { panic!() };

        assert_eq!(partitions.rivers().area_containing(&river).unwrap().open_connections(), 1);

        let system = partitions.river_systems().area_containing(&Water::Lake(lake)).unwrap();
        assert!(system.contains(&Water::River(river)));
        assert_eq!(system.open_connections(), 1);
        assert_eq!(system.lake_count(), 1);
    }

    #[test]
    fn test_connect_forests() {
        let start = sample::tile(sample::START_TILE);
        let forest = PlacedTile::new(
            sample::tile(sample::FOREST_TILE),
            Some(PlayerColor::Red),
            Rotation::HalfTurn,
            Pos::new(0, -1),
        );

        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&start).unwrap();
        builder.add_tile(&forest.tile).unwrap();
        builder
            .connect_sides(start.side(Direction::N), forest.side(Direction::S))
            .unwrap();
        let partitions = builder.build();

        let area = partitions.forests().area_containing(&forest_of(&start)).unwrap();
        assert!(area.contains(&forest_of(&forest.tile)));
        assert!(area.is_closed());
        assert_eq!(area.tile_ids().len(), 2);
    }

    #[test]
    fn test_connect_rivers_mirrors_meadows() {
        let start = sample::tile(sample::START_TILE);
        let river_tile = sample::tile(sample::RIVER_TILE);

        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&start).unwrap();
        builder.add_tile(&river_tile).unwrap();
        // River tile east of the start tile, unrotated.
        builder
            .connect_sides(start.side(Direction::E), river_tile.side(Direction::W))
            .unwrap();
        let partitions = builder.build();

        let Zone::Meadow(start_north) = zone(&start, 1) else { panic!() };
        let Zone::Meadow(river_north) = zone(&river_tile, 30) else { panic!() };
        let north = partitions.meadows().area_containing(&start_north).unwrap();
        assert!(north.contains(&river_north));

        let Zone::River(r0) = zone(&start, 2) else { panic!() };
        let Zone::River(r1) = zone(&river_tile, 31) else { panic!() };
        assert_eq!(partitions.rivers().area_containing(&r0).unwrap().open_connections(), 2);
        assert!(partitions
            .river_systems()
            .area_containing(&Water::River(r0))
            .unwrap()
            .contains(&Water::River(r1)));
    }

    #[test]
    fn test_incompatible_sides() {
        let start = sample::tile(sample::START_TILE);
        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&start).unwrap();
        assert_eq!(
            builder.connect_sides(start.side(Direction::N), start.side(Direction::S)),
            Err(GameError::IncompatibleSides)
        );
    }

    #[test]
    fn test_occupant_routing() {
        let tile = sample::tile(sample::LAKE_TILE);
        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&tile).unwrap();

        let river = zone(&tile, 41);
        let lake = zone(&tile, 48);

        builder.add_initial_occupant(PlayerColor::Red, OccupantKind::Pawn, &river).unwrap();
        builder.add_initial_occupant(PlayerColor::Blue, OccupantKind::Hut, &lake).unwrap();
        assert_eq!(
            builder.add_initial_occupant(PlayerColor::Blue, OccupantKind::Pawn, &lake),
            Err(GameError::InvalidOccupantZone {
                kind: OccupantKind::Pawn,
                zone: TileId::new(4).zone(8),
            })
        );

        builder.remove_pawn(PlayerColor::Red, &river).unwrap();
        let partitions = builder.build();

        let Zone::River(r) = river else { panic!() };
        assert!(!partitions.rivers().area_containing(&r).unwrap().is_occupied());
        assert_eq!(
            partitions.river_systems().area_containing(&Water::River(r)).unwrap().occupants(),
            &[PlayerColor::Blue]
        );
    }

    #[test]
    fn test_clear_fishers_keeps_huts() {
        let tile = sample::tile(sample::RIVER_TILE);
        let river = zone(&tile, 31);
        let Zone::River(r) = river else { panic!() };

        let mut builder = ZonePartitions::default().builder();
        builder.add_tile(&tile).unwrap();
        builder.add_initial_occupant(PlayerColor::Green, OccupantKind::Pawn, &river).unwrap();
        builder.add_initial_occupant(PlayerColor::Green, OccupantKind::Hut, &river).unwrap();
        let partitions = builder.build();

        let area = partitions.rivers().area_containing(&r).unwrap().clone();
        let mut builder = partitions.builder();
        builder.clear_fishers(&area).unwrap();
        let cleared = builder.build();

        assert!(!cleared.rivers().area_containing(&r).unwrap().is_occupied());
        assert!(cleared.river_systems().area_containing(&Water::River(r)).unwrap().is_occupied());
    }
}
