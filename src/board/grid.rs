//! The board: placed tiles, their partitions, and cancelled animals.

use std::collections::BTreeSet;

use im::{HashMap as ImHashMap, OrdSet, Vector};

use crate::core::{GameError, PlayerColor, Pos, Rotation};
use crate::tiles::{
    Animal, Forest, Meadow, Occupant, OccupantKind, PlacedTile, River, Tile, TileId, TileKind, Water,
    Zone, ZoneId, ZoneLike,
};
use crate::zones::{Area, ZonePartitions};

/// The placement surface of a game.
///
/// Uses `im` persistent collections so every turn can keep its own board
/// at the cost of a few pointer copies.
///
/// ## Example
///
/// ```
/// use neolithic_rules::board::Board;
/// use neolithic_rules::core::{PlayerColor, Pos, Rotation};
/// use neolithic_rules::tiles::{sample, PlacedTile};
///
/// let start = PlacedTile::new(sample::tile(sample::START_TILE), None, Rotation::None, Pos::ORIGIN);
/// let board = Board::default().with_new_tile(start).unwrap();
///
/// let forest = PlacedTile::new(
///     sample::tile(sample::FOREST_TILE),
///     Some(PlayerColor::Red),
///     Rotation::HalfTurn,
///     Pos::new(0, -1),
/// );
/// assert!(board.can_add_tile(&forest));
///
/// let board = board.with_new_tile(forest).unwrap();
/// assert_eq!(board.forests_closed_by_last_tile().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    grid: ImHashMap<Pos, PlacedTile>,
    /// Positions in placement order; the last one holds the most recent tile.
    order: Vector<Pos>,
    positions: ImHashMap<TileId, Pos>,
    /// Empty cells next to at least one tile.
    insertion: OrdSet<Pos>,
    partitions: ZonePartitions,
    cancelled_animals: OrdSet<Animal>,
}

impl Board {
    // === Tiles ===

    #[must_use]
    pub fn tile_at(&self, pos: Pos) -> Option<&PlacedTile> {
        self.grid.get(&pos)
    }

    /// The placed tile with the given id.
    pub fn tile_with_id(&self, id: TileId) -> Result<&PlacedTile, GameError> {
        self.positions
            .get(&id)
            .and_then(|pos| self.grid.get(pos))
            .ok_or(GameError::UnknownTile(id))
    }

    #[must_use]
    pub fn last_placed_tile(&self) -> Option<&PlacedTile> {
        self.order.last().and_then(|pos| self.grid.get(pos))
    }

    /// Tiles in placement order.
    pub fn placed_tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.order.iter().filter_map(|pos| self.grid.get(pos))
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn cancelled_animals(&self) -> &OrdSet<Animal> {
        &self.cancelled_animals
    }

    /// Every occupant on the board.
    #[must_use]
    pub fn occupants(&self) -> BTreeSet<Occupant> {
        self.grid.values().filter_map(|tile| tile.occupant).collect()
    }

    /// Number of occupants of `kind` owned by `color`.
    #[must_use]
    pub fn occupant_count(&self, color: PlayerColor, kind: OccupantKind) -> u32 {
        fn count<'a, Z: ZoneLike + 'a>(areas: impl Iterator<Item = &'a Area<Z>>, color: PlayerColor) -> usize {
            areas
                .flat_map(|area| area.occupants())
                .filter(|&&c| c == color)
                .count()
        }

        let partitions = &self.partitions;
        let total = match kind {
            OccupantKind::Pawn => {
                count(partitions.forests().areas(), color)
                    + count(partitions.meadows().areas(), color)
                    + count(partitions.rivers().areas(), color)
            }
            OccupantKind::Hut => count(partitions.river_systems().areas(), color),
        };
        total as u32
    }

    // === Areas ===

    #[must_use]
    pub fn partitions(&self) -> &ZonePartitions {
        &self.partitions
    }

    pub fn forest_area(&self, forest: &Forest) -> Result<&Area<Forest>, GameError> {
        self.partitions.forests().area_containing(forest)
    }

    pub fn meadow_area(&self, meadow: &Meadow) -> Result<&Area<Meadow>, GameError> {
        self.partitions.meadows().area_containing(meadow)
    }

    pub fn river_area(&self, river: &River) -> Result<&Area<River>, GameError> {
        self.partitions.rivers().area_containing(river)
    }

    pub fn river_system_area(&self, water: &Water) -> Result<&Area<Water>, GameError> {
        self.partitions.river_systems().area_containing(water)
    }

    pub fn meadow_areas(&self) -> impl Iterator<Item = &Area<Meadow>> {
        self.partitions.meadows().areas()
    }

    pub fn river_system_areas(&self) -> impl Iterator<Item = &Area<Water>> {
        self.partitions.river_systems().areas()
    }

    /// The part of `meadow`'s area lying on the 3x3 block of tiles centred on
    /// `pos`. It keeps the occupants of the whole area and has no open
    /// connections.
    pub fn adjacent_meadow(&self, pos: Pos, meadow: &Meadow) -> Result<Area<Meadow>, GameError> {
        let area = self.meadow_area(meadow)?;
        let zones = area.zones().iter().filter(|zone| {
            self.positions
                .get(&zone.tile_id())
                .is_some_and(|&tile_pos| tile_pos.is_within_one_of(pos))
        });
        Ok(Area::new(zones.cloned(), area.occupants().iter().copied(), 0))
    }

    /// Forest areas containing a zone of the last tile and closed by it.
    #[must_use]
    pub fn forests_closed_by_last_tile(&self) -> Vec<Area<Forest>> {
        let Some(last) = self.last_placed_tile() else {
            return Vec::new();
        };
        closed_areas(last.forest_zones().iter().filter_map(|f| self.forest_area(f).ok()))
    }

    /// River areas containing a zone of the last tile and closed by it.
    #[must_use]
    pub fn rivers_closed_by_last_tile(&self) -> Vec<Area<River>> {
        let Some(last) = self.last_placed_tile() else {
            return Vec::new();
        };
        closed_areas(last.river_zones().iter().filter_map(|r| self.river_area(r).ok()))
    }

    // === Placement ===

    /// Empty cells next to at least one tile, ordered by `(x, y)`.
    #[must_use]
    pub fn insertion_positions(&self) -> &OrdSet<Pos> {
        &self.insertion
    }

    /// True if `tile` may be added: the starting tile at the origin of an
    /// empty board, or any other tile on an insertion position whose sides
    /// match those of every neighbour.
    #[must_use]
    pub fn can_add_tile(&self, tile: &PlacedTile) -> bool {
        if self.positions.contains_key(&tile.id()) {
            return false;
        }
        if self.is_empty() {
            return tile.kind() == TileKind::Start && tile.pos == Pos::ORIGIN;
        }
        tile.kind() != TileKind::Start && self.fits(&tile.tile, tile.rotation, tile.pos)
    }

    /// True if some insertion position and rotation accept `tile`.
    #[must_use]
    pub fn could_place_tile(&self, tile: &Tile) -> bool {
        self.insertion.iter().any(|&pos| {
            Rotation::ALL
                .iter()
                .any(|&rotation| self.fits(tile, rotation, pos))
        })
    }

    fn fits(&self, tile: &Tile, rotation: Rotation, pos: Pos) -> bool {
        self.insertion.contains(&pos)
            && pos.neighbors().all(|(direction, neighbor_pos)| {
                self.grid.get(&neighbor_pos).map_or(true, |neighbor| {
                    tile.side(direction.rotated(rotation.negated()))
                        .is_same_kind_as(neighbor.side(direction.opposite()))
                })
            })
    }

    /// Same board with `tile` added and its zones connected to its neighbours.
    pub fn with_new_tile(&self, tile: PlacedTile) -> Result<Board, GameError> {
        if !self.can_add_tile(&tile) {
            return Err(GameError::IllegalPlacement {
                tile: tile.id(),
                pos: tile.pos,
            });
        }

        let mut builder = self.partitions.builder();
        builder.add_tile(&tile.tile)?;
        for (direction, neighbor_pos) in tile.pos.neighbors() {
            if let Some(neighbor) = self.grid.get(&neighbor_pos) {
                builder.connect_sides(tile.side(direction), neighbor.side(direction.opposite()))?;
            }
        }

        let mut board = self.clone();
        board.insertion.remove(&tile.pos);
        for (_, neighbor_pos) in tile.pos.neighbors() {
            if !board.grid.contains_key(&neighbor_pos) {
                board.insertion.insert(neighbor_pos);
            }
        }
        tracing::debug!(
            target: "neolithic::board",
            tile = %tile.id(),
            pos = %tile.pos,
            rotation = ?tile.rotation,
            "board.tile_added"
        );
        board.positions.insert(tile.id(), tile.pos);
        board.order.push_back(tile.pos);
        board.grid.insert(tile.pos, tile);
        board.partitions = builder.build();
        Ok(board)
    }

    // === Occupants ===

    fn tile_of_zone(&self, zone_id: ZoneId) -> Result<(&PlacedTile, Zone), GameError> {
        let tile = self.tile_with_id(zone_id.tile_id())?;
        let zone = tile.zone_with_id(zone_id)?;
        Ok((tile, zone))
    }

    fn with_replaced_tile(&self, tile: PlacedTile, partitions: ZonePartitions) -> Board {
        let mut board = self.clone();
        board.grid.insert(tile.pos, tile);
        board.partitions = partitions;
        board
    }

    /// Same board with `occupant` on its tile, owned by the tile's placer.
    pub fn with_occupant(&self, occupant: Occupant) -> Result<Board, GameError> {
        let (tile, zone) = self.tile_of_zone(occupant.zone_id)?;
        let placer = tile.placer.ok_or(GameError::NeutralTile(tile.id()))?;
        let occupied = tile.with_occupant(occupant)?;

        let mut builder = self.partitions.builder();
        builder.add_initial_occupant(placer, occupant.kind, &zone)?;
        tracing::debug!(
            target: "neolithic::board",
            player = %placer,
            occupant = %occupant,
            "board.occupant_added"
        );
        Ok(self.with_replaced_tile(occupied, builder.build()))
    }

    /// Same board without the pawn `occupant`.
    pub fn without_occupant(&self, occupant: Occupant) -> Result<Board, GameError> {
        if occupant.kind != OccupantKind::Pawn {
            return Err(GameError::InvalidOccupantZone {
                kind: occupant.kind,
                zone: occupant.zone_id,
            });
        }
        let (tile, zone) = self.tile_of_zone(occupant.zone_id)?;
        let placer = tile.placer.ok_or(GameError::NeutralTile(tile.id()))?;
        if tile.occupant != Some(occupant) {
            return Err(GameError::OccupantNotPresent(placer));
        }

        let mut builder = self.partitions.builder();
        builder.remove_pawn(placer, &zone)?;
        tracing::debug!(
            target: "neolithic::board",
            player = %placer,
            occupant = %occupant,
            "board.occupant_removed"
        );
        Ok(self.with_replaced_tile(tile.with_no_occupant(), builder.build()))
    }

    /// Same board with every pawn in `forests` and `rivers` sent home.
    pub fn without_gatherers_or_fishers_in(
        &self,
        forests: &[Area<Forest>],
        rivers: &[Area<River>],
    ) -> Result<Board, GameError> {
        let mut builder = self.partitions.builder();
        let mut cleared: BTreeSet<ZoneId> = BTreeSet::new();
        for forest in forests {
            builder.clear_gatherers(forest)?;
            cleared.extend(forest.zones().iter().map(ZoneLike::id));
        }
        for river in rivers {
            builder.clear_fishers(river)?;
            cleared.extend(river.zones().iter().map(ZoneLike::id));
        }

        let mut board = self.clone();
        for tile in self.grid.values() {
            if tile
                .id_of_zone_occupied_by(OccupantKind::Pawn)
                .is_some_and(|zone| cleared.contains(&zone))
            {
                board.grid.insert(tile.pos, tile.with_no_occupant());
            }
        }
        board.partitions = builder.build();
        Ok(board)
    }

    /// Same board with `animals` added to the cancelled ones.
    #[must_use]
    pub fn with_more_cancelled_animals(&self, animals: impl IntoIterator<Item = Animal>) -> Board {
        let mut board = self.clone();
        board.cancelled_animals.extend(animals);
        board
    }
}

/// The closed areas among `areas`, without duplicates.
fn closed_areas<'a, Z: ZoneLike + 'a>(areas: impl Iterator<Item = &'a Area<Z>>) -> Vec<Area<Z>> {
    let mut closed: Vec<Area<Z>> = Vec::new();
    for area in areas {
        if area.is_closed() && !closed.contains(area) {
            closed.push(area.clone());
        }
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::sample;

    fn place(board: &Board, id: u32, placer: Option<PlayerColor>, rotation: Rotation, pos: Pos) -> Board {
        board
            .with_new_tile(PlacedTile::new(sample::tile(id), placer, rotation, pos))
            .unwrap()
    }

    fn started() -> Board {
        place(&Board::default(), sample::START_TILE, None, Rotation::None, Pos::ORIGIN)
    }

    fn forest(zone: u32) -> Forest {
        Forest {
            id: ZoneId::new(zone),
            kind: crate::tiles::ForestKind::Plain,
        }
    }

    #[test]
    fn test_start_tile_rules() {
        let empty = Board::default();
        let start = sample::tile(sample::START_TILE);
        let forest = sample::tile(sample::FOREST_TILE);

        assert!(empty.can_add_tile(&PlacedTile::new(start.clone(), None, Rotation::None, Pos::ORIGIN)));
        assert!(!empty.can_add_tile(&PlacedTile::new(start, None, Rotation::None, Pos::new(1, 0))));
        assert!(!empty.can_add_tile(&PlacedTile::new(forest, None, Rotation::None, Pos::ORIGIN)));
    }

    #[test]
    fn test_insertion_positions_sorted() {
        let board = started();
        let positions: Vec<_> = board.insertion_positions().iter().copied().collect();
        assert_eq!(
            positions,
            vec![Pos::new(-1, 0), Pos::new(0, -1), Pos::new(0, 1), Pos::new(1, 0)]
        );

        let board = place(&board, sample::RIVER_TILE, Some(PlayerColor::Red), Rotation::None, Pos::new(1, 0));
        assert!(!board.insertion_positions().contains(&Pos::new(1, 0)));
        assert!(board.insertion_positions().contains(&Pos::new(2, 0)));
        assert!(board.insertion_positions().contains(&Pos::new(1, -1)));
        assert_eq!(board.insertion_positions().len(), 6);
    }

    #[test]
    fn test_side_matching() {
        let board = started();
        let forest_tile = sample::tile(sample::FOREST_TILE);

        let wrong = PlacedTile::new(forest_tile.clone(), Some(PlayerColor::Red), Rotation::None, Pos::new(0, -1));
        assert!(!board.can_add_tile(&wrong));
        assert_eq!(
            board.with_new_tile(wrong),
            Err(GameError::IllegalPlacement {
                tile: TileId::new(1),
                pos: Pos::new(0, -1),
            })
        );

        let right = PlacedTile::new(forest_tile.clone(), Some(PlayerColor::Red), Rotation::HalfTurn, Pos::new(0, -1));
        assert!(board.can_add_tile(&right));

        let far = PlacedTile::new(forest_tile.clone(), Some(PlayerColor::Red), Rotation::None, Pos::new(3, 3));
        assert!(!board.can_add_tile(&far));
        assert!(board.could_place_tile(&forest_tile));
    }

    #[test]
    fn test_same_tile_twice_rejected() {
        let board = place(&started(), sample::SHAMAN_TILE, Some(PlayerColor::Red), Rotation::None, Pos::new(0, 1));
        let again = PlacedTile::new(sample::tile(sample::SHAMAN_TILE), Some(PlayerColor::Red), Rotation::None, Pos::new(0, 2));
        assert!(!board.can_add_tile(&again));
    }

    #[test]
    fn test_closed_forest() {
        let board = place(&started(), sample::FOREST_TILE, Some(PlayerColor::Red), Rotation::HalfTurn, Pos::new(0, -1));

        assert_eq!(board.last_placed_tile().map(PlacedTile::id), Some(TileId::new(1)));
        let closed = board.forests_closed_by_last_tile();
        assert_eq!(closed.len(), 1);
        assert!(closed[0].contains(&forest(0)));
        assert!(closed[0].contains(&forest(10)));
        assert!(board.rivers_closed_by_last_tile().is_empty());
    }

    #[test]
    fn test_occupants() {
        let board = place(&started(), sample::FOREST_TILE, Some(PlayerColor::Red), Rotation::HalfTurn, Pos::new(0, -1));
        let pawn = Occupant::pawn(ZoneId::new(10));

        let occupied = board.with_occupant(pawn).unwrap();
        assert_eq!(occupied.occupants(), [pawn].into_iter().collect());
        assert_eq!(occupied.occupant_count(PlayerColor::Red, OccupantKind::Pawn), 1);
        assert_eq!(occupied.occupant_count(PlayerColor::Blue, OccupantKind::Pawn), 0);
        assert!(occupied.forest_area(&forest(0)).unwrap().is_occupied());

        let emptied = occupied.without_occupant(pawn).unwrap();
        assert!(emptied.occupants().is_empty());
        assert_eq!(
            emptied.without_occupant(pawn),
            Err(GameError::OccupantNotPresent(PlayerColor::Red))
        );
    }

    #[test]
    fn test_start_tile_cannot_be_occupied() {
        let board = started();
        assert_eq!(
            board.with_occupant(Occupant::pawn(ZoneId::new(0))),
            Err(GameError::NeutralTile(TileId::new(0)))
        );
    }

    #[test]
    fn test_huts_cannot_be_retaken() {
        let board = place(&started(), sample::RIVER_TILE, Some(PlayerColor::Blue), Rotation::None, Pos::new(1, 0));
        let hut = Occupant::hut(ZoneId::new(31));
        let board = board.with_occupant(hut).unwrap();
        assert_eq!(board.occupant_count(PlayerColor::Blue, OccupantKind::Hut), 1);
        assert!(board.without_occupant(hut).is_err());
    }

    #[test]
    fn test_gatherers_go_home() {
        let board = place(&started(), sample::FOREST_TILE, Some(PlayerColor::Red), Rotation::HalfTurn, Pos::new(0, -1))
            .with_occupant(Occupant::pawn(ZoneId::new(10)))
            .unwrap();
        let closed = board.forests_closed_by_last_tile();

        let cleared = board.without_gatherers_or_fishers_in(&closed, &[]).unwrap();
        assert!(cleared.occupants().is_empty());
        assert!(!cleared.forest_area(&forest(10)).unwrap().is_occupied());
    }

    #[test]
    fn test_adjacent_meadow() {
        let board = place(&started(), sample::SHAMAN_TILE, Some(PlayerColor::Red), Rotation::None, Pos::new(0, 1));
        let board = place(&board, sample::HUNTING_TRAP_TILE, Some(PlayerColor::Blue), Rotation::None, Pos::new(0, 2));

        let south_meadow = sample::tile(sample::START_TILE)
            .zones()
            .into_iter()
            .find_map(|zone| match zone {
                Zone::Meadow(meadow) if meadow.id == ZoneId::new(3) => Some(meadow),
                _ => None,
            })
            .unwrap();

        assert_eq!(board.meadow_area(&south_meadow).unwrap().tile_ids().len(), 3);
        let adjacent = board.adjacent_meadow(Pos::ORIGIN, &south_meadow).unwrap();
        let tiles: Vec<_> = adjacent.tile_ids().into_iter().collect();
        assert_eq!(tiles, vec![TileId::new(0), TileId::new(5)]);
        assert_eq!(adjacent.open_connections(), 0);
    }

    #[test]
    fn test_cancelled_animals() {
        let deer = Animal::new(300, crate::tiles::AnimalKind::Deer);
        let board = started().with_more_cancelled_animals([deer]);
        assert!(board.cancelled_animals().contains(&deer));
    }
}
