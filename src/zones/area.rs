//! Areas: connected regions of zones of the same kind.
//!
//! An `Area` is a value. Connecting two areas, or adding and removing
//! occupants, yields a new area; nothing is mutated in place.
//!
//! Occupants form a multiset of player colours. They are stored sorted in
//! canonical colour order, so two areas with the same occupants compare equal
//! whatever the order in which the occupants arrived.

use std::collections::{BTreeMap, BTreeSet};

use im::OrdSet;
use smallvec::SmallVec;

use crate::core::{GameError, PlayerColor};
use crate::tiles::{
    Animal, AnimalKind, Forest, ForestKind, Meadow, River, SpecialPower, TileId, Water, ZoneLike,
};

/// A maximal connected region of zones of type `Z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area<Z: ZoneLike> {
    zones: OrdSet<Z>,
    occupants: SmallVec<[PlayerColor; 4]>,
    open_connections: u32,
}

impl<Z: ZoneLike> Area<Z> {
    /// Create an area. Occupants may be given in any order.
    #[must_use]
    pub fn new(
        zones: impl IntoIterator<Item = Z>,
        occupants: impl IntoIterator<Item = PlayerColor>,
        open_connections: u32,
    ) -> Self {
        let mut occupants: SmallVec<[PlayerColor; 4]> = occupants.into_iter().collect();
        occupants.sort_unstable();
        Self {
            zones: zones.into_iter().collect(),
            occupants,
            open_connections,
        }
    }

    /// An unoccupied area made of a single zone.
    #[must_use]
    pub fn singleton(zone: Z, open_connections: u32) -> Self {
        Self {
            zones: OrdSet::unit(zone),
            occupants: SmallVec::new(),
            open_connections,
        }
    }

    #[must_use]
    pub fn zones(&self) -> &OrdSet<Z> {
        &self.zones
    }

    /// Occupants in canonical colour order, one entry per occupant.
    #[must_use]
    pub fn occupants(&self) -> &[PlayerColor] {
        &self.occupants
    }

    #[must_use]
    pub fn open_connections(&self) -> u32 {
        self.open_connections
    }

    #[must_use]
    pub fn contains(&self, zone: &Z) -> bool {
        self.zones.contains(zone)
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// An area is closed once none of its edges is left unmatched.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.open_connections == 0
    }

    /// Colours tied for the largest number of occupants. Empty if unoccupied.
    #[must_use]
    pub fn majority_occupants(&self) -> BTreeSet<PlayerColor> {
        let mut counts: BTreeMap<PlayerColor, usize> = BTreeMap::new();
        for &color in &self.occupants {
            *counts.entry(color).or_default() += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        counts
            .into_iter()
            .filter(|&(_, count)| count == max)
            .map(|(color, _)| color)
            .collect()
    }

    /// Ids of the tiles the area spreads over.
    #[must_use]
    pub fn tile_ids(&self) -> BTreeSet<TileId> {
        self.zones.iter().map(ZoneLike::tile_id).collect()
    }

    /// The member zone carrying `power`, if any.
    #[must_use]
    pub fn zone_with_special_power(&self, power: SpecialPower) -> Option<&Z> {
        self.zones.iter().find(|zone| zone.special_power() == Some(power))
    }

    /// Connect this area to `other` through one pair of facing edges.
    ///
    /// Connecting an area to itself closes a loop: the zones and occupants
    /// stay the same and two open connections disappear.
    ///
    /// Panics if fewer than two open connections are available, which would
    /// mean the partition bookkeeping is broken.
    #[must_use]
    pub fn connect_to(&self, other: &Area<Z>) -> Area<Z> {
        let total = if self.zones == other.zones {
            self.open_connections
        } else {
            self.open_connections + other.open_connections
        };
        assert!(
            total >= 2,
            "connecting areas needs two open connections, only {total} available"
        );

        if self.zones == other.zones {
            return Area {
                open_connections: total - 2,
                ..self.clone()
            };
        }

        Area::new(
            self.zones.clone().union(other.zones.clone()),
            self.occupants.iter().chain(other.occupants.iter()).copied(),
            total - 2,
        )
    }

    /// Same area with one occupant of `color`. Fails if already occupied.
    pub fn with_initial_occupant(&self, color: PlayerColor) -> Result<Area<Z>, GameError> {
        if self.is_occupied() {
            return Err(GameError::AreaAlreadyOccupied);
        }
        Ok(Area {
            occupants: SmallVec::from_slice(&[color]),
            ..self.clone()
        })
    }

    /// Same area with one occupant of `color` fewer. Fails if there is none.
    pub fn without_occupant(&self, color: PlayerColor) -> Result<Area<Z>, GameError> {
        let index = self
            .occupants
            .iter()
            .position(|&c| c == color)
            .ok_or(GameError::OccupantNotPresent(color))?;
        let mut occupants = self.occupants.clone();
        occupants.remove(index);
        Ok(Area {
            occupants,
            ..self.clone()
        })
    }

    /// Same area without any occupant.
    #[must_use]
    pub fn without_occupants(&self) -> Area<Z> {
        Area {
            occupants: SmallVec::new(),
            ..self.clone()
        }
    }
}

impl Area<Forest> {
    /// True if one of the forests holds a menhir.
    #[must_use]
    pub fn has_menhir(&self) -> bool {
        self.zones.iter().any(|forest| forest.kind == ForestKind::WithMenhir)
    }

    /// Each forest zone with mushrooms is one group.
    #[must_use]
    pub fn mushroom_group_count(&self) -> u32 {
        self.zones
            .iter()
            .filter(|forest| forest.kind == ForestKind::WithMushrooms)
            .count() as u32
    }
}

impl Area<Meadow> {
    /// Animals living in the meadow, minus the cancelled ones.
    #[must_use]
    pub fn animals(&self, cancelled: &OrdSet<Animal>) -> BTreeSet<Animal> {
        self.zones
            .iter()
            .flat_map(|meadow| meadow.animals.iter().copied())
            .filter(|animal| !cancelled.contains(animal))
            .collect()
    }
}

impl Area<River> {
    /// Fish in the rivers and in the lakes at their ends, each lake counted once.
    #[must_use]
    pub fn fish_count(&self) -> u32 {
        let river_fish: u32 = self.zones.iter().map(|river| river.fish_count).sum();
        let lakes: BTreeSet<_> = self.zones.iter().filter_map(|river| river.lake).collect();
        river_fish + lakes.iter().map(|lake| lake.fish_count).sum::<u32>()
    }
}

impl Area<Water> {
    /// Fish in the rivers of the system, lakes excluded.
    #[must_use]
    pub fn river_fish_count(&self) -> u32 {
        self.zones
            .iter()
            .filter_map(|water| match water {
                Water::River(river) => Some(river.fish_count),
                Water::Lake(_) => None,
            })
            .sum()
    }

    /// Fish in every river and lake of the system.
    #[must_use]
    pub fn river_system_fish_count(&self) -> u32 {
        self.zones.iter().map(Water::fish_count).sum()
    }

    #[must_use]
    pub fn lake_count(&self) -> u32 {
        self.zones.iter().filter(|water| matches!(water, Water::Lake(_))).count() as u32
    }
}

/// Count animals by kind.
#[must_use]
pub fn animal_counts(animals: &BTreeSet<Animal>) -> BTreeMap<AnimalKind, u32> {
    let mut counts = BTreeMap::new();
    for animal in animals {
        *counts.entry(animal.kind).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Lake, ZoneId};

    fn forest(id: u32, kind: ForestKind) -> Forest {
        Forest {
            id: ZoneId::new(id),
            kind,
        }
    }

    fn meadow(id: u32, animals: &[Animal]) -> Meadow {
        Meadow {
            id: ZoneId::new(id),
            animals: SmallVec::from_slice(animals),
            special_power: None,
        }
    }

    #[test]
    fn test_connect_two_areas() {
        let a = Area::new([forest(10, ForestKind::Plain)], [PlayerColor::Blue], 3);
        let b = Area::new([forest(20, ForestKind::WithMenhir)], [PlayerColor::Red], 2);

        let merged = a.connect_to(&b);

        assert_eq!(merged.open_connections(), 3);
        assert_eq!(merged.zones().len(), 2);
        assert_eq!(merged.occupants(), &[PlayerColor::Red, PlayerColor::Blue]);
        assert!(merged.has_menhir());
    }

    #[test]
    fn test_connect_to_self() {
        let a = Area::new([forest(10, ForestKind::Plain), forest(20, ForestKind::Plain)], [], 4);

        let looped = a.connect_to(&a);

        assert_eq!(looped.zones(), a.zones());
        assert_eq!(looped.open_connections(), 2);
        assert!(looped.connect_to(&looped).is_closed());
    }

    #[test]
    #[should_panic(expected = "two open connections")]
    fn test_connect_closed_area_panics() {
        let closed = Area::singleton(forest(10, ForestKind::Plain), 0);
        let _ = closed.connect_to(&closed);
    }

    #[test]
    fn test_occupants() {
        let area = Area::singleton(forest(10, ForestKind::Plain), 1);

        let occupied = area.with_initial_occupant(PlayerColor::Green).unwrap();
        assert!(occupied.is_occupied());
        assert_eq!(
            occupied.with_initial_occupant(PlayerColor::Red),
            Err(GameError::AreaAlreadyOccupied)
        );

        let emptied = occupied.without_occupant(PlayerColor::Green).unwrap();
        assert!(!emptied.is_occupied());
        assert_eq!(
            emptied.without_occupant(PlayerColor::Green),
            Err(GameError::OccupantNotPresent(PlayerColor::Green))
        );
    }

    #[test]
    fn test_without_occupants() {
        let area = Area::new(
            [forest(10, ForestKind::Plain)],
            [PlayerColor::Red, PlayerColor::Red, PlayerColor::Yellow],
            0,
        );
        assert!(!area.without_occupants().is_occupied());
        assert_eq!(
            area.without_occupant(PlayerColor::Red).unwrap().occupants(),
            &[PlayerColor::Red, PlayerColor::Yellow]
        );
    }

    #[test]
    fn test_majority_occupants() {
        let area = Area::new(
            [forest(10, ForestKind::Plain)],
            [
                PlayerColor::Purple,
                PlayerColor::Red,
                PlayerColor::Purple,
                PlayerColor::Red,
                PlayerColor::Blue,
            ],
            0,
        );
        let expected: BTreeSet<_> = [PlayerColor::Red, PlayerColor::Purple].into_iter().collect();
        assert_eq!(area.majority_occupants(), expected);

        let empty = Area::singleton(forest(10, ForestKind::Plain), 0);
        assert!(empty.majority_occupants().is_empty());
    }

    #[test]
    fn test_occupant_order_is_canonical() {
        let a = Area::new([forest(10, ForestKind::Plain)], [PlayerColor::Green, PlayerColor::Red], 1);
        let b = Area::new([forest(10, ForestKind::Plain)], [PlayerColor::Red, PlayerColor::Green], 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_forest_queries() {
        let area = Area::new(
            [
                forest(10, ForestKind::WithMushrooms),
                forest(20, ForestKind::WithMushrooms),
                forest(21, ForestKind::Plain),
            ],
            [],
            0,
        );
        assert_eq!(area.mushroom_group_count(), 2);
        assert!(!area.has_menhir());
        let tiles: Vec<_> = area.tile_ids().into_iter().collect();
        assert_eq!(tiles, vec![TileId::new(1), TileId::new(2)]);
    }

    #[test]
    fn test_meadow_animals() {
        let deer = Animal::new(100, AnimalKind::Deer);
        let tiger = Animal::new(101, AnimalKind::Tiger);
        let mammoth = Animal::new(200, AnimalKind::Mammoth);
        let area = Area::new([meadow(10, &[deer, tiger]), meadow(20, &[mammoth])], [], 0);

        let cancelled: OrdSet<_> = OrdSet::unit(tiger);
        let animals = area.animals(&cancelled);

        assert_eq!(animals, [deer, mammoth].into_iter().collect());
        let counts = animal_counts(&animals);
        assert_eq!(counts.get(&AnimalKind::Deer), Some(&1));
        assert_eq!(counts.get(&AnimalKind::Tiger), None);
    }

    #[test]
    fn test_water_queries() {
        let lake = Lake {
            id: ZoneId::new(18),
            fish_count: 3,
            special_power: Some(SpecialPower::Raft),
        };
        let river_a = River {
            id: ZoneId::new(11),
            fish_count: 1,
            lake: Some(lake),
        };
        let river_b = River {
            id: ZoneId::new(21),
            fish_count: 2,
            lake: Some(lake),
        };

        let system = Area::new(
            [Water::River(river_a), Water::River(river_b), Water::Lake(lake)],
            [],
            2,
        );
        assert_eq!(system.river_fish_count(), 3);
        assert_eq!(system.river_system_fish_count(), 6);
        assert_eq!(system.lake_count(), 1);
        assert_eq!(
            system.zone_with_special_power(SpecialPower::Raft),
            Some(&Water::Lake(lake))
        );

        let rivers = Area::new([river_a, river_b], [], 0);
        assert_eq!(rivers.fish_count(), 6);
    }
}
