//! Zones: the terrain units printed on tiles.
//!
//! A zone is identified by a [`ZoneId`] encoding `(tile id, local index)`
//! as `tile_id * 10 + local_id`. Local indices 0-7 are used for zones that
//! touch a side; lakes use 8 and 9.
//!
//! Zone kinds are closed sums: [`Zone`] covers every kind and [`Water`]
//! covers the two kinds that make up a river system.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of a tile in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Id of the zone with the given local index on this tile.
    #[must_use]
    pub const fn zone(self, local_id: u32) -> ZoneId {
        ZoneId::new(self.0 * 10 + local_id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Globally unique zone identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl ZoneId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The tile this zone is printed on.
    #[must_use]
    pub const fn tile_id(self) -> TileId {
        TileId(self.0 / 10)
    }

    /// Index of the zone within its tile (0-9).
    #[must_use]
    pub const fn local_id(self) -> u32 {
        self.0 % 10
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

/// Special powers carried by some meadows and lakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialPower {
    Shaman,
    Logboat,
    HuntingTrap,
    PitTrap,
    WildFire,
    Raft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Mammoth,
    Aurochs,
    Deer,
    Tiger,
}

/// An animal living in a meadow. Its id is `zone_id * 10 + index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Animal {
    pub id: u32,
    pub kind: AnimalKind,
}

impl Animal {
    #[must_use]
    pub const fn new(id: u32, kind: AnimalKind) -> Self {
        Self { id, kind }
    }

    /// The meadow this animal lives in.
    #[must_use]
    pub const fn zone_id(self) -> ZoneId {
        ZoneId(self.id / 10)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForestKind {
    Plain,
    WithMenhir,
    WithMushrooms,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Forest {
    pub id: ZoneId,
    pub kind: ForestKind,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Meadow {
    pub id: ZoneId,
    /// Animals in printing order.
    pub animals: SmallVec<[Animal; 2]>,
    pub special_power: Option<SpecialPower>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lake {
    pub id: ZoneId,
    pub fish_count: u32,
    pub special_power: Option<SpecialPower>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct River {
    pub id: ZoneId,
    pub fish_count: u32,
    /// Lake this river flows into, if any.
    pub lake: Option<Lake>,
}

impl River {
    #[must_use]
    pub fn has_lake(&self) -> bool {
        self.lake.is_some()
    }
}

/// Behaviour shared by every zone kind.
pub trait ZoneLike: Clone + Ord {
    fn id(&self) -> ZoneId;

    fn special_power(&self) -> Option<SpecialPower> {
        None
    }

    fn tile_id(&self) -> TileId {
        self.id().tile_id()
    }

    fn local_id(&self) -> u32 {
        self.id().local_id()
    }
}

impl ZoneLike for Forest {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl ZoneLike for Meadow {
    fn id(&self) -> ZoneId {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl ZoneLike for River {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl ZoneLike for Lake {
    fn id(&self) -> ZoneId {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

/// A zone that belongs to a river system.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Water {
    River(River),
    Lake(Lake),
}

impl Water {
    #[must_use]
    pub fn fish_count(&self) -> u32 {
        match self {
            Water::River(river) => river.fish_count,
            Water::Lake(lake) => lake.fish_count,
        }
    }
}

impl ZoneLike for Water {
    fn id(&self) -> ZoneId {
        match self {
            Water::River(river) => river.id,
            Water::Lake(lake) => lake.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Water::River(_) => None,
            Water::Lake(lake) => lake.special_power,
        }
    }
}

impl Ord for Water {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl PartialOrd for Water {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Any zone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Forest(Forest),
    Meadow(Meadow),
    River(River),
    Lake(Lake),
}

impl ZoneLike for Zone {
    fn id(&self) -> ZoneId {
        match self {
            Zone::Forest(forest) => forest.id,
            Zone::Meadow(meadow) => meadow.id,
            Zone::River(river) => river.id,
            Zone::Lake(lake) => lake.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Zone::Forest(_) | Zone::River(_) => None,
            Zone::Meadow(meadow) => meadow.special_power,
            Zone::Lake(lake) => lake.special_power,
        }
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Forest> for Zone {
    fn from(forest: Forest) -> Self {
        Zone::Forest(forest)
    }
}

impl From<Meadow> for Zone {
    fn from(meadow: Meadow) -> Self {
        Zone::Meadow(meadow)
    }
}

impl From<River> for Zone {
    fn from(river: River) -> Self {
        Zone::River(river)
    }
}

impl From<Lake> for Zone {
    fn from(lake: Lake) -> Self {
        Zone::Lake(lake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_id_layout() {
        let id = TileId::new(56).zone(3);
        assert_eq!(id, ZoneId::new(563));
        assert_eq!(id.tile_id(), TileId::new(56));
        assert_eq!(id.local_id(), 3);
    }

    #[test]
    fn test_animal_zone() {
        let deer = Animal::new(5631, AnimalKind::Deer);
        assert_eq!(deer.zone_id(), ZoneId::new(563));
    }

    #[test]
    fn test_special_powers() {
        let lake = Lake {
            id: ZoneId::new(18),
            fish_count: 2,
            special_power: Some(SpecialPower::Logboat),
        };
        let river = River {
            id: ZoneId::new(11),
            fish_count: 1,
            lake: Some(lake),
        };

        assert_eq!(Zone::Lake(lake).special_power(), Some(SpecialPower::Logboat));
        assert_eq!(Zone::River(river).special_power(), None);
        assert!(river.has_lake());
        assert_eq!(Water::Lake(lake).fish_count(), 2);
    }

    #[test]
    fn test_zones_order_by_id() {
        let forest = Zone::Forest(Forest {
            id: ZoneId::new(42),
            kind: ForestKind::Plain,
        });
        let lake = Zone::Lake(Lake {
            id: ZoneId::new(18),
            fish_count: 0,
            special_power: None,
        });
        assert!(lake < forest);
    }

    #[test]
    fn test_serialization() {
        let meadow = Zone::Meadow(Meadow {
            id: ZoneId::new(31),
            animals: SmallVec::from_slice(&[Animal::new(310, AnimalKind::Mammoth)]),
            special_power: None,
        });
        let json = serde_json::to_string(&meadow).unwrap();
        let deserialized: Zone = serde_json::from_str(&json).unwrap();
        assert_eq!(meadow, deserialized);
    }
}
