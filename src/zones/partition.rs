//! Zone partitions: disjoint sets of areas of one zone kind.
//!
//! A `ZonePartition` is immutable. All changes go through a
//! `ZonePartitionBuilder`, a short-lived union-find scratch structure made of
//! an arena of live areas plus a map from zone id to the slot of the area
//! owning that zone.
//!
//! ## Usage
//!
//! ```
//! use neolithic_rules::tiles::{Forest, ForestKind, ZoneId};
//! use neolithic_rules::zones::ZonePartition;
//!
//! let a = Forest { id: ZoneId::new(10), kind: ForestKind::Plain };
//! let b = Forest { id: ZoneId::new(20), kind: ForestKind::Plain };
//!
//! let mut builder = ZonePartition::default().builder();
//! builder.add_singleton(a, 1).unwrap();
//! builder.add_singleton(b, 1).unwrap();
//! builder.union(&a, &b).unwrap();
//! let partition = builder.build();
//!
//! let area = partition.area_containing(&a).unwrap();
//! assert!(area.contains(&b));
//! assert!(area.is_closed());
//! ```

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::FxHashMap;

use super::area::Area;
use crate::core::{GameError, PlayerColor};
use crate::tiles::{ZoneId, ZoneLike};

/// The areas of one zone kind. Every zone on the board belongs to exactly one area.
#[derive(Clone, Debug)]
pub struct ZonePartition<Z: ZoneLike> {
    areas: Vector<Area<Z>>,
    owners: ImHashMap<ZoneId, usize>,
}

impl<Z: ZoneLike> Default for ZonePartition<Z> {
    fn default() -> Self {
        Self {
            areas: Vector::new(),
            owners: ImHashMap::new(),
        }
    }
}

impl<Z: ZoneLike> ZonePartition<Z> {
    /// Create a partition from disjoint areas.
    pub fn new(areas: impl IntoIterator<Item = Area<Z>>) -> Result<Self, GameError> {
        let mut partition = Self::default();
        for area in areas {
            let slot = partition.areas.len();
            for zone in area.zones() {
                if partition.owners.insert(zone.id(), slot).is_some() {
                    return Err(GameError::ZoneAlreadyAssigned(zone.id()));
                }
            }
            partition.areas.push_back(area);
        }
        Ok(partition)
    }

    /// All areas, in no particular order.
    pub fn areas(&self) -> impl Iterator<Item = &Area<Z>> {
        self.areas.iter()
    }

    /// Number of areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// The area owning `zone`.
    pub fn area_containing(&self, zone: &Z) -> Result<&Area<Z>, GameError> {
        self.owners
            .get(&zone.id())
            .and_then(|&slot| self.areas.get(slot))
            .ok_or(GameError::UnknownZone(zone.id()))
    }

    /// Start editing a copy of this partition.
    #[must_use]
    pub fn builder(&self) -> ZonePartitionBuilder<Z> {
        ZonePartitionBuilder {
            slots: self.areas.iter().cloned().map(Some).collect(),
            owners: self.owners.iter().map(|(&zone, &slot)| (zone, slot)).collect(),
        }
    }
}

/// Set equality of areas.
impl<Z: ZoneLike> PartialEq for ZonePartition<Z> {
    fn eq(&self, other: &Self) -> bool {
        self.areas.len() == other.areas.len()
            && self.areas.iter().all(|area| {
                area.zones()
                    .get_min()
                    .and_then(|zone| other.area_containing(zone).ok())
                    .is_some_and(|found| found == area)
            })
    }
}

impl<Z: ZoneLike> Eq for ZonePartition<Z> {}

/// Mutable union-find over the areas of a partition.
#[derive(Clone, Debug)]
pub struct ZonePartitionBuilder<Z: ZoneLike> {
    /// Arena of areas; a slot is emptied when its area is absorbed by a union.
    slots: Vec<Option<Area<Z>>>,
    owners: FxHashMap<ZoneId, usize>,
}

impl<Z: ZoneLike> ZonePartitionBuilder<Z> {
    fn slot_of(&self, zone: ZoneId) -> Result<usize, GameError> {
        self.owners.get(&zone).copied().ok_or(GameError::UnknownZone(zone))
    }

    fn live(&self, slot: usize) -> &Area<Z> {
        match &self.slots[slot] {
            Some(area) => area,
            None => unreachable!("zone owner points to absorbed slot {slot}"),
        }
    }

    fn replace(
        &mut self,
        zone: ZoneId,
        edit: impl FnOnce(&Area<Z>) -> Result<Area<Z>, GameError>,
    ) -> Result<(), GameError> {
        let slot = self.slot_of(zone)?;
        let edited = edit(self.live(slot))?;
        self.slots[slot] = Some(edited);
        Ok(())
    }

    /// Add a new area made of `zone` alone.
    pub fn add_singleton(&mut self, zone: Z, open_connections: u32) -> Result<(), GameError> {
        if self.owners.contains_key(&zone.id()) {
            return Err(GameError::ZoneAlreadyAssigned(zone.id()));
        }
        self.owners.insert(zone.id(), self.slots.len());
        self.slots.push(Some(Area::singleton(zone, open_connections)));
        Ok(())
    }

    /// Put the first occupant in the area owning `zone`.
    pub fn add_initial_occupant(&mut self, zone: &Z, color: PlayerColor) -> Result<(), GameError> {
        self.replace(zone.id(), |area| area.with_initial_occupant(color))
    }

    /// Remove one occupant of `color` from the area owning `zone`.
    pub fn remove_occupant(&mut self, zone: &Z, color: PlayerColor) -> Result<(), GameError> {
        self.replace(zone.id(), |area| area.without_occupant(color))
    }

    /// Remove every occupant of `area`, which must be one of the current areas.
    pub fn remove_all_occupants_of(&mut self, area: &Area<Z>) -> Result<(), GameError> {
        let zone = area.zones().get_min().ok_or(GameError::UnknownArea)?;
        self.replace(zone.id(), |current| {
            if current == area {
                Ok(current.without_occupants())
            } else {
                Err(GameError::UnknownArea)
            }
        })
    }

    /// Connect the areas owning `zone1` and `zone2`, which may be the same area.
    pub fn union(&mut self, zone1: &Z, zone2: &Z) -> Result<(), GameError> {
        let slot1 = self.slot_of(zone1.id())?;
        let slot2 = self.slot_of(zone2.id())?;

        if slot1 == slot2 {
            let area = self.live(slot1);
            let looped = area.connect_to(area);
            self.slots[slot1] = Some(looped);
            return Ok(());
        }

        let (kept, absorbed) = (slot1.min(slot2), slot1.max(slot2));
        let absorbed_area = match self.slots[absorbed].take() {
            Some(area) => area,
            None => unreachable!("zone owner points to absorbed slot {absorbed}"),
        };
        let merged = self.live(kept).connect_to(&absorbed_area);
        for zone in absorbed_area.zones() {
            self.owners.insert(zone.id(), kept);
        }
        self.slots[kept] = Some(merged);
        Ok(())
    }

    /// Freeze the current areas into a partition.
    #[must_use]
    pub fn build(self) -> ZonePartition<Z> {
        let areas: Vector<Area<Z>> = self.slots.into_iter().flatten().collect();
        let owners = areas
            .iter()
            .enumerate()
            .flat_map(|(slot, area)| area.zones().iter().map(move |zone| (zone.id(), slot)))
            .collect();
        ZonePartition { areas, owners }
    }
}
