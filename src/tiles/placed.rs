//! Occupants and tiles placed on the board.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::side::TileSide;
use super::tile::{Tile, TileKind};
use super::zone::{Forest, Meadow, River, TileId, Zone, ZoneId, ZoneLike};
use crate::core::{Direction, GameError, PlayerColor, Pos, Rotation};

/// Kind of occupant. Pawns are gatherers, hunters and fishers; huts are fishing huts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    Pawn,
    Hut,
}

impl OccupantKind {
    pub const ALL: [OccupantKind; 2] = [OccupantKind::Pawn, OccupantKind::Hut];

    /// Ordinal used by the action codes.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u32) -> Option<OccupantKind> {
        match ordinal {
            0 => Some(OccupantKind::Pawn),
            1 => Some(OccupantKind::Hut),
            _ => None,
        }
    }
}

/// A pawn or hut standing on a zone. Its owner is the placer of the zone's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub kind: OccupantKind,
    pub zone_id: ZoneId,
}

impl Occupant {
    #[must_use]
    pub const fn new(kind: OccupantKind, zone_id: ZoneId) -> Self {
        Self { kind, zone_id }
    }

    #[must_use]
    pub const fn pawn(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Pawn, zone_id)
    }

    #[must_use]
    pub const fn hut(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Hut, zone_id)
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} on {}", self.kind, self.zone_id)
    }
}

/// A tile on the board, with its placer, rotation, position and occupant.
///
/// The starting tile has no placer. Placed tiles are values: changing the
/// occupant yields a new `PlacedTile`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub tile: Tile,
    pub placer: Option<PlayerColor>,
    pub rotation: Rotation,
    pub pos: Pos,
    pub occupant: Option<Occupant>,
}

impl PlacedTile {
    #[must_use]
    pub fn new(tile: Tile, placer: Option<PlayerColor>, rotation: Rotation, pos: Pos) -> Self {
        Self {
            tile,
            placer,
            rotation,
            pos,
            occupant: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.tile.id
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.tile.kind
    }

    /// The side facing `direction` once the rotation is applied.
    #[must_use]
    pub fn side(&self, direction: Direction) -> &TileSide {
        self.tile.side(direction.rotated(self.rotation.negated()))
    }

    /// Look up one of the tile's zones.
    pub fn zone_with_id(&self, id: ZoneId) -> Result<Zone, GameError> {
        self.tile
            .zones()
            .into_iter()
            .find(|zone| zone.id() == id)
            .ok_or(GameError::UnknownZone(id))
    }

    /// The zone carrying a special power, if the tile has one.
    #[must_use]
    pub fn special_power_zone(&self) -> Option<Zone> {
        self.tile.zones().into_iter().find(|zone| zone.special_power().is_some())
    }

    #[must_use]
    pub fn forest_zones(&self) -> BTreeSet<Forest> {
        self.tile
            .side_zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::Forest(forest) => Some(forest),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn meadow_zones(&self) -> BTreeSet<Meadow> {
        self.tile
            .side_zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::Meadow(meadow) => Some(meadow),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn river_zones(&self) -> BTreeSet<River> {
        self.tile
            .side_zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::River(river) => Some(river),
                _ => None,
            })
            .collect()
    }

    /// Every occupant the placer could put on this tile, ignoring the rest of
    /// the board: a pawn on each side zone, a hut on each river without a
    /// lake, and a hut on each lake. The starting tile offers nothing.
    #[must_use]
    pub fn potential_occupants(&self) -> BTreeSet<Occupant> {
        if self.placer.is_none() {
            return BTreeSet::new();
        }

        let mut occupants = BTreeSet::new();
        for zone in self.tile.side_zones() {
            occupants.insert(Occupant::pawn(zone.id()));
            if let Zone::River(river) = zone {
                match river.lake {
                    Some(lake) => occupants.insert(Occupant::hut(lake.id)),
                    None => occupants.insert(Occupant::hut(river.id)),
                };
            }
        }
        occupants
    }

    /// Same tile carrying `occupant`.
    pub fn with_occupant(&self, occupant: Occupant) -> Result<PlacedTile, GameError> {
        if self.occupant.is_some() {
            return Err(GameError::TileAlreadyOccupied(self.id()));
        }
        Ok(PlacedTile {
            occupant: Some(occupant),
            ..self.clone()
        })
    }

    /// Same tile without occupant.
    #[must_use]
    pub fn with_no_occupant(&self) -> PlacedTile {
        PlacedTile {
            occupant: None,
            ..self.clone()
        }
    }

    /// Zone occupied by an occupant of the given kind, if any.
    #[must_use]
    pub fn id_of_zone_occupied_by(&self, kind: OccupantKind) -> Option<ZoneId> {
        self.occupant
            .filter(|occupant| occupant.kind == kind)
            .map(|occupant| occupant.zone_id)
    }
}
