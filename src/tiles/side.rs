//! Tile sides.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::zone::{Forest, Meadow, River, Zone};

/// One side of a tile and the zones touching it.
///
/// A river side is bordered by two meadows, listed in clockwise order: when
/// the side faces east, `meadow1` is the northern meadow.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSide {
    Forest(Forest),
    Meadow(Meadow),
    River {
        meadow1: Meadow,
        river: River,
        meadow2: Meadow,
    },
}

impl TileSide {
    /// Zones touching this side, in clockwise order. A zone that touches the
    /// side twice is listed twice.
    #[must_use]
    pub fn zones(&self) -> SmallVec<[Zone; 3]> {
        match self {
            TileSide::Forest(forest) => smallvec![Zone::Forest(*forest)],
            TileSide::Meadow(meadow) => smallvec![Zone::Meadow(meadow.clone())],
            TileSide::River { meadow1, river, meadow2 } => smallvec![
                Zone::Meadow(meadow1.clone()),
                Zone::River(*river),
                Zone::Meadow(meadow2.clone()),
            ],
        }
    }

    /// True if both sides are of the same kind and can therefore face each other.
    #[must_use]
    pub fn is_same_kind_as(&self, other: &TileSide) -> bool {
        matches!(
            (self, other),
            (TileSide::Forest(_), TileSide::Forest(_))
                | (TileSide::Meadow(_), TileSide::Meadow(_))
                | (TileSide::River { .. }, TileSide::River { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::zone::{ForestKind, ZoneId};
    use smallvec::SmallVec;

    fn meadow(id: u32) -> Meadow {
        Meadow {
            id: ZoneId::new(id),
            animals: SmallVec::new(),
            special_power: None,
        }
    }

    #[test]
    fn test_river_side_zones() {
        let side = TileSide::River {
            meadow1: meadow(10),
            river: River {
                id: ZoneId::new(11),
                fish_count: 0,
                lake: None,
            },
            meadow2: meadow(12),
        };
        let ids: Vec<_> = side.zones().iter().map(crate::tiles::ZoneLike::id).collect();
        assert_eq!(ids, vec![ZoneId::new(10), ZoneId::new(11), ZoneId::new(12)]);
    }

    #[test]
    fn test_same_kind() {
        let forest = TileSide::Forest(Forest {
            id: ZoneId::new(0),
            kind: ForestKind::Plain,
        });
        let other_forest = TileSide::Forest(Forest {
            id: ZoneId::new(20),
            kind: ForestKind::WithMenhir,
        });
        let meadow_side = TileSide::Meadow(meadow(21));

        assert!(forest.is_same_kind_as(&other_forest));
        assert!(!forest.is_same_kind_as(&meadow_side));
        assert!(meadow_side.is_same_kind_as(&TileSide::Meadow(meadow(5))));
    }
}
