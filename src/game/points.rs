//! Point values. Pure functions of the counts they are given.

/// A closed forest: two points per tile, three per mushroom group.
#[must_use]
pub const fn for_closed_forest(tile_count: u32, mushroom_group_count: u32) -> u32 {
    2 * tile_count + 3 * mushroom_group_count
}

/// A closed river: one point per tile and per fish.
#[must_use]
pub const fn for_closed_river(tile_count: u32, fish_count: u32) -> u32 {
    tile_count + fish_count
}

/// A meadow: three per mammoth, two per aurochs, one per deer.
#[must_use]
pub const fn for_meadow(mammoth_count: u32, aurochs_count: u32, deer_count: u32) -> u32 {
    3 * mammoth_count + 2 * aurochs_count + deer_count
}

/// A river system: one point per fish.
#[must_use]
pub const fn for_river_system(fish_count: u32) -> u32 {
    fish_count
}

/// The logboat: two points per lake of its river system.
#[must_use]
pub const fn for_logboat(lake_count: u32) -> u32 {
    2 * lake_count
}

/// The raft: one point per lake of its river system.
#[must_use]
pub const fn for_raft(lake_count: u32) -> u32 {
    lake_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(for_closed_forest(2, 0), 4);
        assert_eq!(for_closed_forest(3, 2), 12);
        assert_eq!(for_closed_river(2, 1), 3);
        assert_eq!(for_meadow(1, 1, 1), 6);
        assert_eq!(for_river_system(5), 5);
        assert_eq!(for_logboat(2), 4);
        assert_eq!(for_raft(2), 2);
    }
}
