//! The action a game waits for next.

use serde::{Deserialize, Serialize};

/// What the game expects next. Each state accepts exactly one mutator.
///
/// | action       | mutator                          | current player |
/// |--------------|----------------------------------|----------------|
/// | `StartGame`  | `with_starting_tile_placed`      | none           |
/// | `PlaceTile`  | `with_placed_tile`               | first player   |
/// | `RetakePawn` | `with_occupant_removed`          | first player   |
/// | `OccupyTile` | `with_new_occupant`              | first player   |
/// | `EndGame`    | none                             | none           |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    StartGame,
    PlaceTile,
    RetakePawn,
    OccupyTile,
    EndGame,
}

impl Action {
    /// True in the states where some player is expected to act.
    #[must_use]
    pub const fn has_current_player(self) -> bool {
        !matches!(self, Action::StartGame | Action::EndGame)
    }

    /// Length of the action code for this state, if it takes one.
    #[must_use]
    pub const fn code_length(self) -> Option<usize> {
        match self {
            Action::PlaceTile => Some(2),
            Action::RetakePawn | Action::OccupyTile => Some(1),
            Action::StartGame | Action::EndGame => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lengths() {
        assert_eq!(Action::PlaceTile.code_length(), Some(2));
        assert_eq!(Action::OccupyTile.code_length(), Some(1));
        assert_eq!(Action::RetakePawn.code_length(), Some(1));
        assert_eq!(Action::EndGame.code_length(), None);
    }

    #[test]
    fn test_current_player_states() {
        assert!(!Action::StartGame.has_current_player());
        assert!(Action::RetakePawn.has_current_player());
        assert!(!Action::EndGame.has_current_player());
    }
}
