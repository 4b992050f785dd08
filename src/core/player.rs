//! Player identification.
//!
//! Players are identified by their colour. Colours have a canonical order
//! (`Red < Blue < Green < Yellow < Purple`) that is used wherever a list of
//! players must be deterministic, e.g. the occupants of an area.

use serde::{Deserialize, Serialize};

/// Colour of a player, supporting 2-5 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PlayerColor {
    /// All colours in canonical order.
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
    ];

    /// Get the canonical index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The first `count` colours, for setting up a game.
    ///
    /// ```
    /// use neolithic_rules::core::PlayerColor;
    ///
    /// let players = PlayerColor::first(3);
    /// assert_eq!(players, vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::Green]);
    /// ```
    #[must_use]
    pub fn first(count: usize) -> Vec<PlayerColor> {
        Self::ALL.iter().copied().take(count).collect()
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Purple => "Purple",
        };
        f.write_str(name)
    }
}
