//! Errors raised by the engine.
//!
//! Two families share one enum:
//!
//! - **Precondition violations**: the caller broke an explicit contract
//!   (wrong-state mutator, duplicate zone, missing occupant...).
//! - **Illegal actions**: a well-formed request that the current game state
//!   does not allow (bad placement, occupant not offered...). A client can
//!   re-prompt the player on these; see [`GameError::is_illegal_action`].
//!
//! Broken internal invariants are not reported here: they abort.

use thiserror::Error;

use crate::core::{PlayerColor, Pos};
use crate::game::Action;
use crate::tiles::{Occupant, OccupantKind, TileId, TileKind, ZoneId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    // === Precondition violations ===
    #[error("expected the game to wait for {expected:?}, but it waits for {actual:?}")]
    WrongAction { expected: Action, actual: Action },

    #[error("a game needs at least two players, got {0}")]
    NotEnoughPlayers(usize),

    #[error("area is already occupied")]
    AreaAlreadyOccupied,

    #[error("{0} has no occupant in this area")]
    OccupantNotPresent(PlayerColor),

    #[error("zone {0} already belongs to an area")]
    ZoneAlreadyAssigned(ZoneId),

    #[error("zone {0} does not belong to any area")]
    UnknownZone(ZoneId),

    #[error("area is not part of this partition")]
    UnknownArea,

    #[error("no tile with id {0} is on the board")]
    UnknownTile(TileId),

    #[error("tile {0} already carries an occupant")]
    TileAlreadyOccupied(TileId),

    #[error("tile {0} has no placer to own an occupant")]
    NeutralTile(TileId),

    #[error("sides of different kinds cannot be connected")]
    IncompatibleSides,

    #[error("a {kind:?} cannot occupy zone {zone}")]
    InvalidOccupantZone { kind: OccupantKind, zone: ZoneId },

    #[error("the {0:?} deck is empty")]
    EmptyDeck(TileKind),

    // === Illegal actions ===
    #[error("tile {tile} cannot be placed at {pos}")]
    IllegalPlacement { tile: TileId, pos: Pos },

    #[error("tile {0} is not the tile to place")]
    WrongTile(TileId),

    #[error("tile must be placed by the current player")]
    WrongPlacer,

    #[error("{0} is not a potential occupant of the last placed tile")]
    IllegalOccupant(Occupant),

    #[error("{0} is not a pawn on the board")]
    NotAPawnOnBoard(Occupant),
}

impl GameError {
    /// True for errors a player can recover from by choosing another action.
    #[must_use]
    pub fn is_illegal_action(&self) -> bool {
        matches!(
            self,
            GameError::IllegalPlacement { .. }
                | GameError::WrongTile(_)
                | GameError::WrongPlacer
                | GameError::IllegalOccupant(_)
                | GameError::NotAPawnOnBoard(_)
        )
    }
}
