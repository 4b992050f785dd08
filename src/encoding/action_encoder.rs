//! Action codes: one game action as one or two base32 symbols.
//!
//! | action          | value                                   | symbols |
//! |-----------------|-----------------------------------------|---------|
//! | place tile      | `index << 2 \| rotation`                | 2       |
//! | occupy tile     | `kind << 4 \| local zone id`, or 31     | 1       |
//! | retake pawn     | `index`, or 31                          | 1       |
//!
//! A tile index counts insertion positions ordered by `(x, y)`; a pawn index
//! counts the pawns on the board ordered by zone id. The value 31 (`"7"`)
//! means "nothing".
//!
//! The `with_*` functions apply an action to a state and return the new state
//! with the action's code. [`decode_and_apply`] does the reverse and either
//! applies the whole action or nothing.

use thiserror::Error;

use super::base32::{self, CodecError};
use crate::core::{GameError, Pos, Rotation};
use crate::game::{Action, GameState};
use crate::tiles::{Occupant, OccupantKind, PlacedTile, ZoneId};

/// Value of a one-symbol code meaning "no occupant" or "no pawn".
pub const NOTHING: u32 = 0b1_1111;

const ROTATION_BITS: u32 = 2;
const LOCAL_ZONE_BITS: u32 = 4;

/// A state together with the code of the action that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateAction {
    pub state: GameState,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionCodeError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("the game waits for {0:?}, which takes no action code")]
    NoCodeExpected(Action),
    #[error("expected a code of {expected} symbols, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("index {index} is out of range for {len} choices")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown occupant kind {0}")]
    UnknownOccupantKind(u32),
    #[error("no tile has been placed yet")]
    NothingToOccupy,
    #[error("the pawn on {0} does not belong to the current player")]
    ForeignPawn(ZoneId),
    #[error("action rejected: {0}")]
    Rejected(#[from] GameError),
}

fn sorted_insertion_positions(state: &GameState) -> Vec<Pos> {
    state.board().insertion_positions().iter().copied().collect()
}

fn sorted_pawns(state: &GameState) -> Vec<Occupant> {
    state
        .board()
        .occupants()
        .into_iter()
        .filter(|occupant| occupant.kind == OccupantKind::Pawn)
        .collect()
}

/// Place `tile` and encode the placement.
pub fn with_placed_tile(state: &GameState, tile: PlacedTile) -> Result<StateAction, ActionCodeError> {
    let index = sorted_insertion_positions(state)
        .iter()
        .position(|&pos| pos == tile.pos)
        .ok_or(GameError::IllegalPlacement {
            tile: tile.id(),
            pos: tile.pos,
        })?;
    let code = base32::encode_bits10(((index as u32) << ROTATION_BITS) | tile.rotation.ordinal())?;
    let state = state.with_placed_tile(tile)?;
    Ok(StateAction { state, code })
}

/// Put `occupant` (or nothing) on the last tile and encode the choice.
pub fn with_new_occupant(state: &GameState, occupant: Option<Occupant>) -> Result<StateAction, ActionCodeError> {
    let value = match occupant {
        Some(occupant) => (occupant.kind.ordinal() << LOCAL_ZONE_BITS) | occupant.zone_id.local_id(),
        None => NOTHING,
    };
    let code = base32::encode_bits5(value)?;
    let state = state.with_new_occupant(occupant)?;
    Ok(StateAction { state, code })
}

/// Take back `occupant` (or nothing) and encode the choice.
///
/// Only a pawn of the current player can be taken back.
pub fn with_occupant_removed(state: &GameState, occupant: Option<Occupant>) -> Result<StateAction, ActionCodeError> {
    let value = match occupant {
        Some(occupant) => {
            let index = sorted_pawns(state)
                .iter()
                .position(|&pawn| pawn == occupant)
                .ok_or(GameError::NotAPawnOnBoard(occupant))?;
            let owner = state.board().tile_with_id(occupant.zone_id.tile_id())?.placer;
            if owner != state.current_player() {
                return Err(ActionCodeError::ForeignPawn(occupant.zone_id));
            }
            index as u32
        }
        None => NOTHING,
    };
    let code = base32::encode_bits5(value)?;
    let state = state.with_occupant_removed(occupant)?;
    Ok(StateAction { state, code })
}

/// Decode `code` as the action `state` waits for, check it against the
/// current board and apply it.
pub fn decode_and_apply(state: &GameState, code: &str) -> Result<StateAction, ActionCodeError> {
    let action = state.next_action();
    let expected = action.code_length().ok_or(ActionCodeError::NoCodeExpected(action))?;
    let actual = code.chars().count();
    if actual != expected {
        return Err(ActionCodeError::WrongLength { expected, actual });
    }
    let value = base32::decode(code)?;
    tracing::trace!(target: "neolithic::encoding", code, value, action = ?action, "action_code.decoded");

    match action {
        Action::PlaceTile => {
            let positions = sorted_insertion_positions(state);
            let index = (value >> ROTATION_BITS) as usize;
            let pos = *positions.get(index).ok_or(ActionCodeError::IndexOutOfRange {
                index,
                len: positions.len(),
            })?;
            let rotation = Rotation::from_ordinal(value & ((1 << ROTATION_BITS) - 1));
            let tile = state.tile_to_place().cloned().ok_or(GameError::WrongAction {
                expected: Action::PlaceTile,
                actual: action,
            })?;
            with_placed_tile(state, PlacedTile::new(tile, state.current_player(), rotation, pos))
        }
        Action::OccupyTile => {
            if value == NOTHING {
                return with_new_occupant(state, None);
            }
            let kind = OccupantKind::from_ordinal(value >> LOCAL_ZONE_BITS)
                .ok_or(ActionCodeError::UnknownOccupantKind(value >> LOCAL_ZONE_BITS))?;
            let tile = state
                .board()
                .last_placed_tile()
                .ok_or(ActionCodeError::NothingToOccupy)?;
            let local_id = value & ((1 << LOCAL_ZONE_BITS) - 1);
            with_new_occupant(state, Some(Occupant::new(kind, tile.id().zone(local_id))))
        }
        Action::RetakePawn => {
            if value == NOTHING {
                return with_occupant_removed(state, None);
            }
            let pawns = sorted_pawns(state);
            let index = value as usize;
            let pawn = *pawns.get(index).ok_or(ActionCodeError::IndexOutOfRange {
                index,
                len: pawns.len(),
            })?;
            with_occupant_removed(state, Some(pawn))
        }
        Action::StartGame | Action::EndGame => Err(ActionCodeError::NoCodeExpected(action)),
    }
}
