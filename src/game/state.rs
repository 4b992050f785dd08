//! Game state: the turn-by-turn state machine.
//!
//! ## Turn structure
//!
//! 1. `StartGame`: the starting tile is placed and the first tile drawn.
//! 2. `PlaceTile`: the current player places the tile to place. Its special
//!    power, if any, applies at once. Forests and rivers it closes are scored
//!    and their pawns go home.
//! 3. `RetakePawn` (shaman only): the player may take back one pawn.
//! 4. `OccupyTile`: the player may put one occupant on the tile just placed.
//! 5. Turn end: the next tile is drawn. A normal tile closing a forest with
//!    a menhir earns the same player an extra turn with a menhir tile.
//!
//! When no normal tile can be drawn the game ends: meadows, river systems,
//! pit traps and rafts are scored and the winners announced.
//!
//! Every mutator returns a new `GameState` and leaves `self` untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use im::OrdSet;

use super::action::Action;
use super::decks::TileDecks;
use super::messages::{MessageBoard, TextMaker};
use crate::board::Board;
use crate::core::{GameError, PlayerColor, Pos, Rotation, RulesConfig};
use crate::tiles::{
    Animal, AnimalKind, Meadow, Occupant, OccupantKind, PlacedTile, SpecialPower, Tile, TileKind, Water,
    Zone, ZoneLike,
};
use crate::zones::Area;

/// Complete state of a game between two actions.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use neolithic_rules::core::{GameRng, PlayerColor};
/// use neolithic_rules::game::{Action, GameState, PlainTextMaker, TileDecks};
/// use neolithic_rules::tiles::sample;
///
/// let decks = TileDecks::shuffled(&sample::catalog(), &mut GameRng::new(1));
/// let state = GameState::initial(PlayerColor::first(2), decks, Arc::new(PlainTextMaker)).unwrap();
/// assert_eq!(state.next_action(), Action::StartGame);
///
/// let state = state.with_starting_tile_placed().unwrap();
/// assert_eq!(state.next_action(), Action::PlaceTile);
/// assert_eq!(state.current_player(), Some(PlayerColor::Red));
/// assert!(state.tile_to_place().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Players in turn order; the first one is the current player.
    players: Vec<PlayerColor>,
    tile_decks: TileDecks,
    tile_to_place: Option<Tile>,
    board: Board,
    next_action: Action,
    message_board: MessageBoard,
    config: RulesConfig,
}

impl GameState {
    /// A game waiting for its starting tile, with the default occupant stock.
    pub fn initial(
        players: Vec<PlayerColor>,
        tile_decks: TileDecks,
        text_maker: Arc<dyn TextMaker>,
    ) -> Result<GameState, GameError> {
        Self::initial_with_config(players, tile_decks, text_maker, RulesConfig::default())
    }

    /// A game waiting for its starting tile.
    pub fn initial_with_config(
        players: Vec<PlayerColor>,
        tile_decks: TileDecks,
        text_maker: Arc<dyn TextMaker>,
        config: RulesConfig,
    ) -> Result<GameState, GameError> {
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(players.len()));
        }
        Ok(GameState {
            players,
            tile_decks,
            tile_to_place: None,
            board: Board::default(),
            next_action: Action::StartGame,
            message_board: MessageBoard::new(text_maker),
            config,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn players(&self) -> &[PlayerColor] {
        &self.players
    }

    #[must_use]
    pub fn tile_decks(&self) -> &TileDecks {
        &self.tile_decks
    }

    #[must_use]
    pub fn tile_to_place(&self) -> Option<&Tile> {
        self.tile_to_place.as_ref()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn next_action(&self) -> Action {
        self.next_action
    }

    #[must_use]
    pub fn message_board(&self) -> &MessageBoard {
        &self.message_board
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The player expected to act, none before the start and after the end.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerColor> {
        if self.next_action.has_current_player() {
            self.players.first().copied()
        } else {
            None
        }
    }

    /// Occupants of `kind` that `player` has not yet put on the board.
    #[must_use]
    pub fn free_occupants_count(&self, player: PlayerColor, kind: OccupantKind) -> u32 {
        self.config
            .stock(kind)
            .saturating_sub(self.board.occupant_count(player, kind))
    }

    /// Occupants the placer of the last tile may put on it: those whose area
    /// is still open and unoccupied, and for which the placer has stock left.
    #[must_use]
    pub fn last_tile_potential_occupants(&self) -> BTreeSet<Occupant> {
        let Some(tile) = self.board.last_placed_tile() else {
            return BTreeSet::new();
        };
        let Some(placer) = tile.placer else {
            return BTreeSet::new();
        };

        tile.potential_occupants()
            .into_iter()
            .filter(|occupant| self.free_occupants_count(placer, occupant.kind) > 0)
            .filter(|occupant| {
                tile.zone_with_id(occupant.zone_id)
                    .and_then(|zone| self.is_area_available(occupant.kind, &zone))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// True if the area of `zone` an occupant of `kind` would join is open
    /// and unoccupied.
    fn is_area_available(&self, kind: OccupantKind, zone: &Zone) -> Result<bool, GameError> {
        fn available<Z: ZoneLike>(area: &Area<Z>) -> bool {
            !area.is_occupied() && !area.is_closed()
        }

        let board = &self.board;
        let available = match (kind, zone) {
            (OccupantKind::Pawn, Zone::Forest(forest)) => available(board.forest_area(forest)?),
            (OccupantKind::Pawn, Zone::Meadow(meadow)) => available(board.meadow_area(meadow)?),
            (OccupantKind::Pawn, Zone::River(river)) => available(board.river_area(river)?),
            (OccupantKind::Hut, Zone::River(river)) => available(board.river_system_area(&Water::River(*river))?),
            (OccupantKind::Hut, Zone::Lake(lake)) => available(board.river_system_area(&Water::Lake(*lake))?),
            (kind, zone) => return Err(GameError::InvalidOccupantZone { kind, zone: zone.id() }),
        };
        Ok(available)
    }

    fn ensure_next_action(&self, expected: Action) -> Result<(), GameError> {
        if self.next_action == expected {
            Ok(())
        } else {
            Err(GameError::WrongAction {
                expected,
                actual: self.next_action,
            })
        }
    }

    fn current_player_or_err(&self, expected: Action) -> Result<PlayerColor, GameError> {
        self.current_player().ok_or(GameError::WrongAction {
            expected,
            actual: self.next_action,
        })
    }

    // === Mutators ===

    /// Place the starting tile at the origin and draw the first tile.
    pub fn with_starting_tile_placed(&self) -> Result<GameState, GameError> {
        self.ensure_next_action(Action::StartGame)?;

        let start = self
            .tile_decks
            .top_tile(TileKind::Start)
            .cloned()
            .ok_or(GameError::EmptyDeck(TileKind::Start))?;
        let decks = self.tile_decks.with_top_tile_drawn(TileKind::Start)?;
        let board = self
            .board
            .with_new_tile(PlacedTile::new(start, None, Rotation::None, Pos::ORIGIN))?;

        let state = GameState {
            tile_decks: decks,
            board,
            ..self.clone()
        };
        tracing::info!(target: "neolithic::game", players = ?state.players, "game.started");
        state.with_next_normal_tile(false)
    }

    /// Place the tile to place, as `tile`, for the current player.
    pub fn with_placed_tile(&self, tile: PlacedTile) -> Result<GameState, GameError> {
        self.ensure_next_action(Action::PlaceTile)?;
        let player = self.current_player_or_err(Action::PlaceTile)?;

        if self.tile_to_place.as_ref() != Some(&tile.tile) {
            return Err(GameError::WrongTile(tile.id()));
        }
        if tile.placer != Some(player) {
            return Err(GameError::WrongPlacer);
        }
        if tile.occupant.is_some() {
            return Err(GameError::TileAlreadyOccupied(tile.id()));
        }

        let pos = tile.pos;
        let special = tile.special_power_zone();
        let mut board = self.board.with_new_tile(tile)?;
        let mut message_board = self.message_board.clone();
        let shaman = matches!(&special, Some(zone) if zone.special_power() == Some(SpecialPower::Shaman));

        match special {
            Some(Zone::Meadow(meadow)) if meadow.special_power == Some(SpecialPower::HuntingTrap) => {
                let adjacent = board.adjacent_meadow(pos, &meadow)?;
                let animals = adjacent.animals(board.cancelled_animals());
                let mut cancelled = board.cancelled_animals().clone();
                cancelled.extend(eaten_deer(&animals, |_| true));
                message_board = message_board.with_scored_hunting_trap(player, &adjacent, &cancelled);
                board = board.with_more_cancelled_animals(adjacent.animals(&OrdSet::new()));
            }
            Some(Zone::Lake(lake)) if lake.special_power == Some(SpecialPower::Logboat) => {
                let system = board.river_system_area(&Water::Lake(lake))?;
                message_board = message_board.with_scored_logboat(player, system);
            }
            _ => {}
        }

        let forests = board.forests_closed_by_last_tile();
        let rivers = board.rivers_closed_by_last_tile();
        for forest in &forests {
            message_board = message_board.with_scored_forest(forest);
        }
        for river in &rivers {
            message_board = message_board.with_scored_river(river);
        }
        let board = board.without_gatherers_or_fishers_in(&forests, &rivers)?;

        let state = GameState {
            tile_to_place: None,
            board,
            message_board,
            ..self.clone()
        };
        if shaman && state.board.occupant_count(player, OccupantKind::Pawn) > 0 {
            return Ok(GameState {
                next_action: Action::RetakePawn,
                ..state
            });
        }
        state.with_occupation_or_turn_finished()
    }

    /// Take back `occupant`, a pawn on the board, or nothing.
    ///
    /// The game then waits for the occupant of the tile just placed, unless
    /// no occupant can go on it: the turn then ends at once.
    pub fn with_occupant_removed(&self, occupant: Option<Occupant>) -> Result<GameState, GameError> {
        self.ensure_next_action(Action::RetakePawn)?;

        let board = match occupant {
            Some(occupant) => {
                if occupant.kind != OccupantKind::Pawn || !self.board.occupants().contains(&occupant) {
                    return Err(GameError::NotAPawnOnBoard(occupant));
                }
                self.board.without_occupant(occupant)?
            }
            None => self.board.clone(),
        };

        GameState {
            board,
            ..self.clone()
        }
        .with_occupation_or_turn_finished()
    }

    /// Put `occupant` on the last placed tile, or nothing, then end the turn.
    pub fn with_new_occupant(&self, occupant: Option<Occupant>) -> Result<GameState, GameError> {
        self.ensure_next_action(Action::OccupyTile)?;

        let board = match occupant {
            Some(occupant) => {
                if !self.last_tile_potential_occupants().contains(&occupant) {
                    return Err(GameError::IllegalOccupant(occupant));
                }
                self.board.with_occupant(occupant)?
            }
            None => self.board.clone(),
        };

        GameState {
            board,
            ..self.clone()
        }
        .with_turn_finished()
    }

    // === Turn bookkeeping ===

    fn with_occupation_or_turn_finished(self) -> Result<GameState, GameError> {
        if self.last_tile_potential_occupants().is_empty() {
            self.with_turn_finished()
        } else {
            Ok(GameState {
                next_action: Action::OccupyTile,
                ..self
            })
        }
    }

    fn with_turn_finished(self) -> Result<GameState, GameError> {
        let last_was_normal = self
            .board
            .last_placed_tile()
            .is_some_and(|tile| tile.kind() == TileKind::Normal);
        let menhir_forest = self
            .board
            .forests_closed_by_last_tile()
            .into_iter()
            .find(|forest| forest.has_menhir());

        let mut state = self;
        if let (true, Some(forest)) = (last_was_normal, menhir_forest) {
            let player = state.current_player_or_err(Action::OccupyTile)?;
            let decks = state
                .tile_decks
                .with_top_tile_drawn_until(TileKind::Menhir, |tile| state.board.could_place_tile(tile));
            if let Some(tile) = decks.top_tile(TileKind::Menhir).cloned() {
                state.message_board = state.message_board.with_closed_forest_with_menhir(player, &forest);
                state.tile_decks = decks.with_top_tile_drawn(TileKind::Menhir)?;
                state.tile_to_place = Some(tile);
                state.next_action = Action::PlaceTile;
                return Ok(state);
            }
            state.tile_decks = decks;
        }

        state.with_next_normal_tile(true)
    }

    /// Draw the next placeable normal tile for the next player, or end the game.
    fn with_next_normal_tile(self, rotate_players: bool) -> Result<GameState, GameError> {
        let decks = self
            .tile_decks
            .with_top_tile_drawn_until(TileKind::Normal, |tile| self.board.could_place_tile(tile));

        let Some(tile) = decks.top_tile(TileKind::Normal).cloned() else {
            return Ok(GameState {
                tile_decks: decks,
                ..self
            }
            .with_final_points_counted());
        };

        let mut players = self.players.clone();
        if rotate_players {
            players.rotate_left(1);
        }
        Ok(GameState {
            players,
            tile_decks: decks.with_top_tile_drawn(TileKind::Normal)?,
            tile_to_place: Some(tile),
            next_action: Action::PlaceTile,
            ..self
        })
    }

    fn with_final_points_counted(self) -> GameState {
        let mut board = self.board.clone();
        let mut message_board = self.message_board.clone();

        for meadow in self.board.meadow_areas() {
            let animals = meadow.animals(self.board.cancelled_animals());
            let pit_trap = meadow
                .zone_with_special_power(SpecialPower::PitTrap)
                .and_then(|pit| self.pit_trap_meadow(pit));

            let eaten = if meadow.zone_with_special_power(SpecialPower::WildFire).is_some() {
                Vec::new()
            } else if let Some(adjacent) = &pit_trap {
                let near = adjacent.animals(&OrdSet::new());
                eaten_deer(&animals, |deer| !near.contains(deer))
            } else {
                eaten_deer(&animals, |_| true)
            };

            let mut cancelled = self.board.cancelled_animals().clone();
            cancelled.extend(eaten.iter().copied());
            board = board.with_more_cancelled_animals(eaten);

            message_board = message_board.with_scored_meadow(meadow, &cancelled);
            if let Some(adjacent) = &pit_trap {
                message_board = message_board.with_scored_pit_trap(adjacent, &cancelled);
            }
        }

        for river_system in self.board.river_system_areas() {
            if river_system.zone_with_special_power(SpecialPower::Raft).is_some() {
                message_board = message_board.with_scored_raft(river_system);
            }
            message_board = message_board.with_scored_river_system(river_system);
        }

        let points = message_board.points();
        let best = self
            .players
            .iter()
            .map(|player| points.get(player).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        let winners: BTreeSet<PlayerColor> = self
            .players
            .iter()
            .copied()
            .filter(|player| points.get(player).copied().unwrap_or(0) == best)
            .collect();
        message_board = message_board.with_winners(&winners, best);

        tracing::info!(
            target: "neolithic::game",
            winners = ?winners,
            points = best,
            "game.ended"
        );

        GameState {
            tile_to_place: None,
            board,
            next_action: Action::EndGame,
            message_board,
            ..self
        }
    }

    /// The meadow next to the pit trap zone `pit`.
    fn pit_trap_meadow(&self, pit: &Meadow) -> Option<Area<Meadow>> {
        let pos = self.board.tile_with_id(pit.tile_id()).ok()?.pos;
        self.board.adjacent_meadow(pos, pit).ok()
    }
}

/// Deer eaten by the tigers among `animals`, one per tiger. Deer for which
/// `eaten_first` holds are picked before the others.
fn eaten_deer(animals: &BTreeSet<Animal>, eaten_first: impl Fn(&Animal) -> bool) -> Vec<Animal> {
    let tigers = animals.iter().filter(|a| a.kind == AnimalKind::Tiger).count();
    let (mut deer, others): (Vec<Animal>, Vec<Animal>) = animals
        .iter()
        .filter(|a| a.kind == AnimalKind::Deer)
        .partition(|a| eaten_first(a));
    deer.extend(others);
    deer.truncate(tigers);
    deer
}
