//! Score messages and the board that collects them.
//!
//! Every scoring event produces a [`Message`] carrying the points, the
//! players who earned them and the tiles involved. Its display text comes
//! from a [`TextMaker`]; the engine never looks at the text.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use im::{OrdSet, Vector};

use super::points;
use crate::core::PlayerColor;
use crate::tiles::{Animal, AnimalKind, Forest, Meadow, River, TileId, Water};
use crate::zones::{animal_counts, Area};

/// Produces the display text of score messages.
///
/// Implementations provide localisation. Scorer sets are never empty except
/// where noted.
pub trait TextMaker: Send + Sync {
    fn players_scored_forest(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String;

    fn players_scored_river(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String;

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String;

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String;

    fn players_scored_meadow(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn players_scored_river_system(&self, scorers: &BTreeSet<PlayerColor>, points: u32, fish_count: u32) -> String;

    fn players_scored_pit_trap(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn players_scored_raft(&self, scorers: &BTreeSet<PlayerColor>, points: u32, lake_count: u32) -> String;

    fn players_won(&self, winners: &BTreeSet<PlayerColor>, points: u32) -> String;
}

/// English messages, for tests and tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextMaker;

impl PlainTextMaker {
    fn names(players: &BTreeSet<PlayerColor>) -> String {
        let names: Vec<String> = players.iter().map(ToString::to_string).collect();
        match names.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
        }
    }

    fn animals(animals: &BTreeMap<AnimalKind, u32>) -> String {
        if animals.is_empty() {
            return "no animal".to_string();
        }
        let parts: Vec<String> = animals
            .iter()
            .map(|(kind, count)| format!("{count} {kind:?}"))
            .collect();
        parts.join(", ")
    }

    fn verb(players: &BTreeSet<PlayerColor>) -> &'static str {
        if players.len() > 1 {
            "score"
        } else {
            "scores"
        }
    }
}

impl TextMaker for PlainTextMaker {
    fn players_scored_forest(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String {
        format!(
            "{} {} {points} points for a forest of {tile_count} tiles with {mushroom_group_count} mushroom groups",
            Self::names(scorers),
            Self::verb(scorers)
        )
    }

    fn players_scored_river(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String {
        format!(
            "{} {} {points} points for a river of {tile_count} tiles with {fish_count} fish",
            Self::names(scorers),
            Self::verb(scorers)
        )
    }

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String {
        format!("{player} closed a forest with a menhir and plays again")
    }

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{scorer} scores {points} points with the hunting trap ({})",
            Self::animals(animals)
        )
    }

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String {
        format!("{scorer} scores {points} points with the logboat ({lake_count} lakes)")
    }

    fn players_scored_meadow(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{} {} {points} points for a meadow ({})",
            Self::names(scorers),
            Self::verb(scorers),
            Self::animals(animals)
        )
    }

    fn players_scored_river_system(&self, scorers: &BTreeSet<PlayerColor>, points: u32, fish_count: u32) -> String {
        format!(
            "{} {} {points} points for a river system with {fish_count} fish",
            Self::names(scorers),
            Self::verb(scorers)
        )
    }

    fn players_scored_pit_trap(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{} {} {points} points with the pit trap ({})",
            Self::names(scorers),
            Self::verb(scorers),
            Self::animals(animals)
        )
    }

    fn players_scored_raft(&self, scorers: &BTreeSet<PlayerColor>, points: u32, lake_count: u32) -> String {
        format!(
            "{} {} {points} points with the raft ({lake_count} lakes)",
            Self::names(scorers),
            Self::verb(scorers)
        )
    }

    fn players_won(&self, winners: &BTreeSet<PlayerColor>, points: u32) -> String {
        let verb = if winners.len() > 1 { "win" } else { "wins" };
        format!("{} {verb} with {points} points", Self::names(winners))
    }
}

/// One scoring event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub points: u32,
    pub scorers: BTreeSet<PlayerColor>,
    pub tile_ids: BTreeSet<TileId>,
}

/// All score messages of a game, in order.
///
/// Equality ignores the text maker.
#[derive(Clone)]
pub struct MessageBoard {
    text_maker: Arc<dyn TextMaker>,
    messages: Vector<Message>,
}

impl fmt::Debug for MessageBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBoard")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl PartialEq for MessageBoard {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
    }
}

impl Eq for MessageBoard {}

impl MessageBoard {
    #[must_use]
    pub fn new(text_maker: Arc<dyn TextMaker>) -> Self {
        Self {
            text_maker,
            messages: Vector::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &Vector<Message> {
        &self.messages
    }

    #[must_use]
    pub fn text_maker(&self) -> &Arc<dyn TextMaker> {
        &self.text_maker
    }

    /// Total points of every player who scored at least once.
    #[must_use]
    pub fn points(&self) -> BTreeMap<PlayerColor, u32> {
        let mut totals = BTreeMap::new();
        for message in &self.messages {
            for &scorer in &message.scorers {
                *totals.entry(scorer).or_default() += message.points;
            }
        }
        totals
    }

    fn with_message(
        &self,
        text: String,
        points: u32,
        scorers: BTreeSet<PlayerColor>,
        tile_ids: BTreeSet<TileId>,
    ) -> MessageBoard {
        tracing::info!(
            target: "neolithic::score",
            points,
            scorers = ?scorers,
            text = %text,
            "message_board.added"
        );
        let mut board = self.clone();
        board.messages.push_back(Message {
            text,
            points,
            scorers,
            tile_ids,
        });
        board
    }

    /// Score a closed forest for its majority occupants, if any.
    #[must_use]
    pub fn with_scored_forest(&self, forest: &Area<Forest>) -> MessageBoard {
        if !forest.is_occupied() {
            return self.clone();
        }
        let scorers = forest.majority_occupants();
        let tile_ids = forest.tile_ids();
        let tile_count = tile_ids.len() as u32;
        let mushrooms = forest.mushroom_group_count();
        let points = points::for_closed_forest(tile_count, mushrooms);
        let text = self
            .text_maker
            .players_scored_forest(&scorers, points, mushrooms, tile_count);
        self.with_message(text, points, scorers, tile_ids)
    }

    /// Note that `player` closed a forest holding a menhir. Worth no points.
    #[must_use]
    pub fn with_closed_forest_with_menhir(&self, player: PlayerColor, forest: &Area<Forest>) -> MessageBoard {
        let text = self.text_maker.player_closed_forest_with_menhir(player);
        self.with_message(text, 0, BTreeSet::new(), forest.tile_ids())
    }

    /// Score a closed river for its majority occupants, if any.
    #[must_use]
    pub fn with_scored_river(&self, river: &Area<River>) -> MessageBoard {
        if !river.is_occupied() {
            return self.clone();
        }
        let scorers = river.majority_occupants();
        let tile_ids = river.tile_ids();
        let tile_count = tile_ids.len() as u32;
        let fish = river.fish_count();
        let points = points::for_closed_river(tile_count, fish);
        let text = self.text_maker.players_scored_river(&scorers, points, fish, tile_count);
        self.with_message(text, points, scorers, tile_ids)
    }

    /// Score the animals of the meadow next to a hunting trap for `scorer`.
    #[must_use]
    pub fn with_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        adjacent_meadow: &Area<Meadow>,
        cancelled: &OrdSet<Animal>,
    ) -> MessageBoard {
        let animals = animal_counts(&adjacent_meadow.animals(cancelled));
        let points = meadow_points(&animals);
        if points == 0 {
            return self.clone();
        }
        let text = self.text_maker.player_scored_hunting_trap(scorer, points, &animals);
        self.with_message(text, points, BTreeSet::from([scorer]), adjacent_meadow.tile_ids())
    }

    /// Score the lakes of the logboat's river system for `scorer`.
    #[must_use]
    pub fn with_scored_logboat(&self, scorer: PlayerColor, river_system: &Area<Water>) -> MessageBoard {
        let lakes = river_system.lake_count();
        let points = points::for_logboat(lakes);
        let text = self.text_maker.player_scored_logboat(scorer, points, lakes);
        self.with_message(text, points, BTreeSet::from([scorer]), river_system.tile_ids())
    }

    /// Score a meadow at the end of the game for its majority occupants.
    #[must_use]
    pub fn with_scored_meadow(&self, meadow: &Area<Meadow>, cancelled: &OrdSet<Animal>) -> MessageBoard {
        if !meadow.is_occupied() {
            return self.clone();
        }
        let animals = animal_counts(&meadow.animals(cancelled));
        let points = meadow_points(&animals);
        if points == 0 {
            return self.clone();
        }
        let scorers = meadow.majority_occupants();
        let text = self.text_maker.players_scored_meadow(&scorers, points, &animals);
        self.with_message(text, points, scorers, meadow.tile_ids())
    }

    /// Score a river system at the end of the game for its majority occupants.
    #[must_use]
    pub fn with_scored_river_system(&self, river_system: &Area<Water>) -> MessageBoard {
        if !river_system.is_occupied() {
            return self.clone();
        }
        let fish = river_system.river_system_fish_count();
        let points = points::for_river_system(fish);
        if points == 0 {
            return self.clone();
        }
        let scorers = river_system.majority_occupants();
        let text = self.text_maker.players_scored_river_system(&scorers, points, fish);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Score the animals next to a pit trap for the majority occupants of its meadow.
    #[must_use]
    pub fn with_scored_pit_trap(&self, adjacent_meadow: &Area<Meadow>, cancelled: &OrdSet<Animal>) -> MessageBoard {
        if !adjacent_meadow.is_occupied() {
            return self.clone();
        }
        let animals = animal_counts(&adjacent_meadow.animals(cancelled));
        let points = meadow_points(&animals);
        if points == 0 {
            return self.clone();
        }
        let scorers = adjacent_meadow.majority_occupants();
        let text = self.text_maker.players_scored_pit_trap(&scorers, points, &animals);
        self.with_message(text, points, scorers, adjacent_meadow.tile_ids())
    }

    /// Score the lakes of the raft's river system for its majority occupants.
    #[must_use]
    pub fn with_scored_raft(&self, river_system: &Area<Water>) -> MessageBoard {
        if !river_system.is_occupied() {
            return self.clone();
        }
        let lakes = river_system.lake_count();
        let points = points::for_raft(lakes);
        let scorers = river_system.majority_occupants();
        let text = self.text_maker.players_scored_raft(&scorers, points, lakes);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Announce the winners. Adds no points.
    #[must_use]
    pub fn with_winners(&self, winners: &BTreeSet<PlayerColor>, points: u32) -> MessageBoard {
        let text = self.text_maker.players_won(winners, points);
        self.with_message(text, 0, BTreeSet::new(), BTreeSet::new())
    }
}

fn meadow_points(animals: &BTreeMap<AnimalKind, u32>) -> u32 {
    let count = |kind| animals.get(&kind).copied().unwrap_or(0);
    points::for_meadow(
        count(AnimalKind::Mammoth),
        count(AnimalKind::Aurochs),
        count(AnimalKind::Deer),
    )
}
