//! The three tile decks: start, normal and menhir.

use im::Vector;

use crate::core::{GameError, GameRng};
use crate::tiles::{Tile, TileCatalog, TileKind};

/// Tiles still to be drawn, one deck per tile kind. The top of a deck is its
/// first element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileDecks {
    start: Vector<Tile>,
    normal: Vector<Tile>,
    menhir: Vector<Tile>,
}

impl TileDecks {
    #[must_use]
    pub fn new(
        start: impl IntoIterator<Item = Tile>,
        normal: impl IntoIterator<Item = Tile>,
        menhir: impl IntoIterator<Item = Tile>,
    ) -> Self {
        Self {
            start: start.into_iter().collect(),
            normal: normal.into_iter().collect(),
            menhir: menhir.into_iter().collect(),
        }
    }

    /// Decks holding every tile of `catalog`, shuffled with `rng`. The
    /// start deck is not shuffled.
    #[must_use]
    pub fn shuffled(catalog: &TileCatalog, rng: &mut GameRng) -> Self {
        let deck = |kind: TileKind, rng: &mut GameRng| -> Vec<Tile> {
            let mut tiles: Vec<Tile> = catalog.of_kind(kind).cloned().collect();
            if kind != TileKind::Start {
                rng.shuffle(&mut tiles);
            }
            tiles
        };
        let start = deck(TileKind::Start, rng);
        let normal = deck(TileKind::Normal, rng);
        let menhir = deck(TileKind::Menhir, rng);
        Self::new(start, normal, menhir)
    }

    fn deck(&self, kind: TileKind) -> &Vector<Tile> {
        match kind {
            TileKind::Start => &self.start,
            TileKind::Normal => &self.normal,
            TileKind::Menhir => &self.menhir,
        }
    }

    fn deck_mut(&mut self, kind: TileKind) -> &mut Vector<Tile> {
        match kind {
            TileKind::Start => &mut self.start,
            TileKind::Normal => &mut self.normal,
            TileKind::Menhir => &mut self.menhir,
        }
    }

    #[must_use]
    pub fn deck_size(&self, kind: TileKind) -> usize {
        self.deck(kind).len()
    }

    #[must_use]
    pub fn top_tile(&self, kind: TileKind) -> Option<&Tile> {
        self.deck(kind).front()
    }

    /// Same decks without the top tile of `kind`.
    pub fn with_top_tile_drawn(&self, kind: TileKind) -> Result<TileDecks, GameError> {
        if self.deck(kind).is_empty() {
            return Err(GameError::EmptyDeck(kind));
        }
        let mut decks = self.clone();
        decks.deck_mut(kind).pop_front();
        Ok(decks)
    }

    /// Same decks with top tiles of `kind` discarded until the top one
    /// satisfies `predicate`, or the deck is empty.
    #[must_use]
    pub fn with_top_tile_drawn_until(&self, kind: TileKind, predicate: impl Fn(&Tile) -> bool) -> TileDecks {
        let mut decks = self.clone();
        let deck = decks.deck_mut(kind);
        while deck.front().is_some_and(|tile| !predicate(tile)) {
            deck.pop_front();
        }
        decks
    }
}
