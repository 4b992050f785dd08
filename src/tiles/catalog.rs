//! Tile catalog for lookup by id.
//!
//! The catalog is a read-only, order-stable list: the tile at index `i` has
//! id `i`. It is usually loaded once from JSON and then shared by every game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::{Tile, TileKind};
use super::zone::TileId;

/// Catalog of every tile of the game.
///
/// ## Example
///
/// ```
/// use neolithic_rules::tiles::{sample, TileId, TileKind};
///
/// let catalog = sample::catalog();
///
/// let start = catalog.get(TileId::new(0)).unwrap();
/// assert_eq!(start.kind, TileKind::Start);
/// assert_eq!(catalog.of_kind(TileKind::Menhir).count(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct CatalogFile {
    tiles: Vec<Tile>,
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    tiles: &'a [Tile],
}

impl TileCatalog {
    /// Create a catalog, checking that every tile sits at the index of its id.
    pub fn new(tiles: Vec<Tile>) -> Result<Self, CatalogError> {
        for (index, tile) in tiles.iter().enumerate() {
            if tile.id.raw() as usize != index {
                return Err(CatalogError::IdMismatch { index, id: tile.id });
            }
        }
        Ok(Self { tiles })
    }

    /// Create a catalog from tiles already known to be ordered by id.
    pub(crate) fn from_ordered(tiles: Vec<Tile>) -> Self {
        debug_assert!(tiles.iter().enumerate().all(|(i, t)| t.id.raw() as usize == i));
        Self { tiles }
    }

    /// Load a catalog from JSON of the form `{ "tiles": [...] }`.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(data)?;
        Self::new(file.tiles)
    }

    /// Serialize the catalog in the format read by [`TileCatalog::from_json`].
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(&CatalogFileRef { tiles: &self.tiles })?)
    }

    /// Get a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.raw() as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all tiles, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tiles of one kind, ordered by id.
    pub fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(move |t| t.kind == kind)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse tile catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile at index {index} has id {id}")]
    IdMismatch { index: usize, id: TileId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::sample;

    #[test]
    fn test_lookup() {
        let catalog = sample::catalog();

        assert_eq!(catalog.len(), sample::COUNT as usize);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(TileId::new(3)).map(|t| t.id), Some(TileId::new(3)));
        assert!(catalog.get(TileId::new(99)).is_none());
    }

    #[test]
    fn test_rejects_misordered_tiles() {
        let mut tiles = sample::tiles();
        tiles.swap(1, 2);

        let err = TileCatalog::new(tiles).unwrap_err();
        assert!(matches!(err, CatalogError::IdMismatch { index: 1, .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = sample::catalog();
        let json = catalog.to_json().unwrap();
        let loaded = TileCatalog::from_json(&json).unwrap();

        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(TileCatalog::from_json("[1, 2"), Err(CatalogError::Parse(_))));
    }
}
