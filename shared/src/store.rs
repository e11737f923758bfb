use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::hex::HexCoord;
use crate::terrain::TerrainCatalog;

/// Data held by a painted cell. Replaced wholesale on repaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub terrain: String,
}

impl Tile {
    pub fn new(terrain: impl Into<String>) -> Self {
        Self {
            terrain: terrain.into(),
        }
    }
}

/// Sparse map of painted cells. A coordinate with no entry is unpainted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileStore {
    tiles: HashMap<HexCoord, Tile>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `terrain` at `coord`, replacing whatever was there.
    pub fn paint(
        &mut self,
        coord: HexCoord,
        terrain: &str,
        catalog: &TerrainCatalog,
    ) -> Result<(), MapError> {
        if !catalog.contains(terrain) {
            tracing::warn!(%coord, terrain, "rejected paint with unknown terrain");
            return Err(MapError::InvalidTerrain(terrain.to_owned()));
        }
        self.tiles.insert(coord, Tile::new(terrain));
        Ok(())
    }

    /// Remove the tile at `coord`. Returns the removed tile, if any.
    pub fn erase(&mut self, coord: HexCoord) -> Option<Tile> {
        self.tiles.remove(&coord)
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Every painted cell, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &Tile)> + '_ {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Insert without consulting a catalog. Only persisted tiles go through here.
    pub(crate) fn insert(&mut self, coord: HexCoord, tile: Tile) {
        self.tiles.insert(coord, tile);
    }
}

impl<'a> IntoIterator for &'a TileStore {
    type Item = (&'a HexCoord, &'a Tile);
    type IntoIter = std::collections::hash_map::Iter<'a, HexCoord, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: TerrainCatalog = TerrainCatalog::standard();

    #[test]
    fn paint_then_erase_plains_at_origin() {
        let mut store = TileStore::new();
        store
            .paint(HexCoord::ORIGIN, "plains", &CATALOG)
            .expect("plains is in the catalog");
        assert_eq!(store.get(HexCoord::ORIGIN), Some(&Tile::new("plains")));

        store.erase(HexCoord::ORIGIN);
        assert_eq!(store.get(HexCoord::ORIGIN), None);
    }

    #[test]
    fn repaint_replaces_tile() {
        let mut store = TileStore::new();
        let at = HexCoord::new(3, -1);
        store.paint(at, "forest", &CATALOG).unwrap();
        store.paint(at, "water", &CATALOG).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(at).map(|t| t.terrain.as_str()), Some("water"));
    }

    #[test]
    fn painting_twice_is_idempotent() {
        let mut once = TileStore::new();
        once.paint(HexCoord::new(1, 1), "hills", &CATALOG).unwrap();
        let mut twice = once.clone();
        twice.paint(HexCoord::new(1, 1), "hills", &CATALOG).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_terrain_leaves_store_untouched() {
        let mut store = TileStore::new();
        store.paint(HexCoord::ORIGIN, "swamp", &CATALOG).unwrap();
        let before = store.clone();

        let err = store.paint(HexCoord::ORIGIN, "lava", &CATALOG);
        assert_eq!(err, Err(MapError::InvalidTerrain("lava".into())));
        assert_eq!(store, before);
    }

    #[test]
    fn erase_is_idempotent_and_absent_is_noop() {
        let mut store = TileStore::new();
        store.paint(HexCoord::new(2, 2), "desert", &CATALOG).unwrap();
        store.paint(HexCoord::new(0, 5), "desert", &CATALOG).unwrap();

        let mut once = store.clone();
        assert!(once.erase(HexCoord::new(2, 2)).is_some());
        let mut twice = once.clone();
        assert!(twice.erase(HexCoord::new(2, 2)).is_none());
        assert_eq!(once, twice);

        let mut untouched = store.clone();
        assert!(untouched.erase(HexCoord::new(-9, 9)).is_none());
        assert_eq!(untouched, store);
    }

    #[test]
    fn iter_visits_every_tile_and_restarts() {
        let mut store = TileStore::new();
        for q in -2..=2 {
            store.paint(HexCoord::new(q, -q), "forest", &CATALOG).unwrap();
        }
        let mut first: Vec<HexCoord> = store.iter().map(|(c, _)| c).collect();
        let mut second: Vec<HexCoord> = store.iter().map(|(c, _)| c).collect();
        first.sort();
        second.sort();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn tile_serializes_with_type_field() {
        let json = serde_json::to_string(&Tile::new("volcano")).unwrap();
        assert_eq!(json, r#"{"type":"volcano"}"#);
    }
}
