use std::collections::BTreeMap;

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::extent::{GridExtent, MAX_DIMENSION};
use crate::hex::HexCoord;
use crate::store::{Tile, TileStore};

pub const FORMAT_VERSION: &str = "1.0";
pub const DEFAULT_MAP_NAME: &str = "Hex Map";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(with = "ts_milliseconds")]
    pub created: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub modified: DateTime<Utc>,
    pub name: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            created: DateTime::<Utc>::default(),
            modified: DateTime::<Utc>::default(),
            name: DEFAULT_MAP_NAME.to_owned(),
        }
    }
}

impl Metadata {
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            created: now,
            modified: now,
            name: name.into(),
        }
    }
}

/// On-disk save file. Tiles are keyed by `"q,r"` strings; a `BTreeMap` keeps
/// the written file stable between saves of the same map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default = "default_version")]
    pub version: String,
    pub dimensions: GridExtent,
    pub tiles: BTreeMap<String, Tile>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_version() -> String {
    FORMAT_VERSION.to_owned()
}

impl MapDocument {
    /// Build a document from live map state.
    pub fn serialize(tiles: &TileStore, extent: GridExtent, metadata: Metadata) -> Self {
        Self {
            version: FORMAT_VERSION.to_owned(),
            dimensions: extent,
            tiles: tiles
                .iter()
                .map(|(coord, tile)| (coord.key(), tile.clone()))
                .collect(),
            metadata,
        }
    }

    /// Parse document keys back into a store. Fails without partial output.
    pub fn deserialize(&self) -> Result<(TileStore, GridExtent), MapError> {
        let extent = GridExtent::new(self.dimensions.width, self.dimensions.height)
            .ok_or_else(|| {
                MapError::malformed(format!(
                    "dimensions {}x{} must both be between 1 and {MAX_DIMENSION}",
                    self.dimensions.width, self.dimensions.height
                ))
            })?;
        let tiles = tiles_from_entries(
            self.tiles
                .iter()
                .map(|(key, tile)| (key.as_str(), tile.clone())),
        )?;
        Ok((tiles, extent))
    }

    pub fn from_json(text: &str) -> Result<Self, MapError> {
        serde_json::from_str(text).map_err(|e| MapError::malformed(e.to_string()))
    }

    /// The save-file format: two-space indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse and decode a save file in one step.
pub fn load(text: &str) -> Result<(TileStore, GridExtent), MapError> {
    MapDocument::from_json(text)?.deserialize()
}

pub(crate) fn tiles_from_entries<'a>(
    entries: impl IntoIterator<Item = (&'a str, Tile)>,
) -> Result<TileStore, MapError> {
    let mut store = TileStore::new();
    for (key, tile) in entries {
        let coord = HexCoord::parse_key(key)?;
        if store.get(coord).is_some() {
            return Err(MapError::malformed(format!(
                "tile key `{key}` repeats cell {coord}"
            )));
        }
        store.insert(coord, tile);
    }
    Ok(store)
}

pub fn json_file_name(now: DateTime<Utc>) -> String {
    format!("hexmap-{}.json", now.timestamp_millis())
}

pub fn png_file_name(now: DateTime<Utc>) -> String {
    format!("hexmap-{}.png", now.timestamp_millis())
}
