use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::tiles_from_entries;
use crate::error::MapError;
use crate::extent::GridExtent;
use crate::store::{Tile, TileStore};
use crate::viewport::Viewport;

/// Storage slot holding the single autosave snapshot.
pub const AUTOSAVE_KEY: &str = "hexmap-autosave";
/// Quiet period after the last edit before a snapshot is written.
pub const AUTOSAVE_DEBOUNCE_MS: u32 = 1000;

/// Session state as written to the autosave slot. Unlike the save file this
/// keeps the viewport and stores tiles as `[key, tile]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveSnapshot {
    pub tiles: Vec<(String, Tile)>,
    pub dimensions: GridExtent,
    pub viewport: Viewport,
    #[serde(rename = "lastModified", with = "ts_milliseconds")]
    pub last_modified: DateTime<Utc>,
}

/// Decoded snapshot, ready to install into a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredMap {
    pub tiles: TileStore,
    pub extent: GridExtent,
    pub viewport: Viewport,
}

impl AutosaveSnapshot {
    pub fn capture(
        tiles: &TileStore,
        extent: GridExtent,
        viewport: Viewport,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entries: Vec<_> = tiles.iter().collect();
        entries.sort_unstable_by_key(|(coord, _)| *coord);
        Self {
            tiles: entries
                .into_iter()
                .map(|(coord, tile)| (coord.key(), tile.clone()))
                .collect(),
            dimensions: extent,
            viewport,
            last_modified: now,
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse and validate a stored snapshot. Any failure is reported as
    /// [`MapError::AutosaveCorrupt`].
    pub fn decode(text: &str) -> Result<RestoredMap, MapError> {
        let snapshot: Self =
            serde_json::from_str(text).map_err(|e| MapError::AutosaveCorrupt(e.to_string()))?;
        snapshot.restore()
    }

    pub fn restore(self) -> Result<RestoredMap, MapError> {
        let extent = GridExtent::new(self.dimensions.width, self.dimensions.height)
            .ok_or_else(|| {
                MapError::AutosaveCorrupt(format!(
                    "dimensions {}x{} are out of range",
                    self.dimensions.width, self.dimensions.height
                ))
            })?;
        let tiles = tiles_from_entries(
            self.tiles
                .iter()
                .map(|(key, tile)| (key.as_str(), tile.clone())),
        )
        .map_err(|e| MapError::AutosaveCorrupt(e.to_string()))?;
        Ok(RestoredMap {
            tiles,
            extent,
            viewport: self.viewport.clamped(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;
    use crate::terrain::TerrainCatalog;

    const CATALOG: TerrainCatalog = TerrainCatalog::standard();

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn snapshot_round_trips_session_state() {
        let mut tiles = TileStore::new();
        tiles.paint(HexCoord::new(2, -1), "swamp", &CATALOG).unwrap();
        tiles.paint(HexCoord::new(-4, 0), "hills", &CATALOG).unwrap();
        let extent = GridExtent::new(25, 30).unwrap();
        let viewport = Viewport {
            pan_x: -120.0,
            pan_y: 44.5,
            scale: 1.5,
        };

        let text = AutosaveSnapshot::capture(&tiles, extent, viewport, now())
            .encode()
            .unwrap();
        let restored = AutosaveSnapshot::decode(&text).unwrap();
        assert_eq!(
            restored,
            RestoredMap {
                tiles,
                extent,
                viewport
            }
        );
    }

    #[test]
    fn wire_shape_uses_pairs_and_last_modified() {
        let mut tiles = TileStore::new();
        tiles.paint(HexCoord::ORIGIN, "plains", &CATALOG).unwrap();
        let snapshot =
            AutosaveSnapshot::capture(&tiles, GridExtent::DEFAULT, Viewport::default(), now());
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value["tiles"],
            serde_json::json!([["0,0", { "type": "plains" }]])
        );
        assert_eq!(value["lastModified"], 1_700_000_000_000i64);
        assert_eq!(value["viewport"]["scale"], 1.0);
    }

    #[test]
    fn garbage_is_corrupt() {
        for text in ["", "not json", "{}", r#"{"tiles":[],"dimensions":{"width":1}}"#] {
            assert!(
                matches!(
                    AutosaveSnapshot::decode(text),
                    Err(MapError::AutosaveCorrupt(_))
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn bad_key_is_corrupt_not_malformed() {
        let text = r#"{
            "tiles": [["x,y", {"type": "plains"}]],
            "dimensions": {"width": 20, "height": 20},
            "viewport": {"x": 0, "y": 0, "scale": 1},
            "lastModified": 0
        }"#;
        assert!(matches!(
            AutosaveSnapshot::decode(text),
            Err(MapError::AutosaveCorrupt(_))
        ));
    }

    #[test]
    fn oversized_dimensions_are_corrupt() {
        let text = r#"{
            "tiles": [],
            "dimensions": {"width": 4294967295, "height": 20},
            "viewport": {"x": 0, "y": 0, "scale": 1},
            "lastModified": 0
        }"#;
        assert!(matches!(
            AutosaveSnapshot::decode(text),
            Err(MapError::AutosaveCorrupt(_))
        ));
    }

    #[test]
    fn repeated_cell_is_corrupt() {
        let text = r#"{
            "tiles": [["1,2", {"type": "plains"}], ["1, 2", {"type": "water"}]],
            "dimensions": {"width": 20, "height": 20},
            "viewport": {"x": 0, "y": 0, "scale": 1},
            "lastModified": 0
        }"#;
        assert!(matches!(
            AutosaveSnapshot::decode(text),
            Err(MapError::AutosaveCorrupt(_))
        ));
    }

    #[test]
    fn stored_scale_is_clamped_on_restore() {
        let text = r#"{
            "tiles": [],
            "dimensions": {"width": 20, "height": 20},
            "viewport": {"x": 5, "y": 6, "scale": 12},
            "lastModified": 0
        }"#;
        let restored = AutosaveSnapshot::decode(text).unwrap();
        assert_eq!(restored.viewport.scale, crate::viewport::MAX_SCALE);
        assert_eq!((restored.viewport.pan_x, restored.viewport.pan_y), (5.0, 6.0));
    }
}
