use chrono::{DateTime, Utc};

use crate::autosave::AutosaveSnapshot;
use crate::document::{self, MapDocument, Metadata};
use crate::error::MapError;
use crate::extent::{Expansion, GridExtent};
use crate::hex::{HEX_SIZE, HexCoord, pixel_to_hex};
use crate::store::{Tile, TileStore};
use crate::terrain::TerrainCatalog;
use crate::viewport::{Viewport, zoom_for_wheel};

/// One open map: the tiles, their declared extent and the view onto them.
///
/// Every mutation goes through a method here so that a failed operation can
/// leave all three pieces exactly as they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSession {
    tiles: TileStore,
    extent: GridExtent,
    viewport: Viewport,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> &TileStore {
        &self.tiles
    }

    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Paint a cell, growing the declared extent when the cell sits on its edge.
    pub fn paint_at(
        &mut self,
        coord: HexCoord,
        terrain: &str,
        catalog: &TerrainCatalog,
    ) -> Result<(), MapError> {
        self.tiles.paint(coord, terrain, catalog)?;
        let grown = self.extent.grow();
        if self.extent.should_grow(coord) && grown != self.extent {
            tracing::debug!(
                %coord,
                from = ?self.extent,
                to = ?grown,
                "auto-grew map extent"
            );
            self.extent = grown;
        }
        Ok(())
    }

    pub fn erase_at(&mut self, coord: HexCoord) -> Option<Tile> {
        self.tiles.erase(coord)
    }

    pub fn expand(&mut self, by: Expansion) -> Result<(), MapError> {
        let expanded = self.extent.expand(by)?;
        tracing::debug!(from = ?self.extent, to = ?expanded, "expanded map extent");
        self.extent = expanded;
        Ok(())
    }

    /// Start a fresh map: no tiles, default extent, identity view.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Cell under a point in canvas pixels.
    pub fn hex_at_screen(&self, sx: f64, sy: f64, canvas_width: f64, canvas_height: f64) -> HexCoord {
        let (wx, wy) = self
            .viewport
            .screen_to_world(sx, sy, (canvas_width / 2.0, canvas_height / 2.0));
        pixel_to_hex(wx, wy, HEX_SIZE)
    }

    /// Wheel input: zoom with a modifier held, otherwise scroll the map.
    pub fn apply_wheel(&mut self, delta_x: f64, delta_y: f64, zoom_modifier: bool) {
        if zoom_modifier {
            self.viewport.zoom_by(zoom_for_wheel(delta_y));
        } else {
            self.viewport.pan(-delta_x, -delta_y);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_step(&mut self, delta: f64) {
        self.viewport.zoom_step(delta);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Replace the map with a save file. On error nothing changes.
    pub fn load_document(&mut self, text: &str) -> Result<(), MapError> {
        let (tiles, extent) = document::load(text)?;
        tracing::info!(tiles = tiles.len(), ?extent, "loaded map document");
        self.tiles = tiles;
        self.extent = extent;
        self.viewport.reset();
        Ok(())
    }

    pub fn to_document(&self, name: &str, now: DateTime<Utc>) -> MapDocument {
        MapDocument::serialize(&self.tiles, self.extent, Metadata::new(name, now))
    }

    pub fn autosave_snapshot(&self, now: DateTime<Utc>) -> AutosaveSnapshot {
        AutosaveSnapshot::capture(&self.tiles, self.extent, self.viewport, now)
    }

    /// Install a stored autosave. A corrupt snapshot is logged and the session
    /// is left untouched.
    pub fn restore_autosave(&mut self, text: &str) -> Result<(), MapError> {
        match AutosaveSnapshot::decode(text) {
            Ok(restored) => {
                self.tiles = restored.tiles;
                self.extent = restored.extent;
                self.viewport = restored.viewport;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring autosave");
                Err(e)
            }
        }
    }
}
