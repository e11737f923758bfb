pub mod autosave;
pub mod document;
pub mod error;
pub mod extent;
pub mod hex;
pub mod render;
pub mod session;
pub mod store;
pub mod terrain;
pub mod tool;
pub mod viewport;

pub use autosave::{AUTOSAVE_DEBOUNCE_MS, AUTOSAVE_KEY, AutosaveSnapshot, RestoredMap};
pub use document::{MapDocument, Metadata};
pub use error::MapError;
pub use extent::{Expansion, GridExtent, HexRange};
pub use hex::{HEX_HEIGHT, HEX_SIZE, HEX_WIDTH, HexCoord};
pub use render::{Decorator, NoDecoration, SceneInput, Stroke, Surface};
pub use session::MapSession;
pub use store::{Tile, TileStore};
pub use terrain::{DEFAULT_TERRAIN, PatternKind, Terrain, TerrainCatalog};
pub use tool::{PressAction, Tool};
pub use viewport::Viewport;
