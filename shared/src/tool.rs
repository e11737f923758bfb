use serde::{Deserialize, Serialize};

/// Active editing tool from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Tile,
    Feature,
    Road,
    River,
    Hand,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Tile, Tool::Feature, Tool::Road, Tool::River, Tool::Hand];

    /// Grid tools track the hovered cell and draw a highlight on it.
    pub fn highlights_grid(self) -> bool {
        !matches!(self, Tool::Hand)
    }

    /// Only the tile tool writes terrain. Features, roads and rivers are
    /// placeholders for layers that do not exist yet.
    pub fn paints_terrain(self) -> bool {
        matches!(self, Tool::Tile)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Tile => "Tile Placement",
            Tool::Feature => "Features",
            Tool::Road => "Roads",
            Tool::River => "Rivers",
            Tool::Hand => "Hand (H)",
        }
    }
}

/// What a primary-button press on the map should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    Pan,
    Paint,
    Erase,
    Nothing,
}

/// Resolve a press given the tool, eraser state and whether a pan modifier
/// (Space) is held.
pub fn press_action(tool: Tool, erasing: bool, pan_modifier: bool) -> PressAction {
    if tool == Tool::Hand || pan_modifier {
        PressAction::Pan
    } else if erasing {
        PressAction::Erase
    } else if tool.paints_terrain() {
        PressAction::Paint
    } else {
        PressAction::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_is_the_only_non_grid_tool() {
        let grid: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|t| t.highlights_grid())
            .collect();
        assert_eq!(grid, vec![Tool::Tile, Tool::Feature, Tool::Road, Tool::River]);
    }

    #[test]
    fn press_resolution() {
        assert_eq!(press_action(Tool::Tile, false, false), PressAction::Paint);
        assert_eq!(press_action(Tool::Tile, true, false), PressAction::Erase);
        assert_eq!(press_action(Tool::Tile, false, true), PressAction::Pan);
        assert_eq!(press_action(Tool::Hand, true, false), PressAction::Pan);
        assert_eq!(press_action(Tool::Road, false, false), PressAction::Nothing);
        assert_eq!(press_action(Tool::River, true, false), PressAction::Erase);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tool::Hand).unwrap(), r#""hand""#);
    }
}
