/// Decorative brush drawn on top of a terrain's fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Solid,
    Farmland,
    Trees,
    DenseTrees,
    Wavy,
    Peaks,
    LargePeak,
    Volcano,
    Waves,
    ShallowWaves,
    RoughWaves,
    Dots,
    Reeds,
}

impl PatternKind {
    pub fn is_solid(self) -> bool {
        self == Self::Solid
    }
}

/// One entry of the terrain catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terrain {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS colour of the hex fill.
    pub color: &'static str,
    pub pattern: PatternKind,
}

pub const DEFAULT_TERRAIN: &str = "plains";

pub const STANDARD_TERRAIN: &[Terrain] = &[
    Terrain {
        id: "plains",
        name: "Plains",
        color: "#9ACD32",
        pattern: PatternKind::Solid,
    },
    Terrain {
        id: "farmland",
        name: "Farmland",
        color: "#9ACD32",
        pattern: PatternKind::Farmland,
    },
    Terrain {
        id: "forest",
        name: "Forest",
        color: "#228B22",
        pattern: PatternKind::Trees,
    },
    Terrain {
        id: "dense-forest",
        name: "Dense Forest",
        color: "#1a5c1a",
        pattern: PatternKind::DenseTrees,
    },
    Terrain {
        id: "hills",
        name: "Hills",
        color: "#D2B48C",
        pattern: PatternKind::Wavy,
    },
    Terrain {
        id: "mountain-range",
        name: "Mountain Range",
        color: "#8B7355",
        pattern: PatternKind::Peaks,
    },
    Terrain {
        id: "large-mountain",
        name: "Large Mountain",
        color: "#6B5344",
        pattern: PatternKind::LargePeak,
    },
    Terrain {
        id: "volcano",
        name: "Volcano",
        color: "#8B4513",
        pattern: PatternKind::Volcano,
    },
    Terrain {
        id: "water",
        name: "Water",
        color: "#4682B4",
        pattern: PatternKind::Waves,
    },
    Terrain {
        id: "shallow-water",
        name: "Shallow Water",
        color: "#87CEEB",
        pattern: PatternKind::ShallowWaves,
    },
    Terrain {
        id: "deep-water",
        name: "Deep Water",
        color: "#1e3a5f",
        pattern: PatternKind::RoughWaves,
    },
    Terrain {
        id: "desert",
        name: "Desert/Beach",
        color: "#F4E4A6",
        pattern: PatternKind::Dots,
    },
    Terrain {
        id: "swamp",
        name: "Swamp",
        color: "#5a6b5a",
        pattern: PatternKind::Reeds,
    },
];

/// Static lookup table of paintable terrain. Adding a terrain means adding a
/// row to the table handed to [`TerrainCatalog::new`].
#[derive(Debug, Clone, Copy)]
pub struct TerrainCatalog {
    entries: &'static [Terrain],
}

impl TerrainCatalog {
    pub const fn new(entries: &'static [Terrain]) -> Self {
        Self { entries }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_TERRAIN)
    }

    pub fn find(&self, id: &str) -> Option<&'static Terrain> {
        self.entries.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'static, Terrain> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn standard_catalog_has_unique_ids() {
        let catalog = TerrainCatalog::standard();
        let ids: HashSet<&str> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn find_by_id() {
        let catalog = TerrainCatalog::standard();
        let forest = catalog.find("forest").map(|t| (t.name, t.color, t.pattern));
        assert_eq!(forest, Some(("Forest", "#228B22", PatternKind::Trees)));
        assert!(catalog.find("lava").is_none());
        assert!(catalog.contains(DEFAULT_TERRAIN));
    }

    #[test]
    fn only_plains_is_unpatterned() {
        let solid: Vec<&str> = TerrainCatalog::standard()
            .iter()
            .filter(|t| t.pattern.is_solid())
            .map(|t| t.id)
            .collect();
        assert_eq!(solid, vec!["plains"]);
    }

    #[test]
    fn custom_table_replaces_stock_entries() {
        static ONLY_ICE: &[Terrain] = &[Terrain {
            id: "ice",
            name: "Ice",
            color: "#e0f4ff",
            pattern: PatternKind::Solid,
        }];
        let catalog = TerrainCatalog::new(ONLY_ICE);
        assert!(catalog.contains("ice"));
        assert!(!catalog.contains("plains"));
    }
}
