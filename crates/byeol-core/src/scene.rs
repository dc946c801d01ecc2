//! Scene identifiers for the view selector.

use serde::{Deserialize, Serialize};

/// Which full-screen scene is displayed. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Stars streaming outward from the screen center.
    #[default]
    Stars,
    /// Parallax milky-way backdrop.
    MilkyWay,
    /// An astronaut adrift near a black hole.
    Drifter,
}

impl SceneKind {
    /// All scenes in selector order.
    pub const ALL: [SceneKind; 3] = [SceneKind::Stars, SceneKind::MilkyWay, SceneKind::Drifter];

    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            SceneKind::Stars => SceneKind::MilkyWay,
            SceneKind::MilkyWay => SceneKind::Drifter,
            SceneKind::Drifter => SceneKind::Stars,
        }
    }

    /// Human-readable scene title.
    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Stars => "Moving Stars",
            SceneKind::MilkyWay => "Milky Way",
            SceneKind::Drifter => "Drifter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all() {
        let mut scene = SceneKind::default();
        for expected in [SceneKind::MilkyWay, SceneKind::Drifter, SceneKind::Stars] {
            scene = scene.next();
            assert_eq!(scene, expected);
        }
    }
}
