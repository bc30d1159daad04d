use crate::model::non_zero_or;
use crate::strategies::*;
use crate::LayoutConfig;
use nodegraph_layout::{Direction, Point, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Loosely typed layout settings, as found in files and presets
///
/// Every field is optional. Missing or zero numbers fall back to the
/// defaults of the selected strategy, and an unknown `type` selects the
/// hierarchical layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub direction: Option<String>,
    pub node_spacing: Option<f32>,
    pub rank_spacing: Option<f32>,
    pub grid_columns: Option<usize>,
    pub radial_radius: Option<f32>,
    pub center_x: Option<f32>,
    pub center_y: Option<f32>,
}

impl LayoutSettings {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    fn number(value: Option<f32>, default: f32) -> f32 {
        value.map_or(default, |v| non_zero_or(v, default))
    }

    fn center(&self) -> Point {
        Point::new(
            Self::number(self.center_x, 0.0),
            Self::number(self.center_y, 0.0),
        )
    }

    fn columns(&self) -> usize {
        match self.grid_columns {
            Some(0) | None => DEFAULT_GRID_COLUMNS,
            Some(columns) => columns,
        }
    }

    fn grid_spacing(&self) -> Vec2 {
        Vec2::new(
            Self::number(self.node_spacing, DEFAULT_GRID_SPACING.x),
            Self::number(self.rank_spacing, DEFAULT_GRID_SPACING.y),
        )
    }

    fn radius(&self) -> f32 {
        Self::number(self.radial_radius, DEFAULT_RADIUS)
    }
}

impl From<&LayoutSettings> for LayoutConfig {
    fn from(settings: &LayoutSettings) -> Self {
        match settings.kind.as_deref() {
            Some("grid") => GridConfig {
                columns: settings.columns(),
                spacing: settings.grid_spacing(),
            }
            .into(),
            Some("masonry") => MasonryConfig {
                columns: settings.columns(),
                spacing: settings.grid_spacing(),
            }
            .into(),
            Some("radial") => RadialConfig {
                radius: settings.radius(),
                center: settings.center(),
            }
            .into(),
            Some("concentric") => ConcentricConfig {
                ring_spacing: settings.radius(),
                center: settings.center(),
            }
            .into(),
            Some("force") => ForceConfig {
                radius: settings.radius(),
                center: settings.center(),
            }
            .into(),
            Some("manual") => ManualConfig.into(),
            kind => {
                if !matches!(kind, Some("hierarchical") | Some("dagre")) {
                    debug!("Unknown layout type {kind:?}, using hierarchical");
                }
                HierarchicalConfig {
                    direction: settings
                        .direction
                        .as_deref()
                        .and_then(Direction::from_code)
                        .unwrap_or_default(),
                    node_spacing: LayoutSettings::number(
                        settings.node_spacing,
                        DEFAULT_NODE_SPACING,
                    ),
                    rank_spacing: LayoutSettings::number(
                        settings.rank_spacing,
                        DEFAULT_RANK_SPACING,
                    ),
                }
                .into()
            }
        }
    }
}

impl From<LayoutSettings> for LayoutConfig {
    fn from(settings: LayoutSettings) -> Self {
        (&settings).into()
    }
}

/// Names accepted by [`preset`]
pub const PRESET_NAMES: [&str; 10] = [
    "treeVertical",
    "treeHorizontal",
    "treeBottomUp",
    "treeRightToLeft",
    "grid",
    "gridCompact",
    "gridWide",
    "radial",
    "radialCompact",
    "radialWide",
];

/// Named layout bundles
pub fn preset(name: &str) -> Option<LayoutConfig> {
    let tree = |direction, node_spacing, rank_spacing| {
        LayoutConfig::from(HierarchicalConfig {
            direction,
            node_spacing,
            rank_spacing,
        })
    };
    let grid = |columns, gap| {
        LayoutConfig::from(GridConfig {
            columns,
            spacing: Vec2::new(gap, gap),
        })
    };
    let radial = |radius| {
        LayoutConfig::from(RadialConfig {
            radius,
            center: Point::origin(),
        })
    };

    let config = match name {
        "treeVertical" => tree(Direction::TopBottom, 120.0, 180.0),
        "treeHorizontal" => tree(Direction::LeftRight, 150.0, 200.0),
        "treeBottomUp" => tree(Direction::BottomTop, 120.0, 180.0),
        "treeRightToLeft" => tree(Direction::RightLeft, 150.0, 200.0),
        "grid" => grid(3, 40.0),
        "gridCompact" => grid(4, 20.0),
        "gridWide" => grid(2, 60.0),
        "radial" => radial(200.0),
        "radialCompact" => radial(150.0),
        "radialWide" => radial(300.0),
        _ => return None,
    };
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn unknown_kind_is_hierarchical() {
        for kind in [None, Some("dagre"), Some("hierarchical"), Some("spiral")] {
            let settings = LayoutSettings {
                kind: kind.map(String::from),
                ..Default::default()
            };
            assert_eq!(
                LayoutConfig::from(settings),
                LayoutConfig::Hierarchical(HierarchicalConfig::default())
            );
        }
    }

    #[test]
    fn zero_and_missing_numbers_take_defaults() {
        let settings = LayoutSettings {
            kind: Some("grid".into()),
            grid_columns: Some(0),
            node_spacing: Some(0.0),
            rank_spacing: Some(15.0),
            ..Default::default()
        };
        assert_eq!(
            LayoutConfig::from(settings),
            LayoutConfig::Grid(GridConfig {
                columns: 3,
                spacing: Vec2::new(40.0, 15.0),
            })
        );
    }

    #[test]
    fn hierarchical_settings() {
        let settings = LayoutSettings {
            direction: Some("RL".into()),
            rank_spacing: Some(90.0),
            ..Default::default()
        };
        assert_eq!(
            LayoutConfig::from(settings),
            LayoutConfig::Hierarchical(HierarchicalConfig {
                direction: Direction::RightLeft,
                node_spacing: DEFAULT_NODE_SPACING,
                rank_spacing: 90.0,
            })
        );
    }

    #[test]
    fn radial_settings_keep_center() {
        let settings = LayoutSettings {
            kind: Some("radial".into()),
            center_x: Some(10.0),
            center_y: Some(-3.0),
            ..Default::default()
        };
        assert_eq!(
            LayoutConfig::from(settings),
            LayoutConfig::Radial(RadialConfig {
                radius: DEFAULT_RADIUS,
                center: Point::new(10.0, -3.0),
            })
        );
    }

    #[test]
    fn settings_parse_from_ron() {
        let settings: LayoutSettings =
            ron::from_str(r#"(type: Some("masonry"), gridColumns: Some(2))"#).unwrap();
        assert_eq!(
            LayoutConfig::from(settings),
            LayoutConfig::Masonry(MasonryConfig {
                columns: 2,
                spacing: DEFAULT_GRID_SPACING,
            })
        );
    }

    #[test]
    fn every_preset_resolves() {
        for name in PRESET_NAMES {
            assert!(preset(name).is_some(), "missing preset {name}");
        }
        assert_eq!(preset("treeHorizontal").map(|c| c.name()), Some("hierarchical"));
        assert_eq!(preset("nope"), None);
    }
}
