//! Orbit Engine - navigation markers circling the intro scene.
//!
//! [`place`] is a pure function of time. [`OrbitEngine`] remembers the layer
//! each marker was last put in and only reports the markers that must move.

use serde::{Deserialize, Serialize};

use portfolio_rules::{Point, Size, Zone};

use crate::effects::{Cue, Effect, ProgressRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Duration of one full revolution.
    pub seconds_per_revolution: f64,
    pub max_radius_x: f64,
    pub max_radius_y: f64,
    /// Horizontal radius as a fraction of the container width, before clamping.
    pub radius_x_fraction: f64,
    /// Vertical radius as a fraction of the container height, before clamping.
    pub radius_y_fraction: f64,
    /// Markers whose angle cosine exceeds this are drawn in front.
    pub front_threshold: f64,
    /// XP awarded for navigating through a marker.
    pub navigation_xp: i64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            seconds_per_revolution: 20.0,
            max_radius_x: 250.0,
            max_radius_y: 190.0,
            radius_x_fraction: 0.46,
            radius_y_fraction: 0.36,
            front_threshold: 0.62,
            navigation_xp: 10,
        }
    }
}

impl OrbitConfig {
    pub fn degrees_per_second(&self) -> f64 {
        if self.seconds_per_revolution > 0.0 {
            360.0 / self.seconds_per_revolution
        } else {
            0.0
        }
    }

    /// Ellipse radii for a container.
    pub fn radii(&self, container: Size) -> (f64, f64) {
        (
            self.max_radius_x.min(container.width * self.radius_x_fraction),
            self.max_radius_y.min(container.height * self.radius_y_fraction),
        )
    }
}

/// Depth layer of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Front,
    #[default]
    Back,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitNode {
    pub label: String,
    pub target: Zone,
    pub offset_degrees: f64,
}

impl OrbitNode {
    /// One marker per zone, a quarter turn apart.
    pub fn canonical() -> Vec<OrbitNode> {
        Zone::ALL
            .iter()
            .enumerate()
            .map(|(i, zone)| OrbitNode {
                label: zone.label().to_string(),
                target: *zone,
                offset_degrees: i as f64 * 90.0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPlacement {
    /// Marker center, relative to the container's top-left corner.
    pub position: Point,
    pub layer: Layer,
    pub angle_degrees: f64,
}

/// Where a marker is `elapsed_secs` after the orbit started.
pub fn place(node: &OrbitNode, elapsed_secs: f64, container: Size, config: &OrbitConfig) -> OrbitPlacement {
    let angle_degrees = node.offset_degrees + elapsed_secs * config.degrees_per_second();
    let radians = angle_degrees.to_radians();
    let (rx, ry) = config.radii(container);
    let cos = radians.cos();

    OrbitPlacement {
        position: Point::new(
            container.width / 2.0 + cos * rx,
            container.height / 2.0 + radians.sin() * ry,
        ),
        layer: if cos > config.front_threshold {
            Layer::Front
        } else {
            Layer::Back
        },
        angle_degrees,
    }
}

/// A marker that must be moved to another layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMove {
    pub index: usize,
    pub layer: Layer,
}

/// Result of one animation tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitFrame {
    pub placements: Vec<OrbitPlacement>,
    /// Only the markers whose layer changed since the previous tick.
    pub moves: Vec<LayerMove>,
}

pub struct OrbitEngine {
    nodes: Vec<OrbitNode>,
    layers: Vec<Layer>,
    config: OrbitConfig,
}

impl OrbitEngine {
    pub fn new(nodes: Vec<OrbitNode>, config: OrbitConfig) -> Self {
        let layers = vec![Layer::Back; nodes.len()];
        Self {
            nodes,
            layers,
            config,
        }
    }

    pub fn nodes(&self) -> &[OrbitNode] {
        &self.nodes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn tick(&mut self, elapsed_secs: f64, container: Size) -> OrbitFrame {
        let mut frame = OrbitFrame::default();

        for (index, node) in self.nodes.iter().enumerate() {
            let placement = place(node, elapsed_secs, container, &self.config);
            if self.layers[index] != placement.layer {
                self.layers[index] = placement.layer;
                frame.moves.push(LayerMove {
                    index,
                    layer: placement.layer,
                });
            }
            frame.placements.push(placement);
        }

        frame
    }

    /// Navigate through a marker. Unknown indices are ignored.
    pub fn click(&self, index: usize) -> Vec<Effect> {
        let Some(node) = self.nodes.get(index) else {
            tracing::debug!("Ignoring click on missing orbit marker {}", index);
            return Vec::new();
        };

        vec![
            Effect::RevealRequested {
                skip_auto_scroll: true,
            },
            Effect::PlayCue(Cue::Confirm),
            Effect::award_xp(self.config.navigation_xp, format!("Navigated to {}", node.label)),
            Effect::ScrollTo(node.target),
            Effect::Progress(ProgressRequest::TrackVisit(node.target)),
        ]
    }
}

impl Default for OrbitEngine {
    fn default() -> Self {
        Self::new(OrbitNode::canonical(), OrbitConfig::default())
    }
}
