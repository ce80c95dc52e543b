//! Draggable-panel layout math and the persisted layout record.
//!
//! The web layer does the actual pointer handling; everything here is
//! plain geometry over CSS-pixel coordinates so the snap and clamp
//! rules are testable on the host.

use serde::{Deserialize, Serialize};

use crate::constants::{EDGE_THRESHOLD, MIN_REACHABLE, TAB_VISIBLE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Persisted panel placement. Exactly one of `position` / `hidden_edge`
/// is set at a time; the setters enforce this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub position: Option<(f32, f32)>,
    pub hidden_edge: Option<Edge>,
}

impl PanelLayout {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Some((x, y)),
            hidden_edge: None,
        }
    }

    pub fn hidden(edge: Edge) -> Self {
        Self {
            position: None,
            hidden_edge: Some(edge),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Some((x, y));
        self.hidden_edge = None;
    }

    pub fn set_hidden(&mut self, edge: Edge) {
        self.hidden_edge = Some(edge);
        self.position = None;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden_edge.is_some()
    }
}

/// Keep at least `MIN_REACHABLE` pixels of the panel inside the
/// viewport so it can always be grabbed again.
pub fn clamp_position(
    x: f32,
    y: f32,
    panel_w: f32,
    panel_h: f32,
    view_w: f32,
    view_h: f32,
) -> (f32, f32) {
    let cx = x.clamp(MIN_REACHABLE - panel_w, view_w - MIN_REACHABLE);
    let cy = y.clamp(MIN_REACHABLE - panel_h, view_h - MIN_REACHABLE);
    (cx, cy)
}

/// Which edge band the panel was dropped in, if any. Side bands are
/// checked before top/bottom, so a corner drop snaps sideways.
pub fn edge_at(x: f32, y: f32, panel_w: f32, panel_h: f32, view_w: f32, view_h: f32) -> Option<Edge> {
    if x <= EDGE_THRESHOLD {
        Some(Edge::Left)
    } else if x + panel_w >= view_w - EDGE_THRESHOLD {
        Some(Edge::Right)
    } else if y <= EDGE_THRESHOLD {
        Some(Edge::Top)
    } else if y + panel_h >= view_h - EDGE_THRESHOLD {
        Some(Edge::Bottom)
    } else {
        None
    }
}

/// Panel coordinates when snapped to an edge: everything offscreen
/// except a `TAB_VISIBLE` sliver.
pub fn snapped_position(edge: Edge, panel_w: f32, panel_h: f32, view_w: f32, view_h: f32, along: f32) -> (f32, f32) {
    match edge {
        Edge::Left => (TAB_VISIBLE - panel_w, along),
        Edge::Right => (view_w - TAB_VISIBLE, along),
        Edge::Top => (along, TAB_VISIBLE - panel_h),
        Edge::Bottom => (along, view_h - TAB_VISIBLE),
    }
}

/// Restore position: panel centered in the viewport.
pub fn centered_position(panel_w: f32, panel_h: f32, view_w: f32, view_h: f32) -> (f32, f32) {
    (((view_w - panel_w) / 2.0).max(0.0), ((view_h - panel_h) / 2.0).max(0.0))
}
