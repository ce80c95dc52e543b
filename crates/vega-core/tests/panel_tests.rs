use vega_core::constants::{MIN_REACHABLE, TAB_VISIBLE};
use vega_core::panel::*;

const PW: f32 = 320.0;
const PH: f32 = 420.0;
const VW: f32 = 1280.0;
const VH: f32 = 800.0;

#[test]
fn clamp_keeps_a_grabbable_sliver() {
    // far off every side
    let (x, y) = clamp_position(-10_000.0, -10_000.0, PW, PH, VW, VH);
    assert_eq!((x, y), (MIN_REACHABLE - PW, MIN_REACHABLE - PH));
    let (x, y) = clamp_position(10_000.0, 10_000.0, PW, PH, VW, VH);
    assert_eq!((x, y), (VW - MIN_REACHABLE, VH - MIN_REACHABLE));
    // in-range positions pass through
    let (x, y) = clamp_position(200.0, 150.0, PW, PH, VW, VH);
    assert_eq!((x, y), (200.0, 150.0));
}

#[test]
fn edge_bands_cover_all_four_sides() {
    assert_eq!(edge_at(10.0, 400.0, PW, PH, VW, VH), Some(Edge::Left));
    assert_eq!(edge_at(VW - PW - 10.0, 400.0, PW, PH, VW, VH), Some(Edge::Right));
    assert_eq!(edge_at(500.0, 20.0, PW, PH, VW, VH), Some(Edge::Top));
    assert_eq!(edge_at(500.0, VH - PH - 10.0, PW, PH, VW, VH), Some(Edge::Bottom));
    assert_eq!(edge_at(500.0, 300.0, PW, PH, VW, VH), None);
}

#[test]
fn corner_drops_snap_sideways() {
    assert_eq!(edge_at(5.0, 5.0, PW, PH, VW, VH), Some(Edge::Left));
    assert_eq!(edge_at(VW - PW, VH - PH, PW, PH, VW, VH), Some(Edge::Right));
}

#[test]
fn snapped_positions_leave_the_tab_visible() {
    let (x, _) = snapped_position(Edge::Left, PW, PH, VW, VH, 100.0);
    assert_eq!(x + PW, TAB_VISIBLE);
    let (x, _) = snapped_position(Edge::Right, PW, PH, VW, VH, 100.0);
    assert_eq!(VW - x, TAB_VISIBLE);
    let (_, y) = snapped_position(Edge::Top, PW, PH, VW, VH, 100.0);
    assert_eq!(y + PH, TAB_VISIBLE);
    let (_, y) = snapped_position(Edge::Bottom, PW, PH, VW, VH, 100.0);
    assert_eq!(VH - y, TAB_VISIBLE);
}

#[test]
fn restore_centers_the_panel() {
    let (x, y) = centered_position(PW, PH, VW, VH);
    assert_eq!(x, (VW - PW) / 2.0);
    assert_eq!(y, (VH - PH) / 2.0);
    // tiny viewport never yields a negative origin
    let (x, y) = centered_position(PW, PH, 200.0, 200.0);
    assert_eq!((x, y), (0.0, 0.0));
}

#[test]
fn layout_setters_are_mutually_exclusive() {
    let mut layout = PanelLayout::at(100.0, 200.0);
    assert!(!layout.is_hidden());
    layout.set_hidden(Edge::Right);
    assert!(layout.is_hidden());
    assert_eq!(layout.position, None);
    layout.set_position(50.0, 60.0);
    assert_eq!(layout.hidden_edge, None);
    assert_eq!(layout.position, Some((50.0, 60.0)));
}

#[test]
fn layout_round_trips_through_json() {
    let layout = PanelLayout::hidden(Edge::Bottom);
    let json = serde_json::to_string(&layout).unwrap();
    assert!(json.contains("\"bottom\""));
    let back: PanelLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);

    let layout = PanelLayout::at(12.5, -30.0);
    let back: PanelLayout = serde_json::from_str(&serde_json::to_string(&layout).unwrap()).unwrap();
    assert_eq!(back, layout);
}
