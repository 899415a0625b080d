//! Tests for panel container layout and divider dragging

mod common;

use common::{swatch_color, RecordingSurface, Swatch, Unfinished};
use dpma::component::{Diagnostic, Lineage, Renderable};
use dpma::geometry::{Orientation, Rect};
use dpma::panel::{LayoutMetrics, PanelContainer};
use dpma::pointer::{PointerState, PointerTracker};
use dpma::surface::CursorKind;
use proptest::prelude::*;

fn container(orientation: Orientation, sizes: &[i32]) -> PanelContainer {
    let mut container =
        PanelContainer::new(Lineage::root(), orientation, true, LayoutMetrics::default());
    for (i, &size) in sizes.iter().enumerate() {
        container.add_child_sized(size, |lineage| Swatch::new(lineage, swatch_color(i)));
    }
    container
}

/// Render one frame with `pointer` and return what was drawn
fn render<'a>(
    container: &mut PanelContainer,
    tracker: &'a mut PointerTracker,
    pointer: PointerState,
    width: i32,
    height: i32,
) -> RecordingSurface<'a> {
    let mut surface = RecordingSurface::new(tracker, pointer);
    container.render(&mut surface, width, height);
    surface
}

// ============================================================================
// Proportional resize
// ============================================================================

#[test]
fn test_resize_doubles_clean_ratio() {
    let mut row = container(Orientation::Horizontal, &[30, 70]);
    row.resize(200);
    assert_eq!(row.sizes(), vec![60, 140]);
}

#[test]
fn test_resize_uneven_ratio_stays_within_one_of_ideal() {
    let mut row = container(Orientation::Horizontal, &[10, 10, 11]);
    row.resize(100);

    let sizes = row.sizes();
    assert_eq!(sizes.iter().sum::<i32>(), 100);
    let ideals = [10.0 * 100.0 / 31.0, 10.0 * 100.0 / 31.0, 11.0 * 100.0 / 31.0];
    for (size, ideal) in sizes.iter().zip(ideals) {
        assert!((*size as f64 - ideal).abs() <= 1.0, "{} vs {}", size, ideal);
    }
}

#[test]
fn test_resize_twice_to_same_total_is_noop() {
    let mut row = container(Orientation::Horizontal, &[7, 13, 29]);
    row.resize(333);
    let first = row.sizes();
    row.resize(333);
    assert_eq!(row.sizes(), first);
}

#[test]
fn test_render_rescales_to_main_axis_only() {
    let mut column = container(Orientation::Vertical, &[3, 1]);
    let mut tracker = PointerTracker::new();
    let surface = render(&mut column, &mut tracker, PointerState::at(-1, -1), 300, 400);

    assert_eq!(column.sizes(), vec![300, 100]);
    assert_eq!(surface.rects_with(swatch_color(0)), vec![Rect::new(0, 0, 300, 300)]);
    assert_eq!(surface.rects_with(swatch_color(1)), vec![Rect::new(0, 300, 300, 100)]);
}

#[test]
fn test_nested_children_are_offset_by_parent() {
    let mut row = container(Orientation::Horizontal, &[200]);
    row.add_child_sized(100, |lineage| {
        let mut column =
            PanelContainer::new(lineage, Orientation::Vertical, true, LayoutMetrics::default());
        column.add_child_sized(1, |lineage| Swatch::new(lineage, swatch_color(7)));
        column.add_child_sized(1, |lineage| Swatch::new(lineage, swatch_color(8)));
        column
    });
    let mut tracker = PointerTracker::new();
    let surface = render(&mut row, &mut tracker, PointerState::at(-1, -1), 300, 100);

    assert_eq!(surface.rects_with(swatch_color(7)), vec![Rect::new(200, 0, 100, 50)]);
    assert_eq!(surface.rects_with(swatch_color(8)), vec![Rect::new(200, 50, 100, 50)]);
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.pops_without_clip, 0);
}

// ============================================================================
// Divider dragging
// ============================================================================

#[test]
fn test_scenario_resize_then_drag() {
    let mut row = container(Orientation::Horizontal, &[300, 100]);
    let mut tracker = PointerTracker::new();

    render(&mut row, &mut tracker, PointerState::at(600, 20), 800, 50);
    assert_eq!(row.sizes(), vec![600, 200]);

    render(&mut row, &mut tracker, PointerState::at(600, 20).pressed(), 800, 50);
    let surface = render(&mut row, &mut tracker, PointerState::at(550, 20).pressed(), 800, 50);

    assert_eq!(row.sizes(), vec![550, 250]);
    assert_eq!(surface.cursor, CursorKind::ColResize);
    // Children are laid out with the sizes after the drag
    assert_eq!(surface.rects_with(swatch_color(1)), vec![Rect::new(550, 0, 250, 50)]);
}

#[test]
fn test_first_divider_clamp_keeps_remainder() {
    let mut row = container(Orientation::Horizontal, &[5, 50]);
    let mut tracker = PointerTracker::new();

    render(&mut row, &mut tracker, PointerState::at(5, 10).pressed(), 55, 20);
    render(&mut row, &mut tracker, PointerState::at(-95, 10).pressed(), 55, 20);

    assert_eq!(row.sizes(), vec![10, 45]);
    assert_eq!(row.slots()[1].capture().dx, -105);
}

#[test]
fn test_crossed_clamp_keeps_sizes_and_pending_delta() {
    // Both slots are under the minimum, so the clamp bounds cross
    let mut row = container(Orientation::Horizontal, &[4, 4]);
    let mut tracker = PointerTracker::new();

    render(&mut row, &mut tracker, PointerState::at(4, 5).pressed(), 8, 10);
    render(&mut row, &mut tracker, PointerState::at(1, 5).pressed(), 8, 10);

    assert_eq!(row.sizes(), vec![4, 4]);
    assert_eq!(row.slots()[1].capture().dx, -3);
}

#[test]
fn test_interior_and_last_divider_asymmetry() {
    let mut row = container(Orientation::Horizontal, &[100, 100, 100, 100]);

    // Divider between slots 2 and 3 is the last one: slot 2 may vanish
    assert_eq!(row.drag_divider(3, -1000), -100);
    assert_eq!(row.sizes(), vec![100, 100, 0, 200]);

    // but slot 3 stops at the minimum panel size
    assert_eq!(row.drag_divider(3, 1000), 190);
    assert_eq!(row.sizes(), vec![100, 100, 190, 10]);
}

#[test]
fn test_interior_divider_can_collapse_both_sides() {
    let mut row = container(Orientation::Horizontal, &[100, 100, 100, 100]);
    assert_eq!(row.drag_divider(2, 1000), 100);
    assert_eq!(row.sizes(), vec![100, 200, 0, 100]);
    assert_eq!(row.drag_divider(2, -1000), -200);
    assert_eq!(row.sizes(), vec![100, 0, 200, 100]);
}

#[test]
fn test_vertical_divider_uses_row_resize_cursor() {
    let mut column = container(Orientation::Vertical, &[100, 100]);
    let mut tracker = PointerTracker::new();
    let surface = render(&mut column, &mut tracker, PointerState::at(50, 100), 200, 200);
    assert_eq!(surface.cursor, CursorKind::RowResize);
    assert_eq!(surface.regions, vec![Rect::new(0, 95, 200, 10)]);
}

#[test]
fn test_press_outside_divider_does_not_drag() {
    let mut row = container(Orientation::Horizontal, &[100, 100]);
    let mut tracker = PointerTracker::new();

    render(&mut row, &mut tracker, PointerState::at(20, 10).pressed(), 200, 50);
    render(&mut row, &mut tracker, PointerState::at(100, 10).pressed(), 200, 50);

    assert_eq!(row.sizes(), vec![100, 100]);
    assert!(!row.slots()[1].capture().owned);
}

#[test]
fn test_release_ends_drag() {
    let mut row = container(Orientation::Horizontal, &[100, 100]);
    let mut tracker = PointerTracker::new();

    render(&mut row, &mut tracker, PointerState::at(100, 10).pressed(), 200, 50);
    render(&mut row, &mut tracker, PointerState::at(120, 10).pressed(), 200, 50);
    render(&mut row, &mut tracker, PointerState::at(150, 10), 200, 50);
    render(&mut row, &mut tracker, PointerState::at(60, 10), 200, 50);

    assert_eq!(row.sizes(), vec![120, 80]);
}

// ============================================================================
// Diagnostics and lineage
// ============================================================================

#[test]
fn test_missing_render_is_reported_not_fatal() {
    let mut row = container(Orientation::Horizontal, &[50]);
    row.add_child_sized(50, Unfinished::new);
    let mut tracker = PointerTracker::new();
    let surface = render(&mut row, &mut tracker, PointerState::default(), 100, 10);

    assert_eq!(
        surface.diagnostics,
        vec![Diagnostic::MissingRender {
            kind: "unfinished",
            path: Lineage::root().descend(PanelContainer::KIND, 1).path().clone(),
        }]
    );
    // The sibling still drew
    assert_eq!(surface.rects_with(swatch_color(0)).len(), 1);
}

#[test]
fn test_lineage_reaches_root() {
    let mut row = container(Orientation::Horizontal, &[]);
    row.add_child(|lineage| {
        let mut column =
            PanelContainer::new(lineage, Orientation::Vertical, false, LayoutMetrics::default());
        column.add_child(Unfinished::new);
        column
    });
    let column = row.slots()[0].child();
    let lineage = column.lineage().descend(PanelContainer::KIND, 0);
    assert_eq!(lineage.ancestors().len(), 2);
    assert!(lineage.root_ancestor().is_some_and(|a| a.path.depth() == 0));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_resize_preserves_sum(
        sizes in prop::collection::vec(0i32..2000, 1..8),
        total in 0i32..10_000,
    ) {
        let mut row = container(Orientation::Horizontal, &sizes);
        row.resize(total);
        prop_assert_eq!(row.sizes().iter().sum::<i32>(), total);
        prop_assert_eq!(row.total_size(), total);
        prop_assert!(row.sizes().iter().all(|size| *size >= 0));
    }

    #[test]
    fn prop_resize_stays_within_one_of_ideal(
        sizes in prop::collection::vec(1i32..2000, 1..8),
        total in 1i32..10_000,
    ) {
        let old_total: i32 = sizes.iter().sum();
        let mut row = container(Orientation::Horizontal, &sizes);
        row.resize(total);
        for (size, old) in row.sizes().iter().zip(&sizes) {
            let ideal = *old as f64 * total as f64 / old_total as f64;
            prop_assert!((*size as f64 - ideal).abs() <= 1.0);
        }
    }

    #[test]
    fn prop_drags_are_zero_sum_and_respect_minimum(
        drags in prop::collection::vec((1usize..4, -500i32..500), 1..20),
    ) {
        let mut row = container(Orientation::Horizontal, &[100, 100, 100, 100]);
        for (index, delta) in drags {
            row.drag_divider(index, delta);
            let sizes = row.sizes();
            prop_assert_eq!(sizes.iter().sum::<i32>(), 400);
            prop_assert!(sizes[0] >= 10);
            prop_assert!(sizes[3] >= 10);
            prop_assert!(sizes.iter().all(|size| *size >= 0));
        }
    }
}
