//! Panel container: ordered slots along one axis with draggable dividers

use crate::component::{Lineage, Renderable};
use crate::geometry::Orientation;
use crate::pointer::PointerCapture;
use crate::surface::{CursorKind, Surface};

use super::divider::{self, DividerSpan};
use super::rescale;
use super::LayoutMetrics;

/// One child of a container and its size along the container's axis
pub struct Slot {
    child: Box<dyn Renderable>,
    size: i32,
    /// Drag record of the divider in front of this slot (unused for slot 0)
    capture: PointerCapture,
}

impl Slot {
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn child(&self) -> &dyn Renderable {
        self.child.as_ref()
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }
}

/// A container that splits space between children along one axis
///
/// Invariant: `total_size` always equals the sum of the slot sizes.
pub struct PanelContainer {
    lineage: Lineage,
    kind: &'static str,
    orientation: Orientation,
    resizable: bool,
    metrics: LayoutMetrics,
    slots: Vec<Slot>,
    total_size: i32,
}

impl PanelContainer {
    pub const KIND: &'static str = "panel-container";

    pub fn new(
        lineage: Lineage,
        orientation: Orientation,
        resizable: bool,
        metrics: LayoutMetrics,
    ) -> Self {
        Self {
            lineage,
            kind: Self::KIND,
            orientation,
            resizable,
            metrics,
            slots: Vec::new(),
            total_size: 0,
        }
    }

    /// Override the kind reported in diagnostics and child lineages
    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn total_size(&self) -> i32 {
        self.total_size
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Current slot sizes in order
    pub fn sizes(&self) -> Vec<i32> {
        self.slots.iter().map(|slot| slot.size).collect()
    }

    /// Lineage a child appended next would receive
    pub fn next_child_lineage(&self) -> Lineage {
        self.lineage.descend(self.kind, self.slots.len())
    }

    /// Append a child built by `build`, sized by an equal share
    ///
    /// The first child gets `initial_slot_size`; later children get
    /// `total / count` of the current total, growing the total. Returns the
    /// slot index.
    pub fn add_child<C, F>(&mut self, build: F) -> usize
    where
        C: Renderable + 'static,
        F: FnOnce(Lineage) -> C,
    {
        let size = if self.slots.is_empty() {
            self.metrics.initial_slot_size
        } else {
            self.total_size / self.slots.len() as i32
        };
        self.add_child_sized(size, build)
    }

    /// Append a child with an explicit size along the axis
    pub fn add_child_sized<C, F>(&mut self, size: i32, build: F) -> usize
    where
        C: Renderable + 'static,
        F: FnOnce(Lineage) -> C,
    {
        let index = self.slots.len();
        let child = build(self.next_child_lineage());
        let size = size.max(0);
        tracing::debug!(
            container = %self.lineage.path(),
            index,
            size,
            kind = child.kind(),
            "added child"
        );
        self.slots.push(Slot {
            child: Box::new(child),
            size,
            capture: PointerCapture::new(),
        });
        self.total_size += size;
        index
    }

    /// Reassign slot sizes in order
    ///
    /// Missing or non-positive entries keep the slot's current size. Used for
    /// initial ratios such as `[3, 1]`; the next render rescales them to fit.
    pub fn resize_children(&mut self, sizes: &[i32]) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(&size) = sizes.get(i).filter(|size| **size > 0) {
                slot.size = size;
            }
        }
        self.total_size = self.slots.iter().map(|slot| slot.size).sum();
    }

    /// Rescale slots to a new total along the axis, preserving proportions
    ///
    /// No-op when the total is unchanged or the container is empty.
    pub fn resize(&mut self, needed: i32) {
        if self.total_size == needed || self.slots.is_empty() {
            return;
        }
        rescale::rescale(
            self.slots.iter_mut().map(|slot| &mut slot.size),
            self.total_size,
            needed,
        );
        self.total_size = self.slots.iter().map(|slot| slot.size).sum();
        debug_assert_eq!(self.total_size, needed.max(0));
    }

    /// Move divider `index` (between slots `index - 1` and `index`) by `delta`
    ///
    /// Returns the amount actually applied after clamping.
    pub fn drag_divider(&mut self, index: usize, delta: i32) -> i32 {
        if index == 0 || index >= self.slots.len() {
            return 0;
        }
        let last_index = self.slots.len() - 1;
        let (head, tail) = self.slots.split_at_mut(index);
        divider::apply_drag(
            index,
            last_index,
            &mut head[index - 1].size,
            &mut tail[0].size,
            delta,
            self.metrics.min_panel_size,
        )
    }

    /// Hit region of divider `index` for a container of the given cross size
    pub fn divider_span(&self, index: usize) -> Option<DividerSpan> {
        if index == 0 || index >= self.slots.len() {
            return None;
        }
        let after_start: i32 = self.slots[..index].iter().map(|slot| slot.size).sum();
        Some(DividerSpan::new(
            after_start,
            self.slots[index].size,
            index == self.slots.len() - 1,
            self.metrics.divider_size,
        ))
    }

    fn resize_cursor(&self) -> CursorKind {
        match self.orientation {
            Orientation::Horizontal => CursorKind::ColResize,
            Orientation::Vertical => CursorKind::RowResize,
        }
    }

    /// Register every divider with the surface and apply pending drags
    fn resolve_dividers(&mut self, surface: &mut dyn Surface, cross: i32) {
        if self.slots.len() < 2 {
            return;
        }

        let axis = self.orientation;
        let cursor = self.resize_cursor();
        let last_index = self.slots.len() - 1;
        let thickness = self.metrics.divider_size;
        let min_panel = self.metrics.min_panel_size;

        let mut start = self.slots[0].size;
        for index in 1..self.slots.len() {
            let (head, tail) = self.slots.split_at_mut(index);
            let before = &mut head[index - 1];
            let after = &mut tail[0];

            let span = DividerSpan::new(start, after.size, index == last_index, thickness);
            surface.mouse(&mut after.capture, span.to_rect(axis, cross));
            start += after.size;

            if !after.capture.owned {
                continue;
            }
            surface.cursor(cursor);
            if after.capture.buttons.primary {
                let pending = after.capture.delta(axis);
                let applied = divider::apply_drag(
                    index,
                    last_index,
                    &mut before.size,
                    &mut after.size,
                    pending,
                    min_panel,
                );
                after.capture.consume(axis, applied);
                if applied != 0 {
                    tracing::trace!(
                        container = %self.lineage.path(),
                        index,
                        applied,
                        remaining = pending - applied,
                        "divider dragged"
                    );
                }
            }
        }
    }
}

impl Renderable for PanelContainer {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        let axis = self.orientation;
        let cross = axis.cross(width, height);
        self.resize(axis.main(width, height));

        if self.resizable {
            self.resolve_dividers(surface, cross);
        }

        let mut offset = 0;
        for slot in &mut self.slots {
            let rect = axis.rect(offset, slot.size, 0, cross);
            slot.child
                .render_absolute(surface, rect.x, rect.y, rect.width, rect.height);
            offset += slot.size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pointer::{PointerState, PointerTracker};
    use crate::view::{Canvas, Frame};

    struct Blank {
        lineage: Lineage,
    }

    impl Renderable for Blank {
        fn kind(&self) -> &'static str {
            "blank"
        }

        fn lineage(&self) -> &Lineage {
            &self.lineage
        }

        fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
            surface.fill(Color::WHITE);
            surface.rect(0, 0, width, height);
        }
    }

    fn blank(lineage: Lineage) -> Blank {
        Blank { lineage }
    }

    fn row(sizes: &[i32]) -> PanelContainer {
        let mut container = PanelContainer::new(
            Lineage::root(),
            Orientation::Horizontal,
            true,
            LayoutMetrics::default(),
        );
        for &size in sizes {
            container.add_child_sized(size, blank);
        }
        container
    }

    fn render_frame(
        container: &mut PanelContainer,
        tracker: &mut PointerTracker,
        pointer: PointerState,
    ) {
        let (width, height) = (container.total_size(), 50);
        let mut buffer = vec![0u32; (width * height) as usize];
        let frame = Frame::new(&mut buffer, width as usize, height as usize);
        let mut canvas = Canvas::new(frame, tracker, pointer);
        container.render(&mut canvas, width, height);
    }

    #[test]
    fn test_add_child_sizes() {
        let mut container = PanelContainer::new(
            Lineage::root(),
            Orientation::Vertical,
            false,
            LayoutMetrics::default(),
        );
        container.add_child(blank);
        assert_eq!(container.sizes(), vec![1024]);

        container.add_child(blank);
        assert_eq!(container.sizes(), vec![1024, 1024]);

        container.add_child(blank);
        assert_eq!(container.sizes(), vec![1024, 1024, 1024]);
        assert_eq!(container.total_size(), 3072);
    }

    #[test]
    fn test_children_receive_lineage() {
        let mut container = row(&[10, 10]);
        container.add_child_sized(10, blank);
        let third = container.slots()[2].child();
        assert_eq!(third.lineage().path().indices(), &[2]);
        assert_eq!(
            third.lineage().parent().map(|a| a.kind),
            Some(PanelContainer::KIND)
        );
    }

    #[test]
    fn test_resize_children_keeps_unspecified() {
        let mut container = row(&[10, 20, 30]);
        container.resize_children(&[3, 0]);
        assert_eq!(container.sizes(), vec![3, 20, 30]);
        assert_eq!(container.total_size(), 53);
    }

    #[test]
    fn test_resize_keeps_sum() {
        let mut container = row(&[300, 100]);
        container.resize(800);
        assert_eq!(container.sizes(), vec![600, 200]);
        assert_eq!(container.total_size(), 800);
    }

    #[test]
    fn test_resize_empty_container_is_noop() {
        let mut container = row(&[]);
        container.resize(500);
        assert_eq!(container.total_size(), 0);
    }

    #[test]
    fn test_drag_divider_is_zero_sum() {
        let mut container = row(&[100, 100, 100]);
        let applied = container.drag_divider(2, 30);
        assert_eq!(applied, 30);
        assert_eq!(container.sizes(), vec![100, 130, 70]);
        assert_eq!(container.sizes().iter().sum::<i32>(), container.total_size());
    }

    #[test]
    fn test_drag_divider_out_of_range() {
        let mut container = row(&[100, 100]);
        assert_eq!(container.drag_divider(0, 10), 0);
        assert_eq!(container.drag_divider(2, 10), 0);
    }

    #[test]
    fn test_divider_span() {
        let container = row(&[300, 100]);
        assert_eq!(
            container.divider_span(1),
            Some(DividerSpan { start: 295, len: 10 })
        );
        assert_eq!(container.divider_span(0), None);
    }

    #[test]
    fn test_pointer_drag_moves_divider() {
        let mut container = row(&[300, 100]);
        let mut tracker = PointerTracker::new();

        render_frame(&mut container, &mut tracker, PointerState::at(300, 10));
        render_frame(&mut container, &mut tracker, PointerState::at(300, 10).pressed());
        render_frame(&mut container, &mut tracker, PointerState::at(250, 10).pressed());

        assert_eq!(container.sizes(), vec![250, 150]);
        assert_eq!(container.slots()[1].capture().dx, 0);
    }

    #[test]
    fn test_pointer_drag_keeps_clamped_remainder() {
        let mut container = row(&[300, 100]);
        let mut tracker = PointerTracker::new();

        render_frame(&mut container, &mut tracker, PointerState::at(300, 10).pressed());
        render_frame(&mut container, &mut tracker, PointerState::at(399, 10).pressed());

        // Last slot stops at the minimum; the rest of the motion stays pending
        assert_eq!(container.sizes(), vec![390, 10]);
        assert_eq!(container.slots()[1].capture().dx, 9);

        // Moving back first eats the pending remainder
        render_frame(&mut container, &mut tracker, PointerState::at(392, 10).pressed());
        assert_eq!(container.sizes(), vec![390, 10]);
        assert_eq!(container.slots()[1].capture().dx, 2);

        render_frame(&mut container, &mut tracker, PointerState::at(380, 10).pressed());
        assert_eq!(container.sizes(), vec![380, 20]);
    }

    #[test]
    fn test_fixed_container_ignores_pointer() {
        let mut container = PanelContainer::new(
            Lineage::root(),
            Orientation::Horizontal,
            false,
            LayoutMetrics::default(),
        );
        container.add_child_sized(300, blank);
        container.add_child_sized(100, blank);
        let mut tracker = PointerTracker::new();

        render_frame(&mut container, &mut tracker, PointerState::at(300, 10).pressed());
        render_frame(&mut container, &mut tracker, PointerState::at(250, 10).pressed());

        assert_eq!(container.sizes(), vec![300, 100]);
    }
}
