//! Pointer input: per-frame snapshots, capture records and region ownership
//!
//! The tracker receives one [`PointerState`] per frame. Interactive regions
//! register themselves while the frame renders, each with its own
//! [`PointerCapture`] record. Ownership is exclusive:
//!
//! - With no button held, the first region registered this frame that
//!   contains the pointer owns it (hover).
//! - On a press, the first region registered that frame containing the press
//!   point captures the pointer and keeps it until every button is released,
//!   wherever the pointer moves in the meantime.
//! - A press that lands outside every region leaves the pointer unowned until
//!   release.
//!
//! The owning region's capture accumulates pointer movement into `dx`/`dy`.
//! Consumers subtract what they use, so movement that could not be applied
//! (a clamped divider) stays pending instead of being lost.

use std::collections::VecDeque;

use crate::geometry::{Orientation, Rect};

/// Identity of a registered region, assigned by the tracker on first registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(u64);

/// Pressed state of the pointer buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl PointerButtons {
    pub fn any(&self) -> bool {
        self.primary || self.secondary
    }
}

/// Pointer snapshot for one frame, in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub buttons: PointerButtons,
}

impl PointerState {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            buttons: PointerButtons::default(),
        }
    }

    /// Same position with the primary button held
    pub fn pressed(self) -> Self {
        Self {
            buttons: PointerButtons {
                primary: true,
                ..self.buttons
            },
            ..self
        }
    }
}

/// Interaction state of one pointer region, carried across frames
///
/// Owned by whoever registers the region (a divider slot, a leaf). Updated
/// by the tracker on every registration.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    region: Option<RegionId>,
    /// Whether this region owns the pointer this frame
    pub owned: bool,
    /// Button state, only reported while owned
    pub buttons: PointerButtons,
    /// Pointer position relative to the registering surface's origin
    pub x: i32,
    pub y: i32,
    /// Unconsumed movement since the capture began
    pub dx: i32,
    pub dy: i32,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned with the primary button held
    pub fn is_dragging(&self) -> bool {
        self.owned && self.buttons.primary
    }

    /// Pending movement along an axis
    pub fn delta(&self, axis: Orientation) -> i32 {
        axis.pick(self.dx, self.dy)
    }

    /// Mark `amount` of the pending movement along `axis` as applied
    pub fn consume(&mut self, axis: Orientation, amount: i32) {
        match axis {
            Orientation::Horizontal => self.dx -= amount,
            Orientation::Vertical => self.dy -= amount,
        }
    }

    fn release(&mut self) {
        self.owned = false;
        self.buttons = PointerButtons::default();
        self.dx = 0;
        self.dy = 0;
    }
}

/// Arbitrates pointer ownership between the regions registered each frame
#[derive(Debug, Default)]
pub struct PointerTracker {
    current: PointerState,
    previous: PointerState,
    /// Region holding the pointer for the current press
    captured: Option<RegionId>,
    /// A press started this frame and no region has taken it yet
    press_pending: bool,
    /// Some region already owns the (unpressed) pointer this frame
    hover_claimed: bool,
    next_region: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a frame with a fresh snapshot
    pub fn begin_frame(&mut self, state: PointerState) {
        self.previous = self.current;
        self.current = state;

        let was_pressed = self.previous.buttons.any();
        let is_pressed = self.current.buttons.any();

        if !is_pressed {
            if let Some(region) = self.captured.take() {
                tracing::debug!(?region, "pointer released");
            }
        }

        self.press_pending = is_pressed && !was_pressed;
        if self.press_pending {
            self.captured = None;
        }
        self.hover_claimed = false;
    }

    /// The snapshot of the current frame
    pub fn state(&self) -> PointerState {
        self.current
    }

    /// Region holding the current press, if any
    pub fn captured(&self) -> Option<RegionId> {
        self.captured
    }

    /// Register a region for this frame and update its capture record
    ///
    /// `rect` is in surface coordinates; `origin` is the surface offset the
    /// caller draws relative to, used to report a local pointer position.
    /// Returns whether the region owns the pointer.
    pub fn register(
        &mut self,
        capture: &mut PointerCapture,
        rect: Rect,
        origin: (i32, i32),
    ) -> bool {
        let id = match capture.region {
            Some(id) => id,
            None => {
                let id = RegionId(self.next_region);
                self.next_region += 1;
                capture.region = Some(id);
                id
            }
        };

        let inside = rect.contains(self.current.x, self.current.y);
        let mut began = false;

        let owned = match self.captured {
            Some(holder) => holder == id,
            None if self.press_pending => {
                if inside {
                    tracing::debug!(region = ?id, ?rect, "pointer captured");
                    self.captured = Some(id);
                    self.press_pending = false;
                    began = true;
                    true
                } else {
                    false
                }
            }
            None if self.current.buttons.any() => false,
            None => {
                if inside && !self.hover_claimed {
                    self.hover_claimed = true;
                    true
                } else {
                    false
                }
            }
        };

        if !owned {
            capture.release();
        } else {
            if began || !capture.owned || !self.current.buttons.any() {
                capture.dx = 0;
                capture.dy = 0;
            } else {
                capture.dx += self.current.x - self.previous.x;
                capture.dy += self.current.y - self.previous.y;
            }
            capture.owned = true;
            capture.buttons = self.current.buttons;
        }

        capture.x = self.current.x - origin.0;
        capture.y = self.current.y - origin.1;
        owned
    }
}

/// A pointer button the overlay tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Pointer events gathered between frames
///
/// Moves only update the latest snapshot. Button transitions are queued, so a
/// press and release that both arrive before the next frame still reach the
/// tracker as separate frames.
#[derive(Debug, Default)]
pub struct PointerInput {
    current: PointerState,
    pending: VecDeque<PointerState>,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PointerState {
        self.current
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.current.x = x;
        self.current.y = y;
    }

    /// Record a button transition; returns false when the state did not change
    pub fn set_button(&mut self, button: PointerButton, pressed: bool) -> bool {
        let held = match button {
            PointerButton::Primary => &mut self.current.buttons.primary,
            PointerButton::Secondary => &mut self.current.buttons.secondary,
        };
        if *held == pressed {
            return false;
        }
        *held = pressed;
        self.pending.push_back(self.current);
        true
    }

    /// Release every held button, e.g. when the window loses focus
    pub fn release_all(&mut self) -> bool {
        let mut changed = self.set_button(PointerButton::Primary, false);
        changed |= self.set_button(PointerButton::Secondary, false);
        changed
    }

    /// Snapshots for the coming frames, oldest first; never empty
    ///
    /// Ends with the latest snapshot, including any movement after the last
    /// queued transition.
    pub fn drain(&mut self) -> Vec<PointerState> {
        let mut snapshots: Vec<PointerState> = self.pending.drain(..).collect();
        if snapshots.last() != Some(&self.current) {
            snapshots.push(self.current);
        }
        snapshots
    }
}
