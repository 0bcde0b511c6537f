// SPDX-License-Identifier: MPL-2.0
//! Geometry and interaction state for the floating assistant panel.
//!
//! The controller turns raw pointer events into geometry updates while
//! enforcing the size floors and keeping interaction modes exclusive. It owns
//! no widgets; the view layer reads [`PanelGeometry`] and [`InteractionMode`]
//! back out and lays the panel's frame out accordingly.

use iced::{Point, Vector};

/// Size floors. Resizing clamps against these; they hold at all times.
pub const MIN_WIDTH: f32 = 320.0;
pub const MIN_HEIGHT: f32 = 400.0;

/// Geometry the panel first opens with.
pub const DEFAULT_GEOMETRY: PanelGeometry = PanelGeometry {
    x: 40.0,
    y: 80.0,
    width: 420.0,
    height: 550.0,
};

/// Top-left position and size of the panel, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        DEFAULT_GEOMETRY
    }
}

/// Which sides of the panel a resize handle moves. Corner handles set two
/// flags; all eight compass directions are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdge {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ResizeEdge {
    pub const TOP_LEFT: Self = Self {
        top: true,
        left: true,
        bottom: false,
        right: false,
    };
    pub const TOP_RIGHT: Self = Self {
        top: true,
        right: true,
        bottom: false,
        left: false,
    };
    pub const BOTTOM_LEFT: Self = Self {
        bottom: true,
        left: true,
        top: false,
        right: false,
    };
    pub const BOTTOM_RIGHT: Self = Self {
        bottom: true,
        right: true,
        top: false,
        left: false,
    };

    /// True when the edge set touches the horizontal axis.
    pub fn horizontal(self) -> bool {
        self.left || self.right
    }

    /// True when the edge set touches the vertical axis.
    pub fn vertical(self) -> bool {
        self.top || self.bottom
    }
}

/// Which pointer-driven operation currently owns the panel. Exactly one mode
/// is active at a time; a single enum makes the both-at-once state
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionMode {
    Idle,
    Dragging {
        /// Pointer position minus panel position, captured at press.
        grab_offset: Vector,
    },
    Resizing {
        edge: ResizeEdge,
        /// Geometry at the moment the resize began.
        anchor: PanelGeometry,
        /// Pointer position at the moment the resize began.
        pointer_start: Point,
    },
    FullScreen,
}

/// Owns the panel's geometry and interaction mode. One instance per panel,
/// created on open and dropped on close, so several panels never share state.
#[derive(Debug, Clone)]
pub struct PanelController {
    geometry: PanelGeometry,
    mode: InteractionMode,
    /// Latest pointer sample since the last committed frame. Pointer-move can
    /// fire faster than the display refreshes; only the newest sample is kept
    /// and it is applied by the next frame tick.
    pending_pointer: Option<Point>,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelController {
    pub fn new() -> Self {
        Self {
            geometry: DEFAULT_GEOMETRY,
            mode: InteractionMode::Idle,
            pending_pointer: None,
        }
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn is_full_screen(&self) -> bool {
        matches!(self.mode, InteractionMode::FullScreen)
    }

    /// True while a drag or resize session is open (a frame tick and global
    /// pointer routing are only needed then).
    pub fn is_interacting(&self) -> bool {
        matches!(
            self.mode,
            InteractionMode::Dragging { .. } | InteractionMode::Resizing { .. }
        )
    }

    /// Starts a drag session. Ignored unless the panel is idle: stray
    /// presses during a resize, or while full-screen, must not take over.
    pub fn begin_drag(&mut self, pointer: Point) {
        if self.mode != InteractionMode::Idle {
            return;
        }
        self.mode = InteractionMode::Dragging {
            grab_offset: Vector::new(pointer.x - self.geometry.x, pointer.y - self.geometry.y),
        };
    }

    /// Starts a resize session from the given edge set. Idle-only, like
    /// [`Self::begin_drag`].
    pub fn begin_resize(&mut self, pointer: Point, edge: ResizeEdge) {
        if self.mode != InteractionMode::Idle {
            return;
        }
        self.mode = InteractionMode::Resizing {
            edge,
            anchor: self.geometry,
            pointer_start: pointer,
        };
    }

    /// Records a pointer sample. The sample is buffered, not applied: several
    /// moves between two frames collapse to the newest one, which
    /// [`Self::commit_frame`] applies. No-op when idle or full-screen.
    pub fn pointer_moved(&mut self, pointer: Point) {
        if self.is_interacting() {
            self.pending_pointer = Some(pointer);
        }
    }

    /// Applies the newest buffered pointer sample, if any. Called once per
    /// rendered frame while a session is open.
    pub fn commit_frame(&mut self) {
        if let Some(pointer) = self.pending_pointer.take() {
            self.apply_pointer(pointer);
        }
    }

    /// Ends the open drag/resize session. The final sample is committed
    /// first so pointer-up never loses the last movement. No-op when idle.
    pub fn end_interaction(&mut self) {
        if !self.is_interacting() {
            return;
        }
        self.commit_frame();
        self.mode = InteractionMode::Idle;
    }

    /// Flips between full-screen and idle. While full-screen the stored
    /// geometry is ignored for layout but kept as-is, so leaving full-screen
    /// restores the exact prior frame. Ignored mid-drag/resize.
    pub fn toggle_full_screen(&mut self) {
        match self.mode {
            InteractionMode::Idle => self.mode = InteractionMode::FullScreen,
            InteractionMode::FullScreen => self.mode = InteractionMode::Idle,
            _ => {}
        }
    }

    fn apply_pointer(&mut self, pointer: Point) {
        match self.mode {
            InteractionMode::Dragging { grab_offset } => {
                // Position follows the pointer unclamped; the panel may leave
                // the viewport and be dragged back later.
                self.geometry.x = pointer.x - grab_offset.x;
                self.geometry.y = pointer.y - grab_offset.y;
            }
            InteractionMode::Resizing {
                edge,
                anchor,
                pointer_start,
            } => {
                let dx = pointer.x - pointer_start.x;
                let dy = pointer.y - pointer_start.y;
                let mut next = anchor;

                if edge.right {
                    next.width = (anchor.width + dx).max(MIN_WIDTH);
                }
                if edge.left {
                    // The left edge follows the pointer while the right edge
                    // stays fixed: x is recomputed from the clamped width so
                    // hitting the floor never shifts the opposite side.
                    next.width = (anchor.width - dx).max(MIN_WIDTH);
                    next.x = anchor.x + (anchor.width - next.width);
                }
                if edge.bottom {
                    next.height = (anchor.height + dy).max(MIN_HEIGHT);
                }
                if edge.top {
                    next.height = (anchor.height - dy).max(MIN_HEIGHT);
                    next.y = anchor.y + (anchor.height - next.height);
                }

                self.geometry = next;
            }
            InteractionMode::Idle | InteractionMode::FullScreen => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> PanelController {
        PanelController::new()
    }

    #[test]
    fn opens_idle_with_default_geometry() {
        let panel = start();
        assert_eq!(panel.geometry(), DEFAULT_GEOMETRY);
        assert_eq!(*panel.mode(), InteractionMode::Idle);
        assert!(!panel.is_interacting());
    }

    #[test]
    fn drag_moves_position_but_never_size() {
        let mut panel = start();
        panel.begin_drag(Point::new(100.0, 120.0));
        for (x, y) in [(140.0, 90.0), (300.0, 500.0), (-50.0, -80.0)] {
            panel.pointer_moved(Point::new(x, y));
            panel.commit_frame();
            assert_eq!(panel.geometry().width, DEFAULT_GEOMETRY.width);
            assert_eq!(panel.geometry().height, DEFAULT_GEOMETRY.height);
        }
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut panel = start();
        // Grab 60px right and 40px below the panel origin.
        panel.begin_drag(Point::new(100.0, 120.0));
        panel.pointer_moved(Point::new(200.0, 220.0));
        panel.commit_frame();
        assert_eq!(panel.geometry().x, 140.0);
        assert_eq!(panel.geometry().y, 180.0);
    }

    #[test]
    fn drag_may_leave_the_viewport() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        panel.pointer_moved(Point::new(-500.0, -500.0));
        panel.commit_frame();
        assert!(panel.geometry().x < 0.0);
        assert!(panel.geometry().y < 0.0);
    }

    #[test]
    fn right_edge_resize_changes_only_width() {
        let mut panel = start();
        panel.begin_resize(
            Point::new(460.0, 300.0),
            ResizeEdge {
                right: true,
                ..ResizeEdge::default()
            },
        );
        for dx in [40.0, -60.0, 200.0, -400.0] {
            panel.pointer_moved(Point::new(460.0 + dx, 300.0));
            panel.commit_frame();
            let g = panel.geometry();
            assert_eq!(g.x, DEFAULT_GEOMETRY.x);
            assert_eq!(g.y, DEFAULT_GEOMETRY.y);
            assert_eq!(g.height, DEFAULT_GEOMETRY.height);
            assert!(g.width >= MIN_WIDTH);
        }
    }

    #[test]
    fn left_edge_resize_keeps_right_edge_fixed() {
        let mut panel = start();
        let right_edge = DEFAULT_GEOMETRY.x + DEFAULT_GEOMETRY.width;
        panel.begin_resize(
            Point::new(40.0, 300.0),
            ResizeEdge {
                left: true,
                ..ResizeEdge::default()
            },
        );
        // dx = 60 keeps the width above the floor.
        panel.pointer_moved(Point::new(100.0, 300.0));
        panel.commit_frame();
        let g = panel.geometry();
        assert_eq!(g.width, 360.0);
        assert_eq!(g.x + g.width, right_edge);
    }

    #[test]
    fn left_edge_clamp_recomputes_x_from_floored_width() {
        // Worked scenario: dx = 260 drives the raw width to 160, under the
        // 320 floor; x must land at 40 + (420 - 320) = 140.
        let mut panel = start();
        panel.begin_resize(
            Point::new(40.0, 80.0),
            ResizeEdge {
                left: true,
                ..ResizeEdge::default()
            },
        );
        panel.pointer_moved(Point::new(300.0, 80.0));
        panel.commit_frame();
        let g = panel.geometry();
        assert_eq!(g.width, MIN_WIDTH);
        assert_eq!(g.x, 140.0);
        assert_eq!(g.x + g.width, DEFAULT_GEOMETRY.x + DEFAULT_GEOMETRY.width);
    }

    #[test]
    fn bottom_right_corner_combines_both_rules() {
        // Worked scenario: from the default frame, grab the bottom-right
        // corner at (460, 630) and move to (560, 530): dx = 100, dy = -100.
        let mut panel = start();
        panel.begin_resize(Point::new(460.0, 630.0), ResizeEdge::BOTTOM_RIGHT);
        panel.pointer_moved(Point::new(560.0, 530.0));
        panel.commit_frame();
        assert_eq!(
            panel.geometry(),
            PanelGeometry {
                x: 40.0,
                y: 80.0,
                width: 520.0,
                height: 450.0,
            }
        );
    }

    #[test]
    fn top_edge_mirrors_left_edge_rule() {
        let mut panel = start();
        let bottom_edge = DEFAULT_GEOMETRY.y + DEFAULT_GEOMETRY.height;
        panel.begin_resize(
            Point::new(200.0, 80.0),
            ResizeEdge {
                top: true,
                ..ResizeEdge::default()
            },
        );
        // Push far past the floor; the bottom edge must not drift.
        panel.pointer_moved(Point::new(200.0, 500.0));
        panel.commit_frame();
        let g = panel.geometry();
        assert_eq!(g.height, MIN_HEIGHT);
        assert_eq!(g.y + g.height, bottom_edge);
    }

    #[test]
    fn floors_hold_across_a_whole_session() {
        let mut panel = start();
        panel.begin_resize(Point::new(460.0, 630.0), ResizeEdge::BOTTOM_RIGHT);
        for (x, y) in [(0.0, 0.0), (-300.0, -300.0), (460.0, 630.0), (10.0, 40.0)] {
            panel.pointer_moved(Point::new(x, y));
            panel.commit_frame();
            assert!(panel.geometry().width >= MIN_WIDTH);
            assert!(panel.geometry().height >= MIN_HEIGHT);
        }
    }

    #[test]
    fn begin_drag_is_ignored_while_resizing() {
        let mut panel = start();
        panel.begin_resize(Point::new(460.0, 630.0), ResizeEdge::BOTTOM_RIGHT);
        panel.begin_drag(Point::new(100.0, 100.0));
        assert!(matches!(
            panel.mode(),
            InteractionMode::Resizing { .. }
        ));
    }

    #[test]
    fn begin_resize_is_ignored_while_dragging() {
        let mut panel = start();
        panel.begin_drag(Point::new(100.0, 100.0));
        panel.begin_resize(Point::new(460.0, 630.0), ResizeEdge::TOP_LEFT);
        assert!(matches!(panel.mode(), InteractionMode::Dragging { .. }));
    }

    #[test]
    fn begin_drag_is_ignored_while_full_screen() {
        let mut panel = start();
        panel.toggle_full_screen();
        panel.begin_drag(Point::new(100.0, 100.0));
        assert!(panel.is_full_screen());
    }

    #[test]
    fn moves_without_a_session_are_ignored() {
        let mut panel = start();
        panel.pointer_moved(Point::new(900.0, 900.0));
        panel.commit_frame();
        assert_eq!(panel.geometry(), DEFAULT_GEOMETRY);
    }

    #[test]
    fn end_interaction_when_idle_changes_nothing() {
        let mut panel = start();
        panel.end_interaction();
        assert_eq!(panel.geometry(), DEFAULT_GEOMETRY);
        assert_eq!(*panel.mode(), InteractionMode::Idle);
    }

    #[test]
    fn end_interaction_commits_the_final_sample() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        // Last move arrives after the final frame tick, right before release.
        panel.pointer_moved(Point::new(90.0, 130.0));
        panel.end_interaction();
        assert_eq!(panel.geometry().x, 90.0);
        assert_eq!(panel.geometry().y, 130.0);
        assert_eq!(*panel.mode(), InteractionMode::Idle);
    }

    #[test]
    fn stray_move_after_release_is_ignored() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        panel.end_interaction();
        let settled = panel.geometry();
        panel.pointer_moved(Point::new(700.0, 700.0));
        panel.commit_frame();
        assert_eq!(panel.geometry(), settled);
    }

    #[test]
    fn frame_coalescing_applies_only_the_newest_sample() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        panel.pointer_moved(Point::new(50.0, 90.0));
        panel.pointer_moved(Point::new(60.0, 100.0));
        panel.pointer_moved(Point::new(70.0, 110.0));
        panel.commit_frame();
        assert_eq!(panel.geometry().x, 70.0);
        assert_eq!(panel.geometry().y, 110.0);
        // Nothing left to apply on the next frame.
        panel.commit_frame();
        assert_eq!(panel.geometry().x, 70.0);
    }

    #[test]
    fn full_screen_round_trip_restores_geometry() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        panel.pointer_moved(Point::new(150.0, 200.0));
        panel.end_interaction();
        let before = panel.geometry();

        panel.toggle_full_screen();
        assert!(panel.is_full_screen());
        panel.toggle_full_screen();

        assert_eq!(panel.geometry(), before);
        assert_eq!(*panel.mode(), InteractionMode::Idle);
    }

    #[test]
    fn full_screen_toggle_is_ignored_mid_drag() {
        let mut panel = start();
        panel.begin_drag(Point::new(40.0, 80.0));
        panel.toggle_full_screen();
        assert!(matches!(panel.mode(), InteractionMode::Dragging { .. }));
    }

    #[test]
    fn pointer_moves_while_full_screen_are_ignored() {
        let mut panel = start();
        panel.toggle_full_screen();
        panel.pointer_moved(Point::new(10.0, 10.0));
        panel.commit_frame();
        panel.toggle_full_screen();
        assert_eq!(panel.geometry(), DEFAULT_GEOMETRY);
    }

    #[test]
    fn corner_edge_sets_report_both_axes() {
        assert!(ResizeEdge::BOTTOM_RIGHT.horizontal());
        assert!(ResizeEdge::BOTTOM_RIGHT.vertical());
        let right_only = ResizeEdge {
            right: true,
            ..ResizeEdge::default()
        };
        assert!(right_only.horizontal());
        assert!(!right_only.vertical());
    }
}
