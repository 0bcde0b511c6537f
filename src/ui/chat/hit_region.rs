// SPDX-License-Identifier: MPL-2.0
//! Border hit-region for the floating assistant panel.
//!
//! An invisible canvas layered over the panel. Presses inside the border ring
//! start an interaction: 12px corner squares resize, the edge strips between
//! them drag. Presses in the interior are left alone so the transcript and
//! input keep working. Only the press is handled here; moves and the release
//! arrive through window-level routing, so a fast drag keeps working after
//! the pointer leaves the panel.

use super::panel::ResizeEdge;
use super::Message;
use crate::ui::design_tokens::sizing;
use iced::widget::canvas;
use iced::{mouse, Point, Rectangle, Size};

/// What a press inside the border ring starts.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Zone {
    Drag,
    Resize(ResizeEdge),
}

/// Canvas program covering the whole panel; see the module docs.
pub struct PanelHitRegion {
    /// True while a drag/resize session is already open (affects only the
    /// cursor shown; the controller ignores surplus presses anyway).
    pub interacting: bool,
}

/// Classifies a panel-local position against the border ring.
fn classify(position: Point, size: Size) -> Option<Zone> {
    let corner = sizing::PANEL_CORNER_SIZE;
    let edge = sizing::PANEL_EDGE_THICKNESS;

    let near_left = position.x <= corner;
    let near_right = position.x >= size.width - corner;
    let near_top = position.y <= corner;
    let near_bottom = position.y >= size.height - corner;

    if near_top && near_left {
        return Some(Zone::Resize(ResizeEdge::TOP_LEFT));
    }
    if near_top && near_right {
        return Some(Zone::Resize(ResizeEdge::TOP_RIGHT));
    }
    if near_bottom && near_left {
        return Some(Zone::Resize(ResizeEdge::BOTTOM_LEFT));
    }
    if near_bottom && near_right {
        return Some(Zone::Resize(ResizeEdge::BOTTOM_RIGHT));
    }

    let on_strip = position.x <= edge
        || position.x >= size.width - edge
        || position.y <= edge
        || position.y >= size.height - edge;
    if on_strip {
        return Some(Zone::Drag);
    }

    None
}

impl canvas::Program<Message> for PanelHitRegion {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        if let iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            let local = cursor.position_in(bounds)?;
            let zone = classify(local, bounds.size())?;
            // The controller wants viewport coordinates, not panel-local ones.
            let pointer = cursor.position()?;
            let message = match zone {
                Zone::Drag => Message::DragStarted(pointer),
                Zone::Resize(edge) => Message::ResizeStarted { pointer, edge },
            };
            return Some(Action::publish(message).and_capture());
        }

        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &iced::Renderer,
        _theme: &iced::Theme,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        // The ring is invisible; the panel border underneath is the visual cue.
        Vec::new()
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.interacting {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds).and_then(|p| classify(p, bounds.size())) {
            Some(Zone::Drag) => mouse::Interaction::Grab,
            Some(Zone::Resize(edge)) if edge.horizontal() && !edge.vertical() => {
                mouse::Interaction::ResizingHorizontally
            }
            Some(Zone::Resize(edge)) if edge.vertical() && !edge.horizontal() => {
                mouse::Interaction::ResizingVertically
            }
            Some(Zone::Resize(_)) => mouse::Interaction::ResizingHorizontally,
            None => mouse::Interaction::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size {
        width: 420.0,
        height: 550.0,
    };

    #[test]
    fn corners_resize() {
        assert_eq!(
            classify(Point::new(3.0, 4.0), SIZE),
            Some(Zone::Resize(ResizeEdge::TOP_LEFT))
        );
        assert_eq!(
            classify(Point::new(417.0, 548.0), SIZE),
            Some(Zone::Resize(ResizeEdge::BOTTOM_RIGHT))
        );
        assert_eq!(
            classify(Point::new(415.0, 2.0), SIZE),
            Some(Zone::Resize(ResizeEdge::TOP_RIGHT))
        );
        assert_eq!(
            classify(Point::new(1.0, 545.0), SIZE),
            Some(Zone::Resize(ResizeEdge::BOTTOM_LEFT))
        );
    }

    #[test]
    fn edge_strips_drag() {
        assert_eq!(classify(Point::new(200.0, 5.0), SIZE), Some(Zone::Drag));
        assert_eq!(classify(Point::new(200.0, 545.0), SIZE), Some(Zone::Drag));
        assert_eq!(classify(Point::new(6.0, 300.0), SIZE), Some(Zone::Drag));
        assert_eq!(classify(Point::new(415.0, 300.0), SIZE), Some(Zone::Drag));
    }

    #[test]
    fn interior_is_left_alone() {
        assert_eq!(classify(Point::new(210.0, 275.0), SIZE), None);
        assert_eq!(classify(Point::new(50.0, 50.0), SIZE), None);
    }
}
