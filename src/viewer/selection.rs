use super::{ClickTarget, InfoPanel, MapViewer, RoomDetails};
use crate::diagram::{markers, Diagram, Handler, InteractiveElement, PointerEvent};

/// Drops the selected and hovered markers from every bound room.
fn reset_room_markers(diagram: &mut Diagram) {
    for element in diagram.elements_mut() {
        if element.has_marker(markers::INTERACTIVE_ROOM) {
            element.remove_marker(markers::SELECTED);
            element.remove_marker(markers::HOVERED);
        }
    }
}

impl MapViewer {
    /// Selects a room of the current floor and shows it in the info panel.
    ///
    /// Returns `false` and changes nothing if the room is not on the current
    /// floor or has no element in the live diagram.
    pub fn select(&mut self, room_id: &str) -> bool {
        self.select_element(room_id, None)
    }

    /// Like [`MapViewer::select`], but marks `clicked` when it carries the
    /// room's id instead of the first element with that id.
    fn select_element(&mut self, room_id: &str, clicked: Option<usize>) -> bool {
        let floor = self.state.current_floor;
        let Some(room) = self.catalog.get_floor(floor).and_then(|f| f.room(room_id)) else {
            tracing::debug!(floor, room_id, "ignoring selection of unknown room");
            return false;
        };
        let Some(diagram) = self.region.diagram_mut() else {
            return false;
        };
        let clicked = clicked.filter(|&i| {
            diagram.element(i).and_then(InteractiveElement::element_id) == Some(room_id)
        });
        let Some(index) = clicked.or_else(|| diagram.index_of(room_id)) else {
            tracing::debug!(floor, room_id, "room has no element on the map");
            return false;
        };

        reset_room_markers(diagram);
        if let Some(element) = diagram.element_mut(index) {
            element.add_marker(markers::SELECTED);
        }

        self.info_panel = InfoPanel::Room(RoomDetails::new(room, floor));
        self.state.selected_room_id = Some(room_id.to_string());
        tracing::debug!(floor, room_id, index, "room selected");
        true
    }

    /// Removes the selection and resets the info panel to its placeholder.
    pub fn clear(&mut self) {
        if let Some(diagram) = self.region.diagram_mut() {
            reset_room_markers(diagram);
        }
        self.info_panel = InfoPanel::Placeholder;
        if let Some(previous) = self.state.selected_room_id.take() {
            tracing::debug!(room_id = %previous, "selection cleared");
        }
    }

    /// Routes a pointer click.
    ///
    /// A click on an element bubbles to the nearest ancestor with a click
    /// handler, which consumes it. Anything else outside the info panel
    /// clears the selection.
    pub fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Element(index) => {
                let owner = self
                    .region
                    .diagram()
                    .and_then(|d| d.handling_ancestor(index, PointerEvent::Click));
                match owner {
                    Some(owner) => self.run_handler(owner, PointerEvent::Click),
                    None => self.clear(),
                }
            }
            ClickTarget::DiagramBackground | ClickTarget::Outside => self.clear(),
            ClickTarget::InfoPanel => {}
        }
    }

    /// Moves the pointer over `target` (or off the diagram with `None`).
    ///
    /// Hover belongs to the nearest bound ancestor, so moving between the
    /// parts of one room does not re-fire its handlers.
    pub fn hover(&mut self, target: Option<usize>) {
        let next = target.and_then(|index| {
            self.region
                .diagram()?
                .handling_ancestor(index, PointerEvent::HoverEnter)
        });
        if next == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered.take() {
            self.run_handler(previous, PointerEvent::HoverLeave);
        }
        if let Some(index) = next {
            self.run_handler(index, PointerEvent::HoverEnter);
        }
        self.hovered = next;
    }

    /// Moves hover to the next (or previous) room in document order.
    pub fn hover_step(&mut self, forward: bool) {
        let rooms = self.interactive_elements();
        if rooms.is_empty() {
            return;
        }

        let position = self
            .hovered
            .and_then(|h| rooms.iter().position(|&i| i == h));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => rooms.len() - 1,
            (Some(p), true) => (p + 1) % rooms.len(),
            (Some(p), false) => (p + rooms.len() - 1) % rooms.len(),
        };
        self.hover(Some(rooms[next]));
    }

    /// Clicks the hovered room, if any.
    pub fn activate_hovered(&mut self) {
        if let Some(index) = self.hovered {
            self.click(ClickTarget::Element(index));
        }
    }

    fn run_handler(&mut self, index: usize, event: PointerEvent) {
        let Some(diagram) = self.region.diagram_mut() else {
            return;
        };
        let Some(element) = diagram.element_mut(index) else {
            return;
        };

        match element.handler(event).cloned() {
            Some(Handler::SelectRoom(room_id)) => {
                self.select_element(&room_id, Some(index));
            }
            Some(Handler::MarkHovered) => {
                if !element.has_marker(markers::SELECTED) {
                    element.add_marker(markers::HOVERED);
                }
            }
            Some(Handler::UnmarkHovered) => element.remove_marker(markers::HOVERED),
            None => {}
        }
    }
}
