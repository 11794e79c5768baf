use super::{DiagramRegion, MapViewer};
use crate::diagram::{markers, Handler, InteractiveElement, PointerEvent};
use crate::error::ViewerError;
use crate::model::{RoomRecord, RoomTable};

/// Makes one element interactive for `room`.
pub fn bind_element<E: InteractiveElement + ?Sized>(element: &mut E, room: &RoomRecord) {
    element.add_marker(markers::INTERACTIVE_ROOM);
    element.add_marker(&room.category.marker());

    element.attach(PointerEvent::HoverEnter, Handler::MarkHovered);
    element.attach(PointerEvent::HoverLeave, Handler::UnmarkHovered);
    element.attach(PointerEvent::Click, Handler::SelectRoom(room.room_id.clone()));

    element.set_tooltip(room.label());
}

/// Binds every element whose id is a key of `rooms`; others are left alone.
/// Returns how many elements were bound.
pub fn bind_rooms<'a, E, I>(elements: I, rooms: &RoomTable) -> usize
where
    E: InteractiveElement + 'a,
    I: IntoIterator<Item = &'a mut E>,
{
    let mut bound = 0;
    for element in elements {
        let Some(room) = element.element_id().and_then(|id| rooms.get(id)) else {
            continue;
        };
        bind_element(element, room);
        bound += 1;
    }
    bound
}

impl MapViewer {
    /// Wires the live diagram of the current floor to its rooms.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::DiagramMissing`] when the region holds no
    /// parsed diagram for the current floor.
    pub fn bind(&mut self) -> Result<usize, ViewerError> {
        let floor = self.state.current_floor;
        let record = self
            .catalog
            .get_floor(floor)
            .ok_or(ViewerError::FloorNotFound { floor })?;

        let diagram = match &mut self.region {
            DiagramRegion::Ready {
                floor: f,
                diagram: Some(diagram),
                ..
            } if *f == floor => diagram,
            _ => return Err(ViewerError::DiagramMissing { floor }),
        };

        Ok(bind_rooms(diagram.elements_mut(), &record.rooms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomCategory;
    use pretty_assertions::assert_eq;

    /// Element with no rendering surface, recording what the binder did.
    #[derive(Default)]
    struct FakeElement {
        id: Option<String>,
        markers: Vec<String>,
        tooltip: Option<String>,
        handlers: Vec<(PointerEvent, Handler)>,
    }

    impl FakeElement {
        fn with_id(id: &str) -> Self {
            Self {
                id: Some(id.to_string()),
                ..Self::default()
            }
        }
    }

    impl InteractiveElement for FakeElement {
        fn element_id(&self) -> Option<&str> {
            self.id.as_deref()
        }
        fn has_marker(&self, marker: &str) -> bool {
            self.markers.iter().any(|m| m == marker)
        }
        fn add_marker(&mut self, marker: &str) {
            self.markers.push(marker.to_string());
        }
        fn remove_marker(&mut self, marker: &str) {
            self.markers.retain(|m| m != marker);
        }
        fn tooltip(&self) -> Option<&str> {
            self.tooltip.as_deref()
        }
        fn set_tooltip(&mut self, text: String) {
            self.tooltip = Some(text);
        }
        fn attach(&mut self, event: PointerEvent, handler: Handler) {
            self.handlers.push((event, handler));
        }
        fn detach(&mut self, event: PointerEvent) {
            self.handlers.retain(|(e, _)| *e != event);
        }
        fn handler(&self, event: PointerEvent) -> Option<&Handler> {
            self.handlers.iter().find(|(e, _)| *e == event).map(|(_, h)| h)
        }
    }

    fn rooms() -> RoomTable {
        let mut rooms = RoomTable::new();
        for room in [
            RoomRecord::new("room-201", "201", "Физическая лаборатория", RoomCategory::Lab),
            RoomRecord::new("room-202", "202", "Кабинет истории", RoomCategory::Classroom),
        ] {
            rooms.insert(room.room_id.clone(), room);
        }
        rooms
    }

    #[test]
    fn test_binds_exactly_matching_elements() {
        let mut elements = vec![
            FakeElement::with_id("room-202"),
            FakeElement::with_id("corridor"),
            FakeElement::default(),
            FakeElement::with_id("room-201"),
        ];

        let bound = bind_rooms(elements.iter_mut(), &rooms());
        assert_eq!(bound, 2);

        let history = &elements[0];
        assert_eq!(history.markers, ["interactive-room", "room-type-classroom"]);
        assert_eq!(history.tooltip.as_deref(), Some("202 - Кабинет истории"));
        assert_eq!(
            history.handler(PointerEvent::Click),
            Some(&Handler::SelectRoom("room-202".to_string()))
        );
        assert_eq!(
            history.handler(PointerEvent::HoverEnter),
            Some(&Handler::MarkHovered)
        );
        assert_eq!(
            history.handler(PointerEvent::HoverLeave),
            Some(&Handler::UnmarkHovered)
        );

        assert!(elements[1].markers.is_empty() && elements[1].handlers.is_empty());
        assert!(elements[2].markers.is_empty() && elements[2].tooltip.is_none());
        assert!(elements[3].has_marker("room-type-lab"));
    }

    #[test]
    fn test_bind_without_diagram_reports_missing() {
        let mut viewer = MapViewer::new(crate::catalog::builtin::college());
        viewer.load_floor(1).unwrap();
        assert!(matches!(
            viewer.bind(),
            Err(ViewerError::DiagramMissing { floor: 1 })
        ));
    }
}
