//! The map viewer: floor loading, room binding, selection and search.
//!
//! [`MapViewer`] owns all mutable view state. Every operation runs to
//! completion on the caller's thread; the only asynchronous step is the
//! diagram fetch, which the caller performs with the
//! [`LoadRequest`](crate::fetch::LoadRequest) returned by [`MapViewer::load_floor`] and hands back through
//! [`MapViewer::complete_load`].

pub mod binder;
pub mod loader;
pub mod search;
pub mod selection;

pub use binder::{bind_element, bind_rooms};
pub use loader::LoadOutcome;

use crate::catalog::FloorCatalog;
use crate::diagram::{markers, Diagram, InteractiveElement};
use crate::model::{FloorRecord, RoomRecord};

pub const LOADING_TEXT: &str = "Загрузка карты...";
pub const PLACEHOLDER_TEXT: &str = "Выберите помещение на карте";

/// Message shown in the diagram region when a floor fails to load.
#[must_use]
pub fn failure_message(floor: u32) -> String {
    format!("Не удалось загрузить карту {floor} этажа")
}

/// Session-wide view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Floor currently shown; 0 before the first load.
    pub current_floor: u32,
    pub selected_room_id: Option<String>,
    pub search_query: String,
}

/// Content of the diagram display region.
#[derive(Debug, Clone, Default)]
pub enum DiagramRegion {
    #[default]
    Empty,
    Loading {
        floor: u32,
    },
    Failed {
        floor: u32,
        message: String,
    },
    /// Markup injected verbatim. `diagram` is `None` when the markup has
    /// no SVG root.
    Ready {
        floor: u32,
        markup: String,
        diagram: Option<Diagram>,
    },
}

impl DiagramRegion {
    #[must_use]
    pub fn diagram(&self) -> Option<&Diagram> {
        match self {
            Self::Ready { diagram, .. } => diagram.as_ref(),
            _ => None,
        }
    }

    pub fn diagram_mut(&mut self) -> Option<&mut Diagram> {
        match self {
            Self::Ready { diagram, .. } => diagram.as_mut(),
            _ => None,
        }
    }

    /// Text displayed instead of a diagram, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading { .. } => Some(LOADING_TEXT),
            Self::Failed { message, .. } => Some(message),
            Self::Empty | Self::Ready { .. } => None,
        }
    }
}

/// Details of the selected room as rendered in the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    pub icon: &'static str,
    pub number: String,
    pub name: String,
    pub category_text: &'static str,
    pub capacity: Option<String>,
    pub description: Option<String>,
    pub floor: u32,
    pub room_id: String,
}

impl RoomDetails {
    #[must_use]
    pub fn new(room: &RoomRecord, floor: u32) -> Self {
        Self {
            icon: room.category.icon(),
            number: room.number.clone(),
            name: room.name.clone(),
            category_text: room.category.display_text(),
            capacity: room.capacity.clone(),
            description: room.description.clone(),
            floor,
            room_id: room.room_id.clone(),
        }
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} - {}", self.number, self.name)
    }

    /// Label/value rows in display order; capacity only when known.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Тип:", self.category_text.to_string())];
        if let Some(capacity) = &self.capacity {
            rows.push(("Вместимость:", capacity.clone()));
        }
        rows.push((
            "Описание:",
            self.description.clone().unwrap_or_else(|| "-".to_string()),
        ));
        rows.push(("Этаж:", self.floor.to_string()));
        rows.push(("ID:", self.room_id.clone()));
        rows
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InfoPanel {
    #[default]
    Placeholder,
    Room(RoomDetails),
}

impl InfoPanel {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Room(_))
    }

    #[must_use]
    pub fn details(&self) -> Option<&RoomDetails> {
        match self {
            Self::Room(details) => Some(details),
            Self::Placeholder => None,
        }
    }
}

/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A diagram element, by index.
    Element(usize),
    /// Inside the diagram region but on no element.
    DiagramBackground,
    InfoPanel,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorButton {
    pub floor: u32,
    pub label: String,
    pub active: bool,
}

pub struct MapViewer {
    catalog: FloorCatalog,
    state: ViewState,
    floor_title: String,
    region: DiagramRegion,
    info_panel: InfoPanel,
    hovered: Option<usize>,
    last_ticket: u64,
    pending: Option<u64>,
}

impl MapViewer {
    #[must_use]
    pub fn new(catalog: FloorCatalog) -> Self {
        Self {
            catalog,
            state: ViewState::default(),
            floor_title: String::new(),
            region: DiagramRegion::Empty,
            info_panel: InfoPanel::Placeholder,
            hovered: None,
            last_ticket: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &FloorCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn floor_title(&self) -> &str {
        &self.floor_title
    }

    #[must_use]
    pub fn region(&self) -> &DiagramRegion {
        &self.region
    }

    #[must_use]
    pub fn diagram(&self) -> Option<&Diagram> {
        self.region.diagram()
    }

    #[must_use]
    pub fn info_panel(&self) -> &InfoPanel {
        &self.info_panel
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn current_floor(&self) -> Option<&FloorRecord> {
        self.catalog.get_floor(self.state.current_floor)
    }

    /// The most recent load still waiting for its response.
    #[must_use]
    pub fn pending_request(&self) -> Option<u64> {
        self.pending
    }

    /// One button per catalog floor, the current one marked active.
    #[must_use]
    pub fn floor_buttons(&self) -> Vec<FloorButton> {
        self.catalog
            .floors()
            .map(|floor| FloorButton {
                floor: floor.floor_number,
                label: floor.button_label(),
                active: floor.floor_number == self.state.current_floor,
            })
            .collect()
    }

    /// Indices of bound room elements in document order.
    #[must_use]
    pub fn interactive_elements(&self) -> Vec<usize> {
        self.region
            .diagram()
            .map(|d| d.with_marker(markers::INTERACTIVE_ROOM))
            .unwrap_or_default()
    }

    /// Tooltip of the element under the pointer.
    #[must_use]
    pub fn hovered_tooltip(&self) -> Option<&str> {
        let index = self.hovered?;
        self.region.diagram()?.element(index)?.tooltip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomCategory;

    #[test]
    fn test_details_rows_skip_missing_capacity() {
        let room = RoomRecord::new("stairs-a", "A", "Лестница А", RoomCategory::Stairs);
        let details = RoomDetails::new(&room, 1);
        assert_eq!(details.heading(), "A - Лестница А");
        assert_eq!(details.icon, "🪜");
        let labels: Vec<&str> = details.rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Тип:", "Описание:", "Этаж:", "ID:"]);
    }

    #[test]
    fn test_new_viewer_is_empty() {
        let viewer = MapViewer::new(crate::catalog::builtin::college());
        assert_eq!(viewer.state(), &ViewState::default());
        assert!(!viewer.info_panel().is_visible());
        assert!(viewer.diagram().is_none());
        assert!(viewer.floor_buttons().iter().all(|b| !b.active));
        assert_eq!(viewer.floor_buttons()[0].label, "1 этаж");
    }
}
