use super::RoomRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rooms of one floor keyed by diagram element id.
///
/// Keys are unique and insertion order is significant: the search filter
/// auto-selects the first match in table order.
pub type RoomTable = IndexMap<String, RoomRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRecord {
    #[serde(skip)]
    pub floor_number: u32,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "svgFile")]
    pub diagram_asset_path: String,
    #[serde(default)]
    pub rooms: RoomTable,
}

impl FloorRecord {
    /// Creates an empty floor whose diagram lives at `maps/floor-<n>.svg`.
    #[must_use]
    pub fn new(floor_number: u32, display_name: &str) -> Self {
        Self {
            floor_number,
            display_name: display_name.to_string(),
            diagram_asset_path: format!("maps/floor-{floor_number}.svg"),
            rooms: RoomTable::new(),
        }
    }

    #[must_use]
    pub fn with_room(mut self, room: RoomRecord) -> Self {
        self.rooms.insert(room.room_id.clone(), room);
        self
    }

    #[must_use]
    pub fn room(&self, room_id: &str) -> Option<&RoomRecord> {
        self.rooms.get(room_id)
    }

    /// Label of the floor selector button.
    #[must_use]
    pub fn button_label(&self) -> String {
        format!("{} этаж", self.floor_number)
    }
}
