use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Classroom,
    Lab,
    Auditorium,
    Gym,
    Stairs,
    Entrance,
    Office,
    #[serde(other)]
    Unknown,
}

impl RoomCategory {
    /// Key used in catalog files and in search text.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Classroom => "classroom",
            Self::Lab => "lab",
            Self::Auditorium => "auditorium",
            Self::Gym => "gym",
            Self::Stairs => "stairs",
            Self::Entrance => "entrance",
            Self::Office => "office",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Classroom => "🏫",
            Self::Lab => "🔬",
            Self::Auditorium => "🎭",
            Self::Gym => "⚽",
            Self::Stairs => "🪜",
            Self::Entrance => "🚪",
            Self::Office => "💼",
            Self::Unknown => "📍",
        }
    }

    #[must_use]
    pub fn display_text(self) -> &'static str {
        match self {
            Self::Classroom => "Учебный кабинет",
            Self::Lab => "Лаборатория",
            Self::Auditorium => "Актовый зал",
            Self::Gym => "Спортивный зал",
            Self::Stairs => "Лестница",
            Self::Entrance => "Вход",
            Self::Office => "Офис",
            Self::Unknown => "Помещение",
        }
    }

    /// Category-specific marker, e.g. `room-type-lab`.
    #[must_use]
    pub fn marker(self) -> String {
        format!("room-type-{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Filled from the room table key; matches the diagram element id.
    #[serde(skip)]
    pub room_id: String,
    pub number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: RoomCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
}

impl RoomRecord {
    #[must_use]
    pub fn new(room_id: &str, number: &str, name: &str, category: RoomCategory) -> Self {
        Self {
            room_id: room_id.to_string(),
            number: number.to_string(),
            name: name.to_string(),
            category,
            description: None,
            capacity: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: &str) -> Self {
        self.capacity = Some(capacity.to_string());
        self
    }

    /// Tooltip shown for the room's diagram element: `"<number> - <name>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.number, self.name)
    }

    /// Lowercased text the search filter matches against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.number, self.name, self.category.key()).to_lowercase()
    }
}
