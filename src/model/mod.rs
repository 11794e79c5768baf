pub mod floor;
pub mod room;

pub use floor::{FloorRecord, RoomTable};
pub use room::{RoomCategory, RoomRecord};
