use super::FloorCatalog;
use crate::model::{FloorRecord, RoomCategory, RoomRecord};
use std::collections::BTreeMap;

/// The college building shipped with the navigator.
#[must_use]
pub fn college() -> FloorCatalog {
    let floors = [
        FloorRecord::new(1, "Первый этаж")
            .with_room(
                RoomRecord::new("room-101", "101", "Кабинет информатики", RoomCategory::Classroom)
                    .with_description("Компьютерный класс, проектор")
                    .with_capacity("25 мест"),
            )
            .with_room(
                RoomRecord::new("room-102", "102", "Кабинет математики", RoomCategory::Classroom)
                    .with_description("Класс для занятий математикой")
                    .with_capacity("30 мест"),
            )
            .with_room(
                RoomRecord::new("stairs-a", "A", "Лестница А", RoomCategory::Stairs)
                    .with_description("Основная лестница между этажами"),
            )
            .with_room(
                RoomRecord::new("entrance-main", "Главный", "Главный вход", RoomCategory::Entrance)
                    .with_description("Центральный вход в техникум"),
            ),
        FloorRecord::new(2, "Второй этаж")
            .with_room(
                RoomRecord::new("room-201", "201", "Физическая лаборатория", RoomCategory::Lab)
                    .with_description("Лаборатория для практических работ")
                    .with_capacity("20 мест"),
            )
            .with_room(
                RoomRecord::new("room-202", "202", "Кабинет истории", RoomCategory::Classroom)
                    .with_description("Класс для гуманитарных дисциплин")
                    .with_capacity("28 мест"),
            ),
        FloorRecord::new(3, "Третий этаж").with_room(
            RoomRecord::new("room-301", "301", "Актовый зал", RoomCategory::Auditorium)
                .with_description("Помещение для мероприятий и собраний")
                .with_capacity("100 мест"),
        ),
        FloorRecord::new(4, "Четвертый этаж").with_room(
            RoomRecord::new("room-401", "401", "Спортивный зал", RoomCategory::Gym)
                .with_description("Зал для занятий физкультурой")
                .with_capacity("50 мест"),
        ),
    ];

    // Floor numbers above are all non-zero.
    let floors: BTreeMap<u32, FloorRecord> =
        floors.into_iter().map(|f| (f.floor_number, f)).collect();
    FloorCatalog::from_map(floors)
}
