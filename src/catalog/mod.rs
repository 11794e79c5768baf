//! Floor catalog: the static table of floors and their rooms.

pub mod builtin;
pub mod json;

pub use crate::error::CatalogError;
pub use json::{load_catalog_file, parse_catalog};

use crate::model::FloorRecord;
use std::collections::BTreeMap;

/// Read-only mapping from floor number to [`FloorRecord`], ordered by floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorCatalog {
    floors: BTreeMap<u32, FloorRecord>,
}

impl FloorCatalog {
    /// Builds a catalog from floor records. A later record with the same
    /// floor number replaces an earlier one.
    pub fn from_floors<I>(floors: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = FloorRecord>,
    {
        let mut map = BTreeMap::new();
        for floor in floors {
            if floor.floor_number == 0 {
                return Err(CatalogError::InvalidFloorNumber { floor: 0 });
            }
            map.insert(floor.floor_number, floor);
        }
        Ok(Self { floors: map })
    }

    pub(crate) fn from_map(floors: BTreeMap<u32, FloorRecord>) -> Self {
        Self { floors }
    }

    #[must_use]
    pub fn get_floor(&self, floor_number: u32) -> Option<&FloorRecord> {
        self.floors.get(&floor_number)
    }

    #[must_use]
    pub fn contains(&self, floor_number: u32) -> bool {
        self.floors.contains_key(&floor_number)
    }

    pub fn floors(&self) -> impl Iterator<Item = &FloorRecord> {
        self.floors.values()
    }

    /// Floor numbers in ascending order.
    #[must_use]
    pub fn floor_numbers(&self) -> Vec<u32> {
        self.floors.keys().copied().collect()
    }

    #[must_use]
    pub fn first_floor(&self) -> Option<u32> {
        self.floors.keys().next().copied()
    }

    /// Floor adjacent to `floor_number` in catalog order (`step` is -1 or +1).
    #[must_use]
    pub fn neighbour(&self, floor_number: u32, step: i32) -> Option<u32> {
        if step < 0 {
            self.floors.range(..floor_number).next_back().map(|(n, _)| *n)
        } else {
            let next = floor_number.checked_add(1)?;
            self.floors.range(next..).next().map(|(n, _)| *n)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    #[must_use]
    pub fn total_rooms(&self) -> usize {
        self.floors.values().map(|f| f.rooms.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = builtin::college();
        assert_eq!(catalog.floor_numbers(), vec![1, 2, 3, 4]);
        assert_eq!(catalog.get_floor(2).unwrap().display_name, "Второй этаж");
        assert!(catalog.get_floor(9).is_none());
        assert_eq!(catalog.total_rooms(), 8);
    }

    #[test]
    fn test_neighbour_floors() {
        let catalog = builtin::college();
        assert_eq!(catalog.neighbour(1, -1), None);
        assert_eq!(catalog.neighbour(1, 1), Some(2));
        assert_eq!(catalog.neighbour(4, 1), None);
        assert_eq!(catalog.neighbour(3, -1), Some(2));
    }

    #[test]
    fn test_neighbour_of_highest_possible_floor() {
        let catalog = FloorCatalog::from_floors([
            FloorRecord::new(1, "Первый этаж"),
            FloorRecord::new(u32::MAX, "Крыша"),
        ])
        .unwrap();
        assert_eq!(catalog.neighbour(u32::MAX, 1), None);
        assert_eq!(catalog.neighbour(u32::MAX, -1), Some(1));
        assert_eq!(catalog.neighbour(1, 1), Some(u32::MAX));
    }

    #[test]
    fn test_floor_zero_rejected() {
        let result = FloorCatalog::from_floors([FloorRecord::new(0, "Подвал")]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidFloorNumber { floor: 0 })
        ));
    }
}
