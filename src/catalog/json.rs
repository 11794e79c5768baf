use super::FloorCatalog;
use crate::error::CatalogError;
use crate::model::FloorRecord;
use std::collections::BTreeMap;
use std::path::Path;

/// Parses a catalog from JSON text.
///
/// The layout is an object keyed by floor number:
///
/// ```json
/// { "1": { "name": "Первый этаж", "svgFile": "maps/floor-1.svg",
///          "rooms": { "room-101": { "number": "101", "name": "Кабинет",
///                                   "type": "classroom" } } } }
/// ```
///
/// Room order follows the file.
pub fn parse_catalog(content: &str) -> Result<FloorCatalog, CatalogError> {
    let floors: BTreeMap<u32, FloorRecord> = serde_json::from_str(content)?;

    FloorCatalog::from_floors(floors.into_iter().map(|(number, mut floor)| {
        floor.floor_number = number;
        for (room_id, room) in &mut floor.rooms {
            room.room_id.clone_from(room_id);
        }
        floor
    }))
}

/// Reads and parses a catalog file.
///
/// # Errors
///
/// Returns [`CatalogError::FileRead`] if the file cannot be read and
/// [`CatalogError::InvalidJson`] if its content does not describe floors.
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<FloorCatalog, CatalogError> {
    let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&content)?;
    tracing::info!(
        path = %path.as_ref().display(),
        floors = catalog.len(),
        rooms = catalog.total_rooms(),
        "catalog loaded"
    );
    Ok(catalog)
}

impl FloorCatalog {
    /// Serializes the catalog in the same layout [`parse_catalog`] reads.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let floors: BTreeMap<u32, &FloorRecord> =
            self.floors().map(|f| (f.floor_number, f)).collect();
        Ok(serde_json::to_string_pretty(&floors)?)
    }
}
