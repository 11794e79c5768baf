use super::MapViewer;
use crate::diagram::{markers, InteractiveElement};

impl MapViewer {
    /// Highlights rooms of the current floor matching `query` and selects
    /// the first match in room-table order.
    ///
    /// Matching is a case-insensitive substring test against the room's
    /// number, name and category. A blank query only removes previous
    /// highlights and leaves the selection alone. Returns the matched room
    /// ids in table order.
    pub fn search(&mut self, query: &str) -> Vec<String> {
        self.state.search_query = query.to_string();
        self.remove_search_markers();

        if query.trim().is_empty() {
            return Vec::new();
        }

        let Some(floor) = self.catalog.get_floor(self.state.current_floor) else {
            return Vec::new();
        };

        let needle = query.to_lowercase();
        let matches: Vec<String> = floor
            .rooms
            .iter()
            .filter(|(_, room)| room.search_text().contains(&needle))
            .map(|(id, _)| id.clone())
            .collect();

        if let Some(diagram) = self.region.diagram_mut() {
            for id in &matches {
                if let Some(element) = diagram.element_by_id_mut(id) {
                    element.add_marker(markers::SEARCH_RESULT);
                }
            }
        }

        tracing::debug!(query, matches = matches.len(), "search");

        if let Some(first) = matches.first() {
            self.select(first);
        }
        matches
    }

    /// Forgets the query and its highlights.
    pub fn reset_search(&mut self) {
        self.state.search_query.clear();
        self.remove_search_markers();
    }

    fn remove_search_markers(&mut self) {
        if let Some(diagram) = self.region.diagram_mut() {
            diagram.remove_marker_everywhere(markers::SEARCH_RESULT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::fetch::LoadResponse;
    use pretty_assertions::assert_eq;

    const FLOOR_1: &str = r#"<svg viewBox="0 0 400 100">
        <rect id="room-101" x="0" y="0" width="100" height="100"/>
        <rect id="room-102" x="100" y="0" width="100" height="100"/>
        <rect id="stairs-a" x="200" y="0" width="100" height="100"/>
        <rect id="entrance-main" x="300" y="0" width="100" height="100"/>
    </svg>"#;

    fn loaded() -> MapViewer {
        let mut viewer = MapViewer::new(builtin::college());
        let request = viewer.load_floor(1).unwrap();
        viewer.complete_load(LoadResponse {
            ticket: request.ticket,
            floor: 1,
            result: Ok(FLOOR_1.to_string()),
        });
        viewer
    }

    fn marked(viewer: &MapViewer, marker: &str) -> Vec<String> {
        let diagram = viewer.diagram().unwrap();
        diagram
            .with_marker(marker)
            .into_iter()
            .filter_map(|i| diagram.element(i)?.id.clone())
            .collect()
    }

    #[test]
    fn test_single_match_highlights_and_selects() {
        let mut viewer = loaded();
        let matches = viewer.search("информатики");

        assert_eq!(matches, ["room-101"]);
        assert_eq!(marked(&viewer, markers::SEARCH_RESULT), ["room-101"]);
        assert_eq!(marked(&viewer, markers::SELECTED), ["room-101"]);
        assert_eq!(viewer.info_panel().details().unwrap().number, "101");
    }

    #[test]
    fn test_case_insensitive_and_first_match_selected() {
        let mut viewer = loaded();
        let matches = viewer.search("КАБИНЕТ");
        assert_eq!(matches, ["room-101", "room-102"]);
        assert_eq!(
            marked(&viewer, markers::SEARCH_RESULT),
            ["room-101", "room-102"]
        );
        assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-101"));
    }

    #[test]
    fn test_category_key_is_searchable() {
        let mut viewer = loaded();
        assert_eq!(viewer.search("stairs"), ["stairs-a"]);
        assert_eq!(viewer.search("Entr"), ["entrance-main"]);
    }

    #[test]
    fn test_blank_query_keeps_selection() {
        let mut viewer = loaded();
        viewer.search("102");
        assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-102"));

        assert!(viewer.search("   ").is_empty());
        assert!(marked(&viewer, markers::SEARCH_RESULT).is_empty());
        assert_eq!(marked(&viewer, markers::SELECTED), ["room-102"]);

        assert!(viewer.search("").is_empty());
        assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-102"));
    }

    #[test]
    fn test_no_match_clears_previous_highlights_only() {
        let mut viewer = loaded();
        viewer.search("101");
        assert!(viewer.search("спортзал").is_empty());
        assert!(marked(&viewer, markers::SEARCH_RESULT).is_empty());
        assert_eq!(marked(&viewer, markers::SELECTED), ["room-101"]);
        assert_eq!(viewer.state().search_query, "спортзал");
    }
}
