//! In-memory floor diagrams parsed from SVG.

pub mod element;
pub mod svg;

pub use element::{
    markers, BBox, DiagramElement, Handler, InteractiveElement, PointerEvent, Shape,
};
pub use svg::parse_svg;

use std::collections::HashMap;

/// A live floor diagram: elements in document order with parent links.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    elements: Vec<DiagramElement>,
    ids: HashMap<String, usize>,
    bounds: Option<BBox>,
}

impl Diagram {
    /// Builds a diagram from elements listed in document order (parents
    /// before children). Group boxes are widened to cover their children.
    /// Without `view_box` the bounds are the union of all element boxes.
    #[must_use]
    pub fn from_elements(mut elements: Vec<DiagramElement>, view_box: Option<BBox>) -> Self {
        for index in (0..elements.len()).rev() {
            let (Some(parent), Some(child_box)) = (elements[index].parent, elements[index].bbox)
            else {
                continue;
            };
            let parent = &mut elements[parent];
            parent.bbox = Some(parent.bbox.map_or(child_box, |b| b.union(child_box)));
        }

        let mut ids = HashMap::new();
        for (index, element) in elements.iter().enumerate() {
            if let Some(id) = &element.id {
                ids.entry(id.clone()).or_insert(index);
            }
        }

        let bounds = view_box.or_else(|| {
            elements
                .iter()
                .filter_map(|e| e.bbox)
                .reduce(BBox::union)
        });

        Self {
            elements,
            ids,
            bounds,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut DiagramElement> {
        self.elements.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<&DiagramElement> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut DiagramElement> {
        self.elements.get_mut(index)
    }

    /// Index of the first element with `id`, like `getElementById`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&DiagramElement> {
        self.index_of(id).and_then(|i| self.elements.get(i))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut DiagramElement> {
        let index = self.index_of(id)?;
        self.elements.get_mut(index)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        self.bounds
    }

    /// `index` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(
            (index < self.elements.len()).then_some(index),
            move |&i| self.elements[i].parent,
        )
    }

    /// Nearest element from `index` upwards that has a handler for `event`.
    #[must_use]
    pub fn handling_ancestor(&self, index: usize, event: PointerEvent) -> Option<usize> {
        self.ancestors(index)
            .find(|&i| self.elements[i].handler(event).is_some())
    }

    /// Top-most element whose shape covers the point.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.elements
            .iter()
            .rposition(|e| e.shape.as_ref().is_some_and(|s| s.contains(x, y)))
    }

    /// Indices of elements carrying `marker`, in document order.
    #[must_use]
    pub fn with_marker(&self, marker: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_marker(marker))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn remove_marker_everywhere(&mut self, marker: &str) {
        for element in &mut self.elements {
            element.remove_marker(marker);
        }
    }
}
