//! Diagram elements and the capability trait the binder works through.

/// Marker names attached to diagram elements.
pub mod markers {
    pub const INTERACTIVE_ROOM: &str = "interactive-room";
    pub const HOVERED: &str = "hovered";
    pub const SELECTED: &str = "selected";
    pub const SEARCH_RESULT: &str = "search-result";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Click,
    HoverEnter,
    HoverLeave,
}

/// Reaction registered on an element for one [`PointerEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Select the room. Stops the click from reaching the outside-click handler.
    SelectRoom(String),
    /// Add the hovered marker unless the element is selected.
    MarkHovered,
    UnmarkHovered,
}

/// An element that can carry markers, a tooltip and pointer handlers.
pub trait InteractiveElement {
    fn element_id(&self) -> Option<&str>;

    fn has_marker(&self, marker: &str) -> bool;
    fn add_marker(&mut self, marker: &str);
    fn remove_marker(&mut self, marker: &str);

    fn tooltip(&self) -> Option<&str>;
    fn set_tooltip(&mut self, text: String);

    /// Registers `handler` for `event`, replacing any previous one.
    fn attach(&mut self, event: PointerEvent, handler: Handler);
    fn detach(&mut self, event: PointerEvent);
    fn handler(&self, event: PointerEvent) -> Option<&Handler>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Geometry of the SVG primitives the navigator understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Poly {
        points: Vec<(f64, f64)>,
        closed: bool,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
    },
}

impl Shape {
    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => Some(BBox::new(*x, *y, *width, *height)),
            Self::Circle { cx, cy, r } => Some(BBox::new(cx - r, cy - r, 2.0 * r, 2.0 * r)),
            Self::Ellipse { cx, cy, rx, ry } => {
                Some(BBox::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry))
            }
            Self::Line { x1, y1, x2, y2 } => Some(BBox {
                min_x: x1.min(*x2),
                min_y: y1.min(*y2),
                max_x: x1.max(*x2),
                max_y: y1.max(*y2),
            }),
            Self::Poly { points, .. } => {
                let (&(x, y), rest) = points.split_first()?;
                Some(
                    rest.iter()
                        .fold(BBox::new(x, y, 0.0, 0.0), |b, &(px, py)| {
                            b.union(BBox::new(px, py, 0.0, 0.0))
                        }),
                )
            }
            Self::Text { x, y, .. } => Some(BBox::new(*x, *y, 0.0, 0.0)),
        }
    }

    /// Whether a pointer at `(x, y)` lands on the shape's filled area.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Rect { .. } => self.bbox().is_some_and(|b| b.contains(x, y)),
            Self::Circle { cx, cy, r } => (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
            Self::Ellipse { cx, cy, rx, ry } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return false;
                }
                ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2) <= 1.0
            }
            Self::Poly {
                points,
                closed: true,
            } => point_in_polygon(points, x, y),
            Self::Line { .. } | Self::Poly { .. } | Self::Text { .. } => false,
        }
    }
}

fn point_in_polygon(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// One element of a parsed diagram.
#[derive(Debug, Clone, Default)]
pub struct DiagramElement {
    pub tag: String,
    pub id: Option<String>,
    pub parent: Option<usize>,
    pub shape: Option<Shape>,
    /// Own geometry, or the union of the children's for groups.
    pub bbox: Option<BBox>,
    classes: Vec<String>,
    title: Option<String>,
    handlers: Vec<(PointerEvent, Handler)>,
}

impl DiagramElement {
    #[must_use]
    pub fn new(tag: &str, id: Option<&str>) -> Self {
        Self {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.bbox = shape.bbox();
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.classes
    }

    pub(crate) fn set_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            self.add_marker(class);
        }
    }
}

impl InteractiveElement for DiagramElement {
    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.classes.iter().any(|c| c == marker)
    }

    fn add_marker(&mut self, marker: &str) {
        if !self.has_marker(marker) {
            self.classes.push(marker.to_string());
        }
    }

    fn remove_marker(&mut self, marker: &str) {
        self.classes.retain(|c| c != marker);
    }

    fn tooltip(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_tooltip(&mut self, text: String) {
        self.title = Some(text);
    }

    fn attach(&mut self, event: PointerEvent, handler: Handler) {
        self.detach(event);
        self.handlers.push((event, handler));
    }

    fn detach(&mut self, event: PointerEvent) {
        self.handlers.retain(|(e, _)| *e != event);
    }

    fn handler(&self, event: PointerEvent) -> Option<&Handler> {
        self.handlers
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, h)| h)
    }
}
