use crate::diagram::{markers, BBox, Diagram, InteractiveElement, Shape};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Rectangle},
        Block,
    },
    Frame,
};

use super::dashboard::{
    BRAND_ACCENT, BRAND_GREEN, BRAND_MUTED, BRAND_ORANGE, BRAND_SELECT_BG,
};

/// Segments used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 32;

/// Area inside the map block's border.
#[must_use]
pub fn canvas_area(area: Rect) -> Rect {
    area.inner(ratatui::layout::Margin::new(1, 1))
}

/// Diagram coordinates (y pointing down) under the centre of a terminal cell.
#[must_use]
pub fn diagram_point(canvas: Rect, bounds: BBox, position: Position) -> Option<(f64, f64)> {
    if !canvas.contains(position) || canvas.width == 0 || canvas.height == 0 {
        return None;
    }
    let fx = (f64::from(position.x - canvas.x) + 0.5) / f64::from(canvas.width);
    let fy = (f64::from(position.y - canvas.y) + 0.5) / f64::from(canvas.height);
    Some((
        bounds.min_x + fx * bounds.width(),
        bounds.min_y + fy * bounds.height(),
    ))
}

/// Colour of an element, taken from the nearest room it belongs to.
fn element_color(diagram: &Diagram, index: usize) -> Color {
    for i in diagram.ancestors(index) {
        let Some(element) = diagram.element(i) else {
            continue;
        };
        if element.has_marker(markers::SELECTED) {
            return BRAND_ORANGE;
        }
        if element.has_marker(markers::SEARCH_RESULT) {
            return BRAND_GREEN;
        }
        if element.has_marker(markers::HOVERED) {
            return BRAND_ACCENT;
        }
        if element.has_marker(markers::INTERACTIVE_ROOM) {
            return BRAND_SELECT_BG;
        }
    }
    BRAND_MUTED
}

pub fn draw_map(frame: &mut Frame, area: Rect, block: Block, diagram: &Diagram) {
    let Some(bounds) = diagram.bounds() else {
        frame.render_widget(block, area);
        return;
    };
    // Canvas y grows upwards, SVG y grows downwards.
    let flip = move |y: f64| bounds.min_y + bounds.max_y - y;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.min_x, bounds.max_x])
        .y_bounds([bounds.min_y, bounds.max_y])
        .paint(|ctx| {
            for (index, element) in diagram.elements().iter().enumerate() {
                if let Some(shape) = &element.shape {
                    paint_shape(ctx, shape, element_color(diagram, index), &flip);
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn paint_shape(ctx: &mut Context, shape: &Shape, color: Color, flip: &impl Fn(f64) -> f64) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => ctx.draw(&Rectangle {
            x: *x,
            y: flip(y + height),
            width: *width,
            height: *height,
            color,
        }),
        Shape::Circle { cx, cy, r } => ctx.draw(&Circle {
            x: *cx,
            y: flip(*cy),
            radius: *r,
            color,
        }),
        Shape::Ellipse { cx, cy, rx, ry } => {
            let points: Vec<(f64, f64)> = (0..ELLIPSE_SEGMENTS)
                .map(|step| {
                    let angle = std::f64::consts::TAU * step as f64 / ELLIPSE_SEGMENTS as f64;
                    (cx + rx * angle.cos(), cy + ry * angle.sin())
                })
                .collect();
            paint_edges(ctx, &points, true, color, flip);
        }
        Shape::Line { x1, y1, x2, y2 } => ctx.draw(&Line {
            x1: *x1,
            y1: flip(*y1),
            x2: *x2,
            y2: flip(*y2),
            color,
        }),
        Shape::Poly { points, closed } => paint_edges(ctx, points, *closed, color, flip),
        Shape::Text { x, y, content } => {
            ctx.print(
                *x,
                flip(*y),
                Span::styled(content.clone(), Style::default().fg(color)),
            );
        }
    }
}

fn paint_edges(
    ctx: &mut Context,
    points: &[(f64, f64)],
    closed: bool,
    color: Color,
    flip: &impl Fn(f64) -> f64,
) {
    let closing = closed
        .then(|| points.last().zip(points.first()))
        .flatten();
    for (&(x1, y1), &(x2, y2)) in points.windows(2).map(|w| (&w[0], &w[1])).chain(closing) {
        ctx.draw(&Line {
            x1,
            y1: flip(y1),
            x2,
            y2: flip(y2),
            color,
        });
    }
}
