use super::element::{BBox, DiagramElement, InteractiveElement, Shape};
use super::Diagram;
use roxmltree::{Document, Node, ParsingOptions};

/// Subtrees that never hold visible floor-plan elements.
const SKIPPED_TAGS: &[&str] = &["defs", "style", "script", "metadata", "desc"];

/// Parses SVG markup into a [`Diagram`].
///
/// The first `svg` element in the document is the diagram root; everything
/// below it is collected in document order. Returns `None` when the markup
/// is not well-formed XML or contains no `svg` element.
#[must_use]
pub fn parse_svg(markup: &str) -> Option<Diagram> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let doc = match Document::parse_with_options(markup, options) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "markup is not well-formed XML");
            return None;
        }
    };

    let root = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "svg")?;

    let view_box = root
        .attribute("viewBox")
        .and_then(parse_view_box)
        .or_else(|| {
            let width = number(root, "width")?;
            let height = number(root, "height")?;
            Some(BBox::new(0.0, 0.0, width, height))
        });

    let mut elements = Vec::new();
    collect_children(root, None, &mut elements);

    Some(Diagram::from_elements(elements, view_box))
}

fn collect_children(node: Node, parent: Option<usize>, out: &mut Vec<DiagramElement>) {
    for child in node.children().filter(Node::is_element) {
        let tag = child.tag_name().name();

        if tag == "title" {
            if let (Some(parent), Some(text)) = (parent, child.text()) {
                out[parent].set_tooltip(text.trim().to_string());
            }
            continue;
        }
        if SKIPPED_TAGS.contains(&tag) {
            continue;
        }

        let index = out.len();
        out.push(element_from_node(child, parent));
        if tag != "text" {
            collect_children(child, Some(index), out);
        }
    }
}

fn element_from_node(node: Node, parent: Option<usize>) -> DiagramElement {
    let tag = node.tag_name().name();
    let mut element = DiagramElement::new(tag, node.attribute("id"));
    element.parent = parent;

    if let Some(classes) = node.attribute("class") {
        element.set_classes(classes);
    }

    match shape_from_node(node) {
        Some(shape) => element.with_shape(shape),
        None => element,
    }
}

fn shape_from_node(node: Node) -> Option<Shape> {
    match node.tag_name().name() {
        "rect" => Some(Shape::Rect {
            x: number(node, "x").unwrap_or(0.0),
            y: number(node, "y").unwrap_or(0.0),
            width: number(node, "width")?,
            height: number(node, "height")?,
        }),
        "circle" => Some(Shape::Circle {
            cx: number(node, "cx").unwrap_or(0.0),
            cy: number(node, "cy").unwrap_or(0.0),
            r: number(node, "r")?,
        }),
        "ellipse" => Some(Shape::Ellipse {
            cx: number(node, "cx").unwrap_or(0.0),
            cy: number(node, "cy").unwrap_or(0.0),
            rx: number(node, "rx")?,
            ry: number(node, "ry")?,
        }),
        "line" => Some(Shape::Line {
            x1: number(node, "x1").unwrap_or(0.0),
            y1: number(node, "y1").unwrap_or(0.0),
            x2: number(node, "x2").unwrap_or(0.0),
            y2: number(node, "y2").unwrap_or(0.0),
        }),
        tag @ ("polygon" | "polyline") => {
            let points = parse_points(node.attribute("points")?);
            if points.len() < 2 {
                return None;
            }
            Some(Shape::Poly {
                points,
                closed: tag == "polygon",
            })
        }
        "path" => parse_path(node.attribute("d")?),
        "text" => {
            let content: String = node
                .descendants()
                .filter(Node::is_text)
                .filter_map(|n| n.text())
                .collect();
            let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
            if content.is_empty() {
                return None;
            }
            Some(Shape::Text {
                x: number(node, "x").unwrap_or(0.0),
                y: number(node, "y").unwrap_or(0.0),
                content,
            })
        }
        _ => None,
    }
}

fn number(node: Node, attr: &str) -> Option<f64> {
    parse_length(node.attribute(attr)?)
}

fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.trim().parse::<f64>().ok()
}

fn parse_numbers(s: &str) -> Vec<f64> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<f64>().ok())
        .collect()
}

fn parse_points(s: &str) -> Vec<(f64, f64)> {
    parse_numbers(s)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

fn parse_view_box(s: &str) -> Option<BBox> {
    match parse_numbers(s)[..] {
        [x, y, width, height] if width > 0.0 && height > 0.0 => {
            Some(BBox::new(x, y, width, height))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Command(char),
    Number(f64),
}

fn path_tokens(d: &str) -> Option<Vec<PathToken>> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
        } else if b.is_ascii_alphabetic() && b != b'e' && b != b'E' {
            tokens.push(PathToken::Command(char::from(b)));
            i += 1;
        } else {
            let start = i;
            if matches!(b, b'+' | b'-') {
                i += 1;
            }
            let mut seen_dot = false;
            while let Some(&c) = bytes.get(i) {
                if c.is_ascii_digit() {
                    i += 1;
                } else if c == b'.' && !seen_dot {
                    seen_dot = true;
                    i += 1;
                } else if matches!(c, b'e' | b'E') && i > start {
                    i += 1;
                    if matches!(bytes.get(i), Some(b'+' | b'-')) {
                        i += 1;
                    }
                } else {
                    break;
                }
            }
            tokens.push(PathToken::Number(d[start..i].parse().ok()?));
        }
    }
    Some(tokens)
}

/// Outline of a straight-line path (`M`, `L`, `H`, `V`, `Z` in either case).
///
/// Only the first subpath is kept. Curves and arcs are not supported and
/// leave the element without a shape.
fn parse_path(d: &str) -> Option<Shape> {
    let tokens = path_tokens(d)?;
    let mut points: Vec<(f64, f64)> = Vec::new();
    let mut closed = false;
    let mut current: Option<char> = None;
    let (mut x, mut y) = (0.0, 0.0);
    let mut i = 0;

    while i < tokens.len() {
        if let PathToken::Command(c) = tokens[i] {
            i += 1;
            if matches!(c, 'Z' | 'z') {
                closed = true;
                if let Some(&start) = points.first() {
                    (x, y) = start;
                }
                current = None;
                continue;
            }
            if matches!(c, 'M' | 'm') && !points.is_empty() {
                break;
            }
            current = Some(c);
        }

        let command = current?;
        let arity = match command.to_ascii_uppercase() {
            'M' | 'L' => 2,
            'H' | 'V' => 1,
            _ => return None,
        };
        let mut args = [0.0; 2];
        for slot in args.iter_mut().take(arity) {
            let PathToken::Number(n) = *tokens.get(i)? else {
                return None;
            };
            *slot = n;
            i += 1;
        }

        let relative = command.is_ascii_lowercase();
        match command.to_ascii_uppercase() {
            'H' if relative => x += args[0],
            'H' => x = args[0],
            'V' if relative => y += args[0],
            'V' => y = args[0],
            _ if relative => {
                x += args[0];
                y += args[1];
            }
            _ => (x, y) = (args[0], args[1]),
        }
        points.push((x, y));

        // Pairs after a moveto are implicit linetos.
        match command {
            'M' => current = Some('L'),
            'm' => current = Some('l'),
            _ => {}
        }
    }

    (points.len() >= 2).then_some(Shape::Poly { points, closed })
}
