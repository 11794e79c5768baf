use crate::ui::app::{App, InputMode};
use crate::viewer::{DiagramRegion, FloorButton, InfoPanel, PLACEHOLDER_TEXT};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::map;

// Brandbook colors
pub const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
pub const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71); // #586b71 - hovered room
pub const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0 - rooms, active floor
pub const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68 - search results
pub const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c - selection, focus
pub const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565 - walls, footer

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const LABEL_STYLE: Style = Style::new().fg(BRAND_MUTED);

/// Gap between floor buttons, in cells.
const BUTTON_GAP: u16 = 1;

/// Screen regions, shared by drawing and mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub selector: Rect,
    pub diagram: Rect,
    pub info: Rect,
    pub search: Rect,
    pub footer: Rect,
}

#[must_use]
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(3), // Floor selector
        Constraint::Min(10),   // Map + info panel
        Constraint::Length(3), // Search
        Constraint::Length(3), // Footer
    ])
    .split(area);

    let main = Layout::horizontal([
        Constraint::Percentage(65), // Map
        Constraint::Percentage(35), // Info panel
    ])
    .split(rows[2]);

    ScreenLayout {
        header: rows[0],
        selector: rows[1],
        diagram: main[0],
        info: main[1],
        search: rows[3],
        footer: rows[4],
    }
}

/// Areas of the floor buttons inside the selector block, left to right.
#[must_use]
pub fn floor_button_areas(selector: Rect, buttons: &[FloorButton]) -> Vec<(Rect, u32)> {
    let inner = Block::default().borders(Borders::ALL).inner(selector);
    let mut x = inner.x;
    let mut areas = Vec::with_capacity(buttons.len());

    for button in buttons {
        let width = Line::from(button.label.as_str()).width() as u16 + 2;
        if x + width > inner.right() {
            break;
        }
        areas.push((Rect::new(x, inner.y, width, inner.height.min(1)), button.floor));
        x += width + BUTTON_GAP;
    }
    areas
}

#[must_use]
pub fn floor_button_at(selector: Rect, buttons: &[FloorButton], position: Position) -> Option<u32> {
    floor_button_areas(selector, buttons)
        .into_iter()
        .find(|(area, _)| area.contains(position))
        .map(|(_, floor)| floor)
}

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let layout = screen_layout(frame.area());

    draw_header(frame, layout.header, app);
    draw_floor_selector(frame, layout.selector, app);
    draw_diagram(frame, layout.diagram, app);
    draw_info_panel(frame, layout.info, app);
    draw_search(frame, layout.search, app);
    draw_footer(frame, layout.footer, app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let rooms = app.viewer.current_floor().map_or(0, |f| f.rooms.len());
    let title = if app.viewer.floor_title().is_empty() {
        " Floor Navigator ".to_string()
    } else {
        format!(
            " Floor Navigator | {} | {} rooms ",
            app.viewer.floor_title(),
            rooms
        )
    };

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_floor_selector(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Floors ").borders(Borders::ALL);
    frame.render_widget(block, area);

    let buttons = app.viewer.floor_buttons();
    for ((button_area, _), button) in floor_button_areas(area, &buttons).into_iter().zip(&buttons) {
        let style = if button.active {
            SELECTED_STYLE
        } else {
            Style::default().fg(BRAND_SELECT_BG)
        };
        let label = Paragraph::new(format!(" {} ", button.label)).style(style);
        frame.render_widget(label, button_area);
    }
}

fn draw_diagram(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.viewer.floor_title() {
        "" => " Map ".to_string(),
        name => format!(" {name} "),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    match app.viewer.region() {
        DiagramRegion::Ready {
            diagram: Some(diagram),
            ..
        } => map::draw_map(frame, area, block, diagram),
        DiagramRegion::Ready {
            markup,
            diagram: None,
            ..
        } => {
            // No SVG root: the markup is shown as-is.
            let raw = Paragraph::new(markup.as_str())
                .style(Style::default().fg(BRAND_MUTED))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(raw, area);
        }
        region @ (DiagramRegion::Loading { .. } | DiagramRegion::Failed { .. }) => {
            let style = if matches!(region, DiagramRegion::Failed { .. }) {
                Style::default().fg(BRAND_ORANGE).add_modifier(Modifier::BOLD)
            } else {
                LABEL_STYLE
            };
            let message = Paragraph::new(region.message().unwrap_or_default())
                .style(style)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
        }
        DiagramRegion::Empty => frame.render_widget(block, area),
    }
}

fn draw_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.viewer.info_panel().is_visible() {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(" Room ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<Line> = match app.viewer.info_panel() {
        InfoPanel::Placeholder => vec![Line::from(Span::styled(PLACEHOLDER_TEXT, LABEL_STYLE))],
        InfoPanel::Room(details) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::raw(format!("{} ", details.icon)),
                    Span::styled(details.heading(), HEADER_STYLE.fg(BRAND_SELECT_BG)),
                ]),
                Line::default(),
            ];
            for (label, value) in details.rows() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label} "), LABEL_STYLE),
                    Span::raw(value),
                ]));
            }
            lines
        }
    };

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(panel, area);
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App) {
    let is_active = app.input_mode == InputMode::Search;
    let border_style = if is_active {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };

    let content = if app.search_input.is_empty() && !is_active {
        Line::from(Span::styled("/ to search rooms", LABEL_STYLE))
    } else {
        Line::from(vec![
            Span::styled("/ ", LABEL_STYLE),
            Span::raw(app.search_input.as_str()),
        ])
    };

    let search = Paragraph::new(content).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(search, area);

    if is_active {
        let offset = Line::from(app.search_input.as_str()).width() as u16 + 2;
        frame.set_cursor_position(Position::new(
            (area.x + 1 + offset).min(area.right().saturating_sub(2)),
            area.y + 1,
        ));
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.input_mode {
        InputMode::Normal => {
            " 1-9/[ ] Floor | Tab Room | Enter Select | Esc Clear | / Search | r Reload | q Quit "
        }
        InputMode::Search => " Type to search | Enter Done | Esc Cancel ",
    };

    let mut spans = vec![Span::styled(help, Style::default().fg(BRAND_MUTED))];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {status} "),
            Style::default().fg(BRAND_ORANGE),
        ));
    } else if let Some(tooltip) = app.viewer.hovered_tooltip() {
        spans.push(Span::styled(
            format!(" {tooltip} "),
            Style::default().fg(BRAND_SELECT_BG),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
