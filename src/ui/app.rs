use crate::fetch::{FetchWorker, LoadRequest};
use crate::viewer::{ClickTarget, MapViewer};
use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;

use super::dashboard::{self, ScreenLayout};
use super::map;

/// How long to wait for input before checking for finished fetches.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub viewer: MapViewer,
    worker: FetchWorker,
    pub input_mode: InputMode,
    pub search_input: String,
    pub status: Option<String>,
    pub should_quit: bool,
    screen: Rect,
}

impl App {
    #[must_use]
    pub fn new(viewer: MapViewer, worker: FetchWorker) -> Self {
        Self {
            viewer,
            worker,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            status: None,
            should_quit: false,
            screen: Rect::default(),
        }
    }

    /// Starts loading the first floor shown.
    pub fn open_floor(&mut self, floor: u32) -> Result<()> {
        let request = self.viewer.load_floor(floor)?;
        self.spawn(request);
        Ok(())
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
            self.drain_fetches();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.screen = frame.area();
        dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.input_mode {
                InputMode::Normal => self.handle_normal_keys(key.code),
                InputMode::Search => self.handle_search_keys(key.code),
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
        Ok(())
    }

    fn drain_fetches(&mut self) {
        while let Some(response) = self.worker.try_recv() {
            let outcome = self.viewer.complete_load(response);
            if let Some(message) = outcome.status_message() {
                self.status = Some(message);
            }
        }
    }

    fn spawn(&mut self, request: LoadRequest) {
        self.status = None;
        self.search_input.clear();
        self.worker.spawn(request);
    }

    fn handle_normal_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.viewer.clear(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.switch_floor(digit);
                }
            }
            KeyCode::Char('[') | KeyCode::PageDown => self.step_floor(-1),
            KeyCode::Char(']') | KeyCode::PageUp => self.step_floor(1),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.viewer.hover_step(true),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.viewer.hover_step(false);
            }
            KeyCode::Enter => self.viewer.activate_hovered(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn handle_search_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.viewer.clear();
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search_input.pop();
                self.viewer.search(&self.search_input);
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.viewer.search(&self.search_input);
            }
            _ => {}
        }
    }

    fn switch_floor(&mut self, floor: u32) {
        if let Some(request) = self.viewer.switch_floor(floor) {
            self.spawn(request);
        }
    }

    fn step_floor(&mut self, step: i32) {
        let current = self.viewer.state().current_floor;
        if let Some(floor) = self.viewer.catalog().neighbour(current, step) {
            self.switch_floor(floor);
        }
    }

    fn reload(&mut self) {
        match self.viewer.reload() {
            Ok(request) => self.spawn(request),
            Err(error) => self.status = Some(error.to_string()),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let layout = dashboard::screen_layout(self.screen);
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                let target = self.element_at(&layout, position);
                self.viewer.hover(target);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let buttons = self.viewer.floor_buttons();
                if let Some(floor) = dashboard::floor_button_at(layout.selector, &buttons, position)
                {
                    // The selector is outside the map, even for the floor already shown.
                    self.viewer.click(ClickTarget::Outside);
                    self.switch_floor(floor);
                    return;
                }

                let target = if layout.info.contains(position) {
                    ClickTarget::InfoPanel
                } else if layout.diagram.contains(position) {
                    self.element_at(&layout, position)
                        .map_or(ClickTarget::DiagramBackground, ClickTarget::Element)
                } else {
                    ClickTarget::Outside
                };
                self.viewer.click(target);
            }
            _ => {}
        }
    }

    /// Diagram element under a terminal cell.
    fn element_at(&self, layout: &ScreenLayout, position: Position) -> Option<usize> {
        if !layout.diagram.contains(position) {
            return None;
        }
        let diagram = self.viewer.diagram()?;
        let (x, y) = map::diagram_point(map::canvas_area(layout.diagram), diagram.bounds()?, position)?;
        diagram.hit_test(x, y)
    }
}
