//! Ratatui-based terminal UI.
//!
//! The TUI provides a selection panel for choosing a city, fuel type and
//! year, then renders the monthly average bar chart next to the raw values.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::state::DashboardState;
use crate::cli::DatasetArgs;
use crate::error::AppError;
use crate::filter::default_selection;
use crate::io::ingest::{DatasetColumns, load_dataset};
use crate::report::NO_DATA_MESSAGE;

mod bar_chart;

use bar_chart::MonthlyBarChart;

const FIELD_COUNT: usize = 3;

/// Start the TUI.
pub fn run(args: DatasetArgs) -> Result<(), AppError> {
    // Pick the file before entering raw mode; the picker reads stdin lines.
    let path = crate::app::pipeline::resolve_csv_path(&args)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(path, args.columns());
    app.draw_frame(&mut terminal)?;
    app.load();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    path: PathBuf,
    columns: DatasetColumns,
    state: DashboardState,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(path: PathBuf, columns: DatasetColumns) -> Self {
        Self {
            status: format!("Loading {}...", path.display()),
            path,
            columns,
            state: DashboardState::new(),
            selected_field: 0,
        }
    }

    fn load(&mut self) {
        self.state.finish_loading(load_dataset(&self.path, &self.columns));
        self.status = match (self.state.error(), self.state.data()) {
            (Some(_), _) => "Load failed. Press q to quit.".to_string(),
            (None, Some(data)) => format!(
                "Loaded {} rows ({} skipped).",
                data.rows_used,
                data.rows_skipped()
            ),
            (None, None) => String::new(),
        };
    }

    fn draw_frame<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        terminal
            .draw(|f| self.draw(f))
            .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
        Ok(())
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.draw_frame(terminal)?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ if !self.state.data_ready() => {}
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => {
                let selection = default_selection(self.state.options());
                self.state.set_selection(selection);
                self.status = "Selection reset.".to_string();
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: isize) {
        match self.selected_field {
            0 => self.state.cycle_city(delta),
            1 => self.state.cycle_fuel_type(delta),
            2 => self.state.cycle_year(delta),
            _ => {}
        }
        self.status = format!("selection: {}", self.state.selection());
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fuel", Style::default().fg(Color::Cyan)),
            Span::raw(" | monthly average retail selling price"),
        ]));

        let rows = self
            .state
            .data()
            .map(|d| format!("rows: {} used / {} read", d.rows_used, d.rows_read))
            .unwrap_or_else(|| "rows: -".to_string());
        lines.push(Line::from(Span::styled(
            format!("file: {} | {rows}", self.path.display()),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Monthly average RSP: {}", self.state.selection()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if let Some(message) = self.placeholder() {
            let (text, color) = message;
            let msg = Paragraph::new(text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true });
            frame.render_widget(msg, inner);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(18)])
            .split(inner);

        let points = self.state.chart();
        frame.render_widget(MonthlyBarChart::new(points, "RSP"), columns[0]);

        let items: Vec<ListItem> = points
            .iter()
            .map(|p| ListItem::new(format!("{:<4}{:>10.2}", p.short_label(), p.avg_price)))
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::LEFT));
        frame.render_widget(list, columns[1]);
    }

    /// Message to show instead of the chart, if any.
    fn placeholder(&mut self) -> Option<(String, Color)> {
        if self.state.loading() {
            return Some(("Loading dataset...".to_string(), Color::Yellow));
        }
        if let Some(err) = self.state.error() {
            return Some((format!("Failed to load dataset: {err}"), Color::Red));
        }
        if !self.state.data_ready() {
            return Some(("The dataset contains no usable rows.".to_string(), Color::Yellow));
        }
        if self.state.chart().is_empty() {
            return Some((NO_DATA_MESSAGE.to_string(), Color::Yellow));
        }
        None
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selection = self.state.selection();
        let city = if selection.has_city() { selection.city.as_str() } else { "-" };
        let items = vec![
            ListItem::new(format!("City: {city}")),
            ListItem::new(format!("Fuel: {}", selection.fuel_type)),
            ListItem::new(format!("Year: {}", selection.year)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Selection").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if self.state.data_ready() {
            state.select(Some(self.selected_field));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
