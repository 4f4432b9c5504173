//! Terminal UI implementation using ratatui
//!
//! Concrete `UIRenderer` drawing the active list panel as a table with its pagination bar,
//! the details overlay and the status line. It only reads `ViewState` and `RecordStore`;
//! all state changes happen in the render coordinator.

use crate::error::{MedlistError, Result};
use crate::listing::{ListContent, ListPanel, PageView};
use crate::records::{format_date, Lab, Medication, Record, RecordKind};
use crate::render::ui::state::{MessageLevel, RecordDetails, ViewState};
use crate::render::ui::{ColorTheme, UIRenderer};
use crate::store::RecordStore;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

fn terminal_error(step: &'static str) -> impl FnOnce(io::Error) -> MedlistError {
    move |err| MedlistError::ui(format!("cannot {step}: {err}"))
}

/// How a record type is laid out as a table row
trait TableRecord: Record {
    const HEADERS: &'static [&'static str];

    fn widths() -> Vec<Constraint>;

    fn cells(&self) -> Vec<String>;
}

fn text_or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TableRecord for Lab {
    const HEADERS: &'static [&'static str] =
        &["الاسم", "التواصل", "العنوان", "تاريخ الإضافة", "الإجراءات"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Percentage(22),
            Constraint::Percentage(18),
            Constraint::Percentage(25),
            Constraint::Length(14),
            Constraint::Min(20),
        ]
    }

    fn cells(&self) -> Vec<String> {
        let actions = if self.contact.is_some() {
            "e تعديل · d حذف · o واتساب"
        } else {
            "e تعديل · d حذف"
        };
        vec![
            self.name.clone(),
            text_or_dash(self.contact.as_deref()),
            text_or_dash(self.address.as_deref()),
            format_date(self.created_at),
            actions.to_string(),
        ]
    }
}

impl TableRecord for Medication {
    const HEADERS: &'static [&'static str] =
        &["الاسم", "التعليمات", "تاريخ الإضافة", "الإجراءات"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Percentage(28),
            Constraint::Percentage(40),
            Constraint::Length(14),
            Constraint::Min(16),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text_or_dash(self.instructions.as_deref()),
            format_date(self.created_at),
            "e تعديل · d حذف".to_string(),
        ]
    }
}

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }
}

/// Draw one full frame
pub fn draw(frame: &mut Frame, view_state: &ViewState, store: &RecordStore, theme: &ColorTheme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_tabs(frame, chunks[0], view_state, store, theme);

    let loading = store.is_loading();
    match view_state.active {
        RecordKind::Lab => {
            render_panel(frame, chunks[1], &view_state.labs, store.labs(), loading, theme)
        }
        RecordKind::Medication => render_panel(
            frame,
            chunks[1],
            &view_state.medications,
            store.medications(),
            loading,
            theme,
        ),
    }

    if let Some(details) = &view_state.details {
        render_details(frame, chunks[1], details, theme);
    }

    render_status(frame, chunks[2], view_state, theme);
}

fn render_tabs(
    frame: &mut Frame,
    area: Rect,
    view_state: &ViewState,
    store: &RecordStore,
    theme: &ColorTheme,
) {
    let titles = vec![
        format!("{} ({})", RecordKind::Lab.title(), store.labs().len()),
        format!(
            "{} ({})",
            RecordKind::Medication.title(),
            store.medications().len()
        ),
    ];
    let selected = match view_state.active {
        RecordKind::Lab => 0,
        RecordKind::Medication => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme.active_tab);

    let query = view_state.active_panel().query();
    if query.is_empty() {
        frame.render_widget(tabs, area);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);
    frame.render_widget(tabs, halves[0]);
    frame.render_widget(
        Paragraph::new(format!("بحث: {query}")).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_panel<R: TableRecord>(
    frame: &mut Frame,
    area: Rect,
    panel: &ListPanel,
    records: &[R],
    loading: bool,
    theme: &ColorTheme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(panel.kind().title());

    match panel.content(records, loading) {
        ListContent::Loading => {
            let text = Paragraph::new(crate::listing::view::LOADING_MESSAGE)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
        ListContent::Empty { message, .. } => {
            let text = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
        ListContent::Page(page) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);
            render_table(frame, parts[0], block, panel, &page, theme);
            render_pagination(frame, parts[1], panel, &page, theme);
        }
    }
}

fn render_table<R: TableRecord>(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    panel: &ListPanel,
    page: &PageView<'_, R>,
    theme: &ColorTheme,
) {
    let normal = theme
        .normal_text
        .map(|color| Style::default().fg(color))
        .unwrap_or_default();

    let header = Row::new(R::HEADERS.iter().map(|title| Cell::from(*title))).style(theme.header);
    let rows = page
        .rows
        .iter()
        .map(|record| Row::new(record.cells().into_iter().map(Cell::from)).style(normal));

    let table = Table::new(rows, R::widths())
        .header(header)
        .block(block)
        .highlight_style(theme.selected_row);

    let mut state = TableState::default().with_selected(Some(panel.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_pagination<R>(
    frame: &mut Frame,
    area: Rect,
    panel: &ListPanel,
    page: &PageView<'_, R>,
    theme: &ColorTheme,
) {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled {
            theme.control
        } else {
            theme.disabled_control
        };
        Span::styled(label, style)
    };

    let line = Line::from(vec![
        control("« الأولى", page.controls.first),
        Span::raw("  "),
        control("‹ السابقة", page.controls.previous),
        Span::raw("  "),
        Span::raw(page.window.page_label()),
        Span::raw("  "),
        control("التالية ›", page.controls.next),
        Span::raw("  "),
        control("الأخيرة »", page.controls.last),
        Span::raw(format!(
            "  | حجم الصفحة: {} | {}",
            panel.paginator().page_size(),
            page.window.summary()
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_details(frame: &mut Frame, area: Rect, details: &RecordDetails, theme: &ColorTheme) {
    let popup = centered_rect(60, 50, area);
    let lines: Vec<Line> = details
        .fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), theme.header),
                Span::raw(value.as_str()),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!("تعديل: {} (Esc للإغلاق)", details.title));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
    let mut style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
    if let Some(message) = &view_state.status_line.message {
        if message.level == MessageLevel::Warning && view_state.status_line.search_prompt.is_none()
        {
            style = style.fg(theme.warning_text);
        }
    }

    let status = Paragraph::new(view_state.format_status_line()).style(style);
    frame.render_widget(status, area);
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState, store: &RecordStore) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(|frame| draw(frame, view_state, store, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(terminal_error("enter alternate screen"))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(terminal_error("create terminal"))?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
                .map_err(terminal_error("leave alternate screen"))?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) =
            ratatui::crossterm::terminal::size().map_err(terminal_error("query terminal size"))?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
