//! Main application state, event handling, and rendering.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::countdown::{next_deadline, NextDeadline, NotificationState};
use crate::event::Event;
use crate::form::{FieldKind, TenderForm};
use crate::model::{stats, FilterSet, Tender, TenderDraft, TenderId};
use crate::report::{export_report, ReportSnapshot};
use crate::theme::Theme;
use crate::timeline::{ScrollSync, TimelineSpan, ViewState};

/// Horizontal distance covered by one arrow-key or wheel step, in virtual px.
const NUDGE_PX: f64 = 30.0;

/// Redraw cadence while a scroll animation is in flight (~30 fps).
const FRAME_INTERVAL: std::time::Duration = std::time::Duration::from_millis(33);

/// Return value from event handling.  Async work (API calls) happens in the
/// run loop, not inside the handlers.
#[derive(Debug, PartialEq)]
pub enum Action {
    Continue,
    Quit,
    Refresh,
    Submit {
        draft: TenderDraft,
        editing: Option<TenderId>,
    },
    Delete(TenderId),
    Export,
}

/// Input mode for modal states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Form,
    ConfirmDelete,
}

/// Core application state.
pub struct App {
    // Core data
    pub tenders: Vec<Tender>,
    pub customers: Vec<String>,
    api: ApiClient,

    // Derived
    pub filtered: Vec<Tender>,
    pub next_deadline: Option<NextDeadline>,

    // UI state
    pub filters: FilterSet,
    pub table_state: TableState,
    pub mode: InputMode,
    pub form: Option<TenderForm>,
    pub pending_delete: Option<TenderId>,
    pub view: ViewState,
    pub scroll: ScrollSync,
    pub notify: NotificationState,

    // Theme
    pub theme: Theme,

    // Status
    pub clock: String,
    pub notice: Option<(String, Instant)>,
    pub report_dir: PathBuf,

    // Layout areas for mouse hit-testing
    pub canvas_area: Rect,
    pub table_area: Rect,
}

impl App {
    pub fn new(
        api: ApiClient,
        initial_filters: FilterSet,
        reminders: bool,
        report_dir: PathBuf,
    ) -> Self {
        Self {
            tenders: Vec::new(),
            customers: Vec::new(),
            api,
            filtered: Vec::new(),
            next_deadline: None,
            filters: initial_filters,
            table_state: TableState::default(),
            mode: InputMode::Normal,
            form: None,
            pending_delete: None,
            view: ViewState::default(),
            scroll: ScrollSync::default(),
            notify: NotificationState::new(reminders),
            theme: Theme::slate(),
            clock: Local::now().format("%H:%M:%S").to_string(),
            notice: None,
            report_dir,
            canvas_area: Rect::default(),
            table_area: Rect::default(),
        }
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
    ) -> color_eyre::Result<()> {
        // Initial load
        self.refresh().await;

        // Start event handler
        let mut events = crate::event::EventHandler::new();

        loop {
            // RENDER
            terminal.draw(|frame| self.render(frame))?;

            // WAIT FOR EVENT.  While a "go to today" animation is running,
            // advance it between events at frame cadence; it settles in
            // well under a second instead of crawling along the 1s tick.
            let event = if self.scroll.is_animating() {
                tokio::select! {
                    event = events.next() => event,
                    _ = tokio::time::sleep(FRAME_INTERVAL) => {
                        self.scroll.step();
                        continue;
                    }
                }
            } else {
                events.next().await
            };
            let Some(event) = event else {
                break;
            };

            // UPDATE
            match self.handle_event(event) {
                Action::Quit => break,
                Action::Refresh => self.refresh().await,
                Action::Submit { draft, editing } => {
                    let result = match editing {
                        Some(ref id) => self.api.update_tender(id, &draft).await.map(|_| ()),
                        None => self.api.create_tender(&draft).await.map(|_| ()),
                    };
                    match result {
                        Ok(()) => {
                            info!(tender = %draft.tender_name, "tender saved");
                            self.refresh().await;
                        }
                        Err(e) => self.set_notice(format!("save failed: {e}")),
                    }
                }
                Action::Delete(id) => match self.api.delete_tender(&id).await {
                    Ok(()) => {
                        info!(tender = %id, "tender deleted");
                        self.refresh().await;
                    }
                    Err(e) => self.set_notice(format!("delete failed: {e}")),
                },
                Action::Export => self.export(),
                Action::Continue => {}
            }
        }

        Ok(())
    }

    /// Re-fetch the tender and customer lists.  Mutations never patch local
    /// state; they land here after the backend confirms.  On failure the
    /// previous data stays on screen and the notice bar reports the error.
    async fn refresh(&mut self) {
        match self.api.list_tenders().await {
            Ok(tenders) => {
                self.tenders = tenders;
                self.recompute_filtered();
            }
            Err(e) => {
                warn!(error = %e, "tender fetch failed");
                self.set_notice(format!("fetch failed: {e}"));
            }
        }
        match self.api.list_customers().await {
            Ok(customers) => self.customers = customers,
            Err(e) => warn!(error = %e, "customer list fetch failed"),
        }
    }

    fn export(&mut self) {
        let snapshot = ReportSnapshot {
            tenders: &self.filtered,
            filters: &self.filters,
            today: Local::now().date_naive(),
        };
        match export_report(&self.report_dir, &snapshot) {
            Ok(path) => {
                info!(path = %path.display(), "report exported");
                self.set_notice(format!("Report saved: {}", path.display()));
            }
            Err(e) => self.set_notice(format!("export failed: {e}")),
        }
    }

    fn set_notice(&mut self, msg: String) {
        self.notice = Some((msg, Instant::now()));
    }

    /// Handle a single event.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Tick => self.handle_tick(),
            Event::Resize(_, _) => Action::Continue,
        }
    }

    /// One second of wall-clock time: advance the clock, the countdown, and
    /// the notification engine.  Scroll animation runs on its own faster
    /// cadence in the run loop.
    fn handle_tick(&mut self) -> Action {
        self.clock = Local::now().format("%H:%M:%S").to_string();

        // Auto-dismiss notices after 10 seconds
        if let Some((_, when)) = &self.notice {
            if when.elapsed().as_secs() >= 10 {
                self.notice = None;
            }
        }

        let now = Local::now().naive_local();
        self.next_deadline = next_deadline(&self.filtered, now);

        if let Some(alert) = self.notify.evaluate(&self.filtered, now) {
            info!(tender = %alert.id, "tender deadline expired");
            self.set_notice(format!(
                "EXPIRED: {} ({})",
                alert.tender_name, alert.customer
            ));
        }

        // One-time centering on today once data and the viewport both exist.
        // Later centerings (the `g` key) animate instead.
        if !self.scroll.initialized && self.canvas_area.width > 0 {
            if let Some(span) = TimelineSpan::compute(&self.filtered) {
                let target = self.view.today_scroll_target(
                    &span,
                    now.date(),
                    self.canvas_area.width as f64,
                );
                self.scroll.jump(target);
                self.scroll.initialized = true;
            }
        }

        Action::Continue
    }

    /// Handle key events.
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        // Global keys
        match key.code {
            KeyCode::Char('q') if self.mode == InputMode::Normal => return Action::Quit,
            KeyCode::Char('?') if self.mode == InputMode::Normal || self.mode == InputMode::Help => {
                self.mode = if self.mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
                return Action::Continue;
            }
            KeyCode::Esc => {
                match self.mode {
                    InputMode::Form => {
                        self.mode = InputMode::Normal;
                        self.form = None;
                    }
                    InputMode::ConfirmDelete => {
                        self.mode = InputMode::Normal;
                        self.pending_delete = None;
                    }
                    InputMode::Help => self.mode = InputMode::Normal,
                    InputMode::Normal => {
                        self.notice = None;
                        self.view.clear_hover();
                    }
                }
                return Action::Continue;
            }
            _ => {}
        }

        match self.mode {
            InputMode::Help => {
                // Any key dismisses
                self.mode = InputMode::Normal;
                Action::Continue
            }
            InputMode::Form => self.handle_form_key(key),
            InputMode::ConfirmDelete => self.handle_confirm_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),

            // Filters
            KeyCode::Char('f') => {
                self.filters.cycle_status();
                self.recompute_filtered();
            }
            KeyCode::Char('p') => {
                self.filters.cycle_priority();
                self.recompute_filtered();
            }
            KeyCode::Char('c') => {
                let customers = self.customers.clone();
                self.filters.cycle_customer(&customers);
                self.recompute_filtered();
            }
            KeyCode::Char('x') => {
                self.filters.clear();
                self.recompute_filtered();
            }

            // Timeline
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.view.zoom_in();
                self.reclamp_scroll();
            }
            KeyCode::Char('-') => {
                self.view.zoom_out();
                self.reclamp_scroll();
            }
            KeyCode::Char('t') => self.view.toggle_today(),
            KeyCode::Char('g') => self.go_to_today(),
            KeyCode::Left => self.scroll.nudge(-NUDGE_PX),
            KeyCode::Right => self.scroll.nudge(NUDGE_PX),

            // Countdown / reminders
            KeyCode::Char('b') => {
                self.notify.toggle_reminders();
                let state = if self.notify.reminder_enabled { "on" } else { "off" };
                info!(reminders = state, "reminders toggled");
            }

            // CRUD / actions
            KeyCode::Char('n') => {
                self.form = Some(TenderForm::new());
                self.mode = InputMode::Form;
            }
            KeyCode::Char('e') => {
                if let Some(tender) = self.selected_tender().cloned() {
                    self.form = Some(TenderForm::for_tender(&tender));
                    self.mode = InputMode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_tender().map(|t| t.id.clone()) {
                    self.pending_delete = Some(id);
                    self.mode = InputMode::ConfirmDelete;
                }
            }
            KeyCode::Char('r') => return Action::Refresh,
            KeyCode::Char('o') => return Action::Export,
            KeyCode::Char('m') => self.theme = self.theme.next(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            self.mode = InputMode::Normal;
            return Action::Continue;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.select_next(),
            KeyCode::BackTab | KeyCode::Up => form.select_previous(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(' ')
                if matches!(
                    form.fields[form.selected].kind,
                    FieldKind::Status | FieldKind::Priority
                ) =>
            {
                form.cycle_choice();
            }
            KeyCode::Char(c) => form.push_char(c),
            KeyCode::Enter => {
                if !form.is_last_field() {
                    form.select_next();
                    return Action::Continue;
                }
                let today = Local::now().date_naive();
                match form.to_draft(today) {
                    Ok(draft) => {
                        let editing = form.editing.clone();
                        self.form = None;
                        self.mode = InputMode::Normal;
                        return Action::Submit { draft, editing };
                    }
                    Err(msg) => form.error = Some(msg),
                }
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = InputMode::Normal;
                if let Some(id) = self.pending_delete.take() {
                    return Action::Delete(id);
                }
            }
            _ => {
                self.mode = InputMode::Normal;
                self.pending_delete = None;
            }
        }
        Action::Continue
    }

    /// Handle mouse events.  The gantt canvas gets hover tracking and
    /// horizontal wheel scrolling; the table gets wheel navigation.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        if self.mode != InputMode::Normal {
            return Action::Continue;
        }
        let pos = (mouse.column, mouse.row).into();
        let over_canvas = self.canvas_area.contains(pos);

        match mouse.kind {
            MouseEventKind::Moved => {
                if over_canvas {
                    if let Some(span) = TimelineSpan::compute(&self.filtered) {
                        let pointer_x = (mouse.column - self.canvas_area.x) as f64;
                        self.view.set_hover(
                            &span,
                            pointer_x,
                            self.scroll.offset(),
                            span.effective_width(self.view.zoom_level),
                        );
                    }
                } else {
                    self.view.clear_hover();
                }
            }
            MouseEventKind::ScrollDown => {
                if over_canvas {
                    self.scroll.nudge(NUDGE_PX);
                } else if self.table_area.contains(pos) {
                    self.select_next();
                }
            }
            MouseEventKind::ScrollUp => {
                if over_canvas {
                    self.scroll.nudge(-NUDGE_PX);
                } else if self.table_area.contains(pos) {
                    self.select_previous();
                }
            }
            MouseEventKind::ScrollRight => {
                if over_canvas {
                    self.scroll.nudge(NUDGE_PX);
                }
            }
            MouseEventKind::ScrollLeft => {
                if over_canvas {
                    self.scroll.nudge(-NUDGE_PX);
                }
            }
            _ => {}
        }
        Action::Continue
    }

    // ─────────────────────────────────────────────────────────
    // Selection / derived state helpers
    // ─────────────────────────────────────────────────────────

    pub fn selected_tender(&self) -> Option<&Tender> {
        self.table_state.selected().and_then(|i| self.filtered.get(i))
    }

    fn select_next(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map(|s| (s + 1).min(len - 1))
            .unwrap_or(0);
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map(|s| s.saturating_sub(1))
            .unwrap_or(0);
        self.table_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.filtered.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.filtered.len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    /// Rebuild the filtered list.  Both the countdown engine and the
    /// timeline read from it, so every filter change comes through here.
    pub fn recompute_filtered(&mut self) {
        self.filtered = self
            .tenders
            .iter()
            .filter(|t| self.filters.matches(t))
            .cloned()
            .collect();

        let now = Local::now().naive_local();
        self.next_deadline = next_deadline(&self.filtered, now);

        // Ensure selection is still in range
        match self.table_state.selected() {
            Some(i) if i >= self.filtered.len() => {
                self.table_state.select(if self.filtered.is_empty() {
                    None
                } else {
                    Some(self.filtered.len() - 1)
                });
            }
            None if !self.filtered.is_empty() => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    fn reclamp_scroll(&mut self) {
        if let Some(span) = TimelineSpan::compute(&self.filtered) {
            let eff = span.effective_width(self.view.zoom_level);
            self.scroll.clamp_to(eff, self.canvas_area.width as f64);
        }
    }

    fn go_to_today(&mut self) {
        let Some(span) = TimelineSpan::compute(&self.filtered) else {
            return;
        };
        let target = self.view.today_scroll_target(
            &span,
            Local::now().date_naive(),
            self.canvas_area.width as f64,
        );
        if self.scroll.initialized {
            self.scroll.scroll_to(target);
        } else {
            self.scroll.jump(target);
            self.scroll.initialized = true;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Graceful degradation for tiny terminals
        if area.width < 60 || area.height < 20 {
            let msg = Paragraph::new("Terminal too small. Resize to at least 100x30.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.error));
            frame.render_widget(msg, area);
            return;
        }

        let has_notice = self.notice.is_some();
        let mut constraints = vec![
            Constraint::Length(1), // title bar
            Constraint::Length(2), // countdown panel
            Constraint::Length(2), // stats bar
        ];
        if has_notice {
            constraints.push(Constraint::Length(1)); // notice bar
        }
        constraints.extend([
            Constraint::Fill(3),   // gantt
            Constraint::Fill(2),   // table
            Constraint::Length(7), // analytics
            Constraint::Length(1), // status bar
        ]);

        let areas: Vec<Rect> = Layout::vertical(constraints).split(area).to_vec();
        let base = if has_notice { 4 } else { 3 };

        self.render_title_bar(frame, areas[0]);
        self.render_countdown_panel(frame, areas[1]);
        self.render_stats_bar(frame, areas[2]);
        if has_notice {
            self.render_notice_bar(frame, areas[3]);
        }
        self.render_gantt(frame, areas[base]);
        self.render_table(frame, areas[base + 1]);
        self.render_analytics(frame, areas[base + 2]);
        self.render_status_bar(frame, areas[base + 3]);

        // Overlays
        match self.mode {
            InputMode::Help => self.render_help_overlay(frame, area),
            InputMode::Form => self.render_form_overlay(frame, area),
            InputMode::ConfirmDelete => self.render_confirm_overlay(frame, area),
            InputMode::Normal => {}
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let reminder_indicator = if self.notify.reminder_enabled {
            Span::styled("● REMINDERS", Style::default().fg(self.theme.success))
        } else {
            Span::styled("○ SILENT", Style::default().fg(self.theme.text_secondary))
        };

        let padding = area
            .width
            .saturating_sub(22 + self.clock.len() as u16 + 14) as usize;

        let title = Line::from(vec![
            Span::styled(
                " ◇ Tender Dashboard",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(padding)),
            Span::raw(&self.clock),
            Span::raw("  "),
            reminder_indicator,
            Span::raw(" "),
        ]);

        frame.render_widget(
            Paragraph::new(title).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_countdown_panel(&self, frame: &mut Frame, area: Rect) {
        let [label_area, clock_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        match &self.next_deadline {
            Some(nd) => {
                let label = Line::from(vec![
                    Span::styled(
                        " NEXT DEADLINE ",
                        Style::default()
                            .fg(self.theme.text_secondary)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        &nd.tender.tender_name,
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" · {}", nd.tender.customer),
                        Style::default().fg(self.theme.text_secondary),
                    ),
                    Span::styled(
                        format!(" · due {}", nd.tender.due_date.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(self.theme.text_secondary),
                    ),
                ]);
                frame.render_widget(Paragraph::new(label), label_area);

                let clock = Line::from(vec![
                    Span::styled(
                        format!(" {} ", nd.countdown.display()),
                        Style::default()
                            .fg(self.theme.severity_color(nd.severity))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        "until expiry",
                        Style::default().fg(self.theme.text_secondary),
                    ),
                ]);
                frame.render_widget(Paragraph::new(clock), clock_area);
            }
            None => {
                let label = Line::styled(
                    " NEXT DEADLINE ",
                    Style::default()
                        .fg(self.theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                );
                frame.render_widget(Paragraph::new(label), label_area);
                frame.render_widget(
                    Paragraph::new(Line::styled(
                        " No upcoming tenders",
                        Style::default().fg(self.theme.text_secondary),
                    )),
                    clock_area,
                );
            }
        }
    }

    fn render_stats_bar(&self, frame: &mut Frame, area: Rect) {
        let [counts_area, filters_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let total_value: f64 = self.filtered.iter().map(|t| t.deal_value).sum();
        let won = self.filtered.iter().filter(|t| t.status == crate::model::Status::Won).count();
        let lost = self.filtered.iter().filter(|t| t.status == crate::model::Status::Lost).count();

        let counts = Line::from(vec![
            Span::styled(
                format!(" {} Tenders", self.filtered.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("{} pipeline", stats::format_value(total_value)),
                Style::default().fg(self.theme.accent),
            ),
            Span::raw(" │ "),
            Span::styled(format!("{won} Won"), Style::default().fg(self.theme.success)),
            Span::raw(" │ "),
            Span::styled(format!("{lost} Lost"), Style::default().fg(self.theme.error)),
        ]);
        frame.render_widget(Paragraph::new(counts), counts_area);

        let filter_label = if self.filters.is_empty() {
            "All".to_string()
        } else {
            self.filters.describe().join("  ")
        };
        let filters = Line::from(vec![
            Span::styled(
                format!(" Filter: {filter_label}"),
                Style::default().fg(self.theme.text_secondary),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!("Zoom: {:.1}x", self.view.zoom_level),
                Style::default().fg(self.theme.text_secondary),
            ),
        ]);
        frame.render_widget(Paragraph::new(filters), filters_area);
    }

    fn render_notice_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some((ref msg, _)) = self.notice {
            let line = Line::from(Span::styled(
                format!(" ⚠ {msg}"),
                Style::default().fg(self.theme.bar_bg).bg(self.theme.warning),
            ));
            frame.render_widget(
                Paragraph::new(line).style(Style::default().bg(self.theme.warning)),
                area,
            );
        }
    }

    /// The gantt region: a left label column plus a scrollable canvas where
    /// one terminal cell represents one virtual pixel.  Month bands, the day
    /// ruler, bars, the today marker, and the hover crosshair all share the
    /// same geometry and the same scroll offset.
    fn render_gantt(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;

        let title = match self.view.hover {
            Some(hover) => format!(" Timeline · {} ", hover.date),
            None => " Timeline ".to_string(),
        };
        let block = Block::bordered()
            .border_style(Style::default().fg(theme.border))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(span) = TimelineSpan::compute(&self.filtered) else {
            self.canvas_area = Rect::default();
            let msg = Paragraph::new("No tenders match the current filters")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_secondary));
            frame.render_widget(msg, inner);
            return;
        };

        let [label_col, canvas] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)]).areas(inner);
        self.canvas_area = canvas;

        let eff = span.effective_width(self.view.zoom_level);
        self.scroll.clamp_to(eff, canvas.width as f64);
        let offset = self.scroll.offset();
        let width = canvas.width as usize;

        let today = Local::now().date_naive();
        let today_col = visible_col(span.position_of(today) / 100.0 * eff, offset, width);
        let hover_col = self
            .view
            .hover
            .and_then(|h| visible_col(h.position_pct / 100.0 * eff, offset, width));

        // Month band row
        let mut months = vec![(' ', Style::default().fg(theme.text_secondary)); width];
        for band in span.month_bands() {
            let start = band.start_pct / 100.0 * eff - offset;
            if let Some(col) = in_view(start, width) {
                for (i, ch) in band.label.chars().enumerate() {
                    if col + i < width {
                        months[col + i] = (
                            ch,
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                }
            }
        }

        // Day ruler row.  Day numbers only when zoom leaves room for them.
        let px_per_day = eff / span.total_days() as f64;
        let mut ruler = vec![(' ', Style::default().fg(theme.text_secondary)); width];
        for marker in span.day_markers() {
            let px = marker.position / 100.0 * eff - offset;
            let Some(col) = in_view(px, width) else {
                continue;
            };
            if px_per_day >= 4.0 {
                let label = format!("{:01}", marker.day_label);
                for (i, ch) in label.chars().enumerate() {
                    if col + i < width {
                        ruler[col + i] = (
                            ch,
                            if marker.is_new_month {
                                Style::default().fg(theme.accent)
                            } else {
                                Style::default().fg(theme.text_secondary)
                            },
                        );
                    }
                }
            } else if marker.is_new_month {
                ruler[col] = ('┆', Style::default().fg(theme.accent));
            }
        }
        overlay_marker(&mut ruler, today_col, '│', theme.success, self.view.show_today_marker);
        overlay_marker(&mut ruler, hover_col, '┊', theme.accent, true);

        let mut lines: Vec<Line> = vec![cells_to_line(months), cells_to_line(ruler)];
        let mut labels: Vec<Line> = vec![Line::raw(""), Line::raw("")];

        // One bar row per tender, windowed to the rows that fit
        let visible_rows = inner.height.saturating_sub(2) as usize;
        let selected = self.table_state.selected();
        for (idx, tender) in self.filtered.iter().take(visible_rows).enumerate() {
            let geometry = span.bar_geometry(tender, self.view.zoom_level, eff);
            let (bar_start, bar_width) = geometry.to_px(eff);

            let mut cells = vec![(' ', Style::default()); width];
            let color = theme.status_color(tender.status);
            let start = bar_start - offset;
            for i in 0..bar_width.round() as usize {
                if let Some(col) = in_view(start + i as f64, width) {
                    cells[col] = ('█', Style::default().fg(color));
                }
            }
            overlay_marker(&mut cells, today_col, '│', theme.success, self.view.show_today_marker);
            overlay_marker(&mut cells, hover_col, '┊', theme.accent, true);
            lines.push(cells_to_line(cells));

            let flag = tender.status.flag().unwrap_or("");
            let name: String = tender.tender_name.chars().take(22).collect();
            let label_style = if selected == Some(idx) {
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_secondary)
            };
            labels.push(Line::from(vec![
                Span::styled(format!("{name:<22} "), label_style),
                Span::styled(flag, Style::default().fg(theme.status_color(tender.status))),
            ]));
        }

        frame.render_widget(Paragraph::new(labels), label_col);
        frame.render_widget(Paragraph::new(lines), canvas);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        self.table_area = area;

        let header = Row::new(vec![
            "ID", "Name", "Customer", "Status", "Prio", "Value", "Start", "Expiry", "Due", "Rep",
        ])
        .style(
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|t| {
                Row::new(vec![
                    Cell::from(t.item.clone()),
                    Cell::from(Span::styled(
                        t.tender_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(t.customer.clone()),
                    Cell::from(Span::styled(
                        t.status.label(),
                        Style::default().fg(theme.status_color(t.status)),
                    )),
                    Cell::from(Span::styled(
                        t.priority.label(),
                        Style::default().fg(theme.priority_color(t.priority)),
                    )),
                    Cell::from(stats::format_value(t.deal_value)),
                    Cell::from(t.start_date.to_string()),
                    Cell::from(t.expiry_date.to_string()),
                    Cell::from(t.due_date.format("%m-%d %H:%M").to_string()),
                    Cell::from(t.assigned_sales_rep.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(theme.border))
                    .title(" Tenders "),
            )
            .row_highlight_style(
                Style::default()
                    .bg(theme.accent)
                    .fg(theme.text_on_bar)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_analytics(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;

        let block = Block::bordered()
            .border_style(Style::default().fg(theme.border))
            .title(" Analytics ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [funnel_area, customer_area, priority_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let rows = inner.height as usize;

        // Pipeline funnel (active stages only, to fit the panel)
        let funnel = stats::status_funnel(&self.filtered);
        let max_count = funnel.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let mut funnel_lines = vec![Line::styled(
            "Pipeline",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for bucket in funnel.iter().filter(|b| b.count > 0).take(rows.saturating_sub(1)) {
            let bar = "█".repeat((bucket.count * 10 / max_count).max(1));
            funnel_lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<9}", truncate_str(bucket.status.label(), 9)),
                    Style::default().fg(theme.text_secondary),
                ),
                Span::styled(bar, Style::default().fg(theme.status_color(bucket.status))),
                Span::raw(format!(" {}", bucket.count)),
            ]));
        }
        frame.render_widget(Paragraph::new(funnel_lines), funnel_area);

        // Top customers by value
        let customers = stats::customer_totals(&self.filtered);
        let max_value = customers
            .first()
            .map(|b| b.total_value)
            .unwrap_or(0.0)
            .max(1.0);
        let mut customer_lines = vec![Line::styled(
            "Value by customer",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for bucket in customers.iter().take(rows.saturating_sub(1)) {
            let bar = "█".repeat(((bucket.total_value / max_value * 10.0) as usize).max(1));
            customer_lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", truncate_str(&bucket.customer, 12)),
                    Style::default().fg(theme.text_secondary),
                ),
                Span::styled(bar, Style::default().fg(theme.accent)),
                Span::raw(format!(" {}", stats::format_value(bucket.total_value))),
            ]));
        }
        frame.render_widget(Paragraph::new(customer_lines), customer_area);

        // Priority distribution
        let priorities = stats::priority_distribution(&self.filtered);
        let max_prio = priorities.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let mut priority_lines = vec![Line::styled(
            "Priority",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for bucket in &priorities {
            let bar = "█".repeat((bucket.count * 10 / max_prio).max(1));
            priority_lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<7}", bucket.priority.label()),
                    Style::default().fg(theme.text_secondary),
                ),
                Span::styled(bar, Style::default().fg(theme.priority_color(bucket.priority))),
                Span::raw(format!(" {}", bucket.count)),
            ]));
        }
        frame.render_widget(Paragraph::new(priority_lines), priority_area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme_name = self.theme.name;

        let shortcuts = Line::from(vec![
            Span::styled(" ↑↓", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("f/p/c", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Filter  "),
            Span::styled("+/-", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Zoom  "),
            Span::styled("g", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Today  "),
            Span::styled("n/e/d", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Edit  "),
            Span::styled("b", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Reminders  "),
            Span::styled("o", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Export  "),
            Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Help  "),
            Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" Quit  │ {theme_name}")),
        ]);

        frame.render_widget(
            Paragraph::new(shortcuts).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 24, area);
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw("  ↑/k ↓/j   Move selection"),
            Line::raw("  Home/End  First/last tender"),
            Line::raw("  f         Cycle status filter"),
            Line::raw("  p         Cycle priority filter"),
            Line::raw("  c         Cycle customer filter"),
            Line::raw("  x         Clear all filters"),
            Line::raw("  + / -     Zoom timeline in/out"),
            Line::raw("  ←/→       Scroll timeline"),
            Line::raw("  g         Go to today"),
            Line::raw("  t         Toggle today marker"),
            Line::raw("  b         Toggle expiry reminders"),
            Line::raw("  n         New tender"),
            Line::raw("  e         Edit selected tender"),
            Line::raw("  d         Delete selected tender"),
            Line::raw("  r         Refresh from backend"),
            Line::raw("  o         Export text report"),
            Line::raw("  m         Cycle theme"),
            Line::raw("  ?         Toggle this help"),
            Line::raw("  q         Quit"),
            Line::raw(""),
            Line::styled(
                "Press any key to close",
                Style::default().fg(self.theme.text_secondary),
            ),
        ];

        let help = Paragraph::new(help_text).block(
            Block::bordered()
                .title(" Help ")
                .border_style(Style::default().fg(self.theme.accent))
                .style(Style::default().bg(self.theme.surface)),
        );

        frame.render_widget(help, popup_area);
    }

    fn render_form_overlay(&self, frame: &mut Frame, area: Rect) {
        let Some(form) = &self.form else {
            return;
        };

        let height = form.fields.len() as u16 + 6;
        let popup_area = centered_rect(60, height, area);
        frame.render_widget(Clear, popup_area);

        let title = if form.editing.is_some() {
            " Edit Tender "
        } else {
            " New Tender "
        };

        let mut lines: Vec<Line> = Vec::new();
        for (i, field) in form.fields.iter().enumerate() {
            let selected = i == form.selected;
            let label_style = if selected {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_secondary)
            };
            let mut spans = vec![
                Span::styled(format!(" {:<26}", field.label), label_style),
                Span::raw(field.value.clone()),
            ];
            if selected {
                spans.push(Span::styled("█", Style::default().fg(self.theme.accent)));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::raw(""));
        if let Some(ref err) = form.error {
            lines.push(Line::styled(
                format!(" ⚠ {err}"),
                Style::default().fg(self.theme.error),
            ));
        } else {
            lines.push(Line::styled(
                " Tab next field · Space cycles status/priority · Enter on last field saves",
                Style::default().fg(self.theme.text_secondary),
            ));
        }

        let form_widget = Paragraph::new(lines).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(self.theme.accent))
                .style(Style::default().bg(self.theme.surface)),
        );
        frame.render_widget(form_widget, popup_area);
    }

    fn render_confirm_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 7, area);
        frame.render_widget(Clear, popup_area);

        let name = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.tenders.iter().find(|t| &t.id == id))
            .map(|t| t.tender_name.clone())
            .unwrap_or_default();

        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("  Delete tender "),
                Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("?"),
            ]),
            Line::raw(""),
            Line::styled(
                "  y confirm · any other key cancels",
                Style::default().fg(self.theme.text_secondary),
            ),
        ];

        let confirm = Paragraph::new(lines).block(
            Block::bordered()
                .title(" Confirm Delete ")
                .border_style(Style::default().fg(self.theme.error))
                .style(Style::default().bg(self.theme.surface)),
        );
        frame.render_widget(confirm, popup_area);
    }
}

// ─────────────────────────────────────────────────────────
// Standalone helper functions
// ─────────────────────────────────────────────────────────

/// Column index for a canvas-relative px coordinate, `None` when it falls
/// outside the viewport.
fn in_view(px: f64, width: usize) -> Option<usize> {
    if px < 0.0 {
        return None;
    }
    let col = px.floor() as usize;
    (col < width).then_some(col)
}

fn visible_col(px: f64, offset: f64, width: usize) -> Option<usize> {
    in_view(px - offset, width)
}

fn overlay_marker(
    cells: &mut [(char, Style)],
    col: Option<usize>,
    glyph: char,
    color: ratatui::style::Color,
    enabled: bool,
) {
    if !enabled {
        return;
    }
    if let Some(col) = col {
        if col < cells.len() {
            cells[col] = (glyph, Style::default().fg(color));
        }
    }
}

/// Collapse a per-cell buffer into spans, grouping adjacent cells that share
/// a style.
fn cells_to_line(cells: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (ch, style) in cells {
        match run_style {
            Some(s) if s == style => run.push(ch),
            Some(s) => {
                spans.push(Span::styled(std::mem::take(&mut run), s));
                run.push(ch);
                run_style = Some(style);
            }
            None => {
                run.push(ch);
                run_style = Some(style);
            }
        }
    }
    if let Some(s) = run_style {
        spans.push(Span::styled(run, s));
    }
    Line::from(spans)
}

fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
