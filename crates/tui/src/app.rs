use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hideout_core::{
    totals::group_by_category, JsonFileStore, MaterialProgress, Outcome, ProjectTracker,
    SeedEvent, SeedLoader, Skip,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::forms::{AddProjectForm, Field, FormAction, LevelUpForm, MaterialBuilder};

const TICK_RATE: Duration = Duration::from_millis(250);
const MATERIAL_HINT: &str = "Pick an item or type a name, with a quantity of at least 1";

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

enum Modal {
    AddProject(AddProjectForm),
    LevelUp(LevelUpForm),
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal front end over a [`ProjectTracker`].
pub struct HideoutApp {
    tracker: ProjectTracker<JsonFileStore>,
    seeds: SeedLoader,
    state: UiState,
    modal: Option<Modal>,
    seed_rx: Option<mpsc::Receiver<SeedEvent>>,
    theme: Theme,
}

impl HideoutApp {
    pub fn new(tracker: ProjectTracker<JsonFileStore>, seeds: SeedLoader) -> Self {
        Self {
            tracker,
            seeds,
            state: UiState::default(),
            modal: None,
            seed_rx: None,
            theme: Theme::default(),
        }
    }

    pub fn attach_seed(&mut self, receiver: mpsc::Receiver<SeedEvent>) {
        self.seed_rx = Some(receiver);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.state.set_status(message.into());
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let mut seed_rx = self.seed_rx.take();

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            if let Some(rx) = seed_rx.as_mut() {
                let mut seed_closed = false;
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        if !self.process_app_event(maybe_event) {
                            break;
                        }
                    }
                    maybe_seed = rx.recv() => {
                        match maybe_seed {
                            Some(event) => self.handle_seed_event(event),
                            None => seed_closed = true,
                        }
                    }
                }
                if seed_closed {
                    seed_rx = None;
                }
            } else {
                let maybe_event = event_rx.recv().await;
                if !self.process_app_event(maybe_event) {
                    break;
                }
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                self.handle_key(key);
                true
            }
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn handle_seed_event(&mut self, event: SeedEvent) {
        match event {
            SeedEvent::Updated { catalog, metadata } => {
                info!(
                    items = metadata.item_count,
                    modules = metadata.module_count,
                    "Seed refreshed"
                );
                self.seeds.refresh(catalog.clone(), metadata.clone());
                self.tracker.merge_seed(catalog);
                self.state.set_status(format!("Seed refreshed: {}", metadata.describe()));
            }
            SeedEvent::Error(err) => {
                error!(?err, "Seed refresh failed");
                self.state.set_status(format!("Seed refresh failed: {err}"));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.modal.take() {
            Some(Modal::AddProject(mut form)) => {
                let action = form.handle_key(key);
                self.modal = Some(Modal::AddProject(form));
                self.handle_add_action(action);
            }
            Some(Modal::LevelUp(mut form)) => {
                let action = form.handle_key(key);
                self.modal = Some(Modal::LevelUp(form));
                self.handle_level_up_action(action);
            }
            None => self.handle_main_key(key),
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        let count = self.tracker.projects().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_project(1, count),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_project(-1, count),
            KeyCode::Char('h') | KeyCode::Left => self.state.move_material(-1),
            KeyCode::Char('l') | KeyCode::Right => {
                let len = self.selected_progress().len();
                self.state.move_material(1);
                self.state.clamp_material(len);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_expanded(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_selected_material(true),
            KeyCode::Char('-') => self.adjust_selected_material(false),
            KeyCode::Char('a') => self.open_add_project(),
            KeyCode::Char('u') => self.open_level_up(),
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(module_id) = self.selected_module_id() {
                    let outcome = self.tracker.delete_project(&module_id);
                    self.report("Project deleted", outcome);
                    self.state.clamp_project(self.tracker.projects().len());
                }
            }
            _ => {}
        }
    }

    fn selected_module_id(&self) -> Option<String> {
        self.tracker
            .projects()
            .get(self.state.project_cursor)
            .map(|p| p.module_id.clone())
    }

    fn selected_progress(&self) -> Vec<MaterialProgress> {
        self.selected_module_id()
            .map(|id| self.tracker.project_progress(&id))
            .unwrap_or_default()
    }

    fn module_name(&self, module_id: &str) -> String {
        self.tracker
            .catalog()
            .module(module_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Unknown Module".to_string())
    }

    fn toggle_expanded(&mut self) {
        let Some(module_id) = self.selected_module_id() else {
            return;
        };
        if self.state.expanded.as_deref() == Some(module_id.as_str()) {
            self.state.expanded = None;
        } else {
            self.state.expanded = Some(module_id);
            self.state.material_cursor = 0;
        }
    }

    fn adjust_selected_material(&mut self, increment: bool) {
        let Some(module_id) = self.selected_module_id() else {
            return;
        };
        if self.state.expanded.as_deref() != Some(module_id.as_str()) {
            self.state.set_status("Expand a project (Enter) to adjust materials".to_string());
            return;
        }
        let progress = self.tracker.project_progress(&module_id);
        let Some(material) = progress.get(self.state.material_cursor) else {
            self.state.set_status("No materials to track at this level".to_string());
            return;
        };
        let item_id = material.item.id.clone();
        let name = material.item.name.clone();
        let outcome = if increment {
            self.tracker.increment_owned(&module_id, &item_id)
        } else {
            self.tracker.decrement_owned(&module_id, &item_id)
        };
        let owned = self
            .tracker
            .project(&module_id)
            .map(|p| p.owned(&item_id))
            .unwrap_or(0);
        self.report(&format!("{name}: {owned}/{}", material.required), outcome);
    }

    fn open_add_project(&mut self) {
        let catalog = self.tracker.catalog();
        let mut module_names: Vec<String> =
            catalog.modules().values().map(|m| m.name.clone()).collect();
        module_names.sort_by_key(|name| name.to_lowercase());
        let item_names = catalog
            .items_by_name()
            .into_iter()
            .map(|item| item.name.clone())
            .collect();
        self.modal = Some(Modal::AddProject(AddProjectForm::new(
            module_names,
            item_names,
        )));
        self.state
            .set_status("Add project: Tab moves, Enter adds material, Ctrl-S saves".to_string());
    }

    fn open_level_up(&mut self) {
        let Some(project) = self
            .tracker
            .projects()
            .get(self.state.project_cursor)
            .cloned()
        else {
            self.state.set_status("No project selected".to_string());
            return;
        };
        let item_names = self
            .tracker
            .catalog()
            .items_by_name()
            .into_iter()
            .map(|item| item.name.clone())
            .collect();
        let name = self.module_name(&project.module_id);
        self.state.set_status(format!("Level up {name}: Ctrl-S confirms, Ctrl-D deletes"));
        self.modal = Some(Modal::LevelUp(LevelUpForm::new(
            project.module_id,
            name,
            project.level,
            item_names,
        )));
    }

    fn handle_add_action(&mut self, action: FormAction) {
        match action {
            FormAction::Cancel => {
                self.modal = None;
                self.state.set_status("Add project cancelled".to_string());
            }
            FormAction::MaterialAdded => self.state.set_status("Material added".to_string()),
            FormAction::MaterialRejected => self.state.set_status(MATERIAL_HINT.to_string()),
            FormAction::Submit => {
                let Some(Modal::AddProject(form)) = self.modal.take() else {
                    return;
                };
                let name = form.module.value().trim().to_string();
                let existing = self.tracker.find_module_by_name(&name).map(str::to_string);
                let outcome = self.tracker.add_project(
                    &name,
                    form.level,
                    form.builder.materials(),
                    existing.as_deref(),
                );
                if matches!(outcome, Outcome::Unchanged(Skip::EmptyName)) {
                    self.state.set_status("Module name is required".to_string());
                    self.modal = Some(Modal::AddProject(form));
                    return;
                }
                if outcome.is_applied() {
                    self.state.project_cursor = self.tracker.projects().len().saturating_sub(1);
                }
                self.report(&format!("Added {name} at level {}", form.level), outcome);
            }
            FormAction::None | FormAction::Delete => {}
        }
    }

    fn handle_level_up_action(&mut self, action: FormAction) {
        match action {
            FormAction::Cancel => {
                self.modal = None;
                self.state.set_status("Level up cancelled".to_string());
            }
            FormAction::MaterialAdded => self.state.set_status("Material added".to_string()),
            FormAction::MaterialRejected => self.state.set_status(MATERIAL_HINT.to_string()),
            FormAction::Submit => {
                let Some(Modal::LevelUp(form)) = self.modal.take() else {
                    return;
                };
                let outcome = self
                    .tracker
                    .level_up(&form.module_id, form.builder.materials());
                self.state.material_cursor = 0;
                self.report(
                    &format!("{} is now at level {}", form.module_name, form.current_level + 1),
                    outcome,
                );
            }
            FormAction::Delete => {
                let Some(Modal::LevelUp(form)) = self.modal.take() else {
                    return;
                };
                let outcome = self.tracker.delete_project(&form.module_id);
                self.state.clamp_project(self.tracker.projects().len());
                self.report(&format!("Deleted {}", form.module_name), outcome);
            }
            FormAction::None => {}
        }
    }

    fn report(&mut self, success: &str, outcome: Outcome) {
        let message = match &outcome {
            Outcome::Unchanged(reason) => format!("Nothing changed: {reason}"),
            Outcome::Applied(_) => match outcome.sync_error() {
                Some(err) => format!("{success} (not saved: {err})"),
                None => success.to_string(),
            },
        };
        self.state.set_status(message);
    }

    fn draw(&self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(size);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[0]);

        self.render_projects(frame, body[0]);
        self.render_materials(frame, body[1]);
        self.render_status(frame, chunks[1]);

        match &self.modal {
            Some(Modal::AddProject(form)) => self.render_add_project(frame, form),
            Some(Modal::LevelUp(form)) => self.render_level_up(frame, form),
            None => {}
        }
    }

    fn render_projects(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Active Projects");
        let projects = self.tracker.projects();
        if projects.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No active projects.",
                    Style::default().fg(self.theme.muted),
                )),
                Line::from("Press 'a' to add one."),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0;
        for (idx, project) in projects.iter().enumerate() {
            let selected = idx == self.state.project_cursor;
            let expanded = self.state.expanded.as_deref() == Some(project.module_id.as_str());
            if selected {
                selected_line = lines.len();
            }
            let marker = if selected {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let mut name_style = Style::default()
                .fg(self.theme.primary_fg)
                .add_modifier(Modifier::BOLD);
            if selected {
                name_style = name_style.bg(self.theme.selection_bg);
            }
            lines.push(Line::from(vec![
                marker,
                Span::styled(self.module_name(&project.module_id), name_style),
                Span::styled(
                    format!(" · Level {}", project.level),
                    Style::default().fg(self.theme.muted),
                ),
            ]));

            if !expanded {
                continue;
            }
            let progress = self.tracker.project_progress(&project.module_id);
            if progress.is_empty() {
                lines.push(Line::from(Span::styled(
                    "    Nothing to collect at this level",
                    Style::default().fg(self.theme.muted),
                )));
            }
            for (material_idx, material) in progress.iter().enumerate() {
                let focused = selected && material_idx == self.state.material_cursor;
                if focused {
                    selected_line = lines.len();
                }
                let count_style = if material.is_complete() {
                    Style::default().fg(self.theme.success)
                } else {
                    Style::default().fg(self.theme.warning)
                };
                let mut name_style = Style::default().fg(self.theme.primary_fg);
                if focused {
                    name_style = name_style.bg(self.theme.selection_bg);
                }
                lines.push(Line::from(vec![
                    Span::raw(if focused { "   › " } else { "     " }),
                    Span::styled(material.item.name.clone(), name_style),
                    Span::raw("  "),
                    Span::styled(
                        format!("{}/{}", material.owned, material.required),
                        count_style,
                    ),
                ]));
            }
        }

        let height = area.height.saturating_sub(2) as usize;
        let scroll = selected_line.saturating_sub(height.saturating_sub(1));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_materials(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Required Materials");
        let totals = self.tracker.calculate_totals();
        if totals.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "No materials needed.",
                Style::default().fg(self.theme.muted),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for (category, group) in group_by_category(&totals) {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                category.title(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for total in group {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(total.item.name, Style::default().fg(self.theme.primary_fg)),
                    Span::styled(
                        format!("  x{}", total.quantity),
                        Style::default().fg(self.theme.warning),
                    ),
                ]));
            }
        }
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let help = if self.modal.is_some() {
            "Tab/Shift-Tab field  Enter add material  Ctrl-S confirm  Esc cancel"
        } else {
            "j/k select  Enter expand  h/l material  +/- owned  a add  u level up  x delete  q quit"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(help, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_add_project(&self, frame: &mut Frame, form: &AddProjectForm) {
        let area = modal_area(frame.size(), 64, 22);
        frame.render_widget(Clear, area);

        let module_hint = if form.matches_known_module() {
            Span::styled("  (known module)", Style::default().fg(self.theme.success))
        } else if form.module.is_blank() {
            Span::styled("  (Up/Down to browse)", Style::default().fg(self.theme.muted))
        } else {
            Span::styled("  (new module)", Style::default().fg(self.theme.muted))
        };
        let levels: Vec<Span> = (1..=crate::forms::MAX_START_LEVEL)
            .map(|level| {
                if level == form.level {
                    Span::styled(
                        format!("[{level}] "),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(format!(" {level}  "))
                }
            })
            .collect();

        let mut lines = vec![
            self.field_line(
                form.focus,
                Field::Module,
                vec![Span::raw(form.module.value().to_string()), module_hint],
            ),
            self.field_line(form.focus, Field::Level, levels),
            Line::from(""),
        ];
        lines.extend(self.material_lines(form.focus, &form.builder));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Add New Project"),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        if form.focus == Field::Module {
            set_field_cursor(frame, area, 0, form.module.cursor());
        } else if form.focus == Field::NewItem {
            set_field_cursor(frame, area, 4, form.builder.new_item.cursor());
        }
    }

    fn render_level_up(&self, frame: &mut Frame, form: &LevelUpForm) {
        let area = modal_area(frame.size(), 64, 20);
        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "Current level: {} → New level: {}",
                    form.current_level,
                    form.current_level + 1
                ),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(Span::styled(
                "Levels already defined keep their own materials.",
                Style::default().fg(self.theme.muted),
            )),
        ];
        lines.extend(self.material_lines(form.focus, &form.builder));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "Ctrl-D",
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" delete project"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Level Up: {}", form.module_name)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        if form.focus == Field::NewItem {
            set_field_cursor(frame, area, 3, form.builder.new_item.cursor());
        }
    }

    fn material_lines(&self, focus: Field, builder: &MaterialBuilder) -> Vec<Line<'static>> {
        let item = match builder.chosen_item() {
            Some(name) => Span::raw(name.to_string()),
            None => Span::styled("-- none --", Style::default().fg(self.theme.muted)),
        };
        let mut lines = vec![
            self.field_line(focus, Field::Item, vec![item]),
            self.field_line(
                focus,
                Field::NewItem,
                vec![Span::raw(builder.new_item.value().to_string())],
            ),
            self.field_line(
                focus,
                Field::Category,
                vec![Span::raw(format!("‹ {} ›", builder.category))],
            ),
            self.field_line(
                focus,
                Field::Quantity,
                vec![Span::raw(builder.quantity.to_string())],
            ),
            Line::from(""),
            self.field_line(
                focus,
                Field::Materials,
                vec![Span::raw(format!("({})", builder.materials().len()))],
            ),
        ];
        if builder.materials().is_empty() {
            lines.push(Line::from(Span::styled(
                "    No materials added yet.",
                Style::default().fg(self.theme.muted),
            )));
        }
        for (idx, material) in builder.materials().iter().enumerate() {
            let selected = focus == Field::Materials && idx == builder.list_cursor();
            let style = if selected {
                Style::default().bg(self.theme.selection_bg)
            } else {
                Style::default()
            };
            let category = material
                .category
                .map(|c| format!("  [{c}]"))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{} x{}", material.name, material.quantity), style),
                Span::styled(category, Style::default().fg(self.theme.muted)),
            ]));
        }
        lines
    }

    fn field_line(&self, focus: Field, field: Field, value: Vec<Span<'static>>) -> Line<'static> {
        let label_style = if focus == field {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let mut spans = vec![Span::styled(format!("{:<14}", field.label()), label_style)];
        spans.extend(value);
        Line::from(spans)
    }
}

fn modal_area(frame_area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame_area.width.saturating_sub(2)).max(24);
    let height = height.min(frame_area.height.saturating_sub(2)).max(8);
    centered_rect(width, height, frame_area)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn set_field_cursor(frame: &mut Frame, area: Rect, row: u16, cursor: usize) {
    let x = (area.x + 1 + 14 + cursor as u16).min(area.x + area.width.saturating_sub(2));
    let y = (area.y + 1 + row).min(area.y + area.height.saturating_sub(2));
    frame.set_cursor(x, y);
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    project_cursor: usize,
    material_cursor: usize,
    expanded: Option<String>,
    status: String,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            project_cursor: 0,
            material_cursor: 0,
            expanded: None,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn move_project(&mut self, delta: isize, count: usize) {
        if count == 0 {
            self.project_cursor = 0;
            return;
        }
        let next = (self.project_cursor as isize + delta).clamp(0, count as isize - 1) as usize;
        if next != self.project_cursor {
            self.material_cursor = 0;
        }
        self.project_cursor = next;
    }

    fn clamp_project(&mut self, count: usize) {
        self.project_cursor = self.project_cursor.min(count.saturating_sub(1));
    }

    fn move_material(&mut self, delta: isize) {
        self.material_cursor = (self.material_cursor as isize + delta).max(0) as usize;
    }

    fn clamp_material(&mut self, len: usize) {
        self.material_cursor = self.material_cursor.min(len.saturating_sub(1));
    }
}
