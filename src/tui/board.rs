//! Kanban status board interface.
//!
//! Tasks are laid out in the five status columns. Moving a card sends a
//! relocation through `board::on_relocate` and dispatches the resulting
//! command to the store, so the board follows the same integrity and
//! persistence rules as the CLI.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::{self, Relocation, Slot};
use crate::db::{format_date, format_status};
use crate::fields::TaskStatus;
use crate::store::Store;
use crate::task::Task;
use crate::tui::colors::status_color;
use crate::views::{
    employee_name, filter_tasks, project_title, DashboardStats, ProjectFilter,
};

const COLUMN_COUNT: usize = TaskStatus::ALL.len();
const CARD_HEIGHT: usize = 5;

/// Main board application state
pub struct BoardApp<'a> {
    store: &'a mut Store,
    filter: ProjectFilter,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; COLUMN_COUNT],
    status_message: String,
    show_task_detail: bool,

    // Task ids per status column, recomputed after every change
    columns: [Vec<String>; COLUMN_COUNT],
}

impl<'a> BoardApp<'a> {
    pub fn new(store: &'a mut Store, filter: ProjectFilter) -> Self {
        let mut app = BoardApp {
            store,
            filter,
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; COLUMN_COUNT],
            status_message: String::new(),
            show_task_detail: false,
            columns: Default::default(),
        };
        app.update_columns();
        app
    }

    /// Rebuild the columns from the store's task list and current filter
    fn update_columns(&mut self) {
        let tasks = filter_tasks(&self.store.snapshot().tasks, &self.filter);
        self.column_scroll_offsets = [0; COLUMN_COUNT];
        for (i, (_, bucket)) in board::columns(&tasks).into_iter().enumerate() {
            self.columns[i] = bucket.into_iter().map(|t| t.id.clone()).collect();
        }
        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= COLUMN_COUNT {
            self.selected_column = 0;
        }
        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    fn selected_task_id(&self) -> Option<&String> {
        self.columns[self.selected_column].get(self.selected_card)
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Move the selected card one column left or right
    fn move_card(&mut self, forward: bool) {
        let Some(task_id) = self.selected_task_id().cloned() else {
            return;
        };
        let source_bucket = TaskStatus::ALL[self.selected_column];
        let destination = board::step(source_bucket, forward).map(|bucket| Slot {
            bucket,
            index: self.columns[bucket.column()].len(),
        });
        let relocation = Relocation {
            task_id: task_id.clone(),
            source: Slot {
                bucket: source_bucket,
                index: self.selected_card,
            },
            destination,
        };

        let Some(command) = board::on_relocate(&relocation) else {
            return;
        };
        match self.store.dispatch(command) {
            Ok(_) => {
                self.update_columns();
                if let Some(dest) = destination {
                    self.set_status_message(format!("Task moved to {}", format_status(dest.bucket)));
                    self.selected_column = dest.bucket.column();
                    if let Some(pos) = self.columns[self.selected_column].iter().position(|id| *id == task_id) {
                        self.selected_card = pos;
                    }
                    self.clamp_selection();
                }
            }
            Err(rejection) => self.set_status_message(rejection.to_string()),
        }
    }

    /// Advance the project filter to the next project
    fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle(&self.store.snapshot().projects);
        self.selected_column = 0;
        self.selected_card = 0;
        self.update_columns();
        let label = self.filter_label();
        self.set_status_message(format!("Showing {label}"));
    }

    fn filter_label(&self) -> String {
        match &self.filter {
            ProjectFilter::All => "All Projects".to_string(),
            ProjectFilter::Project(id) => project_title(self.store.snapshot(), id).to_string(),
        }
    }

    /// Handle keyboard input; returns true when the board should close
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }

        self.clear_status_message();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

            KeyCode::Enter => self.show_task_detail = !self.show_task_detail,

            // Card movement between columns (check first, before regular navigation)
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_card(false),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_card(true),
            KeyCode::Char('<') | KeyCode::Char('H') => self.move_card(false),
            KeyCode::Char('>') | KeyCode::Char('L') => self.move_card(true),

            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column < COLUMN_COUNT - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let column_len = self.columns[self.selected_column].len();
                if column_len > 0 && self.selected_card < column_len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('p') => self.cycle_filter(),

            KeyCode::Char('?') => {
                self.set_status_message(
                    "Help: ←/→ Column | ↑/↓ Card | Ctrl+←/→ or </> Move card | p: Project | Enter: Details | q: Exit"
                        .to_string(),
                );
            }

            _ => {}
        }
        Ok(false)
    }

    /// Render the board
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let stats = DashboardStats::from_snapshot(self.store.snapshot());
        let context = format!(
            "Board: {}  Employees: {}  Projects: {}  Completion: {}%",
            self.filter_label(),
            stats.employees,
            stats.projects,
            stats.completion_percentage
        );
        let header_text = vec![Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                context,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = (0..COLUMN_COUNT)
            .map(|_| Constraint::Ratio(1, COLUMN_COUNT as u32))
            .collect();
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let status = TaskStatus::ALL[column_index];
        let is_selected = column_index == self.selected_column;
        let color = status_color(status);

        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        let title = format!("{} ({})", format_status(status), self.columns[column_index].len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.columns[column_index].is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);

        // Keep the selected card in view
        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            if self.selected_card < start_visible {
                self.selected_card
            } else if self.selected_card >= start_visible + visible_cards {
                self.selected_card + 1 - visible_cards
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };
        self.column_scroll_offsets[column_index] = scroll_offset;

        let snapshot = self.store.snapshot();
        let mut current_y = 0;
        let mut rendered_cards = 0;
        for (card_index, task_id) in self.columns[column_index].iter().enumerate().skip(scroll_offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let Some(task) = snapshot.task(task_id) else {
                continue;
            };
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            let selected = is_selected && card_index == self.selected_card;
            f.render_widget(self.card(task, color, selected), card_area);
            current_y += CARD_HEIGHT;
            rendered_cards += 1;
        }

        let remaining = self.columns[column_index]
            .len()
            .saturating_sub(scroll_offset + rendered_cards);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y + inner.height - 1,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    /// A single task card: title, assignee and ETA
    fn card(&self, task: &Task, color: Color, is_selected: bool) -> Paragraph<'static> {
        let style = if is_selected {
            Style::default().bg(color).fg(Color::Black).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray)
        };
        let snapshot = self.store.snapshot();
        let card_text = vec![
            Line::from(task.title.clone()),
            Line::from(format!(
                "{} | {}",
                employee_name(snapshot, &task.assigned_employee_id),
                format_date(task.eta)
            )),
        ];
        Paragraph::new(card_text)
            .block(Block::default().borders(Borders::ALL))
            .style(style)
            .wrap(Wrap { trim: true })
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let total: usize = self.columns.iter().map(|col| col.len()).sum();
            format!("Tasks: {} | Ctrl+←/→: Move | p: Project | Enter: Details | ?: Help | q: Exit", total)
        };
        let bg = status_color(TaskStatus::ALL[self.selected_column]);
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(bg).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self
            .selected_task_id()
            .and_then(|id| self.store.snapshot().task(id))
        else {
            return;
        };
        let snapshot = self.store.snapshot();

        let popup_area = {
            let area = f.area();
            let popup_width = (area.width * 80) / 100;
            let popup_height = (area.height * 80) / 100;
            let x = (area.width - popup_width) / 2;
            let y = (area.height - popup_height) / 2;
            Rect::new(x, y, popup_width, popup_height)
        };
        f.render_widget(Clear, popup_area);

        let images = if task.reference_images.is_empty() {
            "-".to_string()
        } else {
            task.reference_images.join(", ")
        };
        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:    {}", format_status(task.status))),
            Line::from(format!("Project:   {}", project_title(snapshot, &task.project_id))),
            Line::from(format!("Assignee:  {}", employee_name(snapshot, &task.assigned_employee_id))),
            Line::from(format!("ETA:       {}", format_date(task.eta))),
            Line::from(format!("Images:    {}", images)),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.clone()),
        ];

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(
                Style::default()
                    .fg(status_color(task.status))
                    .add_modifier(Modifier::BOLD),
            );
        let popup = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> Store {
        Store::open(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_columns_follow_filter() {
        let mut store = store();
        let app = BoardApp::new(&mut store, ProjectFilter::Project("2".to_string()));
        assert_eq!(app.columns[0], vec!["3".to_string()]);
        assert_eq!(app.columns[3], vec!["4".to_string()]);
        assert!(app.columns[1].is_empty());
    }

    #[test]
    fn test_move_card_dispatches_status_change() {
        let mut store = store();
        {
            let mut app = BoardApp::new(&mut store, ProjectFilter::All);
            // Need To Do holds tasks 2 and 3; select task 2 and push it right.
            app.move_card(true);
            assert_eq!(app.selected_column, 1);
            assert_eq!(app.selected_task_id().map(String::as_str), Some("2"));
            assert_eq!(app.status_message, "Task moved to In Progress");
        }
        assert_eq!(store.snapshot().task("2").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_move_card_off_the_edge_is_ignored() {
        let mut store = store();
        {
            let mut app = BoardApp::new(&mut store, ProjectFilter::All);
            app.move_card(false);
            assert_eq!(app.selected_column, 0);
            assert!(app.status_message.is_empty());
        }
        assert_eq!(store.snapshot().task("2").unwrap().status, TaskStatus::NeedToDo);
    }

    #[test]
    fn test_cycle_filter_wraps_to_all() {
        let mut store = store();
        let mut app = BoardApp::new(&mut store, ProjectFilter::All);
        app.cycle_filter();
        assert_eq!(app.filter, ProjectFilter::Project("1".to_string()));
        assert_eq!(app.status_message, "Showing Website Redesign");
        app.cycle_filter();
        app.cycle_filter();
        assert_eq!(app.filter, ProjectFilter::All);
    }
}
