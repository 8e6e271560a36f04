use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use indexmap::IndexMap;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde_json::Value;

use crate::domain::{Collection, ItemSchema, ScalarValue, parse_item_schema};
use crate::editor::{EditorCommand, apply_command, collection_from_value, collection_to_value};
use crate::render::{self, EditTarget, ItemRenderer, Row, RowKind, UiContext, build_rows};

const HELP_TEXT: &str = "Tab/↓ next • Shift+Tab/↑ prev • type to edit • Ctrl+N new item • \
                         Ctrl+A add entry • Ctrl+D remove • Ctrl+S save • Ctrl+Q quit";
const READY_STATUS: &str = "Ready. Press Ctrl+S to save the collection.";

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub confirm_exit: bool,
    pub show_help: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            confirm_exit: true,
            show_help: true,
        }
    }
}

impl UiOptions {
    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }
}

type ChangeHook = Box<dyn FnMut(&Value)>;

/// Terminal editor for a schema-described collection.
///
/// The collection is held under controlled-value discipline: each applied
/// edit replaces the whole collection value, the optional change hook
/// receives the rebuilt JSON, and `run` returns the final value on save.
pub struct ListUI {
    schema: Value,
    collection: Option<Value>,
    title: Option<String>,
    options: UiOptions,
    renderer: Option<Box<dyn ItemRenderer>>,
    on_change: Option<ChangeHook>,
}

impl ListUI {
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            collection: None,
            title: None,
            options: UiOptions::default(),
            renderer: None,
            on_change: None,
        }
    }

    pub fn with_collection(mut self, collection: Value) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn ItemRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn on_change(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    pub fn run(self) -> Result<Value> {
        let ListUI {
            schema,
            collection,
            title,
            options,
            renderer,
            on_change,
        } = self;

        let item_schema = parse_item_schema(&schema)?;
        let collection = collection
            .map(|value| collection_from_value(&value, &item_schema))
            .unwrap_or_default();

        let mut app = App::new(item_schema, collection, title, options, renderer, on_change);
        app.run()
    }
}

struct App {
    schema: ItemSchema,
    collection: Collection,
    rows: Vec<Row>,
    cursor: usize,
    status_message: String,
    dirty: bool,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
    title: Option<String>,
    options: UiOptions,
    renderer: Option<Box<dyn ItemRenderer>>,
    on_change: Option<ChangeHook>,
}

impl App {
    fn new(
        schema: ItemSchema,
        collection: Collection,
        title: Option<String>,
        options: UiOptions,
        renderer: Option<Box<dyn ItemRenderer>>,
        on_change: Option<ChangeHook>,
    ) -> Self {
        let mut app = Self {
            schema,
            collection,
            rows: Vec::new(),
            cursor: 0,
            status_message: READY_STATUS.to_string(),
            dirty: false,
            exit_armed: false,
            should_quit: false,
            result: None,
            title,
            options,
            renderer,
            on_change,
        };
        app.rebuild_rows();
        app
    }

    fn run(&mut self) -> Result<Value> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(_, _) => {}
                Event::Mouse(_) => {}
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }

        if let Some(value) = self.result.take() {
            Ok(value)
        } else {
            Err(anyhow!("user exited without saving"))
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            Some(HELP_TEXT)
        } else {
            None
        };
        render::draw(
            frame,
            UiContext {
                title: self.title.as_deref(),
                rows: &self.rows,
                cursor: self.cursor,
                status_message: &self.status_message,
                dirty: self.dirty,
                help,
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') | KeyCode::Char('N') => self.on_append_item(),
                KeyCode::Char('a') | KeyCode::Char('A') => self.on_append_entry(),
                KeyCode::Char('d') | KeyCode::Char('D') => self.on_remove(),
                KeyCode::Char('s') | KeyCode::Char('S') => self.on_save(),
                KeyCode::Char('q')
                | KeyCode::Char('Q')
                | KeyCode::Char('c')
                | KeyCode::Char('C') => self.on_exit(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_cursor(1),
            KeyCode::BackTab | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Esc => {
                self.exit_armed = false;
                self.status_message = READY_STATUS.to_string();
            }
            KeyCode::Enter => self.on_enter(),
            KeyCode::Backspace => self.edit_focused(EditKey::Backspace),
            KeyCode::Char(ch) => self.edit_focused(EditKey::Char(ch)),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as i32;
        let next = (self.cursor as i32 + delta).rem_euclid(len);
        self.cursor = next as usize;
        self.exit_armed = false;
    }

    fn on_enter(&mut self) {
        let Some(row) = self.rows.get(self.cursor).cloned() else {
            return;
        };
        match row.kind {
            RowKind::Append => {
                if let Some(list) = row.list_scope {
                    if self.dispatch(EditorCommand::AppendEntry { list }) {
                        self.status_message = "Added entry".to_string();
                    }
                }
            }
            RowKind::Input(_) if row.multiline => self.edit_focused(EditKey::Newline),
            _ => {}
        }
    }

    fn on_append_item(&mut self) {
        let header_index = self.rows.len();
        if self.dispatch(EditorCommand::AppendItem) {
            self.cursor = header_index.min(self.rows.len().saturating_sub(1));
            self.status_message = format!("Added item {}", self.collection.len());
        }
    }

    fn on_append_entry(&mut self) {
        let Some(list) = self
            .rows
            .get(self.cursor)
            .and_then(|row| row.list_scope.clone())
        else {
            self.status_message = "Focus a list before Ctrl+A add".to_string();
            return;
        };
        if self.dispatch(EditorCommand::AppendEntry { list }) {
            self.status_message = "Added entry".to_string();
        }
    }

    fn on_remove(&mut self) {
        let Some(row) = self.rows.get(self.cursor).cloned() else {
            self.status_message = "Nothing to remove".to_string();
            return;
        };
        let (command, message) = match row.entry_scope {
            Some((list, entry)) => (
                EditorCommand::RemoveEntry { list, entry },
                "Removed entry".to_string(),
            ),
            None => (
                EditorCommand::RemoveItem { item: row.item },
                "Removed item".to_string(),
            ),
        };
        if self.dispatch(command) {
            self.status_message = message;
        }
    }

    fn on_save(&mut self) {
        self.exit_armed = false;
        let value = collection_to_value(&self.collection);
        self.status_message = "Collection saved".to_string();
        self.result = Some(value);
        self.should_quit = true;
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status_message =
                "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
            return;
        }
        self.should_quit = true;
        self.result = None;
    }

    fn edit_focused(&mut self, key: EditKey) {
        let Some(row) = self.rows.get(self.cursor).cloned() else {
            return;
        };
        let RowKind::Input(target) = row.kind else {
            return;
        };
        let Some(text) = apply_edit_key(&row.text, key) else {
            return;
        };

        let command = match target {
            EditTarget::ItemScalar { field, numeric } => EditorCommand::SetScalar {
                item: row.item,
                field,
                value: scalar_from_input(numeric, &text),
            },
            EditTarget::EntryValue { list, entry } => EditorCommand::SetEntry {
                list,
                entry,
                value: text,
            },
            EditTarget::EntryField {
                list,
                entry,
                field,
                numeric,
            } => {
                let mut patch = IndexMap::new();
                patch.insert(
                    field,
                    crate::domain::FieldValue::Scalar(scalar_from_input(numeric, &text)),
                );
                EditorCommand::PatchEntry { list, entry, patch }
            }
            EditTarget::CustomLine { line } => {
                let Some(renderer) = self.renderer.as_deref() else {
                    return;
                };
                let Some(index) = self.collection.position_of(row.item) else {
                    return;
                };
                let Some(patch) = renderer.apply(&self.collection.items[index], line, &text) else {
                    return;
                };
                EditorCommand::MergeItem {
                    item: row.item,
                    patch,
                }
            }
        };

        if self.dispatch(command) {
            self.status_message = format!("Editing {}", row.label);
        }
    }

    fn dispatch(&mut self, command: EditorCommand) -> bool {
        match apply_command(&self.collection, &self.schema, &command) {
            Some(next) => {
                self.collection = next;
                self.dirty = true;
                self.exit_armed = false;
                self.notify_change();
                self.rebuild_rows();
                true
            }
            None => false,
        }
    }

    fn notify_change(&mut self) {
        if let Some(hook) = self.on_change.as_mut() {
            hook(&collection_to_value(&self.collection));
        }
    }

    fn rebuild_rows(&mut self) {
        self.rows = build_rows(&self.collection, &self.schema, self.renderer.as_deref());
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }
}

enum EditKey {
    Char(char),
    Backspace,
    Newline,
}

fn apply_edit_key(current: &str, key: EditKey) -> Option<String> {
    let mut text = current.to_string();
    match key {
        EditKey::Char(ch) => text.push(ch),
        EditKey::Newline => text.push('\n'),
        EditKey::Backspace => {
            text.pop()?;
        }
    }
    Some(text)
}

/// Interpret typed text for a field. Number-kind fields carry a JSON number
/// whenever the buffer parses as one and plain text otherwise; the editor
/// itself never coerces.
fn scalar_from_input(numeric: bool, text: &str) -> ScalarValue {
    if numeric {
        let trimmed = text.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return ScalarValue::Number(int.into());
        }
        if let Ok(float) = trimmed.parse::<f64>()
            && let Some(num) = serde_json::Number::from_f64(float)
        {
            return ScalarValue::Number(num);
        }
    }
    ScalarValue::Text(text.to_string())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}
