use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hideout_core::{Category, MaterialInput};

const MAX_INPUT_LEN: usize = 64;
const MAX_QUANTITY: u32 = 999_999;
pub const MAX_START_LEVEL: u32 = 3;

/// Single-line text field with a cursor measured in characters.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.value.chars().count() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn insert(&mut self, ch: char) {
        if ch.is_control() || self.value.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    /// Apply an editing key. Returns `true` when the text changed.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            KeyCode::Backspace => {
                self.backspace();
                return true;
            }
            KeyCode::Delete => {
                self.delete();
                return true;
            }
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert(ch);
                return true;
            }
            _ => {}
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Module,
    Level,
    Item,
    NewItem,
    Category,
    Quantity,
    Materials,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Module => "Module",
            Field::Level => "Target level",
            Field::Item => "Existing item",
            Field::NewItem => "New item",
            Field::Category => "Category",
            Field::Quantity => "Quantity",
            Field::Materials => "Materials",
        }
    }

    fn adds_material(self) -> bool {
        matches!(
            self,
            Field::Item | Field::NewItem | Field::Category | Field::Quantity
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    MaterialAdded,
    MaterialRejected,
    Submit,
    Cancel,
    Delete,
}

/// Collects the materials for one module level.
#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    item_names: Vec<String>,
    item_choice: Option<usize>,
    pub new_item: TextInput,
    pub category: Category,
    pub quantity: u32,
    materials: Vec<MaterialInput>,
    list_cursor: usize,
}

impl MaterialBuilder {
    pub fn new(item_names: Vec<String>) -> Self {
        Self {
            item_names,
            item_choice: None,
            new_item: TextInput::default(),
            category: Category::Other,
            quantity: 1,
            materials: Vec::new(),
            list_cursor: 0,
        }
    }

    pub fn materials(&self) -> &[MaterialInput] {
        &self.materials
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn chosen_item(&self) -> Option<&str> {
        self.item_choice
            .and_then(|idx| self.item_names.get(idx))
            .map(String::as_str)
    }

    fn cycle_item(&mut self, delta: isize) {
        if self.item_names.is_empty() {
            return;
        }
        // Slot 0 is "no selection".
        let slots = self.item_names.len() as isize + 1;
        let current = self.item_choice.map(|idx| idx as isize + 1).unwrap_or(0);
        let next = (current + delta).rem_euclid(slots);
        self.item_choice = if next == 0 {
            None
        } else {
            Some(next as usize - 1)
        };
        if self.item_choice.is_some() {
            self.new_item.clear();
        }
    }

    fn adjust_quantity(&mut self, delta: i64) {
        let next = (self.quantity as i64 + delta).clamp(1, MAX_QUANTITY as i64);
        self.quantity = next as u32;
    }

    fn push_digit(&mut self, digit: u32) {
        self.quantity = (self.quantity.saturating_mul(10) + digit).min(MAX_QUANTITY);
    }

    /// Move the pending entry into the material list.
    ///
    /// An existing item is added by name only; a new item carries the
    /// chosen category.
    pub fn add_current(&mut self) -> bool {
        if self.quantity == 0 {
            return false;
        }
        let material = if let Some(name) = self.chosen_item() {
            MaterialInput::new(name, self.quantity)
        } else if !self.new_item.is_blank() {
            MaterialInput::new(self.new_item.value().trim(), self.quantity)
                .with_category(self.category)
        } else {
            return false;
        };
        self.materials.push(material);
        self.item_choice = None;
        self.new_item.clear();
        self.category = Category::Other;
        self.quantity = 1;
        true
    }

    fn remove_selected(&mut self) {
        if self.list_cursor < self.materials.len() {
            self.materials.remove(self.list_cursor);
        }
        self.list_cursor = self.list_cursor.min(self.materials.len().saturating_sub(1));
    }

    fn move_list_cursor(&mut self, delta: isize) {
        if self.materials.is_empty() {
            self.list_cursor = 0;
            return;
        }
        let max = self.materials.len() as isize - 1;
        self.list_cursor = (self.list_cursor as isize + delta).clamp(0, max) as usize;
    }

    fn handle_field_key(&mut self, field: Field, key: &KeyEvent) {
        match field {
            Field::Item => match key.code {
                KeyCode::Up | KeyCode::Left => self.cycle_item(-1),
                KeyCode::Down | KeyCode::Right => self.cycle_item(1),
                KeyCode::Backspace | KeyCode::Delete => self.item_choice = None,
                _ => {}
            },
            Field::NewItem => {
                if self.new_item.handle_key(key) && !self.new_item.is_blank() {
                    self.item_choice = None;
                }
            }
            Field::Category => match key.code {
                KeyCode::Left | KeyCode::Up => self.category = self.category.cycle(-1),
                KeyCode::Right | KeyCode::Down => self.category = self.category.cycle(1),
                _ => {}
            },
            Field::Quantity => match key.code {
                KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => self.adjust_quantity(1),
                KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => self.adjust_quantity(-1),
                KeyCode::Backspace => self.quantity /= 10,
                KeyCode::Char(ch) => {
                    if let Some(digit) = ch.to_digit(10) {
                        self.push_digit(digit);
                    }
                }
                _ => {}
            },
            Field::Materials => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_list_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => self.move_list_cursor(1),
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
                    self.remove_selected()
                }
                _ => {}
            },
            Field::Module | Field::Level => {}
        }
    }
}

fn next_focus(fields: &[Field], focus: Field, delta: isize) -> Field {
    let len = fields.len() as isize;
    let index = fields.iter().position(|f| *f == focus).unwrap_or(0) as isize;
    fields[(index + delta).rem_euclid(len) as usize]
}

/// Shared handling for focus movement, submission and material entry.
fn handle_common(
    fields: &[Field],
    focus: &mut Field,
    builder: &mut MaterialBuilder,
    key: &KeyEvent,
) -> Option<FormAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(FormAction::Submit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(FormAction::Cancel),
        KeyCode::Tab => {
            *focus = next_focus(fields, *focus, 1);
            Some(FormAction::None)
        }
        KeyCode::BackTab => {
            *focus = next_focus(fields, *focus, -1);
            Some(FormAction::None)
        }
        KeyCode::Enter if focus.adds_material() => Some(if builder.add_current() {
            FormAction::MaterialAdded
        } else {
            FormAction::MaterialRejected
        }),
        KeyCode::Enter => Some(FormAction::Submit),
        _ => None,
    }
}

/// State of the "add project" modal.
#[derive(Debug, Clone)]
pub struct AddProjectForm {
    module_names: Vec<String>,
    module_choice: Option<usize>,
    pub module: TextInput,
    pub level: u32,
    pub builder: MaterialBuilder,
    pub focus: Field,
}

impl AddProjectForm {
    pub const FIELDS: [Field; 7] = [
        Field::Module,
        Field::Level,
        Field::Item,
        Field::NewItem,
        Field::Category,
        Field::Quantity,
        Field::Materials,
    ];

    pub fn new(module_names: Vec<String>, item_names: Vec<String>) -> Self {
        Self {
            module_names,
            module_choice: None,
            module: TextInput::default(),
            level: 1,
            builder: MaterialBuilder::new(item_names),
            focus: Field::Module,
        }
    }

    /// Whether the typed name matches a known module exactly.
    pub fn matches_known_module(&self) -> bool {
        self.module_names.iter().any(|name| name == self.module.value())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if let Some(action) = handle_common(&Self::FIELDS, &mut self.focus, &mut self.builder, &key)
        {
            return action;
        }
        match self.focus {
            Field::Module => match key.code {
                KeyCode::Up => self.cycle_module(-1),
                KeyCode::Down => self.cycle_module(1),
                _ => {
                    if self.module.handle_key(&key) {
                        self.module_choice = None;
                    }
                }
            },
            Field::Level => match key.code {
                KeyCode::Left | KeyCode::Down => self.level = self.level.saturating_sub(1).max(1),
                KeyCode::Right | KeyCode::Up => self.level = (self.level + 1).min(MAX_START_LEVEL),
                KeyCode::Char(ch) => {
                    let level = ch.to_digit(10);
                    if let Some(level) = level.filter(|d| (1..=MAX_START_LEVEL).contains(d)) {
                        self.level = level;
                    }
                }
                _ => {}
            },
            field => self.builder.handle_field_key(field, &key),
        }
        FormAction::None
    }

    fn cycle_module(&mut self, delta: isize) {
        if self.module_names.is_empty() {
            return;
        }
        let len = self.module_names.len() as isize;
        let next = match self.module_choice {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        } as usize;
        self.module_choice = Some(next);
        let name = self.module_names[next].clone();
        self.module.set(&name);
    }
}

/// State of the "level up" modal.
#[derive(Debug, Clone)]
pub struct LevelUpForm {
    pub module_id: String,
    pub module_name: String,
    pub current_level: u32,
    pub builder: MaterialBuilder,
    pub focus: Field,
}

impl LevelUpForm {
    pub const FIELDS: [Field; 5] = [
        Field::Item,
        Field::NewItem,
        Field::Category,
        Field::Quantity,
        Field::Materials,
    ];

    pub fn new(
        module_id: String,
        module_name: String,
        current_level: u32,
        item_names: Vec<String>,
    ) -> Self {
        Self {
            module_id,
            module_name,
            current_level,
            builder: MaterialBuilder::new(item_names),
            focus: Field::Item,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
            return FormAction::Delete;
        }
        if let Some(action) = handle_common(&Self::FIELDS, &mut self.focus, &mut self.builder, &key)
        {
            return action;
        }
        self.builder.handle_field_key(self.focus, &key);
        FormAction::None
    }
}
