use crossterm::event::KeyCode;

use crate::{
    data::DataStore,
    report::Report,
    resolver::ResolveMode,
    selection::{Choice, MAX_AGE, MIN_AGE, Selection, clamp_age},
};

/// Pola formularza w panelu bocznym, od góry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Country,
    Age,
    Gender,
    Brand,
    Source,
    Submit,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Country,
        Field::Age,
        Field::Gender,
        Field::Brand,
        Field::Source,
        Field::Submit,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Field::Country => "Country",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Brand => "Brand",
            Field::Source => "Source",
            Field::Submit => "Submit",
        }
    }
}

pub struct AppState {
    pub store: DataStore,
    pub mode: ResolveMode,
    pub selection: Selection,
    pub focused: usize,
    pub report: Option<Report>,
    /// Wpisywany wiek, dopóki nie opuścimy pola
    age_input: Option<String>,
}

impl AppState {
    pub const HELP_TEXT: &'static str = "\
↑/↓: choose field
←/→: change value
0-9: type age, PgUp/PgDn: ±10
Enter: submit
q / Esc: quit";

    pub fn new(store: DataStore, mode: ResolveMode, selection: Selection) -> Self {
        Self { store, mode, selection, focused: 0, report: None, age_input: None }
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focused]
    }

    /// Tekst pola wieku, łącznie z niezatwierdzonymi cyframi.
    pub fn age_text(&self) -> String {
        self.age_input.clone().unwrap_or_else(|| self.selection.age.to_string())
    }

    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::Country => self.selection.country.label().to_string(),
            Field::Age => self.age_text(),
            Field::Gender => self.selection.gender.label().to_string(),
            Field::Brand => self.selection.brand.label().to_string(),
            Field::Source => self.selection.source.label().to_string(),
            Field::Submit => String::new(),
        }
    }

    pub fn submit(&mut self) {
        self.commit_age();
        self.report = Some(Report::build(&mut self.store, &self.selection, self.mode));
    }

    fn commit_age(&mut self) {
        if let Some(text) = self.age_input.take() {
            if let Ok(age) = text.parse::<u32>() {
                self.selection.age = clamp_age(age);
            }
        }
    }

    fn step(&mut self, forward: bool) {
        let field = self.focused_field();
        if field == Field::Age {
            self.shift_age(if forward { 1 } else { -1 });
            return;
        }
        let s = &mut self.selection;
        match field {
            Field::Country => s.country = if forward { s.country.next() } else { s.country.prev() },
            Field::Gender => s.gender = if forward { s.gender.next() } else { s.gender.prev() },
            Field::Brand => s.brand = if forward { s.brand.next() } else { s.brand.prev() },
            Field::Source => s.source = if forward { s.source.next() } else { s.source.prev() },
            Field::Age | Field::Submit => {}
        }
    }

    fn shift_age(&mut self, delta: i64) {
        self.commit_age();
        let age = (i64::from(self.selection.age) + delta).clamp(i64::from(MIN_AGE), i64::from(MAX_AGE));
        self.selection.age = age as u32;
    }

    fn type_digit(&mut self, digit: char) {
        let mut text = self.age_input.take().unwrap_or_default();
        if text.len() >= 3 {
            text.clear();
        }
        text.push(digit);
        self.age_input = Some(text);
    }

    /// Zwraca true, jeśli trzeba wyjść
    pub fn handle_input(&mut self, key: KeyCode) -> bool {
        use KeyCode::*;
        match key {
            Char('q') | Esc => return true,
            Up | BackTab => {
                self.commit_age();
                if self.focused > 0 {
                    self.focused -= 1;
                }
            }
            Down | Tab => {
                self.commit_age();
                if self.focused + 1 < Field::ALL.len() {
                    self.focused += 1;
                }
            }
            Left => self.step(false),
            Right => self.step(true),
            PageUp if self.focused_field() == Field::Age => self.shift_age(10),
            PageDown if self.focused_field() == Field::Age => self.shift_age(-10),
            Char(c) if c.is_ascii_digit() && self.focused_field() == Field::Age => self.type_digit(c),
            Backspace if self.focused_field() == Field::Age => {
                let mut text = self.age_input.take().unwrap_or_else(|| self.selection.age.to_string());
                text.pop();
                self.age_input = Some(text);
            }
            Enter => self.submit(),
            _ => {}
        }
        false
    }
}
