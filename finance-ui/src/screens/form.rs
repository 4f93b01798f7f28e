//! The four keypad-driven text fields shared by every calculator screen.

use std::fmt;
use std::sync::Arc;

use finance_core::keypad::{Key, KeypadState, Transition};
use finance_core::models::InputField;
use finance_core::history::append_entry;
use finance_core::{KeyValueStore, SaveError, Solution, StoreError};
use thiserror::Error;
use tracing::{debug, trace};

use crate::utils::{parse_optional_number, with_caret};

/// Why a save did not complete.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The fields were not ready to be saved; shown to the user.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// The history list could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A successfully saved history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub entry: String,
    /// Length of the history list after the save.
    pub entries: usize,
}

/// Field texts, the focused field and the store they are written to.
///
/// Every field is persisted on its own key whenever the user edits it.
/// Programmatic writes ([`Form::clear`], [`Form::write_result`]) stay in
/// memory.
pub struct Form<F: InputField> {
    fields: [KeypadState; 4],
    focused: Option<F>,
    store: Arc<dyn KeyValueStore>,
}

impl<F: InputField> Form<F> {
    /// Restores each field from its own key; a missing key leaves the field
    /// blank.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let mut fields: [KeypadState; 4] = Default::default();
        for field in F::ALL {
            if let Some(text) = store.get_string(field.storage_key()).await? {
                fields[field.index()] = KeypadState::at_end(text);
            }
        }

        Ok(Self {
            fields,
            focused: None,
            store,
        })
    }

    pub fn text(
        &self,
        field: F,
    ) -> &str {
        self.fields[field.index()].buffer()
    }

    /// Texts of all fields, in [`InputField::ALL`] order.
    pub fn texts(&self) -> [&str; 4] {
        F::ALL.map(|field| self.text(field))
    }

    pub fn state(
        &self,
        field: F,
    ) -> &KeypadState {
        &self.fields[field.index()]
    }

    pub fn focused(&self) -> Option<F> {
        self.focused
    }

    /// Routes subsequent key presses to `field`.
    pub fn focus(
        &mut self,
        field: F,
    ) {
        debug!(field = %field, "focus");
        self.focused = Some(field);
    }

    /// Applies a key press to the focused field. Returns whether the field
    /// value changed; a change is written to the field's key.
    pub async fn press(
        &mut self,
        key: Key,
    ) -> Result<bool, StoreError> {
        let Some(field) = self.focused else {
            trace!(%key, "no focused field, key ignored");
            return Ok(false);
        };

        let slot = &mut self.fields[field.index()];
        let Transition { state, changed } = slot.apply(key);
        *slot = state;

        if changed {
            self.persist(field).await?;
        }
        Ok(changed)
    }

    /// Replaces the text of `field` as a direct user edit. The cursor moves
    /// to the end and the text is persisted.
    pub async fn set_text(
        &mut self,
        field: F,
        text: &str,
    ) -> Result<(), StoreError> {
        self.fields[field.index()] = KeypadState::at_end(text);
        self.persist(field).await
    }

    /// Writes a computed value into `field` without persisting it.
    pub fn write_result(
        &mut self,
        field: F,
        text: String,
    ) {
        self.fields[field.index()] = KeypadState::at_end(text);
    }

    /// Blanks every field in memory. Persisted values are left alone.
    pub fn clear(&mut self) {
        self.fields = Default::default();
    }

    async fn persist(
        &self,
        field: F,
    ) -> Result<(), StoreError> {
        let text = self.text(field);
        debug!(key = field.storage_key(), text, "field edited");
        self.store.set_string(field.storage_key(), text).await
    }

    /// Fields whose text parses as a number, for seeding the model.
    pub(crate) fn numbers(&self) -> impl Iterator<Item = (F, f64)> + '_ {
        F::ALL
            .into_iter()
            .filter_map(|field| parse_optional_number(self.text(field)).map(|value| (field, value)))
    }

    /// Writes the rounded solution into its field and returns the value of
    /// every field, with `known` supplying the ones the user entered.
    pub(crate) fn write_solution(
        &mut self,
        solution: &Solution<F>,
        known: impl Fn(F) -> Option<f64>,
    ) -> [(F, f64); 4] {
        self.write_result(solution.field, solution.display_value());
        F::ALL.map(|field| (field, known(field).unwrap_or(solution.value)))
    }

    /// Reads a history list; a missing key is an empty history.
    pub(crate) async fn load_history(
        &self,
        key: &str,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self.store.get_string_list(key).await?.unwrap_or_default())
    }

    /// Stores `history` with `entry` appended under `key`. `history` is only
    /// extended once the store accepted the new list.
    pub(crate) async fn append_history(
        &self,
        key: &str,
        history: &mut Vec<String>,
        entry: String,
    ) -> Result<SaveOutcome, StoreError> {
        let mut updated = history.clone();
        append_entry(&mut updated, entry.clone());
        self.store.set_string_list(key, &updated).await?;
        *history = updated;

        Ok(SaveOutcome {
            entry,
            entries: history.len(),
        })
    }
}

impl<F: InputField> fmt::Display for Form<F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for field in F::ALL {
            let state = self.state(field);
            if self.focused == Some(field) {
                writeln!(
                    f,
                    "> {:<16} {}",
                    field.label(),
                    with_caret(state.buffer(), state.cursor())
                )?;
            } else {
                writeln!(f, "  {:<16} {}", field.label(), state.buffer())?;
            }
        }
        Ok(())
    }
}
