use std::fmt;
use std::sync::Arc;

use finance_core::calculations::{CompoundInterestInput, CompoundInterestSolver};
use finance_core::history::{
    COMPOUND_HISTORY_KEY, blank_labels, compound_entry, validate_compound_save,
};
use finance_core::keypad::Key;
use finance_core::models::{CompoundField, CompoundInterest};
use finance_core::{KeyValueStore, Solution, SolveError, StoreError};
use tracing::{info, warn};

use super::form::{Form, SaveOutcome, ScreenError};

/// Compound interest calculator: present value, future value, annual rate
/// and term in years.
pub struct CompoundInterestScreen {
    model: CompoundInterest,
    form: Form<CompoundField>,
    solver: CompoundInterestSolver,
}

impl CompoundInterestScreen {
    pub const TITLE: &'static str = "Compound Interest";

    /// Builds the screen from whatever the last session left in `store`.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let form = Form::<CompoundField>::load(store).await?;
        let mut model = CompoundInterest {
            history: form.load_history(COMPOUND_HISTORY_KEY).await?,
            ..CompoundInterest::default()
        };
        for (field, value) in form.numbers() {
            model.set(field, value);
        }

        info!(
            history = model.history.len(),
            "compound interest screen loaded"
        );
        Ok(Self {
            model,
            form,
            solver: CompoundInterestSolver::new(),
        })
    }

    pub fn model(&self) -> &CompoundInterest {
        &self.model
    }

    pub fn history(&self) -> &[String] {
        &self.model.history
    }

    pub fn form(&self) -> &Form<CompoundField> {
        &self.form
    }

    pub fn text(
        &self,
        field: CompoundField,
    ) -> &str {
        self.form.text(field)
    }

    pub fn focus(
        &mut self,
        field: CompoundField,
    ) {
        self.form.focus(field);
    }

    pub async fn press(
        &mut self,
        key: Key,
    ) -> Result<bool, StoreError> {
        self.form.press(key).await
    }

    pub async fn set_text(
        &mut self,
        field: CompoundField,
        text: &str,
    ) -> Result<(), StoreError> {
        self.form.set_text(field, text).await
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// Solves for the blank field and writes the rounded result into it.
    pub fn calculate(&mut self) -> Result<Solution<CompoundField>, SolveError> {
        let (input, solution) = CompoundInterestInput::from_texts(self.form.texts())
            .and_then(|input| {
                self.solver
                    .calculate(&input)
                    .map(|solution| (input, solution))
            })
            .inspect_err(|e| warn!(error = %e, "compound interest calculation refused"))?;

        for (field, value) in self.form.write_solution(&solution, |field| input.get(field)) {
            self.model.set(field, value);
        }

        Ok(solution)
    }

    /// Appends the current fields to the history and rewrites the stored
    /// list.
    pub async fn save(&mut self) -> Result<SaveOutcome, ScreenError> {
        let texts = self.form.texts();
        if let Err(e) = validate_compound_save(texts) {
            warn!(blank = ?blank_labels::<CompoundField>(texts), "compound interest save refused");
            return Err(e.into());
        }

        let [present, future, rate, payments] = texts;
        let entry = compound_entry(present, future, rate, payments);

        let outcome = self
            .form
            .append_history(COMPOUND_HISTORY_KEY, &mut self.model.history, entry)
            .await?;

        info!(entries = outcome.entries, "compound interest saved");
        Ok(outcome)
    }
}

impl fmt::Display for CompoundInterestScreen {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        write!(f, "{}", self.form)
    }
}

#[cfg(test)]
mod tests {
    use finance_core::models::InputField;
    use finance_core::store::MemoryStore;
    use finance_core::SaveError;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn screen_with(texts: [&str; 4]) -> (Arc<MemoryStore>, CompoundInterestScreen) {
        let store = Arc::new(MemoryStore::new());
        for (field, text) in CompoundField::ALL.into_iter().zip(texts) {
            store.set_string(field.storage_key(), text).await.unwrap();
        }
        let screen = CompoundInterestScreen::load(store.clone()).await.unwrap();
        (store, screen)
    }

    #[tokio::test]
    async fn load_populates_model_from_parseable_fields() {
        let (_store, screen) = screen_with(["1000", "", "abc", "10"]).await;

        assert_eq!(screen.model().present_value, 1000.0);
        assert_eq!(screen.model().future_value, 0.0);
        assert_eq!(screen.model().interest_rate, 0.0);
        assert_eq!(screen.model().no_of_payments, 10.0);
        assert_eq!(screen.text(CompoundField::InterestRate), "abc");
    }

    #[tokio::test]
    async fn load_reads_existing_history() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_string_list(COMPOUND_HISTORY_KEY, &["earlier".to_string()])
            .await
            .unwrap();

        let screen = CompoundInterestScreen::load(store).await.unwrap();

        assert_eq!(screen.history(), ["earlier".to_string()]);
    }

    #[tokio::test]
    async fn calculate_writes_future_value() {
        let (store, mut screen) = screen_with(["1000", "", "5", "10"]).await;

        let solution = screen.calculate().unwrap();

        assert_eq!(solution.field, CompoundField::FutureValue);
        assert_eq!(screen.text(CompoundField::FutureValue), "1647.01");
        assert!((screen.model().future_value - 1647.009_497).abs() < 1e-3);
        assert_eq!(
            store.get_string("compound_future").await.unwrap(),
            Some(String::new())
        );
    }

    #[tokio::test]
    async fn calculate_rejects_all_blank() {
        let (_store, mut screen) = screen_with(["", "", "", ""]).await;

        assert_eq!(screen.calculate(), Err(SolveError::AllFieldsEmpty));
    }

    #[tokio::test]
    async fn calculate_rejects_all_filled() {
        let (_store, mut screen) = screen_with(["1", "2", "3", "4"]).await;

        assert_eq!(screen.calculate(), Err(SolveError::AllFieldsFilled));
        assert_eq!(screen.text(CompoundField::FutureValue), "2");
    }

    #[tokio::test]
    async fn save_appends_one_entry_and_persists_list() {
        let (store, mut screen) = screen_with(["1000", "", "5", "10"]).await;
        screen.calculate().unwrap();

        let outcome = screen.save().await.unwrap();

        let expected = "Present Value is 1000, Future Value is 1647.01, Interest Rate is 5%,  No. of Payment is 10";
        assert_eq!(outcome.entry, expected);
        assert_eq!(outcome.entries, 1);
        assert_eq!(
            store.get_string_list(COMPOUND_HISTORY_KEY).await.unwrap(),
            Some(vec![expected.to_string()])
        );
    }

    #[tokio::test]
    async fn save_keeps_earlier_entries_in_order() {
        let (store, mut screen) = screen_with(["1", "2", "3", "4"]).await;
        screen.save().await.unwrap();
        screen.set_text(CompoundField::PresentValue, "9").await.unwrap();

        screen.save().await.unwrap();

        let stored = store
            .get_string_list(COMPOUND_HISTORY_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored[0].starts_with("Present Value is 1,"));
        assert!(stored[1].starts_with("Present Value is 9,"));
    }

    #[tokio::test]
    async fn save_with_blank_field_is_refused() {
        let (store, mut screen) = screen_with(["1000", "", "5", "10"]).await;

        let result = screen.save().await;

        assert!(matches!(
            result,
            Err(ScreenError::Save(SaveError::OneOrMoreFieldsEmpty))
        ));
        assert_eq!(store.get_string_list(COMPOUND_HISTORY_KEY).await.unwrap(), None);
        assert!(screen.history().is_empty());
    }

    #[tokio::test]
    async fn clear_leaves_history_and_stored_fields() {
        let (store, mut screen) = screen_with(["1", "2", "3", "4"]).await;
        screen.save().await.unwrap();

        screen.clear();

        assert_eq!(screen.form().texts(), ["", "", "", ""]);
        assert_eq!(screen.history().len(), 1);
        assert_eq!(
            store.get_string("compound_present").await.unwrap(),
            Some("1".to_string())
        );
    }
}
