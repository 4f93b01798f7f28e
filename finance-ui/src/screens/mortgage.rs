use std::fmt;
use std::sync::Arc;

use finance_core::calculations::{MortgageInput, MortgageSolver};
use finance_core::history::{
    MORTGAGE_HISTORY_KEY, blank_labels, mortgage_entry, validate_mortgage_save,
};
use finance_core::keypad::Key;
use finance_core::models::{Mortgage, MortgageField};
use finance_core::{KeyValueStore, Solution, SolveError, StoreError};
use tracing::{info, warn};

use super::form::{Form, SaveOutcome, ScreenError};

/// Mortgage calculator: loan amount, annual rate, number of monthly
/// payments and the monthly payment.
pub struct MortgageScreen {
    model: Mortgage,
    form: Form<MortgageField>,
    solver: MortgageSolver,
}

impl MortgageScreen {
    pub const TITLE: &'static str = "Mortgage";

    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let form = Form::<MortgageField>::load(store).await?;
        let mut model = Mortgage {
            history: form.load_history(MORTGAGE_HISTORY_KEY).await?,
            ..Mortgage::default()
        };
        for (field, value) in form.numbers() {
            model.set(field, value);
        }

        info!(history = model.history.len(), "mortgage screen loaded");
        Ok(Self {
            model,
            form,
            solver: MortgageSolver::new(),
        })
    }

    pub fn model(&self) -> &Mortgage {
        &self.model
    }

    pub fn history(&self) -> &[String] {
        &self.model.history
    }

    pub fn form(&self) -> &Form<MortgageField> {
        &self.form
    }

    pub fn text(
        &self,
        field: MortgageField,
    ) -> &str {
        self.form.text(field)
    }

    pub fn focus(
        &mut self,
        field: MortgageField,
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
        field: MortgageField,
        text: &str,
    ) -> Result<(), StoreError> {
        self.form.set_text(field, text).await
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// Solves for the blank field and writes the rounded result into it.
    /// The rate cannot be solved for.
    pub fn calculate(&mut self) -> Result<Solution<MortgageField>, SolveError> {
        let (input, solution) = MortgageInput::from_texts(self.form.texts())
            .and_then(|input| {
                self.solver
                    .calculate(&input)
                    .map(|solution| (input, solution))
            })
            .inspect_err(|e| warn!(error = %e, "mortgage calculation refused"))?;

        for (field, value) in self.form.write_solution(&solution, |field| input.get(field)) {
            self.model.set(field, value);
        }

        Ok(solution)
    }

    /// Appends the current fields to the history and rewrites the stored
    /// list. A single blank field means the user skipped the calculation.
    pub async fn save(&mut self) -> Result<SaveOutcome, ScreenError> {
        let texts = self.form.texts();
        if let Err(e) = validate_mortgage_save(texts) {
            warn!(blank = ?blank_labels::<MortgageField>(texts), "mortgage save refused: {e}");
            return Err(e.into());
        }

        let [amount, rate, payments, payment] = texts;
        let entry = mortgage_entry(amount, rate, payments, payment);

        let outcome = self
            .form
            .append_history(MORTGAGE_HISTORY_KEY, &mut self.model.history, entry)
            .await?;

        info!(entries = outcome.entries, "mortgage saved");
        Ok(outcome)
    }
}

impl fmt::Display for MortgageScreen {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        write!(f, "{}", self.form)
    }
}
