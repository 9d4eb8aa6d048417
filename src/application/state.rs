//! Application state management for the trust-fund setup form.
//!
//! This module contains the form state controller: the application
//! record, the four-step navigation, the field editing buffer, and the
//! derived monthly-contribution projection.

use crate::domain::{
    BeneficiaryField, ContributionPlanner, DeedExporter, FieldRef, FinancialField, PartyField,
    TrustApplication, TrustDetailsField,
};
use chrono::NaiveDate;

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and what the
/// status bar displays.
#[derive(Debug)]
pub enum AppMode {
    /// Form navigation mode - arrow keys move between fields
    Form,
    /// Field editing mode - user is typing into the selected field
    Editing,
    /// Help screen is displayed
    Help,
    /// Deed export dialog is open
    ExportDeed,
}

/// The four sequential steps of the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    BasicInfo,
    Beneficiaries,
    FinancialGoals,
    Review,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::BasicInfo,
        FormStep::Beneficiaries,
        FormStep::FinancialGoals,
        FormStep::Review,
    ];

    /// One-based step number shown in the step indicator.
    pub fn number(self) -> usize {
        match self {
            FormStep::BasicInfo => 1,
            FormStep::Beneficiaries => 2,
            FormStep::FinancialGoals => 3,
            FormStep::Review => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::BasicInfo => "Basic Info",
            FormStep::Beneficiaries => "Beneficiaries",
            FormStep::FinancialGoals => "Financial Goals",
            FormStep::Review => "Review",
        }
    }

    /// Next step, clamped at Review.
    pub fn next(self) -> Self {
        match self {
            FormStep::BasicInfo => FormStep::Beneficiaries,
            FormStep::Beneficiaries => FormStep::FinancialGoals,
            FormStep::FinancialGoals => FormStep::Review,
            FormStep::Review => FormStep::Review,
        }
    }

    /// Previous step, clamped at Basic Info.
    pub fn back(self) -> Self {
        match self {
            FormStep::BasicInfo => FormStep::BasicInfo,
            FormStep::Beneficiaries => FormStep::BasicInfo,
            FormStep::FinancialGoals => FormStep::Beneficiaries,
            FormStep::Review => FormStep::FinancialGoals,
        }
    }
}

/// Main application state for the terminal form.
///
/// Holds the trust application record, the current step and mode, and
/// everything needed to render the UI. The record itself is only ever
/// replaced wholesale through its copy-on-write operations.
///
/// # Examples
///
/// ```
/// use trustdeed::application::{App, FormStep};
///
/// let app = App::default();
/// assert_eq!(app.step, FormStep::BasicInfo);
/// assert_eq!(app.record.beneficiaries.len(), 1);
/// ```
#[derive(Debug)]
pub struct App {
    /// The trust application record being filled in
    pub record: TrustApplication,
    /// Current form step
    pub step: FormStep,
    /// Current application mode
    pub mode: AppMode,
    /// Index of the selected field within the current step's field list
    pub selected_field: usize,
    /// Top-most field visible in the viewport
    pub field_scroll: usize,
    /// Viewport height in field rows (for scrolling calculations)
    pub viewport_rows: usize,
    /// Current input buffer (for editing mode)
    pub input: String,
    /// Cursor position within the input buffer
    pub cursor_position: usize,
    /// Input buffer for the export filename dialog
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Derived monthly contribution, absent when the inputs do not allow it
    pub projection: Option<f64>,
    /// Whether the projection panel has been requested
    pub projection_visible: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            record: TrustApplication::default(),
            step: FormStep::BasicInfo,
            mode: AppMode::Form,
            selected_field: 0,
            field_scroll: 0,
            viewport_rows: 16,
            input: String::new(),
            cursor_position: 0,
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
            projection: None,
            projection_visible: false,
        }
    }
}

impl App {
    /// The editable fields of the current step, in display order.
    ///
    /// The review step has no editable fields.
    pub fn step_fields(&self) -> Vec<FieldRef> {
        match self.step {
            FormStep::BasicInfo => {
                let mut fields = Vec::with_capacity(16);
                fields.extend(PartyField::ALL.iter().map(|&f| FieldRef::Settlor(f)));
                fields.extend(PartyField::ALL.iter().map(|&f| FieldRef::Trustee(f)));
                fields.extend(TrustDetailsField::ALL.iter().map(|&f| FieldRef::TrustDetails(f)));
                fields
            }
            FormStep::Beneficiaries => {
                let mut fields = Vec::with_capacity(self.record.beneficiaries.len() * 6);
                for index in 0..self.record.beneficiaries.len() {
                    fields.extend(
                        BeneficiaryField::ALL
                            .iter()
                            .map(|&f| FieldRef::Beneficiary(index, f)),
                    );
                }
                fields
            }
            FormStep::FinancialGoals => {
                FinancialField::ALL.iter().map(|&f| FieldRef::Financial(f)).collect()
            }
            FormStep::Review => Vec::new(),
        }
    }

    /// The field currently under the selection, if the step has any.
    pub fn selected_field_ref(&self) -> Option<FieldRef> {
        self.step_fields().get(self.selected_field).copied()
    }

    pub fn select_next_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 && self.selected_field < count - 1 {
            self.selected_field += 1;
            self.ensure_field_visible();
        }
    }

    pub fn select_previous_field(&mut self) {
        if self.selected_field > 0 {
            self.selected_field -= 1;
            self.ensure_field_visible();
        }
    }

    /// Moves to the next step. Clamped so the step never leaves [1,4].
    pub fn advance_step(&mut self) {
        self.set_step(self.step.next());
    }

    /// Moves to the previous step. Clamped so the step never leaves [1,4].
    pub fn retreat_step(&mut self) {
        self.set_step(self.step.back());
    }

    fn set_step(&mut self, step: FormStep) {
        if self.step != step {
            self.step = step;
            self.selected_field = 0;
            self.field_scroll = 0;
        }
    }

    /// Switches to editing mode for the currently selected field.
    ///
    /// Loads the field's current value into the input buffer and
    /// positions the cursor at the end. Does nothing on the review step.
    pub fn start_editing(&mut self) {
        if let Some(field) = self.selected_field_ref() {
            self.mode = AppMode::Editing;
            self.input = self.record.field(field).to_string();
            self.cursor_position = self.input.len();
            self.status_message = None;
        }
    }

    /// Completes editing and replaces the field with the input content.
    ///
    /// The record is swapped for a new one with the single field changed.
    /// When the edited field is one of the projection's dependencies the
    /// projection is recomputed synchronously. Returns to form mode.
    pub fn finish_editing(&mut self, today: NaiveDate) {
        if let Some(field) = self.selected_field_ref() {
            self.record = self.record.with_field(field, self.input.clone());

            if matches!(
                field,
                FieldRef::Financial(FinancialField::GoalAmount)
                    | FieldRef::Financial(FinancialField::TargetDate)
            ) {
                self.refresh_projection(today);
            }
        }

        self.mode = AppMode::Form;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Cancels editing and returns to form mode without saving changes.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Form;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Recomputes the derived projection from the current record.
    pub fn refresh_projection(&mut self, today: NaiveDate) {
        self.projection = ContributionPlanner::project(&self.record.financial_planning, today);
    }

    /// Recomputes the projection on explicit request and shows the panel.
    pub fn show_projection(&mut self, today: NaiveDate) {
        self.refresh_projection(today);
        self.projection_visible = true;
    }

    /// The projection formatted for display, when present.
    pub fn projection_display(&self) -> Option<String> {
        self.projection
            .map(|amount| format!("${:.2} / month", amount))
    }

    /// Appends an all-empty beneficiary and moves the selection to it.
    pub fn add_beneficiary(&mut self) {
        self.record = self.record.add_beneficiary();
        let count = self.record.beneficiaries.len();
        if self.step == FormStep::Beneficiaries {
            self.selected_field = (count - 1) * BeneficiaryField::ALL.len();
            self.ensure_field_visible();
        }
        self.status_message = Some(format!("Added beneficiary {}", count));
    }

    /// Removes the beneficiary under the selection.
    ///
    /// The first beneficiary is never removable, and the list never drops
    /// below one entry; both cases are quiet no-ops apart from the status
    /// message.
    pub fn remove_selected_beneficiary(&mut self) {
        let Some(FieldRef::Beneficiary(index, _)) = self.selected_field_ref() else {
            return;
        };

        if index == 0 {
            self.status_message = Some("The first beneficiary cannot be removed".to_string());
            return;
        }

        self.record = self.record.remove_beneficiary(index);

        let count = self.step_fields().len();
        if count > 0 && self.selected_field >= count {
            self.selected_field = count - 1;
        }
        self.ensure_field_visible();
        self.status_message = Some(format!("Removed beneficiary {}", index + 1));
    }

    /// Switches to the export dialog to prompt for a deed filename.
    ///
    /// Initializes the filename input from the trust's declared name.
    pub fn start_export(&mut self) {
        self.mode = AppMode::ExportDeed;
        self.filename_input = DeedExporter::default_filename(&self.record);
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for the deed export.
    ///
    /// Returns the filename input if not empty, otherwise the fixed
    /// fallback name.
    pub fn export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "trust-deed.txt".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Cancels filename input and returns to form mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Form;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of a deed export.
    ///
    /// Sets the status message based on whether the export succeeded and
    /// returns to form mode.
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Deed exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Form;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of handing the record to the submission sink.
    pub fn set_submit_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(destination) => {
                self.status_message = Some(format!("Trust fund created ({})", destination));
            }
            Err(error) => {
                self.status_message = Some(format!("Submit failed: {}", error));
            }
        }
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    /// Ensures the selected field is visible by adjusting the scroll.
    pub fn ensure_field_visible(&mut self) {
        if self.selected_field < self.field_scroll {
            self.field_scroll = self.selected_field;
        } else if self.selected_field >= self.field_scroll + self.viewport_rows {
            self.field_scroll = self.selected_field.saturating_sub(self.viewport_rows - 1);
        }
    }
}
