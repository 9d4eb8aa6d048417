//! Domain services for the trust-fund setup form.
//!
//! Two services live here: the contribution planner, which derives the
//! even monthly savings amount required to reach a goal sum by a target
//! date, and the deed renderer/exporter, which turns a completed
//! application record into the formatted trust deed document.

use super::errors::{DomainError, DomainResult};
use super::models::{FinancialPlanning, TrustApplication};
use chrono::{Datelike, NaiveDate};
use std::fs;

/// Dates are entered the way a date input widget produces them.
const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates render in the deed as "Month DD, YYYY".
const DEED_DATE_FORMAT: &str = "%B %d, %Y";

const DEED_WIDTH: usize = 72;

/// Derives the monthly contribution projection from the financial
/// planning inputs.
///
/// The projection is never stored as ground truth. It is recomputed from
/// `goal_amount` and `target_date` every time either input changes, and
/// silently absent whenever the inputs do not support it.
pub struct ContributionPlanner;

impl ContributionPlanner {
    /// Whole-calendar-month difference between two dates.
    ///
    /// Counts year and month increments only; the day of month is
    /// ignored, so the result is always an integer number of months.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use trustdeed::domain::ContributionPlanner;
    ///
    /// let from = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    /// let to = NaiveDate::from_ymd_opt(2027, 3, 1).unwrap();
    /// assert_eq!(ContributionPlanner::months_between(from, to), 12);
    /// ```
    pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
    }

    /// Computes the required monthly contribution, if the inputs allow it.
    ///
    /// Returns `None` when the goal amount is empty or not a finite
    /// number, when the target date is empty or unparseable, or when the
    /// target date is not at least one whole month after `today`. No
    /// error is surfaced for any of these; the projection is simply
    /// absent.
    pub fn project(planning: &FinancialPlanning, today: NaiveDate) -> Option<f64> {
        let goal = planning
            .goal_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|goal| goal.is_finite())?;
        let target = NaiveDate::parse_from_str(planning.target_date.trim(), INPUT_DATE_FORMAT).ok()?;

        let months = Self::months_between(today, target);
        if months <= 0 {
            return None;
        }

        Some(goal / months as f64)
    }
}

/// Renders a trust application into the deed document text.
///
/// Pure apart from the `today` argument: rendering the same record with
/// the same date is byte-identical. The declaration and signature dates
/// are stamped with `today`, not with anything stored in the record.
pub struct DeedRenderer;

impl DeedRenderer {
    /// Produces the full deed document in fixed section order: title,
    /// settlor, trustee, beneficiaries, trust details, declarations,
    /// signatures.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDate`] when a non-empty date field
    /// cannot be parsed. Empty date fields render a placeholder instead.
    pub fn render(record: &TrustApplication, today: NaiveDate) -> DomainResult<String> {
        let stamp = Self::long_date(today);
        let mut doc = String::new();

        let title = format!("{:^width$}", "TRUST DEED", width = DEED_WIDTH);
        doc.push_str(title.trim_end());
        doc.push_str("\n\n");

        doc.push_str("1. SETTLOR INFORMATION\n\n");
        doc.push_str(&format!("Full Name: {}\n", record.settlor.full_name));
        doc.push_str(&format!(
            "Date of Birth: {}\n",
            Self::format_date_field(&record.settlor.date_of_birth)?
        ));
        doc.push_str(&format!("Address: {}\n\n", record.settlor.address));

        doc.push_str("2. TRUSTEE INFORMATION\n\n");
        doc.push_str(&format!("Full Name: {}\n", record.trustee.full_name));
        doc.push_str(&format!(
            "Date of Birth: {}\n",
            Self::format_date_field(&record.trustee.date_of_birth)?
        ));
        doc.push_str(&format!("Address: {}\n\n", record.trustee.address));

        doc.push_str("3. BENEFICIARIES\n\n");
        for (index, beneficiary) in record.beneficiaries.iter().enumerate() {
            doc.push_str(&format!("Beneficiary {}\n", index + 1));
            doc.push_str(&format!("Name: {}\n", beneficiary.party.full_name));
            doc.push_str(&format!("Relationship: {}\n", beneficiary.relationship));
            doc.push_str(&format!(
                "Distribution Instructions: {}\n\n",
                beneficiary.distribution_instructions
            ));
        }

        doc.push_str("4. TRUST DETAILS\n\n");
        doc.push_str(&format!("Trust Name: {}\n", record.trust_details.name));
        doc.push_str(&format!("Type: {}\n", record.trust_details.trust_type));
        doc.push_str(&format!("Purpose: {}\n\n", record.trust_details.purpose));

        doc.push_str("DECLARATIONS\n\n");
        let declaration = format!(
            "This trust deed is made on {} between the Settlor and the \
             Trustee(s). The Settlor hereby declares their intention to create \
             a trust and transfers the initial trust property to the Trustee(s) \
             to hold upon the trusts declared in this deed.",
            stamp
        );
        doc.push_str(&Self::wrap(&declaration, DEED_WIDTH));
        doc.push('\n');

        doc.push_str("SIGNATURES\n\n");
        doc.push_str("Settlor: _________________________\n");
        doc.push_str(&format!("Date: {}\n\n", stamp));
        doc.push_str("Trustee: _________________________\n");
        doc.push_str(&format!("Date: {}\n", stamp));

        Ok(doc)
    }

    pub fn long_date(date: NaiveDate) -> String {
        date.format(DEED_DATE_FORMAT).to_string()
    }

    /// Formats an entered date string for the deed.
    ///
    /// Empty input renders a placeholder; anything else must parse as an
    /// ISO date or the export fails visibly.
    fn format_date_field(value: &str) -> DomainResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok("(not provided)".to_string());
        }

        NaiveDate::parse_from_str(trimmed, INPUT_DATE_FORMAT)
            .map(Self::long_date)
            .map_err(|_| DomainError::InvalidDate(trimmed.to_string()))
    }

    fn wrap(text: &str, width: usize) -> String {
        let mut wrapped = String::new();
        let mut line_len = 0;
        for word in text.split_whitespace() {
            if line_len > 0 && line_len + 1 + word.len() > width {
                wrapped.push('\n');
                line_len = 0;
            } else if line_len > 0 {
                wrapped.push(' ');
                line_len += 1;
            }
            wrapped.push_str(word);
            line_len += word.len();
        }
        wrapped.push('\n');
        wrapped
    }
}

/// Writes the rendered deed to a file.
///
/// One-shot operation: the file handle is transient and released once the
/// write completes, whether or not it succeeded.
pub struct DeedExporter;

impl DeedExporter {
    /// Renders the record and writes the deed to `filename`.
    ///
    /// Returns the filename written on success, or a message suitable for
    /// the status bar on failure. A malformed date in the record is the
    /// one input problem that reaches the user through this path.
    pub fn export_to_file(
        record: &TrustApplication,
        filename: &str,
        today: NaiveDate,
    ) -> Result<String, String> {
        let document = DeedRenderer::render(record, today).map_err(|e| e.to_string())?;
        match fs::write(filename, document) {
            Ok(()) => Ok(filename.to_string()),
            Err(e) => Err(DomainError::DocumentWrite(e.to_string()).to_string()),
        }
    }

    /// Default export filename: the trust's declared name, or a fixed
    /// fallback when no name has been entered.
    pub fn default_filename(record: &TrustApplication) -> String {
        let name = record.trust_details.name.trim();
        if name.is_empty() {
            "trust-deed.txt".to_string()
        } else {
            format!("{}.txt", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BeneficiaryField, FieldRef, FinancialField, PartyField, TrustDetailsField};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn planning(goal: &str, target: &str) -> FinancialPlanning {
        FinancialPlanning {
            goal_amount: goal.to_string(),
            target_date: target.to_string(),
            ..FinancialPlanning::default()
        }
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert_eq!(ContributionPlanner::months_between(from, to), 1);

        let to = NaiveDate::from_ymd_opt(2027, 3, 1).unwrap();
        assert_eq!(ContributionPlanner::months_between(from, to), 12);
    }

    #[test]
    fn test_months_between_past_is_non_positive() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(ContributionPlanner::months_between(from, to), -3);
        assert_eq!(ContributionPlanner::months_between(from, from), 0);
    }

    #[test]
    fn test_projection_for_twelve_months() {
        let result = ContributionPlanner::project(&planning("12000", "2027-03-01"), today());
        assert!((result.unwrap() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_divides_by_whole_months() {
        let result = ContributionPlanner::project(&planning("900", "2026-06-30"), today());
        // March to June is three whole months regardless of the days.
        assert!((result.unwrap() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_absent_for_past_or_same_month_target() {
        assert_eq!(ContributionPlanner::project(&planning("12000", "2025-01-01"), today()), None);
        assert_eq!(ContributionPlanner::project(&planning("12000", "2026-03-31"), today()), None);
    }

    #[test]
    fn test_projection_absent_for_unparseable_goal() {
        assert_eq!(ContributionPlanner::project(&planning("", "2027-03-01"), today()), None);
        assert_eq!(ContributionPlanner::project(&planning("a lot", "2027-03-01"), today()), None);
        // "NaN" parses as f64 but is not a usable amount.
        assert_eq!(ContributionPlanner::project(&planning("NaN", "2027-03-01"), today()), None);
    }

    #[test]
    fn test_projection_absent_for_unparseable_date() {
        assert_eq!(ContributionPlanner::project(&planning("12000", ""), today()), None);
        assert_eq!(ContributionPlanner::project(&planning("12000", "next year"), today()), None);
        assert_eq!(ContributionPlanner::project(&planning("12000", "2027-13-01"), today()), None);
    }

    fn sample_record() -> TrustApplication {
        TrustApplication::default()
            .with_field(FieldRef::Settlor(PartyField::FullName), "Jane Doe".to_string())
            .with_field(FieldRef::Settlor(PartyField::DateOfBirth), "1980-06-02".to_string())
            .with_field(FieldRef::Settlor(PartyField::Address), "1 Main Street".to_string())
            .with_field(FieldRef::Trustee(PartyField::FullName), "John Smith".to_string())
            .with_field(FieldRef::Trustee(PartyField::DateOfBirth), "1975-11-20".to_string())
            .with_field(FieldRef::Beneficiary(0, BeneficiaryField::FullName), "Ada Doe".to_string())
            .with_field(
                FieldRef::Beneficiary(0, BeneficiaryField::Relationship),
                "Daughter".to_string(),
            )
            .with_field(FieldRef::TrustDetails(TrustDetailsField::Name), "Doe Family Trust".to_string())
            .with_field(
                FieldRef::TrustDetails(TrustDetailsField::Purpose),
                "Education fund".to_string(),
            )
    }

    #[test]
    fn test_render_section_order() {
        let deed = DeedRenderer::render(&sample_record(), today()).unwrap();

        let positions: Vec<usize> = [
            "TRUST DEED",
            "1. SETTLOR INFORMATION",
            "2. TRUSTEE INFORMATION",
            "3. BENEFICIARIES",
            "4. TRUST DETAILS",
            "DECLARATIONS",
            "SIGNATURES",
        ]
        .iter()
        .map(|heading| deed.find(heading).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_render_formats_dates_long() {
        let deed = DeedRenderer::render(&sample_record(), today()).unwrap();
        assert!(deed.contains("Date of Birth: June 02, 1980"));
        assert!(deed.contains("Date of Birth: November 20, 1975"));
    }

    #[test]
    fn test_render_stamps_declaration_and_signatures_with_today() {
        let deed = DeedRenderer::render(&sample_record(), today()).unwrap();
        assert!(deed.contains("This trust deed is made on March 15, 2026"));
        // The declaration paragraph is wrapped, so compare it unwrapped.
        let unwrapped = deed.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(unwrapped.contains("between the Settlor and the Trustee(s)."));
        assert_eq!(deed.matches("Date: March 15, 2026").count(), 2);
        assert_eq!(deed.matches("_________________________").count(), 2);
    }

    #[test]
    fn test_render_one_block_per_beneficiary() {
        let record = sample_record()
            .add_beneficiary()
            .with_field(FieldRef::Beneficiary(1, BeneficiaryField::FullName), "Ben Doe".to_string());

        let deed = DeedRenderer::render(&record, today()).unwrap();

        assert!(deed.contains("Beneficiary 1\nName: Ada Doe"));
        assert!(deed.contains("Beneficiary 2\nName: Ben Doe"));
        assert_eq!(deed.matches("Beneficiary ").count(), 2);
    }

    #[test]
    fn test_render_empty_date_uses_placeholder() {
        let deed = DeedRenderer::render(&TrustApplication::default(), today()).unwrap();
        assert_eq!(deed.matches("Date of Birth: (not provided)").count(), 2);
    }

    #[test]
    fn test_render_fails_on_malformed_date() {
        let record = sample_record()
            .with_field(FieldRef::Settlor(PartyField::DateOfBirth), "yesterday".to_string());

        let err = DeedRenderer::render(&record, today()).unwrap_err();
        assert_eq!(err, DomainError::InvalidDate("yesterday".to_string()));
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_clock() {
        let record = sample_record().with_field(
            FieldRef::Financial(FinancialField::GoalAmount),
            "5000".to_string(),
        );
        let first = DeedRenderer::render(&record, today()).unwrap();
        let second = DeedRenderer::render(&record, today()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_date_stamp_tracks_render_clock() {
        let record = sample_record();
        let earlier = DeedRenderer::render(&record, today()).unwrap();
        let later_day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let later = DeedRenderer::render(&record, later_day).unwrap();
        assert!(later.contains("made on April 01, 2026"));
        assert_ne!(earlier, later);
    }

    #[test]
    fn test_default_filename_from_trust_name() {
        let record = sample_record();
        assert_eq!(DeedExporter::default_filename(&record), "Doe Family Trust.txt");
        assert_eq!(
            DeedExporter::default_filename(&TrustApplication::default()),
            "trust-deed.txt"
        );
    }

    #[test]
    fn test_export_writes_deed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deed.txt");
        let path_str = path.to_str().unwrap();

        let result = DeedExporter::export_to_file(&sample_record(), path_str, today());

        assert_eq!(result.unwrap(), path_str);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("TRUST DEED"));
        assert!(contents.contains("Jane Doe"));
    }

    #[test]
    fn test_export_surfaces_render_failure() {
        let record = sample_record()
            .with_field(FieldRef::Trustee(PartyField::DateOfBirth), "bogus".to_string());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deed.txt");

        let result = DeedExporter::export_to_file(&record, path.to_str().unwrap(), today());

        assert!(result.unwrap_err().contains("Invalid date: bogus"));
        assert!(!path.exists());
    }
}
