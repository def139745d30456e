// file: src/pipeline/validator.rs
// description: side-effect free validation of decoded rows against the field rules
// reference: input validation patterns

use crate::models::import::{
    COLUMN_BUSINESS_NAME, COLUMN_CHAPTER_NAME, COLUMN_EMAIL, COLUMN_MEMBER_ROLE,
    COLUMN_MEMBERSHIP_END_DATE, COLUMN_NAME, COLUMN_PHONE, COLUMN_STATUS,
};
use crate::models::{
    Chapter, ImportRow, MemberRole, NewMember, RowDefect, Status, ValidationOutcome,
    reported_row_number,
};
use crate::utils::Validator;
use tracing::debug;

/// A row that passed every rule, ready for the commit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRow {
    pub row_number: usize,
    /// Name exactly as written in the sheet, used to label commit failures.
    pub label: String,
    pub member: NewMember,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub invalid_rows: usize,
    pub valid: Vec<ValidRow>,
    pub defects: Vec<RowDefect>,
}

impl ValidationReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.defects.iter().map(ToString::to_string).collect()
    }
}

pub struct RowValidator<'a> {
    chapters: &'a [Chapter],
    available_chapters: String,
}

impl<'a> RowValidator<'a> {
    pub fn new(chapters: &'a [Chapter]) -> Self {
        let available_chapters = chapters
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            chapters,
            available_chapters,
        }
    }

    /// Evaluates all eight rules for the data row at 0-based `index`.
    pub fn validate(&self, row: &ImportRow, index: usize) -> ValidationOutcome {
        let row_number = reported_row_number(index);
        let mut messages = Vec::new();

        let name = row.get(COLUMN_NAME);
        if !name.is_some_and(|n| n.trim().chars().count() >= 2) {
            messages.push("Name is required and must be at least 2 characters".to_string());
        }

        let email = row.get(COLUMN_EMAIL);
        if !email.is_some_and(Validator::is_valid_email) {
            messages.push("Valid email is required".to_string());
        }

        let business_name = row.get(COLUMN_BUSINESS_NAME);
        if !business_name.is_some_and(|b| !b.trim().is_empty()) {
            messages.push("Business name is required".to_string());
        }

        let phone = row.get(COLUMN_PHONE);
        if !phone.is_some_and(Validator::is_valid_phone) {
            messages.push("Valid phone number is required".to_string());
        }

        let chapter_name = row.get(COLUMN_CHAPTER_NAME);
        if !chapter_name.is_some_and(|c| self.has_chapter(c)) {
            messages.push(format!(
                "Valid chapter name is required. Available chapters: {}",
                self.available_chapters
            ));
        }

        let member_role = row
            .get(COLUMN_MEMBER_ROLE)
            .and_then(|r| r.parse::<MemberRole>().ok());
        if member_role.is_none() {
            messages.push(format!(
                "Member role must be one of: {}",
                MemberRole::allowed_values()
            ));
        }

        let end_date = row.get(COLUMN_MEMBERSHIP_END_DATE);
        if !end_date.is_some_and(|d| Validator::parse_calendar_date(d).is_some()) {
            messages.push(
                "Valid membership end date is required (YYYY-MM-DD format)".to_string(),
            );
        }

        let status = row
            .get(COLUMN_STATUS)
            .and_then(|s| s.parse::<Status>().ok());
        if status.is_none() {
            messages.push("Status must be either 'active' or 'inactive'".to_string());
        }

        match (
            name,
            email,
            business_name,
            phone,
            chapter_name,
            member_role,
            end_date,
            status,
        ) {
            (
                Some(name),
                Some(email),
                Some(business_name),
                Some(phone),
                Some(chapter_name),
                Some(member_role),
                Some(end_date),
                Some(status),
            ) if messages.is_empty() => ValidationOutcome::Valid(NewMember {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                business_name: business_name.trim().to_string(),
                phone: phone.trim().to_string(),
                chapter_name: chapter_name.trim().to_string(),
                member_role,
                membership_end_date: end_date.trim().to_string(),
                status,
            }),
            _ => ValidationOutcome::Invalid(
                messages
                    .into_iter()
                    .map(|message| RowDefect {
                        row: row_number,
                        message,
                    })
                    .collect(),
            ),
        }
    }

    fn has_chapter(&self, name: &str) -> bool {
        self.chapters.iter().any(|c| c.name == name)
    }
}

/// Runs the validation pass over every row, keeping valid rows in file order.
pub fn validate_rows(rows: &[ImportRow], chapters: &[Chapter]) -> ValidationReport {
    let validator = RowValidator::new(chapters);
    let mut report = ValidationReport {
        total_rows: rows.len(),
        ..ValidationReport::default()
    };

    for (index, row) in rows.iter().enumerate() {
        match validator.validate(row, index) {
            ValidationOutcome::Valid(member) => report.valid.push(ValidRow {
                row_number: reported_row_number(index),
                label: row.display_name().to_string(),
                member,
            }),
            ValidationOutcome::Invalid(defects) => {
                debug!(
                    "Row {} rejected with {} defect(s)",
                    reported_row_number(index),
                    defects.len()
                );
                report.invalid_rows += 1;
                report.defects.extend(defects);
            }
        }
    }

    report
}
