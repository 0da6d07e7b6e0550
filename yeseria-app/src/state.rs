//! Form session state.
//!
//! Raw field values as entered, parsed into a typed [`Submission`] when
//! the user saves. Field-level problems are collected into `errors` so
//! every bad field is reported at once; the rule chain in
//! `yeseria_core::validation` then runs on the typed value.

use chrono::NaiveDate;

use yeseria_core::{OperatorSlot, Submission};

/// One in-progress form. Header fields are kept as strings until save.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Production date, `YYYY-MM-DD`.
    pub date: String,
    pub mold_code: String,
    /// Total molds produced by the run.
    pub quantity_total: String,
    pub slots: Vec<OperatorSlot>,

    /// Field parse errors from the last save attempt.
    pub errors: Vec<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the form into a [`Submission`], collecting errors if invalid.
    pub fn to_submission(&mut self) -> Result<Submission, ()> {
        self.errors.clear();

        let date = match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors
                    .push(format!("fecha inválida '{}', use AAAA-MM-DD", self.date));
                None
            }
        };

        let quantity = match self.quantity_total.trim().parse::<u32>() {
            Ok(quantity) => Some(quantity),
            Err(_) => {
                self.errors.push(format!(
                    "cantidad inválida '{}', use un entero",
                    self.quantity_total
                ));
                None
            }
        };

        if !self.errors.is_empty() {
            return Err(());
        }

        Ok(Submission {
            date: date.unwrap(),
            mold_code: self.mold_code.clone(),
            quantity_total: quantity.unwrap(),
            slots: self.slots.clone(),
        })
    }

    /// Reset every field for a fresh entry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
