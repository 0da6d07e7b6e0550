//! Session-scoped reference data.
//!
//! The three lookup sheets are loaded once per session into a
//! [`ReferenceData`] value that is passed explicitly to the calculator and
//! validator. There is no process-wide cache; a refresh is an explicit
//! reload by the caller.

use std::collections::HashMap;

use crate::models::{DefectFactor, MoldSpec, Operator};
use crate::normalize::normalize_key;

/// Normalized, indexed view of the three reference sheets.
///
/// All lookups go through [`normalize_key`], applied both to the sheet
/// values at construction and to the query keys, so matching is insensitive
/// to case, accents and stray punctuation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    molds: HashMap<String, MoldSpec>,
    defects: HashMap<(String, String), DefectFactor>,
    operators: HashMap<String, Operator>,

    // Directories for populating form choices, in sheet order, deduplicated.
    mold_codes: Vec<String>,
    mold_parts: Vec<String>,
    rework_lines: Vec<String>,
    operator_codes: Vec<String>,
}

impl ReferenceData {
    pub fn new(
        molds: Vec<MoldSpec>,
        defects: Vec<DefectFactor>,
        operators: Vec<Operator>,
    ) -> Self {
        let mut data = Self::default();

        for spec in molds {
            let key = normalize_key(&spec.code);
            if key.is_empty() {
                continue;
            }
            if !data.molds.contains_key(&key) {
                data.mold_codes.push(spec.code.trim().to_string());
            }
            data.molds.insert(key, spec);
        }

        for factor in defects {
            let part = normalize_key(&factor.mold_part);
            let piece = normalize_key(&factor.piece_code);
            if !part.is_empty() && !data.mold_parts.contains(&part) {
                data.mold_parts.push(part.clone());
            }
            if let Some(line) = factor.line.as_deref() {
                let line = line.trim().to_string();
                if !line.is_empty() && !data.rework_lines.contains(&line) {
                    data.rework_lines.push(line);
                }
            }
            if !piece.is_empty() && !part.is_empty() {
                data.defects.insert((piece, part), factor);
            }
        }

        for operator in operators {
            let key = normalize_key(&operator.code);
            if key.is_empty() {
                continue;
            }
            if !data.operators.contains_key(&key) {
                data.operator_codes.push(operator.code.trim().to_string());
            }
            data.operators.insert(key, operator);
        }

        data
    }

    /// Looks up a mold spec by (normalized) code.
    pub fn mold_spec(&self, code: &str) -> Option<&MoldSpec> {
        self.molds.get(&normalize_key(code))
    }

    /// Looks up a defect factor by (normalized) piece code and mold part.
    pub fn defect_factor(&self, piece_code: &str, mold_part: &str) -> Option<&DefectFactor> {
        self.defects
            .get(&(normalize_key(piece_code), normalize_key(mold_part)))
    }

    /// Resolves an operator code to a directory entry.
    pub fn operator(&self, code: &str) -> Option<&Operator> {
        self.operators.get(&normalize_key(code))
    }

    pub fn mold_codes(&self) -> &[String] {
        &self.mold_codes
    }

    pub fn mold_parts(&self) -> &[String] {
        &self.mold_parts
    }

    pub fn rework_lines(&self) -> &[String] {
        &self.rework_lines
    }

    pub fn operator_codes(&self) -> &[String] {
        &self.operator_codes
    }

    pub fn mold_count(&self) -> usize {
        self.molds.len()
    }

    pub fn defect_factor_count(&self) -> usize {
        self.defects.len()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }
}
