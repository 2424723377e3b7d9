//! Census extraction from the daily HTML export
//!
//! The census arrives as an HTML document dump containing one or more
//! tables; the largest table by row count is the patient listing, the rest
//! are incidental headers and footers. Rows are scanned top to bottom with
//! a section cursor: a section-marker row updates the cursor, noise rows
//! (totals, page numbers) are discarded, and the remaining rows qualify as
//! patients when their registration cell passes the validity predicate.

use log::debug;
use scraper::{Html, Selector};

use crate::error::{CensusError, Result};
use crate::models::PatientRecord;
use crate::units;

/// Tokens marking a non-patient row anywhere in its first or second cell
const NOISE_TOKENS: [&str; 6] = [
    "PACIENTES",
    "TOTAL",
    "SUBTOTAL",
    "PÁGINA",
    "IMPRESIÓN",
    "1111",
];

/// Marker substring that turns a row into a section header
const SECTION_MARKER: &str = "ESPECIALIDAD:";

// Fixed positional cells of a patient row
const BED_IDX: usize = 0;
const REGISTRATION_IDX: usize = 1;
const NAME_IDX: usize = 2;
const SEX_IDX: usize = 3;
const AGE_IDX: usize = 4;
const DIAGNOSIS_IDX: usize = 6;
const ADMISSION_IDX: usize = 9;

/// Extract patient records from a raw census HTML document
///
/// Fails only when the document contains no table at all; malformed rows
/// inside the listing are skipped, never propagated.
pub fn extract(html: &str) -> Result<Vec<PatientRecord>> {
    let rows = largest_table_rows(html)?;
    Ok(extract_rows(&rows))
}

/// Collect the cell texts of the largest table in the document
fn largest_table_rows(html: &str) -> Result<Vec<Vec<String>>> {
    // Selector literals cannot fail to parse
    let table_sel = Selector::parse("table").expect("literal selector");
    let row_sel = Selector::parse("tr").expect("literal selector");
    let cell_sel = Selector::parse("th, td").expect("literal selector");

    let document = Html::parse_document(html);

    let mut largest: Option<Vec<Vec<String>>> = None;
    for table in document.select(&table_sel) {
        let rows: Vec<Vec<String>> = table
            .select(&row_sel)
            .map(|row| {
                row.select(&cell_sel)
                    .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                    .collect()
            })
            .collect();
        if largest.as_ref().is_none_or(|best| rows.len() > best.len()) {
            largest = Some(rows);
        }
    }

    largest.ok_or(CensusError::NoTableFound)
}

/// Scan table rows into patient records, tracking the section cursor
#[must_use]
pub fn extract_rows(rows: &[Vec<String>]) -> Vec<PatientRecord> {
    let mut section = units::NO_SECTION.to_string();
    let mut patients = Vec::new();

    for cells in rows {
        let first = cells.first().map_or(String::new(), |c| c.to_uppercase());
        if first.contains(SECTION_MARKER) {
            section = first;
            continue;
        }

        let registration = cells.get(REGISTRATION_IDX).map_or("", |c| c.trim());
        if is_noise(&first) || is_noise(&registration.to_uppercase()) {
            continue;
        }
        if !PatientRecord::is_valid_registration(registration) {
            continue;
        }

        // The listing has a fixed positional shape; a short row is a print
        // artifact and must not abort the remaining rows
        if cells.len() <= ADMISSION_IDX {
            debug!(
                "skipping short census row for registration {registration}: {} cells",
                cells.len()
            );
            continue;
        }

        let bed = cells[BED_IDX].trim().to_string();
        patients.push(PatientRecord {
            unit: units::classify(&bed, &section),
            bed,
            registration: registration.to_string(),
            name: cells[NAME_IDX].trim().to_string(),
            sex: cells[SEX_IDX].trim().to_string(),
            age: extract_digits(&cells[AGE_IDX]),
            diagnosis: cells[DIAGNOSIS_IDX].trim().to_string(),
            admission_date: cells[ADMISSION_IDX].trim().to_string(),
        });
    }

    patients
}

fn is_noise(cell: &str) -> bool {
    NOISE_TOKENS.iter().any(|token| cell.contains(token))
}

/// Concatenate the digit characters of a raw cell, discarding separators
fn extract_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
