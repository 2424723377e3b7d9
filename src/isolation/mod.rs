//! Isolation sheet normalization
//!
//! The isolation list is maintained by hand in a spreadsheet and published
//! as a row/column grid. The export has structural irregularities the
//! normalizer has to absorb: a title row above the header, inconsistent
//! header casing, blank cells rendered as "nan"/"None"/"NULL" depending on
//! cell history, and patients split across two physical rows when they
//! carry two precaution types. A continuation row has blank identifying
//! cells and is recognized purely by vertical adjacency.
//!
//! Consolidation is a two-pass algorithm: pass 1 assigns each row a group
//! key by scanning with a last-seen identity cursor, pass 2 folds each
//! group into one logical record.

pub mod source;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::ConsolidationPolicy;
use crate::error::{CensusError, Result};
use crate::models::IsolationRecord;

pub use source::{IsolationCache, IsolationSet, IsolationSource, SheetSource};

/// Semantic columns required of the sheet, by normalized header name
const EXPECTED_HEADERS: [&str; 5] = [
    "CAMA",
    "REGISTRO",
    "NOMBRE",
    "TIPO DE AISLAMIENTO",
    "FECHA DE TERMINO",
];

/// Positional window the semantic columns are located in: the leftmost
/// sheet column is excluded, the next eight are scanned by header name
const WINDOW_START: usize = 1;
const WINDOW_END: usize = 9;

/// Resolved positions of the semantic columns inside the window
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    bed: usize,
    registration: usize,
    name: usize,
    precaution: usize,
    end_date: usize,
}

/// Normalize raw sheet rows into consolidated isolation records
///
/// The first row is a document title and is discarded; the second row is
/// the header. Closed isolations (non-blank end date) and groups without a
/// usable registration are dropped. Reports
/// [`CensusError::MissingColumns`] when the required columns cannot be
/// located in the header window.
pub fn normalize(
    rows: &[Vec<String>],
    policy: ConsolidationPolicy,
) -> Result<Vec<IsolationRecord>> {
    let windowed: Vec<Vec<String>> = rows.iter().map(|row| window(row)).collect();

    let header = windowed.get(1).map_or(&[][..], Vec::as_slice);
    let columns = locate_columns(header)?;

    let groups = group_rows(windowed.get(2..).unwrap_or_default(), columns);

    let mut records = Vec::with_capacity(groups.len());
    for group in groups {
        if let Some(record) = fold_group(&group, columns, policy) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Slice a raw row down to the positional column window
fn window(row: &[String]) -> Vec<String> {
    row.iter()
        .take(WINDOW_END)
        .skip(WINDOW_START)
        .cloned()
        .collect()
}

/// Locate the semantic columns by normalized header name
fn locate_columns(header: &[String]) -> Result<ColumnMap> {
    let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let find = |name: &str| normalized.iter().position(|h| h == name);

    match (
        find("CAMA"),
        find("REGISTRO"),
        find("NOMBRE"),
        find("TIPO DE AISLAMIENTO"),
        find("FECHA DE TERMINO"),
    ) {
        (Some(bed), Some(registration), Some(name), Some(precaution), Some(end_date)) => {
            Ok(ColumnMap {
                bed,
                registration,
                name,
                precaution,
                end_date,
            })
        }
        _ => Err(CensusError::MissingColumns {
            expected: EXPECTED_HEADERS.iter().map(ToString::to_string).collect(),
            found: normalized,
        }),
    }
}

/// Normalize a header cell: collapse embedded newlines and runs of
/// whitespace, uppercase, and strip diacritics so casing and accent drift
/// in the sheet never breaks column location
fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
        .chars()
        .map(strip_diacritic)
        .collect()
}

const fn strip_diacritic(c: char) -> char {
    match c {
        'Á' => 'A',
        'É' => 'E',
        'Í' => 'I',
        'Ó' => 'O',
        'Ú' | 'Ü' => 'U',
        _ => c,
    }
}

/// Whether a cell is blank-like
///
/// The upstream export renders empty cells inconsistently, so the literal
/// strings "nan", "None" and "NULL" in any casing count as blank.
#[must_use]
pub fn is_blank(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || matches!(trimmed.to_lowercase().as_str(), "nan" | "none" | "null")
}

fn non_blank(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    if is_blank(trimmed) { None } else { Some(trimmed) }
}

/// Pass 1: forward-fill bed and name, then group rows by that identity
///
/// Rows are grouped by (bed, name) in first-seen order. A continuation row
/// inherits the nearest preceding non-blank identity cells.
fn group_rows(rows: &[Vec<String>], columns: ColumnMap) -> Vec<Vec<Vec<String>>> {
    let mut order: Vec<Vec<Vec<String>>> = Vec::new();
    let mut index: FxHashMap<(String, String), usize> = FxHashMap::default();
    let mut last_bed = String::new();
    let mut last_name = String::new();

    for row in rows {
        let cell = |i: usize| row.get(i).map_or("", String::as_str);

        if let Some(bed) = non_blank(cell(columns.bed)) {
            last_bed = bed.to_string();
        }
        if let Some(name) = non_blank(cell(columns.name)) {
            last_name = name.to_string();
        }

        let key = (last_bed.clone(), last_name.clone());
        match index.get(&key) {
            Some(&slot) => order[slot].push(row.clone()),
            None => {
                index.insert(key, order.len());
                order.push(vec![row.clone()]);
            }
        }
    }

    order
}

/// Pass 2: fold one row group into a logical record
///
/// Returns `None` for closed isolations (non-blank consolidated end date)
/// and for groups lacking a usable registration.
fn fold_group(
    group: &[Vec<String>],
    columns: ColumnMap,
    policy: ConsolidationPolicy,
) -> Option<IsolationRecord> {
    let pick = |col: usize| consolidate_column(group, col, policy);

    // A continuation row may carry the only non-blank end date; the
    // consolidated value decides whether the isolation is closed
    if pick(columns.end_date).is_some() {
        return None;
    }

    let registration = pick(columns.registration)?;

    // Union across the group's rows, deduplicated in first-seen order
    let precautions: SmallVec<[String; 2]> = group
        .iter()
        .filter_map(|row| row.get(columns.precaution).and_then(|c| non_blank(c)))
        .unique()
        .map(ToString::to_string)
        .collect();

    Some(IsolationRecord {
        bed: pick(columns.bed).unwrap_or_default(),
        registration,
        name: pick(columns.name).unwrap_or_default(),
        precaution_types: precautions,
        end_date: None,
    })
}

/// Consolidate one column across a row group according to the policy
fn consolidate_column(
    group: &[Vec<String>],
    col: usize,
    policy: ConsolidationPolicy,
) -> Option<String> {
    let first_non_blank = || {
        group
            .iter()
            .find_map(|row| row.get(col).and_then(|c| non_blank(c)))
            .map(ToString::to_string)
    };

    match policy {
        ConsolidationPolicy::FirstNonBlank => first_non_blank(),
        ConsolidationPolicy::MostComplete => {
            let seed = group
                .iter()
                .min_by_key(|row| row.iter().filter(|c| is_blank(c)).count())?;
            seed.get(col)
                .and_then(|c| non_blank(c))
                .map(ToString::to_string)
                .or_else(first_non_blank)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(data: &[&[&str]]) -> Vec<Vec<String>> {
        let mut rows = vec![
            // Title row and header row, with the leftmost column excluded
            // from the window filled by a running number
            vec!["CONTROL DE AISLAMIENTOS".to_string()],
            ["NO.", "CAMA", "REGISTRO", "NOMBRE", "TIPO DE\nAISLAMIENTO", "FECHA DE TÉRMINO"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        ];
        rows.extend(
            data.iter()
                .map(|r| r.iter().map(ToString::to_string).collect()),
        );
        rows
    }

    #[test]
    fn continuation_rows_consolidate() {
        let rows = sheet(&[
            &["1", "101", "123456", "Ana Pérez", "Contact", ""],
            &["2", "", "", "", "Droplet", ""],
        ]);
        let records = normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bed, "101");
        assert_eq!(records[0].registration, "123456");
        assert_eq!(records[0].name, "Ana Pérez");
        assert_eq!(records[0].joined_precautions(), "Contact / Droplet");
        assert!(records[0].is_active());
    }

    #[test]
    fn closed_isolations_are_dropped() {
        let rows = sheet(&[
            &["1", "101", "123456", "Ana Pérez", "Contact", ""],
            &["2", "", "", "", "Droplet", "12/02/2026"],
            &["3", "202", "654321", "Luis Gómez", "Contact", ""],
        ]);
        let records = normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap();
        // The continuation row carried the only end date for Ana Pérez
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].registration, "654321");
    }

    #[test]
    fn blank_like_tokens_are_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("nan"));
        assert!(is_blank("NaN"));
        assert!(is_blank("None"));
        assert!(is_blank("NULL"));
        assert!(!is_blank("0"));
    }

    #[test]
    fn missing_columns_are_structural() {
        let rows = vec![
            vec!["TITLE".to_string()],
            vec!["NO.".to_string(), "BED".to_string(), "WHO".to_string()],
        ];
        let err = normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap_err();
        assert!(matches!(err, CensusError::MissingColumns { .. }));
    }

    #[test]
    fn normalization_is_idempotent_per_fetch() {
        let rows = sheet(&[
            &["1", "101", "123456", "Ana Pérez", "Contact", ""],
            &["2", "", "", "", "Droplet", ""],
        ]);
        let a = normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap();
        let b = normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].registration, b[0].registration);
        assert_eq!(a[0].precaution_types, b[0].precaution_types);
    }
}
