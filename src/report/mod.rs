//! Supply-report routing
//!
//! Downstream report generators render one sheet per organizational unit
//! plus one for active isolations, and a coordination-level view for
//! supply planning. This module stops at ordered row sets: it decides
//! which bucket each reconciled record lands in and in what order the
//! buckets appear, leaving byte-level workbook formatting to the
//! generators.

use crate::models::ReconciledRecord;
use crate::units::{self, CoordinatingGroup};

/// Fixed ordering of the therapy units at the front of the per-unit report
pub const THERAPY_UNIT_ORDER: [&str; 6] = [
    "UNIDAD CORONARIA",
    "UCIA",
    "TERAPIA POSQUIRURGICA",
    "U.C.I.N.",
    "U.T.I.P.",
    "UNIDAD DE QUEMADOS",
];

/// Therapy units pulled into a coordination's report regardless of what
/// the keyword catalog says about their names
const AUTO_INCLUSION: [(CoordinatingGroup, &[&str]); 4] = [
    (
        CoordinatingGroup::Medicina,
        &["UCIA", "TERAPIA POSQUIRURGICA"],
    ),
    (CoordinatingGroup::Cirugia, &["UNIDAD DE QUEMADOS"]),
    (CoordinatingGroup::Modulares, &["UNIDAD CORONARIA"]),
    (CoordinatingGroup::Pediatria, &["U.C.I.N.", "U.T.I.P."]),
];

/// Display order of the coordination-level buckets
const GROUP_ORDER: [CoordinatingGroup; 6] = [
    CoordinatingGroup::Pediatria,
    CoordinatingGroup::Modulares,
    CoordinatingGroup::Medicina,
    CoordinatingGroup::Cirugia,
    CoordinatingGroup::Ginecologia,
    CoordinatingGroup::OtrasEspecialidades,
];

/// One per-unit sheet worth of records
#[derive(Debug, Clone)]
pub struct UnitBucket<'a> {
    /// Canonical unit name heading the sheet
    pub unit: String,
    /// Records assigned to the unit, in reconciliation order
    pub records: Vec<&'a ReconciledRecord>,
}

/// Group records into per-unit buckets
///
/// Therapy units come first in their fixed order; remaining units follow
/// in first-seen order. Units without records produce no bucket.
#[must_use]
pub fn unit_buckets<'a>(records: &'a [ReconciledRecord]) -> Vec<UnitBucket<'a>> {
    let mut buckets: Vec<UnitBucket<'a>> = THERAPY_UNIT_ORDER
        .iter()
        .map(|unit| UnitBucket {
            unit: (*unit).to_string(),
            records: Vec::new(),
        })
        .collect();

    for record in records {
        match buckets.iter_mut().find(|b| b.unit == record.unit) {
            Some(bucket) => bucket.records.push(record),
            None => buckets.push(UnitBucket {
                unit: record.unit.clone(),
                records: vec![record],
            }),
        }
    }

    buckets.retain(|b| !b.records.is_empty());
    buckets
}

/// One coordination-level bucket of records
#[derive(Debug, Clone)]
pub struct GroupBucket<'a> {
    /// Coordinating group owning the bucket
    pub group: CoordinatingGroup,
    /// Records routed to the group, in reconciliation order
    pub records: Vec<&'a ReconciledRecord>,
}

/// Route records to coordination-level buckets for supply planning
///
/// The auto-inclusion link is consulted before the keyword catalog, so
/// therapy units whose dotted names match no keyword still reach their
/// owning coordination. Empty buckets are omitted.
#[must_use]
pub fn group_buckets<'a>(records: &'a [ReconciledRecord]) -> Vec<GroupBucket<'a>> {
    let mut buckets: Vec<GroupBucket<'a>> = GROUP_ORDER
        .iter()
        .map(|&group| GroupBucket {
            group,
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let group = route(&record.unit);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.group == group) {
            bucket.records.push(record);
        }
    }

    buckets.retain(|b| !b.records.is_empty());
    buckets
}

/// Records that belong on the active-isolations sheet
#[must_use]
pub fn active_isolation_records(records: &[ReconciledRecord]) -> Vec<&ReconciledRecord> {
    records.iter().filter(|r| !r.precautions.is_empty()).collect()
}

fn route(unit: &str) -> CoordinatingGroup {
    for (group, auto_units) in AUTO_INCLUSION {
        if auto_units.iter().any(|u| *u == unit) {
            return group;
        }
    }
    units::coordinating_group(unit)
}
