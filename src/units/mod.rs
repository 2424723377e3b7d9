//! Organizational unit classification
//!
//! This module resolves the care unit a patient belongs to. The hospital's
//! physical bed-numbering scheme is more reliable than the free-text
//! specialty label printed per census section, so bed-prefix rules are
//! evaluated first and the cleaned section label is only a fallback.
//!
//! A second-level classifier maps a resolved unit name onto one of the
//! coordinating groups used for supply-report routing.

use serde::{Deserialize, Serialize};

/// Section cursor value used before any section header has been seen
pub const NO_SECTION: &str = "SIN_ESPECIALIDAD";

/// Fixed table of two-digit bed prefixes that override the section label
const BED_PREFIX_UNITS: [(&str, &str); 6] = [
    ("64", "UNIDAD CORONARIA"),
    ("55", "U.C.I.N."),
    ("45", "NEONATOLOGIA"),
    ("56", "U.T.I.P."),
    ("85", "UNIDAD DE QUEMADOS"),
    ("73", "UCIA"),
];

/// Closed numeric bed range assigned to post-surgical therapy
const POST_SURGICAL_RANGE: std::ops::RangeInclusive<u32> = 7401..=7409;

/// Strip boilerplate tokens from a raw census section label
///
/// Removes the section marker and non-breaking-space entities, then trims
/// and uppercases. Returns [`NO_SECTION`] when nothing usable remains.
#[must_use]
pub fn clean_section_label(raw: &str) -> String {
    let cleaned = raw
        .to_uppercase()
        .replace("ESPECIALIDAD:", "")
        .replace("&NBSP;", "")
        .replace('\u{a0}', " ")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        NO_SECTION.to_string()
    } else {
        cleaned
    }
}

/// Resolve the canonical unit for a bed identifier and census section label
///
/// Rules are evaluated in order, first match wins:
/// 1. a known two-digit bed prefix maps directly to its unit;
/// 2. a purely numeric bed inside 7401-7409 maps to TERAPIA POSQUIRURGICA;
/// 3. otherwise the cleaned section label is returned verbatim.
#[must_use]
pub fn classify(bed: &str, section_label: &str) -> String {
    let bed = bed.trim().to_uppercase();

    for (prefix, unit) in BED_PREFIX_UNITS {
        if bed.starts_with(prefix) {
            return unit.to_string();
        }
    }

    if let Ok(n) = bed.parse::<u32>() {
        if POST_SURGICAL_RANGE.contains(&n) {
            return "TERAPIA POSQUIRURGICA".to_string();
        }
    }

    clean_section_label(section_label)
}

/// Coordinating group a unit reports to for supply planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinatingGroup {
    /// Pediatric coordination (neonatal and pediatric units)
    Pediatria,
    /// Modular specialties coordination
    Modulares,
    /// Internal medicine coordination
    Medicina,
    /// Surgical coordination
    Cirugia,
    /// Gynecology and obstetrics coordination
    Ginecologia,
    /// Units matching no catalogued keyword
    OtrasEspecialidades,
}

impl CoordinatingGroup {
    /// Stable label used in report headings and routing keys
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pediatria => "COORD_PEDIATRIA",
            Self::Modulares => "COORD_MODULARES",
            Self::Medicina => "COORD_MEDICINA",
            Self::Cirugia => "COORD_CIRUGIA",
            Self::Ginecologia => "COORD_GINECOLOGIA",
            Self::OtrasEspecialidades => "OTRAS_ESPECIALIDADES",
        }
    }
}

/// Keyword catalog mapping unit names onto coordinating groups
///
/// Keyword sets overlap across groups, so the catalog order is the
/// tie-break and must not be reordered.
const GROUP_CATALOG: [(CoordinatingGroup, &[&str]); 5] = [
    (
        CoordinatingGroup::Pediatria,
        &[
            "MEDICINA INTERNA PEDIATRICA",
            "PEDIATRI",
            "PEDIATRICA",
            "NEONATO",
            "NEONATOLOGIA",
            "CUNERO",
            "UTIP",
            "UCIN",
        ],
    ),
    (
        CoordinatingGroup::Modulares,
        &[
            "NEUROLOGIA",
            "ANGIOLOGIA",
            "VASCULAR",
            "CARDIOLOGIA",
            "CARDIOVASCULAR",
            "TORAX",
            "NEUMO",
            "HEMATO",
            "NEUROCIRUGIA",
            "ONCOLOGIA",
            "CORONARIA",
            "PSIQ",
            "PSIQUIATRIA",
        ],
    ),
    (
        CoordinatingGroup::Medicina,
        &[
            "DERMATO",
            "ENDOCRINO",
            "GERIAT",
            "INMUNO",
            "MEDICINA INTERNA",
            "REUMA",
            "UCIA",
            "TERAPIA INTERMEDIA",
            "CLINICA DEL DOLOR",
            "TPQX",
        ],
    ),
    (
        CoordinatingGroup::Cirugia,
        &[
            "CIRUGIA GENERAL",
            "CIR. GENERAL",
            "MAXILO",
            "RECONSTRUCTIVA",
            "PLASTICA",
            "GASTRO",
            "NEFROLOGIA",
            "OFTALMO",
            "ORTOPEDIA",
            "OTORRINO",
            "UROLOGIA",
            "TRASPLANTES",
            "QUEMADOS",
        ],
    ),
    (
        CoordinatingGroup::Ginecologia,
        &["GINECO", "OBSTETRICIA", "MATERNO", "REPRODUCCION"],
    ),
];

/// Route a resolved unit name to its coordinating group
///
/// Case-insensitive substring match against the keyword catalog, first
/// matching group wins. Unmatched units fall into
/// [`CoordinatingGroup::OtrasEspecialidades`].
#[must_use]
pub fn coordinating_group(unit: &str) -> CoordinatingGroup {
    let unit = unit.trim().to_uppercase();
    for (group, keywords) in GROUP_CATALOG {
        if keywords.iter().any(|kw| unit.contains(kw)) {
            return group;
        }
    }
    CoordinatingGroup::OtrasEspecialidades
}
