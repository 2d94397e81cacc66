use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A college as supplied by the data source.
///
/// Every signal is optional; scoring falls back to defaults for whatever is
/// missing. `id` and `name` default to empty so a single incomplete record
/// can be reported and skipped instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Overall rating, 0-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<CategoryRatings>,

    /// Lower is better
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_rank: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<PlacementStats>,

    /// Facility category -> facilities in that category
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facilities: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<FacultyInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchStats>,

    /// Share of international students, e.g. "15%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_students: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clubs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specializations: Vec<String>,
}

/// Per-category ratings, each 0-5.
///
/// `campus_life` is carried through to output but no factor scores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRatings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academics: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_life: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStats {
    /// Percent of students placed, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Average package, currency-unit agnostic (the bundled data uses LPA)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_package: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_recruiters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyInfo {
    /// Formatted as "N:1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_faculty_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patents: Option<i64>,
    /// Free-form funding description; only its presence is scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub centers: Vec<String>,
}

impl College {
    /// Short name if present, otherwise the full name
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }

    /// Why this record cannot be ranked, if anything
    pub fn missing_identity(&self) -> Option<&'static str> {
        if self.id.trim().is_empty() {
            Some("missing id")
        } else if self.name.trim().is_empty() {
            Some("missing name")
        } else {
            None
        }
    }

    /// Total number of listed facilities across all categories
    pub fn facility_count(&self) -> usize {
        self.facilities.values().map(Vec::len).sum()
    }

    /// Student count per faculty member, parsed from "N:1"
    pub fn student_faculty_ratio(&self) -> Option<f64> {
        let ratio = self.faculty.as_ref()?.student_faculty_ratio.as_deref()?;
        parse_ratio(ratio)
    }

    /// International student share in percent, parsed from "15%"
    pub fn international_percent(&self) -> Option<f64> {
        parse_percent(self.international_students.as_deref()?)
    }
}

/// Parse "N:1" (or a bare "N") into N
pub fn parse_ratio(s: &str) -> Option<f64> {
    let head = s.split(':').next()?.trim();
    head.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse "15%" (or a bare "15") into 15.0
pub fn parse_percent(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
