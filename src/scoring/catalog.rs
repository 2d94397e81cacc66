//! Display metadata for factors and presets.
//!
//! Kept apart from the scoring functions so callers can relabel or recolor
//! factors without touching how they are scored.

use super::factors::Factor;
use super::weights::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorInfo {
    pub factor: Factor,
    pub name: &'static str,
    pub description: &'static str,
    /// Hex color, `#RRGGBB`; drawn as the factor's bar in breakdowns
    pub color: &'static str,
}

impl FactorInfo {
    /// `color` as an RGB triple, or None if it is not `#RRGGBB`
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetInfo {
    pub preset: Preset,
    pub name: &'static str,
    pub description: &'static str,
}

pub static FACTORS: [FactorInfo; 8] = [
    FactorInfo {
        factor: Factor::Academics,
        name: "Academic Excellence",
        description: "Teaching quality and academic rating, supported by national standing",
        color: "#3B82F6",
    },
    FactorInfo {
        factor: Factor::Placements,
        name: "Placement Record",
        description: "Placement rate, average package, top recruiters and placement rating",
        color: "#10B981",
    },
    FactorInfo {
        factor: Factor::Infrastructure,
        name: "Infrastructure",
        description: "Campus facilities and infrastructure rating",
        color: "#F59E0B",
    },
    FactorInfo {
        factor: Factor::Faculty,
        name: "Faculty Quality",
        description: "Faculty rating and student to faculty ratio",
        color: "#8B5CF6",
    },
    FactorInfo {
        factor: Factor::Research,
        name: "Research Output",
        description: "Publications, patents, funding and research centers",
        color: "#EF4444",
    },
    FactorInfo {
        factor: Factor::Reputation,
        name: "Reputation",
        description: "National rank and overall rating",
        color: "#EC4899",
    },
    FactorInfo {
        factor: Factor::Diversity,
        name: "Diversity",
        description: "International students and breadth of student clubs",
        color: "#14B8A6",
    },
    FactorInfo {
        factor: Factor::Innovation,
        name: "Innovation",
        description: "Incubators, startups and emerging-technology programs",
        color: "#F97316",
    },
];

pub static PRESETS: [PresetInfo; 5] = [
    PresetInfo {
        preset: Preset::Balanced,
        name: "Balanced",
        description: "Even weighting across all factors",
    },
    PresetInfo {
        preset: Preset::PlacementFocused,
        name: "Placement Focused",
        description: "Prioritize placement outcomes and packages",
    },
    PresetInfo {
        preset: Preset::ResearchFocused,
        name: "Research Focused",
        description: "Prioritize academics, faculty and research output",
    },
    PresetInfo {
        preset: Preset::InfrastructureFocused,
        name: "Infrastructure Focused",
        description: "Prioritize campus facilities",
    },
    PresetInfo {
        preset: Preset::ReputationFocused,
        name: "Reputation Focused",
        description: "Prioritize national standing",
    },
];

pub fn factor_info(factor: Factor) -> &'static FactorInfo {
    // FACTORS is declared in Factor::ALL order
    &FACTORS[factor as usize]
}

pub fn preset_info(preset: Preset) -> &'static PresetInfo {
    &PRESETS[preset as usize]
}
