use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RankingError;
use crate::colleges::{CategoryRatings, College};

/// The fixed set of dimensions a college is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Academics,
    Placements,
    Infrastructure,
    Faculty,
    Research,
    Reputation,
    Diversity,
    Innovation,
}

impl Factor {
    pub const ALL: [Factor; 8] = [
        Factor::Academics,
        Factor::Placements,
        Factor::Infrastructure,
        Factor::Faculty,
        Factor::Research,
        Factor::Reputation,
        Factor::Diversity,
        Factor::Innovation,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Factor::Academics => "academics",
            Factor::Placements => "placements",
            Factor::Infrastructure => "infrastructure",
            Factor::Faculty => "faculty",
            Factor::Research => "research",
            Factor::Reputation => "reputation",
            Factor::Diversity => "diversity",
            Factor::Innovation => "innovation",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Factor {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Factor::ALL
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| RankingError::UnknownFactor(s.to_string()))
    }
}

type Scorer = fn(&College) -> f64;

/// Factor -> scoring function. Every function returns a raw value that
/// `score_factor` clamps to [0, 100].
const SCORERS: [(Factor, Scorer); 8] = [
    (Factor::Academics, academics),
    (Factor::Placements, placements),
    (Factor::Infrastructure, infrastructure),
    (Factor::Faculty, faculty),
    (Factor::Research, research),
    (Factor::Reputation, reputation),
    (Factor::Diversity, diversity),
    (Factor::Innovation, innovation),
];

const DEFAULT_RATING: f64 = 4.0;
const DEFAULT_NATIONAL_RANK: i64 = 50;
const DEFAULT_PLACEMENT_RATE: f64 = 80.0;
const DEFAULT_AVERAGE_PACKAGE: f64 = 8.0;
const DEFAULT_STUDENT_FACULTY_RATIO: f64 = 15.0;
const DEFAULT_INTERNATIONAL_PERCENT: f64 = 5.0;

const INNOVATION_KEYWORDS: [&str; 10] = [
    "innovation",
    "incubat",
    "startup",
    "entrepreneur",
    "artificial intelligence",
    "machine learning",
    "robotics",
    "technology park",
    "research park",
    "hackathon",
];

/// Score one factor for a college, clamped to [0, 100].
pub fn score_factor(college: &College, factor: Factor) -> f64 {
    let raw = SCORERS
        .iter()
        .find(|(f, _)| *f == factor)
        .map(|(_, scorer)| scorer(college))
        .unwrap_or(0.0);
    clamp_score(raw)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Fraction in [0, 1]
fn unit(value: f64, max: f64) -> f64 {
    (value / max).clamp(0.0, 1.0)
}

fn overall_rating(college: &College) -> f64 {
    finite(college.rating).unwrap_or(DEFAULT_RATING).clamp(0.0, 5.0)
}

/// Category rating, falling back to the overall rating
fn category_rating(college: &College, pick: fn(&CategoryRatings) -> Option<f64>) -> f64 {
    finite(college.ratings.as_ref().and_then(pick))
        .map(|r| r.clamp(0.0, 5.0))
        .unwrap_or_else(|| overall_rating(college))
}

/// 1.0 for rank 1, 0.0 for rank 100 and beyond
fn rank_strength(college: &College) -> f64 {
    let rank = college.national_rank.unwrap_or(DEFAULT_NATIONAL_RANK).clamp(1, 100);
    (100 - rank) as f64 / 99.0
}

fn count(n: usize, cap: usize) -> f64 {
    n.min(cap) as f64
}

fn non_negative(value: Option<i64>) -> f64 {
    value.unwrap_or(0).max(0) as f64
}

/// Academics rating (default 4/5) for up to 80, national rank (default 50) for up to 20.
fn academics(college: &College) -> f64 {
    let rating = category_rating(college, |r| r.academics);
    rating * 16.0 + rank_strength(college) * 20.0
}

/// Placement rate (default 80%) for up to 40, average package (default 8,
/// saturating at 30) for up to 25, 1.5 points per top recruiter up to 15,
/// placements rating (default 4/5) for up to 20.
fn placements(college: &College) -> f64 {
    let stats = college.placements.as_ref();
    let rate = finite(stats.and_then(|p| p.rate))
        .unwrap_or(DEFAULT_PLACEMENT_RATE)
        .clamp(0.0, 100.0);
    let package = finite(stats.and_then(|p| p.average_package)).unwrap_or(DEFAULT_AVERAGE_PACKAGE);
    let recruiters = stats.map_or(0, |p| p.top_recruiters.len());
    let rating = category_rating(college, |r| r.placements);
    rate * 0.4 + unit(package, 30.0) * 25.0 + count(recruiters, 10) * 1.5 + rating * 4.0
}

/// Infrastructure rating (default 4/5) for up to 60, two points per listed
/// facility up to 40.
fn infrastructure(college: &College) -> f64 {
    let rating = category_rating(college, |r| r.infrastructure);
    rating * 12.0 + count(college.facility_count(), 20) * 2.0
}

/// Faculty rating (default 4/5) for up to 50, student:faculty ratio (default
/// 15:1; 5:1 or better is full marks, 30:1 or worse is none) for up to 40,
/// 10 when a faculty count is published.
fn faculty(college: &College) -> f64 {
    let rating = category_rating(college, |r| r.faculty);
    let ratio = college
        .student_faculty_ratio()
        .unwrap_or(DEFAULT_STUDENT_FACULTY_RATIO);
    let ratio_score = ((30.0 - ratio) / 25.0).clamp(0.0, 1.0) * 40.0;
    let has_count = college.faculty.as_ref().is_some_and(|f| f.count.is_some());
    rating * 10.0 + ratio_score + if has_count { 10.0 } else { 0.0 }
}

/// Publications (saturating at 1000) for up to 40, patents (saturating at 50)
/// for up to 25, 15 when funding is reported, four points per research
/// center up to 20. Absent counts are zero.
fn research(college: &College) -> f64 {
    let Some(stats) = college.research.as_ref() else {
        return 0.0;
    };
    let publications = unit(non_negative(stats.publications), 1000.0) * 40.0;
    let patents = unit(non_negative(stats.patents), 50.0) * 25.0;
    let funded = stats
        .funding
        .as_deref()
        .is_some_and(|f| !f.trim().is_empty());
    publications
        + patents
        + if funded { 15.0 } else { 0.0 }
        + count(stats.centers.len(), 5) * 4.0
}

/// National rank (default 50) for up to 70, overall rating (default 4/5) for up to 30.
fn reputation(college: &College) -> f64 {
    rank_strength(college) * 70.0 + overall_rating(college) * 6.0
}

/// International share (default 5%, saturating at 20%) for up to 60, two
/// points per student club up to 40.
fn diversity(college: &College) -> f64 {
    let percent = college
        .international_percent()
        .unwrap_or(DEFAULT_INTERNATIONAL_PERCENT);
    unit(percent, 20.0) * 60.0 + count(college.clubs.len(), 20) * 2.0
}

/// Base of 40, plus 10 per innovation keyword mention in highlights and
/// specializations, up to six mentions.
fn innovation(college: &College) -> f64 {
    let mentions = college
        .highlights
        .iter()
        .chain(&college.specializations)
        .filter(|text| {
            let text = text.to_lowercase();
            INNOVATION_KEYWORDS.iter().any(|k| text.contains(k))
        })
        .count();
    40.0 + count(mentions, 6) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colleges::{FacultyInfo, PlacementStats, ResearchStats};

    fn named(id: &str) -> College {
        College {
            id: id.to_string(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    #[test]
    fn test_factor_parse_and_display() {
        for factor in Factor::ALL {
            assert_eq!(factor.id().parse::<Factor>().unwrap(), factor);
            assert_eq!(factor.to_string(), factor.id());
        }
        assert_eq!(" Academics ".parse::<Factor>().unwrap(), Factor::Academics);
        assert_eq!(
            "vibes".parse::<Factor>(),
            Err(RankingError::UnknownFactor("vibes".to_string()))
        );
    }

    #[test]
    fn test_every_factor_has_a_scorer() {
        for factor in Factor::ALL {
            assert!(SCORERS.iter().any(|(f, _)| *f == factor), "{} unscored", factor);
        }
    }

    #[test]
    fn test_defaults_for_empty_record() {
        let college = named("blank");
        // rating 4 -> 64, rank 50 -> 50/99 * 20
        let expected_academics = 64.0 + 50.0 / 99.0 * 20.0;
        assert!((score_factor(&college, Factor::Academics) - expected_academics).abs() < 1e-9);
        // 80% -> 32, package 8 -> 8/30 * 25, no recruiters, rating 4 -> 16
        let expected_placements = 32.0 + 8.0 / 30.0 * 25.0 + 16.0;
        assert!((score_factor(&college, Factor::Placements) - expected_placements).abs() < 1e-9);
        assert_eq!(score_factor(&college, Factor::Research), 0.0);
        assert_eq!(score_factor(&college, Factor::Innovation), 40.0);
    }

    #[test]
    fn test_academics_prefers_category_rating() {
        let mut college = named("a");
        college.rating = Some(3.0);
        let fallback = score_factor(&college, Factor::Academics);

        college.ratings = Some(CategoryRatings {
            academics: Some(5.0),
            ..Default::default()
        });
        let specific = score_factor(&college, Factor::Academics);
        assert!((specific - fallback - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_reputation_is_inverse_to_rank() {
        let mut better = named("better");
        better.national_rank = Some(3);
        let mut worse = named("worse");
        worse.national_rank = Some(80);
        assert!(
            score_factor(&better, Factor::Reputation) > score_factor(&worse, Factor::Reputation)
        );
    }

    #[test]
    fn test_placements_monotonic_in_package() {
        let mut low = named("low");
        low.placements = Some(PlacementStats {
            average_package: Some(5.0),
            ..Default::default()
        });
        let mut high = low.clone();
        high.placements.as_mut().unwrap().average_package = Some(25.0);
        assert!(score_factor(&high, Factor::Placements) > score_factor(&low, Factor::Placements));
    }

    #[test]
    fn test_placements_uses_placements_rating() {
        let mut college = named("p");
        college.rating = Some(4.0);
        let fallback = score_factor(&college, Factor::Placements);

        college.ratings = Some(CategoryRatings {
            placements: Some(5.0),
            campus_life: Some(1.0),
            ..Default::default()
        });
        let specific = score_factor(&college, Factor::Placements);
        assert!((specific - fallback - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_placements_full_marks() {
        let mut college = named("p");
        college.ratings = Some(CategoryRatings {
            placements: Some(5.0),
            ..Default::default()
        });
        college.placements = Some(PlacementStats {
            rate: Some(100.0),
            average_package: Some(30.0),
            top_recruiters: vec!["r".to_string(); 10],
        });
        assert!((score_factor(&college, Factor::Placements) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_faculty_ratio_lower_is_better() {
        let mut tight = named("tight");
        tight.faculty = Some(FacultyInfo {
            student_faculty_ratio: Some("8:1".to_string()),
            count: None,
        });
        let mut loose = named("loose");
        loose.faculty = Some(FacultyInfo {
            student_faculty_ratio: Some("25:1".to_string()),
            count: None,
        });
        assert!(score_factor(&tight, Factor::Faculty) > score_factor(&loose, Factor::Faculty));
    }

    #[test]
    fn test_innovation_counts_keyword_mentions() {
        let mut college = named("i");
        college.highlights = vec![
            "Startup incubator on campus".to_string(),
            "Green lawns".to_string(),
        ];
        college.specializations = vec!["Machine Learning".to_string()];
        assert_eq!(score_factor(&college, Factor::Innovation), 60.0);
    }

    #[test]
    fn test_scores_clamped_for_extreme_inputs() {
        let mut college = named("extreme");
        college.rating = Some(999.0);
        college.ratings = Some(CategoryRatings {
            academics: Some(-40.0),
            infrastructure: Some(f64::INFINITY),
            faculty: Some(f64::NAN),
            ..Default::default()
        });
        college.national_rank = Some(-7);
        college.placements = Some(PlacementStats {
            rate: Some(500.0),
            average_package: Some(-10.0),
            top_recruiters: vec!["x".to_string(); 100],
        });
        college.faculty = Some(FacultyInfo {
            student_faculty_ratio: Some("-3:1".to_string()),
            count: Some(u32::MAX),
        });
        college.research = Some(ResearchStats {
            publications: Some(-500),
            patents: Some(i64::MAX),
            funding: Some("yes".to_string()),
            centers: vec!["c".to_string(); 50],
        });
        college.international_students = Some("900%".to_string());
        college.clubs = vec!["club".to_string(); 500];
        college.highlights = vec!["innovation".to_string(); 40];

        for factor in Factor::ALL {
            let score = score_factor(&college, factor);
            assert!((0.0..=100.0).contains(&score), "{} = {}", factor, score);
        }
    }

    #[test]
    fn test_clamp_score_handles_nan() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(-1.0), 0.0);
        assert_eq!(clamp_score(250.0), 100.0);
    }
}
