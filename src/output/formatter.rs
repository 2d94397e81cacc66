use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{
    factor_info, preset_info, Comparison, Factor, Preset, RankedCollege, WeightVector,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Factor scores are shown as whole numbers
fn format_factor_score(score: f64) -> String {
    format!("{:.0}", score)
}

/// A bar of up to `width` cells proportional to a 0-100 score
fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

/// Format ranked colleges as a table with columns: Rank, Score, Name, Id
/// No headers. Rank column is right-aligned with a trailing dot, score is
/// right-aligned in 3 chars.
pub fn format_ranked_table(colleges: &[&RankedCollege], use_colors: bool) -> String {
    if colleges.is_empty() {
        return "No colleges found.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 4;
    let score_width = 3;
    let separator = "  ";

    colleges
        .iter()
        .map(|ranked| {
            let rank_str = format!("{:>3}.", ranked.rank);
            let score_str = format!("{:>width$}", ranked.overall_score, width = score_width);
            let id = &ranked.college.id;

            let fixed_width = rank_width + 1 + score_width + separator.len() * 2 + id.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&ranked.college.name, width - fixed_width)
                }
                Some(_) => truncate_name(&ranked.college.name, 20),
                None => ranked.college.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    separator,
                    name,
                    separator,
                    id.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, score_str, separator, name, separator, id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked colleges as tab-separated values for scripting
/// Columns: rank, overall score, id, name (no headers, no colors)
pub fn format_tsv(colleges: &[&RankedCollege]) -> String {
    colleges
        .iter()
        .map(|ranked| {
            format!(
                "{}\t{}\t{}\t{}",
                ranked.rank, ranked.overall_score, ranked.college.id, ranked.college.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked colleges as CSV with a header row and one column per factor
pub fn format_csv(colleges: &[&RankedCollege]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["rank", "id", "name", "overall_score"];
    header.extend(Factor::ALL.iter().map(|f| f.id()));
    writer.write_record(&header).context("Failed to write CSV header")?;

    for ranked in colleges {
        let mut row = vec![
            ranked.rank.to_string(),
            ranked.college.id.clone(),
            ranked.college.name.clone(),
            ranked.overall_score.to_string(),
        ];
        row.extend(
            Factor::ALL
                .iter()
                .map(|&f| format_factor_score(ranked.score(f))),
        );
        writer.write_record(&row).context("Failed to write CSV row")?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Format ranked colleges as pretty-printed JSON
pub fn format_json(colleges: &[&RankedCollege]) -> Result<String> {
    serde_json::to_string_pretty(colleges).context("Failed to serialize ranking")
}

/// Format the per-factor breakdown of one college.
///
/// Each line shows the factor score and how many overall points it
/// contributed under `weights`.
pub fn format_breakdown(ranked: &RankedCollege, weights: &WeightVector, use_colors: bool) -> String {
    let total = weights.total().max(1) as f64;
    let college = &ranked.college;

    let mut lines = Vec::new();
    let title = format!("#{} {}", ranked.rank, college.name);
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(format!("  Id: {}", college.id));
    if let Some(ref short) = college.short_name {
        lines.push(format!("  Short name: {}", short));
    }
    lines.push(format!("  Overall score: {}", ranked.overall_score));
    lines.push(String::new());

    for (factor, weight) in weights.entries() {
        let info = factor_info(factor);
        let score = ranked.score(factor);
        let contribution = score * weight as f64 / total;
        let bar = score_bar(score, 20);
        let bar = match (use_colors, info.rgb()) {
            (true, Some((r, g, b))) => bar.truecolor(r, g, b).to_string(),
            (true, None) => bar.green().to_string(),
            (false, _) => bar,
        };
        lines.push(format!(
            "  {:<20} {:>3}  {}  weight {:>3}  +{:.1}",
            info.name,
            format_factor_score(score),
            bar,
            weight,
            contribution
        ));
    }

    lines.join("\n")
}

/// Format a side-by-side comparison. The leading score per factor is starred.
pub fn format_comparison(comparison: &Comparison, use_colors: bool) -> String {
    let col_width = comparison
        .colleges
        .iter()
        .map(|c| c.college.display_name().chars().count())
        .max()
        .unwrap_or(0)
        .clamp(6, 24);

    let mut lines = Vec::new();

    let mut header = format!("{:<20}", "");
    for ranked in &comparison.colleges {
        let name = truncate_name(ranked.college.display_name(), col_width);
        header.push_str(&format!("  {:>width$}", name, width = col_width));
    }
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for row in &comparison.rows {
        let mut line = format!("{:<20}", factor_info(row.factor).name);
        for (i, score) in row.scores.iter().enumerate() {
            let mark = if row.leader == Some(i) { "*" } else { " " };
            let cell = format!("{}{}", format_factor_score(*score), mark);
            let cell = format!("{:>width$}", cell, width = col_width);
            if use_colors && row.leader == Some(i) {
                line.push_str(&format!("  {}", cell.green()));
            } else {
                line.push_str(&format!("  {}", cell));
            }
        }
        lines.push(line);
    }

    let mut overall = format!("{:<20}", "Overall");
    let mut rank = format!("{:<20}", "Rank");
    for ranked in &comparison.colleges {
        overall.push_str(&format!("  {:>width$}", format!("{} ", ranked.overall_score), width = col_width));
        rank.push_str(&format!("  {:>width$}", format!("{} ", ranked.rank), width = col_width));
    }
    lines.push(overall);
    lines.push(rank);

    lines.join("\n")
}

/// One line per factor: "academics        30"
pub fn format_weights(weights: &WeightVector) -> String {
    let mut lines: Vec<String> = weights
        .entries()
        .map(|(factor, weight)| format!("{:<16}{:>4}", factor.id(), weight))
        .collect();
    lines.push(format!("{:<16}{:>4}", "total", weights.total()));
    lines.join("\n")
}

/// List every preset with its description and weights
pub fn format_presets(use_colors: bool) -> String {
    Preset::ALL
        .iter()
        .map(|&preset| {
            let info = preset_info(preset);
            let weights = preset
                .weights()
                .entries()
                .map(|(f, w)| format!("{}={}", f.id(), w))
                .collect::<Vec<_>>()
                .join(" ");
            let id = if use_colors {
                preset.id().bold().to_string()
            } else {
                preset.id().to_string()
            };
            format!("{} ({})\n  {}\n  {}", id, info.name, info.description, weights)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// List every factor with its display name and description
pub fn format_factors(use_colors: bool) -> String {
    Factor::ALL
        .iter()
        .map(|&factor| {
            let info = factor_info(factor);
            let id = if use_colors {
                factor.id().bold().to_string()
            } else {
                factor.id().to_string()
            };
            format!("{:<16} {}: {}", id, info.name, info.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
