use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use college_rank::colleges::{self, College};
use college_rank::config::{self, Config};
use college_rank::output;
use college_rank::scoring::{self, Ranking, ScoringConfig, WeightVector};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_SCORING: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Csv,
    Json,
}

/// Weight selection shared by every command that ranks
#[derive(Args, Debug, Clone, Default)]
struct WeightArgs {
    /// Start from a preset (see `presets`)
    #[arg(long)]
    preset: Option<String>,

    /// Override one factor weight, e.g. `-w research=40` (repeatable)
    #[arg(short = 'w', long = "weight", value_name = "FACTOR=N", value_parser = parse_weight_override)]
    weights: Vec<(String, i64)>,
}

impl WeightArgs {
    fn as_scoring(&self) -> ScoringConfig {
        ScoringConfig {
            preset: self.preset.clone(),
            weights: if self.weights.is_empty() {
                None
            } else {
                Some(self.weights.iter().cloned().collect::<BTreeMap<_, _>>())
            },
        }
    }
}

fn parse_weight_override(s: &str) -> Result<(String, i64), String> {
    let (factor, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FACTOR=N, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid weight '{}': {}", value.trim(), e))?;
    Ok((factor.trim().to_string(), value))
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List colleges ranked by overall score (default if no subcommand)
    List {
        #[command(flatten)]
        weights: WeightArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show only the top N colleges
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only show colleges whose name or id contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the per-factor breakdown of a college by its rank
    Show {
        /// Rank of the college (1-based, as shown in list)
        rank: usize,

        #[command(flatten)]
        weights: WeightArgs,
    },
    /// Compare colleges factor by factor
    Compare {
        /// College ids to compare
        #[arg(required = true, num_args = 2..)]
        ids: Vec<String>,

        #[command(flatten)]
        weights: WeightArgs,
    },
    /// List weight presets
    Presets,
    /// List scoring factors
    Factors,
    /// Print the effective weights
    Weights {
        #[command(flatten)]
        weights: WeightArgs,

        /// Rescale the weights to sum to 100
        #[arg(long)]
        normalize: bool,

        /// Write the weights to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "college-rank")]
#[command(about = "Rank colleges by weighted multi-factor scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/college-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// College data file (.json/.yaml); overrides the config file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

/// Merge config-file and command-line scoring, validate, and resolve
fn resolve_weights(config: &Config, args: &WeightArgs) -> WeightVector {
    let effective_scoring = config
        .scoring
        .clone()
        .unwrap_or_default()
        .merged(&args.as_scoring());

    if let Err(errors) = scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_SCORING);
    }

    match effective_scoring.resolve() {
        Ok(weights) => {
            debug!(?weights, "Resolved weights");
            weights
        }
        Err(e) => exit_with(EXIT_SCORING, format!("Scoring error: {}", e)),
    }
}

fn load_data(cli_data: Option<&PathBuf>, config: &Config) -> Vec<College> {
    let result = match cli_data.or(config.data.as_ref()) {
        Some(path) => colleges::load_colleges(path),
        None => {
            info!("No data file configured, using bundled sample colleges");
            colleges::sample_colleges()
        }
    };
    match result {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_DATA, format!("Data error: {:#}", e)),
    }
}

fn rank_or_exit(colleges: &[College], weights: &WeightVector) -> Ranking {
    let started = Instant::now();
    match scoring::rank(colleges, weights) {
        Ok(ranking) => {
            if !ranking.skipped.is_empty() {
                warn!(skipped = ranking.skipped.len(), "Some college records were not ranked");
            }
            debug!(ranked = ranking.len(), elapsed = ?started.elapsed(), "Ranking complete");
            ranking
        }
        Err(e) => exit_with(EXIT_SCORING, format!("Scoring error: {}", e)),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = college_rank::logging::init(cli.verbose) {
        eprintln!("{}", e);
    }

    let command = cli.command.unwrap_or(Commands::List {
        weights: WeightArgs::default(),
        format: OutputFormat::Table,
        limit: None,
        search: None,
    });

    let config = match config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    let use_colors = output::should_use_colors();

    match command {
        Commands::List {
            weights,
            format,
            limit,
            search,
        } => {
            let weights = resolve_weights(&config, &weights);
            let records = load_data(cli.data.as_ref(), &config);
            let ranking = rank_or_exit(&records, &weights);

            let mut shown: Vec<_> = match search.as_deref() {
                Some(query) => colleges::filter_by_search(&ranking.ranked, query),
                None => ranking.ranked.iter().collect(),
            };
            if let Some(limit) = limit {
                shown.truncate(limit);
            }

            let rendered = match format {
                OutputFormat::Table => Ok(output::format_ranked_table(&shown, use_colors)),
                OutputFormat::Tsv => Ok(output::format_tsv(&shown)),
                OutputFormat::Csv => output::format_csv(&shown),
                OutputFormat::Json => output::format_json(&shown),
            };
            match rendered {
                Ok(text) => println!("{}", text),
                Err(e) => exit_with(EXIT_DATA, format!("Output error: {:#}", e)),
            }
        }
        Commands::Show { rank, weights } => {
            let weights = resolve_weights(&config, &weights);
            let records = load_data(cli.data.as_ref(), &config);
            let ranking = rank_or_exit(&records, &weights);

            // Validate rank bounds (1-based)
            let Some(ranked) = ranking.at_rank(rank) else {
                exit_with(
                    EXIT_DATA,
                    format!("Invalid rank {}. Must be between 1 and {}.", rank, ranking.len()),
                );
            };
            println!("{}", output::format_breakdown(ranked, &weights, use_colors));
        }
        Commands::Compare { ids, weights } => {
            let weights = resolve_weights(&config, &weights);
            let records = load_data(cli.data.as_ref(), &config);
            let ranking = rank_or_exit(&records, &weights);

            match scoring::compare(&ranking, &ids) {
                Ok(comparison) => {
                    println!("{}", output::format_comparison(&comparison, use_colors))
                }
                Err(e) => exit_with(EXIT_DATA, e),
            }
        }
        Commands::Presets => println!("{}", output::format_presets(use_colors)),
        Commands::Factors => println!("{}", output::format_factors(use_colors)),
        Commands::Weights {
            weights,
            normalize,
            save,
        } => {
            let mut weights = resolve_weights(&config, &weights);
            if normalize {
                weights = match weights.normalized() {
                    Ok(w) => w,
                    Err(e) => exit_with(EXIT_SCORING, format!("Scoring error: {}", e)),
                };
            }
            println!("{}", output::format_weights(&weights));

            if save {
                let path = match cli.config.clone().map(Ok).unwrap_or_else(config::get_config_path) {
                    Ok(p) => p,
                    Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
                };
                let updated = Config {
                    scoring: Some(ScoringConfig::from_weights(&weights)),
                    ..config
                };
                if let Err(e) = config::save_config(&path, &updated) {
                    exit_with(EXIT_CONFIG, format!("Config error: {:#}", e));
                }
                eprintln!("Saved weights to {}", path.display());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_override() {
        assert_eq!(
            parse_weight_override("research=40").unwrap(),
            ("research".to_string(), 40)
        );
        assert_eq!(
            parse_weight_override(" faculty = -3 ").unwrap(),
            ("faculty".to_string(), -3)
        );
        assert!(parse_weight_override("research").is_err());
        assert!(parse_weight_override("research=lots").is_err());
    }

    #[test]
    fn test_cli_parses_list_with_overrides() {
        let cli = Cli::try_parse_from([
            "college-rank",
            "list",
            "--preset",
            "research_focused",
            "-w",
            "placements=20",
            "--format",
            "csv",
            "--limit",
            "3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List {
                weights,
                format,
                limit,
                ..
            }) => {
                assert_eq!(weights.preset.as_deref(), Some("research_focused"));
                assert_eq!(weights.weights, vec![("placements".to_string(), 20)]);
                assert!(matches!(format, OutputFormat::Csv));
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_compare_needs_two_ids() {
        assert!(Cli::try_parse_from(["college-rank", "compare", "one"]).is_err());
        assert!(Cli::try_parse_from(["college-rank", "compare", "one", "two"]).is_ok());
    }

    #[test]
    fn test_weight_args_as_scoring() {
        let args = WeightArgs {
            preset: None,
            weights: vec![("academics".to_string(), 50)],
        };
        let scoring = args.as_scoring();
        assert!(scoring.preset.is_none());
        assert_eq!(scoring.weights.unwrap().get("academics"), Some(&50));
        assert!(WeightArgs::default().as_scoring().weights.is_none());
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
