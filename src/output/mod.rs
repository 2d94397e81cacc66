pub mod formatter;

pub use formatter::{
    format_breakdown, format_comparison, format_csv, format_factors, format_json, format_presets,
    format_ranked_table, format_tsv, format_weights, should_use_colors,
};
