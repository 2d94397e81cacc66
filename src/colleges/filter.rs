use crate::scoring::RankedCollege;

/// Keep ranked colleges whose name, short name or id contains `query`,
/// ignoring case. Ranks are left as assigned over the full list.
pub fn filter_by_search<'a>(ranked: &'a [RankedCollege], query: &str) -> Vec<&'a RankedCollege> {
    let needle = query.trim().to_lowercase();
    ranked
        .iter()
        .filter(|r| {
            needle.is_empty()
                || [
                    Some(r.college.name.as_str()),
                    r.college.short_name.as_deref(),
                    Some(r.college.id.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
