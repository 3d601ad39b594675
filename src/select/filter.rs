use crate::types::{display_text, Row};

/// Indices of the options whose `label_key` field contains `search`,
/// ignoring case. An empty search matches everything.
pub fn filter_options(options: &[Row], label_key: &str, search: &str) -> Vec<usize> {
    if search.is_empty() {
        return (0..options.len()).collect();
    }
    let needle = search.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| {
            display_text(option.get(label_key))
                .to_lowercase()
                .contains(&needle)
        })
        .map(|(index, _)| index)
        .collect()
}
