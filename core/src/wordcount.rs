use std::collections::HashMap;

/// Count occurrences of each distinct token in one document's token stream.
pub fn count_frequencies<I>(tokens: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
