//! Inner joins keyed on normalized occupation codes.

use rustc_hash::FxHashMap;

/// Index codes by their first occurrence
///
/// Later duplicates are ignored, so a join against the result is
/// deterministic even when a source repeats a code.
#[must_use]
pub fn first_occurrence_index<'a, I>(codes: I) -> FxHashMap<&'a str, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = FxHashMap::default();
    for (position, code) in codes.into_iter().enumerate() {
        index.entry(code).or_insert(position);
    }
    index
}

/// Inner join of probe-side codes against build-side codes
///
/// Returns `(probe_position, build_position)` pairs in probe order. Probe
/// codes absent from the build side are dropped, which is what makes the
/// join inner.
#[must_use]
pub fn inner_join_indices<'a, P, B>(probe: P, build: B) -> Vec<(usize, usize)>
where
    P: IntoIterator<Item = &'a str>,
    B: IntoIterator<Item = &'a str>,
{
    let index = first_occurrence_index(build);
    probe
        .into_iter()
        .enumerate()
        .filter_map(|(position, code)| index.get(code).map(|&build| (position, build)))
        .collect()
}
