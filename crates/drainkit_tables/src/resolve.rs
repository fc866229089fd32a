//! Header-driven column resolution.

use std::collections::BTreeMap;

use tracing::debug;

use crate::spec::{SemanticField, SpecFieldPhrases};

/// Find the column for one field.
///
/// Phrases are tried in order; the first phrase contained (case-insensitively)
/// in any header cell wins, and its leftmost matching cell is returned.
pub fn find_column(header: &[String], phrases: &[String]) -> Option<usize> {
    let l_header_upper: Vec<String> = header.iter().map(|cell| cell.to_uppercase()).collect();

    phrases.iter().find_map(|phrase| {
        let c_phrase_upper = phrase.to_uppercase();
        l_header_upper
            .iter()
            .position(|cell| cell.contains(&c_phrase_upper))
    })
}

/// Resolve every field of `phrases` against `header`.
///
/// Fields with no matching phrase are omitted. Fields are resolved
/// independently; two fields may land on the same column.
pub fn resolve_columns<F: SemanticField>(
    header: &[String],
    phrases: &SpecFieldPhrases<F>,
) -> BTreeMap<F, usize> {
    let mut dict_col_by_field = BTreeMap::new();
    for (field, l_phrases) in phrases.entries() {
        if let Some(n_idx_col) = find_column(header, l_phrases) {
            debug!(
                field = field.name(),
                col = n_idx_col,
                header = %header[n_idx_col],
                "header resolved"
            );
            dict_col_by_field.insert(*field, n_idx_col);
        }
    }
    dict_col_by_field
}
