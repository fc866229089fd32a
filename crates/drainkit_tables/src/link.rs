//! Drainage-area -> inlet linkage by outflow structure.

use std::collections::BTreeMap;

use crate::spec::SpecDrainageAreaRecord;

/// Trimmed `outflow_structure` -> drainage area draining into that structure.
pub type SpecLinkIndex<'a> = BTreeMap<String, &'a SpecDrainageAreaRecord>;

/// Index drainage areas by trimmed outflow structure.
///
/// Records without an outflow structure (absent, or empty after trimming)
/// are left out. On duplicate keys the later record in input order wins.
pub fn build_link_index(records: &[SpecDrainageAreaRecord]) -> SpecLinkIndex<'_> {
    let mut dict_index = BTreeMap::new();
    for record in records {
        let Some(outflow) = record.outflow_structure.as_deref() else {
            continue;
        };
        let c_key = outflow.trim();
        if c_key.is_empty() {
            continue;
        }
        dict_index.insert(c_key.to_string(), record);
    }
    dict_index
}

/// Drainage area linked to an inlet with `structure_no`.
///
/// The inlet key is used verbatim unless `if_trim_key` is set, so stray
/// whitespace around a structure number misses the trimmed index key.
pub fn lookup_drainage_area<'a>(
    index: &SpecLinkIndex<'a>,
    structure_no: Option<&str>,
    if_trim_key: bool,
) -> Option<&'a SpecDrainageAreaRecord> {
    let c_key = structure_no?;
    let c_key = if if_trim_key { c_key.trim() } else { c_key };
    index.get(c_key).copied()
}
