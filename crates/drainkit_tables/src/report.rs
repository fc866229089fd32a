//! Run report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Counters and diagnostics for one report run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportAssemble {
    /// Drainage-area records read.
    pub cnt_da_records: u64,
    /// Inlet records read.
    pub cnt_inlet_records: u64,
    /// Inlets that resolved a drainage area through the link index.
    pub cnt_inlets_linked: u64,
    /// Sheet names in output order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings, e.g. header fields that matched no column.
    pub warnings: Vec<String>,
}

impl ReportAssemble {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_da_records".to_string(), self.cnt_da_records);
        dict_counts.insert("cnt_inlet_records".to_string(), self.cnt_inlet_records);
        dict_counts.insert("cnt_inlets_linked".to_string(), self.cnt_inlets_linked);
        dict_counts.insert("cnt_sheets".to_string(), self.sheets.len() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} da_records={} inlet_records={} inlets_linked={} sheets={} warnings={}",
            dict_counts["cnt_da_records"],
            dict_counts["cnt_inlet_records"],
            dict_counts["cnt_inlets_linked"],
            dict_counts["cnt_sheets"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportAssemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[REPORT]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportAssembleBuilder {
    /// See [`ReportAssemble::cnt_da_records`].
    pub cnt_da_records: u64,
    /// See [`ReportAssemble::cnt_inlet_records`].
    pub cnt_inlet_records: u64,
    /// See [`ReportAssemble::cnt_inlets_linked`].
    pub cnt_inlets_linked: u64,
    /// See [`ReportAssemble::sheets`].
    pub sheets: Vec<String>,
    /// See [`ReportAssemble::warnings`].
    pub warnings: Vec<String>,
}

impl ReportAssembleBuilder {
    pub fn add_da_records(&mut self, n: usize) {
        self.cnt_da_records += n as u64;
    }

    pub fn add_inlet_records(&mut self, n: usize) {
        self.cnt_inlet_records += n as u64;
    }

    pub fn add_inlets_linked(&mut self, n: usize) {
        self.cnt_inlets_linked += n as u64;
    }

    pub fn add_sheet(&mut self, sheet_name: String) {
        self.sheets.push(sheet_name);
    }

    /// Record one warning per header field that matched no column of `table`.
    pub fn add_unresolved_fields(&mut self, table: &str, fields_unresolved: &[&'static str]) {
        for field in fields_unresolved {
            self.warnings
                .push(format!("{table}: no header matched field `{field}`"));
        }
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportAssemble {
        ReportAssemble {
            cnt_da_records: self.cnt_da_records,
            cnt_inlet_records: self.cnt_inlet_records,
            cnt_inlets_linked: self.cnt_inlets_linked,
            sheets: self.sheets,
            warnings: self.warnings,
        }
    }
}
