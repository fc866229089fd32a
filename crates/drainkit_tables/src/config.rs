//! JSON configuration file on top of the built-in defaults.
//!
//! ```json
//! {
//!   "phrases_drainage_area": { "intensity": ["10 YR INTENSITY", "INTENSITY"] },
//!   "phrases_inlet": { "max_spread": ["SPREAD (FT)"] },
//!   "label_status": "EXISTING",
//!   "if_trim_link_keys": true
//! }
//! ```
//!
//! Every key is optional. A phrase list replaces that field's defaults and
//! keeps its priority order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::spec::{ReportError, SemanticField, SpecFieldPhrases, SpecReportOptions};

/// On-disk configuration shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecReportConfig {
    pub phrases_drainage_area: BTreeMap<String, Vec<String>>,
    pub phrases_inlet: BTreeMap<String, Vec<String>>,
    pub label_status: Option<String>,
    pub if_trim_link_keys: Option<bool>,
}

impl SpecReportConfig {
    /// Parse a configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ReportError> {
        serde_json::from_str(text).map_err(|err| ReportError::InvalidConfig(err.to_string()))
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path).map_err(|err| {
            ReportError::InvalidConfig(format!("{}: {err}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Overlay this configuration on `options`.
    pub fn apply(&self, options: &mut SpecReportOptions) -> Result<(), ReportError> {
        apply_phrase_overrides(
            &mut options.phrases_da,
            &self.phrases_drainage_area,
            "phrases_drainage_area",
        )?;
        apply_phrase_overrides(&mut options.phrases_inlet, &self.phrases_inlet, "phrases_inlet")?;

        if let Some(label_status) = &self.label_status {
            options.label_status = label_status.clone();
        }
        if let Some(if_trim_link_keys) = self.if_trim_link_keys {
            options.if_trim_link_keys = if_trim_link_keys;
        }
        Ok(())
    }
}

fn apply_phrase_overrides<F: SemanticField>(
    phrases: &mut SpecFieldPhrases<F>,
    dict_overrides: &BTreeMap<String, Vec<String>>,
    c_section: &str,
) -> Result<(), ReportError> {
    for (c_name, l_phrases) in dict_overrides {
        let Some(field) = F::from_name(c_name) else {
            let l_known: Vec<&str> = F::ALL.iter().map(|f| f.name()).collect();
            return Err(ReportError::InvalidConfig(format!(
                "{c_section}: unknown field `{c_name}` (expected one of: {})",
                l_known.join(", ")
            )));
        };

        let l_phrases: Vec<String> = l_phrases.iter().map(|p| p.trim().to_string()).collect();
        if l_phrases.is_empty() || l_phrases.iter().any(String::is_empty) {
            return Err(ReportError::InvalidConfig(format!(
                "{c_section}.{c_name}: phrase list must hold non-empty phrases"
            )));
        }
        phrases.set_phrases(field, l_phrases);
    }
    Ok(())
}

/// Default options, overlaid with the configuration file at `path` when given.
pub fn load_report_options(path: Option<&Path>) -> Result<SpecReportOptions, ReportError> {
    let mut options = SpecReportOptions::default();
    if let Some(path) = path {
        SpecReportConfig::from_path(path)?.apply(&mut options)?;
        info!(path = %path.display(), "configuration loaded");
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumDaField, EnumInletField};

    #[test]
    fn test_no_path_yields_defaults() {
        let options = load_report_options(None).expect("defaults");
        assert_eq!(options, SpecReportOptions::default());
    }

    #[test]
    fn test_overrides_replace_phrases_and_scalars() {
        let config = SpecReportConfig::from_json_str(
            r#"{
                "phrases_drainage_area": {"intensity": ["I10", "INTENSITY"]},
                "phrases_inlet": {"max_spread": [" spread (ft) "]},
                "label_status": "EXISTING",
                "if_trim_link_keys": true
            }"#,
        )
        .expect("parse");
        let mut options = SpecReportOptions::default();

        config.apply(&mut options).expect("apply");

        assert_eq!(
            options.phrases_da.phrases(EnumDaField::Intensity),
            Some(["I10".to_string(), "INTENSITY".to_string()].as_slice())
        );
        assert_eq!(
            options.phrases_inlet.phrases(EnumInletField::MaxSpread),
            Some(["spread (ft)".to_string()].as_slice())
        );
        assert_eq!(
            options.phrases_da.phrases(EnumDaField::TcMin),
            SpecReportOptions::default().phrases_da.phrases(EnumDaField::TcMin)
        );
        assert_eq!(options.label_status, "EXISTING");
        assert!(options.if_trim_link_keys);
    }

    #[test]
    fn test_unknown_field_name_is_rejected() {
        let config =
            SpecReportConfig::from_json_str(r#"{"phrases_inlet": {"rim": ["RIM"]}}"#).expect("parse");
        let err = config
            .apply(&mut SpecReportOptions::default())
            .expect_err("unknown field");
        assert!(matches!(err, ReportError::InvalidConfig(msg) if msg.contains("`rim`")));
    }

    #[test]
    fn test_empty_phrase_lists_are_rejected() {
        for c_json in [
            r#"{"phrases_drainage_area": {"tc_min": []}}"#,
            r#"{"phrases_drainage_area": {"tc_min": ["  "]}}"#,
        ] {
            let config = SpecReportConfig::from_json_str(c_json).expect("parse");
            assert!(matches!(
                config.apply(&mut SpecReportOptions::default()),
                Err(ReportError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert!(matches!(
            SpecReportConfig::from_json_str(r#"{"label": "X"}"#),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("drainkit.json");
        fs::write(&path, r#"{"label_status": "FUTURE"}"#).expect("write");

        let options = load_report_options(Some(&path)).expect("load");
        assert_eq!(options.label_status, "FUTURE");

        let err = load_report_options(Some(&tmp.path().join("missing.json")))
            .expect_err("missing file");
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }
}
