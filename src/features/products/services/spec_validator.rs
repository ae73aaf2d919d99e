use serde::Serialize;
use utoipa::ToSchema;

use crate::features::characteristics::models::CharacteristicKind;
use crate::features::products::models::{SpecDocument, SpecValue};

/// What a category's link set expects of one spec key
#[derive(Debug, Clone)]
pub struct SpecRule {
    pub key: String,
    pub kind: CharacteristicKind,
    pub is_required: bool,
    /// Canonical option values for select/multiselect kinds; empty when the
    /// option set has not been populated yet, in which case membership is
    /// not checked.
    pub allowed_values: Vec<String>,
}

/// Advisory validation report for a product spec document.
///
/// Findings are reported, never enforced: the write that produced them
/// proceeds regardless.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SpecReport {
    /// Required keys absent from the document
    pub missing_required: Vec<String>,
    /// Document keys with no link in the product's category
    pub unknown_keys: Vec<String>,
    /// Keys whose value shape or option membership does not match the
    /// characteristic
    pub kind_mismatches: Vec<String>,
}

impl SpecReport {
    pub fn is_clean(&self) -> bool {
        self.missing_required.is_empty()
            && self.unknown_keys.is_empty()
            && self.kind_mismatches.is_empty()
    }
}

/// Validate a spec document against its category's link set.
pub fn validate_specs(rules: &[SpecRule], specs: &SpecDocument) -> SpecReport {
    let mut report = SpecReport::default();

    for rule in rules {
        if rule.is_required && !specs.contains_key(&rule.key) {
            report.missing_required.push(rule.key.clone());
        }
    }

    for (key, value) in specs {
        let Some(rule) = rules.iter().find(|r| &r.key == key) else {
            report.unknown_keys.push(key.clone());
            continue;
        };

        if let Some(mismatch) = check_value(rule, value) {
            report.kind_mismatches.push(mismatch);
        }
    }

    report
}

fn check_value(rule: &SpecRule, value: &SpecValue) -> Option<String> {
    match (rule.kind, value) {
        (CharacteristicKind::Text, SpecValue::Text(_)) => None,
        (CharacteristicKind::Number, SpecValue::Number(_)) => None,
        (CharacteristicKind::Range, SpecValue::Number(_)) => None,
        (CharacteristicKind::Boolean, SpecValue::Boolean(_)) => None,
        (CharacteristicKind::Select, SpecValue::Text(v)) => {
            if !rule.allowed_values.is_empty() && !rule.allowed_values.contains(v) {
                Some(format!(
                    "{}: '{}' is not an option of this characteristic",
                    rule.key, v
                ))
            } else {
                None
            }
        }
        (CharacteristicKind::Multiselect, SpecValue::Many(values)) => {
            if rule.allowed_values.is_empty() {
                return None;
            }
            let stray: Vec<&String> = values
                .iter()
                .filter(|v| !rule.allowed_values.contains(v))
                .collect();
            if stray.is_empty() {
                None
            } else {
                Some(format!(
                    "{}: {:?} are not options of this characteristic",
                    rule.key, stray
                ))
            }
        }
        (kind, value) => Some(format!(
            "{}: expected a {:?} value, got {}",
            rule.key,
            kind,
            value.shape()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rule(key: &str, kind: CharacteristicKind, is_required: bool) -> SpecRule {
        SpecRule {
            key: key.to_string(),
            kind,
            is_required,
            allowed_values: Vec::new(),
        }
    }

    fn doc(entries: &[(&str, SpecValue)]) -> SpecDocument {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_conforming_document_is_clean() {
        let rules = vec![
            rule("cpu", CharacteristicKind::Text, true),
            rule("weight", CharacteristicKind::Number, false),
            rule("wireless", CharacteristicKind::Boolean, false),
        ];
        let specs = doc(&[
            ("cpu", SpecValue::Text("i5".into())),
            ("weight", SpecValue::Number(4.2)),
            ("wireless", SpecValue::Boolean(true)),
        ]);

        let report = validate_specs(&rules, &specs);

        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_required_key_is_flagged() {
        let rules = vec![rule("cpu", CharacteristicKind::Text, true)];

        let report = validate_specs(&rules, &BTreeMap::new());

        assert_eq!(report.missing_required, vec!["cpu"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_unknown_key_is_flagged_not_rejected() {
        let rules = vec![rule("cpu", CharacteristicKind::Text, false)];
        let specs = doc(&[
            ("cpu", SpecValue::Text("i5".into())),
            ("legacy_field", SpecValue::Text("stale".into())),
        ]);

        let report = validate_specs(&rules, &specs);

        assert_eq!(report.unknown_keys, vec!["legacy_field"]);
    }

    #[test]
    fn test_shape_mismatch_is_flagged() {
        let rules = vec![rule("cpu", CharacteristicKind::Text, false)];
        let specs = doc(&[("cpu", SpecValue::Number(5.0))]);

        let report = validate_specs(&rules, &specs);

        assert_eq!(report.kind_mismatches.len(), 1);
        assert!(report.kind_mismatches[0].contains("cpu"));
    }

    #[test]
    fn test_range_kind_takes_a_number() {
        let rules = vec![rule("print_speed", CharacteristicKind::Range, false)];
        let specs = doc(&[("print_speed", SpecValue::Number(30.0))]);

        assert!(validate_specs(&rules, &specs).is_clean());
    }

    #[test]
    fn test_select_value_must_be_an_option() {
        let mut color = rule("color", CharacteristicKind::Select, false);
        color.allowed_values = vec!["black".into(), "white".into()];
        let rules = vec![color];

        let ok = doc(&[("color", SpecValue::Text("black".into()))]);
        assert!(validate_specs(&rules, &ok).is_clean());

        let stray = doc(&[("color", SpecValue::Text("red".into()))]);
        let report = validate_specs(&rules, &stray);
        assert_eq!(report.kind_mismatches.len(), 1);
    }

    #[test]
    fn test_select_without_options_skips_membership_check() {
        let rules = vec![rule("color", CharacteristicKind::Select, false)];
        let specs = doc(&[("color", SpecValue::Text("anything".into()))]);

        assert!(validate_specs(&rules, &specs).is_clean());
    }

    #[test]
    fn test_multiselect_members_must_all_be_options() {
        let mut ports = rule("ports", CharacteristicKind::Multiselect, false);
        ports.allowed_values = vec!["usb".into(), "hdmi".into(), "ethernet".into()];
        let rules = vec![ports];

        let ok = doc(&[(
            "ports",
            SpecValue::Many(vec!["usb".into(), "hdmi".into()]),
        )]);
        assert!(validate_specs(&rules, &ok).is_clean());

        let stray = doc(&[(
            "ports",
            SpecValue::Many(vec!["usb".into(), "scart".into()]),
        )]);
        let report = validate_specs(&rules, &stray);
        assert_eq!(report.kind_mismatches.len(), 1);
        assert!(report.kind_mismatches[0].contains("scart"));
    }
}
