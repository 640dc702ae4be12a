//! # External Component Notice
//!
//! Lists the components a form uses that are not part of the base UI kit, so
//! callers can tell users what to install. Has no effect on generated code.

use crate::model::{flatten_fields, FormFieldOrGroup, FormStep};
use crate::registry::{lookup, Variant};
use indexmap::IndexSet;
use serde::Serialize;

/// An external component and where to get it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalComponent {
    /// The variant needing the component.
    pub variant: Variant,
    /// Installation instructions.
    pub help_url: &'static str,
}

fn collect<'a>(rows: impl IntoIterator<Item = &'a FormFieldOrGroup>) -> Vec<ExternalComponent> {
    let mut seen = IndexSet::new();
    for row in rows {
        for field in flatten_fields(std::slice::from_ref(row)) {
            if let Ok(rule) = lookup(&field.variant) {
                if let Some(help_url) = rule.help_url {
                    seen.insert((rule.variant, help_url));
                }
            }
        }
    }
    seen.into_iter()
        .map(|(variant, help_url)| ExternalComponent { variant, help_url })
        .collect()
}

/// External variants used by the rows, deduplicated, in order of first appearance.
pub fn external_variants_used(rows: &[FormFieldOrGroup]) -> Vec<ExternalComponent> {
    collect(rows)
}

/// External variants used across all steps of a multi-step form.
pub fn external_variants_used_in_steps(steps: &[FormStep]) -> Vec<ExternalComponent> {
    collect(steps.iter().flat_map(|step| step.fields.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormField;

    #[test]
    fn test_signature_input_notice() {
        let rows = vec![FormField::new("Signature Input", "signature").into()];
        let used = external_variants_used(&rows);
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].variant, Variant::SignatureInput);
        assert!(used[0].help_url.starts_with("https://"));
    }

    #[test]
    fn test_first_appearance_order_and_dedup() {
        let rows = vec![
            FormField::new("Phone", "mobile").into(),
            vec![
                FormField::new("Input", "name"),
                FormField::new("Tags Input", "tags"),
                FormField::new("Phone", "work"),
            ]
            .into(),
            FormField::new("Foo", "unknown").into(),
        ];
        let variants: Vec<Variant> = external_variants_used(&rows)
            .into_iter()
            .map(|c| c.variant)
            .collect();
        assert_eq!(variants, vec![Variant::Phone, Variant::TagsInput]);
    }

    #[test]
    fn test_steps() {
        let steps = vec![
            FormStep::new("a", "A", vec![FormField::new("Password", "pw").into()]),
            FormStep::new("b", "B", vec![FormField::new("File Input", "cv").into()]),
        ];
        let variants: Vec<Variant> = external_variants_used_in_steps(&steps)
            .into_iter()
            .map(|c| c.variant)
            .collect();
        assert_eq!(variants, vec![Variant::Password, Variant::FileInput]);
    }

    #[test]
    fn test_serializes_variant_name() {
        let rows = vec![FormField::new("Smart Datetime Input", "when").into()];
        let json = serde_json::to_value(external_variants_used(&rows)).unwrap();
        assert_eq!(json[0]["variant"], "Smart Datetime Input");
        assert!(json[0]["helpUrl"].is_string());
    }
}
