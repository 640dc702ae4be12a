//! Yup dialect.

use super::{render_object, SchemaDialect, SCHEMA_IDENT};
use crate::imports::Import;
use crate::schema_generator::{SchemaBase, SchemaConstraint};
use crate::writer::js_number;

/// Strategy implementation for `yup` + `@hookform/resolvers/yup`.
///
/// Yup fields are optional unless marked, so every constraint ends with either
/// `.required()` or `.optional()`.
pub struct YupDialect;

static YUP_IMPORTS: [Import; 2] = [
    Import::namespace("yup", "yup"),
    Import::named("@hookform/resolvers/yup", "yupResolver"),
];

impl SchemaDialect for YupDialect {
    fn imports(&self) -> &'static [Import] {
        &YUP_IMPORTS
    }

    fn constraint(&self, constraint: &SchemaConstraint) -> String {
        let mut code = match &constraint.base {
            SchemaBase::String => "yup.string()".to_string(),
            SchemaBase::Email => "yup.string().email()".to_string(),
            SchemaBase::Number { min, max } => {
                let mut chain = "yup.number()".to_string();
                if let Some(min) = min {
                    chain.push_str(&format!(".min({})", js_number(*min)));
                }
                if let Some(max) = max {
                    chain.push_str(&format!(".max({})", js_number(*max)));
                }
                chain
            }
            SchemaBase::Boolean => "yup.boolean()".to_string(),
            SchemaBase::DateOrString => "yup.mixed<Date | string>()".to_string(),
            SchemaBase::StringArray { min_items } => format!(
                "yup.array().of(yup.string().required()).min({}, \"Please select at least one item\")",
                min_items
            ),
            SchemaBase::Files => "yup.array().of(yup.mixed<File>().required())".to_string(),
            SchemaBase::Location => {
                "yup.tuple([yup.string().required(), yup.string().optional()])".to_string()
            }
        };
        code.push_str(if constraint.optional {
            ".optional()"
        } else {
            ".required()"
        });
        code
    }

    fn object(&self, entries: &[(String, String)]) -> String {
        render_object("yup.object", entries)
    }

    fn resolver_for(&self, schema: &str) -> String {
        format!("yupResolver({})", schema)
    }

    fn omit(&self, hidden: &str) -> String {
        format!("{}.omit({})", SCHEMA_IDENT, hidden)
    }

    fn infer_type(&self) -> String {
        format!("yup.InferType<typeof {}>", SCHEMA_IDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_optional() {
        let email = SchemaConstraint {
            base: SchemaBase::Email,
            optional: false,
        };
        assert_eq!(YupDialect.constraint(&email), "yup.string().email().required()");

        let promo = SchemaConstraint {
            base: SchemaBase::String,
            optional: true,
        };
        assert_eq!(YupDialect.constraint(&promo), "yup.string().optional()");
    }

    #[test]
    fn test_object_and_infer() {
        let entries = vec![("terms".to_string(), "yup.boolean().required()".to_string())];
        assert_eq!(
            YupDialect.object(&entries),
            "yup.object({\n  terms: yup.boolean().required(),\n})"
        );
        assert_eq!(YupDialect.infer_type(), "yup.InferType<typeof formSchema>");
    }
}
