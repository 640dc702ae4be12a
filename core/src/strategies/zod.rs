//! Zod dialect.

use super::{render_object, SchemaDialect, SCHEMA_IDENT};
use crate::imports::Import;
use crate::schema_generator::{SchemaBase, SchemaConstraint};
use crate::writer::js_number;

/// Strategy implementation for `zod` + `@hookform/resolvers/zod`.
pub struct ZodDialect;

static ZOD_IMPORTS: [Import; 2] = [
    Import::named("zod", "z"),
    Import::named("@hookform/resolvers/zod", "zodResolver"),
];

impl SchemaDialect for ZodDialect {
    fn imports(&self) -> &'static [Import] {
        &ZOD_IMPORTS
    }

    fn constraint(&self, constraint: &SchemaConstraint) -> String {
        let mut code = match &constraint.base {
            SchemaBase::String => "z.string()".to_string(),
            SchemaBase::Email => "z.string().email()".to_string(),
            SchemaBase::Number { min, max } => {
                let mut chain = "z.coerce.number()".to_string();
                if let Some(min) = min {
                    chain.push_str(&format!(".min({})", js_number(*min)));
                }
                if let Some(max) = max {
                    chain.push_str(&format!(".max({})", js_number(*max)));
                }
                chain
            }
            SchemaBase::Boolean => "z.boolean()".to_string(),
            SchemaBase::DateOrString => "z.union([z.date(), z.string()])".to_string(),
            SchemaBase::StringArray { min_items } => format!(
                "z.array(z.string()).min({}, {{ message: \"Please select at least one item\" }})",
                min_items
            ),
            SchemaBase::Files => "z.array(z.instanceof(File))".to_string(),
            SchemaBase::Location => "z.tuple([z.string(), z.string().optional()])".to_string(),
        };
        if constraint.optional {
            code.push_str(".optional()");
        }
        code
    }

    fn object(&self, entries: &[(String, String)]) -> String {
        render_object("z.object", entries)
    }

    fn resolver_for(&self, schema: &str) -> String {
        format!("zodResolver({})", schema)
    }

    fn omit(&self, hidden: &str) -> String {
        format!(
            "{}.omit(Object.fromEntries({}.map((name) => [name, true] as const)) as Partial<Record<keyof FormValues, true>>)",
            SCHEMA_IDENT, hidden
        )
    }

    fn infer_type(&self) -> String {
        format!("z.infer<typeof {}>", SCHEMA_IDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(base: SchemaBase) -> SchemaConstraint {
        SchemaConstraint {
            base,
            optional: false,
        }
    }

    #[test]
    fn test_base_chains() {
        let d = ZodDialect;
        assert_eq!(d.constraint(&required(SchemaBase::Email)), "z.string().email()");
        assert_eq!(d.constraint(&required(SchemaBase::Boolean)), "z.boolean()");
        assert_eq!(
            d.constraint(&required(SchemaBase::DateOrString)),
            "z.union([z.date(), z.string()])"
        );
        assert_eq!(
            d.constraint(&required(SchemaBase::Number {
                min: Some(0.0),
                max: Some(100.0)
            })),
            "z.coerce.number().min(0).max(100)"
        );
    }

    #[test]
    fn test_optional_suffix() {
        let c = SchemaConstraint {
            base: SchemaBase::String,
            optional: true,
        };
        assert_eq!(ZodDialect.constraint(&c), "z.string().optional()");
    }

    #[test]
    fn test_array_min_length() {
        let c = required(SchemaBase::StringArray { min_items: 1 });
        assert!(ZodDialect
            .constraint(&c)
            .starts_with("z.array(z.string()).min(1,"));
    }
}
