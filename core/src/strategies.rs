#![deny(missing_docs)]

//! # Strategy Module
//!
//! Defines the `SchemaDialect` trait and its implementations (`ZodDialect`,
//! `YupDialect`) so the same constraint IR can be emitted for different
//! validation libraries.

use crate::config::ValidationLibrary;
use crate::imports::Import;
use crate::schema_generator::SchemaConstraint;

/// Yup output.
pub mod yup;
/// Zod output.
pub mod zod;

pub use yup::YupDialect;
pub use zod::ZodDialect;

/// Name of the schema constant in generated code.
pub const SCHEMA_IDENT: &str = "formSchema";

/// A strategy trait for decoupling validation-library specific code generation.
///
/// Implementors define the imports, the constraint chains and the
/// `react-hook-form` resolver wiring for one library.
pub trait SchemaDialect {
    /// Imports needed by the schema declaration and the resolver call.
    fn imports(&self) -> &'static [Import];

    /// Renders one field constraint (e.g. `z.string().optional()`).
    fn constraint(&self, constraint: &SchemaConstraint) -> String;

    /// Renders the object builder wrapping the given `key: constraint` lines.
    ///
    /// # Arguments
    ///
    /// * `entries` - Already rendered `key: constraint` pairs in declaration order.
    fn object(&self, entries: &[(String, String)]) -> String;

    /// The resolver wrapping an arbitrary schema expression.
    fn resolver_for(&self, schema: &str) -> String;

    /// The resolver expression passed to `useForm` (e.g. `zodResolver(formSchema)`).
    fn resolver_call(&self) -> String {
        self.resolver_for(SCHEMA_IDENT)
    }

    /// `formSchema` without the keys listed in the `hidden` array expression.
    fn omit(&self, hidden: &str) -> String;

    /// The TypeScript type inferred from the schema (e.g. `z.infer<typeof formSchema>`).
    fn infer_type(&self) -> String;
}

/// Returns the dialect for a validation library.
pub fn dialect_for(library: ValidationLibrary) -> &'static dyn SchemaDialect {
    match library {
        ValidationLibrary::Zod => &ZodDialect,
        ValidationLibrary::Yup => &YupDialect,
    }
}

/// Shared object rendering: `<builder>({` + one indented entry per line + `})`.
pub(crate) fn render_object(builder: &str, entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return format!("{}({{}})", builder);
    }
    let mut code = format!("{}({{\n", builder);
    for (key, value) in entries {
        code.push_str(&format!("  {}: {},\n", key, value));
    }
    code.push_str("})");
    code
}
