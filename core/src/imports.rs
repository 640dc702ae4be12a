#![deny(missing_docs)]

//! # Import Collection
//!
//! Accumulates the import statements required by the generated component.
//!
//! Variant rules and dialects declare what they need; the set deduplicates the
//! requests and renders them in a fixed order (react first, packages next,
//! project aliases last, alphabetical within each group) so identical input
//! always yields identical output.

use std::collections::{BTreeMap, BTreeSet};

/// A single import requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Import {
    /// `import { name } from "module"`
    Named {
        /// Module specifier.
        module: &'static str,
        /// Imported binding.
        name: &'static str,
    },
    /// `import * as alias from "module"`
    Namespace {
        /// Module specifier.
        module: &'static str,
        /// Namespace binding.
        alias: &'static str,
    },
}

impl Import {
    /// Shorthand for a named import.
    pub const fn named(module: &'static str, name: &'static str) -> Self {
        Import::Named { module, name }
    }

    /// Shorthand for a namespace import.
    pub const fn namespace(module: &'static str, alias: &'static str) -> Self {
        Import::Namespace { module, alias }
    }

    /// The module specifier.
    pub fn module(&self) -> &'static str {
        match *self {
            Import::Named { module, .. } | Import::Namespace { module, .. } => module,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ModuleImports {
    namespace: Option<&'static str>,
    named: BTreeSet<&'static str>,
}

/// A deduplicated, deterministically ordered set of imports.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSet {
    modules: BTreeMap<(u8, &'static str), ModuleImports>,
}

/// Names per line before the statement is broken over several lines.
const INLINE_LIMIT: usize = 3;

fn module_rank(module: &str) -> u8 {
    if module == "react" {
        0
    } else if module.starts_with("@/") {
        2
    } else {
        1
    }
}

impl ImportSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one import.
    pub fn insert(&mut self, import: Import) {
        let key = (module_rank(import.module()), import.module());
        let entry = self.modules.entry(key).or_default();
        match import {
            Import::Named { name, .. } => {
                entry.named.insert(name);
            }
            Import::Namespace { alias, .. } => entry.namespace = Some(alias),
        }
    }

    /// Adds every import of the slice.
    pub fn extend(&mut self, imports: &[Import]) {
        for import in imports {
            self.insert(*import);
        }
    }

    /// Merges another set into this one.
    pub fn merge(&mut self, other: &ImportSet) {
        for ((rank, module), imports) in &other.modules {
            let entry = self.modules.entry((*rank, *module)).or_default();
            if imports.namespace.is_some() {
                entry.namespace = imports.namespace;
            }
            entry.named.extend(imports.named.iter().copied());
        }
    }

    /// Whether `name` is imported from `module`.
    pub fn contains(&self, module: &str, name: &str) -> bool {
        self.modules.iter().any(|((_, m), imports)| {
            *m == module && (imports.named.contains(name) || imports.namespace == Some(name))
        })
    }

    /// Number of distinct modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Renders the import statements, one per module (namespace imports on their own line).
    pub fn render(&self) -> String {
        let mut code = String::new();
        for ((_, module), imports) in &self.modules {
            if let Some(alias) = imports.namespace {
                code.push_str(&format!("import * as {} from \"{}\"\n", alias, module));
            }
            if imports.named.is_empty() {
                continue;
            }
            if imports.named.len() <= INLINE_LIMIT {
                let names: Vec<&str> = imports.named.iter().copied().collect();
                code.push_str(&format!(
                    "import {{ {} }} from \"{}\"\n",
                    names.join(", "),
                    module
                ));
            } else {
                code.push_str("import {\n");
                for name in &imports.named {
                    code.push_str(&format!("  {},\n", name));
                }
                code.push_str(&format!("}} from \"{}\"\n", module));
            }
        }
        code
    }
}
