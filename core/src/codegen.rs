#![deny(missing_docs)]

//! # Code Assembler
//!
//! Stitches the generated pieces into one TSX module.
//!
//! Section order is fixed: imports, schema (with the `FormValues` alias and any
//! module-level declarations), the component with its `useForm` call and
//! default values, the rendered markup, and the module-level submit handler.
//! The result goes through the [`format_source`] pass so repeated calls with
//! the same input produce byte-identical text.

use crate::config::GenerationConfig;
use crate::error::AppResult;
use crate::formatter::format_source;
use crate::imports::{Import, ImportSet};
use crate::markup::{implicit_step, render_markup, render_step_markup};
use crate::model::{flatten_fields, FormFieldOrGroup, FormStep};
use crate::registry::lookup;
use crate::schema_generator::{build_schema, object_key};
use crate::strategies::{dialect_for, SchemaDialect};
use crate::validation::{validate_fields, validate_steps};
use crate::writer::{js_string, SourceWriter};
use indexmap::IndexMap;

static BASE_IMPORTS: [Import; 3] = [
    Import::named("sonner", "toast"),
    Import::named("react-hook-form", "useForm"),
    Import::named("@/components/ui/button", "Button"),
];
const USE_STATE: Import = Import::named("react", "useState");

const SUBMIT_HANDLER: &str = r#"function onSubmit(values: FormValues) {
  try {
    console.log(values)
    toast(
      <pre className="mt-2 w-[340px] rounded-md bg-slate-950 p-4">
        <code className="text-white">{JSON.stringify(values, null, 2)}</code>
      </pre>
    )
  } catch (error) {
    console.error("Form submission error", error)
    toast.error("Failed to submit the form. Please try again.")
  }
}"#;

const STEP_STATE: &str = r#"const [currentStep, setCurrentStep] = useState(0)
const values = form.watch()
const visibleSteps = steps.filter((step) => stepConditions[step.id]?.(values) ?? true)
const activeStep = visibleSteps[Math.min(currentStep, visibleSteps.length - 1)]
const isLastStep = currentStep >= visibleSteps.length - 1"#;

const STEP_HANDLERS: &str = r#"async function handleNext() {
  if (activeStep.validation === "onNext") {
    const valid = await form.trigger(activeStep.fields)
    if (!valid) return
  }
  setCurrentStep((step) => Math.min(step + 1, visibleSteps.length - 1))
}

function handlePrevious() {
  setCurrentStep((step) => Math.max(step - 1, 0))
}"#;

/// The pieces of a generated module, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceParts {
    /// Every import the module needs.
    pub imports: ImportSet,
    /// The `const formSchema = ...` declaration.
    pub schema: String,
    /// Module-level declarations placed after the `FormValues` alias.
    pub declarations: Vec<String>,
    /// Default value literal per field, in field order.
    pub defaults: IndexMap<String, String>,
    /// Resolver expression replacing the dialect's plain `formSchema` resolver.
    pub resolver: Option<String>,
    /// Statement blocks inside the component, after `useForm`.
    pub state: Vec<String>,
    /// The JSX tree returned by the component.
    pub markup: String,
}

/// Computes the TypeScript default value literal of every data field.
///
/// `Label` fields are skipped; a variant missing from the registry defaults to
/// `undefined`.
pub fn build_default_values(rows: &[FormFieldOrGroup]) -> IndexMap<String, String> {
    flatten_fields(rows)
        .into_iter()
        .filter_map(|field| match lookup(&field.variant) {
            Ok(rule) if !rule.is_data() => None,
            Ok(rule) => Some((field.name.clone(), (rule.default_value)(field))),
            Err(_) => Some((field.name.clone(), "undefined".to_string())),
        })
        .collect()
}

fn base_imports(config: &GenerationConfig, multi_step: bool) -> ImportSet {
    let mut imports = ImportSet::new();
    imports.extend(&BASE_IMPORTS);
    imports.extend(dialect_for(config.validation_library).imports());
    if multi_step {
        imports.insert(USE_STATE);
    }
    imports
}

/// Builds the parts of a single-page form.
pub fn form_parts(rows: &[FormFieldOrGroup], config: &GenerationConfig) -> AppResult<SourceParts> {
    let markup = render_markup(rows, config)?;
    let mut imports = base_imports(config, false);
    imports.merge(&markup.imports);

    Ok(SourceParts {
        imports,
        schema: build_schema(rows, dialect_for(config.validation_library)),
        declarations: markup.declarations,
        defaults: build_default_values(rows),
        resolver: None,
        state: Vec::new(),
        markup: markup.source,
    })
}

/// Builds the parts of a multi-step form.
pub fn step_parts(steps: &[FormStep], config: &GenerationConfig) -> AppResult<SourceParts> {
    let markup = render_step_markup(steps, config)?;
    let mut imports = base_imports(config, true);
    imports.merge(&markup.imports);

    let rows: Vec<FormFieldOrGroup> = steps
        .iter()
        .flat_map(|step| step.fields.iter().cloned())
        .collect();

    let dialect = dialect_for(config.validation_library);
    let mut declarations = markup.declarations;
    declarations.push(steps_table(steps));
    declarations.push(step_conditions(steps));

    // Fields of a hidden step must not block submission.
    let resolver = if steps.iter().any(|step| step.conditional.is_some()) {
        declarations.push(visible_schema(dialect));
        Some(format!(
            "(values, context, options) => {}(values, context, options)",
            dialect.resolver_for("visibleSchema(values)")
        ))
    } else {
        None
    };

    Ok(SourceParts {
        imports,
        schema: build_schema(&rows, dialect),
        declarations,
        defaults: build_default_values(&rows),
        resolver,
        state: vec![STEP_STATE.to_string(), STEP_HANDLERS.to_string()],
        markup: markup.source,
    })
}

/// `const steps = [...]`: id, title, data fields and validation timing per step.
fn steps_table(steps: &[FormStep]) -> String {
    let mut w = SourceWriter::new();
    w.line("const steps: Array<{");
    w.nest(|w| {
        w.line("id: string");
        w.line("title: string");
        w.line("fields: (keyof FormValues)[]");
        w.line("validation: \"onNext\" | \"onSubmit\"");
    });
    w.line("}> = [");
    w.nest(|w| {
        for step in steps {
            let fields: Vec<String> = build_default_values(&step.fields)
                .keys()
                .map(|name| js_string(name))
                .collect();
            w.line(format!(
                "{{ id: {}, title: {}, fields: [{}], validation: {} }},",
                js_string(&step.id),
                js_string(&step.title),
                fields.join(", "),
                js_string(step.validation.as_str())
            ));
        }
    });
    w.line("]");
    w.finish()
}

/// `const stepConditions = {...}` with each condition emitted verbatim.
fn step_conditions(steps: &[FormStep]) -> String {
    let conditional: Vec<_> = steps
        .iter()
        .filter_map(|step| step.conditional.as_ref().map(|c| (&step.id, c)))
        .collect();
    let head = "const stepConditions: Record<string, (values: FormValues) => boolean> =";
    if conditional.is_empty() {
        return format!("{} {{}}", head);
    }
    let mut w = SourceWriter::new();
    w.line(format!("{} {{", head));
    w.nest(|w| {
        for (id, cond) in conditional {
            w.line(format!("{}: (values) => {},", object_key(id), cond.condition.trim()));
        }
    });
    w.line("}");
    w.finish()
}

/// `function visibleSchema(values)`: the schema without the fields of steps
/// whose condition does not hold for `values`.
fn visible_schema(dialect: &dyn SchemaDialect) -> String {
    let mut w = SourceWriter::new();
    w.line("function visibleSchema(values: FormValues) {");
    w.nest(|w| {
        w.line("const hidden = steps");
        w.nest(|w| {
            w.line(".filter((step) => !(stepConditions[step.id]?.(values) ?? true))");
            w.line(".flatMap((step) => step.fields)");
        });
        w.line(format!(
            "return {} as unknown as typeof formSchema",
            dialect.omit("hidden")
        ));
    });
    w.line("}");
    w.finish()
}

/// Concatenates the parts in section order and formats the result.
///
/// # Errors
///
/// `FormatterFailure` when the assembled text is malformed.
pub fn assemble(parts: &SourceParts, config: &GenerationConfig) -> AppResult<String> {
    let dialect = dialect_for(config.validation_library);
    let mut w = SourceWriter::new();

    if config.use_client_directive {
        w.line("\"use client\"");
        w.blank();
    }
    w.lines(&parts.imports.render());
    w.blank();
    w.lines(&parts.schema);
    w.blank();
    w.line(format!("type FormValues = {}", dialect.infer_type()));
    for declaration in &parts.declarations {
        w.blank();
        w.lines(declaration);
    }
    w.blank();

    w.line(format!(
        "export default function {}() {{",
        config.component_ident()
    ));
    w.nest(|w| {
        w.line("const form = useForm<FormValues>({");
        w.nest(|w| {
            let resolver = parts
                .resolver
                .clone()
                .unwrap_or_else(|| dialect.resolver_call());
            w.line(format!("resolver: {},", resolver));
            if parts.defaults.is_empty() {
                w.line("defaultValues: {},");
            } else {
                w.line("defaultValues: {");
                w.nest(|w| {
                    for (name, value) in &parts.defaults {
                        w.line(format!("{}: {},", object_key(name), value));
                    }
                });
                w.line("},");
            }
        });
        w.line("})");
        for block in &parts.state {
            w.blank();
            w.lines(block);
        }
        w.blank();
        w.line("return (");
        w.nest(|w| {
            w.lines(&parts.markup);
        });
        w.line(")");
    });
    w.line("}");
    w.blank();
    w.lines(SUBMIT_HANDLER);

    format_source(&w.finish())
}

/// Generates the complete component source for a field list.
///
/// With `config.is_multi_step` the rows become a single step titled "Step 1".
///
/// # Errors
///
/// Name validation errors, `UnknownVariant`, `GroupTooWide` and
/// `FormatterFailure`.
pub fn generate_form_code(rows: &[FormFieldOrGroup], config: &GenerationConfig) -> AppResult<String> {
    if config.is_multi_step {
        return generate_multi_step_form_code(&[implicit_step(rows)], config);
    }
    tracing::debug!(
        rows = rows.len(),
        fields = flatten_fields(rows).len(),
        form_library = ?config.form_library,
        validation_library = ?config.validation_library,
        "generating form code"
    );
    validate_fields(rows)?;
    let parts = form_parts(rows, config)?;
    assemble(&parts, config)
}

/// Generates the complete component source for a multi-step form.
///
/// # Errors
///
/// Step and name validation errors plus everything [`generate_form_code`]
/// can return.
pub fn generate_multi_step_form_code(
    steps: &[FormStep],
    config: &GenerationConfig,
) -> AppResult<String> {
    tracing::debug!(
        steps = steps.len(),
        form_library = ?config.form_library,
        validation_library = ?config.validation_library,
        "generating multi-step form code"
    );
    validate_steps(steps)?;
    let parts = step_parts(steps, config)?;
    assemble(&parts, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormLibrary, ValidationLibrary};
    use crate::error::AppError;
    use crate::model::{FieldOption, FormField};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_email_form_layout() {
        let rows = vec![FormField::new("Input", "email")
            .with_type("email")
            .with_label("Email")
            .with_required(true)
            .into()];
        let code = generate_form_code(&rows, &GenerationConfig::default()).unwrap();

        let expected_head = r#""use client"

import { zodResolver } from "@hookform/resolvers/zod"
import { useForm } from "react-hook-form"
import { toast } from "sonner"
import { z } from "zod"
import { Button } from "@/components/ui/button"
import {
  Form,
  FormControl,
  FormField,
  FormItem,
  FormLabel,
  FormMessage,
} from "@/components/ui/form"
import { Input } from "@/components/ui/input"

const formSchema = z.object({
  email: z.string().email(),
})

type FormValues = z.infer<typeof formSchema>

export default function MyForm() {
  const form = useForm<FormValues>({
    resolver: zodResolver(formSchema),
    defaultValues: {
      email: "",
    },
  })

  return (
    <Form {...form}>
"#;
        assert_eq!(&code[..expected_head.len()], expected_head);
        assert!(code.ends_with("}\n"));
        assert!(code.contains("\nfunction onSubmit(values: FormValues) {\n"));
    }

    #[test]
    fn test_default_values() {
        let rows = vec![
            FormField::new("Label", "intro").into(),
            vec![
                FormField::new("Checkbox", "terms"),
                FormField::new("Tags Input", "tags").with_value(json!(["a"])),
            ]
            .into(),
            FormField::new("Date Picker", "dob").into(),
        ];
        let defaults = build_default_values(&rows);
        let pairs: Vec<(&str, &str)> = defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("terms", "false"),
                ("tags", "[\"a\"]"),
                ("dob", "new Date()"),
            ]
        );
    }

    #[test]
    fn test_yup_without_client_directive() {
        let rows = vec![FormField::new("Input", "name").into()];
        let config = GenerationConfig {
            validation_library: ValidationLibrary::Yup,
            use_client_directive: false,
            component_name: "contact form".to_string(),
            ..GenerationConfig::default()
        };
        let code = generate_form_code(&rows, &config).unwrap();
        assert!(code.starts_with("import { yupResolver } from \"@hookform/resolvers/yup\"\n"));
        assert!(code.contains("import * as yup from \"yup\"\n"));
        assert!(code.contains("resolver: yupResolver(formSchema),"));
        assert!(code.contains("type FormValues = yup.InferType<typeof formSchema>"));
        assert!(code.contains("export default function ContactForm() {"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let rows = vec![
            FormField::new("Input", "email").into(),
            FormField::new("Input", "email").into(),
        ];
        assert!(matches!(
            generate_form_code(&rows, &GenerationConfig::default()),
            Err(AppError::DuplicateFieldName(_))
        ));
    }

    #[test]
    fn test_multi_step_code() {
        let steps = vec![
            FormStep::new(
                "account",
                "Account",
                vec![FormField::new("Input", "email").with_type("email").into()],
            ),
            FormStep::new(
                "company",
                "Company",
                vec![FormField::new("Input", "companyName").into()],
            )
            .with_condition("email", "values.email?.endsWith(\"@corp.com\") ?? false"),
        ];
        let code = generate_multi_step_form_code(&steps, &GenerationConfig::default()).unwrap();

        assert!(code.contains("import { useState } from \"react\"\n"));
        assert!(code.contains(
            "  { id: \"account\", title: \"Account\", fields: [\"email\"], validation: \"onNext\" },\n"
        ));
        assert!(code.contains(
            "  company: (values) => values.email?.endsWith(\"@corp.com\") ?? false,\n"
        ));
        assert!(code.contains("const [currentStep, setCurrentStep] = useState(0)"));
        assert!(code.contains("await form.trigger(activeStep.fields)"));
        assert!(code.contains("stepConditions.company"));
    }

    fn conditional_steps() -> Vec<FormStep> {
        vec![
            FormStep::new(
                "a",
                "Account",
                vec![FormField::new("Checkbox", "corp").into()],
            ),
            FormStep::new(
                "b",
                "Company",
                vec![FormField::new("Input", "workEmail")
                    .with_type("email")
                    .with_required(true)
                    .into()],
            )
            .with_condition("corp", "values.corp === true"),
        ]
    }

    #[test]
    fn test_hidden_step_fields_skip_validation() {
        let code =
            generate_multi_step_form_code(&conditional_steps(), &GenerationConfig::default())
                .unwrap();
        assert!(code.contains("  workEmail: z.string().email(),\n"));
        assert!(code.contains("\nfunction visibleSchema(values: FormValues) {\n"));
        assert!(code.contains(
            "    .filter((step) => !(stepConditions[step.id]?.(values) ?? true))\n"
        ));
        assert!(code.contains(
            "  return formSchema.omit(Object.fromEntries(hidden.map((name) => [name, true] as const)) as Partial<Record<keyof FormValues, true>>) as unknown as typeof formSchema\n"
        ));
        assert!(code.contains(
            "    resolver: (values, context, options) => zodResolver(visibleSchema(values))(values, context, options),\n"
        ));
        assert!(!code.contains("resolver: zodResolver(formSchema),"));

        let decl = code.find("function visibleSchema").unwrap();
        let conditions = code.find("const stepConditions").unwrap();
        let component = code.find("export default function MyForm()").unwrap();
        assert!(conditions < decl && decl < component);
    }

    #[test]
    fn test_hidden_step_fields_skip_validation_yup() {
        let config = GenerationConfig {
            validation_library: ValidationLibrary::Yup,
            ..GenerationConfig::default()
        };
        let code = generate_multi_step_form_code(&conditional_steps(), &config).unwrap();
        assert!(code.contains("  return formSchema.omit(hidden) as unknown as typeof formSchema\n"));
        assert!(code.contains("yupResolver(visibleSchema(values))(values, context, options)"));
    }

    #[test]
    fn test_unconditional_steps_use_plain_resolver() {
        let steps = vec![FormStep::new(
            "a",
            "A",
            vec![FormField::new("Input", "x").into()],
        )];
        let code = generate_multi_step_form_code(&steps, &GenerationConfig::default()).unwrap();
        assert!(code.contains("    resolver: zodResolver(formSchema),\n"));
        assert!(!code.contains("visibleSchema"));
    }

    #[test]
    fn test_empty_step_list_rejected() {
        assert!(matches!(
            generate_multi_step_form_code(&[], &GenerationConfig::default()),
            Err(AppError::NoSteps)
        ));
    }

    #[test]
    fn test_user_text_with_brackets() {
        let rows = vec![
            FormField::new("Input", "age")
                .with_label("Age (years")
                .with_description("Thanks :)")
                .into(),
            FormField::new("Select", "rank")
                .with_label("1) First")
                .with_options(vec![FieldOption::new("[a", "a"), FieldOption::new("b]", "b")])
                .into(),
        ];
        for form_library in [FormLibrary::Shadcn, FormLibrary::HookForm] {
            let config = GenerationConfig {
                form_library,
                ..GenerationConfig::default()
            };
            let code = generate_form_code(&rows, &config).unwrap();
            assert!(code.contains("Age &#40;years"));
            assert!(code.contains("Thanks :&#41;"));
            assert!(code.contains("1&#41; First"));
            assert!(code.contains("<SelectItem value=\"a\">&#91;a</SelectItem>"));
        }
    }

    #[test]
    fn test_step_text_and_condition_with_brackets() {
        let mut steps = vec![
            FormStep::new("plan", "Plan [1", vec![FormField::new("Input", "tier").into()]),
            FormStep::new("pro", "Pro :)", vec![FormField::new("Input", "seats").into()])
                .with_condition("tier", "values.tier === '(pro'"),
        ];
        steps[1].description = Some("(optional".to_string());
        let code = generate_multi_step_form_code(&steps, &GenerationConfig::default()).unwrap();
        assert!(code.contains("Plan &#91;1"));
        assert!(code.contains("Pro :&#41;"));
        assert!(code.contains("&#40;optional"));
        assert!(code.contains("  pro: (values) => values.tier === '(pro',\n"));
    }

    #[test]
    fn test_multi_step_flag_on_flat_fields() {
        let rows = vec![FormField::new("Input", "email").into()];
        let code =
            generate_form_code(&rows, &GenerationConfig::default().with_multi_step(true)).unwrap();
        assert!(code.contains("{ id: \"step1\", title: \"Step 1\", fields: [\"email\"]"));
        assert!(code.contains(
            "const stepConditions: Record<string, (values: FormValues) => boolean> = {}"
        ));
    }

    #[test]
    fn test_forward_condition_rejected() {
        let steps = vec![FormStep::new("a", "A", vec![FormField::new("Input", "x").into()])
            .with_condition("y", "values.y")];
        assert!(matches!(
            generate_multi_step_form_code(&steps, &GenerationConfig::default()),
            Err(AppError::InvalidConditionalReference { .. })
        ));
    }

    #[test]
    fn test_options_declared_before_component() {
        let rows = vec![FormField::new("Multi Select", "languages").into()];
        let code = generate_form_code(&rows, &GenerationConfig::default()).unwrap();
        let decl = code.find("const languagesOptions = [").unwrap();
        let component = code.find("export default function MyForm()").unwrap();
        assert!(decl < component);
    }
}
