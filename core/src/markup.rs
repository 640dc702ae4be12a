#![deny(missing_docs)]

//! # Markup Generator
//!
//! Turns rows of fields into the JSX tree of the generated component.
//!
//! Each single field becomes one field block (label, control, description,
//! error slot) built from the registry's control fragment. A row group becomes
//! a 12 column grid with one column per field. The shadcn style nests
//! everything in the `<Form>` context provider; the plain `react-hook-form`
//! style registers native inputs directly and wraps controlled components in
//! `<Controller>`.
//!
//! Blocks are emitted in input order; the generator never reorders fields.

use crate::config::GenerationConfig;
use crate::error::{AppError, AppResult};
use crate::imports::{Import, ImportSet};
use crate::model::{FormField, FormFieldOrGroup, FormStep};
use crate::registry::{lookup, options_declaration, Binding, VariantRule};
use crate::validation::is_identifier;
use crate::writer::{js_string, jsx_attr, jsx_text, SourceWriter};
use indexmap::IndexMap;

/// Number of columns of the row grid.
pub const GRID_COLUMNS: usize = 12;

const FORM_MODULE: &str = "@/components/ui/form";
const INLINE_ITEM_CLASS: &str = "flex flex-row items-start space-x-3 space-y-0 rounded-md border p-4";
const INLINE_TEXT_CLASS: &str = "space-y-1 leading-none";
const PLAIN_LABEL_CLASS: &str = "text-sm font-medium leading-none";
const DESCRIPTION_CLASS: &str = "text-sm text-muted-foreground";
const ERROR_CLASS: &str = "text-sm font-medium text-destructive";

static WRAPPER_IMPORTS: [Import; 6] = [
    Import::named(FORM_MODULE, "Form"),
    Import::named(FORM_MODULE, "FormControl"),
    Import::named(FORM_MODULE, "FormField"),
    Import::named(FORM_MODULE, "FormItem"),
    Import::named(FORM_MODULE, "FormLabel"),
    Import::named(FORM_MODULE, "FormMessage"),
];
const FORM_DESCRIPTION: Import = Import::named(FORM_MODULE, "FormDescription");
const CONTROLLER: Import = Import::named("react-hook-form", "Controller");

/// Column widths of a row group of `n` fields.
///
/// Every column gets `floor(12 / n)`; the last column absorbs the remainder so
/// the widths always sum to 12 (n = 5 gives 2, 2, 2, 2, 4). An empty group has
/// no columns.
///
/// # Errors
///
/// `AppError::GroupTooWide` when `n` exceeds 12.
pub fn column_widths(n: usize) -> AppResult<Vec<usize>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if n > GRID_COLUMNS {
        return Err(AppError::GroupTooWide(n));
    }
    let base = GRID_COLUMNS / n;
    let mut widths = vec![base; n];
    widths[n - 1] += GRID_COLUMNS - base * n;
    Ok(widths)
}

/// The rendered JSX tree plus what the rest of the module needs for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    /// The `return (...)` body, starting at the outermost element.
    pub source: String,
    /// Imports the markup uses (controls, form components).
    pub imports: ImportSet,
    /// Module-level declarations the controls reference, in field order.
    pub declarations: Vec<String>,
    /// Names of the fields bound to form state, in markup order.
    pub bound_fields: Vec<String>,
}

/// The single step used when a flat field list is rendered as a multi-step form.
pub fn implicit_step(rows: &[FormFieldOrGroup]) -> FormStep {
    FormStep::new("step1", "Step 1", rows.to_vec())
}

/// Renders a flat form.
///
/// # Errors
///
/// `UnknownVariant` for a variant missing from the registry, `GroupTooWide`
/// for a row that cannot fit the grid.
pub fn render_markup(rows: &[FormFieldOrGroup], config: &GenerationConfig) -> AppResult<Markup> {
    let mut builder = MarkupBuilder::new(config);
    let mut w = SourceWriter::new();
    builder.form_shell(&mut w, |b, w| {
        b.rows(w, rows)?;
        w.line(format!(
            "<Button type=\"submit\">{}</Button>",
            jsx_text(&config.submit_label)
        ));
        Ok(())
    })?;
    Ok(builder.finish(w.finish()))
}

/// Renders a multi-step form: one container per step, shown when it is the
/// active step, followed by the Previous / Next / Submit navigation.
pub fn render_step_markup(steps: &[FormStep], config: &GenerationConfig) -> AppResult<Markup> {
    let mut builder = MarkupBuilder::new(config);
    let mut w = SourceWriter::new();
    builder.form_shell(&mut w, |b, w| {
        w.line("<p className=\"text-sm text-muted-foreground\">");
        w.nest(|w| {
            w.line("Step {currentStep + 1} of {visibleSteps.length}");
        });
        w.line("</p>");
        for step in steps {
            b.step(w, step)?;
        }
        navigation(w, config);
        Ok(())
    })?;
    Ok(builder.finish(w.finish()))
}

/// Renders the JSX tree of a form.
///
/// With `config.is_multi_step` the rows are rendered as a single step.
pub fn build_markup(rows: &[FormFieldOrGroup], config: &GenerationConfig) -> AppResult<String> {
    let markup = if config.is_multi_step {
        render_step_markup(&[implicit_step(rows)], config)?
    } else {
        render_markup(rows, config)?
    };
    Ok(markup.source)
}

fn navigation(w: &mut SourceWriter, config: &GenerationConfig) {
    w.line("<div className=\"flex justify-between\">");
    w.nest(|w| {
        w.line("<Button");
        w.nest(|w| {
            w.line("type=\"button\"");
            w.line("variant=\"outline\"");
            w.line("onClick={handlePrevious}");
            w.line("disabled={currentStep === 0}");
        });
        w.line(">");
        w.nest(|w| {
            w.line("Previous");
        });
        w.line("</Button>");
        w.line("{isLastStep ? (");
        w.nest(|w| {
            w.line(format!(
                "<Button type=\"submit\">{}</Button>",
                jsx_text(&config.submit_label)
            ));
        });
        w.line(") : (");
        w.nest(|w| {
            w.line("<Button type=\"button\" onClick={handleNext}>");
            w.nest(|w| {
                w.line("Next");
            });
            w.line("</Button>");
        });
        w.line(")}");
    });
    w.line("</div>");
}

/// `form.formState.errors.<name>` (bracket access for unsafe names).
fn error_access(name: &str) -> String {
    if is_identifier(name) {
        format!("form.formState.errors.{}", name)
    } else {
        format!("form.formState.errors[{}]", js_string(name))
    }
}

struct MarkupBuilder<'a> {
    config: &'a GenerationConfig,
    imports: ImportSet,
    declarations: IndexMap<String, String>,
    bound_fields: Vec<String>,
}

impl<'a> MarkupBuilder<'a> {
    fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            imports: ImportSet::new(),
            declarations: IndexMap::new(),
            bound_fields: Vec::new(),
        }
    }

    fn finish(self, source: String) -> Markup {
        Markup {
            source,
            imports: self.imports,
            declarations: self.declarations.into_values().collect(),
            bound_fields: self.bound_fields,
        }
    }

    /// `<Form {...form}>` (wrapper style only) and the `<form>` element around `body`.
    fn form_shell(
        &mut self,
        w: &mut SourceWriter,
        body: impl FnOnce(&mut Self, &mut SourceWriter) -> AppResult<()>,
    ) -> AppResult<()> {
        let open = format!(
            "<form onSubmit={{form.handleSubmit(onSubmit)}} className=\"{}\">",
            jsx_attr(&self.config.form_class_name)
        );
        if self.config.form_library.uses_wrapper() {
            self.imports.extend(&WRAPPER_IMPORTS);
            w.line("<Form {...form}>");
            w.try_nest(|w| {
                w.line(&open);
                w.try_nest(|w| body(self, w))?;
                w.line("</form>");
                Ok::<(), AppError>(())
            })?;
            w.line("</Form>");
        } else {
            w.line(&open);
            w.try_nest(|w| body(self, w))?;
            w.line("</form>");
        }
        Ok(())
    }

    fn step(&mut self, w: &mut SourceWriter, step: &FormStep) -> AppResult<()> {
        if step.conditional.is_some() {
            w.line(format!(
                "{{/* Shown only when stepConditions.{}(values) is true */}}",
                step.id
            ));
        }
        w.line(format!("{{activeStep.id === {} && (", js_string(&step.id)));
        w.try_nest(|w| {
            w.line("<div className=\"space-y-8\">");
            w.try_nest(|w| {
                w.line("<div className=\"space-y-1\">");
                w.nest(|w| {
                    w.line(format!(
                        "<h2 className=\"text-2xl font-semibold tracking-tight\">{}</h2>",
                        jsx_text(&step.title)
                    ));
                    if let Some(desc) = step.description.as_deref().filter(|d| !d.is_empty()) {
                        w.line(format!(
                            "<p className=\"{}\">{}</p>",
                            DESCRIPTION_CLASS,
                            jsx_text(desc)
                        ));
                    }
                });
                w.line("</div>");
                self.rows(w, &step.fields)
            })?;
            w.line("</div>");
            Ok::<(), AppError>(())
        })?;
        w.line(")}");
        Ok(())
    }

    fn rows(&mut self, w: &mut SourceWriter, rows: &[FormFieldOrGroup]) -> AppResult<()> {
        for row in rows {
            match row {
                FormFieldOrGroup::Single(field) => self.field(w, field)?,
                FormFieldOrGroup::Group(fields) => self.group(w, fields)?,
            }
        }
        Ok(())
    }

    fn group(&mut self, w: &mut SourceWriter, fields: &[FormField]) -> AppResult<()> {
        let widths = column_widths(fields.len())?;
        if widths.is_empty() {
            return Ok(());
        }
        w.line("<div className=\"grid grid-cols-12 gap-4\">");
        w.try_nest(|w| {
            for (field, width) in fields.iter().zip(widths) {
                w.line(format!("<div className=\"col-span-{}\">", width));
                w.try_nest(|w| self.field(w, field))?;
                w.line("</div>");
            }
            Ok::<(), AppError>(())
        })?;
        w.line("</div>");
        Ok(())
    }

    fn field(&mut self, w: &mut SourceWriter, field: &FormField) -> AppResult<()> {
        let rule = lookup(&field.variant)?;
        self.imports.extend(rule.imports);
        if rule.declares_options && !self.declarations.contains_key(&field.name) {
            self.declarations
                .insert(field.name.clone(), options_declaration(field));
        }
        if !rule.is_data() {
            w.lines(&(rule.control)(field, ""));
            return Ok(());
        }

        self.bound_fields.push(field.name.clone());
        let description = if self.config.include_descriptions {
            field
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(jsx_text)
        } else {
            None
        };

        if self.config.form_library.uses_wrapper() {
            if description.is_some() {
                self.imports.insert(FORM_DESCRIPTION);
            }
            wrapper_block(w, field, rule, description.as_deref());
        } else {
            if rule.binding == Binding::Controlled {
                self.imports.insert(CONTROLLER);
            }
            plain_block(w, field, rule, description.as_deref());
        }
        Ok(())
    }
}

fn item_class(field: &FormField, base: Option<&str>) -> String {
    let extra = field.class_name.as_deref().filter(|c| !c.trim().is_empty());
    match (base, extra) {
        (Some(base), Some(extra)) => format!(" className=\"{} {}\"", base, jsx_attr(extra)),
        (Some(base), None) => format!(" className=\"{}\"", base),
        (None, Some(extra)) => format!(" className=\"{}\"", jsx_attr(extra)),
        (None, None) => String::new(),
    }
}

/// shadcn `<FormField>` block.
fn wrapper_block(
    w: &mut SourceWriter,
    field: &FormField,
    rule: &VariantRule,
    description: Option<&str>,
) {
    let control = (rule.control)(field, "{...field}");
    let label = format!("<FormLabel>{}</FormLabel>", jsx_text(field.display_label()));
    let text = |w: &mut SourceWriter| {
        if let Some(desc) = description {
            w.line(format!("<FormDescription>{}</FormDescription>", desc));
        }
        w.line("<FormMessage />");
    };

    w.line("<FormField");
    w.nest(|w| {
        w.line("control={form.control}");
        w.line(format!("name=\"{}\"", jsx_attr(&field.name)));
        w.line("render={({ field }) => (");
        w.nest(|w| {
            if rule.inline {
                w.line(format!("<FormItem{}>", item_class(field, Some(INLINE_ITEM_CLASS))));
                w.nest(|w| {
                    w.line("<FormControl>");
                    w.nest(|w| {
                        w.lines(&control);
                    });
                    w.line("</FormControl>");
                    w.line(format!("<div className=\"{}\">", INLINE_TEXT_CLASS));
                    w.nest(|w| {
                        w.line(&label);
                        text(w);
                    });
                    w.line("</div>");
                });
            } else {
                w.line(format!("<FormItem{}>", item_class(field, None)));
                w.nest(|w| {
                    w.line(&label);
                    w.line("<FormControl>");
                    w.nest(|w| {
                        w.lines(&control);
                    });
                    w.line("</FormControl>");
                    text(w);
                });
            }
            w.line("</FormItem>");
        });
        w.line(")}");
    });
    w.line("/>");
}

/// `<Controller>` around a controlled component.
fn controller(w: &mut SourceWriter, field: &FormField, control: &str) {
    w.line("<Controller");
    w.nest(|w| {
        w.line("control={form.control}");
        w.line(format!("name=\"{}\"", jsx_attr(&field.name)));
        w.line("render={({ field }) => (");
        w.nest(|w| {
            w.lines(control);
        });
        w.line(")}");
    });
    w.line("/>");
}

fn plain_text(w: &mut SourceWriter, field: &FormField, description: Option<&str>) {
    if let Some(desc) = description {
        w.line(format!("<p className=\"{}\">{}</p>", DESCRIPTION_CLASS, desc));
    }
    let errors = error_access(&field.name);
    w.line(format!("{{{} && (", errors));
    w.nest(|w| {
        w.line(format!(
            "<p className=\"{}\">{{{}?.message}}</p>",
            ERROR_CLASS, errors
        ));
    });
    w.line(")}");
}

/// Plain `react-hook-form` block.
fn plain_block(
    w: &mut SourceWriter,
    field: &FormField,
    rule: &VariantRule,
    description: Option<&str>,
) {
    let name = jsx_attr(&field.name);
    let label_text = jsx_text(field.display_label());

    if rule.inline {
        let control = (rule.control)(field, "");
        w.line(format!("<div{}>", item_class(field, Some(INLINE_ITEM_CLASS))));
        w.nest(|w| {
            controller(w, field, &control);
            w.line(format!("<div className=\"{}\">", INLINE_TEXT_CLASS));
            w.nest(|w| {
                w.line(format!(
                    "<label className=\"{}\">{}</label>",
                    PLAIN_LABEL_CLASS, label_text
                ));
                plain_text(w, field, description);
            });
            w.line("</div>");
        });
        w.line("</div>");
        return;
    }

    w.line(format!("<div{}>", item_class(field, Some("space-y-2"))));
    w.nest(|w| match rule.binding {
        Binding::Native => {
            let spread = format!(
                "id=\"{}\" {{...form.register({})}}",
                name,
                js_string(&field.name)
            );
            w.line(format!(
                "<label htmlFor=\"{}\" className=\"{}\">{}</label>",
                name, PLAIN_LABEL_CLASS, label_text
            ));
            w.lines(&(rule.control)(field, &spread));
            plain_text(w, field, description);
        }
        _ => {
            w.line(format!(
                "<label className=\"{}\">{}</label>",
                PLAIN_LABEL_CLASS, label_text
            ));
            controller(w, field, &(rule.control)(field, ""));
            plain_text(w, field, description);
        }
    });
    w.line("</div>");
}
