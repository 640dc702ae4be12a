//! Markup fragments for each variant's control element.
//!
//! Every function returns the control only (no label, description or error
//! slot). `spread` is the native binding of the active form-library style:
//! `{...field}` inside a render prop, or `id="x" {...form.register("x")}` for
//! plain `react-hook-form`. Controlled components always sit inside a render
//! prop and read `field.value` / `field.onChange` directly.

use crate::model::{FieldOption, FormField};
use crate::writer::{js_number, js_string, jsx_attr, jsx_text, SourceWriter};

fn placeholder(field: &FormField) -> String {
    match field.placeholder.as_deref() {
        Some(p) if !p.is_empty() => format!(" placeholder=\"{}\"", jsx_attr(p)),
        _ => String::new(),
    }
}

fn placeholder_or(field: &FormField, fallback: &str) -> String {
    let text = field
        .placeholder
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(fallback);
    format!(" placeholder=\"{}\"", jsx_attr(text))
}

fn disabled(field: &FormField) -> &'static str {
    if field.disabled {
        " disabled"
    } else {
        ""
    }
}

/// Options of a selection field, or a fixed example set when none are given.
pub(crate) fn effective_options(field: &FormField) -> Vec<FieldOption> {
    if !field.options.is_empty() {
        return field.options.clone();
    }
    (1..=3)
        .map(|i| FieldOption::new(format!("Option {}", i), format!("option-{}", i)))
        .collect()
}

/// Identifier of the module-level options constant of a field.
pub(crate) fn options_ident(field: &FormField) -> String {
    format!("{}Options", field.name)
}

/// Module-level `const <name>Options = [...]` declaration.
pub(crate) fn options_declaration(field: &FormField) -> String {
    let mut w = SourceWriter::new();
    w.line(format!("const {} = [", options_ident(field)));
    w.nest(|w| {
        for option in effective_options(field) {
            w.line(format!(
                "{{ label: {}, value: {} }},",
                js_string(&option.label),
                js_string(&option.value)
            ));
        }
    });
    w.line("]");
    w.finish()
}

pub(crate) fn input(field: &FormField, spread: &str) -> String {
    let input_type = if field.input_type.is_empty() {
        String::new()
    } else {
        format!(" type=\"{}\"", jsx_attr(&field.input_type))
    };
    let mut bounds = String::new();
    if field.input_type == "number" {
        if let Some(min) = field.min {
            bounds.push_str(&format!(" min={{{}}}", js_number(min)));
        }
        if let Some(max) = field.max {
            bounds.push_str(&format!(" max={{{}}}", js_number(max)));
        }
        if let Some(step) = field.step {
            bounds.push_str(&format!(" step={{{}}}", js_number(step)));
        }
    }
    format!(
        "<Input{}{}{}{} {} />",
        placeholder(field),
        input_type,
        bounds,
        disabled(field),
        spread
    )
}

pub(crate) fn textarea(field: &FormField, spread: &str) -> String {
    format!(
        "<Textarea{} className=\"resize-none\"{} {} />",
        placeholder(field),
        disabled(field),
        spread
    )
}

pub(crate) fn password(field: &FormField, spread: &str) -> String {
    format!(
        "<PasswordInput{}{} {} />",
        placeholder(field),
        disabled(field),
        spread
    )
}

pub(crate) fn phone(field: &FormField, _spread: &str) -> String {
    format!(
        "<PhoneInput{}{} {{...field}} defaultCountry=\"US\" />",
        placeholder(field),
        disabled(field)
    )
}

pub(crate) fn checkbox(field: &FormField, _spread: &str) -> String {
    format!(
        "<Checkbox checked={{field.value}} onCheckedChange={{field.onChange}}{} />",
        disabled(field)
    )
}

pub(crate) fn switch(field: &FormField, _spread: &str) -> String {
    format!(
        "<Switch checked={{field.value}} onCheckedChange={{field.onChange}}{} aria-readonly />",
        disabled(field)
    )
}

pub(crate) fn select(field: &FormField, _spread: &str) -> String {
    let mut w = SourceWriter::new();
    w.line(format!(
        "<Select onValueChange={{field.onChange}} defaultValue={{field.value}}{}>",
        disabled(field)
    ));
    w.nest(|w| {
        w.line("<SelectTrigger>");
        w.nest(|w| {
            w.line(format!(
                "<SelectValue{} />",
                placeholder_or(field, "Select an option")
            ));
        });
        w.line("</SelectTrigger>");
        w.line("<SelectContent>");
        w.nest(|w| {
            for option in effective_options(field) {
                w.line(format!(
                    "<SelectItem value=\"{}\">{}</SelectItem>",
                    jsx_attr(&option.value),
                    jsx_text(&option.label)
                ));
            }
        });
        w.line("</SelectContent>");
    });
    w.line("</Select>");
    w.finish()
}

pub(crate) fn combobox(field: &FormField, _spread: &str) -> String {
    let options = options_ident(field);
    let mut w = SourceWriter::new();
    w.line("<Popover>");
    w.nest(|w| {
        w.line("<PopoverTrigger asChild>");
        w.nest(|w| {
            w.line("<Button");
            w.nest(|w| {
                w.line("type=\"button\"");
                w.line("variant=\"outline\"");
                w.line("role=\"combobox\"");
                w.line("className={cn(\"w-full justify-between\", !field.value && \"text-muted-foreground\")}");
                if field.disabled {
                    w.line("disabled");
                }
            });
            w.line(">");
            w.nest(|w| {
                w.line("{field.value");
                w.nest(|w| {
                    w.line(format!(
                        "? {}.find((option) => option.value === field.value)?.label",
                        options
                    ));
                    w.line(format!(
                        ": {}}}",
                        js_string(
                            field
                                .placeholder
                                .as_deref()
                                .filter(|p| !p.is_empty())
                                .unwrap_or("Select an option")
                        )
                    ));
                });
                w.line("<ChevronsUpDown className=\"ml-2 h-4 w-4 shrink-0 opacity-50\" />");
            });
            w.line("</Button>");
        });
        w.line("</PopoverTrigger>");
        w.line("<PopoverContent className=\"w-full p-0\">");
        w.nest(|w| {
            w.line("<Command>");
            w.nest(|w| {
                w.line("<CommandInput placeholder=\"Search...\" />");
                w.line("<CommandList>");
                w.nest(|w| {
                    w.line("<CommandEmpty>No option found.</CommandEmpty>");
                    w.line("<CommandGroup>");
                    w.nest(|w| {
                        w.line(format!("{{{}.map((option) => (", options));
                        w.nest(|w| {
                            w.line("<CommandItem");
                            w.nest(|w| {
                                w.line("value={option.label}");
                                w.line("key={option.value}");
                                w.line("onSelect={() => field.onChange(option.value)}");
                            });
                            w.line(">");
                            w.nest(|w| {
                                w.line("<Check");
                                w.nest(|w| {
                                    w.line("className={cn(\"mr-2 h-4 w-4\", option.value === field.value ? \"opacity-100\" : \"opacity-0\")}");
                                });
                                w.line("/>");
                                w.line("{option.label}");
                            });
                            w.line("</CommandItem>");
                        });
                        w.line("))}");
                    });
                    w.line("</CommandGroup>");
                });
                w.line("</CommandList>");
            });
            w.line("</Command>");
        });
        w.line("</PopoverContent>");
    });
    w.line("</Popover>");
    w.finish()
}

pub(crate) fn multi_select(field: &FormField, _spread: &str) -> String {
    let mut w = SourceWriter::new();
    w.line("<MultiSelector");
    w.nest(|w| {
        w.line("values={field.value}");
        w.line("onValuesChange={field.onChange}");
        w.line("loop");
        w.line("className=\"max-w-xs\"");
    });
    w.line(">");
    w.nest(|w| {
        w.line("<MultiSelectorTrigger>");
        w.nest(|w| {
            w.line(format!(
                "<MultiSelectorInput{} />",
                placeholder_or(field, "Select options")
            ));
        });
        w.line("</MultiSelectorTrigger>");
        w.line("<MultiSelectorContent>");
        w.nest(|w| {
            w.line("<MultiSelectorList>");
            w.nest(|w| {
                w.line(format!("{{{}.map((option) => (", options_ident(field)));
                w.nest(|w| {
                    w.line("<MultiSelectorItem key={option.value} value={option.value}>");
                    w.nest(|w| {
                        w.line("{option.label}");
                    });
                    w.line("</MultiSelectorItem>");
                });
                w.line("))}");
            });
            w.line("</MultiSelectorList>");
        });
        w.line("</MultiSelectorContent>");
    });
    w.line("</MultiSelector>");
    w.finish()
}

pub(crate) fn date_picker(field: &FormField, _spread: &str) -> String {
    let mut w = SourceWriter::new();
    w.line("<Popover>");
    w.nest(|w| {
        w.line("<PopoverTrigger asChild>");
        w.nest(|w| {
            w.line("<Button");
            w.nest(|w| {
                w.line("type=\"button\"");
                w.line("variant=\"outline\"");
                w.line("className={cn(\"w-full pl-3 text-left font-normal\", !field.value && \"text-muted-foreground\")}");
                if field.disabled {
                    w.line("disabled");
                }
            });
            w.line(">");
            w.nest(|w| {
                w.line(format!(
                    "{{field.value ? format(new Date(field.value), \"PPP\") : <span>{}</span>}}",
                    jsx_text(
                        field
                            .placeholder
                            .as_deref()
                            .filter(|p| !p.is_empty())
                            .unwrap_or("Pick a date")
                    )
                ));
                w.line("<CalendarIcon className=\"ml-auto h-4 w-4 opacity-50\" />");
            });
            w.line("</Button>");
        });
        w.line("</PopoverTrigger>");
        w.line("<PopoverContent className=\"w-auto p-0\" align=\"start\">");
        w.nest(|w| {
            w.line("<Calendar");
            w.nest(|w| {
                w.line("mode=\"single\"");
                w.line("selected={field.value ? new Date(field.value) : undefined}");
                w.line("onSelect={field.onChange}");
                w.line("initialFocus");
            });
            w.line("/>");
        });
        w.line("</PopoverContent>");
    });
    w.line("</Popover>");
    w.finish()
}

pub(crate) fn datetime_picker(field: &FormField, _spread: &str) -> String {
    let time = if field.hour12 == Some(false) {
        "[\"hours\", \"minutes\", \"seconds\"]"
    } else {
        "[\"hours\", \"minutes\", \"am/pm\"]"
    };
    format!(
        "<DatetimePicker\n  {{...field}}\n  format={{[[\"months\", \"days\", \"years\"], {}]}}{}\n/>",
        time,
        if field.disabled { "\n  disabled" } else { "" }
    )
}

pub(crate) fn smart_datetime_input(field: &FormField, _spread: &str) -> String {
    let mut attrs = vec![
        "value={field.value}".to_string(),
        "onValueChange={field.onChange}".to_string(),
        placeholder_or(field, "e.g. Tomorrow morning 9am")
            .trim_start()
            .to_string(),
    ];
    if let Some(locale) = field.locale.as_deref().filter(|l| !l.is_empty()) {
        attrs.push(format!("locale=\"{}\"", jsx_attr(locale)));
    }
    if let Some(hour12) = field.hour12 {
        attrs.push(format!("hour12={{{}}}", hour12));
    }
    if field.disabled {
        attrs.push("disabled".to_string());
    }
    let mut w = SourceWriter::new();
    w.line("<SmartDatetimeInput");
    w.nest(|w| {
        for attr in &attrs {
            w.line(attr);
        }
    });
    w.line("/>");
    w.finish()
}

pub(crate) fn file_input(field: &FormField, _spread: &str) -> String {
    let max_files = field.max.map(js_number).unwrap_or_else(|| "5".to_string());
    let mut w = SourceWriter::new();
    w.line("<FileUploader");
    w.nest(|w| {
        w.line("value={field.value}");
        w.line("onValueChange={field.onChange}");
        w.line(format!(
            "dropzoneOptions={{{{ maxFiles: {}, maxSize: 1024 * 1024 * 4, multiple: true }}}}",
            max_files
        ));
        w.line("className=\"relative bg-background rounded-lg p-2\"");
    });
    w.line(">");
    w.nest(|w| {
        w.line(format!(
            "<FileInput id=\"{}\" className=\"outline-dashed outline-1 outline-slate-500\">",
            jsx_attr(&field.name)
        ));
        w.nest(|w| {
            w.line("<div className=\"flex items-center justify-center flex-col p-8 w-full\">");
            w.nest(|w| {
                w.line("<CloudUpload className=\"text-gray-500 w-10 h-10\" />");
                w.line("<p className=\"mb-1 text-sm text-gray-500 dark:text-gray-400\">");
                w.nest(|w| {
                    w.line("<span className=\"font-semibold\">Click to upload</span>");
                    w.line("&nbsp; or drag and drop");
                });
                w.line("</p>");
            });
            w.line("</div>");
        });
        w.line("</FileInput>");
        w.line("<FileUploaderContent>");
        w.nest(|w| {
            w.line("{field.value?.map((file: File, i: number) => (");
            w.nest(|w| {
                w.line("<FileUploaderItem key={i} index={i}>");
                w.nest(|w| {
                    w.line("<Paperclip className=\"h-4 w-4 stroke-current\" />");
                    w.line("<span>{file.name}</span>");
                });
                w.line("</FileUploaderItem>");
            });
            w.line("))}");
        });
        w.line("</FileUploaderContent>");
    });
    w.line("</FileUploader>");
    w.finish()
}

pub(crate) fn input_otp(field: &FormField, _spread: &str) -> String {
    let length = field
        .max
        .filter(|m| *m >= 1.0 && *m <= 12.0)
        .map(|m| m as usize)
        .unwrap_or(6);
    let mut w = SourceWriter::new();
    w.line(format!(
        "<InputOTP maxLength={{{}}}{} {{...field}}>",
        length,
        disabled(field)
    ));
    w.nest(|w| {
        w.line("<InputOTPGroup>");
        w.nest(|w| {
            for index in 0..length {
                w.line(format!("<InputOTPSlot index={{{}}} />", index));
            }
        });
        w.line("</InputOTPGroup>");
    });
    w.line("</InputOTP>");
    w.finish()
}

pub(crate) fn location_input(_field: &FormField, _spread: &str) -> String {
    let mut w = SourceWriter::new();
    w.line("<LocationSelector");
    w.nest(|w| {
        w.line("onCountryChange={(country) => field.onChange([country?.name || \"\", field.value?.[1] || \"\"])}");
        w.line("onStateChange={(state) => field.onChange([field.value?.[0] || \"\", state?.name || \"\"])}");
    });
    w.line("/>");
    w.finish()
}

pub(crate) fn signature_input(field: &FormField, _spread: &str) -> String {
    format!(
        "<SignatureInput onSignatureChange={{field.onChange}}{} />",
        disabled(field)
    )
}

pub(crate) fn slider(field: &FormField, _spread: &str) -> String {
    let mut w = SourceWriter::new();
    w.line("<Slider");
    w.nest(|w| {
        w.line(format!("min={{{}}}", js_number(field.min.unwrap_or(0.0))));
        w.line(format!("max={{{}}}", js_number(field.max.unwrap_or(100.0))));
        w.line(format!("step={{{}}}", js_number(field.step.unwrap_or(1.0))));
        w.line("value={[field.value]}");
        w.line("onValueChange={(vals) => field.onChange(vals[0])}");
        if field.disabled {
            w.line("disabled");
        }
    });
    w.line("/>");
    w.finish()
}

pub(crate) fn tags_input(field: &FormField, _spread: &str) -> String {
    format!(
        "<TagsInput value={{field.value}} onValueChange={{field.onChange}}{}{} />",
        placeholder_or(field, "Enter your tags"),
        disabled(field)
    )
}

/// Decorative heading; carries no value.
pub(crate) fn label(field: &FormField, _spread: &str) -> String {
    format!(
        "<h3 className=\"text-lg font-semibold\">{}</h3>",
        jsx_text(field.display_label())
    )
}
