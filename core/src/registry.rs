#![deny(missing_docs)]

//! # Variant Registry
//!
//! The closed table mapping each field variant to its code-generation rules:
//! default value, control markup, schema constraint, import requirements and,
//! for components not bundled with the UI kit, the help URL for installing them.
//!
//! Adding a field type means adding a `Variant`, one `VariantRule` static and
//! one arm in [`rule`].

use crate::error::{AppError, AppResult};
use crate::imports::Import;
use crate::model::{flatten_fields, FormField, FormFieldOrGroup};
use crate::schema_generator::{SchemaBase, SchemaConstraint};
use crate::writer::{js_number, js_string};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

mod controls;

pub(crate) use controls::options_declaration;

/// The fixed set of field variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// Boolean checkbox.
    Checkbox,
    /// Searchable single select.
    Combobox,
    /// Calendar date picker.
    DatePicker,
    /// Date and time picker.
    DatetimePicker,
    /// File upload dropzone.
    FileInput,
    /// Text-like input (`type` decides text / email / number ...).
    Input,
    /// One-time password slots.
    InputOtp,
    /// Decorative heading, carries no value.
    Label,
    /// Country / state selector.
    LocationInput,
    /// Multiple choice select.
    MultiSelect,
    /// Password input with visibility toggle.
    Password,
    /// Phone number input.
    Phone,
    /// Single select.
    Select,
    /// Signature canvas.
    SignatureInput,
    /// Numeric slider.
    Slider,
    /// Natural language date time input.
    SmartDatetimeInput,
    /// Boolean toggle.
    Switch,
    /// Free-form tags.
    TagsInput,
    /// Multi-line text.
    Textarea,
}

impl Variant {
    /// Every variant, in registry order.
    pub const ALL: [Variant; 19] = [
        Variant::Checkbox,
        Variant::Combobox,
        Variant::DatePicker,
        Variant::DatetimePicker,
        Variant::FileInput,
        Variant::Input,
        Variant::InputOtp,
        Variant::Label,
        Variant::LocationInput,
        Variant::MultiSelect,
        Variant::Password,
        Variant::Phone,
        Variant::Select,
        Variant::SignatureInput,
        Variant::Slider,
        Variant::SmartDatetimeInput,
        Variant::Switch,
        Variant::TagsInput,
        Variant::Textarea,
    ];

    /// The tag used in field definitions.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Checkbox => "Checkbox",
            Variant::Combobox => "Combobox",
            Variant::DatePicker => "Date Picker",
            Variant::DatetimePicker => "Datetime Picker",
            Variant::FileInput => "File Input",
            Variant::Input => "Input",
            Variant::InputOtp => "Input OTP",
            Variant::Label => "Label",
            Variant::LocationInput => "Location Input",
            Variant::MultiSelect => "Multi Select",
            Variant::Password => "Password",
            Variant::Phone => "Phone",
            Variant::Select => "Select",
            Variant::SignatureInput => "Signature Input",
            Variant::Slider => "Slider",
            Variant::SmartDatetimeInput => "Smart Datetime Input",
            Variant::Switch => "Switch",
            Variant::TagsInput => "Tags Input",
            Variant::Textarea => "Textarea",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| AppError::UnknownVariant(s.to_string()))
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// How a control is bound to the form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Accepts the native `{...field}` / `register()` spread.
    Native,
    /// Needs `field.value` / `field.onChange`; plain mode wraps it in `<Controller>`.
    Controlled,
    /// No form state (decorative).
    Static,
}

/// Code-generation rules of one variant.
pub struct VariantRule {
    /// The variant this rule belongs to.
    pub variant: Variant,
    /// Form-state binding.
    pub binding: Binding,
    /// Control rendered before the label on one line (checkbox style).
    pub inline: bool,
    /// Imports the control markup needs.
    pub imports: &'static [Import],
    /// Installation help for components not bundled with the UI kit.
    pub help_url: Option<&'static str>,
    /// Whether the control needs a module-level options constant.
    pub declares_options: bool,
    /// TypeScript literal of the default value.
    pub default_value: fn(&FormField) -> String,
    /// Control markup; the second argument is the native binding spread.
    pub control: fn(&FormField, &str) -> String,
    /// Validation constraint.
    pub schema: fn(&FormField) -> SchemaConstraint,
}

impl VariantRule {
    /// Whether the variant carries a value (everything but `Label`).
    pub fn is_data(&self) -> bool {
        self.binding != Binding::Static
    }

    /// Whether the component must be added to the consuming project manually.
    pub fn is_external(&self) -> bool {
        self.help_url.is_some()
    }
}

impl fmt::Debug for VariantRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRule")
            .field("variant", &self.variant)
            .field("binding", &self.binding)
            .field("external", &self.is_external())
            .finish()
    }
}

/// Looks up the rule of a variant tag.
///
/// # Errors
///
/// `AppError::UnknownVariant` when the tag is not registered.
pub fn lookup(variant: &str) -> AppResult<&'static VariantRule> {
    let variant: Variant = variant.parse()?;
    Ok(rule(variant))
}

/// Variants of the given rows flagged as external.
pub fn list_external(rows: &[FormFieldOrGroup]) -> BTreeSet<Variant> {
    flatten_fields(rows)
        .into_iter()
        .filter_map(|field| lookup(&field.variant).ok())
        .filter(|rule| rule.is_external())
        .map(|rule| rule.variant)
        .collect()
}

/// The rule of a variant.
pub fn rule(variant: Variant) -> &'static VariantRule {
    match variant {
        Variant::Checkbox => &CHECKBOX,
        Variant::Combobox => &COMBOBOX,
        Variant::DatePicker => &DATE_PICKER,
        Variant::DatetimePicker => &DATETIME_PICKER,
        Variant::FileInput => &FILE_INPUT,
        Variant::Input => &INPUT,
        Variant::InputOtp => &INPUT_OTP,
        Variant::Label => &LABEL,
        Variant::LocationInput => &LOCATION_INPUT,
        Variant::MultiSelect => &MULTI_SELECT,
        Variant::Password => &PASSWORD,
        Variant::Phone => &PHONE,
        Variant::Select => &SELECT,
        Variant::SignatureInput => &SIGNATURE_INPUT,
        Variant::Slider => &SLIDER,
        Variant::SmartDatetimeInput => &SMART_DATETIME_INPUT,
        Variant::Switch => &SWITCH,
        Variant::TagsInput => &TAGS_INPUT,
        Variant::Textarea => &TEXTAREA,
    }
}

// --- Default values ---

fn string_default(field: &FormField) -> String {
    match &field.value {
        Some(Value::String(s)) => js_string(s),
        Some(Value::Number(n)) => js_string(&n.to_string()),
        _ => "\"\"".to_string(),
    }
}

fn input_default(field: &FormField) -> String {
    if field.input_type == "number" {
        return match &field.value {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(js_number)
                .unwrap_or_else(|_| "undefined".to_string()),
            _ => "undefined".to_string(),
        };
    }
    string_default(field)
}

fn bool_default(field: &FormField) -> String {
    match &field.value {
        Some(Value::Bool(b)) => b.to_string(),
        _ => field.checked.to_string(),
    }
}

fn date_default(field: &FormField) -> String {
    match &field.value {
        Some(Value::String(s)) if !s.is_empty() => format!("new Date({})", js_string(s)),
        _ => "new Date()".to_string(),
    }
}

fn array_default(field: &FormField) -> String {
    match &field.value {
        Some(v @ Value::Array(_)) => v.to_string(),
        _ => "[]".to_string(),
    }
}

fn files_default(_field: &FormField) -> String {
    "[]".to_string()
}

fn slider_default(field: &FormField) -> String {
    match &field.value {
        Some(Value::Number(n)) => n.to_string(),
        _ => js_number(field.min.unwrap_or(0.0)),
    }
}

fn undefined_default(_field: &FormField) -> String {
    "undefined".to_string()
}

// --- Schema constraints ---

fn optional_unless_required(field: &FormField, base: SchemaBase) -> SchemaConstraint {
    SchemaConstraint {
        base,
        optional: !field.is_required(),
    }
}

fn string_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::String)
}

fn input_schema(field: &FormField) -> SchemaConstraint {
    let base = match field.input_type.as_str() {
        "email" => SchemaBase::Email,
        "number" => SchemaBase::Number {
            min: field.min,
            max: field.max,
        },
        _ => SchemaBase::String,
    };
    optional_unless_required(field, base)
}

fn boolean_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::Boolean)
}

fn date_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::DateOrString)
}

fn string_array_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::StringArray { min_items: 1 })
}

fn files_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::Files)
}

fn location_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(field, SchemaBase::Location)
}

fn slider_schema(field: &FormField) -> SchemaConstraint {
    optional_unless_required(
        field,
        SchemaBase::Number {
            min: field.min,
            max: field.max,
        },
    )
}

fn label_schema(_field: &FormField) -> SchemaConstraint {
    // Never consulted: Label is filtered out before schema generation.
    SchemaConstraint {
        base: SchemaBase::String,
        optional: true,
    }
}

// --- Import tables ---

const BUTTON: Import = Import::named("@/components/ui/button", "Button");
const CN: Import = Import::named("@/lib/utils", "cn");
const POPOVER: [Import; 3] = [
    Import::named("@/components/ui/popover", "Popover"),
    Import::named("@/components/ui/popover", "PopoverContent"),
    Import::named("@/components/ui/popover", "PopoverTrigger"),
];

static CHECKBOX_IMPORTS: [Import; 1] = [Import::named("@/components/ui/checkbox", "Checkbox")];
static COMBOBOX_IMPORTS: [Import; 13] = [
    BUTTON,
    CN,
    POPOVER[0],
    POPOVER[1],
    POPOVER[2],
    Import::named("@/components/ui/command", "Command"),
    Import::named("@/components/ui/command", "CommandEmpty"),
    Import::named("@/components/ui/command", "CommandGroup"),
    Import::named("@/components/ui/command", "CommandInput"),
    Import::named("@/components/ui/command", "CommandItem"),
    Import::named("@/components/ui/command", "CommandList"),
    Import::named("lucide-react", "Check"),
    Import::named("lucide-react", "ChevronsUpDown"),
];
static DATE_PICKER_IMPORTS: [Import; 8] = [
    BUTTON,
    CN,
    POPOVER[0],
    POPOVER[1],
    POPOVER[2],
    Import::named("@/components/ui/calendar", "Calendar"),
    Import::named("date-fns", "format"),
    Import::named("lucide-react", "CalendarIcon"),
];
static DATETIME_PICKER_IMPORTS: [Import; 1] = [Import::named(
    "@/components/ui/datetime-picker",
    "DatetimePicker",
)];
static FILE_INPUT_IMPORTS: [Import; 6] = [
    Import::named("@/components/ui/file-upload", "FileInput"),
    Import::named("@/components/ui/file-upload", "FileUploader"),
    Import::named("@/components/ui/file-upload", "FileUploaderContent"),
    Import::named("@/components/ui/file-upload", "FileUploaderItem"),
    Import::named("lucide-react", "CloudUpload"),
    Import::named("lucide-react", "Paperclip"),
];
static INPUT_IMPORTS: [Import; 1] = [Import::named("@/components/ui/input", "Input")];
static INPUT_OTP_IMPORTS: [Import; 3] = [
    Import::named("@/components/ui/input-otp", "InputOTP"),
    Import::named("@/components/ui/input-otp", "InputOTPGroup"),
    Import::named("@/components/ui/input-otp", "InputOTPSlot"),
];
static LOCATION_INPUT_IMPORTS: [Import; 1] = [Import::named(
    "@/components/ui/location-input",
    "LocationSelector",
)];
static MULTI_SELECT_IMPORTS: [Import; 6] = [
    Import::named("@/components/ui/multi-select", "MultiSelector"),
    Import::named("@/components/ui/multi-select", "MultiSelectorContent"),
    Import::named("@/components/ui/multi-select", "MultiSelectorInput"),
    Import::named("@/components/ui/multi-select", "MultiSelectorItem"),
    Import::named("@/components/ui/multi-select", "MultiSelectorList"),
    Import::named("@/components/ui/multi-select", "MultiSelectorTrigger"),
];
static PASSWORD_IMPORTS: [Import; 1] = [Import::named(
    "@/components/ui/password-input",
    "PasswordInput",
)];
static PHONE_IMPORTS: [Import; 1] = [Import::named("@/components/ui/phone-input", "PhoneInput")];
static SELECT_IMPORTS: [Import; 5] = [
    Import::named("@/components/ui/select", "Select"),
    Import::named("@/components/ui/select", "SelectContent"),
    Import::named("@/components/ui/select", "SelectItem"),
    Import::named("@/components/ui/select", "SelectTrigger"),
    Import::named("@/components/ui/select", "SelectValue"),
];
static SIGNATURE_INPUT_IMPORTS: [Import; 1] = [Import::named(
    "@/components/ui/signature-input",
    "SignatureInput",
)];
static SLIDER_IMPORTS: [Import; 1] = [Import::named("@/components/ui/slider", "Slider")];
static SMART_DATETIME_INPUT_IMPORTS: [Import; 1] = [Import::named(
    "@/components/ui/smart-datetime-input",
    "SmartDatetimeInput",
)];
static SWITCH_IMPORTS: [Import; 1] = [Import::named("@/components/ui/switch", "Switch")];
static TAGS_INPUT_IMPORTS: [Import; 1] = [Import::named("@/components/ui/tags-input", "TagsInput")];
static TEXTAREA_IMPORTS: [Import; 1] = [Import::named("@/components/ui/textarea", "Textarea")];

// --- Rules ---

static CHECKBOX: VariantRule = VariantRule {
    variant: Variant::Checkbox,
    binding: Binding::Controlled,
    inline: true,
    imports: &CHECKBOX_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: bool_default,
    control: controls::checkbox,
    schema: boolean_schema,
};

static COMBOBOX: VariantRule = VariantRule {
    variant: Variant::Combobox,
    binding: Binding::Controlled,
    inline: false,
    imports: &COMBOBOX_IMPORTS,
    help_url: None,
    declares_options: true,
    default_value: string_default,
    control: controls::combobox,
    schema: string_schema,
};

static DATE_PICKER: VariantRule = VariantRule {
    variant: Variant::DatePicker,
    binding: Binding::Controlled,
    inline: false,
    imports: &DATE_PICKER_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: date_default,
    control: controls::date_picker,
    schema: date_schema,
};

static DATETIME_PICKER: VariantRule = VariantRule {
    variant: Variant::DatetimePicker,
    binding: Binding::Controlled,
    inline: false,
    imports: &DATETIME_PICKER_IMPORTS,
    help_url: Some("https://shadcn-datetime-picker-xi.vercel.app"),
    declares_options: false,
    default_value: date_default,
    control: controls::datetime_picker,
    schema: date_schema,
};

static FILE_INPUT: VariantRule = VariantRule {
    variant: Variant::FileInput,
    binding: Binding::Controlled,
    inline: false,
    imports: &FILE_INPUT_IMPORTS,
    help_url: Some("https://shadcn-extension.vercel.app/docs/file-upload"),
    declares_options: false,
    default_value: files_default,
    control: controls::file_input,
    schema: files_schema,
};

static INPUT: VariantRule = VariantRule {
    variant: Variant::Input,
    binding: Binding::Native,
    inline: false,
    imports: &INPUT_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: input_default,
    control: controls::input,
    schema: input_schema,
};

static INPUT_OTP: VariantRule = VariantRule {
    variant: Variant::InputOtp,
    binding: Binding::Controlled,
    inline: false,
    imports: &INPUT_OTP_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: string_default,
    control: controls::input_otp,
    schema: string_schema,
};

static LABEL: VariantRule = VariantRule {
    variant: Variant::Label,
    binding: Binding::Static,
    inline: false,
    imports: &[],
    help_url: None,
    declares_options: false,
    default_value: undefined_default,
    control: controls::label,
    schema: label_schema,
};

static LOCATION_INPUT: VariantRule = VariantRule {
    variant: Variant::LocationInput,
    binding: Binding::Controlled,
    inline: false,
    imports: &LOCATION_INPUT_IMPORTS,
    help_url: Some("https://github.com/Gaurav-Verma07/shadcn-location-input"),
    declares_options: false,
    default_value: undefined_default,
    control: controls::location_input,
    schema: location_schema,
};

static MULTI_SELECT: VariantRule = VariantRule {
    variant: Variant::MultiSelect,
    binding: Binding::Controlled,
    inline: false,
    imports: &MULTI_SELECT_IMPORTS,
    help_url: Some("https://shadcn-extension.vercel.app/docs/multi-select"),
    declares_options: true,
    default_value: array_default,
    control: controls::multi_select,
    schema: string_array_schema,
};

static PASSWORD: VariantRule = VariantRule {
    variant: Variant::Password,
    binding: Binding::Native,
    inline: false,
    imports: &PASSWORD_IMPORTS,
    help_url: Some("https://shadcn-form.com/components/password-input"),
    declares_options: false,
    default_value: string_default,
    control: controls::password,
    schema: string_schema,
};

static PHONE: VariantRule = VariantRule {
    variant: Variant::Phone,
    binding: Binding::Controlled,
    inline: false,
    imports: &PHONE_IMPORTS,
    help_url: Some("https://shadcn-phone-input.vercel.app"),
    declares_options: false,
    default_value: string_default,
    control: controls::phone,
    schema: string_schema,
};

static SELECT: VariantRule = VariantRule {
    variant: Variant::Select,
    binding: Binding::Controlled,
    inline: false,
    imports: &SELECT_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: string_default,
    control: controls::select,
    schema: string_schema,
};

static SIGNATURE_INPUT: VariantRule = VariantRule {
    variant: Variant::SignatureInput,
    binding: Binding::Controlled,
    inline: false,
    imports: &SIGNATURE_INPUT_IMPORTS,
    help_url: Some("https://shadcn-form.com/components/signature-input"),
    declares_options: false,
    default_value: string_default,
    control: controls::signature_input,
    schema: string_schema,
};

static SLIDER: VariantRule = VariantRule {
    variant: Variant::Slider,
    binding: Binding::Controlled,
    inline: false,
    imports: &SLIDER_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: slider_default,
    control: controls::slider,
    schema: slider_schema,
};

static SMART_DATETIME_INPUT: VariantRule = VariantRule {
    variant: Variant::SmartDatetimeInput,
    binding: Binding::Controlled,
    inline: false,
    imports: &SMART_DATETIME_INPUT_IMPORTS,
    help_url: Some("https://shadcn-extension.vercel.app/docs/smart-datetime-input"),
    declares_options: false,
    default_value: date_default,
    control: controls::smart_datetime_input,
    schema: date_schema,
};

static SWITCH: VariantRule = VariantRule {
    variant: Variant::Switch,
    binding: Binding::Controlled,
    inline: true,
    imports: &SWITCH_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: bool_default,
    control: controls::switch,
    schema: boolean_schema,
};

static TAGS_INPUT: VariantRule = VariantRule {
    variant: Variant::TagsInput,
    binding: Binding::Controlled,
    inline: false,
    imports: &TAGS_INPUT_IMPORTS,
    help_url: Some("https://shadcn-extension.vercel.app/docs/tags-input"),
    declares_options: false,
    default_value: array_default,
    control: controls::tags_input,
    schema: string_array_schema,
};

static TEXTAREA: VariantRule = VariantRule {
    variant: Variant::Textarea,
    binding: Binding::Native,
    inline: false,
    imports: &TEXTAREA_IMPORTS,
    help_url: None,
    declares_options: false,
    default_value: string_default,
    control: controls::textarea,
    schema: string_schema,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_variant_round_trips_through_its_name() {
        for variant in Variant::ALL {
            let parsed: Variant = variant.name().parse().unwrap();
            assert_eq!(parsed, variant);
            assert_eq!(rule(variant).variant, variant);
        }
    }

    #[test]
    fn test_lookup_unknown_variant() {
        let err = lookup("Foo").unwrap_err();
        assert!(matches!(err, AppError::UnknownVariant(ref v) if v == "Foo"));
    }

    #[test]
    fn test_external_set() {
        let external: Vec<&str> = Variant::ALL
            .iter()
            .filter(|v| rule(**v).is_external())
            .map(|v| v.name())
            .collect();
        assert_eq!(
            external,
            vec![
                "Datetime Picker",
                "File Input",
                "Location Input",
                "Multi Select",
                "Password",
                "Phone",
                "Signature Input",
                "Smart Datetime Input",
                "Tags Input",
            ]
        );
    }

    #[test]
    fn test_list_external_over_rows() {
        let rows = vec![
            FormFieldOrGroup::from(FormField::new("Input", "name")),
            FormFieldOrGroup::from(vec![
                FormField::new("Tags Input", "tags"),
                FormField::new("Phone", "phone"),
                FormField::new("Foo", "unknown"),
            ]),
        ];
        let external = list_external(&rows);
        assert_eq!(
            external.into_iter().collect::<Vec<_>>(),
            vec![Variant::Phone, Variant::TagsInput]
        );
    }

    #[test]
    fn test_only_label_is_static() {
        for variant in Variant::ALL {
            assert_eq!(rule(variant).is_data(), variant != Variant::Label);
        }
    }

    #[test]
    fn test_defaults() {
        let checkbox = FormField::new("Checkbox", "terms");
        assert_eq!((CHECKBOX.default_value)(&checkbox), "false");

        let mut checked = checkbox.clone();
        checked.checked = true;
        assert_eq!((CHECKBOX.default_value)(&checked), "true");

        let tags = FormField::new("Tags Input", "tags").with_value(json!(["a", "b"]));
        assert_eq!((TAGS_INPUT.default_value)(&tags), "[\"a\",\"b\"]");

        let age = FormField::new("Input", "age")
            .with_type("number")
            .with_value(json!("42"));
        assert_eq!((INPUT.default_value)(&age), "42");

        let name = FormField::new("Input", "name").with_value(json!("Ada"));
        assert_eq!((INPUT.default_value)(&name), "\"Ada\"");
    }

    #[test]
    fn test_input_schema_by_type() {
        let email = FormField::new("Input", "email")
            .with_type("email")
            .with_required(true);
        assert_eq!(
            (INPUT.schema)(&email),
            SchemaConstraint {
                base: SchemaBase::Email,
                optional: false
            }
        );

        let age = FormField::new("Input", "age").with_type("number");
        assert_eq!(
            (INPUT.schema)(&age),
            SchemaConstraint {
                base: SchemaBase::Number {
                    min: None,
                    max: None
                },
                optional: true
            }
        );
    }
}
