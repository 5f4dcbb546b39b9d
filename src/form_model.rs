//! Pure form view-model: maps a template's variable schema to the input
//! fields the generation page shows, and collects their raw values back
//! into a render request. No egui types here so the widget mapping stays
//! testable on its own.

use crate::api_client::{VariableSpec, VariableType};
use serde_json::{Map, Value};

/// Shown for optional selects with nothing chosen yet.
pub const BLANK_CHOICE_LABEL: &str = "-- please choose --";

/// Placeholder fallback for array fields; splitting itself is server-side.
pub const ARRAY_SPLIT_HINT: &str = "Values split on newlines if present, otherwise on commas";

/// The concrete control chosen for a variable, holding both its static
/// configuration and the value the user is editing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Checkbox {
        checked: bool,
    },
    Select {
        options: Vec<String>,
        /// `None` means nothing chosen; collected as the empty string.
        selected: Option<String>,
        /// Optional selects get a blank entry in the dropdown itself.
        blank_option: bool,
    },
    Number {
        text: String,
        /// Integers step by 1, plain numbers accept any value.
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
        placeholder: Option<String>,
    },
    DateTime {
        text: String,
        placeholder: Option<String>,
    },
    MultilineText {
        text: String,
        placeholder: String,
    },
    Text {
        text: String,
        placeholder: Option<String>,
    },
}

impl FieldWidget {
    /// The raw value this control contributes to a render request:
    /// checkbox state as a bool, everything else as its current text,
    /// unsplit and unconverted.
    pub fn raw_value(&self) -> Value {
        match self {
            FieldWidget::Checkbox { checked } => Value::Bool(*checked),
            FieldWidget::Select { selected, .. } => {
                Value::String(selected.clone().unwrap_or_default())
            }
            FieldWidget::Number { text, .. }
            | FieldWidget::DateTime { text, .. }
            | FieldWidget::MultilineText { text, .. }
            | FieldWidget::Text { text, .. } => Value::String(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Form key; matches the variable name in the template schema.
    pub name: String,
    pub label: String,
    pub required: bool,
    pub description: Option<String>,
    pub widget: FieldWidget,
}

impl FormField {
    pub fn from_spec(spec: &VariableSpec) -> Self {
        let widget = match spec.var_type {
            VariableType::Boolean => FieldWidget::Checkbox {
                checked: default_is_true(spec.default.as_ref()),
            },
            VariableType::Select => {
                let default_text = spec.default.as_ref().map(value_as_text);
                let selected = default_text.filter(|d| spec.options.iter().any(|o| o == d));
                FieldWidget::Select {
                    options: spec.options.clone(),
                    selected,
                    blank_option: !spec.required,
                }
            }
            VariableType::Integer | VariableType::Number => FieldWidget::Number {
                text: default_text(spec),
                integer: spec.var_type == VariableType::Integer,
                min: spec.min,
                max: spec.max,
                placeholder: spec.placeholder.clone(),
            },
            VariableType::Datetime => FieldWidget::DateTime {
                text: default_text(spec),
                placeholder: spec.placeholder.clone(),
            },
            VariableType::Array => FieldWidget::MultilineText {
                text: default_text(spec),
                placeholder: spec
                    .placeholder
                    .clone()
                    .unwrap_or_else(|| ARRAY_SPLIT_HINT.to_string()),
            },
            VariableType::String => FieldWidget::Text {
                text: default_text(spec),
                placeholder: spec.placeholder.clone(),
            },
        };

        Self {
            name: spec.name.clone(),
            label: spec.label.clone().unwrap_or_else(|| spec.name.clone()),
            required: spec.required,
            description: spec.description.clone(),
            widget,
        }
    }
}

/// One field per variable, in schema order.
pub fn build_form(variables: &[VariableSpec]) -> Vec<FormField> {
    variables.iter().map(FormField::from_spec).collect()
}

/// Collect the current field values into the name-keyed map the render
/// endpoint expects.
pub fn collect_inputs(fields: &[FormField]) -> Map<String, Value> {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.widget.raw_value()))
        .collect()
}

/// Human-readable bounds hint for numeric fields; `None` when no bound is
/// set so nothing is rendered.
pub fn range_hint(min: Option<f64>, max: Option<f64>) -> Option<String> {
    fn fmt(v: f64) -> String {
        if v.fract() == 0.0 && v.abs() < 1e15 {
            format!("{}", v as i64)
        } else {
            v.to_string()
        }
    }
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!("{} to {}", fmt(lo), fmt(hi))),
        (Some(lo), None) => Some(format!("min {}", fmt(lo))),
        (None, Some(hi)) => Some(format!("max {}", fmt(hi))),
        (None, None) => None,
    }
}

fn default_is_true(default: Option<&Value>) -> bool {
    match default {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn default_text(spec: &VariableSpec) -> String {
    spec.default.as_ref().map(value_as_text).unwrap_or_default()
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(name: &str, var_type: VariableType) -> VariableSpec {
        VariableSpec {
            name: name.to_string(),
            var_type,
            ..Default::default()
        }
    }

    #[test]
    fn one_field_per_variable_in_schema_order() {
        let variables = vec![
            spec("z", VariableType::String),
            spec("flag", VariableType::Boolean),
            spec("count", VariableType::Integer),
            spec("ratio", VariableType::Number),
            spec("when", VariableType::Datetime),
            spec("items", VariableType::Array),
            spec("choice", VariableType::Select),
        ];
        let fields = build_form(&variables);
        assert_eq!(fields.len(), variables.len());
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "flag", "count", "ratio", "when", "items", "choice"]);
        assert!(matches!(fields[0].widget, FieldWidget::Text { .. }));
        assert!(matches!(fields[1].widget, FieldWidget::Checkbox { .. }));
        assert!(matches!(fields[2].widget, FieldWidget::Number { integer: true, .. }));
        assert!(matches!(fields[3].widget, FieldWidget::Number { integer: false, .. }));
        assert!(matches!(fields[4].widget, FieldWidget::DateTime { .. }));
        assert!(matches!(fields[5].widget, FieldWidget::MultilineText { .. }));
        assert!(matches!(fields[6].widget, FieldWidget::Select { .. }));
    }

    #[test]
    fn checkbox_checked_for_true_defaults_only() {
        for (default, expected) in [
            (Some(json!(true)), true),
            (Some(json!("true")), true),
            (Some(json!(false)), false),
            (Some(json!("false")), false),
            (Some(json!("yes")), false),
            (None, false),
        ] {
            let field = FormField::from_spec(&VariableSpec {
                default,
                ..spec("flag", VariableType::Boolean)
            });
            assert_eq!(field.widget, FieldWidget::Checkbox { checked: expected });
        }
    }

    #[test]
    fn optional_select_gets_blank_entry_and_starts_unselected() {
        let field = FormField::from_spec(&VariableSpec {
            options: vec!["red".into(), "blue".into()],
            ..spec("color", VariableType::Select)
        });
        match field.widget {
            FieldWidget::Select { options, selected, blank_option } => {
                assert_eq!(options, ["red", "blue"]);
                assert_eq!(selected, None);
                assert!(blank_option);
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn required_select_omits_blank_entry() {
        let field = FormField::from_spec(&VariableSpec {
            required: true,
            options: vec!["red".into(), "blue".into()],
            ..spec("color", VariableType::Select)
        });
        match field.widget {
            FieldWidget::Select { selected, blank_option, .. } => {
                // Without a default nothing is chosen yet, but the dropdown
                // itself carries no blank entry.
                assert_eq!(selected, None);
                assert!(!blank_option);
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn select_default_is_preselected_when_listed() {
        let field = FormField::from_spec(&VariableSpec {
            options: vec!["red".into(), "blue".into()],
            default: Some(json!("blue")),
            ..spec("color", VariableType::Select)
        });
        match field.widget {
            FieldWidget::Select { selected, .. } => assert_eq!(selected.as_deref(), Some("blue")),
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn select_default_outside_options_is_ignored() {
        let field = FormField::from_spec(&VariableSpec {
            options: vec!["red".into()],
            default: Some(json!("green")),
            ..spec("color", VariableType::Select)
        });
        match field.widget {
            FieldWidget::Select { selected, .. } => assert_eq!(selected, None),
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn numeric_bounds_and_defaults_are_carried() {
        let field = FormField::from_spec(&VariableSpec {
            min: Some(1.0),
            max: Some(10.0),
            default: Some(json!(5)),
            placeholder: Some("1-10".into()),
            ..spec("count", VariableType::Integer)
        });
        assert_eq!(
            field.widget,
            FieldWidget::Number {
                text: "5".into(),
                integer: true,
                min: Some(1.0),
                max: Some(10.0),
                placeholder: Some("1-10".into()),
            }
        );
    }

    #[test]
    fn absent_numeric_attributes_are_omitted() {
        let field = FormField::from_spec(&spec("ratio", VariableType::Number));
        assert_eq!(
            field.widget,
            FieldWidget::Number {
                text: String::new(),
                integer: false,
                min: None,
                max: None,
                placeholder: None,
            }
        );
    }

    #[test]
    fn array_placeholder_falls_back_to_split_hint() {
        let field = FormField::from_spec(&spec("items", VariableType::Array));
        match field.widget {
            FieldWidget::MultilineText { placeholder, .. } => {
                assert_eq!(placeholder, ARRAY_SPLIT_HINT);
            }
            other => panic!("expected multiline text, got {other:?}"),
        }

        let field = FormField::from_spec(&VariableSpec {
            placeholder: Some("one per line".into()),
            ..spec("items", VariableType::Array)
        });
        match field.widget {
            FieldWidget::MultilineText { placeholder, .. } => {
                assert_eq!(placeholder, "one per line");
            }
            other => panic!("expected multiline text, got {other:?}"),
        }
    }

    #[test]
    fn label_falls_back_to_variable_name() {
        let unlabeled = FormField::from_spec(&spec("user_name", VariableType::String));
        assert_eq!(unlabeled.label, "user_name");

        let labeled = FormField::from_spec(&VariableSpec {
            label: Some("User name".into()),
            description: Some("Shown in the greeting".into()),
            required: true,
            ..spec("user_name", VariableType::String)
        });
        assert_eq!(labeled.label, "User name");
        assert!(labeled.required);
        assert_eq!(labeled.description.as_deref(), Some("Shown in the greeting"));
    }

    #[test]
    fn range_hint_covers_partial_bounds() {
        assert_eq!(range_hint(Some(1.0), Some(10.0)).as_deref(), Some("1 to 10"));
        assert_eq!(range_hint(Some(0.5), None).as_deref(), Some("min 0.5"));
        assert_eq!(range_hint(None, Some(99.0)).as_deref(), Some("max 99"));
        assert_eq!(range_hint(None, None), None);
    }

    #[test]
    fn collect_inputs_passes_raw_values_through() {
        let mut fields = build_form(&[
            spec("flag", VariableType::Boolean),
            spec("items", VariableType::Array),
            VariableSpec {
                options: vec!["a".into()],
                ..spec("choice", VariableType::Select)
            },
            spec("note", VariableType::String),
        ]);

        if let FieldWidget::Checkbox { checked } = &mut fields[0].widget {
            *checked = true;
        }
        if let FieldWidget::MultilineText { text, .. } = &mut fields[1].widget {
            *text = "one\ntwo, three".to_string();
        }
        if let FieldWidget::Text { text, .. } = &mut fields[3].widget {
            *text = "  raw <text> ".to_string();
        }

        let inputs = collect_inputs(&fields);
        assert_eq!(inputs["flag"], json!(true));
        // Array text goes through unsplit; the backend decides the delimiter.
        assert_eq!(inputs["items"], json!("one\ntwo, three"));
        // An unchosen select collects as the empty string.
        assert_eq!(inputs["choice"], json!(""));
        // Text is neither trimmed nor escaped.
        assert_eq!(inputs["note"], json!("  raw <text> "));
    }
}
