//! Caller-defined expected shapes, and the narrowing step that turns an
//! untyped parsed object into one guaranteed to match.
//!
//! Model output is `serde_json::Value` until it passes through
//! [`SchemaDescriptor::conform`]; nothing downstream touches it before then.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// How an absent field is filled in.
#[derive(Clone)]
pub enum FieldDefault {
    /// A fixed value, cloned into place.
    Value(Value),
    /// A zero-argument generator, invoked once per absent occurrence
    /// (e.g. an incrementing id).
    Generated(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FieldDefault {
    fn produce(&self) -> Value {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Generated(gen) => gen(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// The accepted type of a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Number,
    StringArray,
    /// Array whose elements conform to the given element shape.
    ObjectArray(SchemaDescriptor),
    /// Nested object conforming to the given shape.
    Object(SchemaDescriptor),
}

/// Per-field expectations: type, requiredness, default, repair policy.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    kind: FieldKind,
    required: bool,
    default: Option<FieldDefault>,
    coerce_scalars: bool,
    atomic: bool,
}

impl FieldSpec {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            coerce_scalars: false,
            atomic: false,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn string_array() -> Self {
        Self::new(FieldKind::StringArray)
    }

    pub fn object(shape: SchemaDescriptor) -> Self {
        Self::new(FieldKind::Object(shape))
    }

    pub fn object_array(element: SchemaDescriptor) -> Self {
        Self::new(FieldKind::ObjectArray(element))
    }

    /// A missing (or unrepairable) value is a violation instead of a silent
    /// null. Pointless combined with a default, which always recovers.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(FieldDefault::Value(value));
        self
    }

    pub fn default_with<F>(mut self, gen: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Generated(Arc::new(gen)));
        self
    }

    /// For array fields: a lone scalar (or lone object, for object arrays)
    /// is wrapped into a single-element array instead of being treated as
    /// absent. Opt-in.
    pub fn coerce_scalars(mut self) -> Self {
        self.coerce_scalars = true;
        self
    }

    /// For object arrays: any malformed element invalidates the whole array
    /// instead of being replaced by the element default.
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }
}

/// Ordered field-name to [`FieldSpec`] mapping describing one expected
/// output shape. Built per call site.
#[derive(Debug, Clone, Default)]
pub struct SchemaDescriptor {
    fields: Vec<(String, FieldSpec)>,
}

impl SchemaDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.push((name.to_string(), spec));
        self
    }

    /// Narrows an untyped parsed value into an object guaranteed to match
    /// this shape: known fields copied through or repaired, absent fields
    /// defaulted, unknown keys dropped.
    ///
    /// All-or-nothing: if any required field has no recoverable value the
    /// whole call fails, listing every missing field path.
    pub fn conform(&self, value: &Value) -> Result<Value, Vec<String>> {
        let empty = Map::new();
        let source = value.as_object().unwrap_or(&empty);

        let mut missing = Vec::new();
        let conformed = conform_object(self, source, "", &mut missing);

        if missing.is_empty() {
            Ok(Value::Object(conformed))
        } else {
            Err(missing)
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn conform_object(
    shape: &SchemaDescriptor,
    source: &Map<String, Value>,
    path: &str,
    missing: &mut Vec<String>,
) -> Map<String, Value> {
    let mut out = Map::new();

    for (name, spec) in &shape.fields {
        let field_path = join_path(path, name);
        let value = source
            .get(name)
            .and_then(|v| coerce(spec, v, &field_path, missing));

        match value {
            Some(v) => {
                out.insert(name.clone(), v);
            }
            None => match &spec.default {
                Some(default) => {
                    out.insert(name.clone(), default.produce());
                }
                None if spec.required => missing.push(field_path),
                None => {}
            },
        }
    }

    out
}

/// Accepts the value if it matches the field's type, repairing where the
/// spec allows. `None` means "treat as absent" so defaulting applies.
fn coerce(spec: &FieldSpec, value: &Value, path: &str, missing: &mut Vec<String>) -> Option<Value> {
    match &spec.kind {
        FieldKind::String => value.as_str().map(|s| Value::String(s.to_owned())),
        FieldKind::Number => value.is_number().then(|| value.clone()),
        FieldKind::StringArray => match value {
            Value::Array(items) => Some(Value::Array(
                items.iter().filter_map(coerce_string_item).collect(),
            )),
            Value::String(_) | Value::Number(_) | Value::Bool(_) if spec.coerce_scalars => {
                coerce_string_item(value).map(|s| Value::Array(vec![s]))
            }
            _ => None,
        },
        FieldKind::ObjectArray(element) => match value {
            Value::Array(items) => conform_elements(element, items, spec.atomic, path, missing),
            Value::Object(_) if spec.coerce_scalars => {
                conform_elements(element, std::slice::from_ref(value), spec.atomic, path, missing)
            }
            _ => None,
        },
        FieldKind::Object(shape) => value
            .as_object()
            .map(|map| Value::Object(conform_object(shape, map, path, missing))),
    }
}

/// String-array elements: strings pass, scalars are stringified, anything
/// structured is dropped.
fn coerce_string_item(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

/// Conforms every element of an object array. A malformed element is
/// replaced by the element shape's defaults, preserving array length and
/// order; if the element shape cannot be synthesized from defaults alone,
/// the element's missing fields are recorded. Atomic arrays reject the
/// whole array on the first malformed element.
fn conform_elements(
    element: &SchemaDescriptor,
    items: &[Value],
    atomic: bool,
    path: &str,
    missing: &mut Vec<String>,
) -> Option<Value> {
    let mut out = Vec::with_capacity(items.len());

    for (idx, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{idx}]");

        let mut item_missing = Vec::new();
        let conformed = item
            .as_object()
            .map(|map| conform_object(element, map, &item_path, &mut item_missing));

        match conformed {
            Some(map) if item_missing.is_empty() => out.push(Value::Object(map)),
            _ if atomic => return None,
            _ => {
                // Replace the malformed element with the shape's defaults.
                let mut default_missing = Vec::new();
                let defaulted =
                    conform_object(element, &Map::new(), &item_path, &mut default_missing);
                if default_missing.is_empty() {
                    out.push(Value::Object(defaulted));
                } else {
                    missing.extend(default_missing);
                }
            }
        }
    }

    Some(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use super::*;

    fn analysis_shape() -> SchemaDescriptor {
        SchemaDescriptor::new()
            .field("overallScore", FieldSpec::number().required())
            .field("strengths", FieldSpec::string_array().default_value(json!([])))
            .field(
                "missingElements",
                FieldSpec::string_array().default_value(json!([])),
            )
    }

    #[test]
    fn test_exact_match_passes_through() {
        let input = json!({"overallScore": 85, "strengths": ["x"], "missingElements": ["y"]});
        let out = analysis_shape().conform(&input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_absent_optional_fields_get_defaults() {
        let input = json!({"overallScore": 85, "strengths": ["x"]});
        let out = analysis_shape().conform(&input).unwrap();
        assert_eq!(
            out,
            json!({"overallScore": 85, "strengths": ["x"], "missingElements": []})
        );
    }

    #[test]
    fn test_missing_required_field_is_a_violation() {
        let err = analysis_shape().conform(&json!({"strengths": []})).unwrap_err();
        assert_eq!(err, vec!["overallScore".to_string()]);
    }

    #[test]
    fn test_all_missing_required_fields_are_listed() {
        let shape = SchemaDescriptor::new()
            .field("title", FieldSpec::string().required())
            .field("score", FieldSpec::number().required());
        let err = shape.conform(&json!({})).unwrap_err();
        assert_eq!(err, vec!["title".to_string(), "score".to_string()]);
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let input = json!({"overallScore": 1, "chatter": "ignore me"});
        let out = analysis_shape().conform(&input).unwrap();
        assert!(out.get("chatter").is_none());
    }

    #[test]
    fn test_wrong_type_required_field_is_a_violation() {
        let err = analysis_shape()
            .conform(&json!({"overallScore": "eighty-five"}))
            .unwrap_err();
        assert_eq!(err, vec!["overallScore".to_string()]);
    }

    #[test]
    fn test_wrong_type_with_default_falls_back_to_default() {
        let input = json!({"overallScore": 1, "strengths": {"not": "an array"}});
        let out = analysis_shape().conform(&input).unwrap();
        assert_eq!(out["strengths"], json!([]));
    }

    #[test]
    fn test_scalar_not_wrapped_without_opt_in() {
        let input = json!({"overallScore": 1, "strengths": "communication"});
        let out = analysis_shape().conform(&input).unwrap();
        // Treated as absent, so the default applies.
        assert_eq!(out["strengths"], json!([]));
    }

    #[test]
    fn test_scalar_wrapped_when_opted_in() {
        let shape = SchemaDescriptor::new().field(
            "strengths",
            FieldSpec::string_array().coerce_scalars().default_value(json!([])),
        );
        let out = shape.conform(&json!({"strengths": "communication"})).unwrap();
        assert_eq!(out["strengths"], json!(["communication"]));
    }

    #[test]
    fn test_string_array_stringifies_scalar_elements() {
        let shape =
            SchemaDescriptor::new().field("tags", FieldSpec::string_array().default_value(json!([])));
        let out = shape.conform(&json!({"tags": ["rust", 7, true]})).unwrap();
        assert_eq!(out["tags"], json!(["rust", "7", "true"]));
    }

    #[test]
    fn test_nested_object_recurses_and_defaults() {
        let shape = SchemaDescriptor::new().field(
            "keywordAnalysis",
            FieldSpec::object(
                SchemaDescriptor::new()
                    .field(
                        "presentKeywords",
                        FieldSpec::string_array().default_value(json!([])),
                    )
                    .field(
                        "missingKeywords",
                        FieldSpec::string_array().default_value(json!([])),
                    ),
            )
            .default_value(json!({"presentKeywords": [], "missingKeywords": []})),
        );

        let out = shape
            .conform(&json!({"keywordAnalysis": {"presentKeywords": ["rust"]}}))
            .unwrap();
        assert_eq!(
            out["keywordAnalysis"],
            json!({"presentKeywords": ["rust"], "missingKeywords": []})
        );

        let out = shape.conform(&json!({})).unwrap();
        assert_eq!(
            out["keywordAnalysis"],
            json!({"presentKeywords": [], "missingKeywords": []})
        );
    }

    #[test]
    fn test_nested_required_violation_uses_dotted_path() {
        let shape = SchemaDescriptor::new().field(
            "details",
            FieldSpec::object(
                SchemaDescriptor::new().field("name", FieldSpec::string().required()),
            ),
        );
        let err = shape.conform(&json!({"details": {}})).unwrap_err();
        assert_eq!(err, vec!["details.name".to_string()]);
    }

    #[test]
    fn test_malformed_array_element_replaced_by_defaults() {
        let element = SchemaDescriptor::new()
            .field("heading", FieldSpec::string().default_value(json!("")))
            .field("items", FieldSpec::string_array().default_value(json!([])));
        let shape =
            SchemaDescriptor::new().field("sections", FieldSpec::object_array(element));

        let input = json!({"sections": [
            {"heading": "Experience", "items": ["a"]},
            "not an object",
            {"heading": "Education", "items": ["b"]}
        ]});
        let out = shape.conform(&input).unwrap();
        let sections = out["sections"].as_array().unwrap();
        // Length and order preserved; only the bad element was replaced.
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0]["heading"], "Experience");
        assert_eq!(sections[1], json!({"heading": "", "items": []}));
        assert_eq!(sections[2]["heading"], "Education");
    }

    #[test]
    fn test_atomic_array_rejected_whole_on_bad_element() {
        let element =
            SchemaDescriptor::new().field("heading", FieldSpec::string().default_value(json!("")));
        let shape = SchemaDescriptor::new().field(
            "sections",
            FieldSpec::object_array(element).atomic().default_value(json!([])),
        );

        let input = json!({"sections": [{"heading": "ok"}, 42]});
        let out = shape.conform(&input).unwrap();
        // The whole array is treated as absent, so the default applies.
        assert_eq!(out["sections"], json!([]));
    }

    #[test]
    fn test_unrepairable_element_records_violation() {
        let element = SchemaDescriptor::new().field("question", FieldSpec::string().required());
        let shape = SchemaDescriptor::new().field("questions", FieldSpec::object_array(element));

        let err = shape
            .conform(&json!({"questions": [{"question": "ok"}, {"question": 42}]}))
            .unwrap_err();
        assert_eq!(err, vec!["questions[1].question".to_string()]);
    }

    #[test]
    fn test_generated_default_increments_per_element() {
        let counter = AtomicU32::new(0);
        let element = SchemaDescriptor::new()
            .field(
                "id",
                FieldSpec::number()
                    .default_with(move || Value::from(counter.fetch_add(1, Ordering::Relaxed) + 1)),
            )
            .field("question", FieldSpec::string().required());
        let shape = SchemaDescriptor::new().field("questions", FieldSpec::object_array(element));

        let input = json!({"questions": [
            {"question": "a"},
            {"id": 99, "question": "b"},
            {"question": "c"}
        ]});
        let out = shape.conform(&input).unwrap();
        let questions = out["questions"].as_array().unwrap();
        assert_eq!(questions[0]["id"], json!(1));
        assert_eq!(questions[1]["id"], json!(99));
        assert_eq!(questions[2]["id"], json!(2));
    }

    #[test]
    fn test_non_object_input_defaults_everything() {
        let shape =
            SchemaDescriptor::new().field("notes", FieldSpec::string().default_value(json!("")));
        let out = shape.conform(&json!("just a string")).unwrap();
        assert_eq!(out, json!({"notes": ""}));
    }

    #[test]
    fn test_single_object_wrapped_into_object_array_when_opted_in() {
        let element =
            SchemaDescriptor::new().field("heading", FieldSpec::string().default_value(json!("")));
        let shape = SchemaDescriptor::new().field(
            "sections",
            FieldSpec::object_array(element).coerce_scalars(),
        );
        let out = shape
            .conform(&json!({"sections": {"heading": "Experience"}}))
            .unwrap();
        assert_eq!(out["sections"], json!([{"heading": "Experience"}]));
    }
}
