//! Data-driven schema descriptions for model output validation.
//!
//! The open/closed distinction is a validation policy, so it lives in
//! data rather than in serde attributes: each [`SchemaDef`] carries an
//! explicit `open` flag consulted at validation time. Deserialization
//! into concrete types only happens after a value has validated.

use serde_json::Value;

/// Expected type of a single schema field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    /// Any integral JSON number.
    Integer,
    /// Any JSON number.
    Float,
    StringArray,
    /// Array of objects, each validated against the nested schema.
    Array(SchemaDef),
    /// Nested object validated against the nested schema.
    Object(SchemaDef),
}

/// One declared field of an object schema.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDef {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// An object schema: declared fields plus the open/closed policy for
/// keys that are not declared.
#[derive(Debug, Clone)]
pub struct SchemaDef {
    pub fields: Vec<FieldDef>,
    /// Open schemas ignore undeclared keys; closed schemas reject them.
    pub open: bool,
}

impl SchemaDef {
    pub fn closed(fields: Vec<FieldDef>) -> Self {
        Self {
            fields,
            open: false,
        }
    }

    pub fn open(fields: Vec<FieldDef>) -> Self {
        Self { fields, open: true }
    }

    /// Validate a parsed JSON value against this schema.
    ///
    /// The root must be a JSON object — a bare array is always rejected.
    /// `null` for an optional field counts as absent. Failure reasons
    /// are plain strings fed back to the model in the corrective retry
    /// and surfaced in `ValidationExhausted`.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        let object = value
            .as_object()
            .ok_or_else(|| "expected a JSON object at the top level".to_string())?;

        if !self.open {
            for key in object.keys() {
                if !self.fields.iter().any(|field| field.name == key) {
                    return Err(format!("unexpected field '{key}'"));
                }
            }
        }

        for field in &self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(format!("missing required field '{}'", field.name));
                    }
                }
                Some(present) => check_kind(field.name, &field.kind, present)?,
            }
        }
        Ok(())
    }
}

fn check_kind(name: &str, kind: &FieldKind, value: &Value) -> Result<(), String> {
    match kind {
        FieldKind::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err(format!("field '{name}' must be a string"))
            }
        }
        FieldKind::Integer => {
            if value.as_i64().is_some() || value.as_u64().is_some() {
                Ok(())
            } else {
                Err(format!("field '{name}' must be an integer"))
            }
        }
        FieldKind::Float => {
            if value.is_number() {
                Ok(())
            } else {
                Err(format!("field '{name}' must be a number"))
            }
        }
        FieldKind::StringArray => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(()),
            _ => Err(format!("field '{name}' must be an array of strings")),
        },
        FieldKind::Array(item_schema) => {
            let items = value
                .as_array()
                .ok_or_else(|| format!("field '{name}' must be an array"))?;
            for (index, item) in items.iter().enumerate() {
                item_schema
                    .validate(item)
                    .map_err(|reason| format!("field '{name}[{index}]': {reason}"))?;
            }
            Ok(())
        }
        FieldKind::Object(nested) => nested
            .validate(value)
            .map_err(|reason| format!("field '{name}': {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_closed() -> SchemaDef {
        SchemaDef::closed(vec![
            FieldDef::required("title", FieldKind::String),
            FieldDef::required("year", FieldKind::Integer),
            FieldDef::optional("rating", FieldKind::Float),
        ])
    }

    #[test]
    fn closed_schema_rejects_unknown_key() {
        let value = json!({"title": "Dune", "year": 2021, "director": "Villeneuve"});
        let err = sample_closed().validate(&value).unwrap_err();
        assert!(err.contains("unexpected field 'director'"), "{err}");
    }

    #[test]
    fn open_schema_ignores_unknown_key() {
        let schema = SchemaDef::open(vec![FieldDef::optional("genres", FieldKind::StringArray)]);
        let value = json!({"genres": ["sci-fi"], "made_up": true});
        assert!(schema.validate(&value).is_ok());
    }

    #[test]
    fn bare_array_is_rejected() {
        let value = json!([{"title": "Dune", "year": 2021}]);
        let err = sample_closed().validate(&value).unwrap_err();
        assert!(err.contains("object"), "{err}");
    }

    #[test]
    fn missing_required_field() {
        let value = json!({"title": "Dune"});
        let err = sample_closed().validate(&value).unwrap_err();
        assert!(err.contains("missing required field 'year'"), "{err}");
    }

    #[test]
    fn null_optional_counts_as_absent() {
        let value = json!({"title": "Dune", "year": 2021, "rating": null});
        assert!(sample_closed().validate(&value).is_ok());
    }

    #[test]
    fn integer_rejects_fractional_number() {
        let value = json!({"title": "Dune", "year": 2021.5});
        let err = sample_closed().validate(&value).unwrap_err();
        assert!(err.contains("integer"), "{err}");
    }

    #[test]
    fn nested_array_failure_names_the_index() {
        let schema = SchemaDef::closed(vec![FieldDef::required(
            "items",
            FieldKind::Array(SchemaDef::closed(vec![FieldDef::required(
                "title",
                FieldKind::String,
            )])),
        )]);
        let value = json!({"items": [{"title": "ok"}, {"wrong": 1}]});
        let err = schema.validate(&value).unwrap_err();
        assert!(err.contains("items[1]"), "{err}");
    }
}
