//! Document decoding with JSON Schema enforcement.
//!
//! Each catalog document is parsed to a JSON value, validated against the
//! schema bundled for its resource, and only then decoded into typed records.
//! All three failure modes surface as `MalformedResource`.

use crate::error::CatalogError;
use crate::source::{CatalogSource, Resource};
use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

const CATEGORIES_SCHEMA: &str = include_str!("../schemas/categories.schema.json");
const SYMBOL_CATEGORIES_SCHEMA: &str = include_str!("../schemas/symbol_categories.schema.json");
const SYMBOL_SEARCH_SCHEMA: &str = include_str!("../schemas/symbol_search.schema.json");
const NAME_AVAILABILITY_SCHEMA: &str = include_str!("../schemas/name_availability.schema.json");

fn schema_text(resource: Resource) -> &'static str {
    match resource {
        Resource::Categories => CATEGORIES_SCHEMA,
        Resource::SymbolCategories => SYMBOL_CATEGORIES_SCHEMA,
        Resource::SymbolSearch => SYMBOL_SEARCH_SCHEMA,
        Resource::NameAvailability => NAME_AVAILABILITY_SCHEMA,
    }
}

/// Read, validate and decode one document from `source`.
pub(crate) fn load_document<T, S>(source: &S, resource: Resource) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
    S: CatalogSource + ?Sized,
{
    let bytes = source.read(resource)?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|err| CatalogError::MalformedResource {
            resource,
            detail: format!("invalid JSON: {err}"),
        })?;
    validate_document(resource, &value)?;
    let decoded = serde_json::from_value(value).map_err(|err| CatalogError::MalformedResource {
        resource,
        detail: err.to_string(),
    })?;
    tracing::debug!(%resource, bytes = bytes.len(), "decoded catalog document");
    Ok(decoded)
}

/// Validate `document` against the schema bundled for `resource`.
pub fn validate_document(resource: Resource, document: &Value) -> Result<(), CatalogError> {
    let compiled = compile_schema(resource)?;
    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::MalformedResource {
            resource,
            detail: format!("schema validation failed:\n{details}"),
        });
    }
    Ok(())
}

fn compile_schema(resource: Resource) -> Result<JSONSchema, CatalogError> {
    // Bundled schemas are compiled into the binary, so a failure here means the
    // crate itself shipped a broken schema.
    let schema: Value =
        serde_json::from_str(schema_text(resource)).map_err(|err| {
            CatalogError::MalformedResource {
                resource,
                detail: format!("bundled schema is not valid JSON: {err}"),
            }
        })?;
    JSONSchema::compile(&schema).map_err(|err| CatalogError::MalformedResource {
        resource,
        detail: format!("bundled schema failed to compile: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn bundled_schemas_compile() {
        for resource in Resource::ALL {
            assert!(compile_schema(resource).is_ok(), "{resource} schema");
        }
    }

    #[test]
    fn rejects_category_without_key() {
        let err = validate_document(
            Resource::Categories,
            &json!([{"key": "communication"}, {"label": "No key"}]),
        )
        .unwrap_err();
        match err {
            CatalogError::MalformedResource { resource, detail } => {
                assert_eq!(resource, Resource::Categories);
                assert!(detail.contains("/1"), "detail should name the entry: {detail}");
            }
            other => panic!("expected MalformedResource, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_string_search_terms() {
        let result = validate_document(Resource::SymbolSearch, &json!({"star": ["favorite", 3]}));
        assert!(matches!(result, Err(CatalogError::MalformedResource { .. })));
    }

    #[test]
    fn rejects_availability_without_year_table() {
        let result = validate_document(
            Resource::NameAvailability,
            &json!({"symbols": {"star": "2019"}}),
        );
        assert!(matches!(result, Err(CatalogError::MalformedResource { .. })));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let source = MemorySource::new().with(Resource::SymbolSearch, "{not json");
        let result: Result<BTreeMap<String, Vec<String>>, _> =
            load_document(&source, Resource::SymbolSearch);
        match result {
            Err(CatalogError::MalformedResource { detail, .. }) => {
                assert!(detail.starts_with("invalid JSON"));
            }
            other => panic!("expected MalformedResource, got {other:?}"),
        }
    }

    #[test]
    fn decodes_valid_document() {
        let source = MemorySource::new().with(
            Resource::SymbolCategories,
            r#"{"star": ["shapes", "indices"]}"#,
        );
        let decoded: BTreeMap<String, Vec<String>> =
            load_document(&source, Resource::SymbolCategories).unwrap();
        assert_eq!(decoded["star"], vec!["shapes", "indices"]);
    }
}
