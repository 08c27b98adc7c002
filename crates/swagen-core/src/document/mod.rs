pub mod operation;
pub mod parameter;
pub mod response;
pub mod spec;
pub mod visit;

use crate::error::DocumentError;
pub use operation::{HttpMethod, Operation, PathItem};
pub use parameter::{Parameter, ParameterLocation, ParameterOrRef};
pub use response::{Response, ResponseOrRef};
pub use spec::{Document, Info};
pub use visit::{DocumentVisitor, OperationContext, visit_document};

/// Parse a Swagger v2 document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, DocumentError> {
    let document: Document = serde_yaml_ng::from_str(input)?;
    validate_version(&document)?;
    Ok(document)
}

/// Parse a Swagger v2 document from JSON.
pub fn from_json(input: &str) -> Result<Document, DocumentError> {
    let document: Document = serde_json::from_str(input)?;
    validate_version(&document)?;
    Ok(document)
}

fn validate_version(document: &Document) -> Result<(), DocumentError> {
    if document.swagger != "2.0" {
        return Err(DocumentError::UnsupportedVersion(document.swagger.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_json() {
        let document = from_json(
            r#"{"swagger": "2.0", "info": {"title": "Petstore", "version": "1.0"}, "paths": {}}"#,
        )
        .unwrap();
        assert_eq!(document.info.title, "Petstore");
        assert!(document.paths.is_empty());
    }

    #[test]
    fn parse_rejects_openapi_3() {
        let result = from_yaml("swagger: '3.0.0'\ninfo: {title: T, version: '1'}\n");
        assert!(matches!(
            result,
            Err(DocumentError::UnsupportedVersion(version)) if version == "3.0.0"
        ));
    }

    #[test]
    fn resolve_pointer() {
        let document = from_json(
            r#"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "definitions": {"Pet": {"type": "object"}}
            }"#,
        )
        .unwrap();
        assert!(document.resolve("#/definitions/Pet").is_some());
        assert!(document.resolve("/definitions/Pet").is_some());
        assert!(document.resolve("#/definitions/Missing").is_none());
    }

    #[test]
    fn write_round_trips_unknown_schema_keywords() {
        let document = from_json(
            r#"{
                "swagger": "2.0",
                "info": {"title": "T", "version": "1"},
                "definitions": {"Pet": {"type": "object", "x-nullable": true}}
            }"#,
        )
        .unwrap();
        let written = document.write();
        assert_eq!(
            written["definitions"]["Pet"]["x-nullable"],
            serde_json::json!(true)
        );
    }
}
