//! Operations handed over by the document traversal stage.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ConfigError, parse_file};

/// GraphQL operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RawOperationKind {
    /// `query`
    Query,
    /// `mutation`
    Mutation,
    /// `subscription`
    Subscription,
}

/// One operation as written by the upstream stage.
///
/// Type and document names are optional; the generator derives them from
/// `name` when they are missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// Operation type.
    pub kind: RawOperationKind,
    /// Declared operation name.
    pub name: String,
    /// Result type, `<Name>` when missing.
    #[serde(default)]
    pub result_type_name: Option<String>,
    /// Variables type, `<Name>Variables` when missing.
    #[serde(default)]
    pub variables_type_name: Option<String>,
    /// Some variable is non-null and has no default.
    #[serde(default)]
    pub has_required_variables: bool,
    /// Document constant, `<Name>Document` when missing.
    #[serde(default)]
    pub document_variable_name: Option<String>,
}

/// Operations file contents, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationsDocument {
    /// Operations in document order.
    pub operations: Vec<RawOperation>,
    /// Already emitted document constants and types, placed before the hooks.
    #[serde(default)]
    pub documents: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OperationsFile {
    List(Vec<RawOperation>),
    Document(OperationsDocument),
}

impl From<OperationsFile> for OperationsDocument {
    fn from(file: OperationsFile) -> Self {
        match file {
            OperationsFile::List(operations) => Self {
                operations,
                documents: String::new(),
            },
            OperationsFile::Document(document) => document,
        }
    }
}

/// Read an operations file: either a bare array of operations or an object
/// with `operations` and `documents`.
pub fn load_operations(path: &Path) -> Result<OperationsDocument, ConfigError> {
    let file: OperationsFile = parse_file(path)?;
    Ok(file.into())
}
