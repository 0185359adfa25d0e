//! Operation-level IR.
//!
//! `OperationDescriptor` is the normalized, read-only view of one GraphQL
//! operation that every fetcher strategy renders from.

use hookgen_common::{RawOperation, RawOperationKind};

use super::utils::capitalize_first;

/// Operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Rendered as query hooks, plus an infinite variant when enabled.
    Query,
    /// Rendered as a mutation hook.
    Mutation,
    /// Rendered as a `useSubscription` wrapper.
    Subscription,
}

impl From<RawOperationKind> for OperationKind {
    fn from(kind: RawOperationKind) -> Self {
        match kind {
            RawOperationKind::Query => OperationKind::Query,
            RawOperationKind::Mutation => OperationKind::Mutation,
            RawOperationKind::Subscription => OperationKind::Subscription,
        }
    }
}

/// Normalized operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Which hooks the operation produces.
    pub kind: OperationKind,
    /// Declared operation name (e.g., "testQuery"), used verbatim in keys
    pub name: String,
    /// Result type name (e.g., "TestQuery")
    pub result_type_name: String,
    /// Variables type name (e.g., "TestQueryVariables")
    pub variables_type_name: String,
    /// Whether the operation declares non-null variables without defaults
    pub has_required_variables: bool,
    /// Identifier of the emitted document constant (e.g., "TestQueryDocument")
    pub document_variable_name: String,
}

impl OperationDescriptor {
    /// Build a descriptor with the conventional type and document names.
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let pascal = capitalize_first(&name);
        Self {
            kind,
            result_type_name: pascal.clone(),
            variables_type_name: format!("{pascal}Variables"),
            document_variable_name: format!("{pascal}Document"),
            has_required_variables: false,
            name,
        }
    }

    /// Mark the variables argument as required.
    pub fn with_required_variables(mut self, required: bool) -> Self {
        self.has_required_variables = required;
        self
    }

    /// Name used in exported identifiers and key enums (e.g., "TestQuery").
    pub fn pascal_name(&self) -> String {
        capitalize_first(&self.name)
    }

    /// `use<Name>`
    pub fn hook_name(&self) -> String {
        format!("use{}", self.pascal_name())
    }

    /// `useInfinite<Name>`
    pub fn infinite_hook_name(&self) -> String {
        format!("useInfinite{}", self.pascal_name())
    }

    /// `use<Name>Client`
    pub fn client_hook_name(&self) -> String {
        format!("use{}Client", self.pascal_name())
    }
}

impl From<RawOperation> for OperationDescriptor {
    fn from(raw: RawOperation) -> Self {
        let defaults = OperationDescriptor::new(raw.kind.into(), raw.name);
        Self {
            result_type_name: raw.result_type_name.unwrap_or(defaults.result_type_name),
            variables_type_name: raw
                .variables_type_name
                .unwrap_or(defaults.variables_type_name),
            document_variable_name: raw
                .document_variable_name
                .unwrap_or(defaults.document_variable_name),
            has_required_variables: raw.has_required_variables,
            kind: defaults.kind,
            name: defaults.name,
        }
    }
}
