//! Intermediate Representation for hook generation.
//!
//! This module defines a two-layer architecture:
//! 1. Operation-level IR: normalized operation descriptors
//! 2. TypeScript AST IR: types, expressions, statements, imports
//!
//! Strategies build AST nodes; emission to text is purely mechanical via the
//! `Emit` trait, which keeps each template piece testable on its own.
//!
//! ## Module Structure
//!
//! - `operation`: OperationDescriptor, OperationKind
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsImport, ...)
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: identifier and string helpers

mod emit;
mod operation;
mod types;
pub mod utils;

pub use emit::Emit;
pub use operation::{OperationDescriptor, OperationKind};
pub use types::{
    ArrowBody, BinOp, ImportItem, ObjectProp, TsArrow, TsBinding, TsExpr, TsFunction, TsImport,
    TsLiteral, TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TsTypeParam, TypeDefKind,
    VarKind,
};
