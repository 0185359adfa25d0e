//! TypeScript IR types for hook generation.
//!
//! This module defines the small slice of TypeScript the generator emits:
//! - TsType: type references, generic instantiations, `keyof`, indexed access
//! - TsExpr: expressions (identifiers, calls, arrows, ternaries, objects)
//! - TsStmt: statements and module-level declarations
//! - TsImport / TsTypeDef / TsFunction: file-level items

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, unknown
    Primitive(TsPrimitive),
    /// Named type reference: "TestQuery", "TData"
    Ref(String),
    /// Generic instantiation: `UseQueryOptions<TestQuery, TError, TData>`
    Generic { name: String, args: Vec<TsType> },
    /// `keyof T`
    KeyOf(Box<TsType>),
    /// Indexed access: `RequestInit['headers']`
    Indexed { object: Box<TsType>, key: String },
}

impl TsType {
    pub fn named(name: impl Into<String>) -> Self {
        TsType::Ref(name.into())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TsType>) -> Self {
        TsType::Generic {
            name: name.into(),
            args,
        }
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Unknown,
}

/// Object property definition (interfaces)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    String(String),
    Null,
}

/// Generic type parameter: `TData = TestQuery`, `TArgs extends IUseFetcherArgs<unknown>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeParam {
    pub name: String,
    pub constraint: Option<TsType>,
    pub default: Option<TsType>,
}

impl TsTypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: TsType) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: Some(default),
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    pub ty: Option<TsType>,
    pub optional: bool,
}

impl TsParam {
    pub fn typed(name: impl Into<String>, ty: TsType, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional,
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
        }
    }
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar', null
    Literal(TsLiteral),
    /// Function call with optional type arguments: foo<A, B>(a, b)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Arrow function: <T>(x) => x.foo
    Arrow(Box<TsArrow>),
    /// Object literal: { a: 1, ...rest }
    Object(Vec<ObjectProp>),
    /// Member access: foo.bar
    Member { object: Box<TsExpr>, prop: String },
    /// Optional chaining member access: foo?.bar
    OptionalMember { object: Box<TsExpr>, prop: String },
    /// Await expression: await fetch()
    Await(Box<TsExpr>),
    /// Binary operation: a ?? b
    BinOp {
        left: Box<TsExpr>,
        op: BinOp,
        right: Box<TsExpr>,
    },
    /// Ternary/conditional: cond ? a : b
    Ternary {
        cond: Box<TsExpr>,
        then_expr: Box<TsExpr>,
        else_expr: Box<TsExpr>,
    },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
    /// Assignment: target = value
    Assign {
        target: Box<TsExpr>,
        value: Box<TsExpr>,
    },
    /// Parenthesized expression: (a ?? b)
    Paren(Box<TsExpr>),
    /// Raw code that doesn't fit the AST
    Raw(String),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    pub fn optional_member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::OptionalMember {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    pub fn call(callee: TsExpr, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args: vec![],
            args,
        }
    }

    pub fn generic_call(callee: TsExpr, type_args: Vec<TsType>, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args,
            args,
        }
    }

    pub fn ternary(cond: TsExpr, then_expr: TsExpr, else_expr: TsExpr) -> Self {
        TsExpr::Ternary {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    pub fn assign(target: TsExpr, value: TsExpr) -> Self {
        TsExpr::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn arrow(arrow: TsArrow) -> Self {
        TsExpr::Arrow(Box::new(arrow))
    }
}

/// Entry of an object literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectProp {
    /// key: value
    KeyValue(String, TsExpr),
    /// ...expr
    Spread(TsExpr),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    NullishCoalesce,
}

/// Arrow function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsArrow {
    pub type_params: Vec<TsTypeParam>,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: ArrowBody,
    pub is_async: bool,
}

impl TsArrow {
    /// `(params) => expr`
    pub fn expr(params: Vec<TsParam>, body: TsExpr) -> Self {
        Self {
            type_params: vec![],
            params,
            return_type: None,
            body: ArrowBody::Expr(Box::new(body)),
            is_async: false,
        }
    }
}

/// Arrow function body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowBody {
    /// `=> expr`
    Expr(Box<TsExpr>),
    /// `=> { stmts }`
    Block(Vec<TsStmt>),
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding, if any
    pub default: Option<String>,
    /// Named items to import
    pub items: Vec<ImportItem>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// Import item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Local binding introduced by this item.
    pub fn binding(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// interface Foo<T> { ... }
    Interface { properties: Vec<TsProp> },
    /// enum Foo { A = 'a' }
    Enum { members: Vec<(String, TsLiteral)> },
}

/// Type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeDef {
    pub name: String,
    pub type_params: Vec<TsTypeParam>,
    pub kind: TypeDefKind,
}

/// Left-hand side of a variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsBinding {
    /// const foo = ...
    Ident(String),
    /// const { a: b, c: d } = ...
    Object(Vec<(String, String)>),
}

/// Statement in a function body or at module level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    /// const/let declaration
    VarDecl {
        kind: VarKind,
        binding: TsBinding,
        ty: Option<TsType>,
        init: TsExpr,
    },
    /// Expression statement
    Expr(TsExpr),
    /// Return statement
    Return(Option<TsExpr>),
    /// If statement
    If {
        cond: TsExpr,
        then_body: Vec<TsStmt>,
    },
    /// Throw statement
    Throw(TsExpr),
    /// `export <stmt>`
    Export(Box<TsStmt>),
}

impl TsStmt {
    /// `export const name = init;`
    pub fn export_const(name: impl Into<String>, init: TsExpr) -> Self {
        TsStmt::Export(Box::new(TsStmt::VarDecl {
            kind: VarKind::Const,
            binding: TsBinding::Ident(name.into()),
            ty: None,
            init,
        }))
    }

    /// `const name = init;`
    pub fn local_const(name: impl Into<String>, init: TsExpr) -> Self {
        TsStmt::VarDecl {
            kind: VarKind::Const,
            binding: TsBinding::Ident(name.into()),
            ty: None,
            init,
        }
    }
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Const,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsFunction {
    pub name: String,
    pub type_params: Vec<TsTypeParam>,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
    pub is_export: bool,
}
