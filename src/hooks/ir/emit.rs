//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit` for composable code generation. Object
//! literals and block-bodied arrows are laid out over several lines; every
//! other construct is printed on one line, so identical IR always yields
//! identical text.

use super::types::{
    ArrowBody, BinOp, ImportItem, ObjectProp, TsArrow, TsBinding, TsExpr, TsFunction, TsImport,
    TsLiteral, TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TsTypeParam, TypeDefKind,
    VarKind,
};
use super::utils::{escape_js_string, quote_if_needed};

/// Object literals longer than this are broken over several lines.
const MAX_INLINE_OBJECT_WIDTH: usize = 80;

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T]) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(", ")
}

fn indent_str(indent: usize) -> String {
    "  ".repeat(indent)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("'{}'", escape_js_string(s)),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => format!("{}<{}>", name, join(args)),
            TsType::KeyOf(inner) => format!("keyof {}", inner.emit()),
            TsType::Indexed { object, key } => {
                format!("{}['{}']", object.emit(), escape_js_string(key))
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

impl Emit for TsTypeParam {
    fn emit(&self) -> String {
        let mut output = self.name.clone();
        if let Some(constraint) = &self.constraint {
            output.push_str(&format!(" extends {}", constraint.emit()));
        }
        if let Some(default) = &self.default {
            output.push_str(&format!(" = {}", default.emit()));
        }
        output
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{}: {}", self.name, opt, ty.emit()),
            None => format!("{}{}", self.name, opt),
        }
    }
}

fn emit_type_params(params: &[TsTypeParam]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", join(params))
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!(
                    "export interface {}{} {{\n",
                    self.name,
                    emit_type_params(&self.type_params)
                );
                for prop in properties {
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::Enum { members } => {
                let mut output = format!("export enum {} {{\n", self.name);
                for (key, value) in members {
                    output.push_str(&format!("  {} = {},\n", quote_if_needed(key), value.emit()));
                }
                output.push_str("}\n");
                output
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::NullishCoalesce => "??".to_string(),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsExpr {
    /// Emit at the given nesting level (2 spaces per level). Only multi-line
    /// constructs use the level; the first line is never prefixed.
    pub fn emit_indented(&self, indent: usize) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args_str = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", join(type_args))
                };
                let args_str = args
                    .iter()
                    .map(|a| a.emit_indented(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}{}({})", callee.emit_indented(indent), type_args_str, args_str)
            }
            TsExpr::Arrow(arrow) => arrow.emit_indented(indent),
            TsExpr::Object(props) => emit_object(props, indent),
            TsExpr::Member { object, prop } => {
                format!("{}.{}", object.emit_indented(indent), prop)
            }
            TsExpr::OptionalMember { object, prop } => {
                format!("{}?.{}", object.emit_indented(indent), prop)
            }
            TsExpr::Await(expr) => format!("await {}", expr.emit_indented(indent)),
            TsExpr::BinOp { left, op, right } => format!(
                "{} {} {}",
                left.emit_indented(indent),
                op.emit(),
                right.emit_indented(indent)
            ),
            TsExpr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => format!(
                "{} ? {} : {}",
                cond.emit_indented(indent),
                then_expr.emit_indented(indent),
                else_expr.emit_indented(indent)
            ),
            TsExpr::Array(items) => {
                let items_str = items
                    .iter()
                    .map(|i| i.emit_indented(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", items_str)
            }
            TsExpr::Assign { target, value } => format!(
                "{} = {}",
                target.emit_indented(indent),
                value.emit_indented(indent)
            ),
            TsExpr::Paren(expr) => format!("({})", expr.emit_indented(indent)),
            TsExpr::Raw(code) => code.clone(),
        }
    }
}

fn emit_object(props: &[ObjectProp], indent: usize) -> String {
    if props.is_empty() {
        return "{}".to_string();
    }

    let entries: Vec<String> = props
        .iter()
        .map(|prop| match prop {
            ObjectProp::KeyValue(key, TsExpr::Ident(value)) if key == value => key.clone(),
            ObjectProp::KeyValue(key, value) => {
                format!("{}: {}", quote_if_needed(key), value.emit_indented(indent + 1))
            }
            ObjectProp::Spread(expr) => format!("...{}", expr.emit_indented(indent + 1)),
        })
        .collect();

    let inline = format!("{{ {} }}", entries.join(", "));
    if inline.len() <= MAX_INLINE_OBJECT_WIDTH && !inline.contains('\n') {
        return inline;
    }

    let inner = indent_str(indent + 1);
    let body = entries
        .iter()
        .map(|entry| format!("{inner}{entry}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{}\n{}}}", body, indent_str(indent))
}

impl Emit for TsArrow {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsArrow {
    pub fn emit_indented(&self, indent: usize) -> String {
        let async_str = if self.is_async { "async " } else { "" };
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let head = format!(
            "{}{}({}){}",
            async_str,
            emit_type_params(&self.type_params),
            join(&self.params),
            return_type_str
        );

        match &self.body {
            ArrowBody::Expr(expr) => format!("{} => {}", head, expr.emit_indented(indent)),
            ArrowBody::Block(stmts) => {
                let mut output = format!("{} => {{\n", head);
                for stmt in stmts {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&indent_str(indent));
                output.push('}');
                output
            }
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for VarKind {
    fn emit(&self) -> String {
        match self {
            VarKind::Const => "const".to_string(),
        }
    }
}

impl Emit for TsBinding {
    fn emit(&self) -> String {
        match self {
            TsBinding::Ident(name) => name.clone(),
            TsBinding::Object(pairs) => {
                let parts = pairs
                    .iter()
                    .map(|(key, local)| format!("{key}: {local}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {parts} }}")
            }
        }
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = indent_str(indent);
        match self {
            TsStmt::VarDecl {
                kind,
                binding,
                ty,
                init,
            } => {
                let ty_str = ty.as_ref().map(|t| format!(": {}", t.emit())).unwrap_or_default();
                format!(
                    "{}{} {}{} = {};\n",
                    prefix,
                    kind.emit(),
                    binding.emit(),
                    ty_str,
                    init.emit_indented(indent)
                )
            }
            TsStmt::Expr(expr) => format!("{}{};\n", prefix, expr.emit_indented(indent)),
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit_indented(indent)),
                None => format!("{}return;\n", prefix),
            },
            TsStmt::If { cond, then_body } => {
                let mut output = format!("{}if ({}) {{\n", prefix, cond.emit_indented(indent));
                for stmt in then_body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&format!("{}}}\n", prefix));
                output
            }
            TsStmt::Throw(expr) => format!("{}throw {};\n", prefix, expr.emit_indented(indent)),
            TsStmt::Export(inner) => {
                format!("{}export {}", prefix, inner.emit_indented(indent).trim_start())
            }
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let export_str = if self.is_export { "export " } else { "" };
        let async_str = if self.is_async { "async " } else { "" };
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();

        let mut output = format!(
            "{}{}function {}{}({}){}",
            export_str,
            async_str,
            self.name,
            emit_type_params(&self.type_params),
            join(&self.params),
            return_type_str
        );
        if self.body.is_empty() {
            output.push_str(" {}\n");
        } else {
            output.push_str(" {\n");
            for stmt in &self.body {
                output.push_str(&stmt.emit_indented(1));
            }
            output.push_str("}\n");
        }
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for ImportItem {
    fn emit(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        let mut clauses = Vec::new();
        if let Some(default) = &self.default {
            clauses.push(default.clone());
        }
        if !self.items.is_empty() {
            clauses.push(format!("{{ {} }}", join(&self.items)));
        }
        format!(
            "import {}{} from '{}';",
            type_keyword,
            clauses.join(", "),
            escape_js_string(&self.from)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_literal() {
        assert_eq!(TsLiteral::String("hello".into()).emit(), "'hello'");
        assert_eq!(TsLiteral::String("it's".into()).emit(), "'it\\'s'");
        assert_eq!(TsLiteral::Null.emit(), "null");
    }

    #[test]
    fn test_emit_types() {
        let options = TsType::generic(
            "Partial",
            vec![TsType::generic(
                "UseQueryOptions",
                vec![
                    TsType::named("TestQuery"),
                    TsType::named("TError"),
                    TsType::named("TData"),
                ],
            )],
        );
        assert_eq!(
            options.emit(),
            "Partial<UseQueryOptions<TestQuery, TError, TData>>"
        );
        assert_eq!(
            TsType::KeyOf(Box::new(TsType::named("Vars"))).emit(),
            "keyof Vars"
        );
        assert_eq!(
            TsType::Indexed {
                object: Box::new(TsType::named("RequestInit")),
                key: "headers".into(),
            }
            .emit(),
            "RequestInit['headers']"
        );
    }

    #[test]
    fn test_emit_type_param() {
        let param = TsTypeParam {
            name: "TArgs".into(),
            constraint: Some(TsType::named("Base")),
            default: Some(TsType::Primitive(TsPrimitive::Unknown)),
        };
        assert_eq!(param.emit(), "TArgs extends Base = unknown");
    }

    #[test]
    fn test_emit_generic_call() {
        let call = TsExpr::generic_call(
            TsExpr::ident("fetcher"),
            vec![TsType::named("A"), TsType::named("B")],
            vec![TsExpr::ident("Doc"), TsExpr::ident("args")],
        );
        assert_eq!(call.emit(), "fetcher<A, B>(Doc, args)");
    }

    #[test]
    fn test_emit_ternary_key() {
        let expr = TsExpr::ternary(
            TsExpr::optional_member(TsExpr::ident("args"), "variables"),
            TsExpr::Array(vec![
                TsExpr::string("q"),
                TsExpr::member(TsExpr::ident("args"), "variables"),
            ]),
            TsExpr::Array(vec![TsExpr::string("q")]),
        );
        assert_eq!(
            expr.emit(),
            "args?.variables ? ['q', args.variables] : ['q']"
        );
    }

    #[test]
    fn test_emit_short_object_inline() {
        let obj = TsExpr::Object(vec![
            ObjectProp::KeyValue("query".into(), TsExpr::ident("query")),
            ObjectProp::Spread(TsExpr::ident("rest")),
        ]);
        assert_eq!(obj.emit(), "{ query, ...rest }");
        assert_eq!(TsExpr::Object(vec![]).emit(), "{}");
    }

    #[test]
    fn test_emit_long_object_multiline() {
        let obj = TsExpr::Object(vec![
            ObjectProp::KeyValue(
                "queryKey".into(),
                TsExpr::Raw("someVeryLongExpressionThatKeepsGoing(andGoing, andGoing)".into()),
            ),
            ObjectProp::Spread(TsExpr::ident("options")),
        ]);
        assert_eq!(
            obj.emit_indented(1),
            "{\n    queryKey: someVeryLongExpressionThatKeepsGoing(andGoing, andGoing),\n    ...options\n  }"
        );
    }

    #[test]
    fn test_emit_block_arrow() {
        let arrow = TsArrow {
            type_params: vec![TsTypeParam::new("T")],
            params: vec![TsParam::typed("x", TsType::named("T"), true)],
            return_type: None,
            body: ArrowBody::Block(vec![TsStmt::Return(Some(TsExpr::ident("x")))]),
            is_async: false,
        };
        assert_eq!(arrow.emit(), "<T>(x?: T) => {\n  return x;\n}");
    }

    #[test]
    fn test_emit_export_destructuring() {
        let stmt = TsStmt::Export(Box::new(TsStmt::VarDecl {
            kind: VarKind::Const,
            binding: TsBinding::Object(vec![
                ("useQuery".into(), "useA".into()),
                ("useQueryClient".into(), "useAClient".into()),
            ]),
            ty: None,
            init: TsExpr::ident("factory"),
        }));
        assert_eq!(
            stmt.emit(),
            "export const { useQuery: useA, useQueryClient: useAClient } = factory;\n"
        );
    }

    #[test]
    fn test_emit_interface_and_enum() {
        let def = TsTypeDef {
            name: "IUseFetcherArgs".into(),
            type_params: vec![TsTypeParam::new("TVariables")],
            kind: TypeDefKind::Interface {
                properties: vec![TsProp {
                    name: "variables".into(),
                    ty: TsType::named("TVariables"),
                    optional: true,
                }],
            },
        };
        assert_eq!(
            def.emit(),
            "export interface IUseFetcherArgs<TVariables> {\n  variables?: TVariables;\n}\n"
        );

        let keys = TsTypeDef {
            name: "EQueryKey".into(),
            type_params: vec![],
            kind: TypeDefKind::Enum {
                members: vec![("TestQuery".into(), TsLiteral::String("testQuery".into()))],
            },
        };
        assert_eq!(
            keys.emit(),
            "export enum EQueryKey {\n  TestQuery = 'testQuery',\n}\n"
        );
    }

    #[test]
    fn test_emit_import() {
        let import = TsImport {
            default: None,
            items: vec![ImportItem::named("useQuery"), ImportItem::named("useMutation")],
            from: "@tanstack/react-query".into(),
            type_only: false,
        };
        assert_eq!(
            import.emit(),
            "import { useQuery, useMutation } from '@tanstack/react-query';"
        );
    }

    #[test]
    fn test_emit_default_and_type_import() {
        let import = TsImport {
            default: Some("fetchData".into()),
            items: vec![ImportItem {
                name: "Args".into(),
                alias: Some("FetchArgs".into()),
            }],
            from: "./fetcher".into(),
            type_only: false,
        };
        assert_eq!(
            import.emit(),
            "import fetchData, { Args as FetchArgs } from './fetcher';"
        );

        let type_import = TsImport {
            default: None,
            items: vec![ImportItem::named("UseQueryOptions")],
            from: "@tanstack/react-query".into(),
            type_only: true,
        };
        assert_eq!(
            type_import.emit(),
            "import type { UseQueryOptions } from '@tanstack/react-query';"
        );
    }

    #[test]
    fn test_emit_function() {
        let func = TsFunction {
            name: "fetcher".into(),
            type_params: vec![TsTypeParam::new("TData")],
            params: vec![TsParam::typed(
                "query",
                TsType::Primitive(TsPrimitive::String),
                false,
            )],
            return_type: None,
            body: vec![TsStmt::Return(None)],
            is_async: false,
            is_export: false,
        };
        assert_eq!(
            func.emit(),
            "function fetcher<TData>(query: string) {\n  return;\n}\n"
        );
    }
}
