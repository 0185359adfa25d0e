//! Custom function mapper strategy.
//!
//! Every hook delegates to one user function with the signature
//! `fn<TData, TArgs>(document, args?, headers?) => () => Promise<TData>`.
//! With `isReactHook` the function is itself a React hook returning the
//! fetch function, so it is called in hook position and never from
//! `use<Name>.fetcher`.

use super::{
    FETCHER_ARGS_TYPE, FetcherPrelude, FetcherRenderer, RenderOptions, export_hook,
    fetcher_args_type, hook_call, mutation_type_args, mutation_type_params, options_param,
    query_type_args, query_type_params, request_headers_type,
};
use crate::error::Result;
use crate::hooks::ir::{
    ArrowBody, BinOp, Emit, ImportItem, ObjectProp, OperationDescriptor, TsArrow, TsExpr,
    TsImport, TsLiteral, TsParam, TsStmt, TsType,
};
use crate::hooks::keys::{ARGS_PARAM, args_variables, infinite_query_key, mutation_key, query_key};
use crate::hooks::mapper::{ParsedMapper, build_mapper_import, parse_mapper};
use crate::hooks::usage::{HookMethodMap, UsageAccumulator};

#[derive(Debug, Clone)]
pub struct CustomMapperFetcher {
    mapper: ParsedMapper,
    is_react_hook: bool,
    options: RenderOptions,
}

impl CustomMapperFetcher {
    pub fn new(func: &str, is_react_hook: bool, options: RenderOptions) -> Result<Self> {
        Ok(Self {
            mapper: parse_mapper(func)?,
            is_react_hook,
            options,
        })
    }

    /// Wrap a function defined in the generated file itself.
    pub(crate) fn local(mapper: ParsedMapper, options: RenderOptions) -> Self {
        Self {
            mapper,
            is_react_hook: false,
            options,
        }
    }

    /// `fn<R, IUseFetcherArgs<V>>(args...)`
    fn typed_call(&self, op: &OperationDescriptor, args: Vec<TsExpr>) -> TsExpr {
        TsExpr::generic_call(
            TsExpr::ident(self.mapper.type_name()),
            vec![TsType::named(&op.result_type_name), fetcher_args_type(op)],
            args,
        )
    }

    fn document(op: &OperationDescriptor) -> TsExpr {
        TsExpr::ident(&op.document_variable_name)
    }

    fn args_param(op: &OperationDescriptor) -> TsParam {
        TsParam::typed(ARGS_PARAM, fetcher_args_type(op), !op.has_required_variables)
    }

    /// `{ ...args, variables: { ...args?.variables, ...(metaData.pageParam ?? {}) } }`
    fn paged_args(op: &OperationDescriptor) -> TsExpr {
        let page_param = TsExpr::Paren(Box::new(TsExpr::BinOp {
            left: Box::new(TsExpr::member(TsExpr::ident("metaData"), "pageParam")),
            op: BinOp::NullishCoalesce,
            right: Box::new(TsExpr::Object(vec![])),
        }));
        TsExpr::Object(vec![
            ObjectProp::Spread(TsExpr::ident(ARGS_PARAM)),
            ObjectProp::KeyValue(
                "variables".to_string(),
                TsExpr::Object(vec![
                    ObjectProp::Spread(args_variables(op.has_required_variables)),
                    ObjectProp::Spread(page_param),
                ]),
            ),
        ])
    }
}

impl FetcherRenderer for CustomMapperFetcher {
    fn generate_fetcher_implementation(&self) -> Vec<FetcherPrelude> {
        let Some(source) = self.mapper.source() else {
            return vec![];
        };

        if !self.options.use_type_imports {
            return vec![FetcherPrelude::Import(build_mapper_import(
                source,
                [&self.mapper],
                &[FETCHER_ARGS_TYPE],
                false,
            ))];
        }

        vec![
            FetcherPrelude::Import(build_mapper_import(source, [&self.mapper], &[], false)),
            FetcherPrelude::Import(TsImport {
                default: None,
                items: vec![ImportItem::named(FETCHER_ARGS_TYPE)],
                from: source.to_string(),
                type_only: true,
            }),
        ]
    }

    fn generate_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        let method = HookMethodMap::QUERY;
        usage.record(&method);
        usage.mark_fetcher_used();

        let query_fn = if self.is_react_hook {
            TsExpr::call(
                TsExpr::member(self.typed_call(op, vec![Self::document(op)]), "bind"),
                vec![TsExpr::Literal(TsLiteral::Null), TsExpr::ident(ARGS_PARAM)],
            )
        } else {
            self.typed_call(op, vec![Self::document(op), TsExpr::ident(ARGS_PARAM)])
        };

        let body = hook_call(
            &method,
            query_type_args(op),
            vec![("queryKey", query_key(op)), ("queryFn", query_fn)],
        );

        export_hook(
            &op.hook_name(),
            query_type_params(op, &self.options.error_type),
            vec![
                Self::args_param(op),
                options_param(&method, query_type_args(op)),
            ],
            ArrowBody::Expr(Box::new(body)),
        )
        .emit()
    }

    fn generate_infinite_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        let method = HookMethodMap::INFINITE_QUERY;
        usage.record(&method);
        usage.mark_fetcher_used();

        let meta = vec![TsParam::untyped("metaData")];
        let (setup, query_fn) = if self.is_react_hook {
            let setup = TsStmt::local_const("query", self.typed_call(op, vec![Self::document(op)]));
            let query_fn = TsArrow::expr(
                meta,
                TsExpr::call(TsExpr::ident("query"), vec![Self::paged_args(op)]),
            );
            (Some(setup), query_fn)
        } else {
            let fetch = self.typed_call(op, vec![Self::document(op), Self::paged_args(op)]);
            (None, TsArrow::expr(meta, TsExpr::call(fetch, vec![])))
        };

        let call = hook_call(
            &method,
            query_type_args(op),
            vec![
                ("queryKey", infinite_query_key(op)),
                ("queryFn", TsExpr::arrow(query_fn)),
            ],
        );

        let body = match setup {
            Some(setup) => ArrowBody::Block(vec![setup, TsStmt::Return(Some(call))]),
            None => ArrowBody::Expr(Box::new(call)),
        };

        let page_param_key = TsParam::typed(
            "pageParamKey",
            TsType::KeyOf(Box::new(TsType::named(&op.variables_type_name))),
            false,
        );

        export_hook(
            &op.infinite_hook_name(),
            query_type_params(op, &self.options.error_type),
            vec![
                page_param_key,
                Self::args_param(op),
                options_param(&method, query_type_args(op)),
            ],
            body,
        )
        .emit()
    }

    fn generate_mutation_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        let method = HookMethodMap::MUTATION;
        usage.record(&method);
        usage.mark_fetcher_used();

        let mutation_fn = if self.is_react_hook {
            self.typed_call(op, vec![Self::document(op)])
        } else {
            let fetch = self.typed_call(op, vec![Self::document(op), TsExpr::ident("variables")]);
            TsExpr::arrow(TsArrow::expr(
                vec![TsParam::typed("variables", fetcher_args_type(op), true)],
                TsExpr::call(fetch, vec![]),
            ))
        };

        let body = hook_call(
            &method,
            mutation_type_args(op),
            vec![("mutationKey", mutation_key(op)), ("mutationFn", mutation_fn)],
        );

        export_hook(
            &op.hook_name(),
            mutation_type_params(&self.options.error_type),
            vec![options_param(&method, mutation_type_args(op))],
            ArrowBody::Expr(Box::new(body)),
        )
        .emit()
    }

    fn generate_fetcher_fetch(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> Option<String> {
        // hooks cannot run outside a component
        if self.is_react_hook {
            return None;
        }
        usage.mark_fetcher_used();

        let fetch = TsArrow::expr(
            vec![
                Self::args_param(op),
                TsParam::typed("headers", request_headers_type(), true),
            ],
            self.typed_call(
                op,
                vec![
                    Self::document(op),
                    TsExpr::ident(ARGS_PARAM),
                    TsExpr::ident("headers"),
                ],
            ),
        );

        let stmt = TsStmt::Expr(TsExpr::assign(
            TsExpr::member(TsExpr::ident(op.hook_name()), "fetcher"),
            TsExpr::arrow(fetch),
        ));
        Some(stmt.emit())
    }

    fn generate_get_key(&self, op: &OperationDescriptor) -> Option<String> {
        let get_key = TsArrow::expr(vec![Self::args_param(op)], query_key(op));
        let stmt = TsStmt::Expr(TsExpr::assign(
            TsExpr::member(TsExpr::ident(op.hook_name()), "getKey"),
            TsExpr::arrow(get_key),
        ));
        Some(stmt.emit())
    }
}
