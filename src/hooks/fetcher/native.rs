//! Native client hook strategy.
//!
//! Hooks are not written out; each one is produced by a pre-built factory
//! that receives the document and a key from the `EQueryKey` /
//! `EMutationKey` enums emitted alongside the hooks.

use super::{FetcherPrelude, FetcherRenderer};
use crate::error::Result;
use crate::hooks::config::NativeClientConfig;
use crate::hooks::ir::{
    Emit, OperationDescriptor, TsBinding, TsExpr, TsStmt, TsType, VarKind,
};
use crate::hooks::mapper::{ParsedMapper, build_mapper_import, parse_mapper};
use crate::hooks::usage::{HookMethodMap, UsageAccumulator};

/// Enum holding one member per keyed query.
pub const QUERY_KEY_ENUM: &str = "EQueryKey";

/// Enum holding one member per keyed mutation.
pub const MUTATION_KEY_ENUM: &str = "EMutationKey";

#[derive(Debug, Clone)]
pub struct NativeClientFetcher {
    query: ParsedMapper,
    query_and_query_client: Option<ParsedMapper>,
    infinite_query: ParsedMapper,
    mutation: ParsedMapper,
}

impl NativeClientFetcher {
    pub fn new(config: &NativeClientConfig) -> Result<Self> {
        config.validate()?;

        let query_and_query_client = match &config.query_and_query_client_func {
            Some(func) if config.is_query_and_query_client => Some(parse_mapper(func)?),
            _ => None,
        };

        Ok(Self {
            query: parse_mapper(&config.query_func)?,
            query_and_query_client,
            infinite_query: parse_mapper(&config.infinite_query_func)?,
            mutation: parse_mapper(&config.mutation_func)?,
        })
    }

    fn mappers(&self) -> impl Iterator<Item = &ParsedMapper> {
        [&self.query]
            .into_iter()
            .chain(self.query_and_query_client.as_ref())
            .chain([&self.infinite_query, &self.mutation])
    }

    /// `factory<R, V>(Doc, EKey.Name)`
    fn factory_call(factory: &ParsedMapper, op: &OperationDescriptor, key_enum: &str) -> TsExpr {
        TsExpr::generic_call(
            TsExpr::ident(factory.type_name()),
            vec![
                TsType::named(&op.result_type_name),
                TsType::named(&op.variables_type_name),
            ],
            vec![
                TsExpr::ident(&op.document_variable_name),
                TsExpr::member(TsExpr::ident(key_enum), op.pascal_name()),
            ],
        )
    }
}

impl FetcherRenderer for NativeClientFetcher {
    fn generate_fetcher_implementation(&self) -> Vec<FetcherPrelude> {
        let mut sources: Vec<&str> = Vec::new();
        for source in self.mappers().filter_map(ParsedMapper::source) {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        sources
            .into_iter()
            .map(|source| {
                FetcherPrelude::Import(build_mapper_import(source, self.mappers(), &[], false))
            })
            .collect()
    }

    fn generate_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        usage.record(&HookMethodMap::QUERY);
        usage.mark_fetcher_used();

        let stmt = match &self.query_and_query_client {
            Some(factory) => TsStmt::Export(Box::new(TsStmt::VarDecl {
                kind: VarKind::Const,
                binding: TsBinding::Object(vec![
                    ("useQuery".to_string(), op.hook_name()),
                    ("useQueryClient".to_string(), op.client_hook_name()),
                ]),
                ty: None,
                init: Self::factory_call(factory, op, QUERY_KEY_ENUM),
            })),
            None => TsStmt::export_const(
                op.hook_name(),
                Self::factory_call(&self.query, op, QUERY_KEY_ENUM),
            ),
        };
        stmt.emit()
    }

    fn generate_infinite_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        usage.record(&HookMethodMap::INFINITE_QUERY);
        usage.mark_fetcher_used();

        TsStmt::export_const(
            op.infinite_hook_name(),
            Self::factory_call(&self.infinite_query, op, QUERY_KEY_ENUM),
        )
        .emit()
    }

    fn generate_mutation_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        usage.record(&HookMethodMap::MUTATION);
        usage.mark_fetcher_used();

        TsStmt::export_const(
            op.hook_name(),
            Self::factory_call(&self.mutation, op, MUTATION_KEY_ENUM),
        )
        .emit()
    }

    /// Factories return hooks, which cannot be called outside a component.
    fn generate_fetcher_fetch(
        &self,
        _op: &OperationDescriptor,
        _usage: &mut UsageAccumulator,
    ) -> Option<String> {
        None
    }

    fn needs_key_enums(&self) -> bool {
        true
    }
}
