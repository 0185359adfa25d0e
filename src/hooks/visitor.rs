//! The rendering pass.
//!
//! Operations are visited once, in document order. Each visit renders every
//! hook its kind calls for, records runtime usage and remembers which keys
//! the key enums must list.

use tracing::debug;

use super::config::CodegenConfig;
use super::fetcher::FetcherRenderer;
use super::ir::{Emit, OperationDescriptor, OperationKind, TsExpr, TsStmt};
use super::usage::{UsageAccumulator, UsageSummary};

/// Operation names that need a key enum member, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyRegistry {
    queries: Vec<String>,
    mutations: Vec<String>,
}

impl KeyRegistry {
    fn register(names: &mut Vec<String>, name: &str) {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn mutations(&self) -> &[String] {
        &self.mutations
    }
}

/// Everything the emitter needs from the pass.
#[derive(Debug)]
pub struct VisitOutput {
    /// One fragment per operation, in document order.
    pub fragments: Vec<String>,
    pub usage: UsageSummary,
    pub keys: KeyRegistry,
}

pub struct HookVisitor<'a> {
    config: &'a CodegenConfig,
    renderer: &'a dyn FetcherRenderer,
    usage: UsageAccumulator,
    fragments: Vec<String>,
    keys: KeyRegistry,
}

impl std::fmt::Debug for HookVisitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookVisitor")
            .field("usage", &self.usage)
            .field("fragments", &self.fragments.len())
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl<'a> HookVisitor<'a> {
    pub fn new(config: &'a CodegenConfig, renderer: &'a dyn FetcherRenderer) -> Self {
        Self {
            config,
            renderer,
            usage: UsageAccumulator::new(),
            fragments: Vec::new(),
            keys: KeyRegistry::default(),
        }
    }

    pub fn visit(&mut self, op: &OperationDescriptor) {
        debug!(operation = %op.name, kind = ?op.kind, "rendering hooks");

        let parts = match op.kind {
            OperationKind::Query => self.visit_query(op),
            OperationKind::Mutation => self.visit_mutation(op),
            OperationKind::Subscription => {
                vec![self.renderer.generate_subscription_hook(op, &mut self.usage)]
            }
        };
        self.fragments.push(parts.concat());
    }

    fn visit_query(&mut self, op: &OperationDescriptor) -> Vec<String> {
        KeyRegistry::register(&mut self.keys.queries, &op.name);

        let mut parts = vec![self.renderer.generate_query_hook(op, &mut self.usage)];
        if self.config.add_infinite_query {
            parts.push(
                self.renderer
                    .generate_infinite_query_hook(op, &mut self.usage),
            );
        }
        if self.config.expose_document {
            parts.push(document_accessor(op));
        }
        if self.config.expose_query_keys {
            parts.extend(self.renderer.generate_get_key(op));
        }
        if self.config.expose_fetcher {
            parts.extend(self.renderer.generate_fetcher_fetch(op, &mut self.usage));
        }
        parts
    }

    fn visit_mutation(&mut self, op: &OperationDescriptor) -> Vec<String> {
        KeyRegistry::register(&mut self.keys.mutations, &op.name);

        let mut parts = vec![self.renderer.generate_mutation_hook(op, &mut self.usage)];
        if self.config.expose_document {
            parts.push(document_accessor(op));
        }
        if self.config.expose_fetcher {
            parts.extend(self.renderer.generate_fetcher_fetch(op, &mut self.usage));
        }
        parts
    }

    pub fn finish(self) -> VisitOutput {
        VisitOutput {
            fragments: self.fragments,
            usage: self.usage.finish(),
            keys: self.keys,
        }
    }
}

/// `use<Name>.document = Doc;`
fn document_accessor(op: &OperationDescriptor) -> String {
    TsStmt::Expr(TsExpr::assign(
        TsExpr::member(TsExpr::ident(op.hook_name()), "document"),
        TsExpr::ident(&op.document_variable_name),
    ))
    .emit()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::hooks::config::{FetcherConfig, NativeClientConfig};
    use crate::hooks::fetcher::FetcherStrategy;
    use crate::hooks::usage::RuntimeModule;

    fn run(config: &CodegenConfig, ops: &[OperationDescriptor]) -> VisitOutput {
        let strategy = FetcherStrategy::from_config(config).unwrap();
        let mut visitor = HookVisitor::new(config, strategy.as_renderer());
        for op in ops {
            visitor.visit(op);
        }
        visitor.finish()
    }

    #[test]
    fn test_query_with_all_extras() {
        let config = CodegenConfig {
            expose_document: true,
            expose_query_keys: true,
            add_infinite_query: true,
            ..CodegenConfig::default()
        };
        let op = OperationDescriptor::new(OperationKind::Query, "testQuery");
        let output = run(&config, &[op]);

        assert_eq!(output.fragments.len(), 1);
        let fragment = &output.fragments[0];
        let hook = fragment.find("export const useTestQuery =").unwrap();
        let infinite = fragment.find("export const useInfiniteTestQuery =").unwrap();
        let document = fragment.find("useTestQuery.document = TestQueryDocument;").unwrap();
        let key = fragment.find("useTestQuery.getKey = ").unwrap();
        let fetcher = fragment.find("useTestQuery.fetcher = ").unwrap();
        assert!(hook < infinite && infinite < document && document < key && key < fetcher);

        assert_eq!(
            output.usage.values(RuntimeModule::ReactQuery).collect::<Vec<_>>(),
            vec!["useInfiniteQuery", "useQuery"]
        );
        assert_eq!(output.keys.queries(), ["testQuery"]);
    }

    #[test]
    fn test_expose_fetcher_off() {
        let config = CodegenConfig {
            expose_fetcher: false,
            ..CodegenConfig::default()
        };
        let op = OperationDescriptor::new(OperationKind::Mutation, "createUser");
        let output = run(&config, &[op]);
        assert!(!output.fragments[0].contains(".fetcher"));
        assert_eq!(output.keys.mutations(), ["createUser"]);
    }

    #[test]
    fn test_subscription_only_document_does_not_use_fetcher() {
        let op = OperationDescriptor::new(OperationKind::Subscription, "testSubscription");
        let output = run(&CodegenConfig::default(), &[op]);
        assert!(!output.usage.fetcher_in_use());
        assert!(output.keys.queries().is_empty());
        assert!(output.fragments[0].contains(
            "useSubscription<TestSubscription, TestSubscriptionVariables>(gql(TestSubscriptionDocument), args)"
        ));
    }

    #[test]
    fn test_keys_are_deduplicated_in_document_order() {
        let config = CodegenConfig {
            fetcher: FetcherConfig::NativeClient(NativeClientConfig::default()),
            ..CodegenConfig::default()
        };
        let ops = [
            OperationDescriptor::new(OperationKind::Query, "b"),
            OperationDescriptor::new(OperationKind::Query, "a"),
            OperationDescriptor::new(OperationKind::Query, "b"),
        ];
        let output = run(&config, &ops);
        assert_eq!(output.keys.queries(), ["b", "a"]);
        assert_eq!(output.fragments.len(), 3);
    }

    #[test]
    fn test_every_referenced_hook_is_recorded() {
        let config = CodegenConfig {
            add_infinite_query: true,
            ..CodegenConfig::default()
        };
        let ops = [
            OperationDescriptor::new(OperationKind::Query, "list"),
            OperationDescriptor::new(OperationKind::Mutation, "save"),
            OperationDescriptor::new(OperationKind::Subscription, "watch"),
        ];
        let output = run(&config, &ops);
        let content = output.fragments.concat();
        for ident in [
            "useQuery",
            "useInfiniteQuery",
            "useMutation",
            "useSubscription",
            "gql",
            "UseQueryOptions",
            "UseInfiniteQueryOptions",
            "UseMutationOptions",
            "SubscriptionHookOptions",
        ] {
            assert!(content.contains(ident), "{ident} not rendered");
            assert!(output.usage.contains(ident), "{ident} not recorded");
        }
    }
}
