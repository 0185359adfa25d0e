//! Runtime identifiers used by the rendered hooks.
//!
//! Strategies record every runtime hook and options type they reference
//! while rendering. The emitter reads the frozen [`UsageSummary`] afterwards
//! to decide which imports the generated file needs.

use std::collections::{BTreeMap, BTreeSet};

/// Module a runtime identifier is imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeModule {
    /// `@tanstack/react-query` (configurable)
    ReactQuery,
    /// `@apollo/client` (configurable)
    Subscription,
}

/// A runtime hook together with its options type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookMethod {
    pub hook: &'static str,
    pub options: &'static str,
    /// Extra value the hook call needs (e.g. `gql`)
    pub helper: Option<&'static str>,
    pub module: RuntimeModule,
}

/// The fixed hook set the strategies render against.
#[derive(Debug)]
pub struct HookMethodMap;

impl HookMethodMap {
    pub const QUERY: HookMethod = HookMethod {
        hook: "useQuery",
        options: "UseQueryOptions",
        helper: None,
        module: RuntimeModule::ReactQuery,
    };

    pub const INFINITE_QUERY: HookMethod = HookMethod {
        hook: "useInfiniteQuery",
        options: "UseInfiniteQueryOptions",
        helper: None,
        module: RuntimeModule::ReactQuery,
    };

    pub const MUTATION: HookMethod = HookMethod {
        hook: "useMutation",
        options: "UseMutationOptions",
        helper: None,
        module: RuntimeModule::ReactQuery,
    };

    pub const SUBSCRIPTION: HookMethod = HookMethod {
        hook: "useSubscription",
        options: "SubscriptionHookOptions",
        helper: Some("gql"),
        module: RuntimeModule::Subscription,
    };
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ModuleUsage {
    values: BTreeSet<&'static str>,
    types: BTreeSet<&'static str>,
}

/// Identifiers recorded during the rendering pass.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    modules: BTreeMap<RuntimeModule, ModuleUsage>,
    fetcher_in_use: bool,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hook, its options type and helper.
    pub fn record(&mut self, method: &HookMethod) {
        let usage = self.modules.entry(method.module).or_default();
        usage.values.insert(method.hook);
        usage.types.insert(method.options);
        if let Some(helper) = method.helper {
            usage.values.insert(helper);
        }
    }

    /// Record that a fragment calls the strategy's fetch function.
    pub fn mark_fetcher_used(&mut self) {
        self.fetcher_in_use = true;
    }

    /// End the pass. The summary can no longer be written to.
    pub fn finish(self) -> UsageSummary {
        UsageSummary {
            modules: self.modules,
            fetcher_in_use: self.fetcher_in_use,
        }
    }
}

/// Read-only view of the accumulator after the pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UsageSummary {
    modules: BTreeMap<RuntimeModule, ModuleUsage>,
    fetcher_in_use: bool,
}

impl UsageSummary {
    /// Hooks and helpers imported as values, sorted.
    pub fn values(&self, module: RuntimeModule) -> impl Iterator<Item = &'static str> + '_ {
        self.modules
            .get(&module)
            .into_iter()
            .flat_map(|usage| usage.values.iter().copied())
    }

    /// Options types, sorted.
    pub fn types(&self, module: RuntimeModule) -> impl Iterator<Item = &'static str> + '_ {
        self.modules
            .get(&module)
            .into_iter()
            .flat_map(|usage| usage.types.iter().copied())
    }

    #[cfg(test)]
    pub fn contains(&self, ident: &str) -> bool {
        self.modules
            .values()
            .any(|usage| usage.values.contains(ident) || usage.types.contains(ident))
    }

    pub fn fetcher_in_use(&self) -> bool {
        self.fetcher_in_use
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_groups_by_module() {
        let mut usage = UsageAccumulator::new();
        usage.record(&HookMethodMap::QUERY);
        usage.record(&HookMethodMap::MUTATION);
        usage.record(&HookMethodMap::QUERY);
        usage.record(&HookMethodMap::SUBSCRIPTION);
        let summary = usage.finish();

        assert_eq!(
            summary.values(RuntimeModule::ReactQuery).collect::<Vec<_>>(),
            vec!["useMutation", "useQuery"]
        );
        assert_eq!(
            summary.types(RuntimeModule::ReactQuery).collect::<Vec<_>>(),
            vec!["UseMutationOptions", "UseQueryOptions"]
        );
        assert_eq!(
            summary.values(RuntimeModule::Subscription).collect::<Vec<_>>(),
            vec!["gql", "useSubscription"]
        );
        assert!(summary.contains("SubscriptionHookOptions"));
        assert!(!summary.fetcher_in_use());
    }

    #[test]
    fn test_empty_summary() {
        let summary = UsageAccumulator::new().finish();
        assert_eq!(summary.values(RuntimeModule::ReactQuery).count(), 0);
        assert!(!summary.contains("useQuery"));
    }

    #[test]
    fn test_fetcher_flag() {
        let mut usage = UsageAccumulator::new();
        usage.mark_fetcher_used();
        assert!(usage.finish().fetcher_in_use());
    }
}
