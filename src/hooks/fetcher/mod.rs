//! Fetcher strategies.
//!
//! A strategy decides how each generated hook obtains its data. All of them
//! render through [`FetcherRenderer`]; the active one is picked once per run
//! from [`FetcherConfig`] and wrapped in [`FetcherStrategy`].
//!
//! ## Strategies
//!
//! - `fetch`: a local `fetcher` function posting to an endpoint
//! - `mapper`: a user function, plain or React-hook style
//! - `native`: pre-built hook factories called with the document and a key enum

mod fetch;
mod mapper;
mod native;
mod subscription;

pub use fetch::FetchFetcher;
pub use mapper::CustomMapperFetcher;
pub use native::{MUTATION_KEY_ENUM, NativeClientFetcher, QUERY_KEY_ENUM};

use super::config::{CodegenConfig, FetcherConfig};
use super::ir::{
    ArrowBody, ObjectProp, OperationDescriptor, TsArrow, TsExpr, TsImport, TsParam, TsStmt,
    TsType, TsTypeParam,
};
use super::usage::{HookMethod, UsageAccumulator};
use crate::error::Result;

/// Type shared by every mapper-style fetch function for its arguments.
pub const FETCHER_ARGS_TYPE: &str = "IUseFetcherArgs";

/// Settings every strategy renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub error_type: String,
    pub use_type_imports: bool,
}

impl From<&CodegenConfig> for RenderOptions {
    fn from(config: &CodegenConfig) -> Self {
        Self {
            error_type: config.error_type.clone(),
            use_type_imports: config.use_type_imports,
        }
    }
}

/// What a strategy contributes ahead of the hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetcherPrelude {
    /// Import statement for the fetch function(s).
    Import(TsImport),
    /// Code placed into the file body before the hooks.
    Inline(String),
}

/// Rendering contract shared by all strategies.
///
/// Hook renderers record every runtime identifier they reference into the
/// accumulator before returning.
pub trait FetcherRenderer {
    /// Imports or inline code that make the fetch function available.
    fn generate_fetcher_implementation(&self) -> Vec<FetcherPrelude>;

    fn generate_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String;

    fn generate_infinite_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String;

    fn generate_mutation_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String;

    /// Subscriptions bypass the fetch function for every strategy.
    fn generate_subscription_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        subscription::render_subscription_hook(op, usage)
    }

    /// `use<Name>.fetcher = ...`, or `None` when the strategy cannot call
    /// its fetch function outside a component.
    fn generate_fetcher_fetch(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> Option<String>;

    /// `use<Name>.getKey = ...`
    fn generate_get_key(&self, _op: &OperationDescriptor) -> Option<String> {
        None
    }

    /// Whether hooks reference `EQueryKey` / `EMutationKey`.
    fn needs_key_enums(&self) -> bool {
        false
    }
}

/// The closed set of strategies.
#[derive(Debug, Clone)]
pub enum FetcherStrategy {
    Fetch(FetchFetcher),
    CustomMapper(CustomMapperFetcher),
    NativeClient(Box<NativeClientFetcher>),
}

impl FetcherStrategy {
    /// Build the strategy selected by `config`. Mapper strings are parsed
    /// here, so a bad mapper fails before any hook is rendered.
    pub fn from_config(config: &CodegenConfig) -> Result<Self> {
        let options = RenderOptions::from(config);
        let strategy = match &config.fetcher {
            FetcherConfig::Fetch {
                endpoint,
                fetch_params,
            } => FetcherStrategy::Fetch(FetchFetcher::new(
                endpoint,
                fetch_params.clone(),
                options,
            )),
            FetcherConfig::CustomMapper {
                func,
                is_react_hook,
            } => FetcherStrategy::CustomMapper(CustomMapperFetcher::new(
                func,
                *is_react_hook,
                options,
            )?),
            FetcherConfig::NativeClient(native) => {
                FetcherStrategy::NativeClient(Box::new(NativeClientFetcher::new(native)?))
            }
        };
        Ok(strategy)
    }

    pub fn as_renderer(&self) -> &dyn FetcherRenderer {
        match self {
            FetcherStrategy::Fetch(fetcher) => fetcher,
            FetcherStrategy::CustomMapper(fetcher) => fetcher,
            FetcherStrategy::NativeClient(fetcher) => fetcher.as_ref(),
        }
    }
}

// =============================================================================
// Template pieces shared by the strategies
// =============================================================================

fn named(name: &str) -> TsType {
    TsType::named(name)
}

/// `IUseFetcherArgs<V>`
pub(crate) fn fetcher_args_type(op: &OperationDescriptor) -> TsType {
    TsType::generic(FETCHER_ARGS_TYPE, vec![named(&op.variables_type_name)])
}

/// `<TData = R, TError = E>`
pub(crate) fn query_type_params(op: &OperationDescriptor, error_type: &str) -> Vec<TsTypeParam> {
    vec![
        TsTypeParam::with_default("TData", named(&op.result_type_name)),
        TsTypeParam::with_default("TError", named(error_type)),
    ]
}

/// `<TError = E, TContext = unknown>`
pub(crate) fn mutation_type_params(error_type: &str) -> Vec<TsTypeParam> {
    vec![
        TsTypeParam::with_default("TError", named(error_type)),
        TsTypeParam::with_default("TContext", named("unknown")),
    ]
}

/// `options?: Partial<Options<type_args>>`
pub(crate) fn options_param(method: &HookMethod, type_args: Vec<TsType>) -> TsParam {
    TsParam::typed(
        "options",
        TsType::generic("Partial", vec![TsType::generic(method.options, type_args)]),
        true,
    )
}

/// `<R, TError, TData>`
pub(crate) fn query_type_args(op: &OperationDescriptor) -> Vec<TsType> {
    vec![
        named(&op.result_type_name),
        named("TError"),
        named("TData"),
    ]
}

/// `<R, TError, IUseFetcherArgs<V>, TContext>`
pub(crate) fn mutation_type_args(op: &OperationDescriptor) -> Vec<TsType> {
    vec![
        named(&op.result_type_name),
        named("TError"),
        fetcher_args_type(op),
        named("TContext"),
    ]
}

/// `hook<type_args>({ key_prop: key, fn_prop: query_fn, ...options })`
pub(crate) fn hook_call(
    method: &HookMethod,
    type_args: Vec<TsType>,
    props: Vec<(&str, TsExpr)>,
) -> TsExpr {
    let mut object: Vec<ObjectProp> = props
        .into_iter()
        .map(|(key, value)| ObjectProp::KeyValue(key.to_string(), value))
        .collect();
    object.push(ObjectProp::Spread(TsExpr::ident("options")));
    TsExpr::generic_call(
        TsExpr::ident(method.hook),
        type_args,
        vec![TsExpr::Object(object)],
    )
}

/// `export const name = <type_params>(params) => body;`
pub(crate) fn export_hook(
    name: &str,
    type_params: Vec<TsTypeParam>,
    params: Vec<TsParam>,
    body: ArrowBody,
) -> TsStmt {
    TsStmt::export_const(
        name,
        TsExpr::arrow(TsArrow {
            type_params,
            params,
            return_type: None,
            body,
            is_async: false,
        }),
    )
}

/// `RequestInit['headers']`
pub(crate) fn request_headers_type() -> TsType {
    TsType::Indexed {
        object: Box::new(named("RequestInit")),
        key: "headers".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::hooks::config::NativeClientConfig;
    use crate::hooks::ir::{Emit, OperationKind};

    fn with_fetcher(fetcher: FetcherConfig) -> CodegenConfig {
        CodegenConfig {
            fetcher,
            ..CodegenConfig::default()
        }
    }

    fn all_strategies() -> Vec<FetcherStrategy> {
        [
            FetcherConfig::default(),
            FetcherConfig::CustomMapper {
                func: "./lib/fetcher#fetchData".into(),
                is_react_hook: false,
            },
            FetcherConfig::CustomMapper {
                func: "useFetchData".into(),
                is_react_hook: true,
            },
            FetcherConfig::NativeClient(NativeClientConfig::default()),
        ]
        .into_iter()
        .map(|fetcher| FetcherStrategy::from_config(&with_fetcher(fetcher)).unwrap())
        .collect()
    }

    #[test]
    fn test_from_config_picks_strategy() {
        let strategies = all_strategies();
        assert!(matches!(strategies[0], FetcherStrategy::Fetch(_)));
        assert!(matches!(strategies[1], FetcherStrategy::CustomMapper(_)));
        assert!(matches!(strategies[2], FetcherStrategy::CustomMapper(_)));
        assert!(matches!(strategies[3], FetcherStrategy::NativeClient(_)));
        assert!(strategies[3].as_renderer().needs_key_enums());
        assert!(!strategies[0].as_renderer().needs_key_enums());
    }

    #[test]
    fn test_from_config_rejects_invalid_mapper() {
        let config = with_fetcher(FetcherConfig::CustomMapper {
            func: "#fetchData".into(),
            is_react_hook: false,
        });
        assert!(matches!(
            FetcherStrategy::from_config(&config),
            Err(Error::InvalidMapper { .. })
        ));
    }

    #[test]
    fn test_subscription_hook_is_strategy_independent() {
        let op = OperationDescriptor::new(OperationKind::Subscription, "testSubscription");
        let rendered: Vec<String> = all_strategies()
            .iter()
            .map(|strategy| {
                strategy
                    .as_renderer()
                    .generate_subscription_hook(&op, &mut UsageAccumulator::new())
            })
            .collect();
        assert!(rendered.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_options_param_shape() {
        let op = OperationDescriptor::new(OperationKind::Query, "testQuery");
        let param = options_param(&crate::hooks::usage::HookMethodMap::QUERY, query_type_args(&op));
        assert_eq!(
            param.emit(),
            "options?: Partial<UseQueryOptions<TestQuery, TError, TData>>"
        );
    }
}
