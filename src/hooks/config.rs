//! Resolved generator configuration.
//!
//! [`RawConfig`] mirrors the file on disk. This module turns it into the
//! typed configuration the engine runs on and rejects fetcher settings that
//! cannot produce a working file.

use hookgen_common::{
    DEFAULT_ERROR_TYPE, DEFAULT_REACT_QUERY_MODULE, DEFAULT_SUBSCRIPTION_MODULE, RawConfig,
    RawFetcher, RawNativeFetcher,
};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Endpoint the default fetch strategy posts to.
pub const DEFAULT_ENDPOINT: &str = "/graphql";

/// Query factory for `fetcher: native`.
pub const DEFAULT_QUERY_FUNC: &str = "createQueryHook";
/// Combined query and query client factory for `fetcher: native`.
pub const DEFAULT_QUERY_AND_QUERY_CLIENT_FUNC: &str = "createQueryAndQueryClientHook";
/// Infinite query factory for `fetcher: native`.
pub const DEFAULT_INFINITE_QUERY_FUNC: &str = "createInfiniteQueryHook";
/// Mutation factory for `fetcher: native`.
pub const DEFAULT_MUTATION_FUNC: &str = "createMutationHook";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenConfig {
    /// Strategy every hook is rendered with.
    pub fetcher: FetcherConfig,
    /// Default for the `TError` type parameter.
    pub error_type: String,
    /// Emit `use<Name>.fetcher`.
    pub expose_fetcher: bool,
    /// Emit `use<Name>.getKey`.
    pub expose_query_keys: bool,
    /// Emit `use<Name>.document`.
    pub expose_document: bool,
    /// Emit `useInfinite<Name>` for every query.
    pub add_infinite_query: bool,
    /// Import options types with `import type`.
    pub use_type_imports: bool,
    /// Module specifier for react-query imports.
    pub react_query_import_from: String,
    /// Module specifier for `useSubscription`.
    pub subscription_import_from: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            error_type: DEFAULT_ERROR_TYPE.to_string(),
            expose_fetcher: true,
            expose_query_keys: false,
            expose_document: false,
            add_infinite_query: false,
            use_type_imports: false,
            react_query_import_from: DEFAULT_REACT_QUERY_MODULE.to_string(),
            subscription_import_from: DEFAULT_SUBSCRIPTION_MODULE.to_string(),
        }
    }
}

/// Fetcher strategy selection.
#[derive(Debug, Clone, PartialEq)]
pub enum FetcherConfig {
    /// Local `fetch`-based fetcher emitted into the file.
    Fetch {
        /// URL the fetcher posts to.
        endpoint: String,
        /// Extra `RequestInit` entries, object-valued only.
        fetch_params: Option<serde_json::Map<String, serde_json::Value>>,
    },
    /// User function wrapped by every hook.
    CustomMapper {
        /// Mapper string.
        func: String,
        /// Call the mapper inside the hook body.
        is_react_hook: bool,
    },
    /// Pre-built hook factories.
    NativeClient(NativeClientConfig),
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig::Fetch {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fetch_params: None,
        }
    }
}

/// Factory names for the native client strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeClientConfig {
    /// Mapper string for the query factory.
    pub query_func: String,
    /// Mapper string for the combined factory. Required in combined mode.
    pub query_and_query_client_func: Option<String>,
    /// Mapper string for the infinite query factory.
    pub infinite_query_func: String,
    /// Mapper string for the mutation factory.
    pub mutation_func: String,
    /// Query hooks go through the combined factory.
    pub is_query_and_query_client: bool,
}

impl Default for NativeClientConfig {
    fn default() -> Self {
        Self {
            query_func: DEFAULT_QUERY_FUNC.to_string(),
            query_and_query_client_func: Some(DEFAULT_QUERY_AND_QUERY_CLIENT_FUNC.to_string()),
            infinite_query_func: DEFAULT_INFINITE_QUERY_FUNC.to_string(),
            mutation_func: DEFAULT_MUTATION_FUNC.to_string(),
            is_query_and_query_client: true,
        }
    }
}

impl NativeClientConfig {
    /// Fail when combined mode has no factory to call.
    pub fn validate(&self) -> Result<()> {
        if self.is_query_and_query_client && self.query_and_query_client_func.is_none() {
            return Err(Error::MissingFunction {
                option: "queryAndQueryClientFunc",
                context: "isQueryAndQueryClient is enabled",
            });
        }
        Ok(())
    }

    fn from_raw(raw: RawNativeFetcher) -> Result<Self> {
        if raw.is_react_hook {
            debug!("isReactHook has no effect on native factories");
        }
        let config = Self {
            query_func: raw
                .query_func
                .unwrap_or_else(|| DEFAULT_QUERY_FUNC.to_string()),
            query_and_query_client_func: raw.query_and_query_client_func,
            infinite_query_func: raw
                .infinite_query_func
                .unwrap_or_else(|| DEFAULT_INFINITE_QUERY_FUNC.to_string()),
            mutation_func: raw
                .mutation_func
                .unwrap_or_else(|| DEFAULT_MUTATION_FUNC.to_string()),
            is_query_and_query_client: raw.is_query_and_query_client,
        };
        config.validate()?;
        Ok(config)
    }
}

impl FetcherConfig {
    fn from_raw(raw: Option<RawFetcher>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(FetcherConfig::default());
        };

        match raw {
            RawFetcher::Named(name) => Ok(match name.trim() {
                "fetch" => FetcherConfig::default(),
                "native" => FetcherConfig::NativeClient(NativeClientConfig::default()),
                _ => FetcherConfig::CustomMapper {
                    func: name,
                    is_react_hook: false,
                },
            }),
            RawFetcher::Custom(custom) => Ok(FetcherConfig::CustomMapper {
                func: custom.func,
                is_react_hook: custom.is_react_hook,
            }),
            RawFetcher::Fetch(fetch) => {
                let fetch_params = match fetch.fetch_params {
                    Some(serde_json::Value::Object(map)) => Some(map),
                    Some(other) => {
                        warn!(value = %other, "fetchParams is not an object, ignoring");
                        None
                    }
                    None => None,
                };
                Ok(FetcherConfig::Fetch {
                    endpoint: fetch.endpoint,
                    fetch_params,
                })
            }
            RawFetcher::Native(native) => {
                NativeClientConfig::from_raw(native).map(FetcherConfig::NativeClient)
            }
        }
    }

    /// Short name used in logs.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            FetcherConfig::Fetch { .. } => "fetch",
            FetcherConfig::CustomMapper { .. } => "custom-mapper",
            FetcherConfig::NativeClient(_) => "native-client",
        }
    }
}

impl CodegenConfig {
    /// Resolve a raw configuration file.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let config = Self {
            fetcher: FetcherConfig::from_raw(raw.fetcher)?,
            error_type: raw.error_type,
            expose_fetcher: raw.expose_fetcher,
            expose_query_keys: raw.expose_query_keys,
            expose_document: raw.expose_document,
            add_infinite_query: raw.add_infinite_query,
            use_type_imports: raw.use_type_imports,
            react_query_import_from: raw.react_query_import_from,
            subscription_import_from: raw.subscription_import_from,
        };
        for option in config.ignored_options() {
            warn!(
                option,
                strategy = config.fetcher.strategy_name(),
                "option has no effect with this fetcher"
            );
        }
        Ok(config)
    }

    /// Options that are set but that the selected strategy never renders.
    pub(crate) fn ignored_options(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if matches!(self.fetcher, FetcherConfig::NativeClient(_)) && self.expose_query_keys {
            ignored.push("exposeQueryKeys");
        }
        ignored
    }
}
