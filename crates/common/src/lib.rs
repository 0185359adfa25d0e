//! Shared input models for hookgen.
//!
//! This crate contains the serde representation of the two files the
//! generator consumes: the user configuration and the operations list handed
//! over by the document traversal stage. Nothing here knows how hooks are
//! rendered; the main `hookgen` crate resolves these raw models into typed
//! engine configuration.

pub mod operations;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use operations::{OperationsDocument, RawOperation, RawOperationKind, load_operations};

/// Default module the query hooks are imported from.
pub const DEFAULT_REACT_QUERY_MODULE: &str = "@tanstack/react-query";

/// Default module the subscription primitive is imported from.
pub const DEFAULT_SUBSCRIPTION_MODULE: &str = "@apollo/client";

/// Default `TError` type for generated hooks.
pub const DEFAULT_ERROR_TYPE: &str = "unknown";

/// Errors raised while reading input files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid YAML for the expected shape.
    #[error("Failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_yaml::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("Failed to parse JSON in {}: {source}", path.display())]
    Json {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The file is not valid TOML for the expected shape.
    #[error("Failed to parse TOML in {}: {source}", path.display())]
    Toml {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// The extension is none of `.yml`, `.yaml`, `.json`, `.toml`.
    #[error("Unsupported file extension for {} (expected .yml, .yaml, .json or .toml)", path.display())]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
    },
}

/// Root configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Fetcher strategy selection. `None` means the default fetch strategy.
    #[serde(default)]
    pub fetcher: Option<RawFetcher>,
    /// `TError` of every generated hook.
    #[serde(default = "default_error_type")]
    pub error_type: String,
    /// Attach `useX.fetcher = ...` to query hooks.
    #[serde(default = "default_true")]
    pub expose_fetcher: bool,
    /// Attach `useX.getKey = ...` to query hooks.
    #[serde(default)]
    pub expose_query_keys: bool,
    /// Attach `useX.document = XDocument` to query hooks.
    #[serde(default)]
    pub expose_document: bool,
    /// Also render `useInfiniteX` for every query.
    #[serde(default)]
    pub add_infinite_query: bool,
    /// Emit type-only names through `import type`.
    #[serde(default)]
    pub use_type_imports: bool,
    /// Module the react-query primitives come from.
    #[serde(default = "default_react_query_module")]
    pub react_query_import_from: String,
    /// Module `useSubscription` comes from.
    #[serde(default = "default_subscription_module")]
    pub subscription_import_from: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            fetcher: None,
            error_type: default_error_type(),
            expose_fetcher: true,
            expose_query_keys: false,
            expose_document: false,
            add_infinite_query: false,
            use_type_imports: false,
            react_query_import_from: default_react_query_module(),
            subscription_import_from: default_subscription_module(),
        }
    }
}

/// The `fetcher` option.
///
/// Variant order matters: serde tries them top to bottom and the object
/// variants reject unknown fields so that each shape lands in exactly one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawFetcher {
    /// `"fetch"`, `"native"` or a mapper string such as `./fetcher#useFetchData`.
    Named(String),
    /// Single mapper function object.
    Custom(RawCustomFetcher),
    /// Default fetch with a custom endpoint.
    Fetch(RawFetchFetcher),
    /// Per-kind native hook factories.
    Native(RawNativeFetcher),
}

/// `{ func, isReactHook }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawCustomFetcher {
    /// Mapper string, `path#name` or a bare name.
    pub func: String,
    /// The mapped function is itself a react hook.
    #[serde(default)]
    pub is_react_hook: bool,
}

/// `{ endpoint, fetchParams }`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawFetchFetcher {
    /// URL the inline fetcher posts to.
    pub endpoint: String,
    /// Extra `RequestInit` entries. `headers` is merged into the defaults.
    #[serde(default)]
    pub fetch_params: Option<serde_json::Value>,
}

/// `{ queryFunc, queryAndQueryClientFunc, infiniteQueryFunc, mutationFunc,
/// isQueryAndQueryClient, isReactHook }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawNativeFetcher {
    /// Factory for `useX` query hooks.
    #[serde(default)]
    pub query_func: Option<String>,
    /// Factory for combined query and query client hooks.
    #[serde(default)]
    pub query_and_query_client_func: Option<String>,
    /// Factory for `useInfiniteX` hooks.
    #[serde(default)]
    pub infinite_query_func: Option<String>,
    /// Factory for mutation hooks.
    #[serde(default)]
    pub mutation_func: Option<String>,
    /// Route query hooks through `queryAndQueryClientFunc`.
    #[serde(default)]
    pub is_query_and_query_client: bool,
    /// Accepted for parity with the mapper shape. Factories are always hooks.
    #[serde(default)]
    pub is_react_hook: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_type() -> String {
    DEFAULT_ERROR_TYPE.to_string()
}

fn default_react_query_module() -> String {
    DEFAULT_REACT_QUERY_MODULE.to_string()
}

fn default_subscription_module() -> String {
    DEFAULT_SUBSCRIPTION_MODULE.to_string()
}

/// Read a configuration file. The format is picked from the extension.
pub fn load_config(path: &Path) -> Result<RawConfig, ConfigError> {
    parse_file(path)
}

/// Parse `contents` as YAML, JSON or TOML depending on the extension of `path`.
pub(crate) fn parse_str<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yml" | "yaml") => serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        Some("json") => serde_json::from_str(contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("toml") => toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub(crate) fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(path, &contents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn yaml(contents: &str) -> RawConfig {
        parse_str(Path::new("codegen.yml"), contents).unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = yaml("{}");
        assert_eq!(config, RawConfig::default());
        assert!(config.expose_fetcher);
        assert_eq!(config.error_type, "unknown");
    }

    #[test]
    fn test_fetcher_string() {
        let config = yaml("fetcher: ./lib/fetcher#useFetchData\n");
        assert_eq!(
            config.fetcher,
            Some(RawFetcher::Named("./lib/fetcher#useFetchData".into()))
        );
    }

    #[test]
    fn test_custom_fetcher_object() {
        let config = yaml("fetcher:\n  func: ./lib/fetcher#useFetchData\n  isReactHook: true\n");
        assert_eq!(
            config.fetcher,
            Some(RawFetcher::Custom(RawCustomFetcher {
                func: "./lib/fetcher#useFetchData".into(),
                is_react_hook: true,
            }))
        );
    }

    #[test]
    fn test_fetch_fetcher_object() {
        let config = yaml(
            "fetcher:\n  endpoint: http://localhost:4000/graphql\n  fetchParams:\n    credentials: include\n",
        );
        let Some(RawFetcher::Fetch(fetch)) = config.fetcher else {
            panic!("expected fetch fetcher, got {:?}", config.fetcher);
        };
        assert_eq!(fetch.endpoint, "http://localhost:4000/graphql");
        assert_eq!(
            fetch.fetch_params,
            Some(serde_json::json!({ "credentials": "include" }))
        );
    }

    #[test]
    fn test_native_fetcher_object() {
        let config = yaml(
            "fetcher:\n  queryFunc: ./hooks#createQueryHook\n  isQueryAndQueryClient: true\n",
        );
        let Some(RawFetcher::Native(native)) = config.fetcher else {
            panic!("expected native fetcher, got {:?}", config.fetcher);
        };
        assert_eq!(native.query_func.as_deref(), Some("./hooks#createQueryHook"));
        assert!(native.is_query_and_query_client);
        assert!(native.query_and_query_client_func.is_none());
    }

    #[test]
    fn test_native_fetcher_accepts_is_react_hook() {
        let config: RawConfig = parse_str(
            Path::new("codegen.json"),
            r#"{ "fetcher": { "queryFunc": "./h#createQueryHook", "mutationFunc": "./h#createMutationHook", "isReactHook": true } }"#,
        )
        .unwrap();
        let Some(RawFetcher::Native(native)) = config.fetcher else {
            panic!("expected native fetcher, got {:?}", config.fetcher);
        };
        assert!(native.is_react_hook);
        assert_eq!(native.query_func.as_deref(), Some("./h#createQueryHook"));
        assert_eq!(native.mutation_func.as_deref(), Some("./h#createMutationHook"));
    }

    #[test]
    fn test_json_and_toml_configs() {
        let json: RawConfig = parse_str(
            Path::new("codegen.json"),
            r#"{ "errorType": "Error", "exposeQueryKeys": true }"#,
        )
        .unwrap();
        assert_eq!(json.error_type, "Error");
        assert!(json.expose_query_keys);

        let toml: RawConfig = parse_str(
            Path::new("codegen.toml"),
            "addInfiniteQuery = true\n\n[fetcher]\nfunc = \"fetchData\"\n",
        )
        .unwrap();
        assert!(toml.add_infinite_query);
        assert!(matches!(toml.fetcher, Some(RawFetcher::Custom(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_str::<RawConfig>(Path::new("codegen.ini"), "").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
