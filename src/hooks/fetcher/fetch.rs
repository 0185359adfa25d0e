//! Default fetch strategy.
//!
//! Emits a local `fetcher` function into the generated file and renders the
//! hooks exactly like a plain (non-hook) mapper pointing at it.

use serde_json::{Map, Value};
use tracing::warn;

use super::{
    CustomMapperFetcher, FETCHER_ARGS_TYPE, FetcherPrelude, FetcherRenderer, RenderOptions,
    request_headers_type,
};
use crate::hooks::ir::{
    ArrowBody, Emit, ObjectProp, OperationDescriptor, TsArrow, TsExpr, TsFunction, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TsTypeParam, TypeDefKind,
};
use crate::hooks::mapper::ParsedMapper;
use crate::hooks::usage::UsageAccumulator;

/// Name of the emitted fetch function.
const FETCHER_FN: &str = "fetcher";

/// Endpoints starting with this prefix are emitted as expressions.
const ENV_PREFIX: &str = "process.env.";

/// Strategy that inlines a `fetch` call into the generated file.
#[derive(Debug, Clone)]
pub struct FetchFetcher {
    inner: CustomMapperFetcher,
    endpoint: String,
    fetch_params: Option<Map<String, Value>>,
}

impl FetchFetcher {
    /// `fetch_params` entries are added to the `RequestInit` object.
    pub fn new(
        endpoint: &str,
        fetch_params: Option<Map<String, Value>>,
        options: RenderOptions,
    ) -> Self {
        let mapper = ParsedMapper::Internal {
            type_name: FETCHER_FN.to_string(),
        };
        Self {
            inner: CustomMapperFetcher::local(mapper, options),
            endpoint: endpoint.to_string(),
            fetch_params,
        }
    }

    fn endpoint_expr(&self) -> TsExpr {
        if self.endpoint.starts_with(ENV_PREFIX) {
            TsExpr::Raw(self.endpoint.clone())
        } else {
            TsExpr::string(self.endpoint.as_str())
        }
    }

    /// `export interface IUseFetcherArgs<TVariables> { ... }`
    fn args_interface() -> TsTypeDef {
        TsTypeDef {
            name: FETCHER_ARGS_TYPE.to_string(),
            type_params: vec![TsTypeParam::new("TVariables")],
            kind: TypeDefKind::Interface {
                properties: vec![
                    TsProp {
                        name: "variables".to_string(),
                        ty: TsType::named("TVariables"),
                        optional: true,
                    },
                    TsProp {
                        name: "headers".to_string(),
                        ty: request_headers_type(),
                        optional: true,
                    },
                ],
            },
        }
    }

    /// Init object passed to `fetch`.
    fn request_init(&self) -> TsExpr {
        let mut props = vec![ObjectProp::KeyValue(
            "method".to_string(),
            TsExpr::string("POST"),
        )];
        let mut headers = vec![ObjectProp::KeyValue(
            "Content-Type".to_string(),
            TsExpr::string("application/json"),
        )];

        for (key, value) in self.fetch_params.iter().flatten() {
            match key.as_str() {
                "headers" => headers.push(ObjectProp::Spread(TsExpr::Raw(value.to_string()))),
                "body" => warn!("fetchParams.body is ignored, the fetcher sends the operation"),
                _ => set_prop(&mut props, key, TsExpr::Raw(value.to_string())),
            }
        }

        headers.push(ObjectProp::Spread(TsExpr::optional_member(
            TsExpr::ident("args"),
            "headers",
        )));
        headers.push(ObjectProp::Spread(TsExpr::ident("headers")));
        props.push(ObjectProp::KeyValue(
            "headers".to_string(),
            TsExpr::Object(headers),
        ));

        let payload = TsExpr::Object(vec![
            ObjectProp::KeyValue("query".to_string(), TsExpr::ident("query")),
            ObjectProp::KeyValue(
                "variables".to_string(),
                TsExpr::optional_member(TsExpr::ident("args"), "variables"),
            ),
        ]);
        props.push(ObjectProp::KeyValue(
            "body".to_string(),
            TsExpr::call(
                TsExpr::member(TsExpr::ident("JSON"), "stringify"),
                vec![payload],
            ),
        ));

        TsExpr::Object(props)
    }

    /// `function fetcher<TData, TArgs extends IUseFetcherArgs<unknown>>(...)`
    fn fetcher_function(&self) -> TsFunction {
        let request = TsStmt::local_const(
            "res",
            TsExpr::Await(Box::new(TsExpr::call(
                TsExpr::ident("fetch"),
                vec![self.endpoint_expr(), self.request_init()],
            ))),
        );
        let parse = TsStmt::local_const(
            "json",
            TsExpr::Await(Box::new(TsExpr::call(
                TsExpr::member(TsExpr::ident("res"), "json"),
                vec![],
            ))),
        );
        let check = TsStmt::If {
            cond: TsExpr::member(TsExpr::ident("json"), "errors"),
            then_body: vec![TsStmt::Throw(TsExpr::Raw(
                "new Error(json.errors[0]?.message ?? 'GraphQL error')".to_string(),
            ))],
        };
        let data = TsStmt::Return(Some(TsExpr::member(TsExpr::ident("json"), "data")));

        let request_fn = TsArrow {
            type_params: vec![],
            params: vec![],
            return_type: Some(TsType::generic("Promise", vec![TsType::named("TData")])),
            body: ArrowBody::Block(vec![request, parse, check, data]),
            is_async: true,
        };

        TsFunction {
            name: FETCHER_FN.to_string(),
            type_params: vec![
                TsTypeParam::new("TData"),
                TsTypeParam {
                    name: "TArgs".to_string(),
                    constraint: Some(TsType::generic(
                        FETCHER_ARGS_TYPE,
                        vec![TsType::Primitive(TsPrimitive::Unknown)],
                    )),
                    default: None,
                },
            ],
            params: vec![
                TsParam::typed("query", TsType::Primitive(TsPrimitive::String), false),
                TsParam::typed("args", TsType::named("TArgs"), true),
                TsParam::typed("headers", request_headers_type(), true),
            ],
            return_type: None,
            body: vec![TsStmt::Return(Some(TsExpr::arrow(request_fn)))],
            is_async: false,
            is_export: false,
        }
    }
}

/// Replace the value of an existing `key` or append a new entry.
fn set_prop(props: &mut Vec<ObjectProp>, key: &str, value: TsExpr) {
    let existing = props.iter_mut().find_map(|prop| match prop {
        ObjectProp::KeyValue(name, slot) if name == key => Some(slot),
        _ => None,
    });
    match existing {
        Some(slot) => *slot = value,
        None => props.push(ObjectProp::KeyValue(key.to_string(), value)),
    }
}

impl FetcherRenderer for FetchFetcher {
    fn generate_fetcher_implementation(&self) -> Vec<FetcherPrelude> {
        let code = format!(
            "{}\n{}",
            Self::args_interface().emit(),
            self.fetcher_function().emit()
        );
        vec![FetcherPrelude::Inline(code)]
    }

    fn generate_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        self.inner.generate_query_hook(op, usage)
    }

    fn generate_infinite_query_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        self.inner.generate_infinite_query_hook(op, usage)
    }

    fn generate_mutation_hook(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> String {
        self.inner.generate_mutation_hook(op, usage)
    }

    fn generate_fetcher_fetch(
        &self,
        op: &OperationDescriptor,
        usage: &mut UsageAccumulator,
    ) -> Option<String> {
        self.inner.generate_fetcher_fetch(op, usage)
    }

    fn generate_get_key(&self, op: &OperationDescriptor) -> Option<String> {
        self.inner.generate_get_key(op)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::hooks::config::DEFAULT_ENDPOINT;
    use crate::hooks::ir::OperationKind;

    fn options() -> RenderOptions {
        RenderOptions {
            error_type: "unknown".into(),
            use_type_imports: false,
        }
    }

    fn inline(fetcher: &FetchFetcher) -> String {
        match fetcher.generate_fetcher_implementation().as_slice() {
            [FetcherPrelude::Inline(code)] => code.clone(),
            other => panic!("expected one inline prelude, got {other:?}"),
        }
    }

    #[test]
    fn test_default_fetcher_implementation() {
        let code = inline(&FetchFetcher::new(DEFAULT_ENDPOINT, None, options()));

        assert!(code.starts_with(
            "export interface IUseFetcherArgs<TVariables> {\n  variables?: TVariables;\n  headers?: RequestInit['headers'];\n}\n"
        ));
        assert!(code.contains(
            "function fetcher<TData, TArgs extends IUseFetcherArgs<unknown>>(query: string, args?: TArgs, headers?: RequestInit['headers']) {\n  return async (): Promise<TData> => {\n"
        ));
        assert!(code.contains("    const res = await fetch('/graphql', {\n      method: 'POST',\n"));
        assert!(code.contains(
            "      headers: { 'Content-Type': 'application/json', ...args?.headers, ...headers },\n"
        ));
        assert!(code.contains("      body: JSON.stringify({ query, variables: args?.variables })\n"));
        assert!(code.contains("    if (json.errors) {\n      throw new Error("));
        assert!(code.contains("    return json.data;\n  };\n}\n"));
    }

    #[test]
    fn test_env_endpoint_and_fetch_params() {
        let params = serde_json::json!({
            "credentials": "include",
            "headers": { "x-api-key": "secret" }
        });
        let fetcher = FetchFetcher::new(
            "process.env.GRAPHQL_URL",
            params.as_object().cloned(),
            options(),
        );
        let code = inline(&fetcher);

        assert!(code.contains("await fetch(process.env.GRAPHQL_URL, {"));
        assert!(code.contains("credentials: \"include\""));
        assert!(code.contains("...{\"x-api-key\":\"secret\"}"));
    }

    #[test]
    fn test_fetch_params_override_default_keys() {
        let params = serde_json::json!({
            "method": "GET",
            "credentials": "include",
            "body": "ignored"
        });
        let fetcher = FetchFetcher::new(DEFAULT_ENDPOINT, params.as_object().cloned(), options());
        let code = inline(&fetcher);

        assert_eq!(code.matches("method:").count(), 1, "{code}");
        assert!(code.contains("method: \"GET\",\n"));
        assert!(!code.contains("'POST'"));
        assert!(code.contains("credentials: \"include\""));
        assert_eq!(code.matches("body:").count(), 1, "{code}");
        assert!(code.contains("body: JSON.stringify({ query, variables: args?.variables })"));
    }

    #[test]
    fn test_hooks_call_local_fetcher() {
        let fetcher = FetchFetcher::new(DEFAULT_ENDPOINT, None, options());
        let op = OperationDescriptor::new(OperationKind::Query, "testQuery");
        let mut usage = UsageAccumulator::new();

        let hook = fetcher.generate_query_hook(&op, &mut usage);
        assert!(hook.contains("export const useTestQuery = <TData = TestQuery, TError = unknown>(args?: IUseFetcherArgs<TestQueryVariables>"));
        assert!(hook.contains("queryKey: args?.variables ? ['testQuery', args.variables] : ['testQuery']"));
        assert!(hook.contains("queryFn: fetcher<TestQuery, IUseFetcherArgs<TestQueryVariables>>(TestQueryDocument, args)"));

        let accessor = fetcher.generate_fetcher_fetch(&op, &mut usage).unwrap();
        assert!(accessor.starts_with("useTestQuery.fetcher = "));
        assert!(usage.finish().fetcher_in_use());
    }
}
