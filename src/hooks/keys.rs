//! Cache key expressions.
//!
//! Keys are rendered as expressions evaluated when the hook is invoked, so
//! the "with or without variables" decision belongs to the generated code.
//! Hooks receive their variables through an `args: IUseFetcherArgs<V>`
//! parameter; keys read `args.variables`.

use super::ir::{OperationDescriptor, TsExpr};

/// Name of the hook parameter carrying `IUseFetcherArgs<V>`.
pub const ARGS_PARAM: &str = "args";

/// Suffix keeping infinite-query pages apart from the plain query entry.
const INFINITE_SUFFIX: &str = ".infinite";

/// `args?.variables ? ['name', args.variables] : ['name']`, or
/// `['name', args.variables]` when variables are required.
pub fn query_key(op: &OperationDescriptor) -> TsExpr {
    variables_key(&op.name, op.has_required_variables)
}

/// Like [`query_key`] under `'<name>.infinite'`. The page parameter is never
/// part of the key so all pages share one cache entry.
pub fn infinite_query_key(op: &OperationDescriptor) -> TsExpr {
    variables_key(&format!("{}{}", op.name, INFINITE_SUFFIX), op.has_required_variables)
}

/// `['name']`. Mutations are not cached by argument.
pub fn mutation_key(op: &OperationDescriptor) -> TsExpr {
    TsExpr::Array(vec![TsExpr::string(op.name.as_str())])
}

fn variables_key(base: &str, required: bool) -> TsExpr {
    let with_variables = TsExpr::Array(vec![TsExpr::string(base), args_variables(required)]);
    if required {
        return with_variables;
    }

    TsExpr::ternary(
        args_variables(false),
        TsExpr::Array(vec![
            TsExpr::string(base),
            TsExpr::member(TsExpr::ident(ARGS_PARAM), "variables"),
        ]),
        TsExpr::Array(vec![TsExpr::string(base)]),
    )
}

/// `args.variables` when `args` is mandatory, `args?.variables` otherwise.
pub fn args_variables(required: bool) -> TsExpr {
    if required {
        TsExpr::member(TsExpr::ident(ARGS_PARAM), "variables")
    } else {
        TsExpr::optional_member(TsExpr::ident(ARGS_PARAM), "variables")
    }
}
