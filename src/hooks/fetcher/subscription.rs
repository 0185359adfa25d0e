//! Subscription hooks.
//!
//! Subscriptions go straight to the subscription client's hook; no strategy
//! wraps them and none of them touch the fetch function.

use super::export_hook;
use crate::hooks::ir::{ArrowBody, Emit, OperationDescriptor, TsExpr, TsParam, TsType};
use crate::hooks::keys::ARGS_PARAM;
use crate::hooks::usage::{HookMethodMap, UsageAccumulator};

/// `export const use<Name> = (args?: SubscriptionHookOptions<R, V>) => useSubscription<R, V>(gql(Doc), args);`
pub(super) fn render_subscription_hook(
    op: &OperationDescriptor,
    usage: &mut UsageAccumulator,
) -> String {
    let method = HookMethodMap::SUBSCRIPTION;
    usage.record(&method);

    let type_args = vec![
        TsType::named(&op.result_type_name),
        TsType::named(&op.variables_type_name),
    ];
    let gql = method.helper.unwrap_or("gql");

    let call = TsExpr::generic_call(
        TsExpr::ident(method.hook),
        type_args.clone(),
        vec![
            TsExpr::call(
                TsExpr::ident(gql),
                vec![TsExpr::ident(&op.document_variable_name)],
            ),
            TsExpr::ident(ARGS_PARAM),
        ],
    );

    export_hook(
        &op.hook_name(),
        vec![],
        vec![TsParam::typed(
            ARGS_PARAM,
            TsType::generic(method.options, type_args),
            !op.has_required_variables,
        )],
        ArrowBody::Expr(Box::new(call)),
    )
    .emit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::ir::OperationKind;
    use crate::hooks::usage::RuntimeModule;

    #[test]
    fn test_subscription_hook() {
        let op = OperationDescriptor::new(OperationKind::Subscription, "testSubscription");
        let mut usage = UsageAccumulator::new();
        let hook = render_subscription_hook(&op, &mut usage);

        assert_eq!(
            hook,
            "export const useTestSubscription = (args?: SubscriptionHookOptions<TestSubscription, TestSubscriptionVariables>) => useSubscription<TestSubscription, TestSubscriptionVariables>(gql(TestSubscriptionDocument), args);\n"
        );

        let summary = usage.finish();
        assert!(!summary.fetcher_in_use());
        assert_eq!(summary.values(RuntimeModule::ReactQuery).count(), 0);
        assert_eq!(
            summary.values(RuntimeModule::Subscription).collect::<Vec<_>>(),
            vec!["gql", "useSubscription"]
        );
        assert_eq!(
            summary.types(RuntimeModule::Subscription).collect::<Vec<_>>(),
            vec!["SubscriptionHookOptions"]
        );
    }

    #[test]
    fn test_required_variables_make_args_mandatory() {
        let op = OperationDescriptor::new(OperationKind::Subscription, "onComment")
            .with_required_variables(true);
        let hook = render_subscription_hook(&op, &mut UsageAccumulator::new());
        assert!(hook.contains("(args: SubscriptionHookOptions<OnComment, OnCommentVariables>)"));
    }
}
