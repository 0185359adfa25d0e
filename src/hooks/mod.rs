//! React Query hook generator for GraphQL operations.
//!
//! The pipeline is:
//! 1. Resolve: `RawConfig` -> `CodegenConfig` -> `FetcherStrategy`
//! 2. Visit: each `OperationDescriptor` -> hook fragments + recorded usage
//! 3. Emit: fragments + usage -> `GeneratedFile` (imports and body)
//!
//! Rendering is built on a small TypeScript AST (`ir`) printed via `Emit`.

mod config;
mod emitter;
mod fetcher;
mod ir;
mod keys;
mod mapper;
mod usage;
mod visitor;

pub use config::{CodegenConfig, FetcherConfig, NativeClientConfig};
pub use emitter::GeneratedFile;
pub use ir::{OperationDescriptor, OperationKind};

use tracing::info;

use crate::error::Result;
use fetcher::FetcherStrategy;
use visitor::HookVisitor;

/// Generate the hooks file for `operations`, in the given order.
///
/// `documents` is the already rendered document and type text; it is placed
/// ahead of the hooks unchanged.
pub fn generate(
    operations: &[OperationDescriptor],
    documents: &str,
    config: &CodegenConfig,
) -> Result<GeneratedFile> {
    let strategy = FetcherStrategy::from_config(config)?;
    let renderer = strategy.as_renderer();

    let mut visitor = HookVisitor::new(config, renderer);
    for op in operations {
        visitor.visit(op);
    }
    let output = visitor.finish();

    let file = emitter::emit_file(config, renderer, documents, output);
    info!(
        strategy = config.fetcher.strategy_name(),
        operations = operations.len(),
        imports = file.prepend.len(),
        "generated hooks"
    );
    Ok(file)
}
