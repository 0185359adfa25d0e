//! File assembly.
//!
//! Turns the output of the rendering pass into the final file: an import
//! list (`prepend`) and a body (`content`). Imports are pruned against the
//! rendered hooks, so an identifier is imported only when it was recorded
//! during the pass and actually appears in the output.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::config::CodegenConfig;
use super::fetcher::{FetcherPrelude, FetcherRenderer, MUTATION_KEY_ENUM, QUERY_KEY_ENUM};
use super::ir::utils::{capitalize_first, references_identifier};
use super::ir::{Emit, ImportItem, TsImport, TsLiteral, TsTypeDef, TypeDefKind};
use super::usage::{RuntimeModule, UsageSummary};
use super::visitor::{KeyRegistry, VisitOutput};

/// A generated TypeScript file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Import statements, one per line.
    pub prepend: Vec<String>,
    /// Documents, fetcher prelude, key enums and hooks.
    pub content: String,
}

impl GeneratedFile {
    /// Imports, a blank line, then the body.
    pub fn render(&self) -> String {
        if self.prepend.is_empty() {
            return self.content.clone();
        }
        format!("{}\n\n{}", self.prepend.join("\n"), self.content)
    }
}

/// Assemble the file for one run.
pub fn emit_file(
    config: &CodegenConfig,
    renderer: &dyn FetcherRenderer,
    documents: &str,
    output: VisitOutput,
) -> GeneratedFile {
    let hooks = output.fragments.join("\n");

    let mut prepend = runtime_imports(config, &output.usage, &hooks);
    let mut sections = Vec::new();

    let documents = documents.trim_end();
    if !documents.is_empty() {
        sections.push(format!("{documents}\n"));
    }

    if output.usage.fetcher_in_use() {
        for prelude in renderer.generate_fetcher_implementation() {
            match prelude {
                FetcherPrelude::Import(import) => {
                    prepend.extend(prune_import(import, &hooks).map(|import| import.emit()));
                }
                FetcherPrelude::Inline(code) => sections.push(code),
            }
        }
    }

    if renderer.needs_key_enums() {
        sections.extend(key_enums(&output.keys));
    }

    if !hooks.is_empty() {
        sections.push(hooks);
    }

    debug!(
        imports = prepend.len(),
        fragments = output.fragments.len(),
        fetcher_in_use = output.usage.fetcher_in_use(),
        "assembled file"
    );

    GeneratedFile {
        prepend,
        content: sections.join("\n"),
    }
}

/// Imports from the query and subscription runtimes.
fn runtime_imports(config: &CodegenConfig, usage: &UsageSummary, code: &str) -> Vec<String> {
    let modules = [
        (RuntimeModule::ReactQuery, &config.react_query_import_from),
        (RuntimeModule::Subscription, &config.subscription_import_from),
    ];

    let mut imports = Vec::new();
    for (module, from) in modules {
        let values: Vec<ImportItem> = usage
            .values(module)
            .filter(|ident| references_identifier(code, ident))
            .map(ImportItem::named)
            .collect();
        let types: Vec<ImportItem> = usage
            .types(module)
            .filter(|ident| references_identifier(code, ident))
            .map(ImportItem::named)
            .collect();

        let groups = if config.use_type_imports {
            vec![(values, false), (types, true)]
        } else {
            vec![(values.into_iter().chain(types).collect(), false)]
        };

        for (items, type_only) in groups {
            if items.is_empty() {
                continue;
            }
            let import = TsImport {
                default: None,
                items,
                from: from.clone(),
                type_only,
            };
            imports.push(import.emit());
        }
    }
    imports
}

/// Drop bindings the hooks never reference. `None` when nothing is left.
fn prune_import(import: TsImport, code: &str) -> Option<TsImport> {
    let default = import
        .default
        .filter(|binding| references_identifier(code, binding));
    let items: Vec<ImportItem> = import
        .items
        .into_iter()
        .filter(|item| references_identifier(code, item.binding()))
        .collect();

    if default.is_none() && items.is_empty() {
        return None;
    }
    Some(TsImport {
        default,
        items,
        ..import
    })
}

fn key_enums(keys: &KeyRegistry) -> Vec<String> {
    [
        (QUERY_KEY_ENUM, keys.queries()),
        (MUTATION_KEY_ENUM, keys.mutations()),
    ]
    .into_iter()
    .filter(|(_, names)| !names.is_empty())
    .map(|(name, names)| {
        TsTypeDef {
            name: name.to_string(),
            type_params: vec![],
            kind: TypeDefKind::Enum {
                members: enum_members(name, names),
            },
        }
        .emit()
    })
    .collect()
}

/// One member per distinct capitalized name. Later operations whose name
/// capitalizes onto an existing member are dropped with a warning.
fn enum_members(enum_name: &str, names: &[String]) -> Vec<(String, TsLiteral)> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut members = Vec::with_capacity(names.len());
    for key in names {
        let member = capitalize_first(key);
        if let Some(first) = seen.get(&member) {
            warn!(
                enum_name,
                member = %member,
                kept = *first,
                dropped = %key,
                "operation names collide on the same enum member"
            );
            continue;
        }
        seen.insert(member.clone(), key.as_str());
        members.push((member, TsLiteral::String(key.clone())));
    }
    members
}
