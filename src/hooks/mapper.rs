//! Mapper strings.
//!
//! A mapper names the function a strategy wraps. It is either a local
//! identifier (`fetchData`, `api.fetchData`) or an external reference in the
//! form `module#export`, where the export part may be `Name`,
//! `Name as Local` or `default as Local`.

use super::ir::utils::{is_valid_binding, needs_bracket_notation};
use super::ir::{ImportItem, TsImport};
use crate::error::{Error, Result};

/// A parsed mapper reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMapper {
    /// Defined in (or globally visible to) the generated file.
    Internal { type_name: String },
    /// Imported from `source`.
    External {
        source: String,
        import: ImportItem,
        is_default: bool,
    },
}

impl ParsedMapper {
    /// Identifier the generated code calls.
    pub fn type_name(&self) -> &str {
        match self {
            ParsedMapper::Internal { type_name } => type_name,
            ParsedMapper::External { import, .. } => import.binding(),
        }
    }

    /// Module specifier for external mappers.
    pub fn source(&self) -> Option<&str> {
        match self {
            ParsedMapper::Internal { .. } => None,
            ParsedMapper::External { source, .. } => Some(source),
        }
    }
}

/// Parse a mapper string.
pub fn parse_mapper(mapper: &str) -> Result<ParsedMapper> {
    let trimmed = mapper.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_mapper(mapper, "mapper is empty"));
    }

    let Some((source, identifier)) = trimmed.split_once('#') else {
        return parse_internal(mapper, trimmed);
    };

    let source = source.trim();
    let identifier = identifier.trim();
    if identifier.contains('#') {
        return Err(Error::invalid_mapper(mapper, "expected a single '#' separator"));
    }
    if source.is_empty() {
        return Err(Error::invalid_mapper(mapper, "module source is empty"));
    }
    if identifier.is_empty() {
        return Err(Error::invalid_mapper(mapper, "export name is empty"));
    }

    let (name, alias) = match identifier.split_once(" as ") {
        Some((name, alias)) => (name.trim(), Some(alias.trim())),
        None => (identifier, None),
    };

    let is_default = name == "default";
    if is_default && alias.is_none() {
        return Err(Error::invalid_mapper(
            mapper,
            "default exports need a local name (`default as Name`)",
        ));
    }
    if !is_default && needs_bracket_notation(name) {
        return Err(Error::invalid_mapper(
            mapper,
            format!("'{name}' is not a valid export name"),
        ));
    }

    let binding = alias.unwrap_or(name);
    if !is_valid_binding(binding) {
        return Err(Error::invalid_mapper(
            mapper,
            format!("'{binding}' is not a valid identifier"),
        ));
    }

    Ok(ParsedMapper::External {
        source: source.to_string(),
        import: ImportItem {
            name: name.to_string(),
            alias: alias.map(str::to_string),
        },
        is_default,
    })
}

fn parse_internal(mapper: &str, trimmed: &str) -> Result<ParsedMapper> {
    let mut segments = trimmed.split('.');
    let head_valid = segments.next().is_some_and(is_valid_binding);
    if !head_valid || segments.any(needs_bracket_notation) {
        return Err(Error::invalid_mapper(
            mapper,
            format!("'{trimmed}' is not a valid identifier"),
        ));
    }
    Ok(ParsedMapper::Internal {
        type_name: trimmed.to_string(),
    })
}

/// Build one import statement for `source` from the external mappers and
/// extra named identifiers it provides. Duplicate bindings are dropped.
pub fn build_mapper_import<'a>(
    source: &str,
    mappers: impl IntoIterator<Item = &'a ParsedMapper>,
    extra: &[&str],
    type_only: bool,
) -> TsImport {
    let mut default = None;
    let mut items: Vec<ImportItem> = Vec::new();

    let extra_items = extra.iter().map(|name| (ImportItem::named(*name), false));
    let mapper_items = mappers.into_iter().filter_map(|mapper| match mapper {
        ParsedMapper::External {
            source: mapper_source,
            import,
            is_default,
        } if mapper_source == source => Some((import.clone(), *is_default)),
        _ => None,
    });

    for (item, is_default) in extra_items.chain(mapper_items) {
        if is_default {
            if default.is_none() {
                default = Some(item.binding().to_string());
            }
        } else if !items.iter().any(|existing| existing.binding() == item.binding()) {
            items.push(item);
        }
    }

    TsImport {
        default,
        items,
        from: source.to_string(),
        type_only,
    }
}
