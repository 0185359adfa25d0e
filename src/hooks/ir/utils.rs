//! Identifier and string helpers for the printed TypeScript.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words a mapper alias or generated binding may not take.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// True when `name` is not a plain ASCII identifier and would have to be
/// quoted as an object key or enum member.
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name.chars().next().is_some_and(is_ident_start)
        || !name.chars().all(is_ident_char)
}

/// True when `name` can be imported or declared as a local.
pub fn is_valid_binding(name: &str) -> bool {
    !needs_bracket_notation(name) && !TS_RESERVED_WORDS.contains(name)
}

/// Escape for a single-quoted literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("'{}'", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// `testQuery` -> `TestQuery`
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Check whether `code` references `ident` as a standalone binding.
///
/// Occurrences that are part of a longer identifier, a member access
/// (`x.ident`) or an object key (`ident: value`) do not count.
pub fn references_identifier(code: &str, ident: &str) -> bool {
    if ident.is_empty() {
        return false;
    }

    code.match_indices(ident).any(|(start, _)| {
        let before = code[..start].chars().next_back();
        let after = &code[start + ident.len()..];

        let standalone_start = before.is_none_or(|c| !is_ident_char(c) && c != '.');
        let standalone_end = after.chars().next().is_none_or(|c| !is_ident_char(c));
        let is_key = after.trim_start().starts_with(':');

        standalone_start && standalone_end && !is_key
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers() {
        for name in ["fetcher", "useFetchData", "_private", "$client", "query2"] {
            assert!(!needs_bracket_notation(name), "{name}");
        }
        for name in ["", "2query", "fetch-data", "lib.fetcher", "use Data"] {
            assert!(needs_bracket_notation(name), "{name:?}");
        }
    }

    #[test]
    fn test_bindings_exclude_reserved_words() {
        assert!(is_valid_binding("createQueryHook"));
        assert!(!is_valid_binding("default"));
        assert!(!is_valid_binding("import"));
        assert!(!is_valid_binding("create-hook"));
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(escape_js_string("/graphql"), "/graphql");
        assert_eq!(escape_js_string("user's"), "user\\'s");
        assert_eq!(escape_js_string("C:\\api"), "C:\\\\api");
        assert_eq!(quote_if_needed("TestQuery"), "TestQuery");
        assert_eq!(quote_if_needed("x-request-id"), "'x-request-id'");
    }

    #[test]
    fn test_capitalize_operation_names() {
        assert_eq!(capitalize_first("testQuery"), "TestQuery");
        assert_eq!(capitalize_first("ListUsers"), "ListUsers");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_references_identifier() {
        assert!(references_identifier("return useQuery<A>({})", "useQuery"));
        assert!(!references_identifier("useQueryClient()", "useQuery"));
        assert!(!references_identifier("client.useQuery()", "useQuery"));
        assert!(!references_identifier(
            "const { useQuery: useA } = factory();",
            "useQuery"
        ));
        assert!(references_identifier("x?: UseQueryOptions<A>", "UseQueryOptions"));
        assert!(!references_identifier("anything", ""));
    }
}
