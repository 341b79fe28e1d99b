use std::collections::HashMap;
use std::sync::OnceLock;

fn alias_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            ("rust", "Rust"),
            ("rs", "Rust"),
            ("python", "Python"),
            ("py", "Python"),
            ("python3", "Python"),
            ("javascript", "JavaScript"),
            ("js", "JavaScript"),
            ("node", "JavaScript"),
            ("typescript", "TypeScript"),
            ("ts", "TypeScript"),
            ("go", "Go"),
            ("golang", "Go"),
            ("java", "Java"),
            ("kotlin", "Kotlin"),
            ("scala", "Scala"),
            ("c", "C"),
            ("c++", "C++"),
            ("cpp", "C++"),
            ("c#", "C#"),
            ("csharp", "C#"),
            ("swift", "Swift"),
            ("objective-c", "Objective-C"),
            ("ruby", "Ruby"),
            ("php", "PHP"),
            ("elixir", "Elixir"),
            ("haskell", "Haskell"),
            ("ocaml", "OCaml"),
            ("shell", "Shell"),
            ("bash", "Shell"),
            ("html", "HTML"),
            ("css", "CSS"),
            ("scss", "SCSS"),
            ("vue", "Vue"),
            ("svelte", "Svelte"),
            ("jupyter notebook", "Jupyter Notebook"),
            ("ipynb", "Jupyter Notebook"),
            ("dart", "Dart"),
            ("lua", "Lua"),
            ("r", "R"),
            ("zig", "Zig"),
            ("solidity", "Solidity"),
            ("hcl", "HCL"),
            ("terraform", "HCL"),
        ]
        .into_iter()
        .collect()
    })
}

/// Canonical spelling of a repository language, or `None` for blank input.
///
/// Unknown languages are kept as given (trimmed) so they still count once.
pub fn canonical_language(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(
        alias_table()
            .get(trimmed.to_lowercase().as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| trimmed.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_language() {
        assert_eq!(canonical_language("rust"), Some("Rust".to_string()));
        assert_eq!(canonical_language(" TypeScript "), Some("TypeScript".to_string()));
        assert_eq!(canonical_language("golang"), Some("Go".to_string()));
        assert_eq!(canonical_language("Nim"), Some("Nim".to_string()));
        assert_eq!(canonical_language("   "), None);
    }
}
