use std::path::Path;

pub const DEFAULT_LANGUAGE: &str = "text";

/// Fence label for a file, from its (case-insensitive) extension.
pub fn get_file_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| language_for_extension(&e.to_ascii_lowercase()))
        .unwrap_or(DEFAULT_LANGUAGE)
}

pub fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        // Programming languages
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "c" | "h" => "c",
        "cpp" | "hpp" => "cpp",
        "java" => "java",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "r" => "r",
        "dart" => "dart",
        "lua" => "lua",
        "ex" | "exs" => "elixir",
        "erl" | "hrl" => "erlang",
        "clj" => "clojure",
        "cs" => "csharp",
        "fs" => "fsharp",
        "pl" | "pm" => "perl",
        "hs" | "lhs" => "haskell",

        // Web
        "html" => "html",
        "css" => "css",
        "scss" => "scss",

        // Scripting and configuration
        "sh" | "bash" | "zsh" => "bash",
        "fish" => "fish",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "ini" | "cfg" => "ini",
        "sql" => "sql",

        // Documentation
        "md" => "markdown",
        "txt" => "text",

        _ => DEFAULT_LANGUAGE,
    }
}
