// crates/engine/src/languages.rs
//! Built-in language table and path-based language resolution.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;
use line_census_core::{BlockPair, CommentSyntax, Language};

use crate::error::{EngineError, Result};

/// One row of the built-in table.
struct Definition {
    name: &'static str,
    line: &'static [&'static str],
    blocks: &'static [(&'static str, &'static str)],
    extensions: &'static [&'static str],
    file_names: &'static [&'static str],
    interpreters: &'static [&'static str],
}

const C_LINE: &[&str] = &["//"];
const C_BLOCK: &[(&str, &str)] = &[("/*", "*/")];
const HASH: &[&str] = &["#"];
const NONE: &[&str] = &[];

macro_rules! def {
    ($name:expr, $line:expr, $blocks:expr, ext: [$($ext:expr),*] $(, files: [$($file:expr),*])? $(, interp: [$($interp:expr),*])?) => {
        Definition {
            name: $name,
            line: $line,
            blocks: $blocks,
            extensions: &[$($ext),*],
            file_names: &[$($($file),*)?],
            interpreters: &[$($($interp),*)?],
        }
    };
}

const BUILTIN: &[Definition] = &[
    def!("C", C_LINE, C_BLOCK, ext: ["c", "h"]),
    def!("C++", C_LINE, C_BLOCK, ext: ["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"]),
    def!("C#", C_LINE, C_BLOCK, ext: ["cs"]),
    def!("Java", C_LINE, C_BLOCK, ext: ["java"]),
    def!("JavaScript", C_LINE, C_BLOCK, ext: ["js", "mjs", "cjs", "jsx"], interp: ["node"]),
    def!("TypeScript", C_LINE, C_BLOCK, ext: ["ts", "tsx", "mts", "cts"]),
    def!("Go", C_LINE, C_BLOCK, ext: ["go"]),
    def!("Rust", C_LINE, C_BLOCK, ext: ["rs"]),
    def!("Swift", C_LINE, C_BLOCK, ext: ["swift"]),
    def!("Kotlin", C_LINE, C_BLOCK, ext: ["kt", "kts"]),
    def!("Scala", C_LINE, C_BLOCK, ext: ["scala", "sc"]),
    def!("Dart", C_LINE, C_BLOCK, ext: ["dart"]),
    def!("Zig", &["//"], &[], ext: ["zig"]),
    def!("D", C_LINE, &[("/*", "*/"), ("/+", "+/")], ext: ["d"]),
    def!("PHP", &["//", "#"], C_BLOCK, ext: ["php"], interp: ["php"]),
    def!("CSS", NONE, C_BLOCK, ext: ["css"]),
    def!("SCSS", C_LINE, C_BLOCK, ext: ["scss", "less"]),
    def!("Pascal", C_LINE, &[("{", "}"), ("(*", "*)")], ext: ["pas", "pp"]),
    def!("Python", HASH, &[("\"\"\"", "\"\"\""), ("'''", "'''")], ext: ["py", "pyw", "pyi"], interp: ["python", "python2", "python3"]),
    def!("Ruby", HASH, &[("=begin", "=end")], ext: ["rb", "rake", "gemspec"], files: ["Rakefile", "Gemfile"], interp: ["ruby"]),
    def!("Perl", HASH, &[("=pod", "=cut")], ext: ["pl", "pm"], interp: ["perl"]),
    def!("Shell", HASH, &[], ext: ["sh", "bash", "zsh", "ksh"], interp: ["sh", "bash", "zsh", "ksh", "dash"]),
    def!("Julia", HASH, &[("#=", "=#")], ext: ["jl"], interp: ["julia"]),
    def!("Nim", HASH, &[("#[", "]#")], ext: ["nim"]),
    def!("Elixir", HASH, &[], ext: ["ex", "exs"], interp: ["elixir"]),
    def!("R", HASH, &[], ext: ["r"], interp: ["rscript"]),
    def!("PowerShell", HASH, &[("<#", "#>")], ext: ["ps1", "psm1", "psd1"], interp: ["pwsh"]),
    def!("YAML", HASH, &[], ext: ["yml", "yaml"]),
    def!("TOML", HASH, &[], ext: ["toml"]),
    def!("Makefile", HASH, &[], ext: ["mk"], files: ["Makefile", "makefile", "GNUmakefile"]),
    def!("CMake", HASH, &[("#[[", "]]")], ext: ["cmake"], files: ["CMakeLists.txt"]),
    def!("Dockerfile", HASH, &[], ext: ["dockerfile"], files: ["Dockerfile"]),
    def!("Lua", &["--"], &[("--[[", "]]")], ext: ["lua"], interp: ["lua"]),
    def!("SQL", &["--"], C_BLOCK, ext: ["sql"]),
    def!("Haskell", &["--"], &[("{-", "-}")], ext: ["hs"], interp: ["runhaskell"]),
    def!("HTML", NONE, &[("<!--", "-->")], ext: ["html", "htm", "xhtml"]),
    def!("XML", NONE, &[("<!--", "-->")], ext: ["xml", "xsd", "xsl", "xslt", "svg"]),
    def!("Lisp", &[";"], &[("#|", "|#")], ext: ["lisp", "lsp", "cl", "el"]),
    def!("Clojure", &[";"], &[], ext: ["clj", "cljs", "cljc", "edn"]),
    def!("Erlang", &["%"], &[], ext: ["erl", "hrl"]),
    def!("OCaml", NONE, &[("(*", "*)")], ext: ["ml", "mli"]),
    def!("MATLAB", &["%"], &[("%{", "%}")], ext: ["m"]),
    def!("Assembly", &[";", "#"], &[], ext: ["asm", "s"]),
    def!("Batch", &["REM", "rem", "@REM", "@rem", "::"], &[], ext: ["bat", "cmd"]),
    def!("Fortran", &["!"], &[], ext: ["f90", "f95", "f03", "f08"]),
    def!("Vim Script", &["\""], &[], ext: ["vim"]),
    def!("Markdown", NONE, &[], ext: ["md", "markdown"]),
    def!("JSON", NONE, &[], ext: ["json"]),
    def!("Plain Text", NONE, &[], ext: ["txt"]),
];

fn syntax_of(def: &Definition) -> Result<CommentSyntax> {
    let built = if def.blocks.is_empty() && !def.line.is_empty() {
        CommentSyntax::line_only(def.line.iter().copied())
    } else {
        CommentSyntax::new(
            def.line.iter().copied(),
            def.blocks.iter().map(|&(start, end)| BlockPair::new(start, end)),
        )
    };
    built.map_err(|source| EngineError::Syntax {
        language: def.name.to_string(),
        source,
    })
}

/// Lookup tables from file identity to [`Language`].
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    by_name: HashMap<String, usize>,
    by_extension: HashMap<String, usize>,
    by_file_name: HashMap<String, usize>,
    by_interpreter: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// Registry holding every built-in language.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in comment syntax is malformed.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for def in BUILTIN {
            let index = registry.insert(Language::new(def.name, syntax_of(def)?));
            for ext in def.extensions {
                registry.by_extension.insert((*ext).to_string(), index);
            }
            for file in def.file_names {
                registry.by_file_name.insert((*file).to_string(), index);
            }
            for interp in def.interpreters {
                registry.by_interpreter.insert((*interp).to_string(), index);
            }
        }
        Ok(registry)
    }

    /// Add (or replace, by name) a language. Returns its index.
    pub fn insert(&mut self, language: Language) -> usize {
        if let Some(&index) = self.by_name.get(&language.name().to_lowercase()) {
            self.languages[index] = language;
            return index;
        }
        let index = self.languages.len();
        self.by_name.insert(language.name().to_lowercase(), index);
        self.languages.push(language);
        index
    }

    /// Route an extension to an already registered language.
    ///
    /// # Errors
    ///
    /// Fails if no language called `language` (case-insensitive) exists.
    pub fn map_extension(&mut self, ext: &str, language: &str) -> Result<()> {
        let index = *self
            .by_name
            .get(&language.to_lowercase())
            .ok_or_else(|| EngineError::InvalidExtMapping(format!("{ext}={language}")))?;
        self.by_extension
            .insert(ext.trim_start_matches('.').to_lowercase(), index);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.languages[i])
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    /// Resolve by file name, then extension. No filesystem access.
    pub fn resolve_name(&self, path: &Path) -> Option<&Language> {
        let file_name = path.file_name().and_then(|s| s.to_str())?;
        if let Some(&i) = self.by_file_name.get(file_name) {
            return Some(&self.languages[i]);
        }
        let ext = path.extension().and_then(|s| s.to_str())?.to_lowercase();
        self.by_extension.get(&ext).map(|&i| &self.languages[i])
    }

    /// Resolve a language for `path`, falling back to the shebang of
    /// extensionless files.
    pub fn resolve(&self, path: &Path) -> Option<&Language> {
        if let Some(language) = self.resolve_name(path) {
            return Some(language);
        }
        if path.extension().is_some() {
            return None;
        }
        let interpreter = read_shebang_interpreter(path)?;
        self.by_interpreter
            .get(&interpreter)
            .map(|&i| &self.languages[i])
    }
}

/// Interpreter named by a `#!` first line, e.g. `python3` for
/// `#!/usr/bin/env python3`.
pub fn shebang_interpreter(first_line: &str) -> Option<String> {
    let rest = first_line.strip_prefix("#!")?.trim();
    let mut words = rest.split_whitespace();
    let program = words.next()?;
    let program = program.rsplit('/').next().unwrap_or(program);
    let interpreter = if program == "env" {
        words.find(|w| !w.starts_with('-'))?
    } else {
        program
    };
    Some(interpreter.to_lowercase())
}

fn read_shebang_interpreter(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut first = String::new();
    // A shebang line is short; cap the read for binary or minified files.
    BufReader::new(file)
        .take(512)
        .read_line(&mut first)
        .ok()?;
    shebang_interpreter(first.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_table_is_valid() {
        let registry = LanguageRegistry::builtin().unwrap();
        assert!(registry.len() > 40);
        let rust = registry.get("rust").unwrap();
        assert_eq!(rust.syntax().line_markers(), ["//"]);
    }

    #[test]
    fn test_line_only_languages_use_sentinel() {
        let registry = LanguageRegistry::builtin().unwrap();
        assert!(registry.get("Shell").unwrap().syntax().is_block_sentinel());
        assert!(!registry.get("JSON").unwrap().syntax().has_block_pairs());
    }

    #[test]
    fn test_resolve_by_extension_and_name() {
        let registry = LanguageRegistry::builtin().unwrap();
        assert_eq!(registry.resolve_name(Path::new("src/main.RS")).unwrap().name(), "Rust");
        assert_eq!(registry.resolve_name(Path::new("a/Makefile")).unwrap().name(), "Makefile");
        assert_eq!(
            registry.resolve_name(Path::new("CMakeLists.txt")).unwrap().name(),
            "CMake"
        );
        assert!(registry.resolve_name(Path::new("unknown.zzz")).is_none());
        assert!(registry.resolve_name(Path::new("LICENSE")).is_none());
    }

    #[test]
    fn test_map_extension() {
        let mut registry = LanguageRegistry::builtin().unwrap();
        registry.map_extension(".tpl", "html").unwrap();
        assert_eq!(registry.resolve_name(Path::new("x.tpl")).unwrap().name(), "HTML");
        assert!(matches!(
            registry.map_extension("foo", "Klingon"),
            Err(EngineError::InvalidExtMapping(_))
        ));
    }

    #[test]
    fn test_shebang_interpreter() {
        assert_eq!(shebang_interpreter("#!/bin/sh").as_deref(), Some("sh"));
        assert_eq!(
            shebang_interpreter("#!/usr/bin/env python3").as_deref(),
            Some("python3")
        );
        assert_eq!(
            shebang_interpreter("#!/usr/bin/env -S node --flag").as_deref(),
            Some("node")
        );
        assert_eq!(shebang_interpreter("echo hi"), None);
    }

    #[test]
    fn test_resolve_extensionless_script() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deploy");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "#!/usr/bin/env bash\necho hi").unwrap();

        let registry = LanguageRegistry::builtin().unwrap();
        assert_eq!(registry.resolve(&path).unwrap().name(), "Shell");
    }
}
