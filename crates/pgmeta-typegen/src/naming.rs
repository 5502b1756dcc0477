//! Identifier case conversion and keyword escaping.
//!
//! Generated names never replace the raw catalog name: every emitter keeps the
//! raw identifier next to the generated one (tags, aliases, coding keys) so
//! serialization still matches the database exactly.

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Case convention for field and variant identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCase {
    /// `userId`
    LowerCamel,
    /// `user_id`
    Snake,
    /// `UserId`
    Pascal,
    /// `USER_ID`
    UpperSnake,
    /// The raw identifier, unchanged.
    Preserve,
}

impl FieldCase {
    /// Convert `raw` to this case.
    pub fn apply(self, raw: &str) -> String {
        match self {
            FieldCase::LowerCamel => raw.to_lower_camel_case(),
            FieldCase::Snake => raw.to_snake_case(),
            FieldCase::Pascal => raw.to_upper_camel_case(),
            FieldCase::UpperSnake => raw.to_shouty_snake_case(),
            FieldCase::Preserve => raw.to_string(),
        }
    }
}

/// How an identifier colliding with a reserved word is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordEscape {
    /// `` `default` ``
    Backticks,
    /// `class_`
    TrailingUnderscore,
    /// `"my key"` (string-literal key)
    Quote,
}

/// Naming rules of one backend.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Case applied to field names.
    pub field_case: FieldCase,
    /// Reserved words of the target language.
    pub keywords: &'static [&'static str],
    /// Escape strategy for reserved words.
    pub escape: KeywordEscape,
    /// Prefix applied when a field name would start with a digit.
    pub digit_prefix: &'static str,
    /// Field name used when the raw identifier has no letters or digits.
    pub placeholder: &'static str,
}

impl NamingConvention {
    /// Convert a raw identifier to a field name, without escaping.
    pub fn convert_field(&self, raw: &str) -> String {
        if self.field_case != FieldCase::Preserve && !has_words(raw) {
            return self.placeholder.to_string();
        }
        let name = self.field_case.apply(raw);
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("{}{}", self.digit_prefix, name)
        } else {
            name
        }
    }

    /// Escape `name` if it is reserved or not a plain identifier.
    pub fn escape(&self, name: &str) -> String {
        let reserved = self.keywords.contains(&name);
        match self.escape {
            KeywordEscape::Backticks if reserved => format!("`{}`", name),
            KeywordEscape::TrailingUnderscore if reserved => format!("{}_", name),
            KeywordEscape::Quote if reserved || !is_identifier(name) => quote(name),
            _ => name.to_string(),
        }
    }
}

/// Check whether `raw` contains at least one letter or digit.
pub fn has_words(raw: &str) -> bool {
    raw.chars().any(char::is_alphanumeric)
}

/// Convert a raw identifier to a PascalCase type name.
///
/// Empty or digit-leading results are prefixed with `T`.
pub fn to_type_name(raw: &str) -> String {
    let name = raw.to_upper_camel_case();
    if name.is_empty() || name.starts_with(|c: char| c.is_numeric()) {
        format!("T{}", name)
    } else {
        name
    }
}

/// Check whether `name` is a plain identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Render `value` as a double-quoted string literal.
///
/// JSON escapes are valid in TypeScript, Go and Python literals. Swift has its
/// own escaper.
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Collision-free name allocation within one namespace.
///
/// Scoped to a single generation call; two raw identifiers that convert to the
/// same name get numeric suffixes in claim order (`UserId`, `UserId2`, ...).
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or the first free suffixed variant of it.
    ///
    /// `finish` turns a candidate into its final (escaped) form; uniqueness is
    /// checked on the finished name.
    pub fn claim(&mut self, base: &str, finish: impl Fn(&str) -> String) -> String {
        let mut candidate = finish(base);
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = finish(&format!("{}{}", base, suffix));
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Swift reserved words (including capitalized ones usable as type names).
pub const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Protocol", "Self", "Type", "as", "associatedtype", "await", "break", "case",
    "catch", "class", "continue", "default", "defer", "deinit", "do", "else", "enum",
    "extension", "fallthrough", "false", "fileprivate", "for", "func", "guard", "if",
    "import", "in", "init", "inout", "internal", "is", "let", "nil", "open", "operator",
    "private", "precedencegroup", "protocol", "public", "repeat", "rethrows", "return",
    "self", "static", "struct", "subscript", "super", "switch", "throw", "throws", "true",
    "try", "typealias", "var", "where", "while",
];

/// Python reserved words plus names that shadow `BaseModel` attributes.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "copy", "def", "del", "dict", "elif", "else", "except", "finally", "for",
    "from", "global", "if", "import", "in", "is", "json", "lambda", "model_config",
    "model_fields", "nonlocal", "not", "or", "pass", "raise", "return", "schema", "try",
    "while", "with", "yield",
];

/// Go reserved words.
pub const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
    "package", "range", "return", "select", "struct", "switch", "type", "var",
];
