//! Go source header parsing
//!
//! Extracts the package clause and import declarations from a Go source file.
//! Only the file header is examined: parsing stops at the first top-level
//! declaration that is not an import, as Go requires imports to come first.
//!
//! Comments are blanked out before parsing (string, raw string and rune literals
//! are respected), so commented-out imports are never reported. A lexical error
//! past the end of the header, such as an unterminated comment inside a function
//! body, does not affect the result.

use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^package[ \t]+([\p{L}_][\p{L}\p{N}_]*)").expect("package clause regex is valid")
});

static IMPORT_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:(\.|_|[\p{L}_][\p{L}\p{N}_]*)[ \t]+)?("(?:[^"\\\n]|\\.)*"|`[^`]*`)"#)
        .expect("import spec regex is valid")
});

/// Package clause and imports of one Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFileHeader {
    /// Declared package name
    pub package: String,
    /// Import paths in declaration order
    pub imports: Vec<String>,
}

/// Parses the header of a Go source file.
///
/// # Errors
///
/// Returns a human-readable reason when the package clause is missing, an
/// import declaration is malformed, or the header itself is cut short by an
/// unterminated comment or string.
pub fn parse_header(src: &str) -> Result<GoFileHeader, String> {
    let (code, lex_error) = strip_comments(src);
    let mut cursor = Cursor::new(&code);

    let header = match parse_clauses(&mut cursor) {
        Ok(header) => header,
        Err(reason) => return Err(lex_error.unwrap_or(reason)),
    };
    // the stripped text ends where lexing failed; if the header ran into that
    // point it may be missing imports
    match lex_error {
        Some(reason) if cursor.is_empty() => Err(reason),
        _ => Ok(header),
    }
}

fn parse_clauses(cursor: &mut Cursor<'_>) -> Result<GoFileHeader, String> {
    cursor.skip_separators();
    let caps = PACKAGE_CLAUSE
        .captures(cursor.rest())
        .ok_or_else(|| "expected 'package' clause".to_string())?;
    let package = caps[1].to_string();
    cursor.advance(caps[0].len());

    let mut imports = Vec::new();
    loop {
        cursor.skip_separators();
        if !cursor.eat_keyword("import") {
            break;
        }
        cursor.skip_whitespace();

        if cursor.eat('(') {
            loop {
                cursor.skip_separators();
                if cursor.eat(')') {
                    break;
                }
                if cursor.is_empty() {
                    return Err("unterminated import group, expected ')'".to_string());
                }
                imports.push(cursor.import_spec()?);
                cursor.skip_inline_space();
                if !(cursor.eat(';') || cursor.eat('\n') || cursor.peek() == Some(')')) {
                    return Err("expected newline or ';' after import spec".to_string());
                }
            }
        } else {
            imports.push(cursor.import_spec()?);
        }
    }

    Ok(GoFileHeader {
        package,
        imports,
    })
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.src.len());
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let Some(after) = self.rest().strip_prefix(keyword) else {
            return false;
        };
        if after.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return false;
        }
        self.advance(keyword.len());
        true
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        let skipped: usize = self.rest().chars().take_while(|c| pred(*c)).map(char::len_utf8).sum();
        self.advance(skipped);
    }

    fn skip_inline_space(&mut self) {
        self.skip_while(|c| c == ' ' || c == '\t' || c == '\r');
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    fn skip_separators(&mut self) {
        self.skip_while(|c| c.is_whitespace() || c == ';');
    }

    fn import_spec(&mut self) -> Result<String, String> {
        let rest = self.rest();
        let caps = IMPORT_SPEC.captures(rest).ok_or_else(|| {
            let snippet: String = rest.chars().take_while(|c| *c != '\n').take(40).collect();
            format!("malformed import spec near '{snippet}'")
        })?;
        let path = unquote(&caps[2])?;
        if path.is_empty() {
            return Err("empty import path".to_string());
        }
        self.advance(caps[0].len());
        Ok(path)
    }
}

fn unquote(literal: &str) -> Result<String, String> {
    let inner = &literal[1..literal.len() - 1];
    if literal.starts_with('`') {
        return Ok(inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => return Err(format!("unsupported escape '\\{other}' in import path")),
            None => return Err("unterminated escape in import path".to_string()),
        }
    }
    Ok(out)
}

/// Replaces comments with whitespace, keeping line structure intact.
///
/// Stops at the first lexical error and returns the text stripped so far
/// together with the reason.
fn strip_comments(src: &str) -> (String, Option<String>) {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut had_newline = false;
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '\n' {
                        had_newline = true;
                    }
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return (out, Some("unterminated block comment".to_string()));
                }
                // a block comment spanning lines acts like a newline
                out.push(if had_newline { '\n' } else { ' ' });
            }
            '"' | '\'' | '`' => {
                out.push(c);
                let mut escaped = false;
                for inner in chars.by_ref() {
                    out.push(inner);
                    if c != '`' && inner == '\\' && !escaped {
                        escaped = true;
                        continue;
                    }
                    if inner == c && !escaped {
                        break;
                    }
                    if c != '`' && inner == '\n' {
                        return (out, Some("newline in string literal".to_string()));
                    }
                    escaped = false;
                }
            }
            _ => out.push(c),
        }
    }

    (out, None)
}
