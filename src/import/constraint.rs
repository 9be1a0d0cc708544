//! Go build constraints
//!
//! Decides whether a source file takes part in a build for a target OS and
//! architecture. Two mechanisms are honored:
//!
//! - **file names**: `name_GOOS.go`, `name_GOARCH.go` and `name_GOOS_GOARCH.go`
//! - **constraint lines**: a `//go:build` expression, or when absent the legacy
//!   `// +build` lines, placed before the package clause
//!
//! Satisfied tags are the target OS and architecture (plus the OS implied by
//! them, such as `linux` for `android`), `unix` on Unix-like systems, `gc`,
//! `cgo` and every `go1.N` release tag. Any other tag, `ignore` included, is
//! unsatisfied.

use crate::utils::platform::{host_goarch, host_goos};

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux", "nacl", "netbsd",
    "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux", "netbsd", "openbsd",
    "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle", "mips64",
    "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv", "riscv64", "s390", "s390x",
    "sparc", "sparc64", "wasm",
];

/// Operating system and architecture a package is scanned for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Go `GOOS` name
    pub goos: String,
    /// Go `GOARCH` name
    pub goarch: String,
}

impl BuildTarget {
    /// Creates a target for `goos`/`goarch`.
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
        }
    }

    /// The machine gom is running on.
    #[must_use]
    pub fn host() -> Self {
        Self::new(host_goos(), host_goarch())
    }

    /// Whether a single build tag holds for this target.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "gc" | "cgo" => true,
            _ => tag
                .strip_prefix("go1.")
                .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit())),
        }
    }

    /// Applies the `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name suffixes.
    #[must_use]
    pub fn matches_file_name(&self, name: &str) -> bool {
        let stem = name.strip_suffix(".go").unwrap_or(name);
        let Some(start) = stem.find('_') else {
            return true;
        };
        // the leading element is the empty string before the first '_'
        let parts: Vec<&str> = stem[start..].split('_').collect();
        let n = parts.len();

        if n >= 3 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 2]) && self.has_tag(parts[n - 1]);
        }
        if KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 1]);
        }
        true
    }

    /// Evaluates the constraint lines in the header of `src`.
    ///
    /// # Errors
    ///
    /// Returns a reason when a `//go:build` line is malformed or repeated.
    pub fn matches_source(&self, src: &str) -> Result<bool, String> {
        let lines = ConstraintLines::read(src)?;
        if let Some(expr) = lines.go_build {
            return eval_expr(&expr, self);
        }
        Ok(lines.plus_build.iter().all(|line| self.eval_plus_build(line)))
    }

    /// `// +build` line: space-separated options are ORed, comma-separated
    /// terms within an option are ANDed.
    fn eval_plus_build(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !tag.is_empty() && !tag.starts_with('!') && !self.has_tag(tag),
                None => self.has_tag(term),
            })
        })
    }
}

/// Constraint lines found before the package clause
#[derive(Debug, Default)]
struct ConstraintLines {
    go_build: Option<String>,
    plus_build: Vec<String>,
}

impl ConstraintLines {
    fn read(src: &str) -> Result<Self, String> {
        let mut found = Self::default();
        // `+build` lines only count when a blank line follows their comment block
        let mut pending = Vec::new();

        for line in src.lines() {
            let line = line.trim();
            if line.is_empty() {
                found.plus_build.append(&mut pending);
                continue;
            }
            let Some(comment) = line.strip_prefix("//") else {
                break;
            };
            if let Some(expr) = comment.strip_prefix("go:build") {
                if !expr.is_empty() && !expr.starts_with([' ', '\t']) {
                    continue;
                }
                if found.go_build.is_some() {
                    return Err("multiple //go:build comments".to_string());
                }
                found.go_build = Some(expr.trim().to_string());
            } else if let Some(rest) = comment.trim_start().strip_prefix("+build") {
                if rest.is_empty() || rest.starts_with([' ', '\t']) {
                    pending.push(rest.trim().to_string());
                }
            }
        }
        Ok(found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Tag(&'a str),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while let Some(c) = rest.chars().next() {
        let (token, len) = match c {
            '!' => (Token::Not, 1),
            '(' => (Token::Open, 1),
            ')' => (Token::Close, 1),
            '&' if rest.starts_with("&&") => (Token::And, 2),
            '|' if rest.starts_with("||") => (Token::Or, 2),
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let len = rest
                    .char_indices()
                    .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '.'))
                    .map_or(rest.len(), |(i, _)| i);
                (Token::Tag(&rest[..len]), len)
            }
            other => return Err(format!("invalid //go:build expression: unexpected '{other}'")),
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    Ok(tokens)
}

/// Evaluates a `//go:build` expression (`||`, `&&`, `!`, parentheses).
fn eval_expr(expr: &str, target: &BuildTarget) -> Result<bool, String> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err("empty //go:build expression".to_string());
    }
    let mut parser = ExprParser {
        tokens: &tokens,
        pos: 0,
        target,
    };
    let value = parser.or()?;
    if parser.pos != tokens.len() {
        return Err(format!("invalid //go:build expression '{expr}'"));
    }
    Ok(value)
}

struct ExprParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    target: &'t BuildTarget,
}

impl<'a> ExprParser<'_, 'a> {
    fn next_is(&mut self, token: Token<'a>) -> bool {
        if self.tokens.get(self.pos) == Some(&token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<bool, String> {
        let mut value = self.and()?;
        while self.next_is(Token::Or) {
            let rhs = self.and()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn and(&mut self) -> Result<bool, String> {
        let mut value = self.not()?;
        while self.next_is(Token::And) {
            let rhs = self.not()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn not(&mut self) -> Result<bool, String> {
        if self.next_is(Token::Not) {
            return Ok(!self.not()?);
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<bool, String> {
        match self.tokens.get(self.pos).copied() {
            Some(Token::Open) => {
                self.pos += 1;
                let value = self.or()?;
                if !self.next_is(Token::Close) {
                    return Err("invalid //go:build expression: missing ')'".to_string());
                }
                Ok(value)
            }
            Some(Token::Tag(tag)) => {
                self.pos += 1;
                Ok(self.target.has_tag(tag))
            }
            _ => Err("invalid //go:build expression: expected a tag".to_string()),
        }
    }
}
