//! Gomfile parser
//!
//! Grammar, one statement per line:
//!
//! ```text
//! gom <string> (, :<key> => <value>)*
//! group <value> (, <value>)* do
//! platform <value> (, <value>)* do      # `os` is accepted as an alias
//! end
//! ```
//!
//! where `<value>` is `'text'`, `"text"`, `:symbol`, `true`, `false` or a bracketed
//! list of those. `#` starts a comment outside of string literals.
//!
//! Entries inside a `group` block get a `group` option, entries inside a `platform`
//! block get a `goos` option, unless the entry sets that option explicitly. When
//! blocks nest, the innermost block wins.

use super::{Dependency, Manifest, OPTION_GOOS, OPTION_GROUP, OptionValue};
use crate::core::GomError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Symbol(String),
    Word(String),
    Comma,
    Arrow,
    LBracket,
    RBracket,
}

/// Parses Gomfile text. `file` is only used in error messages.
///
/// # Errors
///
/// Returns [`GomError::ManifestParse`] with the 1-based line number of the first
/// statement that does not match the grammar, or of the last line when a block
/// is left open.
pub fn parse(content: &str, file: &str) -> Result<Manifest, GomError> {
    let mut manifest = Manifest::new();
    let mut blocks: Vec<(&'static str, OptionValue)> = Vec::new();
    let mut last_line = 0;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        let err = |reason: String| GomError::ManifestParse {
            file: file.to_string(),
            line: line_no,
            reason,
        };

        let tokens = tokenize(raw).map_err(err)?;
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };

        match head {
            Token::Word(w) if w == "gom" => {
                let mut dep = parse_gom(rest).map_err(err)?;
                for (key, value) in blocks.iter().rev() {
                    if !dep.options.contains_key(*key) {
                        dep.options.insert((*key).to_string(), value.clone());
                    }
                }
                manifest.insert(dep);
            }
            Token::Word(w) if w == "group" || w == "platform" || w == "os" => {
                let key = if w == "group" { OPTION_GROUP } else { OPTION_GOOS };
                let value = parse_block_header(w, rest).map_err(err)?;
                blocks.push((key, value));
            }
            Token::Word(w) if w == "end" => {
                if !rest.is_empty() {
                    return Err(err("unexpected tokens after 'end'".to_string()));
                }
                if blocks.pop().is_none() {
                    return Err(err("'end' without an open block".to_string()));
                }
            }
            other => return Err(err(format!("unexpected {}", describe(other)))),
        }
    }

    if let Some((key, _)) = blocks.last() {
        return Err(GomError::ManifestParse {
            file: file.to_string(),
            line: last_line,
            reason: format!("unclosed {key} block, expected 'end'"),
        });
    }

    Ok(manifest)
}

fn parse_gom(tokens: &[Token]) -> Result<Dependency, String> {
    let (name, mut rest) = match tokens.split_first() {
        Some((Token::Str(name), rest)) if !name.is_empty() => (name, rest),
        Some((other, _)) => return Err(format!("expected import path string, found {}", describe(other))),
        None => return Err("expected import path string after 'gom'".to_string()),
    };

    let mut dep = Dependency::new(name.clone());
    while let Some((first, tail)) = rest.split_first() {
        if *first != Token::Comma {
            return Err(format!("expected ',' before option, found {}", describe(first)));
        }
        let (key, tail) = match tail {
            [Token::Symbol(key), Token::Arrow, tail @ ..] => (key, tail),
            [Token::Word(key), Token::Arrow, tail @ ..] => (key, tail),
            _ => return Err("expected ':key => value' option".to_string()),
        };
        let (value, tail) = parse_value(tail)?;
        dep.options.insert(key.clone(), value);
        rest = tail;
    }

    Ok(dep)
}

fn parse_block_header(keyword: &str, tokens: &[Token]) -> Result<OptionValue, String> {
    let Some((Token::Word(last), values)) = tokens.split_last() else {
        return Err(format!("expected 'do' at end of {keyword} block"));
    };
    if last != "do" {
        return Err(format!("expected 'do' at end of {keyword} block"));
    }

    let mut items = Vec::new();
    let mut rest = values;
    loop {
        let (value, tail) = parse_value(rest)?;
        items.extend(value.values().into_iter().map(str::to_string));
        match tail.split_first() {
            None => break,
            Some((Token::Comma, tail)) => rest = tail,
            Some((other, _)) => return Err(format!("expected ',' or 'do', found {}", describe(other))),
        }
    }

    if items.is_empty() {
        return Err(format!("{keyword} block needs at least one value"));
    }
    Ok(if items.len() == 1 {
        OptionValue::Str(items.remove(0))
    } else {
        OptionValue::List(items)
    })
}

fn parse_value(tokens: &[Token]) -> Result<(OptionValue, &[Token]), String> {
    match tokens.split_first() {
        Some((Token::Str(s) | Token::Symbol(s), rest)) => Ok((OptionValue::Str(s.clone()), rest)),
        Some((Token::Word(w), rest)) if w == "true" => Ok((OptionValue::Bool(true), rest)),
        Some((Token::Word(w), rest)) if w == "false" => Ok((OptionValue::Bool(false), rest)),
        Some((Token::LBracket, mut rest)) => {
            let mut items = Vec::new();
            loop {
                match rest.split_first() {
                    Some((Token::RBracket, tail)) => return Ok((OptionValue::List(items), tail)),
                    Some((Token::Str(s) | Token::Symbol(s), tail)) => {
                        items.push(s.clone());
                        rest = match tail.split_first() {
                            Some((Token::Comma, tail)) => tail,
                            _ => tail,
                        };
                    }
                    Some((other, _)) => return Err(format!("unexpected {} in list", describe(other))),
                    None => return Err("unterminated list, expected ']'".to_string()),
                }
            }
        }
        Some((other, _)) => Err(format!("expected a value, found {}", describe(other))),
        None => Err("expected a value".to_string()),
    }
}

fn tokenize(line: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '#' => break,
            c if c.is_whitespace() => {
                chars.next();
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '[' => {
                chars.next();
                tokens.push(Token::LBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RBracket);
            }
            '=' => {
                chars.next();
                if chars.next() != Some('>') {
                    return Err("expected '=>'".to_string());
                }
                tokens.push(Token::Arrow);
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => value.push(escaped),
                            None => return Err("unterminated string literal".to_string()),
                        },
                        Some(ch) => value.push(ch),
                        None => return Err("unterminated string literal".to_string()),
                    }
                }
                tokens.push(Token::Str(value));
            }
            ':' => {
                chars.next();
                let name = take_word(&mut chars);
                if name.is_empty() {
                    return Err("expected symbol name after ':'".to_string());
                }
                tokens.push(Token::Symbol(name));
            }
            c if is_word_char(c) => {
                tokens.push(Token::Word(take_word(&mut chars)));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }

    Ok(tokens)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn take_word(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if !is_word_char(c) {
            break;
        }
        word.push(c);
        chars.next();
    }
    word
}

fn describe(token: &Token) -> String {
    match token {
        Token::Str(s) => format!("string '{s}'"),
        Token::Symbol(s) => format!("symbol ':{s}'"),
        Token::Word(w) => format!("'{w}'"),
        Token::Comma => "','".to_string(),
        Token::Arrow => "'=>'".to_string(),
        Token::LBracket => "'['".to_string(),
        Token::RBracket => "']'".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(content: &str) -> Manifest {
        parse(content, "Gomfile").unwrap()
    }

    fn parse_err_line(content: &str) -> usize {
        match parse(content, "Gomfile").unwrap_err() {
            GomError::ManifestParse {
                line,
                ..
            } => line,
            other => panic!("Expected ManifestParse, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_entries() {
        let manifest = parse_ok("gom 'github.com/a/b'\ngom \"github.com/c/d\"\n");
        let names: Vec<_> = manifest.entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["github.com/a/b", "github.com/c/d"]);
        assert!(manifest.entries.iter().all(|d| d.options.is_empty()));
    }

    #[test]
    fn test_options() {
        let manifest = parse_ok(
            "gom 'github.com/a/b', :commit => 'abc123', :goos => [:linux, 'darwin'], :skipdep => true\n",
        );
        let dep = &manifest.entries[0];
        assert_eq!(dep.commit(), Some("abc123"));
        assert_eq!(
            dep.option(OPTION_GOOS),
            Some(&OptionValue::List(vec!["linux".to_string(), "darwin".to_string()]))
        );
        assert_eq!(dep.option("skipdep"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let manifest = parse_ok("# deps\n\ngom 'a.io/x' # trailing comment\n   \n");
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.entries[0].name, "a.io/x");
    }

    #[test]
    fn test_group_block() {
        let manifest = parse_ok(
            "gom 'a.io/x'\ngroup :test, :development do\n  gom 'a.io/y'\n  gom 'a.io/z', :group => 'production'\nend\n",
        );
        assert_eq!(manifest.get("a.io/x").unwrap().option(OPTION_GROUP), None);
        assert_eq!(
            manifest.get("a.io/y").unwrap().option(OPTION_GROUP),
            Some(&OptionValue::List(vec!["test".to_string(), "development".to_string()]))
        );
        assert_eq!(
            manifest.get("a.io/z").unwrap().option(OPTION_GROUP),
            Some(&OptionValue::Str("production".to_string()))
        );
    }

    #[test]
    fn test_nested_platform_inside_group() {
        let manifest = parse_ok(
            "group :test do\n  platform :windows do\n    gom 'a.io/win'\n  end\n  gom 'a.io/any'\nend\n",
        );
        let win = manifest.get("a.io/win").unwrap();
        assert_eq!(win.option(OPTION_GROUP), Some(&OptionValue::Str("test".to_string())));
        assert_eq!(win.option(OPTION_GOOS), Some(&OptionValue::Str("windows".to_string())));
        let any = manifest.get("a.io/any").unwrap();
        assert_eq!(any.option(OPTION_GOOS), None);
    }

    #[test]
    fn test_os_alias() {
        let manifest = parse_ok("os 'darwin' do\ngom 'a.io/mac'\nend\n");
        assert_eq!(
            manifest.entries[0].option(OPTION_GOOS),
            Some(&OptionValue::Str("darwin".to_string()))
        );
    }

    #[test]
    fn test_duplicate_replaces_earlier() {
        let manifest = parse_ok("gom 'a.io/x'\ngom 'a.io/y'\ngom 'a.io/x', :commit => 'v2'\n");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[0].commit(), Some("v2"));
    }

    #[test]
    fn test_errors_report_line_numbers() {
        assert_eq!(parse_err_line("gom 'a.io/x'\nfoo 'bar'\n"), 2);
        assert_eq!(parse_err_line("gom\n"), 1);
        assert_eq!(parse_err_line("gom 'a.io/x' :commit => 'x'\n"), 1);
        assert_eq!(parse_err_line("gom 'a.io/x', :commit => \n"), 1);
        assert_eq!(parse_err_line("gom 'a.io/x\n"), 1);
        assert_eq!(parse_err_line("gom 'a', :goos => ['linux'\n"), 1);
        assert_eq!(parse_err_line("gom 'a.io/x'\nend\n"), 2);
        assert_eq!(parse_err_line("group :test do\ngom 'a.io/x'\n"), 2);
        assert_eq!(parse_err_line("group :test\n"), 1);
    }

    #[test]
    fn test_error_mentions_file() {
        let err = parse("bogus", "Gomfile").unwrap_err();
        assert!(err.to_string().contains("Gomfile at line 1"));
    }
}
