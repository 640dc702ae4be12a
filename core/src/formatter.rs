//! # Formatter
//!
//! Deterministic whitespace normalizer for assembled source.
//!
//! The assembler already emits 2-space indentation; this pass makes the
//! layout canonical (tabs, trailing spaces, blank-line runs, final newline)
//! and rejects output whose delimiters do not balance, which would mean the
//! assembler produced malformed code.

use crate::error::{AppError, AppResult};

/// Normalizes generated source text.
///
/// * Tabs become two spaces.
/// * Trailing whitespace is trimmed from every line.
/// * Leading and trailing blank lines are removed.
/// * Runs of blank lines collapse to one.
/// * The result ends with exactly one newline.
///
/// # Errors
///
/// `AppError::FormatterFailure` when `()`, `[]` or `{}` are unbalanced outside
/// string literals.
pub fn format_source(source: &str) -> AppResult<String> {
    check_balance(source)?;

    let mut out = String::with_capacity(source.len());
    let mut pending_blank = false;
    for raw in source.lines() {
        let line = raw.replace('\t', "  ");
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Checks delimiter balance, skipping string and template literals.
///
/// `'...'` and `"..."` end at the next newline at the latest; JSX text reaches
/// this point with its quotes and brackets already escaped.
pub(crate) fn check_balance(source: &str) -> AppResult<()> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut line_no = 1;

    for c in source.chars() {
        if c == '\n' {
            line_no += 1;
            if quote != Some('`') {
                quote = None;
            }
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => stack.push((c, line_no)),
            ')' | ']' | '}' => match stack.pop() {
                Some((open, _)) if closing_for(open) == c => {}
                Some((open, at)) => {
                    return Err(AppError::FormatterFailure(format!(
                        "'{}' on line {} closes '{}' opened on line {}",
                        c, line_no, open, at
                    )))
                }
                None => {
                    return Err(AppError::FormatterFailure(format!(
                        "Unmatched '{}' on line {}",
                        c, line_no
                    )))
                }
            },
            _ => {}
        }
    }

    match stack.pop() {
        Some((open, at)) => Err(AppError::FormatterFailure(format!(
            "Unclosed '{}' opened on line {}",
            open, at
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_normalization() {
        let src = "\n\n\tconst a = 1;   \n\n\n\nconst b = [\n\t\t2,\n];\n\n\n";
        assert_eq!(
            format_source(src).unwrap(),
            "  const a = 1;\n\nconst b = [\n    2,\n];\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let src = "function f() {\n  return (\n    <div>{\"x\"}</div>\n  )\n}\n\n\n";
        let once = format_source(src).unwrap();
        assert_eq!(format_source(&once).unwrap(), once);
    }

    #[test]
    fn test_delimiters_in_strings_are_ignored() {
        assert!(format_source("const s = \"(((\";\nconst t = `}}`;\n").is_ok());
        assert!(format_source("<p>Don't stop (really)</p>\n").is_ok());
        assert!(format_source("const c = (v) => v.plan === '(pro'\n").is_ok());
    }

    #[test]
    fn test_template_literal_spans_lines() {
        assert!(format_source("const s = `a\n(\nb`\n").is_ok());
        assert!(matches!(
            format_source("const s = \"a\n(\n\"\n"),
            Err(AppError::FormatterFailure(_))
        ));
    }

    #[test]
    fn test_unbalanced_is_rejected() {
        let err = format_source("function f() {\n  return (1;\n}\n").unwrap_err();
        assert!(matches!(err, AppError::FormatterFailure(_)));
        assert!(matches!(
            format_source("const a = [1, 2;\n"),
            Err(AppError::FormatterFailure(_))
        ));
        assert!(matches!(
            format_source("}\n"),
            Err(AppError::FormatterFailure(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_source("\n\n").unwrap(), "\n");
    }
}
