//! Query expression validation
//!
//! Rules only need a syntax check here; evaluation happens elsewhere.

/// Syntax-only validator for query expressions
pub trait ExprValidator: Send + Sync {
    /// Check that `expr` is well formed, returning a human-readable error otherwise
    fn validate(&self, expr: &str) -> Result<(), String>;
}

/// Structural checker for MetricsQL/PromQL expressions
///
/// Verifies that the expression is not blank, that string literals are
/// terminated and that `()`, `[]` and `{}` are balanced outside of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxChecker;

impl ExprValidator for SyntaxChecker {
    fn validate(&self, expr: &str) -> Result<(), String> {
        if expr.trim().is_empty() {
            return Err("empty expression".to_string());
        }

        let mut stack: Vec<(char, usize)> = Vec::new();
        let mut chars = expr.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '"' | '\'' | '`' => {
                    let quote = c;
                    let mut closed = false;
                    while let Some((_, next)) = chars.next() {
                        if next == '\\' && quote != '`' {
                            chars.next();
                            continue;
                        }
                        if next == quote {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(format!("unterminated string literal at position {}", pos));
                    }
                }
                '#' => {
                    // comment runs to end of line
                    for (_, next) in chars.by_ref() {
                        if next == '\n' {
                            break;
                        }
                    }
                }
                '(' | '[' | '{' => stack.push((c, pos)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, open_pos)) => {
                            return Err(format!(
                                "unexpected {:?} at position {}: {:?} opened at position {} is not closed",
                                c, pos, open, open_pos
                            ))
                        }
                        None => return Err(format!("unexpected {:?} at position {}", c, pos)),
                    }
                }
                _ => {}
            }
        }

        match stack.pop() {
            Some((open, pos)) => Err(format!("unclosed {:?} opened at position {}", open, pos)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expressions() {
        let checker = SyntaxChecker;
        assert!(checker.validate("up").is_ok());
        assert!(checker.validate("up == 0").is_ok());
        assert!(checker
            .validate(r#"sum(rate(http_requests_total{job="api", path=~"/v1/(a|b)"}[5m])) by (instance)"#)
            .is_ok());
        assert!(checker.validate(r#"label_replace(up, "x", "\"(", "", "")"#).is_ok());
    }

    #[test]
    fn test_empty_expression() {
        assert!(SyntaxChecker.validate("  ").is_err());
    }

    #[test]
    fn test_unbalanced_brackets() {
        let checker = SyntaxChecker;
        assert!(checker.validate("sum(rate(x[5m])").is_err());
        assert!(checker.validate("rate(x[5m)]").is_err());
        assert!(checker.validate("up)").is_err());
        assert!(checker.validate("up{job=\"a\"").is_err());
    }

    #[test]
    fn test_unterminated_string() {
        let err = SyntaxChecker.validate(r#"up{job="a}"#).unwrap_err();
        assert!(err.contains("unterminated"));
    }

    #[test]
    fn test_comment_ignored() {
        assert!(SyntaxChecker.validate("up # (unbalanced in comment\n").is_ok());
    }
}
