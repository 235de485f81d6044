//! Environment variable substitution for rule files
//!
//! Replaces `%{NAME}` references with the value of environment variable
//! `NAME`. References to unset variables are left untouched.

const REF_OPEN: &str = "%{";
const REF_CLOSE: char = '}';

/// Substitute references using the process environment
pub fn replace(input: &str) -> String {
    replace_with(input, |name| std::env::var(name).ok())
}

/// Substitute references using a custom lookup
pub fn replace_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(REF_OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + REF_OPEN.len()..];

        match after.find(REF_CLOSE) {
            Some(end) if is_var_name(&after[..end]) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[start..start + REF_OPEN.len() + end + 1]),
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str(REF_OPEN);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
