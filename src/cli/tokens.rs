//! Argument tokenizers
//!
//! `create` splits its arguments on raw spaces so that quote characters
//! reach the value coercion untouched. Every other command uses
//! [`shell_split`], which understands quoting the way a POSIX shell does.

/// Splits on single spaces, dropping empty tokens
pub fn split_raw(args: &str) -> Vec<String> {
    args.split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits on whitespace, honouring single quotes, double quotes and
/// backslash escapes.
///
/// Quoted sections adjacent to other text join the same token
/// (`name="Betty Holberton"` is one token). An unterminated quote runs to
/// the end of the input.
pub fn shell_split(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = args.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                for inner in chars.by_ref() {
                    if inner == '\'' {
                        break;
                    }
                    current.push(inner);
                }
            }
            '"' => {
                in_token = true;
                while let Some(inner) = chars.next() {
                    match inner {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => current.push('\\'),
                        },
                        other => current.push(other),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}
