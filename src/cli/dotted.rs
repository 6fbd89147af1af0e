//! Dotted-call syntax: `<Class>.<method>(<args>)`
//!
//! Supported forms:
//!
//! ```text
//! User.all()
//! User.count()
//! User.show("<id>")
//! User.destroy("<id>")
//! User.update("<id>", "<attribute>", "<value>")
//! User.update("<id>", {"<attribute>": <value>, ...})
//! ```
//!
//! Each form resolves to the same handler the space-separated command uses.

use serde_json::Value;

use crate::domain::{parse_dict, unquote};

/// A parsed dotted call; token lists start with the class name
#[derive(Debug, Clone, PartialEq)]
pub enum DottedCall {
    All(Vec<String>),
    Count(Vec<String>),
    Show(Vec<String>),
    Destroy(Vec<String>),
    Update(Vec<String>),
    /// Dictionary form: `target` holds class and id
    UpdateDict {
        target: Vec<String>,
        entries: Vec<(String, Value)>,
    },
}

/// Parses a dotted call, returning `None` for anything unrecognized
pub fn parse(line: &str) -> Option<DottedCall> {
    let (class, call) = line.split_once('.')?;
    let open = call.find('(')?;
    let method = &call[..open];
    let inner = call[open + 1..].strip_suffix(')')?;

    let mut tokens: Vec<String> = Vec::new();
    if !class.is_empty() {
        tokens.push(class.to_string());
    }

    let args = split_call_args(inner);

    match method {
        "all" if args.is_empty() => Some(DottedCall::All(tokens)),
        "count" if args.is_empty() => Some(DottedCall::Count(tokens)),
        "show" => Some(DottedCall::Show(with_args(tokens, &args))),
        "destroy" => Some(DottedCall::Destroy(with_args(tokens, &args))),
        "update" => {
            if let [id, dict] = args.as_slice() {
                if let Some(entries) = parse_dict(dict) {
                    tokens.push(plain(id));
                    return Some(DottedCall::UpdateDict {
                        target: tokens,
                        entries,
                    });
                }
            }
            Some(DottedCall::Update(with_args(tokens, &args)))
        }
        _ => None,
    }
}

fn with_args(mut tokens: Vec<String>, args: &[String]) -> Vec<String> {
    tokens.extend(args.iter().map(|arg| plain(arg)));
    tokens
}

fn plain(arg: &str) -> String {
    unquote(arg).unwrap_or(arg).to_string()
}

/// Splits call arguments on commas that are outside quotes and brackets
fn split_call_args(inner: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in inner.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '{' | '[' => {
                    depth += 1;
                    current.push(c);
                }
                '}' | ']' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    args.push(current.trim().to_string());
                    current.clear();
                }
                other => current.push(other),
            },
        }
    }

    let last = current.trim();
    if !last.is_empty() || !args.is_empty() {
        args.push(last.to_string());
    }

    args
}
