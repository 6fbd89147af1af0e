//! Console command handlers
//!
//! Each handler checks its preconditions in a fixed order and stops at the
//! first one that fails. The resulting [`CommandError`] displays as the
//! exact diagnostic line shown to the user.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    coerce_scalar, is_reserved, object_key, parse_literal, ClassName, Instance,
};
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    MissingClass,

    #[error("** class doesn't exist **")]
    UnknownClass,

    #[error("** instance id missing **")]
    MissingId,

    #[error("** no instance found **")]
    NoInstance,

    #[error("** attribute name missing **")]
    MissingAttribute,

    #[error("** value missing **")]
    MissingValue,

    #[error("** attribute can't be updated **")]
    ReadOnlyAttribute,

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// A handler's output line, if it prints one
pub type CommandResult = Result<Option<String>, CommandError>;

/// `create <class> [<key>=<value> ...]`
pub fn create<S: Storage>(storage: &mut S, tokens: &[String]) -> CommandResult {
    let class = class_arg(tokens)?;

    let mut attributes = Vec::new();
    for token in &tokens[1..] {
        let Some((name, raw)) = token.split_once('=') else {
            tracing::debug!(token = %token, "Skipping parameter without '='");
            continue;
        };
        if name.is_empty() || is_reserved(name) {
            tracing::debug!(token = %token, "Skipping unusable parameter");
            continue;
        }
        attributes.push((name.to_string(), coerce_scalar(raw)));
    }

    let instance = Instance::with_attributes(class, attributes);
    let id = instance.id.clone();
    let key = instance.key();
    tracing::debug!(key = %key, attributes = instance.attributes.len(), "Created instance");

    storage.insert(instance);
    if let Err(err) = storage.save() {
        // Unsaved instances are never reported, so drop this one
        storage.remove(&key);
        return Err(err.into());
    }

    Ok(Some(id))
}

/// `show <class> <id>`
pub fn show<S: Storage>(storage: &S, tokens: &[String]) -> CommandResult {
    let key = target_key(storage, tokens)?;
    let instance = storage.get(&key).ok_or(CommandError::NoInstance)?;
    Ok(Some(instance.to_string()))
}

/// `destroy <class> <id>`
pub fn destroy<S: Storage>(storage: &mut S, tokens: &[String]) -> CommandResult {
    let key = target_key(storage, tokens)?;
    storage.remove(&key);
    storage.save()?;

    tracing::debug!(key = %key, "Destroyed instance");
    Ok(None)
}

/// `all [<class>]`
pub fn all<S: Storage>(storage: &S, tokens: &[String]) -> CommandResult {
    let filter = if tokens.is_empty() {
        None
    } else {
        Some(class_arg(tokens)?)
    };

    let listed: Vec<String> = storage
        .all(filter)
        .into_iter()
        .map(|instance| instance.to_string())
        .collect();

    Ok(Some(format!("[{}]", listed.join(", "))))
}

/// `count <class>`
pub fn count<S: Storage>(storage: &S, tokens: &[String]) -> CommandResult {
    let class = class_arg(tokens)?;
    Ok(Some(storage.len_of(class).to_string()))
}

/// `update <class> <id> <attribute> <value>`
pub fn update<S: Storage>(storage: &mut S, tokens: &[String]) -> CommandResult {
    let key = target_key(storage, tokens)?;
    let name = tokens.get(2).ok_or(CommandError::MissingAttribute)?;
    let raw = tokens.get(3).ok_or(CommandError::MissingValue)?;

    assign(storage, &key, name, parse_literal(raw))
}

/// Assigns an already typed value; `tokens` holds the class and id
pub fn update_value<S: Storage>(
    storage: &mut S,
    tokens: &[String],
    name: &str,
    value: Value,
) -> CommandResult {
    let key = target_key(storage, tokens)?;
    assign(storage, &key, name, value)
}

fn assign<S: Storage>(storage: &mut S, key: &str, name: &str, value: Value) -> CommandResult {
    if is_reserved(name) {
        return Err(CommandError::ReadOnlyAttribute);
    }

    let instance = storage.get_mut(key).ok_or(CommandError::NoInstance)?;
    instance.set(name, value);
    instance.touch();
    storage.save()?;

    tracing::debug!(key = %key, attribute = %name, "Updated instance");
    Ok(None)
}

fn class_arg(tokens: &[String]) -> Result<ClassName, CommandError> {
    let name = tokens.first().ok_or(CommandError::MissingClass)?;
    name.parse().map_err(|_| CommandError::UnknownClass)
}

/// Resolves `<class> <id>` to the key of an existing instance
fn target_key<S: Storage>(storage: &S, tokens: &[String]) -> Result<String, CommandError> {
    let class = class_arg(tokens)?;
    let id = tokens.get(1).ok_or(CommandError::MissingId)?;

    let key = object_key(class, id);
    if storage.get(&key).is_none() {
        return Err(CommandError::NoInstance);
    }
    Ok(key)
}
