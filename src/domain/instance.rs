//! Stored object instances
//!
//! An [`Instance`] is an attribute bag with a fixed identity: class, id and
//! creation/update timestamps. Everything else lives in `attributes`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::class::ClassName;

/// Attributes that identify an instance and cannot be assigned by commands
pub const RESERVED_ATTRIBUTES: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// Returns true if `name` is one of the identity attributes
pub fn is_reserved(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&name)
}

/// Builds the storage key `"<ClassName>.<id>"`
pub fn object_key(class: ClassName, id: &str) -> String {
    format!("{}.{}", class, id)
}

/// A stored domain object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "__class__")]
    pub class: ClassName,

    /// Unique identifier, fixed at construction
    pub id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Free-form attributes, flattened into the persisted object
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Instance {
    /// Creates an instance of `class` with a fresh id and no attributes
    pub fn new(class: ClassName) -> Self {
        let now = Utc::now();
        Self {
            class,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Creates an instance with initial attributes.
    ///
    /// Reserved names are dropped so the generated identity always wins.
    pub fn with_attributes(
        class: ClassName,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        let mut instance = Self::new(class);
        for (name, value) in attributes {
            instance.set(name, value);
        }
        instance
    }

    /// Returns the storage key for this instance
    pub fn key(&self) -> String {
        object_key(self.class, &self.id)
    }

    /// Gets an attribute by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets an attribute, returning false if the name is reserved
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let name = name.into();
        if is_reserved(&name) {
            return false;
        }
        self.attributes.insert(name, value.into());
        true
    }

    /// Marks the instance as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{\"id\": {}, \"created_at\": {}, \"updated_at\": {}",
            self.class,
            self.id,
            Value::from(self.id.as_str()),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {}: {}", Value::from(name.as_str()), value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_instance_has_identity() {
        let instance = Instance::new(ClassName::User);

        assert_eq!(instance.class, ClassName::User);
        assert!(Uuid::parse_str(&instance.id).is_ok());
        assert_eq!(instance.created_at, instance.updated_at);
        assert!(instance.attributes.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let a = Instance::new(ClassName::City);
        let b = Instance::new(ClassName::City);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn key_format() {
        let instance = Instance::new(ClassName::Place);
        assert_eq!(instance.key(), format!("Place.{}", instance.id));
    }

    #[test]
    fn reserved_attributes_are_rejected() {
        let mut instance = Instance::new(ClassName::User);
        let id = instance.id.clone();

        assert!(!instance.set("id", "other"));
        assert!(!instance.set("created_at", "yesterday"));
        assert!(instance.set("email", "a@b.com"));

        assert_eq!(instance.id, id);
        assert_eq!(instance.get("email"), Some(&json!("a@b.com")));
        assert!(instance.get("id").is_none());
    }

    #[test]
    fn with_attributes_skips_reserved() {
        let instance = Instance::with_attributes(
            ClassName::State,
            vec![
                ("name".to_string(), json!("California")),
                ("id".to_string(), json!("forged")),
            ],
        );

        assert_ne!(instance.id, "forged");
        assert_eq!(instance.get("name"), Some(&json!("California")));
        assert_eq!(instance.attributes.len(), 1);
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut instance = Instance::new(ClassName::Review);
        let before = instance.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        instance.touch();
        assert!(instance.updated_at > before);
        assert_eq!(instance.created_at, before);
    }

    #[test]
    fn display_shows_identity_and_attributes() {
        let instance = Instance::with_attributes(
            ClassName::User,
            vec![
                ("name".to_string(), json!("Betty")),
                ("age".to_string(), json!(23)),
            ],
        );
        let text = instance.to_string();

        assert!(text.starts_with(&format!("[User] ({}) {{", instance.id)));
        assert!(text.contains(&format!("\"id\": \"{}\"", instance.id)));
        assert!(text.contains("\"name\": \"Betty\""));
        assert!(text.contains("\"age\": 23"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn persisted_form_is_flat() {
        let mut instance = Instance::new(ClassName::Amenity);
        instance.set("name", "Wifi");

        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["__class__"], json!("Amenity"));
        assert_eq!(value["id"], json!(instance.id));
        assert_eq!(value["name"], json!("Wifi"));

        let back: Instance = serde_json::from_value(value).unwrap();
        assert_eq!(back, instance);
    }
}
