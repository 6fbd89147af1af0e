//! Registry of classes the console can construct
//!
//! Class names are a closed set. Anything typed at the prompt is resolved
//! through [`ClassName::from_str`], never evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClassNameError {
    #[error("Unknown class: '{0}'")]
    Unknown(String),
}

/// A registered class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassName {
    BaseModel,
    User,
    Place,
    State,
    City,
    Amenity,
    Review,
}

impl ClassName {
    /// Every registered class, in registry order
    pub const ALL: [ClassName; 7] = [
        ClassName::BaseModel,
        ClassName::User,
        ClassName::Place,
        ClassName::State,
        ClassName::City,
        ClassName::Amenity,
        ClassName::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassName::BaseModel => "BaseModel",
            ClassName::User => "User",
            ClassName::Place => "Place",
            ClassName::State => "State",
            ClassName::City => "City",
            ClassName::Amenity => "Amenity",
            ClassName::Review => "Review",
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassName {
    type Err = ClassNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassName::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| ClassNameError::Unknown(s.to_string()))
    }
}
