//! Credential requirements in disjunctive form.
//!
//! The outer list is a conjunction: every entry must hold. An entry that is
//! itself a list holds when any one of its credentials is held.
//!
//! ```
//! use iomenu::Credentials;
//!
//! // admin AND (editor OR publisher)
//! let creds: Credentials = serde_json::from_str(r#"["admin", ["editor", "publisher"]]"#).unwrap();
//! assert!(creds.is_satisfied_by(|c| c == "admin" || c == "publisher"));
//! assert!(!creds.is_satisfied_by(|c| c == "editor"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// One conjunct of a credential requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// The credential must be held.
    One(String),
    /// At least one of the credentials must be held.
    AnyOf(Vec<String>),
}

impl Requirement {
    fn is_satisfied_by(&self, has: &impl Fn(&str) -> bool) -> bool {
        match self {
            Self::One(name) => has(name.as_str()),
            Self::AnyOf(names) => names.iter().any(|n| has(n.as_str())),
        }
    }
}

/// The credentials a user needs to see an item. Empty means no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credentials(Vec<Requirement>);

impl Credentials {
    pub fn none() -> Self {
        Self::default()
    }

    /// All of the given credentials.
    pub fn all<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(|n| Requirement::One(n.into())).collect())
    }

    /// Add a credential that must be held.
    pub fn and(mut self, name: impl Into<String>) -> Self {
        self.0.push(Requirement::One(name.into()));
        self
    }

    /// Add a group of which at least one must be held.
    pub fn and_any_of<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .push(Requirement::AnyOf(names.into_iter().map(Into::into).collect()));
        self
    }

    /// Parse the comma separated shorthand `"c1,c2"` (both required).
    pub fn parse(list: &str) -> Self {
        Self::all(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate against a credential lookup.
    pub fn is_satisfied_by(&self, has: impl Fn(&str) -> bool) -> bool {
        self.0.iter().all(|r| r.is_satisfied_by(&has))
    }
}

impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Shorthand(String),
            List(Vec<Requirement>),
            Missing(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Shorthand(s) => Self::parse(&s),
            Raw::List(list) => Self(list),
            Raw::Missing(()) => Self::none(),
        })
    }
}
