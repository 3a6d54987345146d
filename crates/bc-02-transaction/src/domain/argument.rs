//! # Arguments
//!
//! Named binary parameters passed to a contract on spawn or invoke.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// A single named argument. The value is copied in and out.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    name: String,
    #[serde_as(as = "Hex")]
    value: Vec<u8>,
}

impl Argument {
    /// Create an argument.
    pub fn new(name: impl Into<String>, value: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.into(),
            value: value.as_ref().to_vec(),
        }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// Ordered list of arguments. Order is part of the instruction hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    /// Empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<[u8]>) -> Self {
        self.0.push(Argument::new(name, value));
        self
    }

    /// Append an argument.
    pub fn push(&mut self, arg: Argument) {
        self.0.push(arg);
    }

    /// Value of the first argument called `name`.
    ///
    /// `None` if absent, which is different from a present empty value.
    pub fn search(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_slice())
    }

    /// All names in order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|a| a.name.as_str()).collect()
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(args: Vec<Argument>) -> Self {
        Self(args)
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
