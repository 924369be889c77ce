//! Ключи, к которым привязаны оценки, лайки и счётчики просмотров.
//!
//! Ключ субъекта становится именем поля в общем документе `appViews`,
//! поэтому он проверяется на границе и никогда не попадает в хранилище
//! в произвольном виде.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_KEY_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    Empty,
    TooLong(usize),
    InvalidChar(char),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Empty => write!(f, "key must not be empty"),
            KeyError::TooLong(len) => {
                write!(f, "key is {} chars long, max is {}", len, MAX_KEY_LEN)
            }
            KeyError::InvalidChar(c) => write!(f, "key contains invalid character {:?}", c),
        }
    }
}

impl std::error::Error for KeyError {}

fn validate_key(raw: &str) -> Result<(), KeyError> {
    if raw.is_empty() {
        return Err(KeyError::Empty);
    }
    let len = raw.chars().count();
    if len > MAX_KEY_LEN {
        return Err(KeyError::TooLong(len));
    }
    if let Some(c) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(KeyError::InvalidChar(c));
    }
    Ok(())
}

/// Ключ субъекта (приложения), к которому относятся оценки, лайки и просмотры
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectKey(String);

impl SubjectKey {
    pub fn parse(raw: impl Into<String>) -> Result<Self, KeyError> {
        let raw = raw.into();
        validate_key(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubjectKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SubjectKey> for String {
    fn from(key: SubjectKey) -> Self {
        key.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Анонимный ключ устройства, по которому дедуплицируются оценки и лайки
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorKey(String);

impl ActorKey {
    pub fn parse(raw: impl Into<String>) -> Result<Self, KeyError> {
        let raw = raw.into();
        validate_key(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActorKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ActorKey> for String {
    fn from(key: ActorKey) -> Self {
        key.0
    }
}

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
