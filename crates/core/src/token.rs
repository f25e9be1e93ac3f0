// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job token identity.
//!
//! A token is the only handle shared between the submitting process, the
//! chain of worker processes, and the status viewer. Every job file name is
//! derived from it, so parsing is strict: anything that is not exactly 32
//! lowercase alphanumerics is rejected before a path is ever built from it.

use crate::store::JobStore;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Required token length in characters.
pub const TOKEN_LEN: usize = 32;

/// Generation alphabet: lowercase alphanumerics only.
const TOKEN_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Attempts made to find an unused token before giving up.
const MAX_ALLOCATE_ATTEMPTS: usize = 10;

/// Errors from token parsing and allocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token must be exactly {TOKEN_LEN} characters, got {0}")]
    MalformedLength(usize),
    #[error("token contains invalid character {ch:?} at position {pos}")]
    MalformedCharacter { ch: char, pos: usize },
    #[error("no unused token found after {0} attempts")]
    AttemptsExhausted(usize),
}

/// A validated 32-character job token.
///
/// Construction goes through [`Token::generate`] or [`Token::parse`]; there
/// is no way to hold a `Token` that would not round-trip through validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Token(SmolStr);

impl Token {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(SmolStr::new(nanoid::nanoid!(TOKEN_LEN, &TOKEN_ALPHABET)))
    }

    /// Parse and validate a token string.
    ///
    /// Fails closed: length is checked before characters, and the first
    /// offending character is reported with its position.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let len = s.chars().count();
        if len != TOKEN_LEN {
            return Err(TokenError::MalformedLength(len));
        }
        for (pos, ch) in s.chars().enumerate() {
            if !(ch.is_ascii_digit() || ch.is_ascii_lowercase()) {
                return Err(TokenError::MalformedCharacter { ch, pos });
            }
        }
        Ok(Self(SmolStr::new(s)))
    }

    /// Allocate a token with no existing job files.
    ///
    /// Retries generation up to 10 times when the fresh token collides with
    /// an existing file family, then reports exhaustion.
    pub fn allocate(store: &dyn JobStore) -> Result<Self, TokenError> {
        for _ in 0..MAX_ALLOCATE_ATTEMPTS {
            let token = Self::generate();
            if !store.family_exists(&crate::files::JobKey::Token(token.clone())) {
                return Ok(token);
            }
            tracing::debug!(%token, "token collision, regenerating");
        }
        Err(TokenError::AttemptsExhausted(MAX_ALLOCATE_ATTEMPTS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::borrow::Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
