//! Short-lived auth tokens and their pairing with a project's master token.
//!
//! Tokens are opaque random strings. They are not signed and carry no claims;
//! a token is only ever compared for equality and aged by its timestamp.

use std::fmt::Write as _;

use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How long an auth token stays valid, inclusive.
pub const TOKEN_MAX_AGE_SECS: i64 = 300;

/// Random bytes hashed into each token segment.
const SEGMENT_ENTROPY_BYTES: usize = 64;

/// An opaque credential and the instant it was minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

impl Token {
    /// Mint a fresh token with `length` segments, stamped now.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            data: generate(length),
            timestamp: Utc::now(),
        }
    }

    /// Whether the token is still inside its validity window right now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether at most [`TOKEN_MAX_AGE_SECS`] have elapsed between minting and `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp) <= TimeDelta::seconds(TOKEN_MAX_AGE_SECS)
    }

    /// Seconds elapsed between minting and `now`.
    #[must_use]
    pub fn age_secs_at(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.timestamp).num_seconds()
    }

    /// Pair this token with the project's master token. The master token is not checked.
    #[must_use]
    pub fn to_bundle(self, master: impl Into<String>) -> TokenBundle {
        TokenBundle {
            auth: self,
            master: master.into(),
        }
    }
}

/// A project's short-lived auth token plus its long-lived master token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub auth: Token,
    pub master: String,
}

/// `length` SHA-256 hex digests of fresh OS randomness, joined by `-`.
///
/// `length` is the number of segments, not a byte count. Zero yields `""`.
#[must_use]
pub fn generate(length: usize) -> String {
    generate_with(&mut OsRng, length)
}

/// Like [`generate`], drawing entropy from the supplied source.
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| segment(rng))
        .collect::<Vec<_>>()
        .join("-")
}

fn segment<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut entropy = [0u8; SEGMENT_ENTROPY_BYTES];
    rng.fill_bytes(&mut entropy);
    let digest = Sha256::digest(entropy);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
