use thiserror::Error;

/// Structural admission failures for a submitted transaction.
/// These are checked by the ledger before a transaction enters the pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("sender must not be empty")]
    EmptySender,
    #[error("recipient must not be empty")]
    EmptyRecipient,
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

/// Signing failed inside the curve library (bad key, bad digest).
#[derive(Debug, Error)]
pub enum SignError {
    #[error("ecdsa signing failed: {0}")]
    Curve(#[from] secp256k1::Error),
}

/// Signature verification could not even be attempted.
/// A signature that parses but does not match yields `Ok(false)`, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("missing signature")]
    Missing,
    #[error("malformed signature: {0}")]
    Malformed(&'static str),
}

/// Malformed public-key material or a failed key generation.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("empty public key")]
    Empty,
    #[error("public key must split into two equal coordinates, got {0} bytes")]
    OddLength(usize),
    #[error("point is not on the curve: {0}")]
    NotOnCurve(secp256k1::Error),
    #[error("key generation failed: {0}")]
    Generation(secp256k1::Error),
}
