use rand::rngs::OsRng;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::error::KeyError;

/// A secp256k1 keypair. The secret key never leaves this struct; the HTTP
/// layer only ever sees the address and the raw public key bytes.
#[derive(Debug, Clone)]
pub struct Wallet {
    secret: SecretKey,
    public: PublicKey,
}

impl Wallet {
    /// Generate a fresh keypair from the OS entropy source.
    pub fn generate() -> Result<Self, KeyError> {
        let secp = Secp256k1::new();
        let (secret, public) = secp.generate_keypair(&mut OsRng);
        Ok(Self { secret, public })
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Raw public key bytes: the `x || y` coordinates (64 bytes, big-endian),
    /// i.e. the SEC1 uncompressed encoding without its 0x04 tag.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public.serialize_uncompressed()[1..].to_vec()
    }

    /// The wallet's address: hex(SHA-256(x || y)).
    pub fn address(&self) -> String {
        hex::encode(Sha256::digest(self.public_key_bytes()))
    }
}

/// Derive an address from raw public key bytes.
pub fn address_from_public_key(bytes: &[u8]) -> Result<String, KeyError> {
    if bytes.is_empty() {
        return Err(KeyError::Empty);
    }
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Rebuild a public key from raw `x || y` bytes by splitting them in half.
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return Err(KeyError::OddLength(bytes.len()));
    }
    let mut encoded = Vec::with_capacity(1 + bytes.len());
    encoded.push(0x04); // SEC1 uncompressed tag
    encoded.extend_from_slice(bytes);
    PublicKey::from_slice(&encoded).map_err(KeyError::NotOnCurve)
}
