use std::fmt;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::crypto;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::KeyError;
use super::errors::KeyKind;

const PROBE_MESSAGE: &[u8] = b"key-pair-probe";

/// Where a PEM key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Base64 of the PEM text, as carried in configuration values.
    Inline(String),
    /// Path to a PEM file.
    File(PathBuf),
}

impl KeySource {
    fn read(&self, kind: KeyKind) -> Result<Vec<u8>, KeyError> {
        match self {
            KeySource::Inline(encoded) => STANDARD
                .decode(encoded.trim())
                .map_err(|e| KeyError::Encoding(kind, e.to_string())),
            KeySource::File(path) => std::fs::read(path).map_err(|e| KeyError::Unreadable {
                kind,
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// RSA key pair used to sign and verify tokens.
///
/// The public half is always present. The private half is absent for
/// verify-only deployments.
#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
}

impl KeyMaterial {
    /// Build a key pair from PEM bytes.
    ///
    /// The pair is probed with a sign/verify cycle so a mismatched public key
    /// fails here instead of on the first request.
    ///
    /// # Errors
    /// * `Parse` - Either PEM is not an RSA key
    /// * `Mismatch` - The public key does not verify the private key's signatures
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| KeyError::Parse(KeyKind::Private, e.to_string()))?;
        let keys = Self {
            encoding_key: Some(encoding_key),
            decoding_key: decoding_key(public_pem)?,
        };

        keys.probe()?;
        Ok(keys)
    }

    /// Build verify-only key material from a public PEM.
    pub fn verifying_only(public_pem: &[u8]) -> Result<Self, KeyError> {
        Ok(Self {
            encoding_key: None,
            decoding_key: decoding_key(public_pem)?,
        })
    }

    pub fn load(private: &KeySource, public: &KeySource) -> Result<Self, KeyError> {
        let private_pem = private.read(KeyKind::Private)?;
        let public_pem = public.read(KeyKind::Public)?;
        Self::from_pem(&private_pem, &public_pem)
    }

    pub fn load_verifying_only(public: &KeySource) -> Result<Self, KeyError> {
        Self::verifying_only(&public.read(KeyKind::Public)?)
    }

    pub fn can_sign(&self) -> bool {
        self.encoding_key.is_some()
    }

    pub(crate) fn encoding_key(&self) -> Option<&EncodingKey> {
        self.encoding_key.as_ref()
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    fn probe(&self) -> Result<(), KeyError> {
        let Some(encoding_key) = &self.encoding_key else {
            return Ok(());
        };

        let signature = crypto::sign(PROBE_MESSAGE, encoding_key, Algorithm::RS256)
            .map_err(|e| KeyError::Parse(KeyKind::Private, e.to_string()))?;
        let verified = crypto::verify(
            &signature,
            PROBE_MESSAGE,
            &self.decoding_key,
            Algorithm::RS256,
        )
        .map_err(|e| KeyError::Parse(KeyKind::Public, e.to_string()))?;

        if verified {
            Ok(())
        } else {
            Err(KeyError::Mismatch(
                "public key does not verify signatures made by the private key".to_string(),
            ))
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}

fn decoding_key(public_pem: &[u8]) -> Result<DecodingKey, KeyError> {
    DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyError::Parse(KeyKind::Public, e.to_string()))
}
