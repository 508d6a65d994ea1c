//! Credential encryption
//!
//! Keeps secrets encrypted in test data until the moment they cross
//! into an interactive form field.

mod cipher;

pub use cipher::{CredentialCipher, CryptoError};
