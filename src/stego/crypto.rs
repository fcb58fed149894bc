// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Keyed payload encryption stage.
//!
//! AES-256-GCM-SIV with an Argon2id-derived key. Salt and nonce are fixed
//! constants rather than random values so that encoding the same
//! (image, payload, key, seed) twice yields byte-identical output — the
//! determinism contract of the engine. SIV mode is nonce-misuse resistant,
//! so a fixed nonce leaks only equality of identical plaintexts under the
//! same key, never key material.
//!
//! Encrypt and decrypt are exactly symmetric: everything `encrypt` emits,
//! `decrypt` consumes. Swapping in a different cipher later only requires
//! both sides to change together.

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM-SIV authentication tag length in bytes. Every ciphertext is the
/// plaintext length plus this.
pub const TAG_LEN: usize = 16;

/// Fixed salt for encryption key derivation. Intentionally constant so the
/// decoder can derive the key from the user's key string alone; it is
/// domain-separated from the permutation salt so seed and key never collide.
/// NOT secret — just a constant fed into Argon2.
const KEY_SALT: &[u8; 16] = b"stegomat-key-v1\0";

/// Fixed nonce for payload encryption. NOT secret — sound under GCM-SIV's
/// misuse resistance, and required for deterministic encode output.
const PAYLOAD_NONCE: [u8; NONCE_LEN] = *b"stegomat-non";

/// Derive the AES-256 key from the user's key string.
///
/// Deterministic given the key string, so encoder and decoder agree.
fn derive_encryption_key(key: &str) -> Zeroizing<[u8; 32]> {
    let mut output = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(key.as_bytes(), KEY_SALT, &mut *output)
        .expect("Argon2 encryption key derivation should not fail");
    output
}

/// Encrypt a payload with AES-256-GCM-SIV.
///
/// Returns the ciphertext with the 16-byte authentication tag appended.
///
/// # Errors
/// [`StegoError::InvalidKey`] if `key` is empty.
pub fn encrypt(plaintext: &[u8], key: &str) -> Result<Vec<u8>, StegoError> {
    if key.is_empty() {
        return Err(StegoError::InvalidKey);
    }

    let derived = derive_encryption_key(key);
    let cipher = Aes256GcmSiv::new_from_slice(&*derived).expect("valid key length");
    let nonce = Nonce::from_slice(&PAYLOAD_NONCE);

    Ok(cipher
        .encrypt(nonce, plaintext)
        .expect("AES-GCM-SIV encrypt should not fail"))
}

/// Decrypt a payload with AES-256-GCM-SIV.
///
/// # Errors
/// - [`StegoError::InvalidKey`] if `key` is empty.
/// - [`StegoError::MalformedPayload`] if authentication fails (wrong key or
///   corrupted/foreign data).
pub fn decrypt(ciphertext: &[u8], key: &str) -> Result<Vec<u8>, StegoError> {
    if key.is_empty() {
        return Err(StegoError::InvalidKey);
    }

    let derived = derive_encryption_key(key);
    let cipher = Aes256GcmSiv::new_from_slice(&*derived).expect("valid key length");
    let nonce = Nonce::from_slice(&PAYLOAD_NONCE);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| StegoError::MalformedPayload)
}
