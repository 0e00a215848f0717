//! bitcoin_secp256k1 backend for signer recovery and ECDH. More about it in [`crate::secp256k1`].
use alloy_primitives::{B256, B512};
use core::fmt;
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};

// Silence the unused crate dependency warning.
use k256 as _;

/// Immutable curve context holding the library's precomputed
/// multiplication tables.
///
/// Construct one at process startup and pass it by reference into every
/// call. It is never mutated after construction and is safe to share
/// across any number of concurrent callers.
pub struct Secp256k1Context {
    secp: Secp256k1<All>,
}

impl Secp256k1Context {
    /// Builds the precomputed-table context. This is the one-time
    /// initialization step owned by process startup.
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Secp256k1Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Context").finish_non_exhaustive()
    }
}

/// Recovers the uncompressed public key that produced `sig` over `msg`.
///
/// This function is using the `secp256k1` crate, it is enabled by the `secp256k1` feature and it is in default.
pub fn recover_public_key(
    ctx: &Secp256k1Context,
    msg: &B256,
    sig: &B512,
    odd_y_parity: bool,
) -> Option<[u8; 65]> {
    let recid = RecoveryId::try_from(odd_y_parity as i32).expect("recovery ID is valid");
    let sig = RecoverableSignature::from_compact(sig.as_slice(), recid).ok()?;

    let msg = Message::from_digest(msg.0);
    let public = ctx.secp.recover_ecdsa(&msg, &sig).ok()?;

    Some(public.serialize_uncompressed())
}

/// Multiplies `public_key` by `secret_key` and returns the raw
/// x-coordinate of the product, bypassing the library's SHA-256 based
/// derivation.
pub fn ecdh_x_coordinate(
    _ctx: &Secp256k1Context,
    public_key: &[u8; 65],
    secret_key: &B256,
) -> Option<B256> {
    let public_key = PublicKey::from_slice(public_key).ok()?;
    let secret_key = SecretKey::from_slice(secret_key.as_slice()).ok()?;
    let point = secp256k1::ecdh::shared_secret_point(&public_key, &secret_key);
    Some(B256::from_slice(&point[..32]))
}
