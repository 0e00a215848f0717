//! k256 backend for signer recovery and ECDH. More about it in [`crate::secp256k1`].
use alloy_primitives::{B256, B512};
use k256::{
    ecdsa::{RecoveryId, Signature, VerifyingKey},
    PublicKey, SecretKey,
};

/// Stateless stand-in for the precomputed-table context of the C
/// backend; the pure Rust implementation keeps no shared state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Context;

impl Secp256k1Context {
    /// Builds the context. Kept for parity with the `secp256k1`
    /// backend; there are no tables to precompute.
    pub fn new() -> Self {
        Self
    }
}

/// Recovers the uncompressed public key that produced `sig` over `msg`.
///
/// This function is using the `k256` crate.
pub fn recover_public_key(
    _ctx: &Secp256k1Context,
    msg: &B256,
    sig: &B512,
    odd_y_parity: bool,
) -> Option<[u8; 65]> {
    // parse signature
    let mut recid = odd_y_parity as u8;
    let mut sig = Signature::from_slice(sig.as_slice()).ok()?;

    // normalize signature and flip recovery id if needed.
    if let Some(sig_normalized) = sig.normalize_s() {
        sig = sig_normalized;
        recid ^= 1;
    }
    let recid = RecoveryId::from_byte(recid).expect("recovery ID is valid");

    // recover key
    let recovered_key = VerifyingKey::recover_from_prehash(msg.as_slice(), &sig, recid).ok()?;

    let encoded = recovered_key.to_encoded_point(/* compress = */ false);
    encoded.as_bytes().try_into().ok()
}

/// Multiplies `public_key` by `secret_key` and returns the raw
/// x-coordinate of the product; no key-derivation hash is applied.
pub fn ecdh_x_coordinate(
    _ctx: &Secp256k1Context,
    public_key: &[u8; 65],
    secret_key: &B256,
) -> Option<B256> {
    let public_key = PublicKey::from_sec1_bytes(public_key).ok()?;
    let secret_key = SecretKey::from_slice(secret_key.as_slice()).ok()?;
    let shared =
        k256::ecdh::diffie_hellman(secret_key.to_nonzero_scalar(), public_key.as_affine());
    Some(B256::from_slice(shared.raw_secret_bytes().as_slice()))
}
