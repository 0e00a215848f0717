//! secp256k1 signer recovery and ECDH shared-secret derivation.
//!
//! Depending on enabled features, one of two backends carries the curve
//! arithmetic:
//! * [`secp256k1`](https://crates.io/crates/secp256k1) - bindings to the C implementation used by
//!   bitcoin core. It is faster and enabled by default in std environments.
//! * [`k256`](https://crates.io/crates/k256) - maintained pure rust lib, used when the
//!   `secp256k1` feature is disabled; it is a perfect fit for no_std environments.
//!
//! Both backends expose the same [`Secp256k1Context`] type and are
//! interchangeable for every operation in this module.
//!
//! `ecrecover` input format:
//! [32 bytes for message][32 bytes for v word][64 bytes for signature]
//!
//! Output format:
//! [32 bytes for the left-padded recovered address]

use crate::{utilities::right_pad, PrecompileResult, PrecompileWithAddress};
use alloy_primitives::{keccak256, Address, B256, B512};

cfg_if::cfg_if! {
    if #[cfg(feature = "secp256k1")] {
        pub mod bitcoin_secp256k1;
        use bitcoin_secp256k1 as backend;
        pub use bitcoin_secp256k1::Secp256k1Context;
    } else {
        pub mod k256;
        use self::k256 as backend;
        pub use self::k256::Secp256k1Context;
    }
}

/// `ecrecover` precompile, containing address and function to run.
pub const ECRECOVER: PrecompileWithAddress =
    PrecompileWithAddress(crate::u64_to_address(1), ec_recover_run);

/// `ecrecover` precompile function. Read more about input and output format in [this module docs](self).
pub fn ec_recover_run(input: &[u8], ctx: &Secp256k1Context) -> PrecompileResult {
    let input = right_pad::<128>(input);

    // `v` must be a 32-byte big-endian integer equal to 27 or 28.
    if !(input[32..63].iter().all(|&b| b == 0) && matches!(input[63], 27 | 28)) {
        return None;
    }

    let msg = B256::from_slice(&input[0..32]);
    let odd_y_parity = input[63] == 28;
    let sig = B512::from_slice(&input[64..128]);

    let address = recover_address(ctx, &msg, &sig, odd_y_parity)?;
    Some(B256::left_padding_from(address.as_slice()).to_vec().into())
}

/// Recovers the address that produced `sig` over the 32-byte digest `msg`.
///
/// `odd_y_parity` selects which of the two candidate curve points is the
/// signer's public key. Failure is silent: a malformed signature, a
/// (digest, signature) pair no public key satisfies, and a malformed
/// recovered key all collapse to `None`.
pub fn recover_address(
    ctx: &Secp256k1Context,
    msg: &B256,
    sig: &B512,
    odd_y_parity: bool,
) -> Option<Address> {
    let public_key = backend::recover_public_key(ctx, msg, sig, odd_y_parity)?;
    public_key_to_address(&public_key)
}

/// Derives the account address from an uncompressed 65-byte public key.
///
/// The leading marker byte must be `4`; any other value marks a
/// compressed or malformed key and yields `None`. The coordinate bytes
/// are hashed as-is: curve membership was already established by the
/// recovery step that produced the key.
pub fn public_key_to_address(public_key: &[u8; 65]) -> Option<Address> {
    if public_key[0] != 4 {
        return None;
    }
    // Ignore first byte of public key
    let hash = keccak256(&public_key[1..]);
    Some(Address::from_slice(&hash[12..]))
}

/// Computes the ECDH shared secret between `secret_key` and an
/// uncompressed 65-byte `public_key`.
///
/// The derivation function is the identity on the x-coordinate: the
/// result is the raw x-coordinate of `secret_key * public_key` with no
/// further hashing. This matches the shared-secret format of ECIES
/// peers and is NOT the hash-based derivation the curve libraries
/// default to.
///
/// Returns `None` if the scalar is zero or not below the curve order,
/// or if the public key does not lie on the curve.
pub fn ecdh_shared_secret(
    ctx: &Secp256k1Context,
    public_key: &[u8; 65],
    secret_key: &B256,
) -> Option<B256> {
    backend::ecdh_x_coordinate(ctx, public_key, secret_key)
}
