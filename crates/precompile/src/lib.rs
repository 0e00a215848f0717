//! # ethpre-precompile
//!
//! Cryptographic core of an EVM precompiled-contract layer: secp256k1
//! signer recovery, raw-x ECDH shared-secret derivation, and the
//! invocation contract every precompiled operation presents to a host
//! interpreter.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod interface;
pub mod secp256k1;
pub mod utilities;

pub use interface::*;
pub use self::secp256k1::Secp256k1Context;

use alloy_primitives::{
    map::{HashMap, HashSet},
    Address,
};
use once_cell::race::OnceBox;
use std::{boxed::Box, vec::Vec};

/// Precompiled operations keyed by their reserved address.
///
/// Holds the operations this crate owns plus any externally implemented
/// ones (bignum, pairing, ...) registered through [`Self::extend`]. The
/// host interpreter looks up the [`PrecompileFn`] for an address and
/// relays the returned buffer, or the empty result, back to the caller.
#[derive(Clone, Default, Debug)]
pub struct Precompiles {
    /// Precompiles
    inner: HashMap<Address, PrecompileFn>,
    /// Addresses of precompile
    addresses: HashSet<Address>,
}

impl Precompiles {
    /// Returns the set of operations implemented by this crate.
    ///
    /// Interpreters clone this set and [`Self::extend`] it with the
    /// externally implemented precompiles of the governing protocol
    /// version.
    pub fn builtin() -> &'static Self {
        static INSTANCE: OnceBox<Precompiles> = OnceBox::new();
        INSTANCE.get_or_init(|| {
            let mut precompiles = Precompiles::default();
            precompiles.extend([secp256k1::ECRECOVER]);
            Box::new(precompiles)
        })
    }

    /// Returns inner HashMap of precompiles.
    pub fn inner(&self) -> &HashMap<Address, PrecompileFn> {
        &self.inner
    }

    /// Returns an iterator over the precompiles addresses.
    #[inline]
    pub fn addresses(&self) -> impl ExactSizeIterator<Item = &Address> {
        self.inner.keys()
    }

    /// Consumes the type and returns all precompile addresses.
    #[inline]
    pub fn into_addresses(self) -> impl ExactSizeIterator<Item = Address> {
        self.inner.into_keys()
    }

    /// Is the given address a precompile.
    #[inline]
    pub fn contains(&self, address: &Address) -> bool {
        self.inner.contains_key(address)
    }

    /// Returns the precompile for the given address.
    #[inline]
    pub fn get(&self, address: &Address) -> Option<&PrecompileFn> {
        self.inner.get(address)
    }

    /// Is the precompiles list empty.
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Returns the number of precompiles.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the precompiles addresses as a set.
    pub fn addresses_set(&self) -> &HashSet<Address> {
        &self.addresses
    }

    /// Extends the precompiles with the given precompiles.
    ///
    /// Other precompiles with overwrite existing precompiles.
    #[inline]
    pub fn extend(&mut self, other: impl IntoIterator<Item = PrecompileWithAddress>) {
        let items: Vec<PrecompileWithAddress> = other.into_iter().collect::<Vec<_>>();
        self.addresses.extend(items.iter().map(|p| *p.address()));
        self.inner.extend(items.into_iter().map(|p| (p.0, p.1)));
    }
}

/// A precompiled operation paired with its reserved address.
#[derive(Clone, Debug)]
pub struct PrecompileWithAddress(pub Address, pub PrecompileFn);

impl From<(Address, PrecompileFn)> for PrecompileWithAddress {
    fn from(value: (Address, PrecompileFn)) -> Self {
        PrecompileWithAddress(value.0, value.1)
    }
}

impl From<PrecompileWithAddress> for (Address, PrecompileFn) {
    fn from(value: PrecompileWithAddress) -> Self {
        (value.0, value.1)
    }
}

impl PrecompileWithAddress {
    /// Returns reference of address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.0
    }

    /// Returns reference of precompile.
    #[inline]
    pub fn precompile(&self) -> &PrecompileFn {
        &self.1
    }
}

/// Const function for making an address by concatenating the bytes from two given numbers.
///
/// Note that 32 + 128 = 160 = 20 bytes (the length of an address).
///
/// This function is used as a convenience for specifying the addresses of the various precompiles.
#[inline]
pub const fn u64_to_address(x: u64) -> Address {
    let x = x.to_be_bytes();
    Address::new([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7],
    ])
}

#[cfg(test)]
mod test {
    use crate::{
        u64_to_address, PrecompileResult, PrecompileWithAddress, Precompiles, Secp256k1Context,
    };
    use alloy_primitives::{hex, Bytes};

    const ECRECOVER_INPUT: [u8; 128] = hex!(
        "18c547e4f7b0f325ad1e56f57e26c745b09a3e503d86e00e5255ff7f715d3d1c"
        "000000000000000000000000000000000000000000000000000000000000001c"
        "73b1693892219d736caba55bdb67216e485557ea6b6af75f37096c9aa6a5a75f"
        "eeb940b1d03b21e36b0e47e79769f095fe2ab855bd91e3a38756b7d75a9c4549"
    );

    #[test]
    fn builtin_set_contains_ecrecover() {
        let precompiles = Precompiles::builtin();
        assert!(precompiles.contains(&u64_to_address(1)));
        assert_eq!(precompiles.len(), 1);
        assert!(!precompiles.is_empty());
        assert!(precompiles.addresses_set().contains(&u64_to_address(1)));
    }

    #[test]
    fn dispatch_through_registry() {
        let ctx = Secp256k1Context::new();
        let run = Precompiles::builtin().get(&u64_to_address(1)).unwrap();

        let out = run(&ECRECOVER_INPUT, &ctx).unwrap();
        assert_eq!(out.len(), 32);

        // unknown address has no entry
        assert!(Precompiles::builtin().get(&u64_to_address(0xdead)).is_none());
    }

    #[test]
    fn each_call_returns_a_fresh_buffer() {
        let ctx = Secp256k1Context::new();
        let run = Precompiles::builtin().get(&u64_to_address(1)).unwrap();

        let first = run(&ECRECOVER_INPUT, &ctx).unwrap();
        let second = run(&ECRECOVER_INPUT, &ctx).unwrap();
        assert_eq!(first, second);
        assert_ne!(first.as_ptr(), second.as_ptr());
    }

    #[test]
    fn extend_registers_external_precompiles() {
        fn echo(input: &[u8], _ctx: &Secp256k1Context) -> PrecompileResult {
            Some(Bytes::copy_from_slice(input))
        }

        let mut precompiles = Precompiles::builtin().clone();
        precompiles.extend([PrecompileWithAddress(u64_to_address(5), echo)]);
        assert_eq!(precompiles.len(), 2);
        assert!(precompiles.contains(&u64_to_address(5)));

        let entry: (_, _) = PrecompileWithAddress(u64_to_address(5), echo).into();
        assert_eq!(entry.0, u64_to_address(5));
    }
}
