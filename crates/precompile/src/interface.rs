//! Invocation contract shared by every precompiled operation: the
//! result type, the function shape, and the buffer-ownership rules.
use crate::secp256k1::Secp256k1Context;
use alloy_primitives::Bytes;

/// Result of one precompile invocation.
///
/// `Some` carries a freshly allocated output buffer of the operation's
/// fixed length; the caller becomes its only owner and releases it by
/// dropping it. `None` is the empty result: the operation failed for
/// this input and produced no output. Whether the empty result maps to
/// "consume all gas" or "zero-fill the output region" is decided by the
/// host interpreter per the governing protocol version, not here.
pub type PrecompileResult = Option<Bytes>;

/// A precompiled operation.
///
/// Input is an immutable byte slice of arbitrary length. The invocation
/// layer passes call data through unmodified; each operation
/// zero-extends short inputs to its own fixed shape.
///
/// Every call is pure, synchronous and re-entrant. The operation never
/// retains a reference to a buffer it has returned and never reuses a
/// buffer across calls. Failure is communicated exclusively through the
/// empty result; no panic crosses this boundary.
pub type PrecompileFn = fn(&[u8], &Secp256k1Context) -> PrecompileResult;
