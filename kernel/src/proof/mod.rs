//! Proof module: canonical JSON bytes and domain-separated content hashing.
//!
//! Depends on nothing else in the kernel. `capability` uses it to fingerprint
//! state keys; the search crate uses it to digest tree artifacts.

pub mod canon;
pub mod hash;
