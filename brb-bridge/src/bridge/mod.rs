//! The native-facing side: C ABI entry points and the C callback handler.

pub mod abi;
pub mod callback;
