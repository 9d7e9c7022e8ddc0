//! C compiler driver.
//!
//! Finds a compiler and assembles its single invocation.

pub mod invocation;
pub mod toolchain;

pub use invocation::CompileInvocation;
pub use toolchain::{find_c_compiler, CCompiler, CompilerSource};
