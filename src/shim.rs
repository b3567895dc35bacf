//! Shim module to abstract over std and loom primitives, and over tracing.
//!
//! This module provides a unified interface for the atomics used by the shared
//! ownership wrapper, transparently switching between `std` (for production) and
//! `loom` (for model checking). It also hosts the logging macros, which forward to
//! `tracing` when the `tracing` feature is enabled and compile to nothing otherwise.
//!
//! 垫片模块：在 std 与 loom 原子类型之间切换，并在 tracing 与空实现之间切换。

#[cfg(not(feature = "loom"))]
pub mod atomic {
    pub use std::sync::atomic::*;
}

#[cfg(feature = "loom")]
pub mod atomic {
    pub use loom::sync::atomic::*;
}

#[cfg(feature = "tracing")]
pub mod log {
    pub(crate) use tracing::{debug, trace};
}

#[cfg(not(feature = "tracing"))]
pub mod log {
    //! No-op logging macros. Arguments are not evaluated.
    //!
    //! 空日志宏，参数不会被求值。

    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, trace};
}
