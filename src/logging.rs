//! Internal log shim.
//!
//! With the `log` feature the macros forward to the `log` crate under the
//! `zenbmp` target. Without it they type-check their arguments and compile
//! to nothing.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)+) => {
        ::log::trace!(target: "zenbmp", $($arg)+)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)+) => {
        ::log::warn!(target: "zenbmp", $($arg)+)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}
