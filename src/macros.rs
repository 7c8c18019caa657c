// Thin wrappers over the `log` facade so call sites don't need to repeat the
// feature gate. Without the `log` feature the arguments are still type-checked
// but nothing is emitted.

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        log::trace!(target: "ordered_sets", $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)+);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        log::debug!(target: "ordered_sets", $($arg)+);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)+);
    }};
}

pub(crate) use debug;
pub(crate) use trace;
