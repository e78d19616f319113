// Trace points only exist in debug builds with the `debug` feature on.
#[cfg(all(debug_assertions, feature = "debug"))]
macro_rules! trace_transfer {
    ($($arg:tt)+) => {
        tracing::trace!(target: "nativebuf::transfer", $($arg)+)
    };
}

#[cfg(not(all(debug_assertions, feature = "debug")))]
macro_rules! trace_transfer {
    ($($arg:tt)+) => {};
}
