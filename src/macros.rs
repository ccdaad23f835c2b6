#[cfg(feature = "tracing")]
macro_rules! octrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "offset_cache", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! octrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ocdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "offset_cache", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ocdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ocwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "offset_cache", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ocwarn {
    ($($tt:tt)*) => {};
}
