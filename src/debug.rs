//! Macros for last-resort debugging.
//!
//! Since decoding errors only carry a kind and a position, tracking down
//! where exactly a decoder gave up can be tedious. To remedy this somewhat,
//! this module contains a macro `xerr!()` that will print out a backtrace if
//! the `extra-debug` feature is enabled during build before resolving into
//! whatever the expression it encloses resolves to otherwise. Use it
//! whenever you initially produce an error, i.e.:
//!
//! ```rust,ignore
//! if foo {
//!     xerr!(Err(source.content_err(ErrorKind::MalformedLength)))
//! }
//! ```
//!
//! or, with an early return:
//!
//! ```rust,ignore
//! if foo {
//!     xerr!(return Err(source.content_err(ErrorKind::UnexpectedEnd)));
//! }
//! ```

#[cfg(feature = "extra-debug")]
pub use backtrace::Backtrace;

#[cfg(feature = "extra-debug")]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => {{
        eprintln!(
            "--- EXTRA DEBUG ---\n{:?}\n--- EXTRA DEBUG ---",
            $crate::debug::Backtrace::new()
        );
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => { $test };
}
