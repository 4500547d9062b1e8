//! Construction failure type generation.
//!
//! Generates the `ConstructionFailure` error returned by every generated
//! `build()` method. It is emitted once per output, in the shared module,
//! and carries the name of the type that failed to build together with the
//! original error.

use proc_macro2::TokenStream;
use quote::quote;

/// Generates the `ConstructionFailure` error type.
///
/// ## Generated Code
///
/// The type derives `thiserror::Error` and exposes the wrapped error through
/// `source()`. `ConstructionFailure::wrap` does not wrap a cause that is
/// already a `ConstructionFailure`, so failures from nested builders reach
/// the caller unchanged.
///
/// ```ignore
/// let failure = ConstructionFailure::wrap("Address", "post code must not be empty");
/// assert_eq!(failure.target(), "Address");
/// let again = ConstructionFailure::wrap("Person", failure);
/// assert_eq!(again.target(), "Address");
/// ```
pub fn generate_failure_type() -> TokenStream {
    quote! {
        /// A generated `build()` method could not create its target.
        ///
        /// Raised when a fallible constructor, default constructor or setter
        /// of the target returns an error. The original error is kept as the
        /// [`source`](::std::error::Error::source) of this one.
        #[derive(Debug, thiserror::Error)]
        #[error("failed to construct {target}: {source}")]
        pub struct ConstructionFailure {
            target: &'static str,
            #[source]
            source: ::std::boxed::Box<dyn ::std::error::Error + Send + Sync + 'static>,
        }

        impl ConstructionFailure {
            /// Wraps `cause` as a failure to construct `target`.
            ///
            /// A cause that already is a `ConstructionFailure` is returned as is.
            pub fn wrap<E>(target: &'static str, cause: E) -> Self
            where
                E: ::std::convert::Into<
                    ::std::boxed::Box<dyn ::std::error::Error + Send + Sync + 'static>,
                >,
            {
                let cause: ::std::boxed::Box<dyn ::std::error::Error + Send + Sync + 'static> =
                    cause.into();
                match cause.downcast::<ConstructionFailure>() {
                    Ok(failure) => *failure,
                    Err(source) => Self { target, source },
                }
            }

            /// Name of the type that failed to build.
            pub fn target(&self) -> &'static str {
                self.target
            }

            /// Consumes the failure and returns the original error.
            pub fn into_source(
                self,
            ) -> ::std::boxed::Box<dyn ::std::error::Error + Send + Sync + 'static> {
                self.source
            }
        }
    }
}
