//! Model types and their generated builders.
//!
//! `build.rs` runs `pojobuilder-gen` over `src/model.rs` and writes the
//! builders listed in `pojobuilder.toml` to `OUT_DIR`.
//!
//! ```
//! use pojobuilder_demo::builders::AddressBuilder;
//!
//! let address = AddressBuilder::new()
//!     .with_street("Main St".to_string())
//!     .build()
//!     .unwrap();
//! assert_eq!(address.street(), "Main St");
//! assert_eq!(address.country(), "GB");
//! ```

pub mod model;

/// Builders generated from [`model`].
pub mod builders {
    include!(concat!(env!("OUT_DIR"), "/builders.rs"));
}
