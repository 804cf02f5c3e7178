//! Scopespread - spreads scoped secret variables into unique, unscoped ones.
//!
//! Deployment platforms let several sensitive variables share a name as long
//! as their scopes differ. Exporting those secrets to a flat store breaks:
//! names collide and scopes have nowhere to go. Spreading renames each such
//! secret to a name built from its scope, removes the scope, and leaves a
//! scoped, non-sensitive variable under the old name whose value references
//! the new one.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── spread        # Rewrite the space
//! │   ├── plan          # Dry run
//! │   └── check         # Invariant report
//! └── core/             # Core library components
//!     ├── config        # .scopespread.toml management
//!     ├── domain/       # Variables, scopes, owners, violations
//!     ├── platform/     # Platform trait and backends
//!     │   ├── memory    # In-memory space
//!     │   ├── snapshot  # JSON snapshot file
//!     │   └── http      # REST API (feature `http`)
//!     ├── resolver      # Scope id to display name, with caching
//!     ├── naming        # Unique name composition
//!     ├── spread/       # Grouping, planning and committing
//!     └── driver        # Whole-space runs
//! ```
//!
//! # Example
//!
//! ```
//! use scopespread::{spread_space, InMemory, SpaceSnapshot, SpreadOptions};
//!
//! let mut platform = InMemory::new(SpaceSnapshot::default());
//! let report = spread_space(&mut platform, &SpreadOptions::default()).unwrap();
//! assert_eq!(report.renamed(), 0);
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::driver::{check_space, plan_space, spread_space, SpaceReport};
pub use crate::core::platform::{InMemory, Platform, SnapshotFile, SpaceSnapshot};
pub use crate::core::spread::SpreadOptions;
pub use crate::error::{Error, Result};
