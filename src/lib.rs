//! Acloud Client - Avisi Cloud platform API library.
//!
//! A typed client for listing platform resources with:
//! - **Paginated Collection**: Walk multi-page listing endpoints to completion
//! - **Typed Marshalling**: Decode generic page content into resource types
//! - **Concurrent Fan-Out**: List per organisation or cluster in parallel
//! - **Deterministic Ordering**: Reproducible output order for aggregated listings
//! - **Response Classification**: Uniform errors for non-success responses
//!
//! ## Quick Start
//!
//! All configuration is loaded from environment variables. Create a `.env` file:
//!
//! ```text
//! ACLOUD_PAT=your_personal_access_token
//! ACLOUD_URL=https://api.avisi.cloud
//! ```
//!
//! Then list every cluster you have access to:
//!
//! ```ignore
//! use acloud_client::{AcloudClient, AcloudClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = AcloudClientConfig::from_env()?;
//!     let client = AcloudClient::new(cfg)?;
//!
//!     for cluster in client.get_clusters(&[]).await? {
//!         println!("{} [{}]", cluster.identifier(), cluster.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy for strict discipline
#![deny(clippy::all)]                 // All standard Clippy lints
#![deny(clippy::pedantic)]            // Very strict Clippy lints
#![deny(clippy::nursery)]             // Experimental lints
#![deny(clippy::unwrap_used)]         // unwrap() is forbidden
#![deny(clippy::expect_used)]         // expect() is forbidden
#![deny(clippy::panic)]               // panic!() is forbidden
#![deny(clippy::print_stdout)]        // println!() is forbidden in production
#![deny(clippy::todo)]                // TODO is forbidden
#![deny(clippy::unimplemented)]       // unimplemented!() is forbidden
#![deny(clippy::missing_const_for_fn)] // Force const when possible
#![deny(clippy::unwrap_in_result)]    // unwrap() in Result is forbidden
#![deny(clippy::module_inception)]    // Module with same name as crate is forbidden
#![deny(clippy::redundant_clone)]     // Useless clones are forbidden
#![deny(clippy::shadow_unrelated)]    // Shadowing unrelated variables is forbidden
#![deny(clippy::too_many_arguments)]  // Limit function arguments
#![deny(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// Unit tests assert with unwrap() and panic on unexpected variants
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

// ============================================================================
// Modules
// ============================================================================

/// Client configuration loaded from environment variables.
pub mod acloud_config;

/// Error type shared by every operation.
pub mod acloud_error;

/// HTTP client, authentication hook and response classification.
///
/// Use this module to execute single requests against the platform API.
pub mod acloud_client;

/// Paginated listing retrieval and typed content decoding.
pub mod acloud_paging;

/// Concurrent fan-out over parent entities.
pub mod acloud_fanout;

/// Deterministic ordering of aggregated listings.
pub mod acloud_sort;

/// Resource types and post-decode fix-ups.
pub mod acloud_types;

/// Organisation-scoped and cross-organisation resource listings.
///
/// Use this module to list clusters, node pools, environments and accounts.
pub mod acloud_listing;

/// Platform administration listings.
pub mod acloud_admin;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use acloud_admin::ListScheduledClusterUpgradesOpts;
pub use acloud_client::{AcloudClient, Authenticator, PersonalAccessTokenAuthenticator};
pub use acloud_config::AcloudClientConfig;
pub use acloud_error::AcloudError;
pub use acloud_listing::GetClusterOpts;
pub use acloud_paging::{MAX_PAGING_LOOPS, Page, PageFetcher};
pub use acloud_sort::DeterministicOrder;
pub use acloud_types::{
    AdminClusterVersion, AvailabilityZone, CloudAccount, CloudCredential, CloudProvider, Cluster,
    Environment, Membership, NodePool, NodeType, ObservabilityTenant, Region,
    ScheduledClusterUpgrade, ScheduledClusterUpgradeStatus, UpdateChannel,
};
