//! # Grantkit
//!
//! Coalesced runtime-permission requests for platforms that answer permission
//! prompts asynchronously.
//!
//! Concurrent requests for the same request code and permission set share a
//! single platform prompt, and every caller receives the same result when the
//! platform answers.
//!
//! ## Features
//!
//! - `permission` (default): the request registry, result sets, target
//!   binding and the request facade.
//! - `dialog`: the confirmation prompts used by the priming and rationale
//!   gates.
//! - `native-dialogs`: desktop message boxes for those prompts.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! grantkit = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```rust,ignore
//! use grantkit::permission::{Permission, PermissionRequest, Permissions};
//!
//! async fn read_contacts(permissions: &Permissions) {
//!     let request = PermissionRequest::builder()
//!         .permission(Permission::READ_CONTACTS)
//!         .priming_message("Do you want to share your contacts?")
//!         .callback(|_, results| {
//!             println!("granted: {}", results.is_granted(&Permission::READ_CONTACTS));
//!         })
//!         .build()
//!         .unwrap();
//!
//!     let _ = permissions.request(request, 69).await;
//! }
//! ```

#[cfg(feature = "dialog")]
pub use grantkit_dialog as dialog;

#[cfg(feature = "permission")]
pub use grantkit_permission as permission;
