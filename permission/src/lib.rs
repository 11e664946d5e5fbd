//! Coalesced runtime-permission requests.
//!
//! Hosts whose platform answers permission prompts asynchronously bind their
//! active UI context as a [`RequestTarget`] and forward every platform result
//! to [`PermissionRegistry::dispatch`]. Callers then ask for permissions
//! through [`Permissions::request`]: concurrent requests for the same request
//! code and permission set share one platform prompt, and every caller gets
//! the same [`ResultSet`] when the answer arrives.
//!
//! ```ignore
//! let permissions = Permissions::builder().prompter(prompter).build();
//! permissions.on_lifecycle(&activity, LifecycleEvent::Resumed);
//!
//! let request = PermissionRequest::builder()
//!     .permission(Permission::READ_CONTACTS)
//!     .rationale("Contacts are needed to find your friends")
//!     .callback(|_, results: &ResultSet| {
//!         println!("granted: {}", results.is_granted(&Permission::READ_CONTACTS));
//!     })
//!     .build()?;
//!
//! permissions.request(request, 69).await?;
//! ```

#![warn(missing_docs)]

mod callback;
mod config;
mod dispatch;
mod error;
mod handlers;
mod key;
mod lifecycle;
mod permissions;
mod priming;
mod registry;
mod request;
mod result;
mod target;

/// Platform-specific implementations.
pub mod sys;

use std::borrow::Cow;
use std::fmt;

pub use callback::{Callback, ResultReceiver};
pub use config::PermissionsConfig;
pub use dispatch::Dispatch;
pub use error::PermissionError;
pub use handlers::{HandlerTable, HandlerTableBuilder};
pub use key::RequestKey;
pub use lifecycle::LifecycleEvent;
pub use permissions::{Permissions, PermissionsBuilder};
pub use priming::{FilePrimingStore, MemoryPrimingStore, PrimingStore, should_show_priming};
pub use registry::{PermissionRegistry, Submission};
pub use request::{Gate, PermissionRequest, PermissionRequestBuilder, RequestOutcome};
pub use result::{GrantResult, PermissionResult, ResultSet};
pub use target::{RequestTarget, TargetBinding};

/// Caller-chosen identifier correlating a request with its result.
///
/// Must be non-zero. Android only delivers the low 16 bits back.
pub type RequestCode = u16;

/// Result type used throughout this crate.
pub type Result<T, E = PermissionError> = std::result::Result<T, E>;

/// An opaque capability identifier, as understood by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Access to precise device location.
    pub const ACCESS_FINE_LOCATION: Self =
        Self::from_static("android.permission.ACCESS_FINE_LOCATION");
    /// Access to approximate device location.
    pub const ACCESS_COARSE_LOCATION: Self =
        Self::from_static("android.permission.ACCESS_COARSE_LOCATION");
    /// Access to device camera.
    pub const CAMERA: Self = Self::from_static("android.permission.CAMERA");
    /// Access to device microphone.
    pub const RECORD_AUDIO: Self = Self::from_static("android.permission.RECORD_AUDIO");
    /// Read access to contacts.
    pub const READ_CONTACTS: Self = Self::from_static("android.permission.READ_CONTACTS");
    /// Write access to contacts.
    pub const WRITE_CONTACTS: Self = Self::from_static("android.permission.WRITE_CONTACTS");
    /// Read access to calendar.
    pub const READ_CALENDAR: Self = Self::from_static("android.permission.READ_CALENDAR");
    /// Read access to shared storage.
    pub const READ_EXTERNAL_STORAGE: Self =
        Self::from_static("android.permission.READ_EXTERNAL_STORAGE");

    /// Wrap a platform identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Wrap a static platform identifier without allocating.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// The platform identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for Permission {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
