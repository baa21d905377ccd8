//! Explicit request guards.
//!
//! Each guard performs one check and fails with a named error. Compose them
//! around a handler with [`guarded`]:
//!
//! ```ignore
//! let body = guarded(
//!     require_permission(&policy, identity, "edit", None),
//!     || render_edit_page(identity),
//! )
//! .await?;
//! ```

use crate::policy::AuthorizationPolicy;
use std::fmt;
use std::future::Future;
use tracing::debug;
use warden_core::{Result, WardenError};

/// Return the identity, or `AuthenticationRequired` for an anonymous caller.
pub fn require_authenticated(identity: Option<&str>) -> Result<&str> {
    identity.ok_or_else(|| {
        debug!("anonymous caller rejected");
        WardenError::authentication_required("an authenticated identity is required")
    })
}

/// Succeed iff `policy` permits `permission`; `PermissionDenied` otherwise.
///
/// Errors raised by the policy itself (missing context, failed group lookup)
/// are passed through unchanged.
pub async fn require_permission<A, Q>(
    policy: &A,
    identity: Option<&str>,
    permission: &Q,
    context: Option<&A::Context>,
) -> Result<()>
where
    A: AuthorizationPolicy<Q> + ?Sized,
    Q: fmt::Debug + ?Sized + Sync,
{
    if policy.permit(identity, permission, context).await? {
        Ok(())
    } else {
        debug!(?permission, authenticated = identity.is_some(), "permission refused");
        Err(WardenError::permission_denied(format!(
            "permission {permission:?} refused"
        )))
    }
}

/// Run `handler` only after `guard` succeeded.
pub async fn guarded<T, C, H, F>(guard: C, handler: H) -> Result<T>
where
    C: Future<Output = Result<()>>,
    H: FnOnce() -> F,
    F: Future<Output = Result<T>>,
{
    guard.await?;
    handler().await
}
