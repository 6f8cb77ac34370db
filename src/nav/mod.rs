//! Client route table and role-based navigation guard.
//!
//! DESIGN
//! ======
//! The route table is static for the process lifetime. The guard runs before
//! each navigation and decides proceed / redirect by consulting two injected
//! capabilities: an identity provider ("who is the current user") and a
//! profile store ("what role does that user have"). Both are trait objects so
//! tests can substitute mocks without a live auth backend.
//!
//! Any lookup failure during evaluation fails closed: the navigation is
//! redirected to the login route rather than allowed through.

// =============================================================================
// ROLE
// =============================================================================

/// Role stored on a user's profile, distinct from authentication identity.
///
/// An absent or unrecognized role is `None` at the call sites, never coerced
/// into a variant here; [`dashboard_for`] owns the single place where an
/// unspecified role falls back to the patient dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    /// Parse the profile-store column value. Exact match only — the store
    /// writes `"Doctor"` / `"Patient"`, anything else is unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Doctor" => Some(Self::Doctor),
            "Patient" => Some(Self::Patient),
            _ => None,
        }
    }
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// A single route declaration: path, stable name, and guard metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    /// Role required to enter the route; `None` means any authenticated user.
    pub role: Option<Role>,
}

static LOGIN: RouteMeta = RouteMeta { path: "/", name: "login", requires_auth: false, role: None };
static REGISTER: RouteMeta = RouteMeta { path: "/register", name: "register", requires_auth: false, role: None };
static DOCTOR_DASHBOARD: RouteMeta =
    RouteMeta { path: "/doctor-dashboard", name: "doctor-dashboard", requires_auth: true, role: Some(Role::Doctor) };
static PATIENT_DASHBOARD: RouteMeta =
    RouteMeta { path: "/patient-dashboard", name: "patient-dashboard", requires_auth: true, role: Some(Role::Patient) };
static DASHBOARD: RouteMeta = RouteMeta { path: "/dashboard", name: "dashboard", requires_auth: true, role: None };
static STAFF_DASHBOARD: RouteMeta =
    RouteMeta { path: "/staff-dashboard", name: "staff-dashboard", requires_auth: true, role: None };
static PROFILE_DASHBOARD: RouteMeta =
    RouteMeta { path: "/profile-dashboard", name: "profile-dashboard", requires_auth: true, role: None };

/// Every declared route. Unknown paths resolve to nothing and the caller
/// redirects to `/` (catch-all semantics).
pub static ROUTES: &[&RouteMeta] = &[
    &LOGIN,
    &REGISTER,
    &DOCTOR_DASHBOARD,
    &PATIENT_DASHBOARD,
    &DASHBOARD,
    &STAFF_DASHBOARD,
    &PROFILE_DASHBOARD,
];

/// Resolve a request path against the route table. `None` is the catch-all.
#[must_use]
pub fn resolve(path: &str) -> Option<&'static RouteMeta> {
    ROUTES.iter().find(|r| r.path == path).copied()
}

/// Dashboard for a stored role. Unspecified role routes to the patient
/// dashboard; this match arm is the only place that default lives.
#[must_use]
pub fn dashboard_for(role: Option<Role>) -> &'static RouteMeta {
    match role {
        Some(Role::Doctor) => &DOCTOR_DASHBOARD,
        Some(Role::Patient) | None => &PATIENT_DASHBOARD,
    }
}

#[must_use]
pub fn login_route() -> &'static RouteMeta {
    &LOGIN
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Error from an identity or profile lookup. The guard never propagates it;
/// evaluation fails closed to login.
#[derive(Debug, thiserror::Error)]
#[error("provider lookup failed: {0}")]
pub struct ProviderError(pub String);

/// "Get current user" — the external auth service seen through a narrow seam.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Return the current user's id, or `None` when unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the auth backend cannot be reached.
    async fn current_user(&self) -> Result<Option<i64>, ProviderError>;
}

/// "Get profile role by user id" — the external profile store.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Return the stored role, or `None` when the profile has no recognized role.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the store cannot be reached.
    async fn role_for(&self, user_id: i64) -> Result<Option<Role>, ProviderError>;
}

// =============================================================================
// GUARD
// =============================================================================

/// Outcome of a guard evaluation.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    /// Complete the navigation to the requested route.
    Proceed,
    /// Navigate to this route instead.
    Redirect(&'static RouteMeta),
}

/// Evaluate the navigation guard for a target route.
///
/// Policy:
/// 1. Login/register while authenticated → redirect to the stored role's
///    dashboard.
/// 2. Auth-required route while unauthenticated → redirect to login.
/// 3. Role-required route with a different stored role → redirect to the
///    stored role's dashboard, unless that dashboard is the route being
///    navigated to (the navigation completes rather than looping).
/// 4. Otherwise proceed.
///
/// Lookup failures never escape: the guard redirects to login instead.
pub async fn guard(
    route: &'static RouteMeta,
    identity: &dyn IdentityProvider,
    profiles: &dyn ProfileStore,
) -> Decision {
    match evaluate(route, identity, profiles).await {
        Ok(decision) => decision,
        Err(e) => {
            tracing::warn!(error = %e, route = route.name, "guard lookup failed, failing closed");
            Decision::Redirect(login_route())
        }
    }
}

async fn evaluate(
    route: &'static RouteMeta,
    identity: &dyn IdentityProvider,
    profiles: &dyn ProfileStore,
) -> Result<Decision, ProviderError> {
    // Login and register are reachable without auth, but an authenticated
    // user is bounced to their own dashboard.
    if !route.requires_auth {
        if let Some(user_id) = identity.current_user().await? {
            let role = profiles.role_for(user_id).await?;
            return Ok(Decision::Redirect(dashboard_for(role)));
        }
        return Ok(Decision::Proceed);
    }

    let Some(user_id) = identity.current_user().await? else {
        return Ok(Decision::Redirect(login_route()));
    };

    // Role check only when the route declares one; the profile store is not
    // consulted otherwise.
    if let Some(required) = route.role {
        let role = profiles.role_for(user_id).await?;
        if role != Some(required) {
            let target = dashboard_for(role);
            // A roleless user lands on the patient dashboard; when that is
            // the route already being navigated to, redirecting would loop.
            if target.path == route.path {
                return Ok(Decision::Proceed);
            }
            return Ok(Decision::Redirect(target));
        }
    }

    Ok(Decision::Proceed)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
