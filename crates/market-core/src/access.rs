//! # Dashboard Access
//!
//! Role gate for the seller dashboard.
//!
//! ```text
//!   request /dashboard/*
//!        │
//!        ├── no session ────────► SignIn
//!        ├── role = Buyer ──────► RedirectHome
//!        └── role = Seller ─────► Allow
//! ```

use serde::Serialize;

use crate::types::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardAccess {
    Allow,
    SignIn,
    RedirectHome,
}

/// Decides what a dashboard request should do. `None` means no session.
pub fn dashboard_access(role: Option<UserRole>) -> DashboardAccess {
    match role {
        None => DashboardAccess::SignIn,
        Some(UserRole::Buyer) => DashboardAccess::RedirectHome,
        Some(UserRole::Seller) => DashboardAccess::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_access() {
        assert_eq!(dashboard_access(None), DashboardAccess::SignIn);
        assert_eq!(
            dashboard_access(Some(UserRole::Buyer)),
            DashboardAccess::RedirectHome
        );
        assert_eq!(dashboard_access(Some(UserRole::Seller)), DashboardAccess::Allow);
    }
}
