//! Client-side routes and the token-based route guard

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A page of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Root,
    Home,
    Signup,
    SignIn,
    VerifyOtp,
    Dashboard,
    Profile,
    ProfileUpdate,
    Admin,
}

impl Route {
    pub const ALL: [Self; 9] = [
        Self::Root,
        Self::Home,
        Self::Signup,
        Self::SignIn,
        Self::VerifyOtp,
        Self::Dashboard,
        Self::Profile,
        Self::ProfileUpdate,
        Self::Admin,
    ];

    /// Where the user lands after the session is lost
    pub const SESSION_LOST: Self = Self::Home;

    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Home => "/home",
            Self::Signup => "/signup",
            Self::SignIn => "/signin",
            Self::VerifyOtp => "/verify-otp",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
            Self::ProfileUpdate => "/profile-update",
            Self::Admin => "/admin",
        }
    }

    /// Pages that need a stored access token
    pub const fn requires_session(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Profile | Self::ProfileUpdate | Self::Admin
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Self::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .ok_or_else(|| DomainError::UnknownRoute(s.to_string()))
    }
}

/// Decides where a navigation actually ends up
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Resolve `requested` given whether an access token is stored
    pub const fn resolve(requested: Route, has_token: bool) -> Route {
        match requested {
            Route::Root if has_token => Route::Dashboard,
            Route::Root => Route::Home,
            r if r.requires_session() && !has_token => Route::SESSION_LOST,
            r => r,
        }
    }
}
