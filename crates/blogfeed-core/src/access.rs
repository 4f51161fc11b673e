//! Access control gate.
//!
//! Every workflow operation calls [`authorize`] before touching a store.
//! The rules are a fixed table from [`Operation`] to the capability it needs.

use uuid::Uuid;

use crate::ports::TokenClaims;

/// Role granted to administrators by the identity platform.
pub const ROLE_ADMIN: &str = "Admin";

/// Role granted to registered readers.
pub const ROLE_USER: &str = "User";

/// An authenticated user as established from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl Principal {
    /// Check if the user has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

/// Whoever is making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }
}

/// Every operation the workflow exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    ViewPost,
    AddComment,
    CreatePost,
    EditPost,
    DeletePost,
    ListCategories,
    ViewCategory,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
}

/// What a caller must hold to run an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    Admin,
}

impl Operation {
    pub fn required_capability(self) -> Capability {
        match self {
            Operation::ListPosts | Operation::ViewPost => Capability::Public,
            Operation::AddComment => Capability::Authenticated,
            Operation::CreatePost
            | Operation::EditPost
            | Operation::DeletePost
            | Operation::ListCategories
            | Operation::ViewCategory
            | Operation::CreateCategory
            | Operation::UpdateCategory
            | Operation::DeleteCategory => Capability::Admin,
        }
    }
}

/// Why the gate refused a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// No identity was presented; the caller should sign in.
    #[error("login required")]
    LoginRequired,
    /// An identity was presented but lacks the required role.
    #[error("forbidden")]
    Forbidden,
}

/// Check whether `caller` may run `operation`.
pub fn authorize(operation: Operation, caller: &Caller) -> Result<(), AccessDenied> {
    let outcome = match (operation.required_capability(), caller) {
        (Capability::Public, _) => Ok(()),
        (_, Caller::Anonymous) => Err(AccessDenied::LoginRequired),
        (Capability::Authenticated, Caller::Authenticated(_)) => Ok(()),
        (Capability::Admin, Caller::Authenticated(p)) if p.has_role(ROLE_ADMIN) => Ok(()),
        (Capability::Admin, Caller::Authenticated(_)) => Err(AccessDenied::Forbidden),
    };

    if let Err(denied) = outcome {
        tracing::debug!(?operation, ?denied, "Access denied");
    }
    outcome
}
