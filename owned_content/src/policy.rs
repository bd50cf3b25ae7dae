//! Ownership-scoped access policy.
//!
//! Every resource has exactly one owner. Owners may do anything with their own
//! resources; everybody else may at most read public ones. A non-owner is told
//! the resource does not exist rather than that access is forbidden, so the
//! existence of someone else's private resource never leaks.

use serde::{Deserialize, Serialize};

/// Who is asking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    Anonymous,
    User(String),
}

impl Identity {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    fn owns<R: Owned>(&self, resource: &R) -> bool {
        self.user_id() == Some(resource.owner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Edit,
    Delete,
}

/// Whether non-owners may read a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// A resource with a single, immutable owner.
pub trait Owned {
    const VISIBILITY: Visibility;

    /// User id of the owner
    fn owner(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The caller must log in first
    Unauthenticated,
    /// Reported for resources the caller does not own
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial),
        }
    }
}

pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `identity` may perform `action` on an existing `resource`.
    pub fn check<R: Owned>(identity: &Identity, resource: &R, action: Action) -> Decision {
        if action == Action::Create {
            return Self::check_create(identity);
        }

        match identity {
            Identity::Anonymous => match (action, R::VISIBILITY) {
                (Action::Read, Visibility::Public) => Decision::Allow,
                _ => Decision::Deny(Denial::Unauthenticated),
            },
            _ if identity.owns(resource) => Decision::Allow,
            Identity::User(_) => match (action, R::VISIBILITY) {
                (Action::Read, Visibility::Public) => Decision::Allow,
                _ => Decision::Deny(Denial::NotFound),
            },
        }
    }

    /// Any authenticated identity may create resources
    pub fn check_create(identity: &Identity) -> Decision {
        if identity.is_authenticated() {
            Decision::Allow
        } else {
            Decision::Deny(Denial::Unauthenticated)
        }
    }

    /// Restrict a listing to what `identity` may see.
    pub fn visible<R: Owned>(identity: &Identity, items: Vec<R>) -> Vec<R> {
        match R::VISIBILITY {
            Visibility::Public => items,
            Visibility::Private => items
                .into_iter()
                .filter(|item| identity.owns(item))
                .collect(),
        }
    }
}
