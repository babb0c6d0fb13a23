//! Authorization seam for configuration-time queries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};

/// What a caller wants to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Configure,
    Build,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Read => write!(f, "read"),
            Permission::Configure => write!(f, "configure"),
            Permission::Build => write!(f, "build"),
        }
    }
}

/// A job or item the current caller may be allowed to configure.
pub trait ConfigurableResource {
    fn resource_name(&self) -> &str;

    fn has_permission(&self, permission: Permission) -> bool;

    /// # Errors
    ///
    /// `ParameterError::AccessDenied` when the permission is missing.
    fn check_permission(&self, permission: Permission) -> Result<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(ParameterError::AccessDenied {
                resource: self.resource_name().to_string(),
                permission,
            })
        }
    }
}

/// In-memory set of permissions granted on a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
    resource: String,
    permissions: BTreeSet<Permission>,
}

impl Grants {
    /// No permissions at all.
    pub fn none(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            permissions: BTreeSet::new(),
        }
    }

    pub fn with(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }
}

impl ConfigurableResource for Grants {
    fn resource_name(&self) -> &str {
        &self.resource
    }

    fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_permission() {
        let item = Grants::none("deploy").with(Permission::Read);
        assert!(item.check_permission(Permission::Read).is_ok());

        let err = item.check_permission(Permission::Configure).unwrap_err();
        assert_eq!(err.to_string(), "access denied: configure on deploy");
    }

    #[test]
    fn test_permission_serde() {
        let json = serde_json::to_string(&Permission::Configure).unwrap();
        assert_eq!(json, "\"configure\"");
    }
}
