//! Role entity.

use super::RoleId;
use serde::{Deserialize, Serialize};

/// Persisted role record. Natural key is the trimmed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
}
