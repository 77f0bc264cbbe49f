//! Typed payload carried through the engine by each rule.
//!
//! Permission rules carry [`PermissionPayload::None`]. Timeline values
//! (manager, metadata, ...) carry the value itself so the timeline diff can
//! tell which times changed.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionPayload {
    /// No payload, or "unset" for timeline values.
    #[default]
    None,
    /// Collection manager address.
    Manager(String),
    /// Metadata pointer.
    Metadata { uri: String, custom_data: String },
    /// Free-form custom data.
    CustomData(String),
    /// Declared standards.
    Standards(Vec<String>),
    /// Archived flag.
    Archived(bool),
}
