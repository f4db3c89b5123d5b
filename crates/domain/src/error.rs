//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]`.

/// Top-level error for every fallible domain operation.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A payload or a stored state blob does not have the expected shape.
    #[error("failed to decode {domain} payload")]
    Decode {
        domain: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A payload decoded fine but breaks a business rule.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A state value could not be serialized back to JSON.
    ///
    /// Unreachable for well-typed states, so this indicates a defect.
    #[error("failed to encode {domain} state")]
    Encode {
        domain: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl HubError {
    pub(crate) fn decode(domain: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { domain, source }
    }

    pub(crate) fn encode(domain: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Encode { domain, source }
    }
}

/// Business-rule violations found while validating commands, events, or entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The action tag is not part of the device type's whitelist.
    #[error("unsupported {domain} action: {action}")]
    UnsupportedAction { domain: &'static str, action: String },

    /// A field required by the action is absent (or an empty string).
    #[error("{field} required for {action}")]
    MissingField { action: String, field: &'static str },

    /// A field is present but violates a declared constraint.
    #[error("{field} for {action} must be {constraint}")]
    FieldConstraint {
        action: String,
        field: &'static str,
        constraint: String,
    },

    /// An entity was built without an identifier.
    #[error("entity id must not be empty")]
    EmptyEntityId,
}
