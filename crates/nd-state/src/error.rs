//! Error types for state building.

/// Error while adding a property to a [`StateBuilder`](crate::StateBuilder).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StateError {
    /// A structured value could not be converted to JSON.
    #[error("cannot serialize state property `{name}`")]
    Serialize {
        /// Property name.
        name: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
