//! State literal builder.

use serde::Serialize;

use crate::error::StateError;
use crate::value::StateValue;

/// Accumulates named properties and method fragments for one component render.
///
/// Properties keep their insertion order. Adding a property under a name that
/// already exists replaces the value in place (the original position is kept)
/// and logs a warning.
///
/// # Example
///
/// ```
/// use nd_state::StateBuilder;
///
/// let state = StateBuilder::new()
///     .add_property("tabSelected", 1)
///     .add_string_property("tabId", "tabs-0")
///     .add_method("tabContentActive(el) { return this.tabSelected == el.dataset.index; }")
///     .build();
///
/// assert!(state.starts_with("{ tabSelected: 1, tabId: 'tabs-0', tabContentActive(el)"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    properties: Vec<(String, StateValue)>,
    methods: Vec<String>,
}

impl StateBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a typed value under `name`.
    ///
    /// The name is not validated; it must be a valid identifier for the
    /// client runtime.
    #[must_use]
    pub fn add_property(mut self, name: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.set(name.into(), value.into());
        self
    }

    /// Store a boolean property.
    #[must_use]
    pub fn add_boolean_property(self, name: impl Into<String>, value: bool) -> Self {
        self.add_property(name, StateValue::Bool(value))
    }

    /// Store a string property. `None` is stored as the empty string.
    #[must_use]
    pub fn add_string_property<'a>(
        self,
        name: impl Into<String>,
        value: impl Into<Option<&'a str>>,
    ) -> Self {
        let value = value.into().unwrap_or_default();
        self.add_property(name, StateValue::String(value.to_owned()))
    }

    /// Store a raw expression, emitted verbatim.
    #[must_use]
    pub fn add_raw_property(self, name: impl Into<String>, expr: impl Into<String>) -> Self {
        self.add_property(name, StateValue::raw(expr))
    }

    /// Store any serializable value as a structured property.
    ///
    /// Object keys are renamed to camelCase.
    pub fn add_serialized_property<T: Serialize + ?Sized>(
        self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, StateError> {
        let name = name.into();
        let json = serde_json::to_value(value).map_err(|source| StateError::Serialize {
            name: name.clone(),
            source,
        })?;
        Ok(self.add_property(name, StateValue::structured(json)))
    }

    /// Append a method or getter definition.
    ///
    /// Empty and `None` fragments are skipped.
    #[must_use]
    pub fn add_method<'a>(mut self, fragment: impl Into<Option<&'a str>>) -> Self {
        if let Some(fragment) = fragment.into()
            && !fragment.is_empty()
        {
            self.methods.push(fragment.to_owned());
        }
        self
    }

    /// Append `{property}Toggle()` which flips a boolean property.
    #[must_use]
    pub fn add_toggle_method(self, property: &str) -> Self {
        self.add_method(
            format!("{property}Toggle() {{ this.{property} = !this.{property}; }}").as_str(),
        )
    }

    /// Append `{method}(value)` which assigns `property`.
    #[must_use]
    pub fn add_setter_method(self, property: &str, method: &str) -> Self {
        self.add_method(format!("{method}(value) {{ this.{property} = value; }}").as_str())
    }

    /// Whether a property with this name has been added.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(n, _)| n == name)
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }

    /// Serialize into the state literal.
    ///
    /// Returns `{}` for an empty builder, otherwise
    /// `{ name: value, ..., method, ... }`.
    #[must_use]
    pub fn build(self) -> String {
        if self.is_empty() {
            return "{}".to_owned();
        }

        let mut out = String::with_capacity(64 + self.methods.iter().map(String::len).sum::<usize>());
        out.push_str("{ ");

        let mut first = true;
        for (name, value) in &self.properties {
            if !first {
                out.push_str(", ");
            }
            first = false;
            out.push_str(name);
            out.push_str(": ");
            value.write_to(&mut out);
        }

        for method in &self.methods {
            if !first {
                out.push_str(", ");
            }
            first = false;
            out.push_str(method);
        }

        out.push_str(" }");
        out
    }

    fn set(&mut self, name: String, value: StateValue) {
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            tracing::warn!(property = %name, "Duplicate state property, keeping last value");
            slot.1 = value;
        } else {
            self.properties.push((name, value));
        }
    }
}
