//! Caller-supplied data collections for data-bound components.
//!
//! A data-bound component never inspects caller types. Instead the caller
//! describes each field with a [`FieldMap`] (field path → extraction function)
//! and hands the projected rows to the renderer through [`Bindings`].

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// One projected record, keyed by field name.
///
/// Dotted field paths (`customer.name`) become nested objects.
pub type Row = Map<String, Value>;

type Extractor<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

/// Field path → extraction function map for records of type `T`.
///
/// # Example
///
/// ```
/// use nd_render::FieldMap;
/// use serde_json::json;
///
/// struct Order {
///     id: u32,
///     customer: String,
/// }
///
/// let fields = FieldMap::new()
///     .field("id", |o: &Order| o.id)
///     .field("customer.name", |o: &Order| o.customer.clone());
///
/// let row = fields.extract(&Order { id: 7, customer: "Ada".to_owned() });
/// assert_eq!(serde_json::Value::Object(row), json!({"id": 7, "customer": {"name": "Ada"}}));
/// ```
pub struct FieldMap<T> {
    fields: Vec<(String, Extractor<T>)>,
}

impl<T: 'static> FieldMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field extracted by `extract`.
    #[must_use]
    pub fn field<V, F>(mut self, path: impl Into<String>, extract: F) -> Self
    where
        V: Into<Value> + 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fields
            .push((path.into(), Box::new(move |item| extract(item).into())));
        self
    }

    /// Field paths in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(path, _)| path.as_str())
    }

    /// Project one record.
    pub fn extract(&self, item: &T) -> Row {
        let mut row = Row::new();
        for (path, extract) in &self.fields {
            insert_path(&mut row, path, extract(item));
        }
        row
    }

    /// Project every record in order.
    pub fn project<'a, I>(&self, items: I) -> Vec<Row>
    where
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().map(|item| self.extract(item)).collect()
    }
}

impl<T: 'static> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(path, _)| path))
            .finish()
    }
}

/// Insert `value` at a dotted `path`, creating intermediate objects.
///
/// A non-object value already sitting on the path is replaced.
pub(crate) fn insert_path(row: &mut Row, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            row.insert(path.to_owned(), value);
        }
        Some((head, rest)) => {
            let child = row
                .entry(head.to_owned())
                .or_insert_with(|| Value::Object(Row::new()));
            if !child.is_object() {
                *child = Value::Object(Row::new());
            }
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}

/// Named row collections available to one render.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    collections: HashMap<String, Vec<Row>>,
}

impl Bindings {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection of already projected rows.
    #[must_use]
    pub fn with_rows(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert(name, rows);
        self
    }

    /// Project `items` through `fields` and add them under `name`.
    #[must_use]
    pub fn with_collection<'a, T: 'static>(
        self,
        name: impl Into<String>,
        fields: &FieldMap<T>,
        items: impl IntoIterator<Item = &'a T>,
    ) -> Self {
        let rows = fields.project(items);
        self.with_rows(name, rows)
    }

    /// Add or replace a collection.
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.collections.insert(name.into(), rows);
    }

    /// Rows bound under `name`.
    pub fn get(&self, name: &str) -> Option<&[Row]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Whether no collection is bound.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct User {
        name: &'static str,
        age: u32,
        city: Option<&'static str>,
    }

    fn user_fields() -> FieldMap<User> {
        FieldMap::new()
            .field("name", |u: &User| u.name)
            .field("age", |u: &User| u.age)
            .field("address.city", |u: &User| u.city)
    }

    #[test]
    fn test_paths_in_order() {
        let fields = user_fields();
        assert_eq!(fields.paths().collect::<Vec<_>>(), vec!["name", "age", "address.city"]);
    }

    #[test]
    fn test_extract_nested_and_null() {
        let fields = user_fields();
        let row = fields.extract(&User {
            name: "Ada",
            age: 36,
            city: None,
        });
        assert_eq!(
            Value::Object(row),
            json!({"name": "Ada", "age": 36, "address": {"city": null}})
        );
    }

    #[test]
    fn test_project_keeps_order() {
        let users = [
            User { name: "B", age: 1, city: Some("Oslo") },
            User { name: "A", age: 2, city: None },
        ];
        let rows = user_fields().project(&users);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("B"));
        assert_eq!(rows[1]["name"], json!("A"));
    }

    #[test]
    fn test_insert_path_merges_siblings() {
        let mut row = Row::new();
        insert_path(&mut row, "a.b", json!(1));
        insert_path(&mut row, "a.c", json!(2));
        insert_path(&mut row, "d", json!(3));
        assert_eq!(Value::Object(row), json!({"a": {"b": 1, "c": 2}, "d": 3}));
    }

    #[test]
    fn test_insert_path_replaces_scalar() {
        let mut row = Row::new();
        insert_path(&mut row, "a", json!("x"));
        insert_path(&mut row, "a.b", json!(1));
        assert_eq!(Value::Object(row), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_bindings_lookup() {
        let users = [User { name: "Ada", age: 36, city: None }];
        let bindings = Bindings::new().with_collection("users", &user_fields(), &users);

        assert_eq!(bindings.get("users").map(<[Row]>::len), Some(1));
        assert!(bindings.get("orders").is_none());
        assert!(!bindings.is_empty());
    }
}
