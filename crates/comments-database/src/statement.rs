//! SQL statements with named parameters.
//!
//! Builders write placeholders as `@key` and register each value under
//! that key. Values never appear in SQL text; the adapter rewrites the
//! placeholders into positional form right before execution.

use indexmap::IndexMap;

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::types::SqlValue;

/// Insertion-ordered parameter bindings of one statement.
///
/// A key can be bound only once; rebinding it is a
/// [`ParameterCollision`](comments_core::error::ErrorKind::ParameterCollision)
/// error rather than an overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    values: IndexMap<String, SqlValue>,
}

impl ParameterMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: SqlValue) -> AppResult<()> {
        let key = key.into();
        if self.values.contains_key(&key) {
            return Err(AppError::parameter_collision(&key));
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Move every binding of `other` into this map.
    pub fn merge(&mut self, other: ParameterMap) -> AppResult<()> {
        for (key, value) in other.values {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Value bound under `key`.
    pub fn get(&self, key: &str) -> Option<&SqlValue> {
        self.values.get(key)
    }

    /// Whether `key` is bound.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Hands out parameter keys that are unique within one statement build.
///
/// Keys look like `<seed>_<n>`, where `n` starts at 1 and grows with every
/// key handed out, so equal seeds never produce equal keys.
#[derive(Debug, Default)]
pub struct ParameterNamer {
    counter: usize,
}

impl ParameterNamer {
    /// A namer starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next key for `seed`.
    pub fn next_key(&mut self, seed: &str) -> String {
        self.counter += 1;
        format!("{}_{}", sanitize(seed), self.counter)
    }
}

/// Reduce a name to `[A-Za-z0-9_]` so it can follow `@` in SQL text.
pub fn sanitize(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "p".to_string()
    } else {
        sanitized
    }
}

/// SQL text together with the values of its `@key` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    /// SQL with `@key` placeholders.
    pub sql: String,
    /// Values for the placeholders.
    pub parameters: ParameterMap,
}

impl Statement {
    /// A statement from SQL text and its bindings.
    pub fn new(sql: impl Into<String>, parameters: ParameterMap) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    /// Rewrite `@key` placeholders into `$n` positions.
    ///
    /// Returns the rewritten SQL and the values in position order. A key
    /// used more than once keeps its first position. A placeholder with no
    /// binding is an internal error.
    pub fn to_positional(&self) -> AppResult<(String, Vec<&SqlValue>)> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut positions: IndexMap<&str, usize> = IndexMap::new();
        let mut values = Vec::new();

        let text = self.sql.as_str();
        let mut rest = text;
        while let Some(at) = rest.find('@') {
            sql.push_str(&rest[..at]);
            let after = &rest[at + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if len == 0 {
                sql.push('@');
                rest = after;
                continue;
            }

            let key = &after[..len];
            let position = match positions.get(key) {
                Some(position) => *position,
                None => {
                    let value = self.parameters.get(key).ok_or_else(|| {
                        AppError::internal(format!("placeholder '@{key}' has no bound value"))
                    })?;
                    values.push(value);
                    positions.insert(key, values.len());
                    values.len()
                }
            };
            sql.push('$');
            sql.push_str(&position.to_string());
            rest = &after[len..];
        }
        sql.push_str(rest);

        Ok((sql, values))
    }
}

#[cfg(test)]
mod tests {
    use comments_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_insert_rejects_existing_key() {
        let mut map = ParameterMap::new();
        map.insert("Message_1", "a".into()).unwrap();

        let err = map.insert("Message_1", "b".into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParameterCollision);
        assert_eq!(map.get("Message_1"), Some(&SqlValue::Text("a".into())));
    }

    #[test]
    fn test_merge_detects_collisions() {
        let mut left = ParameterMap::new();
        left.insert("a_1", 1.into()).unwrap();
        let mut right = ParameterMap::new();
        right.insert("b_2", 2.into()).unwrap();
        left.merge(right).unwrap();
        assert_eq!(left.keys().collect::<Vec<_>>(), vec!["a_1", "b_2"]);

        let mut again = ParameterMap::new();
        again.insert("a_1", 3.into()).unwrap();
        assert_eq!(
            left.merge(again).unwrap_err().kind,
            ErrorKind::ParameterCollision
        );
    }

    #[test]
    fn test_namer_counts_per_build() {
        let mut namer = ParameterNamer::new();
        assert_eq!(namer.next_key("CreatedOnStart"), "CreatedOnStart_1");
        assert_eq!(namer.next_key("CreatedOnStart"), "CreatedOnStart_2");
        assert_eq!(namer.next_key("bad name!"), "bad_name__3");
        assert_eq!(namer.next_key(""), "p_4");
    }

    #[test]
    fn test_positional_rewrite() {
        let mut parameters = ParameterMap::new();
        parameters.insert("Id_1", 7.into()).unwrap();
        parameters.insert("Message_2", "x".into()).unwrap();
        let statement = Statement::new(
            "SELECT id FROM comments WHERE message = @Message_2 OR id = @Id_1 OR message <> @Message_2",
            parameters,
        );

        let (sql, values) = statement.to_positional().unwrap();
        assert_eq!(
            sql,
            "SELECT id FROM comments WHERE message = $1 OR id = $2 OR message <> $1"
        );
        assert_eq!(
            values,
            vec![&SqlValue::Text("x".into()), &SqlValue::Integer(7)]
        );
    }

    #[test]
    fn test_positional_rejects_unbound_placeholder() {
        let statement = Statement::new("DELETE FROM comments WHERE id = @Id_1", ParameterMap::new());
        assert_eq!(
            statement.to_positional().unwrap_err().kind,
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_longer_key_is_not_confused_with_prefix() {
        let mut parameters = ParameterMap::new();
        parameters.insert("Id_1", 1.into()).unwrap();
        parameters.insert("Id_10", 10.into()).unwrap();
        let statement = Statement::new("@Id_10, @Id_1", parameters);

        let (sql, values) = statement.to_positional().unwrap();
        assert_eq!(sql, "$1, $2");
        assert_eq!(values, vec![&SqlValue::Integer(10), &SqlValue::Integer(1)]);
    }
}
