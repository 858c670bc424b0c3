//! Statement assembly from fragments.
//!
//! [`Statement`] keeps the SQL text and the concatenated bound values of one
//! statement, and checks that each pushed fragment was numbered from the
//! statement's current [`next_index`](Statement::next_index).
//!
//! # Example
//!
//! ```ignore
//! use pgfrag::prelude::*;
//!
//! let mut stmt = Statement::new("SELECT id, user_name FROM users");
//! stmt.push_fragment(condition_string(&filter, stmt.next_index(), ConditionOptions::default()))?;
//! stmt.push_fragment(limit_offset_string(page, stmt.next_index()))?;
//!
//! let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
//! ```

use crate::bind::BindValue;
use crate::error::{FragError, FragResult};
use crate::fragment::{FIRST_INDEX, Fragment, push_placeholder};
use tokio_postgres::types::ToSql;

/// SQL text plus its bound values, built incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Statement {
    sql: String,
    values: Vec<BindValue>,
}

impl Statement {
    /// Start a statement with initial SQL.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            sql: initial_sql.into(),
            values: Vec::new(),
        }
    }

    /// Create an empty statement.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The index the next placeholder must use.
    pub fn next_index(&self) -> usize {
        FIRST_INDEX + self.values.len()
    }

    /// Append raw SQL (no parameters, no separator).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a `$n` placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<BindValue>) -> &mut Self {
        let index = self.next_index();
        push_placeholder(&mut self.sql, index);
        self.values.push(value.into());
        self
    }

    /// Append a clause that binds nothing, such as an `ORDER BY`.
    ///
    /// Empty clauses are skipped; otherwise a space is inserted when neither
    /// side already has one.
    pub fn push_clause(&mut self, clause: &str) -> &mut Self {
        if clause.is_empty() {
            return self;
        }
        let needs_space = !self.sql.is_empty()
            && !self.sql.ends_with(char::is_whitespace)
            && !clause.starts_with(char::is_whitespace);
        if needs_space {
            self.sql.push(' ');
        }
        self.sql.push_str(clause);
        self
    }

    /// Append a fragment's text (as with [`push_clause`](Statement::push_clause))
    /// and its values.
    ///
    /// # Errors
    ///
    /// [`FragError::IndexMismatch`] if the fragment was not built starting at
    /// [`next_index`](Statement::next_index).
    pub fn push_fragment(&mut self, fragment: Fragment) -> FragResult<&mut Self> {
        let expected = self.next_index();
        let found = fragment.start();
        if found != expected {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "pgfrag.fragment",
                expected,
                found,
                "rejected fragment with mismatched start index"
            );
            return Err(FragError::IndexMismatch { expected, found });
        }

        self.push_clause(&fragment.text);
        self.values.extend(fragment.values);
        Ok(self)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Bound values as references for `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    pub fn into_parts(self) -> (String, Vec<BindValue>) {
        (self.sql, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{LimitOffset, limit_offset_string};

    #[test]
    fn push_bind_numbers_placeholders() {
        let mut stmt = Statement::new("SELECT * FROM users WHERE a = ");
        stmt.push_bind(1).push(" AND b = ").push_bind("x");
        assert_eq!(stmt.sql(), "SELECT * FROM users WHERE a = $1 AND b = $2");
        assert_eq!(stmt.next_index(), 3);
        assert_eq!(stmt.params_ref().len(), 2);
    }

    #[test]
    fn push_clause_separates_once() {
        let mut stmt = Statement::new("SELECT 1");
        stmt.push_clause("").push_clause("ORDER BY a asc").push_clause(" LIMIT 1");
        assert_eq!(stmt.sql(), "SELECT 1 ORDER BY a asc LIMIT 1");
    }

    #[test]
    fn push_fragment_rejects_wrong_start() {
        let mut stmt = Statement::new("SELECT * FROM t WHERE a = ");
        stmt.push_bind(1);
        let err = stmt
            .push_fragment(limit_offset_string(LimitOffset::new().with_limit(5), 1))
            .unwrap_err();
        assert!(matches!(err, FragError::IndexMismatch { expected: 2, found: 1 }));
        assert!(err.is_index_mismatch());
        // Nothing was appended.
        assert_eq!(stmt.sql(), "SELECT * FROM t WHERE a = $1");
    }

    #[test]
    fn push_fragment_appends_values() {
        let mut stmt = Statement::new("SELECT * FROM t");
        let page = limit_offset_string(LimitOffset::new().with_limit(5).with_offset(10), 1);
        stmt.push_fragment(page).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM t LIMIT $1 OFFSET $2");
        let (_, values) = stmt.into_parts();
        assert_eq!(values, vec![BindValue::Int(5), BindValue::Int(10)]);
    }
}
