//! Join/get navigation from the queried entity to a column.
//!
//! Generated code spells every searchable property as a chain starting at the
//! root entity, e.g. `SearchPath::root().join("author").get("name")`. The joined
//! table is addressed by an alias made of the join segments (`author`,
//! `author_posts`), so the query that consumes the condition must join the
//! related tables under those aliases.

use sea_orm::sea_query::{Alias, Expr};
use std::fmt;

/// Separator between join segments in a table alias.
pub const ALIAS_SEPARATOR: &str = "_";

/// Navigation through zero or more joins, not yet pointing at a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchPath {
    joins: Vec<String>,
}

/// A column reached through a [`SearchPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPath {
    joins: Vec<String>,
    column: String,
}

impl SearchPath {
    /// The queried entity itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Navigate into a relationship.
    #[must_use]
    pub fn join(mut self, relation: impl Into<String>) -> Self {
        self.joins.push(relation.into());
        self
    }

    /// Terminate the navigation at a column.
    #[must_use]
    pub fn get(self, column: impl Into<String>) -> ColumnPath {
        ColumnPath {
            joins: self.joins,
            column: column.into(),
        }
    }

    /// Relationships traversed so far, outermost first.
    #[must_use]
    pub fn joins(&self) -> &[String] {
        &self.joins
    }
}

impl ColumnPath {
    /// Build a column path from dot notation: every segment but the last is
    /// joined, the last one is read.
    ///
    /// - `"parent.child"` -> `root.join("parent").get("child")`
    /// - `"id"` -> `root.get("id")`
    /// - `""`, `"a..b"` -> `None`
    #[must_use]
    pub fn parse(dotted: &str) -> Option<Self> {
        let mut segments: Vec<&str> = dotted.split('.').collect();
        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return None;
        }
        let column = segments.pop()?;
        let path = segments
            .into_iter()
            .fold(SearchPath::root(), SearchPath::join);
        Some(path.get(column))
    }

    #[must_use]
    pub fn joins(&self) -> &[String] {
        &self.joins
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Alias of the table holding the column, `None` for root columns.
    #[must_use]
    pub fn table_alias(&self) -> Option<String> {
        if self.joins.is_empty() {
            None
        } else {
            Some(self.joins.join(ALIAS_SEPARATOR))
        }
    }

    /// Dot notation of the whole path (`author.name`).
    #[must_use]
    pub fn dotted(&self) -> String {
        self.joins
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.column.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Column expression usable in sea-query conditions.
    #[must_use]
    pub fn expr(&self) -> Expr {
        match self.table_alias() {
            Some(alias) => Expr::col((Alias::new(alias), Alias::new(self.column.as_str()))),
            None => Expr::col(Alias::new(self.column.as_str())),
        }
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for join in &self.joins {
            write!(f, ".join(\"{join}\")")?;
        }
        write!(f, ".get(\"{}\")", self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{PostgresQueryBuilder, Query};

    fn render(path: &ColumnPath) -> String {
        Query::select()
            .expr(path.expr())
            .from(Alias::new("posts"))
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_parse_nested_path() {
        let path = ColumnPath::parse("parent.child").unwrap();
        assert_eq!(path.to_string(), r#"root.join("parent").get("child")"#);
        assert_eq!(path.joins(), ["parent".to_string()]);
        assert_eq!(path.column(), "child");
    }

    #[test]
    fn test_parse_root_column() {
        let path = ColumnPath::parse("id").unwrap();
        assert_eq!(path.to_string(), r#"root.get("id")"#);
        assert_eq!(path.table_alias(), None);
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(ColumnPath::parse("").is_none());
        assert!(ColumnPath::parse("a..b").is_none());
        assert!(ColumnPath::parse(".a").is_none());
    }

    #[test]
    fn test_builder_matches_parse() {
        let built = SearchPath::root().join("author").join("posts").get("title");
        assert_eq!(Some(built.clone()), ColumnPath::parse("author.posts.title"));
        assert_eq!(built.dotted(), "author.posts.title");
        assert_eq!(built.table_alias().as_deref(), Some("author_posts"));
    }

    #[test]
    fn test_root_expr_is_bare_column() {
        let sql = render(&SearchPath::root().get("title"));
        assert_eq!(sql, r#"SELECT "title" FROM "posts""#);
    }

    #[test]
    fn test_joined_expr_is_qualified_by_alias() {
        let sql = render(&SearchPath::root().join("author").get("name"));
        assert_eq!(sql, r#"SELECT "author"."name" FROM "posts""#);
    }
}
