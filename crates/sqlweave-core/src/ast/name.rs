//! Dotted, optionally aliased names: `[schema.]table` and `[[schema.]table.]column`.

use core::fmt;

/// Whether a dotted name ends with a table or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameForm {
    /// `[schema.]table`, as in a FROM clause.
    Table,
    /// `[[schema.]table.]column`, as in a select list.
    Column,
}

/// A dotted name with an optional alias.
///
/// The full text is kept as given and is what the name renders as; the
/// segments are split out for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AliasedName {
    text: String,
    schema: Option<String>,
    table: Option<String>,
    column: Option<String>,
    alias: Option<String>,
    form: NameForm,
}

impl AliasedName {
    /// Splits `fullname` on `.` according to `form`.
    ///
    /// One segment is the table (table form) or column (column form). Two
    /// segments are `schema.table` or `table.column`. Three or more are
    /// `schema.table.column`, with any extra leading segments kept in the
    /// schema. Each segment drops surrounding call syntax, so `SUM(t.a)`
    /// yields table `t` and column `a`.
    #[must_use]
    pub fn parse(fullname: &str, form: NameForm) -> Self {
        let segments: Vec<&str> = fullname.split('.').filter(|s| !s.is_empty()).collect();

        let (schema, table, column) = match (segments.as_slice(), form) {
            ([], _) => (None, None, None),
            ([only], NameForm::Table) => (None, Some(*only), None),
            ([only], NameForm::Column) => (None, None, Some(*only)),
            ([first, second], NameForm::Table) => (Some(String::from(*first)), Some(*second), None),
            ([first, second], NameForm::Column) => (None, Some(*first), Some(*second)),
            ([leading @ .., table, column], _) => {
                (Some(leading.join(".")), Some(*table), Some(*column))
            }
        };

        Self {
            text: String::from(fullname),
            schema: schema.map(|s| strip_call_syntax(&s)),
            table: table.map(strip_call_syntax),
            column: column.map(strip_call_syntax),
            alias: None,
            form,
        }
    }

    /// Creates a table-form name.
    #[must_use]
    pub fn table(fullname: &str) -> Self {
        Self::parse(fullname, NameForm::Table)
    }

    /// Creates a column-form name.
    #[must_use]
    pub fn column(fullname: &str) -> Self {
        Self::parse(fullname, NameForm::Column)
    }

    /// Creates a column-form name for the rendering of an expression. The
    /// text is kept whole and has no segments.
    #[must_use]
    pub fn opaque(text: &str) -> Self {
        Self {
            text: String::from(text),
            schema: None,
            table: None,
            column: None,
            alias: None,
            form: NameForm::Column,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the full name as given, without the alias.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the schema segment.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns the table segment.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns the column segment.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the form this name was split with.
    #[must_use]
    pub const fn form(&self) -> NameForm {
        self.form
    }

    /// Returns true for `*` (table form) or any column containing `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        match self.form {
            NameForm::Table => self.table.as_deref() == Some("*"),
            NameForm::Column => self.column.as_deref().is_some_and(|c| c.contains('*')),
        }
    }
}

impl fmt::Display for AliasedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if let Some(alias) = &self.alias {
            write!(f, " {alias}")?;
        }
        Ok(())
    }
}

/// Keeps the text after the last `(` and before the first `)`, trimmed.
fn strip_call_syntax(segment: &str) -> String {
    let mut value = segment;
    if let Some(open) = value.rfind('(') {
        value = &value[open + 1..];
    }
    if let Some(close) = value.find(')') {
        value = &value[..close];
    }
    String::from(value.trim())
}
