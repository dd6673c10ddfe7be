/// A partial expectation for one column. Only the properties that were set
/// are asserted; everything left as `None` is simply not checked.
///
/// # Example
/// ```ignore
/// field("id_artist")
///     .of_type("bigint")
///     .primary_key(true)
///     .foreign_key_to("artist")
///     .nullable(false)
/// ```
#[derive(Debug, Clone)]
pub struct FieldExpectation {
    pub name: &'static str,
    pub type_contains: Option<&'static str>,
    pub primary_key: Option<bool>,
    pub foreign_key: Option<bool>,
    pub references: Option<&'static str>,
    pub nullable: Option<bool>,
}

/// Start an expectation for the named column.
pub fn field(name: &'static str) -> FieldExpectation {
    FieldExpectation {
        name,
        type_contains: None,
        primary_key: None,
        foreign_key: None,
        references: None,
        nullable: None,
    }
}

impl FieldExpectation {
    /// Expect the live column type to contain this fragment, so `bigint`
    /// matches a column reported as `bigint(20)`.
    pub fn of_type(mut self, fragment: &'static str) -> Self {
        self.type_contains = Some(fragment);
        self
    }

    pub fn primary_key(mut self, expected: bool) -> Self {
        self.primary_key = Some(expected);
        self
    }

    /// Expect a foreign key on this column pointing at exactly `table`.
    pub fn foreign_key_to(mut self, table: &'static str) -> Self {
        self.foreign_key = Some(true);
        self.references = Some(table);
        self
    }

    /// Expect no foreign key on this column at all: a key referencing any
    /// table fails the check, not just one pointing at a particular target.
    pub fn no_foreign_key(mut self) -> Self {
        self.foreign_key = Some(false);
        self
    }

    pub fn nullable(mut self, expected: bool) -> Self {
        self.nullable = Some(expected);
        self
    }

    /// The checks this descriptor will actually perform. Properties that were
    /// never set stay off the plan, so no metadata query is issued for them.
    pub fn checks(&self) -> Vec<Check> {
        let mut planned = Vec::new();
        if self.type_contains.is_some() {
            planned.push(Check::Type);
        }
        if self.primary_key.is_some() {
            planned.push(Check::PrimaryKey);
        }
        if self.foreign_key.is_some() {
            planned.push(Check::ForeignKey);
        }
        if self.nullable.is_some() {
            planned.push(Check::Nullability);
        }
        planned
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Type,
    PrimaryKey,
    ForeignKey,
    Nullability,
}

/// A table name together with every column expectation for it.
#[derive(Debug, Clone)]
pub struct TableExpectation {
    pub name: &'static str,
    pub fields: Vec<FieldExpectation>,
}

impl TableExpectation {
    pub fn new(name: &'static str, fields: Vec<FieldExpectation>) -> Self {
        Self { name, fields }
    }
}

/// One seed-data expectation: a natural key (a song title, an artist name)
/// and the set of related entity names a join should produce for it.
#[derive(Debug, Clone)]
pub struct RelationExpectation {
    pub key: &'static str,
    pub related: &'static [&'static str],
}
