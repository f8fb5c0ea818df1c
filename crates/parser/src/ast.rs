use std::fmt;

use lexer::token::{Keyword, Token, TokenKind};

/// Statements in source order. The executor runs them in this order.
#[derive(PartialEq, Debug, Default)]
pub struct Ast {
    pub statements: Vec<Statement>,
}

#[derive(PartialEq, Debug)]
pub enum Statement {
    Select(SelectStatement),
    CreateTable(CreateTableStatement),
    Insert(InsertStatement),
}

#[derive(PartialEq, Debug)]
pub struct SelectStatement {
    pub columns: Vec<Expression>,
    pub from: Token,
}

#[derive(PartialEq, Debug)]
pub struct CreateTableStatement {
    pub name: Token,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(PartialEq, Debug)]
pub struct InsertStatement {
    pub table: Token,
    pub values: Vec<Expression>,
}

#[derive(PartialEq, Debug)]
pub enum Expression {
    /// A string or numeric token.
    Literal(Token),
    /// `*` in a select list.
    Wildcard,
}

#[derive(PartialEq, Debug)]
pub struct ColumnDefinition {
    pub name: Token,
    pub datatype: Token,
}

impl ColumnDefinition {
    pub fn data_type(&self) -> Option<DataType> {
        DataType::from_token(&self.datatype)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DataType {
    Int,
    Text,
}

impl DataType {
    pub fn from_token(token: &Token) -> Option<DataType> {
        if token.kind != TokenKind::Keyword {
            return None;
        }

        match token.value.as_str() {
            v if v == Keyword::Int.as_str() => Some(DataType::Int),
            v if v == Keyword::Text.as_str() => Some(DataType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => f.write_str("INT"),
            DataType::Text => f.write_str("TEXT"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{statement};")?;
        }

        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(s) => write!(f, "{s}"),
            Statement::CreateTable(s) => write!(f, "{s}"),
            Statement::Insert(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_list(f, &self.columns)?;
        write!(f, " FROM {}", self.from)
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", self.name)?;
        write_list(f, &self.columns)?;
        f.write_str(")")
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} VALUES (", self.table)?;
        write_list(f, &self.values)?;
        f.write_str(")")
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data_type() {
            Some(datatype) => write!(f, "{} {datatype}", self.name),
            None => write!(f, "{} {}", self.name, self.datatype.value),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(token) => write!(f, "{token}"),
            Expression::Wildcard => f.write_str("*"),
        }
    }
}
