//! SQL front end: turns query text into an [`Ast`] for an executor.
//!
//! ```
//! let ast = sqlfront::parse("create table t (a int); select * from t;").unwrap();
//! assert_eq!(ast.statements.len(), 2);
//! ```

use derive_more::derive::From;
use thiserror::Error;

pub use common::{LexError, LexErrorKind, Location, ParseError, ParseErrorKind};
pub use lexer::token::{Keyword, Symbol, Token, TokenKind};
pub use lexer::{LexResult, Lexer};
pub use parser::ast::{
    Ast, ColumnDefinition, CreateTableStatement, DataType, Expression, InsertStatement,
    SelectStatement, Statement,
};
pub use parser::Parser;

#[derive(Debug, From, Error)]
pub enum Error {
    #[error("Lex Error: {0}")]
    Lex(LexError),
    #[error("Parse Error: {0}")]
    Parse(ParseError),
}

impl Error {
    pub fn location(&self) -> Location {
        match self {
            Error::Lex(e) => e.location,
            Error::Parse(e) => e.location,
        }
    }
}

/// Tokenize and parse `source`. Nothing partial is returned on failure.
pub fn parse(source: &str) -> Result<Ast, Error> {
    let lex_result = Lexer::new(source).lex()?;
    let ast = Parser::new(lex_result).parse()?;

    Ok(ast)
}
