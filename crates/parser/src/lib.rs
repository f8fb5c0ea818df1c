use ast::{
    Ast, ColumnDefinition, CreateTableStatement, DataType, Expression, InsertStatement,
    SelectStatement, Statement,
};
use common::{Location, ParseError, ParseErrorKind, END_OF_INPUT};
use lexer::token::{Keyword, Symbol, Token, TokenKind};
use lexer::LexResult;

pub mod ast;
pub mod consts;

/// `Ok(None)` means the leading keyword didn't match and nothing was consumed.
/// Once it has matched, any failure is a hard error.
type StatementResult = Result<Option<(Statement, usize)>, ParseError>;

type StatementParser = fn(&Parser, usize, &Token) -> StatementResult;

/// Statement kinds are disjoint on their first keyword, so order doesn't matter.
const STATEMENT_PARSERS: [StatementParser; 3] = [
    Parser::parse_select_statement,
    Parser::parse_create_table_statement,
    Parser::parse_insert_statement,
];

pub struct Parser {
    tokens: Vec<Token>,
    end: Location,
}

impl Parser {
    pub fn new(lex_result: LexResult) -> Parser {
        Parser {
            tokens: lex_result.tokens,
            end: lex_result.end,
        }
    }

    /// Parse every statement. The first error aborts the whole parse.
    pub fn parse(&self) -> Result<Ast, ParseError> {
        match self.parse_program() {
            Ok(ast) => {
                log::debug!("parsed {} statements", ast.statements.len());
                Ok(ast)
            }
            Err(err) => {
                log::error!("{err}");
                Err(err)
            }
        }
    }

    fn parse_program(&self) -> Result<Ast, ParseError> {
        let delimiter = Token::symbol(Symbol::Semicolon);

        let mut statements = vec![];
        let mut cursor = 0;

        while !self.is_end(cursor) {
            let (statement, next) = self.parse_statement(cursor, &delimiter)?;
            statements.push(statement);
            cursor = next;

            let mut delimited = false;
            while self.peek(cursor).is_some_and(|t| *t == delimiter) {
                delimited = true;
                cursor += 1;
            }

            if !delimited && !self.is_end(cursor) {
                return Err(self.error_at(cursor, ParseErrorKind::MissingDelimiter));
            }
        }

        Ok(Ast { statements })
    }

    fn parse_statement(&self, cursor: usize, delimiter: &Token) -> Result<(Statement, usize), ParseError> {
        for parse in STATEMENT_PARSERS {
            if let Some(parsed) = parse(self, cursor, delimiter)? {
                return Ok(parsed);
            }
        }

        Err(self.error_at(cursor, ParseErrorKind::ExpectedStatement))
    }

    /// `select <item> {, <item>} from <ident>`
    fn parse_select_statement(&self, cursor: usize, delimiter: &Token) -> StatementResult {
        let Some(cursor) = self.parse_token(cursor, &Token::keyword(Keyword::Select)) else {
            return Ok(None);
        };

        let from = Token::keyword(Keyword::From);
        let (columns, cursor) =
            self.parse_list(cursor, &[&from, delimiter], |c| self.parse_select_item(c))?;

        let cursor = self.expect(cursor, &from)?;
        let (table, cursor) = self.expect_identifier(cursor)?;

        let statement = Statement::Select(SelectStatement {
            columns,
            from: table,
        });

        Ok(Some((statement, cursor)))
    }

    /// `create table <ident> ( <ident> <type> {, <ident> <type>} )`
    fn parse_create_table_statement(&self, cursor: usize, delimiter: &Token) -> StatementResult {
        let Some(cursor) = self.parse_token(cursor, &Token::keyword(Keyword::Create)) else {
            return Ok(None);
        };

        let cursor = self.expect(cursor, &Token::keyword(Keyword::Table))?;
        let (name, cursor) = self.expect_identifier(cursor)?;
        let cursor = self.expect(cursor, &Token::symbol(Symbol::LeftParen))?;

        let close = Token::symbol(Symbol::RightParen);
        let (columns, cursor) =
            self.parse_list(cursor, &[&close, delimiter], |c| self.parse_column_definition(c))?;

        let cursor = self.expect(cursor, &close)?;

        let statement = Statement::CreateTable(CreateTableStatement { name, columns });

        Ok(Some((statement, cursor)))
    }

    /// `insert into <ident> values ( <literal> {, <literal>} )`
    fn parse_insert_statement(&self, cursor: usize, delimiter: &Token) -> StatementResult {
        let Some(cursor) = self.parse_token(cursor, &Token::keyword(Keyword::Insert)) else {
            return Ok(None);
        };

        let cursor = self.expect(cursor, &Token::keyword(Keyword::Into))?;
        let (table, cursor) = self.expect_identifier(cursor)?;
        let cursor = self.expect(cursor, &Token::keyword(Keyword::Values))?;
        let cursor = self.expect(cursor, &Token::symbol(Symbol::LeftParen))?;

        let close = Token::symbol(Symbol::RightParen);
        let (values, cursor) =
            self.parse_list(cursor, &[&close, delimiter], |c| self.parse_literal(c))?;

        let cursor = self.expect(cursor, &close)?;

        let statement = Statement::Insert(InsertStatement { table, values });

        Ok(Some((statement, cursor)))
    }

    /// Comma separated, non-empty list. Stops in front of the first of
    /// `delimiters` following an item, without consuming it.
    fn parse_list<T, F>(
        &self,
        mut cursor: usize,
        delimiters: &[&Token],
        parse_item: F,
    ) -> Result<(Vec<T>, usize), ParseError>
    where
        F: Fn(usize) -> Result<(T, usize), ParseError>,
    {
        let comma = Token::symbol(Symbol::Comma);
        let mut items = vec![];

        loop {
            let (item, next) = parse_item(cursor)?;
            items.push(item);
            cursor = next;

            match self.peek(cursor) {
                Some(t) if *t == comma => cursor += 1,
                Some(t) if delimiters.iter().any(|d| *d == t) => return Ok((items, cursor)),
                _ => {
                    let expected = format!("{} or {}", describe(&comma), describe(delimiters[0]));
                    return Err(self.unexpected(cursor, expected));
                }
            }
        }
    }

    fn parse_select_item(&self, cursor: usize) -> Result<(Expression, usize), ParseError> {
        if let Some(cursor) = self.parse_token(cursor, &Token::symbol(Symbol::Asterisk)) {
            return Ok((Expression::Wildcard, cursor));
        }

        match self.parse_expression(cursor) {
            Some(parsed) => Ok(parsed),
            None => Err(self.unexpected(cursor, consts::EXPECT_SELECT_ITEM)),
        }
    }

    fn parse_literal(&self, cursor: usize) -> Result<(Expression, usize), ParseError> {
        match self.parse_expression(cursor) {
            Some(parsed) => Ok(parsed),
            None => Err(self.unexpected(cursor, consts::EXPECT_LITERAL)),
        }
    }

    // Only literals for now.
    fn parse_expression(&self, cursor: usize) -> Option<(Expression, usize)> {
        let token = self.peek(cursor)?;

        match token.kind {
            TokenKind::String | TokenKind::Numeric => {
                Some((Expression::Literal(token.clone()), cursor + 1))
            }
            _ => None,
        }
    }

    fn parse_column_definition(&self, cursor: usize) -> Result<(ColumnDefinition, usize), ParseError> {
        let (name, cursor) = self.expect_identifier(cursor)?;

        match self.peek(cursor) {
            Some(t) if DataType::from_token(t).is_some() => {
                let definition = ColumnDefinition {
                    name,
                    datatype: t.clone(),
                };

                Ok((definition, cursor + 1))
            }
            _ => Err(self.unexpected(cursor, consts::EXPECT_DATATYPE)),
        }
    }

    /// Cursor past `template` if it is next, `None` otherwise.
    fn parse_token(&self, cursor: usize, template: &Token) -> Option<usize> {
        match self.peek(cursor) {
            Some(t) if t == template => Some(cursor + 1),
            _ => None,
        }
    }

    // Error if the next token is not `template`.
    fn expect(&self, cursor: usize, template: &Token) -> Result<usize, ParseError> {
        self.parse_token(cursor, template)
            .ok_or_else(|| self.unexpected(cursor, describe(template)))
    }

    fn expect_identifier(&self, cursor: usize) -> Result<(Token, usize), ParseError> {
        match self.peek(cursor) {
            Some(t) if t.kind == TokenKind::Identifier && !t.value.is_empty() => {
                Ok((t.clone(), cursor + 1))
            }
            _ => Err(self.unexpected(cursor, consts::EXPECT_IDENT)),
        }
    }

    // Get the token at cursor without consuming it
    fn peek(&self, cursor: usize) -> Option<&Token> {
        self.tokens.get(cursor)
    }

    // True if all tokens parsed
    fn is_end(&self, cursor: usize) -> bool {
        cursor >= self.tokens.len()
    }

    fn unexpected(&self, cursor: usize, expected: impl Into<String>) -> ParseError {
        self.error_at(cursor, ParseErrorKind::UnexpectedToken(expected.into()))
    }

    fn error_at(&self, cursor: usize, kind: ParseErrorKind) -> ParseError {
        match self.peek(cursor) {
            Some(t) => ParseError::new(kind, t.location, t.value.as_str()),
            None => ParseError::new(kind, self.end, END_OF_INPUT),
        }
    }
}

fn describe(template: &Token) -> String {
    match template.kind {
        TokenKind::Keyword => format!("{} keyword", template.value.to_ascii_uppercase()),
        _ => format!("`{}`", template.value),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::Parser;
    use common::{Location, ParseError, ParseErrorKind};
    use lexer::token::{Token, TokenKind};
    use lexer::{LexResult, Lexer};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parse(source: &str) -> Result<Ast, ParseError> {
        let _ = env_logger::builder().is_test(true).try_init();

        let lex_result = Lexer::new(source).lex().unwrap();
        Parser::new(lex_result).parse()
    }

    fn ident(value: &str) -> Token {
        Token::template(value, TokenKind::Identifier)
    }

    fn kw(value: &str) -> Token {
        Token::template(value, TokenKind::Keyword)
    }

    fn num(value: &str) -> Expression {
        Expression::Literal(Token::template(value, TokenKind::Numeric))
    }

    fn string(value: &str) -> Expression {
        Expression::Literal(Token::template(value, TokenKind::String))
    }

    fn column(name: &str, datatype: &str) -> ColumnDefinition {
        ColumnDefinition {
            name: ident(name),
            datatype: kw(datatype),
        }
    }

    fn unexpected(expected: &str) -> ParseErrorKind {
        ParseErrorKind::UnexpectedToken(String::from(expected))
    }

    #[test]
    fn test_simple_select_statement() {
        let actual = parse("select 1 from t").unwrap();

        let expected = Ast {
            statements: vec![Statement::Select(SelectStatement {
                columns: vec![num("1")],
                from: ident("t"),
            })],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_select_literal_list() {
        let actual = parse("SELECT 1, 'a''b', 2.5e3 FROM \"Items\";").unwrap();

        let expected = Ast {
            statements: vec![Statement::Select(SelectStatement {
                columns: vec![num("1"), string("a'b"), num("2.5e3")],
                from: ident("Items"),
            })],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_select_wildcard() {
        let actual = parse("select *, 1 from t;").unwrap();

        let expected = Ast {
            statements: vec![Statement::Select(SelectStatement {
                columns: vec![Expression::Wildcard, num("1")],
                from: ident("t"),
            })],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_create_table_statement() {
        let actual = parse("create table users (id int, Name TEXT);").unwrap();

        let expected = Ast {
            statements: vec![Statement::CreateTable(CreateTableStatement {
                name: ident("users"),
                columns: vec![column("id", "int"), column("name", "text")],
            })],
        };

        assert_eq!(actual, expected);

        let Statement::CreateTable(create) = &actual.statements[0] else {
            panic!("expected create table");
        };
        assert_eq!(create.columns[0].data_type(), Some(DataType::Int));
        assert_eq!(create.columns[1].data_type(), Some(DataType::Text));
    }

    #[test]
    fn test_simple_insert_statement() {
        let actual = parse("insert into users values (105, 'George');").unwrap();

        let expected = Ast {
            statements: vec![Statement::Insert(InsertStatement {
                table: ident("users"),
                values: vec![num("105"), string("George")],
            })],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_statements_keep_source_order() {
        let actual = parse(
            "create table t (a int, b text); insert into t values (1, 'x'); select * from t;",
        )
        .unwrap();

        let expected = Ast {
            statements: vec![
                Statement::CreateTable(CreateTableStatement {
                    name: ident("t"),
                    columns: vec![column("a", "int"), column("b", "text")],
                }),
                Statement::Insert(InsertStatement {
                    table: ident("t"),
                    values: vec![num("1"), string("x")],
                }),
                Statement::Select(SelectStatement {
                    columns: vec![Expression::Wildcard],
                    from: ident("t"),
                }),
            ],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_extra_semicolons() {
        let actual = parse("select 1 from a;;; select 2 from b;;").unwrap();

        assert_eq!(actual.statements.len(), 2);
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(parse("").unwrap(), Ast::default());
        assert_eq!(parse("  \n ").unwrap(), Ast::default());
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse("select 1 from t select 2 from t;").unwrap_err();

        assert_eq!(err.kind, ParseErrorKind::MissingDelimiter);
        assert_eq!(err.location, Location::new(0, 16));
        assert_eq!(err.got, "select");
    }

    #[test]
    fn test_missing_statement() {
        let err = parse(";").unwrap_err();

        assert_eq!(err.kind, ParseErrorKind::ExpectedStatement);
        assert_eq!(err.to_string(), "[0,0]: Expected statement, got: ;");
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("select 1 from t;\n  where 1").unwrap_err();

        assert_eq!(err.kind, ParseErrorKind::ExpectedStatement);
        assert_eq!(err.location, Location::new(1, 2));
        assert_eq!(err.got, "where");
    }

    #[test]
    fn test_select_missing_from() {
        let err = parse("select 1;").unwrap_err();

        assert_eq!(err.kind, unexpected("FROM keyword"));
        assert_eq!(err.got, ";");
    }

    #[test]
    fn test_select_end_of_input() {
        let err = parse("select 1, 2").unwrap_err();

        assert_eq!(err.kind, unexpected("`,` or FROM keyword"));
        assert_eq!(err.location, Location::new(0, 11));
        assert_eq!(err.got, "end of input");
    }

    #[test]
    fn test_select_alias_rejected() {
        let err = parse("select 1 as one from t").unwrap_err();

        assert_eq!(err.kind, unexpected("`,` or FROM keyword"));
        assert_eq!(err.got, "as");
    }

    #[test]
    fn test_select_where_rejected() {
        let err = parse("select 1 from t where 1").unwrap_err();

        assert_eq!(err.kind, ParseErrorKind::MissingDelimiter);
        assert_eq!(err.got, "where");
    }

    #[test]
    fn test_select_requires_table_identifier() {
        let err = parse("select 1 from 't'").unwrap_err();

        assert_eq!(err.kind, unexpected("identifier"));
        assert_eq!(err.location, Location::new(0, 14));
    }

    #[test]
    fn test_select_empty_item() {
        let err = parse("select , 1 from t").unwrap_err();

        assert_eq!(err.kind, unexpected(crate::consts::EXPECT_SELECT_ITEM));
        assert_eq!(err.got, ",");
    }

    #[test]
    fn test_create_table_bad_type() {
        let err = parse("create table t (a integer)").unwrap_err();

        assert_eq!(err.kind, unexpected(crate::consts::EXPECT_DATATYPE));
        assert_eq!(err.got, "integer");
    }

    #[test]
    fn test_create_table_no_columns() {
        let err = parse("create table t ()").unwrap_err();

        assert_eq!(err.kind, unexpected("identifier"));
        assert_eq!(err.got, ")");
    }

    #[test]
    fn test_create_missing_table_keyword() {
        let err = parse("create t (a int)").unwrap_err();

        assert_eq!(err.kind, unexpected("TABLE keyword"));
    }

    #[test]
    fn test_create_table_unclosed() {
        let err = parse("create table t (a int;").unwrap_err();

        assert_eq!(err.kind, unexpected("`)`"));
        assert_eq!(err.got, ";");
    }

    #[test]
    fn test_empty_quoted_identifier_does_not_lex() {
        let err = Lexer::new("select 1 from \"\"").lex().unwrap_err();

        assert_eq!(err.kind, common::LexErrorKind::EmptyQuotedIdentifier);
    }

    #[test]
    fn test_empty_identifier_token_rejected() {
        let tokens = vec![
            Token::new("select", TokenKind::Keyword, Location::new(0, 0)),
            Token::new("1", TokenKind::Numeric, Location::new(0, 7)),
            Token::new("from", TokenKind::Keyword, Location::new(0, 9)),
            Token::new("", TokenKind::Identifier, Location::new(0, 14)),
        ];
        let lex_result = LexResult {
            tokens,
            end: Location::new(0, 16),
        };

        let err = Parser::new(lex_result).parse().unwrap_err();

        assert_eq!(err.kind, unexpected("identifier"));
        assert_eq!(err.location, Location::new(0, 14));
    }

    #[test]
    fn test_insert_rejects_wildcard() {
        let err = parse("insert into t values (*)").unwrap_err();

        assert_eq!(err.kind, unexpected(crate::consts::EXPECT_LITERAL));
        assert_eq!(err.got, "*");
    }

    #[test]
    fn test_insert_missing_values() {
        let err = parse("insert into t (1)").unwrap_err();

        assert_eq!(err.kind, unexpected("VALUES keyword"));
        assert_eq!(err.got, "(");
    }

    #[test]
    fn test_display_round_trip() {
        let source = "create table \"T\" (\"from\" int, b TEXT);\
                      insert into \"T\" values (1.5, 'it''s');\
                      select *, 'x' from \"T\"";
        let ast = parse(source).unwrap();

        let rendered = ast.to_string();
        assert_eq!(
            rendered,
            "CREATE TABLE \"T\" (\"from\" INT, b TEXT);\n\
             INSERT INTO \"T\" VALUES (1.5, 'it''s');\n\
             SELECT *, 'x' FROM \"T\";"
        );

        assert_eq!(parse(&rendered).unwrap(), ast);
    }

    const STATEMENT_TOKENS: [&str; 27] = [
        "create", "table", "t", "(", "a", "int", ",", "b", "text", ")", ";", "insert", "into",
        "t", "values", "(", "1", ",", "'x y'", ")", ";", "select", "*", ",", "2.5", "from", "t",
    ];

    proptest! {
        #[test]
        fn whitespace_does_not_change_ast(
            gaps in proptest::collection::vec("[ \t\n]{1,4}", STATEMENT_TOKENS.len() - 1)
        ) {
            let baseline = parse(&STATEMENT_TOKENS.join(" ")).unwrap();

            let mut spaced = String::from(STATEMENT_TOKENS[0]);
            for (token, gap) in STATEMENT_TOKENS[1..].iter().zip(&gaps) {
                spaced.push_str(gap);
                spaced.push_str(token);
            }

            prop_assert_eq!(parse(&spaced).unwrap(), baseline);
        }
    }
}
