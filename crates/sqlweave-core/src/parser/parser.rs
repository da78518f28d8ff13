//! SQL Parser implementation.

use std::io::Read;
use std::sync::Arc;

use tracing::{debug, trace};

use super::error::ParseError;
use super::precedence::{
    MULTIFIX_OPERAND_BP, NOT_OPERAND_BP, UNARY_OPERAND_BP, infix_binding_power, is_comparison,
    token_to_operator,
};
use crate::ast::ops;
use crate::ast::{
    Delete, Expression, FromItem, GroupBy, Insert, LockMode, LockTable, Operation, OrderBy, Query,
    SelectItem, Statement, TransactionControl, Update,
};
use crate::format::Formatter;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::registry::Registry;

static EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::new(0, 0));

/// SQL Parser.
///
/// A parser reads `;`-separated statements from its input one at a time and
/// can be re-initialized with new input without being rebuilt. Function calls
/// are recognized through its [`Registry`], which may be shared with other
/// parsers and formatters.
///
/// ```
/// use sqlweave_core::Parser;
///
/// let mut parser = Parser::new("SELECT ITEM FROM ANTIQUES WHERE PRICE > 100;");
/// let statement = parser.read_statement().unwrap().unwrap();
/// assert_eq!(
///     statement.to_string(),
///     "select ITEM from ANTIQUES where (PRICE > 100)"
/// );
/// assert!(parser.read_statement().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Parser {
    registry: Arc<Registry>,
    tokens: Vec<Token>,
    pos: usize,
    initialized: bool,
}

impl Parser {
    /// Creates a parser over `input` with a fresh registry.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut parser = Self::default();
        parser.init(input);
        parser
    }

    /// Creates an uninitialized parser that shares `registry`.
    #[must_use]
    pub const fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            tokens: Vec::new(),
            pos: 0,
            initialized: false,
        }
    }

    /// Returns the parser's registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns a formatter that renders with the parser's registry.
    #[must_use]
    pub fn formatter(&self) -> Formatter<'_> {
        Formatter::new(&self.registry)
    }

    /// Registers a custom function so `name(...)` parses as a call.
    /// Negative arities mean one argument.
    pub fn add_custom_function(&self, name: &str, arity: i32) {
        self.registry.register(name, arity);
    }

    /// Replaces the parser's input.
    pub fn init(&mut self, input: &str) {
        self.tokens = Lexer::new(input).tokenize();
        self.pos = 0;
        self.initialized = true;
        debug!(
            bytes = input.len(),
            tokens = self.tokens.len(),
            "parser initialized"
        );
    }

    /// Replaces the parser's input with everything `reader` yields.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if reading fails or the input is not UTF-8.
    pub fn init_reader<R: Read>(&mut self, mut reader: R) -> Result<(), ParseError> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| ParseError::Io(e.to_string()))?;
        self.init(&input);
        Ok(())
    }

    /// Reads the next statement. Returns `Ok(None)` at end of input or after
    /// `EXIT;` / `QUIT;`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Uninitialized`] before [`Parser::init`], and a
    /// syntax error if the statement is malformed.
    pub fn read_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        self.ensure_initialized()?;

        while self.eat(&TokenKind::Semicolon) {}
        if self.current().is_eof() {
            return Ok(None);
        }
        if self.check_word("EXIT") || self.check_word("QUIT") {
            debug!("end of statements requested");
            self.pos = self.tokens.len().saturating_sub(1);
            return Ok(None);
        }

        let statement = self.parse_statement()?;
        self.expect_terminator()?;
        debug!(statement = statement.keyword(), "parsed statement");
        Ok(Some(statement))
    }

    /// Reads all remaining statements.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Parser::read_statement`] reports.
    pub fn read_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while let Some(statement) = self.read_statement()? {
            statements.push(statement);
        }
        Ok(statements)
    }

    /// Reads a single expression, such as a WHERE condition. A leading
    /// `WHERE` keyword is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Uninitialized`] before [`Parser::init`], and a
    /// syntax error if the expression is malformed or followed by anything
    /// but `;` or end of input.
    pub fn read_expression(&mut self) -> Result<Expression, ParseError> {
        self.ensure_initialized()?;
        trace!("reading expression");
        self.eat_keyword(Keyword::Where);
        let expr = self.parse_expression(0)?;
        self.expect_terminator()?;
        Ok(expr)
    }

    fn ensure_initialized(&self) -> Result<(), ParseError> {
        if self.initialized {
            Ok(())
        } else {
            Err(ParseError::Uninitialized)
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Select) => Ok(Statement::from(self.parse_query()?)),
            Some(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            Some(Keyword::Update) => Ok(Statement::Update(self.parse_update()?)),
            Some(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            Some(Keyword::Set) => Ok(Statement::Transaction(self.parse_set_transaction()?)),
            _ if self.check_word("LOCK") => Ok(Statement::LockTable(self.parse_lock_table()?)),
            _ if self.check_word("COMMIT") || self.check_word("ROLLBACK") => {
                Ok(Statement::Transaction(self.parse_end_transaction()?))
            }
            _ => Err(self.unexpected(
                "SELECT, INSERT, UPDATE, DELETE, LOCK, COMMIT, ROLLBACK or SET TRANSACTION",
            )),
        }
    }

    /// Parses a SELECT query.
    fn parse_query(&mut self) -> Result<Query, ParseError> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Select)?;

        let mut builder = Query::builder();
        if self.eat_keyword(Keyword::Distinct) {
            builder = builder.distinct(true);
        } else {
            self.eat_keyword(Keyword::All);
        }

        loop {
            builder = builder.item(self.parse_select_item()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect_keyword(Keyword::From)?;
        loop {
            builder = builder.from(self.parse_from_item()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        if self.eat_keyword(Keyword::Where) {
            builder = builder.where_clause(self.parse_expression(0)?);
        }

        if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            let mut group_by = GroupBy::new(self.parse_expression_list()?);
            if self.eat_keyword(Keyword::Having) {
                group_by = group_by.with_having(self.parse_expression(0)?);
            }
            builder = builder.group_by(group_by);
        }

        if let Some(operator) = self.parse_set_operator() {
            let other = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_query()?
            } else {
                self.parse_query()?
            };
            builder = builder.set_operation(operator, other);
        }

        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            loop {
                let expr = self.parse_expression(0)?;
                let entry = if self.eat_keyword(Keyword::Desc) {
                    OrderBy::desc(expr)
                } else {
                    self.eat_keyword(Keyword::Asc);
                    OrderBy::new(expr)
                };
                builder = builder.order_by(entry);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        if self.eat_keyword(Keyword::For) {
            self.expect_keyword(Keyword::Update)?;
            builder = builder.for_update(true);
        }

        builder
            .build()
            .map_err(|e| ParseError::new(e.to_string(), start.merge(self.previous_span())))
    }

    fn parse_set_operator(&mut self) -> Option<&'static str> {
        let operator = match self.current().as_keyword()? {
            Keyword::Union => {
                self.advance();
                if self.eat_keyword(Keyword::All) {
                    ops::UNION_ALL
                } else {
                    ops::UNION
                }
            }
            Keyword::Intersect => {
                self.advance();
                ops::INTERSECT
            }
            Keyword::Minus => {
                self.advance();
                ops::MINUS_SET
            }
            Keyword::Except => {
                self.advance();
                ops::EXCEPT
            }
            _ => return None,
        };
        Some(operator)
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::wildcard());
        }
        let expr = self.parse_expression(0)?;
        let item = SelectItem::with_registry(expr, &self.registry);
        Ok(match self.parse_optional_alias()? {
            Some(alias) => item.with_alias(alias),
            None => item,
        })
    }

    fn parse_from_item(&mut self) -> Result<FromItem, ParseError> {
        let name = self.parse_dotted_name()?;
        let item = FromItem::new(&name);
        Ok(match self.parse_optional_alias()? {
            Some(alias) => item.with_alias(alias),
            None => item,
        })
    }

    /// Parses `[AS] alias`.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_identifier().map(Some);
        }
        match &self.current().kind {
            TokenKind::Identifier(alias) => {
                let alias = alias.clone();
                self.advance();
                Ok(Some(alias))
            }
            _ => Ok(None),
        }
    }

    /// Parses an INSERT statement.
    fn parse_insert(&mut self) -> Result<Insert, ParseError> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let mut builder = Insert::builder(self.parse_dotted_name()?);

        if self.check(&TokenKind::LeftParen) && !self.peek_is_keyword(1, Keyword::Select) {
            self.advance();
            let mut columns = vec![self.parse_dotted_name()?];
            while self.eat(&TokenKind::Comma) {
                columns.push(self.parse_dotted_name()?);
            }
            self.expect(&TokenKind::RightParen)?;
            builder = builder.columns(columns);
        }

        if self.eat_keyword(Keyword::Values) {
            self.expect(&TokenKind::LeftParen)?;
            let values = self.parse_expression_list()?;
            self.expect(&TokenKind::RightParen)?;
            builder = builder.values(values);
        } else if self.check_keyword(Keyword::Select) {
            builder = builder.query(self.parse_query()?);
        } else if self.check(&TokenKind::LeftParen) {
            builder = builder.query(self.parse_parenthesized_query()?);
        } else {
            return Err(self.unexpected("VALUES or SELECT"));
        }

        builder
            .build()
            .map_err(|e| ParseError::new(e.to_string(), start.merge(self.previous_span())))
    }

    /// Parses an UPDATE statement.
    fn parse_update(&mut self) -> Result<Update, ParseError> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Update)?;
        let mut builder = Update::builder(self.parse_dotted_name()?);
        if let TokenKind::Identifier(alias) = &self.current().kind {
            let alias = alias.clone();
            self.advance();
            builder = builder.alias(alias);
        }

        self.expect_keyword(Keyword::Set)?;
        loop {
            let column = self.parse_dotted_name()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expression(0)?;
            builder = builder.set(column, value);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        if self.eat_keyword(Keyword::Where) {
            builder = builder.where_clause(self.parse_expression(0)?);
        }

        builder
            .build()
            .map_err(|e| ParseError::new(e.to_string(), start.merge(self.previous_span())))
    }

    /// Parses a DELETE statement.
    fn parse_delete(&mut self) -> Result<Delete, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.eat_keyword(Keyword::From);
        let delete = Delete::new(self.parse_dotted_name()?);
        if self.eat_keyword(Keyword::Where) {
            return Ok(delete.with_where(self.parse_expression(0)?));
        }
        Ok(delete)
    }

    /// Parses `LOCK TABLE t [, ...] IN <mode> MODE [NOWAIT]`.
    fn parse_lock_table(&mut self) -> Result<LockTable, ParseError> {
        let start = self.current().span;
        self.expect_word("LOCK")?;
        self.expect_word("TABLE")?;

        let mut tables = vec![self.parse_dotted_name()?];
        while self.eat(&TokenKind::Comma) {
            tables.push(self.parse_dotted_name()?);
        }

        self.expect_keyword(Keyword::In)?;
        let mode = self.parse_lock_mode()?;
        self.expect_word("MODE")?;
        let nowait = self.eat_word("NOWAIT");

        LockTable::new(tables, mode)
            .map(|lock| lock.with_nowait(nowait))
            .map_err(|e| ParseError::new(e.to_string(), start.merge(self.previous_span())))
    }

    fn parse_lock_mode(&mut self) -> Result<LockMode, ParseError> {
        if self.eat_word("ROW") {
            if self.eat_word("SHARE") {
                return Ok(LockMode::RowShare);
            }
            self.expect_word("EXCLUSIVE")?;
            return Ok(LockMode::RowExclusive);
        }
        if self.eat_word("SHARE") {
            if self.eat_keyword(Keyword::Update) {
                return Ok(LockMode::ShareUpdate);
            }
            if self.eat_word("ROW") {
                self.expect_word("EXCLUSIVE")?;
                return Ok(LockMode::ShareRowExclusive);
            }
            return Ok(LockMode::Share);
        }
        if self.eat_word("EXCLUSIVE") {
            return Ok(LockMode::Exclusive);
        }
        Err(self.unexpected("lock mode"))
    }

    /// Parses `COMMIT | ROLLBACK [WORK] [COMMENT 'text']`.
    fn parse_end_transaction(&mut self) -> Result<TransactionControl, ParseError> {
        let mut transaction = if self.eat_word("COMMIT") {
            TransactionControl::commit()
        } else {
            self.expect_word("ROLLBACK")?;
            TransactionControl::rollback()
        };
        self.eat_word("WORK");
        if self.eat_word("COMMENT") {
            match &self.current().kind {
                TokenKind::String(comment) => {
                    transaction = transaction.with_comment(comment.clone());
                    self.advance();
                }
                _ => return Err(self.unexpected("comment string")),
            }
        }
        Ok(transaction)
    }

    /// Parses `SET TRANSACTION READ ONLY | READ WRITE`.
    fn parse_set_transaction(&mut self) -> Result<TransactionControl, ParseError> {
        self.expect_keyword(Keyword::Set)?;
        self.expect_word("TRANSACTION")?;
        self.expect_word("READ")?;
        if self.eat_word("ONLY") {
            return Ok(TransactionControl::set_transaction(true));
        }
        self.expect_word("WRITE")?;
        Ok(TransactionControl::set_transaction(false))
    }

    /// Parses an expression using Pratt parsing.
    ///
    /// A run of one flattening operator (`a + b + c`) becomes a single
    /// operation with every operand; a different operator at the same level
    /// nests what came before.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_prefix()?;
        // Operator of the n-ary operation built by this loop, if any.
        let mut run: Option<&'static str> = None;
        let mut compared = false;

        loop {
            let token = self.current().clone();
            let Some((l_bp, r_bp)) = infix_binding_power(&token.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            match &token.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let operator = if self.eat_keyword(Keyword::Not) {
                        ops::IS_NOT_NULL
                    } else {
                        ops::IS_NULL
                    };
                    self.expect_keyword(Keyword::Null)?;
                    lhs = Operation::unary(operator, lhs).into();
                    run = None;
                }
                TokenKind::Keyword(Keyword::Not | Keyword::Between | Keyword::Like | Keyword::In) => {
                    lhs = self.parse_multifix(lhs)?;
                    run = None;
                }
                kind if is_comparison(kind) => {
                    if compared {
                        return Err(ParseError::new(
                            "comparison operators cannot be chained",
                            token.span,
                        ));
                    }
                    let Some(operator) = token_to_operator(kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_comparison_operand(r_bp)?;
                    lhs = Operation::binary(operator, lhs, rhs).into();
                    compared = true;
                    run = None;
                }
                kind => {
                    let Some(operator) = token_to_operator(kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = match lhs {
                        Expression::Operation(mut op) if run == Some(operator) => {
                            op.push(rhs);
                            Expression::Operation(op)
                        }
                        other => Operation::binary(operator, other, rhs).into(),
                    };
                    run = Some(operator);
                }
            }
        }

        Ok(lhs)
    }

    /// Parses the right side of a comparison, including
    /// `ANY | ALL | SOME (SELECT ...)`.
    fn parse_comparison_operand(&mut self, r_bp: u8) -> Result<Expression, ParseError> {
        let quantifier = match self.current().as_keyword() {
            Some(Keyword::Any) => ops::ANY,
            Some(Keyword::All) => ops::ALL,
            Some(Keyword::Some) => ops::SOME,
            _ => return self.parse_expression(r_bp),
        };
        self.advance();
        let query = self.parse_parenthesized_query()?;
        Ok(Operation::unary(quantifier, Expression::query(query)).into())
    }

    /// Parses `[NOT] BETWEEN lo AND hi`, `[NOT] LIKE pattern` or
    /// `[NOT] IN (list | query)` after `lhs`.
    fn parse_multifix(&mut self, lhs: Expression) -> Result<Expression, ParseError> {
        let negated = self.eat_keyword(Keyword::Not);
        let pick = |positive: &'static str, negative: &'static str| {
            if negated { negative } else { positive }
        };

        match self.current().as_keyword() {
            Some(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression(MULTIFIX_OPERAND_BP)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(MULTIFIX_OPERAND_BP)?;
                let operator = pick(ops::BETWEEN, ops::NOT_BETWEEN);
                Ok(Operation::with_operands(operator, vec![lhs, low, high]).into())
            }
            Some(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_expression(MULTIFIX_OPERAND_BP)?;
                Ok(Operation::binary(pick(ops::LIKE, ops::NOT_LIKE), lhs, pattern).into())
            }
            Some(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let mut operands = vec![lhs];
                if self.check_keyword(Keyword::Select) {
                    operands.push(Expression::query(self.parse_query()?));
                } else {
                    operands.extend(self.parse_expression_list()?);
                }
                self.expect(&TokenKind::RightParen)?;
                Ok(Operation::with_operands(pick(ops::IN, ops::NOT_IN), operands).into())
            }
            _ => Err(self.unexpected("BETWEEN, LIKE or IN")),
        }
    }

    /// Parses a prefix expression (unary operator or primary).
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        match &self.current().kind {
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                let operand = self.parse_expression(NOT_OPERAND_BP)?;
                Ok(Operation::unary(ops::NOT, operand).into())
            }
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_expression(UNARY_OPERAND_BP)?;
                Ok(Operation::unary(ops::MINUS, operand).into())
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_expression(UNARY_OPERAND_BP)
            }
            _ => self.parse_primary(),
        }
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number(text) => {
                self.advance();
                Ok(Expression::number(text))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expression::string(value))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expression::null())
            }
            TokenKind::Question => {
                self.advance();
                Ok(Expression::Placeholder)
            }
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                let query = self.parse_parenthesized_query()?;
                Ok(Operation::unary(ops::EXISTS, Expression::query(query)).into())
            }
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.parse_function_call(&name, token.span)
                } else {
                    self.parse_column_reference(name)
                }
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses the rest of `a.b.c` or `t.*` after its first segment.
    fn parse_column_reference(&mut self, first: String) -> Result<Expression, ParseError> {
        let mut name = first;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            if self.eat(&TokenKind::Star) {
                name.push('*');
                break;
            }
            name.push_str(&self.expect_identifier()?);
        }
        Ok(Expression::column(name))
    }

    /// Parses the argument list of a call to a registered function.
    fn parse_function_call(&mut self, name: &str, span: Span) -> Result<Expression, ParseError> {
        let Some(arity) = self.registry.arity(name) else {
            return Err(ParseError::new(format!("unknown function {name}"), span));
        };

        self.expect(&TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                if self.eat(&TokenKind::Star) {
                    args.push(Expression::column("*"));
                } else {
                    args.push(self.parse_expression(0)?);
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        if !arity.accepts(args.len()) {
            return Err(ParseError::new(
                format!(
                    "function {} expects {arity} argument(s), found {}",
                    name.to_ascii_uppercase(),
                    args.len()
                ),
                span.merge(self.previous_span()),
            ));
        }
        Ok(Operation::call(name, args).into())
    }

    /// Parses `( ... )`: a subquery, a value list, or a grouped expression.
    fn parse_parenthesized(&mut self) -> Result<Expression, ParseError> {
        if self.peek_is_keyword(1, Keyword::Select) {
            return self.parse_parenthesized_query().map(Expression::query);
        }

        self.expect(&TokenKind::LeftParen)?;
        let first = self.parse_expression(0)?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.eat(&TokenKind::Comma) {
                items.push(self.parse_expression(0)?);
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(Operation::with_operands(ops::LIST, items).into());
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(first)
    }

    /// Parses `( SELECT ... )`.
    fn parse_parenthesized_query(&mut self) -> Result<Query, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_query()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(query)
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut exprs = vec![self.parse_expression(0)?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expression(0)?);
        }
        Ok(exprs)
    }

    /// Parses `name[.name...]`.
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }
        Ok(name)
    }

    /// Accepts `;` or end of input after a statement or expression.
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon) || self.current().is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("`;`"))
        }
    }

    // Helper methods

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.current().span, |token| token.span)
    }

    fn peek_is_keyword(&self, offset: usize, keyword: Keyword) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|token| token.as_keyword() == Some(keyword))
    }

    /// Advances to the next token. The final end-of-input token is never
    /// passed.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Checks if the current token is the unreserved word `word`.
    fn check_word(&self, word: &str) -> bool {
        self.current().is_word(word)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let matched = self.check_word(word);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            let expected = kind
                .symbol()
                .map_or_else(|| format!("{kind:?}"), |symbol| format!("`{symbol}`"));
            Err(self.unexpected(&expected))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects the current token to be the unreserved word `word`.
    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    /// Expects and returns an identifier.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        if token.is_eof() {
            ParseError::unexpected_eof(expected, token.span)
        } else {
            ParseError::unexpected(expected, token.kind.clone(), token.span)
        }
    }
}

impl Default for Parser {
    /// Creates an uninitialized parser with a fresh registry.
    fn default() -> Self {
        Self::with_registry(Arc::new(Registry::new()))
    }
}
