//! Compact surface syntax for axioms, concepts and roles.
//!
//! ```text
//! axiom      := (concept '⊑' concept | head '(' ind (',' ind)? ')') ('@' id)?
//! concept    := disjunct ('⊓' disjunct)*
//! disjunct   := unary ('⊔' unary)*
//! unary      := '¬' unary | ('∃' | '∀') role '.' unary
//!             | ('≥' | '≤' | '=') number role '.' unary | primary
//! primary    := id | '⊤' | '⊥' | '{' ind (',' ind)* '}' | '(' concept ')'
//! role       := (id | '(' role ')') '^-1'*
//! ```
//!
//! `⊓` is the loosest operator, so `A ⊔ B ⊓ C` reads `(A ⊔ B) ⊓ C`.
//! Identifiers match `[A-Za-z0-9]+` and are resolved against the configured
//! base IRI. The trailing annotation `@ N` addresses the axiom by the naming
//! concept `N`, `@ global` makes it a global object axiom.

use crate::annotation::{AnnotatedAxiom, Annotation};
use crate::axiom::Axiom;
use crate::entity::{Individual, ObjectProperty, OwlClass};
use crate::error::{ParseError, ParseErrorKind};
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use crate::ontology::Ontology;
use oxrdf::NamedNode;
use std::str::FromStr;

/// Annotation value marking a global object axiom.
const GLOBAL_KEYWORD: &str = "global";

/// Line prefix labeling entities as rigid in [`SyntaxParser::parse_ontology`].
const RIGID_KEYWORD: &str = "rigid";

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Namespace identifiers are appended to.
    pub base_iri: String,
    /// Maximum nesting depth of expressions.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            base_iri: "http://oxigraph.org/context/default#".into(),
            max_depth: 128,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = base_iri.into();
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parser for the compact syntax.
///
/// ```
/// use oxcontext::{Axiom, ClassExpression, ParserConfig, SyntaxParser};
///
/// let parser = SyntaxParser::with_config(ParserConfig::new().with_base_iri("http://example.com/"));
/// let axiom = parser.parse_axiom("C ⊑ D")?;
/// assert_eq!(
///     axiom.axiom(),
///     &Axiom::subclass_of(
///         parser.parse_class_expression("C")?,
///         parser.parse_class_expression("D")?
///     )
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyntaxParser {
    config: ParserConfig,
}

impl SyntaxParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an axiom and its optional trailing `@` annotation.
    pub fn parse_axiom(&self, input: &str) -> Result<AnnotatedAxiom, ParseError> {
        check_balance(input)?;
        let tokens = tokenize(input)?;
        let (body, tag) = split_tag(input, &tokens)?;
        let axiom = self.read_axiom(input, body)?;
        let mut axiom = AnnotatedAxiom::new(axiom);
        if let Some(tag) = tag {
            let name = &input[tag.start..tag.end];
            axiom = axiom.with_annotation(if name == GLOBAL_KEYWORD {
                Annotation::object_global()
            } else {
                Annotation::defined_by(&OwlClass::new(self.resolve(name)?))
            });
        }
        Ok(axiom)
    }

    pub fn parse_class_expression(&self, input: &str) -> Result<ClassExpression, ParseError> {
        check_balance(input)?;
        let tokens = tokenize(input)?;
        let mut parser = ExpressionParser::new(self, input, &tokens);
        let expression = parser.read_concept(0)?;
        parser.expect_end()?;
        Ok(expression)
    }

    pub fn parse_object_property_expression(
        &self,
        input: &str,
    ) -> Result<ObjectPropertyExpression, ParseError> {
        check_balance(input)?;
        let tokens = tokenize(input)?;
        let mut parser = ExpressionParser::new(self, input, &tokens);
        let property = parser.read_role(0)?;
        parser.expect_end()?;
        Ok(property)
    }

    /// Parses a document with one axiom per line.
    ///
    /// Empty lines and lines starting with `#` are skipped. A line
    /// `rigid A, r` labels the listed entities as rigid.
    pub fn parse_ontology(&self, input: &str) -> Result<Ontology, ParseError> {
        let mut ontology = Ontology::default();
        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(names) = line
                .strip_prefix(RIGID_KEYWORD)
                .filter(|rest| rest.starts_with(char::is_whitespace))
            {
                for name in names.split(',') {
                    let name = name.trim();
                    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
                        return Err(ParseError::new(ParseErrorKind::BadIdentifier, name));
                    }
                    ontology.mark_rigid(self.resolve(name)?);
                }
            } else {
                ontology.add_annotated_axiom(self.parse_axiom(line)?);
            }
        }
        Ok(ontology)
    }

    fn resolve(&self, name: &str) -> Result<NamedNode, ParseError> {
        NamedNode::new(format!("{}{name}", self.config.base_iri))
            .map_err(|_| ParseError::new(ParseErrorKind::BadIdentifier, name))
    }

    fn read_axiom(&self, input: &str, body: &[Token]) -> Result<Axiom, ParseError> {
        let Some(last) = body.last() else {
            return Err(ParseError::new(ParseErrorKind::BadArity, input.trim()));
        };

        let mut depth = 0_usize;
        let mut subsumptions = Vec::new();
        for (i, token) in body.iter().enumerate() {
            match token.kind {
                TokenKind::OpenParen | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBrace => depth = depth.saturating_sub(1),
                TokenKind::SubClassOf if depth == 0 => subsumptions.push(i),
                _ => (),
            }
        }
        match subsumptions.as_slice() {
            [] => (),
            [position] => {
                let sub_class = self.read_full_concept(input, &body[..*position])?;
                let super_class = self.read_full_concept(input, &body[position + 1..])?;
                return Ok(Axiom::SubClassOf {
                    sub_class,
                    super_class,
                });
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::BadArity,
                    span(input, body),
                ));
            }
        }

        // Assertion: a head followed by a parenthesised argument list
        let open = if last.kind == TokenKind::CloseParen {
            matching_open(body, body.len() - 1)
        } else {
            None
        };
        let (head, arguments) = match open {
            Some(open) if open > 0 && is_head(body, open) => {
                (&body[..open], &body[open + 1..body.len() - 1])
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownOperator,
                    span(input, body),
                ));
            }
        };

        let mut individuals = Vec::new();
        for argument in arguments.split(|t| t.kind == TokenKind::Comma) {
            match argument {
                [token] if token.kind == TokenKind::Identifier => {
                    individuals.push(Individual::Named(
                        self.resolve(&input[token.start..token.end])?,
                    ));
                }
                [] => {
                    return Err(ParseError::new(
                        ParseErrorKind::BadArity,
                        span(input, body),
                    ));
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::BadIdentifier,
                        span(input, argument),
                    ));
                }
            }
        }
        match <[Individual; 1]>::try_from(individuals) {
            Ok([individual]) => Ok(Axiom::ClassAssertion {
                class: self.read_full_concept(input, head)?,
                individual,
            }),
            Err(individuals) => match <[Individual; 2]>::try_from(individuals) {
                Ok([source, target]) => {
                    let mut parser = ExpressionParser::new(self, input, head);
                    let property = parser.read_role(0)?;
                    parser.expect_end()?;
                    Ok(Axiom::ObjectPropertyAssertion {
                        property,
                        source,
                        target,
                    })
                }
                Err(_) => Err(ParseError::new(
                    ParseErrorKind::BadArity,
                    span(input, arguments),
                )),
            },
        }
    }

    fn read_full_concept(
        &self,
        input: &str,
        tokens: &[Token],
    ) -> Result<ClassExpression, ParseError> {
        let mut parser = ExpressionParser::new(self, input, tokens);
        let expression = parser.read_concept(0)?;
        parser.expect_end()?;
        Ok(expression)
    }
}

impl FromStr for AnnotatedAxiom {
    type Err = ParseError;

    /// Parses an axiom with the default [`ParserConfig`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyntaxParser::new().parse_axiom(s)
    }
}

impl FromStr for ClassExpression {
    type Err = ParseError;

    /// Parses a concept with the default [`ParserConfig`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyntaxParser::new().parse_class_expression(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Identifier,
    Top,
    Bottom,
    And,
    Or,
    Not,
    Exists,
    Forall,
    AtLeast,
    AtMost,
    Exactly,
    SubClassOf,
    Inverse,
    Dot,
    Comma,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    At,
}

/// A token and its byte range in the input.
#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

fn check_balance(input: &str) -> Result<(), ParseError> {
    let mut parens = 0_usize;
    let mut braces = 0_usize;
    for c in input.chars() {
        let counter = match c {
            '(' | ')' => &mut parens,
            '{' | '}' => &mut braces,
            _ => continue,
        };
        if matches!(c, '(' | '{') {
            *counter += 1;
        } else if *counter == 0 {
            return Err(ParseError::new(ParseErrorKind::UnbalancedParens, input.trim()));
        } else {
            *counter -= 1;
        }
    }
    if parens == 0 && braces == 0 {
        Ok(())
    } else {
        Err(ParseError::new(ParseErrorKind::UnbalancedParens, input.trim()))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '#' | '/')
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        let kind = match c {
            '⊤' => TokenKind::Top,
            '⊥' => TokenKind::Bottom,
            '⊓' => TokenKind::And,
            '⊔' => TokenKind::Or,
            '¬' => TokenKind::Not,
            '∃' => TokenKind::Exists,
            '∀' => TokenKind::Forall,
            '≥' => TokenKind::AtLeast,
            '≤' => TokenKind::AtMost,
            '=' => TokenKind::Exactly,
            '⊑' => TokenKind::SubClassOf,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '@' => TokenKind::At,
            '^' => {
                if !input[start + 1..].starts_with("-1") {
                    let end = input[start..]
                        .find(char::is_whitespace)
                        .map_or(input.len(), |i| start + i);
                    return Err(ParseError::new(
                        ParseErrorKind::UnknownOperator,
                        &input[start..end],
                    ));
                }
                chars.next();
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Inverse,
                    start,
                    end: start + 3,
                });
                continue;
            }
            c if c.is_whitespace() => continue,
            c if is_identifier_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_identifier_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                let text = &input[start..end];
                if !text.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(ParseError::new(ParseErrorKind::BadIdentifier, text));
                }
                tokens.push(Token {
                    kind: TokenKind::Identifier,
                    start,
                    end,
                });
                continue;
            }
            c => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownOperator,
                    c.to_string(),
                ));
            }
        };
        tokens.push(Token {
            kind,
            start,
            end: start + c.len_utf8(),
        });
    }
    Ok(tokens)
}

/// Splits a trailing `@ id` off the token list.
fn split_tag<'a>(
    input: &str,
    tokens: &'a [Token],
) -> Result<(&'a [Token], Option<Token>), ParseError> {
    let Some(at) = tokens.iter().position(|t| t.kind == TokenKind::At) else {
        return Ok((tokens, None));
    };
    match &tokens[at..] {
        [_, name] if name.kind == TokenKind::Identifier => Ok((&tokens[..at], Some(*name))),
        rest => Err(ParseError::new(
            ParseErrorKind::UnknownOperator,
            span(input, rest),
        )),
    }
}

fn span<'a>(input: &'a str, tokens: &[Token]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &input[first.start..last.end],
        _ => "",
    }
}

/// Index of the `(` closed by the `)` at `close`.
fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for i in (0..=close).rev() {
        match tokens[i].kind {
            TokenKind::CloseParen => depth += 1,
            TokenKind::OpenParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => (),
        }
    }
    None
}

/// Checks if `tokens[..end]` is a single atom or a single group.
fn is_head(tokens: &[Token], end: usize) -> bool {
    match &tokens[..end] {
        [token] => matches!(
            token.kind,
            TokenKind::Identifier | TokenKind::Top | TokenKind::Bottom
        ),
        [first, .., last] => {
            first.kind == TokenKind::OpenParen
                && last.kind == TokenKind::CloseParen
                && matching_open(tokens, end - 1) == Some(0)
        }
        [] => false,
    }
}

/// Recursive descent over a token slice.
struct ExpressionParser<'a> {
    syntax: &'a SyntaxParser,
    input: &'a str,
    tokens: &'a [Token],
    position: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(syntax: &'a SyntaxParser, input: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            syntax,
            input,
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.position).map(|t| t.kind)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn text(&self, token: Token) -> &'a str {
        &self.input[token.start..token.end]
    }

    fn remaining(&self) -> &'a str {
        span(self.input, &self.tokens[self.position.min(self.tokens.len())..])
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.position < self.tokens.len() {
            Err(ParseError::new(
                ParseErrorKind::UnknownOperator,
                self.remaining(),
            ))
        } else {
            Ok(())
        }
    }

    fn missing_operand(&self) -> ParseError {
        ParseError::new(ParseErrorKind::BadArity, span(self.input, self.tokens))
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.syntax.config.max_depth {
            Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.remaining(),
            ))
        } else {
            Ok(())
        }
    }

    fn read_concept(&mut self, depth: usize) -> Result<ClassExpression, ParseError> {
        let first = self.read_disjunct(depth)?;
        if self.peek() != Some(TokenKind::And) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat(TokenKind::And) {
            operands.push(self.read_disjunct(depth)?);
        }
        Ok(ClassExpression::ObjectIntersectionOf(operands))
    }

    fn read_disjunct(&mut self, depth: usize) -> Result<ClassExpression, ParseError> {
        let first = self.read_unary(depth)?;
        if self.peek() != Some(TokenKind::Or) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat(TokenKind::Or) {
            operands.push(self.read_unary(depth)?);
        }
        Ok(ClassExpression::ObjectUnionOf(operands))
    }

    fn read_unary(&mut self, depth: usize) -> Result<ClassExpression, ParseError> {
        self.check_depth(depth)?;
        let Some(kind) = self.peek() else {
            return Err(self.missing_operand());
        };
        let start = self.position;
        match kind {
            TokenKind::Not => {
                self.position += 1;
                Ok(ClassExpression::complement(self.read_unary(depth + 1)?))
            }
            TokenKind::Exists | TokenKind::Forall => {
                self.position += 1;
                let property = self.read_role(depth + 1)?;
                self.expect_dot(start)?;
                let filler = Box::new(self.read_unary(depth + 1)?);
                Ok(if kind == TokenKind::Exists {
                    ClassExpression::ObjectSomeValuesFrom { property, filler }
                } else {
                    ClassExpression::ObjectAllValuesFrom { property, filler }
                })
            }
            TokenKind::AtLeast | TokenKind::AtMost | TokenKind::Exactly => {
                self.position += 1;
                let cardinality = self.read_cardinality()?;
                let property = self.read_role(depth + 1)?;
                self.expect_dot(start)?;
                let filler = Box::new(self.read_unary(depth + 1)?);
                Ok(match kind {
                    TokenKind::AtLeast => ClassExpression::ObjectMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    TokenKind::AtMost => ClassExpression::ObjectMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::ObjectExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                })
            }
            _ => self.read_primary(depth),
        }
    }

    fn read_primary(&mut self, depth: usize) -> Result<ClassExpression, ParseError> {
        let Some(token) = self.next_token() else {
            return Err(self.missing_operand());
        };
        match token.kind {
            TokenKind::Top => Ok(ClassExpression::thing()),
            TokenKind::Bottom => Ok(ClassExpression::nothing()),
            TokenKind::Identifier => Ok(ClassExpression::Class(OwlClass::new(
                self.syntax.resolve(self.text(token))?,
            ))),
            TokenKind::OpenBrace => {
                let mut individuals = Vec::new();
                loop {
                    individuals.push(self.read_individual()?);
                    match self.next_token() {
                        Some(t) if t.kind == TokenKind::Comma => (),
                        Some(t) if t.kind == TokenKind::CloseBrace => break,
                        Some(t) => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnknownOperator,
                                self.text(t),
                            ));
                        }
                        None => return Err(self.missing_operand()),
                    }
                }
                Ok(ClassExpression::ObjectOneOf(individuals))
            }
            TokenKind::OpenParen => {
                let inner = self.read_concept(depth + 1)?;
                self.expect_close_paren()?;
                Ok(inner)
            }
            _ => Err(ParseError::new(
                ParseErrorKind::UnknownOperator,
                self.text(token),
            )),
        }
    }

    fn read_role(&mut self, depth: usize) -> Result<ObjectPropertyExpression, ParseError> {
        self.check_depth(depth)?;
        let Some(token) = self.next_token() else {
            return Err(self.missing_operand());
        };
        let mut property = match token.kind {
            TokenKind::Identifier => ObjectPropertyExpression::ObjectProperty(
                ObjectProperty::new(self.syntax.resolve(self.text(token))?),
            ),
            TokenKind::OpenParen => {
                let inner = self.read_role(depth + 1)?;
                self.expect_close_paren()?;
                inner
            }
            TokenKind::Top | TokenKind::Bottom => {
                return Err(ParseError::new(
                    ParseErrorKind::BadIdentifier,
                    self.text(token),
                ));
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownOperator,
                    self.text(token),
                ));
            }
        };
        while self.eat(TokenKind::Inverse) {
            property = property.inverted();
        }
        Ok(property)
    }

    fn read_individual(&mut self) -> Result<Individual, ParseError> {
        match self.next_token() {
            Some(token) if token.kind == TokenKind::Identifier => Ok(Individual::Named(
                self.syntax.resolve(self.text(token))?,
            )),
            Some(token) => Err(ParseError::new(
                ParseErrorKind::BadIdentifier,
                self.text(token),
            )),
            None => Err(self.missing_operand()),
        }
    }

    fn read_cardinality(&mut self) -> Result<u32, ParseError> {
        match self.next_token() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let text = self.text(token);
                text.parse()
                    .map_err(|_| ParseError::new(ParseErrorKind::BadIdentifier, text))
            }
            Some(token) => Err(ParseError::new(
                ParseErrorKind::BadIdentifier,
                self.text(token),
            )),
            None => Err(self.missing_operand()),
        }
    }

    /// Expects the `.` of the restriction starting at token `start`.
    fn expect_dot(&mut self, start: usize) -> Result<(), ParseError> {
        if self.eat(TokenKind::Dot) {
            return Ok(());
        }
        let end = (self.position + 1).min(self.tokens.len());
        Err(ParseError::new(
            ParseErrorKind::MissingQuantifierDot,
            span(self.input, &self.tokens[start..end]),
        ))
    }

    fn expect_close_paren(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::CloseParen) {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnbalancedParens,
                self.remaining(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationValue;

    const BASE: &str = "http://example.com/";

    fn parser() -> SyntaxParser {
        SyntaxParser::with_config(ParserConfig::new().with_base_iri(BASE))
    }

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{BASE}{name}"))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::Class(OwlClass::new(iri(name)))
    }

    fn role(name: &str) -> ObjectProperty {
        ObjectProperty::new(iri(name))
    }

    fn error_kind(result: Result<impl std::fmt::Debug, ParseError>) -> ParseErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn test_subsumption() {
        let axiom = parser().parse_axiom("C ⊑ D").unwrap();
        assert_eq!(axiom.axiom(), &Axiom::subclass_of(class("C"), class("D")));
        assert!(axiom.annotations().is_empty());
    }

    #[test]
    fn test_role_assertions() {
        let axiom = parser().parse_axiom("r(a,b)").unwrap();
        assert_eq!(
            axiom.axiom(),
            &Axiom::object_property_assertion(role("r"), iri("a"), iri("b"))
        );
        let axiom = parser().parse_axiom("(r^-1)(a,b)").unwrap();
        assert_eq!(
            axiom.axiom(),
            &Axiom::object_property_assertion(
                ObjectPropertyExpression::inverse(role("r")),
                iri("a"),
                iri("b")
            )
        );
        let axiom = parser().parse_axiom("((r)^-1^-1)(a, b)").unwrap();
        assert_eq!(
            axiom.axiom(),
            &Axiom::object_property_assertion(role("r"), iri("a"), iri("b"))
        );
    }

    #[test]
    fn test_concept_assertions() {
        let axiom = parser().parse_axiom("A(a)").unwrap();
        assert_eq!(axiom.axiom(), &Axiom::class_assertion(class("A"), iri("a")));
        let axiom = parser().parse_axiom("(A ⊓ ¬B)(a)").unwrap();
        assert_eq!(
            axiom.axiom(),
            &Axiom::class_assertion(
                ClassExpression::intersection(vec![
                    class("A"),
                    ClassExpression::complement(class("B"))
                ]),
                iri("a")
            )
        );
    }

    #[test]
    fn test_parenthesis_transparency() {
        let parser = parser();
        let expected = parser.parse_class_expression("C").unwrap();
        assert_eq!(parser.parse_class_expression("(C)").unwrap(), expected);
        assert_eq!(parser.parse_class_expression("((C))").unwrap(), expected);
        assert_eq!(parser.parse_class_expression(" ( ( C ) ) ").unwrap(), expected);
    }

    #[test]
    fn test_conjunction_binds_loosest() {
        assert_eq!(
            parser().parse_class_expression("A ⊔ B ⊓ C").unwrap(),
            ClassExpression::intersection(vec![
                ClassExpression::union(vec![class("A"), class("B")]),
                class("C")
            ])
        );
        assert_eq!(
            parser().parse_class_expression("∃r.A ⊓ B").unwrap(),
            ClassExpression::intersection(vec![
                ClassExpression::some_values_from(role("r"), class("A")),
                class("B")
            ])
        );
        assert_eq!(
            parser().parse_class_expression("A ⊓ B ⊓ C").unwrap(),
            ClassExpression::intersection(vec![class("A"), class("B"), class("C")])
        );
    }

    #[test]
    fn test_quantifiers_and_negation() {
        assert_eq!(
            parser().parse_class_expression("¬∀r^-1.(A ⊔ ⊥)").unwrap(),
            ClassExpression::complement(ClassExpression::all_values_from(
                ObjectPropertyExpression::inverse(role("r")),
                ClassExpression::union(vec![class("A"), ClassExpression::nothing()])
            ))
        );
        assert_eq!(
            parser().parse_class_expression("¬¬A").unwrap(),
            ClassExpression::complement(ClassExpression::complement(class("A")))
        );
    }

    #[test]
    fn test_cardinalities_and_nominals() {
        assert_eq!(
            parser().parse_class_expression("≥2 r.⊤").unwrap(),
            ClassExpression::min_cardinality(2, role("r"), ClassExpression::thing())
        );
        assert_eq!(
            parser().parse_class_expression("≤1 r.A").unwrap(),
            ClassExpression::max_cardinality(1, role("r"), class("A"))
        );
        assert_eq!(
            parser().parse_class_expression("=3 (r^-1).{a, b}").unwrap(),
            ClassExpression::exact_cardinality(
                3,
                ObjectPropertyExpression::inverse(role("r")),
                ClassExpression::one_of(vec![
                    Individual::Named(iri("a")),
                    Individual::Named(iri("b"))
                ])
            )
        );
    }

    #[test]
    fn test_annotations() {
        let axiom = parser().parse_axiom("A ⊑ ⊥ @ meta1").unwrap();
        assert_eq!(
            axiom.defined_by().collect::<Vec<_>>(),
            vec![&AnnotationValue::Iri(iri("meta1"))]
        );
        let axiom = parser().parse_axiom("A(a) @ global").unwrap();
        assert!(axiom.is_object_global());
        assert!(matches!(
            parser().parse_axiom("A(a) @ m1 m2").unwrap_err().kind(),
            ParseErrorKind::UnknownOperator
        ));
        assert_eq!(
            error_kind(parser().parse_axiom("A ⊑ B @")),
            ParseErrorKind::UnknownOperator
        );
    }

    #[test]
    fn test_display_is_parsable() {
        let parser = parser();
        for input in [
            "A ⊔ B ⊓ ¬(C ⊓ D)",
            "∃r^-1.∀s.(A ⊔ B)",
            "≥2 r.{a, b} ⊓ ⊤",
            "¬¬A",
        ] {
            let expression = parser.parse_class_expression(input).unwrap();
            assert_eq!(
                parser
                    .parse_class_expression(&expression.to_string())
                    .unwrap(),
                expression
            );
        }
        let axiom = parser.parse_axiom("(r^-1)(a,b) @ n").unwrap();
        assert_eq!(parser.parse_axiom(&axiom.to_string()).unwrap(), axiom);
    }

    #[test]
    fn test_unbalanced_parens() {
        let error = parser().parse_axiom("(A ⊑ B").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::UnbalancedParens);
        assert_eq!(error.fragment(), "(A ⊑ B");
        assert_eq!(
            error_kind(parser().parse_class_expression(")A(")),
            ParseErrorKind::UnbalancedParens
        );
        assert_eq!(
            error_kind(parser().parse_class_expression("{a")),
            ParseErrorKind::UnbalancedParens
        );
    }

    #[test]
    fn test_bad_identifiers() {
        let error = parser().parse_axiom("A_1 ⊑ B").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::BadIdentifier);
        assert_eq!(error.fragment(), "A_1");
        assert_eq!(
            error_kind(parser().parse_axiom("A(⊤)")),
            ParseErrorKind::BadIdentifier
        );
        assert_eq!(
            error_kind(parser().parse_class_expression("≥x r.A")),
            ParseErrorKind::BadIdentifier
        );
        assert_eq!(
            error_kind(parser().parse_class_expression("café")),
            ParseErrorKind::BadIdentifier
        );
    }

    #[test]
    fn test_bad_arity() {
        assert_eq!(
            error_kind(parser().parse_axiom("A ⊑ B ⊑ C")),
            ParseErrorKind::BadArity
        );
        let error = parser().parse_axiom("r(a,b,c)").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::BadArity);
        assert_eq!(error.fragment(), "a,b,c");
        assert_eq!(error_kind(parser().parse_axiom("r()")), ParseErrorKind::BadArity);
        assert_eq!(error_kind(parser().parse_axiom("A ⊑")), ParseErrorKind::BadArity);
    }

    #[test]
    fn test_missing_quantifier_dot() {
        let error = parser().parse_class_expression("∃r A").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::MissingQuantifierDot);
        assert_eq!(error.fragment(), "∃r A");
        assert_eq!(
            error_kind(parser().parse_class_expression("≤2 r")),
            ParseErrorKind::MissingQuantifierDot
        );
    }

    #[test]
    fn test_unknown_operators() {
        assert_eq!(
            error_kind(parser().parse_axiom("A → B")),
            ParseErrorKind::UnknownOperator
        );
        assert_eq!(error_kind(parser().parse_axiom("A")), ParseErrorKind::UnknownOperator);
        assert_eq!(
            error_kind(parser().parse_axiom("A ⊓ B(a)")),
            ParseErrorKind::UnknownOperator
        );
        assert_eq!(
            error_kind(parser().parse_class_expression("r^2")),
            ParseErrorKind::UnknownOperator
        );
    }

    #[test]
    fn test_nesting_limit() {
        let parser = SyntaxParser::with_config(ParserConfig::new().with_max_depth(8));
        let deep = format!("{}A", "¬".repeat(32));
        assert_eq!(
            error_kind(parser.parse_class_expression(&deep)),
            ParseErrorKind::NestingTooDeep
        );
        let deep = format!("{}A{}", "(".repeat(32), ")".repeat(32));
        assert_eq!(
            error_kind(parser.parse_class_expression(&deep)),
            ParseErrorKind::NestingTooDeep
        );
    }

    #[test]
    fn test_parse_ontology() {
        let ontology = parser()
            .parse_ontology(
                "# a small document\n\
                 A ⊑ B\n\
                 \n\
                 A ⊑ ⊥ @ meta1\n\
                 r(a, b) @ global\n\
                 rigid r, A\n",
            )
            .unwrap();
        assert_eq!(ontology.axiom_count(), 3);
        assert!(ontology.is_rigid(&iri("r")));
        assert!(ontology.is_rigid(&iri("A")));
        assert!(!ontology.is_rigid(&iri("B")));
        assert_eq!(
            error_kind(parser().parse_ontology("rigid r_1")),
            ParseErrorKind::BadIdentifier
        );
    }

    #[test]
    fn test_from_str_uses_default_base() {
        let expression: ClassExpression = "A".parse().unwrap();
        assert_eq!(
            expression
                .as_class()
                .map(|c| c.iri().as_str().to_owned()),
            Some(format!("{}A", ParserConfig::default().base_iri))
        );
    }
}
