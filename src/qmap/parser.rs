//! Turns the [`Token`] stream into a [`MapDocument`].

use std::iter::Peekable;

use super::lexer::{Lexer, Token, TokenKind};
use super::*;
use crate::brush::{BrushSurface, BrushUV};

/// Parses map source text into a [`MapDocument`].
///
/// Any error aborts the whole parse, no partial document is returned.
pub fn parse(source: &str, config: &NszConfig) -> Result<MapDocument, ParseError> {
	let mut parser = Parser {
		tokens: Lexer::new(source).peekable(),
		config,
		formats: Vec::new(),
		eof_line: source.matches('\n').count() + 1,
	};
	let mut entities = Vec::new();

	while let Some(token) = parser.next()? {
		match token.kind {
			TokenKind::OpenBrace => entities.push(parser.entity(token.line)?),
			kind => return Err(unexpected(token.line, "`{` to start an entity", &kind)),
		}
	}

	Ok(MapDocument { entities, formats: parser.formats })
}

fn unexpected(line: usize, expected: &'static str, found: &TokenKind) -> ParseError {
	ParseError::new(line, ParseErrorKind::UnexpectedToken { expected, found: found.describe() })
}

struct Parser<'s, 'c> {
	tokens: Peekable<Lexer<'s>>,
	config: &'c NszConfig,
	formats: Vec<MapFormat>,
	eof_line: usize,
}

impl<'s> Parser<'s, '_> {
	fn next(&mut self) -> Result<Option<Token<'s>>, ParseError> {
		self.tokens.next().transpose()
	}

	/// Next token inside a block, end of input here means the block opened at `opened_at` was never closed.
	fn next_in(&mut self, opened_at: usize) -> Result<Token<'s>, ParseError> {
		match self.next()? {
			Some(token) => Ok(token),
			None => Err(self.unterminated(opened_at)),
		}
	}

	fn peek_in(&mut self, opened_at: usize) -> Result<&TokenKind<'s>, ParseError> {
		match self.tokens.peek() {
			Some(Ok(token)) => Ok(&token.kind),
			Some(Err(err)) => Err(err.clone()),
			None => Err(ParseError::new(self.eof_line, ParseErrorKind::UnterminatedBlock { opened_at })),
		}
	}

	fn unterminated(&self, opened_at: usize) -> ParseError {
		ParseError::new(self.eof_line, ParseErrorKind::UnterminatedBlock { opened_at })
	}

	fn expect(&mut self, opened_at: usize, kind: TokenKind<'_>, expected: &'static str) -> Result<(), ParseError> {
		let token = self.next_in(opened_at)?;
		if token.kind == kind { Ok(()) } else { Err(unexpected(token.line, expected, &token.kind)) }
	}

	fn number(&mut self, opened_at: usize) -> Result<f64, ParseError> {
		let token = self.next_in(opened_at)?;
		match token.kind {
			TokenKind::Word(word) => parse_number(word).ok_or_else(|| ParseError::new(token.line, ParseErrorKind::MalformedNumber { token: word.into() })),
			kind => Err(unexpected(token.line, "a number", &kind)),
		}
	}

	fn entity(&mut self, opened_at: usize) -> Result<MapEntity, ParseError> {
		let mut entity = MapEntity { line: opened_at, ..Default::default() };

		loop {
			let token = self.next_in(opened_at)?;
			match token.kind {
				TokenKind::CloseBrace => return Ok(entity),
				TokenKind::OpenBrace => entity.brushes.push(self.brush(token.line)?),
				TokenKind::Quoted(key) => {
					let value_token = self.next_in(opened_at)?;
					let TokenKind::Quoted(value) = value_token.kind else {
						return Err(unexpected(value_token.line, "a quoted property value", &value_token.kind));
					};

					let previous = entity.properties.insert(key.into(), value.into());
					if previous.is_some() && !self.config.allow_duplicate_keys {
						return Err(ParseError::new(token.line, ParseErrorKind::DuplicateKey { key: key.into() }));
					}
				}
				kind => return Err(unexpected(token.line, "a property, brush or `}`", &kind)),
			}
		}
	}

	fn brush(&mut self, opened_at: usize) -> Result<Brush, ParseError> {
		let mut brush = Brush::default();

		loop {
			let token = self.next_in(opened_at)?;
			match token.kind {
				TokenKind::CloseBrace => return Ok(brush),
				TokenKind::OpenParen => brush.surfaces.push(self.surface(opened_at)?),
				kind => return Err(unexpected(token.line, "a face or `}`", &kind)),
			}
		}
	}

	/// Reads a face, the first `(` has already been consumed.
	fn surface(&mut self, opened_at: usize) -> Result<BrushSurface, ParseError> {
		let mut points = [DVec3::ZERO; 3];
		for (i, point) in points.iter_mut().enumerate() {
			if i > 0 {
				self.expect(opened_at, TokenKind::OpenParen, "`(` to start a plane point")?;
			}
			*point = dvec3(self.number(opened_at)?, self.number(opened_at)?, self.number(opened_at)?);
			self.expect(opened_at, TokenKind::CloseParen, "`)` to end a plane point")?;
		}

		let texture_token = self.next_in(opened_at)?;
		let texture = match texture_token.kind {
			TokenKind::Word(name) | TokenKind::Quoted(name) => name.to_string(),
			kind => return Err(unexpected(texture_token.line, "a texture name", &kind)),
		};

		let (format, uv) = if *self.peek_in(opened_at)? == TokenKind::OpenBracket {
			let u = self.valve_axis(opened_at)?;
			let v = self.valve_axis(opened_at)?;
			let rotation = self.number(opened_at)?;
			let scale = dvec2(self.number(opened_at)?, self.number(opened_at)?);

			(MapFormat::Valve, BrushUV { offset: dvec2(u.w, v.w), rotation, scale, axes: Some([u.truncate(), v.truncate()]) })
		} else {
			let offset = dvec2(self.number(opened_at)?, self.number(opened_at)?);
			let rotation = self.number(opened_at)?;
			let scale = dvec2(self.number(opened_at)?, self.number(opened_at)?);

			(MapFormat::Standard, BrushUV { offset, rotation, scale, axes: None })
		};

		if !self.formats.contains(&format) {
			self.formats.push(format);
		}

		let mut extra = Vec::new();
		loop {
			match self.peek_in(opened_at)? {
				TokenKind::OpenParen | TokenKind::CloseBrace => break,
				TokenKind::Word(word) | TokenKind::Quoted(word) => {
					extra.push(word.to_string());
					self.tokens.next();
				}
				_ => {
					let token = self.next_in(opened_at)?;
					return Err(unexpected(token.line, "a face or `}`", &token.kind));
				}
			}
		}

		Ok(BrushSurface { points, texture, uv, extra })
	}

	/// `[ x y z offset ]`
	fn valve_axis(&mut self, opened_at: usize) -> Result<DVec4, ParseError> {
		self.expect(opened_at, TokenKind::OpenBracket, "`[` to start a texture axis")?;
		let axis = dvec4(self.number(opened_at)?, self.number(opened_at)?, self.number(opened_at)?, self.number(opened_at)?);
		self.expect(opened_at, TokenKind::CloseBracket, "`]` to end a texture axis")?;
		Ok(axis)
	}
}

/// Parses a number the same way for every field, rejecting values that aren't finite.
fn parse_number(word: &str) -> Option<f64> {
	word.parse::<f64>().ok().filter(|value| value.is_finite())
}
