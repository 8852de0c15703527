//! Splits map source text into [`Token`]s.

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'s> {
	OpenBrace,
	CloseBrace,
	OpenParen,
	CloseParen,
	OpenBracket,
	CloseBracket,
	/// A quoted string, the text between the quotes is kept verbatim (escapes included).
	Quoted(&'s str),
	/// Any other whitespace-separated run of characters.
	Word(&'s str),
}

impl TokenKind<'_> {
	/// The token as it would appear in the source, for error messages.
	pub fn describe(&self) -> String {
		match self {
			Self::OpenBrace => "`{`".into(),
			Self::CloseBrace => "`}`".into(),
			Self::OpenParen => "`(`".into(),
			Self::CloseParen => "`)`".into(),
			Self::OpenBracket => "`[`".into(),
			Self::CloseBracket => "`]`".into(),
			Self::Quoted(s) => format!("\"{s}\""),
			Self::Word(s) => format!("`{s}`"),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'s> {
	pub kind: TokenKind<'s>,
	/// 1-based line the token starts on.
	pub line: usize,
}

pub struct Lexer<'s> {
	source: &'s str,
	pos: usize,
	line: usize,
}

impl<'s> Lexer<'s> {
	pub fn new(source: &'s str) -> Self {
		Self { source, pos: 0, line: 1 }
	}

	fn rest(&self) -> &'s str {
		&self.source[self.pos..]
	}

	/// Skips whitespace and `//` comments.
	fn skip_trivia(&mut self) {
		loop {
			let rest = self.rest();
			let Some(c) = rest.chars().next() else { return };

			if c == '\n' {
				self.line += 1;
				self.pos += 1;
			} else if c.is_whitespace() {
				self.pos += c.len_utf8();
			} else if rest.starts_with("//") {
				self.pos += rest.find('\n').unwrap_or(rest.len());
			} else {
				return;
			}
		}
	}

	fn lex_quoted(&mut self) -> Result<TokenKind<'s>, ParseError> {
		// Skip the opening quote
		self.pos += 1;
		let rest = self.rest();
		let mut escaped = false;

		for (i, c) in rest.char_indices() {
			match c {
				'\n' => break,
				'"' if !escaped => {
					self.pos += i + 1;
					return Ok(TokenKind::Quoted(&rest[..i]));
				}
				'\\' => escaped = !escaped,
				_ => escaped = false,
			}
		}

		Err(ParseError::new(self.line, ParseErrorKind::UnterminatedString))
	}

	/// A word runs to the next whitespace or the start of a `//` comment.
	fn lex_word(&mut self) -> TokenKind<'s> {
		let rest = self.rest();
		let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
		let len = rest[..end].find("//").unwrap_or(end);
		self.pos += len;

		match &rest[..len] {
			"{" => TokenKind::OpenBrace,
			"}" => TokenKind::CloseBrace,
			"(" => TokenKind::OpenParen,
			")" => TokenKind::CloseParen,
			"[" => TokenKind::OpenBracket,
			"]" => TokenKind::CloseBracket,
			word => TokenKind::Word(word),
		}
	}
}

impl<'s> Iterator for Lexer<'s> {
	type Item = Result<Token<'s>, ParseError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.skip_trivia();
		let line = self.line;

		let kind = match self.rest().chars().next()? {
			'"' => self.lex_quoted(),
			_ => Ok(self.lex_word()),
		};

		Some(kind.map(|kind| Token { kind, line }))
	}
}
