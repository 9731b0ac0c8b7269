use std::{
    fmt,
    str::Chars,
};
use crate::{
    Error,
    util::{SrcLoc, SrcRegion},
};

/// The four bracket families. `Top` is the implicit group around the whole
/// input, closed by the end of input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Brace,
    Top,
}

impl Bracket {
    fn from_open(c: char) -> Option<Self> {
        match c {
            '(' => Some(Bracket::Paren),
            '[' => Some(Bracket::Square),
            '{' => Some(Bracket::Brace),
            _ => None,
        }
    }

    fn from_close(c: char) -> Option<Self> {
        match c {
            ')' => Some(Bracket::Paren),
            ']' => Some(Bracket::Square),
            '}' => Some(Bracket::Brace),
            _ => None,
        }
    }

    pub fn close(self, quoted: bool) -> Marker {
        Marker { bracket: self, quoted }
    }
}

/// A closing bracket as written in the source, used when reporting mismatches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    bracket: Bracket,
    quoted: bool,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self.bracket {
            Bracket::Top => return write!(f, "end of input"),
            Bracket::Paren => ')',
            Bracket::Square => ']',
            Bracket::Brace => '}',
        };
        if self.quoted {
            write!(f, "|{}", c)
        } else {
            write!(f, "{}", c)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    Symbol(String),
    Punct(String),
    Str(String),
    RawStr(String),
    Comment(String),
    Open(Bracket, bool),
    Close(Bracket, bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub lexeme: Lexeme,
    pub region: SrcRegion,
}

impl Token {
    pub fn new(lexeme: Lexeme, region: SrcRegion) -> Self {
        Self {
            lexeme,
            region,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Class {
    Symbol,
    Punct,
    Delimiter,
}

fn classify(c: char) -> Class {
    match c {
        c if c.is_alphanumeric() || c == '.' || c == '_' => Class::Symbol,
        '"' | '\'' | '#' | '\0' => Class::Delimiter,
        '(' | ')' | '[' | ']' | '{' | '}' => Class::Delimiter,
        c if c.is_whitespace() => Class::Delimiter,
        _ => Class::Punct,
    }
}

/// Pulls tokens out of the input one at a time. Once the end of input (or a
/// NUL sentinel) is reached, every further call yields the top-level closer.
pub struct Lexer<'a> {
    chars: Chars<'a>,
    loc: SrcLoc,
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            chars: code.chars(),
            loc: SrcLoc::start(),
            pending: None,
        }
    }

    fn peek(&self) -> Option<char> {
        match self.chars.clone().next() {
            Some('\0') | None => None,
            c => c,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.chars.next();
        self.loc = self.loc.next();
        Some(c)
    }

    fn region_from(&self, start: SrcLoc) -> SrcRegion {
        SrcRegion::range(start, self.loc)
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(tok) = self.pending.take() {
            return Ok(tok);
        }

        loop {
            let start = self.loc;
            let c = match self.peek() {
                Some(c) => c,
                None => return Ok(Token::new(Lexeme::Close(Bracket::Top, false), SrcRegion::single(start))),
            };

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            if let Some(bracket) = Bracket::from_open(c) {
                self.bump();
                let quoted = self.peek() == Some('|');
                if quoted {
                    self.bump();
                }
                return Ok(Token::new(Lexeme::Open(bracket, quoted), self.region_from(start)));
            }

            if let Some(bracket) = Bracket::from_close(c) {
                self.bump();
                return Ok(Token::new(Lexeme::Close(bracket, false), self.region_from(start)));
            }

            return match c {
                '"' => {
                    self.bump();
                    self.string(start)
                },
                '\'' => {
                    self.bump();
                    let text = self.line();
                    Ok(Token::new(Lexeme::RawStr(text), self.region_from(start)))
                },
                '#' => {
                    self.bump();
                    let text = self.line();
                    Ok(Token::new(Lexeme::Comment(text), self.region_from(start)))
                },
                c => match classify(c) {
                    Class::Punct => Ok(self.punct(start)),
                    _ => Ok(self.symbol(start)),
                },
            };
        }
    }

    fn symbol(&mut self, start: SrcLoc) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|c| classify(*c) == Class::Symbol) {
            text.push(c);
            self.bump();
        }
        Token::new(Lexeme::Symbol(text), self.region_from(start))
    }

    fn punct(&mut self, start: SrcLoc) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|c| classify(*c) == Class::Punct) {
            text.push(c);
            self.bump();
        }

        // A trailing `|` directly before a closer belongs to the closer.
        let closer = self.peek().and_then(Bracket::from_close);
        if let (Some(bracket), true) = (closer, text.ends_with('|')) {
            text.pop();
            let bar = SrcLoc::from(self.loc.offset() - 1);
            self.bump();
            let close = Token::new(Lexeme::Close(bracket, true), SrcRegion::range(bar, self.loc));
            if text.is_empty() {
                return close;
            }
            self.pending = Some(close);
            return Token::new(Lexeme::Punct(text), SrcRegion::range(start, bar));
        }

        Token::new(Lexeme::Punct(text), self.region_from(start))
    }

    fn string(&mut self, start: SrcLoc) -> Result<Token, Error> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::new(Lexeme::Str(text), self.region_from(start))),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('0') => text.push('\0'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    },
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(Error::unterminated_string().at(self.region_from(start)))
    }

    /// Everything up to, but not including, the next newline.
    fn line(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|c| *c != '\n') {
            text.push(c);
            self.bump();
        }
        text
    }
}
