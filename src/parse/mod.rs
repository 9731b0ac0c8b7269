mod shunt;

use std::rc::Rc;
use crate::{
    Error,
    lex::{Bracket, Lexeme, Lexer},
    util::SrcRegion,
    walker::Value,
};

pub use self::shunt::{reduce, Assoc, Precedence};

/// Parse a complete program into a single tree.
pub fn parse(code: &str, precedence: &Precedence) -> Result<Value, Error> {
    Parser {
        lexer: Lexer::new(code),
        precedence,
    }
        .group(Bracket::Top, false, SrcRegion::none())
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    precedence: &'a Precedence,
}

impl<'a> Parser<'a> {
    /// Collect the contents of a group up to its closer, then finalize it.
    fn group(&mut self, bracket: Bracket, quoted: bool, opened_at: SrcRegion) -> Result<Value, Error> {
        let mut buf = Vec::new();
        let mut leading_punct = false;

        loop {
            let tok = self.lexer.next_token()?;
            match tok.lexeme {
                Lexeme::Symbol(text) => buf.push(Value::symbol(text)),
                Lexeme::Punct(text) => {
                    if buf.iter().all(|val| matches!(val, Value::Comment(_))) {
                        leading_punct = true;
                    }
                    buf.push(Value::symbol(text));
                },
                Lexeme::Str(text) => buf.push(Value::String(text)),
                Lexeme::RawStr(text) => buf.push(Value::RawString(text)),
                Lexeme::Comment(text) => buf.push(Value::Comment(text)),
                Lexeme::Open(inner, inner_quoted) => buf.push(self.group(inner, inner_quoted, tok.region)?),
                Lexeme::Close(closer, closer_quoted) => {
                    if closer != bracket || closer_quoted != quoted {
                        return Err(Error::bracket_mismatch(bracket.close(quoted), closer.close(closer_quoted))
                            .at(tok.region));
                    }
                    return self.finalize(buf, leading_punct, bracket, quoted, opened_at);
                },
            }
        }
    }

    fn finalize(
        &self,
        buf: Vec<Value>,
        leading_punct: bool,
        bracket: Bracket,
        quoted: bool,
        opened_at: SrcRegion,
    ) -> Result<Value, Error> {
        let buf = strip(buf);
        if buf.is_empty() {
            return Ok(Value::Nil);
        }

        let val = match bracket {
            Bracket::Paren | Bracket::Top => reduce(pad(buf, leading_punct), self.precedence),
            Bracket::Brace => {
                let mut buf = pad(buf, leading_punct);
                let name = buf[0]
                    .as_name()
                    .ok_or_else(|| Error::invalid_binder(&buf[0]).at(opened_at))?;
                buf[0] = Value::Var(name);
                reduce(buf, self.precedence)
            },
            Bracket::Square if quoted => return Ok(Value::Quote(Rc::new(reduce(pad(buf, leading_punct), self.precedence)))),
            Bracket::Square => return Ok(Value::ParsedArray(buf.into())),
        };

        Ok(if quoted { Value::Unquote(Rc::new(val)) } else { val })
    }
}

/// Drop comments and join runs of raw-string lines into single strings.
fn strip(buf: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::with_capacity(buf.len());
    let mut raw: Option<String> = None;

    for val in buf {
        match val {
            Value::Comment(_) => {},
            Value::RawString(line) => match &mut raw {
                Some(text) => {
                    text.push('\n');
                    text.push_str(&line);
                },
                None => raw = Some(line),
            },
            val => {
                out.extend(raw.take().map(Value::String));
                out.push(val);
            },
        }
    }
    out.extend(raw.map(Value::String));
    out
}

/// Pad to odd length: a leading `Nil` for prefix use of an operator, a
/// trailing one for postfix use.
fn pad(mut buf: Vec<Value>, leading_punct: bool) -> Vec<Value> {
    if leading_punct {
        buf.insert(0, Value::Nil);
    }
    if buf.len() % 2 == 0 {
        buf.push(Value::Nil);
    }
    buf
}
