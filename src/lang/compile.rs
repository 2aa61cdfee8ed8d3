use super::{lex, line_number, token::*, Column, Error};
use crate::mach::{Address, Instruction, Op, Program};
use std::ops::Range;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const MAX_NESTING: usize = 1024;

/// ## Reference front end
///
/// Compiles EZC source text into a shared `Program`. Blocks are laid out
/// so every quoted block is one contiguous instruction range: the main
/// body first, then each block body after its enclosing body.

pub fn compile(name: &str, source: &str) -> Result<Rc<Program>> {
    let tokens = lex(source);
    let items = match Parser::parse(&tokens) {
        Ok(items) => items,
        Err((col, error)) => {
            let name: Rc<str> = name.into();
            let line = line_number(source, &col);
            return Err(error.in_column(&col).in_source(&name, line));
        }
    };
    let mut instructions = vec![];
    let body = flatten(items, &mut instructions);
    tracing::debug!(name, instructions = instructions.len(), "compiled");
    Ok(Rc::new(Program::new(name, source, instructions, body)))
}

enum Item {
    Op(Op, Column),
    Block(Vec<Item>, Column),
}

fn flatten(items: Vec<Item>, out: &mut Vec<Instruction>) -> Range<Address> {
    let start = out.len();
    let mut nested = vec![];
    for item in items {
        match item {
            Item::Op(op, column) => out.push(Instruction { op, column }),
            Item::Block(body, column) => {
                nested.push((out.len(), body));
                out.push(Instruction {
                    op: Op::Block(0..0),
                    column,
                });
            }
        }
    }
    let end = out.len();
    for (address, body) in nested {
        let range = flatten(body, out);
        out[address].op = Op::Block(range);
    }
    start..end
}

struct Parser {
    col: Column,
    items: Vec<Item>,
    open: Vec<(Column, Vec<Item>)>,
}

impl Parser {
    fn parse(tokens: &[Token]) -> std::result::Result<Vec<Item>, (Column, Error)> {
        let mut parse = Parser {
            col: 0..0,
            items: vec![],
            open: vec![],
        };
        for token in tokens {
            parse.col.start = parse.col.end;
            parse.col.end += token.width();
            if let Err(error) = parse.token(token) {
                return Err((parse.col.clone(), error));
            }
        }
        if let Some((col, _)) = parse.open.pop() {
            return Err((col, error!(SyntaxError; "UNCLOSED BLOCK")));
        }
        Ok(parse.items)
    }

    fn token(&mut self, token: &Token) -> Result<()> {
        let op = match token {
            Token::Whitespace(_) | Token::Comment(_) => return Ok(()),
            Token::Literal(Literal::Integer(s)) => match s.parse::<i64>() {
                Ok(n) => Op::Int(n),
                Err(_) => return Err(error!(SyntaxError; "INTEGER OUT OF RANGE")),
            },
            Token::Literal(Literal::Real(s)) => match s.parse::<f64>() {
                Ok(r) => Op::Real(r),
                Err(_) => return Err(error!(SyntaxError; "MALFORMED NUMBER")),
            },
            Token::Literal(Literal::String(s)) => Op::Str(unescape(s).into()),
            Token::Word(s) => Op::Str(s.as_str().into()),
            Token::Call(s) => Op::Call(s.as_str().into()),
            Token::Operator(op) => Op::Call(op.function_name().into()),
            Token::LBrace => {
                if self.open.len() >= MAX_NESTING {
                    return Err(error!(SyntaxError; "BLOCKS NESTED TOO DEEPLY"));
                }
                let outer = std::mem::take(&mut self.items);
                self.open.push((self.col.clone(), outer));
                return Ok(());
            }
            Token::RBrace => {
                let (open_col, outer) = match self.open.pop() {
                    Some(frame) => frame,
                    None => return Err(error!(SyntaxError; "UNEXPECTED }")),
                };
                let body = std::mem::replace(&mut self.items, outer);
                let col = open_col.start..self.col.end;
                self.items.push(Item::Block(body, col));
                return Ok(());
            }
            Token::Unknown(s) => {
                if s.starts_with('"') {
                    return Err(error!(SyntaxError; "UNTERMINATED STRING"));
                }
                return Err(error!(SyntaxError; format!("UNEXPECTED {}", s)));
            }
        };
        self.items.push(Item::Op(op, self.col.clone()));
        Ok(())
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
