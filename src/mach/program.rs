use super::Address;
use crate::lang::{line_number, Column, LineNumber};
use std::ops::Range;
use std::rc::Rc;

/// ## Instruction set
///
/// EZC has exactly two kinds of instruction: literals, which push a value,
/// and calls, which look a function up by name. Every operator, control
/// structure and user function is a call.
///
/// For example: `1 2 {print!} ifel!` compiles to
/// `[Int(1), Int(2), Block(4..5), Call(ifel), Call(print)]`

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Push an integer.
    Int(i64),
    /// Push a real.
    Real(f64),
    /// Push a string.
    Str(Rc<str>),
    /// Push a block quoting the instructions in the range.
    Block(Range<Address>),
    /// Invoke a function by name.
    Call(Rc<str>),
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Op::*;
        match self {
            Int(n) => write!(f, "INT({})", n),
            Real(r) => write!(f, "REAL({})", r),
            Str(s) => write!(f, "STR({:?})", s),
            Block(r) => write!(f, "BLOCK({}..{})", r.start, r.end),
            Call(s) => write!(f, "CALL({})", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub op: Op,
    pub column: Column,
}

/// ## Compiled program
///
/// Instructions of every block live in one arena. A program is immutable
/// once built and shared through `Rc`, so any `Block` keeps its program
/// alive for as long as the block exists.

#[derive(Debug)]
pub struct Program {
    name: Rc<str>,
    source: String,
    instructions: Vec<Instruction>,
    body: Range<Address>,
}

impl Program {
    pub fn new(
        name: &str,
        source: &str,
        instructions: Vec<Instruction>,
        body: Range<Address>,
    ) -> Program {
        Program {
            name: name.into(),
            source: source.to_string(),
            instructions,
            body,
        }
    }
    pub fn empty() -> Program {
        Program::new("", "", vec![], 0..0)
    }
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
    pub fn body(&self) -> Range<Address> {
        self.body.clone()
    }
    pub fn len(&self) -> usize {
        self.instructions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
    pub fn line_number(&self, column: &Column) -> LineNumber {
        line_number(&self.source, column)
    }
}

/// ## Quoted block
///
/// A range of instructions plus the program it came from. Duplicating a
/// block copies the reference, never the instructions.

#[derive(Clone)]
pub struct Block {
    program: Rc<Program>,
    range: Range<Address>,
}

impl Block {
    pub fn new(program: &Rc<Program>, range: Range<Address>) -> Block {
        Block {
            program: program.clone(),
            range,
        }
    }
    /// The main body of a program as a block.
    pub fn main(program: &Rc<Program>) -> Block {
        Block::new(program, program.body())
    }
    pub fn empty() -> Block {
        Block::main(&Rc::new(Program::empty()))
    }
    pub fn program(&self) -> &Rc<Program> {
        &self.program
    }
    pub fn range(&self) -> Range<Address> {
        self.range.clone()
    }
    pub fn len(&self) -> usize {
        self.range.len()
    }
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
    /// `None` when the range lies outside the program.
    pub fn instructions(&self) -> Option<&[Instruction]> {
        self.program.instructions.get(self.range.clone())
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Block) -> bool {
        Rc::ptr_eq(&self.program, &other.program) && self.range == other.range
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block({} {}..{})", self.program.name, self.range.start, self.range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Rc<Program> {
        let instructions = vec![
            Instruction {
                op: Op::Block(2..3),
                column: 0..5,
            },
            Instruction {
                op: Op::Call("exec".into()),
                column: 6..11,
            },
            Instruction {
                op: Op::Int(1),
                column: 2..3,
            },
        ];
        Rc::new(Program::new("t", "{ 1 } exec!", instructions, 0..2))
    }

    #[test]
    fn test_block_shares_program() {
        let p = program();
        let block = Block::new(&p, 2..3);
        let copy = block.clone();
        assert_eq!(block, copy);
        assert_eq!(Rc::strong_count(&p), 3);
        drop(block);
        drop(copy);
        assert_eq!(Rc::strong_count(&p), 1);
    }

    #[test]
    fn test_block_outlives_caller_handle() {
        let block = Block::new(&program(), 2..3);
        assert_eq!(block.instructions().map(|i| i.len()), Some(1));
        assert_eq!(block.program().name().as_ref(), "t");
    }

    #[test]
    fn test_block_out_of_range() {
        let block = Block::new(&program(), 2..9);
        assert!(block.instructions().is_none());
    }

    #[test]
    fn test_main_and_display() {
        let p = program();
        assert_eq!(Block::main(&p).len(), 2);
        assert_eq!(p.instructions()[1].op.to_string(), "CALL(exec)");
        assert!(Block::empty().is_empty());
    }
}
