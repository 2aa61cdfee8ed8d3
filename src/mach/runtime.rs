use super::{
    builtin, Block, Config, Function, Native, Op, Program, Registry, Stack, TypeRegistry, Val,
};
use crate::error;
use crate::lang::{Column, Error};
use std::io::Write;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

const RED_ZONE: usize = 100 * 1024;
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// ## Execution engine
///
/// Owns the operand stack and both registries. Every control structure is
/// a native function that re-enters the engine through `execute_block`,
/// so nested execution is plain recursion bounded by `Config::max_depth`.

pub struct Runtime {
    config: Config,
    stack: Stack<Val>,
    types: TypeRegistry,
    functions: Registry<Function>,
    depth: usize,
    interrupted: Arc<AtomicBool>,
    output: Box<dyn Write>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("stack", &self.stack)
            .field("depth", &self.depth)
            .finish()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Runtime {
        let mut runtime = Runtime {
            stack: Stack::new(config.max_stack),
            config,
            types: TypeRegistry::new(),
            functions: Registry::new(),
            depth: 0,
            interrupted: Arc::new(AtomicBool::new(false)),
            output: Box::new(std::io::stdout()),
        };
        builtin::register(&mut runtime);
        runtime
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the sink that `print` and friends write to.
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Flag that stops the running program before its next instruction.
    /// Safe to set from a signal handler thread.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn stack(&self) -> &Stack<Val> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack<Val> {
        &mut self.stack
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn functions(&self) -> &Registry<Function> {
        &self.functions
    }

    pub fn type_name(&self, val: &Val) -> &str {
        self.types.name_of(val)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn define_native(&mut self, name: &str, native: Native) {
        self.define(name, Function::Native(native));
    }

    /// Binds `name`, replacing any earlier definition in place.
    pub fn define(&mut self, name: &str, function: Function) {
        let index = self.functions.set(name, function);
        tracing::debug!(name, index, "defined function");
    }

    /// Runs the main body of `program`.
    pub fn execute(&mut self, program: &Rc<Program>) -> Result<()> {
        self.execute_block(&Block::main(program))
    }

    pub fn execute_block(&mut self, block: &Block) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(error!(StackOverflow; format!(
                "MORE THAN {} NESTED BLOCKS",
                self.config.max_depth
            )));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || self.run(block));
        self.depth -= 1;
        result
    }

    fn run(&mut self, block: &Block) -> Result<()> {
        let program = block.program();
        let instructions = match block.instructions() {
            Some(instructions) => instructions,
            None => return Err(error!(InternalError; "BLOCK OUTSIDE ITS PROGRAM")),
        };
        for instruction in instructions {
            let result = if self.interrupted.swap(false, Ordering::SeqCst) {
                Err(error!(Interrupted))
            } else {
                self.step(program, &instruction.op)
            };
            if let Err(error) = result {
                return Err(locate(error, program, &instruction.column));
            }
        }
        Ok(())
    }

    fn step(&mut self, program: &Rc<Program>, op: &Op) -> Result<()> {
        match op {
            Op::Int(n) => self.stack.push(Val::Int(*n)),
            Op::Real(r) => self.stack.push(Val::Real(*r)),
            Op::Str(s) => self.stack.push(Val::Str(s.to_string())),
            Op::Block(range) => self
                .stack
                .push(Val::Block(Block::new(program, range.clone()))),
            Op::Call(name) => self.invoke(name),
        }
    }

    /// Calls the function bound to `name`.
    pub fn invoke(&mut self, name: &str) -> Result<()> {
        let function = match self.functions.find(name) {
            Some(function) => function.clone(),
            None => return Err(error!(UnknownFunction; format!("`{}`", name))),
        };
        tracing::trace!(name, depth = self.depth, stack = self.stack.len(), "call");
        match function {
            Function::Native(native) => native(self),
            Function::Interpreted(block) => self.execute_block(&block),
        }
    }

    /// Runs a popped value: a string names a function, a block is executed.
    pub fn dispatch(&mut self, val: Val, function: &str) -> Result<()> {
        match val {
            Val::Str(name) => self.invoke(&name),
            Val::Block(block) => self.execute_block(&block),
            other => Err(error!(TypeMismatch; format!(
                "`{}` CANNOT EXECUTE {}",
                function,
                self.type_name(&other)
            ))),
        }
    }
}

/// Attaches the location of the innermost failing instruction, once.
fn locate(error: Error, program: &Program, column: &Column) -> Error {
    if error.is_located() || error.exit_code().is_some() {
        error
    } else {
        error
            .in_column(column)
            .in_source(program.name(), program.line_number(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use crate::mach::Instruction;

    fn program_with_body(ops: Vec<Op>, body: std::ops::Range<usize>) -> Rc<Program> {
        let instructions = ops
            .into_iter()
            .enumerate()
            .map(|(i, op)| Instruction {
                op,
                column: i..i + 1,
            })
            .collect();
        Rc::new(Program::new("test", "", instructions, body))
    }

    fn program(ops: Vec<Op>) -> Rc<Program> {
        let len = ops.len();
        program_with_body(ops, 0..len)
    }

    fn call(name: &str) -> Op {
        Op::Call(name.into())
    }

    #[test]
    fn test_literals_push() {
        let mut r = Runtime::new();
        let p = program(vec![Op::Int(1), Op::Real(2.5), Op::Str("x".into())]);
        r.execute(&p).unwrap();
        let vals: Vec<String> = r.stack().iter().map(Val::render).collect();
        assert_eq!(vals, vec!["1", "2.500000", "x"]);
    }

    #[test]
    fn test_unknown_function_is_located() {
        let mut r = Runtime::new();
        let p = program(vec![Op::Int(1), call("nothing")]);
        let e = r.execute(&p).unwrap_err();
        assert_eq!(e.code(), ErrorCode::UnknownFunction);
        assert_eq!(e.column(), 1..2);
        assert!(e.is_located());
        assert_eq!(r.stack().len(), 1);
    }

    #[test]
    fn test_error_aborts_rest_of_block() {
        let mut r = Runtime::new();
        let p = program(vec![call("nothing"), Op::Int(1)]);
        assert!(r.execute(&p).is_err());
        assert!(r.stack().is_empty());
    }

    #[test]
    fn test_interpreted_function() {
        let mut r = Runtime::new();
        let p = program_with_body(
            vec![
                Op::Str("twice".into()),
                Op::Block(3..5),
                call("funcdef"),
                call("copy"),
                call("add"),
            ],
            0..3,
        );
        r.execute(&p).unwrap();
        assert!(r.stack().is_empty());
        drop(p);
        let q = program(vec![Op::Int(21), call("twice")]);
        r.execute(&q).unwrap();
        assert_eq!(r.stack().last(), Some(&Val::Int(42)));
    }

    #[test]
    fn test_depth_limit() {
        let mut r = Runtime::with_config(Config {
            max_stack: 100,
            max_depth: 8,
        });
        let p = program_with_body(
            vec![
                Op::Str("forever".into()),
                Op::Block(3..4),
                call("funcdef"),
                call("forever"),
            ],
            0..3,
        );
        r.execute(&p).unwrap();
        let e = r.invoke("forever").unwrap_err();
        assert_eq!(e.code(), ErrorCode::StackOverflow);
        assert_eq!(e.column(), 3..4);
        assert_eq!(r.depth(), 0);
    }

    #[test]
    fn test_interrupt() {
        let mut r = Runtime::new();
        r.interrupt();
        let p = program(vec![Op::Int(1)]);
        assert_eq!(r.execute(&p).unwrap_err().code(), ErrorCode::Interrupted);
        assert!(r.stack().is_empty());
        r.execute(&p).unwrap();
        assert_eq!(r.stack().len(), 1);
    }

    #[test]
    fn test_dispatch() {
        let mut r = Runtime::new();
        r.dispatch(Val::Str("wall".into()), "exec").unwrap();
        assert_eq!(r.stack().last(), Some(&Val::Wall));
        let e = r.dispatch(Val::Int(3), "exec").unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        assert_eq!(e.to_string(), "TYPE MISMATCH; `exec` CANNOT EXECUTE int");
    }

    #[test]
    fn test_redefine_native() {
        fn answer(r: &mut Runtime) -> Result<()> {
            r.stack_mut().push(Val::Int(42))
        }
        let mut r = Runtime::new();
        let position = r.functions().index("none");
        r.define_native("none", answer);
        assert_eq!(r.functions().index("none"), position);
        r.invoke("none").unwrap();
        assert_eq!(r.stack().last(), Some(&Val::Int(42)));
    }
}
