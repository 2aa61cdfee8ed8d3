/*!
## Rust Machine Module

The execution core of EZC: values and their types, the operand stack,
the name registries, and the engine that runs compiled blocks.

*/

pub type Address = usize;

mod builtin;
mod config;
mod function;
mod operation;
mod program;
mod registry;
mod runtime;
mod stack;
pub mod types;
mod val;

pub use config::Config;
pub use function::Function;
pub use function::Native;
pub use operation::Operation;
pub use program::Block;
pub use program::Instruction;
pub use program::Op;
pub use program::Program;
pub use registry::Registry;
pub use runtime::Runtime;
pub use stack::Stack;
pub use types::TypeId;
pub use types::TypeRegistry;
pub use val::FileHandle;
pub use val::Object;
pub use val::Val;
