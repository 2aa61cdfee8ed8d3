use super::{Block, Runtime};
use crate::lang::Error;

/// Callback for a function implemented in Rust. It works on the runtime's
/// stack directly.
pub type Native = fn(&mut Runtime) -> Result<(), Error>;

/// ## Function registry entry
#[derive(Clone)]
pub enum Function {
    Native(Native),
    Interpreted(Block),
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Native(_) => write!(f, "Native"),
            Function::Interpreted(block) => write!(f, "Interpreted({:?})", block),
        }
    }
}
