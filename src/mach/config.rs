//! Runtime limits.

/// Limits enforced by the `Runtime`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of values on the stack.
    pub max_stack: usize,

    /// Maximum nesting of block executions.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_stack: u16::max_value() as usize,
            max_depth: 1024,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `EZC_MAX_STACK` and `EZC_MAX_DEPTH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = read_var("EZC_MAX_STACK") {
            config.max_stack = n;
        }
        if let Some(n) = read_var("EZC_MAX_DEPTH") {
            config.max_depth = n;
        }
        config
    }
}

fn read_var(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(name, value = %value, "ignoring invalid limit");
            None
        }
    }
}
