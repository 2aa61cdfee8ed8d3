use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Offsets passed to `peek` count down from the top (0 is the top);
/// indexes passed to `get` and `swap` count up from the bottom.

pub struct Stack<T> {
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(max_len: usize) -> Stack<T> {
        Stack {
            max_len,
            vec: vec![],
        }
    }
    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.max_len {
            Err(error!(StackOverflow; format!("MORE THAN {} ITEMS", self.max_len)))
        } else {
            Ok(())
        }
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow; "EMPTY STACK")
    }
    /// Checks that `n` items are present before anything is popped.
    pub fn require(&self, n: usize, function: &str) -> Result<()> {
        if self.vec.len() < n {
            Err(error!(StackUnderflow; format!(
                "`{}` REQUIRES {} ITEMS, STACK HAD {}",
                function,
                n,
                self.vec.len()
            )))
        } else {
            Ok(())
        }
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.vec.get(idx)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    pub fn peek(&self, offset: usize) -> Result<&T> {
        if offset < self.vec.len() {
            Ok(&self.vec[self.vec.len() - 1 - offset])
        } else {
            Err(self.underflow_error())
        }
    }
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        if i >= self.vec.len() || j >= self.vec.len() {
            return Err(self.underflow_error());
        }
        self.vec.swap(i, j);
        Ok(())
    }
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        if additional > self.max_len - self.vec.len() {
            return Err(error!(StackOverflow; format!("MORE THAN {} ITEMS", self.max_len)));
        }
        self.vec.reserve(additional);
        Ok(())
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        if let Err(e) = self.overflow_check() {
            self.vec.pop();
            return Err(e);
        }
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    /// Removes the top `len` items, returned bottom to top.
    pub fn drain_top(&mut self, len: usize) -> Result<Vec<T>> {
        if len > self.vec.len() {
            Err(self.underflow_error())
        } else {
            let range = (self.vec.len() - len)..;
            Ok(self.vec.drain(range).collect())
        }
    }
    /// Puts `val` in place of the top, returning the old top.
    pub fn replace_top(&mut self, val: T) -> Result<T> {
        match self.vec.last_mut() {
            Some(top) => Ok(std::mem::replace(top, val)),
            None => Err(self.underflow_error()),
        }
    }
}
