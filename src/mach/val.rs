use super::types::{self, TypeId};
use std::io::Write;

/// ## Registered value types
///
/// Types registered at run time by an embedding module implement this
/// trait. Release is `Drop`.
pub trait Object: std::fmt::Debug {
    fn render(&self) -> String;
    fn duplicate(&self) -> Box<dyn Object>;
}

/// ## Runtime value
///
/// Values own their payload; removing a value from circulation drops it
/// exactly once. Duplication is `Clone`, which is deep for every type
/// except `Block`.
#[derive(Debug)]
pub enum Val {
    None,
    Wall,
    Int(i64),
    Bool(bool),
    Real(f64),
    Str(String),
    Block(super::Block),
    File(FileHandle),
    Object(TypeId, Box<dyn Object>),
}

impl Val {
    pub fn type_id(&self) -> TypeId {
        use Val::*;
        match self {
            None => types::NONE,
            Wall => types::WALL,
            Int(_) => types::INT,
            Bool(_) => types::BOOL,
            Real(_) => types::REAL,
            Str(_) => types::STR,
            Block(_) => types::BLOCK,
            File(_) => types::FILE,
            Object(id, _) => *id,
        }
    }

    /// Canonical text of the value.
    pub fn render(&self) -> String {
        use Val::*;
        match self {
            None => "none".to_string(),
            Wall => "|".to_string(),
            Int(n) => render_int(*n),
            Bool(b) => (if *b { "true" } else { "false" }).to_string(),
            Real(r) => format!("{:.6}", r),
            Str(s) => s.clone(),
            Block(b) => format!("{{...[{}]}}", b.len()),
            File(f) => f.to_string(),
            Object(_, o) => o.render(),
        }
    }

    /// Bool is itself, Int is nonzero, everything else is false.
    pub fn truthy(&self) -> bool {
        match self {
            Val::Bool(b) => *b,
            Val::Int(n) => *n != 0,
            _ => false,
        }
    }
}

impl Clone for Val {
    fn clone(&self) -> Self {
        use Val::*;
        match self {
            None => None,
            Wall => Wall,
            Int(n) => Int(*n),
            Bool(b) => Bool(*b),
            Real(r) => Real(*r),
            Str(s) => Str(s.clone()),
            Block(b) => Block(b.clone()),
            File(f) => File(f.clone()),
            Object(id, o) => Object(*id, o.duplicate()),
        }
    }
}

impl PartialEq for Val {
    fn eq(&self, other: &Val) -> bool {
        use Val::*;
        match (self, other) {
            (None, None) | (Wall, Wall) => true,
            (Int(l), Int(r)) => l == r,
            (Bool(l), Bool(r)) => l == r,
            (Real(l), Real(r)) => l == r,
            (Str(l), Str(r)) => l == r,
            (Block(l), Block(r)) => l == r,
            (File(l), File(r)) => l.name() == r.name() && l.is_open() == r.is_open(),
            _ => false,
        }
    }
}

const DIGITS: &[u8; 10] = b"0123456789";
const BASE: u64 = 10;

fn render_int(value: i64) -> String {
    let mut digits: Vec<u8> = vec![];
    let mut magnitude = value.unsigned_abs();
    loop {
        digits.push(DIGITS[(magnitude % BASE) as usize]);
        magnitude /= BASE;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.iter().rev().map(|d| *d as char).collect()
}

/// ## File value
///
/// Owns an OS handle, closed when dropped, and the name it was opened with.
#[derive(Debug)]
pub struct FileHandle {
    file: Option<std::fs::File>,
    name: String,
}

impl FileHandle {
    pub fn create(name: &str) -> std::io::Result<FileHandle> {
        Ok(FileHandle {
            file: Some(std::fs::File::create(name)?),
            name: name.to_string(),
        })
    }
    pub fn closed(name: &str) -> FileHandle {
        FileHandle {
            file: None,
            name: name.to_string(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
    pub fn close(&mut self) {
        self.file = None;
    }
    /// Writes all of `s` and a newline.
    pub fn write_line(&self, s: &str) -> std::io::Result<()> {
        let mut file = match &self.file {
            Some(file) => file,
            None => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotConnected,
                    "file is closed",
                ))
            }
        };
        file.write_all(s.as_bytes())?;
        file.write_all(b"\n")
    }
}

impl Clone for FileHandle {
    fn clone(&self) -> Self {
        FileHandle {
            file: self.file.as_ref().and_then(|f| f.try_clone().ok()),
            name: self.name.clone(),
        }
    }
}

impl std::fmt::Display for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = if self.is_open() { "open" } else { "closed" };
        write!(f, "FILE: {} [{}]", state, self.name)
    }
}
