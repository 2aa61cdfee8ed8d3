use super::{Column, LineNumber};
use std::rc::Rc;

pub struct Error {
    code: u16,
    source_name: Option<Rc<str>>,
    line_number: LineNumber,
    column: Column,
    message: String,
    exit_code: i32,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            source_name: None,
            line_number: None,
            column: 0..0,
            message: String::new(),
            exit_code: 0,
        }
    }

    /// The error that unwinds every running execution when a program asks
    /// to terminate. The driver decides what termination means.
    pub fn exit(exit_code: i32) -> Error {
        Error {
            exit_code,
            ..Error::new(ErrorCode::UserRequestedExit)
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_u16(self.code)
    }

    /// Nonzero status reported to the outermost caller.
    pub fn status(&self) -> i32 {
        i32::from(self.code)
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self.code() {
            ErrorCode::UserRequestedExit => Some(self.exit_code),
            _ => None,
        }
    }

    pub fn is_located(&self) -> bool {
        self.source_name.is_some()
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn in_source(self, source_name: &Rc<str>, line_number: LineNumber) -> Error {
        debug_assert!(self.source_name.is_none());
        Error {
            source_name: Some(source_name.clone()),
            line_number,
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    StackUnderflow = 3,
    StackOverflow = 4,
    TypeMismatch = 13,
    UnknownFunction = 18,
    UnknownType = 19,
    DivisionByZero = 11,
    IOFailure = 57,
    Interrupted = 60,
    UserRequestedExit = 70,
    InternalError = 51,
}

impl ErrorCode {
    fn from_u16(code: u16) -> ErrorCode {
        use ErrorCode::*;
        match code {
            2 => SyntaxError,
            3 => StackUnderflow,
            4 => StackOverflow,
            11 => DivisionByZero,
            13 => TypeMismatch,
            18 => UnknownFunction,
            19 => UnknownType,
            57 => IOFailure,
            60 => Interrupted,
            70 => UserRequestedExit,
            _ => InternalError,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            2 => "SYNTAX ERROR",
            3 => "STACK UNDERFLOW",
            4 => "STACK OVERFLOW",
            11 => "DIVISION BY ZERO",
            13 => "TYPE MISMATCH",
            18 => "UNKNOWN FUNCTION",
            19 => "UNKNOWN TYPE",
            51 => "INTERNAL ERROR",
            57 => "I/O FAILURE",
            60 => "BREAK",
            70 => "EXIT",
            _ => "",
        };
        let mut location = String::new();
        if let Some(source_name) = &self.source_name {
            location.push_str(&format!(" {}", source_name));
            if let Some(line_number) = self.line_number {
                location.push_str(&format!(":{}", line_number));
            }
        }
        if (0..0) != self.column {
            location.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}", self.code)?;
        } else {
            write!(f, "{}", code_str)?;
        }
        if !location.is_empty() {
            write!(f, " IN{}", location)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        error!(IOFailure; error.to_string().to_uppercase())
    }
}
