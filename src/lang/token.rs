#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(String),
    Comment(String),
    Literal(Literal),
    Word(String),
    Call(String),
    Operator(Operator),
    LBrace,
    RBrace,
}

impl Token {
    /// Width in characters, used to track columns.
    pub fn width(&self) -> usize {
        self.to_string().chars().count()
    }
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::Comment(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(s) => write!(f, "{}", s),
            Comment(s) => write!(f, "#{}", s),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Call(s) => write!(f, "{}!", s),
            Operator(s) => write!(f, "{}", s),
            LBrace => write!(f, "{{"),
            RBrace => write!(f, "}}"),
        }
    }
}

/// Literal text exactly as written; conversion happens in the compiler.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Real(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) => write!(f, "{}", s),
            Real(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Wall,
    Copy,
    Under,
    Swap,
    Get,
    Exec,
    Del,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    Caret,
    Equal,
}

impl Operator {
    pub fn from_str(s: &str) -> Option<Operator> {
        use Operator::*;
        Some(match s {
            "|" => Wall,
            ":" => Copy,
            "_" => Under,
            "<>" => Swap,
            "$" => Get,
            "!" => Exec,
            "`" => Del,
            "+" => Plus,
            "-" => Minus,
            "*" => Multiply,
            "/" => Divide,
            "%" => Modulus,
            "^" => Caret,
            "==" => Equal,
            _ => return None,
        })
    }

    /// Every operator is shorthand for calling a standard function.
    pub fn function_name(self) -> &'static str {
        use Operator::*;
        match self {
            Wall => "wall",
            Copy => "copy",
            Under => "under",
            Swap => "swap",
            Get => "get",
            Exec => "exec",
            Del => "del",
            Plus => "add",
            Minus => "sub",
            Multiply => "mul",
            Divide => "div",
            Modulus => "mod",
            Caret => "pow",
            Equal => "eq",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        let s = match self {
            Wall => "|",
            Copy => ":",
            Under => "_",
            Swap => "<>",
            Get => "$",
            Exec => "!",
            Del => "`",
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Modulus => "%",
            Caret => "^",
            Equal => "==",
        };
        write!(f, "{}", s)
    }
}
