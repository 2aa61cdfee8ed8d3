use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    EzcLexer::lex(s)
}

fn is_ezc_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_ezc_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_ezc_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ezc_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_ezc_whitespace(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Whitespace(s))
    }

    fn comment(&mut self) -> Option<Token> {
        self.chars().next();
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if *pk == '\n' {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Comment(s))
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut real = false;
        let mut exp = false;
        if let Some(sign) = self.chars().next() {
            s.push(sign);
            if sign == '.' {
                real = true;
            }
        }
        while let Some(pk) = self.chars().peek() {
            let ch = *pk;
            if is_ezc_digit(ch) {
                s.push(ch);
            } else if ch == '.' && !real && !exp {
                real = true;
                s.push(ch);
            } else if (ch == 'e' || ch == 'E') && !exp {
                exp = true;
                real = true;
                s.push(ch);
                self.chars().next();
                if let Some(pk) = self.chars().peek() {
                    if *pk == '+' || *pk == '-' {
                        s.push(*pk);
                        self.chars().next();
                    }
                }
                continue;
            } else {
                break;
            }
            self.chars().next();
        }
        if real {
            Some(Token::Literal(Literal::Real(s)))
        } else {
            Some(Token::Literal(Literal::Integer(s)))
        }
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        loop {
            match self.chars().next() {
                None => return Some(Token::Unknown(format!("\"{}", s))),
                Some('"') => return Some(Token::Literal(Literal::String(s))),
                Some('\\') => {
                    s.push('\\');
                    if let Some(ch) = self.chars().next() {
                        s.push(ch);
                    }
                }
                Some(ch) => s.push(ch),
            }
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_ezc_word(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        if let Some('!') = self.chars().peek() {
            self.chars().next();
            return Some(Token::Call(s));
        }
        Some(Token::Word(s))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        match ch {
            '{' => return Some(Token::LBrace),
            '}' => return Some(Token::RBrace),
            _ => {}
        }
        let mut s = ch.to_string();
        if let Some(pk) = self.chars().peek() {
            if (ch == '<' && *pk == '>') || (ch == '=' && *pk == '=') {
                s.push(*pk);
                self.chars().next();
            }
        }
        match Operator::from_str(&s) {
            Some(op) => Some(Token::Operator(op)),
            None => Some(Token::Unknown(s)),
        }
    }
}

struct EzcLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for EzcLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for EzcLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if is_ezc_whitespace(pk) {
            return self.whitespace();
        }
        if pk == '#' {
            return self.comment();
        }
        if is_ezc_digit(pk) || self.starts_signed_number(pk) {
            return self.number();
        }
        if is_ezc_alphabetic(pk) {
            return self.alphabetic();
        }
        if pk == '"' {
            return self.string();
        }
        self.minutia()
    }
}

impl<'a> EzcLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        EzcLexer {
            chars: s.chars().peekable(),
        }
        .collect()
    }

    // `-2` is a literal, `-` alone is subtraction.
    fn starts_signed_number(&self, pk: char) -> bool {
        if pk != '-' && pk != '+' && pk != '.' {
            return false;
        }
        let mut ahead = self.chars.clone();
        ahead.next();
        match ahead.next() {
            Some(ch) if is_ezc_digit(ch) => true,
            Some('.') if pk != '.' => matches!(ahead.next(), Some(ch) if is_ezc_digit(ch)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(s: &str) -> Vec<Token> {
        lex(s).into_iter().filter(|t| !t.is_trivia()).collect()
    }

    #[test]
    fn test_numbers() {
        let mut x = significant("12 -3 2.5 -.5 1e3").into_iter();
        assert_eq!(x.next(), Some(Token::Literal(Literal::Integer("12".into()))));
        assert_eq!(x.next(), Some(Token::Literal(Literal::Integer("-3".into()))));
        assert_eq!(x.next(), Some(Token::Literal(Literal::Real("2.5".into()))));
        assert_eq!(x.next(), Some(Token::Literal(Literal::Real("-.5".into()))));
        assert_eq!(x.next(), Some(Token::Literal(Literal::Real("1e3".into()))));
        assert_eq!(x.next(), None);
    }

    #[test]
    fn test_minus_is_operator() {
        let v = significant("3 2 - 1");
        assert_eq!(v[2], Token::Operator(Operator::Minus));
    }

    #[test]
    fn test_words_and_calls() {
        let v = significant("name {print!} funcdef! name!");
        assert_eq!(
            v,
            vec![
                Token::Word("name".into()),
                Token::LBrace,
                Token::Call("print".into()),
                Token::RBrace,
                Token::Call("funcdef".into()),
                Token::Call("name".into()),
            ]
        );
    }

    #[test]
    fn test_operators() {
        let v = significant("| : _ <> $ ! ` == ^");
        let ops: Vec<&str> = v
            .iter()
            .map(|t| match t {
                Token::Operator(op) => op.function_name(),
                _ => "?",
            })
            .collect();
        assert_eq!(
            ops,
            vec!["wall", "copy", "under", "swap", "get", "exec", "del", "eq", "pow"]
        );
    }

    #[test]
    fn test_string_and_comment() {
        let v = lex("\"a \\\"b\\\"\" # note\n");
        assert_eq!(v[0], Token::Literal(Literal::String("a \\\"b\\\"".into())));
        assert_eq!(v[2], Token::Comment(" note".into()));
    }

    #[test]
    fn test_round_trip_width() {
        let s = "1 2 add! # sum\n{ \"x\" print! } exec!";
        let rebuilt: String = lex(s).iter().map(|t| t.to_string()).collect();
        assert_eq!(rebuilt, s);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(lex("\"abc"), vec![Token::Unknown("\"abc".into())]);
    }
}
