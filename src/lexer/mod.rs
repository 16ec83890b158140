use lachs::Span;

use crate::span::Spanned;

#[lachs::token]
pub enum Token {
    #[terminal("let")]
    Let,
    #[terminal("mut")]
    Mut,
    #[terminal("print")]
    Print,
    #[terminal("func")]
    Func,
    #[terminal("if")]
    If,
    #[terminal("then")]
    Then,
    #[terminal("else")]
    Else,
    #[terminal("return")]
    Return,
    #[terminal("and")]
    And,
    #[terminal("or")]
    Or,
    #[terminal("true")]
    True,
    #[terminal("false")]
    False,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("[")]
    LBracket,
    #[terminal("]")]
    RBracket,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
    #[terminal(";")]
    Semicolon,
    #[terminal(",")]
    Comma,
    #[terminal(":")]
    Colon,
    #[terminal("->")]
    Arrow,
    #[terminal("=")]
    Equals,
    #[terminal("==")]
    DoubleEquals,
    #[terminal("!=")]
    NotEquals,
    #[terminal("<")]
    Less,
    #[terminal("<=")]
    LessEquals,
    #[terminal(">")]
    Greater,
    #[terminal(">=")]
    GreaterEquals,
    #[terminal("+")]
    Plus,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
    #[terminal("%")]
    Percent,
    #[terminal("!")]
    Bang,
    #[literal(r"[0-9]+\.[0-9]+")]
    Double,
    #[literal("[0-9]+")]
    Integer,
    #[literal(r"'([^'\\]|\\.)'")]
    Character,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[literal("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Let(inner) => inner.position.clone(),
            Token::Mut(inner) => inner.position.clone(),
            Token::Print(inner) => inner.position.clone(),
            Token::Func(inner) => inner.position.clone(),
            Token::If(inner) => inner.position.clone(),
            Token::Then(inner) => inner.position.clone(),
            Token::Else(inner) => inner.position.clone(),
            Token::Return(inner) => inner.position.clone(),
            Token::And(inner) => inner.position.clone(),
            Token::Or(inner) => inner.position.clone(),
            Token::True(inner) => inner.position.clone(),
            Token::False(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBracket(inner) => inner.position.clone(),
            Token::RBracket(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
            Token::Semicolon(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
            Token::Colon(inner) => inner.position.clone(),
            Token::Arrow(inner) => inner.position.clone(),
            Token::Equals(inner) => inner.position.clone(),
            Token::DoubleEquals(inner) => inner.position.clone(),
            Token::NotEquals(inner) => inner.position.clone(),
            Token::Less(inner) => inner.position.clone(),
            Token::LessEquals(inner) => inner.position.clone(),
            Token::Greater(inner) => inner.position.clone(),
            Token::GreaterEquals(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::Percent(inner) => inner.position.clone(),
            Token::Bang(inner) => inner.position.clone(),
            Token::Double(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::Character(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Let(_) => "'let'".to_string(),
            Token::Mut(_) => "'mut'".to_string(),
            Token::Print(_) => "'print'".to_string(),
            Token::Func(_) => "'func'".to_string(),
            Token::If(_) => "'if'".to_string(),
            Token::Then(_) => "'then'".to_string(),
            Token::Else(_) => "'else'".to_string(),
            Token::Return(_) => "'return'".to_string(),
            Token::And(_) => "'and'".to_string(),
            Token::Or(_) => "'or'".to_string(),
            Token::True(_) => "'true'".to_string(),
            Token::False(_) => "'false'".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBracket(_) => "'['".to_string(),
            Token::RBracket(_) => "']'".to_string(),
            Token::LBrace(_) => "'{'".to_string(),
            Token::RBrace(_) => "'}'".to_string(),
            Token::Semicolon(_) => "';'".to_string(),
            Token::Comma(_) => "','".to_string(),
            Token::Colon(_) => "':'".to_string(),
            Token::Arrow(_) => "'->'".to_string(),
            Token::Equals(_) => "'='".to_string(),
            Token::DoubleEquals(_) => "'=='".to_string(),
            Token::NotEquals(_) => "'!='".to_string(),
            Token::Less(_) => "'<'".to_string(),
            Token::LessEquals(_) => "'<='".to_string(),
            Token::Greater(_) => "'>'".to_string(),
            Token::GreaterEquals(_) => "'>='".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Minus(_) => "'-'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
            Token::Percent(_) => "'%'".to_string(),
            Token::Bang(_) => "'!'".to_string(),
            Token::Double(inner) => format!("double '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::Character(inner) => format!("character {}", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
        }
    }

    /// True for the six bracket tokens that sectioning consumes.
    pub fn is_bracket(&self) -> bool {
        matches!(
            self,
            Token::LParen(_)
                | Token::RParen(_)
                | Token::LBracket(_)
                | Token::RBracket(_)
                | Token::LBrace(_)
                | Token::RBrace(_)
        )
    }
}

impl Spanned for Token {
    fn pos(&self) -> Span {
        Token::pos(self)
    }
}
