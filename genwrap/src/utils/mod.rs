pub(crate) mod edition;
pub(crate) mod lexer;
