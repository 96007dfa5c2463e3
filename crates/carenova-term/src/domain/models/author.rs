use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Default)]
pub enum Author {
    User,
    #[default]
    Carenova,
}

impl Author {
    pub fn avatar(&self) -> &'static str {
        match self {
            Author::User => "👤",
            Author::Carenova => "🤍",
        }
    }
}
