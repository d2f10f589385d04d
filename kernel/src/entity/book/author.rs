use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(author: impl Into<String>) -> Self {
        Self(author.into())
    }
}
