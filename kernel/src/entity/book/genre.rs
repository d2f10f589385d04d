use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct GenreName(String);

impl GenreName {
    pub fn new(genre: impl Into<String>) -> Self {
        Self(genre.into())
    }
}
