use uuid::Uuid;

use kernel::prelude::entity::{BookCopy, DestructBookCopy};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookCopyDto {
    pub id: Uuid,
    pub isbn_no: String,
    pub title: String,
    pub author: String,
    pub version: i32,
}

impl From<BookCopy> for BookCopyDto {
    fn from(value: BookCopy) -> Self {
        let DestructBookCopy {
            id,
            isbn_no,
            title,
            author,
            version,
        } = value.into_destruct();
        Self {
            id: id.into(),
            isbn_no: isbn_no.into(),
            title: title.into(),
            author: author.into(),
            version: version.into(),
        }
    }
}

pub struct CreateBookCopyDto {
    pub isbn_no: String,
    pub title: String,
    pub author: String,
}

pub struct GetBookCopyDto {
    pub id: Uuid,
}
