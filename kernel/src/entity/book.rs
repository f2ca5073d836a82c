mod author;
mod id;
mod isbn;
mod title;
mod version;

pub use self::{author::*, id::*, isbn::*, title::*, version::*};
use crate::{ConflictReason, KernelError};
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookCopy {
    id: BookCopyId,
    isbn_no: BookIsbn,
    title: BookTitle,
    author: BookAuthor,
    version: CopyVersion,
}

impl BookCopy {
    pub fn new(
        id: BookCopyId,
        isbn_no: BookIsbn,
        title: BookTitle,
        author: BookAuthor,
        version: CopyVersion,
    ) -> Self {
        Self {
            id,
            isbn_no,
            title,
            author,
            version,
        }
    }

    pub fn is_same_work(&self, title: &BookTitle, author: &BookAuthor) -> bool {
        self.title.eq(title) && self.author.eq(author)
    }

    /// Builds the next physical copy of `isbn_no`.
    ///
    /// `existing` must hold every copy already registered under `isbn_no`.
    /// All of them have to agree on title and author, and the new copy takes
    /// the version after the highest one present.
    pub fn next_copy(
        id: BookCopyId,
        isbn_no: BookIsbn,
        title: BookTitle,
        author: BookAuthor,
        existing: &[BookCopy],
    ) -> error_stack::Result<Self, KernelError> {
        if let Some(mismatch) = existing
            .iter()
            .find(|copy| !copy.is_same_work(&title, &author))
        {
            return Err(Report::new(KernelError::from(ConflictReason::IsbnMismatch))
                .attach_printable(format!(
                    "isbn {} is registered as {:?} by {:?}",
                    isbn_no.as_ref(),
                    mismatch.title().as_ref(),
                    mismatch.author().as_ref()
                )));
        }
        let version = match existing.iter().map(|copy| copy.version).max() {
            Some(latest) => latest.next()?,
            None => CopyVersion::first(),
        };
        Ok(Self::new(id, isbn_no, title, author, version))
    }
}
