use kernel::interface::query::{BookCopyQuery, DependOnBookCopyQuery};
use kernel::interface::update::{BookCopyModifier, DependOnBookCopyModifier};
use kernel::prelude::entity::{BookCopy, BookCopyId, BookIsbn, Page};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryBookCopyRepository;

#[async_trait::async_trait]
impl BookCopyQuery for InMemoryBookCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookCopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        let found = con.store().book_copies.iter().find(|copy| copy.id() == id);
        Ok(found.cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn_no: &BookIsbn,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        let found = con
            .store()
            .book_copies
            .iter()
            .filter(|copy| copy.isbn_no() == isbn_no)
            .cloned()
            .collect();
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        page: &Page,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        Ok(page.slice(&con.store().book_copies))
    }
}

#[async_trait::async_trait]
impl BookCopyModifier for InMemoryBookCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book_copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        con.store_mut().insert_book_copy(book_copy)
    }
}

impl DependOnBookCopyQuery for InMemoryDatabase {
    type BookCopyQuery = InMemoryBookCopyRepository;
    fn book_copy_query(&self) -> &Self::BookCopyQuery {
        &InMemoryBookCopyRepository
    }
}

impl DependOnBookCopyModifier for InMemoryDatabase {
    type BookCopyModifier = InMemoryBookCopyRepository;
    fn book_copy_modifier(&self) -> &Self::BookCopyModifier {
        &InMemoryBookCopyRepository
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookCopyQuery;
    use kernel::interface::update::BookCopyModifier;
    use kernel::prelude::entity::{
        BookAuthor, BookCopy, BookCopyId, BookIsbn, BookTitle, CopyVersion, Page, PageNumber,
        PageSize,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookCopyRepository, InMemoryDatabase};

    fn copy(isbn: &str, version: i32) -> BookCopy {
        BookCopy::new(
            BookCopyId::new(Uuid::new_v4()),
            BookIsbn::new(isbn),
            BookTitle::new("title"),
            BookAuthor::new("author"),
            CopyVersion::new(version),
        )
    }

    #[tokio::test]
    async fn duplicate_version_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryBookCopyRepository
            .create(&mut con, &copy("X", 1))
            .await?;

        let report = InMemoryBookCopyRepository
            .create(&mut con, &copy("X", 1))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Concurrency);

        InMemoryBookCopyRepository
            .create(&mut con, &copy("Y", 1))
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn pages_follow_insertion_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let copies = (1..=5).map(|v| copy("X", v)).collect::<Vec<_>>();
        for c in &copies {
            InMemoryBookCopyRepository.create(&mut con, c).await?;
        }

        let page = Page::new(PageNumber::new(1u32), PageSize::new(2u32));
        let found = InMemoryBookCopyRepository.find_all(&mut con, &page).await?;
        assert_eq!(found, copies[2..4].to_vec());

        let by_isbn = InMemoryBookCopyRepository
            .find_by_isbn(&mut con, &BookIsbn::new("X"))
            .await?;
        assert_eq!(by_isbn.len(), 5);
        Ok(())
    }
}
