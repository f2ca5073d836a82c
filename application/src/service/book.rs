use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookCopyQuery, DependOnBookCopyQuery};
use kernel::interface::update::{BookCopyModifier, DependOnBookCopyModifier};
use kernel::prelude::entity::{BookAuthor, BookCopy, BookCopyId, BookIsbn, BookTitle, Page};
use kernel::KernelError;

use crate::transfer::{BookCopyDto, CreateBookCopyDto, GetBookCopyDto, PageDto};

#[async_trait::async_trait]
pub trait AddBookCopyService:
    'static + Sync + Send + DependOnBookCopyQuery + DependOnBookCopyModifier
{
    async fn add_book_copy(
        &self,
        dto: CreateBookCopyDto,
    ) -> error_stack::Result<BookCopyDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn_no = BookIsbn::new(dto.isbn_no);
        let existing = self
            .book_copy_query()
            .find_by_isbn(&mut connection, &isbn_no)
            .await?;
        tracing::debug!(
            "Found {} existing copies of isbn {}",
            existing.len(),
            isbn_no.as_ref()
        );

        let copy = BookCopy::next_copy(
            BookCopyId::new(Uuid::new_v4()),
            isbn_no,
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            &existing,
        )?;

        self.book_copy_modifier()
            .create(&mut connection, &copy)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "Added copy {} of isbn {} as version {}",
            copy.id().as_ref(),
            copy.isbn_no().as_ref(),
            copy.version().as_ref()
        );
        Ok(BookCopyDto::from(copy))
    }
}

impl<T> AddBookCopyService for T where T: DependOnBookCopyQuery + DependOnBookCopyModifier {}

#[async_trait::async_trait]
pub trait GetBookCopyService: 'static + Sync + Send + DependOnBookCopyQuery {
    async fn get_book_copy(
        &self,
        dto: GetBookCopyDto,
    ) -> error_stack::Result<Option<BookCopyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookCopyId::new(dto.id);
        let copy = self.book_copy_query().find_by_id(&mut connection, &id).await?;
        Ok(copy.map(BookCopyDto::from))
    }
}

impl<T> GetBookCopyService for T where T: DependOnBookCopyQuery {}

#[async_trait::async_trait]
pub trait GetAllBookCopyService: 'static + Sync + Send + DependOnBookCopyQuery {
    async fn get_all_book_copies(
        &self,
        dto: PageDto,
    ) -> error_stack::Result<Vec<BookCopyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let page = Page::from(dto);
        let copies = self.book_copy_query().find_all(&mut connection, &page).await?;
        Ok(copies.into_iter().map(BookCopyDto::from).collect())
    }
}

impl<T> GetAllBookCopyService for T where T: DependOnBookCopyQuery {}

#[cfg(test)]
mod test {
    use error_stack::Report;
    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::{ConflictReason, KernelError};

    use crate::service::{AddBookCopyService, GetAllBookCopyService, GetBookCopyService};
    use crate::transfer::{CreateBookCopyDto, GetBookCopyDto, PageDto};

    fn create(isbn: &str, title: &str, author: &str) -> CreateBookCopyDto {
        CreateBookCopyDto {
            isbn_no: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn copies_of_one_isbn_are_numbered() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();

        let first = db.add_book_copy(create("X", "Title", "Author")).await?;
        assert_eq!(first.version, 1);
        let second = db.add_book_copy(create("X", "Title", "Author")).await?;
        assert_eq!(second.version, 2);
        assert_ne!(first.id, second.id);

        let other = db.add_book_copy(create("Y", "Title", "Author")).await?;
        assert_eq!(other.version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn isbn_mismatch_writes_nothing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.add_book_copy(create("X", "Title", "Author")).await?;

        let report: Report<KernelError> = db
            .add_book_copy(create("X", "Other Title", "Author"))
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::Conflict(ConflictReason::IsbnMismatch)
        );

        let all = db
            .get_all_book_copies(PageDto {
                number: 0,
                size: 30,
            })
            .await?;
        assert_eq!(all.len(), 1);

        let third = db.add_book_copy(create("X", "Title", "Author")).await?;
        assert_eq!(third.version, 2);
        Ok(())
    }

    #[tokio::test]
    async fn lookup_and_paging() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut added = Vec::new();
        for i in 0..5 {
            added.push(db.add_book_copy(create(&format!("isbn-{i}"), "Title", "Author")).await?);
        }

        let found = db.get_book_copy(GetBookCopyDto { id: added[3].id }).await?;
        assert_eq!(found, Some(added[3].clone()));

        let missing = db
            .get_book_copy(GetBookCopyDto { id: Uuid::new_v4() })
            .await?;
        assert!(missing.is_none());

        let page = db
            .get_all_book_copies(PageDto { number: 1, size: 2 })
            .await?;
        assert_eq!(page, added[2..4].to_vec());

        let past_end = db
            .get_all_book_copies(PageDto { number: 3, size: 2 })
            .await?;
        assert!(past_end.is_empty());
        Ok(())
    }
}
