use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateBookCopyDto, GetBookCopyDto, GetBookCopyLedgerDto, LedgerTransactionDto, PageDto,
};
use kernel::prelude::entity::LedgerTransaction;

use crate::controller::{Intake, TryIntake};
use crate::error::ValidationErrors;
use crate::route::field::TextField;
use crate::route::page::PageRequest;

const ISBN_NO: TextField = TextField {
    mandatory: "ISBN Number is mandatory",
    length: "Please provide an ISBN number of 3 to 50 characters",
    min: 3,
    max: 50,
};

const TITLE: TextField = TextField {
    mandatory: "Title of the book is mandatory",
    length: "Please provide a title greater than one character and less than 255 characters",
    min: 2,
    max: 255,
};

const AUTHOR: TextField = TextField {
    mandatory: "Author name is mandatory",
    length: "Please provide an author name greater than one character and less than 50 characters",
    min: 2,
    max: 50,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    isbn_no: Option<String>,
    title: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRequest {
    book_id: Uuid,
    borrower_id: Uuid,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetLedgerRequest {
    id: Uuid,
}

impl GetLedgerRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateBookCopyDto;
    type Error = ValidationErrors;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        let mut errors = ValidationErrors::default();
        let isbn_no = ISBN_NO.check(input.isbn_no, &mut errors);
        let title = TITLE.check(input.title, &mut errors);
        let author = AUTHOR.check(input.author, &mut errors);
        errors.finish(CreateBookCopyDto {
            isbn_no,
            title,
            author,
        })
    }
}

impl TryIntake<PageRequest> for Transformer {
    type To = PageDto;
    type Error = ValidationErrors;
    fn emit(&self, input: PageRequest) -> Result<Self::To, Self::Error> {
        input.validate()
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookCopyDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookCopyDto { id: input.id }
    }
}

impl Intake<GetLedgerRequest> for Transformer {
    type To = GetBookCopyLedgerDto;
    fn emit(&self, input: GetLedgerRequest) -> Self::To {
        GetBookCopyLedgerDto {
            book_copy_id: input.id,
        }
    }
}

impl Intake<(LedgerTransaction, LedgerRequest)> for Transformer {
    type To = LedgerTransactionDto;
    fn emit(&self, (transaction, req): (LedgerTransaction, LedgerRequest)) -> Self::To {
        LedgerTransactionDto {
            book_copy_id: req.book_id,
            borrower_id: req.borrower_id,
            transaction,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::controller::TryIntake;

    use super::{CreateRequest, Transformer};

    fn create(json: &str) -> Result<Vec<String>, Vec<String>> {
        let req: CreateRequest = serde_json::from_str(json).unwrap();
        TryIntake::emit(&Transformer, req)
            .map(|dto| vec![dto.isbn_no, dto.title, dto.author])
            .map_err(|errors| errors.messages().to_vec())
    }

    #[test]
    fn valid_book() {
        let dto = create(r#"{"isbnNo": "978-3", "title": "Dune", "author": "Frank Herbert"}"#);
        assert_eq!(
            dto,
            Ok(vec![
                "978-3".to_string(),
                "Dune".to_string(),
                "Frank Herbert".to_string()
            ])
        );
    }

    #[test]
    fn every_failure_is_reported() {
        let errors = create(r#"{"isbnNo": "12", "author": "A"}"#).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Please provide an ISBN number of 3 to 50 characters",
                "Title of the book is mandatory",
                "Please provide an author name greater than one character and less than 50 characters",
            ]
        );
    }

    #[test]
    fn long_title_is_rejected() {
        let title = "t".repeat(256);
        let json = format!(r#"{{"isbnNo": "123", "title": "{title}", "author": "Author"}}"#);
        let errors = create(&json).unwrap_err();
        assert_eq!(
            errors,
            vec!["Please provide a title greater than one character and less than 255 characters"]
        );
    }
}
