use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateBorrowerDto, GetBorrowerDto, GetBorrowerLedgerDto, PageDto};

use crate::controller::{Intake, TryIntake};
use crate::error::ValidationErrors;
use crate::route::field::{is_email_shaped, TextField, INVALID_EMAIL};
use crate::route::page::PageRequest;

const NAME: TextField = TextField {
    mandatory: "Borrower name is mandatory",
    length: "Please provide a name greater than one character and less than 50 characters",
    min: 2,
    max: 50,
};

const EMAIL: TextField = TextField {
    mandatory: "Borrower email is mandatory",
    length: "Please provide an email greater than one character and less than 50 characters",
    min: 2,
    max: 50,
};

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    name: Option<String>,
    email: Option<String>,
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
    type To = CreateBorrowerDto;
    type Error = ValidationErrors;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        let mut errors = ValidationErrors::default();
        let name = NAME.check(input.name, &mut errors);
        let email = EMAIL.check(input.email, &mut errors);
        if !is_email_shaped(&email) {
            errors.push(INVALID_EMAIL);
        }
        errors.finish(CreateBorrowerDto { name, email })
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
    type To = GetBorrowerDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBorrowerDto { id: input.id }
    }
}

impl Intake<GetLedgerRequest> for Transformer {
    type To = GetBorrowerLedgerDto;
    fn emit(&self, input: GetLedgerRequest) -> Self::To {
        GetBorrowerLedgerDto {
            borrower_id: input.id,
        }
    }
}
