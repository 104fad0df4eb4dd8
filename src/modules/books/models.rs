use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Identifier assigned to a book by the store.
pub type BookId = i64;

/// Author attached to a book.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub website: String,
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    #[serde(rename = "bookId")]
    pub id: BookId,
    #[serde(rename = "bookName")]
    pub name: String,
    pub price: i64,
    pub author: Option<Author>,
}

/// Book payload as accepted on create and update.
///
/// Carries no id: the store assigns it on create and keeps the path id on
/// update, so a `bookId` in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    #[serde(rename = "bookName")]
    pub name: String,
    pub price: i64,
    pub author: Option<Author>,
}

impl NewBook {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            author: None,
        }
    }

    pub fn with_author(mut self, full_name: impl Into<String>, website: impl Into<String>) -> Self {
        self.author = Some(Author {
            full_name: full_name.into(),
            website: website.into(),
        });
        self
    }

    /// An empty name marks the payload as absent.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.is_empty() {
            return Err(StoreError::InvalidInput {
                field: "bookName",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    pub(crate) fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            name: self.name,
            price: self.price,
            author: self.author,
        }
    }
}

/// The catalog the service starts with when seeding is enabled.
pub fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook::new("Intro to C++", 50)
            .with_author("Bjarne Stroustrup", "https://fakeCPPAuthor.com"),
        NewBook::new("Intro to Go", 20).with_author("Rob Pike", "https://fakeGoAuthor.com"),
    ]
}
