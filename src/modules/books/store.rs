//! In-memory book store.
//!
//! All state sits behind one `RwLock`: list/get share the read side, every
//! mutation (including id assignment) takes the write side.

use std::collections::HashSet;

use tokio::sync::RwLock;

use super::error::StoreError;
use super::ids::IdAllocator;
use super::models::{Book, BookId, NewBook};

/// Authoritative collection of catalog entries.
pub struct BookStore {
    shelf: RwLock<Shelf>,
}

struct Shelf {
    /// Records in list order.
    books: Vec<Book>,
    /// Live ids, mirrors `books`.
    ids: HashSet<BookId>,
    allocator: IdAllocator,
}

impl Shelf {
    fn position(&self, id: BookId) -> Option<usize> {
        if !self.ids.contains(&id) {
            return None;
        }
        self.books.iter().position(|book| book.id == id)
    }

    fn insert(&mut self, candidate: NewBook) -> Result<Book, StoreError> {
        candidate.validate()?;
        let id = self.allocator.allocate(&self.ids)?;
        let book = candidate.into_book(id);
        self.ids.insert(id);
        self.books.push(book.clone());
        Ok(book)
    }
}

impl BookStore {
    pub fn new(allocator: IdAllocator) -> Self {
        Self {
            shelf: RwLock::new(Shelf {
                books: Vec::new(),
                ids: HashSet::new(),
                allocator,
            }),
        }
    }

    /// Snapshot of every book in list order.
    pub async fn list(&self) -> Vec<Book> {
        self.shelf.read().await.books.clone()
    }

    pub async fn get(&self, id: BookId) -> Result<Book, StoreError> {
        let shelf = self.shelf.read().await;
        shelf
            .position(id)
            .map(|index| shelf.books[index].clone())
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Store a new book under a freshly assigned id.
    pub async fn create(&self, candidate: NewBook) -> Result<Book, StoreError> {
        let book = self.shelf.write().await.insert(candidate)?;
        tracing::debug!(book_id = book.id, name = %book.name, "book created");
        Ok(book)
    }

    /// Insert a batch under one write guard, stopping at the first failure.
    pub async fn seed<I>(&self, candidates: I) -> Result<Vec<Book>, StoreError>
    where
        I: IntoIterator<Item = NewBook>,
    {
        let mut shelf = self.shelf.write().await;
        let seeded = candidates
            .into_iter()
            .map(|candidate| shelf.insert(candidate))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = seeded.len(), "books seeded");
        Ok(seeded)
    }

    /// Replace the whole record under `id`; the record moves to the end of
    /// the list. A missing id is reported before an invalid replacement.
    pub async fn update(&self, id: BookId, replacement: NewBook) -> Result<Book, StoreError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf.position(id).ok_or(StoreError::NotFound(id))?;
        replacement.validate()?;

        shelf.books.remove(index);
        let book = replacement.into_book(id);
        shelf.books.push(book.clone());

        tracing::debug!(book_id = id, name = %book.name, "book replaced");
        Ok(book)
    }

    /// Remove the record under `id` and hand it back.
    pub async fn delete(&self, id: BookId) -> Result<Book, StoreError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf.position(id).ok_or(StoreError::NotFound(id))?;

        let removed = shelf.books.remove(index);
        shelf.ids.remove(&id);

        tracing::debug!(book_id = id, "book deleted");
        Ok(removed)
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new(IdAllocator::default())
    }
}
