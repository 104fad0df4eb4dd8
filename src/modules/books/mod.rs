pub mod error;
pub mod ids;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use libris_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use ids::IdAllocator;
use store::BookStore;

/// Book catalog module, served at the root of the URL space
pub struct BooksModule {
    store: Arc<BookStore>,
    seed_sample_books: bool,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>, seed_sample_books: bool) -> Self {
        Self {
            store,
            seed_sample_books,
        }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        let store = BookStore::new(IdAllocator::from_settings(settings));
        Self::new(Arc::new(store), settings.seed_sample_books)
    }

    /// Handle to the module's store
    pub fn store(&self) -> Arc<BookStore> {
        self.store.clone()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn base_path(&self) -> String {
        "/".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if self.seed_sample_books && self.store.is_empty().await {
            let seeded = self
                .store
                .seed(models::sample_books())
                .await
                .context("failed to seed sample books")?;
            tracing::info!(module = self.name(), count = seeded.len(), "sample books seeded");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            id_strategy = ?ctx.settings.catalog.id_strategy,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(module = self.name(), books, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(module = self.name(), books, "books module stopped; catalog discarded");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_parameter = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    });
    let book_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/NewBook" }
            }
        }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "Welcome page",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "Static welcome HTML",
                            "content": { "text/html": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "All books in list order",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/book": {
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_body.clone(),
                    "responses": {
                        "201": book_response("Created book with its assigned id"),
                        "400": error_response("Empty or malformed body, or empty bookName"),
                        "409": error_response("No free id left")
                    }
                }
            },
            "/book/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter.clone()],
                    "responses": {
                        "200": book_response("The book"),
                        "400": error_response("Non-integer id"),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter.clone()],
                    "requestBody": book_body,
                    "responses": {
                        "200": book_response("The replaced book"),
                        "400": error_response("Non-integer id or invalid body"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter],
                    "responses": {
                        "200": {
                            "description": "Confirmation",
                            "content": {
                                "application/json": { "schema": { "type": "string" } }
                            }
                        },
                        "400": error_response("Non-integer id"),
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "fullname": { "type": "string" },
                        "website": { "type": "string" }
                    }
                },
                "Book": {
                    "type": "object",
                    "properties": {
                        "bookId": {
                            "type": "integer",
                            "format": "int64",
                            "description": "Identifier assigned by the store"
                        },
                        "bookName": { "type": "string" },
                        "price": { "type": "integer", "format": "int64" },
                        "author": {
                            "oneOf": [
                                { "$ref": "#/components/schemas/Author" },
                                { "type": "null" }
                            ]
                        }
                    },
                    "required": ["bookId", "bookName", "price", "author"]
                },
                "NewBook": {
                    "type": "object",
                    "properties": {
                        "bookName": { "type": "string", "minLength": 1 },
                        "price": { "type": "integer", "format": "int64" },
                        "author": {
                            "oneOf": [
                                { "$ref": "#/components/schemas/Author" },
                                { "type": "null" }
                            ]
                        }
                    },
                    "required": ["bookName"]
                }
            }
        }
    })
}

/// Create the books module from the catalog settings
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::from_settings(settings))
}
