use std::error::Error;

use async_trait::async_trait;

use crate::item::TodoId;
use crate::todo::{Todo, TodoFields};

/// A remote collection of todos (usually a REST server)
#[async_trait]
pub trait TodoSource {
    /// Returns the authoritative list of todos.
    /// An unauthenticated source returns an empty list rather than an error.
    async fn list(&self) -> Result<Vec<Todo>, Box<dyn Error>>;

    /// Create a todo. The source assigns its identifier, and returns the todo as it has been stored.
    async fn create(&mut self, fields: &TodoFields) -> Result<Todo, Box<dyn Error>>;

    /// Replace a whole todo
    async fn replace(&mut self, todo: &Todo) -> Result<(), Box<dyn Error>>;

    async fn delete(&mut self, id: &TodoId) -> Result<(), Box<dyn Error>>;
}
