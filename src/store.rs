//! This module provides the single owner of the todo list, kept in sync with a remote source
//!
//! Views never keep their own copy of the todos: they borrow [`TodoStore::todos`], and every change goes through
//! the typed mutations of the store.
//!
//! * `add` is not optimistic: the todo is inserted once the server has assigned its identifier
//! * `update` and `remove` change the local list at once, then tell the server. In case the server refuses,
//!   the local change is discarded by fetching the authoritative list again (or, if even that fails,
//!   by restoring the list as it was before the change)
//!
//! Nothing is retried. Requests are not sequenced: responses are applied in the order they arrive.

use std::error::Error;

use chrono::NaiveDate;

use crate::calendar::view::Submission;
use crate::error::ValidationError;
use crate::item::TodoId;
use crate::schedule;
use crate::todo::{Todo, TodoFields, TodoPatch};
use crate::traits::TodoSource;


/// The todo list of the dashboard, and the remote source it mirrors
#[derive(Debug)]
pub struct TodoStore<R>
where
    R: TodoSource,
{
    /// The remote source (usually a [`Client`](crate::client::Client))
    remote: R,
    /// The local copy, that views are painted from
    todos: Vec<Todo>,
}

impl<R> TodoStore<R>
where
    R: TodoSource,
{
    /// Create a store. It is empty until [`TodoStore::load`] is called
    pub fn new(remote: R) -> Self {
        Self { remote, todos: Vec::new() }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id() == id)
    }

    /// Returns the remote source.
    ///
    /// Apart from tests, there are very few (if any) reasons to access `remote` directly.
    pub fn remote(&self) -> &R { &self.remote }
    pub fn remote_mut(&mut self) -> &mut R { &mut self.remote }

    fn position(&self, id: &TodoId) -> Result<usize, Box<dyn Error>> {
        self.todos.iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| format!("No todo with id {}", id).into())
    }

    /// Replace the local list with the authoritative one
    pub async fn load(&mut self) -> Result<(), Box<dyn Error>> {
        let todos = self.remote.list().await?;
        log::info!("Loaded {} todos", todos.len());
        self.todos = todos;
        Ok(())
    }

    /// Create a todo on the server, then add it to the local list.
    ///
    /// In case of failure, the local list is left untouched.
    pub async fn add(&mut self, fields: TodoFields) -> Result<TodoId, Box<dyn Error>> {
        if fields.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let todo = self.remote.create(&fields).await?;
        let id = todo.id().clone();
        log::debug!("Todo {} has been created by the server", id);
        self.todos.push(todo);
        Ok(id)
    }

    /// Apply a partial change, optimistically.
    pub async fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Result<(), Box<dyn Error>> {
        let index = self.position(id)?;
        if patch.is_empty() {
            log::debug!("Nothing to update in todo {}", id);
            return Ok(());
        }
        if patch.title.as_deref().map(|t| t.trim().is_empty()) == Some(true) {
            return Err(ValidationError::EmptyTitle.into());
        }

        let merged = self.todos[index].merged(&patch);
        let snapshot = self.todos.clone();
        self.todos[index] = merged.clone();

        let failure = match self.remote.replace(&merged).await {
            Ok(()) => return Ok(()),
            Err(err) => err.to_string(),
        };
        log::warn!("Unable to update todo {}: {}. Discarding the local change", id, failure);
        self.roll_back(snapshot).await;
        Err(format!("Unable to update todo {}: {}", id, failure).into())
    }

    /// Delete a todo, optimistically.
    pub async fn remove(&mut self, id: &TodoId) -> Result<(), Box<dyn Error>> {
        let index = self.position(id)?;
        let snapshot = self.todos.clone();
        self.todos.remove(index);

        let failure = match self.remote.delete(id).await {
            Ok(()) => return Ok(()),
            Err(err) => err.to_string(),
        };
        log::warn!("Unable to delete todo {}: {}. Discarding the local change", id, failure);
        self.roll_back(snapshot).await;
        Err(format!("Unable to delete todo {}: {}", id, failure).into())
    }

    /// Flip the completion flag of a todo
    pub async fn toggle_complete(&mut self, id: &TodoId) -> Result<(), Box<dyn Error>> {
        let completed = self.get(id)
            .map(|t| t.completed())
            .ok_or_else(|| format!("No todo with id {}", id))?;
        self.update(id, TodoPatch::completed(completed == false)).await
    }

    /// Move a todo so that it starts on `target`, keeping its duration (drag-and-drop).
    ///
    /// Nothing is sent when the todo already starts on `target`.
    pub async fn reschedule(&mut self, id: &TodoId, target: NaiveDate) -> Result<(), Box<dyn Error>> {
        let todo = self.get(id).ok_or_else(|| format!("No todo with id {}", id))?;
        let dates = schedule::reschedule(todo, target)?;
        if dates == todo.dates() {
            log::debug!("Todo {} already starts on {}", id, target);
            return Ok(());
        }
        self.update(id, TodoPatch::dates(dates)).await
    }

    /// Apply what a modal has submitted
    pub async fn submit(&mut self, submission: Submission) -> Result<(), Box<dyn Error>> {
        match submission {
            Submission::Create(fields) => self.add(fields).await.map(|_| ()),
            Submission::Update(id, patch) => self.update(&id, patch).await,
        }
    }

    async fn roll_back(&mut self, snapshot: Vec<Todo>) {
        match self.remote.list().await {
            Ok(todos) => {
                log::debug!("Reloaded {} todos from the server", todos.len());
                self.todos = todos;
            },
            Err(err) => {
                log::warn!("Unable to reload the todos ({}). Restoring the previous local state", err);
                self.todos = snapshot;
            },
        }
    }
}
