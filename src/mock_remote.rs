//! An in-memory [`TodoSource`], that mocks a REST server in tests
#![cfg(any(test, feature = "mock_remote"))]

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::item::TodoId;
use crate::mock_behaviour::MockBehaviour;
use crate::todo::{Todo, TodoFields};
use crate::traits::TodoSource;

/// A server that lives in memory, and can be told to fail (see [`MockBehaviour`])
#[derive(Debug, Default)]
pub struct MockRemote {
    todos: Vec<Todo>,
    behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockRemote {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self { todos, behaviour: Arc::new(Mutex::new(MockBehaviour::new())) }
    }

    pub fn with_behaviour(todos: Vec<Todo>, behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self { todos, behaviour }
    }

    /// A handle to tweak the behaviour of this mock, even once it has been moved into a store
    pub fn behaviour(&self) -> Arc<Mutex<MockBehaviour>> {
        Arc::clone(&self.behaviour)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Change the server data without going through the API, e.g. to mimic another device
    pub fn insert_directly(&mut self, todo: Todo) {
        self.todos.retain(|t| t.id() != todo.id());
        self.todos.push(todo);
    }

    fn check<F>(&self, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        match self.behaviour.lock() {
            Ok(mut behaviour) => f(&mut *behaviour),
            Err(_) => Err("Mock behaviour is poisoned".into()),
        }
    }
}

#[async_trait]
impl TodoSource for MockRemote {
    async fn list(&self) -> Result<Vec<Todo>, Box<dyn Error>> {
        self.check(MockBehaviour::can_list)?;
        Ok(self.todos.clone())
    }

    async fn create(&mut self, fields: &TodoFields) -> Result<Todo, Box<dyn Error>> {
        self.check(MockBehaviour::can_create)?;
        let todo = Todo::new(TodoId::random(), fields.clone());
        self.todos.push(todo.clone());
        Ok(todo)
    }

    async fn replace(&mut self, todo: &Todo) -> Result<(), Box<dyn Error>> {
        self.check(MockBehaviour::can_replace)?;
        match self.todos.iter_mut().find(|t| t.id() == todo.id()) {
            None => Err(format!("No todo {} on the mocked server", todo.id()).into()),
            Some(stored) => {
                *stored = todo.clone();
                Ok(())
            },
        }
    }

    async fn delete(&mut self, id: &TodoId) -> Result<(), Box<dyn Error>> {
        self.check(MockBehaviour::can_delete)?;
        let before = self.todos.len();
        self.todos.retain(|t| t.id() != id);
        if self.todos.len() == before {
            return Err(format!("No todo {} on the mocked server", id).into());
        }
        Ok(())
    }
}
