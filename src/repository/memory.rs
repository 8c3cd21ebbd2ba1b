use chrono::prelude::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::todo::{NewTodo, Todo, TodoChanges};
use crate::repository::database::{StoreError, TodoStore};

#[derive(Default)]
struct State {
    last_id: i32,
    todos: Vec<Todo>,
}

/// In-process `TodoStore` injected by the handler tests. Ids are never reused,
/// like a `SERIAL` column.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TodoStore for MemoryStore {
    fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.state().todos.clone())
    }

    fn create(&self, new_todo: NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError> {
        let mut state = self.state();
        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            todo: new_todo.todo,
            title: new_todo.title,
            completed: new_todo.completed,
            created_at: now,
            updated_at: now,
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    fn update(&self, changes: TodoChanges, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError> {
        let mut state = self.state();
        let Some(existing) = state.todos.iter_mut().find(|t| t.id == changes.id) else {
            return Ok(None);
        };
        existing.todo = changes.todo;
        existing.title = changes.title;
        existing.completed = changes.completed;
        existing.updated_at = now;
        Ok(Some(existing.clone()))
    }

    fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut state = self.state();
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        Ok(state.todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            todo: String::new(),
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let first = store.create(new_todo("a"), now).unwrap();
        assert!(store.delete(first.id).unwrap());
        let second = store.create(new_todo("b"), now).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn update_keeps_created_at() {
        let store = MemoryStore::new();
        let created = store.create(new_todo("a"), Utc::now()).unwrap();
        let later = created.created_at + chrono::Duration::seconds(1);
        let changes = TodoChanges {
            id: created.id,
            todo: "x".to_string(),
            title: "a".to_string(),
            completed: true,
        };
        let updated = store.update(changes, later).unwrap().unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(store.list().unwrap(), vec![updated]);
    }
}
