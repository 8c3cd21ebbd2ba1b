use chrono::prelude::*;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError};
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::models::todo::{NewTodo, Todo, TodoChanges};
use crate::repository::schema::todos;

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

/// Persistence seam for the todo handlers. Every call is one statement.
pub trait TodoStore: Send + Sync {
    fn ping(&self) -> Result<(), StoreError>;

    /// All rows, by ascending `id`.
    fn list(&self) -> Result<Vec<Todo>, StoreError>;

    fn create(&self, new_todo: NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError>;

    /// `None` when no row has `changes.id`.
    fn update(&self, changes: TodoChanges, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError>;

    /// `false` when no row has `id`.
    fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

#[derive(Insertable)]
#[diesel(table_name = todos)]
struct InsertTodo<'a> {
    todo: &'a str,
    title: &'a str,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// `created_at` is left out so an update can never touch it.
#[derive(AsChangeset)]
#[diesel(table_name = todos)]
struct TodoChangeset<'a> {
    todo: &'a str,
    title: &'a str,
    completed: bool,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Builds the pool and checks the database answers before returning.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)?;
        let database = Database { pool };
        database.ping()?;
        tracing::info!(pool_size = config.pool_size, "connected to database");
        Ok(database)
    }
}

impl TodoStore for Database {
    fn ping(&self) -> Result<(), StoreError> {
        diesel::sql_query("SELECT 1").execute(&mut self.pool.get()?)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = todos::table
            .order(todos::id.asc())
            .select(Todo::as_select())
            .load(&mut self.pool.get()?)?;
        Ok(rows)
    }

    fn create(&self, new_todo: NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError> {
        let row = InsertTodo {
            todo: &new_todo.todo,
            title: &new_todo.title,
            completed: new_todo.completed,
            created_at: now,
            updated_at: now,
        };
        let todo = diesel::insert_into(todos::table)
            .values(&row)
            .returning(Todo::as_returning())
            .get_result(&mut self.pool.get()?)?;
        Ok(todo)
    }

    fn update(&self, changes: TodoChanges, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError> {
        let changeset = TodoChangeset {
            todo: &changes.todo,
            title: &changes.title,
            completed: changes.completed,
            updated_at: now,
        };
        let todo = diesel::update(todos::table.find(changes.id))
            .set(&changeset)
            .returning(Todo::as_returning())
            .get_result(&mut self.pool.get()?)
            .optional()?;
        Ok(todo)
    }

    fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let count = diesel::delete(todos::table.find(id)).execute(&mut self.pool.get()?)?;
        Ok(count > 0)
    }
}
