use chrono::prelude::{DateTime, Utc};
use diesel::{Identifiable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A persisted row of the `todos` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Todo {
    pub id: i32,
    pub todo: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request. Any `id` or timestamps sent along are ignored,
/// and absent fields fall back to empty/false.
#[derive(Deserialize, Debug, Clone)]
pub struct NewTodo {
    #[serde(default)]
    pub todo: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of an update request, `id` selects the row. Fields left out are
/// written as empty/false.
#[derive(Deserialize, Debug, Clone)]
pub struct TodoChanges {
    pub id: i32,
    #[serde(default)]
    pub todo: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct TodoId {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_timestamps_as_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let todo = Todo {
            id: 1,
            todo: "buy milk".to_string(),
            title: "errand".to_string(),
            completed: false,
            created_at: at,
            updated_at: at,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["todo"], "buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-03-01T12:30:00Z");
        assert_eq!(json["updated_at"], json["created_at"]);
    }

    #[test]
    fn new_todo_ignores_server_assigned_fields() {
        let new_todo: NewTodo = serde_json::from_str(
            r#"{"id":42,"todo":"buy milk","title":"errand","completed":true,"created_at":"nonsense"}"#,
        )
        .unwrap();
        assert_eq!(new_todo.todo, "buy milk");
        assert_eq!(new_todo.title, "errand");
        assert!(new_todo.completed);
    }

    #[test]
    fn new_todo_defaults_missing_fields() {
        let new_todo: NewTodo = serde_json::from_str(r#"{"title":"x","completed":false}"#).unwrap();
        assert_eq!(new_todo.todo, "");
        assert_eq!(new_todo.title, "x");
        assert!(!new_todo.completed);
    }

    #[test]
    fn new_todo_still_rejects_wrong_types() {
        let err = serde_json::from_str::<NewTodo>(r#"{"title":5}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn todo_changes_requires_an_id() {
        let err = serde_json::from_str::<TodoChanges>(r#"{"todo":"a","title":"b","completed":false}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn todo_id_ignores_everything_else() {
        let id: TodoId = serde_json::from_str(r#"{"id":7,"title":"whatever"}"#).unwrap();
        assert_eq!(id.id, 7);
    }
}
