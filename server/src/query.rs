//! Filtering and ordering for `GET /todos`.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::model::Todo;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    DueDate,
    CreatedAt,
}

/// Query string of the list endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    #[serde(default, deserialize_with = "status_or_all")]
    pub status: StatusFilter,
    pub category_id: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "sort_key_or_none")]
    pub sort_by: Option<SortKey>,
}

/// Only `pending` and `completed` narrow the list; any other value means all.
fn status_or_all<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusFilter, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        Some("pending") => StatusFilter::Pending,
        Some("completed") => StatusFilter::Completed,
        _ => StatusFilter::All,
    })
}

/// An empty `sortBy` counts as absent; an unknown key is rejected.
fn sort_key_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SortKey>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("dueDate") => Ok(Some(SortKey::DueDate)),
        Some("createdAt") => Ok(Some(SortKey::CreatedAt)),
        Some(other) => Err(de::Error::unknown_variant(other, &["dueDate", "createdAt"])),
    }
}

impl TodoQuery {
    /// Applies status, category, search and sort in that order.
    pub fn apply(&self, mut todos: Vec<Todo>) -> Vec<Todo> {
        todos.retain(|todo| self.status.matches(todo));

        if let Some(category_id) = self.category_id.as_deref().filter(|id| !id.is_empty()) {
            todos.retain(|todo| todo.category_id == category_id);
        }

        let term = self
            .search
            .as_deref()
            .map(|search| search.trim().to_lowercase())
            .filter(|term| !term.is_empty());
        if let Some(term) = term {
            todos.retain(|todo| {
                todo.title.to_lowercase().contains(&term)
                    || todo.description.to_lowercase().contains(&term)
            });
        }

        // sort_by_key is stable: ties keep insertion order.
        match self.sort_by {
            Some(SortKey::DueDate) => todos.sort_by_key(|todo| todo.due_date),
            Some(SortKey::CreatedAt) => todos.sort_by_key(|todo| todo.created_at),
            None => {}
        }
        todos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::timestamp;

    fn todo(id: &str, title: &str, description: &str, category_id: &str, due: &str, completed: bool) -> Todo {
        let at = timestamp::parse("2024-06-01").unwrap();
        Todo {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category_id: category_id.to_string(),
            due_date: timestamp::parse(due).unwrap(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    fn fixture() -> Vec<Todo> {
        vec![
            todo("1", "Write report", "quarterly numbers", "1", "2025-03-01", false),
            todo("2", "Buy milk", "", "2", "2025-01-15", true),
            todo("3", "Call mom", "about the REPORT", "2", "2025-01-15", false),
            todo("4", "Fix bike", "", "1", "2024-12-31", true),
        ]
    }

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|todo| todo.id.as_str()).collect()
    }

    #[test]
    fn default_query_returns_everything_in_insertion_order() {
        let result = TodoQuery::default().apply(fixture());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn status_filters() {
        let pending = TodoQuery {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        let completed = TodoQuery {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        assert_eq!(ids(&pending.apply(fixture())), vec!["1", "3"]);
        assert_eq!(ids(&completed.apply(fixture())), vec!["2", "4"]);
    }

    #[test]
    fn category_filter_is_exact_and_ignores_empty_value() {
        let by_category = TodoQuery {
            category_id: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_category.apply(fixture())), vec!["2", "3"]);

        let empty = TodoQuery {
            category_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.apply(fixture()).len(), 4);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let query = TodoQuery {
            search: Some("  Report ".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(fixture())), vec!["1", "3"]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = TodoQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(fixture()).len(), 4);
    }

    #[test]
    fn sort_by_due_date_is_stable() {
        let query = TodoQuery {
            sort_by: Some(SortKey::DueDate),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(fixture())), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn sort_by_created_at_keeps_ties_in_insertion_order() {
        let query = TodoQuery {
            sort_by: Some(SortKey::CreatedAt),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(fixture())), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn filters_compose_before_sort() {
        let query = TodoQuery {
            status: StatusFilter::Pending,
            category_id: Some("2".to_string()),
            search: Some("mom".to_string()),
            sort_by: Some(SortKey::DueDate),
        };
        assert_eq!(ids(&query.apply(fixture())), vec!["3"]);
    }

    #[test]
    fn empty_and_unknown_status_mean_all() {
        for raw in [r#"{"status":""}"#, r#"{"status":"ALL"}"#, r#"{"status":"someday"}"#] {
            let query: TodoQuery = serde_json::from_str(raw).unwrap();
            assert_eq!(query.status, StatusFilter::All, "{raw}");
        }
    }

    #[test]
    fn empty_sort_key_is_ignored_but_unknown_is_rejected() {
        let query: TodoQuery = serde_json::from_str(r#"{"sortBy":""}"#).unwrap();
        assert!(query.sort_by.is_none());
        assert!(serde_json::from_str::<TodoQuery>(r#"{"sortBy":"title"}"#).is_err());
    }

    #[test]
    fn query_string_names_are_camel_case() {
        let query: TodoQuery =
            serde_json::from_str(r#"{"status":"completed","sortBy":"createdAt","categoryId":"7"}"#).unwrap();
        assert_eq!(query.status, StatusFilter::Completed);
        assert_eq!(query.sort_by, Some(SortKey::CreatedAt));
        assert_eq!(query.category_id.as_deref(), Some("7"));
    }
}
