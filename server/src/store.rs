//! Storage for todos and categories.
//!
//! # Design
//! Handlers talk to a `Store` trait object so a persistent backend can replace
//! `MemoryStore` without touching routing code. The store does no validation:
//! handlers check input and category references before calling it.

use crate::model::{now, Category, CategoryChanges, NewTodo, Todo, TodoChanges};

pub trait Store: Send + Sync {
    fn list_todos(&self) -> Vec<Todo>;
    fn get_todo(&self, id: &str) -> Option<Todo>;
    fn create_todo(&mut self, input: NewTodo) -> Todo;
    fn update_todo(&mut self, id: &str, changes: TodoChanges) -> Option<Todo>;
    fn delete_todo(&mut self, id: &str) -> bool;

    fn list_categories(&self) -> Vec<Category>;
    fn get_category(&self, id: &str) -> Option<Category>;
    fn create_category(&mut self, name: String) -> Category;
    fn update_category(&mut self, id: &str, changes: CategoryChanges) -> Option<Category>;
    /// Removes the category and every todo that references it.
    fn delete_category(&mut self, id: &str) -> bool;
}

/// Process-lifetime store backed by insertion-ordered vectors.
///
/// Ids come from per-collection counters that only grow, so a deleted id is
/// never handed out again.
#[derive(Debug)]
pub struct MemoryStore {
    todos: Vec<Todo>,
    categories: Vec<Category>,
    next_todo_id: u64,
    next_category_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            categories: Vec::new(),
            next_todo_id: 1,
            next_category_id: 1,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn list_todos(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    fn get_todo(&self, id: &str) -> Option<Todo> {
        self.todos.iter().find(|todo| todo.id == id).cloned()
    }

    fn create_todo(&mut self, input: NewTodo) -> Todo {
        let id = self.next_todo_id.to_string();
        self.next_todo_id += 1;
        let at = now();
        let todo = Todo {
            id,
            title: input.title,
            description: input.description,
            category_id: input.category_id,
            due_date: input.due_date,
            completed: false,
            created_at: at,
            updated_at: at,
        };
        self.todos.push(todo.clone());
        todo
    }

    fn update_todo(&mut self, id: &str, changes: TodoChanges) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|todo| todo.id == id)?;
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(category_id) = changes.category_id {
            todo.category_id = category_id;
        }
        if let Some(due_date) = changes.due_date {
            todo.due_date = due_date;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at = now();
        Some(todo.clone())
    }

    fn delete_todo(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        self.todos.len() != before
    }

    fn list_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn get_category(&self, id: &str) -> Option<Category> {
        self.categories.iter().find(|category| category.id == id).cloned()
    }

    fn create_category(&mut self, name: String) -> Category {
        let id = self.next_category_id.to_string();
        self.next_category_id += 1;
        let at = now();
        let category = Category {
            id,
            name,
            created_at: at,
            updated_at: at,
        };
        self.categories.push(category.clone());
        category
    }

    fn update_category(&mut self, id: &str, changes: CategoryChanges) -> Option<Category> {
        let category = self.categories.iter_mut().find(|category| category.id == id)?;
        if let Some(name) = changes.name {
            category.name = name;
        }
        category.updated_at = now();
        Some(category.clone())
    }

    fn delete_category(&mut self, id: &str) -> bool {
        let Some(index) = self.categories.iter().position(|category| category.id == id) else {
            return false;
        };
        self.todos.retain(|todo| todo.category_id != id);
        self.categories.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::timestamp;

    fn new_todo(title: &str, category_id: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: String::new(),
            category_id: category_id.to_string(),
            due_date: timestamp::parse("2025-01-01").unwrap(),
        }
    }

    #[test]
    fn ids_are_sequential_per_collection() {
        let mut store = MemoryStore::new();
        let work = store.create_category("Work".to_string());
        let home = store.create_category("Home".to_string());
        let first = store.create_todo(new_todo("a", &work.id));
        assert_eq!(work.id, "1");
        assert_eq!(home.id, "2");
        assert_eq!(first.id, "1");
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = MemoryStore::new();
        let category = store.create_category("Work".to_string());
        let first = store.create_todo(new_todo("a", &category.id));
        assert!(store.delete_todo(&first.id));
        let second = store.create_todo(new_todo("b", &category.id));
        assert_eq!(second.id, "2");
    }

    #[test]
    fn create_then_get_returns_equal_record() {
        let mut store = MemoryStore::new();
        let category = store.create_category("Work".to_string());
        let created = store.create_todo(new_todo("Ship spec", &category.id));
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.get_todo(&created.id), Some(created));
    }

    #[test]
    fn update_only_touches_provided_fields() {
        let mut store = MemoryStore::new();
        let category = store.create_category("Work".to_string());
        let created = store.create_todo(new_todo("Ship spec", &category.id));

        let updated = store
            .update_todo(
                &created.id,
                TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.due_date, created.due_date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_missing_todo_is_noop() {
        let mut store = MemoryStore::new();
        let result = store.update_todo(
            "42",
            TodoChanges {
                title: Some("ghost".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_none());
        assert!(store.list_todos().is_empty());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let mut store = MemoryStore::new();
        let category = store.create_category("Work".to_string());
        let todo = store.create_todo(new_todo("a", &category.id));
        assert!(store.delete_todo(&todo.id));
        assert!(!store.delete_todo(&todo.id));
        assert!(!store.delete_category("99"));
    }

    #[test]
    fn delete_category_cascades_to_its_todos_only() {
        let mut store = MemoryStore::new();
        let work = store.create_category("Work".to_string());
        let home = store.create_category("Home".to_string());
        let a = store.create_todo(new_todo("a", &work.id));
        let b = store.create_todo(new_todo("b", &home.id));
        let c = store.create_todo(new_todo("c", &work.id));

        assert!(store.delete_category(&work.id));

        assert!(store.get_category(&work.id).is_none());
        assert!(store.get_todo(&a.id).is_none());
        assert!(store.get_todo(&c.id).is_none());
        assert_eq!(store.list_todos(), vec![b]);
        assert_eq!(store.list_categories(), vec![home]);
    }

    #[test]
    fn lists_keep_insertion_order_and_allow_duplicates() {
        let mut store = MemoryStore::new();
        store.create_category("Work".to_string());
        store.create_category("Work".to_string());
        store.create_todo(new_todo("same", "1"));
        store.create_todo(new_todo("same", "2"));

        let names: Vec<_> = store.list_categories().into_iter().map(|c| c.id).collect();
        assert_eq!(names, vec!["1", "2"]);
        let todo_categories: Vec<_> = store.list_todos().into_iter().map(|t| t.category_id).collect();
        assert_eq!(todo_categories, vec!["1", "2"]);
    }

    #[test]
    fn update_category_renames() {
        let mut store = MemoryStore::new();
        let category = store.create_category("Work".to_string());
        let renamed = store
            .update_category(
                &category.id,
                CategoryChanges {
                    name: Some("Office".to_string()),
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Office");
        assert_eq!(renamed.created_at, category.created_at);
        assert!(store.update_category("9", CategoryChanges::default()).is_none());
    }
}
