//! Client-side mirror of server state.
//!
//! `Board` holds what a frontend shows: the current filters, the selected
//! category, and the last fetched todos and categories. It never talks to the
//! network; callers feed it the results of `TodoClient` round-trips.

use crate::error::ApiError;
use crate::types::{Category, ListTodosParams, SortKey, StatusFilter, Todo};

#[derive(Debug, Clone, Default)]
pub struct Board {
    pub todos: Vec<Todo>,
    pub categories: Vec<Category>,
    pub status_filter: StatusFilter,
    pub sort_by: SortKey,
    pub search_term: String,
    pub selected_category_id: Option<String>,
    /// Message of the last failed request, cleared by the next successful load.
    pub error: Option<String>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.status_filter = status;
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn select_category(&mut self, id: Option<&str>) {
        self.selected_category_id = id.map(str::to_string);
    }

    /// Query for reloading todos under the current filters.
    pub fn list_params(&self) -> ListTodosParams {
        let search = self.search_term.trim();
        ListTodosParams {
            status: Some(self.status_filter),
            sort_by: Some(self.sort_by),
            category_id: self.selected_category_id.clone(),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn todos_loaded(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.error = None;
    }

    pub fn todo_added(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Replaces the matching todo in place; unknown ids are ignored.
    pub fn todo_updated(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    pub fn todo_deleted(&mut self, id: &str) {
        self.todos.retain(|todo| todo.id != id);
    }

    pub fn categories_loaded(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.error = None;
    }

    pub fn category_added(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn category_updated(&mut self, category: Category) {
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == category.id) {
            *slot = category;
        }
    }

    /// Mirrors the server-side cascade: the category, its todos, and the
    /// selection if it pointed at it.
    pub fn category_deleted(&mut self, id: &str) {
        self.categories.retain(|category| category.id != id);
        self.todos.retain(|todo| todo.category_id != id);
        if self.selected_category_id.as_deref() == Some(id) {
            self.selected_category_id = None;
        }
    }

    pub fn failed(&mut self, error: &ApiError) {
        self.error = Some(error.to_string());
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }
}
