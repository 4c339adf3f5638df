//! Route handlers: request parsing, validation, and response shaping.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::model::{timestamp, Category, CategoryChanges, NewTodo, Todo, TodoChanges};
use crate::query::TodoQuery;
use crate::store::Store;
use crate::Db;

const TODO_NOT_FOUND: &str = "Todo not found";
const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Body of `POST /todos`. Every field is optional here so that missing
/// values surface as 400s with a specific message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub due_date: Option<String>,
}

/// Body of `PATCH /todos/{id}`. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `POST /categories` and `PATCH /categories/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

fn required_text(value: Option<&str>, message: &str) -> Result<String, HttpError> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HttpError::bad_request(message))
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, HttpError> {
    timestamp::parse(raw).ok_or_else(|| HttpError::bad_request("Valid due date is required"))
}

fn existing_category(store: &dyn Store, id: &str) -> Result<(), HttpError> {
    match store.get_category(id) {
        Some(_) => Ok(()),
        None => Err(HttpError::bad_request(CATEGORY_NOT_FOUND)),
    }
}

impl CreateTodo {
    fn validate(self, store: &dyn Store) -> Result<NewTodo, HttpError> {
        let title = required_text(self.title.as_deref(), "Todo title is required")?;
        let category_id = required_text(self.category_id.as_deref(), "Category ID is required")?;
        let due_date = parse_due_date(self.due_date.as_deref().unwrap_or_default())?;
        existing_category(store, &category_id)?;
        Ok(NewTodo {
            title,
            description: self.description.as_deref().map(str::trim).unwrap_or_default().to_string(),
            category_id,
            due_date,
        })
    }
}

impl UpdateTodo {
    fn validate(self, store: &dyn Store) -> Result<TodoChanges, HttpError> {
        let title = match self.title.as_deref() {
            Some(title) => Some(required_text(Some(title), "Todo title is required")?),
            None => None,
        };
        let category_id = match self.category_id.as_deref() {
            Some(id) => {
                let id = required_text(Some(id), "Category ID is required")?;
                existing_category(store, &id)?;
                Some(id)
            }
            None => None,
        };
        let due_date = self.due_date.as_deref().map(parse_due_date).transpose()?;
        Ok(TodoChanges {
            title,
            description: self.description.map(|description| description.trim().to_string()),
            category_id,
            due_date,
            completed: self.completed,
        })
    }
}

#[tracing::instrument(skip(db))]
pub async fn list_todos(
    State(db): State<Db>,
    query: Result<Query<TodoQuery>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, HttpError> {
    let Query(query) = query?;
    let todos = db.read().await.list_todos();
    Ok(Json(query.apply(todos)))
}

#[tracing::instrument(skip(db))]
pub async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Todo>, HttpError> {
    db.read()
        .await
        .get_todo(&id)
        .map(Json)
        .ok_or_else(|| HttpError::not_found(TODO_NOT_FOUND))
}

#[tracing::instrument(skip(db, payload))]
pub async fn create_todo(
    State(db): State<Db>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), HttpError> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    let new_todo = input.validate(&**store)?;
    let todo = store.create_todo(new_todo);
    tracing::info!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

#[tracing::instrument(skip(db, payload))]
pub async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, HttpError> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    if store.get_todo(&id).is_none() {
        return Err(HttpError::not_found(TODO_NOT_FOUND));
    }
    let changes = input.validate(&**store)?;
    store
        .update_todo(&id, changes)
        .map(Json)
        .ok_or_else(|| HttpError::not_found(TODO_NOT_FOUND))
}

#[tracing::instrument(skip(db))]
pub async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    if db.write().await.delete_todo(&id) {
        tracing::info!(%id, "todo deleted");
    }
    StatusCode::NO_CONTENT
}

#[tracing::instrument(skip(db))]
pub async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    Json(db.read().await.list_categories())
}

#[tracing::instrument(skip(db))]
pub async fn get_category(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Category>, HttpError> {
    db.read()
        .await
        .get_category(&id)
        .map(Json)
        .ok_or_else(|| HttpError::not_found(CATEGORY_NOT_FOUND))
}

#[tracing::instrument(skip(db, payload))]
pub async fn create_category(
    State(db): State<Db>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), HttpError> {
    let Json(input) = payload?;
    let name = required_text(input.name.as_deref(), "Category name is required")?;
    let category = db.write().await.create_category(name);
    tracing::info!(id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[tracing::instrument(skip(db, payload))]
pub async fn update_category(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<Json<Category>, HttpError> {
    let Json(input) = payload?;
    let name = match input.name.as_deref() {
        Some(name) => Some(required_text(Some(name), "Category name is required")?),
        None => None,
    };
    db.write()
        .await
        .update_category(&id, CategoryChanges { name })
        .map(Json)
        .ok_or_else(|| HttpError::not_found(CATEGORY_NOT_FOUND))
}

#[tracing::instrument(skip(db))]
pub async fn delete_category(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    if db.write().await.delete_category(&id) {
        tracing::info!(%id, "category deleted with its todos");
    }
    StatusCode::NO_CONTENT
}

#[tracing::instrument]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "OK".to_string(),
    })
}

pub async fn route_not_found() -> HttpError {
    HttpError::not_found("Route not found")
}

pub async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed
}
