use super::escape_html;
use crate::core::todo::TodoStore;
use crate::domain::model::TodoItem;
use crate::domain::ports::Storage;
use crate::utils::error::{ErrorCategory, Result};
use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>To-Do List</title>
<style>
body { font-family: system-ui, sans-serif; background: #f3f4f6; color: #111827; display: flex; justify-content: center; min-height: 100vh; margin: 0; align-items: center; }
.container { background: #fff; padding: 24px 28px; border-radius: 12px; box-shadow: 0 10px 25px rgba(15, 23, 42, 0.12); width: 100%; max-width: 480px; }
form.add-form { display: flex; gap: 8px; margin-bottom: 16px; }
input[type="text"] { flex: 1; padding: 8px 10px; border-radius: 8px; border: 1px solid #d1d5db; }
button { border: none; border-radius: 8px; padding: 8px 12px; cursor: pointer; }
button.primary { background: #2563eb; color: white; }
ul { list-style: none; padding: 0; margin: 0; }
li { display: flex; justify-content: space-between; align-items: center; padding: 8px 0; border-bottom: 1px solid #e5e7eb; }
li.done span { text-decoration: line-through; color: #6b7280; }
.delete-btn { background: transparent; color: #ef4444; }
.empty { text-align: center; color: #6b7280; }
small { display: block; margin-top: 10px; color: #9ca3af; text-align: right; }
</style>
</head>
<body>
<div class="container">
<h1>To-Do List ✅</h1>
<form class="add-form" method="post" action="/add">
<input type="text" name="task" placeholder="Add a new task..." autocomplete="off" required />
<button class="primary" type="submit">Add</button>
</form>
"#;

#[derive(Debug, Deserialize)]
pub struct AddTask {
    #[serde(default)]
    pub task: String,
}

pub fn router<S: Storage + 'static>(store: TodoStore<S>) -> Router {
    Router::new()
        .route("/", get(index::<S>))
        .route("/add", post(add::<S>))
        .route("/delete/{index}", post(delete::<S>))
        .with_state(Arc::new(store))
}

pub fn render_page(todos: &[String], path: &std::path::Path) -> String {
    let mut html = String::from(PAGE_HEAD);
    if todos.is_empty() {
        html.push_str("<div class=\"empty\">No tasks yet ✨</div>\n");
    } else {
        html.push_str("<ul>\n");
        for (i, line) in todos.iter().enumerate() {
            let item = TodoItem::parse(line);
            html.push_str(&format!(
                "<li class=\"{}\"><span>{}. {}</span>\
                 <form method=\"post\" action=\"/delete/{}\" style=\"margin: 0\">\
                 <button class=\"delete-btn\" type=\"submit\" title=\"Delete task\">✕</button></form></li>\n",
                if item.done { "done" } else { "open" },
                i + 1,
                escape_html(&item.text),
                i
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(&format!(
        "<small>Stored in {} and shared with the CLI.</small>\n</div>\n</body>\n</html>\n",
        escape_html(&path.display().to_string())
    ));
    html
}

async fn index<S: Storage>(State(store): State<Arc<TodoStore<S>>>) -> Result<Html<String>> {
    let todos = store.load()?;
    Ok(Html(render_page(&todos, store.path())))
}

/// Rejected input (blank or duplicate) is dropped and the list shown unchanged.
async fn add<S: Storage>(
    State(store): State<Arc<TodoStore<S>>>,
    Form(form): Form<AddTask>,
) -> Result<Redirect> {
    match store.add_task(&form.task) {
        Ok(text) => tracing::info!("Added task '{}'", text),
        Err(e) if e.category() == ErrorCategory::Input => {
            tracing::debug!("Ignoring task '{}': {}", form.task, e)
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to("/"))
}

/// Out-of-range indices are ignored.
async fn delete<S: Storage>(
    State(store): State<Arc<TodoStore<S>>>,
    Path(index): Path<i64>,
) -> Result<Redirect> {
    match store.delete_task(index) {
        Ok(line) => tracing::info!("Deleted task '{}'", line),
        Err(e) if e.category() == ErrorCategory::Input => {
            tracing::debug!("Ignoring delete of {}: {}", index, e)
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to("/"))
}
