use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

const WRONG_PASSWORD: &str = "Please enter the correct password to proceed.";

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SummarizeForm>,
) -> impl IntoResponse {
    if !state.password_matches(&form.password) {
        return (StatusCode::UNAUTHORIZED, WRONG_PASSWORD).into_response();
    }

    info!(ticker = %form.ticker, "summarize request");
    let summary = state
        .summarizer
        .summarize_stock_news(
            &form.ticker,
            non_empty(form.start_date.as_deref()),
            non_empty(form.end_date.as_deref()),
        )
        .await;

    Json(SummarizeResponse { summary }).into_response()
}

/// Browsers submit blank date inputs as empty strings; treat those as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Stock News Summarizer</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
  label { display: block; margin-top: 0.75rem; }
  input { width: 100%; padding: 0.4rem; }
  button { margin-top: 1rem; padding: 0.5rem 1rem; }
  #summary { white-space: pre-wrap; margin-top: 1.5rem; }
</style>
</head>
<body>
<h1>Stock News Summarizer</h1>
<form id="form">
  <label>Password <input type="password" name="password" required></label>
  <label>Stock Ticker <input type="text" name="ticker" value="NVDA" required></label>
  <label>Start Date <input type="date" name="start_date"></label>
  <label>End Date <input type="date" name="end_date"></label>
  <button type="submit">Summarize</button>
</form>
<div id="summary"></div>
<button id="copy" hidden>Copy to Clipboard</button>
<script>
const form = document.getElementById('form');
const summary = document.getElementById('summary');
const copy = document.getElementById('copy');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  summary.textContent = 'Working...';
  copy.hidden = true;
  const response = await fetch('/api/summarize', {
    method: 'POST',
    headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
    body: new URLSearchParams(new FormData(form)),
  });
  if (!response.ok) {
    summary.textContent = await response.text();
    return;
  }
  const data = await response.json();
  summary.textContent = data.summary;
  copy.hidden = false;
});
copy.addEventListener('click', async () => {
  const text = summary.textContent;
  if (navigator.clipboard) {
    await navigator.clipboard.writeText(text);
  } else {
    const area = document.createElement('textarea');
    area.value = text;
    document.body.appendChild(area);
    area.select();
    document.execCommand('copy');
    document.body.removeChild(area);
  }
  alert('Copied to clipboard!');
});
</script>
</body>
</html>
"#;
