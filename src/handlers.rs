use crate::models::PageQuery;
use crate::state::AppState;
use crate::ui::render_page;
use crate::widget::CalendarWidget;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let username = query
        .user
        .filter(|user| !user.trim().is_empty())
        .unwrap_or_else(|| state.widget.username.clone());
    Html(render_page(
        &username,
        state.widget.week_start,
        state.clock.today(),
    ))
}

/// Calendar fragment for `username`. Failures are part of the fragment, so
/// this always answers 200.
pub async fn widget(State(state): State<AppState>, Path(username): Path<String>) -> Html<String> {
    let widget = CalendarWidget::new(
        state.widget.clone(),
        state.http.clone(),
        state.clock.clone(),
    );
    Html(widget.render(&username).await)
}
