use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use super::classify::classify_text;
use crate::api::assets::PageAssets;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub email_body: String,
}

/// What to show under the form after a submission.
#[derive(Debug)]
struct Outcome {
    class: &'static str,
    message: String,
}

impl Outcome {
    fn verdict(message: String) -> Self {
        Self { class: "success", message }
    }

    fn prompt(message: String) -> Self {
        Self { class: "prompt", message }
    }

    fn failure(message: String) -> Self {
        Self { class: "error", message }
    }
}

/// `templates/index.html`; text fields are HTML-escaped, inlined assets are not.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    stylesheet: Option<&'a str>,
    script: Option<&'a str>,
    email_body: &'a str,
    outcome: Option<Outcome>,
}

/// GET / — empty form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(render_page(&state.assets, "", None)?))
}

/// POST / — classify the submitted body and echo it back into the text area.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let (status, outcome) = match classify_text(&state, &form.email_body) {
        Ok(prediction) => (StatusCode::OK, Outcome::verdict(prediction.message())),
        Err(AppError::EmptyInput) => (StatusCode::OK, Outcome::prompt(AppError::EmptyInput.user_message())),
        Err(e) => (e.status(), Outcome::failure(e.user_message())),
    };

    let html = render_page(&state.assets, &form.email_body, Some(outcome))?;
    Ok((status, Html(html)))
}

fn render_page(
    assets: &PageAssets,
    email_body: &str,
    outcome: Option<Outcome>,
) -> Result<String, askama::Error> {
    IndexPage {
        stylesheet: assets.stylesheet.as_deref(),
        script: assets.script.as_deref(),
        email_body,
        outcome,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inlines_assets() {
        let assets = PageAssets {
            stylesheet: Some("body > p { color: red }".into()),
            script: Some("console.log(\"ready\")".into()),
        };
        let html = render_page(&assets, "", None).unwrap();
        assert!(html.contains("<style>body > p { color: red }</style>"));
        assert!(html.contains(r#"<script>console.log("ready")</script>"#));
        assert!(!html.contains(r#"class="result"#));
    }

    #[test]
    fn test_render_escapes_body_and_outcome() {
        let outcome = Outcome::failure("An error occurred: <boom>".into());
        let html = render_page(&PageAssets::default(), "hi <there> & you", Some(outcome)).unwrap();
        assert!(html.contains("hi &lt;there&gt; &amp; you</textarea>"));
        assert!(html.contains(r#"<div class="result error">An error occurred: &lt;boom&gt;</div>"#));
        assert!(!html.contains("<there>"));
    }

    #[test]
    fn test_render_keeps_leading_newline_of_body() {
        // the parser drops one newline right after <textarea>, the template supplies it
        let html = render_page(&PageAssets::default(), "\nDear customer", None).unwrap();
        assert!(html.contains("rows=\"10\">\n\nDear customer</textarea>"));
    }
}
