//! HTML rendering from templates embedded in the binary.
//!
//! Templates live in `backend/templates` and use `{{key}}` placeholders.
//! Values added with `Context::text` are HTML-escaped; `Context::html` is for
//! fragments that were rendered from templates already. Unknown placeholders
//! render as nothing.

use crate::services::views::flash::{self, Flash};
use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::error;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}"));

const LAYOUT: &str = "layout.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {0} not found")]
    Missing(String),

    #[error("template {0} is not valid UTF-8")]
    Encoding(String),

    #[error("invalid placeholder pattern: {0}")]
    Pattern(regex::Error),
}

/// Values substituted into a template.
#[derive(Debug, Default)]
pub struct Context {
    values: HashMap<&'static str, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds plain text. It is escaped on insertion.
    pub fn text(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        self.values.insert(key, escape(value.as_ref()));
        self
    }

    /// Adds an already rendered HTML fragment.
    pub fn html(mut self, key: &'static str, value: String) -> Self {
        self.values.insert(key, value);
        self
    }
}

/// Escapes the characters HTML treats specially.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the embedded template `name` with `ctx`.
pub fn render(name: &str, ctx: &Context) -> Result<String, RenderError> {
    let file = TEMPLATES
        .get_file(name)
        .ok_or_else(|| RenderError::Missing(name.to_string()))?;
    let source = file
        .contents_utf8()
        .ok_or_else(|| RenderError::Encoding(name.to_string()))?;

    let re = PLACEHOLDER
        .as_ref()
        .map_err(|e| RenderError::Pattern(e.clone()))?;
    let rendered = re.replace_all(source, |caps: &Captures| {
        ctx.values.get(&caps[1]).cloned().unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

/// Renders each item with the partial `name` and joins the results.
pub fn render_each<T, F>(name: &str, items: &[T], mut ctx_for: F) -> Result<String, RenderError>
where
    F: FnMut(&T) -> Context,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&render(name, &ctx_for(item))?);
    }
    Ok(out)
}

/// Renders a full page: `template` inside the layout, with the pending flash
/// message (if any) shown and then cleared.
pub fn page(req: &HttpRequest, title: &str, template: &str, ctx: Context) -> HttpResponse {
    respond(req, title, template, ctx, None)
}

/// Like `page`, but shows `notice` in place of any pending flash message.
pub fn page_with_notice(
    req: &HttpRequest,
    title: &str,
    template: &str,
    ctx: Context,
    notice: Flash,
) -> HttpResponse {
    respond(req, title, template, ctx, Some(notice))
}

fn respond(
    req: &HttpRequest,
    title: &str,
    template: &str,
    ctx: Context,
    notice: Option<Flash>,
) -> HttpResponse {
    let pending = flash::take(req);
    let shown = notice.or_else(|| pending.clone());

    match render_layout(title, template, ctx, shown.as_ref()) {
        Ok(html) => {
            let mut builder = HttpResponse::Ok();
            builder.content_type("text/html; charset=utf-8");
            if pending.is_some() {
                builder.cookie(flash::removal());
            }
            builder.body(html)
        }
        Err(e) => {
            error!("Failed to render {}: {}", template, e);
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}

fn render_layout(
    title: &str,
    template: &str,
    ctx: Context,
    shown: Option<&Flash>,
) -> Result<String, RenderError> {
    let content = render(template, &ctx)?;
    let flash_html = match shown {
        Some(f) => render(
            "partials/flash.html",
            &Context::new()
                .text("category", f.category.as_str())
                .text("message", &f.message),
        )?,
        None => String::new(),
    };
    render(
        LAYOUT,
        &Context::new()
            .text("title", title)
            .html("flash", flash_html)
            .html("content", content),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_partial_escapes_text() {
        let html = render(
            "partials/university_option.html",
            &Context::new().text("name", "<KPI>").text("selected", ""),
        )
        .unwrap();
        assert!(html.contains("&lt;KPI&gt;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_placeholder_pattern_is_shared() {
        assert!(PLACEHOLDER.is_ok());
        let ctx = Context::new().text("name", "KPI").text("selected", "selected");
        let first = render("partials/university_option.html", &ctx).unwrap();
        let second = render("partials/university_option.html", &ctx).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("KPI"));
    }

    #[test]
    fn test_missing_template() {
        let err = render("nope.html", &Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Missing(_)));
    }

    #[test]
    fn test_layout_contains_title_and_flash() {
        let html = render_layout(
            "Universities",
            "add_university.html",
            Context::new(),
            Some(&Flash::error("Wrong university name.")),
        )
        .unwrap();
        assert!(html.contains("<title>Universities</title>"));
        assert!(html.contains("Wrong university name."));
        assert!(html.contains("flash error"));
    }
}
