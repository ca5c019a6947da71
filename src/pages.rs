//! HTML rendering for the browser page.

use minijinja::{Environment, context};

use crate::store::Snapshot;

const INDEX: &str = "index.html";

/// How often the page polls `/stream`.
const POLL_INTERVAL_MS: u64 = 2000;

/// Embedded templates. Values are HTML-escaped (`.html` names auto-escape).
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render_index(&self, snapshot: &Snapshot) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {
            question => &snapshot.question,
            answer => &snapshot.answer,
            poll_ms => POLL_INTERVAL_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_current_pair() {
        let pages = Pages::new().unwrap();
        let html = pages
            .render_index(&Snapshot::new("Hello", "Hi there"))
            .unwrap();
        assert!(html.contains(r#"<div id="question" class="box">Hello</div>"#));
        assert!(html.contains(r#"<div id="answer" class="box">Hi there</div>"#));
        assert!(html.contains("setInterval(refresh, 2000)"));
    }

    #[test]
    fn send_failure_restores_from_stream() {
        let pages = Pages::new().unwrap();
        let html = pages.render_index(&Snapshot::default()).unwrap();
        assert!(html.contains("if (resp.ok)"));
        assert!(html.contains("} catch (_) {}\n      refresh();"));
    }

    #[test]
    fn escapes_markup() {
        let pages = Pages::new().unwrap();
        let html = pages
            .render_index(&Snapshot::new("<script>alert(1)</script>", "a & b"))
            .unwrap();
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("a &amp; b"));
    }
}
