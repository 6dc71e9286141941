//! # Page Templates
//!
//! Handlebars templates compiled into the binary and registered once at
//! startup. `{{...}}` output is HTML-escaped by handlebars.

use crate::error::AppResult;
use axum::response::Html;
use handlebars::Handlebars;
use serde_json::Value;

const LAYOUT: &str = include_str!("../templates/layout.hbs");

const PAGES: [(&str, &str); 6] = [
    ("home", include_str!("../templates/home.hbs")),
    ("login", include_str!("../templates/login.hbs")),
    ("register", include_str!("../templates/register.hbs")),
    ("confirm", include_str!("../templates/confirm.hbs")),
    ("dashboard", include_str!("../templates/dashboard.hbs")),
    ("account", include_str!("../templates/account.hbs")),
];

/// Registry of page templates
pub struct Pages {
    handlebars: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> AppResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("layout", LAYOUT)?;
        for (name, source) in PAGES {
            handlebars.register_template_string(name, source)?;
        }
        Ok(Self { handlebars })
    }

    /// Render page `name`. `data` must carry the page `title`.
    pub fn render(&self, name: &str, data: &Value) -> AppResult<Html<String>> {
        Ok(Html(self.handlebars.render(name, data)?))
    }
}
