//! Embedded page templates.

use minijinja::{Environment, context};
use serde::Serialize;

/// Template sources, compiled into the binary.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("macros.html", include_str!("../templates/macros.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("solutions.html", include_str!("../templates/solutions.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("blog_index.html", include_str!("../templates/blog_index.html")),
    ("blog_post.html", include_str!("../templates/blog_post.html")),
    ("case_studies.html", include_str!("../templates/case_studies.html")),
    ("case_study.html", include_str!("../templates/case_study.html")),
    ("events.html", include_str!("../templates/events.html")),
    ("event.html", include_str!("../templates/event.html")),
    ("awards.html", include_str!("../templates/awards.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Shell values shared by every page.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shell<'a> {
    /// Request path, used for the active navigation entry.
    pub current: &'a str,
    /// Copyright year in the footer.
    pub year: i32,
}

/// Template environment with all pages loaded.
///
/// `.html` templates are auto-escaped; rich text is passed pre-rendered and
/// inserted with `|safe`.
pub(crate) struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub(crate) fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `page` exposed as the `page` variable.
    pub(crate) fn render<S: Serialize>(
        &self,
        name: &str,
        shell: Shell<'_>,
        page: S,
    ) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render(context! {
            current => shell.current,
            year => shell.year,
            page => page,
        })
    }
}
