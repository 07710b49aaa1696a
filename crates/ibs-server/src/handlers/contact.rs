//! Contact form routes.
//!
//! A valid submission is logged and confirmed; nothing is stored or sent.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use ibs_site::{ContactForm, ContactState};

use crate::handlers::serve_page;
use crate::state::AppState;

pub(crate) async fn show(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/contact".to_owned(), &[], |site| {
        site.contact(&ContactState::Blank)
    })
    .await
}

/// Handle POST /contact.
///
/// An invalid form is answered with the page again, showing the entered
/// values and a message per failing field.
pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Response {
    let contact = match form.validate() {
        Ok(()) => {
            tracing::info!(
                name = %form.name.trim(),
                email = %form.email.trim(),
                subject = %form.subject.trim(),
                "Contact form submitted"
            );
            ContactState::Submitted
        }
        Err(errors) => ContactState::Invalid(form, errors),
    };
    serve_page(state, &headers, "/contact".to_owned(), &[], move |site| {
        site.contact(&contact)
    })
    .await
}
