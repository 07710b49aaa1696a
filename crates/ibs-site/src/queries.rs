//! GROQ queries issued by the page assemblers.
//!
//! Each function returns a ready-to-run [`Query`] tagged with the content
//! collection it reads.

use chrono::{DateTime, SecondsFormat, Utc};
use ibs_content::Query;

/// Content collection tags.
///
/// Page routes cache under these constants directly; the tag on each
/// [`Query`] only labels its log line. Every query reading a collection
/// must carry that collection's constant so the two stay in step.
pub mod tags {
    pub const BLOG: &str = "blog";
    pub const CASE_STUDIES: &str = "caseStudies";
    pub const EVENTS: &str = "events";
    pub const AWARDS: &str = "awards";
}

const POST_CARD: &str = "{ _id, title, slug, publishDate, author, categories, image }";
const POST_FULL: &str = "{ _id, title, slug, content, publishDate, author, categories, image }";
const RELATED_POST: &str = "{ _id, title, slug, publishDate, image }";

const STUDY_CARD: &str = "{ _id, title, slug, description, client, services, images }";
const STUDY_FULL: &str =
    "{ _id, title, slug, description, content, publishDate, client, industry, services, images }";
const RELATED_STUDY: &str = "{ _id, title, slug, client, images }";

const EVENT_CARD: &str = "{ _id, title, slug, date, location, image }";
const EVENT_FULL: &str =
    "{ _id, title, slug, date, location, description, registrationLink, image }";

const AWARD: &str = "{ _id, title, year, description, image, category }";

/// All blog posts, newest first.
pub fn blog_posts() -> Query {
    Query::new(format!(
        r#"*[_type == "blog"] | order(publishDate desc) {POST_CARD}"#
    ))
    .tag(tags::BLOG)
}

/// The three newest blog posts.
pub fn latest_blog_posts() -> Query {
    Query::new(format!(
        r#"*[_type == "blog"] | order(publishDate desc)[0...3] {POST_CARD}"#
    ))
    .tag(tags::BLOG)
}

/// One blog post with its body.
pub fn blog_post(slug: &str) -> Query {
    Query::new(format!(
        r#"*[_type == "blog" && slug.current == $slug][0] {POST_FULL}"#
    ))
    .param("slug", slug)
    .tag(tags::BLOG)
}

/// Up to three other posts sharing a category, or the three newest other
/// posts when `categories` is empty.
pub fn related_blog_posts(current_id: &str, categories: &[String]) -> Query {
    let filter = if categories.is_empty() {
        r#"_type == "blog" && _id != $currentId"#
    } else {
        r#"_type == "blog" && _id != $currentId && count((categories[])[@ in $categories]) > 0"#
    };
    Query::new(format!(
        "*[{filter}] | order(publishDate desc)[0...3] {RELATED_POST}"
    ))
    .param("currentId", current_id)
    .param("categories", categories.to_vec())
    .tag(tags::BLOG)
}

/// All case studies, most recently created first.
pub fn case_studies() -> Query {
    Query::new(format!(
        r#"*[_type == "caseStudies"] | order(_createdAt desc) {STUDY_CARD}"#
    ))
    .tag(tags::CASE_STUDIES)
}

/// The two most recently created case studies.
pub fn latest_case_studies() -> Query {
    Query::new(format!(
        r#"*[_type == "caseStudies"] | order(_createdAt desc)[0...2] {STUDY_CARD}"#
    ))
    .tag(tags::CASE_STUDIES)
}

/// One case study with its body.
pub fn case_study(slug: &str) -> Query {
    Query::new(format!(
        r#"*[_type == "caseStudies" && slug.current == $slug][0] {STUDY_FULL}"#
    ))
    .param("slug", slug)
    .tag(tags::CASE_STUDIES)
}

/// Up to three other case studies sharing a service, or the three most
/// recent other studies when `services` is empty.
pub fn related_case_studies(current_id: &str, services: &[String]) -> Query {
    let filter = if services.is_empty() {
        r#"_type == "caseStudies" && _id != $currentId"#
    } else {
        r#"_type == "caseStudies" && _id != $currentId && count((services[])[@ in $services]) > 0"#
    };
    Query::new(format!(
        "*[{filter}] | order(_createdAt desc)[0...3] {RELATED_STUDY}"
    ))
    .param("currentId", current_id)
    .param("services", services.to_vec())
    .tag(tags::CASE_STUDIES)
}

/// All events, soonest first.
pub fn events() -> Query {
    Query::new(format!(
        r#"*[_type == "events"] | order(date asc) {EVENT_FULL}"#
    ))
    .tag(tags::EVENTS)
}

/// The next three events starting after `now`.
pub fn upcoming_events(now: DateTime<Utc>) -> Query {
    Query::new(format!(
        r#"*[_type == "events" && date > $now] | order(date asc)[0...3] {EVENT_CARD}"#
    ))
    .param("now", now.to_rfc3339_opts(SecondsFormat::Millis, true))
    .tag(tags::EVENTS)
}

/// One event.
pub fn event(slug: &str) -> Query {
    Query::new(format!(
        r#"*[_type == "events" && slug.current == $slug][0] {EVENT_FULL}"#
    ))
    .param("slug", slug)
    .tag(tags::EVENTS)
}

/// Up to three other events, soonest first.
pub fn related_events(current_id: &str) -> Query {
    Query::new(format!(
        r#"*[_type == "events" && _id != $currentId] | order(date asc)[0...3] {EVENT_CARD}"#
    ))
    .param("currentId", current_id)
    .tag(tags::EVENTS)
}

/// All awards, newest year first.
pub fn awards() -> Query {
    Query::new(format!(
        r#"*[_type == "awards"] | order(year desc) {AWARD}"#
    ))
    .tag(tags::AWARDS)
}
