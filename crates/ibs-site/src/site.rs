//! Page assemblers.
//!
//! Each assembler issues its content queries, derives the view it needs and
//! renders one template. Independent queries run concurrently on the rayon
//! pool.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use ibs_content::{
    Award, BlogPost, CaseStudy, ContentSource, ContentSourceExt, Event, ImageRef, ImageUrlBuilder,
    Node,
};
use ibs_renderer::{PortableTextRenderer, RenderResult, plain_text};
use serde::Serialize;

use crate::contact::{ContactForm, ContactState, FieldErrors};
use crate::error::SiteError;
use crate::queries;
use crate::templates::{Shell, Templates};
use crate::views::{
    excerpt, format_date, format_time, group_awards_by_year, is_past, parse_instant,
    partition_events, unique_tags,
};

/// Past events shown on the events index.
const PAST_EVENTS_SHOWN: usize = 6;
/// Meta description length.
const DESCRIPTION_LEN: usize = 160;

const CARD: (u32, u32) = (400, 200);
const HERO: (u32, u32) = (1200, 600);
const GALLERY: (u32, u32) = (600, 400);

/// Rendered blog index.
#[derive(Debug)]
pub struct BlogIndex {
    pub html: String,
    /// The filter named a category no post carries; the page is the empty state.
    pub unknown_category: bool,
}

/// Blog post summary for card grids.
#[derive(Debug, Serialize)]
struct PostCard {
    title: String,
    href: String,
    date: Option<String>,
    author: Option<String>,
    categories: Vec<String>,
    image: Option<String>,
}

/// Case study summary for card grids.
#[derive(Debug, Serialize)]
struct StudyCard {
    title: String,
    href: String,
    client: Option<String>,
    description: Option<String>,
    services: Vec<String>,
    image: Option<String>,
}

/// Event summary for card grids.
#[derive(Debug, Serialize)]
struct EventCard {
    title: String,
    href: String,
    date: String,
    /// Short month name for the calendar badge.
    month: Option<String>,
    day: Option<u32>,
    location: Option<String>,
    description: Option<String>,
    registration_link: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Serialize)]
struct AwardCard {
    title: String,
    year: i32,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Serialize)]
struct YearGroup {
    year: i32,
    awards: Vec<AwardCard>,
}

#[derive(Serialize)]
struct HomePage {
    posts: Vec<PostCard>,
    case_studies: Vec<StudyCard>,
    events: Vec<EventCard>,
}

#[derive(Serialize)]
struct ContactPage<'a> {
    submitted: bool,
    form: &'a ContactForm,
    errors: &'a FieldErrors,
}

#[derive(Serialize)]
struct BlogIndexPage<'a> {
    posts: Vec<PostCard>,
    categories: Vec<String>,
    active: Option<&'a str>,
}

#[derive(Serialize)]
struct BlogPostPage {
    post: PostCard,
    description: String,
    body: String,
    related: Vec<PostCard>,
}

#[derive(Serialize)]
struct CaseStudiesPage {
    case_studies: Vec<StudyCard>,
}

#[derive(Serialize)]
struct StudyDetail {
    title: String,
    client: Option<String>,
    industry: Option<String>,
    services: Vec<String>,
    description: Option<String>,
    image: Option<String>,
}

#[derive(Serialize)]
struct CaseStudyPage {
    study: StudyDetail,
    description: String,
    body: Option<String>,
    gallery: Vec<String>,
    related: Vec<StudyCard>,
}

#[derive(Serialize)]
struct EventsPage {
    upcoming: Vec<EventCard>,
    past: Vec<EventCard>,
    more_past: bool,
}

#[derive(Serialize)]
struct EventDetail {
    title: String,
    date: String,
    time: Option<String>,
    location: Option<String>,
    description: Option<String>,
    registration_link: Option<String>,
    image: Option<String>,
    format: &'static str,
}

#[derive(Serialize)]
struct EventPage {
    event: EventDetail,
    is_past: bool,
    description: String,
    related: Vec<EventCard>,
}

#[derive(Serialize)]
struct AwardsPage {
    categories: Vec<String>,
    years: Vec<YearGroup>,
}

/// Page assembler over a content source.
///
/// Renders every page of the site to a complete HTML document.
pub struct Site {
    source: Arc<dyn ContentSource>,
    images: ImageUrlBuilder,
    templates: Templates,
}

impl Site {
    /// Create a site reading from `source`.
    ///
    /// Fails if an embedded template does not compile.
    pub fn new(source: Arc<dyn ContentSource>, images: ImageUrlBuilder) -> Result<Self, SiteError> {
        Ok(Self {
            source,
            images,
            templates: Templates::new()?,
        })
    }

    /// Home page.
    pub fn home(&self) -> Result<String, SiteError> {
        self.home_at(Utc::now())
    }

    /// Home page, with upcoming events relative to `now`.
    pub fn home_at(&self, now: DateTime<Utc>) -> Result<String, SiteError> {
        let (posts, (studies, events)) = rayon::join(
            || self.source.fetch::<Vec<BlogPost>>(&queries::latest_blog_posts()),
            || {
                rayon::join(
                    || self.source.fetch::<Vec<CaseStudy>>(&queries::latest_case_studies()),
                    || self.source.fetch::<Vec<Event>>(&queries::upcoming_events(now)),
                )
            },
        );
        let (posts, studies, events) = (posts?, studies?, events?);

        let page = HomePage {
            posts: posts.iter().map(|post| self.post_card(post)).collect(),
            case_studies: studies.iter().map(|study| self.study_card(study)).collect(),
            events: events.iter().map(|event| self.event_card(event)).collect(),
        };
        self.render("home.html", "/", now, page)
    }

    /// About page.
    pub fn about(&self) -> Result<String, SiteError> {
        self.render("about.html", "/about", Utc::now(), ())
    }

    /// Solutions page.
    pub fn solutions(&self) -> Result<String, SiteError> {
        self.render("solutions.html", "/solutions", Utc::now(), ())
    }

    /// Contact page in the given form state.
    pub fn contact(&self, state: &ContactState) -> Result<String, SiteError> {
        let blank = (ContactForm::default(), FieldErrors::default());
        let page = match state {
            ContactState::Blank => ContactPage {
                submitted: false,
                form: &blank.0,
                errors: &blank.1,
            },
            ContactState::Invalid(form, errors) => ContactPage {
                submitted: false,
                form,
                errors,
            },
            ContactState::Submitted => ContactPage {
                submitted: true,
                form: &blank.0,
                errors: &blank.1,
            },
        };
        self.render("contact.html", "/contact", Utc::now(), page)
    }

    /// Blog index, optionally restricted to one category.
    ///
    /// The category list always covers every post.
    pub fn blog_index(&self, category: Option<&str>) -> Result<BlogIndex, SiteError> {
        let posts: Vec<BlogPost> = self.source.fetch(&queries::blog_posts())?;
        let categories = unique_tags(posts.iter().flat_map(|post| post.categories()).map(String::as_str));
        let category = category.filter(|c| !c.is_empty());
        let unknown_category = category.is_some_and(|c| !categories.iter().any(|known| known == c));

        let page = BlogIndexPage {
            posts: posts
                .iter()
                .filter(|post| category.is_none_or(|c| post.categories().iter().any(|pc| pc == c)))
                .map(|post| self.post_card(post))
                .collect(),
            categories,
            active: category,
        };
        Ok(BlogIndex {
            html: self.render("blog_index.html", "/blog", Utc::now(), page)?,
            unknown_category,
        })
    }

    /// One blog post with related articles.
    pub fn blog_post(&self, slug: &str) -> Result<String, SiteError> {
        let post: BlogPost = self
            .source
            .fetch_optional(&queries::blog_post(slug))?
            .ok_or_else(|| SiteError::NotFound(format!("blog post '{slug}'")))?;
        let related: Vec<BlogPost> = self
            .source
            .fetch(&queries::related_blog_posts(&post.id, post.categories()))?;

        let content = post.content.as_deref().unwrap_or_default();
        let body = self.rich_text(content);

        let mut card = self.post_card(&post);
        card.image = self.image(post.image.as_ref(), HERO);
        let page = BlogPostPage {
            description: describe(None, content, &post.title),
            post: card,
            body: body.html,
            related: related.iter().map(|p| self.post_card(p)).collect(),
        };
        self.render("blog_post.html", &format!("/blog/{slug}"), Utc::now(), page)
    }

    /// Case study index.
    pub fn case_studies(&self) -> Result<String, SiteError> {
        let studies: Vec<CaseStudy> = self.source.fetch(&queries::case_studies())?;

        let page = CaseStudiesPage {
            case_studies: studies.iter().map(|study| self.study_card(study)).collect(),
        };
        self.render("case_studies.html", "/case-studies", Utc::now(), page)
    }

    /// One case study with its gallery and related studies.
    pub fn case_study(&self, slug: &str) -> Result<String, SiteError> {
        let study: CaseStudy = self
            .source
            .fetch_optional(&queries::case_study(slug))?
            .ok_or_else(|| SiteError::NotFound(format!("case study '{slug}'")))?;
        let related: Vec<CaseStudy> = self
            .source
            .fetch(&queries::related_case_studies(&study.id, study.services()))?;

        let content = study.content.as_deref().unwrap_or_default();
        let body = (!content.is_empty()).then(|| self.rich_text(content).html);

        let page = CaseStudyPage {
            description: describe(study.description.as_deref(), content, &study.title),
            gallery: study
                .images()
                .iter()
                .filter_map(|image| self.image(Some(image), GALLERY))
                .collect(),
            study: StudyDetail {
                title: study.title.clone(),
                client: study.client.clone(),
                industry: study.industry.clone(),
                services: study.services().to_vec(),
                description: study.description.clone(),
                image: self.image(study.images().first(), HERO),
            },
            body,
            related: related.iter().map(|s| self.study_card(s)).collect(),
        };
        self.render(
            "case_study.html",
            &format!("/case-studies/{slug}"),
            Utc::now(),
            page,
        )
    }

    /// Events index.
    pub fn events(&self) -> Result<String, SiteError> {
        self.events_at(Utc::now())
    }

    /// Events index, split into upcoming and past relative to `now`.
    pub fn events_at(&self, now: DateTime<Utc>) -> Result<String, SiteError> {
        let events: Vec<Event> = self.source.fetch(&queries::events())?;
        let (upcoming, past) = partition_events(events, now);

        let page = EventsPage {
            upcoming: upcoming.iter().map(|event| self.event_card(event)).collect(),
            more_past: past.len() > PAST_EVENTS_SHOWN,
            past: past
                .iter()
                .take(PAST_EVENTS_SHOWN)
                .map(|event| self.event_card(event))
                .collect(),
        };
        self.render("events.html", "/events", now, page)
    }

    /// One event.
    pub fn event(&self, slug: &str) -> Result<String, SiteError> {
        self.event_at(slug, Utc::now())
    }

    /// One event, labelled past or upcoming relative to `now`.
    pub fn event_at(&self, slug: &str, now: DateTime<Utc>) -> Result<String, SiteError> {
        let event: Event = self
            .source
            .fetch_optional(&queries::event(slug))?
            .ok_or_else(|| SiteError::NotFound(format!("event '{slug}'")))?;
        let related: Vec<Event> = self.source.fetch(&queries::related_events(&event.id))?;

        let page = EventPage {
            is_past: is_past(&event, now),
            description: describe(event.description.as_deref(), &[], &event.title),
            related: related.iter().map(|e| self.event_card(e)).collect(),
            event: EventDetail {
                title: event.title.clone(),
                date: format_date(&event.date),
                time: format_time(&event.date),
                format: event_format(event.location.as_deref()),
                location: event.location.clone(),
                description: event.description.clone(),
                registration_link: event.registration_link.clone(),
                image: self.image(event.image.as_ref(), HERO),
            },
        };
        self.render("event.html", &format!("/events/{slug}"), now, page)
    }

    /// Awards page, grouped by year.
    pub fn awards(&self) -> Result<String, SiteError> {
        let awards: Vec<Award> = self.source.fetch(&queries::awards())?;
        let categories = unique_tags(awards.iter().filter_map(|award| award.category.as_deref()));

        let page = AwardsPage {
            categories,
            years: group_awards_by_year(awards)
                .into_iter()
                .map(|(year, awards)| YearGroup {
                    year,
                    awards: awards.iter().map(|award| self.award_card(award)).collect(),
                })
                .collect(),
        };
        self.render("awards.html", "/awards", Utc::now(), page)
    }

    /// Not-found page for `path`.
    pub fn not_found(&self, path: &str) -> Result<String, SiteError> {
        self.render("not_found.html", path, Utc::now(), ())
    }

    /// Generic failure page for `path`.
    pub fn error_page(&self, path: &str) -> Result<String, SiteError> {
        self.render("error.html", path, Utc::now(), ())
    }

    fn render<S: Serialize>(
        &self,
        template: &str,
        current: &str,
        now: DateTime<Utc>,
        page: S,
    ) -> Result<String, SiteError> {
        let shell = Shell {
            current,
            year: now.year(),
        };
        Ok(self.templates.render(template, shell, page)?)
    }

    fn rich_text(&self, content: &[Node]) -> RenderResult {
        let result = PortableTextRenderer::new(&self.images).render(content);
        if !result.warnings.is_empty() {
            tracing::debug!(warnings = result.warnings.len(), "Rich text rendered with fallbacks");
        }
        result
    }

    fn image(&self, image: Option<&ImageRef>, (width, height): (u32, u32)) -> Option<String> {
        self.images.url_sized(image?, Some(width), Some(height))
    }

    fn post_card(&self, post: &BlogPost) -> PostCard {
        PostCard {
            title: post.title.clone(),
            href: format!("/blog/{}", post.slug.current),
            date: post.publish_date.as_deref().map(format_date),
            author: post.author.clone(),
            categories: post.categories().to_vec(),
            image: self.image(post.image.as_ref(), CARD),
        }
    }

    fn study_card(&self, study: &CaseStudy) -> StudyCard {
        StudyCard {
            title: study.title.clone(),
            href: format!("/case-studies/{}", study.slug.current),
            client: study.client.clone(),
            description: study.description.clone(),
            services: study.services().to_vec(),
            image: self.image(study.images().first(), CARD),
        }
    }

    fn event_card(&self, event: &Event) -> EventCard {
        let instant = parse_instant(&event.date);
        EventCard {
            title: event.title.clone(),
            href: format!("/events/{}", event.slug.current),
            date: format_date(&event.date),
            month: instant.map(|dt| dt.format("%b").to_string()),
            day: instant.map(|dt| dt.day()),
            location: event.location.clone(),
            description: event.description.clone(),
            registration_link: event.registration_link.clone(),
            image: self.image(event.image.as_ref(), CARD),
        }
    }

    fn award_card(&self, award: &Award) -> AwardCard {
        AwardCard {
            title: award.title.clone(),
            year: award.year,
            description: award.description.clone(),
            category: award.category.clone(),
            image: self.image(award.image.as_ref(), CARD),
        }
    }
}

/// Meta description: the explicit summary, else an excerpt of the body, else
/// the title.
fn describe(summary: Option<&str>, content: &[Node], title: &str) -> String {
    if let Some(summary) = summary.filter(|s| !s.trim().is_empty()) {
        return excerpt(summary, DESCRIPTION_LEN);
    }
    let text = plain_text(content);
    if text.trim().is_empty() {
        title.to_owned()
    } else {
        excerpt(&text, DESCRIPTION_LEN)
    }
}

fn event_format(location: Option<&str>) -> &'static str {
    if location.is_some_and(|l| l.to_lowercase().contains("virtual")) {
        "Virtual Webinar"
    } else {
        "In-Person Event"
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ibs_content::MockContentSource;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    const IMAGE: &str = "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg";

    fn site(source: MockContentSource) -> (Site, Arc<MockContentSource>) {
        let source = Arc::new(source);
        let site = Site::new(
            Arc::clone(&source) as Arc<dyn ContentSource>,
            ImageUrlBuilder::new("proj", "prod"),
        )
        .unwrap();
        (site, source)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn post(id: &str, categories: Value) -> Value {
        json!({
            "_id": id,
            "title": format!("Title {id}"),
            "slug": {"current": id},
            "publishDate": "2024-01-05",
            "author": "Ada",
            "categories": categories,
            "image": {"asset": {"_ref": IMAGE}},
        })
    }

    fn event(id: &str, date: &str) -> Value {
        json!({
            "_id": id,
            "title": format!("Event {id}"),
            "slug": {"current": id},
            "date": date,
            "location": "Virtual",
        })
    }

    fn award(id: &str, year: i32, category: &str) -> Value {
        json!({"_id": id, "title": format!("Award {id}"), "year": year, "category": category})
    }

    #[test]
    fn test_home_fans_out_three_queries() {
        let (site, source) = site(
            MockContentSource::new()
                .with_result(r#"_type == "blog""#, json!([post("p1", json!(["Treasury"]))]))
                .with_result(r#"_type == "caseStudies""#, json!([]))
                .with_result(r#"_type == "events""#, json!([event("e1", "2024-07-04T09:00:00Z")])),
        );

        let html = site.home_at(now()).unwrap();

        assert_eq!(source.executed().len(), 3);
        assert!(html.contains("Title p1"));
        assert!(html.contains("Upcoming Events"));
        assert!(html.contains("Jul"));
        let upcoming = source
            .executed()
            .into_iter()
            .find(|q| q.groq().contains("events"))
            .unwrap();
        assert_eq!(upcoming.params()["now"], "2024-06-01T12:00:00.000Z");
    }

    #[test]
    fn test_home_returns_first_failure() {
        let (site, _) = site(
            MockContentSource::new()
                .with_failure(r#"_type == "blog""#, "blog down")
                .with_failure(r#"_type == "caseStudies""#, "studies down")
                .with_result(r#"_type == "events""#, json!([])),
        );

        let err = site.home_at(now()).unwrap_err();
        assert!(err.to_string().contains("blog down"), "{err}");
    }

    #[test]
    fn test_blog_post_not_found() {
        let (site, source) = site(MockContentSource::new().with_result("slug.current == $slug", Value::Null));

        let err = site.blog_post("missing").unwrap_err();
        assert!(matches!(err, SiteError::NotFound(_)));
        assert_eq!(source.executed().len(), 1);
    }

    #[test]
    fn test_blog_post_renders_body_in_order_with_related() {
        let mut full = post("p1", json!(["Treasury"]));
        full["content"] = json!([
            {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "First", "marks": []}], "markDefs": []},
            {"_type": "block", "style": "normal", "children": [{"_type": "span", "text": "Second", "marks": ["strong"]}], "markDefs": []},
        ]);
        let (site, source) = site(
            MockContentSource::new()
                .with_result("slug.current == $slug", full)
                .with_result("_id != $currentId", json!([post("p2", json!(["Treasury"]))])),
        );

        let html = site.blog_post("p1").unwrap();

        let first = html.find(r#"mt-8 mb-4">First</h2>"#).unwrap();
        let second = html.find("<strong>Second</strong>").unwrap();
        assert!(first < second);
        assert!(html.contains("Related Articles"));
        assert!(html.contains("Title p2"));
        assert!(html.contains(r#"<meta name="description" content="First Second">"#));

        let related = &source.executed()[1];
        assert_eq!(related.params()["currentId"], "p1");
        assert_eq!(related.params()["categories"], json!(["Treasury"]));
        assert!(related.groq().contains("$categories"));
    }

    #[test]
    fn test_blog_post_without_categories_asks_for_latest() {
        let (site, source) = site(
            MockContentSource::new()
                .with_result("slug.current == $slug", post("p1", Value::Null))
                .with_result("_id != $currentId", json!([])),
        );

        let html = site.blog_post("p1").unwrap();

        assert!(!html.contains("Related Articles"));
        assert!(!source.executed()[1].groq().contains("$categories"));
    }

    #[test]
    fn test_blog_index_filters_by_category() {
        let (site, _) = site(MockContentSource::new().with_result(
            r#"_type == "blog""#,
            json!([
                post("p1", json!(["Treasury", "Risk"])),
                post("p2", json!(["Payments"])),
                post("p3", json!(["Risk"])),
            ]),
        ));

        let all = site.blog_index(None).unwrap();
        assert!(!all.unknown_category);
        let all = all.html;
        assert!(all.contains("Title p1") && all.contains("Title p2") && all.contains("Title p3"));
        assert_eq!(all.matches(">Risk</a>").count(), 1);

        let risk = site.blog_index(Some("Risk")).unwrap();
        assert!(!risk.unknown_category);
        let risk = risk.html;
        assert!(risk.contains("Title p1") && risk.contains("Title p3"));
        assert!(!risk.contains("Title p2"));
        assert!(risk.contains(">Payments</a>"));

        let junk = site.blog_index(Some("junk")).unwrap();
        assert!(junk.unknown_category);
        assert!(junk.html.contains("No articles found"));
    }

    #[test]
    fn test_blog_index_empty_state() {
        let (site, _) = site(MockContentSource::new().with_result(r#"_type == "blog""#, json!([])));

        let index = site.blog_index(None).unwrap();
        assert!(!index.unknown_category);
        assert!(index.html.contains("No articles found"));
    }

    #[test]
    fn test_case_study_relates_by_service() {
        let study = json!({
            "_id": "cs1",
            "title": "Bank rollout",
            "slug": {"current": "bank-rollout"},
            "description": "A bank moved its treasury.",
            "client": "Global Bank",
            "services": ["Treasury"],
            "images": [{"asset": {"_ref": IMAGE}}, {"asset": {"_ref": IMAGE}}],
        });
        let (site, source) = site(
            MockContentSource::new()
                .with_result("slug.current == $slug", study)
                .with_result("_id != $currentId", json!([])),
        );

        let html = site.case_study("bank-rollout").unwrap();

        assert!(html.contains("Global Bank"));
        assert!(html.contains("Solution in Action"));
        assert_eq!(html.matches("w=600&amp;h=400").count(), 2);
        assert_eq!(source.executed()[1].params()["services"], json!(["Treasury"]));
    }

    #[test]
    fn test_case_studies_empty_state() {
        let (site, _) = site(MockContentSource::new().with_result(r#"_type == "caseStudies""#, json!([])));

        let html = site.case_studies().unwrap();
        assert!(html.contains("No case studies have been published yet."));
    }

    #[test]
    fn test_events_partitioned_and_past_limited() {
        let mut events = vec![event("future", "2024-06-01T12:00:01Z")];
        for day in 1..=7 {
            events.push(event(&format!("past{day}"), &format!("2024-05-0{day}T10:00:00Z")));
        }
        events.push(event("boundary", "2024-06-01T12:00:00Z"));
        let (site, _) = site(MockContentSource::new().with_result(r#"_type == "events""#, Value::Array(events)));

        let html = site.events_at(now()).unwrap();

        assert!(html.contains("Event future"));
        assert!(!html.contains("No Upcoming Events"));
        assert_eq!(html.matches(">Past Event</span>").count(), PAST_EVENTS_SHOWN);
        assert!(html.contains("View All Past Events"));
        assert!(!html.contains("Event boundary"));
    }

    #[test]
    fn test_events_empty_upcoming() {
        let (site, _) = site(
            MockContentSource::new()
                .with_result(r#"_type == "events""#, json!([event("old", "2020-01-01T00:00:00Z")])),
        );

        let html = site.events_at(now()).unwrap();
        assert!(html.contains("No Upcoming Events"));
        assert!(!html.contains("View All Past Events"));
    }

    #[test]
    fn test_event_detail_past_and_format() {
        let (site, source) = site(
            MockContentSource::new()
                .with_result("slug.current == $slug", event("e1", "2024-06-01T12:00:00Z"))
                .with_result("_id != $currentId", json!([])),
        );

        let html = site.event_at("e1", now()).unwrap();

        assert!(html.contains("Event Recap"));
        assert!(html.contains("Virtual Webinar"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains("12:00 PM"));
        assert_eq!(source.executed()[1].params()["currentId"], "e1");
    }

    #[test]
    fn test_awards_grouped_by_year_descending() {
        let (site, _) = site(MockContentSource::new().with_result(
            r#"_type == "awards""#,
            json!([
                award("a", 2022, "Innovation"),
                award("b", 2023, "Innovation"),
                award("c", 2022, "Service"),
            ]),
        ));

        let html = site.awards().unwrap();

        let y2023 = html.find(">2023</h2>").unwrap();
        let y2022 = html.find(">2022</h2>").unwrap();
        assert!(y2023 < y2022);
        assert!(html.find("Award a").unwrap() < html.find("Award c").unwrap());
        assert_eq!(html.matches(r#"rounded-full text-gray-700">Innovation</span>"#).count(), 1);
    }

    #[test]
    fn test_upstream_failure_is_content_error() {
        let (site, _) = site(MockContentSource::new().with_failure(r#"_type == "awards""#, "timeout"));

        assert!(matches!(site.awards().unwrap_err(), SiteError::Content(_)));
    }

    #[test]
    fn test_contact_states() {
        let (site, _) = site(MockContentSource::new());

        let blank = site.contact(&ContactState::Blank).unwrap();
        assert!(blank.contains(r#"<form method="post""#));

        let form = ContactForm {
            name: "A".to_owned(),
            email: "ada@example.com".to_owned(),
            ..ContactForm::default()
        };
        let errors = form.validate().unwrap_err();
        let invalid = site.contact(&ContactState::Invalid(form, errors)).unwrap();
        assert!(invalid.contains("Name must be at least 2 characters."));
        assert!(invalid.contains(r#"value="ada@example.com""#));
        assert!(!invalid.contains("Please enter a valid email address."));

        let sent = site.contact(&ContactState::Submitted).unwrap();
        assert!(sent.contains("Message Sent!"));
        assert!(!sent.contains("<form"));
    }

    #[test]
    fn test_static_pages_do_not_query() {
        let (site, source) = site(MockContentSource::new());

        assert!(site.about().unwrap().contains("Our Story"));
        assert!(site.solutions().unwrap().contains(r#"id="treasury""#));
        assert!(site.not_found("/nope").unwrap().contains("Page Not Found"));
        assert!(source.executed().is_empty());
    }

    #[test]
    fn test_event_format() {
        assert_eq!(event_format(Some("Virtual (Zoom)")), "Virtual Webinar");
        assert_eq!(event_format(Some("VIRTUAL")), "Virtual Webinar");
        assert_eq!(event_format(Some("London")), "In-Person Event");
        assert_eq!(event_format(None), "In-Person Event");
    }
}
