//! Server-rendered pages.
//!
//! Plain string building; every piece of user-supplied text goes through
//! [`escape_html`] before it lands in the document.

use crate::core::like::LikeButton;
use crate::core::schema::{AUTHOR_FIELD, IMAGE_URL_FIELD, TITLE_FIELD};
use crate::core::submission::SubmissionOutcome;
use crate::domain::model::{Environment, FormFields, Setup, SetupsResult, FORM_ERROR_KEY};

pub const SITE_NAME: &str = "Rate My Setup";
pub const SITE_DESCRIPTION: &str =
    "Rate My Setup is a platform for sharing and discovering desk setups.";
pub const TWITTER_HANDLE: &str = "@jullerino";
pub const SUBMIT_SUCCESS: &str = "Setup submitted successfully! Thank you for sharing.";
pub const SUBMIT_FAILURE: &str = "Please fix the errors and try again.";

/// Number of cards whose images load eagerly (above the fold).
pub const EAGER_IMAGES: usize = 4;

/// Client half of the like button; mirrors `LikeButton::toggle`.
const LIKE_SCRIPT: &str = r#"<script>
document.querySelectorAll("button.like-button").forEach(function (button) {
  button.addEventListener("click", function () {
    var liked = button.dataset.liked === "true";
    var likes = parseInt(button.dataset.likes, 10) + (liked ? -1 : 1);
    button.dataset.liked = String(!liked);
    button.dataset.likes = String(likes);
    button.setAttribute("aria-label", liked ? "Like setup" : "Unlike setup");
    button.title = button.getAttribute("aria-label");
    button.querySelector(".like-icon").textContent = liked ? "♡" : "♥";
    button.querySelector(".like-count").textContent = String(likes);
  });
});
</script>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    pub environment: Environment,
    pub base_url: String,
}

impl SiteMetadata {
    pub fn new(environment: Environment, port: u16) -> Self {
        Self {
            environment,
            base_url: environment.metadata_base(port),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn layout(site: &SiteMetadata, body: &str) -> String {
    let base = escape_html(&site.base_url);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" media="(prefers-color-scheme: light)" content="white">
<meta name="theme-color" media="(prefers-color-scheme: dark)" content="black">
<title>{name}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{base}/">
<meta property="og:title" content="{name}">
<meta property="og:description" content="{description}">
<meta property="og:url" content="{site_url}">
<meta property="og:site_name" content="{name}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:site" content="{twitter}">
<meta name="twitter:creator" content="{twitter}">
</head>
<body data-environment="{environment}">
{navigation}
{body}
</body>
</html>
"#,
        name = SITE_NAME,
        description = SITE_DESCRIPTION,
        base = base,
        site_url = Environment::PRODUCTION_BASE_URL,
        twitter = TWITTER_HANDLE,
        environment = site.environment,
        navigation = navigation(),
        body = body,
    )
}

pub fn navigation() -> String {
    format!(
        r#"<nav class="navigation">
<a class="brand" href="/">{}</a>
<a href="/">Gallery</a>
<a class="primary" href="/submit">Submit Setup</a>
</nav>"#,
        SITE_NAME
    )
}

pub fn gallery_page(site: &SiteMetadata, result: &SetupsResult) -> String {
    let mut body = String::from(
        "<main class=\"gallery\">\n<h1>Rate My <span class=\"primary\">Setup</span> Gallery</h1>\n",
    );

    match (&result.error, &result.data) {
        (Some(error), _) => {
            body.push_str(&format!(
                "<p class=\"error\">Error loading setups: {}</p>\n",
                escape_html(error)
            ));
        }
        (None, Some(setups)) if !setups.is_empty() => {
            body.push_str(
                "<p class=\"muted\">Discover and rate amazing desk setups from the community</p>\n",
            );
            body.push_str("<div class=\"grid\">\n");
            for (index, setup) in setups.iter().enumerate() {
                body.push_str(&setup_card(setup, index < EAGER_IMAGES));
            }
            body.push_str("</div>\n");
        }
        _ => body.push_str("<p class=\"muted\">No setups found</p>\n"),
    }

    body.push_str("</main>\n");
    body.push_str(LIKE_SCRIPT);
    layout(site, &body)
}

pub fn setup_card(setup: &Setup, priority: bool) -> String {
    let loading = if priority {
        r#"loading="eager" fetchpriority="high""#
    } else {
        r#"loading="lazy""#
    };

    let tags: String = setup
        .tags
        .iter()
        .map(|tag| format!("<span class=\"badge\">{}</span>", escape_html(tag)))
        .collect();

    format!(
        r#"<article class="card" id="setup-{id}">
<div class="card-image">
<img src="{image_url}" alt="{title}" {loading}>
<div class="card-like">{like}</div>
</div>
<header><h2>{title}</h2><p class="muted">by {author}</p></header>
<p class="muted">{description}</p>
<footer class="tags">{tags}</footer>
</article>
"#,
        id = escape_html(&setup.id),
        image_url = escape_html(&setup.image_url),
        title = escape_html(&setup.title),
        loading = loading,
        like = like_button(LikeButton::new(setup.likes)),
        author = escape_html(&setup.author),
        description = escape_html(&setup.description),
        tags = tags,
    )
}

pub fn like_button(button: LikeButton) -> String {
    let icon = if button.is_liked() { '\u{2665}' } else { '\u{2661}' };
    format!(
        r#"<button type="button" class="like-button" data-likes="{likes}" data-liked="{liked}" aria-label="{label}" title="{label}"><span class="like-icon">{icon}</span> <span class="like-count">{likes}</span></button>"#,
        likes = button.likes(),
        liked = button.is_liked(),
        label = button.label(),
        icon = icon,
    )
}

/// State of the submit form between requests.
#[derive(Debug, Default)]
pub struct SubmitView<'a> {
    pub values: Option<&'a FormFields>,
    pub outcome: Option<&'a SubmissionOutcome>,
}

impl SubmitView<'_> {
    fn value(&self, field: &str) -> &str {
        // 成功送出後清空表單
        if self.outcome.is_some_and(SubmissionOutcome::is_success) {
            return "";
        }
        self.values
            .and_then(|values| values.get(field))
            .unwrap_or_default()
    }

    fn first_error(&self, field: &str) -> Option<&str> {
        self.outcome
            .and_then(SubmissionOutcome::errors)
            .and_then(|errors| errors.get(field))
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

pub fn submit_page(site: &SiteMetadata, view: &SubmitView<'_>) -> String {
    let mut body = String::from(
        "<main class=\"submit\">\n<h1>Submit Your <span class=\"primary\">Setup</span></h1>\n\
         <p class=\"muted\">Share your amazing desk setup with the community</p>\n",
    );

    match view.outcome {
        Some(outcome) if outcome.is_success() => {
            body.push_str(&format!("<div class=\"banner success\">{}</div>\n", SUBMIT_SUCCESS));
        }
        Some(_) => {
            body.push_str(&format!("<div class=\"banner error\">{}", SUBMIT_FAILURE));
            if let Some(message) = view.first_error(FORM_ERROR_KEY) {
                body.push_str(&format!(" {}", escape_html(message)));
            }
            body.push_str("</div>\n");
        }
        None => {}
    }

    body.push_str(
        "<section class=\"card\">\n<h2>Setup Details</h2>\n\
         <p class=\"muted\">Fill in the details below to submit your setup. All fields are required.</p>\n\
         <form method=\"post\" action=\"/submit\">\n",
    );
    body.push_str(&form_field(
        view,
        TITLE_FIELD,
        "Title",
        "text",
        "Enter a descriptive title for your setup",
        None,
    ));
    body.push_str(&form_field(
        view,
        AUTHOR_FIELD,
        "Author",
        "text",
        "Your name or username",
        None,
    ));
    body.push_str(&form_field(
        view,
        IMAGE_URL_FIELD,
        "Image URL",
        "url",
        "https://example.com/image.jpg",
        Some("Provide a direct link to an image of your setup"),
    ));
    body.push_str("<button type=\"submit\">Submit Setup</button>\n</form>\n</section>\n</main>\n");

    layout(site, &body)
}

fn form_field(
    view: &SubmitView<'_>,
    name: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
    hint: Option<&str>,
) -> String {
    let error = view.first_error(name);
    let mut html = format!(
        "<div class=\"field\">\n<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"{input_type}\" placeholder=\"{placeholder}\" value=\"{value}\"{invalid} required>\n",
        name = name,
        label = label,
        input_type = input_type,
        placeholder = escape_html(placeholder),
        value = escape_html(view.value(name)),
        invalid = if error.is_some() { " aria-invalid=\"true\"" } else { "" },
    );

    if let Some(message) = error {
        html.push_str(&format!("<p class=\"field-error\">{}</p>\n", escape_html(message)));
    }
    if let Some(hint) = hint {
        html.push_str(&format!("<p class=\"hint\">{}</p>\n", hint));
    }

    html.push_str("</div>\n");
    html
}
