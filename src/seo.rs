//! SEO metadata generation.
//!
//! Per-locale site defaults are merged with page-level overrides into a
//! [`Metadata`] value, which renders to `<meta>` / `<link>` tags.

use crate::web::html::escape;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Site defaults for one locale.
#[derive(Debug, Clone)]
pub struct LocaleSeoConfig {
    pub site_name: &'static str,
    pub description: &'static str,
    /// Open Graph locale (`en_US` style)
    pub og_locale: &'static str,
    /// Path under the site URL for this locale's home page
    pub home_path: &'static str,
    pub image_path: &'static str,
}

static EN_US: LocaleSeoConfig = LocaleSeoConfig {
    site_name: "Your Company Name",
    description: "Your English site description",
    og_locale: "en_US",
    home_path: "",
    image_path: "/og-image-en.jpg",
};

static AR_AE: LocaleSeoConfig = LocaleSeoConfig {
    site_name: "اسم شركتك",
    description: "وصف موقعك باللغة العربية",
    og_locale: "ar_AE",
    home_path: "/ar",
    image_path: "/og-image-ar.jpg",
};

/// Site defaults for `locale`, falling back to the English configuration.
pub fn locale_config(locale: &str) -> &'static LocaleSeoConfig {
    match locale {
        "ar-AE" => &AR_AE,
        _ => &EN_US,
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpenGraphProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub images: Option<Vec<OgImage>>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TwitterProps {
    pub handle: Option<String>,
    pub site: Option<String>,
    pub card_type: Option<String>,
}

/// Page-level SEO inputs. Anything left `None` uses the locale defaults.
#[derive(Debug, Clone, Default)]
pub struct SeoProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
    pub open_graph: Option<OpenGraphProps>,
    pub twitter: Option<TwitterProps>,
}

impl SeoProps {
    pub fn titled(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Predefined page configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Contact,
    Dashboard,
}

impl Page {
    pub fn props(&self) -> SeoProps {
        match self {
            Page::Home => SeoProps::titled("Home", "Welcome to our website"),
            Page::About => SeoProps::titled("About Us", "Learn more about our company and mission"),
            Page::Contact => SeoProps::titled("Contact Us", "Get in touch with our team"),
            Page::Dashboard => SeoProps {
                noindex: true,
                nofollow: true,
                ..SeoProps::titled("Dashboard", "Admin dashboard")
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub locale: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub creator: Option<String>,
    pub site: Option<String>,
}

/// Fully resolved page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub robots: Robots,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub canonical: Option<String>,
}

/// Merge page props with the locale's site defaults.
pub fn generate(props: &SeoProps, locale: &str, site_url: &str) -> Metadata {
    let site = locale_config(locale);
    let og = props.open_graph.clone().unwrap_or_default();
    let twitter = props.twitter.clone().unwrap_or_default();

    let title = match &props.title {
        Some(title) => format!("{} | {}", title, site.site_name),
        None => site.site_name.to_string(),
    };
    let description = props
        .description
        .clone()
        .unwrap_or_else(|| site.description.to_string());

    let social_title = og
        .title
        .clone()
        .or_else(|| props.title.clone())
        .unwrap_or_else(|| site.site_name.to_string());
    let social_description = og.description.clone().unwrap_or_else(|| description.clone());

    let default_image = OgImage {
        url: format!("{}{}", site_url, site.image_path),
        width: 1200,
        height: 630,
        alt: site.site_name.to_string(),
    };

    Metadata {
        title,
        description,
        robots: Robots {
            index: !props.noindex,
            follow: !props.nofollow,
        },
        open_graph: OpenGraph {
            title: social_title.clone(),
            description: social_description.clone(),
            kind: og.kind.unwrap_or_else(|| "website".to_string()),
            locale: site.og_locale.to_string(),
            url: props
                .canonical
                .clone()
                .or(og.url)
                .unwrap_or_else(|| format!("{}{}", site_url, site.home_path)),
            site_name: site.site_name.to_string(),
            images: og.images.unwrap_or_else(|| vec![default_image]),
        },
        twitter: TwitterCard {
            card: twitter
                .card_type
                .unwrap_or_else(|| "summary_large_image".to_string()),
            title: social_title,
            description: social_description,
            creator: twitter.handle,
            site: twitter.site,
        },
        canonical: props.canonical.clone(),
    }
}

impl Metadata {
    /// Render as head tags.
    pub fn to_html(&self) -> String {
        let mut tags = vec![
            format!("<title>{}</title>", escape(&self.title)),
            meta_name("description", &self.description),
            meta_name(
                "robots",
                &format!(
                    "{},{}",
                    if self.robots.index { "index" } else { "noindex" },
                    if self.robots.follow { "follow" } else { "nofollow" }
                ),
            ),
            meta_property("og:title", &self.open_graph.title),
            meta_property("og:description", &self.open_graph.description),
            meta_property("og:type", &self.open_graph.kind),
            meta_property("og:locale", &self.open_graph.locale),
            meta_property("og:url", &self.open_graph.url),
            meta_property("og:site_name", &self.open_graph.site_name),
        ];

        for image in &self.open_graph.images {
            tags.push(meta_property("og:image", &image.url));
            tags.push(meta_property("og:image:width", &image.width.to_string()));
            tags.push(meta_property("og:image:height", &image.height.to_string()));
            tags.push(meta_property("og:image:alt", &image.alt));
        }

        tags.push(meta_name("twitter:card", &self.twitter.card));
        tags.push(meta_name("twitter:title", &self.twitter.title));
        tags.push(meta_name("twitter:description", &self.twitter.description));
        if let Some(creator) = &self.twitter.creator {
            tags.push(meta_name("twitter:creator", creator));
        }
        if let Some(site) = &self.twitter.site {
            tags.push(meta_name("twitter:site", site));
        }
        if let Some(canonical) = &self.canonical {
            tags.push(format!(r#"<link rel="canonical" href="{}">"#, escape(canonical)));
        }

        tags.join("\n")
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!(r#"<meta name="{}" content="{}">"#, name, escape(content))
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        property,
        escape(content)
    )
}
