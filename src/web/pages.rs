//! Page handlers.
//!
//! Routed pages live under `/{locale}` and take their locale from the path.
//! The dashboard and admin sections have no locale in the URL and resolve it
//! through [`GlobalI18nConfig`] from the same cookie and header.

use crate::i18n::{read_cookie, GlobalI18nConfig, Provenance, ResolvedLocale};
use crate::seo::{generate, OpenGraphProps, Page, SeoProps};
use crate::theme::Theme;
use crate::web::error::AppError;
use crate::web::html::{self, escape, PageContext};
use crate::web::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use chrono::Utc;
use serde::Deserialize;
use std::fmt::Write;
use tracing::{info, warn};

// ==================== Context ====================

/// Context for a page under `/{segment}`.
///
/// The middleware normally attaches the resolved locale; its provenance is
/// kept when it agrees with the path. Unknown segments are a 404.
fn routed_context(
    state: &AppState,
    segment: &str,
    headers: &HeaderMap,
    resolved: Option<ResolvedLocale>,
) -> Result<PageContext, AppError> {
    let Some(locale) = state.registry.get(segment) else {
        return Err(AppError::NotFound(format!("unknown locale '{}'", segment)));
    };

    let locale = match resolved {
        Some(resolved) if resolved.locale == locale => resolved,
        _ => ResolvedLocale {
            locale: locale.to_string(),
            direction: state.registry.direction(locale),
            provenance: Provenance::PathSegment,
        },
    };

    let messages = state.loader.load(&locale.locale)?;
    Ok(PageContext {
        locale,
        messages,
        theme: Theme::from_headers(headers),
        registry: state.registry.clone(),
    })
}

/// Context for a page outside the routed tree.
fn global_context(state: &AppState, headers: &HeaderMap) -> Result<PageContext, AppError> {
    let cookie = read_cookie(headers, state.registry.cookie_name());
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let config = GlobalI18nConfig::resolve(&state.registry, &state.loader, cookie, accept_language)?;
    Ok(PageContext {
        locale: config.locale,
        messages: config.messages,
        theme: Theme::from_headers(headers),
        registry: state.registry.clone(),
    })
}

fn render(state: &AppState, ctx: &PageContext, props: &SeoProps, current_path: &str, body: &str) -> Html<String> {
    let metadata = generate(props, &ctx.locale.locale, &state.config.site_url);
    Html(html::document(ctx, &metadata, current_path, body))
}

fn canonical(state: &AppState, ctx: &PageContext, path: &str) -> Option<String> {
    Some(format!("{}{}", state.config.site_url, ctx.href(path)))
}

fn rendered_at() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ==================== Routed Pages ====================

pub async fn home(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Html<String>, AppError> {
    let ctx = routed_context(&state, &segment, &headers, resolved.map(|Extension(r)| r))?;
    let t = ctx.translator(Some("HomePage"));

    let body = format!(
        r#"{nav}
<h1>{title}</h1>
<p>{description}</p>
<section class="sections">
<a href="{about}">{about_label}</a>
<a href="/dashboard">{dashboard_label}</a>
<a href="/admin">{admin_label}</a>
</section>
<p class="locale-info">{locale_label}: {locale} ({provenance}, {direction})</p>"#,
        nav = html::navigation(&ctx),
        title = escape(&t.t("title")),
        description = escape(&t.t("description")),
        about = escape(&ctx.href("/about")),
        about_label = escape(&t.t("learnMore")),
        dashboard_label = escape(&t.t("dashboardLink")),
        admin_label = escape(&t.t("adminLink")),
        locale_label = ctx.te("Dashboard.localeInfo.current"),
        locale = escape(&ctx.locale.locale),
        provenance = ctx.locale.provenance,
        direction = ctx.locale.direction,
    );

    let props = SeoProps {
        canonical: canonical(&state, &ctx, "/"),
        ..Page::Home.props()
    };
    Ok(render(&state, &ctx, &props, "/", &body))
}

pub async fn about(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Html<String>, AppError> {
    let ctx = routed_context(&state, &segment, &headers, resolved.map(|Extension(r)| r))?;
    let t = ctx.translator(Some("AboutPage"));

    let body = format!(
        r#"{nav}
<h1>{title}</h1>
<p>{intro}</p>
<p>{features_title}</p>
{features}
<a href="{home}">&larr; {back}</a>"#,
        nav = html::navigation(&ctx),
        title = escape(&t.t("title")),
        intro = escape(&t.t("intro")),
        features_title = escape(&t.t("featuresTitle")),
        features = html::list(
            &ctx,
            "AboutPage.features",
            &["locales", "detection", "rtl", "routing", "switcher", "seo", "typed"],
        ),
        home = escape(&ctx.href("/")),
        back = ctx.te("Common.backToHome"),
    );

    let props = SeoProps {
        canonical: canonical(&state, &ctx, "/about"),
        ..Page::About.props()
    };
    Ok(render(&state, &ctx, &props, "/about", &body))
}

// ==================== Contact ====================

/// Office details shown on the contact page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub office: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
}

impl ContactInfo {
    pub fn for_locale(locale: &str) -> ContactInfo {
        match locale {
            "ar-AE" => ContactInfo {
                office: "مكتب دبي",
                address: "123 خليج الأعمال، دبي، الإمارات العربية المتحدة",
                phone: "+971 4 123 4567",
                email: "contact@example.com",
                hours: "الأحد - الخميس: 9:00 صباحاً - 6:00 مساءً",
            },
            _ => ContactInfo {
                office: "Dubai Office",
                address: "123 Business Bay, Dubai, UAE",
                phone: "+971 4 123 4567",
                email: "contact@example.com",
                hours: "Sunday - Thursday: 9:00 AM - 6:00 PM",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Names of the required fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

fn contact_page(
    state: &AppState,
    ctx: &PageContext,
    success: bool,
    error: Option<&str>,
    form: &ContactForm,
) -> Html<String> {
    let t = ctx.translator(Some("ContactPage"));
    let info = ContactInfo::for_locale(&ctx.locale.locale);

    let mut body = format!("{}\n<h1>{}</h1>\n", html::navigation(ctx), escape(&t.t("title")));
    if success {
        let _ = writeln!(body, r#"<div class="notice success">{}</div>"#, escape(&t.t("successMessage")));
    }
    if let Some(error) = error {
        let _ = writeln!(body, r#"<div class="notice error" role="alert">{}</div>"#, escape(error));
    }

    let _ = write!(
        body,
        r#"<p>{description}</p>
<section class="contact-info">
<h2>{info_title}</h2>
<p><strong>{office_label}:</strong><br>{office}</p>
<p><strong>{address_label}:</strong><br>{address}</p>
<p><strong>{phone_label}:</strong><br><a href="tel:{phone}">{phone}</a></p>
<p><strong>{email_label}:</strong><br><a href="mailto:{email}">{email}</a></p>
<p><strong>{hours_label}:</strong><br>{hours}</p>
</section>
<section class="contact-form">
<h2>{send}</h2>
<form method="post" action="{action}">
<label for="name">{email_name}</label>
<input type="text" id="name" name="name" value="{name}" required>
<label for="email">{email_label}</label>
<input type="email" id="email" name="email" value="{email_value}" required>
<label for="message">{message_label}</label>
<textarea id="message" name="message" rows="4" required>{message}</textarea>
<button type="submit">{submit}</button>
</form>
</section>
<p class="rendered"><strong>{rendered_label}:</strong> {rendered}</p>
<a href="{home}">&larr; {back}</a>"#,
        description = escape(&t.t("description")),
        info_title = escape(&t.t("contactInfo")),
        office_label = escape(&t.t("office")),
        office = escape(info.office),
        address_label = escape(&t.t("address")),
        address = escape(info.address),
        phone_label = escape(&t.t("phone")),
        phone = escape(info.phone),
        email_label = escape(&t.t("email")),
        email = escape(info.email),
        hours_label = escape(&t.t("hours")),
        hours = escape(info.hours),
        send = escape(&t.t("sendMessage")),
        action = escape(&ctx.href("/contact")),
        email_name = escape(&t.t("name")),
        name = escape(&form.name),
        email_value = escape(&form.email),
        message_label = escape(&t.t("message")),
        message = escape(&form.message),
        submit = escape(&t.t("submit")),
        rendered_label = escape(&t.t("serverRendered")),
        rendered = rendered_at(),
        home = escape(&ctx.href("/")),
        back = ctx.te("Common.backToHome"),
    );

    let props = SeoProps {
        canonical: canonical(state, ctx, "/contact"),
        open_graph: Some(OpenGraphProps {
            title: Some(ctx.t("SEO.contact.ogTitle")),
            description: Some(ctx.t("SEO.contact.ogDescription")),
            kind: Some("website".to_string()),
            ..Default::default()
        }),
        ..SeoProps::titled(ctx.t("SEO.contact.title"), ctx.t("SEO.contact.description"))
    };
    render(state, ctx, &props, "/contact", &body)
}

pub async fn contact(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(query): Query<ContactQuery>,
    headers: HeaderMap,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Html<String>, AppError> {
    let ctx = routed_context(&state, &segment, &headers, resolved.map(|Extension(r)| r))?;
    let success = query.success.as_deref() == Some("true");
    Ok(contact_page(&state, &ctx, success, None, &ContactForm::default()))
}

/// Validate and log a contact submission, then send the browser back to the
/// contact page with the success flag.
pub async fn submit_contact(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    resolved: Option<Extension<ResolvedLocale>>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let ctx = routed_context(&state, &segment, &headers, resolved.map(|Extension(r)| r))?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        warn!("Rejected contact submission, missing: {}", missing.join(", "));
        let error = ctx.t("ContactPage.required");
        let page = contact_page(&state, &ctx, false, Some(&error), &form);
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    info!(
        locale = %ctx.locale.locale,
        name = %form.name.trim(),
        email = %form.email.trim(),
        message_len = form.message.trim().chars().count(),
        timestamp = %Utc::now().to_rfc3339(),
        "Contact form submission"
    );

    let target = format!("{}?success=true", ctx.href("/contact"));
    Ok(Redirect::to(&target).into_response())
}

// ==================== Dashboard & Admin ====================

/// Mock dashboard figures, formatted per locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub total_users: u64,
    pub total_orders: u64,
    pub revenue: &'static str,
    pub growth: &'static str,
}

impl DashboardData {
    pub fn for_locale(locale: &str) -> DashboardData {
        let revenue = match locale {
            "ar-AE" => "12,345 د.إ",
            _ => "$12,345",
        };
        DashboardData {
            total_users: 1234,
            total_orders: 567,
            revenue,
            growth: "+12.5%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsData {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub bounce_rate: &'static str,
    pub avg_session: &'static str,
    pub top_pages: [(&'static str, u64); 3],
}

impl AnalyticsData {
    pub fn for_locale(locale: &str) -> AnalyticsData {
        match locale {
            "ar-AE" => AnalyticsData {
                page_views: 45672,
                unique_visitors: 8934,
                bounce_rate: "34.2%",
                avg_session: "2د 45ث",
                top_pages: [("/الرئيسية", 12453), ("/حول", 8901), ("/اتصل-بنا", 5432)],
            },
            _ => AnalyticsData {
                page_views: 45672,
                unique_visitors: 8934,
                bounce_rate: "34.2%",
                avg_session: "2m 45s",
                top_pages: [("/home", 12453), ("/about", 8901), ("/contact", 5432)],
            },
        }
    }
}

fn stat_cards(ctx: &PageContext, namespace: &str, stats: &[(&str, String)]) -> String {
    let t = ctx.translator(Some(namespace));
    let mut html = String::from(r#"<dl class="stats">"#);
    for (key, value) in stats {
        let _ = write!(
            html,
            "<div><dt>{}</dt><dd>{}</dd></div>",
            escape(&t.t(key)),
            escape(value)
        );
    }
    html.push_str("</dl>");
    html
}

pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ctx = global_context(&state, &headers)?;
    let data = DashboardData::for_locale(&ctx.locale.locale);
    let t = ctx.translator(Some("Dashboard"));

    let body = format!(
        r#"<h1>{title}</h1>
<p>{welcome}</p>
<section class="locale-info">
<h2>{info_title}</h2>
<p><strong>{current_label}:</strong> {locale}</p>
<p><strong>{source_label}:</strong> {provenance}</p>
<p><strong>{direction_label}:</strong> {direction}</p>
</section>
{stats}
<section class="comparison">
<h2>{comparison_title}</h2>
<h3>{without_routing}</h3>
{without_list}
<h3>{with_routing} ({main_site})</h3>
{with_list}
</section>
<nav class="dashboard-nav">
<h2>{nav_title}</h2>
<a href="/dashboard/analytics">{analytics}</a><p>{analytics_desc}</p>
<a href="{home}">{back}</a><p>{main_site_desc}</p>
</nav>
<p class="rendered">{rendered_label}: {rendered}</p>"#,
        title = escape(&t.t("title")),
        welcome = escape(&t.t("welcome")),
        info_title = escape(&t.t("localeInfo.title")),
        current_label = escape(&t.t("localeInfo.current")),
        locale = escape(&ctx.locale.locale),
        source_label = escape(&t.t("localeInfo.source")),
        provenance = ctx.locale.provenance,
        direction_label = escape(&t.t("localeInfo.direction")),
        direction = ctx.locale.direction.as_str().to_uppercase(),
        stats = stat_cards(
            &ctx,
            "Dashboard.stats",
            &[
                ("users", group_thousands(data.total_users)),
                ("orders", group_thousands(data.total_orders)),
                ("revenue", data.revenue.to_string()),
                ("growth", data.growth.to_string()),
            ],
        ),
        comparison_title = escape(&t.t("comparison.title")),
        without_routing = escape(&t.t("comparison.withoutRouting")),
        without_list = html::list(
            &ctx,
            "Dashboard.comparison.features",
            &["userSettings", "singleUrl", "adminPanel", "cookieBased"],
        ),
        with_routing = escape(&t.t("comparison.withRouting")),
        main_site = escape(&t.t("comparison.mainSite")),
        with_list = html::list(
            &ctx,
            "Dashboard.comparison.features",
            &["seoFriendly", "urlBased", "staticGeneration", "autoDetection"],
        ),
        nav_title = escape(&t.t("navigation.title")),
        analytics = escape(&t.t("navigation.analytics")),
        analytics_desc = escape(&t.t("navigation.analyticsDesc")),
        home = escape(&ctx.href("/")),
        back = ctx.te("Common.backToHome"),
        main_site_desc = escape(&t.t("navigation.mainSiteDesc")),
        rendered_label = escape(&t.t("serverRendered")),
        rendered = rendered_at(),
    );

    let props = SeoProps {
        title: Some(ctx.t("Dashboard.title")),
        ..Page::Dashboard.props()
    };
    Ok(render(&state, &ctx, &props, "/dashboard", &body))
}

pub async fn analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ctx = global_context(&state, &headers)?;
    let data = AnalyticsData::for_locale(&ctx.locale.locale);
    let t = ctx.translator(Some("Analytics"));

    let mut top_pages = String::from(r#"<ul class="top-pages">"#);
    for (page, views) in data.top_pages {
        let _ = write!(
            top_pages,
            "<li><span>{}</span> <span>{} {}</span></li>",
            escape(page),
            group_thousands(views),
            escape(&t.t("topPages.views"))
        );
    }
    top_pages.push_str("</ul>");

    let body = format!(
        r#"<h1>{title}</h1>
<p>{description}</p>
{metrics}
<section>
<h2>{top_title}</h2>
{top_pages}
</section>
<a href="/dashboard">&larr; {back_dashboard}</a>
<a href="{home}">{back_home}</a>"#,
        title = escape(&t.t("title")),
        description = escape(&t.t("description")),
        metrics = stat_cards(
            &ctx,
            "Analytics.metrics",
            &[
                ("pageViews", group_thousands(data.page_views)),
                ("uniqueVisitors", group_thousands(data.unique_visitors)),
                ("bounceRate", data.bounce_rate.to_string()),
                ("avgSession", data.avg_session.to_string()),
            ],
        ),
        top_title = escape(&t.t("topPages.title")),
        top_pages = top_pages,
        back_dashboard = escape(&t.t("backToDashboard")),
        home = escape(&ctx.href("/")),
        back_home = ctx.te("Common.backToHome"),
    );

    let props = SeoProps {
        title: Some(ctx.t("Analytics.title")),
        description: Some(ctx.t("Analytics.description")),
        ..Page::Dashboard.props()
    };
    Ok(render(&state, &ctx, &props, "/dashboard/analytics", &body))
}

pub async fn admin(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ctx = global_context(&state, &headers)?;
    let t = ctx.translator(Some("Admin"));

    let body = format!(
        r#"<h1>{title}</h1>
<p>{description}</p>
<section>
<h2>{reuse_title}</h2>
{reuse}
</section>
<a href="/dashboard">{dashboard}</a>
<a href="{home}">{back}</a>
<p class="rendered">{locale_label}: {locale} | {rendered}</p>"#,
        title = escape(&t.t("title")),
        description = escape(&t.t("description")),
        reuse_title = escape(&t.t("reuseTitle")),
        reuse = html::list(&ctx, "Admin.reuse", &["cookie", "detection", "loading"]),
        dashboard = ctx.te("Dashboard.title"),
        home = escape(&ctx.href("/")),
        back = ctx.te("Common.backToHome"),
        locale_label = ctx.te("Dashboard.localeInfo.current"),
        locale = escape(&ctx.locale.locale),
        rendered = rendered_at(),
    );

    let props = SeoProps {
        noindex: true,
        nofollow: true,
        ..SeoProps::titled(t.t("title"), t.t("description"))
    };
    Ok(render(&state, &ctx, &props, "/admin", &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(567), "567");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(45672), "45,672");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_contact_form_missing_fields() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "  ".to_string(),
            message: String::new(),
        };
        assert_eq!(form.missing_fields(), vec!["email", "message"]);

        let complete = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        assert!(complete.missing_fields().is_empty());
    }

    #[test]
    fn test_locale_specific_data() {
        assert_eq!(DashboardData::for_locale("en-US").revenue, "$12,345");
        assert_eq!(DashboardData::for_locale("ar-AE").revenue, "12,345 د.إ");
        assert_eq!(DashboardData::for_locale("fr-FR"), DashboardData::for_locale("en-US"));

        assert_eq!(ContactInfo::for_locale("ar-AE").office, "مكتب دبي");
        assert_eq!(ContactInfo::for_locale("de-DE").office, "Dubai Office");

        assert_eq!(AnalyticsData::for_locale("ar-AE").avg_session, "2د 45ث");
        assert_eq!(AnalyticsData::for_locale("en-US").top_pages[0], ("/home", 12453));
    }
}
