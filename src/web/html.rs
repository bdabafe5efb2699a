//! Server-rendered HTML: page shell, navigation and the language and theme
//! switchers shared by routed and non-routed pages.

use crate::i18n::{public_path, LocaleRegistry, MessageTree, ResolvedLocale, Translator};
use crate::seo::Metadata;
use crate::theme::Theme;
use std::fmt::Write;
use std::sync::Arc;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything a page needs to render in the request's locale.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub locale: ResolvedLocale,
    pub messages: Arc<MessageTree>,
    pub theme: Theme,
    pub registry: Arc<LocaleRegistry>,
}

impl PageContext {
    pub fn t(&self, key: &str) -> String {
        self.translator(None).t(key)
    }

    /// Escaped translation, ready for markup.
    pub fn te(&self, key: &str) -> String {
        escape(&self.t(key))
    }

    pub fn translator<'a>(&'a self, namespace: Option<&'a str>) -> Translator<'a> {
        Translator::new(&self.messages, namespace)
    }

    /// Link target for a routed page in the current locale.
    pub fn href(&self, path: &str) -> String {
        public_path(&self.registry, &self.locale.locale, path)
    }
}

/// Full HTML document around `body`.
///
/// `current_path` is the locale-independent path of the page (`/about`,
/// `/dashboard`); the switchers send the user back there after saving.
pub fn document(ctx: &PageContext, metadata: &Metadata, current_path: &str, body: &str) -> String {
    let theme_class = ctx.theme.html_class();
    let class_attr = if theme_class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, theme_class)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}" data-theme="{theme}"{class_attr}>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{meta}
</head>
<body>
<header class="toolbar">
{language}
{theme_switcher}
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        lang = escape(&ctx.locale.locale),
        dir = ctx.locale.direction,
        theme = ctx.theme,
        class_attr = class_attr,
        meta = metadata.to_html(),
        language = language_switcher(ctx, current_path),
        theme_switcher = theme_switcher(ctx, current_path),
        body = body,
    )
}

/// Home / About / Contact links for the routed section.
pub fn navigation(ctx: &PageContext) -> String {
    let t = ctx.translator(Some("Navigation"));
    let links = [("/", "home"), ("/about", "about"), ("/contact", "contact")];

    let mut html = String::from(r#"<nav><ul class="nav">"#);
    for (path, key) in links {
        let _ = write!(
            html,
            r#"<li><a href="{}">{}</a></li>"#,
            escape(&ctx.href(path)),
            escape(&t.t(key))
        );
    }
    html.push_str("</ul></nav>");
    html
}

/// One button per supported locale; posting saves the locale cookie.
pub fn language_switcher(ctx: &PageContext, current_path: &str) -> String {
    let t = ctx.translator(Some("Common"));
    let mut html = format!(
        r#"<div class="language-switcher" aria-label="{}"><span>{}:</span>"#,
        escape(&t.t("switchLanguage")),
        escape(&t.t("language"))
    );

    for locale in ctx.registry.locales() {
        let current = if *locale == ctx.locale.locale {
            r#" aria-current="true""#
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<form method="post" action="/api/locale"><input type="hidden" name="locale" value="{locale}"><input type="hidden" name="redirect" value="{redirect}"><button type="submit"{current}>{label}</button></form>"#,
            locale = escape(locale),
            redirect = escape(current_path),
            current = current,
            label = escape(&t.t(&format!("localeNames.{}", locale))),
        );
    }

    html.push_str("</div>");
    html
}

pub fn theme_switcher(ctx: &PageContext, current_path: &str) -> String {
    let t = ctx.translator(Some("Common"));
    let mut html = format!(
        r#"<form class="theme-switcher" method="post" action="/api/theme"><label>{}: <select name="theme" aria-label="{}">"#,
        escape(&t.t("theme")),
        escape(&t.t("switchTheme"))
    );

    for theme in Theme::ALL {
        let selected = if theme == ctx.theme { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            theme,
            selected,
            escape(&t.t(theme.label_key()))
        );
    }

    let _ = write!(
        html,
        r#"</select></label><input type="hidden" name="redirect" value="{}"><button type="submit">{}</button></form>"#,
        escape(current_path),
        escape(&t.t("save"))
    );
    html
}

/// `<ul>` of escaped translations for `keys` under `namespace`.
pub fn list(ctx: &PageContext, namespace: &str, keys: &[&str]) -> String {
    let t = ctx.translator(Some(namespace));
    let items: String = keys
        .iter()
        .map(|key| format!("<li>{}</li>", escape(&t.t(key))))
        .collect();
    format!("<ul>{}</ul>", items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Direction, Provenance};
    use crate::seo::{generate, SeoProps};

    fn context(locale: &str, theme: Theme) -> PageContext {
        let registry = Arc::new(LocaleRegistry::demo());
        let messages = MessageTree::from_json(
            r#"{
                "Common": {
                    "language": "Language",
                    "switchLanguage": "Switch language",
                    "theme": "Theme",
                    "switchTheme": "Switch theme",
                    "themeSystem": "System",
                    "themeLight": "Light",
                    "themeDark": "Dark",
                    "save": "Save",
                    "localeNames": { "en-US": "English", "ar-AE": "العربية" }
                },
                "Navigation": { "home": "Home", "about": "About", "contact": "Contact" }
            }"#,
        )
        .unwrap();

        PageContext {
            locale: ResolvedLocale {
                locale: locale.to_string(),
                direction: registry.direction(locale),
                provenance: Provenance::PathSegment,
            },
            messages: Arc::new(messages),
            theme,
            registry,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("مرحبا"), "مرحبا");
    }

    #[test]
    fn test_document_sets_lang_and_dir() {
        let ctx = context("ar-AE", Theme::Dark);
        assert_eq!(ctx.locale.direction, Direction::Rtl);

        let meta = generate(&SeoProps::default(), "ar-AE", "https://yourdomain.com");
        let html = document(&ctx, &meta, "/about", "<p>body</p>");
        assert!(html.contains(r#"<html lang="ar-AE" dir="rtl" data-theme="dark" class="dark">"#));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"<meta property="og:locale" content="ar_AE">"#));
    }

    #[test]
    fn test_navigation_uses_locale_prefix() {
        let html = navigation(&context("ar-AE", Theme::System));
        assert!(html.contains(r#"<a href="/ar-AE/about">About</a>"#));

        let html = navigation(&context("en-US", Theme::System));
        assert!(html.contains(r#"<a href="/about">About</a>"#));
        assert!(html.contains(r#"<a href="/">Home</a>"#));
    }

    #[test]
    fn test_language_switcher_lists_locales() {
        let html = language_switcher(&context("en-US", Theme::System), "/contact");
        assert!(html.contains(r#"value="ar-AE""#));
        assert!(html.contains("العربية"));
        assert!(html.contains(r#"<button type="submit" aria-current="true">English</button>"#));
        assert!(html.contains(r#"name="redirect" value="/contact""#));
    }

    #[test]
    fn test_theme_switcher_marks_selection() {
        let html = theme_switcher(&context("en-US", Theme::Light), "/");
        assert!(html.contains(r#"<option value="light" selected>Light</option>"#));
        assert!(html.contains(r#"<option value="dark">Dark</option>"#));
    }
}
