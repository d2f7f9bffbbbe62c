#![forbid(unsafe_code)]

//! Markup view model.
//!
//! [`PageView`] is a plain snapshot of everything the page shows for a given
//! theme and search state: texts, which optional sections are visible, and
//! the CSS utility classes that switch between the two visual themes. Hosts
//! render it; the web host also uses [`results_html`] for the result
//! section.

use std::fmt::Write as _;

use crate::filter::SearchState;
use crate::record::Record;
use crate::theme::Theme;

pub const TITLE: &str = "Карта Кладов";
pub const SEARCH_PLACEHOLDER: &str = "Введите текст записки...";
pub const EMPTY_STATE_MESSAGE: &str = "Ничего не найдено. Попробуйте другой текст.";
pub const FOOTER_TEXT: &str = "© 2023 Карта Кладов. Все права защищены.";

const ROOT_BASE_CLASS: &str =
    "min-h-screen flex flex-col items-center transition-colors duration-300 relative overflow-hidden";
const TOGGLE_BASE_CLASS: &str = "px-4 py-2 rounded-full transition-all duration-300";
const INPUT_BASE_CLASS: &str = "w-full px-4 py-3 rounded-lg outline-none transition-all duration-300";

pub const CANVAS_CLASS: &str = "absolute inset-0 z-0 pointer-events-none";
pub const HEADER_CLASS: &str = "w-full py-6 px-8 flex justify-between items-center relative z-10";
pub const TITLE_CLASS: &str = "text-3xl font-bold";
pub const MAIN_CLASS: &str =
    "flex flex-col items-center w-full max-w-4xl p-8 space-y-8 relative z-10";
pub const SEARCH_WRAP_CLASS: &str = "relative w-full";
pub const CLEAR_BUTTON_CLASS: &str = "absolute right-4 top-1/2 transform -translate-y-1/2 text-gray-500 hover:text-gray-700 transition-colors duration-300";
pub const FOOTER_CLASS: &str =
    "mt-auto py-6 text-center text-gray-600 dark:text-gray-400 relative z-10";

/// SVG cross icon drawn inside the clear control.
pub const CLEAR_ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M4.293 4.293a1 1 0 011.414 0L10 8.586l4.293-4.293a1 1 0 111.414 1.414L11.414 10l4.293 4.293a1 1 0 01-1.414 1.414L10 11.414l-4.293 4.293a1 1 0 01-1.414-1.414L8.586 10 4.293 5.707a1 1 0 010-1.414z" clip-rule="evenodd"/></svg>"#;

/// What the result area shows. Exactly one applies at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Blank query: nothing below the search box.
    Idle,
    /// A search is pending.
    Loading,
    /// Result cards in record order.
    Cards(Vec<Record>),
    /// A non-empty query matched nothing.
    Empty,
}

/// Everything the page markup depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub theme: Theme,
    pub query: String,
    pub show_clear: bool,
    pub results: ResultsView,
}

impl PageView {
    /// Build the snapshot for `theme` and `search`.
    #[must_use]
    pub fn build(theme: Theme, search: &SearchState) -> Self {
        let results = if search.is_loading() {
            ResultsView::Loading
        } else if !search.results().is_empty() {
            ResultsView::Cards(search.results().to_vec())
        } else if search.shows_empty_state() {
            ResultsView::Empty
        } else {
            ResultsView::Idle
        };
        Self {
            theme,
            query: search.query().to_owned(),
            show_clear: !search.query().is_empty(),
            results,
        }
    }

    /// Classes of the full-viewport container.
    #[must_use]
    pub fn root_class(&self) -> String {
        let themed = match self.theme {
            Theme::Light => "bg-gradient-to-b from-blue-100 to-white text-gray-900",
            Theme::Dark => "bg-gradient-to-b from-gray-900 to-black text-white",
        };
        format!("{ROOT_BASE_CLASS} {themed}")
    }

    /// Classes of the theme toggle button.
    #[must_use]
    pub fn toggle_class(&self) -> String {
        let themed = match self.theme {
            Theme::Light => "bg-blue-500 text-white hover:bg-blue-600",
            Theme::Dark => "bg-gray-700 text-white hover:bg-gray-600",
        };
        format!("{TOGGLE_BASE_CLASS} {themed}")
    }

    /// Label of the theme toggle: it names the theme it switches to.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        match self.theme {
            Theme::Light => "🌙 Темная тема",
            Theme::Dark => "☀️ Светлая тема",
        }
    }

    /// Classes of the search input.
    #[must_use]
    pub fn input_class(&self) -> String {
        let themed = match self.theme {
            Theme::Light => "bg-white border border-gray-300 focus:border-blue-500",
            Theme::Dark => "bg-gray-800 border border-gray-700 focus:border-blue-500",
        };
        format!("{INPUT_BASE_CLASS} {themed}")
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.results == ResultsView::Loading
    }

    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        self.results == ResultsView::Empty
    }
}

/// HTML for the result area (spinner, cards, or empty-state message).
///
/// All record text is escaped.
#[must_use]
pub fn results_html(view: &PageView) -> String {
    let mut html = String::new();
    match &view.results {
        ResultsView::Idle => {}
        ResultsView::Loading => {
            html.push_str(
                r#"<div class="w-full flex justify-center"><div class="animate-spin rounded-full h-10 w-10 border-t-2 border-b-2 border-blue-500"></div></div>"#,
            );
        }
        ResultsView::Cards(cards) => {
            html.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 gap-6 w-full">"#);
            let overlay_hover = match view.theme {
                Theme::Light => " hover:bg-opacity-70",
                Theme::Dark => "",
            };
            for record in cards {
                let location = escape_html(record.location);
                let _ = write!(
                    html,
                    concat!(
                        r#"<div class="relative rounded-lg overflow-hidden shadow-lg transition-transform duration-300 hover:scale-105">"#,
                        r#"<img src="{image}" alt="{location}" class="w-full h-48 object-cover">"#,
                        r#"<div class="absolute inset-0 bg-black bg-opacity-50 flex items-center justify-center opacity-0 hover:opacity-100 transition-opacity duration-300{hover}">"#,
                        r#"<p class="text-white text-lg font-semibold">{location}</p></div>"#,
                        r#"<div class="p-4"><h2 class="text-xl font-bold mb-2">{location}</h2>"#,
                        r#"<p class="text-gray-600 dark:text-gray-400">{note}</p></div></div>"#,
                    ),
                    image = escape_html(record.image),
                    location = location,
                    hover = overlay_hover,
                    note = escape_html(record.note),
                );
            }
            html.push_str("</div>");
        }
        ResultsView::Empty => {
            let _ = write!(
                html,
                r#"<p class="text-gray-600 dark:text-gray-400">{}</p>"#,
                escape_html(EMPTY_STATE_MESSAGE)
            );
        }
    }
    html
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
