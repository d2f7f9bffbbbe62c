#![forbid(unsafe_code)]

//! Page markup.

use treasure_core::view::{
    CANVAS_CLASS, CLEAR_BUTTON_CLASS, CLEAR_ICON_SVG, FOOTER_CLASS, FOOTER_TEXT, HEADER_CLASS,
    MAIN_CLASS, SEARCH_PLACEHOLDER, SEARCH_WRAP_CLASS, TITLE, TITLE_CLASS, results_html,
};
use treasure_core::PageView;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::error::MountError;

/// Elements of a mounted page.
pub(crate) struct PageDom {
    pub(crate) root: HtmlElement,
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) toggle: HtmlElement,
    pub(crate) input: HtmlInputElement,
    pub(crate) clear: HtmlElement,
    results: Element,
    last_results_html: Option<String>,
}

fn create<T: JsCast>(doc: &Document, tag: &str) -> Result<T, MountError> {
    doc.create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| MountError::Dom(format!("<{tag}> has an unexpected type")))
}

impl PageDom {
    /// Build the markup and append it to `host`.
    pub(crate) fn build(doc: &Document, host: &Element) -> Result<Self, MountError> {
        let root: HtmlElement = create(doc, "div")?;

        let canvas: HtmlCanvasElement = create(doc, "canvas")?;
        canvas.set_class_name(CANVAS_CLASS);
        root.append_child(&canvas)?;

        let header: Element = create(doc, "header")?;
        header.set_class_name(HEADER_CLASS);
        let title: Element = create(doc, "h1")?;
        title.set_class_name(TITLE_CLASS);
        title.set_text_content(Some(TITLE));
        header.append_child(&title)?;
        let toggle: HtmlElement = create(doc, "button")?;
        toggle.set_attribute("type", "button")?;
        header.append_child(&toggle)?;
        root.append_child(&header)?;

        let main: Element = create(doc, "main")?;
        main.set_class_name(MAIN_CLASS);
        let wrap: Element = create(doc, "div")?;
        wrap.set_class_name(SEARCH_WRAP_CLASS);
        let input: HtmlInputElement = create(doc, "input")?;
        input.set_type("text");
        input.set_placeholder(SEARCH_PLACEHOLDER);
        wrap.append_child(&input)?;
        let clear: HtmlElement = create(doc, "button")?;
        clear.set_attribute("type", "button")?;
        clear.set_attribute("aria-label", "Очистить")?;
        clear.set_class_name(CLEAR_BUTTON_CLASS);
        clear.set_inner_html(CLEAR_ICON_SVG);
        wrap.append_child(&clear)?;
        main.append_child(&wrap)?;
        let results: Element = create(doc, "div")?;
        results.set_class_name("w-full");
        main.append_child(&results)?;
        root.append_child(&main)?;

        let footer: Element = create(doc, "footer")?;
        footer.set_class_name(FOOTER_CLASS);
        footer.set_text_content(Some(FOOTER_TEXT));
        root.append_child(&footer)?;

        host.append_child(&root)?;

        Ok(Self {
            root,
            canvas,
            toggle,
            input,
            clear,
            results,
            last_results_html: None,
        })
    }

    /// Bring the markup in line with `view`.
    pub(crate) fn render(&mut self, view: &PageView) {
        self.root.set_class_name(&view.root_class());
        self.toggle.set_class_name(&view.toggle_class());
        self.toggle.set_text_content(Some(view.toggle_label()));
        self.input.set_class_name(&view.input_class());
        // Rewriting an equal value would move the caret.
        if self.input.value() != view.query {
            self.input.set_value(&view.query);
        }
        self.clear.set_hidden(!view.show_clear);

        let html = results_html(view);
        if self.last_results_html.as_deref() != Some(html.as_str()) {
            self.results.set_inner_html(&html);
            self.last_results_html = Some(html);
        }
    }

    /// Detach the page from its host.
    pub(crate) fn remove(&self) {
        self.root.remove();
    }
}
