//! Applies portal view models to the page and reads form input back
//!
//! Missing elements are skipped silently; the page markup decides which parts exist.

use kitebot_frontend_common::{
    AuthForm, AuthMode, AuthPanel, FeedbackForm, KeyDisplay, NavState, Navigation, PageId,
    StatusMessage,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

const ACTIVE: &str = "active";
const HIDDEN: &str = "hidden";

#[derive(Clone)]
pub struct Dom {
    document: Document,
}

impl Dom {
    pub fn new() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(|document| Self { document })
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    fn html_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// Every element matching `selector`, in document order
    pub fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Ids of every `.page` section
    pub fn page_ids(&self) -> Vec<PageId> {
        self.select_all(".page")
            .into_iter()
            .map(|el| el.id())
            .filter(|id| !id.is_empty())
            .map(PageId::new)
            .collect()
    }

    /// `content` of `<meta name="…">`
    pub fn meta_content(&self, name: &str) -> Option<String> {
        self.document
            .query_selector(&format!("meta[name=\"{name}\"]"))
            .ok()
            .flatten()?
            .get_attribute("content")
    }

    pub fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn set_display(&self, id: &str, visible: bool) {
        if let Some(el) = self.html_by_id(id) {
            set_style(&el, "display", if visible { "block" } else { "none" });
        }
    }

    pub fn apply_navigation(&self, nav: &Navigation) {
        for page in self.select_all(".page") {
            let classes = page.class_list();
            let shown = nav.shown.as_ref().is_some_and(|p| p.as_str() == page.id());
            log_js_error(if shown {
                classes
                    .add_1(ACTIVE)
                    .and_then(|()| classes.remove_1(HIDDEN))
            } else {
                classes
                    .remove_1(ACTIVE)
                    .and_then(|()| classes.add_1(HIDDEN))
            });
        }

        for link in self.select_all(".nav-link") {
            let is_target = link.get_attribute("data-page").as_deref() == Some(nav.target.as_str());
            log_js_error(link.class_list().toggle_with_force(ACTIVE, is_target).map(drop));
        }

        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            log_js_error(history.push_state_with_url(&JsValue::NULL, "", Some(&nav.fragment())));
        }
    }

    pub fn render_nav(&self, nav: &NavState) {
        self.set_display("nav-login", nav.show_login);
        self.set_display("nav-profile", nav.show_profile);
        self.set_display("nav-feedback", nav.show_feedback);
        self.set_display("nav-download", nav.show_download);

        if let Some(username) = &nav.profile_username {
            self.set_text("profile-username", username);
        }
        if let Some(key) = &nav.profile_key {
            self.set_text("trial-key", key);
        }
    }

    pub fn show_key(&self, display: &KeyDisplay) {
        self.set_text("trial-key", &display.key);
        if let Some(expiry) = display.expiry_text() {
            self.set_text("key-expiry-date", expiry);
        }
    }

    pub fn show_status(&self, id: &str, message: &StatusMessage) {
        if let Some(el) = self.html_by_id(id) {
            el.set_text_content(Some(&message.text));
            set_style(&el, "color", message.tone.color());
        }
    }

    pub fn show_auth_panel(&self, panel: &AuthPanel) {
        let toggles = self.select_all(".auth-toggle .toggle-btn");
        for toggle in &toggles {
            log_js_error(toggle.class_list().remove_1(ACTIVE));
        }

        let (Some(_), Some(_), Some(title)) = (
            self.by_id(AuthMode::Login.form_id()),
            self.by_id(AuthMode::Register.form_id()),
            self.by_id("auth-title"),
        ) else {
            return;
        };

        self.set_display(AuthMode::Login.form_id(), panel.shows(AuthMode::Login));
        self.set_display(AuthMode::Register.form_id(), panel.shows(AuthMode::Register));
        title.set_text_content(Some(panel.title));
        if let Some(toggle) = panel.active_toggle.checked_sub(1).and_then(|i| toggles.get(i)) {
            log_js_error(toggle.class_list().add_1(ACTIVE));
        }
    }

    /// Read the login or register form. `None` when the form or its status line is missing.
    pub fn read_auth_form(&self, mode: AuthMode) -> Option<AuthForm> {
        let form = self.by_id(mode.form_id())?;
        self.by_id(mode.message_id())?;

        Some(AuthForm {
            email: input_value(&form, "input[type=\"email\"]").unwrap_or_default(),
            password: input_value(&form, "input[type=\"password\"]").unwrap_or_default(),
            username: match mode {
                AuthMode::Register => input_value(&form, "input[type=\"text\"]"),
                AuthMode::Login => None,
            },
        })
    }

    /// Read the feedback form. `None` when the form is missing.
    pub fn read_feedback_form(&self) -> Option<FeedbackForm> {
        self.by_id("feedback-form")?;

        let text = self.by_id("feedback-text").and_then(|el| {
            el.dyn_ref::<HtmlTextAreaElement>()
                .map(HtmlTextAreaElement::value)
                .or_else(|| el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value))
        });
        let kind = self
            .document
            .query_selector("input[name=\"feedback-type\"]:checked")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value());

        Some(FeedbackForm {
            kind,
            text: text.unwrap_or_default(),
        })
    }

    pub fn reset_form(&self, id: &str) {
        if let Some(form) = self
            .by_id(id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }
}

fn input_value(form: &Element, selector: &str) -> Option<String> {
    form.query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    log_js_error(el.style().set_property(property, value));
}

fn log_js_error(result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(error = ?e, "DOM update failed");
    }
}
