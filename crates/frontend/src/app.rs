//! Page wiring: listeners, inline-handler globals and the async form flows

use crate::dom::Dom;
use crate::storage::BrowserStorage;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use kitebot_frontend_common::messages;
use kitebot_frontend_common::{
    ApiClient, ApiConfig, AuthMode, AuthPanel, NavState, PageId, Portal, PortalConfig,
    StatusMessage,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

const FEEDBACK_FORM: &str = "feedback-form";
const FEEDBACK_MESSAGE: &str = "feedback-message";
const KEY_STATUS: &str = "key-status";

pub struct App {
    portal: Portal<BrowserStorage>,
    dom: Dom,
}

/// Start once the document is parsed
pub fn boot() -> Result<(), JsValue> {
    let dom = Dom::new().ok_or_else(|| JsValue::from_str("no document"))?;

    if dom.document().ready_state() == "loading" {
        EventListener::once(dom.document(), "DOMContentLoaded", |_| {
            if let Err(e) = start() {
                tracing::error!(error = ?e, "portal failed to start");
            }
        })
        .forget();
        Ok(())
    } else {
        start()
    }
}

fn start() -> Result<(), JsValue> {
    let dom = Dom::new().ok_or_else(|| JsValue::from_str("no document"))?;

    let config = ApiConfig::resolve(dom.meta_content(ApiConfig::META_NAME).as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let api = ApiClient::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let storage = BrowserStorage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::info!(base_url = config.base_url(), "portal starting");

    let app = Rc::new(App {
        portal: Portal::new(storage, api, dom.page_ids()),
        dom,
    });

    {
        let dom = app.dom.clone();
        app.portal
            .sessions()
            .subscribe(move |session| dom.render_nav(&NavState::from_session(session)));
    }

    if let Some(display) = app.portal.hydrate() {
        app.dom.show_key(&display);
        app.refresh_key_status();
    }
    app.route_from_location();

    app.attach_listeners();
    app.install_globals()?;

    if current_fragment().as_deref() == Some(PortalConfig::AUTH_PAGE) {
        app.show_auth(AuthMode::Login);
    }
    Ok(())
}

fn current_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Some(hash.trim_start_matches('#').to_string())
}

impl App {
    pub fn navigate(&self, page: &PageId) {
        let nav = self.portal.navigate_to(page);
        self.dom.apply_navigation(&nav);
    }

    pub fn route_from_location(&self) {
        let fragment = current_fragment().unwrap_or_default();
        let nav = self.portal.resolve_from_location(&fragment);
        self.dom.apply_navigation(&nav);
    }

    pub fn show_auth(&self, mode: AuthMode) {
        self.dom.show_auth_panel(&AuthPanel::for_mode(mode));
    }

    pub fn logout(&self) {
        let nav = self.portal.logout();
        self.dom.apply_navigation(&nav);
    }

    pub fn handle_auth(self: &Rc<Self>, mode: AuthMode) {
        let Some(form) = self.dom.read_auth_form(mode) else {
            return;
        };
        self.dom.show_status(
            mode.message_id(),
            &StatusMessage::pending(messages::AUTH_PENDING),
        );

        let app = Rc::clone(self);
        spawn_local(async move {
            let outcome = app.portal.authenticate(mode, form).await;

            if let Some(credentials) = &outcome.credentials {
                app.dom.show_key(credentials);
            }
            app.dom.show_status(mode.message_id(), &outcome.message);

            if let Some(redirect) = outcome.redirect {
                app.refresh_key_status();
                let target = Rc::clone(&app);
                Timeout::new(redirect.delay_ms, move || target.navigate(&redirect.page)).forget();
            }
        });
    }

    pub fn handle_feedback(self: &Rc<Self>) {
        let request = self
            .dom
            .read_feedback_form()
            .ok_or_else(|| StatusMessage::error(messages::FEEDBACK_MISSING_FIELDS))
            .and_then(|form| self.portal.prepare_feedback(&form));

        let request = match request {
            Ok(request) => request,
            Err(message) => {
                self.dom.show_status(FEEDBACK_MESSAGE, &message);
                return;
            }
        };
        self.dom.show_status(
            FEEDBACK_MESSAGE,
            &StatusMessage::pending(messages::FEEDBACK_PENDING),
        );

        let app = Rc::clone(self);
        spawn_local(async move {
            let outcome = app.portal.send_feedback(request).await;
            app.dom.show_status(FEEDBACK_MESSAGE, &outcome.message);
            if outcome.reset_form {
                app.dom.reset_form(FEEDBACK_FORM);
            }
        });
    }

    fn refresh_key_status(self: &Rc<Self>) {
        if !self.dom.has(KEY_STATUS) {
            return;
        }
        let app = Rc::clone(self);
        spawn_local(async move {
            if let Some(line) = app.portal.key_status().await {
                app.dom.set_text(KEY_STATUS, &line);
            }
        });
    }

    fn attach_listeners(self: &Rc<Self>) {
        for link in self.dom.select_all(".nav-link") {
            let app = Rc::clone(self);
            EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let page = event
                        .current_target()
                        .and_then(|target| target.dyn_into::<Element>().ok())
                        .and_then(|el| el.get_attribute("data-page"))
                        .filter(|page| !page.is_empty());
                    if let Some(page) = page {
                        app.navigate(&PageId::new(page));
                    }
                },
            )
            .forget();
        }

        if let Some(window) = web_sys::window() {
            let app = Rc::clone(self);
            EventListener::new(&window, "hashchange", move |_| app.route_from_location()).forget();
        }

        // Elements with an inline onsubmit/onclick go through the exported globals instead
        for mode in [AuthMode::Login, AuthMode::Register] {
            self.on_submit(mode.form_id(), move |app| app.handle_auth(mode));
        }
        self.on_submit(FEEDBACK_FORM, |app| app.handle_feedback());

        if let Some(button) = self
            .dom
            .by_id("logout-btn")
            .filter(|button| needs_listener(button, "onclick"))
        {
            let app = Rc::clone(self);
            EventListener::new(&button, "click", move |_| app.logout()).forget();
        }
    }

    fn on_submit(self: &Rc<Self>, form_id: &str, handler: impl Fn(&Rc<Self>) + 'static) {
        let Some(form) = self.dom.by_id(form_id) else {
            return;
        };
        if !needs_listener(&form, "onsubmit") {
            return;
        }

        let app = Rc::clone(self);
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                handler(&app);
            },
        )
        .forget();
    }

    /// Expose the handlers inline HTML attributes call by name
    fn install_globals(self: &Rc<Self>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let global: &JsValue = window.as_ref();

        let app = Rc::clone(self);
        let change_page = Closure::<dyn Fn(JsValue)>::new(move |page: JsValue| {
            if let Some(page) = page.as_string() {
                app.navigate(&PageId::new(page));
            }
        });
        set_global(global, "changePage", change_page.into_js_value())?;

        let app = Rc::clone(self);
        let show_auth = Closure::<dyn Fn(JsValue)>::new(move |kind: JsValue| {
            app.show_auth(AuthMode::parse(&kind.as_string().unwrap_or_default()));
        });
        set_global(global, "showAuth", show_auth.into_js_value())?;

        let app = Rc::clone(self);
        let handle_auth = Closure::<dyn Fn(JsValue, JsValue)>::new(
            move |event: JsValue, kind: JsValue| {
                prevent_default(&event);
                app.handle_auth(AuthMode::parse(&kind.as_string().unwrap_or_default()));
            },
        );
        set_global(global, "handleAuth", handle_auth.into_js_value())?;

        let app = Rc::clone(self);
        let submit_feedback = Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| {
            prevent_default(&event);
            app.handle_feedback();
        });
        set_global(global, "submitFeedback", submit_feedback.into_js_value())?;

        let app = Rc::clone(self);
        let logout = Closure::<dyn Fn()>::new(move || app.logout());
        set_global(global, "handleLogout", logout.into_js_value())
    }
}

/// `false` when the markup already wires `inline` to one of the exported globals
fn needs_listener(el: &Element, inline: &str) -> bool {
    !el.has_attribute(inline)
}

fn prevent_default(event: &JsValue) {
    if let Some(event) = event.dyn_ref::<Event>() {
        event.prevent_default();
    }
}

fn set_global(global: &JsValue, name: &str, value: JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(global, &JsValue::from_str(name), &value).map(drop)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> Element {
        Dom::new().unwrap().document().create_element(tag).unwrap()
    }

    #[wasm_bindgen_test]
    fn inline_onclick_skips_logout_listener() {
        let button = element("button");
        assert!(needs_listener(&button, "onclick"));

        button.set_attribute("onclick", "handleLogout()").unwrap();
        assert!(!needs_listener(&button, "onclick"));
    }

    #[wasm_bindgen_test]
    fn inline_onsubmit_skips_form_listener() {
        let form = element("form");
        form.set_attribute("onsubmit", "handleAuth(event, 'login')").unwrap();
        assert!(!needs_listener(&form, "onsubmit"));
        assert!(needs_listener(&form, "onclick"));
    }
}
