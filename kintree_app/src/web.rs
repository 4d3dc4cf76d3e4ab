// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser wiring.
//!
//! The page provides `#canvas-container` for the tree and a hidden
//! `#profile-modal` holding `#modal-image`, `#modal-name`, `#modal-initials`,
//! and a `.close-btn`. Mouse, wheel, and touch events on the container are
//! translated into [`InputEvent`]s relative to the container's top-left
//! corner. Window resizes update the view size and the SVG viewport. When a
//! required element is missing the tree is not made interactive and a
//! warning is logged.

use std::cell::RefCell;
use std::rc::Rc;

use kintree_record::BirthDate;
use kintree_scene::{Avatar, ProfileView, transform_attr};
use kintree_view::{Contacts, InputEvent, TouchPhase};
use kurbo::{Point, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlImageElement, MouseEvent,
    TouchEvent, WheelEvent,
};

use crate::{App, AppConfig, AppEffects, demo_record};

const CONTAINER_ID: &str = "canvas-container";
const VIEWPORT_ID: &str = "viewport";

/// Entry point run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    if let Err(err) = mount() {
        log::warn!("family tree left non-interactive: {err:?}");
    }
}

struct Modal {
    root: Element,
    image: HtmlImageElement,
    name: Element,
    initials: Element,
    close: Element,
}

impl Modal {
    fn find(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            root: element(document, "profile-modal")?,
            image: element(document, "modal-image")?.dyn_into::<HtmlImageElement>()?,
            name: element(document, "modal-name")?,
            initials: element(document, "modal-initials")?,
            close: document
                .query_selector(".close-btn")?
                .ok_or("element .close-btn not found")?,
        })
    }

    fn sync(&self, view: Option<&ProfileView>) -> Result<(), JsValue> {
        let Some(view) = view else {
            return self.root.class_list().add_1("hidden");
        };
        self.name.set_text_content(Some(&view.name));
        match &view.avatar {
            Avatar::Image(src) => {
                self.image.set_src(src);
                self.image.style().set_property("display", "block")?;
                self.initials.class_list().add_1("hidden")?;
            }
            Avatar::Initials(text) => {
                self.image.style().set_property("display", "none")?;
                self.initials.set_text_content(Some(text));
                self.initials.class_list().remove_1("hidden")?;
            }
        }
        self.root.class_list().remove_1("hidden")
    }
}

struct Page {
    app: App,
    container: Element,
    viewport: Element,
    modal: Modal,
}

impl Page {
    /// Container top-left in client coordinates.
    fn origin(&self) -> Point {
        let rect = self.container.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn input(&mut self, event: &Event, translate: fn(&Event, Point) -> Option<InputEvent>) {
        if let Some(input) = translate(event, self.origin()) {
            let effects = self.app.handle(&input);
            self.apply(effects);
        }
    }

    /// Follows the container's current size.
    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = (self.container.client_width(), self.container.client_height());
        self.app.resize(Size::new(f64::from(width), f64::from(height)));
        if let Some(svg) = self.viewport.parent_element() {
            svg.set_attribute("width", &width.to_string())?;
            svg.set_attribute("height", &height.to_string())?;
            svg.set_attribute("viewBox", &format!("0 0 {width} {height}"))?;
        }
        Ok(())
    }

    fn apply(&self, effects: AppEffects) {
        if let Some(xf) = effects.transform
            && let Err(err) = self.viewport.set_attribute("transform", &transform_attr(xf))
        {
            log::warn!("could not update the viewport transform: {err:?}");
        }
        if effects.profile_changed
            && let Err(err) = self.modal.sync(self.app.profile().view())
        {
            log::warn!("could not update the profile popup: {err:?}");
        }
    }
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window exists")?;
    let document = window.document().ok_or("window has no document")?;
    let container = element(&document, CONTAINER_ID)?;

    let record = demo_record().map_err(|err| JsValue::from(err.to_string()))?;
    let size = Size::new(
        f64::from(container.client_width()),
        f64::from(container.client_height()),
    );
    let app = App::new(record, &AppConfig::default(), size, today()?);
    container.set_inner_html(&app.to_svg());

    let viewport = element(&document, VIEWPORT_ID)?;
    let modal = Modal::find(&document)?;
    let close = modal.close.clone();
    let backdrop = modal.root.clone();
    let page = Rc::new(RefCell::new(Page {
        app,
        container: container.clone(),
        viewport,
        modal,
    }));

    listen(&page, &container, "mousedown", |event, page| {
        page.input(event, |event, origin| {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            (mouse.button() == 0).then(|| InputEvent::PointerDown {
                position: client_point(mouse, origin),
            })
        });
    })?;
    listen(&page, &container, "mousemove", |event, page| {
        page.input(event, |event, origin| {
            Some(InputEvent::PointerMove {
                position: client_point(event.dyn_ref()?, origin),
            })
        });
    })?;
    listen(&page, &container, "mouseup", |event, page| {
        page.input(event, |event, origin| {
            Some(InputEvent::PointerUp {
                position: client_point(event.dyn_ref()?, origin),
            })
        });
    })?;
    listen(&page, &container, "mouseleave", |event, page| {
        page.input(event, |_, _| Some(InputEvent::PointerLeave));
    })?;
    listen(&page, &container, "dblclick", |event, page| {
        page.input(event, |event, origin| {
            Some(InputEvent::DoubleClick {
                position: client_point(event.dyn_ref()?, origin),
            })
        });
    })?;
    listen(&page, &container, "wheel", |event, page| {
        page.input(event, |event, origin| {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            event.prevent_default();
            Some(InputEvent::Wheel {
                position: client_point(wheel, origin),
                delta_y: wheel.delta_y(),
            })
        });
    })?;
    listen(&page, &container, "touchstart", |event, page| {
        page.input(event, |event, origin| touches(event, origin, TouchPhase::Start));
    })?;
    listen(&page, &container, "touchmove", |event, page| {
        page.input(event, |event, origin| touches(event, origin, TouchPhase::Move));
    })?;
    listen(&page, &container, "touchend", |event, page| {
        page.input(event, |event, origin| touches(event, origin, TouchPhase::End));
    })?;
    listen(&page, &container, "touchcancel", |event, page| {
        page.input(event, |event, origin| touches(event, origin, TouchPhase::Cancel));
    })?;

    listen(&page, &window, "resize", |_, page| {
        if let Err(err) = page.resize() {
            log::warn!("could not resize the family tree: {err:?}");
        }
    })?;

    listen(&page, &close, "click", |_, page| {
        let effects = page.app.close_profile();
        page.apply(effects);
    })?;
    listen(&page, &backdrop, "click", |event, page| {
        let target = event.target();
        if target.as_ref().and_then(|t| t.dyn_ref::<Element>()) == Some(&page.modal.root) {
            let effects = page.app.close_profile();
            page.apply(effects);
        }
    })?;

    log::info!("family tree ready");
    Ok(())
}

fn listen(
    page: &Rc<RefCell<Page>>,
    target: &EventTarget,
    kind: &str,
    handler: impl Fn(&Event, &mut Page) + 'static,
) -> Result<(), JsValue> {
    let page = Rc::clone(page);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        // Handlers do not re-enter each other.
        if let Ok(mut page) = page.try_borrow_mut() {
            handler(&event, &mut page);
        }
    });
    // Wheel and touch handlers call `preventDefault`, which passive listeners ignore.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from(format!("element #{id} not found")))
}

fn client_point(mouse: &MouseEvent, origin: Point) -> Point {
    Point::new(
        f64::from(mouse.client_x()) - origin.x,
        f64::from(mouse.client_y()) - origin.y,
    )
}

fn touches(event: &Event, origin: Point, phase: TouchPhase) -> Option<InputEvent> {
    let touch = event.dyn_ref::<TouchEvent>()?;
    event.prevent_default();
    let list = touch.touches();
    let contacts: Contacts = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| {
            Point::new(
                f64::from(t.client_x()) - origin.x,
                f64::from(t.client_y()) - origin.y,
            )
        })
        .collect();
    Some(InputEvent::Touch { phase, contacts })
}

fn today() -> Result<BirthDate, JsValue> {
    let now = js_sys::Date::new_0();
    let date = BirthDate::new(
        i32::try_from(now.get_full_year()).map_err(|_| "year out of range")?,
        u8::try_from(now.get_month() + 1).map_err(|_| "month out of range")?,
        u8::try_from(now.get_date()).map_err(|_| "day out of range")?,
    );
    date.ok_or_else(|| JsValue::from("clock reports an invalid date"))
}
