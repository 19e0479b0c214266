use crate::config::{InteractionConfig, DEFAULT_LOG_LEVEL};
use crate::counter::{CounterAnimation, CounterTarget};
use crate::error::SetupError;
use crate::log::Logger;
use crate::menu::{MenuInput, MenuState};
use crate::observer::{TriggerPolicy, WatchOutcome, WatchSpec, Watcher};
use crate::reveal::{
    reveal_targets, InlineStyle, RevealGroup, Stagger, ANIMATE_IN_CLASS, ANIMATE_IN_STYLESHEET,
    HERO_HIDDEN_STYLE, HERO_SELECTOR, HERO_SETTLED_STYLE, LOADED_CLASS, REVEAL_HIDDEN_STYLE,
};
use crate::scroll::{mobile_menu_top, NavbarPart, NavbarStateController, ScrollSnapshot};
use crate::sections::{ActiveSectionHighlighter, Section};
use crate::smooth_scroll::{
    fragment_id, NavigationOutcome, SmoothScrollNavigator, BACK_TO_TOP_DESTINATION,
};
use crate::typewriter::Typewriter;
use js_sys::Array;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
    Window,
};

const NAVBAR_ID: &str = "navbar";
const NAV_TOGGLE_ID: &str = "navToggle";
const NAV_MENU_ID: &str = "navMenu";
const BACK_TO_TOP_ID: &str = "backToTop";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const SECTION_SELECTOR: &str = "section[id]";
const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const COUNTER_SELECTOR: &str = ".stat-number";
const TYPEWRITER_SELECTOR: &str = "[data-typewriter]";
const TYPEWRITER_ATTRIBUTE: &str = "data-typewriter";
const ACTIVE_CLASS: &str = "active";
const CLINIC_NAME: &str = "Ora Dental Clinic";
const CLINIC_TAGLINE: &str = "Your Smile, Our Passion!";

type MountFn = fn(&Page, &InteractionConfig, Logger) -> Result<(), SetupError>;

#[derive(Clone)]
struct Page {
    window: Window,
    document: Document,
}

impl Page {
    fn resolve() -> Result<Self, SetupError> {
        let window = window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn config(&self) -> InteractionConfig {
        let root = self.document.document_element();
        InteractionConfig::from_lookup(|name| root.as_ref()?.get_attribute(name))
    }

    fn html_element_by_id(&self, id: &'static str) -> Result<HtmlElement, SetupError> {
        self.document
            .get_element_by_id(id)
            .ok_or(SetupError::MissingElement(id))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SetupError::NotHtmlElement(id))
    }

    fn query_all(&self, selector: &'static str) -> Result<Vec<HtmlElement>, SetupError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|_| SetupError::Selector(selector))?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_smoothly_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    /// Runs `callback` once the page has loaded. The wasm module usually
    /// starts after `load` has already fired, so check first.
    fn on_load(&self, callback: impl FnOnce() + 'static) -> Result<(), SetupError> {
        if self.document.ready_state() == "complete" {
            callback();
            return Ok(());
        }

        let callback = Closure::once_into_js(callback);
        self.window
            .add_event_listener_with_callback("load", callback.unchecked_ref())
            .map_err(|_| SetupError::Listener("load"))
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SetupError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|_| SetupError::Listener(event))?;
    // Listeners live as long as the page.
    callback.forget();
    Ok(())
}

fn defer(
    window: &Window,
    delay_ms: u32,
    callback: impl FnOnce() + 'static,
) -> Result<(), SetupError> {
    let callback = Closure::once_into_js(callback);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )
        .map(|_| ())
        .map_err(|_| SetupError::Scheduler("timeout"))
}

fn set_class(element: &HtmlElement, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn apply_style(element: &HtmlElement, style: &InlineStyle) {
    let declaration = element.style();
    for (property, value) in style.properties() {
        let _ = declaration.set_property(property, value);
    }
}

fn inject_stylesheet(document: &Document, css: &str) -> Result<(), SetupError> {
    let style = document
        .create_element("style")
        .map_err(|_| SetupError::Stylesheet)?;
    style.set_text_content(Some(css));

    let head = document.head().ok_or(SetupError::Stylesheet)?;
    head.append_child(&style)
        .map_err(|_| SetupError::Stylesheet)?;
    Ok(())
}

/// Registers one `IntersectionObserver` over `targets`. `on_trigger`
/// receives the index of every target the watcher fires for.
fn watch(
    targets: Vec<HtmlElement>,
    mut watcher: Watcher,
    mut on_trigger: impl FnMut(usize, &HtmlElement) + 'static,
) -> Result<(), SetupError> {
    let spec = watcher.spec();
    let observed = Rc::new(targets);
    let callback_targets = observed.clone();

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_node: &Node = target.as_ref();
                let Some(index) = callback_targets
                    .iter()
                    .position(|element| element.is_same_node(Some(target_node)))
                else {
                    continue;
                };

                if let WatchOutcome::Triggered { unobserve } =
                    watcher.on_entry(index, entry.is_intersecting())
                {
                    if unobserve {
                        observer.unobserve(&target);
                    }
                    on_trigger(index, &callback_targets[index]);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(spec.threshold));
    options.set_root_margin(&spec.root_margin());

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|error| SetupError::Observer(format!("{error:?}")))?;
    callback.forget();

    for target in observed.iter() {
        observer.observe(target);
    }
    Ok(())
}

/// Elements whose `scrolled`, `visible` and `top` state the navbar
/// controller owns. `#backToTop` is optional.
struct NavbarView {
    navbar: HtmlElement,
    menu: HtmlElement,
    back_to_top: Option<HtmlElement>,
}

impl NavbarView {
    fn query(page: &Page) -> Result<Self, SetupError> {
        Ok(Self {
            navbar: page.html_element_by_id(NAVBAR_ID)?,
            menu: page.html_element_by_id(NAV_MENU_ID)?,
            back_to_top: page.html_element_by_id(BACK_TO_TOP_ID).ok(),
        })
    }

    fn snapshot(&self, offset: f64) -> ScrollSnapshot {
        ScrollSnapshot {
            offset,
            navbar_height: self.navbar.offset_height(),
        }
    }

    fn update_menu_top(&self) {
        let top = mobile_menu_top(self.navbar.offset_height());
        let _ = self.menu.style().set_property("top", &top);
    }

    fn apply(&self, controller: &NavbarStateController, offset: f64) {
        let state = controller.state_for(self.snapshot(offset));
        let _ = self.menu.style().set_property("top", &state.menu_top);

        for (part, class, on) in state.class_toggles(self.back_to_top.is_some()) {
            let element = match part {
                NavbarPart::Navbar => Some(&self.navbar),
                NavbarPart::BackToTop => self.back_to_top.as_ref(),
            };
            if let Some(element) = element {
                set_class(element, class, on);
            }
        }
    }
}

/// Nav links and the sections they point at; owns each link's `active` class.
struct NavLinksView {
    links: Vec<HtmlElement>,
    hrefs: Vec<String>,
    sections: Vec<HtmlElement>,
}

impl NavLinksView {
    fn query(page: &Page) -> Result<Self, SetupError> {
        let links = page.query_all(NAV_LINK_SELECTOR)?;
        let hrefs = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();

        Ok(Self {
            links,
            hrefs,
            sections: page.query_all(SECTION_SELECTOR)?,
        })
    }

    fn layout(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|section| {
                Section::new(
                    section.id(),
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    fn highlight(&self, highlighter: &ActiveSectionHighlighter, offset: f64) {
        let states = highlighter.link_states(offset, &self.layout(), &self.hrefs);
        for (link, active) in self.links.iter().zip(states) {
            set_class(link, ACTIVE_CLASS, active);
        }
    }
}

/// The menu panel and its toggle; owns their `active` class.
struct MenuView {
    menu: HtmlElement,
    toggle: HtmlElement,
}

impl MenuView {
    fn apply(&self, state: MenuState) {
        set_class(&self.menu, ACTIVE_CLASS, state.is_open());
        set_class(&self.toggle, ACTIVE_CLASS, state.is_open());
    }

    fn locate(&self, event: &Event) -> MenuInput {
        let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());

        MenuInput::DocumentClicked {
            in_menu: self.menu.contains(target.as_ref()),
            in_toggle: self.toggle.contains(target.as_ref()),
        }
    }
}

fn mount_navbar(page: &Page, config: &InteractionConfig, _logger: Logger) -> Result<(), SetupError> {
    let view = Rc::new(NavbarView::query(page)?);
    let controller =
        NavbarStateController::new(config.scrolled_threshold_px, config.back_to_top_threshold_px);

    {
        let view = view.clone();
        let scroller = page.clone();
        listen(&page.window, "scroll", move |_| {
            view.apply(&controller, scroller.scroll_offset());
        })?;
    }

    {
        let view = view.clone();
        listen(&page.window, "resize", move |_| view.update_menu_top())?;
    }

    page.on_load(move || view.update_menu_top())
}

fn mount_section_highlighter(
    page: &Page,
    config: &InteractionConfig,
    _logger: Logger,
) -> Result<(), SetupError> {
    let view = NavLinksView::query(page)?;
    let highlighter =
        ActiveSectionHighlighter::new(config.section_probe_offset_px, config.section_tie_break);
    let scroller = page.clone();

    listen(&page.window, "scroll", move |_| {
        view.highlight(&highlighter, scroller.scroll_offset());
    })
}

fn mount_mobile_menu(page: &Page, _config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    let view = Rc::new(MenuView {
        menu: page.html_element_by_id(NAV_MENU_ID)?,
        toggle: page.html_element_by_id(NAV_TOGGLE_ID)?,
    });
    let state = Rc::new(Cell::new(MenuState::default()));

    let dispatch: Rc<dyn Fn(MenuInput)> = {
        let view = view.clone();
        Rc::new(move |input: MenuInput| {
            let previous = state.get();
            let next = previous.next(input);
            state.set(next);
            view.apply(next);

            if next != previous {
                logger.debug("mobile_menu_changed", json!({ "open": next.is_open() }));
            }
        })
    };

    {
        let dispatch = dispatch.clone();
        listen(&view.toggle, "click", move |_| dispatch(MenuInput::ToggleClicked))?;
    }

    for link in page.query_all(NAV_LINK_SELECTOR)? {
        let dispatch = dispatch.clone();
        listen(&link, "click", move |_| dispatch(MenuInput::LinkClicked))?;
    }

    listen(&page.document, "click", move |event| dispatch(view.locate(&event)))
}

fn mount_smooth_scroll(page: &Page, config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    let navigator = SmoothScrollNavigator::new(config.header_offset_px);

    for anchor in page.query_all(IN_PAGE_ANCHOR_SELECTOR)? {
        let page = page.clone();
        let source = anchor.clone();

        listen(&anchor, "click", move |event| {
            event.prevent_default();

            let href = source.get_attribute("href").unwrap_or_default();
            let target_top = fragment_id(&href)
                .ok()
                .and_then(|id| page.document.get_element_by_id(id))
                .map(|target| target.get_bounding_client_rect().top());

            match navigator.resolve(&href, target_top, page.scroll_offset()) {
                NavigationOutcome::ScrollTo(top) => page.scroll_smoothly_to(top),
                NavigationOutcome::Skipped(reason) => logger.debug(
                    "anchor_navigation_skipped",
                    json!({ "href": href, "reason": reason.as_str() }),
                ),
            }
        })?;
    }

    Ok(())
}

fn mount_back_to_top(page: &Page, _config: &InteractionConfig, _logger: Logger) -> Result<(), SetupError> {
    let button = page.html_element_by_id(BACK_TO_TOP_ID)?;
    let scroller = page.clone();

    listen(&button, "click", move |_| {
        scroller.scroll_smoothly_to(BACK_TO_TOP_DESTINATION);
    })
}

fn mount_reveal(page: &Page, config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    inject_stylesheet(&page.document, ANIMATE_IN_STYLESHEET)?;

    let stagger = Stagger {
        service_card_step_ms: config.service_card_stagger_ms,
        feature_item_step_ms: config.feature_item_stagger_ms,
    };
    let mut elements = Vec::new();
    let mut group_sizes = Vec::new();

    for group in RevealGroup::ALL {
        let members = page.query_all(group.selector())?;
        for (index, element) in members.iter().enumerate() {
            apply_style(element, &REVEAL_HIDDEN_STYLE);
            // After `transition`, which resets the delay.
            if let Some(delay) = stagger.delay(group, index) {
                let _ = element.style().set_property("transition-delay", &delay);
            }
        }
        group_sizes.push((group, members.len()));
        elements.extend(members);
    }

    let mut targets = reveal_targets(&group_sizes);
    let spec = WatchSpec {
        threshold: config.reveal_threshold,
        bottom_margin_px: config.reveal_bottom_margin_px,
        policy: TriggerPolicy::Repeating,
    };
    let watcher = Watcher::new(spec, elements.len());

    watch(elements, watcher, move |index, element| {
        let _ = element.class_list().add_1(ANIMATE_IN_CLASS);

        if let Some(target) = targets.get_mut(index) {
            if target.mark_visible() {
                logger.debug(
                    "reveal_animated",
                    json!({
                        "group": target.group.selector(),
                        "index": target.index_in_group,
                    }),
                );
            }
        }
    })
}

fn play_counter(window: &Window, element: HtmlElement, mut animation: CounterAnimation) {
    // The first frame is painted right away, the rest on animation frames.
    let Some(first) = animation.next() else {
        return;
    };
    element.set_text_content(Some(&first.text));
    if first.last {
        return;
    }

    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    let scheduler = window.clone();

    *handle.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let Some(step) = animation.next() else {
            let _ = frame.borrow_mut().take();
            return;
        };
        element.set_text_content(Some(&step.text));

        if step.last {
            let _ = frame.borrow_mut().take();
            return;
        }

        if let Some(callback) = frame.borrow().as_ref() {
            let _ = scheduler.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = handle.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn mount_counters(page: &Page, config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    let counters = page.query_all(COUNTER_SELECTOR)?;
    // Targets come from the text present now; later rewrites (e.g. the
    // typewriter clearing the element) must not change them.
    let targets: Vec<CounterTarget> = counters
        .iter()
        .map(|counter| {
            CounterTarget::from_initial_text(&counter.text_content().unwrap_or_default())
        })
        .collect();
    let spec = WatchSpec {
        threshold: config.counter_threshold,
        bottom_margin_px: 0.0,
        policy: TriggerPolicy::OneShot,
    };
    let watcher = Watcher::new(spec, counters.len());
    let window = page.window.clone();
    let duration_ms = config.counter_duration_ms;
    let frame_interval_ms = config.frame_interval_ms;

    watch(counters, watcher, move |index, element| {
        let Some(animation) = targets
            .get(index)
            .and_then(|target| target.animation(duration_ms, frame_interval_ms))
        else {
            logger.debug(
                "counter_skipped",
                json!({ "index": index, "reason": "unparsable_target" }),
            );
            return;
        };

        logger.debug(
            "counter_started",
            json!({ "index": index, "target": animation.target() }),
        );
        play_counter(&window, element.clone(), animation);
    })
}

fn mount_hero_intro(page: &Page, config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    let heroes = page.query_all(HERO_SELECTOR)?;
    for hero in &heroes {
        apply_style(hero, &HERO_HIDDEN_STYLE);
    }

    let body = page.document.body();
    let window = page.window.clone();
    let delay_ms = config.hero_intro_delay_ms;

    page.on_load(move || {
        if let Some(body) = body {
            let _ = body.class_list().add_1(LOADED_CLASS);
        }

        let settle = move || {
            for hero in &heroes {
                apply_style(hero, &HERO_SETTLED_STYLE);
            }
        };
        if let Err(error) = defer(&window, delay_ms, settle) {
            logger.warn("hero_intro_failed", json!({ "error": error.to_string() }));
        }
    })
}

fn type_next(
    window: Window,
    element: HtmlElement,
    mut typewriter: Typewriter,
    speed_ms: u32,
    logger: Logger,
) {
    let Some(text) = typewriter.next() else {
        return;
    };
    element.set_text_content(Some(&text));
    if typewriter.is_done() {
        return;
    }

    let scheduler = window.clone();
    if let Err(error) = defer(&scheduler, speed_ms, move || {
        type_next(window, element, typewriter, speed_ms, logger)
    }) {
        logger.warn("typewriter_stalled", json!({ "error": error.to_string() }));
    }
}

fn mount_typewriters(page: &Page, config: &InteractionConfig, logger: Logger) -> Result<(), SetupError> {
    let elements = page.query_all(TYPEWRITER_SELECTOR)?;
    if elements.is_empty() {
        return Ok(());
    }

    let window = page.window.clone();
    let speed_ms = config.typewriter_speed_ms;

    page.on_load(move || {
        for element in elements {
            let text = element
                .get_attribute(TYPEWRITER_ATTRIBUTE)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| element.text_content())
                .unwrap_or_default();

            let mut typewriter = Typewriter::new(text);
            // Clearing and the first character land in the same tick.
            if let Some(cleared) = typewriter.next() {
                element.set_text_content(Some(&cleared));
            }
            type_next(window.clone(), element, typewriter, speed_ms, logger);
        }
    })
}

fn print_welcome_banner() {
    web_sys::console::log_2(
        &JsValue::from_str(&format!("%c {CLINIC_NAME} ")),
        &JsValue::from_str("background: #A0522D; color: white; font-size: 20px; padding: 10px;"),
    );
    web_sys::console::log_2(
        &JsValue::from_str(&format!("%c {CLINIC_TAGLINE} ")),
        &JsValue::from_str("color: #DAA520; font-size: 14px;"),
    );
}

pub fn run() {
    console_error_panic_hook::set_once();

    let page = match Page::resolve() {
        Ok(page) => page,
        Err(error) => {
            Logger::new(DEFAULT_LOG_LEVEL)
                .warn("page_unavailable", json!({ "error": error.to_string() }));
            return;
        }
    };

    let config = page.config();
    let logger = Logger::new(config.log_level);
    logger.info(
        "interaction_config",
        serde_json::to_value(&config).unwrap_or_default(),
    );

    // Each controller owns its own elements, so one missing piece of
    // markup only disables that controller.
    let mounts: [(&str, MountFn); 9] = [
        ("navbar", mount_navbar),
        ("section_highlighter", mount_section_highlighter),
        ("mobile_menu", mount_mobile_menu),
        ("smooth_scroll", mount_smooth_scroll),
        ("back_to_top", mount_back_to_top),
        ("reveal", mount_reveal),
        ("counter", mount_counters),
        ("hero_intro", mount_hero_intro),
        ("typewriter", mount_typewriters),
    ];

    for (name, mount) in mounts {
        match mount(&page, &config, logger) {
            Ok(()) => logger.debug("controller_mounted", json!({ "controller": name })),
            Err(error) => logger.warn(
                "controller_mount_failed",
                json!({ "controller": name, "error": error.to_string() }),
            ),
        }
    }

    print_welcome_banner();
}
