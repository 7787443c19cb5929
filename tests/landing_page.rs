//! End-to-end behavior of the mounted EagleTech landing page.
//!
//! Every test builds the reference site, mounts it, and drives it with
//! synthetic input. Assertions read the document and its mutation journal.
//!
//! Run with: cargo test --test landing_page -- --nocapture

use std::rc::Rc;

use eagletech_fx::effects::loading::{phase, LoadingPhase};
use eagletech_fx::site::{eagletech_site, TECHNOLOGIES};
use eagletech_fx::{
    debounce, init_loading_screen, mount, Document, EventSource, FxConfig, InputEvent, Mutation,
    NodeId, Page, ReadyState, ScriptedSource,
};

// =============================================================================
// HELPERS
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn mounted_page(config: FxConfig) -> Page {
    init_tracing();
    let mut page = Page::new(eagletech_site().unwrap(), config).with_viewport(1280.0, 800.0);
    mount(&mut page).unwrap();
    page.content_loaded().unwrap();
    page
}

fn node(page: &Page, selector: &str) -> NodeId {
    page.document()
        .query(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("missing {selector}"))
}

fn count_mutations(page: &Page, pred: impl Fn(&Mutation) -> bool) -> usize {
    page.document().mutations().iter().filter(|m| pred(m)).count()
}

// =============================================================================
// LOADING SCREEN
// =============================================================================

#[test]
fn loading_screen_fades_then_leaves() {
    let mut page = mounted_page(FxConfig::default());
    let screen = node(&page, ".loading-screen");

    page.advance(1999).unwrap();
    assert_eq!(phase(&page, screen), LoadingPhase::Visible);
    page.advance(1).unwrap();
    assert_eq!(phase(&page, screen), LoadingPhase::Fading);
    page.advance(500).unwrap();
    assert_eq!(phase(&page, screen), LoadingPhase::Removed);
    assert!(page.document().query(".loading-screen").unwrap().is_none());
}

#[test]
fn absent_loading_screen_mutates_nothing() {
    let mut page = Page::new(Document::new(), FxConfig::default());
    init_loading_screen(&mut page).unwrap();
    page.advance(10_000).unwrap();
    assert!(page.document().mutations().is_empty());
}

// =============================================================================
// SCROLL-DRIVEN STATE
// =============================================================================

#[test]
fn scroll_state_tracks_shared_threshold() {
    let mut page = mounted_page(FxConfig::default());
    let header = node(&page, "header");
    let indicator = node(&page, ".scroll-indicator");
    let background = node(&page, ".hero-background");

    for s in [40.0_f32, 100.0, 100.5, 101.0, 2000.0, 0.0, 4321.0] {
        page.scroll_window(s).unwrap();
        let past = s > 100.0;
        assert_eq!(page.document().has_class(header, "scrolled"), past, "header at {s}");
        assert_eq!(
            page.document().style(indicator, "opacity"),
            Some(if past { "0" } else { "1" }),
            "indicator at {s}"
        );
        let expected = format!("translateY({}px)", 0.5 * s);
        assert_eq!(page.document().style(background, "transform"), Some(expected.as_str()));
    }
}

#[test]
fn tuned_threshold_moves_header_and_indicator_together() {
    let config = FxConfig::from_json(r#"{ "scroll_threshold": 300 }"#).unwrap();
    let mut page = mounted_page(config);
    let header = node(&page, "header");
    let indicator = node(&page, ".scroll-indicator");

    page.scroll_window(250.0).unwrap();
    assert!(!page.document().has_class(header, "scrolled"));
    assert_eq!(page.document().style(indicator, "opacity"), Some("1"));

    page.scroll_window(301.0).unwrap();
    assert!(page.document().has_class(header, "scrolled"));
    assert_eq!(page.document().style(indicator, "opacity"), Some("0"));
}

#[test]
fn scrolling_reuses_page_layout() {
    let mut page = mounted_page(FxConfig::default());
    let indicator = node(&page, ".scroll-indicator");
    let before = page.layout().unwrap();

    page.document_mut().set_style(indicator, "opacity", "0.3");
    for s in [150.0, 900.0, 3000.0, 0.0] {
        page.scroll_window(s).unwrap();
    }
    assert!(Rc::ptr_eq(&before, &page.layout().unwrap()));

    // removing the loading screen changes the tree
    page.advance(2500).unwrap();
    assert!(!Rc::ptr_eq(&before, &page.layout().unwrap()));
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn nav_link_scrolls_smoothly_below_header() {
    let mut page = mounted_page(FxConfig::default());
    let team_link = node(&page, "a[href='#team']");
    let menu = node(&page, ".mobile-menu");

    page.click(menu).unwrap();
    assert!(page.document().has_class(menu, "active"));

    let navigated = page.click(team_link).unwrap();
    assert!(!navigated);
    assert!(!page.document().has_class(menu, "active"));

    page.advance(100).unwrap();
    let midway = page.viewport().scroll_y();
    assert!(midway > 0.0 && midway < 2900.0);

    page.advance(1000).unwrap();
    assert_eq!(page.viewport().scroll_y(), 2980.0 - 80.0);
    assert!(page.navigations().is_empty());
}

#[test]
fn resize_breakpoint_switches_navigation() {
    let mut page = mounted_page(FxConfig::default());
    let nav = node(&page, "nav ul");
    let menu = node(&page, ".mobile-menu");
    assert_eq!(page.document().style(nav, "display"), Some("flex"));

    page.click(menu).unwrap();
    page.resize_window(769.0, 800.0).unwrap();
    page.advance(250).unwrap();
    assert_eq!(page.document().style(nav, "display"), Some("flex"));
    assert!(!page.document().has_class(menu, "active"));
    assert!(page.document().has_class(nav, "active"));

    // open menu survives the switch to mobile
    page.resize_window(768.0, 800.0).unwrap();
    page.advance(250).unwrap();
    assert_eq!(page.document().style(nav, "display"), Some("flex"));

    page.document_mut().remove_class(nav, "active");
    page.resize_window(600.0, 800.0).unwrap();
    page.advance(250).unwrap();
    assert_eq!(page.document().style(nav, "display"), Some("none"));
}

#[test]
fn resize_burst_runs_handler_once() {
    let mut page = mounted_page(FxConfig::default());
    let nav = node(&page, "nav ul");
    page.document_mut().drain_mutations();

    for width in [700.0, 650.0, 600.0] {
        page.resize_window(width, 800.0).unwrap();
        page.advance(50).unwrap();
    }
    assert_eq!(page.document().style(nav, "display"), Some("flex"));

    page.advance(200).unwrap();
    assert_eq!(page.document().style(nav, "display"), Some("none"));
    assert_eq!(count_mutations(&page, |m| matches!(m, Mutation::SetStyle { .. })), 1);
}

// =============================================================================
// REVEAL AND LAZY IMAGES
// =============================================================================

#[test]
fn reveal_fires_once_per_element() {
    let mut page = mounted_page(FxConfig::default());
    let card = node(&page, ".service-card");
    assert!(!page.document().has_class(card, "animate-in"));

    for s in [500.0, 0.0, 500.0, 4000.0, 500.0] {
        page.scroll_window(s).unwrap();
    }
    assert!(page.document().has_class(card, "animate-in"));
    let reveals = count_mutations(&page, |m| {
        matches!(m, Mutation::AddClass { node, class } if *node == card && class == "animate-in")
    });
    assert_eq!(reveals, 1);
}

#[test]
fn lazy_image_loads_once_and_is_released() {
    let mut page = mounted_page(FxConfig::default());
    page.load().unwrap();
    assert_eq!(page.ready_state(), ReadyState::Complete);

    let images = page.document().query_all("img[data-src]").unwrap();
    let (first, second) = (images[0], images[1]);
    assert!(page.document().attribute(first, "src").is_none());

    page.scroll_window(3700.0).unwrap();
    assert_eq!(page.document().attribute(first, "src"), Some("images/office.webp"));
    assert!(!page.document().has_class(first, "lazy"));
    assert!(page.document().has_class(second, "lazy"));

    page.emit_intersection(first, false);
    page.emit_intersection(first, true);
    page.scroll_window(0.0).unwrap();
    page.scroll_window(3700.0).unwrap();
    let src_writes = count_mutations(&page, |m| {
        matches!(m, Mutation::SetAttribute { node, name, .. } if *node == first && name == "src")
    });
    assert_eq!(src_writes, 1);
}

// =============================================================================
// MARQUEE AND HOVER
// =============================================================================

#[test]
fn tech_track_is_doubled_and_pauses_on_hover() {
    let mut page = mounted_page(FxConfig::default());
    let track = node(&page, ".tech-track");

    let texts: Vec<&str> = page
        .document()
        .children(track)
        .iter()
        .filter_map(|c| page.document().text(*c))
        .collect();
    let expected: Vec<&str> = TECHNOLOGIES.iter().chain(TECHNOLOGIES.iter()).copied().collect();
    assert_eq!(texts, expected);

    page.pointer_enter(track).unwrap();
    assert_eq!(page.document().style(track, "animation-play-state"), Some("paused"));
    page.pointer_leave(track).unwrap();
    assert_eq!(page.document().style(track, "animation-play-state"), Some("running"));
}

#[test]
fn hover_on_nested_image_does_not_trigger_member() {
    let mut page = mounted_page(FxConfig::default());
    let member = node(&page, ".team-member");
    let overlay = node(&page, ".member-overlay");
    let image = node(&page, ".member-image img");

    page.pointer_enter(image).unwrap();
    assert_eq!(page.document().style(overlay, "opacity"), None);

    page.pointer_enter(member).unwrap();
    assert_eq!(page.document().style(overlay, "opacity"), Some("1"));
}

// =============================================================================
// EVENT SOURCES
// =============================================================================

#[test]
fn scripted_session_replays_through_pump() {
    init_tracing();
    let mut page = Page::new(eagletech_site().unwrap(), FxConfig::default());
    mount(&mut page).unwrap();
    let header = node(&page, "header");
    let track = node(&page, ".tech-track");

    let mut source = ScriptedSource::new([
        InputEvent::ContentLoaded,
        InputEvent::Load,
        InputEvent::Scroll(150.0),
        InputEvent::Advance(2500),
        InputEvent::PointerEnter(track),
    ]);
    assert_eq!(source.remaining(), 5);
    let caps = source.capabilities();
    assert!(!caps.is_empty());

    assert_eq!(page.pump(&mut source).unwrap(), 5);
    assert!(page.document().has_class(header, "scrolled"));
    assert!(page.document().query(".loading-screen").unwrap().is_none());
    assert_eq!(page.document().style(track, "animation-play-state"), Some("paused"));
}

#[test]
fn debounced_calls_collapse_to_last_arguments() {
    let mut page = Page::new(Document::new(), FxConfig::default());
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let wrapped = debounce(
        move |page: &mut Page, tag: &'static str| seen_clone.borrow_mut().push((page.now(), tag)),
        250,
        false,
    );

    wrapped(&mut page, "t0");
    page.advance(50).unwrap();
    wrapped(&mut page, "t50");
    page.advance(50).unwrap();
    wrapped(&mut page, "t100");
    page.advance(1000).unwrap();

    assert_eq!(*seen.borrow(), vec![(350, "t100")]);
}
