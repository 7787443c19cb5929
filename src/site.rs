//! Site - Reference markup for the EagleTech landing page.
//!
//! Carries every marker the controllers look for, with box sizes that give
//! a realistic scroll geometry:
//!
//! ```text
//!    0 ┬ header (fixed allowance, 80px)
//!   80 ┼ #home         hero background, scroll indicator
//!  980 ┼ #services     3 × .service-card
//! 2180 ┼ #about        3 × .feature
//! 2980 ┼ #team         2 × .team-member
//! 3880 ┼ #technologies .tech-track
//! 4180 ┼ #gallery      2 × img[data-src]
//! 5180 ┼ #contact
//! 5580 ┴
//! ```

use crate::engine::{el, Document, ElementBuilder};
use crate::error::FxResult;

/// Section ids linked from the navigation, in page order.
pub const SECTIONS: [&str; 7] = ["home", "services", "about", "team", "technologies", "gallery", "contact"];

pub const TECHNOLOGIES: [&str; 6] = ["Rust", "TypeScript", "React", "PostgreSQL", "Kubernetes", "AWS"];

fn header() -> ElementBuilder {
    let links = SECTIONS.iter().map(|id| {
        el("li").child(
            el("a")
                .class("nav-link")
                .attr("href", &format!("#{id}"))
                .text(&capitalize(id)),
        )
    });
    el("header").height(80.0).row().children([
        el("div").class("logo").text("EagleTech"),
        el("nav").child(el("ul").class("nav-links").row().children(links)),
        el("button").class("mobile-menu").attr("aria-label", "Toggle menu"),
    ])
}

fn hero() -> ElementBuilder {
    el("section").id("home").class("hero").height(900.0).children([
        el("div").class("hero-background").height(900.0),
        el("div").class("hero-content").child(el("h1").text("Soaring Above the Digital Horizon")),
        el("div").class("scroll-indicator").height(40.0),
    ])
}

fn services() -> ElementBuilder {
    let cards = ["Web Development", "Cloud Solutions", "Cybersecurity"].map(|title| {
        el("div")
            .class("service-card")
            .height(300.0)
            .margin(40.0, 0.0)
            .child(el("h3").text(title))
    });
    el("section").id("services").class("services").height(1200.0).children(cards)
}

fn about() -> ElementBuilder {
    let features = ["Expert Team", "Fast Delivery", "24/7 Support"].map(|title| {
        el("div")
            .class("feature")
            .height(150.0)
            .margin(40.0, 0.0)
            .child(el("h4").text(title))
    });
    el("section").id("about").class("about").height(800.0).children(features)
}

fn team() -> ElementBuilder {
    let members = [("Ana Silva", "ana.jpg"), ("Marcus Chen", "marcus.jpg")].map(|(name, photo)| {
        el("div")
            .class("team-member")
            .height(350.0)
            .margin(40.0, 0.0)
            .children([
                el("div")
                    .class("member-image")
                    .height(250.0)
                    .child(el("img").attr("src", photo).attr("alt", name).height(250.0)),
                el("div").class("member-overlay"),
                el("h4").text(name),
            ])
    });
    el("section").id("team").class("team").height(900.0).children(members)
}

fn technologies() -> ElementBuilder {
    let items = TECHNOLOGIES.map(|name| el("span").class("tech-item").text(name));
    el("section").id("technologies").height(300.0).child(
        el("div")
            .class("tech-slider")
            .margin(100.0, 0.0)
            .child(el("div").class("tech-track").row().height(100.0).children(items)),
    )
}

fn gallery() -> ElementBuilder {
    let images = ["office.webp", "datacenter.webp"].map(|src| {
        el("img")
            .class("lazy")
            .attr("data-src", &format!("images/{src}"))
            .attr("alt", "")
            .height(300.0)
            .margin(50.0, 0.0)
    });
    el("section").id("gallery").height(1000.0).children(images)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the landing page document.
pub fn eagletech_site() -> FxResult<Document> {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append_tree(root, el("head").child(el("title").text("EagleTech Solutions")))?;
    doc.append_tree(
        root,
        el("body").children([
            el("div").class("loading-screen").child(el("div").class("loader")),
            header(),
            hero(),
            services(),
            about(),
            team(),
            technologies(),
            gallery(),
            el("footer").id("contact").height(400.0),
        ]),
    )?;
    Ok(doc)
}
