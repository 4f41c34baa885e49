//! Default content per niche.
//!
//! These tables backfill anything a stored config leaves out. Every entry here
//! must pass the validator on its own.

use crate::site::model::{Contact, Hero, NavItem, Seo, Service, SiteContent, Testimonial, Theme};
use crate::site::niche::Niche;

pub fn content_for(niche: Niche) -> SiteContent {
    match niche {
        Niche::Cleaning => cleaning(),
        Niche::Landscaping => landscaping(),
    }
}

fn service(key: &str, title: &str, description: &str, icon: &str) -> Service {
    Service {
        key: key.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

fn nav(items: &[(&str, &str)]) -> Vec<NavItem> {
    items
        .iter()
        .map(|(label, href)| NavItem {
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect()
}

fn testimonial(quote: &str, author: &str) -> Testimonial {
    Testimonial {
        quote: quote.to_string(),
        author: author.to_string(),
    }
}

fn cleaning() -> SiteContent {
    SiteContent {
        business_name: "Sparkle & Shine Cleaning".to_string(),
        tagline: "Spotless homes, zero hassle.".to_string(),
        hero: Hero {
            headline: "A cleaner home without lifting a finger".to_string(),
            subheadline: "Insured, background-checked cleaners on a schedule that fits yours."
                .to_string(),
            cta_label: "Get a free quote".to_string(),
            cta_href: "#contact".to_string(),
            image_url: "/assets/img/cleaning-hero.jpg".to_string(),
        },
        services: vec![
            service(
                "standard-clean",
                "Standard Cleaning",
                "Dusting, vacuuming, mopping, kitchens and bathrooms, every visit.",
                "sparkles",
            ),
            service(
                "deep-clean",
                "Deep Cleaning",
                "Baseboards, inside appliances, grout and the corners nobody reaches.",
                "spray-can",
            ),
            service(
                "move-out",
                "Move-In / Move-Out",
                "Empty-home cleaning that gets deposits back.",
                "truck",
            ),
            service(
                "office",
                "Office Cleaning",
                "After-hours cleaning for small offices and studios.",
                "building",
            ),
        ],
        nav: nav(&[
            ("Services", "#services"),
            ("About", "#about"),
            ("Reviews", "#reviews"),
            ("Contact", "#contact"),
        ]),
        about: "We are a locally owned cleaning team that treats every home like our own. \
                Flat pricing, the same crew each visit, and a 24-hour happiness guarantee."
            .to_string(),
        service_areas: vec!["Downtown".to_string(), "Surrounding suburbs".to_string()],
        testimonials: vec![
            testimonial(
                "They showed up on time and the house has never looked better.",
                "Dana R.",
            ),
            testimonial(
                "Booked a move-out clean and got our whole deposit back.",
                "Marcus T.",
            ),
        ],
        contact: Contact {
            phone: "(555) 010-2030".to_string(),
            email: "hello@sparkleandshine.example".to_string(),
            address: "Serving the greater metro area".to_string(),
            hours: "Mon-Sat 8am-6pm".to_string(),
        },
        theme: Theme {
            primary_color: "#0e7490".to_string(),
            accent_color: "#facc15".to_string(),
        },
        seo: Seo {
            title: "Professional House Cleaning Services".to_string(),
            description: "Reliable residential and office cleaning. Free quotes, flat pricing."
                .to_string(),
        },
    }
}

fn landscaping() -> SiteContent {
    SiteContent {
        business_name: "Greenline Landscaping".to_string(),
        tagline: "Yards you'll want to live in.".to_string(),
        hero: Hero {
            headline: "Beautiful outdoor spaces, maintained for you".to_string(),
            subheadline: "Design, installation and weekly care from one local crew.".to_string(),
            cta_label: "Request an estimate".to_string(),
            cta_href: "#contact".to_string(),
            image_url: "/assets/img/landscaping-hero.jpg".to_string(),
        },
        services: vec![
            service(
                "lawn-care",
                "Lawn Care",
                "Mowing, edging and fertilization on a weekly or bi-weekly schedule.",
                "leaf",
            ),
            service(
                "design",
                "Landscape Design",
                "Planting plans, hardscape layouts and 3D previews before we dig.",
                "pencil-ruler",
            ),
            service(
                "irrigation",
                "Irrigation",
                "Sprinkler installation, repair and seasonal start-up.",
                "droplets",
            ),
            service(
                "cleanup",
                "Seasonal Cleanup",
                "Leaf removal, pruning and bed refresh each spring and fall.",
                "shovel",
            ),
        ],
        nav: nav(&[
            ("Services", "#services"),
            ("About", "#about"),
            ("Reviews", "#reviews"),
            ("Contact", "#contact"),
        ]),
        about: "Family-run and fully licensed, we have cared for neighborhood yards for over \
                a decade."
            .to_string(),
        service_areas: vec!["Citywide".to_string()],
        testimonials: vec![testimonial(
            "Our backyard went from dirt patch to favorite room of the house.",
            "Priya S.",
        )],
        contact: Contact {
            phone: "(555) 010-4050".to_string(),
            email: "office@greenline.example".to_string(),
            address: "Serving the greater metro area".to_string(),
            hours: "Mon-Fri 7am-5pm".to_string(),
        },
        theme: Theme {
            primary_color: "#15803d".to_string(),
            accent_color: "#a16207".to_string(),
        },
        seo: Seo {
            title: "Landscaping and Lawn Care".to_string(),
            description: "Landscape design, installation and maintenance from a local crew."
                .to_string(),
        },
    }
}
