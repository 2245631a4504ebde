//! HTML rendering of gallery pages.
//!
//! Produces the classic gallery fragment:
//!
//! ```html
//! <div id="galleryWrapper">
//!   <ul id="galleryList" class="clearfix">
//!     <li><a href="photos/a.jpg" title="a" rel="colorbox"><img src="cache/100-….jpg" alt="a"></a></li>
//!   </ul>
//!   <div id="galleryFooter" class="clearfix">
//!     <ul id="galleryPagination">…</ul>     <!-- only with more than one page -->
//!     <div id="credit">Powered by …</div>
//!   </div>
//! </div>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! `display_path` is escaped when the entry is built, so it is emitted as-is;
//! titles and thumbnail paths are escaped here.

use crate::VERSION;
use crate::types::{GalleryStats, ImageEntry};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// The gallery fragment for one page of entries.
pub fn render_gallery(images: &[ImageEntry], stats: &GalleryStats) -> Markup {
    html! {
        (PreEscaped(format!("<!-- Start snapgal {VERSION} -->")))
        div id="galleryWrapper" {
            ul id="galleryList" class="clearfix" {
                @for image in images {
                    (render_item(image))
                }
            }
            div id="galleryFooter" class="clearfix" {
                @if stats.total_pages > 1 {
                    (render_pagination(stats))
                }
                div id="credit" { "Powered by snapgal " (VERSION) }
            }
        }
        (PreEscaped("<!-- End snapgal -->"))
    }
}

fn render_item(image: &ImageEntry) -> Markup {
    html! {
        li {
            a href=(PreEscaped(&image.display_path)) title=(image.title) rel="colorbox" {
                img src=(image.thumbnail_path) alt=(image.title);
            }
        }
    }
}

/// Previous/next links plus one link per page, as `?page=N` queries.
pub fn render_pagination(stats: &GalleryStats) -> Markup {
    let current = stats.current_page;
    html! {
        ul id="galleryPagination" {
            @if current > 1 {
                li.previous { a href=(page_href(current - 1)) { "<" } }
            } @else {
                li.previous.inactive { "<" }
            }
            @for page in 1..=stats.total_pages {
                @if page == current {
                    li.current { (page) }
                } @else {
                    li { a href=(page_href(page)) { (page) } }
                }
            }
            @if current < stats.total_pages {
                li.next { a href=(page_href(current + 1)) { ">" } }
            } @else {
                li.next.inactive { ">" }
            }
        }
    }
}

fn page_href(page: usize) -> String {
    format!("?page={page}")
}

/// A standalone HTML document around a gallery fragment.
pub fn render_document(title: &str, gallery: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (gallery)
            }
        }
    }
}
