use maud::{html, Markup};

use super::components::{artist_card, concerts_table, fact_list, search_bar, tour_overview};
use super::layout::base_layout;
use crate::models::AggregatedArtist;

pub fn index_page(artists: &[&AggregatedArtist], search: &str) -> Markup {
    base_layout(
        "Artists",
        html! {
            div class="page-header" {
                h1 { "Artists" }
            }

            (search_bar(search))

            @if artists.is_empty() {
                div class="empty" {
                    p { "No artists match \"" (search) "\"." }
                }
            } @else {
                div class="artist-grid" {
                    @for artist in artists {
                        (artist_card(artist))
                    }
                }
            }
        },
    )
}

pub fn artist_page(artist: &AggregatedArtist) -> Markup {
    base_layout(
        artist.name(),
        html! {
            div class="back-link" {
                a href="/" { "← Back to Artists" }
            }

            div class="artist-header" {
                img src=(artist.artist.image) alt=(artist.name());
                div {
                    h1 { (artist.name()) }
                    (fact_list(artist))
                    a class="button" href={ "/artist_map?id=" (artist.id()) } { "Show on map" }
                }
            }

            section {
                h2 { "Tour" }
                (tour_overview(artist))
            }

            section {
                h2 { "Concerts" }
                (concerts_table(artist))
            }
        },
    )
}

pub fn artist_map_page(artist: &AggregatedArtist) -> Markup {
    base_layout(
        &format!("{} - Map", artist.name()),
        html! {
            link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

            div class="back-link" {
                a href={ "/artist?id=" (artist.id()) } { "← Back to " (artist.name()) }
            }

            h1 { (artist.name()) " on tour" }
            p id="map-status" class="muted" { "Locating concert venues..." }
            div id="map" data-artist-id=(artist.id()) {}

            script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" {}
            script src="/static/js/map.js" {}
        },
    )
}

pub fn not_found_page() -> Markup {
    base_layout(
        "Not Found",
        html! {
            div class="empty" {
                h1 { "404" }
                p { "That artist does not exist." }
                a href="/" { "Back to Artists" }
            }
        },
    )
}
