use maud::{html, Markup};

use crate::models::AggregatedArtist;

pub fn artist_card(artist: &AggregatedArtist) -> Markup {
    html! {
        a class="artist-card" href={ "/artist?id=" (artist.id()) } {
            img src=(artist.artist.image) alt=(artist.name()) loading="lazy";
            div class="artist-card-body" {
                h3 class="artist-card-name" title=(artist.name()) { (artist.name()) }
                p class="artist-card-meta" {
                    "Since " (artist.artist.creation_date)
                    " · " (artist.artist.members.len()) " member"
                    @if artist.artist.members.len() != 1 { "s" }
                }
            }
        }
    }
}

pub fn search_bar(query: &str) -> Markup {
    html! {
        form class="search-bar" method="get" action="/" {
            input
                type="search"
                name="search"
                value=(query)
                placeholder="Search artists..."
                autocomplete="off";
            button type="submit" { "Search" }
        }
    }
}

pub fn fact_list(artist: &AggregatedArtist) -> Markup {
    html! {
        dl class="facts" {
            div {
                dt { "Formed" }
                dd { (artist.artist.creation_date) }
            }
            div {
                dt { "First album" }
                dd { (artist.artist.first_album) }
            }
            div {
                dt { "Members" }
                dd {
                    ul class="members" {
                        @for member in &artist.artist.members {
                            li { (member) }
                        }
                    }
                }
            }
        }
    }
}

/// Every announced tour stop and every concert date, as the collections list them
pub fn tour_overview(artist: &AggregatedArtist) -> Markup {
    html! {
        div class="tour" {
            div {
                h3 { "Locations" }
                @if artist.locations.is_empty() {
                    p class="empty" { "No locations announced." }
                } @else {
                    ul class="tour-locations" {
                        @for location in &artist.locations {
                            li { (display_place(location)) }
                        }
                    }
                }
            }
            div {
                h3 { "Dates" }
                @if artist.dates.is_empty() {
                    p class="empty" { "No dates announced." }
                } @else {
                    ul class="tour-dates" {
                        @for date in &artist.dates {
                            li { (date) }
                        }
                    }
                }
            }
        }
    }
}

/// Concert dates grouped by place, as published in the relation map
pub fn concerts_table(artist: &AggregatedArtist) -> Markup {
    html! {
        @if artist.dates_locations.is_empty() {
            p class="empty" { "No concerts announced." }
        } @else {
            table class="concerts" {
                thead {
                    tr {
                        th { "Location" }
                        th { "Dates" }
                    }
                }
                tbody {
                    @for (place, dates) in &artist.dates_locations {
                        tr {
                            td { (display_place(place)) }
                            td { (dates.join(", ")) }
                        }
                    }
                }
            }
        }
    }
}

/// Upstream place names look like `los_angeles-usa`
pub fn display_place(raw: &str) -> String {
    raw.split('-')
        .map(|part| part.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ")
}
