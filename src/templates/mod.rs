pub mod components;
pub mod layout;
pub mod pages;

pub use components::{
    artist_card, concerts_table, display_place, fact_list, search_bar, tour_overview,
};
pub use layout::base_layout;
pub use pages::{artist_map_page, artist_page, index_page, not_found_page};
