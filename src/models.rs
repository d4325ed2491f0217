use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ArtistId = i64;

/// Artist profile as published by the upstream `/artists` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub id: ArtistId,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,
    #[serde(default)]
    pub relations: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationEntry {
    pub id: ArtistId,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateEntry {
    pub id: ArtistId,
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEntry {
    pub id: ArtistId,
    #[serde(default)]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

/// Upstream collections come either as a bare array or wrapped in `{"index": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Indexed { index: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Indexed { index } => index,
            Self::Bare(items) => items,
        }
    }
}

/// One artist joined with its tour locations, dates and date-location relations.
///
/// Built once at startup and never mutated afterwards. The joined fields keep
/// the capitalized wire names existing `/api/artists` consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedArtist {
    #[serde(flatten)]
    pub artist: ArtistRecord,
    #[serde(rename = "Locations")]
    pub locations: Vec<String>,
    #[serde(rename = "Dates")]
    pub dates: Vec<String>,
    #[serde(rename = "DatesByPlace")]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

impl AggregatedArtist {
    pub fn id(&self) -> ArtistId {
        self.artist.id
    }

    pub fn name(&self) -> &str {
        &self.artist.name
    }
}

/// A resolved place, serialized as `{location, lat, lon}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
}
