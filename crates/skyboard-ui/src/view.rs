//! Presentation node tree handed to the host.
//!
//! Everything here is plain data derived from controller state; the host
//! renders it and sends input back as `DashboardEvent`s.

use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading weather data...";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search city...";

pub fn no_matches_message(term: &str) -> String {
    format!("No cities found matching \"{}\"", term)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum DashboardView {
    Loading {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        message: String,
        retry_enabled: bool,
    },
    Ready {
        search: SearchBox,
        grid: GridView,
    },
}

impl DashboardView {
    pub fn retry_enabled(&self) -> bool {
        matches!(
            self,
            DashboardView::Failed {
                retry_enabled: true,
                ..
            }
        )
    }

    /// Rendered cards; empty outside `Ready`.
    pub fn cards(&self) -> &[CardView] {
        match self {
            DashboardView::Ready {
                grid: GridView::Cards { cards },
                ..
            } => cards,
            _ => &[],
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards().len()
    }

    pub fn find_card(&self, city_code: &str) -> Option<&CardView> {
        self.cards().iter().find(|c| c.city_code == city_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBox {
    pub placeholder: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridView {
    Empty { message: String },
    Cards { cards: Vec<CardView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// Render key
    pub city_code: String,
    pub city_name: String,
    pub as_of: String,
    pub icon: &'static str,
    pub gradient: &'static str,
    pub temperature: String,
    pub temp_min: String,
    pub temp_max: String,
    pub description: String,
    pub expanded: bool,
    /// Present only while expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CardDetails>,
    pub dismiss_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDetails {
    pub pressure: String,
    pub humidity: String,
    pub visibility: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
}
