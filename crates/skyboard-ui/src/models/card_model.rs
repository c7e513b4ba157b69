//! Per-card expand/collapse state and the card presenter.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeZone};
use skyboard_weather::presentation::{
    format_as_of, format_clock, format_humidity, format_pressure, format_temperature,
    format_visibility, format_wind,
};
use skyboard_weather::WeatherRecord;

use crate::view::{CardDetails, CardView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardState {
    #[default]
    Collapsed,
    Expanded,
}

impl CardState {
    pub fn toggled(self) -> Self {
        match self {
            CardState::Collapsed => CardState::Expanded,
            CardState::Expanded => CardState::Collapsed,
        }
    }
}

/// Expansion state for the rendered cards, keyed by city code.
/// A card with no entry is collapsed.
#[derive(Debug, Default)]
pub struct CardStates {
    states: HashMap<String, CardState>,
}

impl CardStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, city_code: &str) -> CardState {
        self.states.get(city_code).copied().unwrap_or_default()
    }

    pub fn is_expanded(&self, city_code: &str) -> bool {
        self.get(city_code) == CardState::Expanded
    }

    /// Flip one card and return its new state.
    pub fn toggle(&mut self, city_code: &str) -> CardState {
        let next = self.get(city_code).toggled();
        match next {
            CardState::Expanded => {
                self.states.insert(city_code.to_string(), next);
            }
            CardState::Collapsed => {
                self.states.remove(city_code);
            }
        }
        next
    }

    /// Forget cards that are no longer rendered.
    pub fn retain_visible(&mut self, visible: &HashSet<&str>) {
        self.states.retain(|code, _| visible.contains(code.as_str()));
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

/// Derive the card node for `record`. Times use the zone of `now`.
pub fn present_card<Tz: TimeZone>(
    record: &WeatherRecord,
    state: CardState,
    now: &DateTime<Tz>,
) -> CardView
where
    Tz::Offset: std::fmt::Display,
{
    let expanded = state == CardState::Expanded;
    let tz = now.timezone();

    let details = expanded.then(|| CardDetails {
        pressure: format_pressure(record.pressure),
        humidity: format_humidity(record.humidity),
        visibility: format_visibility(record.visibility),
        wind: format_wind(record.wind_degree, record.wind_speed),
        sunrise: format_clock(record.sunrise, &tz),
        sunset: format_clock(record.sunset, &tz),
    });

    CardView {
        city_code: record.city_code.clone(),
        city_name: record.city_name.clone(),
        as_of: format_as_of(now),
        icon: record.condition.icon(),
        gradient: record.condition.gradient(),
        temperature: format_temperature(record.temperature),
        temp_min: format!("Min: {}", format_temperature(record.temp_min)),
        temp_max: format!("Max: {}", format_temperature(record.temp_max)),
        description: record.description.clone(),
        expanded,
        details,
        dismiss_visible: expanded,
    }
}
