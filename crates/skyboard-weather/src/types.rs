use serde::{Deserialize, Serialize};

/// Weather condition category as reported by the API.
///
/// Unknown strings are kept verbatim in `Other` so nothing is lost on the way
/// through; presentation falls back to a default icon for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Mist,
    Snow,
    Drizzle,
    Thunderstorm,
    Fog,
    Haze,
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Mist => "Mist",
            Self::Snow => "Snow",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Other(s) => s,
        }
    }

    /// Emoji shown on the card face
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "☁️",
            Self::Rain => "🌧️",
            Self::Mist | Self::Fog | Self::Haze => "🌫️",
            Self::Snow => "❄️",
            Self::Drizzle => "🌦️",
            Self::Thunderstorm => "⛈️",
            Self::Other(_) => "🌤️",
        }
    }

    /// Gradient class pair for the card background
    pub fn gradient(&self) -> &'static str {
        match self {
            Self::Clear => "from-green-400 to-green-600",
            Self::Clouds => "from-blue-400 to-blue-600",
            Self::Rain => "from-orange-400 to-orange-600",
            Self::Mist => "from-red-400 to-red-600",
            Self::Snow => "from-blue-200 to-blue-400",
            Self::Drizzle => "from-purple-400 to-purple-600",
            Self::Thunderstorm => "from-gray-600 to-gray-800",
            Self::Fog => "from-gray-500 to-gray-700",
            Self::Haze => "from-yellow-400 to-yellow-600",
            Self::Other(_) => "from-blue-400 to-blue-600",
        }
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Mist" => Self::Mist,
            "Snow" => Self::Snow,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Fog" => Self::Fog,
            "Haze" => Self::Haze,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        match c {
            Condition::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Stable unique identifier, used as the card key
    pub city_code: String,
    pub city_name: String,
    pub condition: Condition,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    /// hPa
    pub pressure: i32,
    /// Percent
    pub humidity: i32,
    /// Kilometres
    pub visibility: f64,
    /// Metres per second
    pub wind_speed: f64,
    /// Compass bearing, 0-359
    pub wind_degree: i32,
    /// Unix epoch seconds
    pub sunrise: i64,
    /// Unix epoch seconds
    pub sunset: i64,
}
