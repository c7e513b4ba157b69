use crate::types::WeatherRecord;

/// Records whose city name contains `term`, ignoring case, in original order.
///
/// An empty term keeps everything.
pub fn filter_records<'a>(records: &'a [WeatherRecord], term: &str) -> Vec<&'a WeatherRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.city_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Condition;

    fn record(code: &str, name: &str) -> WeatherRecord {
        WeatherRecord {
            city_code: code.to_string(),
            city_name: name.to_string(),
            condition: Condition::Clear,
            temperature: 20.0,
            temp_min: 18.0,
            temp_max: 22.0,
            description: "clear sky".to_string(),
            pressure: 1013,
            humidity: 50,
            visibility: 10.0,
            wind_speed: 2.0,
            wind_degree: 90,
            sunrise: 0,
            sunset: 0,
        }
    }

    fn sample() -> Vec<WeatherRecord> {
        vec![
            record("1248991", "Colombo"),
            record("1850147", "Tokyo"),
            record("2643743", "London"),
            record("2988507", "Paris"),
            record("3413829", "Reykjavik"),
            record("2147714", "Sydney"),
            record("1273294", "Delhi"),
            record("5128581", "New York"),
        ]
    }

    fn codes(records: &[&WeatherRecord]) -> Vec<String> {
        records.iter().map(|r| r.city_code.clone()).collect()
    }

    #[test]
    fn test_empty_term_is_identity() {
        let records = sample();
        let filtered = filter_records(&records, "");
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().zip(records.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = sample();
        assert_eq!(codes(&filter_records(&records, "colo")), vec!["1248991"]);
        assert_eq!(codes(&filter_records(&records, "COLO")), vec!["1248991"]);
        assert_eq!(codes(&filter_records(&records, "y")), vec!["1850147", "3413829", "2147714", "5128581"]);
        assert_eq!(codes(&filter_records(&records, "new y")), vec!["5128581"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        assert!(filter_records(&records, "xyz").is_empty());
    }

    #[test]
    fn test_preserves_order_and_membership() {
        let records = sample();
        for term in ["o", "on", "D", "is", "k", "zz", " "] {
            let filtered = filter_records(&records, term);
            let expected: Vec<&WeatherRecord> = records
                .iter()
                .filter(|r| r.city_name.to_lowercase().contains(&term.to_lowercase()))
                .collect();
            assert_eq!(codes(&filtered), codes(&expected), "term {:?}", term);
        }
    }

    #[test]
    fn test_idempotent() {
        let records = sample();
        for term in ["o", "LON", "", "y"] {
            let once: Vec<WeatherRecord> =
                filter_records(&records, term).into_iter().cloned().collect();
            let twice: Vec<WeatherRecord> =
                filter_records(&once, term).into_iter().cloned().collect();
            assert_eq!(once, twice, "term {:?}", term);
        }
    }
}
