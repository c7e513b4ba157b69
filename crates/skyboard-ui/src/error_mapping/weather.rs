use skyboard_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use skyboard_weather::FetchError;

use super::IntoAppError;

impl IntoAppError for FetchError {
    fn into_app_error(self) -> AppError {
        match self {
            FetchError::Auth(e) => e.into_app_error(),
            FetchError::Network(e) => AppError::Network(e.into_network_error()),
            FetchError::Unauthorized(_) => AppError::Weather(WeatherError::Unauthorized),
            FetchError::CityNotFound(code) => AppError::Weather(WeatherError::CityNotFound(code)),
            FetchError::Status { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            FetchError::Parse(s) => AppError::Weather(WeatherError::InvalidPayload(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyboard_auth::AuthError;

    #[test]
    fn auth_and_transport_failures_map_to_distinct_kinds() {
        let auth = FetchError::Auth(AuthError::NotSignedIn("aud".into())).into_app_error();
        let status = FetchError::Status {
            status: 503,
            message: "unavailable".into(),
        }
        .into_app_error();
        let parse = FetchError::Parse("eof".into()).into_app_error();

        assert_eq!(auth.kind(), "auth");
        assert_eq!(status.kind(), "network");
        assert_eq!(parse.kind(), "weather");
    }

    #[test]
    fn rejected_credential_maps_to_weather_unauthorized() {
        let err = FetchError::Unauthorized(403).into_app_error();
        assert!(matches!(err, AppError::Weather(WeatherError::Unauthorized)));
    }
}
