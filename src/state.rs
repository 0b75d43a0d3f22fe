//! View state and the reducer that drives it.
//!
//! `update` is pure: it consumes the old state and a message and returns the
//! next state plus at most one effect for the caller to run.

use std::time::{Duration, Instant};

use crate::constants::{CITY_NOT_FOUND_MESSAGE, GENERIC_ERROR_MESSAGE, LOCATION_ERROR_MESSAGE};
use crate::fetcher::FetchError;
use crate::form::SearchForm;
use crate::location::{Coordinates, LocationError};
use crate::models::WeatherRecord;
use crate::notify::{NotificationSlot, Severity};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub form: SearchForm,
    pub results: Vec<WeatherRecord>,
    pub current_location: Option<WeatherRecord>,
    pub notifications: NotificationSlot,
}

impl ViewState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            form: SearchForm::default(),
            results: Vec::new(),
            current_location: None,
            notifications: NotificationSlot::new(notification_ttl),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    FieldChanged(String),
    FieldBlurred,
    SubmitRequested,
    CitiesLoaded(Result<Vec<WeatherRecord>, FetchError>),
    PositionResolved(Result<Coordinates, LocationError>),
    LocalWeatherLoaded(Result<WeatherRecord, FetchError>),
    NotificationExpired(u64),
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCities(Vec<String>),
    FetchLocalWeather(Coordinates),
    DismissAfter { id: u64, after: Duration },
}

pub fn update(state: ViewState, msg: Msg, now: Instant) -> (ViewState, Option<Effect>) {
    match msg {
        Msg::FieldChanged(text) => (
            ViewState {
                form: state.form.update_field(text),
                ..state
            },
            None,
        ),
        Msg::FieldBlurred => (
            ViewState {
                form: state.form.blur(),
                ..state
            },
            None,
        ),
        Msg::SubmitRequested => {
            if state.form.is_submitting() {
                tracing::debug!("Submit ignored while a search is in flight");
                return (state, None);
            }
            let (form, checked) = state.form.submit();
            let effect = match checked {
                Ok(cities) => Some(Effect::FetchCities(cities)),
                Err(err) => {
                    tracing::debug!("Search input rejected: {}", err);
                    None
                }
            };
            (ViewState { form, ..state }, effect)
        }
        Msg::CitiesLoaded(Ok(records)) => (
            ViewState {
                form: state.form.finish_submit(true),
                results: records,
                ..state
            },
            None,
        ),
        Msg::CitiesLoaded(Err(err)) => {
            tracing::warn!("City search failed: {}", err);
            let message = match err {
                FetchError::NotFound => CITY_NOT_FOUND_MESSAGE,
                FetchError::Generic(_) => GENERIC_ERROR_MESSAGE,
            };
            let state = ViewState {
                form: state.form.finish_submit(false),
                ..state
            };
            notify(state, message, now)
        }
        Msg::PositionResolved(Ok(coords)) => (state, Some(Effect::FetchLocalWeather(coords))),
        Msg::PositionResolved(Err(err)) => {
            tracing::debug!("Location unavailable, skipping local weather: {}", err);
            (state, None)
        }
        Msg::LocalWeatherLoaded(Ok(record)) => (
            ViewState {
                current_location: Some(record),
                ..state
            },
            None,
        ),
        Msg::LocalWeatherLoaded(Err(err)) => {
            tracing::warn!("Local weather failed: {}", err);
            notify(state, LOCATION_ERROR_MESSAGE, now)
        }
        Msg::NotificationExpired(id) => (
            ViewState {
                notifications: state.notifications.dismiss(id).evict_expired(now),
                ..state
            },
            None,
        ),
    }
}

fn notify(state: ViewState, message: &str, now: Instant) -> (ViewState, Option<Effect>) {
    let (notifications, id) = state.notifications.show(Severity::Error, message, now);
    let after = notifications.ttl();
    (
        ViewState {
            notifications,
            ..state
        },
        Some(Effect::DismissAfter { id, after }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormPhase, ValidationError};

    fn record(name: &str) -> WeatherRecord {
        WeatherRecord {
            name: name.to_string(),
            condition: "Clear".to_string(),
            icon: "01d".to_string(),
            temperature: 20.0,
        }
    }

    fn apply(state: ViewState, msgs: Vec<Msg>, now: Instant) -> (ViewState, Option<Effect>) {
        let mut effect = None;
        let mut state = state;
        for msg in msgs {
            let (next, e) = update(state, msg, now);
            state = next;
            effect = e;
        }
        (state, effect)
    }

    #[test]
    fn test_invalid_submit_has_no_effect() {
        let now = Instant::now();
        let state = ViewState::new(Duration::from_secs(4));
        let (state, effect) = apply(
            state,
            vec![Msg::FieldChanged("Paris2".into()), Msg::SubmitRequested],
            now,
        );

        assert_eq!(effect, None);
        assert_eq!(state.form.visible_error(), Some(ValidationError::Format));
        assert!(state.notifications.visible(now).is_none());
    }

    #[test]
    fn test_submit_requests_fetch_in_order() {
        let now = Instant::now();
        let state = ViewState::new(Duration::from_secs(4));
        let (state, effect) = apply(
            state,
            vec![
                Msg::FieldChanged("Paris, london ,Tokyo".into()),
                Msg::FieldBlurred,
                Msg::SubmitRequested,
            ],
            now,
        );

        assert_eq!(
            effect,
            Some(Effect::FetchCities(vec![
                "Paris".into(),
                "london".into(),
                "Tokyo".into()
            ]))
        );
        assert_eq!(state.form.phase(), FormPhase::Submitting);

        let (_, again) = update(state, Msg::SubmitRequested, now);
        assert_eq!(again, None);
    }

    #[test]
    fn test_success_replaces_results_and_clears_field() {
        let now = Instant::now();
        let mut state = ViewState::new(Duration::from_secs(4));
        state.results = vec![record("Old")];

        let (state, _) = apply(
            state,
            vec![
                Msg::FieldChanged("Paris, Rome".into()),
                Msg::SubmitRequested,
                Msg::CitiesLoaded(Ok(vec![record("Paris"), record("Rome")])),
            ],
            now,
        );

        let names: Vec<&str> = state.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Paris", "Rome"]);
        assert_eq!(state.form.value(), "");
    }

    #[test]
    fn test_not_found_keeps_field_and_results() {
        let now = Instant::now();
        let mut state = ViewState::new(Duration::from_secs(4));
        state.results = vec![record("Old")];

        let (state, effect) = apply(
            state,
            vec![
                Msg::FieldChanged("Paris, Atlantis".into()),
                Msg::SubmitRequested,
                Msg::CitiesLoaded(Err(FetchError::NotFound)),
            ],
            now,
        );

        assert_eq!(state.form.value(), "Paris, Atlantis");
        assert_eq!(state.results, vec![record("Old")]);
        let visible = state.notifications.visible(now).unwrap();
        assert_eq!(visible.message, CITY_NOT_FOUND_MESSAGE);
        assert_eq!(
            effect,
            Some(Effect::DismissAfter {
                id: visible.id,
                after: Duration::from_secs(4)
            })
        );
    }

    #[test]
    fn test_generic_failure_message() {
        let now = Instant::now();
        let (state, _) = apply(
            ViewState::new(Duration::from_secs(4)),
            vec![
                Msg::FieldChanged("Paris".into()),
                Msg::SubmitRequested,
                Msg::CitiesLoaded(Err(FetchError::Generic("timeout".into()))),
            ],
            now,
        );

        assert_eq!(
            state.notifications.visible(now).unwrap().message,
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_location_denied_is_silent() {
        let now = Instant::now();
        let (state, effect) = update(
            ViewState::new(Duration::from_secs(4)),
            Msg::PositionResolved(Err(LocationError::PermissionDenied)),
            now,
        );

        assert_eq!(effect, None);
        assert!(state.current_location.is_none());
        assert!(state.notifications.visible(now).is_none());
    }

    #[test]
    fn test_location_flow_is_independent_of_results() {
        let now = Instant::now();
        let coords = Coordinates::new(48.85, 2.35).unwrap();
        let (state, effect) = update(
            ViewState::new(Duration::from_secs(4)),
            Msg::PositionResolved(Ok(coords)),
            now,
        );
        assert_eq!(effect, Some(Effect::FetchLocalWeather(coords)));

        let (state, _) = update(state, Msg::LocalWeatherLoaded(Ok(record("Paris"))), now);
        assert_eq!(state.current_location, Some(record("Paris")));
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_notification_expired_message() {
        let now = Instant::now();
        let (state, effect) = update(
            ViewState::new(Duration::from_secs(4)),
            Msg::LocalWeatherLoaded(Err(FetchError::Generic("boom".into()))),
            now,
        );
        let Some(Effect::DismissAfter { id, .. }) = effect else {
            panic!("expected dismiss effect");
        };

        let (state, _) = update(state, Msg::NotificationExpired(id), now);
        assert!(state.notifications.visible(now).is_none());
    }

    #[test]
    fn test_failure_after_invalid_edit_keeps_inline_error() {
        let now = Instant::now();
        let (state, _) = apply(
            ViewState::new(Duration::from_secs(4)),
            vec![
                Msg::FieldChanged("Atlantis".into()),
                Msg::SubmitRequested,
                Msg::FieldChanged("Atlantis 2".into()),
                Msg::CitiesLoaded(Err(FetchError::NotFound)),
            ],
            now,
        );

        assert_eq!(state.form.value(), "Atlantis 2");
        assert_eq!(state.form.visible_error(), Some(ValidationError::Format));
        assert_eq!(
            state.notifications.visible(now).unwrap().message,
            CITY_NOT_FOUND_MESSAGE
        );
    }
}
