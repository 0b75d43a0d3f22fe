//! Owns the view state for the lifetime of the server and runs the effects
//! the reducer asks for.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::fetcher::WeatherClient;
use crate::location::Geolocator;
use crate::render::render_view;
use crate::state::{update, Effect, Msg, ViewState};

#[derive(Clone)]
pub struct Session {
    client: WeatherClient,
    state: Arc<Mutex<ViewState>>,
    icon_base: String,
}

impl Session {
    pub fn new(client: WeatherClient, state: ViewState, icon_base: String) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(state)),
            icon_base,
        }
    }

    /// Applies one message. The lock is released before returning.
    pub async fn dispatch(&self, msg: Msg) -> Option<Effect> {
        let mut guard = self.state.lock().await;
        let (next, effect) = update(guard.clone(), msg, Instant::now());
        *guard = next;
        effect
    }

    /// Dispatches each message in order, running its effects before the next.
    pub async fn dispatch_all(&self, msgs: Vec<Msg>) {
        for msg in msgs {
            let effect = self.dispatch(msg).await;
            self.run(effect).await;
        }
    }

    /// Runs effects until the reducer stops asking for more.
    pub async fn run(&self, mut effect: Option<Effect>) {
        while let Some(current) = effect.take() {
            effect = match current {
                Effect::FetchCities(names) => {
                    let result = self.client.fetch_by_names(&names).await;
                    self.dispatch(Msg::CitiesLoaded(result)).await
                }
                Effect::FetchLocalWeather(coords) => {
                    let result = self.client.fetch_by_coordinates(coords).await;
                    self.dispatch(Msg::LocalWeatherLoaded(result)).await
                }
                Effect::DismissAfter { id, after } => {
                    let session = self.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        session.dispatch(Msg::NotificationExpired(id)).await;
                    });
                    None
                }
            };
        }
    }

    /// Starts the one-shot local weather lookup in the background.
    pub fn detect_location(&self, geolocator: Geolocator) -> tokio::task::JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let position = geolocator.current_position().await;
            let effect = session.dispatch(Msg::PositionResolved(position)).await;
            session.run(effect).await;
        })
    }

    pub async fn render(&self) -> String {
        let state = self.state.lock().await;
        render_view(&state, &self.icon_base, Instant::now())
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }
}
