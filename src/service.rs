use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};

use crate::config::Config;
use crate::fetcher::WeatherClient;
use crate::location::Geolocator;
use crate::models::SearchWeatherRequest;
use crate::session::Session;
use crate::state::{Msg, ViewState};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    session: Session,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &Config) -> Result<Self> {
        let client = WeatherClient::new(config)?;
        let state = ViewState::new(config.notification_ttl);

        Ok(Self {
            session: Session::new(client, state, config.icon_base.clone()),
            tool_router: Self::tool_router(),
        })
    }

    /// Kicks off the one-shot local weather lookup
    pub fn detect_location(&self, geolocator: Geolocator) {
        tracing::info!("Looking up local weather");
        self.session.detect_location(geolocator);
    }

    async fn rendered(&self) -> Result<CallToolResult, McpError> {
        let view = self.session.render().await;
        Ok(CallToolResult::success(vec![Content::text(view)]))
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-search".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Current weather by city name, powered by OpenWeatherMap. \
                Search one or more cities separated by commas; local weather is shown when the \
                host position is known."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Validates the input and fetches every listed city
    #[tool(description = "Search current weather for one or more cities. Provide city names separated by commas (e.g., 'Paris, London, Tokyo'). Names may only contain ASCII letters and spaces. Returns the updated weather view; if any city fails, the previous results are kept and an error notification is shown.")]
    async fn search_weather(
        &self,
        Parameters(request): Parameters<SearchWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching weather for: {}", request.city);

        self.session
            .dispatch_all(vec![
                Msg::FieldChanged(request.city),
                Msg::FieldBlurred,
                Msg::SubmitRequested,
            ])
            .await;

        self.rendered().await
    }

    /// Updates the search field without submitting
    #[tool(description = "Type into the city search field without submitting. Returns the view with any validation message for the current text.")]
    async fn edit_search(
        &self,
        Parameters(request): Parameters<SearchWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("Editing search field: {}", request.city);

        self.session
            .dispatch_all(vec![Msg::FieldChanged(request.city), Msg::FieldBlurred])
            .await;

        self.rendered().await
    }

    /// Shows the current view
    #[tool(description = "Show the current weather view: local weather, any active notification, and the latest search results.")]
    async fn show_weather(&self) -> Result<CallToolResult, McpError> {
        self.rendered().await
    }
}
