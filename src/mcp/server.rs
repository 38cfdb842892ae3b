//! MCP Server handler for the Twilio API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use std::sync::Arc;

use crate::{mcp::UpdateCallParams, TwilioClient, TwilioError, Updater};

/// Twilio MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to act on
/// calls through the Model Context Protocol.
///
/// # Tools
///
/// - `update_call` - Redirect, cancel, or complete a call
#[derive(Clone)]
pub struct TwilioServer {
    client: Arc<TwilioClient>,
}

impl TwilioServer {
    /// Create a new TwilioServer from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TWILIO_ACCOUNT_SID` or `TWILIO_AUTH_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = TwilioClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new TwilioServer with an existing client.
    pub fn new(client: TwilioClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert TwilioError to McpError.
    fn to_mcp_error(err: TwilioError) -> McpError {
        match &err {
            TwilioError::Api { status: 404, .. } => {
                McpError::resource_not_found(err.to_string(), None)
            }
            TwilioError::Api { status, .. } if (400..500).contains(status) => {
                McpError::invalid_params(err.to_string(), None)
            }
            TwilioError::ConfigMissing(msg) => McpError::invalid_params(msg.clone(), None),
            TwilioError::InvalidValue { .. } | TwilioError::UrlError(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    /// Handle the `update_call` tool.
    ///
    /// Returns the updated call as pretty-printed JSON.
    pub async fn handle_update_call(
        &self,
        params: UpdateCallParams,
    ) -> Result<CallToolResult, McpError> {
        let updater = params.into_updater().map_err(Self::to_mcp_error)?;
        let call = updater
            .execute(self.client.as_ref())
            .await
            .map_err(Self::to_mcp_error)?;
        let result = serde_json::to_string_pretty(&call)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }
}

impl ServerHandler for TwilioServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "twilapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Twilio API MCP Server - Redirect, cancel, or complete voice calls.".to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![Tool::new(
            "update_call",
            "Update a Twilio call by sid. Only the fields given are sent. \
             url/method redirect the call to new TwiML; \
             status canceled hangs up queued or ringing calls, completed hangs up any call; \
             fallback_url/fallback_method and status_callback/status_callback_method \
             replace the call's callbacks.",
            Self::schema::<UpdateCallParams>(),
        )];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "update_call" => {
                let params: UpdateCallParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_update_call(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(sid: &str) -> UpdateCallParams {
        serde_json::from_value(serde_json::json!({ "sid": sid })).unwrap()
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn schema_generates_for_update_call_params() {
        let schema = TwilioServer::schema::<UpdateCallParams>();
        assert!(!schema.is_empty());
    }

    #[test]
    fn server_implements_handler() {
        fn assert_server_handler<T: ServerHandler>() {}
        assert_server_handler::<TwilioServer>();
    }

    #[test]
    fn server_info_has_correct_name() {
        let client = TwilioClient::new("AC1", "t", "https://api.twilio.com").unwrap();
        let server = TwilioServer::new(client);
        let info = server.get_info();
        assert_eq!(info.server_info.name, "twilapi");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn not_found_maps_to_resource_not_found() {
        let err = TwilioServer::to_mcp_error(TwilioError::Api {
            message: "not found".to_string(),
            code: 20404,
            more_info: None,
            status: 404,
        });
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[test]
    fn client_errors_map_to_invalid_params() {
        let err = TwilioServer::to_mcp_error(TwilioError::Api {
            message: "bad".to_string(),
            code: 21220,
            more_info: None,
            status: 400,
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = TwilioServer::to_mcp_error(TwilioError::ApiConnection("down".to_string()));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn handle_update_call_returns_call_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls/CA42.json"))
            .and(body_string("Status=completed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sid": "CA42",
                "account_sid": "AC1",
                "status": "completed"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC1", "t", &mock_server.uri()).unwrap();
        let server = TwilioServer::new(client);

        let mut update = params("CA42");
        update.status = Some(crate::CallStatus::Completed);

        let result = server.handle_update_call(update).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let call: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(call["sid"], "CA42");
        assert_eq!(call["status"], "completed");
    }

    #[tokio::test]
    async fn handle_update_call_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "code": 20404,
                "message": "The requested resource was not found",
                "more_info": "https://www.twilio.com/docs/errors/20404",
                "status": 404
            })))
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC1", "t", &mock_server.uri()).unwrap();
        let server = TwilioServer::new(client);

        let err = server.handle_update_call(params("CA404")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn handle_update_call_rejects_bad_url_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC1", "t", &mock_server.uri()).unwrap();
        let server = TwilioServer::new(client);

        let mut update = params("CA42");
        update.url = Some("::nope::".to_string());

        let err = server.handle_update_call(update).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }
}
