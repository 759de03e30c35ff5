//! MCP server over stdio.
//!
//! Advertises the four router tools and forwards each call to the
//! [`Dispatcher`]. stdout is the protocol channel; all logging goes to
//! stderr or the log file.

use std::time::Instant;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router, ErrorData, ServerHandler,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ServerSettings;
use crate::dispatch::{
    DetectWorkflowRequest, Dispatcher, EnhancePromptRequest, SuggestPersonaRequest, ToolOutput,
};
use crate::error::Error;

#[derive(Clone)]
pub struct PersonaRouterServer {
    dispatcher: Dispatcher,
    settings: ServerSettings,
    tool_router: ToolRouter<Self>,
}

impl PersonaRouterServer {
    pub fn new(dispatcher: Dispatcher, settings: ServerSettings) -> Self {
        Self {
            dispatcher,
            settings,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve on stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> crate::error::Result<()> {
        info!(name = %self.settings.name, "Starting MCP server on stdio");

        let transport = rmcp::transport::io::stdio();
        let service = rmcp::serve_server(self, transport)
            .await
            .map_err(|e| Error::Server(format!("Failed to start MCP server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| Error::Server(format!("MCP server terminated abnormally: {}", e)))?;

        info!("MCP client disconnected, shutting down");
        Ok(())
    }
}

fn to_call_result(output: ToolOutput) -> CallToolResult {
    let content = output.content.into_iter().map(Content::text).collect();
    if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

#[tool_router]
impl PersonaRouterServer {
    #[tool(description = "Enhance a prompt with the most suitable persona(s). Detects multi-persona workflows, or forces a persona when force_persona is given.")]
    async fn enhance_prompt(
        &self,
        Parameters(req): Parameters<EnhancePromptRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(to_call_result(self.dispatcher.enhance(
            &req.prompt,
            req.context.as_deref(),
            req.force_persona.as_deref(),
        )))
    }

    #[tool(description = "Analyze a prompt and recommend a persona or workflow without modifying it.")]
    async fn suggest_persona(
        &self,
        Parameters(req): Parameters<SuggestPersonaRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(to_call_result(self.dispatcher.suggest(&req.prompt)))
    }

    #[tool(description = "List all available personas with their commands and descriptions.")]
    async fn list_personas(&self) -> Result<CallToolResult, ErrorData> {
        Ok(to_call_result(self.dispatcher.list()))
    }

    #[tool(description = "Detect whether a prompt calls for a multi-persona workflow.")]
    async fn detect_workflow(
        &self,
        Parameters(req): Parameters<DetectWorkflowRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(to_call_result(self.dispatcher.detect_workflow(&req.prompt)))
    }
}

impl ServerHandler for PersonaRouterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: self.settings.name.clone(),
                title: Some("Persona Router".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(self.settings.instructions.clone()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_
    {
        async move {
            let call_id = Uuid::new_v4();
            let tool = request.name.to_string();
            let started = Instant::now();
            debug!(%call_id, tool = %tool, "Tool call received");

            let ctx = ToolCallContext::new(self, request, context);
            let result = self.tool_router.call(ctx).await;

            let duration_ms = started.elapsed().as_millis() as u64;
            match &result {
                Ok(res) => info!(
                    %call_id,
                    tool = %tool,
                    duration_ms,
                    is_error = res.is_error.unwrap_or(false),
                    "Tool call completed"
                ),
                Err(e) => info!(
                    %call_id,
                    tool = %tool,
                    duration_ms,
                    error = %e.message,
                    "Tool call rejected"
                ),
            }

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> PersonaRouterServer {
        PersonaRouterServer::new(Dispatcher::default(), ServerSettings::default())
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_advertises_four_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "detect_workflow",
                "enhance_prompt",
                "list_personas",
                "suggest_persona"
            ]
        );
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "persona-router");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }

    #[tokio::test]
    async fn test_enhance_prompt_tool() {
        let result = server()
            .enhance_prompt(Parameters(EnhancePromptRequest {
                prompt: "audit this".to_string(),
                context: None,
                force_persona: Some("tech-writer".to_string()),
            }))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("/doc\n\n"));
    }

    #[tokio::test]
    async fn test_enhance_prompt_pass_through() {
        let result = server()
            .enhance_prompt(Parameters(EnhancePromptRequest {
                prompt: "what is the weather".to_string(),
                context: None,
                force_persona: None,
            }))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "what is the weather");
    }

    #[tokio::test]
    async fn test_list_personas_tool() {
        let result = server().list_personas().await.unwrap();
        let text = text_of(&result);
        assert!(text.contains("(/security)"));
        assert!(text.contains("(/dev)"));
    }

    #[tokio::test]
    async fn test_detect_workflow_tool() {
        let result = server()
            .detect_workflow(Parameters(DetectWorkflowRequest {
                prompt: "debug and document the parser".to_string(),
            }))
            .await
            .unwrap();
        assert!(text_of(&result).contains("**Personas**: Problem Solver → Technical Writer"));
    }

    #[test]
    fn test_error_output_sets_flag() {
        let result = to_call_result(ToolOutput::error("original"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "original");
    }
}
