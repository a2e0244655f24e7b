//! MCP protocol surface: server identity, `tools/list` and `tools/call`.

use crate::catalog;
use crate::tools::ToolGateway;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use std::sync::Arc;

pub const SERVER_NAME: &str = "gocardless-mcp";

const INSTRUCTIONS: &str = "\
GoCardless MCP server. Objects link together as customer (CU...) -> mandate (MD...) -> \
subscription (SB...) or payment (PM...).\n\
- To go from a subscription to its customer, call get_subscription_details (one call) instead of \
get_subscription, get_mandate and get_customer in turn.\n\
- list_payments accepts subscription and mandate filters to find the payments of one agreement.\n\
- Amounts are in minor currency units (1000 = 10.00).\n\
- Records synced with Xero carry metadata.xero as a JSON string: {\"contact\": ...} on customers \
and mandates, {\"invoice\": ..., \"payment\": ...} on payments.";

/// The MCP server. Cheap to clone; the HTTP transport clones it per session.
#[derive(Clone)]
pub struct GoCardlessServer {
    gateway: Arc<ToolGateway>,
    tools: Arc<Vec<Tool>>,
}

impl GoCardlessServer {
    #[must_use]
    pub fn new(gateway: ToolGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            tools: Arc::new(catalog::tools()),
        }
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

impl ServerHandler for GoCardlessServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.gateway.call(&request.name, &arguments).await)
    }
}
