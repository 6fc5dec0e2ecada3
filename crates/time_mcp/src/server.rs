use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::core::{
    error::{McpResult, TimeServerError, TimeServerResult},
    models::{ConvertTimeRequest, GetCurrentTimeRequest},
    provider::{LocalTimezoneSource, TimeProvider},
};

/// Render a tool payload as pretty-printed JSON content
fn render_json<T: serde::Serialize>(value: &T) -> McpResult<CallToolResult> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Time MCP Server with timezone operations
#[derive(Clone)]
pub struct TimeService {
    provider: TimeProvider,
    tool_router: ToolRouter<TimeService>,
    prompt_router: PromptRouter<TimeService>,
}

impl TimeService {
    /// Build the service, honoring an optional local-timezone override.
    ///
    /// Fails when the override does not name a known IANA timezone.
    pub fn new(local_timezone: Option<&str>) -> TimeServerResult<Self> {
        Ok(Self {
            provider: TimeProvider::new(local_timezone)?,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        })
    }

    pub(crate) fn local_timezone_name(&self) -> &'static str {
        self.provider.local_timezone().name()
    }

    fn local_timezone_label(&self) -> String {
        let name = self.local_timezone_name();
        match self.provider.local_timezone_source() {
            LocalTimezoneSource::Override => format!("{name} (from --local-timezone)"),
            LocalTimezoneSource::Detected => format!("{name} (detected)"),
            LocalTimezoneSource::Fallback => format!("{name} (fallback)"),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    fn generate_status_content(&self) -> McpResult<String> {
        let now = self.provider.current_time(None)?;

        Ok(format!(
            r#"Time MCP Server Status

Server: Running
Local Timezone: {}
Current Local Time: {}
Day of Week: {}
DST Active: {}

Tools: get_current_time, convert_time
Prompts: timezone_guidance
Resources: time://status, time://help, time://timezones"#,
            self.local_timezone_label(),
            now.datetime,
            now.day_of_week,
            now.is_dst
        ))
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Time MCP Server Help

TOOLS:
- get_current_time: Get the current time in a timezone
  - timezone: IANA timezone name (optional, defaults to the local timezone)
  - Example: {{"timezone": "Asia/Tokyo"}}

- convert_time: Convert a wall-clock time between timezones
  - source_timezone: IANA timezone name (optional, defaults to the local timezone)
  - time: 24-hour HH:MM time on today's date in the source timezone (required)
  - target_timezone: IANA timezone name (optional, defaults to the local timezone)
  - Example: {{"source_timezone": "America/New_York", "time": "14:30", "target_timezone": "Europe/London"}}

PROMPTS:
- timezone_guidance: Best practices for timezone usage

RESOURCES:
- time://status: Server status and current local time
- time://help: This help documentation
- time://timezones: Common IANA timezone names

LOCAL TIMEZONE: {}
The local timezone is detected from the system unless the server was started
with --local-timezone. Omitted timezone parameters resolve to it.

NOTES:
- Use full IANA names ('America/New_York'), not abbreviations ('EST')
- Times use the 24-hour clock ('09:30', '23:15')
- DST offsets are applied automatically; results carry an 'is_dst' flag
- Times that fall into a DST gap or fold are rejected with an error"#,
            self.local_timezone_label()
        )
    }

    fn generate_timezone_list_content(&self) -> &'static str {
        r#"Common IANA Timezone Names

UTC-8 to UTC-5 (North America):
- America/Los_Angeles, America/Vancouver (Pacific)
- America/Denver (Mountain)
- America/Chicago, America/Mexico_City (Central)
- America/New_York, America/Toronto (Eastern)

UTC-3 (South America):
- America/Sao_Paulo
- America/Argentina/Buenos_Aires

UTC+0 to UTC+3 (Europe / Africa):
- Europe/London, Africa/Lagos
- Europe/Paris, Europe/Berlin, Europe/Rome, Europe/Madrid
- Europe/Athens, Africa/Cairo, Africa/Johannesburg
- Europe/Moscow

UTC+4 to UTC+7 (Middle East / South Asia):
- Asia/Dubai
- Asia/Karachi
- Asia/Kolkata (UTC+5:30), Asia/Kathmandu (UTC+5:45)
- Asia/Bangkok, Asia/Jakarta

UTC+8 to UTC+12 (East Asia / Oceania):
- Asia/Shanghai, Asia/Hong_Kong, Asia/Singapore
- Asia/Tokyo, Asia/Seoul
- Australia/Sydney, Australia/Melbourne
- Pacific/Auckland

SPECIAL:
- UTC (Coordinated Universal Time)

Offsets shown are standard time; zones that observe DST shift during their
DST period and report it through the 'is_dst' field."#
    }
}

#[tool_router]
impl TimeService {
    #[tool(
        description = "Get the current time in an IANA timezone (defaults to the server's local timezone)"
    )]
    pub(crate) async fn get_current_time(
        &self,
        Parameters(req): Parameters<GetCurrentTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.provider.current_time(req.timezone.as_deref())?;
        render_json(&result)
    }

    #[tool(
        description = "Convert a 24-hour HH:MM time between IANA timezones (both default to the server's local timezone)"
    )]
    pub(crate) async fn convert_time(
        &self,
        Parameters(req): Parameters<ConvertTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.provider.convert_time(
            req.source_timezone.as_deref(),
            &req.time,
            req.target_timezone.as_deref(),
        )?;
        render_json(&result)
    }
}

#[prompt_router]
impl TimeService {
    /// Generate guidance for effective timezone usage
    #[prompt(name = "timezone_guidance")]
    async fn timezone_guidance(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> McpResult<Vec<PromptMessage>> {
        let guidance = format!(
            r#"Timezone Best Practices:

1. **Naming**
   - Always use full IANA timezone names ('America/New_York', 'Europe/London')
   - Abbreviations like 'EST' or 'CST' are ambiguous and rejected
   - This server's local timezone: {}

2. **Defaults**
   - Timezone parameters are optional; an omitted timezone means the server's
     local timezone
   - The local timezone can be pinned at startup with --local-timezone

3. **Time Format**
   - convert_time takes the 24-hour clock (HH:MM), e.g. '09:30' or '23:15'
   - Conversions are anchored on today's date in the source timezone

4. **Daylight Saving Time**
   - Offsets account for DST automatically; check the 'is_dst' field
   - A wall-clock time skipped by a DST transition is an error (nonexistent),
     as is one that occurs twice (ambiguous)"#,
            self.local_timezone_name()
        );

        Ok(vec![PromptMessage {
            role: PromptMessageRole::Assistant,
            content: PromptMessageContent::text(guidance),
        }])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for TimeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Time MCP Server for time queries and timezone conversions. Tools: get_current_time, convert_time. Local timezone: {}. Use IANA timezone names; omitted timezones default to the local one.",
                self.local_timezone_name()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("time://status", "server-status"),
                self.create_resource_text("time://help", "help-documentation"),
                self.create_resource_text("time://timezones", "timezone-list"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        let contents = match uri.as_str() {
            "time://status" => self.generate_status_content()?,
            "time://help" => self.generate_help_content(),
            "time://timezones" => self.generate_timezone_list_content().to_string(),
            _ => {
                return Err(TimeServerError::ResourceNotFound {
                    uri: uri.to_string(),
                }
                .into());
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(contents, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!(
            "Time MCP Server initialized, local timezone: {}",
            self.local_timezone_name()
        );
        Ok(self.get_info())
    }
}

/// Start the server over stdio and run it to completion
pub async fn run(local_timezone: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = TimeService::new(local_timezone.as_deref())?
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
