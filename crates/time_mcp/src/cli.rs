use clap::Parser;

/// Time MCP Server
///
/// Gives a model the ability to handle time queries and timezone conversions
/// over the Model Context Protocol.
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-time
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "time": {
///       "command": "mcp-server-time",
///       "args": ["--local-timezone", "Europe/Berlin"]
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-time")]
#[command(about = "give a model the ability to handle time queries and timezone conversions")]
#[command(version)]
pub struct Cli {
    /// Override the local timezone.
    ///
    /// Accepts an IANA timezone name such as 'Europe/Berlin'. When omitted
    /// the server detects the system timezone. The value is forwarded to the
    /// server as-is; an unknown name is rejected at startup, not here.
    #[arg(long, value_name = "TIMEZONE")]
    pub local_timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_no_flags_means_no_override() {
        let cli = Cli::try_parse_from(["mcp-server-time"]).unwrap();
        assert!(cli.local_timezone.is_none());
    }

    #[test]
    fn test_override_is_captured_verbatim() {
        let cli =
            Cli::try_parse_from(["mcp-server-time", "--local-timezone", "Europe/Berlin"]).unwrap();
        assert_eq!(cli.local_timezone.as_deref(), Some("Europe/Berlin"));

        let cli = Cli::try_parse_from(["mcp-server-time", "--local-timezone=UTC"]).unwrap();
        assert_eq!(cli.local_timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn test_override_content_is_not_validated_here() {
        let cli = Cli::try_parse_from(["mcp-server-time", "--local-timezone", "not a zone"])
            .unwrap();
        assert_eq!(cli.local_timezone.as_deref(), Some("not a zone"));
    }

    #[test]
    fn test_unknown_flag_is_a_parse_error() {
        assert!(Cli::try_parse_from(["mcp-server-time", "--unknown-flag"]).is_err());
    }

    #[test]
    fn test_missing_value_is_a_parse_error() {
        assert!(Cli::try_parse_from(["mcp-server-time", "--local-timezone"]).is_err());
    }
}
