use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::domain::models::ModelRegistry;
use crate::domain::JsonObject;
use crate::infra::config::{Config, Mode};

#[derive(Parser)]
#[command(name = "pair-mcp-gateway")]
#[command(about = "Pair MCP Gateway - second-opinion LLM tools over MCP")]
#[command(version)]
pub struct Cli {
    /// Without a subcommand the gateway serves in the configured MODE
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and tool count
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// List model nicknames and the provider models they map to
    Models,
    /// List registered tools and their arguments
    Tools,
    /// Invoke one tool directly and print its answer
    Invoke {
        /// Tool name, e.g. `review`
        tool: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(summary) => {
                println!("{summary}");
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Models => {
            print!("{}", models_table());
            ExitCode::SUCCESS
        }
        Commands::Tools => match tools_table() {
            Ok(table) => {
                print!("{table}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Invoke { tool, args } => match invoke_once(&tool, &args).await {
            Ok(answer) => {
                println!("{answer}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<String, Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    if config.mode == Mode::Server && config.port == 0 {
        return Err("PORT cannot be 0".into());
    }

    let key = if config.api_key.is_some() { "set" } else { "MISSING (required to serve)" };
    let log_dir = config
        .resolved_log_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "stderr only".into());
    Ok(format!(
        "📋 Configuration:\n  Mode: {}\n  Port: {}\n  Provider: {}\n  API key: {}\n  Log dir: {}\n  Debug: {}",
        config.mode, config.port, config.provider.base_url, key, log_dir, config.debug
    ))
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let tools_response = client
        .get(format!("{}/v1/tools", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            let count = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["tools"].as_array().map(|a| a.len()));
            match count {
                Some(n) => println!("🔧 Tools: ✅ {} available", n),
                None => println!("🔧 Tools: ❌ unreadable listing"),
            }
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    Ok(())
}

fn models_table() -> String {
    let mut out = String::new();
    for m in ModelRegistry::builtin().entries() {
        out.push_str(&format!(
            "{:<10} {:<28} temperature {}\n",
            m.nickname, m.provider_model_id, m.default_temperature
        ));
    }
    out
}

fn tools_table() -> Result<String, Box<dyn std::error::Error>> {
    let registry = crate::tools::registry::build_registry()?;
    let mut out = String::new();
    for meta in registry.list() {
        let required: Vec<&str> = meta
            .input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        out.push_str(&format!("{} (required: {})\n", meta.name, required.join(", ")));
        out.push_str(&format!("    {}\n", meta.description));
    }
    Ok(out)
}

async fn invoke_once(tool: &str, args: &str) -> Result<String, Box<dyn std::error::Error>> {
    let arguments: JsonObject = serde_json::from_str(args)
        .map_err(|e| format!("--args must be a JSON object: {e}"))?;
    let config = Config::from_env()?;
    let dispatcher = crate::infra::boot::build_dispatcher(&config).map_err(|e| e.to_string())?;
    Ok(dispatcher.invoke(tool, &arguments).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &["MODE", "PORT", "CONFIG_FILE", "OPENROUTER_API_KEY", "OPENROUTER_BASE_URL"];

    fn clear_env() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[tokio::test]
    async fn health_check_fails_without_service() {
        let result = health_check("http://localhost:9999").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn health_check_ok_and_error_paths() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        assert!(health_check(&server.base_url()).await.is_ok());

        let bad = MockServer::start();
        bad.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500); });
        assert!(health_check(&bad.base_url()).await.is_err());
    }

    #[test]
    #[serial]
    fn validate_config_reports_missing_key() {
        clear_env();
        env::set_var("MODE", "server");
        env::set_var("PORT", "8080");

        let summary = validate_config().unwrap();
        assert!(summary.contains("Mode: server"));
        assert!(summary.contains("API key: MISSING"));

        clear_env();
    }

    #[test]
    #[serial]
    fn validate_config_invalid_mode() {
        clear_env();
        env::set_var("MODE", "invalid");

        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("Invalid MODE"));

        clear_env();
    }

    #[test]
    #[serial]
    fn validate_config_zero_port_in_server_mode() {
        clear_env();
        env::set_var("MODE", "server");
        env::set_var("PORT", "0");

        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("PORT cannot be 0"));

        clear_env();
    }

    #[test]
    #[serial]
    fn validate_config_defaults_to_stdio_with_key() {
        clear_env();
        env::set_var("OPENROUTER_API_KEY", "sk-or-test");

        let summary = validate_config().unwrap();
        assert!(summary.contains("Mode: stdio"));
        assert!(summary.contains("API key: set"));

        clear_env();
    }

    #[tokio::test]
    async fn status_counts_tools() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        let tools = server.mock(|when, then| {
            when.method(GET).path("/v1/tools");
            then.status(200).json_body(serde_json::json!({"tools":[{"name":"pair"},{"name":"review"}]}));
        });
        assert!(show_status(&server.base_url()).await.is_ok());
        tools.assert();
    }

    #[tokio::test]
    async fn status_handles_non_200_health_and_tools() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500).body("boom"); });
        server.mock(|when, then| { when.method(GET).path("/v1/tools"); then.status(500).body("boom"); });
        assert!(show_status(&server.base_url()).await.is_ok());
    }

    #[tokio::test]
    async fn status_fails_when_service_is_down() {
        assert!(show_status("http://localhost:9999").await.is_err());
    }

    #[test]
    fn models_table_lists_every_nickname_in_order() {
        let table = models_table();
        let names: Vec<&str> = table.lines().filter_map(|l| l.split_whitespace().next()).collect();
        assert_eq!(names, vec!["O3", "Gemini", "Grok", "DeepSeek", "Opus"]);
        assert!(table.contains("google/gemini-2.5-pro"));
    }

    #[test]
    fn tools_table_shows_required_arguments() {
        let table = tools_table().unwrap();
        assert!(table.contains("pair (required: prompt)"));
        assert!(table.contains("review_security (required: code)"));
        assert!(table.contains("brainstorm (required: topic)"));
    }

    #[tokio::test]
    async fn invoke_rejects_non_object_args() {
        let err = invoke_once("pair", "[1,2]").await.unwrap_err();
        assert!(err.to_string().contains("--args must be a JSON object"));
    }

    #[tokio::test]
    #[serial]
    async fn invoke_requires_api_key() {
        clear_env();
        let err = invoke_once("pair", r#"{"prompt":"hi"}"#).await.unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }

    #[tokio::test]
    #[serial]
    async fn invoke_calls_provider() {
        use httpmock::prelude::*;
        clear_env();
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "second opinion"}}]
            }));
        });
        env::set_var("OPENROUTER_API_KEY", "sk-or-test");
        env::set_var("OPENROUTER_BASE_URL", server.base_url());

        let answer = invoke_once("brainstorm", r#"{"topic":"caching"}"#).await.unwrap();
        assert_eq!(answer, "second opinion");
        m.assert();

        let code = run_commands(Commands::Invoke { tool: "nope".into(), args: "{}".into() }).await;
        assert_eq!(code, ExitCode::FAILURE);
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_config_and_listings() {
        clear_env();
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::SUCCESS);
        assert_eq!(run_commands(Commands::Models).await, ExitCode::SUCCESS);
        assert_eq!(run_commands(Commands::Tools).await, ExitCode::SUCCESS);

        env::set_var("MODE", "nope");
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::FAILURE);
        clear_env();
    }

    #[tokio::test]
    async fn run_commands_health_success_and_failure() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        assert_eq!(run_commands(Commands::Health { url: server.base_url() }).await, ExitCode::SUCCESS);
        assert_eq!(
            run_commands(Commands::Health { url: "http://localhost:9".into() }).await,
            ExitCode::FAILURE
        );
    }
}
