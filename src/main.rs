// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Vartija CLI - Passive Web Reconnaissance Checker

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use vartija::{render_text, MethodProbeStrategy, ScanConfig, ScanReport, ScanRequest, ScanResult, Scanner};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, reports to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vartija=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let outcome = match args[1].as_str() {
        "scan" => {
            if args.len() < 3 {
                eprintln!("Usage: vartija scan <url> [OPTIONS]");
                return ExitCode::from(1);
            }
            scan(&args[2], &args[3..]).await
        }
        "rpc" => rpc(&args[2..]).await,
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("vartija {}", vartija::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Vartija - Passive Web Reconnaissance Checker

USAGE:
    vartija <COMMAND> [OPTIONS]

COMMANDS:
    scan <url>      Probe a URL and report misconfigurations
    rpc             Read {{"action":"detect","url":...}} lines on stdin,
                    write one JSON result per line on stdout
    help            Show this help message
    version         Show version information

SCAN OPTIONS:
    --json                      Print a JSON report instead of text
    --method-probe <technique>  options (default), trace or both
    --cookie <set-cookie>       Ambient cookie, may be repeated
    --poc-base <url>            Clickjacking PoC page
    --timeout <secs>            Request timeout
    --proxy <url>               Send requests through a proxy
    --insecure                  Accept invalid TLS certificates
    --config <file.json>        Load settings from a JSON file

EXAMPLES:
    vartija scan https://example.com
    vartija scan https://example.com/app --method-probe both --json
    echo '{{"action":"detect","url":"https://example.com"}}' | vartija rpc

Set RUST_LOG=vartija=debug to see every request.
"#
    );
}

/// Options shared by `scan` and `rpc`
struct CliOptions {
    config: ScanConfig,
    json: bool,
}

fn parse_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut config = ScanConfig::default();
    let mut json = false;

    // --config is applied first so other flags override the file
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        let path = args
            .get(pos + 1)
            .ok_or_else(|| anyhow!("--config needs a file path"))?;
        config = ScanConfig::from_file(path).with_context(|| format!("loading {}", path))?;
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} needs a value", flag))
        };

        match arg.as_str() {
            "--json" => json = true,
            "--insecure" => config.accept_invalid_certs = true,
            "--config" => {
                value("--config")?;
            }
            "--method-probe" => {
                config.method_strategy = value("--method-probe")?
                    .parse::<MethodProbeStrategy>()
                    .map_err(|e| anyhow!(e))?;
            }
            "--cookie" => config.cookies.push(value("--cookie")?),
            "--poc-base" => config.poc_base = value("--poc-base")?,
            "--proxy" => config.proxy = Some(value("--proxy")?),
            "--timeout" => {
                let secs: u64 = value("--timeout")?
                    .parse()
                    .context("--timeout must be a number of seconds")?;
                config = config.timeout(Duration::from_secs(secs));
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    config.validate()?;
    Ok(CliOptions { config, json })
}

async fn scan(url: &str, args: &[String]) -> anyhow::Result<ExitCode> {
    let options = parse_options(args)?;
    let scanner = Scanner::new(options.config).context("creating scanner")?;

    let started_at = Utc::now();
    let start = Instant::now();
    let result = scanner.scan(url).await;
    let report = ScanReport::new(url, started_at, start.elapsed().as_millis() as u64, result);

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        println!("Target: {}", report.target);
        println!("Time: {}ms\n", report.duration_ms);
        print!("{}", render_text(&report.result));
    }

    Ok(if report.result.is_failed() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

async fn rpc(args: &[String]) -> anyhow::Result<ExitCode> {
    let options = parse_options(args)?;
    let scanner = Scanner::new(options.config).context("creating scanner")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let result = match ScanRequest::from_json(&line) {
            Ok(request) => scanner.handle(request).await,
            Err(e) => ScanResult::failed(format!("Invalid request: {}", e)),
        };

        let mut out = serde_json::to_string(&result)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(ExitCode::SUCCESS)
}
