//! hyperlet - offline translation diagnostics
//!
//! Runs the same volume resolution and name decoding the runtime uses,
//! without an engine connection. Useful on a node to see what a kubelet
//! mount or an engine container name translates to.
//!
//! ## Usage
//!
//! ```sh
//! hyperlet probe <host-path> <container-path> [--read-only]
//! hyperlet parse-name <name>
//! hyperlet version
//! ```

use hyperlet::naming::ContainerName;
use hyperlet::{Mount, resolve_volume};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// =============================================================================
// CLI Parsing
// =============================================================================

#[derive(Debug)]
enum Command {
    Probe {
        host_path: String,
        container_path: String,
        read_only: bool,
    },
    ParseName {
        name: String,
    },
    Version,
    Help,
}

struct Cli {
    command: Command,
    verbose: bool,
}

fn parse_args() -> Result<Cli, String> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let before = args.len();
    args.retain(|a| a != "--verbose" && a != "-v");
    let verbose = args.len() != before;

    let command = match args.first().map(String::as_str) {
        None => Command::Help,
        Some("probe") => {
            let positional: Vec<&String> = args[1..]
                .iter()
                .filter(|a| !a.starts_with("--"))
                .collect();
            let [host_path, container_path] = positional.as_slice() else {
                return Err("probe requires <host-path> <container-path>".to_string());
            };
            Command::Probe {
                host_path: host_path.to_string(),
                container_path: container_path.to_string(),
                read_only: args.iter().any(|a| a == "--read-only"),
            }
        }
        Some("parse-name") => {
            let Some(name) = args.get(1) else {
                return Err("parse-name requires <name>".to_string());
            };
            Command::ParseName { name: name.clone() }
        }
        Some("version" | "--version") => Command::Version,
        Some("help" | "--help" | "-h") => Command::Help,
        Some(unknown) => return Err(format!("unknown command: {}", unknown)),
    };

    Ok(Cli { command, verbose })
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_probe(host_path: String, container_path: String, read_only: bool) -> Result<(), String> {
    let mount = Mount {
        host_path,
        container_path,
        readonly: read_only,
    };
    let mut rng = StdRng::from_os_rng();
    let reference = resolve_volume(&mount, &mut rng).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&reference).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn cmd_parse_name(name: &str) -> Result<(), String> {
    let parsed = ContainerName::decode(name).map_err(|e| e.to_string())?;
    println!("container:  {}", parsed.container_name);
    println!("sandbox:    {}", parsed.sandbox_name);
    println!("namespace:  {}", parsed.namespace);
    println!("uid:        {}", parsed.sandbox_uid);
    println!("attempt:    {}", parsed.attempt);
    Ok(())
}

fn cmd_version() {
    println!("hyperlet {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_help() {
    println!(
        r#"hyperlet - CRI translation diagnostics for hypervisor-backed engines

USAGE:
    hyperlet [--verbose] <command> [args]

COMMANDS:
    probe <host-path> <container-path> [--read-only]
                        Resolve a mount into an engine volume reference
    parse-name <name>   Decode an engine container name
    version             Print version
    help                Print this message

EXAMPLES:
    hyperlet probe /var/lib/kubelet/pods/uid/volumes/hyper~cinder/vol1 /data
    hyperlet parse-name /k8s_nginx_web-0_default_6d1c-4f2a_0
"#
    );
}

// =============================================================================
// Main
// =============================================================================

fn init_tracing(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_ansi(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }
}

fn main() -> ExitCode {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {}", e);
            cmd_help();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Probe {
            host_path,
            container_path,
            read_only,
        } => cmd_probe(host_path, container_path, read_only),
        Command::ParseName { name } => cmd_parse_name(&name),
        Command::Version => {
            cmd_version();
            Ok(())
        }
        Command::Help => {
            cmd_help();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
