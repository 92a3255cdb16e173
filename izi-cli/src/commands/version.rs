use colored::Colorize;
use regex::Regex;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Version of this CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LOGO: &str = r" __     ______     __
/\ \   /\___  \   /\ \
\ \ \  \/_/  /__  \ \ \
 \ \_\   /\_____\  \ \_\
  \/_/   \/_____/   \/_/ v{{version}}";

const DETAILS: &str = "├── IZIGo     : {{izigo_version}}
├── GoVersion : {{go_version}}
├── OS        : {{os}}
├── Arch      : {{arch}}
├── NumCPU    : {{num_cpu}}
├── GOPATH    : {{gopath}}
└── Date      : {{date}}";

const FRAMEWORK_SOURCE: &str = "src/github.com/izi-global/izigo/izigo.go";

const NOT_INSTALLED: &str = "IZIGo is not installed. Please do consider installing it first: https://github.com/izi-global/izigo";

/// Output format for `izi version -o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Tool, framework and platform information shown by `izi version`.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub izi_version: String,
    pub izigo_version: String,
    pub go_version: String,
    pub os: String,
    pub arch: String,
    pub num_cpu: usize,
    pub gopath: String,
    pub date: String,
}

impl RuntimeInfo {
    pub fn collect() -> Self {
        let gopath = std::env::var_os("GOPATH");
        let izigo_version = match gopath.as_deref() {
            Some(gopath) => framework_version(gopath).unwrap_or_else(|| NOT_INSTALLED.to_string()),
            None => {
                tracing::error!("You need to set GOPATH environment variable");
                NOT_INSTALLED.to_string()
            }
        };

        Self {
            izi_version: VERSION.to_string(),
            izigo_version,
            go_version: go_version().unwrap_or_else(|| "unknown".to_string()),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            num_cpu: std::thread::available_parallelism().map_or(1, |n| n.get()),
            gopath: gopath
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            date: chrono::Local::now().format("%A, %-d %b %Y").to_string(),
        }
    }
}

/// Print the IZI version, optionally as JSON or YAML.
pub fn run(output: Option<OutputFormat>) -> Result<(), Box<dyn std::error::Error>> {
    let info = RuntimeInfo::collect();

    match output {
        Some(OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(&info)?),
        Some(OutputFormat::Yaml) => print!("{}", serde_yaml::to_string(&info)?),
        None => {
            println!("{}", logo().magenta().bold());
            println!("{}", details(&info).green().bold());
        }
    }

    Ok(())
}

/// Print the logo with the CLI version. Shown before commands run.
pub fn show_short_banner() {
    println!("{}", logo().magenta().bold());
}

/// The logo followed by `v<version>`.
pub fn logo() -> String {
    render(LOGO, &[("version", VERSION)])
}

/// The runtime information tree printed under the logo.
pub fn details(info: &RuntimeInfo) -> String {
    let num_cpu = info.num_cpu.to_string();
    render(
        DETAILS,
        &[
            ("izigo_version", info.izigo_version.as_str()),
            ("go_version", info.go_version.as_str()),
            ("os", info.os.as_str()),
            ("arch", info.arch.as_str()),
            ("num_cpu", num_cpu.as_str()),
            ("gopath", info.gopath.as_str()),
            ("date", info.date.as_str()),
        ],
    )
}

/// Replace each `{{key}}` in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |output, (key, value)| {
        output.replace(&format!("{{{{{key}}}}}"), value)
    })
}

/// Version of the installed IZIGo framework, read from the `VERSION`
/// constant in the first GOPATH entry that has the framework sources.
pub fn framework_version(gopath: &OsStr) -> Option<String> {
    let re = Regex::new(r#"VERSION = "([0-9.]+)""#).ok()?;

    std::env::split_paths(gopath)
        .map(|root| root.join(FRAMEWORK_SOURCE))
        .filter(|file| file.exists())
        .find_map(|file| read_version(&re, &file))
}

fn read_version(re: &Regex, file: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => {
            tracing::error!("Error while reading '{}': {err}", file.display());
            return None;
        }
    };
    content
        .lines()
        .find_map(|line| re.captures(line))
        .map(|caps| caps[1].to_string())
}

/// `go1.22.1` from `go version go1.22.1 linux/amd64`.
fn go_version() -> Option<String> {
    let output = Command::new("go").arg("version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_go_version(&String::from_utf8_lossy(&output.stdout))
}

pub fn parse_go_version(output: &str) -> Option<String> {
    output.split_whitespace().nth(2).map(str::to_string)
}
