use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use keyword_badges::color::{ColorPolicy, HashPolicy, OverridePolicy};
use keyword_badges::config::PluginConfig;
use keyword_badges::filter::Variant;
use keyword_badges::render::{render, to_html, FieldValue};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "keyword-badges")]
#[command(author, version, about = "Render ticket keywords as colored, clickable query badges")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a raw keywords field as badge HTML
    Render {
        /// Raw keywords field, e.g. "bug, ui-fix urgent"
        keywords: String,

        /// Use the label variant (configured colors)
        #[arg(long)]
        labels: bool,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Page context for the CSS class: ticket, query, or report
        #[arg(long, default_value = "ticket")]
        context: String,
    },

    /// Show the effective color for one keyword
    Color {
        keyword: String,

        /// Use the label variant (configured colors)
        #[arg(long)]
        labels: bool,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Start the preview server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3100")]
        port: u16,

        /// Use the label variant (configured colors)
        #[arg(long)]
        labels: bool,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();

    match args.command {
        Command::Render {
            keywords,
            labels,
            config,
            context,
        } => {
            let config = load_config(config.as_deref());
            let policy = policy_for(labels, &config);
            let variant = variant_for(labels);
            let class = format!("{} {}", variant.class_stem(), context);
            let rendered = render(
                &FieldValue::text(keywords),
                &config.link_template(),
                &class,
                policy.as_ref(),
            );
            match rendered.badges() {
                Some(tokens) => println!("{}", to_html(tokens)),
                None => eprintln!("{}", "no badges rendered".dimmed()),
            }
        }

        Command::Color {
            keyword,
            labels,
            config,
        } => {
            let config = load_config(config.as_deref());
            let policy = policy_for(labels, &config);
            let color = policy.color_of(&keyword);
            println!("{}{} {}", swatch(&color.background), color.background, keyword);
        }

        Command::Serve {
            port,
            labels,
            config,
        } => {
            let config = load_config(config.as_deref());
            if let Err(e) = keyword_badges::serve::start(port, variant_for(labels), config) {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }

        Command::Completion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(shell, &mut cmd, "keyword-badges", &mut std::io::stdout());
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> PluginConfig {
    match path {
        Some(path) => PluginConfig::load(path),
        None => PluginConfig::default(),
    }
}

fn variant_for(labels: bool) -> Variant {
    if labels {
        Variant::Labels
    } else {
        Variant::Badges
    }
}

fn policy_for(labels: bool, config: &PluginConfig) -> Box<dyn ColorPolicy> {
    if labels {
        Box::new(OverridePolicy::new(config.colors.clone()))
    } else {
        Box::new(HashPolicy)
    }
}

/// Terminal swatch for hex backgrounds; named colors print without one
fn swatch(background: &str) -> String {
    match parse_hex(background) {
        Some((r, g, b)) => format!("{} ", "  ".on_truecolor(r, g, b)),
        None => String::new(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
