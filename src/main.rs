use anyhow::Context;
use clap::Parser;
use fs_err as fs;
use std::io::Read;
use tracing::Instrument;

use dietly::cli::{Args, Command};
use dietly::config::Config;
use dietly::profile::UserProfile;
use dietly::{log, prompt, provider, render, ux, wizard};

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(ep) = &args.endpoint {
        cfg.endpoint = Some(ep.clone());
    }
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    Ok(cfg)
}

async fn plan(args: &Args, profile_path: &std::path::Path, print_prompt: bool, raw: bool) -> anyhow::Result<()> {
    let src = fs::read_to_string(profile_path)?;
    let profile = UserProfile::from_toml(&src)
        .with_context(|| format!("reading profile {}", profile_path.display()))?;
    let prompt = prompt::diet_chart_prompt(&profile);
    if print_prompt {
        println!("{prompt}");
        return Ok(());
    }

    let prov = provider::make_provider(&load_config(args)?)?;
    match prov.generate(&prompt).await {
        Ok(reply) => {
            if raw {
                println!("{reply}");
            }
            let chart = wizard::parse_chart(&reply);
            print!("{}", render::render_chart(chart.as_ref()));
        }
        Err(e) => {
            tracing::warn!(error = %e, "diet chart generation failed");
            println!("{}", wizard::GENERATION_FAILED);
        }
    }
    Ok(())
}

fn chart(input: Option<&std::path::Path>) -> anyhow::Result<()> {
    let reply = match input {
        Some(p) if p.as_os_str() == "-" => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Some(s)
        }
        Some(p) => Some(fs::read_to_string(p)?),
        None => None,
    };
    let chart = reply.as_deref().and_then(wizard::parse_chart);
    print!("{}", render::render_chart(chart.as_ref()));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    log::init(args.debug);

    let session = log::Session::start();
    let span = session.span();

    match args.command.clone().unwrap_or(Command::Wizard) {
        Command::Wizard => {
            let prov = provider::make_provider(&load_config(&args)?)?;
            let mut term = ux::Terminal::stdio();
            term.run(prov.as_ref()).instrument(span).await;
            Ok(())
        }
        Command::Plan { profile, print_prompt, raw } => {
            plan(&args, &profile, print_prompt, raw).instrument(span).await
        }
        Command::Chart { input } => span.in_scope(|| chart(input.as_deref())),
    }
}
