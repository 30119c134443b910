use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rule_view::{RuleEventBus, RuleViewController};
use shared::domain::RuleId;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;
mod store;

use controller::{
    events::CardCommand,
    orchestration::{dispatch_card_command, Flow},
};
use store::RuleStore;

#[derive(Parser, Debug)]
#[command(about = "Inspect and drive a single value-mapping rule card")]
struct Args {
    /// Rule document: a JSON array of rules or `{ "rules": [...] }`.
    #[arg(long)]
    document: PathBuf,
    /// Rule to show; defaults to the first rule of the document.
    #[arg(long)]
    rule: Option<String>,
    /// Start in edit mode.
    #[arg(long)]
    edit: bool,
    /// Print cards as JSON instead of text.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Commands to run instead of reading them from stdin.
    #[arg(long = "command", short = 'c')]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let bus = RuleEventBus::new();
    let store = RuleStore::load(&args.document, bus.clone())?;
    let _unchanged = store.watch_unchanged();

    let rule_id = match args.rule {
        Some(id) => RuleId::new(id),
        None => match store.rule_ids().into_iter().next() {
            Some(id) => id,
            None => bail!("rule document '{}' is empty", args.document.display()),
        },
    };
    let rule = store
        .rule(&rule_id)
        .with_context(|| format!("rule '{rule_id}' not found in document"))?;

    let links = settings.editor_links()?;
    let mut view = RuleViewController::new(rule, args.edit, bus.clone(), store.clone(), links.as_ref());
    view.activate();
    store.set_editing(view.id(), args.edit);

    let mut stdout = io::stdout().lock();
    let out: &mut dyn Write = &mut stdout;
    print_card(&mut *out, &view, args.json)?;

    let mut status = String::new();
    let mut run = |line: &str, out: &mut dyn Write| -> Result<Flow> {
        let flow = match line.parse::<CardCommand>() {
            Ok(cmd) => {
                let flow = dispatch_card_command(&view, &bus, cmd, &mut status);
                if flow != Flow::Exit {
                    store.set_editing(view.id(), view.is_editing());
                }
                if cmd == CardCommand::Copy {
                    if let Some(entry) = store.clipboard() {
                        status = format!("{status} (clipboard: {} {})", entry.rule_type, entry.id);
                    }
                }
                flow
            }
            Err(err) => {
                status = err.to_string();
                Flow::Continue
            }
        };
        if !status.is_empty() {
            writeln!(out, "{status}")?;
        }
        if flow == Flow::Render {
            print_card(out, &view, args.json)?;
        }
        Ok(flow)
    };

    if args.commands.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read command")?;
            if run(&line, &mut *out)? == Flow::Exit {
                break;
            }
        }
    } else {
        for line in &args.commands {
            if run(line, &mut *out)? == Flow::Exit {
                break;
            }
        }
    }

    view.deactivate();
    Ok(())
}

fn print_card(out: &mut dyn Write, view: &RuleViewController, json: bool) -> Result<()> {
    let card = view.render();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&card)?)?;
    } else {
        write!(out, "{}", render::render_card(&card))?;
    }
    Ok(())
}
