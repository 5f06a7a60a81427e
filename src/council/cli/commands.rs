use super::prompt::prompter_for;
use super::render::{
    print_dashboard, print_json, print_messages, print_record, print_screen,
    print_settings_section,
};
use super::setup::{Cli, Commands, OutputFormat};
use super::shell;
use clap::Parser;
use council::api::{parse_field_inputs, AdminApi};
use council::auth::AuthContext;
use council::catalog;
use council::config::{resolve_config_dir, CouncilConfig};
use council::editor::filter::Selection;
use council::editor::CmdResult;
use council::error::Result;
use council::settings::TABS;
use council::store::memory::MemBackend;
use tracing::debug;

struct AppContext {
    api: AdminApi<MemBackend>,
    output: OutputFormat,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::List { collection, filter } => handle_list(&ctx, &collection, &filter),
        Commands::Show { collection, id } => handle_show(&ctx, &collection, &id),
        Commands::Add { collection, fields } => handle_add(&mut ctx, &collection, &fields),
        Commands::Edit {
            collection,
            id,
            fields,
        } => handle_edit(&mut ctx, &collection, &id, &fields),
        Commands::Delete {
            collection,
            id,
            yes,
        } => handle_delete(&mut ctx, &collection, &id, yes),
        Commands::Status {
            collection,
            id,
            target,
        } => handle_status(&mut ctx, &collection, &id, target.as_deref()),
        Commands::Settings {
            section,
            field,
            value,
        } => handle_settings(&mut ctx, section, field, value),
        Commands::Dashboard { recent } => handle_dashboard(&ctx, recent),
        Commands::Shell => shell::run(&mut ctx.api),
    }
}

fn init_tracing(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match resolve_config_dir(cli.config.as_deref()) {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading config");
            CouncilConfig::load(&dir)?
        }
        None => CouncilConfig::default(),
    };

    let auth = AuthContext::from_operator(cli.operator.as_deref());
    Ok(AppContext {
        api: AdminApi::new(MemBackend::seeded(), auth, config),
        output: cli.output,
    })
}

fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    match ctx.output {
        OutputFormat::Json => print_json(result),
        OutputFormat::Text => {
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn handle_list(ctx: &AppContext, collection: &str, filter: &str) -> Result<()> {
    let schema = catalog::lookup(collection)?;
    let selection = Selection::for_schema(schema, filter)?;
    let view = ctx.api.list(schema.name, selection)?;
    match ctx.output {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print_screen(&view, schema);
            Ok(())
        }
    }
}

fn handle_show(ctx: &AppContext, collection: &str, id: &str) -> Result<()> {
    let schema = catalog::lookup(collection)?;
    let row = ctx.api.show(schema.name, id)?;
    match ctx.output {
        OutputFormat::Json => print_json(&row),
        OutputFormat::Text => {
            print_record(&row, schema);
            Ok(())
        }
    }
}

fn handle_add(ctx: &mut AppContext, collection: &str, fields: &[String]) -> Result<()> {
    let inputs = parse_field_inputs(fields)?;
    let result = ctx.api.add(collection, &inputs)?;
    print_result(ctx, &result)
}

fn handle_edit(ctx: &mut AppContext, collection: &str, id: &str, fields: &[String]) -> Result<()> {
    let inputs = parse_field_inputs(fields)?;
    let result = ctx.api.edit(collection, id, &inputs)?;
    print_result(ctx, &result)
}

fn handle_delete(ctx: &mut AppContext, collection: &str, id: &str, yes: bool) -> Result<()> {
    let mut prompter = prompter_for(yes);
    let result = ctx.api.delete(collection, id, prompter.as_mut())?;
    print_result(ctx, &result)
}

fn handle_status(
    ctx: &mut AppContext,
    collection: &str,
    id: &str,
    target: Option<&str>,
) -> Result<()> {
    let result = ctx.api.change_status(collection, id, target)?;
    print_result(ctx, &result)
}

fn handle_settings(
    ctx: &mut AppContext,
    section: Option<String>,
    field: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (section, field, value) {
        (Some(section), Some(field), Some(value)) => {
            let result = ctx.api.update_setting(&section, &field, &value)?;
            print_result(ctx, &result)
        }
        (Some(section), Some(field), None) => {
            let value = ctx.api.settings()?.get(&section, &field)?;
            match ctx.output {
                OutputFormat::Json => print_json(&value),
                OutputFormat::Text => {
                    println!("{}", value);
                    Ok(())
                }
            }
        }
        (section, _, _) => {
            let settings = ctx.api.settings()?;
            if ctx.output == OutputFormat::Json {
                return print_json(settings.saved());
            }
            let tabs: Vec<(&str, &str)> = match section.as_deref() {
                Some(name) => vec![TABS
                    .iter()
                    .find(|(id, _)| *id == name)
                    .copied()
                    .unwrap_or((name, name))],
                None => TABS.to_vec(),
            };
            for (i, (id, label)) in tabs.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_settings_section(label, &settings.section(id)?);
            }
            Ok(())
        }
    }
}

fn handle_dashboard(ctx: &AppContext, recent: usize) -> Result<()> {
    let dash = ctx.api.dashboard(recent)?;
    match ctx.output {
        OutputFormat::Json => print_json(&dash),
        OutputFormat::Text => {
            print_dashboard(&dash);
            Ok(())
        }
    }
}
