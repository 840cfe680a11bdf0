use super::print::{
    print_draft, print_messages, print_status, print_wines, print_zones,
};
use super::setup::{Cli, Commands};
use cellar::allocator::PositionAllocator;
use cellar::api::CellarApi;
use cellar::assist::{JsonLabelReader, JsonLayoutInterpreter};
use cellar::config::{self, CellarConfig};
use cellar::error::{CellarError, Result};
use cellar::layout;
use cellar::model::NewWine;
use cellar::store::fs::FileStore;
use clap::Parser;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: CellarApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Setup {
            description,
            file,
            default,
        }) => handle_setup(&mut ctx, description, file, default),
        Some(Commands::Add {
            name,
            description,
            position,
            unpositioned,
        }) => handle_add(&mut ctx, name, description, position, unpositioned),
        Some(Commands::Scan { file }) => handle_scan(&ctx, file),
        Some(Commands::Suggest { description }) => handle_suggest(&ctx, description),
        Some(Commands::List { all }) => handle_list(&ctx, all),
        Some(Commands::Positions) => handle_positions(&ctx),
        Some(Commands::Consume { wine }) => handle_consume(&mut ctx, wine),
        Some(Commands::Move { wine, position }) => handle_move(&mut ctx, wine, position),
        Some(Commands::Delete { wine }) => handle_delete(&mut ctx, wine),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config) => {
            println!("{}", CellarConfig::template());
            Ok(())
        }
        None => handle_list(&ctx, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = config::data_dir()?;
    let config = CellarConfig::load(&data_dir)?;
    init_tracing(&config.log_level, cli.verbose);

    let allocator = PositionAllocator::from_config(&config.allocation);
    let store = FileStore::new(data_dir);
    Ok(AppContext {
        api: CellarApi::new(store, allocator),
    })
}

/// Logs go to stderr so stdout stays clean for output.
fn init_tracing(level: &str, verbose: bool) {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| if verbose { "info".to_string() } else { level.to_string() });
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_setup(
    ctx: &mut AppContext,
    description: Option<String>,
    file: Option<std::path::PathBuf>,
    default: bool,
) -> Result<()> {
    let result = match (description, file) {
        _ if default => ctx.api.setup_default()?,
        (_, Some(path)) => {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                CellarError::ValidationFailed(format!("cannot read {}: {}", path.display(), e))
            })?;
            let parsed = layout::parse_layout(&raw)?;
            ctx.api.setup_from_layout(&parsed)?
        }
        (Some(text), None) => ctx.api.setup_from_description(&JsonLayoutInterpreter, &text)?,
        (None, None) => {
            return Err(CellarError::ValidationFailed(
                "describe your storage, or pass --file or --default".to_string(),
            ))
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    name: String,
    description: String,
    position: Option<String>,
    unpositioned: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CellarError::ValidationFailed(
            "wine name cannot be empty".to_string(),
        ));
    }
    let attrs = NewWine::new(name, description);
    let result = match (position, unpositioned) {
        (Some(pos), _) => ctx.api.add_wine_at(attrs, &pos)?,
        (None, true) => ctx.api.add_wine_unpositioned(attrs)?,
        (None, false) => ctx.api.add_wine(attrs)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_scan(ctx: &AppContext, file: std::path::PathBuf) -> Result<()> {
    let image = std::fs::read(&file).map_err(|e| {
        CellarError::ValidationFailed(format!("cannot read {}: {}", file.display(), e))
    })?;
    let result = ctx.api.scan_label(&JsonLabelReader, &image)?;
    if let Some(draft) = &result.draft {
        print_draft(draft);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_suggest(ctx: &AppContext, description: String) -> Result<()> {
    let result = ctx.api.suggest_position(&description.into())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, all: bool) -> Result<()> {
    let result = ctx.api.list_wines(all)?;
    print_wines(&result.listed_wines);
    print_messages(&result.messages);
    Ok(())
}

fn handle_positions(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_positions()?;
    print_zones(&result.zones);
    print_messages(&result.messages);
    Ok(())
}

fn handle_consume(ctx: &mut AppContext, wine: String) -> Result<()> {
    let result = ctx.api.consume_wine(&wine)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, wine: String, position: String) -> Result<()> {
    let result = ctx.api.move_wine(&wine, &position)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, wine: String) -> Result<()> {
    let result = ctx.api.delete_wine(&wine)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}
