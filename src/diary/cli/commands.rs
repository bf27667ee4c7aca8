use super::render::Renderer;
use super::session::Session;
use super::setup::{Cli, Commands, StickyCommands};
use clap::Parser;
use diary::animation::FlipTimeline;
use diary::api::{CmdMessage, DiaryApi, DiaryOptions};
use diary::config::DiaryConfig;
use diary::error::{DiaryError, Result};
use diary::logging::init_logging;
use diary::model::Point;
use diary::store::fs::FileStore;
use directories::ProjectDirs;
use std::io;
use std::path::{Path, PathBuf};

struct AppContext {
    api: DiaryApi<FileStore>,
    renderer: Renderer,
    timeline: FlipTimeline,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = DiaryConfig::read(&data_dir)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    if let Err(e) = init_logging(level, &data_dir.join("logs")) {
        eprintln!("Warning: Failed to start logging: {}", e);
    }

    let renderer = Renderer::new(cli.no_color);

    // Config must stay usable when the stored diary or the config itself is not
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, config, &renderer, key.as_deref(), value.as_deref());
    }

    config.validate()?;
    let mut ctx = init_context(&data_dir, &config, renderer)?;

    match cli.command {
        None | Some(Commands::Open) => handle_open(&mut ctx),
        Some(Commands::Show { page }) => handle_show(&mut ctx, page),
        Some(Commands::Write { page, text }) => handle_write(&mut ctx, page, text),
        Some(Commands::Sticky(cmd)) => match cmd {
            StickyCommands::Add { x, y } => handle_sticky_add(&mut ctx, x, y),
            StickyCommands::Move { id, x, y } => handle_sticky_move(&mut ctx, &id, x, y),
            StickyCommands::Edit { id, text } => handle_sticky_edit(&mut ctx, &id, text),
            StickyCommands::Rm { id } => handle_sticky_rm(&mut ctx, &id),
            StickyCommands::List => handle_sticky_list(&ctx),
        },
        Some(Commands::Config { key, value }) => handle_config(
            &data_dir,
            config,
            &ctx.renderer,
            key.as_deref(),
            value.as_deref(),
        ),
        Some(Commands::Link) => handle_link(&ctx),
    }
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    ProjectDirs::from("com", "diary", "diary")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            DiaryError::Store("Could not determine a data directory; pass --data-dir".into())
        })
}

fn init_context(data_dir: &Path, config: &DiaryConfig, renderer: Renderer) -> Result<AppContext> {
    let store = FileStore::new(data_dir);
    let api = DiaryApi::open(store, DiaryOptions::from(config))?;

    Ok(AppContext {
        api,
        renderer,
        timeline: config.timeline(),
    })
}

fn handle_open(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(
        &mut ctx.api,
        &ctx.renderer,
        ctx.timeline,
        stdin.lock(),
        stdout.lock(),
    )
    .run()
}

fn handle_show(ctx: &mut AppContext, page: Option<usize>) -> Result<()> {
    if let Some(number) = page {
        if !ctx.api.turn_to_page(number) {
            print_messages(
                ctx,
                &[CmdMessage::warning(format!(
                    "Page {} does not exist (the diary has {} pages)",
                    number,
                    ctx.api.entries().len()
                ))],
            );
        }
    }
    print!("{}", ctx.renderer.book(&ctx.api.view()));
    Ok(())
}

fn handle_write(ctx: &mut AppContext, page: usize, text: Vec<String>) -> Result<()> {
    let result = ctx.api.write_page(page, text.join(" "))?;
    print_messages(ctx, &result.messages);
    Ok(())
}

fn handle_sticky_add(ctx: &mut AppContext, x: f64, y: f64) -> Result<()> {
    ctx.api.toggle_placing();
    let result = ctx.api.click(Point::new(x, y))?;
    if result.affected_notes.is_empty() {
        let bounds = ctx.api.bounds();
        print_messages(
            ctx,
            &[CmdMessage::warning(format!(
                "({}, {}) is outside the book ({}x{})",
                x, y, bounds.width, bounds.height
            ))],
        );
        return Ok(());
    }
    print_messages(ctx, &result.messages);
    print!("{}", ctx.renderer.notes(&result.affected_notes));
    Ok(())
}

fn handle_sticky_move(ctx: &mut AppContext, id: &str, x: f64, y: f64) -> Result<()> {
    let result = ctx.api.drag_note(id, Point::new(x, y))?;
    print_messages(ctx, &result.messages);
    if !result.affected_notes.is_empty() {
        print!("{}", ctx.renderer.notes(&result.affected_notes));
    }
    Ok(())
}

fn handle_sticky_edit(ctx: &mut AppContext, id: &str, text: Vec<String>) -> Result<()> {
    let result = ctx.api.edit_note(id, text.join(" "))?;
    print_messages(ctx, &result.messages);
    if !result.affected_notes.is_empty() {
        print!("{}", ctx.renderer.notes(&result.affected_notes));
    }
    Ok(())
}

fn handle_sticky_rm(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.remove_note(id)?;
    print_messages(ctx, &result.messages);
    Ok(())
}

fn handle_sticky_list(ctx: &AppContext) -> Result<()> {
    print!("{}", ctx.renderer.notes(ctx.api.notes()));
    Ok(())
}

fn handle_link(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.api.new_link());
    Ok(())
}

fn handle_config(
    data_dir: &Path,
    mut config: DiaryConfig,
    renderer: &Renderer,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    match (key, value) {
        (None, _) => print!("{}", renderer.config(&config, None)),
        (Some(key), None) => {
            if config.get(key).is_none() {
                return Err(DiaryError::Config(format!("Unknown config key: {}", key)));
            }
            print!("{}", renderer.config(&config, Some(key)));
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            print!(
                "{}",
                renderer.messages(&[CmdMessage::success(format!("{} = {}", key, value))])
            );
        }
    }
    Ok(())
}

fn print_messages(ctx: &AppContext, messages: &[CmdMessage]) {
    let output = ctx.renderer.messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}
