use anyhow::{Context, Result, anyhow, bail};
use tracing::{info_span, warn};

use prep_cli::render::Renderer;
use prep_cli::session::{
    connect, print_block, printing_alerts, read_file, save_chart, save_download, succeeded,
};
use prep_cli::settings::{Settings, save_settings_to, settings_path};
use prep_client::{Backend, HttpBackend};
use prep_model::download_name;
use prep_ui::Page;

use crate::cli::{ConfigCommand, DownloadArgs, ProcessArgs, UploadArgs};

/// Effective settings plus the table renderer built from them.
pub struct RunContext {
    pub settings: Settings,
    pub renderer: Renderer,
}

impl RunContext {
    fn backend(&self) -> Result<HttpBackend> {
        connect(&self.settings.server.url, self.settings.server.timeout())
    }

    fn page(&self) -> Result<Page<HttpBackend>> {
        Ok(Page::with_alerts(self.backend()?, printing_alerts()))
    }
}

/// Returns whether the run finished without error alerts.
pub fn run_upload(ctx: &RunContext, args: &UploadArgs) -> Result<bool> {
    let mut page = ctx.page()?;
    upload(ctx, &mut page, args)?;
    Ok(succeeded(&page))
}

fn upload<B: Backend>(ctx: &RunContext, page: &mut Page<B>, args: &UploadArgs) -> Result<bool> {
    let file = read_file(&args.file)?;
    let Some(outcome) = page.drop_files(vec![file]) else {
        return Ok(false);
    };
    if let Some(preview) = &outcome.preview {
        print_block(&ctx.renderer.preview(preview))?;
    }
    Ok(true)
}

pub fn run_process(ctx: &RunContext, args: &ProcessArgs) -> Result<bool> {
    let span = info_span!("process_command", step = args.step.number());
    let _guard = span.enter();

    let mut page = ctx.page()?;
    let uploaded = upload(
        ctx,
        &mut page,
        &UploadArgs {
            file: args.file.clone(),
        },
    )?;
    if !uploaded {
        return Ok(false);
    }

    page.select_step(args.step);
    let Some(outcome) = page.process().cloned() else {
        return Ok(false);
    };
    print_block(&ctx.renderer.results(&outcome.view))?;

    if let Some(path) = &args.save_chart {
        match outcome.result.chart() {
            Some(uri) => {
                save_chart(uri, path)?;
                print_block(&format!("Chart saved to {}", path.display()))?;
            }
            None => warn!(step = args.step.number(), "result carries no chart to save"),
        }
    }
    if args.download
        && let Some((name, bytes)) = page.download_last()
    {
        let path = save_download(&ctx.settings.output.download_dir, &name, &bytes)?;
        print_block(&format!("Downloaded {}", path.display()))?;
    }
    Ok(succeeded(&page))
}

pub fn run_download(ctx: &RunContext, args: &DownloadArgs) -> Result<()> {
    let backend = ctx.backend()?;
    let name = download_name(&args.output_file);
    if name.is_empty() {
        bail!("no file name in {:?}", args.output_file);
    }
    let bytes = backend
        .download(name)
        .map_err(|err| anyhow!(err.user_message()))
        .with_context(|| format!("download {name}"))?;
    let dir = args
        .output_dir
        .as_deref()
        .unwrap_or(&ctx.settings.output.download_dir);
    let path = save_download(dir, name, &bytes)?;
    print_block(&format!("Downloaded {}", path.display()))?;
    Ok(())
}

pub fn run_status(ctx: &RunContext) -> Result<()> {
    let status = ctx
        .backend()?
        .status()
        .map_err(|err| anyhow!(err.user_message()))
        .context("fetch status")?;
    print_block(&ctx.renderer.status(&status))?;
    Ok(())
}

pub fn run_steps(ctx: &RunContext) -> Result<()> {
    print_block(&ctx.renderer.steps())?;
    Ok(())
}

pub fn run_config(ctx: &RunContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            let path = settings_path().context("no config directory on this platform")?;
            print_block(&path.display().to_string())?;
        }
        ConfigCommand::Show => {
            let text = toml::to_string_pretty(&ctx.settings).context("serialize settings")?;
            print_block(text.trim_end())?;
        }
        ConfigCommand::Init { force } => {
            let path = settings_path().context("no config directory on this platform")?;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            save_settings_to(&Settings::default(), &path)?;
            print_block(&format!("Wrote {}", path.display()))?;
        }
    }
    Ok(())
}
