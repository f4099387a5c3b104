//! fastsetup's main application entry point.
//! Parses arguments, sets up logging and dispatches to the subcommands.

use fastsetup::{
    cli::{get_args, Args, Commands},
    commands::{
        copy_templates, create_folders, generate_from_list, import_packages, replace_manifest,
        Context,
    },
    config::load_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    prompt::DialoguerPrompter,
    renderer::PlaceholderRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();
    let config = load_config(&args.project_dir)?;
    let ctx = Context::new(&args.project_dir, config, &prompt);

    match args.command {
        Commands::Folders(folders) => {
            let report = create_folders(&ctx, &folders.outline, folders.dry_run)?;
            let failed = if report.failed > 0 {
                format!(", {} failed", report.failed)
            } else {
                String::new()
            };
            println!(
                "{} folder(s) created, {} already present{}.",
                report.created, report.existing, failed
            );
        }
        Commands::Packages(packages) => {
            let outcome = import_packages(&ctx, &packages.spec, packages.dry_run)?;
            println!(
                "Imported {} dependencies and {} registries, {} line(s) skipped.",
                outcome.dependencies_written,
                outcome.registries_written,
                outcome.diagnostics.len()
            );
        }
        Commands::OverwriteManifest(overwrite) => {
            if replace_manifest(&ctx, &overwrite.document, overwrite.yes)? {
                println!("Manifest replaced: {}", ctx.manifest_path().display());
            }
        }
        Commands::Scripts(scripts) => {
            let renderer = PlaceholderRenderer::new();
            let report = generate_from_list(
                &ctx,
                &renderer,
                &scripts.list,
                scripts.template.as_deref(),
                scripts.editor_templates.as_deref(),
            )?;
            if let Some(report) = report {
                println!("{}", report.summary());
            }
        }
        Commands::CopyTemplates(copy) => {
            let report = copy_templates(&ctx, &copy.source)?;
            println!(
                "Copied {} file(s) to {}. Restart the editor to reload the templates.",
                report.files,
                ctx.project_path(&ctx.config.script_templates_dir).display()
            );
        }
    }

    Ok(())
}
