//! Subcommand implementations

use crate::cli::{Cli, collect_images, label_from_path};
use crate::error::{CliError, CliResult};
use crate::interactive;
use casocr::io::{ImageFormat, read_image, write_image};
use casocr::recog::{Model, RecogOptions, Recognizer, Trainer};
use casocr::region::render_ink;
use casocr::Pix;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

fn load_image(path: &Path) -> CliResult<Pix> {
    read_image(path).map_err(|source| CliError::Image {
        path: path.display().to_string(),
        source,
    })
}

/// Existing model, or an empty one when `fresh` is set or no file exists.
fn load_or_new(path: &Path, fresh: bool) -> CliResult<Model> {
    if fresh || !path.exists() {
        info!(path = %path.display(), "starting from an empty model");
        return Ok(Model::new());
    }
    Ok(Model::read_from_file(path)?)
}

pub fn train(cli: &Cli, paths: &[PathBuf], fresh: bool) -> CliResult<ExitCode> {
    let options = cli.recog_options()?;
    let files = collect_images(paths)?;
    let mut model = load_or_new(&cli.model, fresh)?;

    let mut trainer = Trainer::new(&mut model, options);
    for path in &files {
        let label = label_from_path(path)?;
        match load_image(path) {
            Ok(pix) => {
                if let Err(e) = trainer.try_add_sample(&pix, &label) {
                    warn!(path = %path.display(), error = %e, "sample rejected");
                }
            }
            Err(e) => warn!(error = %e, "skipping unreadable image"),
        }
    }
    println!(
        "trained {}/{} samples (failure rate {:.1}%)",
        trainer.succeeded(),
        trainer.attempted(),
        100.0 * trainer.failure_rate()
    );

    model.write_to_file(&cli.model)?;
    Ok(ExitCode::SUCCESS)
}

pub fn train_interactive(cli: &Cli, dir: &Path, fresh: bool) -> CliResult<ExitCode> {
    if !dir.is_dir() {
        return Err(CliError::Usage(format!("'{}' is not a directory", dir.display())));
    }
    let options = cli.recog_options()?;
    let files = collect_images(&[dir.to_path_buf()])?;
    let mut model = load_or_new(&cli.model, fresh)?;

    let images = files.iter().filter_map(|path| match load_image(path) {
        Ok(pix) => Some((path.display().to_string(), pix)),
        Err(e) => {
            warn!(error = %e, "skipping unreadable image");
            None
        }
    });

    let mut trainer = Trainer::new(&mut model, options);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    interactive::run(&mut trainer, images, &mut stdin.lock(), &mut stdout.lock())?;
    println!(
        "trained {}/{} samples",
        trainer.succeeded(),
        trainer.attempted()
    );

    model.write_to_file(&cli.model)?;
    Ok(ExitCode::SUCCESS)
}

/// Decode every image, printing `path<TAB>text` (`?` on failure).
///
/// Returns the number of failures.
fn recognize_all(recognizer: &Recognizer, files: &[PathBuf], out: &mut impl Write) -> CliResult<usize> {
    let mut failures = 0;
    for path in files {
        let text = match load_image(path) {
            Ok(pix) => recognizer.recognize(&pix),
            Err(e) => {
                warn!(error = %e, "unreadable image");
                String::new()
            }
        };
        if text.is_empty() {
            failures += 1;
            writeln!(out, "{}\t?", path.display())?;
        } else {
            writeln!(out, "{}\t{}", path.display(), text)?;
        }
    }
    Ok(failures)
}

pub fn recognize(cli: &Cli, paths: &[PathBuf]) -> CliResult<ExitCode> {
    let recognizer = Recognizer::from_model_file(&cli.model, cli.recog_options()?)?;
    let files = collect_images(paths)?;
    let failures = recognize_all(&recognizer, &files, &mut std::io::stdout().lock())?;
    if failures > 0 {
        info!(failures, total = files.len(), "some captchas were not recognized");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn debug_ink(cli: &Cli, input: &Path, output: &Path) -> CliResult<ExitCode> {
    let options: RecogOptions = cli.recog_options()?;
    let pix = load_image(input)?;
    let rendered = render_ink(&pix, &options.segment.band);
    write_image(&rendered, output, ImageFormat::Png).map_err(|source| CliError::Image {
        path: output.display().to_string(),
        source,
    })?;
    info!(path = %output.display(), "wrote ink rendering");
    Ok(ExitCode::SUCCESS)
}

/// Tab-separated table of sample counts and centroids.
fn write_inspection(model: &Model, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "label\tsamples\twidth\theight\tpixels\tq0\tq1\tq2\tq3")?;
    for (label, acc) in model {
        let Some(mean) = acc.mean() else {
            continue;
        };
        write!(out, "{}\t{}", label, acc.samples)?;
        for v in mean.to_array() {
            write!(out, "\t{:.2}", v)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn inspect(cli: &Cli) -> CliResult<ExitCode> {
    let model = Model::read_from_file(&cli.model)?;
    write_inspection(&model, &mut std::io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}
