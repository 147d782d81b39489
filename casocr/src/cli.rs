//! Command-line definition and shared helpers

use crate::error::{CliError, CliResult};
use casocr::recog::{DEFAULT_NOISE_FLOOR, RecogOptions};
use casocr::region::{DEFAULT_QUEUE_CAPACITY, SegmentOptions};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// File extensions treated as captcha images when scanning directories
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Parser, Debug)]
#[command(name = "casocr")]
#[command(version)]
#[command(about = "Train and run a four-character captcha solver")]
pub struct Cli {
    /// Model file
    #[arg(short, long, env = "CASOCR_MODEL", default_value = "captcha.model")]
    pub model: PathBuf,

    /// Blobs with at most this many pixels are ignored as noise
    #[arg(long, env = "CASOCR_NOISE_FLOOR", default_value_t = DEFAULT_NOISE_FLOOR)]
    pub noise_floor: usize,

    /// Traversal queue bound used during segmentation
    #[arg(long, env = "CASOCR_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train on labeled images; each file's stem is its label (e.g. `k7Qx.png`)
    Train {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Start from an empty model even if the model file exists
        #[arg(long)]
        fresh: bool,
    },
    /// Label the images of a directory one by one from stdin
    TrainInteractive {
        /// Directory of unlabeled captcha images
        dir: PathBuf,
        /// Start from an empty model even if the model file exists
        #[arg(long)]
        fresh: bool,
    },
    /// Decode captcha images
    Recognize {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Write a copy of an image with ink pixels painted red
    DebugInk {
        input: PathBuf,
        /// Output PNG path
        output: PathBuf,
    },
    /// Print per-label sample counts and centroids
    Inspect,
}

impl Cli {
    /// Recognition options from the global flags.
    pub fn recog_options(&self) -> CliResult<RecogOptions> {
        let options = RecogOptions::default()
            .with_noise_floor(self.noise_floor)
            .with_segment(SegmentOptions::default().with_queue_capacity(self.queue_capacity));
        options.validate()?;
        Ok(options)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Expand directories into their image files, sorted by name.
///
/// Plain files are kept as given, whatever their extension.
pub fn collect_images(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            entries.sort();
            out.extend(entries);
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

/// Training label encoded in a file name: its stem.
pub fn label_from_path(path: &Path) -> CliResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::Usage(format!("no label in file name '{}'", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["casocr", "inspect"]).unwrap();
        assert_eq!(cli.noise_floor, 15);
        assert_eq!(cli.queue_capacity, 100);
        assert!(matches!(cli.command, Command::Inspect));
        assert_eq!(cli.recog_options().unwrap(), RecogOptions::default());
    }

    #[test]
    fn test_parse_train() {
        let cli = Cli::try_parse_from([
            "casocr",
            "--model",
            "m.bin",
            "--noise-floor",
            "20",
            "train",
            "--fresh",
            "a.png",
            "b.png",
        ])
        .unwrap();
        assert_eq!(cli.model, PathBuf::from("m.bin"));
        assert_eq!(cli.recog_options().unwrap().noise_floor, 20);
        match cli.command {
            Command::Train { paths, fresh } => {
                assert!(fresh);
                assert_eq!(paths.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let cli = Cli::try_parse_from(["casocr", "--queue-capacity", "0", "inspect"]).unwrap();
        assert!(cli.recog_options().is_err());
    }

    #[test]
    fn test_label_from_path() {
        assert_eq!(label_from_path(Path::new("/tmp/k7Qx.png")).unwrap(), "k7Qx");
        assert_eq!(label_from_path(Path::new("ab.cd.jpg")).unwrap(), "ab.cd");
        assert!(label_from_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_collect_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "notes.txt", "c.jpeg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();
        let found = collect_images(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.jpeg"]);

        let explicit = collect_images(&[PathBuf::from("x.bmp")]).unwrap();
        assert_eq!(explicit, vec![PathBuf::from("x.bmp")]);
    }
}
