//! `lineforge`: render scene files to BMP images
//!
//! Each scene file is rendered on its own. A file that fails to parse or
//! render is reported and the batch moves on; the exit code is 1 if any file
//! failed and 100 if memory ran out.

use anyhow::Context;
use clap::Parser;
use lineforge_core::Error;
use lineforge_scene::{generate_image, Configuration};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code telling the caller to retry on a machine with more memory
const EXIT_OUT_OF_MEMORY: u8 = 100;

#[derive(Parser, Debug)]
#[command(name = "lineforge", version, about = "Render wireframe scene files to BMP images")]
struct Args {
    /// Scene files to render. When empty, names are read from `filelist`,
    /// one per line.
    files: Vec<PathBuf>,

    /// File listing scene files when none are given on the command line
    #[arg(long, default_value = "filelist")]
    filelist: PathBuf,
}

#[derive(Debug)]
enum Outcome {
    Written(PathBuf),
    Skipped,
}

fn scene_files(args: &Args) -> anyhow::Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        return Ok(args.files.clone());
    }
    let list = std::fs::read_to_string(&args.filelist)
        .with_context(|| format!("reading {}", args.filelist.display()))?;
    Ok(list
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn render_file(path: &Path) -> lineforge_core::Result<Outcome> {
    let config = Configuration::from_ini_file(path)?;
    match generate_image(&config, None)? {
        Some(canvas) => {
            let output = path.with_extension("bmp");
            canvas.save_bmp(&output)?;
            Ok(Outcome::Written(output))
        }
        None => Ok(Outcome::Skipped),
    }
}

/// What one file's result means for the rest of the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileStatus {
    Done,
    Failed,
    OutOfMemory,
}

/// Tell the user how a file went
fn report(path: &Path, result: lineforge_core::Result<Outcome>) -> FileStatus {
    match result {
        Ok(Outcome::Written(output)) => {
            info!(output = %output.display(), "wrote image");
            FileStatus::Done
        }
        Ok(Outcome::Skipped) => {
            println!("Could not generate image for {}", path.display());
            FileStatus::Done
        }
        Err(e) if e.is_resource_exhausted() => {
            eprintln!("Error: insufficient memory");
            error!(file = %path.display(), "{}", e);
            FileStatus::OutOfMemory
        }
        Err(Error::Config(message)) => {
            eprintln!("Error parsing file: {}: {}", path.display(), message);
            FileStatus::Failed
        }
        Err(e) => {
            eprintln!("Failed to render {}: {}", path.display(), e);
            FileStatus::Failed
        }
    }
}

/// Render every file in order and return the process exit code: 0 when all
/// files went through, 1 when any failed, 100 as soon as memory runs out.
fn run_batch<F>(files: &[PathBuf], mut render: F) -> u8
where
    F: FnMut(&Path) -> lineforge_core::Result<Outcome>,
{
    let start = Instant::now();
    let mut failed = false;
    for path in files {
        match report(path, render(path)) {
            FileStatus::Done => {}
            FileStatus::Failed => failed = true,
            FileStatus::OutOfMemory => return EXIT_OUT_OF_MEMORY,
        }
    }

    println!(
        "Time taken to generate images: {:.3} seconds.",
        start.elapsed().as_secs_f64()
    );
    u8::from(failed)
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let files = match scene_files(&args) {
        Ok(files) => files,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(run_batch(&files, render_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_SCENE: &str = "[General]\ntype = \"Wireframe\"\nsize = 64\neye = (0, 0, 10)\n\
        backgroundcolor = (0, 0, 0)\nnrFigures = 1\n\
        [Figure0]\ntype = \"Cube\"\nrotateX = 0\nrotateY = 0\nrotateZ = 0\nscale = 1\n\
        center = (0, 0, 0)\ncolor = (1, 1, 1)\n";

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_all_files_done_exits_zero() {
        let code = run_batch(&paths(&["a.ini", "b.ini"]), |_| Ok(Outcome::Skipped));
        assert_eq!(code, 0);
    }

    #[test]
    fn test_failed_file_exits_one_and_batch_continues() {
        let mut seen = Vec::new();
        let code = run_batch(&paths(&["bad.ini", "good.ini"]), |path| {
            seen.push(path.to_path_buf());
            if path == Path::new("bad.ini") {
                Err(Error::Config("Missing section [General]".into()))
            } else {
                Ok(Outcome::Written(path.with_extension("bmp")))
            }
        });
        assert_eq!(code, 1);
        assert_eq!(seen, paths(&["bad.ini", "good.ini"]));

        let code = run_batch(&paths(&["broken.ini"]), |_| Err(Error::InvalidData("empty scene".into())));
        assert_eq!(code, 1);
    }

    #[test]
    fn test_out_of_memory_stops_the_batch() {
        let mut rendered = 0;
        let code = run_batch(&paths(&["huge.ini", "next.ini"]), |_| {
            rendered += 1;
            Err(Error::ResourceExhausted("sphere with 30 subdivisions".into()))
        });
        assert_eq!(code, EXIT_OUT_OF_MEMORY);
        assert_eq!(rendered, 1);
    }

    #[test]
    fn test_render_file_writes_bmp_next_to_scene() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("cube.ini");
        std::fs::write(&scene, CUBE_SCENE).unwrap();

        match render_file(&scene).unwrap() {
            Outcome::Written(output) => {
                assert_eq!(output, dir.path().join("cube.bmp"));
                assert!(output.exists());
            }
            Outcome::Skipped => panic!("cube scene was skipped"),
        }
    }

    #[test]
    fn test_unsupported_image_type_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("intro.ini");
        std::fs::write(&scene, CUBE_SCENE.replace("Wireframe", "IntroColorRectangle")).unwrap();

        assert!(matches!(render_file(&scene).unwrap(), Outcome::Skipped));
        assert_eq!(report(&scene, render_file(&scene)), FileStatus::Done);
        assert!(!dir.path().join("intro.bmp").exists());
    }

    #[test]
    fn test_unparsable_file_is_a_config_failure() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("broken.ini");
        std::fs::write(&scene, "[General\nsize = 10\n").unwrap();

        assert_eq!(report(&scene, render_file(&scene)), FileStatus::Failed);
    }
}
