//! List the versions of a package directory in ascending order
//!
//! Usage: `cargo run --example sort_versions -- <package directory>`,
//! e.g. `/var/db/repos/gentoo/app-editors/vim`. Set `RUST_LOG=trace` to see
//! which entries are skipped.

use std::path::PathBuf;
use std::process::ExitCode;

use portage_version::VersionSet;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: sort_versions <package directory>");
        return ExitCode::FAILURE;
    };

    let Some(package) = dir.file_name().and_then(|name| name.to_str()) else {
        eprintln!("{}: not a package directory", dir.display());
        return ExitCode::FAILURE;
    };

    let names = match std::fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect::<Vec<_>>(),
        Err(e) => {
            eprintln!("{}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match VersionSet::from_filenames(package, &names) {
        Ok(set) => {
            for version in &set {
                println!("{}-{}", package, version);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
