use migration::Migrator;
use std::{env, fs, path::{Path, PathBuf}};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let url = config::database_url();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&url);
        }
        Some("fresh") => {
            remove_db_file(&url);
            create_db_dir(&url);
            runner::run_all_migrations(&url).await;
        }
        _ => {
            create_db_dir(&url);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn db_file_path(url: &str) -> Option<PathBuf> {
    let without_scheme = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = without_scheme.split('?').next().unwrap_or(without_scheme);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

fn remove_db_file(url: &str) {
    let Some(db_path) = db_file_path(url) else {
        println!("In-memory database, nothing to delete");
        return;
    };
    if db_path.exists() {
        fs::remove_file(&db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }

    let upload_root = Path::new(&config::upload_dir()).to_path_buf();
    if upload_root.exists() {
        fs::remove_dir_all(&upload_root).expect("Failed to delete upload root");
        println!("Deleted upload root: {}", upload_root.display());
    } else {
        println!("Upload root does not exist: {}", upload_root.display());
    }
}

fn create_db_dir(url: &str) {
    if let Some(db_path) = db_file_path(url) {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create DB directory");
        }
    }
}
