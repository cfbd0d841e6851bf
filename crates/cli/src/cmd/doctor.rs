use std::path::Path;

use typefill_core::config::loader::default_config_path;

use crate::cmd::load_config;

pub fn run(config: Option<&Path>) {
    let cfg = load_config("doctor", config);

    println!("OK   tyf doctor");
    println!("version: {}", typefill_core::version());
    match cfg.path {
        Some(ref path) => println!("config: {}", path.display()),
        None => println!("config: (defaults; no file at {})", default_config_path().display()),
    }
    println!("logging.level: {}", cfg.logging.level);
    if let Some(ref level) = cfg.logging.file_level {
        println!("logging.file_level: {level}");
    }
    match cfg.logging.file {
        Some(ref file) => println!("logging.file: {}", file.display()),
        None => println!("logging.file: (none)"),
    }

    if cfg.aliases.is_empty() {
        println!("aliases: (none)");
    } else {
        let mut names: Vec<&String> = cfg.aliases.keys().collect();
        names.sort();
        println!("aliases:");
        for name in names {
            println!("  {name} -> {}", cfg.aliases[name]);
        }
    }
}
