use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cmd::{fail, load_config, load_template};
use crate::logging;
use crate::prompt::{parse_presets, CliSource};
use crate::RenderArgs;

pub fn run(config: Option<&Path>, args: RenderArgs) {
    let cfg = load_config("render", config);
    if let Err(e) = logging::init(&cfg) {
        fail("render", &e);
    }
    debug!(batch = args.batch, vars = args.vars.len(), "render starting");

    let tpl = load_template("render", &args.input, &cfg);

    // All validation issues are reported together, before any
    // prompting happens.
    let issues = tpl.validate();
    if !issues.is_empty() {
        println!("FAIL tyf render");
        println!("template failed validation with {} issue(s):", issues.len());
        for issue in &issues {
            println!("  - {issue}");
        }
        std::process::exit(1);
    }

    let presets = match parse_presets(&args.vars) {
        Ok(p) => p,
        Err(e) => fail("render", &e),
    };

    let mut source = CliSource::new(presets, args.batch);
    let env = match tpl.resolve(&mut source) {
        Ok(env) => env,
        Err(e) => fail("render", &e),
    };
    debug!(resolved = env.len(), "environment resolved");

    let rendered = match tpl.render(&env) {
        Ok(out) => out,
        Err(e) => fail("render", &e),
    };

    match args.output {
        Some(ref path) => {
            if let Err(e) = fs::write(path, &rendered) {
                fail("render", &format!("failed to write {}: {e}", path.display()));
            }
            println!("OK   wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
}
