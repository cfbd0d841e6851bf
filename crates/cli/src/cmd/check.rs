use std::path::Path;

use crate::cmd::{fail, load_config, load_template};
use crate::logging;
use crate::CheckArgs;

pub fn run(config: Option<&Path>, args: CheckArgs) {
    let cfg = load_config("check", config);
    if let Err(e) = logging::init(&cfg) {
        fail("check", &e);
    }

    let tpl = load_template("check", &args.input, &cfg);

    let issues = tpl.validate();
    if issues.is_empty() {
        println!("OK   tyf check");
        println!("{} variable declaration(s), no issues", tpl.variables.len());
        return;
    }

    println!("FAIL tyf check");
    println!("{} issue(s):", issues.len());
    for issue in &issues {
        println!("  - {issue}");
    }
    std::process::exit(1);
}
