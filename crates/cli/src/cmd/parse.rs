use std::path::Path;

use crate::cmd::{fail, load_config, load_template};
use crate::logging;
use crate::{Format, ParseArgs};

pub fn run(config: Option<&Path>, args: ParseArgs) {
    let cfg = load_config("parse", config);
    if let Err(e) = logging::init(&cfg) {
        fail("parse", &e);
    }

    let tpl = load_template("parse", &args.input, &cfg);

    let out = match args.format {
        Format::Json => tpl.to_json().unwrap_or_else(|e| fail("parse", &e)),
        Format::Yaml => tpl.to_yaml().unwrap_or_else(|e| fail("parse", &e)),
    };
    println!("{out}");
}
