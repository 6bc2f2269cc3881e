use std::path::Path;

use redheart::{Options, Viewer};

fn main() {
    env_logger::init();

    // Usage: redheart [model.obj] [options.toml]
    let mut args = std::env::args().skip(1);
    let model_path = args.next();
    let options_path = args.next();

    let options = options_path.map(|path| {
        match Options::load(Path::new(&path)) {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("Failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        }
    });

    let mut builder = Viewer::builder();
    if let Some(path) = model_path {
        builder = builder.with_path(path);
    }
    if let Some(opts) = options {
        builder = builder.with_options(opts);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
