//! `scrollstage [options.toml]`
//! `scrollstage --preset <dir> <name>`
//! `scrollstage --list-presets <dir>`
//! `scrollstage --save-defaults <path>`

use std::path::Path;
use std::process::ExitCode;

use scrollstage::{Options, Viewer, ViewerError};

fn options_from_args(args: &[String]) -> Result<Option<Options>, ViewerError> {
    match args {
        [] => Ok(Some(Options::default())),
        [flag, dir] if flag == "--list-presets" => {
            for name in Options::list_presets(Path::new(dir)) {
                println!("{name}");
            }
            Ok(None)
        }
        [flag, path] if flag == "--save-defaults" => {
            Options::default().save(Path::new(path))?;
            log::info!("wrote default options to {path}");
            Ok(None)
        }
        [flag, dir, name] if flag == "--preset" => {
            let dir = Path::new(dir);
            if !Options::list_presets(dir).contains(name) {
                return Err(ViewerError::OptionsParse(format!(
                    "no preset named {name:?} in {}",
                    dir.display()
                )));
            }
            Options::load(&dir.join(format!("{name}.toml"))).map(Some)
        }
        [path] => Options::load(Path::new(path)).map(Some),
        _ => Err(ViewerError::OptionsParse(
            "usage: scrollstage [options.toml | --preset <dir> <name> | \
             --list-presets <dir> | --save-defaults <path>]"
                .into(),
        )),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match options_from_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
