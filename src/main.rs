// bunch of standard library stuff
use std::path::{Path, PathBuf};

#[macro_use]
extern crate error_chain;

use pcollider::errors::*;
use pcollider::export::write_json;
use pcollider::params::load_params;
use pcollider::{compute, Params, Tiling, View};

//////////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, Clone, Copy)]
enum OutputKind {
    Json,
    Pdf,
    Png
}

fn output_kind(path: &Path) -> Result<OutputKind> {

    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => Ok(OutputKind::Json),
        Some("pdf") => Ok(OutputKind::Pdf),
        Some("png") => Ok(OutputKind::Png),
        _ => bail!("don't know how to write {:}, expected .json, .pdf or .png",
                   path.display())
    }

}

#[cfg(feature = "render")]
fn write_rendered(kind: OutputKind,
                  path: &Path,
                  tiling: &Tiling,
                  params: &Params,
                  view: &View) -> Result<()> {

    let selection = pcollider::Selection::new();

    match kind {
        OutputKind::Pdf => pcollider::render::write_pdf(path, tiling, params, view, &selection),
        _ => pcollider::render::write_png(path, tiling, params, view, &selection)
    }

}

#[cfg(not(feature = "render"))]
fn write_rendered(_kind: OutputKind,
                  path: &Path,
                  _tiling: &Tiling,
                  _params: &Params,
                  _view: &View) -> Result<()> {

    bail!("writing {:} needs the render feature (cargo build --features render)",
          path.display())

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: {:?} PARAMFILE [OUTPUT]", args[0]);
        std::process::exit(1);
    }

    let filename = Path::new(&args[1]);

    let outfile = if args.len() == 3 {
        PathBuf::from(&args[2])
    } else {
        let basename = match filename.file_stem() {
            None => "output",
            Some(os_str) => os_str.to_str().unwrap_or("output")
        };
        PathBuf::from(basename.to_owned() + ".json")
    };

    let kind = output_kind(&outfile)?;

    let (params, view) = load_params(filename)?;

    let tiling = compute(&params, &view)?;

    println!("{:} tiles in {:} prototile classes",
             tiling.len(), tiling.palette.len());

    match kind {
        OutputKind::Json => write_json(&outfile, &tiling, &params, &view)?,
        _ => write_rendered(kind, &outfile, &tiling, &params, &view)?
    }

    println!("wrote {:}", outfile.display());

    Ok(())

}

quick_main!(run);
