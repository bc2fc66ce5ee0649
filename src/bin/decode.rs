use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::exit;

use log::{error, info};

use huffpack::decode;

fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension("unhuff")
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <input_file> [output_file]", args[0]);
        eprintln!("  <input_file>:  path to the compressed file.");
        eprintln!("  [output_file]: optional path for the expanded output.");
        eprintln!("                 Defaults to <input_file> with an .unhuff extension.");
        exit(1);
    }

    let input_path = Path::new(&args[1]);
    let output_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| derive_output_path(input_path));

    info!(
        "expanding {} into {}",
        input_path.display(),
        output_path.display()
    );

    let input = match File::open(input_path) {
        Ok(file) => file,
        Err(e) => {
            error!("cannot open {}: {}", input_path.display(), e);
            exit(1);
        }
    };
    let output = match File::create(&output_path) {
        Ok(file) => file,
        Err(e) => {
            error!("cannot create {}: {}", output_path.display(), e);
            exit(1);
        }
    };

    let mut writer = BufWriter::new(output);
    if let Err(e) = decode(BufReader::new(input), &mut writer) {
        error!("decoding failed: {}", e);
        drop(writer);
        let _ = fs::remove_file(&output_path);
        exit(1);
    }

    let input_size = fs::metadata(input_path).map(|m| m.len()).unwrap_or(0);
    let output_size = fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input:  {} ({} bytes)\n\
         💾 output: {} ({} bytes)",
        input_path.display(),
        input_size,
        output_path.display(),
        output_size
    );
}
