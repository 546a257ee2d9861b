use std::env;
use std::fs::File;
use std::io::{self, Cursor};

use split_pipe::{MultiReader, SplitWriter};

/// Concatenate the files named on the command line (or a built-in sample
/// when none are given) and copy the result to stdout and to an in-memory
/// buffer at the same time.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut sources: Vec<Box<dyn io::Read>> = Vec::new();
    for path in env::args().skip(1) {
        sources.push(Box::new(File::open(&path)?));
    }
    if sources.is_empty() {
        sources.push(Box::new(Cursor::new("first source\n")));
        sources.push(Box::new(Cursor::new("second source\n")));
    }

    let mut reader = MultiReader::from_std(sources).into_std();
    let mut writer = SplitWriter::from_std(io::stdout(), [Vec::new()]).into_std();

    let copied = io::copy(&mut reader, &mut writer)?;

    let (_, mut copies) = writer.into_inner().into_inner();
    let captured = copies.remove(0).into_inner();
    eprintln!("copied {} bytes, captured {} bytes", copied, captured.len());
    Ok(())
}
