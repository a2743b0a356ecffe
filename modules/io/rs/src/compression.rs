use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eyre::{ensure, Result, WrapErr};
use flate2::read::MultiGzDecoder;

pub enum DecompressedStream {
    PlainText(File),
    Gzip(MultiGzDecoder<File>),
}

impl DecompressedStream {
    pub fn box_bufread(self) -> Box<dyn BufRead + Send + Sync + 'static> {
        match self {
            DecompressedStream::PlainText(file) => Box::new(BufReader::new(file)),
            DecompressedStream::Gzip(decoder) => Box::new(BufReader::new(decoder)),
        }
    }
}

/// Open a file for reading. Gzip (and BGZF) files are detected by their signature and decoded on
/// the fly; everything else is read as plain text.
pub fn read_file(path: impl AsRef<Path>) -> Result<DecompressedStream> {
    let path = path.as_ref();
    ensure!(path.exists(), "File {} does not exist", path.display());

    let kind = infer::get_from_path(path)
        .wrap_err_with(|| format!("Failed to read the signature of {}", path.display()))?;
    let file =
        File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let stream = match kind.map(|x| (x.extension(), x.mime_type())) {
        Some(("gz", "application/gzip")) => {
            log::debug!("Reading {} as a gzip stream", path.display());
            DecompressedStream::Gzip(MultiGzDecoder::new(file))
        }
        // Always assume plain text if there is no clear match
        _ => DecompressedStream::PlainText(file),
    };
    Ok(stream)
}
