use crate::error::Result;
use crate::pipeline::Stage;
use std::path::{Path, PathBuf};

/// Producer side of a transfer. Yields the entire payload in one call.
pub trait ByteSource {
    fn read_all(&mut self) -> Result<Vec<u8>>;
}

/// Consumer side of a transfer. Accepts the entire payload in one call.
pub trait ByteSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

/// Reads a file into memory.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ByteSource for FileSource {
    fn read_all(&mut self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// Writes a file, creating it or truncating whatever was there.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSink {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ByteSink for FileSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory source for tests and embedding.
pub struct BufferSource {
    data: Vec<u8>,
}

impl BufferSource {
    pub fn new(data: Vec<u8>) -> Self {
        BufferSource { data }
    }
}

impl ByteSource for BufferSource {
    fn read_all(&mut self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// In-memory sink. The written payload stays readable afterwards.
#[derive(Default)]
pub struct BufferSink {
    data: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink::default()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteSink for BufferSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.data.clear();
        self.data.extend_from_slice(data);
        Ok(())
    }
}

/// Move one payload from source to sink through a stage.
///
/// Reads everything, applies the stage once over the whole buffer, writes
/// everything, and returns the number of bytes written. The input must fit
/// in memory. There is no rollback; a failing write can leave the sink
/// partially written.
pub fn transfer(
    source: &mut dyn ByteSource,
    stage: &dyn Stage<u8>,
    sink: &mut dyn ByteSink,
) -> Result<usize> {
    let input = source.read_all()?;
    let output = stage.apply(&input);
    sink.write_all(&output)?;
    Ok(output.len())
}
