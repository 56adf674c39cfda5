use crate::error::Result;
use crate::pipeline::{compose_bytes, PipelineDescriptor, StageDescriptor};
use crate::transfer::{transfer, FileSink, FileSource};
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::Path;

/// Options for the mask command
#[derive(Debug, Clone, Default)]
pub struct MaskOptions {
    /// Pipeline to run. When absent, a single-stage pipeline with a
    /// freshly generated mask is used and the mask is reported back.
    pub pipeline: Option<PipelineDescriptor>,
}

/// Outcome of a mask run
#[derive(Debug)]
pub struct MaskOutcome {
    pub bytes: usize,
    pub stages: usize,
    /// Set when no pipeline was given and a mask was generated
    pub generated_mask: Option<u8>,
}

/// Run a byte pipeline from one file into another.
/// Returns the bytes written plus the generated mask, if any.
pub fn mask_file(input: &Path, output: &Path, options: &MaskOptions) -> Result<MaskOutcome> {
    let (descriptor, generated_mask) = match &options.pipeline {
        Some(descriptor) => (descriptor.clone(), None),
        None => {
            let mut key = [0u8; 1];
            OsRng.fill_bytes(&mut key);
            let descriptor = PipelineDescriptor::new(vec![StageDescriptor::Mask { mask: key[0] }]);
            (descriptor, Some(key[0]))
        }
    };

    let chain = compose_bytes(&descriptor)?;
    let bytes = transfer(
        &mut FileSource::new(input),
        &chain,
        &mut FileSink::new(output),
    )?;

    Ok(MaskOutcome {
        bytes,
        stages: chain.stages(),
        generated_mask,
    })
}
