use crate::error::Result;
use crate::pipeline::{compose_text, PipelineDescriptor};

/// Options for the encode command
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub pipeline: PipelineDescriptor,
}

/// Run a text pipeline over the input and return the transformed text.
pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<String> {
    let chain = compose_text(&options.pipeline)?;
    Ok(chain.apply_str(text))
}
