use crate::error::{Result, ScytaleError};
use crate::pipeline::descriptor::{PipelineDescriptor, StageDescriptor};
use crate::pipeline::remap::{RemapStage, Symbol};
use crate::pipeline::reverse::ReverseStage;
use crate::pipeline::shift::ShiftCipher;
use crate::pipeline::stage::{Chain, Stage};
use crate::pipeline::xor::XorCipher;

/// Build a text chain from a descriptor list.
///
/// The first descriptor must be the `shift` leaf; each later descriptor
/// wraps everything built so far, so the last entry runs outermost.
/// Every construction problem is rejected here, before the chain exists.
pub fn compose_text(descriptor: &PipelineDescriptor) -> Result<Chain<char>> {
    let stages = descriptor.stages();
    let head = stages.first().ok_or(ScytaleError::EmptyPipeline)?;
    let leaf: Box<dyn Stage<char>> = match *head {
        StageDescriptor::Shift { shift } => Box::new(ShiftCipher::new(shift)),
        StageDescriptor::Mask { .. } => {
            return Err(ScytaleError::DomainMismatch("mask", "text"))
        }
        StageDescriptor::Reverse | StageDescriptor::Remap { .. } => {
            return Err(ScytaleError::ExpectedLeaf(head.kind()))
        }
    };
    wrap_rest(leaf, stages)
}

/// Build a byte chain from a descriptor list.
///
/// Same shape as [`compose_text`], with the `mask` leaf opening the
/// pipeline.
pub fn compose_bytes(descriptor: &PipelineDescriptor) -> Result<Chain<u8>> {
    let stages = descriptor.stages();
    let head = stages.first().ok_or(ScytaleError::EmptyPipeline)?;
    let leaf: Box<dyn Stage<u8>> = match *head {
        StageDescriptor::Mask { mask } => Box::new(XorCipher::new(mask)),
        StageDescriptor::Shift { .. } => {
            return Err(ScytaleError::DomainMismatch("shift", "byte"))
        }
        StageDescriptor::Reverse | StageDescriptor::Remap { .. } => {
            return Err(ScytaleError::ExpectedLeaf(head.kind()))
        }
    };
    wrap_rest(leaf, stages)
}

/// Wrap the leaf in the remaining descriptors, bottom up.
fn wrap_rest<T: Symbol>(leaf: Box<dyn Stage<T>>, stages: &[StageDescriptor]) -> Result<Chain<T>> {
    let mut chain = leaf;
    for (position, stage) in stages.iter().enumerate().skip(1) {
        chain = match *stage {
            StageDescriptor::Reverse => Box::new(ReverseStage::new(chain)),
            StageDescriptor::Remap { modulus } => Box::new(RemapStage::new(chain, modulus)?),
            StageDescriptor::Shift { .. } | StageDescriptor::Mask { .. } => {
                return Err(ScytaleError::MisplacedLeaf(stage.kind(), position))
            }
        };
    }
    Ok(Chain::new(chain, stages.len()))
}
