//! Operation pipeline: validate up front, run in canonical order.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BmpError;
use crate::filter::Filter;
use crate::image::Bmp;
use crate::limits::Limits;
use crate::transform::{CropSpec, MirrorAxis, Rotation, crop, mirror, rotate};

/// One requested pipeline operation.
///
/// Descriptors are typed, so token-level validation happens when they
/// are parsed ([`Filter::parse`], [`Rotation::parse`],
/// [`MirrorAxis::parse`], [`CropSpec::parse`]); an unknown token fails
/// there, before a pipeline is ever built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Crop(CropSpec),
    Mirror(MirrorAxis),
    Rotate(Rotation),
    Filter(Filter),
}

/// Check an operation list before any decode or pixel work.
///
/// Rejects an empty list and argument values that are invalid regardless
/// of image dimensions (negative pixelate/blur strengths, explicit zero
/// crop extents).
pub fn validate_ops(ops: &[Operation]) -> Result<(), BmpError> {
    if ops.is_empty() {
        return Err(BmpError::NoOperations);
    }
    for op in ops {
        match op {
            Operation::Crop(spec) => spec.validate()?,
            Operation::Filter(filter) => filter.validate()?,
            Operation::Mirror(_) | Operation::Rotate(_) => {}
        }
    }
    Ok(())
}

/// Run operations against a decoded document.
///
/// Execution order is fixed for determinism regardless of how the list
/// interleaves kinds: all crops, then all mirrors, then all rotates
/// (each group in list order), then the header picks up the resized
/// dimensions, then all filters.
pub fn apply(bmp: &mut Bmp, ops: &[Operation], stop: impl Stop) -> Result<(), BmpError> {
    validate_ops(ops)?;
    apply_validated(bmp, ops, &stop)
}

fn apply_validated(bmp: &mut Bmp, ops: &[Operation], stop: &dyn Stop) -> Result<(), BmpError> {
    for op in ops {
        if let Operation::Crop(spec) = op {
            bmp.image = crop(&bmp.image, spec)?;
            stop.check()?;
        }
    }
    for op in ops {
        if let Operation::Mirror(axis) = op {
            mirror(&mut bmp.image, *axis);
        }
    }
    for op in ops {
        if let Operation::Rotate(rotation) = op {
            bmp.image = rotate(&bmp.image, *rotation);
            stop.check()?;
        }
    }
    bmp.header
        .sync_dimensions(bmp.image.width(), bmp.image.height());
    for op in ops {
        if let Operation::Filter(filter) = op {
            filter.apply(&mut bmp.image, stop)?;
        }
    }
    Ok(())
}

/// Decode, apply, and re-encode in one shot.
///
/// The operation list is validated before the input is touched; output
/// bytes exist only if every stage succeeded, so a failure anywhere
/// never produces a partial file.
pub fn transform(
    data: &[u8],
    ops: &[Operation],
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    validate_ops(ops)?;
    let stop: &dyn Stop = &stop;
    let mut bmp = crate::decode::decode_impl(data, limits, stop)?;
    apply_validated(&mut bmp, ops, stop)?;
    crate::encode::encode(&bmp, stop)
}
