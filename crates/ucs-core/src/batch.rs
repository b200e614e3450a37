//! Batch transforms over buffers of colors
//!
//! Colors never interact, so buffers are split into chunks that run on the
//! rayon pool when the `parallel` feature is on. Each chunk goes through a
//! CPU-dispatched inner loop.

use multiversion::multiversion;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::cam02::UcsTransform;
use crate::color::{Jab, Jmh, Rgb};
use crate::conditions::ViewingConditions;
use crate::error::{Error, Result};
use crate::inverse::InverseSolver;

/// Colors per parallel work item
const CHUNK: usize = 1024;

#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
fn forward_chunk(transform: &UcsTransform, src: &[Rgb], dst: &mut [Jab]) {
    for (rgb, out) in src.iter().zip(dst.iter_mut()) {
        *out = transform.forward(*rgb);
    }
}

fn forward_slice(transform: &UcsTransform, src: &[Rgb], dst: &mut [Jab]) {
    #[cfg(feature = "parallel")]
    {
        src.par_chunks(CHUNK)
            .zip(dst.par_chunks_mut(CHUNK))
            .for_each(|(s, d)| forward_chunk(transform, s, d));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (s, d) in src.chunks(CHUNK).zip(dst.chunks_mut(CHUNK)) {
            forward_chunk(transform, s, d);
        }
    }
}

/// Transform a slice of colors
pub fn srgb_to_ucs_batch(colors: &[Rgb], conditions: &ViewingConditions) -> Vec<Jab> {
    let mut out = vec![Jab::default(); colors.len()];
    forward_slice(&UcsTransform::new(conditions), colors, &mut out);
    trace!(colors = colors.len(), "srgb_to_ucs_batch");
    out
}

/// Transform into a caller-provided buffer of the same length
pub fn srgb_to_ucs_into(src: &[Rgb], dst: &mut [Jab], conditions: &ViewingConditions) -> Result<()> {
    if dst.len() != src.len() {
        return Err(Error::BufferSize {
            expected: src.len(),
            actual: dst.len(),
        });
    }
    forward_slice(&UcsTransform::new(conditions), src, dst);
    trace!(colors = src.len(), "srgb_to_ucs_into");
    Ok(())
}

/// Transform a flat `[r, g, b, r, g, b, ...]` buffer into `[J', a', b', ...]`
///
/// Both buffers must have the same length, a multiple of 3.
pub fn srgb_to_ucs_interleaved(
    src: &[f64],
    dst: &mut [f64],
    conditions: &ViewingConditions,
) -> Result<()> {
    if src.len() % 3 != 0 {
        return Err(Error::BufferSize {
            expected: src.len().next_multiple_of(3),
            actual: src.len(),
        });
    }
    let colors: &[Rgb] = bytemuck::try_cast_slice(src).map_err(|_| Error::BufferSize {
        expected: src.len().next_multiple_of(3),
        actual: src.len(),
    })?;
    let expected = src.len();
    let actual = dst.len();
    let out: &mut [Jab] = bytemuck::try_cast_slice_mut(dst)
        .map_err(|_| Error::BufferSize { expected, actual })?;
    srgb_to_ucs_into(colors, out, conditions)
}

/// Transform packed 8-bit RGB
pub fn srgb8_to_ucs(src: &[u8], conditions: &ViewingConditions) -> Result<Vec<Jab>> {
    if src.len() % 3 != 0 {
        return Err(Error::BufferSize {
            expected: src.len().next_multiple_of(3),
            actual: src.len(),
        });
    }
    let colors: Vec<Rgb> = src
        .chunks_exact(3)
        .map(|c| Rgb::from_u8(c[0], c[1], c[2]))
        .collect();
    Ok(srgb_to_ucs_batch(&colors, conditions))
}

/// Invert a slice of Jab colors; each target is an independent solve
pub fn ucs_to_srgb_batch(targets: &[Jab], conditions: &ViewingConditions, bounded: bool) -> Vec<Rgb> {
    let solver = InverseSolver::new(conditions);
    trace!(colors = targets.len(), bounded, "ucs_to_srgb_batch");
    #[cfg(feature = "parallel")]
    {
        targets
            .par_iter()
            .map(|&t| solver.solve(t, bounded).rgb)
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        targets.iter().map(|&t| solver.solve(t, bounded).rgb).collect()
    }
}

/// [`crate::jab_to_jmh`] over a slice
pub fn jab_to_jmh_batch(colors: &[Jab]) -> Vec<Jmh> {
    colors.iter().map(Jab::to_jmh).collect()
}

/// [`crate::jmh_to_jab`] over a slice
pub fn jmh_to_jab_batch(colors: &[Jmh]) -> Vec<Jab> {
    colors.iter().map(Jmh::to_jab).collect()
}
