/*
 * Ported from mozjpeg to rust
 *
 * This file was part of the Independent JPEG Group's software:
 * Copyright (C) 1991-1996, Thomas G. Lane.
 * libjpeg-turbo Modifications:
 * Copyright (C) 2015, 2020, D. R. Commander.
 *
 * Conditions of distribution and use:
 * In plain English:
 *
 * 1. We don't promise that this software works.  (But if you find any bugs,
 *    please let us know!)
 * 2. You can use this software for whatever you want.  You don't have to pay us.
 * 3. You may not pretend that you wrote this software.  If you use it in a
 *    program, you must acknowledge somewhere in your documentation that
 *    you've used the IJG code.
 *
 * In legalese:
 *
 * The authors make NO WARRANTY or representation, either express or implied,
 * with respect to this software, its quality, accuracy, merchantability, or
 * fitness for a particular purpose.  This software is provided "AS IS", and you,
 * its user, assume the entire risk as to its quality and accuracy.
 *
 * This software is copyright (C) 1991-2020, Thomas G. Lane, Guido Vollbeding.
 * All Rights Reserved except as specified below.
 *
 * Permission is hereby granted to use, copy, modify, and distribute this
 * software (or portions thereof) for any purpose, without fee, subject to these
 * conditions:
 * (1) If any part of the source code for this software is distributed, then this
 * README file must be included, with this copyright and no-warranty notice
 * unaltered; and any additions, deletions, or changes to the original files
 * must be clearly indicated in accompanying documentation.
 * (2) If only executable code is distributed, then the accompanying
 * documentation must state that "this software is based in part on the work of
 * the Independent JPEG Group".
 * (3) Permission for use of this software is granted only if the user accepts
 * full responsibility for any undesirable consequences; the authors accept
 * NO LIABILITY for damages of any kind.
 *
 * These conditions apply to any software derived from or based on the IJG code,
 * not just to the unmodified library.  If you use our work, you ought to
 * acknowledge us.
 *
 * Permission is NOT granted for the use of any IJG author's name or company name
 * in advertising or publicity relating to this software or products derived from
 * it.  This software may be referred to only as "the Independent JPEG Group's
 * software".
 *
 * We specifically permit and encourage the use of this software as the basis of
 * commercial products, provided that all warranty or liability claims are
 * assumed by the product vendor.
 *
 * This file contains the forward DCT (Discrete Cosine Transform) in two
 * flavours which produce the same orthonormal coefficients:
 *
 * - a direct separable matrix product T * B * T' with a precomputed basis;
 * - a floating-point port of the Arai, Agui & Nakajima (AAN) algorithm
 *   from jfdctflt.c:
 *   Arai, Y., Agui, T., and Nakajima, M., "A Fast DCT-SQ Scheme for Images",
 *   Trans. IEICE E-71(11):1095 (Nov 1988).
 *   The AAN butterfly yields every coefficient multiplied by 8 and by the
 *   per-row and per-column AAN scale factors, which are divided out here
 *   instead of being folded into the quantization table.
 */

use crate::block::{RasterBlock, BLOCK_LEN};

/// # Forward DCT implementation
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DctMethod {
    /// Separable matrix multiplication with the orthonormal basis
    Matrix,

    /// AAN float butterfly, rescaled to the orthonormal result
    Fast,
}

impl Default for DctMethod {
    fn default() -> Self {
        DctMethod::Matrix
    }
}

/// Orthonormal DCT-II basis: `BASIS[u][x] = c(u) * cos((2x + 1) * u * pi / 16)`
/// with `c(0) = sqrt(1/8)` and `c(u) = 1/2` otherwise.
static BASIS: [[f32; 8]; 8] = [
    [0.353553391, 0.353553391, 0.353553391, 0.353553391, 0.353553391, 0.353553391, 0.353553391, 0.353553391],
    [0.490392640, 0.415734806, 0.277785117, 0.097545161, -0.097545161, -0.277785117, -0.415734806, -0.490392640],
    [0.461939766, 0.191341716, -0.191341716, -0.461939766, -0.461939766, -0.191341716, 0.191341716, 0.461939766],
    [0.415734806, -0.097545161, -0.490392640, -0.277785117, 0.277785117, 0.490392640, 0.097545161, -0.415734806],
    [0.353553391, -0.353553391, -0.353553391, 0.353553391, 0.353553391, -0.353553391, -0.353553391, 0.353553391],
    [0.277785117, -0.490392640, 0.097545161, 0.415734806, -0.415734806, -0.097545161, 0.490392640, -0.277785117],
    [0.191341716, -0.461939766, 0.461939766, -0.191341716, -0.191341716, 0.461939766, -0.461939766, 0.191341716],
    [0.097545161, -0.277785117, 0.415734806, -0.490392640, 0.490392640, -0.415734806, 0.277785117, -0.097545161],
];

/// `aanscalefactor[k] = cos(k * pi / 16) * sqrt(2)` for k > 0, 1.0 for k = 0
static AAN_SCALE_FACTORS: [f32; 8] = [
    1.0,
    1.387039845,
    1.306562965,
    1.175875602,
    1.0,
    0.785694958,
    0.541196100,
    0.275899379,
];

const FIX_0_382683433: f32 = 0.382683433;
const FIX_0_541196100: f32 = 0.541196100;
const FIX_0_707106781: f32 = 0.707106781;
const FIX_1_306562965: f32 = 1.306562965;

/// Transform one block of level shifted samples with the selected method
#[inline]
pub fn forward_dct(method: DctMethod, samples: &RasterBlock<i8>) -> RasterBlock<f32> {
    match method {
        DctMethod::Matrix => forward_dct_matrix(samples),
        DctMethod::Fast => forward_dct_fast(samples),
    }
}

/// `T * B * T'`
pub fn forward_dct_matrix(samples: &RasterBlock<i8>) -> RasterBlock<f32> {
    // tmp = T * B
    let mut tmp = [[0f32; 8]; 8];
    for (u, row) in tmp.iter_mut().enumerate() {
        for (y, value) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for x in 0..8 {
                sum += BASIS[u][x] * f32::from(*samples.at(x, y));
            }
            *value = sum;
        }
    }

    // out = tmp * T'
    let mut out = [0f32; BLOCK_LEN];
    for u in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0;
            for y in 0..8 {
                sum += tmp[u][y] * BASIS[v][y];
            }
            out[u * 8 + v] = sum;
        }
    }

    RasterBlock(out)
}

/// One 8 point AAN butterfly over `data[offset + k * stride]`
#[inline(always)]
fn aan_1d(data: &mut [f32; BLOCK_LEN], offset: usize, stride: usize) {
    let d = |k: usize| offset + k * stride;

    let tmp0 = data[d(0)] + data[d(7)];
    let tmp7 = data[d(0)] - data[d(7)];
    let tmp1 = data[d(1)] + data[d(6)];
    let tmp6 = data[d(1)] - data[d(6)];
    let tmp2 = data[d(2)] + data[d(5)];
    let tmp5 = data[d(2)] - data[d(5)];
    let tmp3 = data[d(3)] + data[d(4)];
    let tmp4 = data[d(3)] - data[d(4)];

    /* Even part */

    let tmp10 = tmp0 + tmp3; /* phase 2 */
    let tmp13 = tmp0 - tmp3;
    let tmp11 = tmp1 + tmp2;
    let tmp12 = tmp1 - tmp2;

    data[d(0)] = tmp10 + tmp11; /* phase 3 */
    data[d(4)] = tmp10 - tmp11;

    let z1 = (tmp12 + tmp13) * FIX_0_707106781; /* c4 */
    data[d(2)] = tmp13 + z1; /* phase 5 */
    data[d(6)] = tmp13 - z1;

    /* Odd part */

    let tmp10 = tmp4 + tmp5; /* phase 2 */
    let tmp11 = tmp5 + tmp6;
    let tmp12 = tmp6 + tmp7;

    /* The rotator is modified from fig 4-8 to avoid extra negations. */
    let z5 = (tmp10 - tmp12) * FIX_0_382683433; /* c6 */
    let z2 = FIX_0_541196100 * tmp10 + z5; /* c2-c6 */
    let z4 = FIX_1_306562965 * tmp12 + z5; /* c2+c6 */
    let z3 = tmp11 * FIX_0_707106781; /* c4 */

    let z11 = tmp7 + z3; /* phase 5 */
    let z13 = tmp7 - z3;

    data[d(5)] = z13 + z2; /* phase 6 */
    data[d(3)] = z13 - z2;
    data[d(1)] = z11 + z4;
    data[d(7)] = z11 - z4;
}

/// AAN butterfly on rows then columns, descaled to the orthonormal result
pub fn forward_dct_fast(samples: &RasterBlock<i8>) -> RasterBlock<f32> {
    let mut data = [0f32; BLOCK_LEN];
    for (dst, &src) in data.iter_mut().zip(samples.0.iter()) {
        *dst = f32::from(src);
    }

    /* Pass 1: process rows. */
    for y in 0..8 {
        aan_1d(&mut data, y * 8, 1);
    }

    /* Pass 2: process columns. */
    for x in 0..8 {
        aan_1d(&mut data, x, 8);
    }

    for (i, value) in data.iter_mut().enumerate() {
        let scale = AAN_SCALE_FACTORS[i / 8] * AAN_SCALE_FACTORS[i % 8];
        *value /= scale * 8.0;
    }

    RasterBlock(data)
}
